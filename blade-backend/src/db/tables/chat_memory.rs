//! Database methods for ai_memory table (assistant chat log)

use chrono::Utc;

use crate::db::{Database, DbResult};
use crate::models::ChatMemory;

impl Database {
    pub fn save_chat_memory(&self, user_key: &str, input: &str, response: &str) -> DbResult<i64> {
        let conn = self.conn()?;
        let now = Utc::now().to_rfc3339();
        conn.execute(
            "INSERT INTO ai_memory (user_key, input, response, created_at) VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![user_key, input, response, now],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Latest exchanges for a visitor, newest first.
    pub fn recent_chat_memory(&self, user_key: &str, limit: i64) -> DbResult<Vec<ChatMemory>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, user_key, input, response, created_at FROM ai_memory
             WHERE user_key = ?1 ORDER BY id DESC LIMIT ?2",
        )?;
        let rows = stmt.query_map(rusqlite::params![user_key, limit], |row| {
            Ok(ChatMemory {
                id: row.get(0)?,
                user_key: row.get(1)?,
                input: row.get(2)?,
                response: row.get(3)?,
                created_at: row.get(4)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}

#[cfg(test)]
mod tests {
    use crate::db::Database;

    #[test]
    fn test_recent_memory_newest_first_and_scoped() {
        let (db, _dir) = Database::for_tests();
        db.save_chat_memory("visitor-a", "first", "r1").unwrap();
        db.save_chat_memory("visitor-b", "other", "rb").unwrap();
        db.save_chat_memory("visitor-a", "second", "r2").unwrap();

        let rows = db.recent_chat_memory("visitor-a", 10).unwrap();
        let inputs: Vec<&str> = rows.iter().map(|m| m.input.as_str()).collect();
        assert_eq!(inputs, vec!["second", "first"]);
    }

    #[test]
    fn test_recent_memory_limit() {
        let (db, _dir) = Database::for_tests();
        for i in 0..10 {
            db.save_chat_memory("public", &format!("msg {}", i), "ok").unwrap();
        }
        let rows = db.recent_chat_memory("public", 6).unwrap();
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0].input, "msg 9");
    }
}
