//! Database methods for search_analytics table

use chrono::Utc;

use crate::db::{Database, DbResult};
use crate::models::SearchStat;

impl Database {
    /// Bump the counter for a normalized query in one statement.
    pub fn record_search(&self, query: &str) -> DbResult<()> {
        let conn = self.conn()?;
        let now = Utc::now().to_rfc3339();
        conn.execute(
            "INSERT INTO search_analytics (query, count, last_seen) VALUES (?1, 1, ?2)
             ON CONFLICT(query) DO UPDATE SET
                count = count + 1,
                last_seen = excluded.last_seen",
            rusqlite::params![query, now],
        )?;
        Ok(())
    }

    /// Most frequent queries first, most recent breaking ties.
    pub fn list_searches(&self, limit: i64) -> DbResult<Vec<SearchStat>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT query, count, last_seen FROM search_analytics
             ORDER BY count DESC, last_seen DESC LIMIT ?1",
        )?;
        let rows = stmt.query_map([limit], |row| {
            Ok(SearchStat {
                query: row.get(0)?,
                count: row.get(1)?,
                last_seen: row.get(2)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}
