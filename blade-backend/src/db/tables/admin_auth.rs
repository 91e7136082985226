//! Database methods for admin_users and admin_sessions tables

use chrono::{DateTime, Duration, Utc};
use rusqlite::OptionalExtension;
use uuid::Uuid;

use crate::db::{Database, DbResult};
use crate::models::{AdminSession, AdminUser};

impl Database {
    /// Create the admin user, or replace its password if it already exists.
    pub fn upsert_admin_user(&self, email: &str, password_hash: &str, salt: &str) -> DbResult<()> {
        let conn = self.conn()?;
        let now = Utc::now().to_rfc3339();
        conn.execute(
            "INSERT INTO admin_users (email, password_hash, salt, role, created_at)
             VALUES (?1, ?2, ?3, 'admin', ?4)
             ON CONFLICT(email) DO UPDATE SET
                password_hash = excluded.password_hash,
                salt = excluded.salt",
            rusqlite::params![email, password_hash, salt, now],
        )?;
        Ok(())
    }

    pub fn get_admin_user_by_email(&self, email: &str) -> DbResult<Option<AdminUser>> {
        let conn = self.conn()?;
        let user = conn
            .query_row(
                "SELECT id, email, password_hash, salt, role, created_at
                 FROM admin_users WHERE email = ?1",
                [email],
                row_to_admin_user,
            )
            .optional()?;
        Ok(user)
    }

    pub fn get_admin_user(&self, id: i64) -> DbResult<Option<AdminUser>> {
        let conn = self.conn()?;
        let user = conn
            .query_row(
                "SELECT id, email, password_hash, salt, role, created_at
                 FROM admin_users WHERE id = ?1",
                [id],
                row_to_admin_user,
            )
            .optional()?;
        Ok(user)
    }

    pub fn create_admin_session(&self, user_id: i64, ttl_hours: i64) -> DbResult<AdminSession> {
        let conn = self.conn()?;
        let token = Uuid::new_v4().to_string();
        let created_at = Utc::now();
        let expires_at = created_at + Duration::hours(ttl_hours);

        conn.execute(
            "INSERT INTO admin_sessions (token, user_id, created_at, expires_at) VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![token, user_id, created_at.to_rfc3339(), expires_at.to_rfc3339()],
        )?;

        Ok(AdminSession {
            id: conn.last_insert_rowid(),
            token,
            user_id,
            expires_at,
        })
    }

    /// Look up an unexpired session by token.
    pub fn validate_admin_session(&self, token: &str) -> DbResult<Option<AdminSession>> {
        let conn = self.conn()?;
        let row = conn
            .query_row(
                "SELECT id, token, user_id, expires_at FROM admin_sessions WHERE token = ?1",
                [token],
                |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, i64>(2)?,
                        row.get::<_, String>(3)?,
                    ))
                },
            )
            .optional()?;

        let Some((id, token, user_id, expires_at)) = row else {
            return Ok(None);
        };

        // Unparseable expiry is treated as expired
        let Some(expires_at) = parse_ts(&expires_at) else {
            log::warn!("Admin session {} has a malformed expiry", id);
            return Ok(None);
        };
        if expires_at <= Utc::now() {
            return Ok(None);
        }

        Ok(Some(AdminSession {
            id,
            token,
            user_id,
            expires_at,
        }))
    }

    pub fn delete_admin_session(&self, token: &str) -> DbResult<bool> {
        let conn = self.conn()?;
        let rows_affected = conn.execute("DELETE FROM admin_sessions WHERE token = ?1", [token])?;
        Ok(rows_affected > 0)
    }

    /// Drop sessions past their expiry. Returns how many were removed.
    pub fn purge_expired_admin_sessions(&self) -> DbResult<usize> {
        let conn = self.conn()?;
        let now = Utc::now().to_rfc3339();
        Ok(conn.execute("DELETE FROM admin_sessions WHERE expires_at <= ?1", [now])?)
    }
}

fn row_to_admin_user(row: &rusqlite::Row) -> rusqlite::Result<AdminUser> {
    Ok(AdminUser {
        id: row.get(0)?,
        email: row.get(1)?,
        password_hash: row.get(2)?,
        salt: row.get(3)?,
        role: row.get(4)?,
        created_at: row.get(5)?,
    })
}

fn parse_ts(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use crate::db::Database;

    fn seeded_admin(db: &Database) -> i64 {
        db.upsert_admin_user("owner@blade.test", "hash", "salt").unwrap();
        db.get_admin_user_by_email("owner@blade.test").unwrap().unwrap().id
    }

    #[test]
    fn test_session_roundtrip_and_logout() {
        let (db, _dir) = Database::for_tests();
        let user_id = seeded_admin(&db);

        let session = db.create_admin_session(user_id, 24).unwrap();
        let found = db.validate_admin_session(&session.token).unwrap().unwrap();
        assert_eq!(found.id, session.id);
        assert_eq!(found.user_id, user_id);
        assert_eq!(found.expires_at.timestamp(), session.expires_at.timestamp());
        let user = db.get_admin_user(found.user_id).unwrap().unwrap();
        assert_eq!(user.email, "owner@blade.test");

        assert!(db.delete_admin_session(&session.token).unwrap());
        assert!(db.validate_admin_session(&session.token).unwrap().is_none());
    }

    #[test]
    fn test_expired_session_is_rejected_and_purged() {
        let (db, _dir) = Database::for_tests();
        let user_id = seeded_admin(&db);

        let session = db.create_admin_session(user_id, -1).unwrap();
        assert!(db.validate_admin_session(&session.token).unwrap().is_none());
        assert_eq!(db.purge_expired_admin_sessions().unwrap(), 1);
    }

    #[test]
    fn test_upsert_replaces_password() {
        let (db, _dir) = Database::for_tests();
        db.upsert_admin_user("owner@blade.test", "h1", "s1").unwrap();
        db.upsert_admin_user("owner@blade.test", "h2", "s2").unwrap();
        let user = db.get_admin_user_by_email("owner@blade.test").unwrap().unwrap();
        assert_eq!(user.password_hash, "h2");
        assert_eq!(user.salt, "s2");
    }
}
