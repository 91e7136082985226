//! Database methods for rewards_members table
//!
//! Emails are expected to be normalized (trimmed, lowercased) by the caller.

use chrono::Utc;
use rusqlite::OptionalExtension;

use crate::db::{Database, DbResult};
use crate::models::{Member, PointsUpdate};

const MEMBER_COLUMNS: &str = "id, name, email, member_code, points, created_at";

impl Database {
    pub fn get_member_by_email(&self, email: &str) -> DbResult<Option<Member>> {
        let conn = self.conn()?;
        let member = conn
            .query_row(
                &format!("SELECT {} FROM rewards_members WHERE email = ?1", MEMBER_COLUMNS),
                [email],
                map_member_row,
            )
            .optional()?;
        Ok(member)
    }

    /// Insert a member unless the email is already enrolled.
    /// Returns true when a new row was written.
    pub fn insert_member_if_absent(
        &self,
        name: &str,
        email: &str,
        member_code: &str,
        starting_points: i64,
    ) -> DbResult<bool> {
        let conn = self.conn()?;
        let now = Utc::now().to_rfc3339();
        let inserted = conn.execute(
            "INSERT INTO rewards_members (name, email, member_code, points, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(email) DO NOTHING",
            rusqlite::params![name, email, member_code, starting_points, now],
        )?;
        Ok(inserted > 0)
    }

    /// Add `delta` points in one statement. The balance is only touched when
    /// the sum stays inside i64, since SQLite would otherwise store a REAL.
    pub fn add_member_points(&self, email: &str, delta: i64) -> DbResult<PointsUpdate> {
        let (low, high) = if delta >= 0 {
            (i64::MIN, i64::MAX - delta)
        } else {
            (i64::MIN - delta, i64::MAX)
        };
        let conn = self.conn()?;
        let updated = conn
            .query_row(
                &format!(
                    "UPDATE rewards_members SET points = points + ?1
                     WHERE email = ?2 AND points BETWEEN ?3 AND ?4
                     RETURNING {}",
                    MEMBER_COLUMNS
                ),
                rusqlite::params![delta, email, low, high],
                map_member_row,
            )
            .optional()?;
        if let Some(member) = updated {
            return Ok(PointsUpdate::Updated(member));
        }

        let exists = conn
            .query_row("SELECT 1 FROM rewards_members WHERE email = ?1", [email], |_| Ok(()))
            .optional()?
            .is_some();
        Ok(if exists {
            PointsUpdate::OutOfRange
        } else {
            PointsUpdate::NotFound
        })
    }

    /// Newest members first.
    pub fn list_members(&self, limit: i64) -> DbResult<Vec<Member>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM rewards_members ORDER BY created_at DESC, id DESC LIMIT ?1",
            MEMBER_COLUMNS
        ))?;
        let rows = stmt.query_map([limit], map_member_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}

fn map_member_row(row: &rusqlite::Row) -> rusqlite::Result<Member> {
    Ok(Member {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        member_code: row.get(3)?,
        points: row.get(4)?,
        created_at: row.get(5)?,
    })
}

#[cfg(test)]
mod tests {
    use crate::db::Database;
    use crate::models::PointsUpdate;

    fn updated(result: PointsUpdate) -> crate::models::Member {
        match result {
            PointsUpdate::Updated(member) => member,
            other => panic!("expected update, got {:?}", other),
        }
    }

    #[test]
    fn test_insert_if_absent_keeps_first_row() {
        let (db, _dir) = Database::for_tests();
        assert!(db.insert_member_if_absent("Sam", "sam@x.com", "ABC234", 1).unwrap());
        assert!(!db.insert_member_if_absent("Other", "sam@x.com", "ZZZ999", 1).unwrap());

        let member = db.get_member_by_email("sam@x.com").unwrap().unwrap();
        assert_eq!(member.name, "Sam");
        assert_eq!(member.member_code, "ABC234");
        assert_eq!(member.points, 1);
    }

    #[test]
    fn test_add_points_returns_updated_member() {
        let (db, _dir) = Database::for_tests();
        db.insert_member_if_absent("Sam", "sam@x.com", "ABC234", 1).unwrap();
        let member = updated(db.add_member_points("sam@x.com", 10).unwrap());
        assert_eq!(member.points, 11);
        let member = updated(db.add_member_points("sam@x.com", -3).unwrap());
        assert_eq!(member.points, 8);
    }

    #[test]
    fn test_add_points_unknown_email_creates_nothing() {
        let (db, _dir) = Database::for_tests();
        assert_eq!(db.add_member_points("ghost@x.com", 5).unwrap(), PointsUpdate::NotFound);
        assert!(db.get_member_by_email("ghost@x.com").unwrap().is_none());
        assert!(db.list_members(10).unwrap().is_empty());
    }

    #[test]
    fn test_overflowing_grant_leaves_balance_intact() {
        let (db, _dir) = Database::for_tests();
        db.insert_member_if_absent("Sam", "sam@x.com", "ABC234", 1).unwrap();

        assert_eq!(db.add_member_points("sam@x.com", i64::MAX).unwrap(), PointsUpdate::OutOfRange);
        let member = db.get_member_by_email("sam@x.com").unwrap().unwrap();
        assert_eq!(member.points, 1);

        let member = updated(db.add_member_points("sam@x.com", i64::MAX - 1).unwrap());
        assert_eq!(member.points, i64::MAX);
        assert_eq!(db.add_member_points("sam@x.com", 1).unwrap(), PointsUpdate::OutOfRange);
        assert_eq!(db.list_members(10).unwrap()[0].points, i64::MAX);
    }

    #[test]
    fn test_underflowing_grant_is_refused() {
        let (db, _dir) = Database::for_tests();
        db.insert_member_if_absent("Sam", "sam@x.com", "ABC234", -1).unwrap();
        assert_eq!(db.add_member_points("sam@x.com", i64::MIN).unwrap(), PointsUpdate::OutOfRange);
        let member = updated(db.add_member_points("sam@x.com", i64::MIN + 1).unwrap());
        assert_eq!(member.points, i64::MIN);
    }

    #[test]
    fn test_points_column_rejects_non_integers() {
        let (db, _dir) = Database::for_tests();
        db.insert_member_if_absent("Sam", "sam@x.com", "ABC234", 1).unwrap();
        let conn = db.conn().unwrap();
        let result = conn.execute("UPDATE rewards_members SET points = 1.5 WHERE email = 'sam@x.com'", []);
        assert!(result.is_err());
    }

    #[test]
    fn test_list_members_newest_first() {
        let (db, _dir) = Database::for_tests();
        db.insert_member_if_absent("A", "a@x.com", "AAAAAA", 1).unwrap();
        db.insert_member_if_absent("B", "b@x.com", "BBBBBB", 1).unwrap();
        let members = db.list_members(10).unwrap();
        assert_eq!(members[0].email, "b@x.com");
        assert_eq!(db.list_members(1).unwrap().len(), 1);
    }
}
