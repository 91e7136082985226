//! Database methods for the knowledge table (chat responder keywords)

use crate::db::{Database, DbResult};
use crate::models::KnowledgeEntry;

/// Seed rows written when the knowledge table is empty.
const DEFAULT_KNOWLEDGE: &[(&str, &str)] = &[
    (
        "razor",
        "Our Precision Razor uses a balanced weight and glide guard for a smooth, confident shave.",
    ),
    (
        "cream",
        "The Rich Shaving Cream hydrates first, then lifts the hair for a clean finish.",
    ),
    (
        "beard",
        "Beard Oil keeps the line sharp and the skin calm, especially after a hot towel rinse.",
    ),
    (
        "pomade",
        "Styling Pomade gives controlled hold with a soft matte finish and zero crunch.",
    ),
    (
        "franchise",
        "We are expanding through franchise partners who value premium grooming and local community trust.",
    ),
    (
        "price",
        "Each product is priced for daily use with pro-grade quality. Ask me about a specific item.",
    ),
];

impl Database {
    pub(crate) fn seed_default_knowledge(&self) -> DbResult<()> {
        let mut conn = self.conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM knowledge", [], |row| row.get(0))?;
        if count > 0 {
            return Ok(());
        }

        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare("INSERT INTO knowledge (keyword, response) VALUES (?1, ?2)")?;
            for (keyword, response) in DEFAULT_KNOWLEDGE {
                stmt.execute([keyword, response])?;
            }
        }
        tx.commit()?;
        log::info!("Seeded {} default knowledge entries", DEFAULT_KNOWLEDGE.len());
        Ok(())
    }

    /// Entries whose non-empty keyword occurs somewhere in `normalized`.
    /// Ranking is left to the caller.
    pub fn knowledge_candidates(&self, normalized: &str) -> DbResult<Vec<KnowledgeEntry>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, keyword, response FROM knowledge
             WHERE keyword <> '' AND instr(?1, keyword) > 0
             ORDER BY id",
        )?;
        let rows = stmt.query_map([normalized], map_knowledge_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Store a new keyword/response pair. Inputs must already be normalized.
    pub fn insert_knowledge(&self, keyword: &str, response: &str) -> DbResult<KnowledgeEntry> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO knowledge (keyword, response) VALUES (?1, ?2)",
            [keyword, response],
        )?;
        Ok(KnowledgeEntry {
            id: conn.last_insert_rowid(),
            keyword: keyword.to_string(),
            response: response.to_string(),
        })
    }

    #[cfg(test)]
    pub fn list_knowledge(&self) -> DbResult<Vec<KnowledgeEntry>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT id, keyword, response FROM knowledge ORDER BY id")?;
        let rows = stmt.query_map([], map_knowledge_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}

fn map_knowledge_row(row: &rusqlite::Row) -> rusqlite::Result<KnowledgeEntry> {
    Ok(KnowledgeEntry {
        id: row.get(0)?,
        keyword: row.get(1)?,
        response: row.get(2)?,
    })
}

#[cfg(test)]
mod tests {
    use crate::db::Database;

    #[test]
    fn test_seeds_defaults_once() {
        let (db, dir) = Database::for_tests();
        assert_eq!(db.list_knowledge().unwrap().len(), 6);

        // Reopening must not seed a second copy
        let path = dir.path().join("test.db");
        drop(db);
        let db = Database::new(path.to_str().unwrap()).unwrap();
        assert_eq!(db.list_knowledge().unwrap().len(), 6);
    }

    #[test]
    fn test_candidates_are_substrings_of_query() {
        let (db, _dir) = Database::for_tests();
        let hits = db.knowledge_candidates("need a razor and some beard oil").unwrap();
        let keywords: Vec<&str> = hits.iter().map(|e| e.keyword.as_str()).collect();
        assert_eq!(keywords, vec!["razor", "beard"]);

        assert!(db.knowledge_candidates("hello there").unwrap().is_empty());
    }

    #[test]
    fn test_inserted_entry_becomes_candidate() {
        let (db, _dir) = Database::for_tests();
        let entry = db.insert_knowledge("razor blade", "Swap blades every five shaves.").unwrap();
        assert!(entry.id > 6);

        let hits = db.knowledge_candidates("best razor blade for sensitive skin").unwrap();
        assert!(hits.iter().any(|e| e.keyword == "razor blade"));
        assert!(hits.iter().any(|e| e.keyword == "razor"));
    }
}
