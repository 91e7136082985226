//! Keyword responder behind the chat widget and the search assist box.
//!
//! Replies are canned: a query is normalized, every stored keyword that
//! occurs inside it is a candidate, and `best_match` picks one.

use crate::db::{Database, DbResult};
use crate::models::{KnowledgeEntry, SiteContent, Section};

pub const GREETING: &str = "I am Blade. Ask me about grooming, products, or franchising.";
pub const FALLBACK: &str =
    "I am Blade. Share what you are looking for and I will guide you to the right product.";

pub const ASSIST_PROMPT: &str = "Tell me what you need and I will point you to the right section.";
pub const ASSIST_NO_MATCH: &str =
    "I could not find that yet. Try \u{201c}book\u{201d}, \u{201c}services\u{201d}, or \u{201c}franchise\u{201d}.";

/// Lowercase and trim.
pub fn normalize(input: &str) -> String {
    input.trim().to_lowercase()
}

/// Longest keyword wins, measured in characters. Equal lengths go to the lowest id.
pub fn best_match(candidates: &[KnowledgeEntry]) -> Option<&KnowledgeEntry> {
    candidates.iter().min_by(|a, b| {
        let (la, lb) = (a.keyword.chars().count(), b.keyword.chars().count());
        lb.cmp(&la).then(a.id.cmp(&b.id))
    })
}

/// Reply for the chat widget.
pub fn respond(db: &Database, message: &str) -> DbResult<String> {
    let normalized = normalize(message);
    if normalized.is_empty() {
        return Ok(GREETING.to_string());
    }

    let candidates = db.knowledge_candidates(&normalized)?;
    Ok(best_match(&candidates)
        .map(|entry| entry.response.clone())
        .unwrap_or_else(|| FALLBACK.to_string()))
}

/// Reason a `learn` call was refused.
#[derive(Debug, PartialEq, Eq)]
pub enum LearnError {
    MissingFields,
}

impl std::fmt::Display for LearnError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LearnError::MissingFields => write!(f, "Keyword and response are required."),
        }
    }
}

/// Validate and normalize a new keyword/response pair.
pub fn prepare_learn(keyword: &str, response: &str) -> Result<(String, String), LearnError> {
    let keyword = normalize(keyword);
    let response = response.trim().to_string();
    if keyword.is_empty() || response.is_empty() {
        return Err(LearnError::MissingFields);
    }
    Ok((keyword, response))
}

#[derive(Debug, serde::Serialize)]
pub struct AssistReply {
    pub reply: String,
    pub matches: Vec<Section>,
}

/// Search assist: counts the query, then points at matching site sections.
pub fn assist(db: &Database, content: &SiteContent, query: &str) -> DbResult<AssistReply> {
    let normalized = normalize(query);
    if normalized.is_empty() {
        return Ok(AssistReply {
            reply: ASSIST_PROMPT.to_string(),
            matches: Vec::new(),
        });
    }

    db.record_search(&normalized)?;

    let matches = content.matching_sections(&normalized);
    if matches.is_empty() {
        return Ok(AssistReply {
            reply: ASSIST_NO_MATCH.to_string(),
            matches,
        });
    }

    Ok(AssistReply {
        reply: format!("Here is what I found for \u{201c}{}\u{201d}.", normalized),
        matches,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: i64, keyword: &str) -> KnowledgeEntry {
        KnowledgeEntry {
            id,
            keyword: keyword.to_string(),
            response: format!("about {}", keyword),
        }
    }

    #[test]
    fn test_best_match_prefers_longest_keyword() {
        let candidates = vec![entry(1, "razor"), entry(7, "razor blade")];
        assert_eq!(best_match(&candidates).unwrap().keyword, "razor blade");
    }

    #[test]
    fn test_best_match_ties_go_to_lowest_id() {
        let candidates = vec![entry(9, "shave"), entry(3, "cream"), entry(5, "beard")];
        assert_eq!(best_match(&candidates).unwrap().id, 3);
    }

    #[test]
    fn test_best_match_counts_characters_not_bytes() {
        // "crème" is 5 chars / 6 bytes, "razor" is 5 chars
        let candidates = vec![entry(2, "razor"), entry(1, "crème")];
        assert_eq!(best_match(&candidates).unwrap().id, 1);
    }

    #[test]
    fn test_best_match_empty() {
        assert!(best_match(&[]).is_none());
    }

    #[test]
    fn test_respond_blank_input_is_greeting() {
        let (db, _dir) = Database::for_tests();
        assert_eq!(respond(&db, "").unwrap(), GREETING);
        assert_eq!(respond(&db, "   \n\t").unwrap(), GREETING);
    }

    #[test]
    fn test_respond_single_keyword() {
        let (db, _dir) = Database::for_tests();
        let reply = respond(&db, "  Tell me about POMADE hold ").unwrap();
        assert!(reply.starts_with("Styling Pomade"));
    }

    #[test]
    fn test_respond_longest_of_several() {
        let (db, _dir) = Database::for_tests();
        db.insert_knowledge("razor blade", "Blades: swap every five shaves.").unwrap();
        let reply = respond(&db, "best razor blade for sensitive skin").unwrap();
        assert_eq!(reply, "Blades: swap every five shaves.");
    }

    #[test]
    fn test_respond_no_match_is_fallback() {
        let (db, _dir) = Database::for_tests();
        assert_eq!(respond(&db, "opening hours?").unwrap(), FALLBACK);
    }

    #[test]
    fn test_prepare_learn_normalizes() {
        let (k, r) = prepare_learn("  Hot Towel ", "  Ten minutes of steam. ").unwrap();
        assert_eq!(k, "hot towel");
        assert_eq!(r, "Ten minutes of steam.");
        assert_eq!(prepare_learn(" ", "x"), Err(LearnError::MissingFields));
        assert_eq!(prepare_learn("x", ""), Err(LearnError::MissingFields));
    }

    #[test]
    fn test_assist_blank_does_not_record() {
        let (db, _dir) = Database::for_tests();
        let reply = assist(&db, &SiteContent::default(), "   ").unwrap();
        assert_eq!(reply.reply, ASSIST_PROMPT);
        assert!(reply.matches.is_empty());
        assert!(db.list_searches(10).unwrap().is_empty());
    }

    #[test]
    fn test_assist_records_and_matches() {
        let (db, _dir) = Database::for_tests();
        let content = SiteContent {
            sections: vec![Section {
                id: "book".into(),
                title: "Book a chair".into(),
                summary: "Pick a time.".into(),
                keywords: vec!["book".into(), "appointment".into()],
            }],
        };

        let reply = assist(&db, &content, " Book Tomorrow ").unwrap();
        assert_eq!(reply.matches.len(), 1);
        assert!(reply.reply.contains("book tomorrow"));

        let miss = assist(&db, &content, "parking").unwrap();
        assert_eq!(miss.reply, ASSIST_NO_MATCH);

        let stats = db.list_searches(10).unwrap();
        assert_eq!(stats.len(), 2);
    }
}
