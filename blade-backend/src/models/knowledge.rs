use serde::{Deserialize, Serialize};

/// Keyword -> canned response pair used by the chat responder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    pub id: i64,
    pub keyword: String,
    pub response: String,
}
