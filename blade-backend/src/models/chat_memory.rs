use serde::{Deserialize, Serialize};

/// One exchange in a visitor's assistant chat log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMemory {
    pub id: i64,
    pub user_key: String,
    pub input: String,
    pub response: String,
    pub created_at: String,
}
