use serde::{Deserialize, Serialize};

/// Aggregated count for one normalized search-assist query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchStat {
    pub query: String,
    pub count: i64,
    pub last_seen: String,
}
