//! Database model modules - extends Database with domain-specific methods
//!
//! Each module adds `impl Database` blocks with methods for a specific table group.

mod admin_auth;       // admin_users, admin_sessions
mod chat_memory;      // ai_memory (assistant chat log)
mod knowledge;        // knowledge (chat responder keywords)
mod rewards_members;  // rewards_members
mod search_analytics; // search_analytics
