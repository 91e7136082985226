pub mod admin;
pub mod chat_memory;
pub mod knowledge;
pub mod member;
pub mod search;
pub mod site_content;

pub use admin::{AdminSession, AdminUser};
pub use chat_memory::ChatMemory;
pub use knowledge::KnowledgeEntry;
pub use member::{Member, MemberEnvelope, PointsUpdate};
pub use search::SearchStat;
pub use site_content::{Section, SiteContent};
