use serde::{Deserialize, Serialize};

/// A Blade Rewards member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub member_code: String,
    pub points: i64,
    pub created_at: String,
}

/// Outcome of a points grant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointsUpdate {
    Updated(Member),
    NotFound,
    /// The new balance would not fit in an i64; nothing was written.
    OutOfRange,
}

/// JSON envelope returned by the rewards endpoints.
#[derive(Debug, Serialize)]
pub struct MemberEnvelope {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member: Option<Member>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl MemberEnvelope {
    pub fn ok(member: Member, message: Option<&str>) -> Self {
        Self {
            ok: true,
            member: Some(member),
            message: message.map(str::to_string),
        }
    }
}
