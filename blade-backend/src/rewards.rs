//! Blade Rewards bookkeeping: enrollment, member-code login, point grants.

use rand::Rng;

use crate::auth::constant_time_eq;
use crate::db::{Database, DbResult};
use crate::models::{Member, PointsUpdate};

/// No 0/O or 1/I, so codes survive being read aloud.
const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
const CODE_LENGTH: usize = 6;
const STARTING_POINTS: i64 = 1;

pub const WELCOME: &str = "Welcome to Blade Rewards.";
pub const ALREADY_ENROLLED: &str = "You are already enrolled.";
pub const INVALID_CODE: &str = "Invalid member code.";
pub const MEMBER_NOT_FOUND: &str = "Member not found.";
pub const POINTS_OUT_OF_RANGE: &str = "Points out of range.";

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn generate_member_code() -> String {
    let mut rng = rand::thread_rng();
    (0..CODE_LENGTH)
        .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}

#[derive(Debug)]
pub struct Enrollment {
    pub member: Member,
    pub created: bool,
}

impl Enrollment {
    pub fn message(&self) -> &'static str {
        if self.created {
            WELCOME
        } else {
            ALREADY_ENROLLED
        }
    }
}

/// Enroll a member, or hand back the existing record for a known email.
pub fn enroll(db: &Database, name: &str, email: &str) -> DbResult<Enrollment> {
    let email = normalize_email(email);
    let code = generate_member_code();
    let created = db.insert_member_if_absent(name.trim(), &email, &code, STARTING_POINTS)?;

    match db.get_member_by_email(&email)? {
        Some(member) => {
            if created {
                log::info!("[REWARDS] Enrolled member #{}", member.id);
            }
            Ok(Enrollment { member, created })
        }
        // Row vanished between insert and read
        None => Err(rusqlite::Error::QueryReturnedNoRows.into()),
    }
}

/// Member for a matching email + code, or None.
pub fn login(db: &Database, email: &str, code: &str) -> DbResult<Option<Member>> {
    let email = normalize_email(email);
    let code = code.trim().to_uppercase();

    Ok(db
        .get_member_by_email(&email)?
        .filter(|member| constant_time_eq(member.member_code.as_bytes(), code.as_bytes())))
}

/// Grant (or with a negative delta, remove) points.
pub fn add_points(db: &Database, email: &str, delta: i64) -> DbResult<PointsUpdate> {
    let email = normalize_email(email);
    let outcome = db.add_member_points(&email, delta)?;
    match &outcome {
        PointsUpdate::Updated(m) => {
            log::info!("[REWARDS] Member #{} points {:+} -> {}", m.id, delta, m.points)
        }
        PointsUpdate::OutOfRange => log::warn!("[REWARDS] Refused grant of {:+} points", delta),
        PointsUpdate::NotFound => {}
    }
    Ok(outcome)
}

/// Accept points as a JSON number or a numeric string. Missing means zero.
pub fn parse_points(value: Option<&serde_json::Value>) -> Option<i64> {
    match value {
        None | Some(serde_json::Value::Null) => Some(0),
        Some(serde_json::Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite() && f.fract() == 0.0).map(|f| f as i64)),
        Some(serde_json::Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() {
                Some(0)
            } else {
                s.parse().ok()
            }
        }
        Some(_) => None,
    }
}
