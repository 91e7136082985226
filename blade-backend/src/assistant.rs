//! BladeAI assistant chat. Answers come from the keyword responder; the
//! visitor's recent exchanges are echoed back as context but do not change
//! the answer. The log keeps the bare answer, never the rendered reply, so
//! context does not nest.

use crate::db::{Database, DbResult};
use crate::models::ChatMemory;
use crate::responder;

/// Exchanges echoed back as context
pub const CONTEXT_WINDOW: i64 = 6;
pub const PUBLIC_USER_KEY: &str = "public";

const MENU: &str = "Tell me what you want: (1) product recommendation (2) shaving routine \
                    (3) beard care (4) site help.";

/// Render the reply text. `memories` is newest first, as stored.
pub fn compose_reply(prompt: &str, answer: &str, memories: &[ChatMemory]) -> String {
    let context = memories
        .iter()
        .rev()
        .map(|m| format!("User: {}\nBladeAI: {}", m.input, m.response))
        .collect::<Vec<_>>()
        .join("\n\n");
    let context = if context.is_empty() {
        "(none yet)".to_string()
    } else {
        context
    };

    format!(
        "BladeAI (local)\n\nRecent context:\n{}\n\nAnswer:\n{}\n\nYou said: \"{}\"\n\n{}",
        context, answer, prompt, MENU
    )
}

/// One chat turn: read context, answer, append to the log.
/// `prompt` must already be trimmed and non-empty.
pub fn chat(db: &Database, user_key: &str, prompt: &str) -> DbResult<String> {
    let memories = db.recent_chat_memory(user_key, CONTEXT_WINDOW)?;
    let answer = responder::respond(db, prompt)?;
    let reply = compose_reply(prompt, &answer, &memories);
    db.save_chat_memory(user_key, prompt, &answer)?;
    Ok(reply)
}
