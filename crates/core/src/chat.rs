//! Virtual doctor chat: a keyword responder and per-session transcripts.
//!
//! The responder is a fixed keyword table with no clinical computation. Each conversation is
//! an explicit [`ConversationLog`] owned by whoever holds the session: the CLI keeps one on
//! the stack, the REST API keeps them in [`ChatSessions`] inside its application state.

use crate::constants::{MAX_CHAT_MESSAGE_CHARS, MAX_CHAT_SESSIONS, MAX_TRANSCRIPT_TURNS};
use crate::{CareError, CareResult};
use diabp_types::NonEmptyText;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// Keyword groups checked in order; the first group with any keyword present in the
/// lowercased message selects the reply.
const KEYWORD_REPLIES: &[(&[&str], &str)] = &[
    (
        &["đau đầu", "headache"],
        "Headache may relate to high blood pressure. Check BP immediately. (Đau đầu có thể liên quan THA. Hãy đo huyết áp ngay.)",
    ),
    (
        &["chóng mặt", "dizziness"],
        "Dizziness may indicate BP fluctuation or glucose imbalance. Check both. (Chóng mặt có thể do dao động huyết áp hoặc đường huyết.)",
    ),
    (
        &["yếu tay", "liệt"],
        "Possible stroke sign. Use FAST test and go to emergency if sudden onset. (Có thể dấu hiệu đột quỵ. Hãy đến cấp cứu ngay.)",
    ),
    (
        &["đường", "glucose"],
        "Monitor HbA1c and kidney function. Maintain diet control. (Theo dõi HbA1c và chức năng thận.)",
    ),
    (
        &["huyết áp", "blood pressure"],
        "Control salt intake and take medication regularly. (Giảm muối và uống thuốc đều đặn.)",
    ),
];

const FALLBACK_REPLY: &str =
    "Please provide more details about symptoms. (Vui lòng mô tả chi tiết hơn.)";

/// Keyword-matching responder.
///
/// This is a zero-sized type; replies are `'static` table entries.
#[derive(Debug, Clone, Copy, Default)]
pub struct Responder;

impl Responder {
    pub fn new() -> Self {
        Self
    }

    /// Picks the reply for a free-text message.
    ///
    /// Matching is case-insensitive substring presence, in table order. Messages that match
    /// nothing get a request for more detail.
    pub fn respond(&self, message: &str) -> &'static str {
        let text = message.to_lowercase();
        KEYWORD_REPLIES
            .iter()
            .find(|(keywords, _)| keywords.iter().any(|k| text.contains(k)))
            .map(|(_, reply)| *reply)
            .unwrap_or(FALLBACK_REPLY)
    }
}

/// Who said a line in the transcript.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    Patient,
    Doctor,
}

impl Speaker {
    /// Display label used when rendering the transcript.
    pub fn label(self) -> &'static str {
        match self {
            Speaker::Patient => "You",
            Speaker::Doctor => "AI Doctor",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub speaker: Speaker,
    pub text: String,
}

/// Transcript for one chat session.
///
/// Turns are only ever appended; once the log holds [`MAX_TRANSCRIPT_TURNS`] turns the oldest
/// exchange is dropped to make room.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationLog {
    turns: Vec<ChatTurn>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the patient's message and the responder's reply, in that order.
    ///
    /// # Returns
    ///
    /// The reply that was appended.
    pub fn exchange(&mut self, responder: &Responder, message: &NonEmptyText) -> &'static str {
        let reply = responder.respond(message.as_str());
        self.turns.push(ChatTurn {
            speaker: Speaker::Patient,
            text: message.as_str().to_string(),
        });
        self.turns.push(ChatTurn {
            speaker: Speaker::Doctor,
            text: reply.to_string(),
        });
        if self.turns.len() > MAX_TRANSCRIPT_TURNS {
            let excess = self.turns.len() - MAX_TRANSCRIPT_TURNS;
            self.turns.drain(..excess);
        }
        reply
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Renders each turn as `"<label>: <text>"`.
    pub fn render_lines(&self) -> Vec<String> {
        self.turns
            .iter()
            .map(|turn| format!("{}: {}", turn.speaker.label(), turn.text))
            .collect()
    }
}

/// Reply to a single message, plus the transcript as it stands afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatReply {
    pub reply: &'static str,
    pub transcript: Vec<ChatTurn>,
}

/// Registry of chat sessions keyed by UUID.
///
/// Cloning is cheap and shares the underlying store, so one instance can sit in an API
/// state and be handed to every request. The registry holds at most `capacity` sessions;
/// opening one more evicts the session that has been idle longest.
#[derive(Clone, Debug)]
pub struct ChatSessions {
    responder: Responder,
    capacity: usize,
    store: Arc<RwLock<SessionStore>>,
}

#[derive(Debug, Default)]
struct SessionStore {
    logs: HashMap<Uuid, SessionEntry>,
    clock: u64,
}

#[derive(Debug)]
struct SessionEntry {
    log: ConversationLog,
    last_active: u64,
}

impl SessionStore {
    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    fn evict_idlest(&mut self) -> Option<Uuid> {
        let idlest = self
            .logs
            .iter()
            .min_by_key(|(_, entry)| entry.last_active)
            .map(|(id, _)| *id)?;
        self.logs.remove(&idlest);
        Some(idlest)
    }
}

impl Default for ChatSessions {
    fn default() -> Self {
        Self::with_capacity(MAX_CHAT_SESSIONS)
    }
}

impl ChatSessions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry that keeps at most `capacity` sessions (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            responder: Responder::new(),
            capacity: capacity.max(1),
            store: Arc::new(RwLock::new(SessionStore::default())),
        }
    }

    /// Number of live sessions.
    pub fn live_count(&self) -> CareResult<usize> {
        let store = self
            .store
            .read()
            .map_err(|_| CareError::SessionLockPoisoned)?;
        Ok(store.logs.len())
    }

    /// Opens a new, empty session and returns its identifier.
    ///
    /// At capacity, the least recently used session is evicted first.
    pub fn create(&self) -> CareResult<Uuid> {
        let id = Uuid::new_v4();
        let mut store = self
            .store
            .write()
            .map_err(|_| CareError::SessionLockPoisoned)?;
        while store.logs.len() >= self.capacity {
            match store.evict_idlest() {
                Some(evicted) => tracing::debug!(session_id = %evicted, "chat session evicted"),
                None => break,
            }
        }
        let last_active = store.tick();
        store.logs.insert(
            id,
            SessionEntry {
                log: ConversationLog::new(),
                last_active,
            },
        );
        tracing::debug!(session_id = %id, "chat session created");
        Ok(id)
    }

    /// Sends a message within an existing session.
    ///
    /// # Errors
    ///
    /// Returns `CareError::InvalidInput` if the message is longer than
    /// [`MAX_CHAT_MESSAGE_CHARS`], and `CareError::SessionNotFound` if `id` is unknown or
    /// has been removed.
    pub fn send(&self, id: Uuid, message: &NonEmptyText) -> CareResult<ChatReply> {
        let chars = message.as_str().chars().count();
        if chars > MAX_CHAT_MESSAGE_CHARS {
            return Err(CareError::InvalidInput(format!(
                "chat message is {chars} characters; the limit is {MAX_CHAT_MESSAGE_CHARS}"
            )));
        }

        let mut store = self
            .store
            .write()
            .map_err(|_| CareError::SessionLockPoisoned)?;
        let now = store.tick();
        let entry = store
            .logs
            .get_mut(&id)
            .ok_or(CareError::SessionNotFound(id))?;
        entry.last_active = now;
        let reply = entry.log.exchange(&self.responder, message);
        tracing::debug!(session_id = %id, turns = entry.log.len(), "chat message recorded");
        Ok(ChatReply {
            reply,
            transcript: entry.log.turns().to_vec(),
        })
    }

    /// Returns a copy of the session's transcript.
    pub fn transcript(&self, id: Uuid) -> CareResult<Vec<ChatTurn>> {
        let store = self
            .store
            .read()
            .map_err(|_| CareError::SessionLockPoisoned)?;
        store
            .logs
            .get(&id)
            .map(|entry| entry.log.turns().to_vec())
            .ok_or(CareError::SessionNotFound(id))
    }

    /// Closes a session and drops its transcript.
    ///
    /// # Errors
    ///
    /// Returns `CareError::SessionNotFound` if `id` is unknown or already removed.
    pub fn remove(&self, id: Uuid) -> CareResult<()> {
        let mut store = self
            .store
            .write()
            .map_err(|_| CareError::SessionLockPoisoned)?;
        store
            .logs
            .remove(&id)
            .ok_or(CareError::SessionNotFound(id))?;
        tracing::debug!(session_id = %id, "chat session removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> NonEmptyText {
        NonEmptyText::new(s).unwrap()
    }

    #[test]
    fn matches_english_and_vietnamese_keywords() {
        let r = Responder::new();
        assert!(r.respond("I have a HEADACHE").starts_with("Headache may relate"));
        assert!(r.respond("tôi bị đau đầu").starts_with("Headache may relate"));
        assert!(r.respond("Dizziness after lunch").starts_with("Dizziness may"));
        assert!(r.respond("bị liệt nửa người").starts_with("Possible stroke sign"));
        assert!(r.respond("glucose is 250").starts_with("Monitor HbA1c"));
        assert!(r.respond("my blood pressure is high").starts_with("Control salt"));
    }

    #[test]
    fn matches_remaining_vietnamese_keywords() {
        let r = Responder::new();
        assert!(r.respond("tôi hay chóng mặt").starts_with("Dizziness may"));
        assert!(r.respond("bị yếu tay trái").starts_with("Possible stroke sign"));
        assert!(r.respond("huyết áp cao").starts_with("Control salt"));
    }

    #[test]
    fn earlier_groups_take_priority() {
        let r = Responder::new();
        // Mentions both a headache and blood pressure; the headache row is checked first.
        assert!(r
            .respond("headache and high blood pressure")
            .starts_with("Headache may relate"));
        // "huyết áp" appears, but "đường" is earlier in the table.
        assert!(r
            .respond("đường huyết và huyết áp")
            .starts_with("Monitor HbA1c"));
    }

    #[test]
    fn unknown_text_asks_for_detail() {
        assert_eq!(Responder::new().respond("hello"), FALLBACK_REPLY);
    }

    #[test]
    fn log_appends_patient_then_doctor() {
        let mut log = ConversationLog::new();
        assert!(log.is_empty());
        log.exchange(&Responder, &text("headache"));
        log.exchange(&Responder, &text("thanks"));
        assert_eq!(log.len(), 4);
        assert_eq!(log.turns()[0].speaker, Speaker::Patient);
        assert_eq!(log.turns()[1].speaker, Speaker::Doctor);
        assert_eq!(log.turns()[2].text, "thanks");
        assert_eq!(log.render_lines()[3], format!("AI Doctor: {FALLBACK_REPLY}"));
    }

    #[test]
    fn sessions_are_isolated() {
        let sessions = ChatSessions::new();
        let a = sessions.create().unwrap();
        let b = sessions.create().unwrap();

        sessions.send(a, &text("dizziness")).unwrap();
        let reply = sessions.send(a, &text("glucose")).unwrap();
        assert_eq!(reply.transcript.len(), 4);

        assert!(sessions.transcript(b).unwrap().is_empty());
        assert_eq!(sessions.transcript(a).unwrap().len(), 4);
    }

    #[test]
    fn unknown_session_is_reported() {
        let sessions = ChatSessions::new();
        let missing = Uuid::new_v4();
        match sessions.send(missing, &text("hi")) {
            Err(CareError::SessionNotFound(id)) => assert_eq!(id, missing),
            other => panic!("expected SessionNotFound, got {other:?}"),
        }
    }

    #[test]
    fn removed_session_is_gone() {
        let sessions = ChatSessions::new();
        let id = sessions.create().unwrap();
        sessions.send(id, &text("headache")).unwrap();

        sessions.remove(id).unwrap();
        assert_eq!(sessions.live_count().unwrap(), 0);
        assert!(matches!(
            sessions.transcript(id),
            Err(CareError::SessionNotFound(_))
        ));
        assert!(matches!(
            sessions.remove(id),
            Err(CareError::SessionNotFound(_))
        ));
    }

    #[test]
    fn registry_evicts_least_recently_used_at_capacity() {
        let sessions = ChatSessions::with_capacity(3);
        let a = sessions.create().unwrap();
        let b = sessions.create().unwrap();
        let c = sessions.create().unwrap();

        // Touch `a` so `b` becomes the idlest.
        sessions.send(a, &text("glucose")).unwrap();
        let d = sessions.create().unwrap();

        assert_eq!(sessions.live_count().unwrap(), 3);
        assert!(matches!(
            sessions.transcript(b),
            Err(CareError::SessionNotFound(_))
        ));
        for live in [a, c, d] {
            assert!(sessions.transcript(live).is_ok());
        }
    }

    #[test]
    fn registry_size_stays_bounded() {
        let sessions = ChatSessions::with_capacity(50);
        for _ in 0..500 {
            sessions.create().unwrap();
        }
        assert_eq!(sessions.live_count().unwrap(), 50);
    }

    #[test]
    fn transcript_keeps_most_recent_turns() {
        let sessions = ChatSessions::new();
        let id = sessions.create().unwrap();
        for i in 0..(MAX_TRANSCRIPT_TURNS + 10) {
            sessions.send(id, &text(&format!("message {i}"))).unwrap();
        }
        let turns = sessions.transcript(id).unwrap();
        assert_eq!(turns.len(), MAX_TRANSCRIPT_TURNS);
        assert_eq!(turns[0].speaker, Speaker::Patient);
        let last = MAX_TRANSCRIPT_TURNS + 9;
        assert_eq!(turns[MAX_TRANSCRIPT_TURNS - 2].text, format!("message {last}"));
    }

    #[test]
    fn oversized_message_is_rejected() {
        let sessions = ChatSessions::new();
        let id = sessions.create().unwrap();
        let long = text(&"a".repeat(MAX_CHAT_MESSAGE_CHARS + 1));
        assert!(matches!(
            sessions.send(id, &long),
            Err(CareError::InvalidInput(_))
        ));
        assert!(sessions.transcript(id).unwrap().is_empty());

        let limit = text(&"a".repeat(MAX_CHAT_MESSAGE_CHARS));
        assert!(sessions.send(id, &limit).is_ok());
    }
}
