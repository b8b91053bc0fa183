use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use super::catalog::WELCOME_MESSAGE;
use super::language::{self, DEFAULT_LANGUAGE};
use super::router::KeywordRouter;
use super::speech::{SpeechCommand, SpeechEvent, SpeechTracker};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub id: u64,
    pub content: String,
    pub role: Role,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Idle,
    AwaitingReply,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("message is empty")]
    EmptyMessage,
    #[error("a reply is already pending for this session")]
    AwaitingReply,
    #[error("unsupported language: {0}")]
    UnknownLanguage(String),
    #[error("message {0} not found")]
    MessageNotFound(u64),
}

/// An accepted user message and the ticket that completes its reply.
#[derive(Debug, Clone)]
pub struct Submission {
    pub ticket: Uuid,
    pub message: Message,
}

/// A completed reply and the catalog rule that produced it.
#[derive(Debug, Clone)]
pub struct Reply {
    pub tag: &'static str,
    pub message: Message,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingReply {
    ticket: Uuid,
    message_id: u64,
}

/// One chat view's conversation. Messages are append-only.
#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    messages: Vec<Message>,
    pending: Option<PendingReply>,
    language: String,
    speech: SpeechTracker,
    created_at: DateTime<Utc>,
}

impl Session {
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4())
    }

    pub fn with_id(id: Uuid) -> Self {
        let mut session = Self {
            id,
            messages: Vec::new(),
            pending: None,
            language: DEFAULT_LANGUAGE.to_string(),
            speech: SpeechTracker::default(),
            created_at: Utc::now(),
        };
        session.append(Role::Assistant, WELCOME_MESSAGE.to_string(), None);
        session
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn state(&self) -> SessionState {
        match self.pending {
            Some(_) => SessionState::AwaitingReply,
            None => SessionState::Idle,
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn set_language(&mut self, code: &str) -> Result<(), SessionError> {
        if language::find(code).is_none() {
            return Err(SessionError::UnknownLanguage(code.to_string()));
        }
        self.language = code.to_string();
        Ok(())
    }

    /// Append a user message and start waiting for the reply.
    pub fn submit(&mut self, text: &str) -> Result<Submission, SessionError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SessionError::EmptyMessage);
        }
        if self.pending.is_some() {
            return Err(SessionError::AwaitingReply);
        }
        let lang = Some(self.language.clone());
        let message = self.append(Role::User, text.to_string(), lang).clone();
        let ticket = Uuid::new_v4();
        self.pending = Some(PendingReply {
            ticket,
            message_id: message.id,
        });
        Ok(Submission { ticket, message })
    }

    /// Resolve the reply for `ticket`. Returns `None` unless that
    /// submission is the one still pending.
    pub fn complete_reply(&mut self, ticket: Uuid, router: &KeywordRouter) -> Option<Reply> {
        let pending = self.pending.filter(|p| p.ticket == ticket)?;
        let prompt = self
            .messages
            .iter()
            .find(|m| m.id == pending.message_id)
            .map(|m| m.content.as_str())
            .unwrap_or_default();
        let (tag, response) = router.route(prompt);
        let lang = Some(self.language.clone());
        self.pending = None;
        let message = self.append(Role::Assistant, response.to_string(), lang).clone();
        Some(Reply { tag, message })
    }

    pub fn toggle_speech(&mut self, message_id: u64) -> Result<SpeechCommand, SessionError> {
        let message = self
            .messages
            .iter()
            .find(|m| m.id == message_id)
            .ok_or(SessionError::MessageNotFound(message_id))?;
        let locale = language::locale_for(message.language.as_deref().unwrap_or(self.language.as_str()));
        Ok(self.speech.toggle(message.id, &message.content, locale))
    }

    pub fn speech_event(&mut self, event: SpeechEvent) {
        self.speech.on_event(event);
    }

    pub fn active_utterance(&self) -> Option<u64> {
        self.speech.active()
    }

    /// Tear down: cancel any utterance still playing.
    pub fn close(&mut self) -> Option<u64> {
        self.speech.cancel()
    }

    fn append(&mut self, role: Role, content: String, language: Option<String>) -> &Message {
        let id = self.messages.last().map(|m| m.id + 1).unwrap_or(1);
        self.messages.push(Message {
            id,
            content,
            role,
            timestamp: Utc::now(),
            language,
        });
        &self.messages[self.messages.len() - 1]
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_welcome_message() {
        let session = Session::new();
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].role, Role::Assistant);
        assert_eq!(session.messages()[0].content, WELCOME_MESSAGE);
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[test]
    fn submit_then_reply_appends_two_messages() {
        let router = KeywordRouter::default();
        let mut session = Session::new();
        let before = session.messages().len();

        let submission = session.submit("hello").unwrap();
        assert_eq!(session.messages().len(), before + 1);
        assert_eq!(session.state(), SessionState::AwaitingReply);

        session.complete_reply(submission.ticket, &router).unwrap();
        assert_eq!(session.messages().len(), before + 2);
        assert_eq!(session.messages()[before].role, Role::User);
        assert_eq!(session.messages()[before + 1].role, Role::Assistant);
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[test]
    fn reply_answers_latest_user_message() {
        let router = KeywordRouter::default();
        let mut session = Session::new();
        let submission = session.submit("  Best time to plant rice?  ").unwrap();
        assert_eq!(submission.message.content, "Best time to plant rice?");
        let reply = session.complete_reply(submission.ticket, &router).unwrap();
        assert_eq!(reply.tag, "rice-planting");
        assert!(reply.message.content.starts_with("The best time to plant rice"));
    }

    #[test]
    fn rejects_blank_and_overlapping_submissions() {
        let mut session = Session::new();
        assert_eq!(session.submit("   ").unwrap_err(), SessionError::EmptyMessage);
        session.submit("first").unwrap();
        assert_eq!(session.submit("second").unwrap_err(), SessionError::AwaitingReply);
        assert_eq!(session.messages().len(), 2);
    }

    #[test]
    fn complete_without_pending_is_noop() {
        let router = KeywordRouter::default();
        let mut session = Session::new();
        assert!(session.complete_reply(Uuid::new_v4(), &router).is_none());
        assert_eq!(session.messages().len(), 1);
    }

    #[test]
    fn stale_ticket_does_not_complete_a_newer_submission() {
        let router = KeywordRouter::default();
        let id = Uuid::new_v4();
        let mut closed = Session::with_id(id);
        let stale = closed.submit("weather").unwrap();

        // Same id, fresh conversation.
        let mut session = Session::with_id(id);
        let current = session.submit("organic").unwrap();
        assert!(session.complete_reply(stale.ticket, &router).is_none());
        assert_eq!(session.state(), SessionState::AwaitingReply);
        assert_eq!(session.messages().len(), 2);

        let reply = session.complete_reply(current.ticket, &router).unwrap();
        assert_eq!(reply.tag, "organic");
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.complete_reply(current.ticket, &router).is_none());
    }

    #[test]
    fn ids_increase_monotonically() {
        let router = KeywordRouter::default();
        let mut session = Session::new();
        let submission = session.submit("weather").unwrap();
        session.complete_reply(submission.ticket, &router);
        let ids: Vec<u64> = session.messages().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn speech_uses_message_language() {
        let router = KeywordRouter::default();
        let mut session = Session::new();
        session.set_language("ta").unwrap();
        let submission = session.submit("organic").unwrap();
        session.complete_reply(submission.ticket, &router);
        match session.toggle_speech(3).unwrap() {
            SpeechCommand::Speak { locale, .. } => assert_eq!(locale, "ta-IN"),
            other => panic!("unexpected command {:?}", other),
        }
        assert_eq!(session.close(), Some(3));
        assert_eq!(
            session.toggle_speech(99).unwrap_err(),
            SessionError::MessageNotFound(99)
        );
    }

    #[test]
    fn unknown_language_is_rejected() {
        let mut session = Session::new();
        assert!(matches!(
            session.set_language("zz"),
            Err(SessionError::UnknownLanguage(_))
        ));
        assert_eq!(session.language(), "en");
    }
}
