use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::advisor::{Message, Session, SessionState, SpeechEvent};
use crate::market::{format_price, MarketEntry, Movers};

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub session_id: Option<Uuid>,
    pub language: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub session_id: Uuid,
    pub message: Message,
    pub reply: Message,
}

#[derive(Debug, Serialize)]
pub struct SessionSnapshot {
    pub session_id: Uuid,
    pub state: SessionState,
    pub language: String,
    pub active_utterance: Option<u64>,
    pub created_at: DateTime<Utc>,
    pub messages: Vec<Message>,
}

impl From<&Session> for SessionSnapshot {
    fn from(session: &Session) -> Self {
        Self {
            session_id: session.id(),
            state: session.state(),
            language: session.language().to_string(),
            active_utterance: session.active_utterance(),
            created_at: session.created_at(),
            messages: session.messages().to_vec(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SpeechRequest {
    pub message_id: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SpeechEventRequest {
    pub event: SpeechEvent,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PreferenceUpdate {
    pub value: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketItem {
    #[serde(flatten)]
    pub entry: MarketEntry,
    pub formatted_price: String,
}

impl From<MarketEntry> for MarketItem {
    fn from(entry: MarketEntry) -> Self {
        Self {
            formatted_price: format_price(entry.current_price),
            entry,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MarketResponse {
    pub items: Vec<MarketItem>,
    pub movers: Movers,
}
