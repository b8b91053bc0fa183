pub mod catalog;
pub mod language;
pub mod router;
pub mod session;
pub mod speech;

pub use catalog::QUICK_QUESTIONS;
pub use router::KeywordRouter;
pub use session::{Message, Session, SessionError, SessionState, Submission};
pub use speech::SpeechEvent;
