// Server-side bookkeeping for the browser's text-to-speech collaborator.
// The browser does the speaking; we only track which utterance is active.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeechEvent {
    Start,
    End,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum SpeechCommand {
    /// Cancel whatever is playing, then speak `text`.
    Speak {
        message_id: u64,
        text: String,
        locale: &'static str,
    },
    Cancel,
}

/// At most one utterance is active at a time.
#[derive(Debug, Default, Clone)]
pub struct SpeechTracker {
    active: Option<u64>,
}

impl SpeechTracker {
    pub fn active(&self) -> Option<u64> {
        self.active
    }

    /// Toggle playback for a message. Re-invoking on the active message stops it.
    pub fn toggle(&mut self, message_id: u64, text: &str, locale: &'static str) -> SpeechCommand {
        if self.active == Some(message_id) {
            self.active = None;
            return SpeechCommand::Cancel;
        }
        self.active = Some(message_id);
        SpeechCommand::Speak {
            message_id,
            text: text.to_string(),
            locale,
        }
    }

    pub fn on_event(&mut self, event: SpeechEvent) {
        match event {
            SpeechEvent::Start => {}
            SpeechEvent::End | SpeechEvent::Error => self.active = None,
        }
    }

    pub fn cancel(&mut self) -> Option<u64> {
        self.active.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_same_message_stops_it() {
        let mut tracker = SpeechTracker::default();
        assert!(matches!(
            tracker.toggle(2, "hello", "en-US"),
            SpeechCommand::Speak { message_id: 2, .. }
        ));
        assert_eq!(tracker.toggle(2, "hello", "en-US"), SpeechCommand::Cancel);
        assert_eq!(tracker.active(), None);
    }

    #[test]
    fn new_message_replaces_previous_utterance() {
        let mut tracker = SpeechTracker::default();
        tracker.toggle(2, "first", "en-US");
        tracker.toggle(4, "second", "hi-IN");
        assert_eq!(tracker.active(), Some(4));
    }

    #[test]
    fn end_and_error_clear_active() {
        let mut tracker = SpeechTracker::default();
        tracker.toggle(1, "a", "en-US");
        tracker.on_event(SpeechEvent::Start);
        assert_eq!(tracker.active(), Some(1));
        tracker.on_event(SpeechEvent::Error);
        assert_eq!(tracker.active(), None);

        tracker.toggle(1, "a", "en-US");
        tracker.on_event(SpeechEvent::End);
        assert_eq!(tracker.cancel(), None);
    }
}
