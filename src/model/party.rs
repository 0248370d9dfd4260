use chrono::{DateTime, Local};
use serde::Serialize;

/// One message of the party chat
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    /// `None` for system messages (boss damage, quest progress)
    pub author: Option<String>,
    pub text: String,
    pub sent: Option<DateTime<Local>>,
}

impl ChatMessage {
    /// `alice, 14/03 09:12` shown above the message text
    pub fn header(&self) -> String {
        let author = self.author.as_deref().unwrap_or("system");
        match self.sent {
            Some(sent) => format!("{}, {}", author, sent.format("%d/%m %H:%M")),
            None => author.to_string(),
        }
    }
}
