use serde::{Deserialize, Serialize};

use super::message::{Message, Role};

/// Envelope of a single-shot (non-streaming) chat response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatApiResponse {
    pub code: i64,
    pub msg: String,
    pub data: ChatResponseData,
}

/// The assistant turn carried by a [`ChatApiResponse`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatResponseData {
    pub role: String,
    pub content: String,
    #[serde(rename = "type", default)]
    pub kind: i64,
}

impl ChatApiResponse {
    /// Extract the assistant turn as a history message.
    pub fn to_message(&self) -> Message {
        Message {
            role: Role::from_wire(&self.data.role),
            content: self.data.content.clone(),
            kind: self.data.kind,
        }
    }
}
