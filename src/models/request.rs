use serde::{Deserialize, Serialize};

use super::message::Message;

/// Body of a `/role/chat` call.
///
/// Built fresh for every call from a history snapshot; never kept afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatRequest {
    #[serde(rename = "roleId")]
    pub role_id: String,
    pub model: String,
    /// Sampling temperature, nominally in [0, 2]. Not validated here.
    pub temperature: f64,
    pub messages: Vec<Message>,
    pub stream: bool,
}

/// Body of a `/role/genImage` call
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImageRequest {
    pub locale: String,
    pub prompt: String,
}

/// Body of a `/role/textToSpeech` call
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SpeechRequest {
    pub text: String,
    #[serde(rename = "roleId")]
    pub role_id: String,
}

/// Body of a `/home/rec` call.
///
/// The backend expects the key `local`, not `locale`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HomeRequest {
    pub local: String,
}
