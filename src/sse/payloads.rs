//! SSE payload deserialization structs
//!
//! Internal structs used to deserialize the JSON carried on `data: ` lines.
//! The backend is not consistent about casing, so both snake_case and
//! camelCase spellings are accepted.

use serde::Deserialize;

/// Chat completion chunk
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ChatEnvelope {
    pub choices: Vec<ChoicePayload>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ChoicePayload {
    #[serde(default, alias = "finishReason")]
    pub finish_reason: Option<String>,
    #[serde(default)]
    pub delta: DeltaPayload,
}

/// Nested delta object (OpenAI style)
#[derive(Debug, Clone, Deserialize, Default)]
pub(crate) struct DeltaPayload {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default, alias = "imageUrl")]
    pub image_url: Option<String>,
}

/// Image generation progress chunk
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ImageEnvelope {
    pub data: ImageDataPayload,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub(crate) struct ImageDataPayload {
    #[serde(default)]
    pub stage: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}
