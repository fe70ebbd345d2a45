mod audio;
mod message;
mod request;
mod response;

pub use audio::SpeechAudio;
pub use message::{Message, Role};
pub use request::{ChatRequest, HomeRequest, ImageRequest, SpeechRequest};
pub use response::{ChatApiResponse, ChatResponseData};
