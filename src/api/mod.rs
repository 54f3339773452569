use crate::core::errors::ClientError;
use crate::models::models::{LikeToggle, Message, NewMessageResponse};

#[cfg(not(target_arch = "wasm32"))]
pub mod client;

#[cfg(not(target_arch = "wasm32"))]
pub use client::HttpApi;

/// The two Warbler endpoints the timeline page talks to.
#[allow(async_fn_in_trait)]
pub trait MessagesApi {
    async fn add_like(&self, message_id: i64) -> Result<LikeToggle, ClientError>;

    async fn create_message(&self, text: &str) -> Result<Message, ClientError>;
}

/// An empty like body counts as success with no state from the server;
/// anything else has to be `{"liked": bool}`.
pub fn parse_like_body(body: &[u8]) -> Result<LikeToggle, ClientError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(LikeToggle::default());
    }
    Ok(serde_json::from_slice(body)?)
}

pub fn parse_created_message(body: &[u8]) -> Result<Message, ClientError> {
    let created: NewMessageResponse = serde_json::from_slice(body)?;
    Ok(created.message)
}
