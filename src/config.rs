use std::time::Duration;

// === Page contract ===
pub const NEW_MESSAGE_TEXT_ID: &str = "newMessageText";
pub const NEW_MESSAGE_SAVE_BUTTON_ID: &str = "newMessageSaveButton";
pub const MESSAGES_CONTAINER_ID: &str = "messages";

/// Like controls are rendered as `like-button-{message_id}`.
pub const LIKE_BUTTON_PREFIX: &str = "like-button-";

pub const LIKED_CLASS: &str = "btn-primary";
pub const NOT_LIKED_CLASS: &str = "btn-secondary";

/// Flash alerts go to the top of the first page container.
pub const FLASH_CONTAINER_SELECTOR: &str = ".container";

pub const DEFAULT_IMAGE_URL: &str = "/static/images/default-pic.png";
pub const MAX_MESSAGE_LENGTH: usize = 140;

// === Endpoints ===
pub const NEW_MESSAGE_PATH: &str = "/messages/new";
pub const LOGIN_PATH: &str = "/login";

pub fn add_like_path(message_id: i64) -> String {
    format!("/users/add_like/{}", message_id)
}

pub fn like_button_id(message_id: i64) -> String {
    format!("{}{}", LIKE_BUTTON_PREFIX, message_id)
}

// === Environment ===
pub fn base_url() -> String {
    std::env::var("WARBLER_BASE_URL")
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| "http://127.0.0.1:5000".to_string())
}

pub fn request_timeout() -> Duration {
    let secs = std::env::var("WARBLER_TIMEOUT_SECS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(10);
    Duration::from_secs(secs)
}
