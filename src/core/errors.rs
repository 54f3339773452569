use http::StatusCode;
use std::fmt;

#[derive(Debug)]
pub enum ClientError {
    InvalidInput(String),
    Unauthorized,
    NotFound(String),
    MissingElement(String),
    Http { status: u16, body: String },
    Transport(String),
    Decode(String),
    /// The server accepted the request but the result could not be drawn.
    Render(String),
}

impl ClientError {
    /// Maps a non-success status from the Warbler server.
    ///
    /// Login-guarded routes answer anonymous callers with a redirect to `/`,
    /// so any 3xx on an API call counts as an expired or missing session.
    pub fn from_status(status: StatusCode, path: &str, body: String) -> Self {
        if status.is_redirection() || status == StatusCode::UNAUTHORIZED {
            ClientError::Unauthorized
        } else if status == StatusCode::NOT_FOUND {
            ClientError::NotFound(path.to_string())
        } else {
            ClientError::Http { status: status.as_u16(), body }
        }
    }

    /// Text shown to the user in the page flash area.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::InvalidInput(msg) => msg.clone(),
            ClientError::Unauthorized => "Access unauthorized.".to_string(),
            ClientError::NotFound(_) => "That message no longer exists.".to_string(),
            ClientError::MissingElement(_) => "The page is missing a required element.".to_string(),
            ClientError::Http { .. } | ClientError::Decode(_) => {
                "The server could not complete the request.".to_string()
            }
            ClientError::Transport(_) => "Could not reach the server.".to_string(),
            ClientError::Render(_) => {
                "Your message was posted. Reload the page to see it.".to_string()
            }
        }
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::InvalidInput(msg) => write!(f, "Invalid Input: {}", msg),
            ClientError::Unauthorized => write!(f, "Unauthorized"),
            ClientError::NotFound(path) => write!(f, "Not Found: {}", path),
            ClientError::MissingElement(id) => write!(f, "Missing Element: #{}", id),
            ClientError::Http { status, body } => write!(f, "HTTP {}: {}", status, body),
            ClientError::Transport(msg) => write!(f, "Transport Error: {}", msg),
            ClientError::Decode(msg) => write!(f, "Decode Error: {}", msg),
            ClientError::Render(msg) => write!(f, "Render Error: {}", msg),
        }
    }
}

impl std::error::Error for ClientError {}

#[cfg(not(target_arch = "wasm32"))]
impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for ClientError {
    fn from(err: wasm_bindgen::JsValue) -> Self {
        ClientError::Transport(format!("{:?}", err))
    }
}
