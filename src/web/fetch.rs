use http::StatusCode;
use log::debug;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestCredentials, RequestInit, RequestRedirect, Response, ResponseType};
use crate::api::{parse_created_message, parse_like_body, MessagesApi};
use crate::config::{add_like_path, NEW_MESSAGE_PATH};
use crate::core::errors::ClientError;
use crate::models::models::{LikeToggle, Message, NewMessage};

/// `MessagesApi` over the browser's fetch, same origin as the page so the
/// session cookie rides along.
#[derive(Default)]
pub struct FetchApi {
    base_url: String,
}

impl FetchApi {
    pub fn new(base_url: &str) -> Self {
        FetchApi {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn post(&self, path: &str, json_body: Option<&str>) -> Result<String, ClientError> {
        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_credentials(RequestCredentials::SameOrigin);
        // Guarded routes redirect anonymous users; keep that visible.
        opts.set_redirect(RequestRedirect::Manual);
        if let Some(body) = json_body {
            opts.set_body(&JsValue::from_str(body));
        }

        let url = format!("{}{}", self.base_url, path);
        let request = Request::new_with_str_and_init(&url, &opts)?;
        if json_body.is_some() {
            request.headers().set("Content-Type", "application/json")?;
        }

        let window = web_sys::window()
            .ok_or_else(|| ClientError::Transport("no window".to_string()))?;
        let resp: Response = JsFuture::from(window.fetch_with_request(&request))
            .await?
            .dyn_into()?;

        if resp.type_() == ResponseType::Opaqueredirect {
            debug!("POST {} -> redirect", path);
            return Err(ClientError::Unauthorized);
        }

        let status = StatusCode::from_u16(resp.status())
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        let text = JsFuture::from(resp.text()?)
            .await?
            .as_string()
            .unwrap_or_default();
        debug!("POST {} -> {}", path, status);

        if status.is_success() {
            Ok(text)
        } else {
            Err(ClientError::from_status(status, path, text))
        }
    }
}

impl MessagesApi for FetchApi {
    async fn add_like(&self, message_id: i64) -> Result<LikeToggle, ClientError> {
        let body = self.post(&add_like_path(message_id), None).await?;
        parse_like_body(body.as_bytes())
    }

    async fn create_message(&self, text: &str) -> Result<Message, ClientError> {
        let json = serde_json::to_string(&NewMessage { text: text.to_string() })?;
        let body = self.post(NEW_MESSAGE_PATH, Some(&json)).await?;
        parse_created_message(body.as_bytes())
    }
}
