use log::debug;
use reqwest::redirect::Policy;
use reqwest::{Client, Response};
use crate::config::{self, add_like_path, LOGIN_PATH, NEW_MESSAGE_PATH};
use crate::core::errors::ClientError;
use crate::core::helpers::extract_csrf_token;
use crate::models::models::{LikeToggle, Message, NewMessage};
use super::{parse_created_message, parse_like_body, MessagesApi};

/// reqwest client holding the Warbler session cookie.
///
/// Redirects are not followed: guarded routes bounce anonymous users to `/`
/// and that bounce has to surface as `Unauthorized`, not as the home page.
pub struct HttpApi {
    client: Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let client = Client::builder()
            .cookie_store(true)
            .redirect(Policy::none())
            .timeout(config::request_timeout())
            .build()?;

        Ok(HttpApi {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_env() -> Result<Self, ClientError> {
        HttpApi::new(&config::base_url())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Logs in through the HTML form so later calls carry the session cookie.
    pub async fn login(&self, username: &str, password: &str) -> Result<(), ClientError> {
        let form_page = self.client.get(self.url(LOGIN_PATH)).send().await?;
        let form_page = check_status(form_page, LOGIN_PATH).await?;
        let csrf_token = extract_csrf_token(&form_page.text().await?).unwrap_or_default();

        let mut form = vec![("username", username), ("password", password)];
        if !csrf_token.is_empty() {
            form.push(("csrf_token", csrf_token.as_str()));
        }

        let resp = self
            .client
            .post(self.url(LOGIN_PATH))
            .form(&form)
            .send()
            .await?;

        let status = resp.status();
        debug!("POST {} -> {}", LOGIN_PATH, status);

        // Success redirects to the home page; a 200 is the form again.
        if status.is_redirection() {
            Ok(())
        } else if status.is_success() {
            Err(ClientError::InvalidInput("Invalid credentials.".to_string()))
        } else {
            let body = resp.text().await.unwrap_or_default();
            Err(ClientError::from_status(status, LOGIN_PATH, body))
        }
    }
}

async fn check_status(resp: Response, path: &str) -> Result<Response, ClientError> {
    let status = resp.status();
    debug!("{} -> {}", path, status);
    if status.is_success() {
        Ok(resp)
    } else {
        let body = resp.text().await.unwrap_or_default();
        Err(ClientError::from_status(status, path, body))
    }
}

impl MessagesApi for HttpApi {
    async fn add_like(&self, message_id: i64) -> Result<LikeToggle, ClientError> {
        let path = add_like_path(message_id);
        let resp = self.client.post(self.url(&path)).send().await?;
        let resp = check_status(resp, &path).await?;

        let body = resp.bytes().await?;
        parse_like_body(&body)
    }

    async fn create_message(&self, text: &str) -> Result<Message, ClientError> {
        let body = NewMessage { text: text.to_string() };
        let resp = self
            .client
            .post(self.url(NEW_MESSAGE_PATH))
            .json(&body)
            .send()
            .await?;
        let resp = check_status(resp, NEW_MESSAGE_PATH).await?;

        let body = resp.bytes().await?;
        parse_created_message(&body)
    }
}
