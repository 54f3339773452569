use regex::Regex;
use std::sync::OnceLock;
use crate::config::LIKE_BUTTON_PREFIX;

/// Recovers the message id from a like control id such as `like-button-42`.
pub fn message_id_from_element_id(element_id: &str) -> Option<i64> {
    element_id
        .strip_prefix(LIKE_BUTTON_PREFIX)
        .and_then(|rest| rest.parse::<i64>().ok())
}

pub fn is_like_button_id(element_id: &str) -> bool {
    element_id.starts_with(LIKE_BUTTON_PREFIX)
}

/// Pages that show a timeline: the home page and anything under `/users`.
pub fn is_timeline_path(pathname: &str) -> bool {
    pathname == "/" || pathname.contains("/users")
}

/// Only http(s) and root-relative avatar urls are rendered.
pub fn is_safe_image_url(url: &str) -> bool {
    let lower = url.trim().to_ascii_lowercase();
    lower.starts_with("http://")
        || lower.starts_with("https://")
        || (lower.starts_with('/') && !lower.starts_with("//"))
}

fn csrf_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r#"name="csrf_token"[^>]*value="([^"]*)""#).expect("Regex should compile")
    })
}

/// Pulls the hidden `csrf_token` value out of a rendered login form.
pub fn extract_csrf_token(html: &str) -> Option<String> {
    csrf_regex()
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}
