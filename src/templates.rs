use rust_embed::RustEmbed;
use regex::Regex;
use std::sync::OnceLock;
use html_escape::{encode_double_quoted_attribute, encode_text};
use crate::models::models::Message;
use crate::core::helpers::is_safe_image_url;
use crate::config::DEFAULT_IMAGE_URL;

#[derive(RustEmbed)]
#[folder = "static"]
struct Assets;

fn placeholder_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"MESSAGE_[A-Z_]+").expect("Regex should compile"))
}

/// Renders the timeline list item for a freshly created message.
///
/// Every field coming back from the server is escaped; the avatar falls back
/// to the default picture when its url is not http(s) or root-relative.
pub fn render_message_item(message: &Message) -> anyhow::Result<String> {
    let template = Assets::get("message_item.html")
        .ok_or_else(|| anyhow::anyhow!("Message item template not found"))?
        .data
        .to_vec();

    let html = String::from_utf8(template)?;

    let image_url = if is_safe_image_url(&message.image_url) {
        message.image_url.trim()
    } else {
        DEFAULT_IMAGE_URL
    };

    let user_id = message.user_id.to_string();
    let id = message.id.to_string();
    let image_url = encode_double_quoted_attribute(image_url);
    let username = encode_text(&message.username);
    let timestamp = encode_text(&message.timestamp);
    let text = encode_text(&message.text);

    // Single pass so placeholder-looking text inside a field stays literal.
    let html = placeholder_regex()
        .replace_all(&html, |caps: &regex::Captures| match &caps[0] {
            "MESSAGE_ID" => id.to_string(),
            "MESSAGE_USER_ID" => user_id.to_string(),
            "MESSAGE_IMAGE_URL" => image_url.to_string(),
            "MESSAGE_USERNAME" => username.to_string(),
            "MESSAGE_TIMESTAMP" => timestamp.to_string(),
            "MESSAGE_TEXT" => text.to_string(),
            other => other.to_string(),
        })
        .into_owned();

    Ok(html)
}
