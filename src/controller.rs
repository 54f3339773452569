use log::{debug, info, warn};
use crate::api::MessagesApi;
use crate::config::{
    LIKED_CLASS, MAX_MESSAGE_LENGTH, MESSAGES_CONTAINER_ID, NEW_MESSAGE_SAVE_BUTTON_ID,
    NEW_MESSAGE_TEXT_ID, NOT_LIKED_CLASS,
};
use crate::core::errors::ClientError;
use crate::core::helpers::{is_like_button_id, is_timeline_path, message_id_from_element_id};
use crate::models::models::{LikeState, Message};
use crate::page::{Listener, Page, UiEvent};
use crate::templates::render_message_item;

/// Result of a handled click.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    Liked { message_id: i64, state: LikeState },
    /// `inserted` is false when the current page shows no timeline.
    Posted { message: Message, inserted: bool },
    Ignored,
}

/// Binds the like controls and the new-message form of one page to the API.
pub struct MessageController<A: MessagesApi, P: Page> {
    api: A,
    page: P,
    bound: Vec<String>,
}

impl<A: MessagesApi, P: Page> MessageController<A, P> {
    /// Registers listeners on the save button and every like control inside
    /// the messages list. Pages without the form still get like handling.
    pub fn mount(api: A, mut page: P) -> Self {
        let mut bound = Vec::new();

        for id in page.buttons_in(MESSAGES_CONTAINER_ID) {
            if let Some(message_id) = message_id_from_element_id(&id) {
                if page.add_listener(&id, Listener::ToggleLike(message_id)) {
                    bound.push(id);
                }
            }
        }

        if page.add_listener(NEW_MESSAGE_SAVE_BUTTON_ID, Listener::SaveMessage) {
            bound.push(NEW_MESSAGE_SAVE_BUTTON_ID.to_string());
        }

        info!("mounted on {} with {} listeners", page.pathname(), bound.len());
        MessageController { api, page, bound }
    }

    /// Removes every listener added by `mount` and hands back the parts.
    pub fn unmount(mut self) -> (A, P) {
        for id in self.bound.drain(..) {
            self.page.remove_listener(&id);
        }
        info!("unmounted from {}", self.page.pathname());
        (self.api, self.page)
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Routes a click to the handler registered for its target.
    ///
    /// Failures are flashed on the page before being returned.
    pub async fn dispatch(&mut self, event: &UiEvent) -> Result<Outcome, ClientError> {
        let result = match self.page.listener_for(&event.target_id) {
            Some(Listener::ToggleLike(message_id)) => {
                self.toggle_like(&event.target_id, message_id).await
            }
            Some(Listener::SaveMessage) => self.submit_message().await,
            None if is_like_button_id(&event.target_id) && self.is_listed_button(&event.target_id) => {
                // Like control added to the list after mount, or a malformed id.
                match message_id_from_element_id(&event.target_id) {
                    Some(message_id) => self.toggle_like(&event.target_id, message_id).await,
                    None => Err(ClientError::InvalidInput(format!(
                        "Bad like control id: {}",
                        event.target_id
                    ))),
                }
            }
            None => {
                debug!("no listener for #{}", event.target_id);
                Ok(Outcome::Ignored)
            }
        };

        if let Err(err) = &result {
            warn!("#{}: {}", event.target_id, err);
            self.page.flash("danger", &err.user_message());
        }
        result
    }

    /// Toggles the like for `message_id` and commits the new button state
    /// once the server has answered.
    pub async fn toggle_like(&mut self, button_id: &str, message_id: i64) -> Result<Outcome, ClientError> {
        if !self.page.contains(button_id) {
            return Err(ClientError::MissingElement(button_id.to_string()));
        }

        let current = self.like_state(button_id);
        let toggle = self.api.add_like(message_id).await?;
        let state = toggle
            .liked
            .map(LikeState::from_liked)
            .unwrap_or_else(|| current.flipped());

        self.apply_like_state(button_id, state);
        debug!("message {} like state {:?}", message_id, state);
        Ok(Outcome::Liked { message_id, state })
    }

    /// Sends the form text and, on timeline pages, puts the new message on
    /// top of the list. The save button is disabled while in flight.
    pub async fn submit_message(&mut self) -> Result<Outcome, ClientError> {
        let text = self
            .page
            .input_value(NEW_MESSAGE_TEXT_ID)
            .ok_or_else(|| ClientError::MissingElement(NEW_MESSAGE_TEXT_ID.to_string()))?;

        if text.trim().is_empty() {
            return Err(ClientError::InvalidInput("Message text is required.".to_string()));
        }
        if text.chars().count() > MAX_MESSAGE_LENGTH {
            return Err(ClientError::InvalidInput(format!(
                "Messages are limited to {} characters.",
                MAX_MESSAGE_LENGTH
            )));
        }

        self.page.set_disabled(NEW_MESSAGE_SAVE_BUTTON_ID, true);
        let created = self.api.create_message(&text).await;
        self.page.set_disabled(NEW_MESSAGE_SAVE_BUTTON_ID, false);
        let message = created?;

        let inserted = if is_timeline_path(&self.page.pathname()) {
            let html = render_message_item(&message)
                .map_err(|e| ClientError::Render(e.to_string()))?;
            if !self.page.prepend_html(MESSAGES_CONTAINER_ID, &html) {
                return Err(ClientError::MissingElement(MESSAGES_CONTAINER_ID.to_string()));
            }
            true
        } else {
            false
        };

        debug!("message {} created, inserted={}", message.id, inserted);
        Ok(Outcome::Posted { message, inserted })
    }

    fn is_listed_button(&self, id: &str) -> bool {
        self.page
            .buttons_in(MESSAGES_CONTAINER_ID)
            .iter()
            .any(|button| button == id)
    }

    fn like_state(&self, button_id: &str) -> LikeState {
        if self.page.has_class(button_id, LIKED_CLASS) {
            LikeState::Liked
        } else {
            LikeState::NotLiked
        }
    }

    fn apply_like_state(&mut self, button_id: &str, state: LikeState) {
        let (on, off) = match state {
            LikeState::Liked => (LIKED_CLASS, NOT_LIKED_CLASS),
            LikeState::NotLiked => (NOT_LIKED_CLASS, LIKED_CLASS),
        };
        self.page.remove_class(button_id, off);
        self.page.add_class(button_id, on);
    }
}
