use std::collections::HashMap;
use futures::channel::mpsc::UnboundedSender;
use log::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlButtonElement, HtmlInputElement, HtmlTextAreaElement};
use crate::config::FLASH_CONTAINER_SELECTOR;
use crate::page::{Listener, Page, UiEvent};
use super::Signal;

struct Bound {
    listener: Listener,
    callback: Closure<dyn FnMut(Event)>,
}

/// `Page` over the live document. Clicks on bound elements are forwarded
/// as `Signal::Click` to whoever drives the controller.
pub struct WebPage {
    document: Document,
    signals: UnboundedSender<Signal>,
    bound: HashMap<String, Bound>,
}

impl WebPage {
    pub fn new(document: Document, signals: UnboundedSender<Signal>) -> Self {
        WebPage {
            document,
            signals,
            bound: HashMap::new(),
        }
    }

    fn element(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }
}

impl Page for WebPage {
    fn pathname(&self) -> String {
        self.document
            .location()
            .and_then(|location| location.pathname().ok())
            .unwrap_or_default()
    }

    fn contains(&self, id: &str) -> bool {
        self.element(id).is_some()
    }

    fn input_value(&self, id: &str) -> Option<String> {
        let el = self.element(id)?;
        if let Some(textarea) = el.dyn_ref::<HtmlTextAreaElement>() {
            return Some(textarea.value());
        }
        el.dyn_ref::<HtmlInputElement>().map(|input| input.value())
    }

    fn has_class(&self, id: &str, class: &str) -> bool {
        self.element(id)
            .map(|el| el.class_list().contains(class))
            .unwrap_or(false)
    }

    fn add_class(&mut self, id: &str, class: &str) -> bool {
        match self.element(id) {
            Some(el) => el.class_list().add_1(class).is_ok(),
            None => false,
        }
    }

    fn remove_class(&mut self, id: &str, class: &str) -> bool {
        match self.element(id) {
            Some(el) => el.class_list().remove_1(class).is_ok(),
            None => false,
        }
    }

    fn set_disabled(&mut self, id: &str, disabled: bool) -> bool {
        let Some(el) = self.element(id) else {
            return false;
        };
        if let Some(button) = el.dyn_ref::<HtmlButtonElement>() {
            button.set_disabled(disabled);
            return true;
        }
        if disabled {
            el.set_attribute("disabled", "").is_ok()
        } else {
            el.remove_attribute("disabled").is_ok()
        }
    }

    fn prepend_html(&mut self, container_id: &str, html: &str) -> bool {
        match self.element(container_id) {
            Some(el) => el.insert_adjacent_html("afterbegin", html).is_ok(),
            None => false,
        }
    }

    fn buttons_in(&self, container_id: &str) -> Vec<String> {
        let selector = format!("#{} button", container_id);
        let Ok(nodes) = self.document.query_selector_all(&selector) else {
            return Vec::new();
        };

        (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(|el| el.id())
            .filter(|id| !id.is_empty())
            .collect()
    }

    fn add_listener(&mut self, id: &str, listener: Listener) -> bool {
        let Some(el) = self.element(id) else {
            return false;
        };
        self.remove_listener(id);

        let signals = self.signals.clone();
        let target_id = id.to_string();
        let callback = Closure::wrap(Box::new(move |event: Event| {
            event.prevent_default();
            let _ = signals.unbounded_send(Signal::Click(UiEvent::click(target_id.clone())));
        }) as Box<dyn FnMut(Event)>);

        if el
            .add_event_listener_with_callback("click", callback.as_ref().unchecked_ref())
            .is_err()
        {
            return false;
        }

        self.bound.insert(id.to_string(), Bound { listener, callback });
        true
    }

    fn remove_listener(&mut self, id: &str) -> Option<Listener> {
        let bound = self.bound.remove(id)?;
        if let Some(el) = self.element(id) {
            let _ = el.remove_event_listener_with_callback(
                "click",
                bound.callback.as_ref().unchecked_ref(),
            );
        }
        Some(bound.listener)
    }

    fn listener_for(&self, id: &str) -> Option<Listener> {
        self.bound.get(id).map(|bound| bound.listener.clone())
    }

    fn flash(&mut self, category: &str, message: &str) {
        let html = format!(
            r#"<div class="alert alert-{}">{}</div>"#,
            html_escape::encode_double_quoted_attribute(category),
            html_escape::encode_text(message)
        );
        match self.document.query_selector(FLASH_CONTAINER_SELECTOR) {
            Ok(Some(container)) => {
                let _ = container.insert_adjacent_html("afterbegin", &html);
            }
            _ => warn!("no flash container for: {}", message),
        }
    }
}
