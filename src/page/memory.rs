use std::collections::HashMap;
use crate::config::{
    like_button_id, LIKED_CLASS, MESSAGES_CONTAINER_ID, NEW_MESSAGE_SAVE_BUTTON_ID,
    NEW_MESSAGE_TEXT_ID, NOT_LIKED_CLASS,
};
use super::{Listener, Page};

#[derive(Clone, Debug, Default)]
pub struct Element {
    pub tag: String,
    pub parent: Option<String>,
    pub classes: Vec<String>,
    pub value: String,
    pub disabled: bool,
    /// Markup inserted into this element, first child first.
    pub items: Vec<String>,
}

/// Headless page used by the CLI and the tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryPage {
    pathname: String,
    order: Vec<String>,
    elements: HashMap<String, Element>,
    listeners: HashMap<String, Listener>,
    flashes: Vec<(String, String)>,
}

impl MemoryPage {
    pub fn new(pathname: &str) -> Self {
        MemoryPage {
            pathname: pathname.to_string(),
            ..Default::default()
        }
    }

    /// A page with the new-message form and an empty messages list.
    pub fn timeline(pathname: &str) -> Self {
        let mut page = MemoryPage::new(pathname);
        page.insert_element(NEW_MESSAGE_TEXT_ID, "textarea", None);
        page.insert_element(NEW_MESSAGE_SAVE_BUTTON_ID, "button", None);
        page.insert_element(MESSAGES_CONTAINER_ID, "ul", None);
        page
    }

    pub fn with_like_button(mut self, message_id: i64, liked: bool) -> Self {
        let id = like_button_id(message_id);
        self.insert_element(&id, "button", Some(MESSAGES_CONTAINER_ID));
        let class = if liked { LIKED_CLASS } else { NOT_LIKED_CLASS };
        if let Some(el) = self.elements.get_mut(&id) {
            el.classes = vec!["btn".to_string(), "btn-sm".to_string(), class.to_string()];
        }
        self
    }

    pub fn insert_element(&mut self, id: &str, tag: &str, parent: Option<&str>) {
        if !self.elements.contains_key(id) {
            self.order.push(id.to_string());
        }
        self.elements.insert(
            id.to_string(),
            Element {
                tag: tag.to_string(),
                parent: parent.map(str::to_string),
                ..Default::default()
            },
        );
    }

    pub fn set_input_value(&mut self, id: &str, value: &str) -> bool {
        match self.elements.get_mut(id) {
            Some(el) => {
                el.value = value.to_string();
                true
            }
            None => false,
        }
    }

    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.get(id)
    }

    pub fn classes(&self, id: &str) -> Vec<String> {
        self.elements
            .get(id)
            .map(|el| el.classes.clone())
            .unwrap_or_default()
    }

    pub fn is_disabled(&self, id: &str) -> bool {
        self.elements.get(id).map(|el| el.disabled).unwrap_or(false)
    }

    pub fn items(&self, container_id: &str) -> &[String] {
        self.elements
            .get(container_id)
            .map(|el| el.items.as_slice())
            .unwrap_or(&[])
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn flashes(&self) -> &[(String, String)] {
        &self.flashes
    }
}

impl Page for MemoryPage {
    fn pathname(&self) -> String {
        self.pathname.clone()
    }

    fn contains(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    fn input_value(&self, id: &str) -> Option<String> {
        self.elements.get(id).map(|el| el.value.clone())
    }

    fn has_class(&self, id: &str, class: &str) -> bool {
        self.elements
            .get(id)
            .map(|el| el.classes.iter().any(|c| c == class))
            .unwrap_or(false)
    }

    fn add_class(&mut self, id: &str, class: &str) -> bool {
        match self.elements.get_mut(id) {
            Some(el) => {
                if !el.classes.iter().any(|c| c == class) {
                    el.classes.push(class.to_string());
                }
                true
            }
            None => false,
        }
    }

    fn remove_class(&mut self, id: &str, class: &str) -> bool {
        match self.elements.get_mut(id) {
            Some(el) => {
                el.classes.retain(|c| c != class);
                true
            }
            None => false,
        }
    }

    fn set_disabled(&mut self, id: &str, disabled: bool) -> bool {
        match self.elements.get_mut(id) {
            Some(el) => {
                el.disabled = disabled;
                true
            }
            None => false,
        }
    }

    fn prepend_html(&mut self, container_id: &str, html: &str) -> bool {
        match self.elements.get_mut(container_id) {
            Some(el) => {
                el.items.insert(0, html.to_string());
                true
            }
            None => false,
        }
    }

    fn buttons_in(&self, container_id: &str) -> Vec<String> {
        self.order
            .iter()
            .filter(|id| {
                self.elements.get(*id).map_or(false, |el| {
                    el.tag == "button" && el.parent.as_deref() == Some(container_id)
                })
            })
            .cloned()
            .collect()
    }

    fn add_listener(&mut self, id: &str, listener: Listener) -> bool {
        if !self.elements.contains_key(id) {
            return false;
        }
        self.listeners.insert(id.to_string(), listener);
        true
    }

    fn remove_listener(&mut self, id: &str) -> Option<Listener> {
        self.listeners.remove(id)
    }

    fn listener_for(&self, id: &str) -> Option<Listener> {
        self.listeners.get(id).cloned()
    }

    fn flash(&mut self, category: &str, message: &str) {
        self.flashes.push((category.to_string(), message.to_string()));
    }
}
