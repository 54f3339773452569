//! The slice of the page the controller reads and patches.

pub mod memory;

pub use memory::MemoryPage;

/// What a registered element does when activated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Listener {
    ToggleLike(i64),
    SaveMessage,
}

/// A click delivered by the page, naming the element that was activated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UiEvent {
    pub target_id: String,
}

impl UiEvent {
    pub fn click(target_id: impl Into<String>) -> Self {
        UiEvent { target_id: target_id.into() }
    }
}

/// Element lookups are by id. Implementations return `false`/`None` for
/// unknown ids instead of failing; the controller decides what is an error.
pub trait Page {
    fn pathname(&self) -> String;

    fn contains(&self, id: &str) -> bool;

    fn input_value(&self, id: &str) -> Option<String>;

    fn has_class(&self, id: &str, class: &str) -> bool;

    fn add_class(&mut self, id: &str, class: &str) -> bool;

    fn remove_class(&mut self, id: &str, class: &str) -> bool;

    fn set_disabled(&mut self, id: &str, disabled: bool) -> bool;

    /// Inserts markup as the first child of the container.
    fn prepend_html(&mut self, container_id: &str, html: &str) -> bool;

    /// Ids of the buttons inside a container, in document order.
    fn buttons_in(&self, container_id: &str) -> Vec<String>;

    fn add_listener(&mut self, id: &str, listener: Listener) -> bool;

    fn remove_listener(&mut self, id: &str) -> Option<Listener>;

    fn listener_for(&self, id: &str) -> Option<Listener>;

    fn flash(&mut self, category: &str, message: &str);
}
