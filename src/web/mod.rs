//! Browser entry point: mounts the controller on the live page.

pub mod fetch;
pub mod page;

pub use fetch::FetchApi;
pub use page::WebPage;

use futures::channel::mpsc::{self, UnboundedReceiver};
use futures::StreamExt;
use log::{debug, info};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::Event;
use crate::controller::MessageController;
use crate::page::UiEvent;

/// What the page tells the controller loop.
#[derive(Debug)]
pub enum Signal {
    Click(UiEvent),
    Unload,
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let (signals, receiver) = mpsc::unbounded();
    let page = WebPage::new(document, signals.clone());
    let controller = MessageController::mount(FetchApi::default(), page);

    let on_pagehide = Closure::wrap(Box::new(move |_event: Event| {
        let _ = signals.unbounded_send(Signal::Unload);
    }) as Box<dyn FnMut(Event)>);
    window.add_event_listener_with_callback("pagehide", on_pagehide.as_ref().unchecked_ref())?;
    on_pagehide.forget();

    spawn_local(run(controller, receiver));
    Ok(())
}

/// Handles clicks one at a time until the page goes away, then unmounts.
async fn run(
    mut controller: MessageController<FetchApi, WebPage>,
    mut signals: UnboundedReceiver<Signal>,
) {
    while let Some(signal) = signals.next().await {
        match signal {
            Signal::Click(event) => {
                // Errors are already flashed and logged by dispatch.
                if let Ok(outcome) = controller.dispatch(&event).await {
                    debug!("#{} -> {:?}", event.target_id, outcome);
                }
            }
            Signal::Unload => break,
        }
    }
    controller.unmount();
    info!("controller loop finished");
}
