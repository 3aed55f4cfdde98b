use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget};

/// Attach `handler` for the lifetime of the page.
///
/// A failed registration is logged with `what` naming the target.
pub fn listen<F>(target: &EventTarget, what: &str, event: &str, handler: F)
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    if let Err(e) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()) {
        log::warn!("failed to attach `{}` listener to {}: {:?}", event, what, e);
    }
    closure.forget();
}
