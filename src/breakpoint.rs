use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{MediaQueryList, MediaQueryListEvent};

/// Media query matching viewports at most `width` logical pixels wide.
pub fn media_query(width: u32) -> String {
    format!("(max-width: {width}px)")
}

fn match_media(query: &str) -> Option<MediaQueryList> {
    web_sys::window()?.match_media(query).ok().flatten()
}

/// Shared "narrow layout" flag, observed once at the root of the app.
#[derive(Clone, Copy, PartialEq)]
pub struct Viewport {
    narrow: Signal<bool>,
}

impl Viewport {
    pub fn new(narrow: Signal<bool>) -> Self {
        Self { narrow }
    }

    pub fn is_narrow(&self) -> bool {
        (self.narrow)()
    }
}

/// A `change` listener on a media query list, removed again on drop.
struct Observer {
    list: MediaQueryList,
    callback: Closure<dyn FnMut(MediaQueryListEvent)>,
}

impl Observer {
    fn attach(query: &str, mut narrow: Signal<bool>) -> Option<Self> {
        let Some(list) = match_media(query) else {
            tracing::debug!(query = %query, "matchMedia unavailable, keeping wide layout.");
            return None;
        };

        let callback: Closure<dyn FnMut(MediaQueryListEvent)> =
            Closure::new(move |event: MediaQueryListEvent| narrow.set(event.matches()));

        if let Err(error) =
            list.add_event_listener_with_callback("change", callback.as_ref().unchecked_ref())
        {
            tracing::error!(?error, "Failed to observe viewport.");
            return None;
        }

        Some(Self { list, callback })
    }
}

impl Drop for Observer {
    fn drop(&mut self) {
        if let Err(error) = self
            .list
            .remove_event_listener_with_callback("change", self.callback.as_ref().unchecked_ref())
        {
            tracing::error!(?error, "Failed to stop observing viewport.");
        }
    }
}

/// Reactive flag for viewports at most `width` pixels wide.
///
/// The listener is detached when the calling component unmounts, so the closure never
/// outlives the signal it writes to.
pub fn use_media_query(width: u32) -> Signal<bool> {
    let query = media_query(width);
    let narrow = use_signal(|| match_media(&query).is_some_and(|list| list.matches()));

    let observer = use_hook(move || {
        let observer = Observer::attach(&query, narrow);
        Rc::new(RefCell::new(observer))
    });

    use_drop(move || {
        observer.borrow_mut().take();
    });

    narrow
}

/// Observes the breakpoint and exposes it to every descendant.
pub fn use_viewport_provider(width: u32) -> Viewport {
    let narrow = use_media_query(width);
    use_context_provider(|| Viewport::new(narrow))
}

pub fn use_viewport() -> Viewport {
    use_context::<Viewport>()
}
