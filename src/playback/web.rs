//! Browser host: `<audio>` elements, `navigator.mediaSession`, animation frames, and
//! keyboard shortcuts.

use super::{
    handle_id, AudioHandle, BridgeError, FrameScheduler, HostMediaEvent, MediaHost, NoNowPlaying,
    NowPlaying, NowPlayingSurface, RemoteAction,
};
use dioxus::logger::tracing::{debug, warn};
use gloo_timers::callback::Timeout;
use js_sys::{Array, Function, Reflect};
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{window, HtmlAudioElement, KeyboardEvent};

fn js_error(value: JsValue) -> BridgeError {
    BridgeError::Host(value.as_string().unwrap_or_else(|| format!("{value:?}")))
}

#[derive(Clone)]
pub struct DomAudioHandle {
    id: String,
    element: HtmlAudioElement,
}

impl DomAudioHandle {
    pub fn element(&self) -> &HtmlAudioElement {
        &self.element
    }
}

impl AudioHandle for DomAudioHandle {
    fn key(&self) -> &str {
        &self.id
    }

    fn play(&self) {
        // A refused play() leaves the element paused without a `pause` event; raise one
        // so listeners see the state.
        if let Ok(promise) = self.element.play() {
            let id = self.id.clone();
            let element = self.element.clone();
            wasm_bindgen_futures::spawn_local(async move {
                if let Err(err) = wasm_bindgen_futures::JsFuture::from(promise).await {
                    debug!(%id, ?err, "play() rejected");
                    if let Ok(event) = web_sys::Event::new("pause") {
                        let _ = element.dispatch_event(&event);
                    }
                }
            });
        }
    }

    fn pause(&self) {
        let _ = self.element.pause();
    }

    fn current_time(&self) -> f64 {
        self.element.current_time()
    }

    fn set_current_time(&self, seconds: f64) {
        self.element.set_current_time(seconds);
    }

    fn duration(&self) -> Option<f64> {
        let duration = self.element.duration();
        duration.is_finite().then_some(duration)
    }

    fn is_paused(&self) -> bool {
        self.element.paused()
    }
}

/// Looks up the per-track `<audio id="song-N">` elements rendered by the page.
#[derive(Debug, Clone, Copy, Default)]
pub struct DomMediaHost;

impl MediaHost for DomMediaHost {
    type Handle = DomAudioHandle;

    fn resolve(&self, track: usize) -> Result<DomAudioHandle, BridgeError> {
        let id = handle_id(track);
        let element = window()
            .and_then(|w| w.document())
            .and_then(|doc| doc.get_element_by_id(&id))
            .and_then(|el| el.dyn_into::<HtmlAudioElement>().ok());
        match element {
            Some(element) => Ok(DomAudioHandle { id, element }),
            None => Err(BridgeError::MissingHandle(id)),
        }
    }
}

/// `navigator.mediaSession`, when the browser has one.
pub struct MediaSessionSurface {
    session: JsValue,
}

impl MediaSessionSurface {
    pub fn detect() -> Option<Self> {
        let navigator = window()?.navigator();
        let session = Reflect::get(&navigator, &"mediaSession".into()).ok()?;
        if session.is_undefined() || session.is_null() {
            return None;
        }
        Some(Self { session })
    }

    /// Route the OS transport buttons into `on_action`.
    pub fn install_actions<F>(&self, on_action: F) -> Result<(), BridgeError>
    where
        F: Fn(RemoteAction) + Clone + 'static,
    {
        let set_handler: Function = Reflect::get(&self.session, &"setActionHandler".into())
            .map_err(js_error)?
            .dyn_into()
            .map_err(|_| BridgeError::Host("setActionHandler is not callable".to_string()))?;

        let simple = [
            ("play", RemoteAction::Play),
            ("pause", RemoteAction::Pause),
            ("nexttrack", RemoteAction::Next),
            ("previoustrack", RemoteAction::Previous),
        ];
        for (name, action) in simple {
            let on_action = on_action.clone();
            let callback = Closure::wrap(Box::new(move || on_action(action)) as Box<dyn FnMut()>);
            // Browsers throw for actions they do not support; skip those.
            if let Err(err) = set_handler.call2(&self.session, &name.into(), callback.as_ref()) {
                debug!(name, ?err, "media session action unsupported");
            }
            callback.forget();
        }

        let seek = Closure::wrap(Box::new(move |details: JsValue| {
            let seek_time = Reflect::get(&details, &"seekTime".into())
                .ok()
                .and_then(|value| value.as_f64());
            if let Some(seconds) = seek_time {
                on_action(RemoteAction::SeekTo(seconds));
            }
        }) as Box<dyn FnMut(JsValue)>);
        if let Err(err) = set_handler.call2(&self.session, &"seekto".into(), seek.as_ref()) {
            debug!(?err, "media session seekto unsupported");
        }
        seek.forget();

        Ok(())
    }
}

impl NowPlayingSurface for MediaSessionSurface {
    fn publish(&self, info: &NowPlaying) -> Result<(), BridgeError> {
        let json = serde_json::to_string(info).map_err(|err| BridgeError::Host(err.to_string()))?;
        let init = js_sys::JSON::parse(&json).map_err(js_error)?;
        let win = window().ok_or_else(|| BridgeError::Host("no window".to_string()))?;
        let constructor: Function = Reflect::get(&win, &"MediaMetadata".into())
            .map_err(js_error)?
            .dyn_into()
            .map_err(|_| BridgeError::Host("MediaMetadata is unavailable".to_string()))?;
        let metadata = Reflect::construct(&constructor, &Array::of1(&init)).map_err(js_error)?;
        Reflect::set(&self.session, &"metadata".into(), &metadata).map_err(js_error)?;
        Ok(())
    }
}

/// The media session when present, otherwise a surface that ignores metadata.
pub fn now_playing_surface() -> Rc<dyn NowPlayingSurface> {
    match MediaSessionSurface::detect() {
        Some(surface) => Rc::new(surface),
        None => {
            debug!("media session unavailable");
            Rc::new(NoNowPlaying)
        }
    }
}

/// Defers work to `requestAnimationFrame`, falling back to a zero-delay timeout.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnimationFrameScheduler;

impl FrameScheduler for AnimationFrameScheduler {
    fn after_next_paint(&self, task: Box<dyn FnOnce()>) {
        let slot = Rc::new(Cell::new(Some(task)));
        let frame_slot = slot.clone();
        let callback = Closure::once_into_js(move || {
            if let Some(task) = frame_slot.take() {
                task();
            }
        });

        let scheduled = window()
            .map(|win| win.request_animation_frame(callback.unchecked_ref()).is_ok())
            .unwrap_or(false);
        if !scheduled {
            if let Some(task) = slot.take() {
                Timeout::new(0, move || task()).forget();
            }
        }
    }
}

/// Forward `loadedmetadata`, `timeupdate`, `pause` and `ended` from every track's element.
pub fn wire_media_events<F>(track_count: usize, on_event: F) -> Result<(), BridgeError>
where
    F: Fn(usize, HostMediaEvent) + Clone + 'static,
{
    for track in 0..track_count {
        let handle = DomMediaHost.resolve(track)?;
        let element = handle.element().clone();

        let metadata_closure = {
            let on_event = on_event.clone();
            let element = element.clone();
            Closure::wrap(Box::new(move || {
                on_event(track, HostMediaEvent::MetadataLoaded(element.duration()));
            }) as Box<dyn FnMut()>)
        };
        element.set_onloadedmetadata(Some(metadata_closure.as_ref().unchecked_ref()));
        metadata_closure.forget();

        let time_closure = {
            let on_event = on_event.clone();
            let element = element.clone();
            Closure::wrap(Box::new(move || {
                on_event(track, HostMediaEvent::TimeUpdate(element.current_time()));
            }) as Box<dyn FnMut()>)
        };
        element.set_ontimeupdate(Some(time_closure.as_ref().unchecked_ref()));
        time_closure.forget();

        let pause_closure = {
            let on_event = on_event.clone();
            Closure::wrap(
                Box::new(move || on_event(track, HostMediaEvent::Paused)) as Box<dyn FnMut()>
            )
        };
        element.set_onpause(Some(pause_closure.as_ref().unchecked_ref()));
        pause_closure.forget();

        let end_closure = {
            let on_event = on_event.clone();
            Closure::wrap(
                Box::new(move || on_event(track, HostMediaEvent::Ended)) as Box<dyn FnMut()>
            )
        };
        element.set_onended(Some(end_closure.as_ref().unchecked_ref()));
        end_closure.forget();

        // Metadata may already be in before the listener existed.
        if let Some(duration) = handle.duration() {
            on_event(track, HostMediaEvent::MetadataLoaded(duration));
        }
    }
    Ok(())
}

/// Typing targets keep their keys.
const EDITABLE_SELECTOR: &str =
    "input, textarea, select, [contenteditable]:not([contenteditable='false'])";

fn shortcut_action_from_key(event: &KeyboardEvent) -> Option<RemoteAction> {
    if event.default_prevented() || event.is_composing() {
        return None;
    }
    let typing = event
        .target()
        .and_then(|target| target.dyn_into::<web_sys::Element>().ok())
        .and_then(|element| element.closest(EDITABLE_SELECTOR).ok().flatten())
        .is_some();
    if typing {
        return None;
    }

    let plain = !event.meta_key() && !event.ctrl_key() && !event.alt_key();
    RemoteAction::from_shortcut(&event.key(), &event.code(), event.shift_key(), plain)
}

/// Route document `keydown` shortcuts into `on_action`.
pub fn install_keyboard_shortcuts<F>(on_action: F) -> Result<(), BridgeError>
where
    F: Fn(RemoteAction) + 'static,
{
    let document = window()
        .and_then(|w| w.document())
        .ok_or_else(|| BridgeError::Host("no document".to_string()))?;

    let key_cb = Closure::wrap(Box::new(move |event: KeyboardEvent| {
        if let Some(action) = shortcut_action_from_key(&event) {
            event.prevent_default();
            on_action(action);
        }
    }) as Box<dyn FnMut(KeyboardEvent)>);
    document
        .add_event_listener_with_callback("keydown", key_cb.as_ref().unchecked_ref())
        .map_err(js_error)?;
    key_cb.forget();
    Ok(())
}

/// Attach every browser-side listener in one go.
pub fn install_remote_controls<F>(on_action: F)
where
    F: Fn(RemoteAction) + Clone + 'static,
{
    if let Some(surface) = MediaSessionSurface::detect() {
        if let Err(err) = surface.install_actions(on_action.clone()) {
            warn!("media session actions not installed: {err}");
        }
    }
    if let Err(err) = install_keyboard_shortcuts(on_action) {
        warn!("keyboard shortcuts not installed: {err}");
    }
}
