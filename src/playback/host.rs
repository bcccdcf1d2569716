// Host capabilities the bridge drives. The browser implementations live in `web.rs`.
use super::BridgeError;
use serde::Serialize;

/// DOM id of the audio element backing `track` (ids are 1-based).
pub fn handle_id(track: usize) -> String {
    format!("song-{}", track + 1)
}

/// Transport requests that originate outside the page UI (OS media controls, keyboard).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RemoteAction {
    Play,
    Pause,
    TogglePlay,
    Next,
    Previous,
    SeekTo(f64),
}

impl RemoteAction {
    /// Keyboard binding for a `keydown`: media keys, space to toggle, shift+arrows
    /// to skip. `plain` means no meta, ctrl or alt modifier is held.
    pub fn from_shortcut(key: &str, code: &str, shift: bool, plain: bool) -> Option<Self> {
        match key {
            "MediaTrackNext" | "MediaNextTrack" | "AudioTrackNext" => Some(Self::Next),
            "MediaTrackPrevious" | "MediaPreviousTrack" | "AudioTrackPrevious" => {
                Some(Self::Previous)
            }
            "MediaPlayPause" => Some(Self::TogglePlay),
            "ArrowRight" if plain && shift => Some(Self::Next),
            "ArrowLeft" if plain && shift => Some(Self::Previous),
            " " | "Spacebar" if plain => Some(Self::TogglePlay),
            _ if plain && code == "Space" => Some(Self::TogglePlay),
            _ => None,
        }
    }
}

/// One playable audio resource, addressed by a stable key.
pub trait AudioHandle: Clone + 'static {
    fn key(&self) -> &str;
    fn play(&self);
    fn pause(&self);
    fn current_time(&self) -> f64;
    /// The host clamps out-of-range positions.
    fn set_current_time(&self, seconds: f64);
    /// `None` until the host has decoded the duration.
    fn duration(&self) -> Option<f64>;
    fn is_paused(&self) -> bool;
}

/// Resolves the audio handle backing a catalog track.
pub trait MediaHost {
    type Handle: AudioHandle;

    fn resolve(&self, track: usize) -> Result<Self::Handle, BridgeError>;
}

/// OS-level "now playing" surface.
pub trait NowPlayingSurface {
    fn publish(&self, info: &NowPlaying) -> Result<(), BridgeError>;
}

/// Used when the host has no media session.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoNowPlaying;

impl NowPlayingSurface for NoNowPlaying {
    fn publish(&self, _info: &NowPlaying) -> Result<(), BridgeError> {
        Ok(())
    }
}

/// Runs work after the host's next paint.
pub trait FrameScheduler {
    fn after_next_paint(&self, task: Box<dyn FnOnce()>);
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Artwork {
    pub src: String,
    pub sizes: String,
    #[serde(rename = "type")]
    pub mime: String,
}

/// Shape matches the browser `MediaMetadataInit` dictionary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NowPlaying {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub artwork: Vec<Artwork>,
}


#[cfg(test)]
pub(crate) mod testing {
    //! Recording fakes shared by bridge and UI tests.
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    pub enum HostCall {
        Play(usize),
        Pause(usize),
        Seek(usize, f64),
        Publish(String),
    }

    pub type CallLog = Rc<RefCell<Vec<HostCall>>>;

    #[derive(Debug)]
    struct HandleState {
        paused: Cell<bool>,
        position: Cell<f64>,
        duration: Cell<Option<f64>>,
    }

    #[derive(Debug, Clone)]
    pub struct FakeHandle {
        track: usize,
        key: String,
        state: Rc<HandleState>,
        log: CallLog,
    }

    impl FakeHandle {
        pub fn set_position(&self, seconds: f64) {
            self.state.position.set(seconds);
        }
    }

    impl AudioHandle for FakeHandle {
        fn key(&self) -> &str {
            &self.key
        }

        fn play(&self) {
            self.state.paused.set(false);
            self.log.borrow_mut().push(HostCall::Play(self.track));
        }

        fn pause(&self) {
            self.state.paused.set(true);
            self.log.borrow_mut().push(HostCall::Pause(self.track));
        }

        fn current_time(&self) -> f64 {
            self.state.position.get()
        }

        fn set_current_time(&self, seconds: f64) {
            let clamped = match self.state.duration.get() {
                Some(duration) => seconds.clamp(0.0, duration),
                None => seconds.max(0.0),
            };
            self.state.position.set(clamped);
            self.log.borrow_mut().push(HostCall::Seek(self.track, clamped));
        }

        fn duration(&self) -> Option<f64> {
            self.state.duration.get()
        }

        fn is_paused(&self) -> bool {
            self.state.paused.get()
        }
    }

    /// A fixed set of handles, one per track, all logging into one list.
    #[derive(Debug, Clone)]
    pub struct FakeHost {
        handles: Vec<FakeHandle>,
        pub log: CallLog,
    }

    impl FakeHost {
        pub fn with_tracks(count: usize) -> Self {
            let log: CallLog = Rc::default();
            let handles = (0..count)
                .map(|track| FakeHandle {
                    track,
                    key: handle_id(track),
                    state: Rc::new(HandleState {
                        paused: Cell::new(true),
                        position: Cell::new(0.0),
                        duration: Cell::new(Some(300.0)),
                    }),
                    log: log.clone(),
                })
                .collect();
            Self { handles, log }
        }

        pub fn handle(&self, track: usize) -> &FakeHandle {
            &self.handles[track]
        }

        pub fn calls(&self) -> Vec<HostCall> {
            self.log.borrow().clone()
        }

        pub fn playing(&self) -> Vec<usize> {
            self.handles
                .iter()
                .enumerate()
                .filter(|(_, h)| !h.is_paused())
                .map(|(idx, _)| idx)
                .collect()
        }
    }

    impl MediaHost for FakeHost {
        type Handle = FakeHandle;

        fn resolve(&self, track: usize) -> Result<FakeHandle, BridgeError> {
            self.handles
                .get(track)
                .cloned()
                .ok_or_else(|| BridgeError::MissingHandle(handle_id(track)))
        }
    }

    #[derive(Debug, Clone)]
    pub struct RecordingSurface(pub CallLog);

    impl NowPlayingSurface for RecordingSurface {
        fn publish(&self, info: &NowPlaying) -> Result<(), BridgeError> {
            self.0.borrow_mut().push(HostCall::Publish(info.title.clone()));
            Ok(())
        }
    }

    /// Holds frame tasks until `flush` is called, like a paint that has not happened yet.
    #[derive(Clone, Default)]
    pub struct ManualFrames {
        queue: Rc<RefCell<VecDeque<Box<dyn FnOnce()>>>>,
    }

    impl ManualFrames {
        pub fn pending(&self) -> usize {
            self.queue.borrow().len()
        }

        pub fn flush(&self) {
            loop {
                let task = self.queue.borrow_mut().pop_front();
                match task {
                    Some(task) => task(),
                    None => break,
                }
            }
        }
    }

    impl FrameScheduler for ManualFrames {
        fn after_next_paint(&self, task: Box<dyn FnOnce()>) {
            self.queue.borrow_mut().push_back(task);
        }
    }
}
