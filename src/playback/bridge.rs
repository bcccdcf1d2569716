use super::{
    AudioHandle, Artwork, BridgeError, FrameScheduler, MediaHost, NowPlaying, NowPlayingSurface,
    PlaybackSession,
};
use crate::catalog::Assets;
use crate::config::SiteConfig;
use dioxus::logger::tracing::{debug, warn};
use std::cell::Cell;
use std::rc::Rc;

/// Intents issued by the UI.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlaybackCommand {
    Play(usize),
    /// Continue the current handle from where it paused.
    Resume,
    Pause,
    SeekTo(f64),
    /// Publish "now playing" for a track without touching playback.
    Announce(usize),
}

/// Raw events reported by an audio handle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostMediaEvent {
    MetadataLoaded(f64),
    TimeUpdate(f64),
    /// The element stopped on its own or refused to start.
    Paused,
    Ended,
}

/// Notifications raised back into the UI.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BridgeEvent {
    MetadataLoaded { track: usize, duration: f64 },
    TimeUpdated { current_time: f64 },
    Paused { track: usize },
    TrackEnded { track: usize },
}

/// What a `Play` did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Restarted { track: usize },
    Switched { from: Option<usize>, to: usize },
}

pub struct PlaybackBridge<M: MediaHost> {
    host: M,
    surface: Rc<dyn NowPlayingSurface>,
    scheduler: Rc<dyn FrameScheduler>,
    assets: &'static Assets,
    config: SiteConfig,
    // Bumped by every Play, Resume and Pause; a deferred play only fires if nothing
    // superseded it before the frame.
    generation: Rc<Cell<u64>>,
    // Metadata from the latest Play, published by whichever deferred play fires.
    pending_info: Rc<Cell<Option<NowPlaying>>>,
}

impl<M: MediaHost> PlaybackBridge<M> {
    pub fn new(
        host: M,
        surface: Rc<dyn NowPlayingSurface>,
        scheduler: Rc<dyn FrameScheduler>,
        assets: &'static Assets,
        config: SiteConfig,
    ) -> Self {
        Self {
            host,
            surface,
            scheduler,
            assets,
            config,
            generation: Rc::new(Cell::new(0)),
            pending_info: Rc::new(Cell::new(None)),
        }
    }

    pub fn assets(&self) -> &'static Assets {
        self.assets
    }

    pub fn dispatch(
        &self,
        session: &mut PlaybackSession<M::Handle>,
        command: PlaybackCommand,
    ) -> Result<(), BridgeError> {
        match command {
            PlaybackCommand::Play(track) => self.play(session, track).map(|_| ()),
            PlaybackCommand::Resume => {
                self.resume(session);
                Ok(())
            }
            PlaybackCommand::Pause => {
                self.pause(session);
                Ok(())
            }
            PlaybackCommand::SeekTo(seconds) => {
                self.seek_to(session, seconds);
                Ok(())
            }
            PlaybackCommand::Announce(track) => self.announce(track),
        }
    }

    /// Make `track` current and start it on the next frame. Replaying the
    /// current track restarts it from zero.
    pub fn play(
        &self,
        session: &mut PlaybackSession<M::Handle>,
        track: usize,
    ) -> Result<Transition, BridgeError> {
        let info = self.now_playing(track)?;
        let handle = self.host.resolve(track)?;

        let transition = if session.is_current(&handle) {
            handle.set_current_time(0.0);
            Transition::Restarted { track }
        } else {
            if let Some(previous) = session.current_handle() {
                previous.pause();
            }
            let from = session.adopt(track, handle.clone()).map(|(idx, _)| idx);
            Transition::Switched { from, to: track }
        };
        debug!(?transition, "play");
        self.play_after_paint(handle, Some(info));

        Ok(transition)
    }

    /// Play the current handle without resetting its position.
    pub fn resume(&self, session: &PlaybackSession<M::Handle>) {
        if let Some(handle) = session.current_handle() {
            self.play_after_paint(handle.clone(), None);
        }
    }

    /// Pause the current handle. Silent when nothing is current.
    pub fn pause(&self, session: &PlaybackSession<M::Handle>) {
        self.bump_generation();
        if let Some(handle) = session.current_handle() {
            handle.pause();
        }
    }

    /// Move the current handle to `seconds`. Other handles are never touched.
    pub fn seek_to(&self, session: &PlaybackSession<M::Handle>, seconds: f64) {
        if !seconds.is_finite() {
            return;
        }
        if let Some(handle) = session.current_handle() {
            handle.set_current_time(seconds.max(0.0));
        }
    }

    pub fn announce(&self, track: usize) -> Result<(), BridgeError> {
        let info = self.now_playing(track)?;
        self.surface.publish(&info)
    }

    /// Translate an event from the handle of `track` into a UI notification.
    pub fn relay(
        &self,
        session: &PlaybackSession<M::Handle>,
        track: usize,
        event: HostMediaEvent,
    ) -> Option<BridgeEvent> {
        match event {
            HostMediaEvent::MetadataLoaded(duration) if duration.is_finite() => {
                Some(BridgeEvent::MetadataLoaded { track, duration })
            }
            HostMediaEvent::MetadataLoaded(_) => None,
            HostMediaEvent::TimeUpdate(current_time) => (session.current_track() == Some(track))
                .then_some(BridgeEvent::TimeUpdated { current_time }),
            HostMediaEvent::Paused => {
                (session.current_track() == Some(track)).then_some(BridgeEvent::Paused { track })
            }
            HostMediaEvent::Ended => Some(BridgeEvent::TrackEnded { track }),
        }
    }

    pub fn now_playing(&self, track: usize) -> Result<NowPlaying, BridgeError> {
        let entry = self
            .assets
            .track(track)
            .ok_or(BridgeError::UnknownTrack(track))?;
        Ok(NowPlaying {
            title: entry.name.clone(),
            artist: self.config.artist.clone(),
            album: self.config.album.clone(),
            artwork: vec![Artwork {
                src: entry.artwork_url.clone(),
                sizes: self.config.artwork_size.clone(),
                mime: self.config.artwork_mime.clone(),
            }],
        })
    }

    fn play_after_paint(&self, handle: M::Handle, info: Option<NowPlaying>) {
        if info.is_some() {
            self.pending_info.set(info);
        }
        let ticket = self.bump_generation();
        let generation = self.generation.clone();
        let pending_info = self.pending_info.clone();
        let surface = self.surface.clone();
        self.scheduler.after_next_paint(Box::new(move || {
            if generation.get() != ticket {
                return;
            }
            handle.play();
            if let Some(info) = pending_info.take() {
                if let Err(err) = surface.publish(&info) {
                    warn!("now playing not published: {err}");
                }
            }
        }));
    }

    fn bump_generation(&self) -> u64 {
        let next = self.generation.get().wrapping_add(1);
        self.generation.set(next);
        next
    }
}
