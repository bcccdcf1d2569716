//! UI-side playback state and transport policy.
//!
//! The bridge never decides what plays next. Every transport decision lives
//! here and comes out as a `PlaybackCommand` for the controller to dispatch.

use crate::catalog::Assets;
use crate::playback::{BridgeEvent, PlaybackCommand, RemoteAction};

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerView {
    pub current: Option<usize>,
    pub playing: bool,
    pub position: f64,
    pub durations: Vec<Option<f64>>,
}

impl PlayerView {
    pub fn new(assets: &Assets) -> Self {
        Self {
            current: None,
            playing: false,
            position: 0.0,
            durations: assets.tracks.iter().map(|t| t.duration).collect(),
        }
    }

    pub fn track_count(&self) -> usize {
        self.durations.len()
    }

    pub fn current_duration(&self) -> Option<f64> {
        self.current.and_then(|idx| self.durations.get(idx).copied().flatten())
    }

    /// Start `track`. Choosing the current track again restarts it.
    pub fn select(&mut self, track: usize) -> PlaybackCommand {
        self.current = Some(track);
        self.playing = true;
        self.position = 0.0;
        PlaybackCommand::Play(track)
    }

    pub fn toggle(&mut self) -> PlaybackCommand {
        if self.playing {
            self.pause()
        } else {
            self.resume()
        }
    }

    pub fn pause(&mut self) -> PlaybackCommand {
        self.playing = false;
        PlaybackCommand::Pause
    }

    /// Continue the current track, or start the album if nothing was chosen yet.
    pub fn resume(&mut self) -> PlaybackCommand {
        match self.current {
            Some(_) => {
                self.playing = true;
                PlaybackCommand::Resume
            }
            None => self.select(0),
        }
    }

    /// Next track; nothing after the last one.
    pub fn next(&mut self) -> Option<PlaybackCommand> {
        let target = match self.current {
            Some(idx) if idx + 1 < self.track_count() => idx + 1,
            Some(_) => return None,
            None => 0,
        };
        Some(self.select(target))
    }

    /// Previous track; on the first track this replays it from the start.
    pub fn previous(&mut self) -> PlaybackCommand {
        let target = self.current.map(|idx| idx.saturating_sub(1)).unwrap_or(0);
        self.select(target)
    }

    pub fn seek(&mut self, seconds: f64) -> PlaybackCommand {
        let upper = self.current_duration().unwrap_or(f64::MAX);
        self.position = seconds.clamp(0.0, upper);
        PlaybackCommand::SeekTo(self.position)
    }

    /// Land on `offset` seconds into `track`, e.g. from the album-wide timeline.
    pub fn jump(&mut self, track: usize, offset: f64) -> [PlaybackCommand; 2] {
        let play = self.select(track);
        let seek = self.seek(offset);
        [play, seek]
    }

    pub fn handle_remote(&mut self, action: RemoteAction) -> Option<PlaybackCommand> {
        match action {
            RemoteAction::Play => Some(self.resume()),
            RemoteAction::Pause => Some(self.pause()),
            RemoteAction::TogglePlay => Some(self.toggle()),
            RemoteAction::Next => self.next(),
            RemoteAction::Previous => Some(self.previous()),
            RemoteAction::SeekTo(seconds) if seconds.is_finite() && self.current.is_some() => {
                Some(self.seek(seconds))
            }
            RemoteAction::SeekTo(_) => None,
        }
    }

    /// Fold a bridge notification into the view, returning any follow-up command.
    pub fn apply(&mut self, event: &BridgeEvent) -> Option<PlaybackCommand> {
        match *event {
            BridgeEvent::MetadataLoaded { track, duration } => {
                if let Some(slot) = self.durations.get_mut(track) {
                    *slot = Some(duration);
                }
                None
            }
            BridgeEvent::TimeUpdated { current_time } => {
                self.position = current_time;
                None
            }
            BridgeEvent::Paused { track } => {
                if self.current == Some(track) {
                    self.playing = false;
                }
                None
            }
            BridgeEvent::TrackEnded { track } => {
                if self.current != Some(track) {
                    return None;
                }
                let advanced = self.next();
                if advanced.is_none() {
                    self.playing = false;
                }
                advanced
            }
        }
    }
}

/// `m:ss` clock for a position in seconds.
pub fn format_clock(seconds: f64) -> String {
    let total = if seconds.is_finite() {
        seconds.max(0.0).floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{get_assets, TRACK_COUNT};
    use crate::config::HostingTarget;

    fn view() -> PlayerView {
        PlayerView::new(get_assets(HostingTarget::Static))
    }

    #[test]
    fn ended_track_advances_to_next() {
        let mut view = view();
        view.select(2);
        view.position = 150.0;

        let follow_up = view.apply(&BridgeEvent::TrackEnded { track: 2 });
        assert_eq!(follow_up, Some(PlaybackCommand::Play(3)));
        assert_eq!(view.current, Some(3));
        assert_eq!(view.position, 0.0);
        assert!(view.playing);
    }

    #[test]
    fn album_stops_after_last_track() {
        let mut view = view();
        view.select(TRACK_COUNT - 1);

        let follow_up = view.apply(&BridgeEvent::TrackEnded {
            track: TRACK_COUNT - 1,
        });
        assert_eq!(follow_up, None);
        assert!(!view.playing);
        assert_eq!(view.current, Some(TRACK_COUNT - 1));
    }

    #[test]
    fn stale_end_is_ignored() {
        let mut view = view();
        view.select(4);
        assert_eq!(view.apply(&BridgeEvent::TrackEnded { track: 1 }), None);
        assert_eq!(view.current, Some(4));
        assert!(view.playing);
    }

    #[test]
    fn host_pause_clears_playing_flag() {
        let mut view = view();
        view.select(3);
        assert_eq!(view.apply(&BridgeEvent::Paused { track: 0 }), None);
        assert!(view.playing);
        assert_eq!(view.apply(&BridgeEvent::Paused { track: 3 }), None);
        assert!(!view.playing);
        assert_eq!(view.toggle(), PlaybackCommand::Resume);
    }

    #[test]
    fn previous_on_first_track_replays_it() {
        let mut view = view();
        assert_eq!(view.previous(), PlaybackCommand::Play(0));
        assert_eq!(view.previous(), PlaybackCommand::Play(0));

        view.select(5);
        assert_eq!(view.previous(), PlaybackCommand::Play(4));
    }

    #[test]
    fn toggle_resumes_without_restart() {
        let mut view = view();
        assert_eq!(view.toggle(), PlaybackCommand::Play(0));
        assert_eq!(view.toggle(), PlaybackCommand::Pause);
        assert!(!view.playing);
        assert_eq!(view.toggle(), PlaybackCommand::Resume);
        assert!(view.playing);
    }

    #[test]
    fn next_stops_at_album_end() {
        let mut view = view();
        assert_eq!(view.next(), Some(PlaybackCommand::Play(0)));
        view.select(TRACK_COUNT - 1);
        assert_eq!(view.next(), None);
    }

    #[test]
    fn notifications_update_view() {
        let mut view = view();
        view.select(1);
        view.apply(&BridgeEvent::MetadataLoaded {
            track: 1,
            duration: 146.0,
        });
        view.apply(&BridgeEvent::TimeUpdated { current_time: 12.5 });
        assert_eq!(view.current_duration(), Some(146.0));
        assert_eq!(view.position, 12.5);

        assert_eq!(view.seek(500.0), PlaybackCommand::SeekTo(146.0));
        assert_eq!(view.seek(-3.0), PlaybackCommand::SeekTo(0.0));
    }

    #[test]
    fn remote_actions_map_to_commands() {
        let mut view = view();
        assert_eq!(view.handle_remote(RemoteAction::SeekTo(10.0)), None);
        assert_eq!(
            view.handle_remote(RemoteAction::Play),
            Some(PlaybackCommand::Play(0))
        );
        assert_eq!(
            view.handle_remote(RemoteAction::Next),
            Some(PlaybackCommand::Play(1))
        );
        assert_eq!(
            view.handle_remote(RemoteAction::SeekTo(10.0)),
            Some(PlaybackCommand::SeekTo(10.0))
        );
        assert_eq!(view.handle_remote(RemoteAction::SeekTo(f64::NAN)), None);
        assert_eq!(view.position, 10.0);
        assert_eq!(
            view.handle_remote(RemoteAction::Pause),
            Some(PlaybackCommand::Pause)
        );
    }

    #[test]
    fn album_timeline_jump_plays_then_seeks() {
        let assets = get_assets(HostingTarget::Static);
        let mut view = PlayerView::new(assets);
        let (track, offset) = assets.track_at(300.0).unwrap();
        let [play, seek] = view.jump(track, offset);
        assert_eq!(play, PlaybackCommand::Play(1));
        match seek {
            PlaybackCommand::SeekTo(seconds) => assert!((seconds - 35.064003).abs() < 1e-6),
            other => panic!("expected a seek, got {other:?}"),
        }
        assert_eq!(view.current, Some(1));
    }

    #[test]
    fn clock_formats_minutes_and_seconds() {
        assert_eq!(format_clock(0.0), "0:00");
        assert_eq!(format_clock(264.935997), "4:24");
        assert_eq!(format_clock(f64::NAN), "0:00");
    }
}
