use super::AudioHandle;

#[derive(Debug, Clone)]
struct Current<H> {
    track: usize,
    handle: H,
}

/// The single "current handle" slot. Owned by whoever drives the bridge and
/// handed to each command; at most one handle is current at a time.
#[derive(Debug, Clone)]
pub struct PlaybackSession<H> {
    current: Option<Current<H>>,
}

impl<H> Default for PlaybackSession<H> {
    fn default() -> Self {
        Self { current: None }
    }
}

impl<H: AudioHandle> PlaybackSession<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_track(&self) -> Option<usize> {
        self.current.as_ref().map(|c| c.track)
    }

    pub fn current_handle(&self) -> Option<&H> {
        self.current.as_ref().map(|c| &c.handle)
    }

    pub fn is_current(&self, handle: &H) -> bool {
        self.current_handle()
            .map(|current| current.key() == handle.key())
            .unwrap_or(false)
    }

    /// Replace the current handle, returning the one it displaced.
    pub(super) fn adopt(&mut self, track: usize, handle: H) -> Option<(usize, H)> {
        self.current
            .replace(Current { track, handle })
            .map(|previous| (previous.track, previous.handle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playback::testing::FakeHost;
    use crate::playback::MediaHost;

    #[test]
    fn adopt_hands_back_the_displaced_handle() {
        let host = FakeHost::with_tracks(3);
        let mut session = PlaybackSession::new();
        assert_eq!(session.current_track(), None);

        let first = host.resolve(0).unwrap();
        assert!(session.adopt(0, first.clone()).is_none());
        assert!(session.is_current(&first));

        let (track, previous) = session.adopt(2, host.resolve(2).unwrap()).unwrap();
        assert_eq!(track, 0);
        assert_eq!(previous.key(), "song-1");
        assert_eq!(session.current_track(), Some(2));
        assert!(!session.is_current(&first));
    }
}
