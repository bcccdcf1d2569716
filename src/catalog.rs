//! Asset Catalog: the album's eight tracks and the page chrome, per hosting target.

use crate::config::{HostingTarget, SiteConfig};
use once_cell::sync::Lazy;
use serde::Serialize;

/// Album order, names, and decoded durations in seconds.
const ALBUM_TRACKS: [(&str, f64); 8] = [
    ("In Darkness, a Rabbi's Prayer", 264.935997),
    ("A Mysterious Stranger With An Extraordinary Idea", 145.344),
    ("Gathering Clay, Making a Man", 151.344),
    ("Awakening Life With a Word", 105.408),
    ("A Power Too Great To Control", 156.12),
    ("The Golem Falls In Love", 255.048),
    ("The Rabbi Chases and Destroys His Creation", 181.2),
    ("Return To Mud", 109.056),
];

pub const TRACK_COUNT: usize = ALBUM_TRACKS.len();

/// Uploaded audio and artwork on the content platform, in album order.
const HOSTED_UPLOADS: [(&str, &str); 2] = [
    (
        "https://static1.squarespace.com/static/5457d939e4b0d5b75c105e2f/t/6667dd89490aca5d53b5ab95/1718082960021/1.mp3/original/1.mp3",
        "https://images.squarespace-cdn.com/content/v1/5457d939e4b0d5b75c105e2f/15cfd1e3-85f7-4788-8f5d-b0f521b4808f/1.jpg?format=2500w",
    ),
    (
        "https://static1.squarespace.com/static/5457d939e4b0d5b75c105e2f/t/6667f1859338655ff42489c0/1718088074006/2.mp3/original/2.mp3",
        "https://images.squarespace-cdn.com/content/v1/5457d939e4b0d5b75c105e2f/1957dae0-06c2-4751-9e29-1b8622cb936e/2.jpg?format=2500w",
    ),
];

const HOSTED_COVER: &str = "https://images.squarespace-cdn.com/content/v1/5457d939e4b0d5b75c105e2f/1718089684782-CP1H25GQEBIG78E5HG11/cover.jpg?format=2500";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Track {
    pub name: String,
    pub audio_url: String,
    pub artwork_url: String,
    pub numeral_url: Option<String>,
    pub duration: Option<f64>,
    pub start_offset: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChromeUrls {
    pub cover: String,
    pub play: String,
    pub pause: String,
    pub next: String,
    pub prev: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assets {
    pub target: HostingTarget,
    pub tracks: Vec<Track>,
    pub chrome: ChromeUrls,
}

static STATIC_ASSETS: Lazy<Assets> = Lazy::new(|| Assets::build(HostingTarget::Static, ""));
static HOSTED_ASSETS: Lazy<Assets> = Lazy::new(|| {
    let config = SiteConfig::from_build_env();
    Assets::build(HostingTarget::Hosted, &config.hosted_base)
});

/// Catalog for a hosting target. Built once, immutable afterwards.
pub fn get_assets(target: HostingTarget) -> &'static Assets {
    match target {
        HostingTarget::Static => &STATIC_ASSETS,
        HostingTarget::Hosted => &HOSTED_ASSETS,
    }
}

/// Fallback location for tracks not yet uploaded: `<base>/<dir>/<file>`.
fn hosted_url(base: &str, dir: &str, file: &str) -> String {
    format!(
        "{}/{}/{}",
        base.trim_end_matches('/'),
        urlencoding::encode(dir),
        urlencoding::encode(file)
    )
}

impl Assets {
    /// Build the table for `target`; `hosted_base` is ignored for static hosting.
    pub fn build(target: HostingTarget, hosted_base: &str) -> Self {
        let mut offset = 0.0;
        let tracks = ALBUM_TRACKS
            .iter()
            .enumerate()
            .map(|(idx, (name, duration))| {
                let number = idx + 1;
                let (audio_url, artwork_url, numeral_url) = match target {
                    HostingTarget::Static => (
                        format!("static/songs/{number}.mp3"),
                        format!("static/images/{number}.jpg"),
                        Some(format!("static/images/numeral-{number}.png")),
                    ),
                    HostingTarget::Hosted => match HOSTED_UPLOADS.get(idx) {
                        Some((audio, artwork)) => (audio.to_string(), artwork.to_string(), None),
                        None => (
                            hosted_url(hosted_base, "songs", &format!("{number}.mp3")),
                            hosted_url(hosted_base, "images", &format!("{number}.jpg")),
                            None,
                        ),
                    },
                };
                let track = Track {
                    name: name.to_string(),
                    audio_url,
                    artwork_url,
                    numeral_url,
                    duration: Some(*duration),
                    start_offset: Some(offset),
                };
                offset += duration;
                track
            })
            .collect();

        let chrome = match target {
            HostingTarget::Static => ChromeUrls {
                cover: "/static/images/cover.jpg".to_string(),
                play: "/static/images/play.png".to_string(),
                pause: "/static/images/pause.png".to_string(),
                next: "/static/images/next.png".to_string(),
                prev: "/static/images/prev.png".to_string(),
            },
            HostingTarget::Hosted => ChromeUrls {
                cover: HOSTED_COVER.to_string(),
                play: "/static/images/play.jpg".to_string(),
                pause: "/static/images/pause.jpg".to_string(),
                next: "/static/images/next.jpg".to_string(),
                prev: "/static/images/prev.jpg".to_string(),
            },
        };

        Self {
            target,
            tracks,
            chrome,
        }
    }

    pub fn track(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Length of the album played end to end.
    pub fn total_duration(&self) -> f64 {
        self.tracks.iter().filter_map(|t| t.duration).sum()
    }

    /// Track containing album-wide `position`, with the offset into that track.
    /// Positions past the end clamp to the end of the last track.
    pub fn track_at(&self, position: f64) -> Option<(usize, f64)> {
        if self.tracks.is_empty() || !position.is_finite() {
            return None;
        }
        let position = position.max(0.0);
        let last = self.tracks.len() - 1;
        for (idx, track) in self.tracks.iter().enumerate() {
            let start = track.start_offset?;
            let end = start + track.duration?;
            if position < end || idx == last {
                return Some((idx, (position - start).min(end - start)));
            }
        }
        None
    }

    /// Album-wide position of `offset` seconds into track `index`.
    pub fn album_position(&self, index: usize, offset: f64) -> Option<f64> {
        let track = self.track(index)?;
        Some(track.start_offset? + offset.max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_HOSTED_BASE;

    const EPSILON: f64 = 1e-6;

    #[test]
    fn static_catalog_opens_with_rabbis_prayer() {
        let assets = get_assets(HostingTarget::Static);
        let first = assets.track(0).unwrap();
        assert_eq!(first.name, "In Darkness, a Rabbi's Prayer");
        assert_eq!(first.duration, Some(264.935997));
        assert_eq!(first.start_offset, Some(0.0));
        assert_eq!(first.audio_url, "static/songs/1.mp3");
        assert_eq!(
            first.numeral_url.as_deref(),
            Some("static/images/numeral-1.png")
        );

        let second = assets.track(1).unwrap();
        assert!((second.start_offset.unwrap() - 264.935997).abs() < EPSILON);
    }

    #[test]
    fn offsets_are_cumulative_durations() {
        let assets = get_assets(HostingTarget::Static);
        let mut running = 0.0;
        for track in &assets.tracks {
            assert!((track.start_offset.unwrap() - running).abs() < EPSILON);
            running += track.duration.unwrap();
        }
        assert!((assets.total_duration() - running).abs() < EPSILON);
    }

    #[test]
    fn targets_differ_only_in_urls() {
        let local = Assets::build(HostingTarget::Static, "");
        let hosted = Assets::build(HostingTarget::Hosted, "https://cdn.example.org/golem/");
        assert_eq!(local.len(), TRACK_COUNT);
        assert_eq!(hosted.len(), TRACK_COUNT);

        for (a, b) in local.tracks.iter().zip(hosted.tracks.iter()) {
            assert_eq!(a.name, b.name);
            assert_eq!(a.duration, b.duration);
            assert_eq!(a.start_offset, b.start_offset);
            assert_ne!(a.audio_url, b.audio_url);
        }
        assert_eq!(
            hosted.tracks[7].audio_url,
            "https://cdn.example.org/golem/songs/8.mp3"
        );
    }

    #[test]
    fn hosted_catalog_uses_uploaded_urls() {
        let hosted = Assets::build(HostingTarget::Hosted, DEFAULT_HOSTED_BASE);
        assert_eq!(
            hosted.tracks[0].audio_url,
            "https://static1.squarespace.com/static/5457d939e4b0d5b75c105e2f/t/6667dd89490aca5d53b5ab95/1718082960021/1.mp3/original/1.mp3"
        );
        assert!(hosted.tracks[1]
            .artwork_url
            .starts_with("https://images.squarespace-cdn.com/content/v1/"));
        assert!(hosted.tracks[1].audio_url.ends_with("/2.mp3/original/2.mp3"));
        assert!(hosted.chrome.cover.contains("/cover.jpg?format=2500"));
        assert_eq!(hosted.chrome.play, "/static/images/play.jpg");

        // Uploads ignore the base; the rest still follow it.
        let moved = Assets::build(HostingTarget::Hosted, "https://cdn.example.org/golem");
        assert_eq!(moved.tracks[0].audio_url, hosted.tracks[0].audio_url);
        assert_eq!(moved.chrome.cover, hosted.chrome.cover);
        assert_eq!(
            moved.tracks[2].artwork_url,
            "https://cdn.example.org/golem/images/3.jpg"
        );
        assert!(hosted.tracks.iter().all(|t| t.numeral_url.is_none()));
    }

    #[test]
    fn album_timeline_maps_both_ways() {
        let assets = get_assets(HostingTarget::Static);
        assert_eq!(assets.track_at(0.0), Some((0, 0.0)));

        let (idx, offset) = assets.track_at(300.0).unwrap();
        assert_eq!(idx, 1);
        assert!((offset - (300.0 - 264.935997)).abs() < EPSILON);

        let (idx, offset) = assets.track_at(1.0e9).unwrap();
        assert_eq!(idx, TRACK_COUNT - 1);
        assert!((offset - 109.056).abs() < EPSILON);

        let position = assets.album_position(2, 10.0).unwrap();
        assert!((position - (264.935997 + 145.344 + 10.0)).abs() < EPSILON);
        assert_eq!(assets.track_at(f64::NAN), None);
        assert_eq!(assets.album_position(8, 0.0), None);
    }
}
