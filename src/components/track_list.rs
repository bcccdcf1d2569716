use crate::catalog::get_assets;
use crate::components::{format_clock, send_command, BridgeMessage, PlayerView};
use crate::config::SiteConfig;
use dioxus::prelude::*;

#[derive(Clone, PartialEq)]
struct TrackRow {
    index: usize,
    number: usize,
    name: String,
    artwork_url: String,
    numeral_url: Option<String>,
    duration_text: String,
    active: bool,
}

/// The album's tracks in order; clicking one plays it (or restarts it if current).
#[component]
pub fn TrackList() -> Element {
    let config = use_context::<SiteConfig>();
    let assets = get_assets(config.hosting_target);
    let mut view = use_context::<Signal<PlayerView>>();
    let bridge = use_coroutine_handle::<BridgeMessage>();

    let snapshot = view();
    let rows: Vec<TrackRow> = assets
        .tracks
        .iter()
        .enumerate()
        .map(|(index, track)| TrackRow {
            index,
            number: index + 1,
            name: track.name.clone(),
            artwork_url: track.artwork_url.clone(),
            numeral_url: track.numeral_url.clone(),
            duration_text: snapshot
                .durations
                .get(index)
                .copied()
                .flatten()
                .map(format_clock)
                .unwrap_or_default(),
            active: snapshot.current == Some(index),
        })
        .collect();

    rsx! {
        ol { class: "track-list",
            for row in rows {
                li {
                    key: "{row.index}",
                    class: if row.active { "track active" } else { "track" },
                    onclick: move |_| {
                        let command = view.write().select(row.index);
                        send_command(&bridge, Some(command));
                    },
                    if let Some(numeral) = row.numeral_url.clone() {
                        img { class: "track-numeral", src: "{numeral}", alt: "{row.number}" }
                    } else {
                        span { class: "track-numeral", "{row.number}" }
                    }
                    img {
                        class: "track-art",
                        src: "{row.artwork_url}",
                        alt: "{row.name}",
                    }
                    span { class: "track-name", "{row.name}" }
                    span { class: "track-duration", "{row.duration_text}" }
                }
            }
        }
    }
}
