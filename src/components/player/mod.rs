use crate::catalog::get_assets;
use crate::components::{format_clock, BridgeMessage, PlayerView};
use crate::config::SiteConfig;
use dioxus::prelude::*;

mod controls;

use controls::{NextButton, PlayPauseButton, PrevButton};

#[component]
pub fn TransportBar() -> Element {
    let config = use_context::<SiteConfig>();
    let assets = get_assets(config.hosting_target);
    let mut view = use_context::<Signal<PlayerView>>();
    let bridge = use_coroutine_handle::<BridgeMessage>();

    let snapshot = view();
    let has_track = snapshot.current.is_some();
    let duration = snapshot.current_duration().unwrap_or(0.0);
    let position = snapshot.position;
    let title = snapshot
        .current
        .and_then(|idx| assets.track(idx))
        .map(|track| track.name.clone())
        .unwrap_or_default();

    let album_total = assets.total_duration();
    let album_position = snapshot
        .current
        .and_then(|idx| assets.album_position(idx, snapshot.position))
        .unwrap_or(0.0);

    let position_text = format_clock(position);
    let duration_text = format_clock(duration);
    let album_position_text = format_clock(album_position);
    let album_total_text = format_clock(album_total);

    let on_seek_input = move |e: Event<FormData>| {
        if let Ok(seconds) = e.value().parse::<f64>() {
            if seconds.is_finite() {
                let command = view.write().seek(seconds);
                bridge.send(BridgeMessage::Command(command));
            }
        }
    };

    // Album-wide scrubbing lands on whichever track holds that moment.
    let on_album_seek = move |e: Event<FormData>| {
        let Ok(seconds) = e.value().parse::<f64>() else {
            return;
        };
        if let Some((track, offset)) = assets.track_at(seconds) {
            let commands = view.write().jump(track, offset);
            for command in commands {
                bridge.send(BridgeMessage::Command(command));
            }
        }
    };

    rsx! {
        section { class: "transport",
            div { class: "transport-title", "{title}" }
            div { class: "transport-buttons",
                PrevButton {}
                PlayPauseButton {}
                NextButton {}
            }
            div { class: "transport-seek",
                span { class: "clock", "{position_text}" }
                input {
                    r#type: "range",
                    min: "0",
                    max: "{duration}",
                    step: "0.1",
                    value: "{position}",
                    disabled: !has_track,
                    oninput: on_seek_input,
                }
                span { class: "clock", "{duration_text}" }
            }
            div { class: "transport-album",
                span { class: "clock", "{album_position_text}" }
                input {
                    r#type: "range",
                    min: "0",
                    max: "{album_total}",
                    step: "1",
                    value: "{album_position}",
                    onchange: on_album_seek,
                }
                span { class: "clock", "{album_total_text}" }
            }
        }
    }
}
