use crate::catalog::get_assets;
use crate::components::{send_command, BridgeMessage, PlayerView};
use crate::config::SiteConfig;
use dioxus::prelude::*;

/// Play/pause toggle - resumes the current track rather than restarting it
#[component]
pub(super) fn PlayPauseButton() -> Element {
    let config = use_context::<SiteConfig>();
    let chrome = &get_assets(config.hosting_target).chrome;
    let mut view = use_context::<Signal<PlayerView>>();
    let bridge = use_coroutine_handle::<BridgeMessage>();
    let playing = view().playing;

    rsx! {
        button {
            id: "play-pause-btn",
            r#type: "button",
            class: "transport-button transport-main",
            aria_label: if playing { "Pause" } else { "Play" },
            onclick: move |_| {
                let command = view.write().toggle();
                send_command(&bridge, Some(command));
            },
            if playing {
                img { src: "{chrome.pause}", alt: "Pause" }
            } else {
                img { src: "{chrome.play}", alt: "Play" }
            }
        }
    }
}

/// Previous button - on the first track this replays it from the top
#[component]
pub(super) fn PrevButton() -> Element {
    let config = use_context::<SiteConfig>();
    let chrome = &get_assets(config.hosting_target).chrome;
    let mut view = use_context::<Signal<PlayerView>>();
    let bridge = use_coroutine_handle::<BridgeMessage>();

    rsx! {
        button {
            id: "prev-btn",
            r#type: "button",
            class: "transport-button",
            aria_label: "Previous track",
            onclick: move |_| {
                let command = view.write().previous();
                send_command(&bridge, Some(command));
            },
            img { src: "{chrome.prev}", alt: "Previous" }
        }
    }
}

/// Next button - disabled on the last track
#[component]
pub(super) fn NextButton() -> Element {
    let config = use_context::<SiteConfig>();
    let chrome = &get_assets(config.hosting_target).chrome;
    let mut view = use_context::<Signal<PlayerView>>();
    let bridge = use_coroutine_handle::<BridgeMessage>();
    let snapshot = view();
    let at_end = snapshot
        .current
        .map(|idx| idx + 1 >= snapshot.track_count())
        .unwrap_or(false);

    rsx! {
        button {
            id: "next-btn",
            r#type: "button",
            class: "transport-button",
            aria_label: "Next track",
            disabled: at_end,
            onclick: move |_| {
                let command = view.write().next();
                send_command(&bridge, command);
            },
            img { src: "{chrome.next}", alt: "Next" }
        }
    }
}
