//! Playback controller - owns the bridge and its session inside one coroutine so
//! every command and host event is handled in arrival order.

use crate::catalog::{get_assets, Assets};
use crate::components::PlayerView;
use crate::config::SiteConfig;
use crate::playback::{
    handle_id, BridgeError, HostMediaEvent, MediaHost, PlaybackBridge, PlaybackCommand,
    PlaybackSession, RemoteAction,
};
use dioxus::prelude::*;
#[cfg(not(target_arch = "wasm32"))]
use dioxus::logger::tracing::debug;
#[cfg(target_arch = "wasm32")]
use dioxus::logger::tracing::{error, info, warn};
use futures_util::StreamExt;

#[cfg(target_arch = "wasm32")]
use crate::playback::web::{self, AnimationFrameScheduler, DomMediaHost};
#[cfg(target_arch = "wasm32")]
use dioxus::core::{Runtime, RuntimeGuard};
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;

/// Everything the controller coroutine reacts to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BridgeMessage {
    Command(PlaybackCommand),
    Host { track: usize, event: HostMediaEvent },
    Remote(RemoteAction),
}

/// Send a UI intent to the controller.
pub fn send_command(bridge: &Coroutine<BridgeMessage>, command: Option<PlaybackCommand>) {
    if let Some(command) = command {
        bridge.send(BridgeMessage::Command(command));
    }
}

/// Run one message through the view and the bridge. Host events and remote
/// actions go through the view's transport policy first; whatever command
/// comes out is dispatched. A failed dispatch leaves the view paused.
pub fn handle_message<M: MediaHost>(
    bridge: &PlaybackBridge<M>,
    session: &mut PlaybackSession<M::Handle>,
    view: &mut PlayerView,
    message: BridgeMessage,
) -> Result<(), BridgeError> {
    let command = match message {
        BridgeMessage::Command(command) => Some(command),
        BridgeMessage::Host { track, event } => bridge
            .relay(session, track, event)
            .and_then(|notification| view.apply(&notification)),
        BridgeMessage::Remote(action) => view.handle_remote(action),
    };
    let Some(command) = command else {
        return Ok(());
    };
    bridge.dispatch(session, command).inspect_err(|_| {
        if !matches!(command, PlaybackCommand::Announce(_)) {
            view.playing = false;
        }
    })
}

#[cfg(target_arch = "wasm32")]
#[component]
pub fn PlaybackController(children: Element) -> Element {
    let config = use_context::<SiteConfig>();
    let assets: &'static Assets = get_assets(config.hosting_target);
    let view = use_context::<Signal<PlayerView>>();

    let bridge_tx = use_coroutine(move |mut rx: UnboundedReceiver<BridgeMessage>| {
        let config = config.clone();
        let mut view = view;
        async move {
            let bridge = PlaybackBridge::new(
                DomMediaHost,
                web::now_playing_surface(),
                Rc::new(AnimationFrameScheduler),
                assets,
                config,
            );
            let mut session = PlaybackSession::new();
            info!(
                hosting = assets.target.as_str(),
                tracks = bridge.assets().len(),
                "playback bridge ready"
            );

            while let Some(message) = rx.next().await {
                let result = handle_message(&bridge, &mut session, &mut view.write(), message);
                if let Err(err) = result {
                    error!(?message, "playback command failed: {err}");
                }
            }
        }
    });

    // Listeners go on after the audio elements below are mounted.
    use_effect(move || {
        let runtime = Runtime::current();

        let events_runtime = runtime.clone();
        let events_tx = bridge_tx.clone();
        let wired = web::wire_media_events(assets.len(), move |track, event| {
            let _guard = RuntimeGuard::new(events_runtime.clone());
            events_tx.send(BridgeMessage::Host { track, event });
        });
        if let Err(err) = wired {
            warn!("media events not wired: {err}");
        }

        let remote_runtime = runtime.clone();
        let remote_tx = bridge_tx.clone();
        web::install_remote_controls(move |action| {
            let _guard = RuntimeGuard::new(remote_runtime.clone());
            remote_tx.send(BridgeMessage::Remote(action));
        });

        bridge_tx.send(BridgeMessage::Command(PlaybackCommand::Announce(0)));
    });

    rsx! {
        for (idx, track) in assets.tracks.iter().enumerate() {
            audio {
                key: "{idx}",
                id: handle_id(idx),
                src: "{track.audio_url}",
                preload: "metadata",
            }
        }
        {children}
    }
}

/// Without a browser there is no media host; commands are only logged.
#[cfg(not(target_arch = "wasm32"))]
#[component]
pub fn PlaybackController(children: Element) -> Element {
    let config = use_context::<SiteConfig>();
    let assets: &'static Assets = get_assets(config.hosting_target);

    use_coroutine(move |mut rx: UnboundedReceiver<BridgeMessage>| async move {
        while let Some(message) = rx.next().await {
            debug!(?message, "no media host on this platform");
        }
    });

    rsx! {
        for (idx, track) in assets.tracks.iter().enumerate() {
            audio {
                key: "{idx}",
                id: handle_id(idx),
                src: "{track.audio_url}",
                preload: "metadata",
            }
        }
        {children}
    }
}
