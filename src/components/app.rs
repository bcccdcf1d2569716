use crate::catalog::get_assets;
use crate::components::{PlaybackController, PlayerView, TrackList, TransportBar};
use crate::config::SiteConfig;
use dioxus::logger::tracing::info;
use dioxus::prelude::*;

const SITE_CSS: &str = r#"
body { margin: 0; background: #0d0b09; color: #efe6d6; font-family: Georgia, serif; }
.album { max-width: 880px; margin: 0 auto; padding: 2rem 1rem 8rem; }
.album-header { text-align: center; }
.album-cover { width: 100%; max-width: 480px; border-radius: 4px; }
.album-artist { color: #a38449; font-weight: normal; }
.track-list { list-style: none; padding: 0; }
.track { display: flex; align-items: center; gap: 1rem; padding: 0.5rem; cursor: pointer; }
.track.active, .track:hover { background: #1d1812; }
.track-numeral { width: 2.5rem; text-align: center; }
.track-art { width: 3rem; height: 3rem; object-fit: cover; }
.track-name { flex: 1; }
.track-duration, .clock { font-variant-numeric: tabular-nums; color: #a38449; }
.transport { position: fixed; left: 0; right: 0; bottom: 0; padding: 0.75rem 1rem; background: #15110c; }
.transport-buttons { display: flex; justify-content: center; gap: 1rem; }
.transport-button { background: none; border: none; cursor: pointer; }
.transport-button img { width: 2rem; height: 2rem; }
.transport-main img { width: 2.75rem; height: 2.75rem; }
.transport-button:disabled { opacity: 0.35; cursor: default; }
.transport-title { text-align: center; min-height: 1.25rem; }
.transport-seek, .transport-album { display: flex; align-items: center; gap: 0.75rem; }
.transport-seek input, .transport-album input { flex: 1; }
.transport-album { opacity: 0.6; font-size: 0.85rem; }
"#;

#[component]
pub fn AlbumShell() -> Element {
    let config = use_context_provider(SiteConfig::from_build_env);
    let assets = get_assets(config.hosting_target);
    let view = use_signal(|| PlayerView::new(assets));

    use_context_provider(|| view);

    use_hook(|| {
        info!(
            hosting = config.hosting_target.as_str(),
            tracks = assets.len(),
            "album page mounted"
        );
    });

    rsx! {
        document::Title { "{config.album}" }
        style { {SITE_CSS} }
        main { class: "album",
            header { class: "album-header",
                img {
                    class: "album-cover",
                    src: "{assets.chrome.cover}",
                    alt: "{config.album}",
                }
                h1 { class: "album-title", "{config.album}" }
                h2 { class: "album-artist", "{config.artist}" }
            }
            PlaybackController {
                TrackList {}
                TransportBar {}
            }
        }
    }
}
