use dioxus::prelude::*;

mod catalog;
mod components;
mod config;
mod playback;

use components::AlbumShell;

fn main() {
    dioxus::logger::initialize_default();
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Meta { name: "theme-color", content: "#a38449" }
        document::Meta { name: "viewport", content: "width=device-width, initial-scale=1" }

        AlbumShell {}
    }
}
