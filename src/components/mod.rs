//! The components module contains the album page and its playback wiring.

mod app;
mod playback_controller;
mod player;
mod player_view;
mod track_list;

pub use app::*;
pub use playback_controller::*;
pub use player::*;
pub use player_view::*;
pub use track_list::*;
