//! Playback Bridge - keeps one audio handle current, forwards UI commands onto it,
//! and relays host media events back to the UI.

mod bridge;
mod error;
mod host;
mod session;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use bridge::*;
pub use error::BridgeError;
pub use host::*;
pub use session::*;
#[cfg(test)]
pub(crate) use host::testing;
