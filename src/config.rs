//! Build-time site configuration.
//!
//! The wasm runtime has no process environment, so every knob here is baked in
//! when the bundle is compiled.

use serde::{Deserialize, Serialize};

pub const ARTIST: &str = "Sam Reider & The Human Hands";
pub const ALBUM: &str = "The Golem and Other Tales";

/// Base URL for hosted tracks that have no uploaded asset URL of their own.
pub const DEFAULT_HOSTED_BASE: &str =
    "https://static1.squarespace.com/static/5457d939e4b0d5b75c105e2f";

const ARTWORK_SIZE: &str = "878x878";
const ARTWORK_MIME: &str = "image/jpeg";

/// Where the album's audio and artwork are served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HostingTarget {
    /// Content-platform hosting, absolute URLs under a base.
    #[serde(alias = "squarespace")]
    Hosted,
    /// Assets served next to the page.
    #[default]
    Static,
}

impl HostingTarget {
    /// Interpret the raw `ASSET_TARGET` flag. Unknown values fall back to static.
    pub fn from_flag(flag: Option<&str>) -> Self {
        match flag.map(|raw| raw.trim().to_ascii_lowercase()) {
            Some(value) if value == "hosted" || value == "squarespace" => HostingTarget::Hosted,
            _ => HostingTarget::Static,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HostingTarget::Hosted => "hosted",
            HostingTarget::Static => "static",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    pub hosting_target: HostingTarget,
    pub hosted_base: String,
    pub artist: String,
    pub album: String,
    pub artwork_size: String,
    pub artwork_mime: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            hosting_target: HostingTarget::default(),
            hosted_base: DEFAULT_HOSTED_BASE.to_string(),
            artist: ARTIST.to_string(),
            album: ALBUM.to_string(),
            artwork_size: ARTWORK_SIZE.to_string(),
            artwork_mime: ARTWORK_MIME.to_string(),
        }
    }
}

impl SiteConfig {
    /// Resolve configuration from a key lookup. Blank values count as unset.
    pub fn from_lookup<'a, F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<&'a str>,
    {
        let defaults = Self::default();
        let hosted_base = lookup("ASSET_HOST_BASE")
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(|value| value.trim_end_matches('/').to_string())
            .unwrap_or(defaults.hosted_base);

        Self {
            hosting_target: HostingTarget::from_flag(lookup("ASSET_TARGET")),
            hosted_base,
            ..defaults
        }
    }

    pub fn from_build_env() -> Self {
        Self::from_lookup(build_env)
    }
}

fn build_env(key: &str) -> Option<&'static str> {
    match key {
        "ASSET_TARGET" => option_env!("ASSET_TARGET"),
        "ASSET_HOST_BASE" => option_env!("ASSET_HOST_BASE"),
        _ => None,
    }
}
