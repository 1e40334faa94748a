// Environment driven settings for the binary.
//
// Variables
// - EARNINGS_TRACKER_ADDR: listen address, default 0.0.0.0:8080.
// - EARNINGS_TRACKER_STORE: path of the JSON store file, default earnings_tracker_store.json.
// - EARNINGS_TRACKER_THEME: `dark` or `light`, default light.

use anyhow::{Context, bail};
use std::net::SocketAddr;
use std::path::PathBuf;

pub const ADDR_VAR: &str = "EARNINGS_TRACKER_ADDR";
pub const STORE_VAR: &str = "EARNINGS_TRACKER_STORE";
pub const THEME_VAR: &str = "EARNINGS_TRACKER_THEME";

const DEFAULT_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_STORE: &str = "earnings_tracker_store.json";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub addr: SocketAddr,
    pub store_path: PathBuf,
    pub is_dark: bool,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let addr = lookup(ADDR_VAR).unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = addr
            .parse::<SocketAddr>()
            .with_context(|| format!("{ADDR_VAR} is not a socket address: {addr}"))?;

        let store_path = lookup(STORE_VAR)
            .filter(|path| !path.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_STORE.to_string())
            .into();

        let is_dark = match lookup(THEME_VAR).as_deref().map(str::trim) {
            None | Some("") => false,
            Some(theme) if theme.eq_ignore_ascii_case("light") => false,
            Some(theme) if theme.eq_ignore_ascii_case("dark") => true,
            Some(other) => bail!("{THEME_VAR} must be `dark` or `light`, got `{other}`"),
        };

        Ok(Self {
            addr,
            store_path,
            is_dark,
        })
    }
}
