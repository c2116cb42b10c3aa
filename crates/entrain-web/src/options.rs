#![forbid(unsafe_code)]

//! JSON options schema for the JS host.
//!
//! The page hands over configuration as a JSON string (usually inlined by the
//! site template). Everything has a default, so `new SiteDecor()` with no
//! argument mounts all three effects against the stock markup.
//!
//! This module is platform-agnostic on purpose: the schema and its validation
//! are unit-tested natively, the wasm shell only consumes the result.

use core::fmt;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Which page effects to mount.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct EffectSet: u8 {
        /// Navigation scroll shadow.
        const NAV_SHADOW = 0b001;
        /// Reveal-on-scroll.
        const REVEAL     = 0b010;
        /// Hero oscillator animation.
        const HERO       = 0b100;
    }
}

impl Default for EffectSet {
    fn default() -> Self {
        Self::all()
    }
}

/// Errors surfaced to the JS host at construction time.
///
/// A missing canvas or nav element is deliberately *not* an error — the page
/// simply doesn't get that effect. Malformed configuration is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecorError {
    /// The options string was not valid JSON for the schema.
    InvalidOptions(String),
    /// `effects` named something this engine doesn't provide.
    UnknownEffect(String),
}

impl fmt::Display for DecorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidOptions(msg) => write!(f, "invalid options: {msg}"),
            Self::UnknownEffect(name) => write!(f, "unknown effect: {name}"),
        }
    }
}

impl std::error::Error for DecorError {}

/// Host-supplied configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct DecorOptions {
    /// Selector for the navigation element carrying the scroll shadow.
    pub nav_selector: String,
    /// Selector for the elements revealed on first viewport entry.
    pub reveal_selector: String,
    /// Element id of the hero canvas.
    pub canvas_id: String,
    /// Effects to mount, by name. `None` mounts everything.
    pub effects: Option<Vec<String>>,
    /// Force the motion preference instead of querying the platform.
    pub reduce_motion: Option<bool>,
    /// Collect per-frame diagnostics, exported via `frameReport()`.
    pub record_frames: bool,
}

impl Default for DecorOptions {
    fn default() -> Self {
        Self {
            nav_selector: "nav".to_owned(),
            reveal_selector: ".reveal".to_owned(),
            canvas_id: "hero-canvas".to_owned(),
            effects: None,
            reduce_motion: None,
            record_frames: false,
        }
    }
}

impl DecorOptions {
    /// Parse an options JSON string; `None` or empty means all defaults.
    pub fn parse(json: Option<&str>) -> Result<Self, DecorError> {
        let options = match json {
            None => Self::default(),
            Some(s) if s.trim().is_empty() => Self::default(),
            Some(s) => {
                serde_json::from_str(s).map_err(|e| DecorError::InvalidOptions(e.to_string()))?
            }
        };
        // Validate effect names eagerly so the host hears about typos at
        // construction, not as silently missing effects.
        options.effect_set()?;
        Ok(options)
    }

    /// Resolve the `effects` list into a bit set.
    pub fn effect_set(&self) -> Result<EffectSet, DecorError> {
        let Some(names) = &self.effects else {
            return Ok(EffectSet::all());
        };
        let mut set = EffectSet::empty();
        for name in names {
            set |= match name.as_str() {
                "nav-shadow" => EffectSet::NAV_SHADOW,
                "reveal" => EffectSet::REVEAL,
                "hero" => EffectSet::HERO,
                other => return Err(DecorError::UnknownEffect(other.to_owned())),
            };
        }
        Ok(set)
    }
}
