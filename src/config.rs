//! Loading quiz configuration (extra verbs + session tuning) from TOML.
//!
//! Example:
//! ```toml
//! [session]
//! length = 20
//! summary_delay_ms = 1500
//!
//! [[verbs]]
//! infinitive = "tocar"
//! english = "to touch, to play"
//!
//! [[verbs]]
//! infinitive = "oír"
//! english = "to hear"
//! kind = "irregular"
//! participle = "oído"
//! [verbs.forms]
//! presente = ["oigo", "oyes", "oye", "oímos", "oís", "oyen"]
//! ```

use std::time::Duration;

use serde::Deserialize;
use tracing::{error, info};

use crate::domain::VerbEntry;

pub const DEFAULT_SESSION_LENGTH: u32 = 20;
pub const DEFAULT_SUMMARY_DELAY_MS: u64 = 1500;

#[derive(Clone, Debug, Deserialize, Default)]
pub struct QuizConfig {
  #[serde(default)]
  pub session: SessionSettings,
  /// Added to the built-in bank; an entry with an existing infinitive replaces it.
  #[serde(default)]
  pub verbs: Vec<VerbEntry>,
}

/// Client-side session tuning.
#[derive(Clone, Debug, Deserialize)]
pub struct SessionSettings {
  #[serde(default = "default_length")]
  pub length: u32,
  #[serde(default = "default_delay")]
  pub summary_delay_ms: u64,
}

fn default_length() -> u32 { DEFAULT_SESSION_LENGTH }
fn default_delay() -> u64 { DEFAULT_SUMMARY_DELAY_MS }

impl Default for SessionSettings {
  fn default() -> Self {
    Self { length: DEFAULT_SESSION_LENGTH, summary_delay_ms: DEFAULT_SUMMARY_DELAY_MS }
  }
}

impl SessionSettings {
  pub fn summary_delay(&self) -> Duration {
    Duration::from_millis(self.summary_delay_ms)
  }
}

pub fn parse_quiz_config(s: &str) -> Result<QuizConfig, toml::de::Error> {
  let mut cfg = toml::from_str::<QuizConfig>(s)?;
  if cfg.session.length == 0 {
    cfg.session.length = DEFAULT_SESSION_LENGTH;
  }
  Ok(cfg)
}

/// Attempt to load `QuizConfig` from QUIZ_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_quiz_config_from_env() -> Option<QuizConfig> {
  let path = std::env::var("QUIZ_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match parse_quiz_config(&s) {
      Ok(cfg) => {
        info!(target: "verbos_backend", %path, verbs = cfg.verbs.len(), "Loaded quiz config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "verbos_backend", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "verbos_backend", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}
