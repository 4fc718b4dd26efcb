//! Loading assessment configuration (question catalog + submission sink) from TOML.
//!
//! See `AppConfig` for the expected schema.

use std::path::PathBuf;

use serde::Deserialize;
use tracing::{info, error};

use crate::domain::Question;

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
  #[serde(default)]
  pub submission: SubmissionCfg,
  #[serde(default)]
  pub questions: Vec<Question>,
}

#[derive(Clone, Copy, Debug, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SinkKind {
  #[default]
  Log,
  JsonLines,
}

/// Where finished attempts go.
#[derive(Clone, Debug, Deserialize, Default)]
pub struct SubmissionCfg {
  #[serde(default)] pub sink: SinkKind,
  #[serde(default)] pub path: Option<PathBuf>,
}

/// Parse a TOML document into `AppConfig`.
pub fn parse_app_config(s: &str) -> Result<AppConfig, toml::de::Error> {
  toml::from_str::<AppConfig>(s)
}

/// Attempt to load `AppConfig` from ASSESSMENT_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_app_config_from_env() -> Option<AppConfig> {
  let path = std::env::var("ASSESSMENT_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match parse_app_config(&s) {
      Ok(cfg) => {
        info!(target: "shade_assessment", %path, questions = cfg.questions.len(), "Loaded assessment config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "shade_assessment", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "shade_assessment", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}
