use anyhow::{Context, anyhow, ensure};
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

/// Source that produced the reconciliation configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ReconcileConfigSource {
    #[default]
    Default,
    EnvPath(PathBuf),
    EnvInline,
    File(PathBuf),
}

/// Tuning for one reconciliation pass. Client selection happens at service
/// construction; these knobs only shape how much history a pass looks at.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ReconcileConfig {
    /// How many of the client's most recent task-history entries one pass
    /// inspects. Clients report newest-first, so this bounds how far back a
    /// failure can be detected in a single pass; the next pass picks up
    /// anything newer.
    pub history_page_size: u32,
    /// Look-back window (hours) for Grabbed ledger records. Must cover any
    /// download's realistic time-in-flight, otherwise a slow download that
    /// fails late falls outside the window and is never correlated.
    pub grab_window_hours: i64,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            history_page_size: 20,
            grab_window_hours: 72,
        }
    }
}

impl ReconcileConfig {
    pub fn grab_window(&self) -> Duration {
        Duration::hours(self.grab_window_hours)
    }

    /// Load reconciliation configuration overrides using environment
    /// variables. Evaluation order:
    /// 1) `$DOWNWATCH_CONFIG_PATH` (TOML or JSON file),
    /// 2) `$DOWNWATCH_CONFIG_JSON` (inline JSON),
    /// 3) defaults if neither is set.
    pub fn load_from_env() -> anyhow::Result<(Self, ReconcileConfigSource)> {
        if let Ok(path_str) = env::var("DOWNWATCH_CONFIG_PATH")
            && !path_str.trim().is_empty()
        {
            let path = PathBuf::from(path_str);
            let config = Self::load_from_file(&path)?;
            return Ok((config, ReconcileConfigSource::EnvPath(path)));
        }

        if let Ok(raw) = env::var("DOWNWATCH_CONFIG_JSON")
            && !raw.trim().is_empty()
        {
            let parsed = Self::parse_json(&raw)
                .context("failed to parse DOWNWATCH_CONFIG_JSON")?;
            return Ok((parsed, ReconcileConfigSource::EnvInline));
        }

        if let Some(path) = Self::find_default_file() {
            let config = Self::load_from_file(&path)?;
            return Ok((config, ReconcileConfigSource::File(path)));
        }

        Ok((Self::default(), ReconcileConfigSource::Default))
    }

    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path).with_context(|| {
            format!("failed to read downwatch config from {}", path.display())
        })?;

        let config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::parse_json(&contents).with_context(|| {
                format!("invalid downwatch config {}", path.display())
            })?,
            Some("toml") | Some("tml") => {
                toml::from_str(&contents).map_err(|err| {
                    anyhow!(
                        "invalid downwatch config {}: {}",
                        path.display(),
                        err
                    )
                })?
            }
            _ => Self::parse_from_str(&contents, &path.display().to_string())?,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn parse_from_str(
        contents: &str,
        origin: &str,
    ) -> anyhow::Result<Self> {
        // Try TOML first, then JSON for convenience.
        toml::from_str(contents).or_else(|toml_err| {
            serde_json::from_str(contents).map_err(|json_err| {
                anyhow!(
                    "failed to parse downwatch config {}: toml error: {}; json error: {}",
                    origin,
                    toml_err,
                    json_err
                )
            })
        })
    }

    pub fn parse_json(raw: &str) -> anyhow::Result<Self> {
        let config: Self = serde_json::from_str(raw)
            .map_err(|err| anyhow!("invalid downwatch config json: {err}"))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.history_page_size > 0,
            "history_page_size must be at least 1"
        );
        ensure!(
            self.grab_window_hours > 0,
            "grab_window_hours must be at least 1"
        );
        Ok(())
    }

    fn find_default_file() -> Option<PathBuf> {
        const CANDIDATES: &[&str] = &[
            "downwatch.toml",
            "downwatch.json",
            "config/downwatch.toml",
            "config/downwatch.json",
        ];

        CANDIDATES
            .iter()
            .map(Path::new)
            .find(|path| path.exists())
            .map(|path| path.to_path_buf())
    }
}
