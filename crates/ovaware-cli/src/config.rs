use std::path::{Path, PathBuf};

use ovaware_assessment::ValidationScope;
use ovaware_scoring::{PayloadFormat, ScorerConfig};
use serde::{Deserialize, Serialize};

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OvawareConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    #[serde(default)]
    pub scorer: ScorerConfig,
    #[serde(default)]
    pub validation_scope: ValidationScope,
    /// Where the history file lives. Defaults to the platform data dir.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history_dir: Option<PathBuf>,
}

impl Default for OvawareConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            scorer: ScorerConfig::default(),
            validation_scope: ValidationScope::default(),
            history_dir: None,
        }
    }
}

fn config_dir() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("ovaware"))
}

/// `<config dir>/ovaware/config.json`.
pub fn default_config_path() -> eyre::Result<PathBuf> {
    Ok(config_dir()?.join("config.json"))
}

/// Resolve an explicit `--config` path or fall back to the default location.
pub fn resolve_path(explicit: Option<&Path>) -> eyre::Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => default_config_path(),
    }
}

/// Load the config at `path`. A missing file yields the defaults.
pub fn load_config(path: &Path) -> eyre::Result<OvawareConfig> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(OvawareConfig::default());
    }

    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0) as u32;

    let migrated = migrate(json, on_disk_version)?;
    let config: OvawareConfig = serde_json::from_value(migrated)?;
    Ok(config)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update OvaAware."
        ));
    }

    // v0 → v1: a bare `api_url` pointed at the multiplier service; turn it
    // into an http scorer section.
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;
        if let Some(url) = obj.remove("api_url") {
            let url = url
                .as_str()
                .ok_or_else(|| eyre::eyre!("api_url is not a string"))?
                .to_string();
            let scorer = ScorerConfig::Http {
                url,
                payload: PayloadFormat::FlatYesNo,
                legacy_multiplier: true,
                timeout_secs: 30,
            };
            obj.insert("scorer".to_string(), serde_json::to_value(scorer)?);
        }
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1 (api_url → scorer)");
    }

    // Future migrations go here:
    // if from_version < 2 { ... }

    Ok(json)
}

pub fn save_config(path: &Path, config: &OvawareConfig) -> eyre::Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;

    let json = serde_json::to_string_pretty(&stamped)?;

    // Write to a temp file then rename for atomicity
    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
    }

    std::fs::rename(&tmp_path, path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}

/// Short human description of the configured scorer.
pub fn describe_scorer(scorer: &ScorerConfig) -> String {
    match scorer {
        ScorerConfig::Mock => "mock (canned result)".to_string(),
        ScorerConfig::Subprocess {
            program,
            args,
            legacy_multiplier,
            ..
        } => {
            let suffix = if *legacy_multiplier { ", multiplier" } else { "" };
            format!("subprocess: {program} {}{suffix}", args.join(" "))
        }
        ScorerConfig::Http {
            url,
            legacy_multiplier,
            ..
        } => {
            let suffix = if *legacy_multiplier { ", multiplier" } else { "" };
            format!("http: {url}{suffix}")
        }
    }
}
