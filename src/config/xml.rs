//! XML configuration support.
//! - Loads settings from config.xml (quick_xml + serde).
//! - Writes a secure template on request.
//!
//! Notes:
//! - This module only reads/writes the config file; directory validation happens elsewhere.
//! - Unknown XML fields are rejected so misconfigurations surface early.

use anyhow::{bail, Context, Result};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::paths::{default_config_path, path_has_symlink_ancestor};
use super::CONFIG_ENV;

use crate::config::types::{Config, LogLevel};
use crate::platform::{set_dir_mode_0700, set_file_mode_0600, write_config_secure_new_0600};

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    documents_dir: Option<String>,
    cache_dir: Option<String>,
    resources_dir: Option<String>,
    app_name: Option<String>,
    log_level: Option<String>,
    log_file: Option<String>,
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|t| !t.is_empty())
}

// Map XmlConfig -> Config; blank values count as unset.
fn xml_to_config(parsed: XmlConfig) -> Config {
    let mut cfg = Config::default();

    cfg.documents_dir = non_blank(parsed.documents_dir.as_deref()).map(PathBuf::from);
    cfg.cache_dir = non_blank(parsed.cache_dir.as_deref()).map(PathBuf::from);
    cfg.resources_dir = non_blank(parsed.resources_dir.as_deref()).map(PathBuf::from);
    cfg.app_name = non_blank(parsed.app_name.as_deref()).map(str::to_string);
    cfg.log_file = non_blank(parsed.log_file.as_deref()).map(PathBuf::from);

    if let Some(s) = non_blank(parsed.log_level.as_deref()) {
        match s.parse::<LogLevel>() {
            Ok(level) => cfg.log_level = level,
            Err(e) => warn!("{e}; keeping log level '{}'", cfg.log_level),
        }
    }

    cfg
}

/// Load a Config from a specific XML file path.
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig = from_xml_str(&contents)
        .with_context(|| format!("parse config xml '{}'", path.display()))?;
    Ok(xml_to_config(parsed))
}

/// Load the active config.
///
/// `$COREOS_FILES_CONFIG` must name an existing file. Without it, a missing
/// default file simply yields defaults.
pub fn load_config() -> Result<Config> {
    let env_set = env::var_os(CONFIG_ENV).is_some();
    let Some(path) = default_config_path() else {
        debug!("No config location available; using defaults");
        return Ok(Config::default());
    };

    if !path.exists() {
        if env_set {
            bail!("{CONFIG_ENV} points to a missing file: {}", path.display());
        }
        debug!("No config at {}; using defaults", path.display());
        return Ok(Config::default());
    }

    debug!("Loading config from {}", path.display());
    load_config_from_xml_path(&path)
}

impl Config {
    /// See [`load_config`].
    pub fn load() -> Result<Self> {
        load_config()
    }
}

/// Create a template config file and parent directory (best-effort permissions).
/// Refuses to write through a symlinked ancestor.
pub fn create_template_config(path: &Path) -> Result<()> {
    if path_has_symlink_ancestor(path)? {
        bail!(
            "Refusing to create config: ancestor of {} is a symlink",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create config directory '{}'", parent.display()))?;
        let _ = set_dir_mode_0700(parent);
    }

    let content = "<!--\n  coreos_files configuration (XML)\n\n  All fields are optional; leave a field empty to use the host default.\n    documents_dir  -> documents directory override\n    cache_dir      -> cache directory override\n    resources_dir  -> resource root of the main bundle\n    app_name       -> subdirectory appended to host documents/cache directories\n    log_level      -> quiet | normal | info | debug\n    log_file       -> path to log file (stdout is still used)\n-->\n<config>\n  <documents_dir></documents_dir>\n  <cache_dir></cache_dir>\n  <resources_dir></resources_dir>\n  <app_name></app_name>\n  <log_level>normal</log_level>\n  <log_file></log_file>\n</config>\n";

    write_config_secure_new_0600(path, content.as_bytes())?;
    let _ = set_file_mode_0600(path);

    info!("Created template config at {}", path.display());
    Ok(())
}
