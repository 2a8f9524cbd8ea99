//! Compositor configuration, loaded once at startup and passed by value.

use std::fs;
use std::path::Path;

use serde::Deserialize;

const DEFAULT_CONFIG_FILE: &str = "compositor.config.json";

/// Read-only settings governing one aggregation run.
///
/// There is no process-wide singleton: callers load a `CompositorConfig`
/// once (or build it in code) and hand a reference to every aggregation
/// call, so concurrent requests share it without locking.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompositorConfig {
    /// When `true`, disable composite batching and emit individually
    /// cache-busted URLs so every file arrives unmodified in the browser.
    pub is_debug_mode: bool,
    /// Cache-busting version appended as `cdv=<version>`; `0` disables the
    /// suffix entirely.
    pub version: u32,
    /// Base path of the HTTP handler that serves combined resources.
    pub composite_handler_path: String,
    /// Whether the composite handler minifies CSS content.
    pub enable_css_minify: bool,
    /// Whether the composite handler minifies JavaScript content.
    pub enable_js_minify: bool,
}

impl Default for CompositorConfig {
    fn default() -> Self {
        Self {
            is_debug_mode: false,
            version: 0,
            composite_handler_path: "/combine.axd".into(),
            enable_css_minify: true,
            enable_js_minify: true,
        }
    }
}

impl CompositorConfig {
    /// Attempt to load configuration from the provided directory.
    ///
    /// When the configuration file does not exist or fails to parse we fall
    /// back to default values so downstream callers can continue operating
    /// with sensible assumptions.
    pub fn discover(config_dir: &Path) -> Self {
        let candidate = config_dir.join(DEFAULT_CONFIG_FILE);
        Self::from_path(&candidate).unwrap_or_default()
    }

    /// Read configuration from a specific JSON file.
    pub fn from_path(path: &Path) -> Option<Self> {
        let content = fs::read_to_string(path).ok()?;
        serde_json::from_str(&content).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn discover_falls_back_to_defaults_for_missing_file() {
        let dir = tempdir().unwrap();
        let config = CompositorConfig::discover(dir.path());

        assert!(!config.is_debug_mode);
        assert_eq!(config.version, 0);
        assert_eq!(config.composite_handler_path, "/combine.axd");
        assert!(config.enable_css_minify);
        assert!(config.enable_js_minify);
    }

    #[test]
    fn reads_partial_configuration_files() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        fs::write(
            &path,
            r#"{"isDebugMode": true, "version": 42, "enableJsMinify": false}"#,
        )
        .unwrap();

        let config = CompositorConfig::discover(dir.path());
        assert!(config.is_debug_mode);
        assert_eq!(config.version, 42);
        assert_eq!(config.composite_handler_path, "/combine.axd");
        assert!(!config.enable_js_minify);
    }

    #[test]
    fn malformed_configuration_files_fall_back_to_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&path, "not json").unwrap();

        let config = CompositorConfig::discover(dir.path());
        assert_eq!(config.version, 0);
    }
}
