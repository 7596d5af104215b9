//! Logging configuration

use std::collections::BTreeMap;
use std::str::FromStr;

/// Module names accepted in `--log-component` overrides.
pub const COMPONENTS: &[&str] = &["check", "config", "dispatch", "report", "runner", "verdict"];

const LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Multi-line human-readable output
    #[default]
    Pretty,
    /// One JSON object per event, for cluster log collectors
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Invalid log format: {}", s)),
        }
    }
}

/// Process-level logging settings, assembled from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
    /// Per-module overrides keyed by module name, e.g. `dispatch => debug`
    pub component_levels: BTreeMap<String, String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            component_levels: BTreeMap::new(),
        }
    }
}

/// Parse one `module=level` override.
///
/// Both sides are lowercased; unknown modules and levels are rejected so a
/// typo cannot silently leave a module at the base level.
pub fn parse_component_level(s: &str) -> Result<(String, String), String> {
    let (component, level) = s
        .split_once('=')
        .ok_or_else(|| format!("expected module=level, got {:?}", s))?;
    let component = component.trim().to_lowercase();
    let level = level.trim().to_lowercase();

    if !COMPONENTS.contains(&component.as_str()) {
        return Err(format!(
            "unknown module {:?} (expected one of: {})",
            component,
            COMPONENTS.join(", ")
        ));
    }
    if !LEVELS.contains(&level.as_str()) {
        return Err(format!("unknown level {:?} for module {}", level, component));
    }

    Ok((component, level))
}
