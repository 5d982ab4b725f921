use intake_core::store::MAX_UNDO_DEPTH;

/// Default actor stamped into `updatedBy`.
pub const DEFAULT_EDITOR: &str = "Admin User";

/// Default name for a config started from scratch.
pub const DEFAULT_FORM_NAME: &str = "Initiative Intake Form";

/// Admin tool configuration loaded from environment variables.
///
/// All fields have defaults suitable for local use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminConfig {
    /// Actor recorded as `updatedBy` on every edit.
    pub editor: String,
    /// Number of past configurations kept for `undo`.
    pub undo_depth: usize,
    /// Emit logs as JSON lines instead of human-readable text.
    pub log_json: bool,
    /// Name given to a config started from scratch.
    pub form_name: String,
}

#[derive(Debug, thiserror::Error)]
#[error("{var} must be {expected}, got '{value}'")]
pub struct ConfigError {
    pub var: &'static str,
    pub expected: &'static str,
    pub value: String,
}

impl AdminConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var             | Default                  |
    /// |---------------------|--------------------------|
    /// | `INTAKE_EDITOR`     | `Admin User`             |
    /// | `INTAKE_UNDO_DEPTH` | `50`                     |
    /// | `INTAKE_LOG_JSON`   | `false`                  |
    /// | `INTAKE_FORM_NAME`  | `Initiative Intake Form` |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let text = |key: &str, default: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let undo_depth = match lookup("INTAKE_UNDO_DEPTH") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError {
                var: "INTAKE_UNDO_DEPTH",
                expected: "a non-negative integer",
                value: raw,
            })?,
            None => MAX_UNDO_DEPTH,
        };

        let log_json = match lookup("INTAKE_LOG_JSON") {
            Some(raw) => parse_flag(&raw).ok_or(ConfigError {
                var: "INTAKE_LOG_JSON",
                expected: "true or false",
                value: raw,
            })?,
            None => false,
        };

        Ok(Self {
            editor: text("INTAKE_EDITOR", DEFAULT_EDITOR),
            undo_depth,
            log_json,
            form_name: text("INTAKE_FORM_NAME", DEFAULT_FORM_NAME),
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
