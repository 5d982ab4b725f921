//! Machine-safe field name derivation.
//!
//! When an admin adds a field without typing an explicit name, the label is
//! turned into a column-style identifier (`"Priority Level!"` becomes
//! `"priority_level"`).

use std::sync::LazyLock;

use regex::Regex;

/// Maximum length of a derived field name, in characters.
pub const MAX_FIELD_NAME_LENGTH: usize = 30;

/// Characters that never survive derivation.
static DISALLOWED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9\s]").expect("valid regex"));

/// Runs of whitespace, collapsed to a single underscore.
static WHITESPACE_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Derive a machine-safe field name from a free-text label.
///
/// Lower-cases the label, drops everything outside `[a-z0-9\s]`, collapses
/// each whitespace run to `_` and truncates to [`MAX_FIELD_NAME_LENGTH`].
/// Uniqueness is not checked here; the caller owns collision handling.
///
/// # Examples
///
/// ```
/// use intake_core::field_name::derive_field_name;
///
/// assert_eq!(derive_field_name("Priority Level!"), "priority_level");
/// assert_eq!(derive_field_name(""), "");
/// ```
pub fn derive_field_name(label: &str) -> String {
    let lowered = label.to_lowercase();
    let stripped = DISALLOWED_RE.replace_all(&lowered, "");
    let joined = WHITESPACE_RUN_RE.replace_all(&stripped, "_");
    // Only ASCII remains at this point, so a char cut is a byte cut.
    joined.chars().take(MAX_FIELD_NAME_LENGTH).collect()
}
