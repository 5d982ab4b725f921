//! Option and sub-field resolution for domain-investment fields.
//!
//! A domain-investment field renders one row per business domain and one
//! numeric column per sub-field. Admins either take the standard domain and
//! column sets or type their own.

use serde::{Deserialize, Serialize};

use crate::form_config::{parse_options, FieldOption, SubField};

/// Business domains offered when no custom list is given.
pub const DEFAULT_DOMAINS: [(&str, &str); 8] = [
    ("CFP", "CFP"),
    ("CPNS", "CPNS"),
    ("GTI", "GTI"),
    ("GTO", "GTO"),
    ("Enterprise", "Enterprise"),
    ("Infrastructure", "Infrastructure"),
    ("Security", "Security"),
    ("Data & Analytics", "Data"),
];

/// Investment columns offered when no custom list is given, as `(name, label)`.
pub const DEFAULT_SUB_FIELDS: [(&str, &str); 4] = [
    ("existingHeads", "Existing Heads"),
    ("deferredIncremental", "Deferred Incremental"),
    ("newAsk", "New Ask"),
    ("nextPhaseAsk", "Next Phase Ask"),
];

/// How the admin asked for a domain-investment field to be configured.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum InvestmentSource {
    /// The standard domain list and column set.
    #[default]
    Default,
    /// Admin-typed domains (comma-separated) and/or columns.
    ///
    /// Either part left empty falls back to its default.
    Custom {
        #[serde(default)]
        domains: String,
        #[serde(default)]
        sub_fields: Vec<SubField>,
    },
}

/// Resolved options and sub-fields for a domain-investment field.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedInvestment {
    pub options: Vec<FieldOption>,
    pub sub_fields: Vec<SubField>,
}

pub fn default_domain_options() -> Vec<FieldOption> {
    DEFAULT_DOMAINS
        .iter()
        .map(|(label, value)| FieldOption::new(*label, *value))
        .collect()
}

pub fn default_sub_fields() -> Vec<SubField> {
    DEFAULT_SUB_FIELDS
        .iter()
        .map(|(name, label)| SubField::number(name, label))
        .collect()
}

/// Resolve the options and sub-fields for a domain-investment field.
///
/// Pure and total: an empty custom domain list or column list silently
/// falls back to the corresponding default set.
pub fn resolve(source: &InvestmentSource) -> ResolvedInvestment {
    match source {
        InvestmentSource::Default => ResolvedInvestment {
            options: default_domain_options(),
            sub_fields: default_sub_fields(),
        },
        InvestmentSource::Custom {
            domains,
            sub_fields,
        } => {
            let options = parse_options(domains);
            ResolvedInvestment {
                options: if options.is_empty() {
                    default_domain_options()
                } else {
                    options
                },
                sub_fields: if sub_fields.is_empty() {
                    default_sub_fields()
                } else {
                    sub_fields.clone()
                },
            }
        }
    }
}
