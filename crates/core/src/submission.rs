//! Answer validation for the multi-step intake form.
//!
//! Answers arrive as a JSON object keyed by field `name`. Each step is
//! checked before the form advances, and the whole configuration is checked
//! once more on submit.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::form_config::{FieldType, FormConfig, FormField, FormStep, SubField, SubFieldType};

/// Submitted answers keyed by field name.
pub type Answers = serde_json::Map<String, Value>;

/// Format accepted for `date` answers.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub const RULE_REQUIRED: &str = "required";
pub const RULE_TYPE: &str = "type";
pub const RULE_MIN: &str = "min";
pub const RULE_MAX: &str = "max";
pub const RULE_OPTION: &str = "option";
pub const RULE_NEGATIVE: &str = "non_negative";
pub const RULE_UNKNOWN_DOMAIN: &str = "unknown_domain";
pub const RULE_UNKNOWN_FIELD: &str = "unknown_field";
pub const RULE_AMBIGUOUS_FIELD: &str = "ambiguous_field";

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Aggregated result of checking a set of answers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<FieldViolation>,
    pub warnings: Vec<FieldViolation>,
}

impl ValidationResult {
    fn from_parts(errors: Vec<FieldViolation>, warnings: Vec<FieldViolation>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    /// Message of the first blocking violation, if any.
    pub fn first_error(&self) -> Option<&str> {
        self.errors.first().map(|v| v.message.as_str())
    }
}

/// A single field-level rule violation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldViolation {
    /// Field name, or a path such as `domainInvestment.CFP.newAsk`.
    pub field: String,
    pub rule_type: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl FieldViolation {
    fn new(field: &str, rule_type: &str, message: String, value: Option<&Value>) -> Self {
        Self {
            field: field.to_string(),
            rule_type: rule_type.to_string(),
            message,
            value: value.cloned(),
        }
    }
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Check the answers belonging to one step.
///
/// Keys that belong to other steps are ignored.
pub fn validate_step_answers(step: &FormStep, answers: &Answers) -> ValidationResult {
    let mut errors = Vec::new();
    for field in step.fields_in_order() {
        check_field(field, answers.get(&field.name), &mut errors);
    }
    ValidationResult::from_parts(errors, Vec::new())
}

/// Check a full submission against every step of `config`.
///
/// Answers for names the configuration does not know are reported as
/// warnings. A name used in more than one step gets a single
/// `ambiguous_field` error instead of per-field checks, since one answer
/// cannot be matched to either field.
pub fn validate_submission(config: &FormConfig, answers: &Answers) -> ValidationResult {
    let shared = config.names_shared_across_steps();
    let mut errors: Vec<FieldViolation> = shared
        .iter()
        .map(|name| {
            FieldViolation::new(
                name,
                RULE_AMBIGUOUS_FIELD,
                format!("'{name}' is used by more than one step; rename one of the fields"),
                answers.get(*name),
            )
        })
        .collect();

    let fields = config.all_fields();
    for field in fields.iter().filter(|f| !shared.contains(&f.name.as_str())) {
        check_field(field, answers.get(&field.name), &mut errors);
    }

    let warnings = answers
        .iter()
        .filter(|(key, _)| !fields.iter().any(|f| &f.name == *key))
        .map(|(key, value)| {
            FieldViolation::new(
                key,
                RULE_UNKNOWN_FIELD,
                format!("'{key}' is not a field of this form"),
                Some(value),
            )
        })
        .collect();

    ValidationResult::from_parts(errors, warnings)
}

// ---------------------------------------------------------------------------
// Field checks
// ---------------------------------------------------------------------------

fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(Value::Array(a)) => a.is_empty(),
        Some(Value::Object(o)) => o.is_empty(),
        Some(Value::Bool(_)) | Some(Value::Number(_)) => false,
    }
}

fn check_field(field: &FormField, value: Option<&Value>, errors: &mut Vec<FieldViolation>) {
    let name = field.name.as_str();
    if is_blank(value) {
        if field.required {
            errors.push(FieldViolation::new(
                name,
                RULE_REQUIRED,
                format!("{} is required", field.label),
                None,
            ));
        }
        return;
    }
    let Some(value) = value else { return };

    match field.field_type {
        FieldType::Text | FieldType::Textarea => {
            if !value.is_string() {
                errors.push(type_error(name, &field.label, "text", value));
            }
        }
        FieldType::Number | FieldType::Currency => match value.as_f64() {
            Some(n) => check_bounds(field, n, value, errors),
            None => errors.push(type_error(name, &field.label, "a number", value)),
        },
        FieldType::Switch => {
            if !value.is_boolean() {
                errors.push(type_error(name, &field.label, "true or false", value));
            }
        }
        FieldType::Date => {
            let parsed = value
                .as_str()
                .and_then(|s| chrono::NaiveDate::parse_from_str(s, DATE_FORMAT).ok());
            if parsed.is_none() {
                errors.push(type_error(name, &field.label, "a YYYY-MM-DD date", value));
            }
        }
        FieldType::Select => match value.as_str() {
            Some(choice) if field.has_option_value(choice) => {}
            Some(choice) => errors.push(option_error(name, &field.label, choice, value)),
            None => errors.push(type_error(name, &field.label, "one option value", value)),
        },
        FieldType::Multiselect => match value.as_array() {
            Some(items) => {
                for item in items {
                    match item.as_str() {
                        Some(choice) if field.has_option_value(choice) => {}
                        Some(choice) => errors.push(option_error(name, &field.label, choice, item)),
                        None => errors.push(type_error(name, &field.label, "option values", item)),
                    }
                }
            }
            None => errors.push(type_error(name, &field.label, "a list of option values", value)),
        },
        FieldType::DomainInvestment => check_domain_investment(field, value, errors),
        FieldType::RepeatableGroup => check_repeatable_group(field, value, errors),
    }
}

fn check_bounds(field: &FormField, n: f64, value: &Value, errors: &mut Vec<FieldViolation>) {
    if let Some(min) = field.min {
        if n < min {
            errors.push(FieldViolation::new(
                &field.name,
                RULE_MIN,
                format!("{} must be at least {min}", field.label),
                Some(value),
            ));
        }
    }
    if let Some(max) = field.max {
        if n > max {
            errors.push(FieldViolation::new(
                &field.name,
                RULE_MAX,
                format!("{} must be at most {max}", field.label),
                Some(value),
            ));
        }
    }
}

/// Rows keyed by domain value, each an object of sub-field answers.
fn check_domain_investment(field: &FormField, value: &Value, errors: &mut Vec<FieldViolation>) {
    let Some(rows) = value.as_object() else {
        errors.push(type_error(&field.name, &field.label, "an object keyed by domain", value));
        return;
    };

    for (domain, row) in rows {
        let path = format!("{}.{domain}", field.name);
        if !field.has_option_value(domain) {
            errors.push(FieldViolation::new(
                &path,
                RULE_UNKNOWN_DOMAIN,
                format!("'{domain}' is not a domain of {}", field.label),
                None,
            ));
            continue;
        }
        check_row(field.sub_fields(), row, &path, errors);
    }
}

/// A list of rows, each an object of sub-field answers.
fn check_repeatable_group(field: &FormField, value: &Value, errors: &mut Vec<FieldViolation>) {
    let Some(rows) = value.as_array() else {
        errors.push(type_error(&field.name, &field.label, "a list of entries", value));
        return;
    };
    for (i, row) in rows.iter().enumerate() {
        let path = format!("{}[{i}]", field.name);
        check_row(field.sub_fields(), row, &path, errors);
    }
}

fn check_row(sub_fields: &[SubField], row: &Value, path: &str, errors: &mut Vec<FieldViolation>) {
    let Some(cells) = row.as_object() else {
        errors.push(FieldViolation::new(
            path,
            RULE_TYPE,
            format!("{path} must be an object"),
            Some(row),
        ));
        return;
    };
    for sub_field in sub_fields {
        let cell_path = format!("{path}.{}", sub_field.name);
        check_sub_field(sub_field, cells.get(&sub_field.name), &cell_path, errors);
    }
}

fn check_sub_field(
    sub_field: &SubField,
    value: Option<&Value>,
    path: &str,
    errors: &mut Vec<FieldViolation>,
) {
    if is_blank(value) {
        if sub_field.is_required() {
            errors.push(FieldViolation::new(
                path,
                RULE_REQUIRED,
                format!("{} is required", sub_field.label),
                None,
            ));
        }
        return;
    }
    let Some(value) = value else { return };

    match sub_field.field_type {
        SubFieldType::Text => {
            if !value.is_string() {
                errors.push(type_error(path, &sub_field.label, "text", value));
            }
        }
        SubFieldType::Number | SubFieldType::Currency => match value.as_f64() {
            Some(n) if n < 0.0 => errors.push(FieldViolation::new(
                path,
                RULE_NEGATIVE,
                format!("{} cannot be negative", sub_field.label),
                Some(value),
            )),
            Some(_) => {}
            None => errors.push(type_error(path, &sub_field.label, "a number", value)),
        },
        SubFieldType::Select => {
            let options = sub_field.options.as_deref().unwrap_or(&[]);
            match value.as_str() {
                Some(choice) if options.iter().any(|o| o.value == choice) => {}
                Some(choice) => errors.push(option_error(path, &sub_field.label, choice, value)),
                None => errors.push(type_error(path, &sub_field.label, "one option value", value)),
            }
        }
    }
}

fn type_error(path: &str, label: &str, expected: &str, value: &Value) -> FieldViolation {
    FieldViolation::new(
        path,
        RULE_TYPE,
        format!("{label} must be {expected}"),
        Some(value),
    )
}

fn option_error(path: &str, label: &str, choice: &str, value: &Value) -> FieldViolation {
    FieldViolation::new(
        path,
        RULE_OPTION,
        format!("'{choice}' is not a valid option for {label}"),
        Some(value),
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
