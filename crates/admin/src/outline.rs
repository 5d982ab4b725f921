//! Plain-text outline of a form configuration, mirroring the admin editor's
//! step cards.

use std::fmt::Write;

use intake_core::form_config::{FieldType, FormConfig, FormField};

/// Timestamp format for the "Last updated" line (`Jan 20, 2024 10:00 AM`).
const UPDATED_AT_FORMAT: &str = "%b %-d, %Y %-I:%M %p";

/// Render the config as an indented outline, steps and fields in order.
pub fn render_outline(config: &FormConfig) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(out, "{} ({})", config.name, config.id);
    let _ = writeln!(
        out,
        "Last updated: {} by {}",
        config.updated_at.format(UPDATED_AT_FORMAT),
        config.updated_by
    );

    for step in config.steps_in_order() {
        let _ = writeln!(
            out,
            "{}. {} [{}] ({} fields)",
            step.order,
            step.title,
            step.icon.as_str(),
            step.fields.len()
        );
        if step.fields.is_empty() {
            let _ = writeln!(out, "   No fields in this step yet");
        }
        for field in step.fields_in_order() {
            let _ = writeln!(out, "   {}", field_line(field));
        }
    }
    out
}

fn field_line(field: &FormField) -> String {
    let mut line = format!(
        "{}. {}  {} • {}",
        field.order,
        field.label,
        field.name,
        field.field_type.label()
    );
    if field.required {
        line.push_str("  *required");
    }
    match field.field_type {
        FieldType::Select | FieldType::Multiselect => {
            let values: Vec<&str> = field.options().iter().map(|o| o.value.as_str()).collect();
            let _ = write!(line, "  [{}]", values.join(", "));
        }
        FieldType::DomainInvestment => {
            let _ = write!(
                line,
                "  {} domains × {} columns",
                field.options().len(),
                field.sub_fields().len()
            );
        }
        FieldType::RepeatableGroup => {
            let _ = write!(line, "  {} columns per entry", field.sub_fields().len());
        }
        FieldType::Text
        | FieldType::Textarea
        | FieldType::Number
        | FieldType::Switch
        | FieldType::Date
        | FieldType::Currency => {}
    }
    line
}
