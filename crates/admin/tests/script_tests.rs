//! Integration tests for running edit scripts against a form configuration.
//!
//! Scripts are parsed from JSON exactly as the `intake-admin` binary reads
//! them, then applied through [`FormConfigStore`].

use assert_matches::assert_matches;
use intake_admin::commands::{parse_script, run_script};
use intake_admin::config::AdminConfig;
use intake_admin::outline::render_outline;
use intake_admin::{starter_config, STARTER_CONFIG_ID};
use intake_core::error::CoreError;
use intake_core::form_config::{FieldType, FormConfig};
use intake_core::store::FormConfigStore;
use serde_json::json;

fn admin() -> AdminConfig {
    AdminConfig::from_lookup(|key| match key {
        "INTAKE_EDITOR" => Some("Jordan Lee".to_string()),
        _ => None,
    })
    .unwrap()
}

fn store() -> FormConfigStore {
    let admin = admin();
    FormConfigStore::new(starter_config(&admin), admin.editor).unwrap()
}

fn run(store: &mut FormConfigStore, script: serde_json::Value) -> usize {
    let commands = parse_script(&script.to_string()).expect("script should parse");
    run_script(store, commands).expect("script should apply")
}

// ---------------------------------------------------------------------------
// Test: starter config
// ---------------------------------------------------------------------------

/// A fresh config has one empty step and carries the configured names.
#[test]
fn starter_config_has_one_empty_step() {
    let config = starter_config(&admin());
    assert_eq!(config.id, STARTER_CONFIG_ID);
    assert_eq!(config.name, "Initiative Intake Form");
    assert_eq!(config.updated_by, "Jordan Lee");
    assert_eq!(config.steps.len(), 1);
    assert_eq!(config.steps[0].order, 1);
    assert!(config.steps[0].id.starts_with("step-"));
    assert!(config.steps[0].fields.is_empty());
}

// ---------------------------------------------------------------------------
// Test: building a form from a script
// ---------------------------------------------------------------------------

/// A script that adds steps and fields of every composite kind produces the
/// expected tree, with derived names and resolved investment columns.
#[test]
fn script_builds_multi_step_form() {
    let mut store = store();
    let applied = run(
        &mut store,
        json!([
            {"op": "add_field", "step": 1, "label": "Priority Level!", "type": "select",
             "options_text": "High, Medium, , Low", "required": true},
            {"op": "add_step", "title": "Investment", "icon": "DollarSign"},
            {"op": "add_field", "step": 2, "label": "Domain Investment",
             "type": "domain-investment",
             "investment": {"mode": "custom", "domains": "Retail, Wealth", "sub_fields": []}},
            {"op": "add_field", "step": 2, "label": "Milestones", "type": "repeatable-group",
             "sub_fields": [
                {"id": "name", "name": "name", "label": "Name", "type": "text"},
                {"id": "cost", "name": "cost", "label": "Cost", "type": "currency"}
             ]}
        ]),
    );
    assert_eq!(applied, 4);

    let config = store.config();
    assert_eq!(config.steps.len(), 2);
    assert_eq!(config.updated_by, "Jordan Lee");

    let priority = config.steps[0].field_by_name("priority_level").unwrap();
    assert_eq!(priority.field_type, FieldType::Select);
    assert!(priority.required);
    let values: Vec<&str> = priority.options().iter().map(|o| o.value.as_str()).collect();
    assert_eq!(values, vec!["High", "Medium", "Low"]);

    let investment = config.steps[1].field_by_name("domain_investment").unwrap();
    assert_eq!(investment.options().len(), 2);
    assert_eq!(investment.sub_fields().len(), 4, "empty custom columns fall back");
    assert_eq!(investment.investment_grid().len(), 8);

    let milestones = config.steps[1].field_by_name("milestones").unwrap();
    assert_eq!(milestones.order, 2);
    assert_eq!(milestones.sub_fields().len(), 2);
}

/// Steps can be addressed by id as well as by position.
#[test]
fn steps_resolve_by_id() {
    let mut store = store();
    let step_id = store.config().steps[0].id.clone();
    run(
        &mut store,
        json!([
            {"op": "update_step", "step": step_id, "title": "Overview", "icon": "Shield"},
            {"op": "add_field", "step": step_id, "label": "Summary", "type": "textarea"}
        ]),
    );
    let step = &store.config().steps[0];
    assert_eq!(step.title, "Overview");
    assert_eq!(step.icon.as_str(), "Shield");
    assert_eq!(step.fields.len(), 1);
}

/// Moving and removing fields through a script keeps orders dense, and an
/// options patch on a text field is ignored.
#[test]
fn field_edits_keep_order_dense() {
    let mut store = store();
    run(
        &mut store,
        json!([
            {"op": "add_field", "step": 1, "label": "Title", "type": "text"},
            {"op": "add_field", "step": 1, "label": "Owner", "type": "text"},
            {"op": "add_field", "step": 1, "label": "Budget", "type": "currency", "min": 0},
            {"op": "move_field", "step": 1, "field": "budget", "to": 1},
            {"op": "remove_field", "step": 1, "field": "title"},
            {"op": "update_field", "step": 1, "field": "owner",
             "options": [{"label": "X", "value": "x"}], "placeholder": "Full name"}
        ]),
    );

    let step = &store.config().steps[0];
    let names: Vec<&str> = step.fields_in_order().iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["budget", "owner"]);
    let orders: Vec<u32> = step.fields_in_order().iter().map(|f| f.order).collect();
    assert_eq!(orders, vec![1, 2]);

    let owner = step.field_by_name("owner").unwrap();
    assert!(owner.options.is_none());
    assert_eq!(owner.placeholder.as_deref(), Some("Full name"));
}

/// Undo and redo commands walk the store's history.
#[test]
fn undo_and_redo_commands() {
    let mut store = store();
    run(
        &mut store,
        json!([
            {"op": "add_step", "title": "Risks", "icon": "AlertTriangle"},
            {"op": "add_step", "title": "Timeline", "icon": "Calendar"},
            {"op": "undo"},
            {"op": "undo"},
            {"op": "redo"}
        ]),
    );
    let titles: Vec<&str> = store
        .config()
        .steps_in_order()
        .iter()
        .map(|s| s.title.as_str())
        .collect();
    assert_eq!(titles, vec!["Basic Info", "Risks"]);
    assert!(store.can_redo());
}

// ---------------------------------------------------------------------------
// Test: failures
// ---------------------------------------------------------------------------

/// The failing command is reported by position; earlier commands stay
/// applied.
#[test]
fn failing_command_is_reported_by_position() {
    let mut store = store();
    let commands = parse_script(
        &json!([
            {"op": "add_step", "title": "Risks"},
            {"op": "remove_field", "step": 2, "field": "missing"}
        ])
        .to_string(),
    )
    .unwrap();

    let err = run_script(&mut store, commands).unwrap_err();
    assert_eq!(err.index, 2);
    assert_eq!(err.op, "remove_field");
    assert_matches!(err.source, CoreError::NotFound { entity: "field", .. });
    assert_eq!(store.config().steps.len(), 2);
}

/// Removing the only step fails and leaves the config as it was.
#[test]
fn removing_only_step_fails() {
    let mut store = store();
    let before = store.config().clone();
    let commands = parse_script(r#"[{"op": "remove_step", "step": 1}]"#).unwrap();
    let err = run_script(&mut store, commands).unwrap_err();
    assert_matches!(err.source, CoreError::Validation(_));
    assert_eq!(store.config(), &before);
}

/// An unknown step position is a not-found error.
#[test]
fn unknown_step_position_is_not_found() {
    let mut store = store();
    let commands = parse_script(r#"[{"op": "move_step", "step": 7, "to": 1}]"#).unwrap();
    let err = run_script(&mut store, commands).unwrap_err();
    assert_matches!(err.source, CoreError::NotFound { entity: "step", .. });
    assert!(err.to_string().contains("#7"));
}

// ---------------------------------------------------------------------------
// Test: output
// ---------------------------------------------------------------------------

/// The outline and JSON document both reflect the edited config, and the
/// JSON loads back to the same tree.
#[test]
fn output_reflects_edits() {
    let mut store = store();
    run(
        &mut store,
        json!([
            {"op": "add_field", "step": 1, "label": "Investment", "type": "domain-investment"}
        ]),
    );

    let outline = render_outline(store.config());
    assert!(outline.contains("1. Basic Info [FileText] (1 fields)"));
    assert!(outline.contains("investment • Domain Investment"));
    assert!(outline.contains("8 domains × 4 columns"));
    assert!(outline.contains("by Jordan Lee"));

    let json = store.config().to_json().unwrap();
    let reloaded = FormConfig::from_json(&json).unwrap();
    assert_eq!(&reloaded, store.config());
}
