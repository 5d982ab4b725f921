//! `intake-admin` library crate.
//!
//! Re-exports the admin tool's modules for integration testing. The binary
//! entrypoint lives in `main.rs`.

pub mod commands;
pub mod config;
pub mod outline;

use intake_core::form_config::{FormConfig, FormStep, StepIcon};
use intake_core::types::{new_entity_id, STEP_ID_PREFIX};

use crate::config::AdminConfig;

/// Id given to a config started from scratch.
pub const STARTER_CONFIG_ID: &str = "initiative-form";

/// A blank config with a single empty "Basic Info" step.
pub fn starter_config(config: &AdminConfig) -> FormConfig {
    let first_step = FormStep {
        id: new_entity_id(STEP_ID_PREFIX),
        title: "Basic Info".into(),
        description: Some("General information about the initiative".into()),
        icon: StepIcon::FileText,
        order: 1,
        fields: Vec::new(),
    };
    FormConfig::new(
        STARTER_CONFIG_ID,
        config.form_name.clone(),
        "Form configuration for new initiative submissions",
        first_step,
        config.editor.clone(),
    )
}
