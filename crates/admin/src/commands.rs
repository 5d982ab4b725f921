//! Scripted edit commands for the form configuration.
//!
//! A script is a JSON array of commands tagged by `op`. Steps are addressed
//! by id or by their current 1-based position; fields by their machine name,
//! which never changes once the field exists.

use intake_core::error::CoreError;
use intake_core::form_config::{parse_options, FormConfig};
use intake_core::store::{FieldPatch, FormConfigStore, NewField, NewStep, StepPatch};
use serde::Deserialize;

/// How a command points at a step.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum StepRef {
    Position(u32),
    Id(String),
}

impl std::fmt::Display for StepRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Position(n) => write!(f, "#{n}"),
            Self::Id(id) => f.write_str(id),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditCommand {
    AddStep(NewStep),
    RemoveStep {
        step: StepRef,
    },
    UpdateStep {
        step: StepRef,
        #[serde(flatten)]
        patch: StepPatch,
    },
    MoveStep {
        step: StepRef,
        to: u32,
    },
    AddField {
        step: StepRef,
        /// Comma-separated options, used when `options` is not given.
        #[serde(default)]
        options_text: Option<String>,
        #[serde(flatten)]
        field: NewField,
    },
    RemoveField {
        step: StepRef,
        field: String,
    },
    UpdateField {
        step: StepRef,
        field: String,
        #[serde(flatten)]
        patch: FieldPatch,
    },
    MoveField {
        step: StepRef,
        field: String,
        to: u32,
    },
    Undo,
    Redo,
}

impl EditCommand {
    pub fn op(&self) -> &'static str {
        match self {
            Self::AddStep(_) => "add_step",
            Self::RemoveStep { .. } => "remove_step",
            Self::UpdateStep { .. } => "update_step",
            Self::MoveStep { .. } => "move_step",
            Self::AddField { .. } => "add_field",
            Self::RemoveField { .. } => "remove_field",
            Self::UpdateField { .. } => "update_field",
            Self::MoveField { .. } => "move_field",
            Self::Undo => "undo",
            Self::Redo => "redo",
        }
    }
}

/// A script command that the store rejected.
#[derive(Debug, thiserror::Error)]
#[error("command #{index} ({op}) failed: {source}")]
pub struct ScriptError {
    /// 1-based position of the command in the script.
    pub index: usize,
    pub op: &'static str,
    #[source]
    pub source: CoreError,
}

/// Parse a JSON script into commands.
pub fn parse_script(json: &str) -> Result<Vec<EditCommand>, CoreError> {
    Ok(serde_json::from_str(json)?)
}

/// Apply every command in order, stopping at the first rejection.
///
/// Commands before the failing one stay applied.
pub fn run_script(
    store: &mut FormConfigStore,
    commands: Vec<EditCommand>,
) -> Result<usize, ScriptError> {
    let mut applied = 0;
    for (i, command) in commands.into_iter().enumerate() {
        let op = command.op();
        apply(store, command).map_err(|source| ScriptError {
            index: i + 1,
            op,
            source,
        })?;
        applied += 1;
    }
    tracing::info!(applied, "Script complete");
    Ok(applied)
}

/// Apply one command to the store.
pub fn apply(store: &mut FormConfigStore, command: EditCommand) -> Result<(), CoreError> {
    match command {
        EditCommand::AddStep(input) => {
            store.add_step(input)?;
        }
        EditCommand::RemoveStep { step } => {
            let step_id = resolve_step(store.config(), &step)?;
            store.remove_step(&step_id)?;
        }
        EditCommand::UpdateStep { step, patch } => {
            let step_id = resolve_step(store.config(), &step)?;
            store.update_step(&step_id, patch)?;
        }
        EditCommand::MoveStep { step, to } => {
            let step_id = resolve_step(store.config(), &step)?;
            store.move_step(&step_id, to)?;
        }
        EditCommand::AddField {
            step,
            options_text,
            mut field,
        } => {
            let step_id = resolve_step(store.config(), &step)?;
            if field.options.is_none() {
                field.options = options_text.as_deref().map(parse_options);
            }
            store.add_field(&step_id, field)?;
        }
        EditCommand::RemoveField { step, field } => {
            let (step_id, field_id) = resolve_field(store.config(), &step, &field)?;
            store.remove_field(&step_id, &field_id)?;
        }
        EditCommand::UpdateField { step, field, patch } => {
            let (step_id, field_id) = resolve_field(store.config(), &step, &field)?;
            store.update_field(&step_id, &field_id, patch)?;
        }
        EditCommand::MoveField { step, field, to } => {
            let (step_id, field_id) = resolve_field(store.config(), &step, &field)?;
            store.move_field(&step_id, &field_id, to)?;
        }
        EditCommand::Undo => {
            store.undo()?;
        }
        EditCommand::Redo => {
            store.redo()?;
        }
    }
    Ok(())
}

/// Resolve a step reference to the step's id.
pub fn resolve_step(config: &FormConfig, step: &StepRef) -> Result<String, CoreError> {
    let found = match step {
        StepRef::Position(order) => config.steps.iter().find(|s| s.order == *order),
        StepRef::Id(id) => config.step(id),
    };
    found
        .map(|s| s.id.clone())
        .ok_or_else(|| CoreError::NotFound {
            entity: "step",
            id: step.to_string(),
        })
}

/// Resolve a step reference and field name to `(step_id, field_id)`.
pub fn resolve_field(
    config: &FormConfig,
    step: &StepRef,
    name: &str,
) -> Result<(String, String), CoreError> {
    let step_id = resolve_step(config, step)?;
    let field_id = config
        .step(&step_id)
        .and_then(|s| s.field_by_name(name))
        .map(|f| f.id.clone())
        .ok_or_else(|| CoreError::NotFound {
            entity: "field",
            id: name.to_string(),
        })?;
    Ok((step_id, field_id))
}
