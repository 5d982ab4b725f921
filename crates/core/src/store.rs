//! Editing holder for a single [`FormConfig`].
//!
//! Every mutation clones the current aggregate, edits the clone and swaps it
//! in only when the edit succeeds, so a rejected operation never leaves a
//! half-applied tree behind. Swapped-out aggregates feed a bounded undo
//! history.

use serde::{Deserialize, Serialize};

use crate::domain_investment::{self, InvestmentSource};
use crate::error::CoreError;
use crate::field_name::derive_field_name;
use crate::form_config::{FieldOption, FieldType, FormConfig, FormField, FormStep, StepIcon, SubField};
use crate::types::{new_entity_id, FIELD_ID_PREFIX, STEP_ID_PREFIX};

/// Default number of past aggregates kept for undo.
pub const MAX_UNDO_DEPTH: usize = 50;

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Input for [`FormConfigStore::add_step`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewStep {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: StepIcon,
}

/// Input for [`FormConfigStore::add_field`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewField {
    pub label: String,
    /// Explicit machine name; derived from `label` when absent.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Options for select/multiselect fields.
    #[serde(default)]
    pub options: Option<Vec<FieldOption>>,
    /// Columns for repeatable-group fields.
    #[serde(default)]
    pub sub_fields: Option<Vec<SubField>>,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    /// Domain/column configuration for domain-investment fields.
    #[serde(default)]
    pub investment: Option<InvestmentSource>,
}

impl NewField {
    /// A field of the given type with every optional part left unset.
    pub fn new(label: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            label: label.into(),
            name: None,
            field_type,
            required: false,
            placeholder: None,
            description: None,
            options: None,
            sub_fields: None,
            min: None,
            max: None,
            investment: None,
        }
    }
}

/// Changes accepted by [`FormConfigStore::update_step`].
///
/// An empty `description` clears it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StepPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<StepIcon>,
}

/// Changes accepted by [`FormConfigStore::update_field`].
///
/// `name` and `type` are deliberately absent. `options` only applies to
/// select and multiselect fields and is ignored for every other type.
/// An empty `placeholder` or `description` clears it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldPatch {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub required: Option<bool>,
    #[serde(default)]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub options: Option<Vec<FieldOption>>,
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// Owns the form configuration being edited plus its undo/redo history.
#[derive(Debug, Clone)]
pub struct FormConfigStore {
    current: FormConfig,
    editor: String,
    undo_stack: Vec<FormConfig>,
    redo_stack: Vec<FormConfig>,
    history_limit: usize,
}

impl FormConfigStore {
    /// Take ownership of `config`; `editor` is stamped into `updated_by` on
    /// every mutation.
    pub fn new(config: FormConfig, editor: impl Into<String>) -> Result<Self, CoreError> {
        config.check_structure()?;
        Ok(Self {
            current: config,
            editor: editor.into(),
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            history_limit: MAX_UNDO_DEPTH,
        })
    }

    /// Cap the undo history at `limit` aggregates (0 disables undo).
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self.trim_history();
        self
    }

    pub fn config(&self) -> &FormConfig {
        &self.current
    }

    pub fn into_config(self) -> FormConfig {
        self.current
    }

    pub fn editor(&self) -> &str {
        &self.editor
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    // -- steps ---------------------------------------------------------------

    /// Append a step after the current last one.
    pub fn add_step(&mut self, input: NewStep) -> Result<&FormConfig, CoreError> {
        let title = required_text(&input.title, "Step title")?;
        let step_id = new_entity_id(STEP_ID_PREFIX);

        self.commit("add_step", |config| {
            let order = next_position(config.steps.len());
            config.steps.push(FormStep {
                id: step_id.clone(),
                title,
                description: non_empty(input.description),
                icon: input.icon,
                order,
                fields: Vec::new(),
            });
            tracing::info!(config_id = %config.id, step_id = %step_id, order, "Step added");
            Ok(())
        })
    }

    /// Remove a step and renumber the survivors. The last step cannot go.
    pub fn remove_step(&mut self, step_id: &str) -> Result<&FormConfig, CoreError> {
        self.commit("remove_step", |config| {
            let index = step_index(config, step_id)?;
            if config.steps.len() <= 1 {
                return Err(CoreError::Validation(
                    "Cannot remove the last step".to_string(),
                ));
            }
            let removed = config.steps.remove(index);
            config.renumber_steps();
            tracing::info!(
                config_id = %config.id,
                step_id,
                dropped_fields = removed.fields.len(),
                "Step removed",
            );
            Ok(())
        })
    }

    /// Change a step's title, description or icon.
    pub fn update_step(&mut self, step_id: &str, patch: StepPatch) -> Result<&FormConfig, CoreError> {
        let title = patch
            .title
            .as_deref()
            .map(|t| required_text(t, "Step title"))
            .transpose()?;

        self.commit("update_step", |config| {
            let step = config
                .step_mut(step_id)
                .ok_or_else(|| CoreError::not_found("step", step_id))?;
            if let Some(title) = title {
                step.title = title;
            }
            if let Some(description) = patch.description {
                step.description = non_empty(Some(description));
            }
            if let Some(icon) = patch.icon {
                step.icon = icon;
            }
            tracing::info!(config_id = %config.id, step_id, "Step updated");
            Ok(())
        })
    }

    /// Move a step to the 1-based position `new_order`.
    pub fn move_step(&mut self, step_id: &str, new_order: u32) -> Result<&FormConfig, CoreError> {
        self.commit("move_step", |config| {
            let target = target_index(new_order, config.steps.len())?;
            config.renumber_steps();
            let index = step_index(config, step_id)?;
            let step = config.steps.remove(index);
            config.steps.insert(target, step);
            for (i, step) in config.steps.iter_mut().enumerate() {
                step.order = next_position(i);
            }
            tracing::info!(config_id = %config.id, step_id, new_order, "Step moved");
            Ok(())
        })
    }

    // -- fields --------------------------------------------------------------

    /// Append a field to a step.
    ///
    /// The machine name is derived from the label unless one is supplied and
    /// must be unique within the step. Domain-investment fields get their
    /// options and sub-fields from [`domain_investment::resolve`].
    pub fn add_field(&mut self, step_id: &str, input: NewField) -> Result<&FormConfig, CoreError> {
        let field_id = new_entity_id(FIELD_ID_PREFIX);

        self.commit("add_field", |config| {
            let step = config
                .step_mut(step_id)
                .ok_or_else(|| CoreError::not_found("step", step_id))?;
            let field = build_field(field_id, input, next_position(step.fields.len()))?;
            if step.field_by_name(&field.name).is_some() {
                return Err(CoreError::Conflict(format!(
                    "Field name '{}' already exists in step '{}'",
                    field.name, step.title
                )));
            }
            tracing::info!(
                step_id,
                field_id = %field.id,
                name = %field.name,
                field_type = %field.field_type,
                order = field.order,
                "Field added",
            );
            step.fields.push(field);
            Ok(())
        })
    }

    /// Remove a field and renumber the remaining fields in its step.
    pub fn remove_field(&mut self, step_id: &str, field_id: &str) -> Result<&FormConfig, CoreError> {
        self.commit("remove_field", |config| {
            let step = config
                .step_mut(step_id)
                .ok_or_else(|| CoreError::not_found("step", step_id))?;
            let index = step
                .fields
                .iter()
                .position(|f| f.id == field_id)
                .ok_or_else(|| CoreError::not_found("field", field_id))?;
            step.fields.remove(index);
            step.renumber_fields();
            tracing::info!(step_id, field_id, "Field removed");
            Ok(())
        })
    }

    /// Apply a [`FieldPatch`]. Name and type never change here.
    pub fn update_field(
        &mut self,
        step_id: &str,
        field_id: &str,
        patch: FieldPatch,
    ) -> Result<&FormConfig, CoreError> {
        let label = patch
            .label
            .as_deref()
            .map(|l| required_text(l, "Field label"))
            .transpose()?;

        self.commit("update_field", |config| {
            let step = config
                .step_mut(step_id)
                .ok_or_else(|| CoreError::not_found("step", step_id))?;
            let field = step
                .fields
                .iter_mut()
                .find(|f| f.id == field_id)
                .ok_or_else(|| CoreError::not_found("field", field_id))?;

            if let Some(label) = label {
                field.label = label;
            }
            if let Some(required) = patch.required {
                field.required = required;
            }
            if let Some(placeholder) = patch.placeholder {
                field.placeholder = non_empty(Some(placeholder));
            }
            if let Some(description) = patch.description {
                field.description = non_empty(Some(description));
            }
            if let Some(options) = patch.options {
                if field.field_type.accepts_option_edits() {
                    if options.is_empty() {
                        return Err(CoreError::Validation(format!(
                            "Field '{}' of type {} must keep at least one option",
                            field.name, field.field_type
                        )));
                    }
                    field.options = Some(options);
                } else {
                    tracing::debug!(
                        field_id,
                        field_type = %field.field_type,
                        "Ignoring options patch for field type without editable options",
                    );
                }
            }
            tracing::info!(step_id, field_id, "Field updated");
            Ok(())
        })
    }

    /// Move a field to the 1-based position `new_order` within its step.
    pub fn move_field(
        &mut self,
        step_id: &str,
        field_id: &str,
        new_order: u32,
    ) -> Result<&FormConfig, CoreError> {
        self.commit("move_field", |config| {
            let step = config
                .step_mut(step_id)
                .ok_or_else(|| CoreError::not_found("step", step_id))?;
            let target = target_index(new_order, step.fields.len())?;
            step.renumber_fields();
            let index = step
                .fields
                .iter()
                .position(|f| f.id == field_id)
                .ok_or_else(|| CoreError::not_found("field", field_id))?;
            let field = step.fields.remove(index);
            step.fields.insert(target, field);
            for (i, field) in step.fields.iter_mut().enumerate() {
                field.order = next_position(i);
            }
            tracing::info!(step_id, field_id, new_order, "Field moved");
            Ok(())
        })
    }

    // -- history -------------------------------------------------------------

    /// Restore the aggregate that preceded the last mutation.
    pub fn undo(&mut self) -> Result<&FormConfig, CoreError> {
        let previous = self
            .undo_stack
            .pop()
            .ok_or_else(|| CoreError::Validation("Nothing to undo".to_string()))?;
        let current = std::mem::replace(&mut self.current, previous);
        self.redo_stack.push(current);
        tracing::debug!(
            undo_depth = self.undo_stack.len(),
            redo_depth = self.redo_stack.len(),
            "Undo applied",
        );
        Ok(&self.current)
    }

    /// Re-apply the mutation most recently undone.
    pub fn redo(&mut self) -> Result<&FormConfig, CoreError> {
        let next = self
            .redo_stack
            .pop()
            .ok_or_else(|| CoreError::Validation("Nothing to redo".to_string()))?;
        let current = std::mem::replace(&mut self.current, next);
        self.undo_stack.push(current);
        self.trim_history();
        tracing::debug!(
            undo_depth = self.undo_stack.len(),
            redo_depth = self.redo_stack.len(),
            "Redo applied",
        );
        Ok(&self.current)
    }

    // -- internals -----------------------------------------------------------

    /// Run `edit` against a copy of the current aggregate and swap the copy
    /// in on success, stamping `updated_at`/`updated_by`.
    ///
    /// An edit that leaves the tree as it was is accepted without touching
    /// the timestamp or the history.
    fn commit<F>(&mut self, op: &'static str, edit: F) -> Result<&FormConfig, CoreError>
    where
        F: FnOnce(&mut FormConfig) -> Result<(), CoreError>,
    {
        let mut next = self.current.clone();
        if let Err(err) = edit(&mut next) {
            tracing::warn!(op, config_id = %self.current.id, error = %err, "Form config edit rejected");
            return Err(err);
        }
        if next == self.current {
            tracing::debug!(op, config_id = %self.current.id, "Form config edit changed nothing");
            return Ok(&self.current);
        }
        next.updated_at = chrono::Utc::now();
        next.updated_by = self.editor.clone();

        let previous = std::mem::replace(&mut self.current, next);
        self.undo_stack.push(previous);
        self.trim_history();
        self.redo_stack.clear();
        Ok(&self.current)
    }

    fn trim_history(&mut self) {
        if self.undo_stack.len() > self.history_limit {
            let excess = self.undo_stack.len() - self.history_limit;
            self.undo_stack.drain(..excess);
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Build a new field from admin input, resolving type-specific parts.
fn build_field(id: String, input: NewField, order: u32) -> Result<FormField, CoreError> {
    let label = required_text(&input.label, "Field label")?;

    let name = match input.name.as_deref().map(str::trim) {
        Some(explicit) if !explicit.is_empty() => explicit.to_string(),
        _ => derive_field_name(&label),
    };
    if name.is_empty() {
        return Err(CoreError::Validation(format!(
            "Cannot derive a field name from label '{label}'; supply a name"
        )));
    }

    if let (Some(min), Some(max)) = (input.min, input.max) {
        if min > max {
            return Err(CoreError::Validation(format!(
                "Field '{name}' has min {min} greater than max {max}"
            )));
        }
    }

    let (options, sub_fields) = match input.field_type {
        FieldType::Select | FieldType::Multiselect => {
            let options = input.options.unwrap_or_default();
            if options.is_empty() {
                return Err(CoreError::Validation(format!(
                    "Field '{name}' of type {} requires at least one option",
                    input.field_type
                )));
            }
            (Some(options), None)
        }
        FieldType::DomainInvestment => {
            let resolved = domain_investment::resolve(&input.investment.unwrap_or_default());
            (Some(resolved.options), Some(resolved.sub_fields))
        }
        FieldType::RepeatableGroup => {
            let sub_fields = input.sub_fields.unwrap_or_default();
            if sub_fields.is_empty() {
                return Err(CoreError::Validation(format!(
                    "Repeatable group '{name}' requires at least one sub-field"
                )));
            }
            (None, Some(sub_fields))
        }
        FieldType::Text
        | FieldType::Textarea
        | FieldType::Number
        | FieldType::Switch
        | FieldType::Date
        | FieldType::Currency => (None, None),
    };

    let (min, max) = if input.field_type.is_numeric() {
        (input.min, input.max)
    } else {
        (None, None)
    };

    Ok(FormField {
        id,
        name,
        label,
        field_type: input.field_type,
        required: input.required,
        placeholder: non_empty(input.placeholder),
        description: non_empty(input.description),
        options,
        sub_fields,
        min,
        max,
        order,
    })
}

/// Trimmed text, or a validation error naming `what` when blank.
fn required_text(value: &str, what: &str) -> Result<String, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{what} is required")));
    }
    Ok(trimmed.to_string())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn step_index(config: &FormConfig, step_id: &str) -> Result<usize, CoreError> {
    config
        .steps
        .iter()
        .position(|s| s.id == step_id)
        .ok_or_else(|| CoreError::not_found("step", step_id))
}

/// 1-based position following `count` existing entries.
fn next_position(count: usize) -> u32 {
    u32::try_from(count + 1).unwrap_or(u32::MAX)
}

/// 0-based insertion index for a 1-based `order` among `len` entries.
fn target_index(order: u32, len: usize) -> Result<usize, CoreError> {
    let index = usize::try_from(order).unwrap_or(usize::MAX);
    if index == 0 || index > len {
        return Err(CoreError::Validation(format!(
            "Position {order} is out of range (1..{len})"
        )));
    }
    Ok(index - 1)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
