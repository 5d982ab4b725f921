//! Form configuration model for the initiative intake form.
//!
//! A [`FormConfig`] is a tree: ordered steps, each holding ordered fields,
//! some of which carry sub-fields. The rendering layer walks it read-only;
//! all writes go through [`crate::store::FormConfigStore`].
//!
//! Ordering invariant: step `order` values within a config, and field
//! `order` values within a step, are always the dense range `1..=N`.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Field types
// ---------------------------------------------------------------------------

/// The closed set of input kinds a form field can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub enum FieldType {
    Text,
    Textarea,
    Number,
    Select,
    Switch,
    Date,
    Multiselect,
    Currency,
    DomainInvestment,
    RepeatableGroup,
}

impl FieldType {
    /// Every field type, in the order the admin picker lists them.
    pub const ALL: [FieldType; 10] = [
        Self::Text,
        Self::Textarea,
        Self::Number,
        Self::Select,
        Self::Switch,
        Self::Date,
        Self::Multiselect,
        Self::Currency,
        Self::DomainInvestment,
        Self::RepeatableGroup,
    ];

    /// Wire name of the type (`"domain-investment"`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Textarea => "textarea",
            Self::Number => "number",
            Self::Select => "select",
            Self::Switch => "switch",
            Self::Date => "date",
            Self::Multiselect => "multiselect",
            Self::Currency => "currency",
            Self::DomainInvestment => "domain-investment",
            Self::RepeatableGroup => "repeatable-group",
        }
    }

    /// Human-readable label shown in the admin editor.
    pub fn label(self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::Textarea => "Text Area",
            Self::Number => "Number",
            Self::Select => "Dropdown",
            Self::Switch => "Yes/No Toggle",
            Self::Date => "Date",
            Self::Multiselect => "Multi-Select",
            Self::Currency => "Currency",
            Self::DomainInvestment => "Domain Investment",
            Self::RepeatableGroup => "Repeatable Group",
        }
    }

    /// Symbolic icon name the rendering layer maps to a glyph.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Text => "Type",
            Self::Textarea => "AlignLeft",
            Self::Number => "Hash",
            Self::Select | Self::Multiselect => "List",
            Self::Switch => "ToggleLeft",
            Self::Date => "Calendar",
            Self::Currency => "DollarSign",
            Self::DomainInvestment => "Grid3x3",
            Self::RepeatableGroup => "Layers",
        }
    }

    /// Whether the admin may edit this field's options after creation.
    pub fn accepts_option_edits(self) -> bool {
        match self {
            Self::Select | Self::Multiselect => true,
            Self::Text
            | Self::Textarea
            | Self::Number
            | Self::Switch
            | Self::Date
            | Self::Currency
            | Self::DomainInvestment
            | Self::RepeatableGroup => false,
        }
    }

    /// Whether a field of this type is meaningless without options.
    pub fn requires_options(self) -> bool {
        match self {
            Self::Select | Self::Multiselect | Self::DomainInvestment => true,
            Self::Text
            | Self::Textarea
            | Self::Number
            | Self::Switch
            | Self::Date
            | Self::Currency
            | Self::RepeatableGroup => false,
        }
    }

    /// Whether this type is a composite carrying sub-fields.
    pub fn has_sub_fields(self) -> bool {
        match self {
            Self::DomainInvestment | Self::RepeatableGroup => true,
            Self::Text
            | Self::Textarea
            | Self::Number
            | Self::Select
            | Self::Switch
            | Self::Date
            | Self::Multiselect
            | Self::Currency => false,
        }
    }

    /// Whether `min`/`max` bounds apply.
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Number | Self::Currency)
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The restricted type set allowed inside a composite field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub enum SubFieldType {
    Text,
    Number,
    Currency,
    Select,
}

impl SubFieldType {
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Number | Self::Currency)
    }
}

// ---------------------------------------------------------------------------
// Step icons
// ---------------------------------------------------------------------------

/// Icons available for a form step header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub enum StepIcon {
    #[default]
    FileText,
    DollarSign,
    Users,
    AlertTriangle,
    Settings,
    Calendar,
    List,
    Shield,
}

impl StepIcon {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FileText => "FileText",
            Self::DollarSign => "DollarSign",
            Self::Users => "Users",
            Self::AlertTriangle => "AlertTriangle",
            Self::Settings => "Settings",
            Self::Calendar => "Calendar",
            Self::List => "List",
            Self::Shield => "Shield",
        }
    }
}

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// A label/value pair offered by select-like fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct FieldOption {
    pub label: String,
    pub value: String,
}

impl FieldOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    /// An option whose label doubles as its value.
    pub fn same(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            label: text.clone(),
            value: text,
        }
    }
}

/// Parse comma-separated option text (`"Low, Medium ,High"`).
///
/// Tokens are trimmed and kept in input order; blank tokens are skipped.
pub fn parse_options(text: &str) -> Vec<FieldOption> {
    text.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(FieldOption::same)
        .collect()
}

// ---------------------------------------------------------------------------
// Tree nodes
// ---------------------------------------------------------------------------

/// A column inside a composite field (domain-investment or repeatable-group).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct SubField {
    pub id: String,
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: SubFieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<FieldOption>>,
}

impl SubField {
    /// A numeric sub-field whose id doubles as its name.
    pub fn number(name: &str, label: &str) -> Self {
        Self {
            id: name.to_string(),
            name: name.to_string(),
            label: label.to_string(),
            field_type: SubFieldType::Number,
            required: None,
            placeholder: None,
            options: None,
        }
    }

    pub fn is_required(&self) -> bool {
        self.required.unwrap_or(false)
    }
}

/// One input on a form step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct FormField {
    pub id: String,
    /// Machine identifier; fixed once the field exists.
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<FieldOption>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_fields: Option<Vec<SubField>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    pub order: u32,
}

/// A single cell of a domain-investment grid: one sub-field for one domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvestmentCell<'a> {
    pub domain: &'a FieldOption,
    pub sub_field: &'a SubField,
}

impl FormField {
    /// Options as a slice (empty when none are set).
    pub fn options(&self) -> &[FieldOption] {
        self.options.as_deref().unwrap_or(&[])
    }

    /// Sub-fields as a slice (empty when none are set).
    pub fn sub_fields(&self) -> &[SubField] {
        self.sub_fields.as_deref().unwrap_or(&[])
    }

    /// Whether `value` matches one of this field's option values.
    pub fn has_option_value(&self, value: &str) -> bool {
        self.options().iter().any(|o| o.value == value)
    }

    /// The `options × sub_fields` cross-product, row-major by domain.
    ///
    /// Empty for anything other than a domain-investment field.
    pub fn investment_grid(&self) -> Vec<InvestmentCell<'_>> {
        if self.field_type != FieldType::DomainInvestment {
            return Vec::new();
        }
        self.options()
            .iter()
            .flat_map(|domain| {
                self.sub_fields()
                    .iter()
                    .map(move |sub_field| InvestmentCell { domain, sub_field })
            })
            .collect()
    }
}

/// A page of the multi-step intake form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct FormStep {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: StepIcon,
    pub order: u32,
    #[serde(default)]
    pub fields: Vec<FormField>,
}

impl FormStep {
    pub fn field(&self, field_id: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.id == field_id)
    }

    pub fn field_by_name(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Fields sorted by their `order`.
    pub fn fields_in_order(&self) -> Vec<&FormField> {
        let mut fields: Vec<&FormField> = self.fields.iter().collect();
        fields.sort_by_key(|f| f.order);
        fields
    }

    /// Sort fields by `order` then rewrite `order` as `1..=M`.
    pub(crate) fn renumber_fields(&mut self) {
        self.fields.sort_by_key(|f| f.order);
        for (i, field) in self.fields.iter_mut().enumerate() {
            field.order = position(i);
        }
    }
}

/// The aggregate root: a full intake form definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct FormConfig {
    pub id: String,
    pub name: String,
    pub description: String,
    pub steps: Vec<FormStep>,
    pub updated_at: Timestamp,
    pub updated_by: String,
}

impl FormConfig {
    /// A config holding a single empty step.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        first_step: FormStep,
        updated_by: impl Into<String>,
    ) -> Self {
        let mut first_step = first_step;
        first_step.order = 1;
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            steps: vec![first_step],
            updated_at: chrono::Utc::now(),
            updated_by: updated_by.into(),
        }
    }

    pub fn step(&self, step_id: &str) -> Option<&FormStep> {
        self.steps.iter().find(|s| s.id == step_id)
    }

    pub(crate) fn step_mut(&mut self, step_id: &str) -> Option<&mut FormStep> {
        self.steps.iter_mut().find(|s| s.id == step_id)
    }

    /// Steps sorted by their `order`.
    pub fn steps_in_order(&self) -> Vec<&FormStep> {
        let mut steps: Vec<&FormStep> = self.steps.iter().collect();
        steps.sort_by_key(|s| s.order);
        steps
    }

    /// Every field across all steps, in step then field order.
    pub fn all_fields(&self) -> Vec<&FormField> {
        self.steps_in_order()
            .into_iter()
            .flat_map(|s| s.fields_in_order())
            .collect()
    }

    /// Field names used in more than one step, sorted.
    ///
    /// Names are unique within a step but answers are keyed by name across
    /// the whole form, so a shared name cannot be answered per step.
    pub fn names_shared_across_steps(&self) -> Vec<&str> {
        let mut steps_per_name: BTreeMap<&str, HashSet<&str>> = BTreeMap::new();
        for step in &self.steps {
            for field in &step.fields {
                steps_per_name
                    .entry(field.name.as_str())
                    .or_default()
                    .insert(step.id.as_str());
            }
        }
        steps_per_name
            .into_iter()
            .filter(|(_, steps)| steps.len() > 1)
            .map(|(name, _)| name)
            .collect()
    }

    /// Sort steps by `order` then rewrite `order` as `1..=N`.
    pub(crate) fn renumber_steps(&mut self) {
        self.steps.sort_by_key(|s| s.order);
        for (i, step) in self.steps.iter_mut().enumerate() {
            step.order = position(i);
        }
    }

    // -----------------------------------------------------------------------
    // Serialization
    // -----------------------------------------------------------------------

    /// Parse a config document and verify its structural invariants.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let config: FormConfig = serde_json::from_str(json)?;
        config.check_structure()?;
        Ok(config)
    }

    /// Pretty-printed JSON document.
    pub fn to_json(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Verify the invariants every mutation preserves.
    pub fn check_structure(&self) -> Result<(), CoreError> {
        if self.steps.is_empty() {
            return Err(CoreError::Validation(
                "Form configuration must have at least one step".to_string(),
            ));
        }
        check_dense(self.steps.iter().map(|s| s.order), "step")?;

        let mut step_ids = HashSet::new();
        for step in &self.steps {
            if !step_ids.insert(step.id.as_str()) {
                return Err(CoreError::Validation(format!(
                    "Duplicate step id '{}'",
                    step.id
                )));
            }
            check_dense(step.fields.iter().map(|f| f.order), "field")?;

            let mut field_ids = HashSet::new();
            let mut field_names = HashSet::new();
            for field in &step.fields {
                if !field_ids.insert(field.id.as_str()) {
                    return Err(CoreError::Validation(format!(
                        "Duplicate field id '{}' in step '{}'",
                        field.id, step.id
                    )));
                }
                if !field_names.insert(field.name.as_str()) {
                    return Err(CoreError::Validation(format!(
                        "Duplicate field name '{}' in step '{}'",
                        field.name, step.id
                    )));
                }
                if field.field_type.requires_options() && field.options().is_empty() {
                    return Err(CoreError::Validation(format!(
                        "Field '{}' of type {} must have options",
                        field.name, field.field_type
                    )));
                }
            }
        }
        Ok(())
    }
}

/// 1-based position for a 0-based index.
fn position(index: usize) -> u32 {
    u32::try_from(index + 1).unwrap_or(u32::MAX)
}

/// Check that `orders` is a permutation of `1..=len`.
fn check_dense(orders: impl Iterator<Item = u32>, what: &str) -> Result<(), CoreError> {
    let mut orders: Vec<u32> = orders.collect();
    orders.sort_unstable();
    for (i, order) in orders.iter().enumerate() {
        if *order != position(i) {
            return Err(CoreError::Validation(format!(
                "{what} order values must be 1..{} without gaps, found {order} at position {}",
                orders.len(),
                i + 1
            )));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn sample_json() -> serde_json::Value {
        json!({
            "id": "initiative-form",
            "name": "Initiative Intake Form",
            "description": "Form configuration for new initiative submissions",
            "updatedAt": "2024-01-20T10:00:00Z",
            "updatedBy": "Admin User",
            "steps": [
                {
                    "id": "step-1",
                    "title": "Basic Info",
                    "description": "Core initiative details",
                    "icon": "FileText",
                    "order": 1,
                    "fields": [
                        { "id": "title", "name": "title", "label": "Title of Initiative",
                          "type": "text", "required": true, "placeholder": "Enter initiative title", "order": 1 },
                        { "id": "category", "name": "category", "label": "Category",
                          "type": "select", "required": true, "order": 2,
                          "options": [
                              { "label": "Mandatory", "value": "Mandatory" },
                              { "label": "Regulatory", "value": "Regulatory" }
                          ] }
                    ]
                },
                {
                    "id": "step-2",
                    "title": "Investment",
                    "icon": "DollarSign",
                    "order": 2,
                    "fields": [
                        { "id": "heads", "name": "existingHeadsCommitted", "label": "Existing Heads Committed",
                          "type": "number", "required": true, "min": 0, "order": 1 }
                    ]
                }
            ]
        })
    }

    // -- field types ---------------------------------------------------------

    #[test]
    fn field_type_wire_names_round_trip() {
        for ft in FieldType::ALL {
            let encoded = serde_json::to_value(ft).unwrap();
            assert_eq!(encoded, json!(ft.as_str()));
            let decoded: FieldType = serde_json::from_value(encoded).unwrap();
            assert_eq!(decoded, ft);
        }
    }

    #[test]
    fn domain_investment_uses_kebab_case() {
        assert_eq!(
            serde_json::to_value(FieldType::DomainInvestment).unwrap(),
            json!("domain-investment")
        );
    }

    #[test]
    fn only_select_types_accept_option_edits() {
        let accepting: Vec<FieldType> = FieldType::ALL
            .into_iter()
            .filter(|t| t.accepts_option_edits())
            .collect();
        assert_eq!(accepting, vec![FieldType::Select, FieldType::Multiselect]);
    }

    #[test]
    fn composite_types_have_sub_fields() {
        assert!(FieldType::DomainInvestment.has_sub_fields());
        assert!(FieldType::RepeatableGroup.has_sub_fields());
        assert!(!FieldType::Select.has_sub_fields());
    }

    #[test]
    fn every_type_has_label_and_icon() {
        for ft in FieldType::ALL {
            assert!(!ft.label().is_empty());
            assert!(!ft.icon().is_empty());
        }
    }

    // -- parse_options -------------------------------------------------------

    #[test]
    fn parse_options_trims_and_keeps_order() {
        let options = parse_options("High, Low ,Medium");
        let values: Vec<&str> = options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, vec!["High", "Low", "Medium"]);
        assert_eq!(options[1], FieldOption::same("Low"));
    }

    #[test]
    fn parse_options_skips_blank_tokens() {
        assert_eq!(parse_options("A,, ,B").len(), 2);
        assert!(parse_options("").is_empty());
    }

    // -- serialization -------------------------------------------------------

    #[test]
    fn parses_camel_case_document() {
        let config = FormConfig::from_json(&sample_json().to_string()).unwrap();
        assert_eq!(config.steps.len(), 2);
        assert_eq!(config.updated_by, "Admin User");
        let heads = config.steps[1].field_by_name("existingHeadsCommitted").unwrap();
        assert_eq!(heads.min, Some(0.0));
        assert_eq!(config.steps[1].icon, StepIcon::DollarSign);
    }

    #[test]
    fn json_round_trip_is_lossless() {
        let config = FormConfig::from_json(&sample_json().to_string()).unwrap();
        let encoded = config.to_json().unwrap();
        let decoded = FormConfig::from_json(&encoded).unwrap();
        assert_eq!(decoded, config);
    }

    #[test]
    fn absent_optionals_are_omitted() {
        let config = FormConfig::from_json(&sample_json().to_string()).unwrap();
        let value = serde_json::to_value(&config).unwrap();
        let title = &value["steps"][0]["fields"][0];
        assert!(title.get("options").is_none());
        assert!(title.get("subFields").is_none());
        assert_eq!(title["type"], "text");
    }

    #[test]
    fn malformed_json_is_invalid_document() {
        assert_matches!(
            FormConfig::from_json("{ not json"),
            Err(CoreError::InvalidDocument(_))
        );
    }

    #[test]
    fn unknown_field_type_is_invalid_document() {
        let mut doc = sample_json();
        doc["steps"][0]["fields"][0]["type"] = json!("slider");
        assert_matches!(
            FormConfig::from_json(&doc.to_string()),
            Err(CoreError::InvalidDocument(_))
        );
    }

    // -- structure checks ----------------------------------------------------

    #[test]
    fn gap_in_step_order_rejected() {
        let mut doc = sample_json();
        doc["steps"][1]["order"] = json!(3);
        assert_matches!(
            FormConfig::from_json(&doc.to_string()),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn duplicate_field_name_rejected() {
        let mut doc = sample_json();
        doc["steps"][0]["fields"][1]["name"] = json!("title");
        let err = FormConfig::from_json(&doc.to_string()).unwrap_err();
        assert!(err.to_string().contains("Duplicate field name"));
    }

    #[test]
    fn select_without_options_rejected() {
        let mut doc = sample_json();
        doc["steps"][0]["fields"][1]
            .as_object_mut()
            .unwrap()
            .remove("options");
        assert!(FormConfig::from_json(&doc.to_string()).is_err());
    }

    #[test]
    fn empty_steps_rejected() {
        let mut doc = sample_json();
        doc["steps"] = json!([]);
        assert!(FormConfig::from_json(&doc.to_string()).is_err());
    }

    // -- traversal -----------------------------------------------------------

    #[test]
    fn traversal_follows_order_not_storage() {
        let mut config = FormConfig::from_json(&sample_json().to_string()).unwrap();
        config.steps.reverse();
        let titles: Vec<&str> = config
            .steps_in_order()
            .iter()
            .map(|s| s.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Basic Info", "Investment"]);
        assert_eq!(config.all_fields().len(), 3);
    }

    #[test]
    fn shared_names_across_steps_are_listed() {
        let mut value = sample_json();
        value["steps"][1]["fields"][0]["name"] = json!("title");
        let config = FormConfig::from_json(&value.to_string()).unwrap();
        assert_eq!(config.names_shared_across_steps(), vec!["title"]);

        let config = FormConfig::from_json(&sample_json().to_string()).unwrap();
        assert!(config.names_shared_across_steps().is_empty());
    }

    #[test]
    fn investment_grid_is_cross_product() {
        let field = FormField {
            id: "inv".into(),
            name: "domainInvestment".into(),
            label: "Domain Investment".into(),
            field_type: FieldType::DomainInvestment,
            required: false,
            placeholder: None,
            description: None,
            options: Some(vec![FieldOption::same("CFP"), FieldOption::same("GTI")]),
            sub_fields: Some(vec![
                SubField::number("existingHeads", "Existing Heads"),
                SubField::number("newAsk", "New Ask"),
                SubField::number("nextPhaseAsk", "Next Phase Ask"),
            ]),
            min: None,
            max: None,
            order: 1,
        };
        let grid = field.investment_grid();
        assert_eq!(grid.len(), 6);
        assert_eq!(grid[0].domain.value, "CFP");
        assert_eq!(grid[3].domain.value, "GTI");
        assert_eq!(grid[3].sub_field.name, "existingHeads");
    }

    #[test]
    fn investment_grid_empty_for_plain_fields() {
        let config = FormConfig::from_json(&sample_json().to_string()).unwrap();
        let category = config.steps[0].field_by_name("category").unwrap();
        assert!(category.investment_grid().is_empty());
    }

    #[test]
    fn renumber_closes_gaps() {
        let mut config = FormConfig::from_json(&sample_json().to_string()).unwrap();
        config.steps[0].fields.remove(0);
        config.steps[0].renumber_fields();
        assert_eq!(config.steps[0].fields[0].order, 1);
        assert!(config.check_structure().is_ok());
    }
}
