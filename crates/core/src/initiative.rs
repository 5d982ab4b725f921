//! Submitted initiatives, their approval decision, and dashboard queries.
//!
//! An initiative is created from answers that passed
//! [`crate::submission::validate_submission`] and starts out pending. An
//! approver decides it exactly once.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::form_config::FormConfig;
use crate::submission::{validate_submission, Answers};
use crate::types::{new_entity_id, Timestamp, INITIATIVE_ID_PREFIX};

/// Answer key holding the initiative title.
pub const ANSWER_KEY_TITLE: &str = "title";

/// Answer key holding the owner's name.
pub const ANSWER_KEY_OWNER: &str = "ownerName";

/// Answer key holding the category.
pub const ANSWER_KEY_CATEGORY: &str = "category";

/// Answer key holding the originating line of business.
pub const ANSWER_KEY_LINE_OF_BUSINESS: &str = "lineOfBusiness";

/// Bucket used in reports for initiatives with no line of business.
pub const UNKNOWN_LINE_OF_BUSINESS: &str = "Unknown";

// ---------------------------------------------------------------------------
// Status and category
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InitiativeStatus {
    Pending,
    Approved,
    Denied,
}

impl InitiativeStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Denied => "denied",
        }
    }

    /// Approved and denied are final.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// An approver's verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Approved,
    Denied,
}

impl From<Decision> for InitiativeStatus {
    fn from(decision: Decision) -> Self {
        match decision {
            Decision::Approved => Self::Approved,
            Decision::Denied => Self::Denied,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Mandatory,
    Discretionary,
    Regulatory,
}

impl Category {
    pub fn from_answer(s: &str) -> Result<Self, CoreError> {
        match s {
            "Mandatory" => Ok(Self::Mandatory),
            "Discretionary" => Ok(Self::Discretionary),
            "Regulatory" => Ok(Self::Regulatory),
            _ => Err(CoreError::Validation(format!(
                "Invalid category '{s}'. Must be one of: Mandatory, Discretionary, Regulatory"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Initiative
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Initiative {
    pub id: String,
    pub title: String,
    pub owner_name: String,
    pub category: Category,
    pub status: InitiativeStatus,
    pub submitted_by: String,
    pub submitted_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_of_business: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assessor_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assessed_at: Option<Timestamp>,
    /// Raw answers as captured by the dynamic form.
    pub answers: Answers,
}

impl Initiative {
    /// Validate `answers` against `config` and open a pending initiative.
    ///
    /// The title, owner and category are lifted from their well-known
    /// answer keys, which must be present. A config that reuses a field name
    /// across steps is a [`CoreError::Conflict`].
    pub fn submit(
        config: &FormConfig,
        answers: Answers,
        submitted_by: impl Into<String>,
    ) -> Result<Self, CoreError> {
        let shared = config.names_shared_across_steps();
        if !shared.is_empty() {
            return Err(CoreError::Conflict(format!(
                "Form '{}' uses field names in more than one step: {}",
                config.id,
                shared.join(", ")
            )));
        }

        let result = validate_submission(config, &answers);
        if let Some(message) = result.first_error() {
            return Err(CoreError::Validation(message.to_string()));
        }

        let title = answer_text(&answers, ANSWER_KEY_TITLE)?;
        let owner_name = answer_text(&answers, ANSWER_KEY_OWNER)?;
        let category = Category::from_answer(&answer_text(&answers, ANSWER_KEY_CATEGORY)?)?;
        let line_of_business = answers
            .get(ANSWER_KEY_LINE_OF_BUSINESS)
            .and_then(|v| v.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        let initiative = Self {
            id: new_entity_id(INITIATIVE_ID_PREFIX),
            title,
            owner_name,
            category,
            status: InitiativeStatus::Pending,
            submitted_by: submitted_by.into(),
            submitted_at: chrono::Utc::now(),
            line_of_business,
            assessor_name: None,
            assessed_at: None,
            answers,
        };
        tracing::info!(
            initiative_id = %initiative.id,
            submitted_by = %initiative.submitted_by,
            warnings = result.warnings.len(),
            "Initiative submitted",
        );
        Ok(initiative)
    }

    /// Record an approver's decision. Only pending initiatives can be decided.
    pub fn decide(&mut self, decision: Decision, assessor: &str) -> Result<(), CoreError> {
        if self.status.is_terminal() {
            return Err(CoreError::Conflict(format!(
                "Initiative '{}' is already {}",
                self.title,
                self.status.as_str()
            )));
        }
        if assessor.trim().is_empty() {
            return Err(CoreError::Validation(
                "Assessor name is required".to_string(),
            ));
        }
        self.status = decision.into();
        self.assessor_name = Some(assessor.trim().to_string());
        self.assessed_at = Some(chrono::Utc::now());
        tracing::info!(
            initiative_id = %self.id,
            status = self.status.as_str(),
            assessor,
            "Initiative decided",
        );
        Ok(())
    }
}

fn answer_text(answers: &Answers, key: &str) -> Result<String, CoreError> {
    answers
        .get(key)
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| CoreError::Validation(format!("Submission is missing '{key}'")))
}

// ---------------------------------------------------------------------------
// Dashboard queries
// ---------------------------------------------------------------------------

/// Dashboard filter; `None` means "all".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InitiativeFilter {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub status: Option<InitiativeStatus>,
    #[serde(default)]
    pub category: Option<Category>,
    /// Origin filter on the report view.
    #[serde(default)]
    pub line_of_business: Option<String>,
}

impl InitiativeFilter {
    /// Case-insensitive search over title, owner and submitter, combined
    /// with exact status, category and line-of-business matches.
    pub fn matches(&self, initiative: &Initiative) -> bool {
        let matches_search = match self.search.as_deref().map(str::to_lowercase) {
            Some(query) if !query.is_empty() => [
                &initiative.title,
                &initiative.owner_name,
                &initiative.submitted_by,
            ]
            .iter()
            .any(|text| text.to_lowercase().contains(&query)),
            _ => true,
        };
        let matches_status = self.status.map_or(true, |s| s == initiative.status);
        let matches_category = self.category.map_or(true, |c| c == initiative.category);
        let matches_origin = self
            .line_of_business
            .as_deref()
            .map_or(true, |lob| initiative.line_of_business.as_deref() == Some(lob));
        matches_search && matches_status && matches_category && matches_origin
    }

    pub fn apply<'a>(&self, initiatives: &'a [Initiative]) -> Vec<&'a Initiative> {
        initiatives.iter().filter(|i| self.matches(i)).collect()
    }
}

/// Per-status totals shown on the dashboard and in reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub denied: usize,
}

impl StatusCounts {
    pub fn tally<'a>(initiatives: impl IntoIterator<Item = &'a Initiative>) -> Self {
        let mut counts = Self::default();
        for initiative in initiatives {
            counts.record(initiative.status);
        }
        counts
    }

    /// Approved share of decided initiatives as a whole percent, rounded
    /// half up. 0 when nothing has been decided yet.
    pub fn approval_rate(&self) -> u32 {
        let decided = self.approved + self.denied;
        if decided == 0 {
            return 0;
        }
        let rate = (self.approved * 200 + decided) / (decided * 2);
        u32::try_from(rate).unwrap_or(100)
    }

    fn record(&mut self, status: InitiativeStatus) {
        self.total += 1;
        match status {
            InitiativeStatus::Pending => self.pending += 1,
            InitiativeStatus::Approved => self.approved += 1,
            InitiativeStatus::Denied => self.denied += 1,
        }
    }
}

/// Per-category totals for the report's category breakdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCounts {
    pub mandatory: usize,
    pub discretionary: usize,
    pub regulatory: usize,
}

impl CategoryCounts {
    pub fn tally<'a>(initiatives: impl IntoIterator<Item = &'a Initiative>) -> Self {
        let mut counts = Self::default();
        for initiative in initiatives {
            match initiative.category {
                Category::Mandatory => counts.mandatory += 1,
                Category::Discretionary => counts.discretionary += 1,
                Category::Regulatory => counts.regulatory += 1,
            }
        }
        counts
    }
}

/// Status totals bucketed by line of business, sorted by bucket name.
pub fn counts_by_line_of_business<'a>(
    initiatives: impl IntoIterator<Item = &'a Initiative>,
) -> BTreeMap<String, StatusCounts> {
    let mut buckets: BTreeMap<String, StatusCounts> = BTreeMap::new();
    for initiative in initiatives {
        let key = initiative
            .line_of_business
            .clone()
            .unwrap_or_else(|| UNKNOWN_LINE_OF_BUSINESS.to_string());
        buckets.entry(key).or_default().record(initiative.status);
    }
    buckets
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
