use uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Identifier prefix for generated steps.
pub const STEP_ID_PREFIX: &str = "step";

/// Identifier prefix for generated fields.
pub const FIELD_ID_PREFIX: &str = "field";

/// Identifier prefix for generated initiatives.
pub const INITIATIVE_ID_PREFIX: &str = "initiative";

/// Generate a fresh entity identifier of the form `{prefix}-{uuid}`.
///
/// UUID v7 is time-ordered, so ids sort by creation time, and it stays
/// unique when several entities are created within the same millisecond.
pub fn new_entity_id(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::now_v7())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_id_carries_prefix() {
        let id = new_entity_id(STEP_ID_PREFIX);
        assert!(id.starts_with("step-"));
        assert_eq!(id.len(), "step-".len() + 36);
    }

    #[test]
    fn rapid_ids_are_distinct() {
        let ids: Vec<String> = (0..100).map(|_| new_entity_id(FIELD_ID_PREFIX)).collect();
        let mut deduped = ids.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), ids.len());
    }
}
