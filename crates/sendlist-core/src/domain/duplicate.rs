use serde::{Deserialize, Serialize};

/// Why a raw recipient was left out of the final send list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateReason {
    DuplicateInUpload,
    DuplicateExistingContact,
    Unparseable,
    /// Reserved; the deduplicator does not emit it.
    SameAsAnotherNormalized,
}

impl DuplicateReason {
    pub const fn as_str(self) -> &'static str {
        match self {
            DuplicateReason::DuplicateInUpload => "duplicate_in_upload",
            DuplicateReason::DuplicateExistingContact => "duplicate_existing_contact",
            DuplicateReason::Unparseable => "unparseable",
            DuplicateReason::SameAsAnotherNormalized => "same_as_another_normalized",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "duplicate_in_upload" => Some(DuplicateReason::DuplicateInUpload),
            "duplicate_existing_contact" => Some(DuplicateReason::DuplicateExistingContact),
            "unparseable" => Some(DuplicateReason::Unparseable),
            "same_as_another_normalized" => Some(DuplicateReason::SameAsAnotherNormalized),
            _ => None,
        }
    }

    pub const fn all() -> &'static [DuplicateReason] {
        &[
            DuplicateReason::DuplicateInUpload,
            DuplicateReason::DuplicateExistingContact,
            DuplicateReason::Unparseable,
            DuplicateReason::SameAsAnotherNormalized,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateRecord {
    pub raw: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normalized: Option<String>,
    pub reason: DuplicateReason,
}

impl DuplicateRecord {
    pub fn unparseable(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            normalized: None,
            reason: DuplicateReason::Unparseable,
        }
    }

    pub fn collision(raw: impl Into<String>, normalized: String, reason: DuplicateReason) -> Self {
        Self {
            raw: raw.into(),
            normalized: Some(normalized),
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DuplicateReason, DuplicateRecord};

    #[test]
    fn parse_round_trip() {
        for reason in DuplicateReason::all() {
            let value = reason.as_str();
            let parsed = DuplicateReason::parse(value).expect("parse reason");
            assert_eq!(*reason, parsed);
        }
    }

    #[test]
    fn parse_unknown_returns_none() {
        assert!(DuplicateReason::parse("duplicate").is_none());
    }

    #[test]
    fn serde_names_match_wire_names() {
        for reason in DuplicateReason::all() {
            let json = serde_json::to_value(reason).expect("serialize");
            assert_eq!(json, reason.as_str());
        }
    }

    #[test]
    fn unparseable_record_omits_normalized() {
        let json = serde_json::to_value(DuplicateRecord::unparseable("abc")).expect("serialize");
        assert_eq!(json, serde_json::json!({ "raw": "abc", "reason": "unparseable" }));
    }
}
