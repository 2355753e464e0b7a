use crate::domain::{normalize_phone, AcceptedRecipient, DuplicateReason, DuplicateRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DedupeResult {
    /// Distinct normalized recipients in first-seen order.
    pub recipients_final: Vec<String>,
    /// One record per rejected raw entry, in input order.
    pub duplicates: Vec<DuplicateRecord>,
    #[serde(skip)]
    pub accepted: Vec<AcceptedRecipient>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DedupeSummary {
    pub total: usize,
    pub accepted: usize,
    pub duplicate_in_upload: usize,
    pub duplicate_existing_contact: usize,
    pub unparseable: usize,
    pub same_as_another_normalized: usize,
}

impl DedupeSummary {
    pub fn tally(accepted: usize, duplicates: &[DuplicateRecord]) -> Self {
        let mut summary = DedupeSummary {
            total: accepted + duplicates.len(),
            accepted,
            ..DedupeSummary::default()
        };
        for record in duplicates {
            let slot = match record.reason {
                DuplicateReason::DuplicateInUpload => &mut summary.duplicate_in_upload,
                DuplicateReason::DuplicateExistingContact => {
                    &mut summary.duplicate_existing_contact
                }
                DuplicateReason::Unparseable => &mut summary.unparseable,
                DuplicateReason::SameAsAnotherNormalized => {
                    &mut summary.same_as_another_normalized
                }
            };
            *slot += 1;
        }
        summary
    }
}

/// Builds the send list for a batch of raw recipients.
///
/// Entries are classified in input order. A normalized value that belongs to
/// `existing_contacts` is always reported against the contact, even when it
/// also repeats inside the batch. Malformed entries become
/// [`DuplicateReason::Unparseable`] records; this never fails.
pub fn dedupe_recipients<R, E>(
    raw_list: &[R],
    existing_contacts: &[E],
    default_country_code: Option<&str>,
) -> DedupeResult
where
    R: AsRef<str>,
    E: AsRef<str>,
{
    let existing: HashSet<&str> = existing_contacts
        .iter()
        .map(|contact| contact.as_ref())
        .collect();
    let mut seen: HashSet<String> = HashSet::new();
    let mut result = DedupeResult::default();

    for (index, raw) in raw_list.iter().enumerate() {
        let raw = raw.as_ref();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            result.duplicates.push(DuplicateRecord::unparseable(raw));
            continue;
        }

        let Some(normalized) = normalize_phone(trimmed, default_country_code) else {
            result.duplicates.push(DuplicateRecord::unparseable(raw));
            continue;
        };

        if existing.contains(normalized.as_str()) {
            result.duplicates.push(DuplicateRecord::collision(
                raw,
                normalized,
                DuplicateReason::DuplicateExistingContact,
            ));
            continue;
        }

        if seen.contains(&normalized) {
            result.duplicates.push(DuplicateRecord::collision(
                raw,
                normalized,
                DuplicateReason::DuplicateInUpload,
            ));
            continue;
        }

        seen.insert(normalized.clone());
        result.recipients_final.push(normalized.clone());
        result.accepted.push(AcceptedRecipient {
            index,
            raw: raw.to_string(),
            normalized,
        });
    }

    result
}

#[cfg(test)]
mod tests {
    use super::{dedupe_recipients, DedupeSummary};
    use crate::domain::{DuplicateReason, DuplicateRecord};
    use std::collections::HashSet;

    const NONE: &[&str] = &[];

    #[test]
    fn dedupe_normalizes_with_trunk_prefix() {
        let result = dedupe_recipients(&["0300-1234567"], NONE, Some("+92"));
        assert_eq!(result.recipients_final, vec!["+923001234567"]);
        assert!(result.duplicates.is_empty());
    }

    #[test]
    fn dedupe_keeps_distinct_forms_and_drops_repeats() {
        let raw = ["+923001234567", "923001234567", "00923001234567"];
        let result = dedupe_recipients(&raw, NONE, None);
        assert_eq!(result.recipients_final, vec!["+923001234567", "923001234567"]);
        assert_eq!(
            result.duplicates,
            vec![DuplicateRecord {
                raw: "00923001234567".to_string(),
                normalized: Some("+923001234567".to_string()),
                reason: DuplicateReason::DuplicateInUpload,
            }]
        );
    }

    #[test]
    fn dedupe_reports_unparseable_entries() {
        let result = dedupe_recipients(&["abc", ""], NONE, Some("+1"));
        assert!(result.recipients_final.is_empty());
        assert_eq!(
            result.duplicates,
            vec![
                DuplicateRecord::unparseable("abc"),
                DuplicateRecord::unparseable(""),
            ]
        );
    }

    #[test]
    fn dedupe_whitespace_only_is_unparseable_and_keeps_raw() {
        let result = dedupe_recipients(&["   "], NONE, None);
        assert_eq!(result.duplicates, vec![DuplicateRecord::unparseable("   ")]);
    }

    #[test]
    fn dedupe_treats_lone_plus_as_a_value() {
        let result = dedupe_recipients(&["+", "00"], NONE, None);
        assert_eq!(result.recipients_final, vec!["+"]);
        assert_eq!(
            result.duplicates,
            vec![DuplicateRecord {
                raw: "00".to_string(),
                normalized: Some("+".to_string()),
                reason: DuplicateReason::DuplicateInUpload,
            }]
        );
    }

    #[test]
    fn dedupe_reports_existing_contacts() {
        let result = dedupe_recipients(&["+14155551234"], &["+14155551234"], None);
        assert!(result.recipients_final.is_empty());
        assert_eq!(
            result.duplicates,
            vec![DuplicateRecord {
                raw: "+14155551234".to_string(),
                normalized: Some("+14155551234".to_string()),
                reason: DuplicateReason::DuplicateExistingContact,
            }]
        );
    }

    #[test]
    fn dedupe_existing_contact_wins_over_in_batch_repeat() {
        let raw = ["+14155551234", "(415) 555-1234", "+1 415 555 1234"];
        let result = dedupe_recipients(&raw, &["+14155551234"], Some("+1"));
        assert!(result.recipients_final.is_empty());
        assert_eq!(result.duplicates.len(), 3);
        assert!(result
            .duplicates
            .iter()
            .all(|record| record.reason == DuplicateReason::DuplicateExistingContact));
    }

    #[test]
    fn dedupe_keeps_first_seen_order() {
        let raw = ["0333 0000003", "0311 0000001", "0333-0000003", "0322 0000002"];
        let result = dedupe_recipients(&raw, NONE, Some("+92"));
        assert_eq!(
            result.recipients_final,
            vec!["+923330000003", "+923110000001", "+923220000002"]
        );
        assert_eq!(result.duplicates.len(), 1);
        assert_eq!(result.duplicates[0].raw, "0333-0000003");
        assert_eq!(result.accepted[0].raw, "0333 0000003");
        let indexes: Vec<usize> = result.accepted.iter().map(|r| r.index).collect();
        assert_eq!(indexes, vec![0, 1, 3]);
    }

    #[test]
    fn dedupe_accounts_for_every_entry() {
        let raw = [
            "0300-1234567",
            "+923001234567",
            "",
            "hello",
            "+14155551234",
            "00 44 20 7946 0958",
            "+44 20 7946 0958",
            "0300 7654321",
        ];
        let existing = ["+14155551234"];
        let result = dedupe_recipients(&raw, &existing, Some("+92"));

        assert_eq!(
            result.accepted.len() + result.duplicates.len(),
            raw.len()
        );
        assert_eq!(result.accepted.len(), result.recipients_final.len());

        let unique: HashSet<&String> = result.recipients_final.iter().collect();
        assert_eq!(unique.len(), result.recipients_final.len());
        for value in &result.recipients_final {
            assert!(!existing.contains(&value.as_str()));
        }

        let summary = DedupeSummary::tally(result.recipients_final.len(), &result.duplicates);
        assert_eq!(summary.total, raw.len());
        assert_eq!(summary.accepted, 3);
        assert_eq!(summary.duplicate_in_upload, 2);
        assert_eq!(summary.duplicate_existing_contact, 1);
        assert_eq!(summary.unparseable, 2);
        assert_eq!(summary.same_as_another_normalized, 0);
    }

    #[test]
    fn dedupe_is_deterministic() {
        let raw = ["b", "0300 1", "+1 2", "0300 1", "", "+1 2"];
        let first = dedupe_recipients(&raw, &["+12"], Some("+92"));
        let second = dedupe_recipients(&raw, &["+12"], Some("+92"));
        assert_eq!(first, second);
    }

    #[test]
    fn dedupe_accepts_owned_strings() {
        let raw = vec![String::from("+1 415 555 1234")];
        let existing: Vec<String> = Vec::new();
        let result = dedupe_recipients(&raw, &existing, None);
        assert_eq!(result.recipients_final, vec!["+14155551234".to_string()]);
    }
}
