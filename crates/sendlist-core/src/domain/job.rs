use crate::domain::duplicate::DuplicateRecord;
use crate::domain::ids::{DedupeJobId, TemplateId};
use crate::domain::owner::OwnerName;
use serde::{Deserialize, Serialize};

/// The raw entry that first produced a normalized recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceptedRecipient {
    /// Position of the entry in the submitted batch.
    pub index: usize,
    pub raw: String,
    pub normalized: String,
}

/// Audit record of one dedupe run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DedupeJob {
    pub id: DedupeJobId,
    pub owner: OwnerName,
    pub template_id: Option<TemplateId>,
    pub default_country_code: Option<String>,
    pub message_preview: String,
    pub recipients: Vec<AcceptedRecipient>,
    pub duplicates: Vec<DuplicateRecord>,
    pub created_at: i64,
}

/// One submitted entry of a job, in batch order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobEntry<'a> {
    Accepted(&'a AcceptedRecipient),
    Rejected(&'a DuplicateRecord),
}

impl DedupeJob {
    pub fn recipients_final(&self) -> Vec<String> {
        self.recipients
            .iter()
            .map(|recipient| recipient.normalized.clone())
            .collect()
    }

    /// Rebuilds the submitted batch. Every entry that was not accepted was
    /// rejected, so duplicates fill the positions accepted entries leave open.
    pub fn entries(&self) -> Vec<JobEntry<'_>> {
        let total = self.recipients.len() + self.duplicates.len();
        let mut accepted = self.recipients.iter().peekable();
        let mut rejected = self.duplicates.iter();
        let mut entries = Vec::with_capacity(total);
        for position in 0..total {
            if let Some(recipient) = accepted.next_if(|recipient| recipient.index == position) {
                entries.push(JobEntry::Accepted(recipient));
            } else if let Some(record) = rejected.next() {
                entries.push(JobEntry::Rejected(record));
            }
        }
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::{AcceptedRecipient, DedupeJob, JobEntry};
    use crate::domain::{DedupeJobId, DuplicateReason, DuplicateRecord, OwnerName};

    fn accepted(index: usize, raw: &str, normalized: &str) -> AcceptedRecipient {
        AcceptedRecipient {
            index,
            raw: raw.to_string(),
            normalized: normalized.to_string(),
        }
    }

    #[test]
    fn entries_interleave_in_batch_order() {
        let job = DedupeJob {
            id: DedupeJobId::new(),
            owner: OwnerName::new("acme").unwrap(),
            template_id: None,
            default_country_code: None,
            message_preview: "hi".to_string(),
            recipients: vec![accepted(1, "0300 1", "+923001"), accepted(3, "+1 2", "+12")],
            duplicates: vec![
                DuplicateRecord::unparseable("x"),
                DuplicateRecord::collision(
                    "0300-1",
                    "+923001".to_string(),
                    DuplicateReason::DuplicateInUpload,
                ),
            ],
            created_at: 0,
        };

        let raws: Vec<&str> = job
            .entries()
            .into_iter()
            .map(|entry| match entry {
                JobEntry::Accepted(recipient) => recipient.raw.as_str(),
                JobEntry::Rejected(record) => record.raw.as_str(),
            })
            .collect();
        assert_eq!(raws, vec!["x", "0300 1", "0300-1", "+1 2"]);
    }
}
