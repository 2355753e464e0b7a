use crate::domain::{AcceptedRecipient, DuplicateRecord};
use crate::error::CoreError;
use crate::rules::{compose_preview, dedupe_recipients, DedupeResult, DedupeSummary};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DedupeRequest {
    pub recipients_raw: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_country_code: Option<String>,
    #[serde(default)]
    pub existing_contacts_e164: Vec<String>,
}

impl DedupeRequest {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.recipients_raw.is_empty() {
            return Err(CoreError::EmptyRecipients);
        }
        Ok(())
    }

    pub fn dedupe(&self) -> Result<DedupeResult, CoreError> {
        self.validate()?;
        Ok(dedupe_recipients(
            &self.recipients_raw,
            &self.existing_contacts_e164,
            self.default_country_code.as_deref(),
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DedupeResponse {
    pub recipients_final: Vec<String>,
    pub duplicates: Vec<DuplicateRecord>,
    pub message_preview: String,
    /// Raw entries behind `recipients_final`, kept for the audit record.
    #[serde(skip)]
    pub accepted: Vec<AcceptedRecipient>,
}

impl DedupeResponse {
    pub fn new(result: DedupeResult, message_preview: String) -> Self {
        Self {
            recipients_final: result.recipients_final,
            duplicates: result.duplicates,
            message_preview,
            accepted: result.accepted,
        }
    }

    pub fn summary(&self) -> DedupeSummary {
        DedupeSummary::tally(self.recipients_final.len(), &self.duplicates)
    }
}

/// Validates the request, dedupes its recipients and resolves the preview.
pub fn process_request(
    request: &DedupeRequest,
    template_content: &str,
    override_text: Option<&str>,
) -> Result<DedupeResponse, CoreError> {
    let result = request.dedupe()?;
    let preview = compose_preview(template_content, override_text);
    Ok(DedupeResponse::new(result, preview))
}
