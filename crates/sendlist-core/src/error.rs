use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("recipients list is empty")]
    EmptyRecipients,
    #[error("invalid country code: {0}")]
    InvalidCountryCode(String),
    #[error("owner name is required")]
    EmptyOwner,
    #[error("template name is required")]
    EmptyTemplateName,
    #[error("template content is required")]
    EmptyTemplateContent,
    #[error("unparseable phone number: {0}")]
    UnparseablePhone(String),
}
