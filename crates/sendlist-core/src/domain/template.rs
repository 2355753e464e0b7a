use crate::domain::ids::TemplateId;
use crate::error::CoreError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageTemplate {
    pub id: TemplateId,
    pub name: String,
    pub content: String,
    pub active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

pub fn validate_template_fields(name: &str, content: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::EmptyTemplateName);
    }
    if content.trim().is_empty() {
        return Err(CoreError::EmptyTemplateContent);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::validate_template_fields;
    use crate::error::CoreError;

    #[test]
    fn template_requires_name_and_content() {
        assert_eq!(
            validate_template_fields(" ", "hi"),
            Err(CoreError::EmptyTemplateName)
        );
        assert_eq!(
            validate_template_fields("welcome", ""),
            Err(CoreError::EmptyTemplateContent)
        );
        assert!(validate_template_fields("welcome", "Hello {name}").is_ok());
    }
}
