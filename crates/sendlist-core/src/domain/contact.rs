use crate::domain::ids::ContactId;
use crate::domain::owner::OwnerName;
use crate::domain::phone::normalize_phone;
use crate::error::CoreError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub owner: OwnerName,
    /// Stored in normalized form so it can be matched against send lists.
    pub phone: String,
    pub display_name: Option<String>,
    pub created_at: i64,
}

impl Contact {
    /// Normalizes a phone for storage, rejecting values the normalizer cannot read.
    pub fn phone_for_storage(
        raw: &str,
        default_country_code: Option<&str>,
    ) -> Result<String, CoreError> {
        normalize_phone(raw.trim(), default_country_code)
            .ok_or_else(|| CoreError::UnparseablePhone(raw.to_string()))
    }
}
