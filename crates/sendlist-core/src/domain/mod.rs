pub mod contact;
pub mod duplicate;
pub mod ids;
pub mod job;
pub mod owner;
pub mod phone;
pub mod template;

pub use contact::Contact;
pub use duplicate::{DuplicateReason, DuplicateRecord};
pub use ids::{ContactId, DedupeJobId, TemplateId};
pub use job::{AcceptedRecipient, DedupeJob, JobEntry};
pub use owner::OwnerName;
pub use phone::{normalize_phone, parse_country_code};
pub use template::{validate_template_fields, MessageTemplate};
