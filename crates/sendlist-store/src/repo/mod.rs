pub mod contacts;
pub mod dedupe_jobs;
pub mod owners;
pub mod templates;

pub use contacts::{ContactNew, ContactsRepo};
pub use dedupe_jobs::{DedupeJobListItem, DedupeJobNew, DedupeJobsRepo};
pub use owners::OwnersRepo;
pub use templates::{TemplateNew, TemplatesRepo};
