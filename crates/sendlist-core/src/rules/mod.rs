pub mod dedupe;
pub mod preview;

pub use dedupe::{dedupe_recipients, DedupeResult, DedupeSummary};
pub use preview::compose_preview;
