// Job records: the normalized posting type and the sources that produce it.
// Browser scraping lives outside this crate; sources here read already-scraped records.

pub mod posting;
pub mod source;

pub use posting::JobPosting;
pub use source::{JobSource, JsonFileSource};
