pub mod bundle;
pub mod candidate;
pub mod content;

pub use bundle::NotificationBundle;
pub use candidate::CandidateProfile;
pub use content::{GeneratedContent, GenerationAttempt, ReviewVerdict};
