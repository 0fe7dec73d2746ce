use crate::jobs::JobPosting;
use crate::models::content::GeneratedContent;

/// Ordered message segments for one qualified job: summary, resume suggestions,
/// cover letter. Each segment is delivered as its own chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationBundle {
    pub job_url: String,
    pub segments: Vec<String>,
}

impl NotificationBundle {
    pub fn new(job: &JobPosting, content: &GeneratedContent) -> Self {
        let summary = format!(
            "New Qualified Job Found!\n\nTitle: {}\nCompany: {}\nLocation: {}\nURL: {}",
            job.title, job.company, job.location, job.url
        );
        let suggestions = format!(
            "Resume Suggestions for {}:\n\n{}",
            job.title, content.resume_suggestions
        );
        let cover_letter = format!(
            "Cover Letter for {} at {}:\n\n{}",
            job.title, job.company, content.cover_letter
        );

        Self {
            job_url: job.url.clone(),
            segments: vec![summary, suggestions, cover_letter],
        }
    }
}
