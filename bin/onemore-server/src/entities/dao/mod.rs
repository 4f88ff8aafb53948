pub mod content;
pub mod submission;

pub use content::ContentRecord;
pub use submission::SubmissionRecord;
