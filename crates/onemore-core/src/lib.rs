//! Shared domain for the one-more service.
//!
//! - [`content`]: the wire shape of a displayed item and its kinds.
//! - [`selection`]: weighted random choice over approved catalog entries.
//! - [`submission`]: validation of user-submitted text.
//!
//! Both the HTTP server and the client view depend on this crate so that the
//! JSON contract between them is defined in exactly one place.

pub mod content;
pub mod selection;
pub mod submission;

pub use content::{ContentItem, ContentKind};
pub use selection::{Candidate, choose, pick_with_draw};
pub use submission::{MAX_SUBMISSION_CHARS, Submission, SubmissionError, SubmissionText};
