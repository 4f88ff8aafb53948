//! Client side of one-more: a headless view model plus the pieces it is
//! built from.
//!
//! - [`source`]: where items come from ([`ContentSource`], HTTP by default).
//! - [`prefetch`]: the single-slot buffer filled ahead of user action.
//! - [`milestones`]: scripted messages keyed by interaction count.
//! - [`session`] / [`storage`]: click count and last visit, persisted
//!   through an injected key-value adapter.
//! - [`viewer`]: the state machine tying it together.
//!
//! Rendering is left to the caller; the terminal front-end in
//! `onemore-viewer` is one such caller.

pub mod error;
pub mod milestones;
pub mod prefetch;
pub mod session;
pub mod source;
pub mod storage;
pub mod viewer;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{ClientError, StorageError};
pub use milestones::Milestones;
pub use prefetch::Prefetcher;
pub use session::SessionState;
pub use source::{ContentSource, HttpContentSource};
pub use storage::{FileStorage, MemoryStorage, SessionStorage};
pub use viewer::{Advance, DEFAULT_FADE, FormState, Mode, Phase, Viewer, ViewerOptions};
