//! Headless view: what is on screen, what comes next, and the submission
//! form.
//!
//! A front-end drives it by calling [`Viewer::advance`] (or the split
//! [`Viewer::start_advance`] / [`Viewer::complete_transition`] pair when it
//! animates the fade itself) and rendering [`Viewer::text`].

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use onemore_core::{ContentItem, ContentKind, MAX_SUBMISSION_CHARS, SubmissionText};
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::error::{ClientError, StorageError};
use crate::milestones::Milestones;
use crate::prefetch::Prefetcher;
use crate::session::SessionState;
use crate::source::ContentSource;
use crate::storage::SessionStorage;

pub const DEFAULT_FADE: Duration = Duration::from_millis(200);
/// How long the "sent" acknowledgement stays up before the form closes.
pub const SUCCESS_LINGER: Duration = Duration::from_millis(1500);
/// Rendered while nothing has been shown yet.
pub const PLACEHOLDER: &str = "...";

#[derive(Debug, Clone)]
pub struct ViewerOptions {
    pub fade: Duration,
    pub success_linger: Duration,
    /// `None` turns milestone injection off.
    pub milestones: Option<Milestones>,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            fade: DEFAULT_FADE,
            success_linger: SUCCESS_LINGER,
            milestones: Some(Milestones::standard()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Fading,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Submitting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState {
    Idle,
    Loading,
    Success,
    Error(String),
}

/// Outcome of an advance request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// A catalog item from the buffer is now showing.
    Shown,
    /// A milestone message is now showing; the buffer was left alone.
    Milestone,
    /// Nothing buffered yet. Nothing changed.
    NotReady,
    /// Submitting, or a transition is already running. Nothing changed.
    Blocked,
}

pub struct Viewer<S, K> {
    source: Arc<S>,
    storage: K,
    prefetcher: Prefetcher<S>,
    options: ViewerOptions,
    session: SessionState,
    current: Option<ContentItem>,
    /// Id of the last catalog item shown; sent as `exclude`.
    anchor: Option<String>,
    incoming: Option<(ContentItem, bool)>,
    /// End of the running fade. Past it the transition may be finished by
    /// whoever touches the view next.
    fade_until: Option<Instant>,
    phase: Phase,
    mode: Mode,
    form: FormState,
    draft: String,
}

impl<S: ContentSource, K: SessionStorage> Viewer<S, K> {
    pub fn new(
        source: Arc<S>,
        storage: K,
        initial: Option<ContentItem>,
        options: ViewerOptions,
    ) -> Self {
        let anchor = initial
            .as_ref()
            .filter(|item| item.kind != ContentKind::Meta)
            .map(|item| item.id.clone());
        Self {
            prefetcher: Prefetcher::new(Arc::clone(&source)),
            source,
            storage,
            options,
            session: SessionState::default(),
            current: initial,
            anchor,
            incoming: None,
            fade_until: None,
            phase: Phase::Idle,
            mode: Mode::Normal,
            form: FormState::Idle,
            draft: String::new(),
        }
    }

    /// Restore the persisted session and start the first prefetch.
    pub fn mount(&mut self, now: DateTime<Utc>) -> Result<(), StorageError> {
        self.session = SessionState::restore(&mut self.storage, now)?;
        if self.session.returning {
            info!(clicks = self.session.clicks, "welcome back");
        }
        self.prefetcher.request(self.anchor.clone());
        Ok(())
    }

    /// Advance to the next item, running the fade transition.
    ///
    /// Dropping the future mid-fade leaves the transition to be finished by
    /// the next call once the fade would have ended.
    pub async fn advance(&mut self, now: DateTime<Utc>) -> Result<Advance, StorageError> {
        let outcome = self.start_advance(now)?;
        if matches!(outcome, Advance::Shown | Advance::Milestone) {
            if let Some(deadline) = self.fade_until {
                tokio::time::sleep_until(deadline).await;
            }
            self.complete_transition();
        }
        Ok(outcome)
    }

    /// Finish a transition whose fade has already run out.
    pub fn settle(&mut self) {
        if self.phase == Phase::Fading && self.fade_until.is_some_and(|t| t <= Instant::now()) {
            debug!("finishing an abandoned transition");
            self.complete_transition();
        }
    }

    /// First half of an advance: pick the next item, persist the
    /// interaction and enter [`Phase::Fading`]. The old item stays on screen
    /// until [`Viewer::complete_transition`].
    pub fn start_advance(&mut self, now: DateTime<Utc>) -> Result<Advance, StorageError> {
        self.settle();
        if self.mode != Mode::Normal || self.phase == Phase::Fading {
            return Ok(Advance::Blocked);
        }

        let count = self.session.clicks + 1;
        let milestone = self
            .options
            .milestones
            .as_ref()
            .and_then(|m| m.get(count))
            .cloned();
        let (next, outcome) = match milestone {
            Some(item) => (item, Advance::Milestone),
            None => match self.prefetcher.peek() {
                Some(item) => (item, Advance::Shown),
                None => {
                    debug!(count, "advance before the next item arrived");
                    return Ok(Advance::NotReady);
                }
            },
        };

        self.session
            .record_interaction(&mut self.storage, count, now)?;
        if outcome == Advance::Shown {
            self.prefetcher.take();
        }
        debug!(count, id = %next.id, "advancing");
        self.incoming = Some((next, outcome == Advance::Shown));
        self.fade_until = Some(Instant::now() + self.options.fade);
        self.phase = Phase::Fading;
        Ok(outcome)
    }

    /// Second half of an advance: swap in the pending item and refill the
    /// buffer if it was consumed. No-op unless fading.
    pub fn complete_transition(&mut self) {
        if self.phase != Phase::Fading {
            return;
        }
        self.phase = Phase::Idle;
        self.fade_until = None;
        let Some((next, from_buffer)) = self.incoming.take() else {
            return;
        };

        if from_buffer {
            self.anchor = Some(next.id.clone());
            self.current = Some(next);
            self.prefetcher.request(self.anchor.clone());
        } else {
            self.current = Some(next);
            if !self.prefetcher.is_ready() && !self.prefetcher.is_pending() {
                self.prefetcher.request(self.anchor.clone());
            }
        }
    }

    /// Switch to the submission form. Ignored mid-transition.
    pub fn open_form(&mut self) -> bool {
        self.settle();
        if self.mode != Mode::Normal || self.phase == Phase::Fading {
            return false;
        }
        self.mode = Mode::Submitting;
        self.form = FormState::Idle;
        true
    }

    /// Leave the form and discard the draft.
    pub fn cancel_form(&mut self) {
        self.mode = Mode::Normal;
        self.form = FormState::Idle;
        self.draft.clear();
    }

    /// Replace the draft, keeping at most the first 280 characters.
    pub fn set_draft(&mut self, text: &str) {
        self.draft = text.chars().take(MAX_SUBMISSION_CHARS).collect();
    }

    /// Send the draft. Invalid drafts are rejected locally without a
    /// request. Returns the resulting form state.
    pub async fn submit(&mut self) -> &FormState {
        // `Loading` here means an earlier submit was dropped mid-request.
        if self.mode != Mode::Submitting || self.form == FormState::Success {
            return &self.form;
        }

        let text = match SubmissionText::parse(&self.draft) {
            Ok(text) => text,
            Err(e) => {
                self.form = FormState::Error(e.to_string());
                return &self.form;
            }
        };

        self.form = FormState::Loading;
        self.form = match self.source.submit(text.as_str()).await {
            Ok(()) => {
                info!(chars = text.as_str().chars().count(), "submission sent");
                FormState::Success
            }
            Err(e) => {
                warn!(error = %e, "submission failed");
                FormState::Error(form_message(&e))
            }
        };
        &self.form
    }

    /// After a successful submission, hold the acknowledgement for
    /// `success_linger` and return to normal mode.
    pub async fn dismiss_after_success(&mut self) {
        if self.form != FormState::Success {
            return;
        }
        tokio::time::sleep(self.options.success_linger).await;
        self.cancel_form();
    }
}

impl<S, K> Viewer<S, K> {
    pub fn text(&self) -> &str {
        self.current
            .as_ref()
            .map_or(PLACEHOLDER, |item| item.text.as_str())
    }

    pub fn current(&self) -> Option<&ContentItem> {
        self.current.as_ref()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn is_buffered(&self) -> bool {
        self.prefetcher.is_ready()
    }

    pub fn storage(&self) -> &K {
        &self.storage
    }
}

fn form_message(err: &ClientError) -> String {
    match err {
        ClientError::Status { message, .. } if !message.is_empty() => message.clone(),
        ClientError::Invalid(e) => e.to_string(),
        _ => "could not send, try again".to_string(),
    }
}
