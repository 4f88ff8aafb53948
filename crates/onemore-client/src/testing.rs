//! Scripted [`ContentSource`] for unit tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use onemore_core::{ContentItem, ContentKind};

use crate::error::ClientError;
use crate::source::ContentSource;

pub(crate) enum Reply {
    After(Duration, ContentItem),
    Fail,
    Hang,
}

type Script = Box<dyn Fn(Option<&str>) -> Reply + Send + Sync>;

pub(crate) struct FakeSource {
    script: Script,
    fail_submit: bool,
    fetches: Mutex<Vec<Option<String>>>,
    submissions: Mutex<Vec<String>>,
}

pub(crate) fn item(id: &str) -> ContentItem {
    ContentItem::new(id, format!("text {id}"), ContentKind::Thought)
}

impl FakeSource {
    pub(crate) fn new(script: impl Fn(Option<&str>) -> Reply + Send + Sync + 'static) -> Self {
        Self {
            script: Box::new(script),
            fail_submit: false,
            fetches: Mutex::new(Vec::new()),
            submissions: Mutex::new(Vec::new()),
        }
    }

    /// Answers `c1`, `c2`, ... each after `delay`.
    pub(crate) fn counting(delay: Duration) -> Self {
        let next = AtomicUsize::new(0);
        Self::new(move |_| {
            let n = next.fetch_add(1, Ordering::SeqCst) + 1;
            Reply::After(delay, item(&format!("c{n}")))
        })
    }

    pub(crate) fn failing_submit(mut self) -> Self {
        self.fail_submit = true;
        self
    }

    pub(crate) fn fetches(&self) -> Vec<Option<String>> {
        self.fetches.lock().unwrap().clone()
    }

    pub(crate) fn submissions(&self) -> Vec<String> {
        self.submissions.lock().unwrap().clone()
    }
}

impl ContentSource for FakeSource {
    async fn fetch_one(&self, exclude: Option<&str>) -> Result<ContentItem, ClientError> {
        self.fetches.lock().unwrap().push(exclude.map(str::to_owned));
        let reply = (self.script)(exclude);
        match reply {
            Reply::After(delay, item) => {
                tokio::time::sleep(delay).await;
                Ok(item)
            }
            Reply::Fail => Err(ClientError::Status {
                status: 500,
                message: "internal server error".into(),
            }),
            Reply::Hang => std::future::pending().await,
        }
    }

    async fn submit(&self, text: &str) -> Result<(), ClientError> {
        self.submissions.lock().unwrap().push(text.to_owned());
        if self.fail_submit {
            return Err(ClientError::Status {
                status: 500,
                message: "internal server error".into(),
            });
        }
        Ok(())
    }
}
