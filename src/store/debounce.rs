//! Trailing-edge debounce on the tokio timer.
//!
//! Each pushed value restarts the window. Only the value pushed last before
//! a quiet period of `delay` is delivered on the receiver.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::domain::filter::clip_search;

/// Quiet period before typed search text is committed.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    tx: mpsc::UnboundedSender<T>,
    pending: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new(delay: Duration) -> (Self, mpsc::UnboundedReceiver<T>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let debouncer = Self {
            delay,
            tx,
            pending: None,
        };
        (debouncer, rx)
    }

    /// Schedules `value`, superseding any pending one.
    pub fn push(&mut self, value: T) {
        self.cancel();
        let tx = self.tx.clone();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // The receiver may already be gone when the owner was dropped.
            let _ = tx.send(value);
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

/// Free-text search box: the draft follows every keystroke, commits follow
/// the debounce.
#[derive(Debug)]
pub struct SearchInput {
    draft: String,
    generation: u64,
    debouncer: Debouncer<(u64, String)>,
    commits: mpsc::UnboundedReceiver<(u64, String)>,
}

impl SearchInput {
    pub fn new(initial: &str, delay: Duration) -> Self {
        let (debouncer, commits) = Debouncer::new(delay);
        Self {
            draft: clip_search(initial),
            generation: 0,
            debouncer,
            commits,
        }
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn on_input(&mut self, text: &str) {
        self.draft = clip_search(text);
        self.generation += 1;
        self.debouncer.push((self.generation, self.draft.clone()));
    }

    /// Replaces the draft without committing and drops any pending commit.
    pub fn reset(&mut self, text: &str) {
        self.draft = clip_search(text);
        self.generation += 1;
        self.debouncer.cancel();
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Waits for the next commit. Never resolves while nothing is pending.
    pub async fn next_commit(&mut self) -> Option<String> {
        while let Some((generation, text)) = self.commits.recv().await {
            if generation == self.generation {
                return Some(text);
            }
        }
        None
    }

    /// Returns a commit that is already due, if any.
    pub fn try_next_commit(&mut self) -> Option<String> {
        while let Ok((generation, text)) = self.commits.try_recv() {
            if generation == self.generation {
                return Some(text);
            }
        }
        None
    }

    /// Waits for the pending commit, or returns `None` at once when there
    /// is nothing left to commit.
    pub async fn settle(&mut self) -> Option<String> {
        let pending = self.is_pending();
        if let Some(text) = self.try_next_commit() {
            return Some(text);
        }
        if pending { self.next_commit().await } else { None }
    }
}
