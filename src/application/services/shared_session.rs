//! Session shared between concurrent callers.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::domain::{
    CategoryPath, CategoryTree, DomainResult, NavState, NavigationSession, SessionEvent,
    Transition,
};

/// Snapshot of a session, taken under the lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    pub state: NavState,
    pub prompt: String,
    pub options: Vec<String>,
    pub current_path: CategoryPath,
    pub completed_paths: Vec<CategoryPath>,
    pub step: u64,
}

/// Cloneable handle to one session.
///
/// Every operation holds the lock for the whole transition, leaf finalize
/// included, so racing requests cannot lose updates or finalize twice.
#[derive(Debug, Clone)]
pub struct SharedSession {
    inner: Arc<Mutex<NavigationSession>>,
}

impl SharedSession {
    pub fn new(tree: Arc<CategoryTree>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(NavigationSession::new(tree))),
        }
    }

    pub fn choose(&self, name: &str) -> DomainResult<Transition> {
        self.inner.lock().choose(name)
    }

    pub fn back(&self) -> DomainResult<NavState> {
        self.inner.lock().back()
    }

    pub fn reset(&self) -> NavState {
        self.inner.lock().reset()
    }

    pub fn take_events(&self) -> Vec<SessionEvent> {
        self.inner.lock().take_events()
    }

    pub fn view(&self) -> SessionView {
        let session = self.inner.lock();
        SessionView {
            state: session.state(),
            prompt: session.prompt(),
            options: session.options().to_vec(),
            current_path: session.current_path().to_vec(),
            completed_paths: session.completed_paths().to_vec(),
            step: session.step(),
        }
    }

    /// Run `f` with exclusive access to the session.
    pub fn with<R>(&self, f: impl FnOnce(&mut NavigationSession) -> R) -> R {
        f(&mut self.inner.lock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CategorySpec;
    use std::thread;

    fn tree() -> Arc<CategoryTree> {
        Arc::new(
            CategoryTree::from_specs(&[CategorySpec::branch(
                "Belag",
                vec![CategorySpec::leaf("Asphalt")],
            )])
            .unwrap(),
        )
    }

    #[test]
    fn given_racing_leaf_choices_when_applied_then_finalized_once() {
        let shared = SharedSession::new(tree());
        shared.choose("Belag").unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let s = shared.clone();
                thread::spawn(move || s.choose("Asphalt").is_ok())
            })
            .collect();
        let successes = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();

        // Only the first choice sees "Asphalt" offered; after finalize the
        // options are the top level again.
        assert_eq!(successes, 1);
        let view = shared.view();
        assert_eq!(view.completed_paths.len(), 1);
        assert_eq!(view.state, NavState::AtRoot);
    }

    #[test]
    fn given_shared_session_when_viewing_then_snapshot_matches() {
        let shared = SharedSession::new(tree());
        shared.choose("belag").unwrap();
        let view = shared.view();
        assert_eq!(view.current_path, vec!["Belag".to_string()]);
        assert_eq!(view.options, vec!["Asphalt".to_string()]);
        assert_eq!(view.prompt, "Subcategories of 'Belag':");
        assert_eq!(shared.with(|s| s.step()), 1);
    }
}
