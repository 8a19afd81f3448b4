//! Navigation session: the state machine behind stepping through the tree.
//!
//! A session offers a set of options at every step. Choosing an option either
//! descends one level or, when the chosen category has no children, records
//! the finished path and starts over at the top. The leaf state is never
//! observable from outside: finalizing happens inside the same `choose` call.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::domain::arena::CategoryTree;
use crate::domain::entities::{format_path, names_match, CategoryPath};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::search::SearchOutcome;

/// Observable navigation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavState {
    /// Nothing chosen yet; options are the top-level categories.
    AtRoot,
    /// Inside the tree; options are the children of the last chosen category.
    AtNode,
}

/// One-shot notification produced by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Chose(String),
    SteppedBack,
    Reset,
    PathCompleted(CategoryPath),
}

impl fmt::Display for SessionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionEvent::Chose(name) => write!(f, "{name}"),
            SessionEvent::SteppedBack => write!(f, "One level back."),
            SessionEvent::Reset => write!(f, "Path reset. Please choose again from the top."),
            SessionEvent::PathCompleted(path) => write!(
                f,
                "Path completed: {}. Starting again at the top.",
                format_path(path)
            ),
        }
    }
}

/// Result of a successful `choose`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// State after the transition (always `AtRoot` when a path completed)
    pub state: NavState,
    /// The path that was finalized by this choice, if any
    pub completed: Option<CategoryPath>,
}

/// Single-user navigation session over a shared, immutable tree.
#[derive(Debug, Clone)]
pub struct NavigationSession {
    tree: Arc<CategoryTree>,
    current_path: CategoryPath,
    completed_paths: Vec<CategoryPath>,
    options: Vec<String>,
    step: u64,
    events: Vec<SessionEvent>,
}

impl NavigationSession {
    pub fn new(tree: Arc<CategoryTree>) -> Self {
        let options = tree.root_names();
        Self {
            tree,
            current_path: Vec::new(),
            completed_paths: Vec::new(),
            options,
            step: 0,
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> NavState {
        if self.current_path.is_empty() {
            NavState::AtRoot
        } else {
            NavState::AtNode
        }
    }

    /// Choices offered at the current step.
    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn current_path(&self) -> &[String] {
        &self.current_path
    }

    pub fn completed_paths(&self) -> &[CategoryPath] {
        &self.completed_paths
    }

    /// Number of successful choices so far; only useful as a UI key.
    pub fn step(&self) -> u64 {
        self.step
    }

    pub fn tree(&self) -> &Arc<CategoryTree> {
        &self.tree
    }

    /// Prompt text for the current step.
    pub fn prompt(&self) -> String {
        match self.current_path.last() {
            None => "Choose a category:".to_string(),
            Some(last) => format!("Subcategories of '{last}':"),
        }
    }

    /// Drain pending notifications, oldest first.
    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Choose one of the offered options.
    ///
    /// The choice is matched against the current options ignoring case and
    /// surrounding whitespace; the option's own spelling is recorded. An
    /// unknown choice leaves the session untouched.
    #[instrument(level = "debug", skip(self), fields(step = self.step))]
    pub fn choose(&mut self, name: &str) -> DomainResult<Transition> {
        let chosen = self
            .options
            .iter()
            .find(|opt| names_match(opt, name))
            .cloned()
            .ok_or_else(|| DomainError::InvalidChoice {
                choice: name.to_string(),
                options: self.options.clone(),
            })?;

        // Options always come from the tree, so the lookup only misses if the
        // tree and the option set disagree.
        let next = match self.tree.find_children(&chosen) {
            SearchOutcome::NotFound => return Err(DomainError::UnknownCategory(chosen)),
            outcome => outcome,
        };

        self.current_path.push(chosen.clone());
        self.step += 1;
        self.events.push(SessionEvent::Chose(chosen));

        match next {
            SearchOutcome::Found { children } => {
                debug!("choose: descended to {}", format_path(&self.current_path));
                self.options = children;
                Ok(Transition {
                    state: NavState::AtNode,
                    completed: None,
                })
            }
            _ => {
                let finished = self.finalize();
                Ok(Transition {
                    state: NavState::AtRoot,
                    completed: Some(finished),
                })
            }
        }
    }

    /// Go one level up.
    #[instrument(level = "debug", skip(self))]
    pub fn back(&mut self) -> DomainResult<NavState> {
        if self.current_path.pop().is_none() {
            return Err(DomainError::NothingToGoBack);
        }
        self.options = self.options_for_current_path();
        self.events.push(SessionEvent::SteppedBack);
        Ok(self.state())
    }

    /// Abandon the current path and return to the top level.
    ///
    /// Completed paths are kept.
    #[instrument(level = "debug", skip(self))]
    pub fn reset(&mut self) -> NavState {
        self.current_path.clear();
        self.options = self.tree.root_names();
        self.events.push(SessionEvent::Reset);
        NavState::AtRoot
    }

    fn finalize(&mut self) -> CategoryPath {
        let finished = std::mem::take(&mut self.current_path);
        debug!("finalize: {}", format_path(&finished));
        self.completed_paths.push(finished.clone());
        self.options = self.tree.root_names();
        self.events.push(SessionEvent::PathCompleted(finished.clone()));
        finished
    }

    fn options_for_current_path(&self) -> Vec<String> {
        match self.current_path.last() {
            None => self.tree.root_names(),
            Some(last) => self.tree.find_children(last).children().to_vec(),
        }
    }
}
