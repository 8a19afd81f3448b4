//! Interactive navigation service
//!
//! Drives a `NavigationSession` through a `Selector`: every step offers the
//! current options plus back/reset/finish controls until the user finishes
//! or cancels.

use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{DomainError, NavState, NavigationSession, SessionEvent};
use crate::infrastructure::traits::{SelectionItem, Selector};

const CATEGORY_PREFIX: &str = "category:";
const CONTROL_PREFIX: &str = "control:";

pub const BACK_LABEL: &str = "[back]";
pub const RESET_LABEL: &str = "[reset]";
pub const FINISH_LABEL: &str = "[finish]";

/// What the user picked at one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Choose(String),
    Back,
    Reset,
    Finish,
}

impl Action {
    fn item(&self) -> SelectionItem {
        let (display, value) = match self {
            Action::Choose(name) => (name.clone(), format!("{CATEGORY_PREFIX}{name}")),
            Action::Back => (BACK_LABEL.into(), format!("{CONTROL_PREFIX}back")),
            Action::Reset => (RESET_LABEL.into(), format!("{CONTROL_PREFIX}reset")),
            Action::Finish => (FINISH_LABEL.into(), format!("{CONTROL_PREFIX}finish")),
        };
        SelectionItem { display, value }
    }

    fn from_item(item: &SelectionItem) -> Option<Self> {
        if let Some(name) = item.value.strip_prefix(CATEGORY_PREFIX) {
            return Some(Action::Choose(name.to_string()));
        }
        match item.value.strip_prefix(CONTROL_PREFIX)? {
            "back" => Some(Action::Back),
            "reset" => Some(Action::Reset),
            "finish" => Some(Action::Finish),
            _ => None,
        }
    }
}

/// Something the presentation should tell the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Event(SessionEvent),
    Rejected(DomainError),
}

/// Service running the interactive choose/back/reset loop.
pub struct NavigationService {
    selector: Arc<dyn Selector>,
}

impl NavigationService {
    pub fn new(selector: Arc<dyn Selector>) -> Self {
        Self { selector }
    }

    /// Items offered at the session's current step.
    pub fn items(session: &NavigationSession) -> Vec<SelectionItem> {
        let mut actions: Vec<Action> = session
            .options()
            .iter()
            .cloned()
            .map(Action::Choose)
            .collect();
        if session.state() == NavState::AtNode {
            actions.push(Action::Back);
        }
        actions.push(Action::Reset);
        actions.push(Action::Finish);
        actions.iter().map(Action::item).collect()
    }

    /// Run until the user finishes or cancels the selector.
    ///
    /// Rejected actions leave the session unchanged and are reported through
    /// `feedback`; the loop then asks again.
    #[instrument(level = "debug", skip_all)]
    pub fn run(
        &self,
        session: &mut NavigationSession,
        mut feedback: impl FnMut(&Feedback),
    ) -> ApplicationResult<()> {
        loop {
            let items = Self::items(session);
            let selected = self
                .selector
                .select_one(&items, &session.prompt())
                .map_err(|e| ApplicationError::OperationFailed {
                    context: "select next category".into(),
                    source: e.into(),
                })?;

            let action = match selected.as_ref().and_then(Action::from_item) {
                None | Some(Action::Finish) => {
                    debug!("run: finished after {} steps", session.step());
                    return Ok(());
                }
                Some(action) => action,
            };

            let result = match action {
                Action::Choose(name) => session.choose(&name).map(|_| ()),
                Action::Back => session.back().map(|_| ()),
                Action::Reset => {
                    session.reset();
                    Ok(())
                }
                Action::Finish => Ok(()),
            };

            match result {
                Ok(()) => {}
                Err(e @ (DomainError::InvalidChoice { .. } | DomainError::NothingToGoBack)) => {
                    warn!("rejected: {}", e);
                    feedback(&Feedback::Rejected(e));
                }
                Err(e) => return Err(e.into()),
            }

            for event in session.take_events() {
                feedback(&Feedback::Event(event));
            }
        }
    }
}
