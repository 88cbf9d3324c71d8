//! Root navigation controller: owns the active view and the ids selected for
//! detail screens.

use std::sync::Arc;

use shared::domain::{ProjectId, UserId, ViewState};
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::{
    events::{UiError, UiErrorContext},
    screen::{Frame, NavItem, Screen, NAV_TARGETS},
    session::{AssistantBootstrap, SessionService},
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
    #[error("admin mode is already active")]
    AdminAlreadyActive,
    #[error("admin mode is not active")]
    NotInAdmin,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Routed(ViewState),
    Failed(UiError),
}

pub struct ViewRouter {
    session: Arc<dyn SessionService>,
    assistant: Arc<dyn AssistantBootstrap>,
    view: ViewState,
    /// Single-slot return register for the admin overlay.
    previous_view: ViewState,
    selected_project_id: Option<ProjectId>,
    selected_user_profile_id: Option<UserId>,
    loading: bool,
    started: bool,
    login_pending: bool,
    error: Option<UiError>,
    frames: watch::Sender<Frame>,
}

impl ViewRouter {
    pub fn new(session: Arc<dyn SessionService>, assistant: Arc<dyn AssistantBootstrap>) -> Self {
        let (frames, _) = watch::channel(Frame::loading());
        Self {
            session,
            assistant,
            view: ViewState::Landing,
            previous_view: ViewState::Landing,
            selected_project_id: None,
            selected_user_profile_id: None,
            loading: true,
            started: false,
            login_pending: false,
            error: None,
            frames,
        }
    }

    /// Runs the startup effect. Only the first call has any effect; returns
    /// whether this call performed it.
    pub fn start(&mut self) -> bool {
        if self.started {
            return false;
        }
        self.started = true;

        self.assistant.initialize();
        let target = match self.session.current_user() {
            Some(user) => {
                info!(user_id = %user.id, "restored session");
                ViewState::Dashboard
            }
            None => ViewState::Landing,
        };
        self.set_view(target);
        self.loading = false;
        self.publish();
        true
    }

    pub async fn login(&mut self, user_id: Option<UserId>) -> LoginOutcome {
        self.login_pending = true;
        self.publish();

        let result = self.session.login(user_id).await;
        self.login_pending = false;

        match result {
            Ok(user) => {
                let target = if user.has_completed_profile() {
                    ViewState::Dashboard
                } else {
                    ViewState::Onboarding
                };
                info!(user_id = %user.id, view = ?target, "login succeeded");
                self.set_view(target);
                self.publish();
                LoginOutcome::Routed(target)
            }
            Err(err) => {
                warn!(error = %err, "login failed");
                let ui_error = UiError::from_message(UiErrorContext::Login, format!("{err:#}"));
                self.error = Some(ui_error.clone());
                self.publish();
                LoginOutcome::Failed(ui_error)
            }
        }
    }

    pub fn logout(&mut self) {
        self.session.logout();
        self.selected_project_id = None;
        self.selected_user_profile_id = None;
        self.set_view(ViewState::Landing);
        self.publish();
    }

    /// General transition used by in-app links. Clears whichever selection
    /// the target does not display. A detail target with nothing selected
    /// falls back to the dashboard.
    pub fn navigate(&mut self, target: ViewState) {
        if target == ViewState::Admin {
            if let Err(err) = self.enter_admin_mode() {
                debug!(error = %err, "ignored navigation to admin");
            }
            return;
        }

        if target != ViewState::ProjectDetail {
            self.selected_project_id = None;
        }
        if target != ViewState::UserProfile {
            self.selected_user_profile_id = None;
        }

        let resolved = match target {
            ViewState::ProjectDetail if self.selected_project_id.is_none() => {
                warn!("project detail requested without a selected project; showing dashboard");
                ViewState::Dashboard
            }
            ViewState::UserProfile if self.selected_user_profile_id.is_none() => {
                warn!("user profile requested without a selected user; showing dashboard");
                ViewState::Dashboard
            }
            other => other,
        };
        self.set_view(resolved);
        self.publish();
    }

    pub fn select_project(&mut self, project_id: ProjectId) {
        self.selected_project_id = Some(project_id);
        self.navigate(ViewState::ProjectDetail);
    }

    /// Opens another user's profile. Unlike `navigate`, the project selection
    /// is left in place so the project stays reachable from the profile.
    pub fn select_profile(&mut self, user_id: UserId) {
        self.selected_user_profile_id = Some(user_id);
        self.set_view(ViewState::UserProfile);
        self.publish();
    }

    /// Onboarding finished; the profile was saved by the session store.
    pub fn complete_onboarding(&mut self) {
        self.navigate(ViewState::Dashboard);
    }

    pub fn enter_admin_mode(&mut self) -> Result<(), RouterError> {
        if self.view == ViewState::Admin {
            return Err(RouterError::AdminAlreadyActive);
        }
        self.previous_view = self.view;
        self.set_view(ViewState::Admin);
        self.publish();
        Ok(())
    }

    pub fn exit_admin_mode(&mut self) -> Result<(), RouterError> {
        if self.view != ViewState::Admin {
            return Err(RouterError::NotInAdmin);
        }
        self.set_view(self.previous_view);
        self.publish();
        Ok(())
    }

    /// Back action of the current screen. Returns whether anything changed.
    pub fn back(&mut self) -> bool {
        match self.view {
            ViewState::ProjectDetail => {
                self.navigate(ViewState::Dashboard);
                true
            }
            ViewState::UserProfile => {
                self.navigate(ViewState::FindCollaborators);
                true
            }
            ViewState::Admin => self.exit_admin_mode().is_ok(),
            _ => false,
        }
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn previous_view(&self) -> ViewState {
        self.previous_view
    }

    pub fn selected_project_id(&self) -> Option<&ProjectId> {
        self.selected_project_id.as_ref()
    }

    pub fn selected_user_profile_id(&self) -> Option<&UserId> {
        self.selected_user_profile_id.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&UiError> {
        self.error.as_ref()
    }

    pub fn nav_items(&self) -> Vec<NavItem> {
        NAV_TARGETS
            .iter()
            .map(|&target| NavItem {
                target,
                label: target.label(),
                active: self.view == target,
            })
            .collect()
    }

    pub fn screen(&self) -> Screen {
        if self.loading {
            return Screen::Loading;
        }
        match self.view {
            ViewState::Landing => Screen::Landing,
            ViewState::Onboarding => Screen::Onboarding,
            ViewState::Dashboard => Screen::Dashboard,
            ViewState::ProjectDetail => match &self.selected_project_id {
                Some(project_id) => Screen::ProjectDetail {
                    project_id: project_id.clone(),
                },
                None => Screen::Dashboard,
            },
            ViewState::FindCollaborators => Screen::FindCollaborators,
            ViewState::Profile => Screen::Profile,
            ViewState::UserProfile => match &self.selected_user_profile_id {
                Some(user_id) => Screen::UserProfile {
                    user_id: user_id.clone(),
                },
                None => Screen::Dashboard,
            },
            ViewState::Admin => Screen::Admin,
        }
    }

    pub fn frame(&self) -> Frame {
        if self.loading {
            return Frame::loading();
        }
        let screen = self.screen();
        let nav = screen
            .view()
            .filter(|view| view.uses_layout())
            .map(|_| self.nav_items());
        Frame {
            admin_affordance: screen != Screen::Admin,
            screen,
            nav,
            login_pending: self.login_pending,
            error: self.error.clone(),
        }
    }

    /// Frames published after every state change.
    pub fn subscribe(&self) -> watch::Receiver<Frame> {
        self.frames.subscribe()
    }

    fn set_view(&mut self, to: ViewState) {
        debug!(from = ?self.view, to = ?to, "view transition");
        self.view = to;
        self.error = None;
    }

    fn publish(&self) {
        self.frames.send_replace(self.frame());
    }
}
