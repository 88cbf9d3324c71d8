use shared::domain::{ProjectId, UserId, ViewState};

use crate::events::UiError;

/// What the rendering layer draws. Detail screens carry the id they display,
/// so a detail screen without a selection cannot be expressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Loading,
    Landing,
    Onboarding,
    Dashboard,
    ProjectDetail { project_id: ProjectId },
    FindCollaborators,
    Profile,
    UserProfile { user_id: UserId },
    Admin,
}

impl Screen {
    /// The view this screen renders; `None` while loading.
    pub fn view(&self) -> Option<ViewState> {
        let view = match self {
            Screen::Loading => return None,
            Screen::Landing => ViewState::Landing,
            Screen::Onboarding => ViewState::Onboarding,
            Screen::Dashboard => ViewState::Dashboard,
            Screen::ProjectDetail { .. } => ViewState::ProjectDetail,
            Screen::FindCollaborators => ViewState::FindCollaborators,
            Screen::Profile => ViewState::Profile,
            Screen::UserProfile { .. } => ViewState::UserProfile,
            Screen::Admin => ViewState::Admin,
        };
        Some(view)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub target: ViewState,
    pub label: &'static str,
    pub active: bool,
}

/// Entries of the signed-in layout header, in display order.
pub const NAV_TARGETS: [ViewState; 3] = [
    ViewState::Dashboard,
    ViewState::FindCollaborators,
    ViewState::Profile,
];

/// Full render output for one router state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub screen: Screen,
    /// Floating admin entry button. Never present on the admin screen itself.
    pub admin_affordance: bool,
    /// Layout navigation; `None` for screens drawn without the layout shell.
    pub nav: Option<Vec<NavItem>>,
    pub login_pending: bool,
    pub error: Option<UiError>,
}

impl Frame {
    pub fn loading() -> Self {
        Self {
            screen: Screen::Loading,
            admin_affordance: false,
            nav: None,
            login_pending: false,
            error: None,
        }
    }
}
