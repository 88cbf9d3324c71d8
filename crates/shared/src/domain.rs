use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

id_newtype!(UserId);
id_newtype!(ProjectId);
id_newtype!(MessageId);
id_newtype!(TaskId);
id_newtype!(NotificationId);

/// Author id the store uses for assistant-generated chat messages.
pub const AI_AUTHOR_ID: &str = "ai";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Invite,
    Message,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InviteStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
}

/// Screen identifiers the client can display. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewState {
    Landing,
    Onboarding,
    Dashboard,
    ProjectDetail,
    FindCollaborators,
    Profile,
    UserProfile,
    Admin,
}

impl ViewState {
    pub const ALL: [ViewState; 8] = [
        ViewState::Landing,
        ViewState::Onboarding,
        ViewState::Dashboard,
        ViewState::ProjectDetail,
        ViewState::FindCollaborators,
        ViewState::Profile,
        ViewState::UserProfile,
        ViewState::Admin,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ViewState::Landing => "Landing",
            ViewState::Onboarding => "Onboarding",
            ViewState::Dashboard => "Dashboard",
            ViewState::ProjectDetail => "Project",
            ViewState::FindCollaborators => "Find Collaborators",
            ViewState::Profile => "My Profile",
            ViewState::UserProfile => "Profile",
            ViewState::Admin => "Admin",
        }
    }

    /// Views drawn inside the signed-in layout shell (header + nav).
    pub fn uses_layout(self) -> bool {
        !matches!(
            self,
            ViewState::Landing | ViewState::Onboarding | ViewState::Admin
        )
    }
}

impl fmt::Display for ViewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
