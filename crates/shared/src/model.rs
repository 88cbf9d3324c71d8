use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    InviteStatus, MessageId, NotificationId, NotificationKind, ProjectId, TaskId, TaskStatus,
    UserId, AI_AUTHOR_ID,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalProfiles {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leetcode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SignalValue {
    Number(f64),
    Text(String),
}

/// A verifiable credibility marker shown on a profile (contest rating, repo count, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: SignalValue,
    pub label: String,
    pub verified: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HackathonRecord {
    pub event_name: String,
    pub year: String,
    pub role: String,
    pub verified: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub avatar_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub college: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_of_study: Option<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub skills_have: Vec<String>,
    #[serde(default)]
    pub skills_want: Vec<String>,
    #[serde(default)]
    pub external_profiles: ExternalProfiles,
    #[serde(default)]
    pub signals: Vec<Signal>,
    #[serde(default)]
    pub hackathons: Vec<HackathonRecord>,
}

impl User {
    /// Fresh signup with only identity fields filled in.
    pub fn signup(id: UserId, name: impl Into<String>, email: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            avatar_url: format!("https://api.dicebear.com/7.x/avataaars/svg?seed={}", id),
            id,
            name,
            email: email.into(),
            college: None,
            year_of_study: None,
            interests: Vec::new(),
            skills_have: Vec::new(),
            skills_want: Vec::new(),
            external_profiles: ExternalProfiles::default(),
            signals: Vec::new(),
            hackathons: Vec::new(),
        }
    }

    /// Whether the account already carries a college and at least one skill.
    /// Pre-populated demo accounts pass; fresh signups still need onboarding.
    pub fn has_completed_profile(&self) -> bool {
        let has_college = self
            .college
            .as_deref()
            .is_some_and(|college| !college.is_empty());
        has_college && !self.skills_have.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionStats {
    pub human_tokens: u64,
    pub ai_tokens: u64,
}

impl ContributionStats {
    /// Share of contributions written by people, in `[0, 1]`. Zero when empty.
    pub fn human_ratio(&self) -> f64 {
        let total = self.human_tokens as f64 + self.ai_tokens as f64;
        if total == 0.0 {
            return 0.0;
        }
        self.human_tokens as f64 / total
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub owner_id: UserId,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub members: Vec<UserId>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub stats: ContributionStats,
}

impl Project {
    pub fn is_member(&self, user_id: &UserId) -> bool {
        &self.owner_id == user_id || self.members.contains(user_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MessageAuthor {
    User(UserId),
    Ai,
}

impl From<String> for MessageAuthor {
    fn from(value: String) -> Self {
        if value == AI_AUTHOR_ID {
            MessageAuthor::Ai
        } else {
            MessageAuthor::User(UserId(value))
        }
    }
}

impl From<MessageAuthor> for String {
    fn from(value: MessageAuthor) -> Self {
        match value {
            MessageAuthor::User(user_id) => user_id.0,
            MessageAuthor::Ai => AI_AUTHOR_ID.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: MessageId,
    pub project_id: ProjectId,
    #[serde(rename = "userId")]
    pub author: MessageAuthor,
    pub content: String,
    pub is_ai_assisted: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub project_id: ProjectId,
    pub title: String,
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<UserId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: NotificationId,
    pub recipient_id: UserId,
    pub sender_id: UserId,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub resource_id: ProjectId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<InviteStatus>,
}

impl Notification {
    /// Invite state; invites stored without a status are still pending.
    pub fn invite_status(&self) -> Option<InviteStatus> {
        match self.kind {
            NotificationKind::Invite => Some(self.status.unwrap_or_default()),
            NotificationKind::Message => None,
        }
    }
}
