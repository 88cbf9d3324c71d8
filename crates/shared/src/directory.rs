//! In-memory index of users and projects that upholds the model's reference rules.

use std::collections::BTreeMap;

use crate::{
    domain::{NotificationKind, ProjectId, UserId},
    error::ModelError,
    model::{Message, MessageAuthor, Notification, Project, Task, User},
};

#[derive(Debug, Clone, Default)]
pub struct Directory {
    users: BTreeMap<UserId, User>,
    projects: BTreeMap<ProjectId, Project>,
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a directory, inserting users before projects so owner and member
    /// references resolve.
    pub fn from_records(
        users: impl IntoIterator<Item = User>,
        projects: impl IntoIterator<Item = Project>,
    ) -> Result<Self, ModelError> {
        let mut directory = Self::new();
        for user in users {
            directory.insert_user(user)?;
        }
        for project in projects {
            directory.insert_project(project)?;
        }
        Ok(directory)
    }

    pub fn insert_user(&mut self, user: User) -> Result<(), ModelError> {
        if self.users.contains_key(&user.id) {
            return Err(ModelError::DuplicateUser(user.id));
        }
        self.users.insert(user.id.clone(), user);
        Ok(())
    }

    /// Replaces a known user's record. The id is the lookup key and cannot change.
    pub fn update_user(&mut self, user: User) -> Result<(), ModelError> {
        match self.users.get_mut(&user.id) {
            Some(existing) => {
                *existing = user;
                Ok(())
            }
            None => Err(ModelError::UnknownUser(user.id)),
        }
    }

    pub fn insert_project(&mut self, project: Project) -> Result<(), ModelError> {
        if self.projects.contains_key(&project.id) {
            return Err(ModelError::DuplicateProject(project.id));
        }
        if !self.users.contains_key(&project.owner_id) {
            return Err(ModelError::UnknownOwner {
                project_id: project.id,
                owner_id: project.owner_id,
            });
        }
        if let Some(member_id) = project
            .members
            .iter()
            .find(|member| !self.users.contains_key(*member))
        {
            return Err(ModelError::UnknownMember {
                project_id: project.id.clone(),
                member_id: member_id.clone(),
            });
        }
        self.projects.insert(project.id.clone(), project);
        Ok(())
    }

    pub fn user(&self, id: &UserId) -> Option<&User> {
        self.users.get(id)
    }

    pub fn project(&self, id: &ProjectId) -> Option<&Project> {
        self.projects.get(id)
    }

    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    pub fn projects(&self) -> impl Iterator<Item = &Project> {
        self.projects.values()
    }

    pub fn projects_for_member<'a>(
        &'a self,
        user_id: &'a UserId,
    ) -> impl Iterator<Item = &'a Project> + 'a {
        self.projects
            .values()
            .filter(move |project| project.is_member(user_id))
    }

    pub fn validate_task(&self, task: &Task) -> Result<(), ModelError> {
        self.require_project(&task.project_id)?;
        if let Some(assignee_id) = &task.assignee_id {
            if !self.users.contains_key(assignee_id) {
                return Err(ModelError::UnknownAssignee {
                    task_id: task.id.clone(),
                    assignee_id: assignee_id.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn validate_message(&self, message: &Message) -> Result<(), ModelError> {
        self.require_project(&message.project_id)?;
        match &message.author {
            MessageAuthor::User(user_id) => self.require_user(user_id),
            MessageAuthor::Ai => Ok(()),
        }
    }

    pub fn validate_notification(&self, notification: &Notification) -> Result<(), ModelError> {
        self.require_user(&notification.recipient_id)?;
        self.require_user(&notification.sender_id)?;
        self.require_project(&notification.resource_id)?;
        if notification.kind == NotificationKind::Message && notification.status.is_some() {
            return Err(ModelError::StatusOnMessageNotification(
                notification.id.clone(),
            ));
        }
        Ok(())
    }

    fn require_user(&self, id: &UserId) -> Result<(), ModelError> {
        if self.users.contains_key(id) {
            Ok(())
        } else {
            Err(ModelError::UnknownUser(id.clone()))
        }
    }

    fn require_project(&self, id: &ProjectId) -> Result<(), ModelError> {
        if self.projects.contains_key(id) {
            Ok(())
        } else {
            Err(ModelError::UnknownProject(id.clone()))
        }
    }
}
