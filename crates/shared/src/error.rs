use thiserror::Error;

use crate::domain::{NotificationId, ProjectId, TaskId, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("user {0} already exists")]
    DuplicateUser(UserId),
    #[error("project {0} already exists")]
    DuplicateProject(ProjectId),
    #[error("unknown user {0}")]
    UnknownUser(UserId),
    #[error("unknown project {0}")]
    UnknownProject(ProjectId),
    #[error("project {project_id} is owned by unknown user {owner_id}")]
    UnknownOwner {
        project_id: ProjectId,
        owner_id: UserId,
    },
    #[error("project {project_id} lists unknown member {member_id}")]
    UnknownMember {
        project_id: ProjectId,
        member_id: UserId,
    },
    #[error("task {task_id} is assigned to unknown user {assignee_id}")]
    UnknownAssignee { task_id: TaskId, assignee_id: UserId },
    #[error("message notification {0} must not carry an invite status")]
    StatusOnMessageNotification(NotificationId),
}
