//! In-memory session store seeded with demo accounts, standing in for the
//! hosted store during local runs and tests.

use std::{fs, path::Path, sync::Mutex};

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use serde::Deserialize;
use shared::{
    directory::Directory,
    domain::{ProjectId, UserId},
    model::{
        ContributionStats, ExternalProfiles, HackathonRecord, Project, Signal, SignalValue, User,
    },
};
use tracing::{debug, info};
use uuid::Uuid;

use crate::session::SessionService;

#[derive(Debug, Deserialize)]
pub struct SeedFile {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub projects: Vec<Project>,
}

struct DemoState {
    directory: Directory,
    current: Option<UserId>,
}

pub struct DemoSession {
    state: Mutex<DemoState>,
}

impl DemoSession {
    pub fn new(directory: Directory) -> Self {
        Self {
            state: Mutex::new(DemoState {
                directory,
                current: None,
            }),
        }
    }

    pub fn with_demo_accounts() -> Result<Self> {
        Ok(Self::new(demo_directory()?))
    }

    pub fn from_seed_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read seed file '{}'", path.display()))?;
        let seed: SeedFile = serde_json::from_str(&raw)
            .with_context(|| format!("invalid seed file '{}'", path.display()))?;
        let directory = Directory::from_records(seed.users, seed.projects)
            .with_context(|| format!("inconsistent seed file '{}'", path.display()))?;
        info!(path = %path.display(), "loaded seed directory");
        Ok(Self::new(directory))
    }

    /// Marks `user_id` as signed in without going through `login`.
    pub fn resume(&self, user_id: UserId) -> Result<()> {
        let mut state = self.lock()?;
        if state.directory.user(&user_id).is_none() {
            return Err(anyhow!("unknown user {user_id}"));
        }
        state.current = Some(user_id);
        Ok(())
    }

    /// Stores the onboarding answers for the signed-in user.
    pub fn save_profile(&self, user: User) -> Result<()> {
        let mut state = self.lock()?;
        if state.current.as_ref() != Some(&user.id) {
            return Err(anyhow!("user {} is not signed in", user.id));
        }
        state.directory.update_user(user)?;
        Ok(())
    }

    pub fn accounts(&self) -> Vec<User> {
        self.lock()
            .map(|state| state.directory.users().cloned().collect())
            .unwrap_or_default()
    }

    pub fn project(&self, project_id: &ProjectId) -> Option<Project> {
        self.lock()
            .ok()
            .and_then(|state| state.directory.project(project_id).cloned())
    }

    pub fn user(&self, user_id: &UserId) -> Option<User> {
        self.lock()
            .ok()
            .and_then(|state| state.directory.user(user_id).cloned())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, DemoState>> {
        self.state
            .lock()
            .map_err(|_| anyhow!("demo session state poisoned"))
    }
}

#[async_trait]
impl SessionService for DemoSession {
    fn current_user(&self) -> Option<User> {
        let state = self.lock().ok()?;
        let current = state.current.as_ref()?;
        state.directory.user(current).cloned()
    }

    async fn login(&self, user_id: Option<UserId>) -> Result<User> {
        let mut state = self.lock()?;
        let user = match user_id {
            Some(user_id) => state
                .directory
                .user(&user_id)
                .cloned()
                .ok_or_else(|| anyhow!("unknown user {user_id}"))?,
            None => {
                let id = UserId(Uuid::new_v4().to_string());
                let short = id.as_str().chars().take(8).collect::<String>();
                let user = User::signup(
                    id,
                    format!("New Hacker {short}"),
                    format!("hacker-{short}@example.com"),
                );
                state.directory.insert_user(user.clone())?;
                debug!(user_id = %user.id, "created signup account");
                user
            }
        };
        state.current = Some(user.id.clone());
        Ok(user)
    }

    fn logout(&self) {
        if let Ok(mut state) = self.lock() {
            state.current = None;
        }
    }
}

/// Two complete demo accounts, one half-finished account, and a shared project.
pub fn demo_directory() -> Result<Directory> {
    let mut alex = User::signup(UserId::from("u1"), "Alex Chen", "alex@example.com");
    alex.college = Some("Stanford University".into());
    alex.year_of_study = Some("Junior".into());
    alex.interests = vec!["AI".into(), "Climate".into()];
    alex.skills_have = vec!["React".into(), "Python".into(), "TypeScript".into()];
    alex.skills_want = vec!["Rust".into()];
    alex.external_profiles = ExternalProfiles {
        github: Some("alexchen".into()),
        leetcode: Some("alexc".into()),
        linkedin: None,
    };
    alex.signals = vec![Signal {
        kind: "leetcode".into(),
        value: SignalValue::Number(1850.0),
        label: "Contest Rating".into(),
        verified: true,
    }];
    alex.hackathons = vec![HackathonRecord {
        event_name: "TreeHacks".into(),
        year: "2024".into(),
        role: "Frontend".into(),
        verified: true,
    }];

    let mut sam = User::signup(UserId::from("u2"), "Sam Rivera", "sam@example.com");
    sam.college = Some("MIT".into());
    sam.year_of_study = Some("Senior".into());
    sam.skills_have = vec!["Rust".into(), "Go".into()];
    sam.skills_want = vec!["Design".into()];
    sam.signals = vec![Signal {
        kind: "github".into(),
        value: SignalValue::Text("120 contributions".into()),
        label: "GitHub Activity".into(),
        verified: false,
    }];

    let mut jo = User::signup(UserId::from("u3"), "Jo Park", "jo@example.com");
    jo.college = Some("UC Berkeley".into());

    let created_at = Utc
        .with_ymd_and_hms(2024, 2, 10, 9, 0, 0)
        .single()
        .ok_or_else(|| anyhow!("invalid demo timestamp"))?;
    let project = Project {
        id: ProjectId::from("p1"),
        owner_id: UserId::from("u1"),
        title: "EcoTrack".into(),
        description: "Carbon footprint tracker for campus events.".into(),
        tech_stack: vec!["React".into(), "Rust".into()],
        tags: vec!["climate".into()],
        members: vec![UserId::from("u1"), UserId::from("u2")],
        created_at,
        stats: ContributionStats {
            human_tokens: 4200,
            ai_tokens: 1300,
        },
    };

    Ok(Directory::from_records([alex, sam, jo], [project])?)
}
