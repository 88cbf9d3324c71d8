use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use shared::{
    domain::{ProjectId, UserId, ViewState},
    model::User,
};
use tokio::sync::Notify;

use super::*;

struct TestSession {
    current: Option<User>,
    login_user: User,
    fail_with: Option<String>,
    gate: Option<Arc<Notify>>,
    login_calls: AtomicUsize,
    logout_calls: AtomicUsize,
}

impl TestSession {
    fn returning(login_user: User) -> Self {
        Self {
            current: None,
            login_user,
            fail_with: None,
            gate: None,
            login_calls: AtomicUsize::new(0),
            logout_calls: AtomicUsize::new(0),
        }
    }

    fn failing(err: impl Into<String>) -> Self {
        let mut session = Self::returning(fresh_user("u9"));
        session.fail_with = Some(err.into());
        session
    }

    fn with_current(mut self, user: User) -> Self {
        self.current = Some(user);
        self
    }

    fn with_gate(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }
}

#[async_trait]
impl SessionService for TestSession {
    fn current_user(&self) -> Option<User> {
        self.current.clone()
    }

    async fn login(&self, _user_id: Option<UserId>) -> Result<User> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if let Some(err) = &self.fail_with {
            return Err(anyhow!(err.clone()));
        }
        Ok(self.login_user.clone())
    }

    fn logout(&self) {
        self.logout_calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Default)]
struct CountingAssistant {
    init_calls: AtomicUsize,
}

impl AssistantBootstrap for CountingAssistant {
    fn initialize(&self) {
        self.init_calls.fetch_add(1, Ordering::SeqCst);
    }
}

fn fresh_user(id: &str) -> User {
    User::signup(UserId::from(id), "Test User", "test@example.com")
}

fn complete_user(id: &str) -> User {
    let mut user = fresh_user(id);
    user.college = Some("MIT".into());
    user.skills_have = vec!["Rust".into()];
    user
}

fn router_with(session: TestSession) -> (ViewRouter, Arc<TestSession>, Arc<CountingAssistant>) {
    let session = Arc::new(session);
    let assistant = Arc::new(CountingAssistant::default());
    let router = ViewRouter::new(session.clone(), assistant.clone());
    (router, session, assistant)
}

fn started_router() -> ViewRouter {
    let (mut router, _, _) = router_with(TestSession::returning(complete_user("u1")));
    router.start();
    router
}

/// Puts the router into `view` through the operations the UI exposes.
fn drive_to(router: &mut ViewRouter, view: ViewState) {
    match view {
        ViewState::ProjectDetail => router.select_project(ProjectId::from("p1")),
        ViewState::UserProfile => router.select_profile(UserId::from("u2")),
        ViewState::Admin => router.enter_admin_mode().expect("enter admin"),
        other => router.navigate(other),
    }
    assert_eq!(router.view(), view);
}

const NON_ADMIN: [ViewState; 7] = [
    ViewState::Landing,
    ViewState::Onboarding,
    ViewState::Dashboard,
    ViewState::ProjectDetail,
    ViewState::FindCollaborators,
    ViewState::Profile,
    ViewState::UserProfile,
];

#[test]
fn renders_loading_until_started() {
    let (router, _, assistant) = router_with(TestSession::returning(complete_user("u1")));
    assert!(router.is_loading());
    assert_eq!(router.frame(), Frame::loading());
    assert!(!router.frame().admin_affordance);
    assert_eq!(assistant.init_calls.load(Ordering::SeqCst), 0);
}

#[test]
fn startup_without_session_user_lands_on_landing() {
    let (mut router, _, assistant) = router_with(TestSession::returning(complete_user("u1")));
    assert!(router.start());
    assert!(!router.is_loading());
    assert_eq!(router.view(), ViewState::Landing);
    assert_eq!(router.screen(), Screen::Landing);
    assert_eq!(assistant.init_calls.load(Ordering::SeqCst), 1);
}

#[test]
fn startup_with_session_user_goes_to_dashboard_even_when_incomplete() {
    let session = TestSession::returning(complete_user("u1")).with_current(fresh_user("u5"));
    let (mut router, _, _) = router_with(session);
    router.start();
    assert_eq!(router.view(), ViewState::Dashboard);
}

#[test]
fn startup_effect_runs_once() {
    let (mut router, _, assistant) = router_with(TestSession::returning(complete_user("u1")));
    assert!(router.start());
    router.navigate(ViewState::Profile);
    assert!(!router.start());
    assert_eq!(router.view(), ViewState::Profile);
    assert_eq!(assistant.init_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn login_with_complete_profile_routes_to_dashboard() {
    let (mut router, session, _) = router_with(TestSession::returning(complete_user("u1")));
    router.start();
    let outcome = router.login(Some(UserId::from("u1"))).await;
    assert_eq!(outcome, LoginOutcome::Routed(ViewState::Dashboard));
    assert_eq!(router.view(), ViewState::Dashboard);
    assert_eq!(session.login_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn login_without_college_routes_to_onboarding() {
    let mut user = complete_user("u1");
    user.college = None;
    let (mut router, _, _) = router_with(TestSession::returning(user));
    router.start();
    assert_eq!(
        router.login(None).await,
        LoginOutcome::Routed(ViewState::Onboarding)
    );
}

#[tokio::test]
async fn login_without_skills_routes_to_onboarding() {
    let mut user = complete_user("u1");
    user.skills_have.clear();
    let (mut router, _, _) = router_with(TestSession::returning(user));
    router.start();
    router.login(None).await;
    assert_eq!(router.view(), ViewState::Onboarding);
    assert_eq!(router.screen(), Screen::Onboarding);
}

#[tokio::test]
async fn login_with_blank_but_set_college_routes_to_dashboard() {
    let mut user = complete_user("u1");
    user.college = Some(" ".into());
    let (mut router, _, _) = router_with(TestSession::returning(user));
    router.start();
    assert_eq!(
        router.login(None).await,
        LoginOutcome::Routed(ViewState::Dashboard)
    );
}

#[tokio::test]
async fn failed_login_stays_on_landing_with_error_banner() {
    let (mut router, _, _) = router_with(TestSession::failing("connection refused"));
    router.start();

    let outcome = router.login(Some(UserId::from("u1"))).await;
    let LoginOutcome::Failed(err) = outcome else {
        panic!("login should fail");
    };
    assert_eq!(err.context(), UiErrorContext::Login);
    assert_eq!(err.category(), UiErrorCategory::Transport);
    assert_eq!(router.view(), ViewState::Landing);

    let frame = router.frame();
    assert_eq!(frame.screen, Screen::Landing);
    assert_eq!(frame.error, Some(err));
    assert!(!frame.login_pending);

    router.navigate(ViewState::Dashboard);
    assert!(router.error().is_none());
}

#[tokio::test]
async fn login_wait_is_published_as_pending() {
    let gate = Arc::new(Notify::new());
    let session = TestSession::returning(complete_user("u1")).with_gate(gate.clone());
    let (mut router, _, _) = router_with(session);
    router.start();
    let mut frames = router.subscribe();

    let observer = async {
        let frame = frames
            .wait_for(|frame| frame.login_pending)
            .await
            .expect("router alive")
            .clone();
        gate.notify_one();
        frame
    };
    let (outcome, pending_frame) = tokio::join!(router.login(None), observer);

    assert_eq!(pending_frame.screen, Screen::Landing);
    assert_eq!(outcome, LoginOutcome::Routed(ViewState::Dashboard));
    assert!(!router.frame().login_pending);
}

#[test]
fn navigate_clears_selections_the_target_does_not_show() {
    for target in NON_ADMIN {
        let mut router = started_router();
        router.select_project(ProjectId::from("p1"));
        router.select_profile(UserId::from("u2"));
        assert!(router.selected_project_id().is_some());

        router.navigate(target);

        assert_eq!(router.view(), target);
        assert_eq!(
            router.selected_project_id().is_some(),
            target == ViewState::ProjectDetail,
            "project selection after navigating to {target:?}"
        );
        assert_eq!(
            router.selected_user_profile_id().is_some(),
            target == ViewState::UserProfile,
            "profile selection after navigating to {target:?}"
        );
    }
}

#[test]
fn select_project_shows_project_detail() {
    let mut router = started_router();
    router.navigate(ViewState::Dashboard);
    router.select_project(ProjectId::from("p1"));
    assert_eq!(
        router.screen(),
        Screen::ProjectDetail {
            project_id: ProjectId::from("p1")
        }
    );
}

#[test]
fn select_profile_keeps_project_selection() {
    let mut router = started_router();
    router.select_project(ProjectId::from("p1"));
    router.select_profile(UserId::from("u2"));

    assert_eq!(
        router.screen(),
        Screen::UserProfile {
            user_id: UserId::from("u2")
        }
    );
    assert_eq!(router.selected_project_id(), Some(&ProjectId::from("p1")));

    router.navigate(ViewState::ProjectDetail);
    assert_eq!(
        router.screen(),
        Screen::ProjectDetail {
            project_id: ProjectId::from("p1")
        }
    );
}

#[test]
fn returning_to_project_detail_without_selection_falls_back_to_dashboard() {
    let mut router = started_router();
    router.navigate(ViewState::Dashboard);
    router.select_project(ProjectId::from("p1"));
    router.navigate(ViewState::FindCollaborators);

    for _ in 0..2 {
        router.navigate(ViewState::ProjectDetail);
        assert_eq!(router.view(), ViewState::Dashboard);
        assert_eq!(router.screen(), Screen::Dashboard);
        assert!(router.selected_project_id().is_none());
    }

    router.navigate(ViewState::UserProfile);
    assert_eq!(router.screen(), Screen::Dashboard);
}

#[test]
fn admin_round_trip_restores_every_view() {
    for start in NON_ADMIN {
        let mut router = started_router();
        drive_to(&mut router, start);
        let before_screen = router.screen();
        let before_project = router.selected_project_id().cloned();
        let before_profile = router.selected_user_profile_id().cloned();

        router.enter_admin_mode().expect("enter admin");
        assert_eq!(router.screen(), Screen::Admin);
        router.exit_admin_mode().expect("exit admin");

        assert_eq!(router.view(), start);
        assert_eq!(router.screen(), before_screen);
        assert_eq!(router.selected_project_id().cloned(), before_project);
        assert_eq!(router.selected_user_profile_id().cloned(), before_profile);
    }
}

#[test]
fn admin_entry_is_rejected_while_in_admin() {
    let mut router = started_router();
    router.navigate(ViewState::Profile);
    router.enter_admin_mode().expect("enter admin");

    assert_eq!(
        router.enter_admin_mode(),
        Err(RouterError::AdminAlreadyActive)
    );
    router.navigate(ViewState::Admin);
    assert_eq!(router.previous_view(), ViewState::Profile);

    router.exit_admin_mode().expect("exit admin");
    assert_eq!(router.view(), ViewState::Profile);
    assert_eq!(router.exit_admin_mode(), Err(RouterError::NotInAdmin));
}

#[test]
fn navigate_to_admin_records_return_view() {
    let mut router = started_router();
    router.navigate(ViewState::FindCollaborators);
    router.navigate(ViewState::Admin);
    assert_eq!(router.view(), ViewState::Admin);
    assert!(router.back());
    assert_eq!(router.view(), ViewState::FindCollaborators);
}

#[test]
fn logout_from_any_view_returns_to_landing() {
    for start in ViewState::ALL {
        let (mut router, session, _) = router_with(TestSession::returning(complete_user("u1")));
        router.start();
        router.select_project(ProjectId::from("p1"));
        router.select_profile(UserId::from("u2"));
        if start != ViewState::UserProfile {
            drive_to(&mut router, start);
        }

        router.logout();

        assert_eq!(router.view(), ViewState::Landing);
        assert!(router.selected_project_id().is_none());
        assert!(router.selected_user_profile_id().is_none());
        assert_eq!(session.logout_calls.load(Ordering::SeqCst), 1);
    }
}

#[test]
fn back_follows_screen_callbacks() {
    let mut router = started_router();
    router.select_project(ProjectId::from("p1"));
    assert!(router.back());
    assert_eq!(router.view(), ViewState::Dashboard);

    router.select_profile(UserId::from("u2"));
    assert!(router.back());
    assert_eq!(router.view(), ViewState::FindCollaborators);
    assert!(router.selected_user_profile_id().is_none());

    router.navigate(ViewState::Profile);
    assert!(!router.back());
    assert_eq!(router.view(), ViewState::Profile);
}

#[test]
fn onboarding_completion_opens_dashboard() {
    let mut router = started_router();
    router.navigate(ViewState::Onboarding);
    router.complete_onboarding();
    assert_eq!(router.view(), ViewState::Dashboard);
}

#[test]
fn frame_overlays_admin_affordance_and_layout() {
    let mut router = started_router();

    let landing = router.frame();
    assert!(landing.admin_affordance);
    assert!(landing.nav.is_none());

    router.navigate(ViewState::FindCollaborators);
    let frame = router.frame();
    assert!(frame.admin_affordance);
    let nav = frame.nav.expect("layout nav");
    let active: Vec<_> = nav.iter().filter(|item| item.active).collect();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].target, ViewState::FindCollaborators);
    assert_eq!(
        nav.iter().map(|item| item.target).collect::<Vec<_>>(),
        NAV_TARGETS.to_vec()
    );

    router.enter_admin_mode().expect("enter admin");
    let admin = router.frame();
    assert_eq!(admin.screen, Screen::Admin);
    assert!(!admin.admin_affordance);
    assert!(admin.nav.is_none());
}

#[test]
fn subscribers_see_latest_frame() {
    let mut router = started_router();
    let frames = router.subscribe();
    router.select_project(ProjectId::from("p7"));
    assert_eq!(
        frames.borrow().screen,
        Screen::ProjectDetail {
            project_id: ProjectId::from("p7")
        }
    );
}
