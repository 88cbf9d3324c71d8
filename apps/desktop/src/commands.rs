//! Shell commands typed by the user and their dispatch onto the router.

use client_core::{LoginOutcome, RouterError, UiError, UiErrorContext, ViewRouter};
use shared::domain::{ProjectId, UserId, ViewState};

pub const USAGE: &str = "\
commands:
  login [user-id]      sign in (no id = new signup)
  logout               sign out
  go <view>            dashboard | find | profile | project | user | landing | onboarding | admin
  project <id>         open a project
  user <id>            open another user's profile
  admin / exit-admin   toggle the admin panel
  back                 back action of the current screen
  done                 finish onboarding
  accounts             list demo accounts
  show                 redraw the current screen
  help                 this text
  quit                 exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Login { user_id: Option<UserId> },
    Logout,
    Navigate { target: ViewState },
    SelectProject { project_id: ProjectId },
    SelectProfile { user_id: UserId },
    EnterAdmin,
    ExitAdmin,
    Back,
    CompleteOnboarding,
    Accounts,
    Show,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<ShellCommand, String> {
    let mut parts = line.split_whitespace();
    let Some(head) = parts.next() else {
        return Ok(ShellCommand::Show);
    };
    let arg = parts.next();
    if parts.next().is_some() {
        return Err(format!("too many arguments for '{head}'"));
    }

    let cmd = match (head.to_ascii_lowercase().as_str(), arg) {
        ("login", arg) => ShellCommand::Login {
            user_id: arg.map(UserId::from),
        },
        ("logout", None) => ShellCommand::Logout,
        ("go", Some(view)) => ShellCommand::Navigate {
            target: parse_view(view)?,
        },
        ("project", Some(id)) => ShellCommand::SelectProject {
            project_id: ProjectId::from(id),
        },
        ("user", Some(id)) => ShellCommand::SelectProfile {
            user_id: UserId::from(id),
        },
        ("admin", None) => ShellCommand::EnterAdmin,
        ("exit-admin", None) => ShellCommand::ExitAdmin,
        ("back", None) => ShellCommand::Back,
        ("done", None) => ShellCommand::CompleteOnboarding,
        ("accounts", None) => ShellCommand::Accounts,
        ("show", None) => ShellCommand::Show,
        ("help", None) => ShellCommand::Help,
        ("quit" | "exit", None) => ShellCommand::Quit,
        ("go" | "project" | "user", None) => return Err(format!("'{head}' needs an argument")),
        (_, Some(_)) if is_known(head) => return Err(format!("'{head}' takes no argument")),
        _ => return Err(format!("unknown command '{head}'")),
    };
    Ok(cmd)
}

fn is_known(head: &str) -> bool {
    matches!(
        head.to_ascii_lowercase().as_str(),
        "logout" | "admin" | "exit-admin" | "back" | "done" | "accounts" | "show" | "help" | "quit"
            | "exit"
    )
}

fn parse_view(raw: &str) -> Result<ViewState, String> {
    let view = match raw.to_ascii_lowercase().as_str() {
        "landing" => ViewState::Landing,
        "onboarding" => ViewState::Onboarding,
        "dashboard" | "home" => ViewState::Dashboard,
        "project" => ViewState::ProjectDetail,
        "find" | "collaborators" => ViewState::FindCollaborators,
        "profile" | "me" => ViewState::Profile,
        "user" => ViewState::UserProfile,
        "admin" => ViewState::Admin,
        other => return Err(format!("unknown view '{other}'")),
    };
    Ok(view)
}

fn command_name(cmd: &ShellCommand) -> &'static str {
    match cmd {
        ShellCommand::Login { .. } => "login",
        ShellCommand::Logout => "logout",
        ShellCommand::Navigate { .. } => "navigate",
        ShellCommand::SelectProject { .. } => "select_project",
        ShellCommand::SelectProfile { .. } => "select_profile",
        ShellCommand::EnterAdmin => "enter_admin",
        ShellCommand::ExitAdmin => "exit_admin",
        ShellCommand::Back => "back",
        ShellCommand::CompleteOnboarding => "complete_onboarding",
        ShellCommand::Accounts => "accounts",
        ShellCommand::Show => "show",
        ShellCommand::Help => "help",
        ShellCommand::Quit => "quit",
    }
}

/// Applies a router command. Returns a status line when there is something
/// to report beyond the redrawn screen.
pub async fn dispatch(router: &mut ViewRouter, cmd: ShellCommand) -> Option<String> {
    tracing::debug!(command = command_name(&cmd), "dispatching shell command");
    match cmd {
        ShellCommand::Login { user_id } => match router.login(user_id).await {
            LoginOutcome::Routed(view) => Some(format!("signed in; showing {view}")),
            LoginOutcome::Failed(_) => None,
        },
        ShellCommand::Logout => {
            router.logout();
            None
        }
        ShellCommand::Navigate { target } => {
            router.navigate(target);
            (router.view() != target).then(|| format!("{target} unavailable; showing {}", router.view()))
        }
        ShellCommand::SelectProject { project_id } => {
            router.select_project(project_id);
            None
        }
        ShellCommand::SelectProfile { user_id } => {
            router.select_profile(user_id);
            None
        }
        ShellCommand::EnterAdmin => router.enter_admin_mode().err().map(rejected_banner),
        ShellCommand::ExitAdmin => router.exit_admin_mode().err().map(rejected_banner),
        ShellCommand::Back => (!router.back()).then(|| "nothing to go back to".to_string()),
        ShellCommand::CompleteOnboarding => {
            router.complete_onboarding();
            None
        }
        ShellCommand::Accounts | ShellCommand::Show | ShellCommand::Help | ShellCommand::Quit => {
            None
        }
    }
}

fn rejected_banner(err: RouterError) -> String {
    UiError::from_message(UiErrorContext::General, err.to_string()).banner()
}
