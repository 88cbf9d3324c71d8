//! Plain-text rendering of router frames.

use std::fmt::Write as _;

use client_core::{DemoSession, Frame, Screen, SessionService};
use shared::model::{Project, User};

pub fn render_frame(frame: &Frame, session: &DemoSession) -> String {
    let mut out = String::new();

    if let Some(nav) = &frame.nav {
        let items: Vec<String> = nav
            .iter()
            .map(|item| {
                if item.active {
                    format!("[{}]", item.label)
                } else {
                    item.label.to_string()
                }
            })
            .collect();
        let _ = writeln!(out, "== {} ==", items.join(" | "));
    }

    if let Some(err) = &frame.error {
        let _ = writeln!(out, "!! {}", err.banner());
    }
    if frame.login_pending {
        let _ = writeln!(out, "(signing in...)");
    }

    match &frame.screen {
        Screen::Loading => out.push_str("Loading...\n"),
        Screen::Landing => {
            out.push_str("Find your hackathon team.\n");
            out.push_str("`login <id>` for a demo account, `login` to sign up.\n");
        }
        Screen::Onboarding => {
            out.push_str("Tell us about yourself: college, skills, interests.\n");
            out.push_str("`done` when finished.\n");
        }
        Screen::Dashboard => {
            let _ = writeln!(out, "Dashboard");
            match session.current_user() {
                Some(user) => {
                    let _ = writeln!(out, "Welcome back, {}.", user.name);
                }
                None => out.push_str("Not signed in.\n"),
            }
        }
        Screen::ProjectDetail { project_id } => match session.project(project_id) {
            Some(project) => render_project(&mut out, &project),
            None => {
                let _ = writeln!(out, "Project {project_id} not found.");
            }
        },
        Screen::FindCollaborators => {
            out.push_str("Collaborators\n");
            for user in session.accounts() {
                let _ = writeln!(
                    out,
                    "  {:<10} {:<16} {}",
                    user.id,
                    user.name,
                    user.skills_have.join(", ")
                );
            }
        }
        Screen::Profile => match session.current_user() {
            Some(user) => render_user(&mut out, &user),
            None => out.push_str("Not signed in.\n"),
        },
        Screen::UserProfile { user_id } => match session.user(user_id) {
            Some(user) => render_user(&mut out, &user),
            None => {
                let _ = writeln!(out, "User {user_id} not found.");
            }
        },
        Screen::Admin => out.push_str("Admin panel. `back` to return.\n"),
    }

    if frame.admin_affordance {
        out.push_str("                                   [admin]\n");
    }
    out
}

fn render_project(out: &mut String, project: &Project) {
    let _ = writeln!(out, "{} ({})", project.title, project.id);
    let _ = writeln!(out, "{}", project.description);
    let _ = writeln!(out, "stack: {}", project.tech_stack.join(", "));
    let members: Vec<&str> = project.members.iter().map(|m| m.as_str()).collect();
    let _ = writeln!(out, "members: {}", members.join(", "));
    let _ = writeln!(
        out,
        "human contribution: {:.0}%",
        project.stats.human_ratio() * 100.0
    );
}

fn render_user(out: &mut String, user: &User) {
    let _ = writeln!(out, "{} <{}>", user.name, user.email);
    if let Some(college) = &user.college {
        let _ = writeln!(out, "college: {college}");
    }
    let _ = writeln!(out, "skills: {}", user.skills_have.join(", "));
    let _ = writeln!(out, "wants: {}", user.skills_want.join(", "));
    for signal in &user.signals {
        let mark = if signal.verified { "verified" } else { "unverified" };
        let _ = writeln!(out, "  {} ({mark})", signal.label);
    }
    for hackathon in &user.hackathons {
        let _ = writeln!(
            out,
            "  {} {}: {}",
            hackathon.event_name, hackathon.year, hackathon.role
        );
    }
}
