//! Client-side navigation core: the view router, its render contract and the
//! collaborator seams it is driven through.

pub mod demo;
pub mod events;
pub mod router;
pub mod screen;
pub mod session;

pub use demo::{demo_directory, DemoSession, SeedFile};
pub use events::{UiError, UiErrorCategory, UiErrorContext};
pub use router::{LoginOutcome, RouterError, ViewRouter};
pub use screen::{Frame, NavItem, Screen, NAV_TARGETS};
pub use session::{AssistantBootstrap, EnvAssistantBootstrap, NoopAssistant, SessionService};

#[cfg(test)]
#[path = "tests/router_tests.rs"]
mod router_tests;

#[cfg(test)]
#[path = "tests/demo_tests.rs"]
mod demo_tests;
