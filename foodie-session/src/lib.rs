//! Foodie Session - session gate for the app shell
//!
//! Decides, from the current session, whether the app shows a splash, sends
//! the user to sign in, or renders the tabbed shell. Produces plain data for
//! the UI layer to render.

pub mod error;
pub mod gate;
pub mod store;
pub mod tabs;

pub use error::{SessionError, SessionResult};
pub use gate::{RouteDecision, SIGN_IN_ROUTE, SessionGate, SessionProvider};
pub use store::{AuthStore, CurrentUserSource};
pub use tabs::{Tab, TabBarItem, TabShell};
