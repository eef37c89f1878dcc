//! Session gate (route guard for the app shell)

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::SessionResult;
use crate::tabs::{Tab, TabShell};

/// Route the gate sends signed-out users to
pub const SIGN_IN_ROUTE: &str = "/sign-in";

/// Read side of the session, plus a way to re-resolve it
#[async_trait]
pub trait SessionProvider: Send + Sync {
    fn is_authenticated(&self) -> bool;

    /// True until the current session fetch completes
    fn is_loading(&self) -> bool;

    /// Re-fetch the current session. On error the provider reports
    /// signed out.
    async fn refresh(&self) -> SessionResult<()>;
}

/// What the UI should show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Session still resolving; keep the splash screen up
    Loading,
    Redirect { href: &'static str },
    Shell(TabShell),
}

/// Decides between splash, sign-in and the tabbed shell
pub struct SessionGate<P: ?Sized> {
    provider: Arc<P>,
}

impl<P: SessionProvider + ?Sized> SessionGate<P> {
    pub fn new(provider: Arc<P>) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Resolve the session, then decide with `active` as the focused tab.
    ///
    /// A failed fetch is not an error here: it lands on sign-in.
    pub async fn resolve(&self, active: Tab) -> RouteDecision {
        if let Err(e) = self.provider.refresh().await {
            tracing::debug!(error = %e, "Session fetch failed");
        }
        self.decide(active)
    }

    /// Decide from the provider's current state
    pub fn decide(&self, active: Tab) -> RouteDecision {
        if self.provider.is_loading() {
            return RouteDecision::Loading;
        }
        if !self.provider.is_authenticated() {
            return RouteDecision::Redirect {
                href: SIGN_IN_ROUTE,
            };
        }
        RouteDecision::Shell(TabShell::new(active))
    }

    /// Decide for a tab route name (`index`, `search`, `cart`, `profile`).
    /// Unknown names fall back to the home tab.
    pub fn decide_route(&self, route: &str) -> RouteDecision {
        self.decide(Tab::from_route(route).unwrap_or_default())
    }
}
