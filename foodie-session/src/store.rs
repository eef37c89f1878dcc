//! Auth store
//!
//! Holds the signed-in user and the loading flag. The store is the only
//! writer; everything else reads through [`SessionProvider`].

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use foodie_client::{AccountInfo, HttpClient};

use crate::error::{SessionError, SessionResult};
use crate::gate::SessionProvider;

/// Where the current user comes from
#[async_trait]
pub trait CurrentUserSource: Send + Sync {
    async fn current_user(&self) -> SessionResult<AccountInfo>;
}

#[async_trait]
impl CurrentUserSource for HttpClient {
    async fn current_user(&self) -> SessionResult<AccountInfo> {
        match self.get_account().await {
            Ok(account) => Ok(account),
            Err(e) if e.status() == Some(401) => Err(SessionError::NoSession(e.to_string())),
            Err(e) => Err(e.into()),
        }
    }
}

#[derive(Debug)]
struct AuthState {
    user: Option<AccountInfo>,
    loading: bool,
}

/// Session store backed by a [`CurrentUserSource`]
///
/// Starts in the loading state until the first [`SessionProvider::refresh`]
/// completes.
pub struct AuthStore<S> {
    source: S,
    state: RwLock<AuthState>,
}

impl<S: CurrentUserSource> AuthStore<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: RwLock::new(AuthState {
                user: None,
                loading: true,
            }),
        }
    }

    /// The signed-in user, if any
    pub fn user(&self) -> Option<AccountInfo> {
        self.read().user.clone()
    }

    /// Forget the current user (local sign-out)
    pub fn clear(&self) {
        let mut state = self.write();
        if let Some(user) = state.user.take() {
            tracing::info!(account_id = %user.id, "Session cleared");
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, AuthState> {
        self.state.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, AuthState> {
        self.state.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl<S: CurrentUserSource> SessionProvider for AuthStore<S> {
    fn is_authenticated(&self) -> bool {
        self.read().user.is_some()
    }

    fn is_loading(&self) -> bool {
        self.read().loading
    }

    async fn refresh(&self) -> SessionResult<()> {
        self.write().loading = true;

        // No lock is held across the fetch
        let fetched = self.source.current_user().await;

        let mut state = self.write();
        state.loading = false;
        match fetched {
            Ok(user) => {
                tracing::debug!(account_id = %user.id, "Session resolved");
                state.user = Some(user);
                Ok(())
            }
            Err(e) => {
                tracing::debug!(error = %e, "No session, treating as signed out");
                state.user = None;
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Replays queued results, one per call
    struct ScriptedSource(Mutex<Vec<SessionResult<AccountInfo>>>);

    impl ScriptedSource {
        fn new(mut script: Vec<SessionResult<AccountInfo>>) -> Self {
            script.reverse();
            Self(Mutex::new(script))
        }
    }

    #[async_trait]
    impl CurrentUserSource for ScriptedSource {
        async fn current_user(&self) -> SessionResult<AccountInfo> {
            self.0
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Err(SessionError::NoSession("script exhausted".into())))
        }
    }

    fn account() -> AccountInfo {
        AccountInfo {
            id: "user-1".into(),
            name: "Ada".into(),
            email: "ada@example.com".into(),
        }
    }

    #[tokio::test]
    async fn test_starts_loading_and_signed_out() {
        let store = AuthStore::new(ScriptedSource::new(vec![]));
        assert!(store.is_loading());
        assert!(!store.is_authenticated());
    }

    #[tokio::test]
    async fn test_refresh_success_sets_user() {
        let store = AuthStore::new(ScriptedSource::new(vec![Ok(account())]));
        store.refresh().await.unwrap();
        assert!(!store.is_loading());
        assert!(store.is_authenticated());
        assert_eq!(store.user().unwrap().email, "ada@example.com");
    }

    #[tokio::test]
    async fn test_refresh_failure_clears_user() {
        let store = AuthStore::new(ScriptedSource::new(vec![
            Ok(account()),
            Err(SessionError::NoSession("expired".into())),
        ]));
        store.refresh().await.unwrap();
        assert!(store.is_authenticated());

        assert!(store.refresh().await.is_err());
        assert!(!store.is_authenticated());
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn test_clear() {
        let store = AuthStore::new(ScriptedSource::new(vec![Ok(account())]));
        store.refresh().await.unwrap();
        store.clear();
        assert!(!store.is_authenticated());
        assert!(store.user().is_none());
    }
}
