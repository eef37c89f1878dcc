//! Account API

use crate::types::AccountInfo;
use crate::{ClientResult, HttpClient};

impl HttpClient {
    /// Get the account owning the current session.
    ///
    /// Fails with `401` when the client carries no valid user session.
    pub async fn get_account(&self) -> ClientResult<AccountInfo> {
        let account: AccountInfo = self.get("account", &[]).await?;
        tracing::debug!(account_id = %account.id, "Fetched current account");
        Ok(account)
    }
}
