//! Static privileged-account set

use std::collections::HashSet;

use crate::domain::ledger::AccessControl;
use crate::shared::types::AccountId;

/// Grants privilege to a fixed set of accounts
#[derive(Debug, Default)]
pub struct StaticAccessControl {
    privileged: HashSet<AccountId>,
}

impl StaticAccessControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_privileged(accounts: impl IntoIterator<Item = AccountId>) -> Self {
        Self {
            privileged: accounts.into_iter().collect(),
        }
    }

    pub fn grant(&mut self, account: AccountId) {
        self.privileged.insert(account);
    }
}

impl AccessControl for StaticAccessControl {
    fn is_privileged(&self, caller: AccountId) -> bool {
        self.privileged.contains(&caller)
    }
}
