//! Repository Traits
//!
//! Interface for account persistence. Implementations are in the
//! infrastructure layer.

use crate::domain::entity::Account;
use crate::domain::value_object::{AccountId, Email};
use crate::error::AccountResult;

/// Account repository trait
///
/// Uniqueness of `email` is enforced by the store; a violation surfaces as
/// `AccountError::DuplicateEmail` from `create` and `update`.
#[trait_variant::make(AccountRepository: Send)]
pub trait LocalAccountRepository {
    /// Insert a new account
    async fn create(&self, account: &Account) -> AccountResult<()>;

    /// Find account by ID
    async fn find_by_id(&self, account_id: &AccountId) -> AccountResult<Option<Account>>;

    /// Find account by normalized email (exact match)
    async fn find_by_email(&self, email: &Email) -> AccountResult<Option<Account>>;

    /// Overwrite every mutable column; `NotFound` when no row has this id
    async fn update(&self, account: &Account) -> AccountResult<()>;
}
