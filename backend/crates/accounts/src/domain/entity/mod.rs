//! Entity Module

pub mod account;
pub mod new_account;

pub use account::{Account, AccountFlags, AccountKind};
pub use new_account::{CleanedAccount, NewAccount};
