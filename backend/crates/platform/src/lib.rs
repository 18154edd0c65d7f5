//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations that carry no domain vocabulary:
//! - Password handling (clear-text wrapper, Argon2id hashing, strength policy)

pub mod password;
