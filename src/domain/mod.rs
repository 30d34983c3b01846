//! Domain layer containing merchant-facing types.
//!
//! # Module Organization
//!
//! - `merchant` - Credentials, call outcomes and settlement date ranges

pub mod merchant;
