//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate holds the vocabulary every other crate agrees on:
//! - The unified error type and its HTTP mapping
//! - Typed identifiers for domain entities
//!
//! Anything domain specific (quiz rules, session state) lives in its own crate.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
