//! Pending cart-merge stashes.
//!
//! A guest cart that must survive a login or OAuth redirect is staged
//! server-side under a random single-use token instead of a second
//! ad-hoc browser storage slot. Redeeming the token returns the staged
//! entries exactly once; expired stashes behave as if they never existed.

pub mod errors;
mod repository;
pub mod service;

pub use errors::MergeStashError;
pub use service::*;
