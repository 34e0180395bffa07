//! bot-sweep: auto-merge bot pull requests across GitHub repositories
//!
//! The library exposes the pieces the `bot-sweep` binary is built from:
//! configuration loading, credential discovery, the [`platform`] seam to
//! GitHub and the [`sweep`] engine with its pure eligibility evaluator.

pub mod auth;
pub mod config;
pub mod error;
pub mod platform;
pub mod sweep;
pub mod types;
