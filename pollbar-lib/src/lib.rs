#![doc(hidden)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for pollbar
//!
//! pollbar watches a long-running server-side task by polling a JSON progress
//! endpoint and mirroring the reported percentage in a terminal progress bar.
//!
//! # Module Organization
//!
//! - [`poller`]: The polling state machine and its source/display seams
//! - [`commands`]: Command-line interface and orchestration

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

#[cfg(any(debug_assertions, test))]
pub mod commands;
#[cfg(not(any(debug_assertions, test)))]
mod commands;

pub mod poller;

pub use crate::commands::{Host, run};
