//! taskdeck - single-user task manager over a local JSON store
//!
//! The core is a set of synchronous, in-process components:
//!
//! - [`storage`]: key-value persistence adapter (four JSON slots)
//! - [`store`]: canonical task/project collections with write-through
//!   persistence
//! - [`query`]: pure filter/sort/search pipeline over the collections
//! - [`session`]: demo auth state machine
//! - [`form`]: field-level form validation
//! - [`analytics`]: aggregate statistics computed on demand
//! - [`cli`]: the td command-line surface

pub mod analytics;
pub mod cli;
pub mod config;
pub mod error;
pub mod form;
pub mod output;
pub mod project;
pub mod query;
pub mod sample;
pub mod session;
pub mod storage;
pub mod store;
pub mod task;

pub use error::{Error, Result};
