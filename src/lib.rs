pub mod cli;
pub mod commit_gate;
pub mod config;
pub mod conflict;
pub mod context;
pub mod conventional;
pub mod domain;
pub mod error;
pub mod flows;
pub mod git;
pub mod hooks;
pub mod i18n;
pub mod session;
pub mod ui;
pub mod version;

pub use error::{GitWorkflowError, Result};
