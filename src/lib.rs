//! http-check - Kuberhealthy HTTP endpoint check
//!
//! Issues a configured number of sequential HTTP requests against a target
//! and reports healthy when enough of them return the expected status code.
//!
//! The run is split into small pieces that the binary wires together:
//! [`config`] loads and validates the environment, [`dispatch`] sends single
//! requests, [`check`] drives the request loop, [`verdict`] applies the pass
//! threshold and [`report`] talks to the orchestrator. [`runner::Runner`]
//! composes them.

pub mod check;
pub mod cli;
pub mod config;
pub mod dispatch;
pub mod logging;
pub mod report;
pub mod runner;
pub mod verdict;
