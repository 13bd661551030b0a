//! Shared pieces of the labres CLI.
//!
//! The binary lives in `main.rs`; this library exposes the logging
//! bootstrap so integration tests and future frontends can reuse it.

pub mod logging;
