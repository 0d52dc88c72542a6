//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Init logging → Create directories → Init metrics → Bind listener
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listener binds last (traffic only when directories exist)

pub mod signals;
pub mod startup;

pub use signals::shutdown_signal;
pub use startup::prepare_directories;
