//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Shutdown (shutdown.rs):
//!     trigger() → broadcast to every subscriber → server stops accepting
//!
//! Signals (signals.rs):
//!     SIGINT (Ctrl+C) → resolves the signal future → graceful shutdown
//! ```
//!
//! # Design Decisions
//! - The route tree is built before the listener starts; nothing is
//!   registered while serving
//! - Shutdown drains in-flight requests through axum's graceful shutdown

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
pub use signals::ctrl_c;
