//! Core primitives shared by the DeepScript crates.
//!
//! - **Signal/Slot System**: type-safe notification from the workflow to the
//!   presentation layer ([`Signal`])
//! - **Logging**: `tracing` targets and a timing helper ([`logging`])
//!
//! # Example
//!
//! ```
//! use deepscript_core::Signal;
//!
//! let step_changed = Signal::<u8>::new();
//! let conn_id = step_changed.connect(|step| {
//!     println!("Now on step {}", step);
//! });
//!
//! step_changed.emit(2);
//! step_changed.disconnect(conn_id);
//! ```

pub mod logging;
pub mod signal;

pub use logging::PerfSpan;
pub use signal::{ConnectionId, Signal};
