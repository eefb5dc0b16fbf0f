//! DeepScript - turn typed text into a handwriting-style PDF.
//!
//! The crate drives a three-step workflow against remote font services:
//!
//! 1. **Text entry** on a fixed-size canvas ([`canvas`])
//! 2. **Font acquisition**: pick a built-in font, upload one, or generate one
//!    from a photo of handwriting ([`font`])
//! 3. **Preview** of the rendered document, with download ([`preview`])
//!
//! [`workflow::Workflow`] owns all state and performs the remote calls through
//! any [`FontServices`](deepscript_net::services::FontServices)
//! implementation.
//!
//! # Example
//!
//! ```no_run
//! use deepscript::prelude::*;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = WorkflowConfig::default();
//! let services = RemoteFontServices::new(config.endpoints.clone())?;
//! let mut workflow = Workflow::new(services, config);
//!
//! workflow.commit_text("Hello World")?;
//! workflow.next().await?;
//! workflow.select_builtin("handwriting-1")?;
//! workflow.next().await?;
//! workflow.save_preview(".").await?;
//! # Ok(())
//! # }
//! ```

pub mod canvas;
pub mod config;
pub mod error;
pub mod font;
pub mod prelude;
pub mod preview;
pub mod workflow;

pub use deepscript_core::{ConnectionId, PerfSpan, Signal, logging};
pub use deepscript_net as net;

pub use config::{ConfigError, WorkflowConfig};
pub use error::{ErrorKind, ValidationError, WorkflowError, WorkflowResult};
