//! Prelude module for DeepScript.
//!
//! ```ignore
//! use deepscript::prelude::*;
//! ```
//!
//! This provides access to:
//! - The workflow and its signals (`Workflow`, `Notice`, `WorkflowStep`)
//! - Canvas input (`CanvasEvent`, `Key`, `KeyboardModifiers`)
//! - Font acquisition types (`AcquisitionMethod`, `FontArtifact`)
//! - The remote services (`RemoteFontServices`, `ServiceEndpoints`)
//! - Configuration and errors

// ============================================================================
// Workflow
// ============================================================================

pub use crate::workflow::{Notice, NoticeLevel, Workflow, WorkflowStep};

// ============================================================================
// Canvas
// ============================================================================

pub use crate::canvas::{CanvasEvent, CanvasLayout, CanvasOptions, Key, KeyboardModifiers};

// ============================================================================
// Fonts and Preview
// ============================================================================

pub use crate::font::{AcquisitionMethod, BuiltInFont, FontArtifact, FontCatalog};
pub use crate::preview::{RenderedArtifact, ResourceRegistry};

// ============================================================================
// Services
// ============================================================================

pub use deepscript_net::services::{FontServices, RemoteFontServices, ServiceEndpoints};

// ============================================================================
// Configuration and Errors
// ============================================================================

pub use crate::config::WorkflowConfig;
pub use crate::error::{BusyOperation, ErrorKind, ValidationError, WorkflowError};
pub use deepscript_core::Signal;
