//! Interactive session management
//!
//! This module provides the `SessionController` abstraction that manages:
//! - The five-item menu prompt and choice parsing
//! - Dispatch to the audio and generative-AI collaborators
//! - Failure reporting (no collaborator failure is fatal to the loop)
//! - Release of the audio output subsystem on exit

mod controller;
mod menu;

pub use controller::{OutputPaths, SessionController};
pub use menu::{MenuChoice, SessionState};
