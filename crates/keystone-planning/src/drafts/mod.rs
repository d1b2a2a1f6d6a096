//! Draft plan sessions.
//!
//! This module provides the in-memory session arena, confirmation tokens and
//! the [`DraftPlanService`] orchestrator.

pub mod arena;
pub mod service;
pub mod token;

pub use arena::{DraftSession, SessionArena, SessionState};
pub use service::{DraftPlanService, PlanningStores};
pub use token::{generate_token, tokens_match};
