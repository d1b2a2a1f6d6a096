//! # Keystone Planning
//!
//! Term-planning engine for teachers.
//!
//! # Modules
//!
//! - [`calendar`]: Available teaching days and planning windows
//! - [`pacing`]: Week partitioning and topic-to-week distribution
//! - [`risk`]: Compression, gap and overload detection
//! - [`drafts`]: In-memory draft sessions and the confirm-to-commit workflow
//! - [`stores`]: Collaborator traits for every external read and write
//! - [`telemetry`]: Business counters
//!
//! Enable the `test-utils` feature for [`memory::InMemoryPlanningStore`].
//!
//! # Example
//!
//! ```ignore
//! use keystone_planning::{DraftPlanService, PlanningStores};
//!
//! let service = DraftPlanService::new(stores, PlanningConfig::from_env());
//! let draft = service.generate(dto).await?;
//! let token = service.generate_confirmation_token(draft.session_id).await?;
//! let accepted = service.accept(draft.session_id, &token).await?;
//! ```

pub mod calendar;
pub mod drafts;
pub mod pacing;
pub mod risk;
pub mod stores;
pub mod telemetry;

#[cfg(any(test, feature = "test-utils"))]
pub mod memory;

pub use calendar::CalendarAvailabilityCalculator;
pub use drafts::{DraftPlanService, PlanningStores};
pub use pacing::PacingDistributor;
pub use stores::{
    AssessmentRecordStore, CalendarStore, ClassDirectory, CurriculumStore, PlanRecordStore,
};
