//! # Nudge Store
//!
//! Persistence for user-configured reminder triggers. One SQLite table,
//! one row per trigger: identity (id + external UUID), the owning survey
//! campaign, the trigger type string, and four opaque serialized
//! descriptors whose schemas belong to the trigger-type implementations.
//!
//! The store never interprets descriptor contents, with one deliberate
//! exception: the survey-scoped query matches a literal substring against
//! the action descriptor.

pub mod record;
pub mod store;

pub use record::{Campaign, CampaignInfo, NewTrigger, TriggerRecord};
pub use store::TriggerStore;
