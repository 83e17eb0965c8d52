//! # Nudge Triggers
//!
//! The bootstrap half of the reminder framework: descriptor parsing, the
//! trigger-kind registry, preference storage, and the initializer that
//! replays stored trigger state at device boot.
//!
//! Kind-specific behavior (alarm scheduling, geofence math) lives in the
//! trigger-kind implementations registered by the embedding application;
//! this crate only dispatches to them.

pub mod descriptor;
pub mod init;
pub mod kind;
pub mod notify;
pub mod prefs;

pub use descriptor::{
    ActionDescriptor, LocationTriggerDesc, RuntimeDescriptor, TimeTriggerDesc, TriggerDescriptor,
};
pub use init::TriggerInitializer;
pub use kind::{RegistryBuilder, TriggerKind, TriggerKindRegistry};
pub use notify::Notifier;
pub use prefs::PreferenceStore;
