//! Notifier contract consumed by the initializer.
//!
//! The rendering side (status-bar entries, sounds, grouping) lives in
//! the embedding application; the initializer only needs these two
//! calls, injected so tests can substitute a recorder.

use chrono::{DateTime, Utc};

pub trait Notifier {
    /// Re-surface notification state that was pending as of
    /// `last_fired` for the given trigger, from its serialized
    /// notification descriptor.
    fn restore_past_states(&self, id: i64, notif_desc: &str, last_fired: DateTime<Utc>);

    /// Redraw the notification display. `force` redraws even when
    /// nothing changed.
    fn refresh_display(&self, force: bool);
}
