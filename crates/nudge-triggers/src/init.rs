//! Boot-time replay. Walks the trigger store, re-starts active triggers
//! through their registered kinds, and restores pending notification
//! state.
//!
//! Every scan is best-effort: a corrupt descriptor or an unknown type
//! skips that row's action and the scan continues. Entry points are
//! synchronous and hold no locks; callers serialize concurrent use.

use nudge_core::config::NotifConfig;
use nudge_core::error::Result;
use nudge_store::TriggerStore;

use crate::descriptor::{ActionDescriptor, RuntimeDescriptor};
use crate::kind::TriggerKindRegistry;
use crate::notify::Notifier;
use crate::prefs::PreferenceStore;

/// Replays and resets stored trigger state.
pub struct TriggerInitializer<'a> {
    store: &'a TriggerStore,
    kinds: &'a TriggerKindRegistry,
    notifier: &'a dyn Notifier,
}

impl<'a> TriggerInitializer<'a> {
    pub fn new(
        store: &'a TriggerStore,
        kinds: &'a TriggerKindRegistry,
        notifier: &'a dyn Notifier,
    ) -> Self {
        Self {
            store,
            kinds,
            notifier,
        }
    }

    /// Start-up replay for one campaign: re-start every stored trigger
    /// that still targets at least one survey, and restore notification
    /// state for triggers that have fired before. Ends with a forced
    /// notification-display refresh.
    pub fn init_campaign(&self, campaign_urn: &str, campaign_name: &str) -> Result<()> {
        tracing::info!(campaign_urn, campaign_name, "replaying stored triggers");

        for row in self.store.list_for_campaign(campaign_urn)? {
            let Some(kind) = self.kinds.get(&row.trigger_type) else {
                tracing::debug!(
                    id = row.id,
                    trigger_type = %row.trigger_type,
                    "unknown trigger type, skipping"
                );
                continue;
            };

            // Start only if the trigger targets a positive number of surveys.
            match ActionDescriptor::parse(&row.action_desc) {
                Ok(actions) if actions.survey_count() > 0 => {
                    tracing::info!(id = row.id, "starting trigger");
                    kind.start(row.id, &row.trigger_desc);
                }
                Ok(_) => {
                    tracing::debug!(id = row.id, "no target surveys, not starting");
                }
                Err(e) => {
                    tracing::warn!(id = row.id, error = %e, "bad action descriptor, not starting");
                }
            }

            // Independently, restore notification state for triggers
            // that have a recorded fire.
            match RuntimeDescriptor::parse(&row.runtime_desc) {
                Ok(runtime) => {
                    if let Some(last_fired) = runtime.last_fired {
                        tracing::info!(id = row.id, "restoring notification state");
                        self.notifier
                            .restore_past_states(row.id, &row.notif_desc, last_fired);
                    }
                }
                Err(e) => {
                    tracing::warn!(id = row.id, error = %e, "bad runtime descriptor, not restoring");
                }
            }
        }

        self.notifier.refresh_display(true);
        Ok(())
    }

    /// Full reset: tear down every trigger's live registration through
    /// its kind, then remove the row. Row removal is owned here — kinds
    /// only undo alarms/geofences. Rows with unregistered types have no
    /// live registration left to undo and are removed directly.
    ///
    /// Not transactional: the teardown side effects cannot be rolled
    /// back, so each row is processed independently; a crash mid-scan
    /// leaves a smaller but consistent table.
    pub fn reset_triggers(&self) -> Result<()> {
        tracing::info!("resetting all triggers");

        for row in self.store.list(None, None)? {
            match self.kinds.get(&row.trigger_type) {
                Some(kind) => kind.delete(row.id),
                None => {
                    tracing::debug!(
                        id = row.id,
                        trigger_type = %row.trigger_type,
                        "unknown trigger type, nothing to tear down"
                    );
                }
            }
            if let Err(e) = self.store.delete(row.id) {
                tracing::warn!(id = row.id, error = %e, "failed to remove trigger row");
            }
        }

        self.notifier.refresh_display(true);
        Ok(())
    }

    /// Full reset plus settings: clears preference storage, resets
    /// every kind that declares settings, re-arms the one-shot maps
    /// tooltip, and restores the factory notification descriptor.
    ///
    /// Compound with no rollback: a failing step leaves earlier steps
    /// applied.
    pub fn reset_all(&self, prefs: &mut PreferenceStore) -> Result<()> {
        self.reset_triggers()?;

        prefs.clear_all()?;

        for (name, kind) in self.kinds.iter() {
            if kind.has_settings() {
                tracing::debug!(trigger_type = name, "resetting kind settings");
                kind.reset_settings();
            }
        }

        prefs.set_tooltip_dismissed(false)?;
        prefs.set_global_notif_desc(&NotifConfig::default_descriptor())?;
        Ok(())
    }
}
