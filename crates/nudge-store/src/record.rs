//! Row-level data model for the trigger table.

use serde::{Deserialize, Serialize};

/// A stored trigger, one table row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerRecord {
    /// Store-assigned identifier, stable once assigned.
    pub id: i64,
    /// Externally assigned UUID; duplicate inserts are ignored.
    pub uuid: String,
    /// Owning campaign, absent for non-campaign triggers.
    pub campaign_urn: Option<String>,
    pub campaign_name: Option<String>,
    /// Selects the trigger-kind implementation owning this row.
    pub trigger_type: String,
    /// Serialized trigger parameters (schedule window, geofence, ...).
    pub trigger_desc: String,
    /// Serialized list of target surveys.
    pub action_desc: String,
    /// Serialized pending-notification state.
    pub notif_desc: String,
    /// Serialized runtime bookkeeping (last-fired timestamp, ...).
    pub runtime_desc: String,
}

/// A trigger to insert. The store assigns the row id.
#[derive(Debug, Clone)]
pub struct NewTrigger {
    pub uuid: String,
    pub campaign_urn: Option<String>,
    pub campaign_name: Option<String>,
    pub trigger_type: String,
    pub trigger_desc: String,
    pub action_desc: String,
    pub notif_desc: String,
    pub runtime_desc: String,
}

impl NewTrigger {
    /// Create a non-campaign trigger.
    pub fn new(
        uuid: &str,
        trigger_type: &str,
        trigger_desc: &str,
        action_desc: &str,
        notif_desc: &str,
        runtime_desc: &str,
    ) -> Self {
        Self {
            uuid: uuid.to_string(),
            campaign_urn: None,
            campaign_name: None,
            trigger_type: trigger_type.to_string(),
            trigger_desc: trigger_desc.to_string(),
            action_desc: action_desc.to_string(),
            notif_desc: notif_desc.to_string(),
            runtime_desc: runtime_desc.to_string(),
        }
    }

    /// Scope the trigger to a campaign.
    pub fn for_campaign(mut self, urn: &str, name: &str) -> Self {
        self.campaign_urn = Some(urn.to_string());
        self.campaign_name = Some(name.to_string());
        self
    }
}

/// Campaign association of a single trigger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignInfo {
    pub urn: Option<String>,
    pub name: Option<String>,
}

/// A distinct campaign present in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Campaign {
    pub urn: String,
    pub name: Option<String>,
}
