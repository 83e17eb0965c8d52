//! The trigger table and its CRUD surface.
//!
//! Schema policy is deliberately destructive: on a version mismatch the
//! table is dropped and recreated, discarding all rows. Trigger state is
//! re-creatable from the server-side campaign definitions, so no
//! migration path is carried.

use rusqlite::{Connection, OptionalExtension, params, params_from_iter};
use std::path::Path;

use nudge_core::error::{NudgeError, Result};

use crate::record::{Campaign, CampaignInfo, NewTrigger, TriggerRecord};

/// Bumping this wipes every installed trigger table on next open.
const SCHEMA_VERSION: i32 = 3;

const CREATE_TRIGGERS_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS triggers (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        uuid TEXT NOT NULL UNIQUE,
        campaign_urn TEXT,
        campaign_name TEXT,
        trigger_type TEXT NOT NULL,
        trigger_desc TEXT NOT NULL,
        action_desc TEXT NOT NULL,
        notif_desc TEXT NOT NULL,
        runtime_desc TEXT NOT NULL
    );
";

/// Shared SELECT column list for full-row queries.
const TRIGGER_SELECT: &str = "SELECT id, uuid, campaign_urn, campaign_name, trigger_type, \
     trigger_desc, action_desc, notif_desc, runtime_desc FROM triggers";

/// Map a database row to a TriggerRecord.
fn row_to_record(row: &rusqlite::Row) -> rusqlite::Result<TriggerRecord> {
    Ok(TriggerRecord {
        id: row.get(0)?,
        uuid: row.get(1)?,
        campaign_urn: row.get(2)?,
        campaign_name: row.get(3)?,
        trigger_type: row.get(4)?,
        trigger_desc: row.get(5)?,
        action_desc: row.get(6)?,
        notif_desc: row.get(7)?,
        runtime_desc: row.get(8)?,
    })
}

fn store_err(e: rusqlite::Error) -> NudgeError {
    NudgeError::Store(e.to_string())
}

/// Escape SQL LIKE wildcards so a fragment matches literally.
fn escape_like(fragment: &str) -> String {
    let mut out = String::with_capacity(fragment.len());
    for ch in fragment.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// The trigger store. Owns the connection; dropping the store releases
/// the underlying handle. Not for concurrent use from multiple threads.
pub struct TriggerStore {
    conn: Connection,
}

impl TriggerStore {
    /// Open or create the trigger database at the given path.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path).map_err(store_err)?;
        Self::from_connection(conn)
    }

    /// Open an in-memory store (tests, throwaway state).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(store_err)?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA case_sensitive_like = ON;",
        )
        .map_err(store_err)?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    /// Create the table, wiping it first when the recorded schema
    /// version does not match ours.
    fn init_schema(&self) -> Result<()> {
        let version: i32 = self
            .conn
            .query_row("PRAGMA user_version", [], |r| r.get(0))
            .map_err(store_err)?;

        if version != SCHEMA_VERSION {
            if version != 0 {
                tracing::warn!(
                    "trigger schema v{version} != v{SCHEMA_VERSION}, dropping all triggers"
                );
            }
            self.conn
                .execute_batch("DROP TABLE IF EXISTS triggers;")
                .map_err(store_err)?;
            self.conn
                .pragma_update(None, "user_version", SCHEMA_VERSION)
                .map_err(store_err)?;
        }

        self.conn
            .execute_batch(CREATE_TRIGGERS_TABLE)
            .map_err(store_err)?;
        Ok(())
    }

    /// Insert a new trigger. Returns the assigned row id, or `None` when
    /// a trigger with the same UUID already exists (the insert is
    /// silently ignored, never retried).
    pub fn insert(&self, trigger: &NewTrigger) -> Result<Option<i64>> {
        tracing::debug!(
            uuid = %trigger.uuid,
            trigger_type = %trigger.trigger_type,
            "store: insert"
        );
        let inserted = self
            .conn
            .execute(
                "INSERT OR IGNORE INTO triggers
                 (uuid, campaign_urn, campaign_name, trigger_type,
                  trigger_desc, action_desc, notif_desc, runtime_desc)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    trigger.uuid,
                    trigger.campaign_urn,
                    trigger.campaign_name,
                    trigger.trigger_type,
                    trigger.trigger_desc,
                    trigger.action_desc,
                    trigger.notif_desc,
                    trigger.runtime_desc,
                ],
            )
            .map_err(store_err)?;

        if inserted == 0 {
            tracing::debug!(uuid = %trigger.uuid, "store: duplicate uuid, insert ignored");
            return Ok(None);
        }
        Ok(Some(self.conn.last_insert_rowid()))
    }

    /// Get the row for a trigger id.
    pub fn get(&self, id: i64) -> Result<Option<TriggerRecord>> {
        let sql = format!("{TRIGGER_SELECT} WHERE id = ?1");
        self.conn
            .query_row(&sql, params![id], row_to_record)
            .optional()
            .map_err(store_err)
    }

    /// List triggers, optionally filtered by campaign and/or type. Both
    /// filters absent returns every row. Filters AND-combine. Rows come
    /// back in id order.
    pub fn list(
        &self,
        campaign_urn: Option<&str>,
        trigger_type: Option<&str>,
    ) -> Result<Vec<TriggerRecord>> {
        let mut clauses: Vec<&str> = Vec::new();
        let mut args: Vec<String> = Vec::new();
        if let Some(urn) = campaign_urn {
            clauses.push("campaign_urn = ?");
            args.push(urn.to_string());
        }
        if let Some(kind) = trigger_type {
            clauses.push("trigger_type = ?");
            args.push(kind.to_string());
        }

        let mut sql = String::from(TRIGGER_SELECT);
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY id");

        let mut stmt = self.conn.prepare(&sql).map_err(store_err)?;
        let rows = stmt
            .query_map(params_from_iter(args.iter()), row_to_record)
            .map_err(store_err)?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(store_err)
    }

    /// All triggers for a campaign, any type.
    pub fn list_for_campaign(&self, campaign_urn: &str) -> Result<Vec<TriggerRecord>> {
        self.list(Some(campaign_urn), None)
    }

    /// Triggers of a campaign whose action descriptor contains the given
    /// survey title as a literal, case-sensitive substring. Wildcard
    /// characters in the title match themselves, not patterns.
    pub fn list_by_survey_title(
        &self,
        campaign_urn: &str,
        title_fragment: &str,
    ) -> Result<Vec<TriggerRecord>> {
        let pattern = format!("%{}%", escape_like(title_fragment));
        let sql = format!(
            "{TRIGGER_SELECT} WHERE campaign_urn = ?1 AND action_desc LIKE ?2 ESCAPE '\\' ORDER BY id"
        );
        let mut stmt = self.conn.prepare(&sql).map_err(store_err)?;
        let rows = stmt
            .query_map(params![campaign_urn, pattern], row_to_record)
            .map_err(store_err)?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(store_err)
    }

    /// Distinct campaigns present across all rows, ordered by urn.
    pub fn campaigns(&self) -> Result<Vec<Campaign>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT DISTINCT campaign_urn, campaign_name FROM triggers
                 WHERE campaign_urn IS NOT NULL ORDER BY campaign_urn",
            )
            .map_err(store_err)?;
        let rows = stmt
            .query_map([], |row| {
                Ok(Campaign {
                    urn: row.get(0)?,
                    name: row.get(1)?,
                })
            })
            .map_err(store_err)?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(store_err)
    }

    // ─── Field getters ──────────────────────────────────────

    /// Notification descriptor of a trigger.
    pub fn notif_desc(&self, id: i64) -> Result<Option<String>> {
        self.text_field(id, "notif_desc")
    }

    /// Type string of a trigger.
    pub fn trigger_type(&self, id: i64) -> Result<Option<String>> {
        self.text_field(id, "trigger_type")
    }

    /// Trigger descriptor of a trigger.
    pub fn trigger_desc(&self, id: i64) -> Result<Option<String>> {
        self.text_field(id, "trigger_desc")
    }

    /// Action descriptor of a trigger.
    pub fn action_desc(&self, id: i64) -> Result<Option<String>> {
        self.text_field(id, "action_desc")
    }

    /// Runtime descriptor of a trigger.
    pub fn runtime_desc(&self, id: i64) -> Result<Option<String>> {
        self.text_field(id, "runtime_desc")
    }

    /// Campaign association of a trigger.
    pub fn campaign_info(&self, id: i64) -> Result<Option<CampaignInfo>> {
        self.conn
            .query_row(
                "SELECT campaign_urn, campaign_name FROM triggers WHERE id = ?1",
                params![id],
                |row| {
                    Ok(CampaignInfo {
                        urn: row.get(0)?,
                        name: row.get(1)?,
                    })
                },
            )
            .optional()
            .map_err(store_err)
    }

    fn text_field(&self, id: i64, column: &'static str) -> Result<Option<String>> {
        let sql = format!("SELECT {column} FROM triggers WHERE id = ?1");
        self.conn
            .query_row(&sql, params![id], |row| row.get(0))
            .optional()
            .map_err(store_err)
    }

    // ─── Field setters ──────────────────────────────────────

    /// Replace the trigger descriptor. `Ok(false)` when the id is stale.
    pub fn set_trigger_desc(&self, id: i64, desc: &str) -> Result<bool> {
        self.set_text_field(id, "trigger_desc", desc)
    }

    /// Replace the action descriptor. `Ok(false)` when the id is stale.
    pub fn set_action_desc(&self, id: i64, desc: &str) -> Result<bool> {
        self.set_text_field(id, "action_desc", desc)
    }

    /// Replace the runtime descriptor. `Ok(false)` when the id is stale.
    pub fn set_runtime_desc(&self, id: i64, desc: &str) -> Result<bool> {
        self.set_text_field(id, "runtime_desc", desc)
    }

    fn set_text_field(&self, id: i64, column: &'static str, value: &str) -> Result<bool> {
        let sql = format!("UPDATE triggers SET {column} = ?1 WHERE id = ?2");
        let updated = self
            .conn
            .execute(&sql, params![value, id])
            .map_err(store_err)?;
        if updated != 1 {
            tracing::debug!(id, column, "store: update matched no row");
            return Ok(false);
        }
        Ok(true)
    }

    /// Overwrite every row's notification descriptor. Used for global
    /// notification-format migrations. Returns the number of rows
    /// touched.
    pub fn set_all_notif_descs(&self, desc: &str) -> Result<usize> {
        tracing::debug!("store: rewriting all notification descriptors");
        self.conn
            .execute("UPDATE triggers SET notif_desc = ?1", params![desc])
            .map_err(store_err)
    }

    /// Delete a trigger. No-op when the id does not exist.
    pub fn delete(&self, id: i64) -> Result<()> {
        tracing::debug!(id, "store: delete");
        self.conn
            .execute("DELETE FROM triggers WHERE id = ?1", params![id])
            .map_err(store_err)?;
        Ok(())
    }

    /// Number of stored triggers.
    pub fn count(&self) -> Result<usize> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM triggers", [], |r| r.get(0))
            .map_err(store_err)?;
        Ok(n as usize)
    }
}
