//! Resume draft persistence. The resume itself is opaque JSON owned by the
//! client; only the envelope (version + timestamp) is interpreted here.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::settings::store::SettingsStore;
use crate::settings::{RESUME_DRAFT_KEY, STORAGE_VERSION};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeDraft {
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub resume: Value,
}

pub fn save_resume_draft(store: &dyn SettingsStore, resume: Value) -> Result<ResumeDraft> {
    let draft = ResumeDraft {
        version: STORAGE_VERSION.to_string(),
        timestamp: Utc::now(),
        resume,
    };
    let raw = serde_json::to_string(&draft).context("Failed to serialize resume draft")?;
    store.set(RESUME_DRAFT_KEY, raw);
    Ok(draft)
}

/// Returns the stored draft when it was written by this storage version.
/// Unreadable and outdated drafts are treated as absent.
pub fn load_resume_draft(store: &dyn SettingsStore) -> Option<ResumeDraft> {
    let raw = store.get(RESUME_DRAFT_KEY)?;

    let draft: ResumeDraft = match serde_json::from_str(&raw) {
        Ok(draft) => draft,
        Err(e) => {
            warn!("Ignoring unreadable resume draft: {e}");
            return None;
        }
    };

    if draft.version != STORAGE_VERSION {
        warn!(
            "Resume draft version mismatch ({} != {STORAGE_VERSION}), discarding",
            draft.version
        );
        return None;
    }
    Some(draft)
}

pub fn clear_resume_draft(store: &dyn SettingsStore) {
    store.remove(RESUME_DRAFT_KEY);
}
