use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{ComponentMeta, StoredEntry};
use crate::store::DataStore;

/// Narrows a listing. Empty fields match everything.
#[derive(Debug, Clone, Default)]
pub struct ComponentFilter {
    /// Case-insensitive substring of name, description or any tag
    pub query: Option<String>,
    pub framework: Option<String>,
    pub platform: Option<String>,
    /// Every tag listed here must be present
    pub tags: Vec<String>,
}

impl ComponentFilter {
    pub fn is_empty(&self) -> bool {
        self.query.is_none() && self.framework.is_none() && self.platform.is_none() && self.tags.is_empty()
    }

    pub fn matches(&self, meta: &ComponentMeta) -> bool {
        if let Some(query) = &self.query {
            let query = query.to_lowercase();
            let hit = meta.name.to_lowercase().contains(&query)
                || meta.description.to_lowercase().contains(&query)
                || meta.tags.iter().any(|t| t.to_lowercase().contains(&query));
            if !hit {
                return false;
            }
        }
        if let Some(framework) = &self.framework {
            if &meta.framework != framework {
                return false;
            }
        }
        if let Some(platform) = &self.platform {
            if &meta.platform != platform {
                return false;
            }
        }
        self.tags.iter().all(|tag| meta.tags.contains(tag))
    }
}

/// Scans the store, removes orphaned directories and returns the valid
/// entries matching `filter`, sorted by name then id. Each entry keeps the
/// shard and directory it was found in.
pub fn collect<S: DataStore>(store: &mut S, filter: &ComponentFilter) -> Vec<StoredEntry> {
    let report = store.scan();
    if !report.orphans.is_empty() {
        store.reconcile(&report.orphans);
    }

    let mut entries: Vec<StoredEntry> = report
        .entries
        .into_iter()
        .filter(|entry| filter.matches(&entry.meta))
        .collect();
    entries.sort_by(|a, b| {
        a.meta
            .name
            .to_lowercase()
            .cmp(&b.meta.name.to_lowercase())
            .then_with(|| a.meta.id.cmp(&b.meta.id))
    });
    entries
}

pub fn run<S: DataStore>(store: &mut S, filter: &ComponentFilter) -> Result<CmdResult> {
    let listed = collect(store, filter);
    let mut result = CmdResult::default();
    if listed.is_empty() {
        if filter.is_empty() {
            result.add_message(CmdMessage::info("No components yet."));
        } else {
            result.add_message(CmdMessage::info("No components match."));
        }
    }
    Ok(result.with_listed(listed))
}
