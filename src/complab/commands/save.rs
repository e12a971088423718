use crate::commands::{list, CmdMessage, CmdResult};
use crate::error::{ComplabError, Result};
use crate::model::{
    derive_id, is_previewable, normalize_tags, ComponentMeta, SourceFiles, StoredEntry,
};
use crate::store::layout::{validate_file_name, validate_segment};
use crate::store::{DataStore, EntryLocation};
use chrono::Utc;
use std::path::Path;

/// Checks a metadata record against its file set and fills in every derived
/// field: `id`, `previewable`, `source_files` and normalized `tags`.
///
/// `source_files` keeps the order the caller listed, drops names that have no
/// file and appends files the caller did not list.
pub fn prepare(mut meta: ComponentMeta, files: &SourceFiles) -> Result<ComponentMeta> {
    meta.name = meta.name.trim().to_string();
    if meta.name.is_empty() {
        return Err(ComplabError::Invalid("name cannot be empty".to_string()));
    }
    meta.id = derive_id(&meta.name);
    if meta.id.is_empty() {
        return Err(ComplabError::Invalid(format!(
            "name '{}' has no letters or digits to derive an id from",
            meta.name
        )));
    }
    meta.framework = meta.framework.trim().to_string();
    validate_segment("framework", &meta.framework)?;

    if files.is_empty() {
        return Err(ComplabError::Invalid(format!(
            "{} has no source files",
            meta.name
        )));
    }
    for name in files.keys() {
        validate_file_name(name)?;
    }
    if !meta.main_file.is_empty() && !files.contains_key(&meta.main_file) {
        return Err(ComplabError::Invalid(format!(
            "main file '{}' is not one of the source files",
            meta.main_file
        )));
    }

    let mut ordered: Vec<String> = Vec::with_capacity(files.len());
    for name in meta.source_files.iter().chain(files.keys()) {
        if files.contains_key(name) && !ordered.contains(name) {
            ordered.push(name.clone());
        }
    }
    meta.source_files = ordered;
    meta.tags = normalize_tags(&meta.tags);
    meta.previewable = is_previewable(&meta.framework);
    Ok(meta)
}

/// Removes every valid entry carrying `id` other than the one at `kept`, so a
/// write leaves exactly one entry per id. Returns what was removed.
pub fn remove_duplicates<S: DataStore>(store: &mut S, id: &str, kept: &Path) -> Result<Vec<StoredEntry>> {
    let stale: Vec<StoredEntry> = store
        .scan()
        .entries
        .into_iter()
        .filter(|entry| entry.meta.id == id && !store.same_entry(&entry.path, kept))
        .collect();
    for entry in &stale {
        store.remove(&EntryLocation::from(entry))?;
    }
    Ok(stale)
}

/// Creates or replaces a component.
///
/// An existing component with the same id keeps its `created` time. Once the
/// new entry is written any other directory holding that id is removed.
pub fn run<S: DataStore>(store: &mut S, meta: ComponentMeta, files: SourceFiles) -> Result<CmdResult> {
    let mut meta = prepare(meta, &files)?;
    let existing = store.find(&meta.id).ok();

    if let Some(existing) = &existing {
        meta.created = existing.meta.created;
    }
    meta.updated = Utc::now();

    let path = store.persist(&meta, &files)?;
    let removed = remove_duplicates(store, &meta.id, &path)?;

    let mut result = CmdResult::default();
    if let Some(moved) = removed.iter().find(|entry| entry.shard != meta.framework) {
        result.add_message(CmdMessage::info(format!(
            "Moved {} from {} to {}",
            meta.id, moved.shard, meta.framework
        )));
    }
    if existing.is_some() {
        result.add_message(CmdMessage::success(format!("Updated {} ({})", meta.name, meta.id)));
    } else {
        result.add_message(CmdMessage::success(format!("Saved {} ({})", meta.name, meta.id)));
    }

    // Callers must not keep a stale view; hand back a fresh listing.
    let listed = list::collect(store, &list::ComponentFilter::default());
    Ok(result
        .with_affected(vec![meta])
        .with_paths(vec![path])
        .with_listed(listed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::get;
    use crate::store::fs::FileStore;
    use crate::store::memory::InMemoryStore;
    use std::fs;
    use tempfile::TempDir;

    fn files(names: &[&str]) -> SourceFiles {
        names
            .iter()
            .map(|n| (n.to_string(), format!("// {}", n)))
            .collect()
    }

    #[test]
    fn derives_fields() {
        let mut meta = ComponentMeta::new("My Card!", "React");
        meta.id = "whatever".into();
        meta.previewable = false;
        meta.tags = vec![" ui ".into(), "ui".into(), "".into()];
        meta.source_files = vec!["b.js".into(), "gone.js".into()];

        let prepared = prepare(meta, &files(&["a.js", "b.js"])).unwrap();
        assert_eq!(prepared.id, "mycard");
        assert!(prepared.previewable);
        assert_eq!(prepared.tags, vec!["ui"]);
        assert_eq!(prepared.source_files, vec!["b.js", "a.js"]);
    }

    #[test]
    fn rejects_invalid_records() {
        let ok = files(&["a.js"]);
        assert!(prepare(ComponentMeta::new("  ", "React"), &ok).is_err());
        assert!(prepare(ComponentMeta::new("!!!", "React"), &ok).is_err());
        assert!(prepare(ComponentMeta::new("Card", "../etc"), &ok).is_err());
        assert!(prepare(ComponentMeta::new("Card", "React"), &SourceFiles::new()).is_err());
        assert!(prepare(ComponentMeta::new("Card", "React"), &files(&["../x.js"])).is_err());
        assert!(prepare(ComponentMeta::new("Card", "React"), &files(&["meta.json"])).is_err());

        let mut meta = ComponentMeta::new("Card", "React");
        meta.main_file = "missing.js".into();
        assert!(matches!(prepare(meta, &ok), Err(ComplabError::Invalid(_))));
    }

    #[test]
    fn save_then_get_round_trips() {
        let mut store = InMemoryStore::new();
        let mut meta = ComponentMeta::new("Card", "Vue");
        meta.description = "a card".into();
        meta.main_file = "Card.vue".into();
        let files = files(&["Card.vue", "card.css"]);

        let result = run(&mut store, meta, files.clone()).unwrap();
        assert_eq!(result.listed.len(), 1);
        assert_eq!(result.paths.len(), 1);

        let component = get::run(&store, "card").unwrap().component.unwrap();
        assert_eq!(component.meta, result.affected[0]);
        assert_eq!(component.files, files);
    }

    #[test]
    fn overwrite_keeps_created_and_replaces_files() {
        let mut store = InMemoryStore::new();
        let first = run(&mut store, ComponentMeta::new("Card", "React"), files(&["a.js", "b.js"]))
            .unwrap()
            .affected
            .remove(0);

        let second = run(&mut store, ComponentMeta::new("card", "React"), files(&["c.js"])).unwrap();
        assert_eq!(second.affected[0].created, first.created);
        assert!(second.messages[0].content.starts_with("Updated"));

        let component = get::run(&store, "card").unwrap().component.unwrap();
        assert_eq!(component.meta.source_files, vec!["c.js"]);
        assert_eq!(component.files.len(), 1);
    }

    #[test]
    fn changing_framework_moves_the_entry() {
        let mut store = InMemoryStore::new();
        run(&mut store, ComponentMeta::new("Card", "React"), files(&["a.js"])).unwrap();
        let result = run(&mut store, ComponentMeta::new("Card", "Vue"), files(&["a.vue"])).unwrap();

        assert!(!store.contains_dir("React", "card"));
        assert!(store.contains_dir("Vue", "card"));
        assert_eq!(result.listed.len(), 1);
        assert_eq!(result.listed[0].meta.framework, "Vue");
        assert_eq!(result.listed[0].shard, "Vue");
        assert!(result.messages[0].content.starts_with("Moved card from React"));
    }

    #[test]
    fn resave_removes_same_framework_copy_under_another_directory() {
        let temp = TempDir::new().unwrap();
        let mut store = FileStore::new(temp.path());
        let meta = prepare(ComponentMeta::new("Card", "React"), &files(&["a.js"])).unwrap();
        store.persist(&meta, &files(&["a.js"])).unwrap();
        fs::rename(temp.path().join("React/card"), temp.path().join("React/somedir")).unwrap();

        let result = run(&mut store, ComponentMeta::new("Card", "React"), files(&["b.js"])).unwrap();

        assert!(!temp.path().join("React/somedir").exists());
        assert!(temp.path().join("React/card/b.js").exists());
        assert_eq!(result.listed.len(), 1);
        assert_eq!(result.listed[0].path, temp.path().join("React/card"));
        assert_eq!(result.affected[0].created, meta.created);
        assert!(result.messages[0].content.starts_with("Updated"));
    }

    #[cfg(unix)]
    #[test]
    fn resave_keeps_entry_reached_through_another_spelling() {
        let temp = TempDir::new().unwrap();
        let mut store = FileStore::new(temp.path());
        run(&mut store, ComponentMeta::new("Card", "React"), files(&["a.js"])).unwrap();
        // Both shard spellings resolve to one directory, as on a case-insensitive disk.
        std::os::unix::fs::symlink(temp.path().join("React"), temp.path().join("react")).unwrap();

        run(&mut store, ComponentMeta::new("Card", "React"), files(&["b.js"])).unwrap();

        assert!(temp.path().join("React/card/meta.json").exists());
        assert!(temp.path().join("React/card/b.js").exists());
    }
}
