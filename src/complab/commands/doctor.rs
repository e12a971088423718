use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{DataStore, OrphanReason};

pub fn run<S: DataStore>(store: &mut S) -> Result<CmdResult> {
    let report = store.scan();
    let mut result = CmdResult::default();

    if report.orphans.is_empty() && report.skipped_shards.is_empty() {
        result.add_message(CmdMessage::success(format!(
            "No inconsistencies found ({} components).",
            report.entries.len()
        )));
        return Ok(result);
    }

    if !report.orphans.is_empty() {
        let removed = store.reconcile(&report.orphans);
        result.add_message(CmdMessage::warning("Inconsistencies found and fixed:"));
        for orphan in &report.orphans {
            let why = match &orphan.reason {
                OrphanReason::MissingMeta => "no metadata".to_string(),
                OrphanReason::CorruptMeta(e) => format!("unreadable metadata: {}", e),
                OrphanReason::Leftover => "interrupted write".to_string(),
            };
            result.add_message(CmdMessage::info(format!(
                "  - {}/{}: {}",
                orphan.location.shard, orphan.location.dir_name, why
            )));
            result.paths.push(orphan.location.path.clone());
        }
        result.add_message(CmdMessage::success(format!(
            "Removed {} invalid director{}.",
            removed,
            if removed == 1 { "y" } else { "ies" }
        )));
    }

    for shard in &report.skipped_shards {
        result.add_message(CmdMessage::error(format!(
            "Could not read {}",
            shard.display()
        )));
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{save, CmdMessage};
    use crate::model::{ComponentMeta, SourceFiles};
    use crate::store::memory::InMemoryStore;

    fn contents(messages: &[CmdMessage]) -> Vec<&str> {
        messages.iter().map(|m| m.content.as_str()).collect()
    }

    #[test]
    fn clean_store() {
        let mut store = InMemoryStore::new();
        let mut files = SourceFiles::new();
        files.insert("a.js".into(), "".into());
        save::run(&mut store, ComponentMeta::new("A", "JavaScript"), files).unwrap();

        let result = run(&mut store).unwrap();
        assert_eq!(
            contents(&result.messages),
            vec!["No inconsistencies found (1 components)."]
        );
    }

    #[test]
    fn removes_orphans() {
        let mut store = InMemoryStore::new();
        store.insert_orphan("React", "one");
        store.insert_orphan("Vue", "two");

        let result = run(&mut store).unwrap();
        let messages = contents(&result.messages);
        assert!(messages.contains(&"  - React/one: no metadata"));
        assert!(messages.contains(&"Removed 2 invalid directories."));
        assert_eq!(result.paths.len(), 2);
        assert!(store.scan().orphans.is_empty());
    }
}
