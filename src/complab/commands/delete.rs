use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::DataStore;

/// Removes every component named in `ids`. All ids are resolved first, so an
/// unknown id fails the call before anything is deleted.
pub fn run<S: DataStore, I: AsRef<str>>(store: &mut S, ids: &[I]) -> Result<CmdResult> {
    let locations = ids
        .iter()
        .map(|id| store.locate_for_removal(id.as_ref()))
        .collect::<Result<Vec<_>>>()?;

    let mut result = CmdResult::default();
    for location in locations {
        store.remove(&location)?;
        result.add_message(CmdMessage::success(format!(
            "Deleted {} ({})",
            location.dir_name, location.shard
        )));
        result.paths.push(location.path);
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::save;
    use crate::error::ComplabError;
    use crate::model::{ComponentMeta, SourceFiles};
    use crate::store::memory::InMemoryStore;

    fn add(store: &mut InMemoryStore, name: &str) {
        let mut files = SourceFiles::new();
        files.insert("index.html".into(), "<p/>".into());
        save::run(store, ComponentMeta::new(name, "HTML"), files).unwrap();
    }

    #[test]
    fn deletes_component() {
        let mut store = InMemoryStore::new();
        add(&mut store, "Hero");
        let result = run(&mut store, &["hero"]).unwrap();
        assert_eq!(result.messages[0].content, "Deleted hero (HTML)");
        assert!(!store.contains_dir("HTML", "hero"));
        assert!(matches!(store.find("hero"), Err(ComplabError::NotFound(_))));
    }

    #[test]
    fn unknown_id_deletes_nothing() {
        let mut store = InMemoryStore::new();
        add(&mut store, "Hero");
        let err = run(&mut store, &["hero", "ghost"]).unwrap_err();
        assert!(matches!(err, ComplabError::NotFound(id) if id == "ghost"));
        assert!(store.contains_dir("HTML", "hero"));
    }

    #[test]
    fn orphan_is_deleted_by_directory_name() {
        let mut store = InMemoryStore::new();
        store.insert_orphan("Vue", "broken");
        run(&mut store, &["broken"]).unwrap();
        assert!(!store.contains_dir("Vue", "broken"));
    }
}
