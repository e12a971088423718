use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::DataStore;

pub fn run<S: DataStore, I: AsRef<str>>(store: &S, ids: &[I]) -> Result<CmdResult> {
    let mut paths = Vec::with_capacity(ids.len());
    for id in ids {
        paths.push(store.find(id.as_ref())?.path);
    }
    Ok(CmdResult::default().with_paths(paths))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::save;
    use crate::model::{ComponentMeta, SourceFiles};
    use crate::store::memory::InMemoryStore;
    use std::path::PathBuf;

    #[test]
    fn returns_entry_paths_in_order() {
        let mut store = InMemoryStore::new();
        let mut files = SourceFiles::new();
        files.insert("x.dart".into(), "".into());
        save::run(&mut store, ComponentMeta::new("Tile", "Flutter"), files.clone()).unwrap();
        save::run(&mut store, ComponentMeta::new("Chip", "Flutter"), files).unwrap();

        let result = run(&store, &["tile", "chip"]).unwrap();
        assert_eq!(
            result.paths,
            vec![
                PathBuf::from("/mem/Flutter/tile"),
                PathBuf::from("/mem/Flutter/chip")
            ]
        );
    }

    #[test]
    fn unknown_id_fails() {
        let store = InMemoryStore::new();
        assert!(run(&store, &["nope"]).is_err());
    }
}
