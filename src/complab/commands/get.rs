use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::DataStore;

pub fn run<S: DataStore>(store: &S, id: &str) -> Result<CmdResult> {
    let entry = store.find(id)?;
    let component = store.load(&entry)?;
    Ok(CmdResult::default()
        .with_paths(vec![entry.path])
        .with_component(component))
}
