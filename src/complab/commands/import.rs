use crate::classify::intake::{read_files, read_folder, IntakeOptions};
use crate::classify::{classify, ClassifyDefaults, ImportKind, ImportPayload, ImportRequest};
use crate::commands::{save, CmdMessage, CmdResult};
use crate::error::{ComplabError, Result};
use crate::store::DataStore;
use std::path::PathBuf;

/// Raw input as handed over by the caller, before it is read into a payload.
#[derive(Debug, Clone)]
pub enum ImportSource {
    Paths(Vec<PathBuf>),
    Code {
        code: String,
        language: Option<String>,
    },
}

/// Reads `source` from disk as the given kind of import.
pub fn gather(kind: ImportKind, source: ImportSource, options: &IntakeOptions) -> Result<ImportPayload> {
    match (kind, source) {
        (ImportKind::Folder, ImportSource::Paths(paths)) => match paths.as_slice() {
            [dir] => read_folder(dir, options),
            _ => Err(ComplabError::Api(
                "folder import takes exactly one directory".to_string(),
            )),
        },
        (ImportKind::Files, ImportSource::Paths(paths)) => {
            let files = read_files(&paths);
            if files.is_empty() {
                return Err(ComplabError::Invalid("no readable files to import".to_string()));
            }
            Ok(ImportPayload::Files(files))
        }
        (ImportKind::Snippet, ImportSource::Code { code, language }) => {
            Ok(ImportPayload::Snippet { code, language })
        }
        (kind, _) => Err(ComplabError::Api(format!(
            "{} import cannot take this kind of input",
            kind
        ))),
    }
}

/// Classifies and stores an import. An id already in the store is refused
/// unless the request asks to replace it.
pub fn run<S: DataStore>(
    store: &mut S,
    request: &ImportRequest,
    defaults: &ClassifyDefaults,
) -> Result<CmdResult> {
    let component = classify(request, defaults);
    let mut meta = save::prepare(component.meta, &component.files)?;

    if let Ok(existing) = store.find(&meta.id) {
        if !request.overrides.replace {
            return Err(ComplabError::IdCollision(meta.id));
        }
        meta.created = existing.meta.created;
    }

    let path = store.persist(&meta, &component.files)?;
    save::remove_duplicates(store, &meta.id, &path)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Imported {} as a {} component ({}, {} file{})",
        meta.name,
        meta.framework,
        meta.id,
        meta.source_files.len(),
        if meta.source_files.len() == 1 { "" } else { "s" }
    )));
    Ok(result.with_affected(vec![meta]).with_paths(vec![path]))
}
