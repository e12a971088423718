use crate::commands::{CmdMessage, CmdResult};
use crate::error::{ComplabError, Result};
use crate::model::{Component, ComponentMeta, SourceFiles, META_FILENAME};
use crate::store::DataStore;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::Serialize;
use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    /// `{ "meta": ..., "source_files": { name: content } }`
    #[default]
    Json,
    /// gzip-compressed tar with everything under `<id>/`
    Archive,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Archive => "tar.gz",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ComplabError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "archive" | "tar" | "tar.gz" | "tgz" => Ok(ExportFormat::Archive),
            other => Err(ComplabError::Api(format!("Unknown export format: {}", other))),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Archive => write!(f, "archive"),
        }
    }
}

#[derive(Serialize)]
struct Bundle<'a> {
    meta: &'a ComponentMeta,
    source_files: &'a SourceFiles,
}

/// Writes one component to `dest`, or to `<id>.<ext>` in the working
/// directory when no destination is given.
pub fn run<S: DataStore>(
    store: &S,
    id: &str,
    format: ExportFormat,
    dest: Option<PathBuf>,
) -> Result<CmdResult> {
    let entry = store.find(id)?;
    let component = store.load(&entry)?;

    let dest = dest.unwrap_or_else(|| {
        PathBuf::from(format!("{}.{}", component.meta.id, format.extension()))
    });
    let file = File::create(&dest).map_err(ComplabError::Io)?;
    match format {
        ExportFormat::Json => write_bundle(file, &component)?,
        ExportFormat::Archive => write_archive(file, &component)?,
    }

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Exported {} to {}",
        component.meta.id,
        dest.display()
    )));
    Ok(result.with_paths(vec![dest]))
}

fn write_bundle<W: Write>(mut writer: W, component: &Component) -> Result<()> {
    let bundle = Bundle {
        meta: &component.meta,
        source_files: &component.files,
    };
    serde_json::to_writer_pretty(&mut writer, &bundle).map_err(ComplabError::Serialization)?;
    writer.flush().map_err(ComplabError::Io)?;
    Ok(())
}

fn write_archive<W: Write>(writer: W, component: &Component) -> Result<()> {
    let enc = GzEncoder::new(writer, Compression::default());
    let mut tar = tar::Builder::new(enc);
    let id = &component.meta.id;
    let mtime = component.meta.updated.timestamp().max(0) as u64;

    let meta_json =
        serde_json::to_string_pretty(&component.meta).map_err(ComplabError::Serialization)?;
    let entries = std::iter::once((META_FILENAME, meta_json.as_str())).chain(
        component
            .files
            .iter()
            .map(|(name, content)| (name.as_str(), content.as_str())),
    );

    for (name, content) in entries {
        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        header.set_mtime(mtime);
        header.set_cksum();

        tar.append_data(&mut header, format!("{}/{}", id, name), content.as_bytes())
            .map_err(ComplabError::Io)?;
    }

    tar.into_inner()
        .map_err(ComplabError::Io)?
        .finish()
        .map_err(ComplabError::Io)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::save;
    use crate::store::memory::InMemoryStore;
    use flate2::read::GzDecoder;
    use std::io::Read;
    use tempfile::TempDir;

    fn store_with_card() -> InMemoryStore {
        let mut store = InMemoryStore::new();
        let mut files = SourceFiles::new();
        files.insert("Card.jsx".into(), "jsx".into());
        files.insert("styles/card.css".into(), "css".into());
        save::run(&mut store, ComponentMeta::new("Card", "React"), files).unwrap();
        store
    }

    #[test]
    fn parses_formats() {
        assert_eq!("JSON".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert_eq!("tgz".parse::<ExportFormat>().unwrap(), ExportFormat::Archive);
        assert!("zip".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn json_bundle_has_meta_and_sources() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("card.json");
        let store = store_with_card();

        let result = run(&store, "card", ExportFormat::Json, Some(dest.clone())).unwrap();
        assert_eq!(result.paths, vec![dest.clone()]);

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&dest).unwrap()).unwrap();
        assert_eq!(value["meta"]["id"], "card");
        assert_eq!(value["source_files"]["styles/card.css"], "css");
    }

    #[test]
    fn archive_nests_files_under_id() {
        let store = store_with_card();
        let entry = store.find("card").unwrap();
        let component = store.load(&entry).unwrap();

        let mut buf = Vec::new();
        write_archive(&mut buf, &component).unwrap();
        assert_eq!(buf[0], 0x1f);
        assert_eq!(buf[1], 0x8b);

        let mut archive = tar::Archive::new(GzDecoder::new(buf.as_slice()));
        let mut names = Vec::new();
        for entry in archive.entries().unwrap() {
            let mut entry = entry.unwrap();
            let name = entry.path().unwrap().to_string_lossy().into_owned();
            let mut content = String::new();
            entry.read_to_string(&mut content).unwrap();
            if name == "card/Card.jsx" {
                assert_eq!(content, "jsx");
            }
            names.push(name);
        }
        assert_eq!(
            names,
            vec!["card/meta.json", "card/Card.jsx", "card/styles/card.css"]
        );
    }

    #[test]
    fn unknown_id_fails_before_writing() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("x.json");
        let store = InMemoryStore::new();
        assert!(run(&store, "nope", ExportFormat::Json, Some(dest.clone())).is_err());
        assert!(!dest.exists());
    }
}
