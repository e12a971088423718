//! Command handlers for the binary: turn parsed arguments into API calls and
//! print what comes back.

mod print;

use crate::args::{Cli, Commands, MetaArgs};
use complab::api::{ComponentFilter, ConfigAction, ExportFormat, ImportSource};
use complab::classify::rules::{detect_main_file, language_for_file};
use complab::classify::{ImportFile, ImportKind, ImportOverrides};
use complab::error::{ComplabError, Result};
use complab::init::{initialize, ComplabContext};
use complab::model::{ComponentMeta, SourceFiles};
use print::{print_component, print_components, print_config, print_messages};
use std::collections::HashSet;
use std::fs;
use std::io::Read;
use std::path::PathBuf;

pub fn run(cli: Cli) -> Result<()> {
    let mut ctx = initialize(cli.root)?;

    match cli.command {
        Some(Commands::List {
            search,
            framework,
            platform,
            tags,
        }) => {
            let filter = ComponentFilter {
                query: search,
                framework,
                platform,
                tags,
            };
            handle_list(&mut ctx, filter)
        }
        Some(Commands::Show { id, json }) => handle_show(&ctx, &id, json),
        Some(Commands::Save { meta, files }) => handle_save(&mut ctx, meta, files),
        Some(Commands::Delete { ids }) => handle_delete(&mut ctx, ids),
        Some(Commands::Import {
            kind,
            inputs,
            meta,
            replace,
        }) => handle_import(&mut ctx, kind, inputs, meta, replace),
        Some(Commands::Export { id, format, out }) => handle_export(&ctx, &id, &format, out),
        Some(Commands::Doctor) => handle_doctor(&mut ctx),
        Some(Commands::Path { ids }) => handle_paths(&ctx, ids),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
        None => handle_list(&mut ctx, ComponentFilter::default()),
    }
}

fn handle_list(ctx: &mut ComplabContext, filter: ComponentFilter) -> Result<()> {
    let result = ctx.api.list(&filter)?;
    print_components(&result.listed);
    print_messages(&result.messages);
    Ok(())
}

fn handle_show(ctx: &ComplabContext, id: &str, json: bool) -> Result<()> {
    let result = ctx.api.get(id)?;
    if let Some(component) = &result.component {
        if json {
            let out =
                serde_json::to_string_pretty(component).map_err(ComplabError::Serialization)?;
            println!("{}", out);
        } else {
            print_component(component, result.paths.first().map(PathBuf::as_path));
        }
    }
    print_messages(&result.messages);
    Ok(())
}

/// Files are stored by base name, so two paths ending in the same name are refused.
fn read_source_files(paths: &[PathBuf]) -> Result<Vec<ImportFile>> {
    let mut seen = HashSet::new();
    paths
        .iter()
        .map(|path| {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .ok_or_else(|| ComplabError::Api(format!("Not a file: {}", path.display())))?;
            if !seen.insert(name.clone()) {
                return Err(ComplabError::Invalid(format!(
                    "more than one file is named '{}'",
                    name
                )));
            }
            let content = fs::read_to_string(path).map_err(ComplabError::Io)?;
            Ok(ImportFile::new(name, content))
        })
        .collect()
}

fn handle_save(ctx: &mut ComplabContext, args: MetaArgs, paths: Vec<PathBuf>) -> Result<()> {
    let name = args
        .name
        .ok_or_else(|| ComplabError::Api("--name is required".into()))?;
    let framework = args
        .framework
        .ok_or_else(|| ComplabError::Api("--framework is required".into()))?;

    let files = read_source_files(&paths)?;
    let main_file = args.main_file.unwrap_or_else(|| detect_main_file(&files));

    let mut meta = ComponentMeta::new(name, framework);
    meta.description = args.description.unwrap_or_default();
    meta.platform = args
        .platform
        .unwrap_or_else(|| ctx.config.default_platform.clone());
    meta.language = args
        .language
        .or_else(|| language_for_file(&main_file).map(str::to_string))
        .unwrap_or_default();
    if let Some(version) = args.version {
        meta.version = version;
    }
    meta.author = args.author.unwrap_or_default();
    meta.tags = args.tags;
    meta.external_styles = args.external_styles;
    meta.source_files = files.iter().map(|f| f.name.clone()).collect();
    meta.main_file = main_file;

    let sources: SourceFiles = files.into_iter().map(|f| (f.name, f.content)).collect();
    let result = ctx.api.save(meta, sources)?;
    print_messages(&result.messages);
    for path in &result.paths {
        println!("{}", path.display());
    }
    Ok(())
}

fn handle_delete(ctx: &mut ComplabContext, ids: Vec<String>) -> Result<()> {
    let result = ctx.api.delete(&ids)?;
    print_messages(&result.messages);
    Ok(())
}

fn read_snippet(inputs: &[PathBuf]) -> Result<String> {
    match inputs {
        [] => Err(ComplabError::Api(
            "snippet import needs a file, or - for stdin".into(),
        )),
        [path] if path.as_os_str() == "-" => {
            let mut code = String::new();
            std::io::stdin()
                .read_to_string(&mut code)
                .map_err(ComplabError::Io)?;
            Ok(code)
        }
        [path] => fs::read_to_string(path).map_err(ComplabError::Io),
        _ => Err(ComplabError::Api(
            "snippet import takes a single file".into(),
        )),
    }
}

fn handle_import(
    ctx: &mut ComplabContext,
    kind: String,
    inputs: Vec<PathBuf>,
    args: MetaArgs,
    replace: bool,
) -> Result<()> {
    let is_snippet = matches!(kind.parse::<ImportKind>(), Ok(ImportKind::Snippet));

    let mut overrides = ImportOverrides {
        name: args.name,
        description: args.description,
        framework: args.framework,
        platform: args.platform,
        language: None,
        version: args.version,
        author: args.author,
        main_file: args.main_file,
        tags: args.tags,
        external_styles: args.external_styles,
        replace,
    };

    // A snippet's language picks its file extension, so it travels with the code.
    let source = if is_snippet {
        ImportSource::Code {
            code: read_snippet(&inputs)?,
            language: args.language,
        }
    } else {
        overrides.language = args.language;
        ImportSource::Paths(inputs)
    };

    let result = ctx.api.import_from(&kind, source, overrides)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_export(ctx: &ComplabContext, id: &str, format: &str, out: Option<PathBuf>) -> Result<()> {
    let format: ExportFormat = format.parse()?;
    let result = ctx.api.export(id, format, out)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_doctor(ctx: &mut ComplabContext) -> Result<()> {
    let result = ctx.api.doctor()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_paths(ctx: &ComplabContext, ids: Vec<String>) -> Result<()> {
    let result = ctx.api.component_paths(&ids)?;
    for path in &result.paths {
        println!("{}", path.display());
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &ComplabContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };

    let result = ctx.api.config(action)?;
    if result.messages.is_empty() {
        if let Some(config) = &result.config {
            print_config(config);
        }
    }
    print_messages(&result.messages);
    Ok(())
}
