//! Subcommand handlers. Each returns the process exit code on success.

use gudrun_config::GudrunConfig;
use gudrun_formats::{load, save, FormatError, FormatRegistry};
use gudrun_parser::{Document, DocumentLoader};
use std::path::{Path, PathBuf};
use tracing::debug;

fn load_document(config: &GudrunConfig, path: &str) -> Result<Document, FormatError> {
    if config.parsing.template {
        return Ok(DocumentLoader::from_path(path)?.parse_template()?);
    }
    let (document, format) = load(&FormatRegistry::with_defaults(), path)?;
    debug!(path, format = %format, "read input");
    Ok(document)
}

/// Data file directory, relative ones taken from the input file's directory.
fn data_dir(document: &Document) -> PathBuf {
    let dir = Path::new(&document.instrument.data_file_dir);
    if dir.is_relative() {
        Path::new(&document.instrument.gudrun_input_file_dir).join(dir)
    } else {
        dir.to_path_buf()
    }
}

pub fn inspect(config: &GudrunConfig, path: &str) -> Result<i32, FormatError> {
    let document = load_document(config, path)?;
    for record in document.records() {
        println!("{}{}", "  ".repeat(record.depth()), record.label());
    }
    Ok(0)
}

pub fn convert(
    config: &GudrunConfig,
    path: &str,
    to: Option<&str>,
    output: Option<&str>,
) -> Result<i32, FormatError> {
    let registry = FormatRegistry::with_defaults();
    let to = to.unwrap_or(&config.output.format);
    registry.get(to)?;

    let document = load_document(config, path)?;
    match output {
        Some(out) => {
            save(&registry, &document, out, Some(to))?;
            eprintln!("Wrote {}", out);
        }
        None => println!("{}", registry.serialize(&document, to)?),
    }
    Ok(0)
}

/// Exit code 1 when any referenced data file is missing.
pub fn check(config: &GudrunConfig, path: &str) -> Result<i32, FormatError> {
    let document = load_document(config, path)?;
    let dir = data_dir(&document);
    let missing = document.missing_data_files(&dir);

    if missing.is_empty() {
        println!("All data files present in {}", dir.display());
    } else {
        println!("Missing data files ({}):", missing.len());
        for file in &missing {
            println!("  {}", file.display());
        }
    }

    println!("Result files:");
    for sample in document.samples() {
        match document.result_file_for(sample, &config.output.result_extension) {
            Some(result) => {
                let status = if result.exists() {
                    "present"
                } else {
                    "not yet produced"
                };
                println!("  {}: {} ({})", sample.name, result.display(), status);
            }
            None => println!("  {}: no data files", sample.name),
        }
    }

    Ok(if missing.is_empty() { 0 } else { 1 })
}

pub fn prepare(config: &GudrunConfig, path: &str, dir: Option<&str>) -> Result<i32, FormatError> {
    let document = load_document(config, path)?;
    let dir = match dir {
        Some(dir) => PathBuf::from(dir),
        None => PathBuf::from(&document.instrument.gudrun_input_file_dir),
    };
    for written in document.write_for_processing(&dir, &config.output.file_name)? {
        println!("{}", written.display());
    }
    Ok(0)
}

pub fn formats() -> Result<i32, FormatError> {
    let registry = FormatRegistry::with_defaults();
    println!("Available formats:");
    for name in registry.list_formats() {
        let format = registry.get(&name)?;
        println!("  {:<6} {}", name, format.description());
    }
    Ok(0)
}
