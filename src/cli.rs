//! Command line: JSON files → (models | shapes | format)
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use rayon::prelude::*;
use serde_json::Value;

use crate::codegen::Language;
use crate::error::{InputError, OutputError};
use crate::generator::{GeneratorOptions, ModelGenerator, DEFAULT_ROOT_NAME};
use crate::ir::{ClassShape, GeneratedClass};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// infer data models from example JSON documents and emit them as source code
#[derive(Parser, Debug)]
#[command(name = "json-models", version)]
pub struct CommandLineInterface {
    /// log debug output to stderr (overrides RUST_LOG)
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// generate model classes in the target language
    Models(ModelsOut),
    /// print the inferred, deduplicated class shapes as JSON
    Shapes(ShapesOut),
    /// pretty-print or minify the input JSON, keeping key order
    Format(FormatOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// JSON Pointer to select a subnode in each document (e.g. /data/items/0/payload)
    #[arg(long)]
    json_pointer: Option<String>,

    /// JQ pre-process filter for each document; every output is a document
    #[arg(long)]
    jq_expr: Option<String>,

    /// One or more inputs. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(clap::Parser, Debug)]
struct ModelsOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// target language
    #[arg(long, short, value_enum, default_value_t = Language::Kotlin)]
    lang: Language,

    /// name of the top-level class
    #[arg(long, default_value = DEFAULT_ROOT_NAME)]
    root_type: String,

    /// output directory, one file per class (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(clap::Parser, Debug)]
struct ShapesOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// name of the top-level class
    #[arg(long, default_value = DEFAULT_ROOT_NAME)]
    root_type: String,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(clap::Parser, Debug)]
struct FormatOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// single-line output instead of 2-space indentation
    #[arg(long)]
    minify: bool,
}

/// One JSON value to process, with where it came from.
#[derive(Debug, Clone)]
struct Document {
    path: PathBuf,
    /// Position among the outputs of a jq filter that produced several.
    index: Option<usize>,
    value: Value,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    /// Resolve, read and pre-filter every input. Files are read in parallel;
    /// documents come back in input order.
    fn load(&self) -> Result<Vec<Document>, InputError> {
        let source_paths = resolve_file_path_patterns(&self.input)?;
        let per_file = source_paths
            .par_iter()
            .map(|path| self.load_file(path))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(per_file.into_iter().flatten().collect())
    }

    fn load_file(&self, path: &Path) -> Result<Vec<Document>, InputError> {
        let source = std::fs::read_to_string(path)
            .map_err(|source| InputError::Read { path: path.to_path_buf(), source })?;
        let json_value = serde_json::from_str::<Value>(&source)
            .map_err(|error| InputError::parse(path.to_path_buf(), error))?;

        let json_value = match self.json_pointer.as_ref() {
            None => json_value,
            Some(pointer) => json_value.pointer(pointer).cloned().ok_or_else(|| InputError::PointerMiss {
                pointer: pointer.clone(),
                path: path.to_path_buf(),
            })?,
        };

        let values = match self.jq_expr.as_ref() {
            None => vec![json_value],
            Some(jq_expr) => crate::jq_exec::run_jaq(jq_expr, &json_value)
                .map_err(|source| InputError::Jq { path: path.to_path_buf(), source })?,
        };

        let several = values.len() > 1;
        Ok(values.into_iter()
            .enumerate()
            .map(|(i, value)| Document { path: path.to_path_buf(), index: several.then_some(i), value })
            .collect())
    }
}

impl Document {
    /// Short, file-system safe name: the file stem, plus the jq output index.
    fn label(&self) -> String {
        let stem = self.path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "input".to_string());
        match self.index {
            Some(i) => format!("{stem}-{i}"),
            None => stem,
        }
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn run(&self) -> anyhow::Result<()> {
        match &self.cmd {
            Command::Models(target) => target.run(),
            Command::Shapes(target) => target.run(),
            Command::Format(target) => target.run(),
        }
    }
}

impl ModelsOut {
    fn run(&self) -> anyhow::Result<()> {
        let generator = ModelGenerator::with_options(GeneratorOptions::default().with_root_name(&self.root_type));
        let documents = self.input_settings.load()?;
        let outputs = documents
            .par_iter()
            .map(|doc| generator.generate(&doc.value, self.lang))
            .collect::<Vec<_>>();

        let extension = self.lang.file_extension();
        let several = documents.len() > 1;
        for (doc, classes) in documents.iter().zip(&outputs) {
            match self.out.as_ref() {
                Some(dir) => {
                    let dir = if several { dir.join(doc.label()) } else { dir.clone() };
                    write_classes(&dir, classes, extension)?;
                }
                None => {
                    if several {
                        println!("{}", format!("==> {} <==", doc.label()).dimmed());
                    }
                    for class in classes {
                        println!("{}", format!("// {}", class.file_name(extension)).cyan().bold());
                        println!("{}\n", class.code);
                    }
                }
            }
        }
        Ok(())
    }
}

impl ShapesOut {
    fn run(&self) -> anyhow::Result<()> {
        let generator = ModelGenerator::with_options(GeneratorOptions::default().with_root_name(&self.root_type));
        let documents = self.input_settings.load()?;
        let mut shapes = documents
            .par_iter()
            .map(|doc| generator.infer_shapes(&doc.value))
            .collect::<Vec<Vec<ClassShape>>>();

        let shapes_src = if shapes.len() == 1 {
            serde_json::to_string_pretty(&shapes.remove(0))?
        } else {
            serde_json::to_string_pretty(&shapes)?
        };
        match self.out.as_ref() {
            Some(out) => write_file(out, &shapes_src)?,
            None => println!("{shapes_src}"),
        }
        Ok(())
    }
}

impl FormatOut {
    fn run(&self) -> anyhow::Result<()> {
        for doc in self.input_settings.load()? {
            let text = if self.minify {
                serde_json::to_string(&doc.value)?
            } else {
                serde_json::to_string_pretty(&doc.value)?
            };
            println!("{text}");
        }
        Ok(())
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn write_classes(dir: &Path, classes: &[GeneratedClass], extension: &str) -> Result<(), OutputError> {
    for class in classes {
        write_file(&dir.join(class.file_name(extension)), &class.code)?;
    }
    Ok(())
}

fn write_file(path: &Path, contents: &str) -> Result<(), OutputError> {
    let to_error = |source| OutputError { path: path.to_path_buf(), source };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(to_error)?;
    }
    std::fs::write(path, contents).map_err(to_error)?;
    eprintln!("{} {}", "wrote".green(), path.display());
    Ok(())
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>, InputError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let entries = glob::glob(pattern)
                .map_err(|source| InputError::Pattern { pattern: pattern.to_string(), source })?;
            let mut matched_any = false;
            for entry in entries {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                return Err(InputError::NoMatch(pattern.to_string()));
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}
