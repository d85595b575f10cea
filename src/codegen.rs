//! Source emitters, one per target language.
//!
//! Every emitter is a pure function of the finalized shape list: it renders
//! one declaration per shape, in list order, and never looks back at the JSON.
pub mod csharp;
pub mod java;
pub mod kotlin;
pub mod python;
pub mod swift;
pub mod typescript;

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::ir::{ClassId, ClassShape, GeneratedClass};

// ————————————————————————————————————————————————————————————————————————————
// LANGUAGE TAG
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, clap::ValueEnum)]
#[serde(rename_all = "UPPERCASE")]
pub enum Language {
    Kotlin,
    Java,
    #[value(name = "typescript", alias = "ts")]
    TypeScript,
    Swift,
    #[value(alias = "py")]
    Python,
    #[value(name = "csharp", alias = "cs")]
    CSharp,
}

impl Language {
    pub const ALL: [Language; 6] = [
        Language::Kotlin,
        Language::Java,
        Language::TypeScript,
        Language::Swift,
        Language::Python,
        Language::CSharp,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Language::Kotlin => "Kotlin",
            Language::Java => "Java",
            Language::TypeScript => "TypeScript",
            Language::Swift => "Swift",
            Language::Python => "Python",
            Language::CSharp => "C#",
        }
    }

    pub fn file_extension(self) -> &'static str {
        match self {
            Language::Kotlin => "kt",
            Language::Java => "java",
            Language::TypeScript => "ts",
            Language::Swift => "swift",
            Language::Python => "py",
            Language::CSharp => "cs",
        }
    }

    pub fn emitter(self) -> &'static dyn Emitter {
        match self {
            Language::Kotlin => &kotlin::KotlinEmitter,
            Language::Java => &java::JavaEmitter,
            Language::TypeScript => &typescript::TypeScriptEmitter,
            Language::Swift => &swift::SwiftEmitter,
            Language::Python => &python::PythonEmitter,
            Language::CSharp => &csharp::CSharpEmitter,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown target language `{0}` (expected one of: kotlin, java, typescript, swift, python, csharp)")]
pub struct LanguageParseError(pub String);

impl FromStr for Language {
    type Err = LanguageParseError;

    /// Accepts the lowercase CLI names, the UPPERCASE UI tags, labels and
    /// file extensions.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lang = match s.trim().to_ascii_lowercase().as_str() {
            "kotlin" | "kt" => Language::Kotlin,
            "java" => Language::Java,
            "typescript" | "ts" => Language::TypeScript,
            "swift" => Language::Swift,
            "python" | "py" => Language::Python,
            "csharp" | "c#" | "cs" => Language::CSharp,
            _ => return Err(LanguageParseError(s.to_string())),
        };
        Ok(lang)
    }
}

// ————————————————————————————————————————————————————————————————————————————
// EMITTER
// ————————————————————————————————————————————————————————————————————————————

pub trait Emitter: Send + Sync {
    fn language(&self) -> Language;

    /// Render the declaration of one class. `shapes` is the whole finalized
    /// list, used to resolve `ObjectRef`s to class names.
    fn render_class(&self, shape: &ClassShape, shapes: &[ClassShape]) -> String;

    fn emit(&self, shapes: &[ClassShape]) -> Vec<GeneratedClass> {
        shapes.iter()
            .map(|shape| GeneratedClass {
                class_name: shape.name.clone(),
                code: self.render_class(shape, shapes),
            })
            .collect()
    }
}

// ————————————————————————————————————————————————————————————————————————————
// SHARED HELPERS
// ————————————————————————————————————————————————————————————————————————————

/// Fallback for a dangling reference; finalized lists never contain one.
const UNRESOLVED_CLASS: &str = "Object";

pub(crate) fn class_name(shapes: &[ClassShape], id: ClassId) -> &str {
    shapes.get(id.0).map(|s| s.name.as_str()).unwrap_or(UNRESOLVED_CLASS)
}

/// One field of a class as an emitter sees it.
#[derive(Debug)]
pub(crate) struct FieldView<'s> {
    pub key: &'s str,
    pub ident: String,
    pub ty: &'s crate::ir::TypeNode,
}

impl FieldView<'_> {
    /// The identifier spells the key exactly, so no rename annotation is needed.
    pub fn matches_key(&self) -> bool {
        self.ident == self.key
    }
}

/// Convert every key with `convert`, then make identifiers unique within the
/// class (`id`, `id2`, ...). `taken` pre-reserves names such as the class name.
pub(crate) fn field_views<'s>(
    shape: &'s ClassShape,
    convert: impl Fn(&str) -> String,
    taken: &[&str],
) -> Vec<FieldView<'s>> {
    let mut used: HashSet<String> = taken.iter().map(|s| s.to_string()).collect();
    shape.fields.iter()
        .map(|(key, ty)| {
            let base = convert(key);
            let mut ident = base.clone();
            let mut suffix = 2;
            while used.contains(&ident) {
                ident = format!("{base}{suffix}");
                suffix += 1;
            }
            used.insert(ident.clone());
            FieldView { key: key.as_str(), ident, ty }
        })
        .collect()
}

/// Double-quoted string literal. JSON escaping is valid in Kotlin, Java,
/// TypeScript, Python and C# source.
pub(crate) fn quoted(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| format!("\"{}\"", s.escape_default()))
}
