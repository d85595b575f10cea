//! Infer typed data models from an example JSON document and render them as
//! Kotlin, Java, TypeScript, Swift, Python or C# declarations.
//!
//! ```
//! use json_models::{generate, Language};
//!
//! let json = serde_json::json!({"id": 1, "tags": ["a", "b"]});
//! let classes = generate(&json, Language::Kotlin);
//! assert_eq!(classes[0].class_name, "Root");
//! assert!(classes[0].code.contains("val tags: List<String>"));
//! ```
pub mod cli;
pub mod codegen;
pub mod error;
pub mod generator;
pub mod inference;
pub mod ir;
pub mod jq_exec;
pub mod naming;
pub mod registry;

pub use codegen::{Emitter, Language, LanguageParseError};
pub use generator::{generate, GeneratorOptions, ModelGenerator};
pub use ir::{ClassId, ClassShape, GeneratedClass, TypeNode};
