//! Orchestration: JSON value → shapes → generated classes.
//!
//! Every call builds a fresh inferrer and registry, so repeated calls never
//! observe each other.
use serde_json::Value;

use crate::codegen::Language;
use crate::inference::ShapeInferrer;
use crate::ir::{ClassShape, GeneratedClass};

pub const DEFAULT_ROOT_NAME: &str = "Root";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Name of the class generated for the top-level value.
    pub root_name: String,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self { root_name: DEFAULT_ROOT_NAME.to_string() }
    }
}

impl GeneratorOptions {
    pub fn with_root_name(mut self, root_name: impl Into<String>) -> Self {
        self.root_name = root_name.into();
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct ModelGenerator {
    options: GeneratorOptions,
}

impl ModelGenerator {
    pub fn new() -> Self { Self::default() }

    pub fn with_options(options: GeneratorOptions) -> Self {
        Self { options }
    }

    /// The finalized, deduplicated, named shape list. Element 0 is the root.
    pub fn infer_shapes(&self, json: &Value) -> Vec<ClassShape> {
        let mut inferrer = ShapeInferrer::new();
        inferrer.infer_root(json, &self.options.root_name);
        inferrer.into_registry().finalize()
    }

    pub fn generate(&self, json: &Value, language: Language) -> Vec<GeneratedClass> {
        let shapes = self.infer_shapes(json);
        let classes = language.emitter().emit(&shapes);
        tracing::debug!(language = %language, classes = classes.len(), "generated models");
        classes
    }
}

/// `generate` with default options.
pub fn generate(json: &Value, language: Language) -> Vec<GeneratedClass> {
    ModelGenerator::new().generate(json, language)
}
