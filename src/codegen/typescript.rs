//! TypeScript: `export interface` whose property names are the JSON keys
//! themselves, quoted when they are not plain identifiers.
use once_cell::sync::Lazy;
use regex::Regex;

use crate::codegen::{class_name, quoted, Emitter, Language};
use crate::ir::{ClassShape, TypeNode};

const INDENT: &str = "  ";

static PLAIN_PROPERTY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("valid regex"));

#[derive(Debug, Clone, Copy, Default)]
pub struct TypeScriptEmitter;

impl TypeScriptEmitter {
    fn type_name(&self, ty: &TypeNode, shapes: &[ClassShape]) -> String {
        match ty {
            TypeNode::Null => "any | null".to_string(),
            TypeNode::Boolean => "boolean".to_string(),
            TypeNode::Integer | TypeNode::Float => "number".to_string(),
            TypeNode::String => "string".to_string(),
            TypeNode::ArrayOf(el) => {
                let el = self.type_name(el, shapes);
                if el.contains(' ') { format!("({el})[]") } else { format!("{el}[]") }
            }
            TypeNode::ObjectRef(id) => class_name(shapes, *id).to_string(),
            TypeNode::Unknown | TypeNode::Union(_) => "any".to_string(),
            TypeNode::Optional(inner) => format!("{} | null", self.type_name(inner, shapes)),
        }
    }
}

fn property(key: &str) -> String {
    if PLAIN_PROPERTY.is_match(key) { key.to_string() } else { quoted(key) }
}

impl Emitter for TypeScriptEmitter {
    fn language(&self) -> Language { Language::TypeScript }

    fn render_class(&self, shape: &ClassShape, shapes: &[ClassShape]) -> String {
        if shape.fields.is_empty() {
            return format!("export interface {} {{}}", shape.name);
        }
        let mut out = format!("export interface {} {{\n", shape.name);
        for (key, ty) in &shape.fields {
            out.push_str(&format!("{INDENT}{}: {};\n", property(key), self.type_name(ty, shapes)));
        }
        out.push('}');
        out
    }
}
