//! C#: public class with auto-properties; keys that differ from the
//! PascalCase property name carry `[JsonPropertyName]`.
use crate::codegen::{class_name, field_views, quoted, Emitter, Language};
use crate::ir::{ClassShape, TypeNode};
use crate::naming::{identifier, pascal_case};

const INDENT: &str = "    ";

#[derive(Debug, Clone, Copy, Default)]
pub struct CSharpEmitter;

impl CSharpEmitter {
    fn type_name(&self, ty: &TypeNode, shapes: &[ClassShape]) -> String {
        match ty {
            TypeNode::Null => "object?".to_string(),
            TypeNode::Boolean => "bool".to_string(),
            TypeNode::Integer => "int".to_string(),
            TypeNode::Float => "double".to_string(),
            TypeNode::String => "string".to_string(),
            TypeNode::ArrayOf(el) => format!("List<{}>", self.type_name(el, shapes)),
            TypeNode::ObjectRef(id) => class_name(shapes, *id).to_string(),
            TypeNode::Unknown | TypeNode::Union(_) => "object".to_string(),
            TypeNode::Optional(inner) => format!("{}?", self.type_name(inner, shapes)),
        }
    }
}

impl Emitter for CSharpEmitter {
    fn language(&self) -> Language { Language::CSharp }

    fn render_class(&self, shape: &ClassShape, shapes: &[ClassShape]) -> String {
        // a member may not share its enclosing type's name
        let fields = field_views(
            shape,
            |k| {
                let ident = identifier(pascal_case(k));
                if ident == shape.name { format!("{ident}Value") } else { ident }
            },
            &[shape.name.as_str()],
        );

        let mut usings = Vec::new();
        if shape.has_array_field() {
            usings.push("using System.Collections.Generic;");
        }
        if fields.iter().any(|f| !f.matches_key()) {
            usings.push("using System.Text.Json.Serialization;");
        }

        let mut out = String::new();
        if !usings.is_empty() {
            out.push_str(&usings.join("\n"));
            out.push_str("\n\n");
        }
        out.push_str(&format!("public class {}\n{{\n", shape.name));
        for f in &fields {
            if !f.matches_key() {
                out.push_str(&format!("{INDENT}[JsonPropertyName({})]\n", quoted(f.key)));
            }
            out.push_str(&format!(
                "{INDENT}public {} {} {{ get; set; }}\n",
                self.type_name(f.ty, shapes),
                f.ident
            ));
        }
        out.push('}');
        out
    }
}
