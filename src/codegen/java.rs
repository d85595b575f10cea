//! Java: plain public class with public fields. Primitives box when nullable
//! or inside a `List`.
use crate::codegen::{class_name, field_views, quoted, Emitter, Language};
use crate::ir::{ClassShape, TypeNode};
use crate::naming::{camel_case, identifier};

const INDENT: &str = "    ";

const KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "false", "final",
    "finally", "float", "for", "goto", "if", "implements", "import", "instanceof", "int",
    "interface", "long", "native", "new", "null", "package", "private", "protected", "public",
    "record", "return", "short", "static", "strictfp", "super", "switch", "synchronized", "this",
    "throw", "throws", "transient", "true", "try", "var", "void", "volatile", "while", "yield",
];

#[derive(Debug, Clone, Copy, Default)]
pub struct JavaEmitter;

impl JavaEmitter {
    fn type_name(&self, ty: &TypeNode, boxed: bool, shapes: &[ClassShape]) -> String {
        let name = match ty {
            TypeNode::Boolean if !boxed => "boolean",
            TypeNode::Boolean => "Boolean",
            TypeNode::Integer if !boxed => "int",
            TypeNode::Integer => "Integer",
            TypeNode::Float if !boxed => "double",
            TypeNode::Float => "Double",
            TypeNode::String => "String",
            TypeNode::ArrayOf(el) => return format!("List<{}>", self.type_name(el, true, shapes)),
            TypeNode::ObjectRef(id) => class_name(shapes, *id),
            TypeNode::Null | TypeNode::Unknown | TypeNode::Union(_) => "Object",
            TypeNode::Optional(inner) => return self.type_name(inner, true, shapes),
        };
        name.to_string()
    }
}

fn ident(key: &str) -> String {
    let ident = identifier(camel_case(key));
    if KEYWORDS.contains(&ident.as_str()) { format!("{ident}_") } else { ident }
}

impl Emitter for JavaEmitter {
    fn language(&self) -> Language { Language::Java }

    fn render_class(&self, shape: &ClassShape, shapes: &[ClassShape]) -> String {
        let fields = field_views(shape, ident, &[]);

        let mut imports = Vec::new();
        if fields.iter().any(|f| !f.matches_key()) {
            imports.push("import com.google.gson.annotations.SerializedName;");
        }
        if shape.has_array_field() {
            imports.push("import java.util.List;");
        }

        let mut out = String::new();
        if !imports.is_empty() {
            out.push_str(&imports.join("\n"));
            out.push_str("\n\n");
        }
        out.push_str(&format!("public class {} {{\n", shape.name));
        for f in &fields {
            if !f.matches_key() {
                out.push_str(&format!("{INDENT}@SerializedName({})\n", quoted(f.key)));
            }
            out.push_str(&format!("{INDENT}public {} {};\n", self.type_name(f.ty, false, shapes), f.ident));
        }
        out.push('}');
        out
    }
}
