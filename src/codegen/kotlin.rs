//! Kotlin: `data class` with `val` properties; renamed keys carry Gson's
//! `@SerializedName`.
use crate::codegen::{class_name, field_views, quoted, Emitter, Language};
use crate::ir::{ClassShape, TypeNode};
use crate::naming::{camel_case, identifier};

const INDENT: &str = "    ";

const KEYWORDS: &[&str] = &[
    "as", "break", "class", "continue", "do", "else", "false", "for", "fun", "if", "in",
    "interface", "is", "null", "object", "package", "return", "super", "this", "throw", "true",
    "try", "typealias", "typeof", "val", "var", "when", "while",
];

#[derive(Debug, Clone, Copy, Default)]
pub struct KotlinEmitter;

impl KotlinEmitter {
    fn type_name(&self, ty: &TypeNode, shapes: &[ClassShape]) -> String {
        match ty {
            TypeNode::Null => "Any?".to_string(),
            TypeNode::Boolean => "Boolean".to_string(),
            TypeNode::Integer => "Int".to_string(),
            TypeNode::Float => "Double".to_string(),
            TypeNode::String => "String".to_string(),
            TypeNode::ArrayOf(el) => format!("List<{}>", self.type_name(el, shapes)),
            TypeNode::ObjectRef(id) => class_name(shapes, *id).to_string(),
            TypeNode::Unknown | TypeNode::Union(_) => "Any".to_string(),
            TypeNode::Optional(inner) => format!("{}?", self.type_name(inner, shapes)),
        }
    }
}

fn escape(ident: &str) -> String {
    if KEYWORDS.contains(&ident) { format!("`{ident}`") } else { ident.to_string() }
}

/// Kotlin string literal. `$` starts a template, so it is escaped too.
fn kotlin_quoted(s: &str) -> String {
    quoted(s).replace('$', "\\$")
}

impl Emitter for KotlinEmitter {
    fn language(&self) -> Language { Language::Kotlin }

    fn render_class(&self, shape: &ClassShape, shapes: &[ClassShape]) -> String {
        let fields = field_views(shape, |k| identifier(camel_case(k)), &[]);
        let mut out = String::new();
        if fields.iter().any(|f| !f.matches_key()) {
            out.push_str("import com.google.gson.annotations.SerializedName\n\n");
        }
        // a data class needs at least one constructor property
        if fields.is_empty() {
            out.push_str(&format!("class {}", shape.name));
            return out;
        }

        let params = fields.iter()
            .map(|f| {
                let mut param = String::new();
                if !f.matches_key() {
                    param.push_str(&format!("{INDENT}@SerializedName({})\n", kotlin_quoted(f.key)));
                }
                let ty = self.type_name(f.ty, shapes);
                let default = if ty.ends_with('?') { " = null" } else { "" };
                param.push_str(&format!("{INDENT}val {}: {ty}{default}", escape(&f.ident)));
                param
            })
            .collect::<Vec<_>>();

        out.push_str(&format!("data class {}(\n", shape.name));
        out.push_str(&params.join(",\n"));
        out.push_str("\n)");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::ClassId;
    use indexmap::IndexMap;

    fn shape(name: &str, fields: &[(&str, TypeNode)]) -> ClassShape {
        ClassShape {
            id: ClassId(0),
            name: name.to_string(),
            fields: fields.iter().map(|(k, t)| (k.to_string(), t.clone())).collect::<IndexMap<_, _>>(),
        }
    }

    #[test]
    fn renders_data_class() {
        let root = shape("Root", &[
            ("id", TypeNode::Integer),
            ("tags", TypeNode::array_of(TypeNode::String)),
        ]);
        let code = KotlinEmitter.render_class(&root, std::slice::from_ref(&root));
        assert_eq!(code, "data class Root(\n    val id: Int,\n    val tags: List<String>\n)");
    }

    #[test]
    fn renamed_and_nullable_fields() {
        let author = shape("Author", &[("name", TypeNode::String)]);
        let root = shape("Root", &[
            ("is_active", TypeNode::Boolean),
            ("author", TypeNode::ObjectRef(ClassId(1)).into_optional()),
            ("extra", TypeNode::Null),
        ]);
        let shapes = [root, author];
        let code = KotlinEmitter.render_class(&shapes[0], &shapes);
        assert!(code.starts_with("import com.google.gson.annotations.SerializedName\n\n"));
        assert!(code.contains("    @SerializedName(\"is_active\")\n    val isActive: Boolean,"));
        assert!(code.contains("val author: Author? = null"));
        assert!(code.contains("val extra: Any? = null"));
    }

    #[test]
    fn keywords_are_backticked() {
        let root = shape("Root", &[("class", TypeNode::String)]);
        let code = KotlinEmitter.render_class(&root, std::slice::from_ref(&root));
        assert!(code.contains("val `class`: String"));
        assert!(!code.contains("SerializedName"));
    }

    #[test]
    fn dollar_keys_are_not_templates() {
        let root = shape("Root", &[("$type", TypeNode::String), ("$ref", TypeNode::String)]);
        let code = KotlinEmitter.render_class(&root, std::slice::from_ref(&root));
        assert!(code.contains("    @SerializedName(\"\\$type\")\n    val type: String,"));
        assert!(code.contains("    @SerializedName(\"\\$ref\")\n    val ref: String"));
        assert_eq!(kotlin_quoted("a\"$b"), r#""a\"\$b""#);
    }

    #[test]
    fn empty_object_is_plain_class() {
        let root = shape("Empty", &[]);
        assert_eq!(KotlinEmitter.render_class(&root, std::slice::from_ref(&root)), "class Empty");
    }
}
