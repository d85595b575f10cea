//! Swift: `struct` with `let` properties and a `CodingKeys` enum whenever a
//! property name differs from its key. `Codable` is only declared when every
//! field has a concrete type, since `Any` does not conform, and every struct
//! it references is `Codable` as well.
use crate::codegen::{class_name, field_views, Emitter, Language};
use crate::ir::{ClassShape, GeneratedClass, TypeNode};
use crate::naming::{camel_case, identifier};

const INDENT: &str = "    ";

const KEYWORDS: &[&str] = &[
    "Any", "Self", "Type", "as", "associatedtype", "break", "case", "catch", "class", "continue",
    "default", "defer", "deinit", "do", "else", "enum", "extension", "fallthrough", "false",
    "fileprivate", "for", "func", "guard", "if", "import", "in", "init", "inout", "internal", "is",
    "let", "nil", "open", "operator", "private", "protocol", "public", "repeat", "rethrows",
    "return", "self", "static", "struct", "subscript", "super", "switch", "throw", "throws",
    "true", "try", "typealias", "var", "where", "while",
];

#[derive(Debug, Clone, Copy, Default)]
pub struct SwiftEmitter;

impl SwiftEmitter {
    fn type_name(&self, ty: &TypeNode, shapes: &[ClassShape]) -> String {
        match ty {
            TypeNode::Null => "Any?".to_string(),
            TypeNode::Boolean => "Bool".to_string(),
            TypeNode::Integer => "Int".to_string(),
            TypeNode::Float => "Double".to_string(),
            TypeNode::String => "String".to_string(),
            TypeNode::ArrayOf(el) => format!("[{}]", self.type_name(el, shapes)),
            TypeNode::ObjectRef(id) => class_name(shapes, *id).to_string(),
            TypeNode::Unknown | TypeNode::Union(_) => "Any".to_string(),
            TypeNode::Optional(inner) => format!("{}?", self.type_name(inner, shapes)),
        }
    }
}

fn escape(ident: &str) -> String {
    if KEYWORDS.contains(&ident) { format!("`{ident}`") } else { ident.to_string() }
}

/// Swift string literal; unicode escapes use the `\u{..}` form.
fn swift_quoted(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{{{:x}}}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Per position: true when the shape cannot synthesize `Codable`, because of
/// a dynamic field of its own or a reference to such a shape. Dedup can make
/// a shape reference an earlier one, so marks spread over referrers until
/// nothing changes.
fn non_codable(shapes: &[ClassShape]) -> Vec<bool> {
    let mut referrers: Vec<Vec<usize>> = vec![Vec::new(); shapes.len()];
    for (pos, shape) in shapes.iter().enumerate() {
        for ty in shape.fields.values() {
            ty.for_each_ref(&mut |id| {
                if let Some(list) = referrers.get_mut(id.0) {
                    list.push(pos);
                }
            });
        }
    }

    let mut marked: Vec<bool> = shapes.iter().map(ClassShape::has_dynamic_field).collect();
    let mut pending: Vec<usize> = (0..shapes.len()).filter(|&pos| marked[pos]).collect();
    while let Some(pos) = pending.pop() {
        for &referrer in &referrers[pos] {
            if !marked[referrer] {
                marked[referrer] = true;
                pending.push(referrer);
            }
        }
    }
    marked
}

impl SwiftEmitter {
    fn render(&self, shape: &ClassShape, shapes: &[ClassShape], codable: bool) -> String {
        let fields = field_views(shape, |k| identifier(camel_case(k)), &[]);
        let conformance = if codable { ": Codable" } else { "" };
        if fields.is_empty() {
            return format!("struct {}{conformance} {{}}", shape.name);
        }

        let mut out = format!("struct {}{conformance} {{\n", shape.name);
        for f in &fields {
            out.push_str(&format!("{INDENT}let {}: {}\n", escape(&f.ident), self.type_name(f.ty, shapes)));
        }
        if fields.iter().any(|f| !f.matches_key()) {
            out.push_str(&format!("\n{INDENT}enum CodingKeys: String, CodingKey {{\n"));
            for f in &fields {
                let case = escape(&f.ident);
                if f.matches_key() {
                    out.push_str(&format!("{INDENT}{INDENT}case {case}\n"));
                } else {
                    out.push_str(&format!("{INDENT}{INDENT}case {case} = {}\n", swift_quoted(f.key)));
                }
            }
            out.push_str(&format!("{INDENT}}}\n"));
        }
        out.push('}');
        out
    }
}

impl Emitter for SwiftEmitter {
    fn language(&self) -> Language { Language::Swift }

    fn render_class(&self, shape: &ClassShape, shapes: &[ClassShape]) -> String {
        let blocked = non_codable(shapes)
            .get(shape.id.0)
            .copied()
            .unwrap_or_else(|| shape.has_dynamic_field());
        self.render(shape, shapes, !blocked)
    }

    fn emit(&self, shapes: &[ClassShape]) -> Vec<GeneratedClass> {
        shapes.iter()
            .zip(non_codable(shapes))
            .map(|(shape, blocked)| GeneratedClass {
                class_name: shape.name.clone(),
                code: self.render(shape, shapes, !blocked),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::ClassId;
    use indexmap::IndexMap;
    use serde_json::json;

    fn shape(name: &str, fields: &[(&str, TypeNode)]) -> ClassShape {
        ClassShape {
            id: ClassId(0),
            name: name.to_string(),
            fields: fields.iter().map(|(k, t)| (k.to_string(), t.clone())).collect::<IndexMap<_, _>>(),
        }
    }

    #[test]
    fn renders_codable_struct_with_coding_keys() {
        let root = shape("Root", &[
            ("id", TypeNode::Integer),
            ("is_active", TypeNode::Boolean),
            ("tags", TypeNode::array_of(TypeNode::String)),
        ]);
        let code = SwiftEmitter.render_class(&root, std::slice::from_ref(&root));
        assert_eq!(
            code,
            "struct Root: Codable {\n    let id: Int\n    let isActive: Bool\n    let tags: [String]\n\n    \
             enum CodingKeys: String, CodingKey {\n        case id\n        case isActive = \"is_active\"\n        case tags\n    }\n}"
        );
    }

    #[test]
    fn dynamic_fields_drop_codable() {
        let root = shape("Root", &[("a", TypeNode::Null)]);
        let code = SwiftEmitter.render_class(&root, std::slice::from_ref(&root));
        assert_eq!(code, "struct Root {\n    let a: Any?\n}");
    }

    #[test]
    fn codable_requires_codable_references() {
        let classes = crate::generate(&json!({"meta": {"a": null}, "id": 1}), Language::Swift);
        assert_eq!(classes[0].code, "struct Root {\n    let meta: Meta\n    let id: Int\n}");
        assert_eq!(classes[1].code, "struct Meta {\n    let a: Any?\n}");

        // `y.z` dedups onto the earlier `X`, so `Y` points backwards.
        let classes = crate::generate(&json!({"x": {"k": null}, "y": {"z": {"k": null}}, "ok": {"n": 1}}), Language::Swift);
        let names: Vec<&str> = classes.iter().map(|c| c.class_name.as_str()).collect();
        assert_eq!(names, ["Root", "X", "Y", "Ok"]);
        assert!(classes[0].code.starts_with("struct Root {"));
        assert!(classes[2].code.starts_with("struct Y {\n    let z: X\n"));
        assert!(classes[3].code.starts_with("struct Ok: Codable {"));
    }

    #[test]
    fn render_class_agrees_with_emit() {
        let shapes = crate::ModelGenerator::new().infer_shapes(&json!({"meta": {"a": null}, "tag": {"t": "s"}}));
        let emitted = SwiftEmitter.emit(&shapes);
        for (shape, class) in shapes.iter().zip(&emitted) {
            assert_eq!(SwiftEmitter.render_class(shape, &shapes), class.code);
        }
    }

    #[test]
    fn quoting_uses_swift_escapes() {
        assert_eq!(swift_quoted("a\"b\u{1}"), "\"a\\\"b\\u{1}\"");
    }

    #[test]
    fn keyword_properties_are_backticked() {
        let root = shape("Root", &[("default", TypeNode::String)]);
        let code = SwiftEmitter.render_class(&root, std::slice::from_ref(&root));
        assert!(code.contains("let `default`: String"));
        assert!(!code.contains("CodingKeys"));
    }
}
