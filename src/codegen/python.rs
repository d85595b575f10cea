//! Python: `@dataclass` with snake_case attributes. Renamed keys are kept in
//! `field(metadata={"json": ...})`; typing imports list only what is used.
use std::collections::BTreeSet;

use crate::codegen::{class_name, field_views, quoted, Emitter, Language};
use crate::ir::{ClassShape, TypeNode};
use crate::naming::{identifier, snake_case};

const INDENT: &str = "    ";

/// Python keywords plus the names this module imports.
const RESERVED: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global", "if",
    "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try",
    "while", "with", "yield", "dataclass", "field",
];

#[derive(Debug, Clone, Copy, Default)]
pub struct PythonEmitter;

impl PythonEmitter {
    /// `typing` collects the names from `typing` the annotation needs.
    fn type_name(&self, ty: &TypeNode, shapes: &[ClassShape], typing: &mut BTreeSet<&'static str>) -> String {
        match ty {
            TypeNode::Null => {
                typing.extend(["Any", "Optional"]);
                "Optional[Any]".to_string()
            }
            TypeNode::Boolean => "bool".to_string(),
            TypeNode::Integer => "int".to_string(),
            TypeNode::Float => "float".to_string(),
            TypeNode::String => "str".to_string(),
            TypeNode::ArrayOf(el) => {
                typing.insert("List");
                format!("List[{}]", self.type_name(el, shapes, typing))
            }
            TypeNode::ObjectRef(id) => class_name(shapes, *id).to_string(),
            TypeNode::Unknown | TypeNode::Union(_) => {
                typing.insert("Any");
                "Any".to_string()
            }
            TypeNode::Optional(inner) => {
                typing.insert("Optional");
                format!("Optional[{}]", self.type_name(inner, shapes, typing))
            }
        }
    }
}

fn ident(key: &str) -> String {
    let ident = identifier(snake_case(key));
    if RESERVED.contains(&ident.as_str()) { format!("{ident}_") } else { ident }
}

impl Emitter for PythonEmitter {
    fn language(&self) -> Language { Language::Python }

    fn render_class(&self, shape: &ClassShape, shapes: &[ClassShape]) -> String {
        let fields = field_views(shape, ident, &[]);
        let mut typing = BTreeSet::new();
        let lines = fields.iter()
            .map(|f| {
                let ty = self.type_name(f.ty, shapes, &mut typing);
                if f.matches_key() {
                    format!("{INDENT}{}: {ty}", f.ident)
                } else {
                    format!("{INDENT}{}: {ty} = field(metadata={{\"json\": {}}})", f.ident, quoted(f.key))
                }
            })
            .collect::<Vec<_>>();
        let renamed = fields.iter().any(|f| !f.matches_key());

        let mut out = String::new();
        if shape.has_ref_field() {
            out.push_str("from __future__ import annotations\n\n");
        }
        out.push_str(if renamed {
            "from dataclasses import dataclass, field\n"
        } else {
            "from dataclasses import dataclass\n"
        });
        if !typing.is_empty() {
            let names = typing.into_iter().collect::<Vec<_>>().join(", ");
            out.push_str(&format!("from typing import {names}\n"));
        }
        out.push_str(&format!("\n\n@dataclass\nclass {}:\n", shape.name));
        if lines.is_empty() {
            out.push_str(&format!("{INDENT}pass"));
        } else {
            out.push_str(&lines.join("\n"));
        }
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
    fn renders_dataclass() {
        let root = shape("Root", &[
            ("id", TypeNode::Integer),
            ("tags", TypeNode::array_of(TypeNode::String)),
            ("score", TypeNode::Float.into_optional()),
        ]);
        let code = PythonEmitter.render_class(&root, std::slice::from_ref(&root));
        assert_eq!(
            code,
            "from dataclasses import dataclass\nfrom typing import List, Optional\n\n\n\
             @dataclass\nclass Root:\n    id: int\n    tags: List[str]\n    score: Optional[float]"
        );
    }

    #[test]
    fn renamed_keys_keep_metadata() {
        let author = shape("Author", &[("name", TypeNode::String)]);
        let root = shape("Root", &[
            ("userName", TypeNode::String),
            ("author", TypeNode::ObjectRef(ClassId(1))),
        ]);
        let shapes = [root, author];
        let code = PythonEmitter.render_class(&shapes[0], &shapes);
        assert!(code.starts_with("from __future__ import annotations\n\nfrom dataclasses import dataclass, field\n\n\n"));
        assert!(code.contains("    user_name: str = field(metadata={\"json\": \"userName\"})"));
        assert!(code.contains("    author: Author"));
        assert!(!code.contains("from typing"));
    }

    #[test]
    fn keywords_and_empty_class() {
        let root = shape("Root", &[("class", TypeNode::Null)]);
        let code = PythonEmitter.render_class(&root, std::slice::from_ref(&root));
        assert!(code.contains("from typing import Any, Optional\n"));
        assert!(code.contains("    class_: Optional[Any] = field(metadata={\"json\": \"class\"})"));

        let empty = shape("Empty", &[]);
        assert_eq!(
            PythonEmitter.render_class(&empty, std::slice::from_ref(&empty)),
            "from dataclasses import dataclass\n\n\n@dataclass\nclass Empty:\n    pass"
        );
    }
}
