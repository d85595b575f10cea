//! Shape inference over one example document.
//!
//! Values are walked in *sibling groups*: the root is a group of one, the
//! elements of every array in a group form one child group, and all objects
//! of a group merge into a single class whose per-key values form child
//! groups. Types of a group are unified (see [`unify`]).
//!
//! Design goals:
//! - Explicit work stack; nesting depth never touches the call stack.
//! - Every object group registers exactly one class; ids are reserved in
//!   pre-order so output order is root first, then depth-first by key.
//! - No state outside one `ShapeInferrer`; the registry it fills is per run.
pub mod num;
pub mod obj;
pub mod unify;

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::ir::{ClassId, TypeNode};
use crate::naming::NamingContext;
use crate::registry::ClassRegistry;

pub use obj::{FieldGroup, ObjGroup};
pub use unify::{unify, unify_all};

// ------------------------------- Policy ---------------------------------- //

/// Field holding an array root once it is wrapped in the root class.
pub const ARRAY_ROOT_FIELD: &str = "items";
/// Field holding a scalar root once it is wrapped in the root class.
pub const SCALAR_ROOT_FIELD: &str = "value";

// ------------------------------ Work stack -------------------------------- //

type Slot = usize;

enum Task<'a> {
    Visit {
        group: Vec<&'a Value>,
        context: NamingContext,
        slot: Slot,
    },
    Finish {
        slot: Slot,
        scalars: TypeNode,
        elements: Option<Slot>,
        object: Option<PendingObject>,
    },
}

struct PendingObject {
    id: ClassId,
    fields: Vec<PendingField>,
}

struct PendingField {
    key: String,
    slot: Slot,
    required: bool,
}

// ------------------------------- Front API -------------------------------- //

#[derive(Debug, Default)]
pub struct ShapeInferrer {
    registry: ClassRegistry,
}

impl ShapeInferrer {
    pub fn new() -> Self { Self::default() }

    /// Infer the type of `value`, registering every object group it contains.
    pub fn infer(&mut self, value: &Value, context: NamingContext) -> TypeNode {
        self.infer_group(vec![value], context)
    }

    /// Infer one type for a group of sibling values.
    pub fn infer_group<'a>(&mut self, group: Vec<&'a Value>, context: NamingContext) -> TypeNode {
        let mut results: Vec<TypeNode> = vec![TypeNode::Unknown];
        let mut stack: Vec<Task<'a>> = vec![Task::Visit { group, context, slot: 0 }];

        while let Some(task) = stack.pop() {
            match task {
                Task::Visit { group, context, slot } => {
                    self.visit(group, context, slot, &mut results, &mut stack);
                }
                Task::Finish { slot, scalars, elements, object } => {
                    let mut ty = scalars;
                    if let Some(el) = elements {
                        let element = take(&mut results, el);
                        ty = unify(ty, TypeNode::array_of(element));
                    }
                    if let Some(PendingObject { id, fields }) = object {
                        let fields = fields.into_iter()
                            .map(|f| {
                                let t = take(&mut results, f.slot);
                                let t = if f.required { t } else { t.into_optional() };
                                (f.key, t)
                            })
                            .collect::<IndexMap<_, _>>();
                        self.registry.define(id, fields);
                        ty = unify(ty, TypeNode::ObjectRef(id));
                    }
                    results[slot] = ty;
                }
            }
        }

        take(&mut results, 0)
    }

    /// Root entry: objects register under `root_name`; anything else is wrapped
    /// in a root class with a single `items` (array) or `value` (scalar) field.
    pub fn infer_root(&mut self, value: &Value, root_name: &str) -> TypeNode {
        let context = NamingContext::root(root_name);
        if value.is_object() {
            return self.infer(value, context);
        }
        let key = if value.is_array() { ARRAY_ROOT_FIELD } else { SCALAR_ROOT_FIELD };
        let id = self.registry.reserve(&context);
        let ty = self.infer(value, NamingContext::field(key));
        let mut fields = IndexMap::new();
        fields.insert(key.to_string(), ty);
        self.registry.define(id, fields);
        TypeNode::ObjectRef(id)
    }

    pub fn into_registry(self) -> ClassRegistry { self.registry }

    fn visit<'a>(
        &mut self,
        group: Vec<&'a Value>,
        context: NamingContext,
        slot: Slot,
        results: &mut Vec<TypeNode>,
        stack: &mut Vec<Task<'a>>,
    ) {
        let mut scalars = TypeNode::Unknown;
        let mut saw_array = false;
        let mut elements: Vec<&'a Value> = Vec::new();
        let mut objects: Vec<&'a Map<String, Value>> = Vec::new();

        for v in group {
            match v {
                Value::Null => scalars = unify(scalars, TypeNode::Null),
                Value::Bool(_) => scalars = unify(scalars, TypeNode::Boolean),
                Value::Number(n) => scalars = unify(scalars, num::classify(n)),
                Value::String(_) => scalars = unify(scalars, TypeNode::String),
                Value::Array(xs) => {
                    saw_array = true;
                    elements.extend(xs.iter());
                }
                Value::Object(m) => objects.push(m),
            }
        }

        let mut children: Vec<Task<'a>> = Vec::new();

        let elements = saw_array.then(|| {
            let el_slot = alloc(results);
            children.push(Task::Visit { group: elements, context: context.elements(), slot: el_slot });
            el_slot
        });

        let object = (!objects.is_empty()).then(|| {
            let id = self.registry.reserve(&context);
            let merged = ObjGroup::merge(objects);
            let seen = merged.seen_objects;
            let mut fields = Vec::with_capacity(merged.fields.len());
            for (key, field) in merged.fields {
                let field_slot = alloc(results);
                let required = field.is_required(seen);
                children.push(Task::Visit {
                    group: field.values,
                    context: NamingContext::field(key),
                    slot: field_slot,
                });
                fields.push(PendingField { key: key.to_string(), slot: field_slot, required });
            }
            PendingObject { id, fields }
        });

        stack.push(Task::Finish { slot, scalars, elements, object });
        // reversed so children pop in source order
        stack.extend(children.into_iter().rev());
    }
}

fn alloc(results: &mut Vec<TypeNode>) -> Slot {
    results.push(TypeNode::Unknown);
    results.len() - 1
}

fn take(results: &mut [TypeNode], slot: Slot) -> TypeNode {
    std::mem::replace(&mut results[slot], TypeNode::Unknown)
}

// ------------------------------- Tests ------------------------------------ //
