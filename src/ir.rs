// Strongly-typed IR shared by inference, the registry and the emitters. No serde_json::Value here.

use std::collections::BTreeSet;
use indexmap::IndexMap;
use serde::Serialize;

/// Index of a class in the registry. After `ClassRegistry::finalize` it is
/// also the index of the shape in the finalized list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ClassId(pub usize);

/// Language-neutral type of one value position.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(tag = "kind", content = "of", rename_all = "snake_case")]
pub enum TypeNode {
    Null,                    // only `null` was ever seen here
    Boolean,
    Integer,
    Float,
    String,
    ArrayOf(Box<TypeNode>),
    ObjectRef(ClassId),      // nested objects always go through the registry
    Unknown,                 // no samples (empty array)
    Optional(Box<TypeNode>), // K ⊔ null, never nested
    Union(BTreeSet<TypeNode>),
}

impl TypeNode {
    pub fn array_of(element: TypeNode) -> Self {
        TypeNode::ArrayOf(Box::new(element))
    }

    /// Mark as nullable. Idempotent; `Null` and `Unknown` stay as they are.
    pub fn into_optional(self) -> Self {
        match self {
            TypeNode::Optional(_) | TypeNode::Null | TypeNode::Unknown => self,
            other => TypeNode::Optional(Box::new(other)),
        }
    }

    /// Positions no sample pins down to one concrete kind.
    pub fn is_dynamic(&self) -> bool {
        matches!(self, TypeNode::Null | TypeNode::Unknown | TypeNode::Union(_))
    }

    /// True if a dynamic position occurs anywhere inside this type.
    pub fn contains_dynamic(&self) -> bool {
        match self {
            TypeNode::ArrayOf(inner) | TypeNode::Optional(inner) => inner.contains_dynamic(),
            other => other.is_dynamic(),
        }
    }

    /// True if this type names another class somewhere.
    pub fn contains_ref(&self) -> bool {
        match self {
            TypeNode::ObjectRef(_) => true,
            TypeNode::ArrayOf(inner) | TypeNode::Optional(inner) => inner.contains_ref(),
            TypeNode::Union(members) => members.iter().any(TypeNode::contains_ref),
            _ => false,
        }
    }

    /// True if an array container occurs anywhere inside this type.
    pub fn contains_array(&self) -> bool {
        match self {
            TypeNode::ArrayOf(_) => true,
            TypeNode::Optional(inner) => inner.contains_array(),
            TypeNode::Union(members) => members.iter().any(TypeNode::contains_array),
            _ => false,
        }
    }

    /// Call `f` with every class this type names.
    pub fn for_each_ref(&self, f: &mut impl FnMut(ClassId)) {
        match self {
            TypeNode::ObjectRef(id) => f(*id),
            TypeNode::ArrayOf(inner) | TypeNode::Optional(inner) => inner.for_each_ref(&mut *f),
            TypeNode::Union(members) => {
                for m in members {
                    m.for_each_ref(&mut *f);
                }
            }
            _ => {}
        }
    }

    /// Rewrite every `ObjectRef` through `f`.
    pub fn map_refs(&self, f: &impl Fn(ClassId) -> ClassId) -> TypeNode {
        match self {
            TypeNode::ObjectRef(id) => TypeNode::ObjectRef(f(*id)),
            TypeNode::ArrayOf(inner) => TypeNode::ArrayOf(Box::new(inner.map_refs(f))),
            TypeNode::Optional(inner) => TypeNode::Optional(Box::new(inner.map_refs(f))),
            TypeNode::Union(members) => TypeNode::Union(members.iter().map(|m| m.map_refs(f)).collect()),
            other => other.clone(),
        }
    }
}

/// One discovered object type. Field order is first-seen key order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassShape {
    pub id: ClassId,
    pub name: String,
    pub fields: IndexMap<String, TypeNode>,
}

impl ClassShape {
    pub fn has_dynamic_field(&self) -> bool {
        self.fields.values().any(TypeNode::contains_dynamic)
    }

    pub fn has_array_field(&self) -> bool {
        self.fields.values().any(TypeNode::contains_array)
    }

    pub fn has_ref_field(&self) -> bool {
        self.fields.values().any(TypeNode::contains_ref)
    }
}

/// One rendered declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedClass {
    pub class_name: String,
    pub code: String,
}

impl GeneratedClass {
    pub fn file_name(&self, extension: &str) -> String {
        format!("{}.{extension}", self.class_name)
    }
}
