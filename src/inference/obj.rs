use indexmap::IndexMap;
use serde_json::{Map, Value};

/// All objects of one sibling group, merged key by key.
#[derive(Debug, Default)]
pub struct ObjGroup<'a> {
    pub fields: IndexMap<&'a str, FieldGroup<'a>>, // first-seen key order across the group
    pub seen_objects: usize,
}

#[derive(Debug, Default)]
pub struct FieldGroup<'a> {
    pub values: Vec<&'a Value>,
    pub present_in: usize,
}

impl<'a> ObjGroup<'a> {
    pub fn merge<I>(objects: I) -> Self
    where
        I: IntoIterator<Item = &'a Map<String, Value>>,
    {
        let mut out = Self::default();
        for map in objects {
            out.seen_objects += 1;
            for (k, v) in map {
                let field = out.fields.entry(k.as_str()).or_default();
                field.values.push(v);
                field.present_in += 1;
            }
        }
        out
    }
}

impl FieldGroup<'_> {
    /// A key missing from some objects of the group is nullable.
    pub fn is_required(&self, seen_objects: usize) -> bool {
        self.present_in == seen_objects
    }
}
