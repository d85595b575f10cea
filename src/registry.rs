//! Class registry: collects object shapes for one generation run, merges
//! structurally identical ones, and hands out stable, collision-free names.
//!
//! Ids are reserved when an object group is first visited (pre-order) and
//! filled in once its fields are known, so the root is always first and a
//! nested class always has a larger id than the class that contains it.

use std::collections::{BTreeMap, HashMap, HashSet};
use indexmap::IndexMap;
use crate::ir::{ClassId, ClassShape, TypeNode};
use crate::naming::NamingContext;

#[derive(Debug, Clone, Default)]
pub struct ClassRegistry {
    entries: Vec<Entry>,
}

#[derive(Debug, Clone)]
struct Entry {
    base_name: String,
    fields: Option<IndexMap<String, TypeNode>>,
}

impl ClassRegistry {
    pub fn new() -> Self { Self::default() }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Claim an id before the shape's fields are known.
    pub fn reserve(&mut self, context: &NamingContext) -> ClassId {
        let id = ClassId(self.entries.len());
        let base_name = context.class_name();
        tracing::trace!(id = id.0, name = %base_name, "reserved class");
        self.entries.push(Entry { base_name, fields: None });
        id
    }

    /// Fill in a reserved shape. Unknown ids are ignored.
    pub fn define(&mut self, id: ClassId, fields: IndexMap<String, TypeNode>) {
        if let Some(entry) = self.entries.get_mut(id.0) {
            entry.fields = Some(fields);
        }
    }

    /// Reserve and define in one step.
    pub fn register(&mut self, context: &NamingContext, fields: IndexMap<String, TypeNode>) -> ClassId {
        let id = self.reserve(context);
        self.define(id, fields);
        id
    }

    /// Deduplicate, renumber and name. The returned list is in first-registration
    /// order and every `ObjectRef(i)` in it points at element `i`.
    pub fn finalize(self) -> Vec<ClassShape> {
        let n = self.entries.len();

        // 1) Equivalence classes, deepest first. A reference to an id that has no
        //    class yet gets a token of its own outside the class index range.
        let mut class_of: Vec<Option<usize>> = vec![None; n];
        let mut representative: Vec<usize> = Vec::new();
        let mut by_signature: HashMap<BTreeMap<String, TypeNode>, usize> = HashMap::new();
        for id in (0..n).rev() {
            let signature: BTreeMap<String, TypeNode> = match &self.entries[id].fields {
                Some(fields) => fields.iter()
                    .map(|(k, t)| {
                        let t = t.map_refs(&|c| match class_of.get(c.0).copied().flatten() {
                            Some(class) => ClassId(class),
                            None => ClassId(n + c.0),
                        });
                        (k.clone(), t)
                    })
                    .collect(),
                None => BTreeMap::new(),
            };
            let class = *by_signature.entry(signature).or_insert_with(|| {
                representative.push(id);
                representative.len() - 1
            });
            representative[class] = id; // descending walk: last write is the earliest id
            class_of[id] = Some(class);
        }

        // 2) Survivors keep registration order; ids become list positions.
        let survivors: Vec<usize> = (0..n)
            .filter(|&id| class_of[id].map(|c| representative[c]) == Some(id))
            .collect();
        let mut position: Vec<usize> = vec![0; n];
        for (pos, &id) in survivors.iter().enumerate() {
            position[id] = pos;
        }
        let remap = |c: ClassId| -> ClassId {
            match class_of.get(c.0).copied().flatten() {
                Some(class) => ClassId(position[representative[class]]),
                None => c,
            }
        };

        tracing::debug!(
            registered = n,
            kept = survivors.len(),
            merged = n - survivors.len(),
            "finalized class registry"
        );

        // 3) Names: first come keeps the base name, later ones get 2, 3, ...
        let mut names = NameAllocator::default();
        let mut entries: Vec<Option<Entry>> = self.entries.into_iter().map(Some).collect();
        survivors.iter().enumerate()
            .filter_map(|(pos, &id)| {
                let entry = entries[id].take()?;
                let fields = entry.fields.unwrap_or_default()
                    .into_iter()
                    .map(|(k, t)| (k, t.map_refs(&remap)))
                    .collect();
                Some(ClassShape {
                    id: ClassId(pos),
                    name: names.allocate(&entry.base_name),
                    fields,
                })
            })
            .collect()
    }
}

#[derive(Debug, Default)]
struct NameAllocator {
    used: HashSet<String>,
    /// Next suffix to try per base name.
    next_suffix: HashMap<String, usize>,
}

impl NameAllocator {
    fn allocate(&mut self, base: &str) -> String {
        if self.used.insert(base.to_string()) {
            return base.to_string();
        }
        let next = self.next_suffix.entry(base.to_string()).or_insert(2);
        loop {
            let candidate = format!("{base}{next}");
            *next += 1;
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
        }
    }
}
