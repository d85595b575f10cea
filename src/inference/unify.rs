//! Unification (⊔) of sibling types at one logical position.
//!
//! - `Unknown` is the identity: no samples never constrain anything.
//! - `Integer ⊔ Float = Float`.
//! - `Null ⊔ K = Optional(K)`, never a union.
//! - Arrays unify element-wise.
//! - Every other mismatch becomes a flattened `Union`, inside which members
//!   that can still unify (numbers, arrays) are merged first.
use std::collections::BTreeSet;
use crate::ir::TypeNode;

pub fn unify(a: TypeNode, b: TypeNode) -> TypeNode {
    use TypeNode::*;
    match (a, b) {
        (Unknown, x) | (x, Unknown) => x,
        (Null, Null) => Null,
        (Null, x) | (x, Null) => x.into_optional(),
        (Optional(x), Optional(y)) => unify(*x, *y).into_optional(),
        (Optional(x), y) | (y, Optional(x)) => unify(*x, y).into_optional(),
        (x, y) if x == y => x,
        (Integer, Float) | (Float, Integer) => Float,
        (ArrayOf(x), ArrayOf(y)) => TypeNode::array_of(unify(*x, *y)),
        (x, y) => {
            let mut members = BTreeSet::new();
            for t in into_members(x).into_iter().chain(into_members(y)) {
                insert_member(&mut members, t);
            }
            if members.len() == 1 {
                members.into_iter().next().unwrap_or(Unknown)
            } else {
                Union(members)
            }
        }
    }
}

/// Fold any number of sibling types.
pub fn unify_all(types: impl IntoIterator<Item = TypeNode>) -> TypeNode {
    types.into_iter().fold(TypeNode::Unknown, unify)
}

fn into_members(t: TypeNode) -> Vec<TypeNode> {
    match t {
        TypeNode::Union(members) => members.into_iter().collect(),
        other => vec![other],
    }
}

fn compatible(a: &TypeNode, b: &TypeNode) -> bool {
    use TypeNode::*;
    matches!(
        (a, b),
        (Integer, Float) | (Float, Integer) | (ArrayOf(_), ArrayOf(_))
    ) || a == b
}

fn insert_member(members: &mut BTreeSet<TypeNode>, t: TypeNode) {
    let existing = members.iter().find(|m| compatible(m, &t)).cloned();
    match existing {
        Some(m) => {
            members.remove(&m);
            members.insert(unify(m, t));
        }
        None => {
            members.insert(t);
        }
    }
}
