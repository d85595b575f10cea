use serde_json::Number;
use crate::ir::TypeNode;

// f64 bounds of the i64 range: [-2^63, 2^63)
const I64_MIN_F64: f64 = -9_223_372_036_854_775_808.0;
const I64_MAX_EXCLUSIVE_F64: f64 = 9_223_372_036_854_775_808.0;

/// `Integer` when the number has no fractional part and fits an i64, else `Float`.
/// `1.0` counts as an integer; `2^64 - 1` does not.
pub fn classify(n: &Number) -> TypeNode {
    if n.is_i64() {
        return TypeNode::Integer;
    }
    if n.is_u64() {
        return TypeNode::Float; // > i64::MAX
    }
    match n.as_f64() {
        Some(f) if is_integral(f) => TypeNode::Integer,
        _ => TypeNode::Float,
    }
}

fn is_integral(f: f64) -> bool {
    f.is_finite() && f.fract() == 0.0 && (I64_MIN_F64..I64_MAX_EXCLUSIVE_F64).contains(&f)
}
