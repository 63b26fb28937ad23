//! file: core/src/ir/eval.rs
//! description: restricted constant evaluator shared by both optimizers.
//!
//! Evaluates one binary operator over two literal values with the source
//! language's semantics. Nothing here resolves names or calls anything; the
//! only inputs are the operator and the two constants. Every failure comes
//! back as a `FoldError` which the caller inspects and then drops.
//!
use std::fmt;

use crate::ast::BinaryOperator;
use crate::ir::value::Value;
use crate::ir::value::Value::*;

/// Longest string a fold may produce.
pub const MAX_FOLDED_STR_LEN: usize = 4096;

#[derive(Debug, Clone, PartialEq)]
pub enum FoldError {
    DivisionByZero,
    Overflow,
    TypeMismatch { op: BinaryOperator, lhs: &'static str, rhs: &'static str },
    UnsupportedOperator(BinaryOperator),
    NonFinite,
    Domain(&'static str),
    TooLarge,
    /// The exact result has no `f64` representation reachable without
    /// double rounding.
    Inexact,
}

impl fmt::Display for FoldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FoldError::DivisionByZero => write!(f, "division by zero"),
            FoldError::Overflow => write!(f, "integer overflow"),
            FoldError::TypeMismatch { op, lhs, rhs } => {
                write!(f, "unsupported operand types for {}: '{}' and '{}'", op, lhs, rhs)
            }
            FoldError::UnsupportedOperator(op) => write!(f, "operator {} is not evaluated here", op),
            FoldError::NonFinite => write!(f, "result is not a finite number"),
            FoldError::Domain(why) => write!(f, "math domain error: {}", why),
            FoldError::TooLarge => write!(f, "result exceeds {} bytes", MAX_FOLDED_STR_LEN),
            FoldError::Inexact => write!(f, "result cannot be represented exactly"),
        }
    }
}

impl std::error::Error for FoldError {}

/// Largest magnitude below which every integer converts to `f64` exactly.
const EXACT_F64_INT: i64 = 1 << 53;

/// Numeric view of a literal; bools act as integers.
#[derive(Clone, Copy)]
enum Num {
    I(i64),
    F(f64),
}

fn as_num(v: &Value) -> Option<Num> {
    match v {
        Int(i) => Some(Num::I(*i)),
        Bool(b) => Some(Num::I(*b as i64)),
        Float(x) => Some(Num::F(*x)),
        Str(_) | Null => None,
    }
}

fn as_int(v: &Value) -> Option<i64> {
    match v {
        Int(i) => Some(*i),
        Bool(b) => Some(*b as i64),
        _ => None,
    }
}

fn float(x: f64) -> Result<Value, FoldError> {
    if x.is_finite() { Ok(Float(x)) } else { Err(FoldError::NonFinite) }
}

/// Fold with the arithmetic and comparison operators only, as the TAC
/// peephole pass requires.
pub fn fold_restricted(op: BinaryOperator, lhs: &Value, rhs: &Value) -> Result<Value, FoldError> {
    if !(op.is_arithmetic() || op.is_comparison()) {
        return Err(FoldError::UnsupportedOperator(op));
    }
    fold_binary(op, lhs, rhs)
}

/// Evaluate `lhs op rhs`.
pub fn fold_binary(op: BinaryOperator, lhs: &Value, rhs: &Value) -> Result<Value, FoldError> {
    let mismatch = || FoldError::TypeMismatch { op, lhs: lhs.type_name(), rhs: rhs.type_name() };

    if op.is_comparison() {
        return compare(op, lhs, rhs).ok_or_else(mismatch);
    }

    match op {
        BinaryOperator::Add => match (lhs, rhs) {
            (Str(a), Str(b)) => concat(a, b),
            _ => arith(op, lhs, rhs).ok_or_else(mismatch)?,
        },
        BinaryOperator::Mul => match (lhs, rhs) {
            (Str(s), n) | (n, Str(s)) if as_int(n).is_some() => repeat(s, as_int(n).unwrap_or(0)),
            _ => arith(op, lhs, rhs).ok_or_else(mismatch)?,
        },
        BinaryOperator::Sub
        | BinaryOperator::Div
        | BinaryOperator::FloorDiv
        | BinaryOperator::Mod
        | BinaryOperator::Pow => arith(op, lhs, rhs).ok_or_else(mismatch)?,
        BinaryOperator::BitAnd | BinaryOperator::BitOr | BinaryOperator::BitXor => {
            bitwise(op, lhs, rhs).ok_or_else(mismatch)
        }
        BinaryOperator::LShift | BinaryOperator::RShift => {
            let (a, b) = match (as_int(lhs), as_int(rhs)) {
                (Some(a), Some(b)) => (a, b),
                _ => return Err(mismatch()),
            };
            shift(op, a, b)
        }
        _ => Err(FoldError::UnsupportedOperator(op)),
    }
}

fn concat(a: &str, b: &str) -> Result<Value, FoldError> {
    if a.len() + b.len() > MAX_FOLDED_STR_LEN {
        return Err(FoldError::TooLarge);
    }
    Ok(Str(format!("{}{}", a, b)))
}

fn repeat(s: &str, n: i64) -> Result<Value, FoldError> {
    if n <= 0 {
        return Ok(Str(String::new()));
    }
    let n = usize::try_from(n).map_err(|_| FoldError::TooLarge)?;
    match s.len().checked_mul(n) {
        Some(len) if len <= MAX_FOLDED_STR_LEN => Ok(Str(s.repeat(n))),
        _ => Err(FoldError::TooLarge),
    }
}

/// `None` means the operand types do not support `op`.
fn arith(op: BinaryOperator, lhs: &Value, rhs: &Value) -> Option<Result<Value, FoldError>> {
    let (a, b) = (as_num(lhs)?, as_num(rhs)?);
    Some(match (a, b) {
        (Num::I(a), Num::I(b)) => int_arith(op, a, b),
        (a, b) => float_arith(op, to_f64(a), to_f64(b)),
    })
}

fn to_f64(n: Num) -> f64 {
    match n {
        Num::I(i) => i as f64,
        Num::F(x) => x,
    }
}

fn int_arith(op: BinaryOperator, a: i64, b: i64) -> Result<Value, FoldError> {
    let overflow = FoldError::Overflow;
    match op {
        BinaryOperator::Add => a.checked_add(b).map(Int).ok_or(overflow),
        BinaryOperator::Sub => a.checked_sub(b).map(Int).ok_or(overflow),
        BinaryOperator::Mul => a.checked_mul(b).map(Int).ok_or(overflow),
        BinaryOperator::Div => {
            if b == 0 {
                return Err(FoldError::DivisionByZero);
            }
            int_true_div(a, b)
        }
        BinaryOperator::FloorDiv => {
            if b == 0 {
                return Err(FoldError::DivisionByZero);
            }
            let q = a.checked_div(b).ok_or(overflow)?;
            let r = a.checked_rem(b).ok_or(FoldError::Overflow)?;
            if r != 0 && ((r < 0) != (b < 0)) { Ok(Int(q - 1)) } else { Ok(Int(q)) }
        }
        BinaryOperator::Mod => {
            if b == 0 {
                return Err(FoldError::DivisionByZero);
            }
            let r = a.checked_rem(b).ok_or(overflow)?;
            if r != 0 && ((r < 0) != (b < 0)) { Ok(Int(r + b)) } else { Ok(Int(r)) }
        }
        BinaryOperator::Pow => {
            if b < 0 {
                if a == 0 {
                    return Err(FoldError::DivisionByZero);
                }
                return float((a as f64).powf(b as f64));
            }
            let exp = u32::try_from(b).map_err(|_| FoldError::Overflow)?;
            a.checked_pow(exp).map(Int).ok_or(overflow)
        }
        _ => Err(FoldError::UnsupportedOperator(op)),
    }
}

fn float_arith(op: BinaryOperator, a: f64, b: f64) -> Result<Value, FoldError> {
    match op {
        BinaryOperator::Add => float(a + b),
        BinaryOperator::Sub => float(a - b),
        BinaryOperator::Mul => float(a * b),
        BinaryOperator::Div => {
            if b == 0.0 {
                return Err(FoldError::DivisionByZero);
            }
            float(a / b)
        }
        BinaryOperator::FloorDiv => {
            if b == 0.0 {
                return Err(FoldError::DivisionByZero);
            }
            float(float_divmod(a, b).0)
        }
        BinaryOperator::Mod => {
            if b == 0.0 {
                return Err(FoldError::DivisionByZero);
            }
            float(float_divmod(a, b).1)
        }
        BinaryOperator::Pow => {
            if a == 0.0 && b < 0.0 {
                return Err(FoldError::DivisionByZero);
            }
            if a < 0.0 && b.fract() != 0.0 {
                return Err(FoldError::Domain("negative base with fractional exponent"));
            }
            float(a.powf(b))
        }
        _ => Err(FoldError::UnsupportedOperator(op)),
    }
}

/// `a / b` for two integers, correctly rounded. Operands inside the exact
/// `f64` range divide in one rounding; larger ones only when the quotient
/// is a whole number.
fn int_true_div(a: i64, b: i64) -> Result<Value, FoldError> {
    let exact = |n: i64| n.checked_abs().is_some_and(|m| m <= EXACT_F64_INT);
    if exact(a) && exact(b) {
        return float(a as f64 / b as f64);
    }
    if b == -1 {
        return float(-(a as f64));
    }
    if a % b == 0 { float((a / b) as f64) } else { Err(FoldError::Inexact) }
}

/// Floor quotient and modulus of two floats; `b` must be non-zero.
///
/// The quotient is derived from the exact remainder instead of flooring
/// `a / b`, whose rounding can cross an integer (`1 // 0.1` is `9.0`).
fn float_divmod(a: f64, b: f64) -> (f64, f64) {
    let mut m = a % b;
    let mut div = (a - m) / b;
    if m != 0.0 {
        if (b < 0.0) != (m < 0.0) {
            m += b;
            div -= 1.0;
        }
    } else {
        m = 0.0_f64.copysign(b);
    }
    let floordiv = if div != 0.0 {
        let f = div.floor();
        if div - f > 0.5 { f + 1.0 } else { f }
    } else {
        0.0_f64.copysign(a / b)
    };
    (floordiv, m)
}

/// Exact ordering of an integer against a float. `None` for NaN.
fn cmp_int_float(i: i64, x: f64) -> Option<std::cmp::Ordering> {
    use std::cmp::Ordering;

    if x.is_nan() {
        return None;
    }
    // 2^63 as f64; everything at or beyond it lies outside i64.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if x >= LIMIT {
        return Some(Ordering::Less);
    }
    if x < -LIMIT {
        return Some(Ordering::Greater);
    }
    let whole = x.floor();
    match i.cmp(&(whole as i64)) {
        Ordering::Equal if x > whole => Some(Ordering::Less),
        other => Some(other),
    }
}

fn bitwise(op: BinaryOperator, lhs: &Value, rhs: &Value) -> Option<Value> {
    if let (Bool(a), Bool(b)) = (lhs, rhs) {
        return Some(Bool(match op {
            BinaryOperator::BitAnd => a & b,
            BinaryOperator::BitOr => a | b,
            _ => a ^ b,
        }));
    }
    let (a, b) = (as_int(lhs)?, as_int(rhs)?);
    Some(Int(match op {
        BinaryOperator::BitAnd => a & b,
        BinaryOperator::BitOr => a | b,
        _ => a ^ b,
    }))
}

fn shift(op: BinaryOperator, a: i64, b: i64) -> Result<Value, FoldError> {
    if b < 0 {
        return Err(FoldError::Domain("negative shift count"));
    }
    match op {
        BinaryOperator::LShift => {
            if a == 0 {
                return Ok(Int(0));
            }
            if b >= 64 {
                return Err(FoldError::Overflow);
            }
            let wide = (a as i128) << b;
            i64::try_from(wide).map(Int).map_err(|_| FoldError::Overflow)
        }
        _ => {
            if b >= 64 {
                return Ok(Int(if a < 0 { -1 } else { 0 }));
            }
            Ok(Int(a >> b))
        }
    }
}

/// `None` for an ordering between incompatible types.
fn compare(op: BinaryOperator, lhs: &Value, rhs: &Value) -> Option<Value> {
    use std::cmp::Ordering;

    let ordering: Option<Ordering> = match (lhs, rhs) {
        (Str(a), Str(b)) => Some(a.cmp(b)),
        (Null, Null) => Some(Ordering::Equal),
        _ => match (as_num(lhs), as_num(rhs)) {
            (Some(Num::I(a)), Some(Num::I(b))) => Some(a.cmp(&b)),
            (Some(Num::I(a)), Some(Num::F(b))) => cmp_int_float(a, b),
            (Some(Num::F(a)), Some(Num::I(b))) => cmp_int_float(b, a).map(std::cmp::Ordering::reverse),
            (Some(Num::F(a)), Some(Num::F(b))) => a.partial_cmp(&b),
            _ => None,
        },
    };

    let result = match op {
        // Equality never fails: values of unrelated types are simply unequal.
        BinaryOperator::Eq => ordering == Some(Ordering::Equal),
        BinaryOperator::NotEq => ordering != Some(Ordering::Equal),
        BinaryOperator::Lt => ordering? == Ordering::Less,
        BinaryOperator::LtE => ordering? != Ordering::Greater,
        BinaryOperator::Gt => ordering? == Ordering::Greater,
        BinaryOperator::GtE => ordering? != Ordering::Less,
        _ => return None,
    };
    // `None < None` is a type error even though the two are equal.
    if matches!((lhs, rhs), (Null, Null)) && !matches!(op, BinaryOperator::Eq | BinaryOperator::NotEq) {
        return None;
    }
    Some(Bool(result))
}
