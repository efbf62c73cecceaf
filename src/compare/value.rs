//! Value-level comparison logic

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::config::ComparisonPolicy;
use crate::model::{TypeTag, Value};

/// How a comparison decides that a pair of values is floating point
#[derive(Debug, Clone, Copy)]
enum FloatRule {
    /// By the column's declared type. Nested elements get no type.
    Declared(Option<TypeTag>),
    /// By the runtime kind of both values, at every nesting level
    Native,
}

impl FloatRule {
    fn applies(self, x: &Value, y: &Value) -> bool {
        match self {
            FloatRule::Declared(tag) => tag.is_some_and(TypeTag::is_floating_point),
            FloatRule::Native => x.is_float() && y.is_float(),
        }
    }

    fn nested(self) -> Self {
        match self {
            FloatRule::Declared(_) => FloatRule::Declared(None),
            FloatRule::Native => FloatRule::Native,
        }
    }
}

/// Value comparator with configurable tolerance and NaN handling
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueComparator {
    precision: Option<f64>,
    allow_nan_equality: bool,
}

impl ValueComparator {
    /// Create a new value comparator
    pub fn new(policy: &ComparisonPolicy) -> Self {
        Self {
            precision: policy.precision,
            allow_nan_equality: policy.allow_nan_equality,
        }
    }

    pub fn precision(&self) -> Option<f64> {
        self.precision
    }

    pub fn allows_nan_equality(&self) -> bool {
        self.allow_nan_equality
    }

    /// Compare two values of a column declared as `type_tag`
    ///
    /// Tolerance applies only when the declared type is `float`, `double` or
    /// `decimal`. The type is not carried into array elements, which are
    /// compared without tolerance.
    pub fn equal(&self, x: &Value, y: &Value, type_tag: Option<TypeTag>) -> bool {
        self.equal_with(x, y, FloatRule::Declared(type_tag))
    }

    /// Compare two values without a declared type
    ///
    /// Tolerance applies whenever both values are floats, array elements
    /// included.
    pub fn equal_untyped(&self, x: &Value, y: &Value) -> bool {
        self.equal_with(x, y, FloatRule::Native)
    }

    fn equal_with(&self, x: &Value, y: &Value, rule: FloatRule) -> bool {
        if let (Value::Array(xs), Value::Array(ys)) = (x, y) {
            let nested = rule.nested();
            return xs.len() == ys.len()
                && xs.iter().zip(ys).all(|(a, b)| self.equal_with(a, b, nested));
        }

        let both_equal = match self.precision {
            Some(precision) if rule.applies(x, y) && !x.is_null() && !y.is_null() => {
                within_precision(x, y, precision).unwrap_or_else(|| x == y)
            }
            _ => x == y,
        };

        let both_nan = self.allow_nan_equality && is_nan(x) && is_nan(y);

        both_equal || both_nan
    }
}

/// Whether the value is a floating point NaN. False for every other kind.
pub fn is_nan(value: &Value) -> bool {
    matches!(value, Value::Float(f) if f.is_nan())
}

/// Compare two values of a column declared as `type_tag`
pub fn check_equal(x: &Value, y: &Value, type_tag: Option<TypeTag>, policy: &ComparisonPolicy) -> bool {
    ValueComparator::new(policy).equal(x, y, type_tag)
}

/// Compare two values, deciding float-ness from the values themselves
pub fn are_elements_equal(x: &Value, y: &Value, policy: &ComparisonPolicy) -> bool {
    ValueComparator::new(policy).equal_untyped(x, y)
}

/// `abs(x - y) < precision` for numeric pairs; `None` for anything else
///
/// Decimal operands are subtracted exactly.
fn within_precision(x: &Value, y: &Value, precision: f64) -> Option<bool> {
    match (x, y) {
        (Value::Int(a), Value::Int(b)) => {
            Some((((*a as i128) - (*b as i128)).unsigned_abs() as f64) < precision)
        }
        (Value::Decimal(a), Value::Decimal(b)) => decimal_within(*a, *b, precision),
        (Value::Decimal(a), Value::Int(b)) | (Value::Int(b), Value::Decimal(a)) => {
            decimal_within(*a, Decimal::from(*b), precision)
        }
        (Value::Decimal(a), Value::Float(b)) | (Value::Float(b), Value::Decimal(a)) => {
            match Decimal::from_f64_retain(*b) {
                Some(b) => decimal_within(*a, b, precision),
                None => Some((a.to_f64()? - b).abs() < precision),
            }
        }
        _ => {
            let (a, b) = (x.as_f64()?, y.as_f64()?);
            Some((a - b).abs() < precision)
        }
    }
}

fn decimal_within(a: Decimal, b: Decimal, precision: f64) -> Option<bool> {
    let Some(diff) = a.checked_sub(b) else {
        return Some((a.to_f64()? - b.to_f64()?).abs() < precision);
    };
    match Decimal::from_f64_retain(precision) {
        Some(precision) => Some(diff.abs() < precision),
        None => Some(diff.abs().to_f64()? < precision),
    }
}
