use crate::domain::record::{Record, Value};
use crate::domain::view::ViewConfig;
use crate::error::{DashboardError, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

/// Sort order direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum SortDirection {
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    /// Returns the opposite direction
    pub fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

impl FromStr for SortDirection {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(SortDirection::Ascending),
            "desc" => Ok(SortDirection::Descending),
            _ => Err(DashboardError::InvalidConfiguration(format!(
                "Invalid sort direction '{}'. Valid directions: asc, desc",
                s
            ))),
        }
    }
}

impl TryFrom<String> for SortDirection {
    type Error = DashboardError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

/// Sorts rows in-place by the value stored under `key`.
///
/// The sort is stable: rows with equal keys keep their relative order.
/// Rows where the field is absent or null always sort after rows that
/// have a value, whichever the direction. With no key the order is left
/// untouched.
///
/// # Examples
/// ```
/// use dashboard_core::domain::record::Record;
/// use dashboard_core::domain::sorting::{sort_records, SortDirection};
///
/// let mut rows = vec![
///     Record::new().with("name", "b").with("v", 2),
///     Record::new().with("name", "a").with("v", 1),
/// ];
///
/// sort_records(&mut rows, Some("v"), SortDirection::Ascending);
/// assert_eq!(rows[0].get("name").and_then(|v| v.as_str()), Some("a"));
/// ```
pub fn sort_records<R: AsRef<Record>>(
    rows: &mut [R],
    key: Option<&str>,
    direction: SortDirection,
) {
    let Some(key) = key else {
        return;
    };

    rows.sort_by(|a, b| {
        let a = a.as_ref().get(key).filter(|v| !v.is_null());
        let b = b.as_ref().get(key).filter(|v| !v.is_null());

        match (a, b) {
            (Some(a), Some(b)) => {
                let cmp = compare_values(a, b);
                match direction {
                    SortDirection::Ascending => cmp,
                    SortDirection::Descending => cmp.reverse(),
                }
            }
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    });
}

/// Compares two present values by their native ordering
///
/// Numbers compare numerically across `Int` and `Float`. Values of
/// different kinds fall back to kind rank: bool, number, date, text, list.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Int(a), Value::Int(b)) => a.cmp(b),
        (Value::Float(a), Value::Float(b)) => compare_floats(*a, *b),
        (Value::Int(a), Value::Float(b)) => compare_int_float(*a, *b),
        (Value::Float(a), Value::Int(b)) => compare_int_float(*b, *a).reverse(),
        (Value::Date(a), Value::Date(b)) => a.cmp(b),
        (Value::Text(a), Value::Text(b)) => a.cmp(b),
        (Value::List(a), Value::List(b)) => {
            for (x, y) in a.iter().zip(b.iter()) {
                let cmp = compare_values(x, y);
                if cmp != Ordering::Equal {
                    return cmp;
                }
            }
            a.len().cmp(&b.len())
        }
        _ => kind_rank(a).cmp(&kind_rank(b)),
    }
}

/// Zeroes of either sign are equal; NaN sits at the end its sign bit picks
fn compare_floats(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or_else(|| a.total_cmp(&b))
}

/// Exact `i64` against `f64` comparison, without rounding the integer
fn compare_int_float(int: i64, float: f64) -> Ordering {
    // 2^63 is exactly representable; every finite float in [-2^63, 2^63) truncates into i64
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;

    if float.is_nan() {
        return if float.is_sign_negative() {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }
    if float >= LIMIT {
        return Ordering::Less;
    }
    if float < -LIMIT {
        return Ordering::Greater;
    }

    let whole = float.trunc();
    match int.cmp(&(whole as i64)) {
        Ordering::Equal => {
            if float > whole {
                Ordering::Less
            } else if float < whole {
                Ordering::Greater
            } else {
                Ordering::Equal
            }
        }
        other => other,
    }
}

fn kind_rank(value: &Value) -> u8 {
    match value {
        Value::Bool(_) => 0,
        Value::Int(_) | Value::Float(_) => 1,
        Value::Date(_) => 2,
        Value::Text(_) => 3,
        Value::List(_) => 4,
        Value::Null => 5,
    }
}

/// Returns the config produced by clicking the header of `key`
///
/// The same key flips the direction; a different key starts ascending.
/// Paging and query are carried over untouched.
pub fn toggle_sort(current: &ViewConfig, key: &str) -> ViewConfig {
    let mut next = current.clone();
    match current.sort_key.as_deref() {
        Some(active) if active == key => {
            next.sort_direction = current.sort_direction.flipped();
        }
        _ => {
            next.sort_key = Some(key.to_string());
            next.sort_direction = SortDirection::Ascending;
        }
    }
    next
}
