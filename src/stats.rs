//! Summary statistics over every number in a value.

use crate::document::node::{Number, Value};
use indexmap::IndexMap;

/// Aggregates of the numbers found in a value.
#[derive(Debug, Clone, PartialEq)]
pub struct Stats {
    pub count: usize,
    pub sum: Number,
    pub avg: f64,
    pub min: Number,
    pub max: Number,
}

impl Stats {
    /// Converts to an object with keys `count`, `sum`, `avg`, `min`, `max`.
    pub fn to_value(&self) -> Value {
        let mut entries = IndexMap::new();
        entries.insert("count".to_string(), Value::from(self.count as i64));
        entries.insert("sum".to_string(), Value::Number(self.sum));
        entries.insert("avg".to_string(), Value::from(self.avg));
        entries.insert("min".to_string(), Value::Number(self.min));
        entries.insert("max".to_string(), Value::Number(self.max));
        Value::Object(entries)
    }
}

/// Collects every number in `value`, depth first, and summarizes them.
///
/// Returns `None` when the value holds no numbers. The sum stays an integer
/// while every input is one and no overflow occurs.
///
/// # Example
///
/// ```
/// use jsonquery::document::decode_json;
/// use jsonquery::stats::compute_stats;
///
/// let prices = decode_json("[10, 20, 30]").unwrap();
/// let stats = compute_stats(&prices).unwrap();
/// assert_eq!(stats.count, 3);
/// assert_eq!(stats.avg, 20.0);
/// ```
pub fn compute_stats(value: &Value) -> Option<Stats> {
    let mut numbers = Vec::new();
    collect_numbers(value, &mut numbers);

    let (&first, rest) = numbers.split_first()?;
    let mut min = first;
    let mut max = first;
    let mut int_sum: Option<i64> = match first {
        Number::Integer(i) => Some(i),
        Number::Float(_) => None,
    };
    let mut float_sum = first.as_f64();

    for &n in rest {
        if n < min {
            min = n;
        }
        if n > max {
            max = n;
        }
        int_sum = match (int_sum, n) {
            (Some(acc), Number::Integer(i)) => acc.checked_add(i),
            _ => None,
        };
        float_sum += n.as_f64();
    }

    Some(Stats {
        count: numbers.len(),
        sum: int_sum.map_or(Number::Float(float_sum), Number::Integer),
        avg: float_sum / numbers.len() as f64,
        min,
        max,
    })
}

fn collect_numbers(value: &Value, out: &mut Vec<Number>) {
    match value {
        Value::Number(n) => out.push(*n),
        Value::Array(items) => items.iter().for_each(|item| collect_numbers(item, out)),
        Value::Object(entries) => entries.values().for_each(|item| collect_numbers(item, out)),
        _ => {}
    }
}
