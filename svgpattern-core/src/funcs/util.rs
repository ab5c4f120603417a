use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use minijinja::value::{Object, ObjectRepr, Value, ValueKind};
use minijinja::{Error, ErrorKind};

/// Loosely typed numeric argument, as received from a template.
///
/// Numbers are used as-is, strings are parsed as floats and anything else
/// (or an unparsable string) counts as zero.
#[derive(Clone, Debug, PartialEq)]
pub enum Loose {
	Number(f64),
	Text(String),
	Other,
}

impl Loose {
	/// Numeric value, never fails.
	pub fn to_number(&self) -> f64 {
		match self {
			Loose::Number(n) => *n,
			Loose::Text(s) => s.parse().unwrap_or(0.0),
			Loose::Other => 0.0,
		}
	}
}

impl From<f64> for Loose {
	fn from(n: f64) -> Self {
		Loose::Number(n)
	}
}

impl From<i64> for Loose {
	fn from(n: i64) -> Self {
		Loose::Number(n as f64)
	}
}

impl From<&str> for Loose {
	fn from(s: &str) -> Self {
		Loose::Text(s.to_owned())
	}
}

impl From<&Value> for Loose {
	fn from(value: &Value) -> Self {
		match value.kind() {
			ValueKind::Number => f64::try_from(value.clone()).map_or(Loose::Other, Loose::Number),
			ValueKind::String => value.as_str().map_or(Loose::Other, Loose::from),
			_ => Loose::Other,
		}
	}
}

impl From<Value> for Loose {
	fn from(value: Value) -> Self {
		Loose::from(&value)
	}
}

/// Longest sequence `fromto`, `upto` and `grid` build.
pub const MAX_SEQUENCE_LEN: u64 = 100_000;

/// Highest number of decimals `round` prints.
pub const MAX_PRECISION: usize = 17;

/// Numeric value of a loose argument, zero when it is not a number.
pub fn to_number(x: impl Into<Loose>) -> f64 {
	x.into().to_number()
}

/// Product of two loose numbers.
pub fn times(a: impl Into<Loose>, b: impl Into<Loose>) -> f64 {
	to_number(a) * to_number(b)
}

/// Sum of two loose numbers.
pub fn plus(a: impl Into<Loose>, b: impl Into<Loose>) -> f64 {
	to_number(a) + to_number(b)
}

/// Prints `x` with at most `precision` decimals, without trailing zeros.
///
/// `precision` is clamped to `[0, MAX_PRECISION]`.
pub fn round(precision: impl Into<Loose>, x: impl Into<Loose>) -> String {
	let precision = to_number(precision).clamp(0.0, MAX_PRECISION as f64) as usize;
	let mut s = format!("{:.*}", precision, to_number(x));
	if s.contains('.') {
		s.truncate(s.trim_end_matches('0').trim_end_matches('.').len());
	}
	match s.as_str() {
		"" | "-0" => "0".to_owned(),
		_ => s,
	}
}

/// Integer part of a loose number.
fn int(n: impl Into<Loose>) -> i64 {
	to_number(n) as i64
}

/// Whether the integer part of `n` is odd.
pub fn is_odd(n: impl Into<Loose>) -> bool {
	int(n).rem_euclid(2) == 1
}

/// Whether the integer part of `n` is even.
pub fn is_even(n: impl Into<Loose>) -> bool {
	int(n).rem_euclid(2) == 0
}

fn too_long(first: i64, last: i64) -> Result<(), Error> {
	if first.abs_diff(last) >= MAX_SEQUENCE_LEN {
		return Err(Error::new(
			ErrorKind::InvalidOperation,
			format!("sequence from {first} to {last} exceeds {MAX_SEQUENCE_LEN} items"),
		));
	}
	Ok(())
}

/// Integers from the integer part of `first` to the one of `last`, both included.
///
/// The sequence counts down when `first > last`.
///
/// # Errors
/// Fails when the sequence would hold more than [`MAX_SEQUENCE_LEN`] items.
pub fn from_to(first: impl Into<Loose>, last: impl Into<Loose>) -> Result<Vec<i64>, Error> {
	let (first, last) = (int(first), int(last));
	too_long(first, last)?;
	Ok(if first <= last {
		(first..=last).collect()
	} else {
		(last..=first).rev().collect()
	})
}

/// `[0, 1, ..., n-1]`, empty when `n < 1`.
///
/// # Errors
/// Fails when `n` is above [`MAX_SEQUENCE_LEN`].
pub fn up_to(n: impl Into<Loose>) -> Result<Vec<i64>, Error> {
	let n = int(n);
	if n < 1 {
		return Ok(Vec::new());
	}
	from_to(0, n - 1)
}

/// `[[0, n], [1], ..., [n-1]]`.
///
/// The first group holds both seams of a closed pattern so that a template
/// draws the tile edges identically on both sides. `n < 1` counts as 1.
///
/// # Errors
/// Fails when `n` is above [`MAX_SEQUENCE_LEN`].
pub fn grid(n: impl Into<Loose>) -> Result<Vec<Vec<i64>>, Error> {
	let n = int(n).max(1);
	too_long(0, n - 1)?;
	Ok(std::iter::once(vec![0, n]).chain((1..n).map(|i| vec![i])).collect())
}

/// Mutable cell shared across template scopes.
///
/// Template assignments do not leak out of loops and conditionals, this
/// cell does: `{% set v = var(0) %}...{{ set(v, 3) }}...{{ v }}`.
#[derive(Debug, Default)]
pub struct ScopedVar {
	value: Mutex<Value>,
}

impl ScopedVar {
	pub fn new(value: Value) -> Self {
		Self { value: Mutex::new(value) }
	}

	pub fn get(&self) -> Value {
		self.value.lock().unwrap_or_else(PoisonError::into_inner).clone()
	}

	pub fn set(&self, value: Value) {
		*self.value.lock().unwrap_or_else(PoisonError::into_inner) = value;
	}
}

impl Object for ScopedVar {
	fn repr(self: &Arc<Self>) -> ObjectRepr {
		ObjectRepr::Plain
	}

	fn get_value(self: &Arc<Self>, key: &Value) -> Option<Value> {
		match key.as_str() {
			Some("value") => Some(self.get()),
			_ => None,
		}
	}

	fn render(self: &Arc<Self>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Display::fmt(&self.get(), f)
	}
}

/// Template side of `var`: wraps the initial value in a new cell.
pub fn new_var(initial: Value) -> Value {
	Value::from_object(ScopedVar::new(initial))
}

/// Template side of `set`: always renders as the empty string.
pub fn set_var(cell: &Value, value: Value) -> Result<String, Error> {
	let cell = cell.downcast_object_ref::<ScopedVar>().ok_or_else(|| {
		Error::new(ErrorKind::InvalidOperation, "set expects a variable created by var")
	})?;
	cell.set(value);
	Ok(String::new())
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	#[test]
	fn test_to_number() {
		assert_eq!(to_number(1.5), 1.5);
		assert_eq!(to_number(9i64), 9.0);
		assert_eq!(to_number("1"), 1.0);
		assert_eq!(to_number("1.1"), 1.1);
		assert_eq!(to_number("1.2e3"), 1200.0);
		assert_eq!(to_number("bingo"), 0.0);
		assert_eq!(to_number(Loose::Other), 0.0);
		assert_eq!(to_number(&Value::from(true)), 0.0);
		assert_eq!(to_number(&Value::from(())), 0.0);
		assert_eq!(to_number(&Value::from(7u8)), 7.0);
		assert_eq!(to_number(&Value::from("-2.5")), -2.5);
	}

	#[test]
	fn test_arithmetic() {
		assert_eq!(times(0.01, "1.2e3"), 12.0);
		assert_eq!(times(-1i64, "3"), -3.0);
		assert_eq!(plus("2", 0.5), 2.5);
		assert_eq!(plus("x", 4i64), 4.0);
	}

	#[test]
	fn test_round() {
		assert_eq!(round("3", "1.7e-3"), "0.002");
		assert_eq!(round(1i64, 1.00001), "1");
		assert_eq!(round(2i64, 3.14159), "3.14");
		assert_eq!(round(0i64, 10.0), "10");
		assert_eq!(round(-4i64, 2.6), "3");
		assert_eq!(round(3i64, 0.0001), "0");
		assert_eq!(round(3i64, -0.0001), "0");
		assert_eq!(round(2i64, 1.50), "1.5");
		assert_eq!(round(10_000_000i64, 1.5), "1.5");
		assert_eq!(round(f64::INFINITY, 0.25), "0.25");
		assert_eq!(round("NaN", 2.75), "3");
	}

	#[test]
	fn test_parity() {
		assert!(is_odd(3i64));
		assert!(is_odd("-3"));
		assert!(is_even(4.9));
		assert!(is_even("bingo"));
		assert!(!is_even(-1i64));
	}

	#[test]
	fn test_from_to() {
		assert_eq!(from_to(2i64, 4i64).unwrap(), vec![2, 3, 4]);
		assert_eq!(from_to(4i64, 2i64).unwrap(), vec![4, 3, 2]);
		assert_eq!(from_to(5i64, 5i64).unwrap(), vec![5]);
		assert_eq!(from_to("1.1", -2i64).unwrap(), vec![1, 0, -1, -2]);
	}

	#[test]
	fn test_sequences_are_bounded() {
		assert_eq!(up_to(MAX_SEQUENCE_LEN as i64).unwrap().len() as u64, MAX_SEQUENCE_LEN);
		assert!(up_to(MAX_SEQUENCE_LEN as i64 + 1).is_err());
		assert!(up_to(1e15).is_err());
		assert!(from_to(i64::MIN, i64::MAX).is_err());
		assert!(from_to(10i64, -1e12).is_err());
		assert!(grid("1e9").is_err());
		assert_eq!(grid(MAX_SEQUENCE_LEN as i64).unwrap().len() as u64, MAX_SEQUENCE_LEN);
	}

	#[test]
	fn test_up_to() {
		assert_eq!(up_to(3i64).unwrap(), vec![0, 1, 2]);
		assert_eq!(up_to(1i64).unwrap(), vec![0]);
		assert!(up_to(0i64).unwrap().is_empty());
		assert!(up_to(-5i64).unwrap().is_empty());
	}

	#[test]
	fn test_grid() {
		assert_eq!(grid(2i64).unwrap(), vec![vec![0, 2], vec![1]]);
		assert_eq!(grid(5i64).unwrap(), vec![vec![0, 5], vec![1], vec![2], vec![3], vec![4]]);
		assert_eq!(grid(-1i64).unwrap(), vec![vec![0, 1]]);
	}

	#[test]
	fn test_scoped_var() {
		let cell = new_var(Value::from("initial"));
		assert_eq!(set_var(&cell, Value::from("from inside")).unwrap(), "");
		assert_eq!(cell.to_string(), "from inside");
		assert!(set_var(&Value::from(1), Value::from(2)).is_err());
	}
}
