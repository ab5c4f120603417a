use std::sync::{Mutex, PoisonError};

use super::util::{Loose, to_number};
use crate::seed::{Seed, Stream};

/// Random draws available to templates.
///
/// Owns its own stream: built from the generator seed, it is independent of
/// the draws the generator makes while applying options. The same seed and
/// the same call sequence always give the same results.
#[derive(Debug)]
pub struct RandomFunctions {
	stream: Mutex<Stream>,
}

impl RandomFunctions {
	/// Functions drawing from a fresh stream seeded with `seed`.
	pub fn new(seed: Seed) -> Self {
		Self { stream: Mutex::new(Stream::new(seed)) }
	}

	fn with_stream<R>(&self, f: impl FnOnce(&mut Stream) -> R) -> R {
		f(&mut self.stream.lock().unwrap_or_else(PoisonError::into_inner))
	}

	/// Uniform float `min + u * (max - min)` with `u` in `[0, 1)`.
	///
	/// When `min > max` the result lies in `(max, min]`.
	pub fn randf(&self, min: impl Into<Loose>, max: impl Into<Loose>) -> f64 {
		let (min, max) = (to_number(min), to_number(max));
		min + self.with_stream(Stream::float) * (max - min)
	}

	/// Uniform integer between the rounded bounds, both included, in any order.
	pub fn randi(&self, min: impl Into<Loose>, max: impl Into<Loose>) -> i64 {
		let (mut min, mut max) = (to_number(min).round() as i64, to_number(max).round() as i64);
		if min > max {
			std::mem::swap(&mut min, &mut max);
		}
		self.with_stream(|s| s.between(min, max))
	}

	/// One of `values`, `None` when there is nothing to pick from.
	pub fn pick<T: Clone>(&self, values: &[T]) -> Option<T> {
		if values.is_empty() {
			return None;
		}
		let index = self.with_stream(|s| s.index(values.len()));
		values.get(index).cloned()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_randf_degenerate_and_loose_bounds() {
		let rf = RandomFunctions::new(42);
		assert_eq!(rf.randf(1i64, 1.0), 1.0);
		assert_eq!(rf.randf("bingo", Loose::Other), 0.0);

		let a = RandomFunctions::new(42).randf(1.0, 2i64);
		let b = RandomFunctions::new(42).randf("1e0", 2i64);
		assert_eq!(a, b);
		assert!((1.0..2.0).contains(&a));
	}

	#[test]
	fn test_randf_reversed_bounds() {
		let u = RandomFunctions::new(42).randf(0i64, 1i64);
		let reversed = RandomFunctions::new(42).randf(2.0, 1.0);
		assert_eq!(reversed, 2.0 - u);
		assert!(reversed > 1.0 && reversed <= 2.0);
	}

	#[test]
	fn test_randi_rounds_and_swaps() {
		assert_eq!(RandomFunctions::new(42).randi(1i64, 1.0), 1);
		assert_eq!(RandomFunctions::new(42).randi("bingo", Loose::Other), 0);
		assert_eq!(RandomFunctions::new(42).randi(0.9, 1.1), 1);

		let forward = RandomFunctions::new(42).randi(7.1, 42i64);
		assert_eq!(RandomFunctions::new(42).randi("7e0", 42i64), forward);
		assert_eq!(RandomFunctions::new(42).randi(42i64, 7i64), forward);
		assert!((7..=42).contains(&forward));
	}

	#[test]
	fn test_pick() {
		let rf = RandomFunctions::new(42);
		assert_eq!(rf.pick(&[1]), Some(1));
		assert_eq!(rf.pick::<i32>(&[]), None);
		assert_eq!(rf.pick(&["a", "a", "a"]), Some("a"));
		let fruit = rf.pick(&["apple", "tomato", "banana"]).unwrap();
		assert!(["apple", "tomato", "banana"].contains(&fruit));
	}

	#[test]
	fn test_same_seed_same_sequence() {
		let a = RandomFunctions::new(42);
		let b = RandomFunctions::new(42);
		let c = RandomFunctions::new(7);
		let seq = |rf: &RandomFunctions| {
			(0..8).map(|_| rf.randi(0i64, 1_000_000i64)).collect::<Vec<_>>()
		};
		let (sa, sb, sc) = (seq(&a), seq(&b), seq(&c));
		assert_eq!(sa, sb);
		assert_ne!(sa, sc);
		assert_ne!(sa[0..4], sa[4..8]);
	}
}
