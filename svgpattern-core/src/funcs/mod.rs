//! Functions injected into the pattern templates.
//!
//! Two families:
//! - random draws (`randf`, `randi`, `pick`) over a stream seeded by the phrase
//! - seed independent helpers used to build repeating geometry (`grid`,
//!   `fromto`, `upto`, `round`, ...)

use std::sync::Arc;

use minijinja::Environment;
use minijinja::value::{Rest, Value};

use crate::seed::Seed;

/// Seeded random draws.
pub mod random;

/// Numeric and list helpers, plus the scoped variable cell.
pub mod util;

pub use random::RandomFunctions;
pub use util::Loose;

/// Registers the random functions, seeded with `seed`, in `env`.
///
/// The returned handle shares the stream with the registered functions.
pub fn register_random(env: &mut Environment<'_>, seed: Seed) -> Arc<RandomFunctions> {
	let random = Arc::new(RandomFunctions::new(seed));

	let rf = Arc::clone(&random);
	env.add_function("randf", move |min: Value, max: Value| rf.randf(&min, &max));
	let rf = Arc::clone(&random);
	env.add_function("randi", move |min: Value, max: Value| rf.randi(&min, &max));
	let rf = Arc::clone(&random);
	env.add_function("pick", move |values: Rest<Value>| {
		rf.pick(values.0.as_slice()).unwrap_or(Value::UNDEFINED)
	});

	random
}

/// Registers the seed independent helpers in `env`.
pub fn register_util(env: &mut Environment<'_>) {
	env.add_function("float", |x: Value| util::to_number(&x));
	env.add_function("number", |x: Value| util::to_number(&x));
	env.add_function("times", |a: Value, b: Value| util::times(&a, &b));
	env.add_function("plus", |a: Value, b: Value| util::plus(&a, &b));
	env.add_function("round", |precision: Value, x: Value| util::round(&precision, &x));
	env.add_function("isodd", |n: Value| util::is_odd(&n));
	env.add_function("iseven", |n: Value| util::is_even(&n));
	env.add_function("fromto", |first: Value, last: Value| util::from_to(&first, &last));
	env.add_function("upto", |n: Value| util::up_to(&n));
	env.add_function("grid", |n: Value| util::grid(&n));
	env.add_function("var", util::new_var);
	env.add_function("set", |cell: Value, value: Value| util::set_var(&cell, value));
	env.add_function("list", |values: Rest<Value>| Value::from(values.0));
}
