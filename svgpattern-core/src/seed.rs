use std::time::{SystemTime, UNIX_EPOCH};

use log::{debug, warn};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sha1::{Digest, Sha1};

/// Seed of every random stream, derived from the phrase.
pub type Seed = i64;

/// Derives the seed of a phrase.
///
/// The phrase is hashed with SHA-1 and the first digest byte is replicated
/// over the eight bytes of the seed. The same phrase always gives the same
/// seed; changing the combination rule changes every pattern ever produced.
///
/// An empty phrase has no stable seed: the current time is used and the
/// resulting pattern is not reproducible.
pub fn seed_from_phrase(phrase: &str) -> Seed {
	if phrase.is_empty() {
		let seed = time_seed();
		warn!("Empty phrase, using time based seed {seed}: the pattern is not reproducible");
		return seed;
	}

	let digest = Sha1::digest(phrase.as_bytes());
	let seed = (0..8).fold(0i64, |seed, i| seed.wrapping_add(i64::from(digest[0]) << (i * 8)));
	debug!("Phrase {phrase:?} gives seed {seed}");
	seed
}

/// Nanoseconds since the epoch, truncated to 64 bits.
fn time_seed() -> Seed {
	SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.map(|d| d.as_nanos() as i64)
		.unwrap_or_default()
}

/// Seeded pseudo-random source.
///
/// Two streams built from the same seed produce the same draws for the same
/// call sequence, on every platform.
#[derive(Clone, Debug)]
pub struct Stream {
	rng: ChaCha8Rng,
}

impl Stream {
	/// Stream starting at `seed`.
	pub fn new(seed: Seed) -> Self {
		Self { rng: ChaCha8Rng::seed_from_u64(seed as u64) }
	}

	/// Uniform float in `[0, 1)`.
	pub fn float(&mut self) -> f64 {
		self.rng.random()
	}

	/// Uniform index in `[0, n)`. `n` must be positive.
	pub fn index(&mut self, n: usize) -> usize {
		self.rng.random_range(0..n)
	}

	/// Uniform integer in `[min, max]`, with `min <= max`.
	pub fn between(&mut self, min: i64, max: i64) -> i64 {
		self.rng.random_range(min..=max)
	}

	/// Random deviation in `[-|delta|, |delta|]`.
	pub fn deviation(&mut self, delta: f64) -> f64 {
		delta * (1.0 - 2.0 * self.float())
	}
}
