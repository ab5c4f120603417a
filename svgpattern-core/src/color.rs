use std::fmt;
use std::str::FromStr;

use crate::error::PatternError;
use crate::seed::Stream;

/// Saturation band of random background colors, `[base, base + width)`.
pub const RANDOM_SATURATION: (f64, f64) = (0.3, 0.1);
/// Lightness band of random background colors, `[base, base + width)`.
pub const RANDOM_LIGHTNESS: (f64, f64) = (0.3, 0.1);

/// Background color of a pattern.
///
/// Stored as RGB components in `[0, 1]`; all color arithmetic goes through
/// the HSL representation:
/// - hue is in degrees and wraps modulo 360
/// - saturation and lightness are clamped to `[0, 1]`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	r: f64,
	g: f64,
	b: f64,
}

impl Color {
	/// Builds a color from its HSL components.
	pub fn from_hsl(h: f64, s: f64, l: f64) -> Self {
		let h = h.rem_euclid(360.0);
		let s = s.clamp(0.0, 1.0);
		let l = l.clamp(0.0, 1.0);
		if s == 0.0 {
			return Self { r: l, g: l, b: l };
		}

		let t1 = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
		let t2 = 2.0 * l - t1;
		let h = h / 360.0;

		let channel = |t: f64| {
			let t = t.rem_euclid(1.0);
			if 6.0 * t < 1.0 {
				t2 + (t1 - t2) * 6.0 * t
			} else if 2.0 * t < 1.0 {
				t1
			} else if 3.0 * t < 2.0 {
				t2 + (t1 - t2) * (2.0 / 3.0 - t) * 6.0
			} else {
				t2
			}
		};

		Self {
			r: channel(h + 1.0 / 3.0),
			g: channel(h),
			b: channel(h - 1.0 / 3.0),
		}
	}

	/// Parses `#rgb` or `#rrggbb`, case-insensitive.
	pub fn from_hex(hex: &str) -> Result<Self, PatternError> {
		let invalid = || PatternError::InvalidColor(hex.to_owned());
		let digits = hex.strip_prefix('#').ok_or_else(invalid)?;
		if !digits.bytes().all(|c| c.is_ascii_hexdigit()) {
			return Err(invalid());
		}

		let component = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
		let (r, g, b) = match digits.len() {
			3 => (
				component(&digits[0..1])? * 17,
				component(&digits[1..2])? * 17,
				component(&digits[2..3])? * 17,
			),
			6 => (
				component(&digits[0..2])?,
				component(&digits[2..4])?,
				component(&digits[4..6])?,
			),
			_ => return Err(invalid()),
		};

		Ok(Self {
			r: f64::from(r) / 255.0,
			g: f64::from(g) / 255.0,
			b: f64::from(b) / 255.0,
		})
	}

	/// Canonical `#rrggbb` form, lowercase.
	pub fn hex(&self) -> String {
		let byte = |v: f64| (v.clamp(0.0, 1.0) * 255.0 + 0.5) as u8;
		format!("#{:02x}{:02x}{:02x}", byte(self.r), byte(self.g), byte(self.b))
	}

	/// HSL components: hue in `[0, 360)`, saturation and lightness in `[0, 1]`.
	pub fn hsl(&self) -> (f64, f64, f64) {
		let min = self.r.min(self.g).min(self.b);
		let max = self.r.max(self.g).max(self.b);
		let l = (max + min) / 2.0;
		if min == max {
			return (0.0, 0.0, l);
		}

		let d = max - min;
		let s = if l < 0.5 { d / (max + min) } else { d / (2.0 - max - min) };
		let h = if max == self.r {
			(self.g - self.b) / d
		} else if max == self.g {
			2.0 + (self.b - self.r) / d
		} else {
			4.0 + (self.r - self.g) / d
		};

		((h * 60.0).rem_euclid(360.0), s, l)
	}

	/// Same color with `hue` degrees, wrapped into `[0, 360)`.
	#[must_use]
	pub fn with_hue(self, hue: f64) -> Self {
		let (_, s, l) = self.hsl();
		Self::from_hsl(hue, s, l)
	}

	/// Same color with `saturation`, clamped to `[0, 1]`.
	#[must_use]
	pub fn with_saturation(self, saturation: f64) -> Self {
		let (h, _, l) = self.hsl();
		Self::from_hsl(h, saturation, l)
	}

	/// Same color with `lightness`, clamped to `[0, 1]`.
	#[must_use]
	pub fn with_lightness(self, lightness: f64) -> Self {
		let (h, s, _) = self.hsl();
		Self::from_hsl(h, s, lightness)
	}

	/// Random color with a readable saturation and lightness.
	///
	/// Consumes three draws: hue, saturation, lightness.
	pub fn random(stream: &mut Stream) -> Self {
		let h = 360.0 * stream.float();
		let s = RANDOM_SATURATION.0 + RANDOM_SATURATION.1 * stream.float();
		let l = RANDOM_LIGHTNESS.0 + RANDOM_LIGHTNESS.1 * stream.float();
		Self::from_hsl(h, s, l)
	}
}

impl FromStr for Color {
	type Err = PatternError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::from_hex(s)
	}
}

impl fmt::Display for Color {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.hex())
	}
}
