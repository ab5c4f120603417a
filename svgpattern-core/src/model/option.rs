/// A change applied to a [`Generator`](super::generator::Generator).
///
/// Options are applied one after the other, in the given order: a later
/// option overrides an earlier one touching the same value, and the
/// randomizing options draw from the generator stream in that same order.
/// Reordering options therefore changes the pattern.
#[derive(Clone, Debug, PartialEq)]
pub enum PatternOption {
	/// Restrict the models to these names and pick one of them at random.
	SetModel(Vec<String>),
	/// Fixed background color (`#rgb` or `#rrggbb`), fully opaque.
	SetColor(String),
	/// Transparent background; the color itself is kept.
	ClearColor,
	SetHue(f64),
	RandomizeHue(f64),
	SetSaturation(f64),
	RandomizeSaturation(f64),
	SetLightness(f64),
	RandomizeLightness(f64),
	SetRotation(f64),
	RandomizeRotation(f64),
	/// Rotation drawn in `[min, max]`, the bounds in any order.
	RotationBetween(f64, f64),
	SetScale(f64),
	RandomizeScale(f64),
	/// Scale drawn in `[min, max]`, the bounds in any order.
	ScaleBetween(f64, f64),
}

/// Select the model among `names`.
///
/// Unknown names are reported; when none is valid a random model of the
/// whole catalog is used.
pub fn with_model<I, S>(names: I) -> PatternOption
where
	I: IntoIterator<Item = S>,
	S: Into<String>,
{
	PatternOption::SetModel(names.into_iter().map(Into::into).collect())
}

/// Fix the background color. An invalid color is reported and replaced by
/// a random one.
pub fn with_color(hex: &str) -> PatternOption {
	PatternOption::SetColor(hex.to_owned())
}

/// Remove the background so the pattern can be stacked on something else.
pub fn without_color() -> PatternOption {
	PatternOption::ClearColor
}

/// Hue in degrees, taken modulo 360.
pub fn with_hue(hue: f64) -> PatternOption {
	PatternOption::SetHue(hue)
}

/// Move the hue by at most `|delta|` degrees. Should follow a color option.
pub fn randomize_hue(delta: f64) -> PatternOption {
	PatternOption::RandomizeHue(delta)
}

/// Saturation, clamped to `[0, 1]`.
pub fn with_saturation(saturation: f64) -> PatternOption {
	PatternOption::SetSaturation(saturation.clamp(0.0, 1.0))
}

/// Move the saturation by at most `|delta|`, staying in `[0, 1]`.
pub fn randomize_saturation(delta: f64) -> PatternOption {
	PatternOption::RandomizeSaturation(delta)
}

/// Lightness, clamped to `[0, 1]`.
pub fn with_lightness(lightness: f64) -> PatternOption {
	PatternOption::SetLightness(lightness.clamp(0.0, 1.0))
}

/// Move the lightness by at most `|delta|`, staying in `[0, 1]`.
pub fn randomize_lightness(delta: f64) -> PatternOption {
	PatternOption::RandomizeLightness(delta)
}

/// Rotation in degrees.
pub fn with_rotation(angle: f64) -> PatternOption {
	PatternOption::SetRotation(angle)
}

/// Add a random angle in `[-|delta|, |delta|]` to the current rotation.
pub fn randomize_rotation(delta: f64) -> PatternOption {
	PatternOption::RandomizeRotation(delta)
}

/// Rotation drawn around the midpoint of `min` and `max`, in any order.
pub fn with_rotation_between(min: f64, max: f64) -> PatternOption {
	PatternOption::RotationBetween(min, max)
}

/// Unitless scale factor.
pub fn with_scale(factor: f64) -> PatternOption {
	PatternOption::SetScale(factor)
}

/// Add a random amount in `[-|delta|, |delta|]` to the current scale.
pub fn randomize_scale(delta: f64) -> PatternOption {
	PatternOption::RandomizeScale(delta)
}

/// Scale drawn around the midpoint of `min` and `max`, in any order.
pub fn with_scale_between(min: f64, max: f64) -> PatternOption {
	PatternOption::ScaleBetween(min, max)
}

/// Midpoint and half width of an interval given in any order.
pub(crate) fn mid_and_delta(min: f64, max: f64) -> (f64, f64) {
	((max + min) / 2.0, (max - min) / 2.0)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_constructors() {
		assert_eq!(with_model(["a", "b"]), PatternOption::SetModel(vec!["a".to_owned(), "b".to_owned()]));
		assert_eq!(with_model(Vec::<String>::new()), PatternOption::SetModel(Vec::new()));
		assert_eq!(with_saturation(1.5), PatternOption::SetSaturation(1.0));
		assert_eq!(with_lightness(-0.5), PatternOption::SetLightness(0.0));
		assert_eq!(without_color(), PatternOption::ClearColor);
	}

	#[test]
	fn test_mid_and_delta_ignores_order() {
		assert_eq!(mid_and_delta(-70.0, 70.0), (0.0, 70.0));
		assert_eq!(mid_and_delta(70.0, -70.0), (0.0, -70.0));
		assert_eq!(mid_and_delta(2.0, 3.0), (2.5, 0.5));
	}
}
