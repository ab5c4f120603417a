use std::sync::Arc;

use log::{debug, warn};

use super::catalog::Catalog;
use super::option::{PatternOption, mid_and_delta};
use super::template::{CompiledModel, RenderParams};
use crate::color::Color;
use crate::error::PatternError;
use crate::seed::{Seed, Stream, seed_from_phrase};

/// Lifecycle of a [`Generator`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GeneratorState {
	/// Seed derived, defaults not yet drawn.
	Created,
	/// Defaults drawn, options can be applied.
	Configuring,
	/// `generate` has been called.
	Rendered,
}

/// Context producing one svg pattern from a phrase.
///
/// # Responsibilities
/// - Derive the seed from the phrase and own the stream built from it
/// - Draw the default color and model, then apply options in order
/// - Render the selected model with the final color, rotation and scale
///
/// # Errors
/// Nothing here fails with `Err`. Problems are recorded in order, and a
/// random substitute (model, color) is used in place of the invalid value.
/// Only a missing template leaves [`Generator::generate`] without output.
#[derive(Debug)]
pub struct Generator {
	phrase: String,
	seed: Seed,
	stream: Stream,
	/// Full catalog, used as fallback for an empty selection.
	catalog: Arc<Catalog>,
	/// Models the next random pick chooses from.
	models: Catalog,
	template: Option<CompiledModel>,
	color: Color,
	opacity: f64,
	rotate: f64,
	scale: f64,
	errors: Vec<PatternError>,
	state: GeneratorState,
}

impl Generator {
	/// Creates a generator over the builtin models and applies `options`.
	pub fn new<I>(phrase: &str, options: I) -> Self
	where
		I: IntoIterator<Item = PatternOption>,
	{
		Self::with_catalog(Catalog::shared_builtin(), phrase, options)
	}

	/// Creates a generator over `catalog` and applies `options`.
	///
	/// The defaults are drawn first, in this order: color (three draws),
	/// then model (one draw). The options come after and may override them.
	pub fn with_catalog<I>(catalog: Arc<Catalog>, phrase: &str, options: I) -> Self
	where
		I: IntoIterator<Item = PatternOption>,
	{
		let seed = seed_from_phrase(phrase);
		let mut generator = Self {
			phrase: phrase.to_owned(),
			seed,
			stream: Stream::new(seed),
			models: (*catalog).clone(),
			catalog,
			template: None,
			color: Color::from_hsl(0.0, 0.0, 0.0),
			opacity: 1.0,
			rotate: 0.0,
			scale: 1.0,
			errors: Vec::new(),
			state: GeneratorState::Created,
		};

		generator.random_color();
		generator.random_model();
		generator.state = GeneratorState::Configuring;
		generator.options(options);
		generator
	}

	/// Applies `options` immediately, in order.
	pub fn options<I>(&mut self, options: I)
	where
		I: IntoIterator<Item = PatternOption>,
	{
		for option in options {
			if self.state == GeneratorState::Rendered {
				warn!("Option {option:?} applied after rendering");
			}
			self.apply(option);
		}
	}

	fn apply(&mut self, option: PatternOption) {
		debug!("Applying {option:?}");
		match option {
			PatternOption::SetModel(names) => self.select_models(&names),
			PatternOption::SetColor(hex) => match Color::from_hex(&hex) {
				Ok(color) => self.set_color(color),
				Err(err) => {
					self.random_color();
					self.add_error(err);
				}
			},
			PatternOption::ClearColor => self.opacity = 0.0,
			PatternOption::SetHue(hue) => self.color = self.color.with_hue(hue),
			PatternOption::RandomizeHue(delta) => {
				let (h, _, _) = self.color.hsl();
				self.color = self.color.with_hue(h + self.stream.deviation(delta));
			}
			PatternOption::SetSaturation(s) => self.color = self.color.with_saturation(s),
			PatternOption::RandomizeSaturation(delta) => {
				let (_, s, _) = self.color.hsl();
				let s = (s + self.stream.deviation(delta)).clamp(0.0, 1.0);
				self.color = self.color.with_saturation(s);
			}
			PatternOption::SetLightness(l) => self.color = self.color.with_lightness(l),
			PatternOption::RandomizeLightness(delta) => {
				let (_, _, l) = self.color.hsl();
				let l = (l + self.stream.deviation(delta)).clamp(0.0, 1.0);
				self.color = self.color.with_lightness(l);
			}
			PatternOption::SetRotation(angle) => self.rotate = angle,
			PatternOption::RandomizeRotation(delta) => self.rotate += self.stream.deviation(delta),
			PatternOption::RotationBetween(min, max) => {
				let (mid, delta) = mid_and_delta(min, max);
				self.rotate = mid + self.stream.deviation(delta);
			}
			PatternOption::SetScale(factor) => self.scale = factor,
			PatternOption::RandomizeScale(delta) => self.scale += self.stream.deviation(delta),
			PatternOption::ScaleBetween(min, max) => {
				let (mid, delta) = mid_and_delta(min, max);
				self.scale = mid + self.stream.deviation(delta);
			}
		}
	}

	/// Narrows the current models to `names` and picks one of them.
	fn select_models(&mut self, names: &[String]) {
		let (selection, invalid) = self.models.select(names);
		if !invalid.is_empty() {
			self.add_error(PatternError::InvalidModelName(invalid));
		}

		self.models = if selection.is_empty() {
			self.add_error(PatternError::EmptyModelSet);
			(*self.catalog).clone()
		} else {
			selection
		};
		self.random_model();
	}

	/// Picks a model of the current selection and compiles it.
	///
	/// On a compile error the previously selected model stays in place.
	fn random_model(&mut self) {
		if self.models.is_empty() {
			self.add_error(PatternError::EmptyModelSet);
			return;
		}

		let index = self.stream.index(self.models.len());
		let Some(model) = self.models.get(index) else {
			return;
		};
		match CompiledModel::compile(model, self.seed) {
			Ok(compiled) => {
				debug!("Selected model {}", compiled.name());
				self.template = Some(compiled);
			}
			Err(err) => self.add_error(err),
		}
	}

	fn random_color(&mut self) {
		let color = Color::random(&mut self.stream);
		self.set_color(color);
	}

	fn set_color(&mut self, color: Color) {
		self.color = color;
		self.opacity = 1.0;
	}

	fn add_error(&mut self, err: PatternError) {
		warn!("{err}");
		self.errors.push(err);
	}

	/// Renders the selected model.
	///
	/// Returns the svg and `true` when no error was recorded so far. The svg
	/// is returned even when earlier errors were recorded; it is empty only
	/// when no template is available or rendering fails.
	///
	/// Rendering draws from the template's own stream, so a second call
	/// continues that stream and may produce a different pattern.
	pub fn generate(&mut self) -> (Vec<u8>, bool) {
		self.state = GeneratorState::Rendered;
		let params = self.render_params();

		let Some(template) = &self.template else {
			self.add_error(PatternError::MissingTemplate);
			return (Vec::new(), false);
		};

		match template.render(&params) {
			Ok(svg) => (svg, self.errors.is_empty()),
			Err(err) => {
				self.add_error(err);
				(Vec::new(), false)
			}
		}
	}

	/// Values bound into the template.
	pub fn render_params(&self) -> RenderParams {
		RenderParams {
			color: self.color.hex(),
			opacity: self.opacity,
			rotate: self.rotate,
			scale: self.scale,
		}
	}

	/// Recorded errors, in order of occurrence.
	pub fn errors(&self) -> &[PatternError] {
		&self.errors
	}

	/// Recorded errors as messages, in order of occurrence.
	pub fn error_messages(&self) -> Vec<String> {
		self.errors.iter().map(ToString::to_string).collect()
	}

	/// Background color as `#rrggbb`.
	pub fn color_hex(&self) -> String {
		self.color.hex()
	}

	/// Background color.
	pub fn color(&self) -> Color {
		self.color
	}

	/// Phrase the generator was created from.
	pub fn phrase(&self) -> &str {
		&self.phrase
	}

	/// Seed derived from the phrase.
	pub fn seed(&self) -> Seed {
		self.seed
	}

	/// Name of the selected model, if any.
	pub fn model_name(&self) -> Option<&str> {
		self.template.as_ref().map(CompiledModel::name)
	}

	/// Background opacity, 0 or 1.
	pub fn opacity(&self) -> f64 {
		self.opacity
	}

	/// Rotation in degrees.
	pub fn rotation(&self) -> f64 {
		self.rotate
	}

	/// Scale factor.
	pub fn scale(&self) -> f64 {
		self.scale
	}

	/// Current lifecycle state.
	pub fn state(&self) -> GeneratorState {
		self.state
	}

	/// Full catalog, selection fallback included.
	pub fn catalog(&self) -> &Catalog {
		&self.catalog
	}
}
