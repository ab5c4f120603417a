use minijinja::{AutoEscape, Environment};
use serde::Serialize;

use super::catalog::Model;
use crate::error::PatternError;
use crate::funcs;
use crate::seed::Seed;

/// The four values bound into a template.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct RenderParams {
	/// Background color, `#rrggbb`.
	#[serde(rename = "Color")]
	pub color: String,
	/// Background opacity, 0 or 1.
	#[serde(rename = "Opacity")]
	pub opacity: f64,
	/// Rotation in degrees.
	#[serde(rename = "Rotate")]
	pub rotate: f64,
	/// Unitless scale factor.
	#[serde(rename = "Scale")]
	pub scale: f64,
}

/// A model compiled together with its own function tables.
///
/// The random functions keep their stream for the lifetime of the compiled
/// template: rendering twice continues the stream instead of replaying it.
#[derive(Debug)]
pub struct CompiledModel {
	name: String,
	env: Environment<'static>,
}

impl CompiledModel {
	/// Compiles `model`, seeding its random functions with `seed`.
	pub fn compile(model: &Model, seed: Seed) -> Result<Self, PatternError> {
		let mut env = Environment::new();
		env.set_auto_escape_callback(|_| AutoEscape::None);
		funcs::register_random(&mut env, seed);
		funcs::register_util(&mut env);
		env.add_template_owned(model.name.clone(), model.code.clone())
			.map_err(|e| PatternError::syntax(&model.name, &e))?;

		Ok(Self { name: model.name.clone(), env })
	}

	/// Name of the compiled model.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Renders the template with `params` bound as `Color`, `Opacity`, `Rotate` and `Scale`.
	pub fn render(&self, params: &RenderParams) -> Result<Vec<u8>, PatternError> {
		let render_error = |e: minijinja::Error| PatternError::render(&self.name, &e);
		let template = self.env.get_template(&self.name).map_err(render_error)?;
		let svg = template.render(params).map_err(render_error)?;
		Ok(svg.into_bytes())
	}
}
