use thiserror::Error;

/// Every problem the pattern generator can run into.
///
/// The generator itself never returns these as `Err`: it records them in
/// order of occurrence and degrades to a random substitute. Only catalog
/// loading and saving propagate them to the caller.
#[derive(Error, Debug)]
pub enum PatternError {
	/// The provided string is not a `#rgb` or `#rrggbb` color.
	#[error("Error parsing color: {0}.")]
	InvalidColor(String),

	/// Some requested model names are not in the catalog.
	#[error("The following {} models are invalid: {}.", .0.len(), .0.join(", "))]
	InvalidModelName(Vec<String>),

	/// The model selection ended up empty, the full catalog is used instead.
	#[error("Empty set of models. Use all builtin models.")]
	EmptyModelSet,

	/// No model could be resolved at all, nothing can be rendered.
	#[error("Missing template.")]
	MissingTemplate,

	/// The template of a model does not compile.
	#[error("Error parsing template {name}: {message}")]
	TemplateSyntax { name: String, message: String },

	/// The template compiled but failed while rendering.
	#[error("Error executing the template {name}: {message}")]
	RenderFailure { name: String, message: String },

	/// Reading or writing a catalog failed.
	#[error("Catalog I/O error: {0}")]
	Io(#[from] std::io::Error),

	/// A catalog bundle could not be encoded or decoded.
	#[error("Catalog bundle error: {0}")]
	Bundle(#[from] postcard::Error),
}

impl PatternError {
	/// Wraps a template engine error raised while compiling `name`.
	pub(crate) fn syntax(name: &str, err: &minijinja::Error) -> Self {
		Self::TemplateSyntax { name: name.to_owned(), message: err.to_string() }
	}

	/// Wraps a template engine error raised while rendering `name`.
	pub(crate) fn render(name: &str, err: &minijinja::Error) -> Self {
		Self::RenderFailure { name: name.to_owned(), message: err.to_string() }
	}
}
