use std::path::Path;
use std::sync::{Arc, LazyLock};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::PatternError;
use crate::io;

/// A named svg pattern template.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Model {
	pub name: String,
	pub code: String,
}

/// Ordered list of models with unique names.
///
/// The order only matters for picking a model at random from its index.
///
/// # Invariants
/// - no two models share a name; [`Catalog::set_model`] replaces in place
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Catalog {
	models: Vec<Model>,
}

/// Templates shipped with the crate, in file name order.
const BUILTIN_MODELS: [(&str, &str); 7] = [
	("chevrons", include_str!("../../models/chevrons.template.svg")),
	("circles", include_str!("../../models/circles.template.svg")),
	("diamonds", include_str!("../../models/diamonds.template.svg")),
	("hexagons", include_str!("../../models/hexagons.template.svg")),
	("squares", include_str!("../../models/squares.template.svg")),
	("triangles", include_str!("../../models/triangles.template.svg")),
	("waves", include_str!("../../models/waves.template.svg")),
];

static BUILTIN: LazyLock<Arc<Catalog>> = LazyLock::new(|| Arc::new(Catalog::builtin()));

impl Catalog {
	/// Empty catalog.
	pub fn new() -> Self {
		Self::default()
	}

	/// A fresh copy of the builtin models.
	pub fn builtin() -> Self {
		let mut catalog = Self::new();
		for (name, code) in BUILTIN_MODELS {
			catalog.set_model(name, code);
		}
		catalog
	}

	/// The builtin models, shared read-only between generators.
	pub fn shared_builtin() -> Arc<Self> {
		Arc::clone(&BUILTIN)
	}

	/// Adds every `*.template.svg` file of `dir`, in file name order.
	///
	/// A file named like an existing model replaces its code.
	pub fn load_dir<P: AsRef<Path>>(&mut self, dir: P) -> Result<usize, PatternError> {
		let templates = io::list_templates(&dir)?;
		for (name, path) in &templates {
			let code = io::read_template(path)?;
			self.set_model(name, &code);
		}
		debug!("Loaded {} templates from {}", templates.len(), dir.as_ref().display());
		Ok(templates.len())
	}

	/// Reads a catalog bundle written by [`Catalog::save`].
	pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, PatternError> {
		let bytes = std::fs::read(path)?;
		Ok(postcard::from_bytes(&bytes)?)
	}

	/// Writes the catalog as a compact binary bundle.
	pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), PatternError> {
		let bytes = postcard::to_stdvec(self)?;
		std::fs::write(path, bytes)?;
		Ok(())
	}

	/// Appends a model, or replaces the code of the model with that name.
	pub fn set_model(&mut self, name: &str, code: &str) {
		match self.models.iter_mut().find(|m| m.name == name) {
			Some(model) => model.code = code.to_owned(),
			None => self.models.push(Model { name: name.to_owned(), code: code.to_owned() }),
		}
	}

	/// Sets every model of `other`, in its order.
	pub fn merge(&mut self, other: &Catalog) {
		for model in &other.models {
			self.set_model(&model.name, &model.code);
		}
	}

	/// Model named `name`, if any.
	pub fn look_up(&self, name: &str) -> Option<&Model> {
		self.models.iter().find(|m| m.name == name)
	}

	/// Models matching `names`, in the requested order, and the names not found.
	pub fn select<S: AsRef<str>>(&self, names: &[S]) -> (Catalog, Vec<String>) {
		let mut selection = Catalog::new();
		let mut invalid = Vec::new();
		for name in names {
			match self.look_up(name.as_ref()) {
				Some(model) => selection.set_model(&model.name, &model.code),
				None => invalid.push(name.as_ref().to_owned()),
			}
		}
		(selection, invalid)
	}

	/// Model at `index`, in catalog order.
	pub fn get(&self, index: usize) -> Option<&Model> {
		self.models.get(index)
	}

	/// Number of models.
	pub fn len(&self) -> usize {
		self.models.len()
	}

	pub fn is_empty(&self) -> bool {
		self.models.is_empty()
	}

	/// Model names, in catalog order.
	pub fn names(&self) -> Vec<&str> {
		self.models.iter().map(|m| m.name.as_str()).collect()
	}

	/// Model names joined by `", "`, for help output.
	pub fn names_string(&self) -> String {
		self.names().join(", ")
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	fn abc() -> Catalog {
		let mut catalog = Catalog::new();
		catalog.set_model("a", "A");
		catalog.set_model("b", "B");
		catalog.set_model("c", "C");
		catalog
	}

	#[test]
	fn test_builtin_models() {
		let catalog = Catalog::builtin();
		assert_eq!(catalog.len(), BUILTIN_MODELS.len());
		assert_eq!(catalog.names()[0], "chevrons");
		assert!(catalog.look_up("squares").is_some_and(|m| m.code.contains("<svg")));
		assert_eq!(*Catalog::shared_builtin(), catalog);
	}

	#[test]
	fn test_set_model_replaces_in_place() {
		let mut catalog = abc();
		catalog.set_model("b", "B2");
		assert_eq!(catalog.names(), vec!["a", "b", "c"]);
		assert_eq!(catalog.look_up("b").unwrap().code, "B2");
	}

	#[test]
	fn test_select_reports_invalid_names() {
		let (selection, invalid) = abc().select(&["c", "x", "a", "y"]);
		assert_eq!(selection.names(), vec!["c", "a"]);
		assert_eq!(invalid, vec!["x".to_owned(), "y".to_owned()]);

		let (selection, invalid) = abc().select::<&str>(&[]);
		assert!(selection.is_empty());
		assert!(invalid.is_empty());
	}

	#[test]
	fn test_select_keeps_names_unique() {
		let (selection, invalid) = abc().select(&["a", "a"]);
		assert_eq!(selection.names(), vec!["a"]);
		assert!(invalid.is_empty());
	}

	#[test]
	fn test_merge() {
		let mut other = Catalog::new();
		other.set_model("c", "C2");
		other.set_model("d", "D");
		let mut catalog = abc();
		catalog.merge(&other);
		assert_eq!(catalog.names(), vec!["a", "b", "c", "d"]);
		assert_eq!(catalog.look_up("c").unwrap().code, "C2");
	}

	#[test]
	fn test_names_string() {
		assert_eq!(abc().names_string(), "a, b, c");
		assert_eq!(Catalog::new().names_string(), "");
	}

	#[test]
	fn test_bundle_round_trip() {
		let path = std::env::temp_dir().join(format!("svgpattern-bundle-{}.bin", std::process::id()));
		abc().save(&path).unwrap();
		assert_eq!(Catalog::load(&path).unwrap(), abc());
		std::fs::remove_file(&path).unwrap();
	}

	#[test]
	fn test_load_missing_bundle_fails() {
		let missing = std::env::temp_dir().join("svgpattern-no-such-bundle.bin");
		assert!(matches!(Catalog::load(missing), Err(PatternError::Io(_))));
	}
}
