//! Reproducible 'random' svg patterns from text.
//!
//! A phrase is hashed into a seed, the seed drives every random choice:
//! - the pattern model and the background color picked by default
//! - the randomizing options (hue, saturation, lightness, rotation, scale)
//! - the random functions called by the templates themselves
//!
//! The same phrase with the same options always gives the same svg.
//!
//! ```
//! use svgpattern_core::model::generator::Generator;
//! use svgpattern_core::model::option::{randomize_hue, with_color};
//!
//! let mut generator = Generator::new("Hello", [with_color("#336699"), randomize_hue(20.0)]);
//! let (svg, ok) = generator.generate();
//! assert!(ok);
//! assert!(String::from_utf8(svg).unwrap().contains("<svg"));
//! ```

/// Background color in the HSL space.
pub mod color;

/// Error taxonomy of the generator.
pub mod error;

/// Functions available inside the templates.
pub mod funcs;

/// Catalog, options and the generator.
pub mod model;

/// Phrase to seed, and the seeded stream.
pub mod seed;

/// Template files on disk.
///
/// Not exposed
pub(crate) mod io;

pub use color::Color;
pub use error::PatternError;
pub use model::catalog::{Catalog, Model};
pub use model::generator::{Generator, GeneratorState};
pub use model::option::PatternOption;
