//! Pattern models and the generator rendering them.
//!
//! - Named svg templates and their ordered catalog (`Catalog`)
//! - Options customizing a generation (`PatternOption`)
//! - Compiled templates bound to their function tables (`CompiledModel`)
//! - The generation context (`Generator`)

/// Named templates, builtin or loaded from disk.
pub mod catalog;

/// Generation context: seed, defaults, options, rendering.
pub mod generator;

/// Ordered options applied to a generator.
pub mod option;

/// Template compilation and parameter binding.
pub mod template;
