use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// File name suffix of a pattern template.
pub(crate) const TEMPLATE_SUFFIX: &str = ".template.svg";

/// Lists the template files of a directory, sorted by file name.
///
/// Returns `(model name, path)` pairs, the model name being the file name
/// without [`TEMPLATE_SUFFIX`]. Subdirectories are ignored.
pub(crate) fn list_templates<P: AsRef<Path>>(dir: P) -> io::Result<Vec<(String, PathBuf)>> {
	let mut templates = Vec::new();

	for entry in fs::read_dir(dir)? {
		let path = entry?.path();
		if !path.is_file() {
			continue;
		}

		let name = path
			.file_name()
			.and_then(|n| n.to_str())
			.and_then(|n| n.strip_suffix(TEMPLATE_SUFFIX))
			.filter(|n| !n.is_empty())
			.map(str::to_owned);
		if let Some(name) = name {
			templates.push((name, path));
		}
	}

	templates.sort();
	Ok(templates)
}

/// Reads a whole template file.
pub(crate) fn read_template<P: AsRef<Path>>(path: P) -> io::Result<String> {
	fs::read_to_string(path)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_list_templates_filters_and_sorts() {
		let dir = std::env::temp_dir().join(format!("svgpattern-io-{}", std::process::id()));
		fs::create_dir_all(dir.join("nested.template.svg")).unwrap();
		fs::write(dir.join("zigzag.template.svg"), "z").unwrap();
		fs::write(dir.join("arcs.template.svg"), "a").unwrap();
		fs::write(dir.join("notes.txt"), "x").unwrap();
		fs::write(dir.join(".template.svg"), "x").unwrap();

		let names: Vec<String> = list_templates(&dir).unwrap().into_iter().map(|(n, _)| n).collect();
		assert_eq!(names, vec!["arcs".to_owned(), "zigzag".to_owned()]);
		assert_eq!(read_template(dir.join("arcs.template.svg")).unwrap(), "a");

		fs::remove_dir_all(&dir).unwrap();
	}
}
