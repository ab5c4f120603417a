use std::path::PathBuf;

/// A value given as `v`, `v~d`, `~d` or `min:max`.
///
/// - `v` fixes the value
/// - `~d` randomizes the current value by at most `d`
/// - `min:max` fixes the midpoint and randomizes by half the range
#[derive(Debug, PartialEq)]
pub struct ValueSpec {
	pub value: Option<f64>,
	pub deviation: f64,
}

impl ValueSpec {
	pub fn parse(s: &str) -> Result<Self, String> {
		let number = |v: &str| {
			v.trim().parse::<f64>().map_err(|_| format!("'{}' is not a number", v.trim()))
		};

		if let Some((value, deviation)) = s.split_once('~') {
			let value = match value.trim() {
				"" => None,
				v => Some(number(v)?),
			};
			return Ok(Self { value, deviation: number(deviation)? });
		}

		if let Some((min, max)) = s.split_once(':') {
			let (min, max) = (number(min)?, number(max)?);
			return Ok(Self { value: Some((min + max) / 2.0), deviation: (min - max).abs() / 2.0 });
		}

		Ok(Self { value: Some(number(s)?), deviation: 0.0 })
	}
}

/// Background color request.
#[derive(Debug, PartialEq)]
pub enum ColorArg {
	Hex(String),
	Transparent,
}

/// Parsed command line.
#[derive(Debug, Default, PartialEq)]
pub struct CliArgs {
	pub phrase: String,
	pub models: Vec<String>,
	pub color: Option<ColorArg>,
	pub hue: Option<ValueSpec>,
	pub saturation: Option<ValueSpec>,
	pub lightness: Option<ValueSpec>,
	pub rotate: Option<ValueSpec>,
	pub scale: Option<ValueSpec>,
	pub catalog: Option<PathBuf>,
	pub save_catalog: Option<PathBuf>,
}

/// What the command line asks for.
#[derive(Debug, PartialEq)]
pub enum Command {
	Help,
	Version,
	Generate(CliArgs),
}

/// Parses the arguments, program name excluded.
pub fn parse_args<I, S>(args: I) -> Result<Command, String>
where
	I: IntoIterator<Item = S>,
	S: Into<String>,
{
	let mut args = args.into_iter().map(Into::into);
	let mut cli = CliArgs::default();
	let mut positional = Vec::new();

	while let Some(arg) = args.next() {
		let (flag, inline) = match arg.split_once('=') {
			Some((flag, value)) if flag.starts_with("--") => (flag.to_owned(), Some(value.to_owned())),
			_ => (arg.clone(), None),
		};

		let mut value = |name: &str| -> Result<String, String> {
			inline.clone().or_else(|| args.next()).ok_or_else(|| format!("Missing value for {name}."))
		};
		let spec = |name: &str, s: String| {
			ValueSpec::parse(&s).map_err(|e| format!("Error parsing the {name} parameter '{s}': {e}."))
		};

		match flag.as_str() {
			"-h" | "--help" => return Ok(Command::Help),
			"-V" | "--version" => return Ok(Command::Version),
			"-m" | "--model" => {
				cli.models = value("model")?
					.split(',')
					.map(str::trim)
					.filter(|m| !m.is_empty())
					.map(str::to_owned)
					.collect();
			}
			"-c" | "--color" => {
				cli.color = match value("color")?.trim() {
					"" => None,
					"no" => Some(ColorArg::Transparent),
					hex => Some(ColorArg::Hex(hex.to_owned())),
				};
			}
			"-u" | "--hue" => cli.hue = Some(spec("hue", value("hue")?)?),
			"-a" | "--saturation" => cli.saturation = Some(spec("saturation", value("saturation")?)?),
			"-l" | "--lightness" => cli.lightness = Some(spec("lightness", value("lightness")?)?),
			"-r" | "--rotate" => cli.rotate = Some(spec("rotate", value("rotate")?)?),
			"-s" | "--scale" => cli.scale = Some(spec("scale", value("scale")?)?),
			"--catalog" => cli.catalog = Some(PathBuf::from(value("catalog")?)),
			"--save-catalog" => cli.save_catalog = Some(PathBuf::from(value("save-catalog")?)),
			f if f.starts_with('-') && f.len() > 1 && f.parse::<f64>().is_err() => {
				return Err(format!("Unknown parameter '{f}'."));
			}
			_ => positional.push(arg),
		}
	}

	if cli.save_catalog.is_some() && positional.is_empty() {
		return Ok(Command::Generate(cli));
	}
	match positional.len() {
		1 => {
			cli.phrase = positional.remove(0);
			Ok(Command::Generate(cli))
		}
		0 => Err("Exactly one positional parameter is expected.\nNo positional parameters were provided.".to_owned()),
		n => Err(format!(
			"Exactly one positional parameter is expected.\nProvided {n} positional parameters: '{}'.",
			positional.join("', '")
		)),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn generate(args: &[&str]) -> CliArgs {
		match parse_args(args.iter().copied()) {
			Ok(Command::Generate(cli)) => cli,
			other => panic!("unexpected {other:?}"),
		}
	}

	#[test]
	fn test_value_spec() {
		assert_eq!(ValueSpec::parse("7").unwrap(), ValueSpec { value: Some(7.0), deviation: 0.0 });
		assert_eq!(ValueSpec::parse("7~2").unwrap(), ValueSpec { value: Some(7.0), deviation: 2.0 });
		assert_eq!(ValueSpec::parse(" ~ 2.5").unwrap(), ValueSpec { value: None, deviation: 2.5 });
		assert_eq!(ValueSpec::parse("10:-20").unwrap(), ValueSpec { value: Some(-5.0), deviation: 15.0 });
		assert!(ValueSpec::parse("abc").is_err());
		assert!(ValueSpec::parse("1~").is_err());
		assert!(ValueSpec::parse("1:x").is_err());
	}

	#[test]
	fn test_full_command_line() {
		let cli = generate(&[
			"hello world", "-m", "squares, circles", "--color=#abc", "-u", "~10", "-a", "0.5",
			"--lightness", "0.2:0.4", "-r", "45~5", "-s", "2",
		]);
		assert_eq!(cli.phrase, "hello world");
		assert_eq!(cli.models, vec!["squares".to_owned(), "circles".to_owned()]);
		assert_eq!(cli.color, Some(ColorArg::Hex("#abc".to_owned())));
		assert_eq!(cli.hue, Some(ValueSpec { value: None, deviation: 10.0 }));
		assert_eq!(cli.saturation, Some(ValueSpec { value: Some(0.5), deviation: 0.0 }));
		assert_eq!(cli.rotate, Some(ValueSpec { value: Some(45.0), deviation: 5.0 }));
		assert_eq!(cli.scale, Some(ValueSpec { value: Some(2.0), deviation: 0.0 }));
		let lightness = cli.lightness.unwrap();
		assert!((lightness.value.unwrap() - 0.3).abs() < 1e-12);
		assert!((lightness.deviation - 0.1).abs() < 1e-12);
	}

	#[test]
	fn test_transparent_color() {
		assert_eq!(generate(&["-c", "no", "x"]).color, Some(ColorArg::Transparent));
	}

	#[test]
	fn test_help_and_version() {
		assert_eq!(parse_args(["x", "--help"]), Ok(Command::Help));
		assert_eq!(parse_args(["-V"]), Ok(Command::Version));
	}

	#[test]
	fn test_positional_errors() {
		assert!(parse_args(Vec::<String>::new()).unwrap_err().contains("No positional"));
		assert!(parse_args(["a", "b"]).unwrap_err().contains("'a', 'b'"));
		assert!(parse_args(["a", "--bogus"]).unwrap_err().contains("Unknown parameter"));
		assert!(parse_args(["a", "-r"]).unwrap_err().contains("Missing value"));
		assert!(parse_args(["a", "-r", "oops"]).unwrap_err().contains("rotate"));
	}

	#[test]
	fn test_negative_number_is_a_phrase() {
		assert_eq!(generate(&["-42"]).phrase, "-42");
	}

	#[test]
	fn test_save_catalog_without_phrase() {
		let cli = generate(&["--save-catalog", "models.bin"]);
		assert_eq!(cli.save_catalog, Some(PathBuf::from("models.bin")));
	}
}
