use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;

use log::debug;
use svgpattern_core::model::option::*;
use svgpattern_core::{Catalog, Generator};

mod args;

use args::{CliArgs, ColorArg, Command, ValueSpec, parse_args};

const USAGE: &str = "\
Usage: svgpattern 'phrase' [parameters].
The available parameters are:

  -m, --model string        The pattern model. If multiple choices separate by comma.
  -c, --color string        The background color in hex, like '#a17', or 'no' for transparent background.
  -u, --hue string          The hue variation in degree (using HSL colors). Value format is '[value][~deviation]' or 'min:max'.
  -a, --saturation string   The saturation variation (using HSL colors). Value format is '[value][~deviation]' or 'min:max'.
  -l, --lightness string    The lightness variation (using HSL colors). Value format is '[value][~deviation]' or 'min:max'.
  -r, --rotate string       Rotation angle in degree. Value format is '[value][~deviation]' or 'min:max'.
  -s, --scale string        Scale factor. Value format is '[value][~deviation]' or 'min:max'.
      --catalog path        Extra models: a directory of '*.template.svg' files or a catalog bundle.
      --save-catalog path   Write the available models as a catalog bundle and exit.
  -h, --help                Print this help.
  -V, --version             Print the version.
";

fn help(catalog: &Catalog) {
	eprintln!("svgpattern (version: {})\n", env!("CARGO_PKG_VERSION"));
	eprintln!("{USAGE}");
	eprintln!("The available pattern models are: {}\n", catalog.names_string());
}

/// Builtin models, extended by `--catalog` when given.
fn load_catalog(cli: &CliArgs) -> Result<Catalog, Box<dyn std::error::Error>> {
	let mut catalog = Catalog::builtin();
	if let Some(path) = &cli.catalog {
		if path.is_dir() {
			catalog.load_dir(path)?;
		} else {
			let bundle = Catalog::load(path)?;
			debug!("Bundle models: {}", bundle.names_string());
			catalog.merge(&bundle);
		}
	}
	Ok(catalog)
}

/// Set and randomize options of one `ValueSpec`.
fn spec_options(
	spec: &ValueSpec,
	with: fn(f64) -> PatternOption,
	randomize: fn(f64) -> PatternOption,
) -> Vec<PatternOption> {
	let mut options = Vec::new();
	if let Some(value) = spec.value {
		options.push(with(value));
	}
	if spec.deviation != 0.0 {
		options.push(randomize(spec.deviation));
	}
	options
}

/// Options in the fixed order: model, color, hue, saturation, lightness, rotate, scale.
fn options(cli: &CliArgs) -> Vec<PatternOption> {
	let mut options = Vec::new();
	if !cli.models.is_empty() {
		options.push(with_model(cli.models.iter().cloned()));
	}
	match &cli.color {
		Some(ColorArg::Transparent) => options.push(without_color()),
		Some(ColorArg::Hex(hex)) => options.push(with_color(hex)),
		None => {}
	}

	let specs: [(&Option<ValueSpec>, fn(f64) -> PatternOption, fn(f64) -> PatternOption); 5] = [
		(&cli.hue, with_hue, randomize_hue),
		(&cli.saturation, with_saturation, randomize_saturation),
		(&cli.lightness, with_lightness, randomize_lightness),
		(&cli.rotate, with_rotation, randomize_rotation),
		(&cli.scale, with_scale, randomize_scale),
	];
	for (spec, with, randomize) in specs {
		if let Some(spec) = spec {
			options.extend(spec_options(spec, with, randomize));
		}
	}
	options
}

fn run(cli: CliArgs) -> Result<ExitCode, Box<dyn std::error::Error>> {
	let catalog = load_catalog(&cli)?;
	if let Some(path) = &cli.save_catalog {
		catalog.save(path)?;
		eprintln!("Saved {} models to {}", catalog.len(), path.display());
		return Ok(ExitCode::SUCCESS);
	}

	let mut generator = Generator::with_catalog(Arc::new(catalog), &cli.phrase, options(&cli));
	let (svg, ok) = generator.generate();
	if !ok {
		eprintln!("There are some errors : {:?}", generator.error_messages());
	}
	std::io::stdout().write_all(&svg)?;
	Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
	env_logger::init();

	let args: Vec<String> = std::env::args().skip(1).collect();
	if args.is_empty() {
		help(&Catalog::builtin());
		return ExitCode::FAILURE;
	}

	let result = match parse_args(args) {
		Ok(Command::Help) => {
			help(&Catalog::builtin());
			return ExitCode::SUCCESS;
		}
		Ok(Command::Version) => {
			println!("svgpattern {}", env!("CARGO_PKG_VERSION"));
			return ExitCode::SUCCESS;
		}
		Ok(Command::Generate(cli)) => run(cli),
		Err(msg) => {
			eprintln!("{msg}");
			return ExitCode::FAILURE;
		}
	};

	result.unwrap_or_else(|err| {
		eprintln!("{err}");
		ExitCode::FAILURE
	})
}
