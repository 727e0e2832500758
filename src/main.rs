//! Build-time command line interface.
//!
//! `generate` runs the schema generator pipeline over the fixed target list
//! and writes the JSON and JS artifacts; `validate` re-runs the type
//! declaration walker in error-collecting mode and reports grouped findings.
//! Both derive their exit code from errors only - warnings never fail a run.

use std::path::{ Path, PathBuf };
use std::process::ExitCode ;

use clap::{ Parser, Subcommand };
use colored::Colorize ;

use extension_link::{ Diagnostics, GenerateError, GenerationConfig };



/// Name of the extension union declaration in the source units.
const EXTENSION_UNION: &str = "SupportedExtension" ;

/// The fixed list of generation targets. Each produces `<root>.json` and
/// `<root>.js` under the output directory.
fn generation_targets( source_dir: &Path ) -> Vec<GenerationConfig> {
	vec![
		GenerationConfig::new( source_dir.join( "extensions.types.json" ), "SupportedExtensions" )
			.with_extensions( EXTENSION_UNION ),
		GenerationConfig::new( source_dir.join( "plugin-manifest.types.json" ), "PluginManifest" )
			.with_extensions( EXTENSION_UNION ),
	]
}

#[derive( Parser )]
#[command( name = "extension-link", version, about = "Plugin extension compiler" )]
struct Cli {
	#[command( subcommand )]
	command: Command,
}

#[derive( Subcommand )]
enum Command {
	/// Synthesize schema artifacts for every configured root type.
	Generate {
		/// Directory containing the type-program documents.
		#[arg( long, default_value = "schema" )]
		source_dir: PathBuf,
		/// Directory the artifacts are written into.
		#[arg( long, default_value = "dist" )]
		out_dir: PathBuf,
	},
	/// Check the extension union and report grouped errors and warnings.
	Validate {
		/// Directory containing the type-program documents.
		#[arg( long, default_value = "schema" )]
		source_dir: PathBuf,
	},
}

fn main() -> ExitCode {
	env_logger::init();
	match Cli::parse().command {
		Command::Generate { source_dir, out_dir } => generate( &source_dir, &out_dir ),
		Command::Validate { source_dir } => validate( &source_dir ),
	}
}

fn generate( source_dir: &Path, out_dir: &Path ) -> ExitCode {

	if let Err( error ) = std::fs::create_dir_all( out_dir ) {
		eprintln!( "{} {}", "error:".red(), error );
		return ExitCode::FAILURE;
	}

	match extension_link::generate_all( &generation_targets( source_dir ), out_dir ) {
		Ok(()) => {
			println!( "{} schema artifacts written to {}", "ok:".green(), out_dir.display() );
			ExitCode::SUCCESS
		},
		Err( error ) => {
			report_failure( &error );
			ExitCode::FAILURE
		},
	}

}

fn validate( source_dir: &Path ) -> ExitCode {

	let source_unit = source_dir.join( "extensions.types.json" );
	let diagnostics = match extension_link::validate_extensions( &source_unit, EXTENSION_UNION ) {
		Ok( diagnostics ) => diagnostics,
		Err( error ) => {
			report_failure( &error );
			return ExitCode::FAILURE;
		},
	};

	print!( "{}", diagnostics.render() );
	println!(
		"{} error(s), {} warning(s)",
		diagnostics.errors().len(),
		diagnostics.warnings().len(),
	);
	match diagnostics.has_errors() {
		true => ExitCode::FAILURE,
		false => ExitCode::SUCCESS,
	}

}

/// Prints one hard failure; structural error groups keep their full detail.
fn report_failure( error: &GenerateError ) {
	if let GenerateError::StructuralErrors { errors, .. } = error {
		let mut diagnostics = Diagnostics::new();
		for message in errors {
			diagnostics.error( message );
		}
		eprint!( "{}", diagnostics.render() );
	}
	eprintln!( "{} {}", "error:".red(), error );
}
