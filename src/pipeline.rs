//! Schema generator pipeline.
//!
//! Orchestrates one build-time run: per configured `(source unit, root type)`
//! pair, loads a fresh type program, composes the synthesis parsers, runs
//! generation rooted at the configured type and serializes the result to two
//! artifacts - a canonical JSON document and an importable source module
//! default-exporting the identical document. Any walker or interceptor
//! failure aborts the affected root type as a hard error; no partial
//! artifact is ever written.

use std::path::{ Path, PathBuf };

use log::info ;
use pipe_trait::Pipe ;
use serde_json::Value ;
use thiserror::Error ;

use crate::diagnostics::Diagnostics ;
use crate::synthesis::{ CodeRefParser, ConstructorTypeParser, ExtensionAliasParser, SubNodeParser, SynthesisError };
use crate::type_graph::{ TypeGraphError, TypeProgram };
use crate::walker::Walker ;



/// Errors that abort generation for one root type.
#[derive( Error, Debug )]
pub enum GenerateError {
	/// The source unit could not be loaded into a type program.
	#[error( "{0}" )] Graph( #[from] TypeGraphError ),
	/// Schema synthesis failed for the root type.
	#[error( "{0}" )] Synthesis( #[from] SynthesisError ),
	/// The reference-marker declarations are absent from the program.
	/// Generation cannot proceed meaningfully without them.
	#[error( "Missing {code_ref} or {encoded} Declaration in '{source_unit}'",
		code_ref = crate::walker::CODE_REF,
		encoded = crate::walker::ENCODED_CODE_REF )]
	MissingCodeRefDeclarations { source_unit: String },
	/// The walker collected structural errors; all of them are carried so
	/// one failed run still surfaces every diagnostic.
	#[error( "{count} Structural Error(s) in Extension Union For Root Type '{root_type}'", count = .errors.len() )]
	StructuralErrors { root_type: String, errors: Vec<String> },
	/// An artifact could not be written.
	#[error( "Cannot Write Artifact '{path}': {source}" )]
	ArtifactWrite { path: String, source: std::io::Error },
}

/// One configured generation target.
#[derive( Debug, Clone )]
pub struct GenerationConfig {
	/// Path of the type-program document to load.
	pub source_unit: PathBuf,
	/// Name of the declaration the schema document is rooted at.
	pub root_type: String,
	/// Name of the extension union, when this target concerns extensions.
	/// Enables the code-ref and extension-alias interceptors, which are
	/// only meaningful for extension targets.
	pub extension_union: Option<String>,
}

impl GenerationConfig {

	pub fn new( source_unit: impl Into<PathBuf>, root_type: impl Into<String> ) -> Self {
		Self {
			source_unit: source_unit.into(),
			root_type: root_type.into(),
			extension_union: None,
		}
	}

	/// Marks this target as extension-handling.
	pub fn with_extensions( mut self, union_name: impl Into<String> ) -> Self {
		self.extension_union = Some( union_name.into() );
		self
	}

}

/// Synthesizes the schema document for one configured target.
///
/// A fresh program and generator are built per call: the generator's
/// identity-keyed cache makes instances non-reentrant, so parallel callers
/// must not share them.
pub fn generate_document( config: &GenerationConfig ) -> Result<Value, GenerateError> {

	let program = TypeProgram::load( &config.source_unit )?;
	let mut parsers: Vec<Box<dyn SubNodeParser + '_>> = vec![ Box::new( ConstructorTypeParser ) ];

	// Owned by the closure below; collected across the whole walk.
	let mut structural_errors = Vec::new();

	if let Some( union_name ) = &config.extension_union {
		let walker = Walker::new( &program );
		let declarations = walker.declarations()
			.ok_or_else(|| GenerateError::MissingCodeRefDeclarations {
				source_unit: config.source_unit.display().to_string(),
			})?;
		let extensions = walker.collect_extensions( union_name, | error | structural_errors.push( error.to_string() ));
		if !structural_errors.is_empty() {
			return Err( GenerateError::StructuralErrors {
				root_type: config.root_type.clone(),
				errors: structural_errors,
			});
		}
		parsers.push( Box::new( CodeRefParser::new( declarations )));
		parsers.push( Box::new( ExtensionAliasParser::new( &extensions )));
	}

	crate::generator::SchemaGenerator::new( &program, parsers )
		.generate_root( &config.root_type )?
		.pipe( Ok )

}

/// Writes the `<root>.json` and `<root>.js` artifacts for one document.
///
/// The JS module default-exports the identical document so downstream
/// consumers need no file-system access at load time.
pub fn write_artifacts( root_type: &str, document: &Value, out_dir: &Path ) -> Result<(), GenerateError> {

	let body = serde_json::to_string_pretty( document )
		.expect( "schema documents contain no non-serializable values" );

	let json_path = out_dir.join( format!( "{root_type}.json" ));
	write_artifact( &json_path, &format!( "{body}\n" ))?;

	let module_path = out_dir.join( format!( "{root_type}.js" ));
	write_artifact( &module_path, &format!( "export default {body};\n" ))?;

	info!( "schema artifacts written for root type '{root_type}'" );
	Ok(())

}

/// Runs every configured target, writing both artifacts per root type.
///
/// The first failing target aborts the run; earlier targets keep their
/// artifacts, the failing one writes none.
pub fn generate_all( configs: &[GenerationConfig], out_dir: &Path ) -> Result<(), GenerateError> {
	configs.iter().try_for_each(| config | {
		let document = generate_document( config )?;
		write_artifacts( &config.root_type, &document, out_dir )
	})
}

/// Re-runs the walker in error-collecting mode for the validation CLI.
///
/// Structural findings land in the returned diagnostics instead of aborting;
/// only a missing source unit or missing reference-marker declarations fail
/// the pass itself.
pub fn validate_extensions( source_unit: &Path, union_name: &str ) -> Result<Diagnostics, GenerateError> {

	let program = TypeProgram::load( source_unit )?;
	let walker = Walker::new( &program );
	let mut diagnostics = Diagnostics::new();

	if walker.declarations().is_none() {
		return Err( GenerateError::MissingCodeRefDeclarations {
			source_unit: source_unit.display().to_string(),
		});
	}

	let extensions = walker.collect_extensions( union_name, | error | diagnostics.error( &error ));
	for extension in &extensions {
		if extension.doc_comments.is_empty() {
			diagnostics.warning( format!( "Extension '{}' Has No Documentation", extension.name ));
		}
	}

	info!(
		"validated {} extension(s) with {} error(s), {} warning(s)",
		extensions.len(),
		diagnostics.errors().len(),
		diagnostics.warnings().len(),
	);
	Ok( diagnostics )

}

fn write_artifact( path: &Path, contents: &str ) -> Result<(), GenerateError> {
	std::fs::write( path, contents ).map_err(| source | GenerateError::ArtifactWrite {
		path: path.display().to_string(),
		source,
	})
}
