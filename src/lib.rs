//! A plugin extension compiler and runtime module linker for building
//! modular, plugin-extensible applications.
//!
//! The crate solves two related problems. At **build time** it walks a
//! program's type declarations to extract a normalized catalog of extension
//! point descriptors and synthesizes machine-checkable schema documents from
//! them, with special handling for the type constructs a generic schema
//! generator cannot represent. At **run time** it negotiates, for every
//! independently compiled plugin bundle loaded into the host process, which
//! implementation of each shared library the plugin observes - enforcing a
//! single-instance invariant where required and allowing bundled fallbacks
//! where declared safe.
//!
//! # Core Concepts
//!
//! - [`TypeProgram`]: one source unit's type declarations, loaded from a
//! 	JSON type-program document and indexed by name.
//!
//! - [`Walker`]: locates the extension union and decomposes each member into
//! 	an [`ExtensionTypeInfo`], reporting structural errors through an
//! 	accumulating callback instead of failing fast.
//!
//! - [`SubNodeParser`]: a node interceptor tried before the default schema
//! 	generation algorithm. Three are provided: [`ConstructorTypeParser`],
//! 	[`CodeRefParser`] and [`ExtensionAliasParser`].
//!
//! - [`SchemaGenerator`]: converts the type graph into a JSON schema
//! 	document with every named declaration hoisted into a `$ref`
//! 	definition.
//!
//! - [`SharedModuleRegistry`]: the host's immutable, ordered table of shared
//! 	module names and their `{ singleton, allow_fallback }` policy.
//!
//! - [`ModuleResolver`]: invoked once per plugin-bundle load; offers the
//! 	registry's modules through two-phase [`ModuleAccessor`]s and reports
//! 	the per-module [`ModuleResolution`] outcome.
//!
//! # Build-Time Example
//!
//! ```
//! use extension_link::{ SchemaGenerator, TypeProgram, Walker };
//! use extension_link::{ ConstructorTypeParser, CodeRefParser, ExtensionAliasParser, SubNodeParser };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let program = TypeProgram::from_json( r#"{
//! 	"declarations": [
//! 		{ "name": "CodeRef", "typeParams": [ "T" ], "body": {
//! 			"kind": "function", "params": [], "returns": { "kind": "reference", "name": "T" }
//! 		}},
//! 		{ "name": "EncodedCodeRef", "body": { "kind": "object", "properties": [
//! 			{ "name": "$codeRef", "value": { "kind": "primitive", "name": "string" }}
//! 		]}},
//! 		{ "name": "TelemetryListener", "docComments": [ "Subscribes to telemetry events." ], "body": {
//! 			"kind": "reference", "name": "ExtensionDeclaration", "args": [
//! 				{ "kind": "stringLiteral", "value": "console.telemetry/listener" },
//! 				{ "kind": "object", "properties": [
//! 					{ "name": "listener", "value": { "kind": "reference", "name": "CodeRef", "args": [
//! 						{ "kind": "primitive", "name": "void" }
//! 					]}}
//! 				]}
//! 			]
//! 		}},
//! 		{ "name": "SupportedExtension", "body": { "kind": "union", "members": [
//! 			{ "kind": "reference", "name": "TelemetryListener" }
//! 		]}}
//! 	]
//! }"# )?;
//!
//! // Decompose the union into descriptors, collecting structural errors.
//! let walker = Walker::new( &program );
//! let mut errors = Vec::new();
//! let extensions = walker.collect_extensions( "SupportedExtension", | error | errors.push( error ));
//! assert!( errors.is_empty() );
//! assert_eq!( extensions[0].discriminant, "console.telemetry/listener" );
//!
//! // Compose the interceptors and synthesize the schema document.
//! let declarations = walker.declarations().expect( "reference-marker declarations" );
//! let parsers: Vec<Box<dyn SubNodeParser + '_>> = vec![
//! 	Box::new( ConstructorTypeParser ),
//! 	Box::new( CodeRefParser::new( declarations )),
//! 	Box::new( ExtensionAliasParser::new( &extensions )),
//! ];
//! let document = SchemaGenerator::new( &program, parsers ).generate_root( "SupportedExtension" )?;
//! assert!( document[ "definitions" ][ "TelemetryListener" ].is_object() );
//! # Ok(())
//! # }
//! ```
//!
//! # Run-Time Example
//!
//! Hosts declare their shared modules once and resolve every bundle load
//! against that registry. Plugin bundles expose exactly one of the
//! `override`/`init` capabilities through their [`RemoteEntry`].
//!
//! ```
//! use std::collections::HashMap ;
//! use std::sync::Arc ;
//! use async_trait::async_trait ;
//! use extension_link::{
//! 	EagerAccessor, HostModule, ModuleResolution, ModuleResolver, RemoteEntry,
//! 	ResolveError, ScopeInit, SharedModuleMetadata, SharedModuleRegistry, SharedScope,
//! };
//!
//! // The loading runtime of one plugin bundle, using the `init` path.
//! struct BundleRuntime ;
//!
//! #[async_trait]
//! impl ScopeInit<&'static str> for BundleRuntime {
//! 	async fn init( &mut self, scope: SharedScope<&'static str> ) -> Result<(), ResolveError> {
//! 		let entry = scope.get( "host-sdk" ).expect( "offered by the host" );
//! 		entry.accessor.ensure_available().await.map_err(| e | ResolveError::RuntimeRejected( e.to_string() ))?;
//! 		assert_eq!( entry.accessor.get(), "the host's instance" );
//! 		Ok(())
//! 	}
//! 	fn bundles( &self, _module: &str ) -> bool { false }
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = Arc::new( SharedModuleRegistry::new([
//! 	( "host-sdk", SharedModuleMetadata::new() ),
//! ])? );
//! let resolver = ModuleResolver::new( registry, HashMap::from([
//! 	( "host-sdk".to_string(), HostModule::loaded( Arc::new( EagerAccessor::new( "the host's instance" )))),
//! ]))?;
//!
//! let report = futures::executor::block_on(
//! 	resolver.resolve( RemoteEntry::Init( Box::new( BundleRuntime )))
//! )?;
//! assert_eq!( report.state( "host-sdk" ), ModuleResolution::HostProvided );
//! # Ok(())
//! # }
//! ```

mod descriptor ;
mod diagnostics ;
mod generator ;
mod pipeline ;
mod registry ;
mod resolver ;
mod synthesis ;
mod type_graph ;
mod walker ;

pub use descriptor::{ ExtensionPropertyInfo, ExtensionTypeInfo };
pub use diagnostics::{ Diagnostics, Severity };
pub use generator::{ SchemaGenerator, SCHEMA_DIALECT };
pub use pipeline::{ generate_all, generate_document, validate_extensions, write_artifacts, GenerateError, GenerationConfig };
pub use registry::{ RegistryError, SharedModuleMetadata, SharedModuleRegistry };
pub use resolver::{
	negotiate, AccessError, EagerAccessor, HostModule, ModuleAccessor, ModuleOverride,
	ModuleResolution, ModuleResolver, ModuleTable, RemoteEntry, ResolutionReport,
	ResolveError, ScopeInit, SharedScope, SharedScopeEntry, ANY_VERSION,
};
pub use synthesis::{ CodeRefParser, ConstructorTypeParser, ExtensionAliasParser, SubNodeParser, SynthesisError };
pub use type_graph::{ PrimitiveKind, PropertySig, TypeDecl, TypeGraphError, TypeNode, TypeProgram };
pub use walker::{ CodeRefDeclarations, WalkError, Walker, CODE_REF, ENCODED_CODE_REF, EXTENSION_DECLARATION };
