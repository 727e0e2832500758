//! Schema synthesis parsers.
//!
//! Three independent node interceptors that override the default schema
//! generation algorithm for type constructs it cannot represent faithfully.
//! The generator offers every node to each parser in a fixed priority order
//! and only falls back to the default algorithm when none claims the node -
//! a decorator over the base algorithm, not a replacement. The parsers are
//! non-overlapping by node kind.

use log::debug ;
use serde_json::{ json, Value };
use thiserror::Error ;

use crate::descriptor::ExtensionTypeInfo ;
use crate::generator::SchemaGenerator ;
use crate::type_graph::{ TypeNode, TypeProgram };
use crate::walker::{ CodeRefDeclarations, CODE_REF, EXTENSION_DECLARATION };



/// Errors raised while synthesizing a schema from the type graph.
///
/// Any of these aborts generation for the affected root type; schema
/// correctness is a build-time gate, so no partial document survives.
#[derive( Error, Debug )]
pub enum SynthesisError {
	/// A referenced declaration does not exist in the program.
	#[error( "Unknown Type Reference: {0}" )] UnknownTypeReference( String ),
	/// The root type name has no declaration in the program.
	#[error( "Missing Root Type Declaration: {0}" )] MissingRootDeclaration( String ),
	/// The node kind has no schema representation.
	#[error( "Type Has No Schema Representation: {0}" )] UnrepresentableNode( String ),
	/// An extension alias matched by name no longer resolves in the program.
	#[error( "Extension Alias Without Declaration: {0}" )] DanglingExtensionAlias( String ),
}

/// A node interceptor tried before the default schema generation algorithm.
///
/// `supports` must be cheap and side-effect free. `transform` may re-enter
/// the generator to convert child nodes and to register named definitions.
pub trait SubNodeParser {
	/// Returns `true` if this parser claims the node.
	fn supports( &self, node: &TypeNode, program: &TypeProgram ) -> bool ;
	/// Produces the schema for a claimed node.
	fn transform( &self, node: &TypeNode, generator: &mut SchemaGenerator ) -> Result<Value, SynthesisError> ;
}

/// Emits an accept-anything schema for constructor signatures.
///
/// The base algorithm has no representation for callable-as-constructor
/// types; manifest validation only needs to accept such fields, not check
/// their internal shape.
#[derive( Debug, Default, Clone, Copy )]
pub struct ConstructorTypeParser ;

impl SubNodeParser for ConstructorTypeParser {

	fn supports( &self, node: &TypeNode, _program: &TypeProgram ) -> bool {
		matches!( node, TypeNode::Constructor { .. })
	}

	fn transform( &self, node: &TypeNode, _generator: &mut SchemaGenerator ) -> Result<Value, SynthesisError> {
		debug!( "constructor type '{node}' accepted as opaque" );
		Ok( json!({}) )
	}

}

/// Replaces `CodeRef<T>` references with the encoded-reference definition.
///
/// At the serialization boundary a code reference is an indirect descriptor,
/// never the shape of the referenced value. `T` is deliberately left
/// unexpanded: expanding it would mismatch the wire format and risk
/// unbounded, duplicated expansion across use sites.
pub struct CodeRefParser<'a> {
	declarations: CodeRefDeclarations<'a>,
}

impl<'a> CodeRefParser<'a> {
	/// Builds the parser around the well-known declarations located by
	/// [`Walker::declarations`]( crate::walker::Walker::declarations ).
	pub fn new( declarations: CodeRefDeclarations<'a> ) -> Self {
		Self { declarations }
	}
}

impl SubNodeParser for CodeRefParser<'_> {

	fn supports( &self, node: &TypeNode, program: &TypeProgram ) -> bool {
		match node {
			// Matches wherever in the graph the reference occurs, including
			// through intermediate aliases of the marker generic.
			TypeNode::Reference { name, .. } => program.resolve_alias_root( name ) == CODE_REF,
			_ => false,
		}
	}

	fn transform( &self, node: &TypeNode, generator: &mut SchemaGenerator ) -> Result<Value, SynthesisError> {
		debug!( "code reference '{node}' redirected to encoded form" );
		generator.definition_for( self.declarations.encoded_code_ref )
	}

}

/// Produces one stable top-level definition per extension alias.
///
/// Without interception the base algorithm would expand the full two-argument
/// generic inline at every use site. This parser instead generates the schema
/// of the alias's underlying declaration body directly, re-attaches the
/// alias's own documentation, and registers the result as a named definition
/// keyed by the alias name.
pub struct ExtensionAliasParser {
	names: Vec<String>,
}

impl ExtensionAliasParser {
	/// Builds the parser over the walker's descriptor catalog.
	pub fn new( extensions: &[ExtensionTypeInfo] ) -> Self {
		Self {
			names: extensions.iter().map(| extension | extension.name.clone() ).collect(),
		}
	}
}

impl SubNodeParser for ExtensionAliasParser {

	fn supports( &self, node: &TypeNode, _program: &TypeProgram ) -> bool {
		match node {
			TypeNode::Reference { name, args } if args.is_empty() => self.names.iter().any(| known | known == name ),
			_ => false,
		}
	}

	fn transform( &self, node: &TypeNode, generator: &mut SchemaGenerator ) -> Result<Value, SynthesisError> {

		let TypeNode::Reference { name, .. } = node else {
			return Err( SynthesisError::UnrepresentableNode( node.to_string() ));
		};
		// The walker only catalogs aliases that exist in the program, so a
		// miss here means the catalog and the program have diverged.
		let decl = generator.program().decl( name )
			.ok_or_else(|| SynthesisError::DanglingExtensionAlias( name.clone() ))?;

		let ( discriminant, properties ) = match &decl.body {
			TypeNode::Reference { name, args }
				if name == EXTENSION_DECLARATION && args.len() == 2 => ( &args[0], &args[1] ),
			_ => return Err( SynthesisError::UnrepresentableNode( decl.body.to_string() )),
		};

		debug!( "extension alias '{}' hoisted to a named definition", decl.name );
		generator.hoist_definition( &decl.name, &decl.doc_comments, | generator | Ok( json!({
			"type": "object",
			"properties": {
				"type": generator.convert_node( discriminant )?,
				"properties": generator.convert_node( properties )?,
			},
			"required": [ "type", "properties" ],
			"additionalProperties": false,
		})))

	}

}
