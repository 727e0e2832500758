//! Schema generator core.
//!
//! Converts type-graph nodes into JSON schema (draft-07) values. Named
//! declarations are never inlined structurally: every reference is hoisted
//! into a top-level definition and replaced by a `$ref`, with an
//! identity-keyed cache so each declaration is converted at most once per
//! run. The cache makes a generator non-reentrant; concurrent generation
//! must use independent generator (and program) instances.

use std::rc::Rc ;

use log::debug ;
use serde_json::{ json, Map, Value };

use crate::synthesis::{ SubNodeParser, SynthesisError };
use crate::type_graph::{ PrimitiveKind, TypeDecl, TypeNode, TypeProgram };



/// Schema dialect every generated document declares.
pub const SCHEMA_DIALECT: &str = "http://json-schema.org/draft-07/schema#" ;

/// A single-use schema generator over one type program.
///
/// Offers every node to the configured [`SubNodeParser`]s in priority order
/// before applying the default algorithm. Consumed by
/// [`generate_root`]( Self::generate_root ).
pub struct SchemaGenerator<'a> {
	program: &'a TypeProgram,
	parsers: Rc<[Box<dyn SubNodeParser + 'a>]>,
	definitions: Map<String, Value>,
	in_progress: Vec<String>,
}

impl<'a> SchemaGenerator<'a> {

	/// Creates a generator with the given interceptors, tried in order.
	pub fn new( program: &'a TypeProgram, parsers: Vec<Box<dyn SubNodeParser + 'a>> ) -> Self {
		Self {
			program,
			parsers: parsers.into(),
			definitions: Map::new(),
			in_progress: Vec::new(),
		}
	}

	/// The program this generator reads from.
	pub fn program( &self ) -> &'a TypeProgram {
		self.program
	}

	/// A `$ref` schema pointing at the named top-level definition.
	pub fn reference_to( name: &str ) -> Value {
		json!({ "$ref": format!( "#/definitions/{name}" ) })
	}

	/// Synthesizes the document rooted at `root_name`.
	///
	/// The result is `{ "$schema", "$ref", "definitions" }` with definitions
	/// ordered by first reference, which follows declaration order.
	pub fn generate_root( mut self, root_name: &str ) -> Result<Value, SynthesisError> {
		let root = self.program.decl( root_name )
			.ok_or_else(|| SynthesisError::MissingRootDeclaration( root_name.to_string() ))?;
		let root_ref = self.definition_for( root )?;
		Ok( json!({
			"$schema": SCHEMA_DIALECT,
			"$ref": root_ref[ "$ref" ].clone(),
			"definitions": self.definitions,
		}))
	}

	/// Ensures a top-level definition exists for `decl` and returns a `$ref`
	/// to it. Cycles terminate: a declaration already being converted is
	/// referenced without re-entering its body.
	pub fn definition_for( &mut self, decl: &TypeDecl ) -> Result<Value, SynthesisError> {
		let ( name, doc_comments, body ) = ( decl.name.clone(), decl.doc_comments.clone(), decl.body.clone() );
		self.hoist_definition( &name, &doc_comments, | generator | generator.convert_node( &body ))
	}

	/// Registers a named top-level definition built by `build`, attaching
	/// `doc_comments` as its `description`, and returns a `$ref` to it.
	///
	/// Idempotent per name: repeat calls (including re-entrant ones from
	/// within `build`) return the reference without converting again.
	pub fn hoist_definition<F>(
		&mut self,
		name: &str,
		doc_comments: &[String],
		build: F,
	) -> Result<Value, SynthesisError>
	where
		F: FnOnce( &mut Self ) -> Result<Value, SynthesisError>,
	{
		if self.definitions.contains_key( name ) || self.in_progress.iter().any(| pending | pending == name ) {
			return Ok( Self::reference_to( name ));
		}
		self.in_progress.push( name.to_string() );
		let built = build( self );
		self.in_progress.pop();

		let mut schema = built?;
		attach_description( &mut schema, doc_comments );
		debug!( "definition '{name}' registered" );
		self.definitions.insert( name.to_string(), schema );
		Ok( Self::reference_to( name ))
	}

	/// Converts one node, offering it to every interceptor first.
	pub fn convert_node( &mut self, node: &TypeNode ) -> Result<Value, SynthesisError> {
		let parsers = Rc::clone( &self.parsers );
		for parser in parsers.iter() {
			if parser.supports( node, self.program ) {
				return parser.transform( node, self );
			}
		}
		self.default_node( node )
	}

	/// The default generation algorithm, applied when no interceptor claims
	/// the node.
	fn default_node( &mut self, node: &TypeNode ) -> Result<Value, SynthesisError> {
		Ok( match node {
			TypeNode::StringLiteral { value } => json!({ "const": value }),
			TypeNode::NumberLiteral { value } => json!({ "const": value }),
			TypeNode::BooleanLiteral { value } => json!({ "const": value }),
			TypeNode::Primitive { name } => primitive_schema( *name ),
			TypeNode::Object { properties } => {
				let mut schema_properties = Map::new();
				let mut required = Vec::new();
				for property in properties {
					let mut property_schema = self.convert_node( &property.value )?;
					attach_description( &mut property_schema, &property.doc_comments );
					schema_properties.insert( property.name.clone(), property_schema );
					if !property.optional {
						required.push( Value::String( property.name.clone() ));
					}
				}
				let mut schema = json!({ "type": "object", "properties": schema_properties });
				if !required.is_empty() {
					schema[ "required" ] = Value::Array( required );
				}
				schema[ "additionalProperties" ] = Value::Bool( false );
				schema
			},
			TypeNode::Reference { name, .. } => {
				let decl = self.program.decl( name )
					.ok_or_else(|| SynthesisError::UnknownTypeReference( name.clone() ))?;
				self.definition_for( decl )?
			},
			TypeNode::Union { members } => {
				let members = members.iter()
					.map(| member | self.convert_node( member ))
					.collect::<Result<Vec<_>, _>>()?;
				json!({ "anyOf": members })
			},
			TypeNode::Array { element } => json!({ "type": "array", "items": self.convert_node( element )? }),
			TypeNode::Function { .. } | TypeNode::Constructor { .. } => {
				return Err( SynthesisError::UnrepresentableNode( node.to_string() ));
			},
		})
	}

}

fn primitive_schema( kind: PrimitiveKind ) -> Value {
	match kind {
		PrimitiveKind::String => json!({ "type": "string" }),
		PrimitiveKind::Number => json!({ "type": "number" }),
		PrimitiveKind::Boolean => json!({ "type": "boolean" }),
		PrimitiveKind::Null | PrimitiveKind::Void => json!({ "type": "null" }),
		PrimitiveKind::Any | PrimitiveKind::Unknown => json!({}),
		PrimitiveKind::Never => json!({ "not": {} }),
	}
}

/// Attaches doc comments as a schema `description` annotation.
///
/// Empty comment lists leave the schema untouched; non-object schemas (none
/// are produced today) are left as-is.
fn attach_description( schema: &mut Value, doc_comments: &[String] ) {
	if doc_comments.is_empty() {
		return;
	}
	if let Value::Object( fields ) = schema {
		fields.insert( "description".to_string(), Value::String( doc_comments.join( "\n" )));
	}
}
