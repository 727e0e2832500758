//! The in-memory type program that build-time passes walk.
//!
//! The application front end exports its type declarations as a *type-program
//! document*: an ordered list of named type aliases whose bodies are type
//! nodes. This module deserializes those documents and gives the walker and
//! the schema generator a uniform graph to reason over. Declaration and
//! property order is preserved from the document and flows through to every
//! generated artifact.

use std::collections::HashMap ;
use std::fmt ;
use std::path::Path ;

use itertools::Itertools ;
use serde::{ Deserialize, Serialize };
use thiserror::Error ;



/// Errors raised while loading or indexing a type-program document.
#[derive( Error, Debug )]
pub enum TypeGraphError {
	/// The source unit could not be read from disk.
	#[error( "Cannot Read Source Unit '{path}': {source}" )]
	UnreadableSourceUnit { path: String, source: std::io::Error },
	/// The document is not a valid type-program document.
	#[error( "Malformed Type-Program Document: {0}" )]
	MalformedDocument( #[from] serde_json::Error ),
	/// Two declarations share one name; the graph would be ambiguous.
	#[error( "Duplicate Type Declaration: {0}" )]
	DuplicateDeclaration( String ),
}

/// A named type-alias declaration.
#[derive( Debug, Clone, PartialEq, Serialize, Deserialize )]
#[serde( rename_all = "camelCase" )]
pub struct TypeDecl {
	/// Alias name, unique within one program.
	pub name: String,
	/// Generic parameter names, empty for non-generic aliases.
	#[serde( default, skip_serializing_if = "Vec::is_empty" )]
	pub type_params: Vec<String>,
	/// Documentation lines attached to the declaration itself.
	#[serde( default, skip_serializing_if = "Vec::is_empty" )]
	pub doc_comments: Vec<String>,
	/// The aliased type.
	pub body: TypeNode,
}

/// One property signature inside an object type.
#[derive( Debug, Clone, PartialEq, Serialize, Deserialize )]
#[serde( rename_all = "camelCase" )]
pub struct PropertySig {
	pub name: String,
	#[serde( default )]
	pub optional: bool,
	#[serde( default, skip_serializing_if = "Vec::is_empty" )]
	pub doc_comments: Vec<String>,
	pub value: TypeNode,
}

/// Built-in scalar types of the source language.
#[derive( Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize )]
#[serde( rename_all = "lowercase" )]
pub enum PrimitiveKind {
	String,
	Number,
	Boolean,
	Any,
	Unknown,
	Null,
	Void,
	Never,
}

impl fmt::Display for PrimitiveKind {
	fn fmt( &self, f: &mut fmt::Formatter<'_> ) -> fmt::Result {
		f.write_str( match self {
			Self::String => "string",
			Self::Number => "number",
			Self::Boolean => "boolean",
			Self::Any => "any",
			Self::Unknown => "unknown",
			Self::Null => "null",
			Self::Void => "void",
			Self::Never => "never",
		})
	}
}

/// A node in the type graph.
///
/// Nodes are a closed set: the generator's default algorithm matches on the
/// kind exhaustively, and the synthesis parsers intercept individual kinds
/// before it runs.
#[derive( Debug, Clone, PartialEq, Serialize, Deserialize )]
#[serde( tag = "kind", rename_all = "camelCase" )]
pub enum TypeNode {
	/// A string literal type, e.g. `'console.page/route'`.
	StringLiteral { value: String },
	/// A numeric literal type.
	NumberLiteral { value: f64 },
	/// A boolean literal type.
	BooleanLiteral { value: bool },
	/// A built-in scalar type.
	Primitive { name: PrimitiveKind },
	/// An object/record literal type.
	Object {
		#[serde( default )]
		properties: Vec<PropertySig>,
	},
	/// A reference to a named declaration or well-known generic construct.
	Reference {
		name: String,
		#[serde( default, skip_serializing_if = "Vec::is_empty" )]
		args: Vec<TypeNode>,
	},
	/// A union of member types.
	Union { members: Vec<TypeNode> },
	/// An array type.
	Array { element: Box<TypeNode> },
	/// A callable function type.
	Function {
		#[serde( default )]
		params: Vec<TypeNode>,
		returns: Box<TypeNode>,
	},
	/// A callable-as-constructor signature.
	Constructor {
		#[serde( default )]
		params: Vec<TypeNode>,
		returns: Box<TypeNode>,
	},
}

impl TypeNode {
	/// Returns `true` if rendering this node inside a postfix position
	/// (such as `T[]`) requires parentheses.
	fn needs_parens( &self ) -> bool {
		matches!( self, Self::Union { .. } | Self::Function { .. } | Self::Constructor { .. } )
	}
}

impl fmt::Display for TypeNode {
	fn fmt( &self, f: &mut fmt::Formatter<'_> ) -> fmt::Result {
		match self {
			Self::StringLiteral { value } => write!( f, "'{value}'" ),
			Self::NumberLiteral { value } => match value.fract() == 0.0 {
				true => write!( f, "{}", *value as i64 ),
				false => write!( f, "{value}" ),
			},
			Self::BooleanLiteral { value } => write!( f, "{value}" ),
			Self::Primitive { name } => write!( f, "{name}" ),
			Self::Object { properties } if properties.is_empty() => f.write_str( "{}" ),
			Self::Object { properties } => {
				let body = properties.iter()
					.map(| prop | match prop.optional {
						true => format!( "{}?: {}", prop.name, prop.value ),
						false => format!( "{}: {}", prop.name, prop.value ),
					})
					.join( "; " );
				write!( f, "{{ {body} }}" )
			},
			Self::Reference { name, args } if args.is_empty() => f.write_str( name ),
			Self::Reference { name, args } => write!( f, "{name}<{}>", args.iter().join( ", " )),
			Self::Union { members } => write!( f, "{}", members.iter().join( " | " )),
			Self::Array { element } => match element.needs_parens() {
				true => write!( f, "({})[]", element ),
				false => write!( f, "{}[]", element ),
			},
			Self::Function { params, returns } => write!( f, "({}) => {}", params.iter().join( ", " ), returns ),
			Self::Constructor { params, returns } => write!( f, "new ({}) => {}", params.iter().join( ", " ), returns ),
		}
	}
}

#[derive( Deserialize )]
#[serde( rename_all = "camelCase" )]
struct ProgramDocument {
	declarations: Vec<TypeDecl>,
}

/// One source unit's worth of type declarations, indexed by name.
///
/// A program is immutable once constructed. Build-time passes hold a shared
/// reference; concurrent generation must use independent programs since the
/// generator caches by declaration identity.
#[derive( Debug )]
pub struct TypeProgram {
	decls: Vec<TypeDecl>,
	index: HashMap<String, usize>,
}

impl TypeProgram {

	/// Builds a program from declarations, preserving their order.
	///
	/// # Errors
	/// Returns [`TypeGraphError::DuplicateDeclaration`] if two declarations
	/// share a name.
	pub fn new( decls: impl IntoIterator<Item = TypeDecl> ) -> Result<Self, TypeGraphError> {
		let decls: Vec<TypeDecl> = decls.into_iter().collect();
		let mut index = HashMap::with_capacity( decls.len() );
		for ( position, decl ) in decls.iter().enumerate() {
			if index.insert( decl.name.clone(), position ).is_some() {
				return Err( TypeGraphError::DuplicateDeclaration( decl.name.clone() ));
			}
		}
		Ok( Self { decls, index })
	}

	/// Parses a type-program document from JSON text.
	pub fn from_json( document: &str ) -> Result<Self, TypeGraphError> {
		let document: ProgramDocument = serde_json::from_str( document )?;
		Self::new( document.declarations )
	}

	/// Loads a type-program document from disk.
	pub fn load( path: impl AsRef<Path> ) -> Result<Self, TypeGraphError> {
		let path = path.as_ref();
		let text = std::fs::read_to_string( path )
			.map_err(| source | TypeGraphError::UnreadableSourceUnit {
				path: path.display().to_string(),
				source,
			})?;
		Self::from_json( &text )
	}

	/// Looks a declaration up by exact name.
	pub fn decl( &self, name: &str ) -> Option<&TypeDecl> {
		self.index.get( name ).map(| position | &self.decls[ *position ])
	}

	/// All declarations in document order.
	pub fn decls( &self ) -> &[TypeDecl] {
		&self.decls
	}

	/// Follows a chain of bare alias references to the symbol at its root.
	///
	/// `type A = B; type B = CodeRef<X>;` resolves `"A"` to `"CodeRef"`.
	/// Names without a declaration resolve to themselves; reference cycles
	/// stop at the first repeated name rather than looping.
	pub fn resolve_alias_root<'a>( &'a self, name: &'a str ) -> &'a str {
		let mut seen = Vec::new();
		let mut current = name;
		loop {
			match self.decl( current ).map(| decl | &decl.body ) {
				Some( TypeNode::Reference { name: next, .. }) if !seen.contains( &next.as_str() ) => {
					seen.push( current );
					current = next;
				},
				_ => return current,
			}
		}
	}

}
