//! Type declaration walker.
//!
//! A pure read over one [`TypeProgram`]: locates the extension union and
//! decomposes each of its members into an [`ExtensionTypeInfo`], or reports
//! why it cannot. The walk never aborts on the first structural error - every
//! failing member is reported through the caller's callback and dropped, so
//! one run surfaces as many diagnostics as possible.

use thiserror::Error ;

use crate::descriptor::{ ExtensionPropertyInfo, ExtensionTypeInfo };
use crate::type_graph::{ TypeDecl, TypeNode, TypeProgram };



/// Name of the two-argument generic wrapper used to declare one extension.
pub const EXTENSION_DECLARATION: &str = "ExtensionDeclaration" ;
/// Name of the generic reference-marker type for lazily resolved code.
pub const CODE_REF: &str = "CodeRef" ;
/// Name of the serialized counterpart of [`CODE_REF`].
pub const ENCODED_CODE_REF: &str = "EncodedCodeRef" ;

/// Structural errors detected while decomposing the extension union.
///
/// These are collected, not fail-fast: the walker reports each one through
/// its callback and keeps going.
#[derive( Error, Debug, Clone, PartialEq, Eq )]
pub enum WalkError {
	/// The designated union declaration is absent from the program.
	#[error( "Missing Extension Union Declaration: {0}" )] MissingUnion( String ),
	/// The designated declaration exists but is not a union type.
	#[error( "Declaration '{0}' Is Not a Union Type" )] NotAUnion( String ),
	/// The union exists but has no members.
	#[error( "Extension Union '{0}' Has No Members" )] EmptyUnion( String ),
	/// A union member is not a reference to a named type-alias declaration.
	#[error( "Union Member '{0}' Does Not Originate From a Named Type Alias" )] NotAnAlias( String ),
	/// An alias body is not `ExtensionDeclaration<T, P>`.
	#[error( "Alias '{0}' Must Be Declared as {EXTENSION_DECLARATION}<T, P>" )] NotAnExtensionDeclaration( String ),
	/// The first type argument is not a string literal.
	#[error( "Alias '{0}' Must Declare T as a String Literal Type" )] NonLiteralDiscriminant( String ),
	/// The second type argument is not an object literal.
	#[error( "Alias '{0}' Must Declare P as an Object Literal Type" )] NonObjectProperties( String ),
}

/// The two well-known declarations needed by the code-ref schema parser.
#[derive( Debug, Clone, Copy )]
pub struct CodeRefDeclarations<'a> {
	/// The generic reference-marker declaration, `CodeRef<T>`.
	pub code_ref: &'a TypeDecl,
	/// Its encoded/serialized counterpart, `EncodedCodeRef`.
	pub encoded_code_ref: &'a TypeDecl,
}

/// Walks one program's type declarations.
#[derive( Debug, Clone, Copy )]
pub struct Walker<'a> {
	program: &'a TypeProgram,
}

impl<'a> Walker<'a> {

	pub fn new( program: &'a TypeProgram ) -> Self {
		Self { program }
	}

	/// Locates the reference-marker declarations by exact name match.
	///
	/// Returns `None` if either is absent. Callers that require them must
	/// treat absence as fatal; schema generation cannot represent code
	/// references without the encoded counterpart.
	pub fn declarations( &self ) -> Option<CodeRefDeclarations<'a>> {
		Some( CodeRefDeclarations {
			code_ref: self.program.decl( CODE_REF )?,
			encoded_code_ref: self.program.decl( ENCODED_CODE_REF )?,
		})
	}

	/// Decomposes the designated extension union into descriptors.
	///
	/// Every structural failure is passed to `report` and the offending
	/// member is dropped; the returned descriptors are always complete. A
	/// missing, non-union or empty union declaration reports exactly once
	/// and yields an empty catalog.
	pub fn collect_extensions(
		&self,
		union_name: &str,
		mut report: impl FnMut( WalkError ),
	) -> Vec<ExtensionTypeInfo> {

		let members = match self.program.decl( union_name ).map(| decl | &decl.body ) {
			None => {
				report( WalkError::MissingUnion( union_name.to_string() ));
				return Vec::new();
			},
			Some( TypeNode::Union { members }) => members,
			Some( _ ) => {
				report( WalkError::NotAUnion( union_name.to_string() ));
				return Vec::new();
			},
		};

		if members.is_empty() {
			report( WalkError::EmptyUnion( union_name.to_string() ));
			return Vec::new();
		}

		members.iter()
			.filter_map(| member | match self.resolve_member( member ) {
				Ok( descriptor ) => Some( descriptor ),
				Err( error ) => {
					report( error );
					None
				},
			})
			.collect()

	}

	/// Runs the four-step descriptor-resolution algorithm for one member.
	///
	/// Each step's failure abandons resolution for the member; no descriptor
	/// is ever returned partially filled.
	fn resolve_member( &self, member: &TypeNode ) -> Result<ExtensionTypeInfo, WalkError> {

		// 1. The member must originate from a named type-alias declaration.
		let alias = match member {
			TypeNode::Reference { name, args } if args.is_empty() => self.program.decl( name ),
			_ => None,
		}
		.ok_or_else(|| WalkError::NotAnAlias( member.to_string() ))?;

		// 2. The alias body must be ExtensionDeclaration<T, P>.
		let ( discriminant_arg, properties_arg ) = match &alias.body {
			TypeNode::Reference { name, args }
				if name == EXTENSION_DECLARATION && args.len() == 2 => ( &args[0], &args[1] ),
			_ => return Err( WalkError::NotAnExtensionDeclaration( alias.name.clone() )),
		};

		// 3. T supplies the discriminant and must be a string literal.
		let discriminant = match discriminant_arg {
			TypeNode::StringLiteral { value } => value.clone(),
			_ => return Err( WalkError::NonLiteralDiscriminant( alias.name.clone() )),
		};

		// 4. P supplies the property signatures and must be an object literal.
		let properties = match properties_arg {
			TypeNode::Object { properties } => properties.iter()
				.map(| prop | ExtensionPropertyInfo {
					name: prop.name.clone(),
					value_type: prop.value.to_string(),
					doc_comments: prop.doc_comments.clone(),
				})
				.collect(),
			_ => return Err( WalkError::NonObjectProperties( alias.name.clone() )),
		};

		Ok( ExtensionTypeInfo {
			name: alias.name.clone(),
			discriminant,
			properties,
			doc_comments: alias.doc_comments.clone(),
		})

	}

}
