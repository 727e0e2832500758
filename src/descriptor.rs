//! Extension descriptor model.
//!
//! The normalized catalog produced by the type declaration walker. Pure data:
//! the walker guarantees every descriptor it returns is fully populated, so
//! consumers (the extension-alias schema parser, the validation CLI) never
//! see a partially resolved extension.

use serde::Serialize ;



/// One extension point extracted from the extension union.
#[derive( Debug, Clone, PartialEq, Serialize )]
#[serde( rename_all = "camelCase" )]
pub struct ExtensionTypeInfo {
	/// Name of the alias declaration the extension was resolved from.
	/// Always corresponds to an existing named declaration in the program.
	pub name: String,
	/// The string-literal discriminant, e.g. `console.page/route`.
	#[serde( rename = "type" )]
	pub discriminant: String,
	/// The extension's declared properties, in declaration order.
	pub properties: Vec<ExtensionPropertyInfo>,
	/// Documentation lines taken from the alias declaration itself.
	pub doc_comments: Vec<String>,
}

/// One property of an extension's properties object.
#[derive( Debug, Clone, PartialEq, Serialize )]
#[serde( rename_all = "camelCase" )]
pub struct ExtensionPropertyInfo {
	pub name: String,
	/// Textual signature of the property's type, e.g. `CodeRef<() => void>`.
	pub value_type: String,
	pub doc_comments: Vec<String>,
}
