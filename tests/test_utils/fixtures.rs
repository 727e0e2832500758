// Shared fixture programs. Included into each test root; not every root
// uses every helper.

#[allow( dead_code )]
pub const EXTENSION_UNION: &str = "SupportedExtension" ;

/// A well-formed source unit: two extensions, a code reference, and the
/// array root the generation pipeline targets.
#[allow( dead_code )]
pub fn extension_source() -> &'static str {
	r#"{
		"declarations": [
			{
				"name": "CodeRef",
				"typeParams": [ "T" ],
				"body": { "kind": "function", "params": [], "returns": { "kind": "reference", "name": "T" }}
			},
			{
				"name": "EncodedCodeRef",
				"body": { "kind": "object", "properties": [
					{ "name": "$codeRef", "value": { "kind": "primitive", "name": "string" }}
				]}
			},
			{
				"name": "FeaturePage",
				"docComments": [ "Adds a routed page to the host shell." ],
				"body": { "kind": "reference", "name": "ExtensionDeclaration", "args": [
					{ "kind": "stringLiteral", "value": "console.page/route" },
					{ "kind": "object", "properties": [
						{
							"name": "url",
							"docComments": [ "Route the page is mounted under." ],
							"value": { "kind": "primitive", "name": "string" }
						},
						{
							"name": "component",
							"value": { "kind": "reference", "name": "CodeRef", "args": [
								{ "kind": "function", "params": [], "returns": { "kind": "primitive", "name": "void" }}
							]}
						}
					]}
				]}
			},
			{
				"name": "ModelBadge",
				"docComments": [ "Attaches a badge to catalog entries." ],
				"body": { "kind": "reference", "name": "ExtensionDeclaration", "args": [
					{ "kind": "stringLiteral", "value": "console.catalog/badge" },
					{ "kind": "object", "properties": [
						{ "name": "label", "value": { "kind": "primitive", "name": "string" }},
						{ "name": "icon", "optional": true, "value": { "kind": "primitive", "name": "string" }}
					]}
				]}
			},
			{
				"name": "SupportedExtension",
				"body": { "kind": "union", "members": [
					{ "kind": "reference", "name": "FeaturePage" },
					{ "kind": "reference", "name": "ModelBadge" }
				]}
			},
			{
				"name": "SupportedExtensions",
				"docComments": [ "Everything a plugin may contribute." ],
				"body": { "kind": "array", "element": { "kind": "reference", "name": "SupportedExtension" }}
			}
		]
	}"#
}

#[allow( dead_code )]
pub fn extension_program() -> extension_link::TypeProgram {
	extension_link::TypeProgram::from_json( extension_source() ).unwrap()
}

/// A source unit whose union mixes one valid member with one declaring a
/// numeric discriminant.
#[allow( dead_code )]
pub fn mixed_validity_source() -> &'static str {
	r#"{
		"declarations": [
			{
				"name": "CodeRef",
				"typeParams": [ "T" ],
				"body": { "kind": "function", "params": [], "returns": { "kind": "reference", "name": "T" }}
			},
			{
				"name": "EncodedCodeRef",
				"body": { "kind": "object", "properties": [
					{ "name": "$codeRef", "value": { "kind": "primitive", "name": "string" }}
				]}
			},
			{
				"name": "ValidBadge",
				"docComments": [ "A well-declared badge." ],
				"body": { "kind": "reference", "name": "ExtensionDeclaration", "args": [
					{ "kind": "stringLiteral", "value": "console.catalog/badge" },
					{ "kind": "object", "properties": [
						{ "name": "label", "value": { "kind": "primitive", "name": "string" }}
					]}
				]}
			},
			{
				"name": "NumericBadge",
				"body": { "kind": "reference", "name": "ExtensionDeclaration", "args": [
					{ "kind": "numberLiteral", "value": 42 },
					{ "kind": "object", "properties": [] }
				]}
			},
			{
				"name": "SupportedExtension",
				"body": { "kind": "union", "members": [
					{ "kind": "reference", "name": "NumericBadge" },
					{ "kind": "reference", "name": "ValidBadge" }
				]}
			}
		]
	}"#
}

#[allow( dead_code )]
pub fn mixed_validity_program() -> extension_link::TypeProgram {
	extension_link::TypeProgram::from_json( mixed_validity_source() ).unwrap()
}

/// Runs the full interceptor stack over the well-formed fixture program.
#[allow( dead_code )]
pub fn generate_extension_document( root: &str ) -> serde_json::Value {
	use extension_link::{
		CodeRefParser, ConstructorTypeParser, ExtensionAliasParser, SchemaGenerator,
		SubNodeParser, Walker,
	};

	let program = extension_program();
	let walker = Walker::new( &program );
	let extensions = walker.collect_extensions( EXTENSION_UNION, | error | panic!( "fixture must be clean: {error}" ));
	let declarations = walker.declarations().expect( "fixture declares the markers" );

	let parsers: Vec<Box<dyn SubNodeParser + '_>> = vec![
		Box::new( ConstructorTypeParser ),
		Box::new( CodeRefParser::new( declarations )),
		Box::new( ExtensionAliasParser::new( &extensions )),
	];
	SchemaGenerator::new( &program, parsers ).generate_root( root ).unwrap()
}

/// The fixture document rooted at the array declaration, generated once per
/// test binary.
#[allow( dead_code )]
pub fn extension_document() -> &'static serde_json::Value {
	static DOCUMENT: once_cell::sync::Lazy<serde_json::Value> =
		once_cell::sync::Lazy::new(|| generate_extension_document( "SupportedExtensions" ));
	&DOCUMENT
}
