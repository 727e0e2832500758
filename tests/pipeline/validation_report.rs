use extension_link::validate_extensions ;

const UNDOCUMENTED_SOURCE: &str = r#"{
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
			"name": "BareBadge",
			"body": { "kind": "reference", "name": "ExtensionDeclaration", "args": [
				{ "kind": "stringLiteral", "value": "console.catalog/badge" },
				{ "kind": "object", "properties": [] }
			]}
		},
		{
			"name": "SupportedExtension",
			"body": { "kind": "union", "members": [
				{ "kind": "reference", "name": "BareBadge" }
			]}
		}
	]
}"# ;

fn validate( source: &str ) -> extension_link::Diagnostics {
	let dir = tempfile::tempdir().unwrap();
	let source_unit = dir.path().join( "extensions.types.json" );
	std::fs::write( &source_unit, source ).unwrap();
	validate_extensions( &source_unit, crate::EXTENSION_UNION ).unwrap()
}

#[test]
fn structural_findings_are_collected_not_fatal() {
	let diagnostics = validate( crate::mixed_validity_source() );
	assert!( diagnostics.has_errors() );
	assert_eq!( diagnostics.errors().len(), 1 );
	assert!( diagnostics.errors()[0].contains( "String Literal" ));
}

#[test]
fn undocumented_extensions_warn_without_failing() {
	let diagnostics = validate( UNDOCUMENTED_SOURCE );
	assert!( !diagnostics.has_errors() );
	assert_eq!( diagnostics.warnings().len(), 1 );
	assert!( diagnostics.warnings()[0].contains( "BareBadge" ));
}

#[test]
fn clean_passes_render_empty() {
	let diagnostics = validate( crate::extension_source() );
	assert!( !diagnostics.has_errors() );
	assert!( diagnostics.warnings().is_empty() );
	assert_eq!( diagnostics.render(), "" );
}

#[test]
fn rendered_report_groups_by_severity() {
	let diagnostics = validate( crate::mixed_validity_source() );
	let rendered = diagnostics.render();
	assert!( rendered.contains( "error:" ));
	assert!( !rendered.contains( "warning:" ));
}
