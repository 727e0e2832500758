use extension_link::{ SchemaGenerator, SynthesisError, TypeProgram, SCHEMA_DIALECT };
use serde_json::json ;

fn generate( source: &str, root: &str ) -> serde_json::Value {
	let program = TypeProgram::from_json( source ).unwrap();
	SchemaGenerator::new( &program, Vec::new() ).generate_root( root ).unwrap()
}

#[test]
fn document_envelope_declares_dialect_and_root_reference() {
	let document = generate( r#"{
		"declarations": [{ "name": "Flag", "body": { "kind": "primitive", "name": "boolean" }}]
	}"#, "Flag" );
	assert_eq!( document[ "$schema" ], json!( SCHEMA_DIALECT ));
	assert_eq!( document[ "$ref" ], json!( "#/definitions/Flag" ));
	assert_eq!( document[ "definitions" ][ "Flag" ], json!({ "type": "boolean" }));
}

#[test]
fn literals_become_const_schemas() {
	let document = generate( r#"{
		"declarations": [{ "name": "Mixed", "body": { "kind": "union", "members": [
			{ "kind": "stringLiteral", "value": "on" },
			{ "kind": "numberLiteral", "value": 3.5 },
			{ "kind": "booleanLiteral", "value": true }
		]}}]
	}"#, "Mixed" );
	assert_eq!(
		document[ "definitions" ][ "Mixed" ][ "anyOf" ],
		json!([ { "const": "on" }, { "const": 3.5 }, { "const": true } ]),
	);
}

#[test]
fn arrays_and_nested_references_are_hoisted() {
	let document = generate( r#"{
		"declarations": [
			{ "name": "Item", "body": { "kind": "primitive", "name": "string" }},
			{ "name": "Items", "body": { "kind": "array", "element": { "kind": "reference", "name": "Item" }}}
		]
	}"#, "Items" );
	assert_eq!(
		document[ "definitions" ][ "Items" ],
		json!({ "type": "array", "items": { "$ref": "#/definitions/Item" }}),
	);
	assert_eq!( document[ "definitions" ][ "Item" ], json!({ "type": "string" }));
}

#[test]
fn self_referential_declarations_terminate() {
	let document = generate( r#"{
		"declarations": [
			{ "name": "Tree", "body": { "kind": "object", "properties": [
				{ "name": "children", "value": { "kind": "array", "element": { "kind": "reference", "name": "Tree" }}}
			]}}
		]
	}"#, "Tree" );
	assert_eq!(
		document[ "definitions" ][ "Tree" ][ "properties" ][ "children" ][ "items" ],
		json!({ "$ref": "#/definitions/Tree" }),
	);
}

#[test]
fn unknown_references_are_hard_errors() {
	let program = TypeProgram::from_json( r#"{
		"declarations": [{ "name": "Broken", "body": { "kind": "reference", "name": "Phantom" }}]
	}"# ).unwrap();
	let error = SchemaGenerator::new( &program, Vec::new() ).generate_root( "Broken" ).unwrap_err();
	assert!( matches!( error, SynthesisError::UnknownTypeReference( name ) if name == "Phantom" ));
}

#[test]
fn missing_root_declaration_is_a_hard_error() {
	let program = TypeProgram::new( Vec::new() ).unwrap();
	let error = SchemaGenerator::new( &program, Vec::new() ).generate_root( "Absent" ).unwrap_err();
	assert!( matches!( error, SynthesisError::MissingRootDeclaration( name ) if name == "Absent" ));
}
