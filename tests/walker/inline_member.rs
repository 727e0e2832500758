use extension_link::{ TypeProgram, WalkError, Walker };

#[test]
fn anonymous_member_fails_the_alias_requirement() {

	let program = TypeProgram::from_json( r#"{
		"declarations": [
			{ "name": "SupportedExtension", "body": { "kind": "union", "members": [
				{ "kind": "object", "properties": [
					{ "name": "type", "value": { "kind": "stringLiteral", "value": "console.inline/never" }}
				]}
			]}}
		]
	}"# ).unwrap();

	let mut errors = Vec::new();
	let extensions = Walker::new( &program )
		.collect_extensions( "SupportedExtension", | error | errors.push( error ));

	assert!( extensions.is_empty() );
	assert_eq!( errors.len(), 1 );
	assert!( matches!( errors[0], WalkError::NotAnAlias( _ )));

}

#[test]
fn member_referencing_no_declaration_fails_the_alias_requirement() {
	let program = TypeProgram::from_json( r#"{
		"declarations": [
			{ "name": "SupportedExtension", "body": { "kind": "union", "members": [
				{ "kind": "reference", "name": "Phantom" }
			]}}
		]
	}"# ).unwrap();
	let mut errors = Vec::new();
	let extensions = Walker::new( &program )
		.collect_extensions( "SupportedExtension", | error | errors.push( error ));
	assert!( extensions.is_empty() );
	assert_eq!( errors, vec![ WalkError::NotAnAlias( "Phantom".to_string() )]);
}
