use extension_link::{ TypeProgram, WalkError, Walker };

fn union_over( alias_body: &str ) -> TypeProgram {
	TypeProgram::from_json( &format!( r#"{{
		"declarations": [
			{{ "name": "Broken", "body": {alias_body} }},
			{{ "name": "SupportedExtension", "body": {{ "kind": "union", "members": [
				{{ "kind": "reference", "name": "Broken" }}
			]}}}}
		]
	}}"# )).unwrap()
}

#[test]
fn wrong_generic_arity_fails() {
	let program = union_over( r#"{ "kind": "reference", "name": "ExtensionDeclaration", "args": [
		{ "kind": "stringLiteral", "value": "console.broken/arity" }
	]}"# );
	let mut errors = Vec::new();
	let extensions = Walker::new( &program )
		.collect_extensions( "SupportedExtension", | error | errors.push( error ));
	assert!( extensions.is_empty() );
	assert_eq!( errors, vec![ WalkError::NotAnExtensionDeclaration( "Broken".to_string() )]);
}

#[test]
fn non_wrapper_alias_body_fails() {
	let program = union_over( r#"{ "kind": "object", "properties": [] }"# );
	let mut errors = Vec::new();
	Walker::new( &program ).collect_extensions( "SupportedExtension", | error | errors.push( error ));
	assert_eq!( errors, vec![ WalkError::NotAnExtensionDeclaration( "Broken".to_string() )]);
}

#[test]
fn non_object_properties_argument_fails() {
	let program = union_over( r#"{ "kind": "reference", "name": "ExtensionDeclaration", "args": [
		{ "kind": "stringLiteral", "value": "console.broken/props" },
		{ "kind": "primitive", "name": "string" }
	]}"# );
	let mut errors = Vec::new();
	Walker::new( &program ).collect_extensions( "SupportedExtension", | error | errors.push( error ));
	assert_eq!( errors, vec![ WalkError::NonObjectProperties( "Broken".to_string() )]);
}
