use extension_link::{ generate_all, GenerationConfig };
use serde_json::Value ;

#[test]
fn both_artifacts_carry_the_identical_document() {

	let dir = tempfile::tempdir().unwrap();
	let source_unit = dir.path().join( "extensions.types.json" );
	std::fs::write( &source_unit, crate::extension_source() ).unwrap();

	let config = GenerationConfig::new( &source_unit, "SupportedExtensions" )
		.with_extensions( crate::EXTENSION_UNION );
	generate_all( &[ config ], dir.path() ).unwrap();

	let json_text = std::fs::read_to_string( dir.path().join( "SupportedExtensions.json" )).unwrap();
	let module_text = std::fs::read_to_string( dir.path().join( "SupportedExtensions.js" )).unwrap();

	assert!( json_text.ends_with( '\n' ));
	let module_body = module_text
		.strip_prefix( "export default " ).unwrap()
		.strip_suffix( ";\n" ).unwrap();

	let from_json: Value = serde_json::from_str( &json_text ).unwrap();
	let from_module: Value = serde_json::from_str( module_body ).unwrap();
	assert_eq!( from_json, from_module );
	assert_eq!( from_json[ "$ref" ], serde_json::json!( "#/definitions/SupportedExtensions" ));

}
