use std::collections::HashMap ;
use std::sync::Arc ;

use extension_link::{
	EagerAccessor, HostModule, ModuleResolution, ModuleResolver, RemoteEntry,
	SharedModuleMetadata, SharedModuleRegistry,
};
use futures::executor::block_on ;

fn resolver() -> ModuleResolver<&'static str> {
	let registry = Arc::new( SharedModuleRegistry::new([
		( "host-sdk", SharedModuleMetadata::new() ),
		( "charting", SharedModuleMetadata::new().with_singleton( false ).with_allow_fallback( true )),
	]).unwrap() );
	ModuleResolver::new( registry, HashMap::from([
		// Insertion order deliberately reversed relative to the registry.
		( "charting".to_string(), HostModule::pending( Arc::new( EagerAccessor::new( "charting-host" )))),
		( "host-sdk".to_string(), HostModule::loaded( Arc::new( EagerAccessor::new( "sdk-host" )))),
	])).unwrap()
}

// The override path replaces the plugin's view of every listed module;
// fallback policy never enters into it.
#[test]
fn every_module_is_host_provided() {
	let report = block_on(
		resolver().resolve( RemoteEntry::Override( Box::new( crate::RecordingOverride::new() )))
	).unwrap();

	assert_eq!( report.state( "host-sdk" ), ModuleResolution::HostProvided );
	assert_eq!( report.state( "charting" ), ModuleResolution::HostProvided );
	assert!( report.is_fully_resolved() );
}

#[test]
fn table_is_complete_and_in_registry_order() {
	let runtime = crate::RecordingOverride::new();
	let observed = Arc::clone( &runtime.observed );
	block_on( resolver().resolve( RemoteEntry::Override( Box::new( runtime )))).unwrap();

	assert_eq!(
		*observed.lock().unwrap(),
		[ "host-sdk=sdk-host", "charting=charting-host" ],
	);
}
