//! Runtime module resolver.
//!
//! Executed once per plugin-bundle load: negotiates, per shared module,
//! whether the plugin observes the host's instance or its own bundled
//! fallback. The host offers every module declared in the
//! [`SharedModuleRegistry`] through a uniform two-phase accessor - an
//! asynchronous "ensure available" step followed by a synchronous "get" -
//! regardless of whether the underlying resource is genuinely lazy, since
//! the dynamic-loading runtime's contract requires that shape.
//!
//! Resolution for independent bundles is fully independent: nothing is
//! shared beyond the read-only registry, and a bundle may be mounted and
//! unmounted repeatedly over the host process's life.

use std::collections::HashMap ;
use std::sync::Arc ;

use async_trait::async_trait ;
use itertools::Itertools ;
use log::{ debug, info };
use thiserror::Error ;

use crate::registry::{ SharedModuleMetadata, SharedModuleRegistry };



/// The wildcard version key: any requested version is accepted.
pub const ANY_VERSION: &str = "*" ;

/// Errors surfaced while resolving a plugin bundle's shared modules.
#[derive( Error, Debug )]
pub enum ResolveError {
	/// The offered module set does not exactly equal the registry's declared
	/// name set. This is a defect in registry maintenance, not a runtime
	/// condition to recover from.
	#[error( "Offered Modules Do Not Match Registry - Missing: [{}], Unexpected: [{}]",
		.missing.iter().join( ", " ), .unexpected.iter().join( ", " ) )]
	RegistryMismatch { missing: Vec<String>, unexpected: Vec<String> },
	/// The plugin's loading runtime rejected the negotiation outright.
	#[error( "Plugin Loading Runtime Rejected Negotiation: {0}" )]
	RuntimeRejected( String ),
}

/// Errors raised by an accessor's "ensure available" phase.
#[derive( Error, Debug )]
pub enum AccessError {
	/// The underlying module source could not be made available.
	#[error( "Module Source Unavailable: {0}" )] Unavailable( String ),
}

/// Two-phase indirection to one shared module instance.
///
/// The contract is deliberately split into two operations so it is visible
/// at the type level: callers must await [`ensure_available`]
/// ( Self::ensure_available ) before the synchronous [`get`]( Self::get ).
#[async_trait]
pub trait ModuleAccessor<M>: Send + Sync {
	/// Makes the module available. Must complete before [`get`]( Self::get ).
	async fn ensure_available( &self ) -> Result<(), AccessError> ;
	/// Returns the module instance. Infallible once availability is ensured.
	fn get( &self ) -> M ;
}

/// Gives a non-lazy, already-materialized module the uniform two-phase shape.
pub struct EagerAccessor<M> {
	module: M,
}

impl<M> EagerAccessor<M> {
	pub fn new( module: M ) -> Self {
		Self { module }
	}
}

#[async_trait]
impl<M: Clone + Send + Sync> ModuleAccessor<M> for EagerAccessor<M> {

	async fn ensure_available( &self ) -> Result<(), AccessError> {
		Ok(())
	}

	fn get( &self ) -> M {
		self.module.clone()
	}

}

/// One module as the host offers it into a plugin's shared scope.
pub struct SharedScopeEntry<M> {
	/// Always [`ANY_VERSION`]: any requested version is accepted.
	pub version_key: &'static str,
	/// Two-phase indirection to the host's instance.
	pub accessor: Arc<dyn ModuleAccessor<M>>,
	/// Whether the host has already loaded this module.
	pub loaded: bool,
}

impl<M> Clone for SharedScopeEntry<M> {
	fn clone( &self ) -> Self {
		Self {
			version_key: self.version_key,
			accessor: Arc::clone( &self.accessor ),
			loaded: self.loaded,
		}
	}
}

/// The per-bundle shared scope handed to a loading runtime's `init`.
///
/// Entries follow registry declaration order.
pub struct SharedScope<M> {
	entries: Vec<( String, SharedScopeEntry<M> )>,
}

impl<M> SharedScope<M> {

	pub fn names( &self ) -> impl Iterator<Item = &str> {
		self.entries.iter().map(|( name, _ )| name.as_str() )
	}

	pub fn get( &self, name: &str ) -> Option<&SharedScopeEntry<M>> {
		self.entries.iter()
			.find(|( existing, _ )| existing == name )
			.map(|( _, entry )| entry )
	}

	pub fn iter( &self ) -> impl Iterator<Item = ( &str, &SharedScopeEntry<M> )> {
		self.entries.iter().map(|( name, entry )| ( name.as_str(), entry ))
	}

	pub fn len( &self ) -> usize {
		self.entries.len()
	}

	pub fn is_empty( &self ) -> bool {
		self.entries.is_empty()
	}

}

/// The full module table handed to a loading runtime's `override`.
pub struct ModuleTable<M> {
	entries: Vec<( String, Arc<dyn ModuleAccessor<M>> )>,
}

impl<M> ModuleTable<M> {

	pub fn names( &self ) -> impl Iterator<Item = &str> {
		self.entries.iter().map(|( name, _ )| name.as_str() )
	}

	pub fn get( &self, name: &str ) -> Option<&Arc<dyn ModuleAccessor<M>>> {
		self.entries.iter()
			.find(|( existing, _ )| existing == name )
			.map(|( _, accessor )| accessor )
	}

	pub fn len( &self ) -> usize {
		self.entries.len()
	}

	pub fn is_empty( &self ) -> bool {
		self.entries.is_empty()
	}

}

/// The `override` capability of a plugin bundle's loading runtime.
///
/// Receiving the table unconditionally replaces the plugin's view of every
/// listed module with the host's version; no fallback is consulted.
#[async_trait]
pub trait ModuleOverride<M>: Send {
	async fn override_modules( &mut self, table: ModuleTable<M> ) -> Result<(), ResolveError> ;
}

/// The `init` capability of a plugin bundle's loading runtime.
///
/// The runtime itself decides per module whether to accept the host's scope
/// entry or keep the plugin's bundled copy; errors arising from that choice
/// are raised and owned by the runtime.
#[async_trait]
pub trait ScopeInit<M>: Send {
	/// Hands the shared scope over. Invoked at most once per bundle load.
	async fn init( &mut self, scope: SharedScope<M> ) -> Result<(), ResolveError> ;
	/// Returns `true` if the bundle ships its own fallback copy of `module`.
	fn bundles( &self, module: &str ) -> bool ;
}

/// A loaded plugin bundle's remote entry point.
///
/// Each bundle exposes exactly one of the two capabilities. The dual paths
/// are a compatibility shim between two historical loading-runtime versions;
/// keeping them as enum variants makes the shim visible so one can be
/// deleted once a single runtime version is targeted.
pub enum RemoteEntry<M> {
	Override( Box<dyn ModuleOverride<M>> ),
	Init( Box<dyn ScopeInit<M>> ),
}

/// Per-module resolution state, from one plugin bundle's perspective.
#[derive( Debug, Clone, Copy, PartialEq, Eq, Default )]
pub enum ModuleResolution {
	/// Resolution has not run for this module yet.
	#[default]
	Unresolved,
	/// The plugin observes the host's instance.
	HostProvided,
	/// The plugin uses its own bundled fallback copy.
	PluginFallback,
	/// No valid module source exists. Raised and owned by the loading
	/// runtime; recorded here for observability only.
	Error,
}

/// Resolution outcome for every registry module, in declaration order.
#[derive( Debug, Clone, PartialEq, Eq )]
pub struct ResolutionReport {
	states: Vec<( String, ModuleResolution )>,
}

impl ResolutionReport {

	/// The state negotiated for `module`, [`ModuleResolution::Unresolved`]
	/// if the module is not listed.
	pub fn state( &self, module: &str ) -> ModuleResolution {
		self.states.iter()
			.find(|( name, _ )| name == module )
			.map_or( ModuleResolution::Unresolved, |( _, state )| *state )
	}

	/// All `(module, state)` pairs, in registry declaration order.
	pub fn iter( &self ) -> impl Iterator<Item = ( &str, ModuleResolution )> {
		self.states.iter().map(|( name, state )| ( name.as_str(), *state ))
	}

	/// Returns `true` if every module resolved to a valid source.
	pub fn is_fully_resolved( &self ) -> bool {
		self.states.iter().all(|( _, state )| matches!(
			state,
			ModuleResolution::HostProvided | ModuleResolution::PluginFallback,
		))
	}

}

/// The host side of one shared module offer.
pub struct HostModule<M> {
	/// Two-phase indirection to the host's instance.
	pub accessor: Arc<dyn ModuleAccessor<M>>,
	/// Whether the host has already loaded the module this session.
	pub loaded: bool,
}

impl<M> HostModule<M> {

	/// A module the host has loaded.
	pub fn loaded( accessor: Arc<dyn ModuleAccessor<M>> ) -> Self {
		Self { accessor, loaded: true }
	}

	/// A module the host declares but has not loaded this session.
	pub fn pending( accessor: Arc<dyn ModuleAccessor<M>> ) -> Self {
		Self { accessor, loaded: false }
	}

}

/// Negotiates shared modules for plugin bundles against one registry.
///
/// Holds no mutable state: one resolver serves every bundle load of a host
/// session, and resolutions for independent bundles never interact.
pub struct ModuleResolver<M> {
	registry: Arc<SharedModuleRegistry>,
	modules: Vec<( String, HostModule<M> )>,
}

impl<M> std::fmt::Debug for ModuleResolver<M> {
	fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
		f.debug_struct( "ModuleResolver" )
			.field( "registry", &self.registry )
			.field( "modules", &self.modules.iter().map(|( name, _ )| name ).collect::<Vec<_>>() )
			.finish()
	}
}

impl<M> ModuleResolver<M> {

	/// Builds a resolver from the registry and the host's module offers.
	///
	/// The offered name set must exactly equal the registry's declared name
	/// set; any mismatch is rejected here, before any bundle can load.
	pub fn new(
		registry: Arc<SharedModuleRegistry>,
		mut offered: HashMap<String, HostModule<M>>,
	) -> Result<Self, ResolveError> {

		let missing: Vec<String> = registry.names()
			.filter(| name | !offered.contains_key( *name ))
			.map( str::to_string )
			.collect();
		let unexpected: Vec<String> = offered.keys()
			.filter(| name | registry.get( name ).is_none() )
			.cloned()
			.sorted()
			.collect();
		if !missing.is_empty() || !unexpected.is_empty() {
			return Err( ResolveError::RegistryMismatch { missing, unexpected });
		}

		// Reorder the offers into registry declaration order.
		let modules = registry.names()
			.map(| name | {
				let module = offered.remove( name )
					.expect( "name-set equality was just checked" );
				( name.to_string(), module )
			})
			.collect();

		Ok( Self { registry, modules })

	}

	/// Resolves one plugin bundle's shared modules.
	///
	/// Consumes the bundle's remote entry point, enforcing at the type level
	/// that exactly one of `override`/`init` is invoked exactly once. Must
	/// run strictly before any module the plugin itself exposes is
	/// evaluated.
	pub async fn resolve( &self, remote: RemoteEntry<M> ) -> Result<ResolutionReport, ResolveError> {
		match remote {
			RemoteEntry::Override( runtime ) => self.resolve_override( runtime ).await,
			RemoteEntry::Init( runtime ) => self.resolve_init( runtime ).await,
		}
	}

	/// The `override` path: the host's full module table replaces the
	/// plugin's view of every listed module. No fallback is consulted.
	async fn resolve_override(
		&self,
		mut runtime: Box<dyn ModuleOverride<M>>,
	) -> Result<ResolutionReport, ResolveError> {

		let table = ModuleTable {
			entries: self.modules.iter()
				.map(|( name, module )| ( name.clone(), Arc::clone( &module.accessor )))
				.collect(),
		};
		runtime.override_modules( table ).await?;

		info!( "all {} shared module(s) overridden with host versions", self.modules.len() );
		Ok( ResolutionReport {
			states: self.registry.names()
				.map(| name | ( name.to_string(), ModuleResolution::HostProvided ))
				.collect(),
		})

	}

	/// The `init` path: the shared scope is handed over and the loading
	/// runtime decides per module, based on the wildcard version match, the
	/// singleton flag and the host entry's loaded state.
	async fn resolve_init(
		&self,
		mut runtime: Box<dyn ScopeInit<M>>,
	) -> Result<ResolutionReport, ResolveError> {

		let states: Vec<( String, ModuleResolution )> = self.modules.iter()
			.map(|( name, module )| {
				let metadata = self.registry.get( name )
					.expect( "resolver construction pinned offers to registry names" );
				let state = negotiate( metadata, module.loaded, runtime.bundles( name ));
				debug!( "module '{name}' negotiated as {state:?}" );
				( name.clone(), state )
			})
			.collect();

		let scope = SharedScope {
			entries: self.modules.iter()
				.map(|( name, module )| ( name.clone(), SharedScopeEntry {
					version_key: ANY_VERSION,
					accessor: Arc::clone( &module.accessor ),
					loaded: module.loaded,
				}))
				.collect(),
		};
		runtime.init( scope ).await?;

		info!( "shared scope initialized for {} module(s)", states.len() );
		Ok( ResolutionReport { states })

	}

}

/// The per-module decision rule of the loading runtime's `init` path.
///
/// The wildcard version key means the range check always passes; what
/// remains is the singleton flag, the host entry's loaded state and whether
/// the bundle ships a declared fallback.
pub fn negotiate(
	metadata: &SharedModuleMetadata,
	host_loaded: bool,
	plugin_bundled: bool,
) -> ModuleResolution {
	match ( host_loaded, metadata.allow_fallback && plugin_bundled ) {
		// A loaded host entry satisfies the wildcard range; singletons must
		// take it, and non-singletons accept it as the winning range match.
		( true, _ ) => ModuleResolution::HostProvided,
		// No host copy, but the module's policy admits the bundled one.
		( false, true ) => ModuleResolution::PluginFallback,
		// No valid copy anywhere. The loading runtime raises and owns the
		// failure; the report records it.
		( false, false ) => ModuleResolution::Error,
	}
}
