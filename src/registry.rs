//! Shared module registry.
//!
//! A static, declarative table of shared library names and their sharing
//! policy. The host constructs its registry once at process startup and
//! passes it by shared reference into the runtime module resolver; it is
//! never mutated afterwards. The registry's declared name set is the single
//! source of truth for what is offered to every plugin bundle.

use thiserror::Error ;



/// Sharing policy for one shared module, declared once per module name.
#[derive( Debug, Clone, Copy, PartialEq, Eq )]
pub struct SharedModuleMetadata {
	/// Exactly one loaded instance must be observed across host and all
	/// plugins. Defaults to `true`.
	pub singleton: bool,
	/// The plugin's own bundled copy may be used when no compatible
	/// host-provided copy exists. Defaults to `false`.
	pub allow_fallback: bool,
}

impl Default for SharedModuleMetadata {
	fn default() -> Self {
		Self::new()
	}
}

impl SharedModuleMetadata {

	/// The default policy: singleton, no fallback.
	pub const fn new() -> Self {
		Self { singleton: true, allow_fallback: false }
	}

	/// Overrides the singleton flag.
	pub const fn with_singleton( mut self, singleton: bool ) -> Self {
		self.singleton = singleton;
		self
	}

	/// Overrides the fallback flag.
	pub const fn with_allow_fallback( mut self, allow_fallback: bool ) -> Self {
		self.allow_fallback = allow_fallback;
		self
	}

}

/// Errors raised while declaring the registry.
#[derive( Error, Debug, PartialEq, Eq )]
pub enum RegistryError {
	/// A module name was declared twice. Metadata is declared once per
	/// module name; a duplicate is a defect in registry maintenance.
	#[error( "Duplicate Shared Module Declaration: {0}" )] DuplicateModule( String ),
}

/// The ordered table of shared modules a host offers to plugin bundles.
#[derive( Debug, Clone, PartialEq, Eq )]
pub struct SharedModuleRegistry {
	entries: Vec<( String, SharedModuleMetadata )>,
}

impl SharedModuleRegistry {

	/// Declares the registry from ordered `(name, metadata)` pairs.
	pub fn new(
		entries: impl IntoIterator<Item = ( impl Into<String>, SharedModuleMetadata )>,
	) -> Result<Self, RegistryError> {
		let mut collected: Vec<( String, SharedModuleMetadata )> = Vec::new();
		for ( name, metadata ) in entries {
			let name = name.into();
			if collected.iter().any(|( existing, _ )| *existing == name ) {
				return Err( RegistryError::DuplicateModule( name ));
			}
			collected.push(( name, metadata ));
		}
		Ok( Self { entries: collected })
	}

	/// The declared module names, in declaration order.
	pub fn names( &self ) -> impl Iterator<Item = &str> {
		self.entries.iter().map(|( name, _ )| name.as_str() )
	}

	/// The declared metadata for `name`, if present.
	pub fn get( &self, name: &str ) -> Option<&SharedModuleMetadata> {
		self.entries.iter()
			.find(|( existing, _ )| existing == name )
			.map(|( _, metadata )| metadata )
	}

	/// All `(name, metadata)` pairs, in declaration order.
	pub fn iter( &self ) -> impl Iterator<Item = ( &str, &SharedModuleMetadata )> {
		self.entries.iter().map(|( name, metadata )| ( name.as_str(), metadata ))
	}

	pub fn len( &self ) -> usize {
		self.entries.len()
	}

	pub fn is_empty( &self ) -> bool {
		self.entries.is_empty()
	}

}
