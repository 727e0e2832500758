//! Accumulating diagnostics with grouped, colorized rendering.
//!
//! Build-time passes collect every structural finding instead of halting at
//! the first, maximizing the diagnostics per run. The validation CLI renders
//! the collected groups with counts and derives its exit code from the error
//! group alone - warnings never fail a run.

use colored::Colorize ;



/// Severity of one collected finding.
#[derive( Debug, Clone, Copy, PartialEq, Eq )]
pub enum Severity {
	Error,
	Warning,
}

/// A collector of errors and warnings for one pass.
#[derive( Debug, Default )]
pub struct Diagnostics {
	errors: Vec<String>,
	warnings: Vec<String>,
}

impl Diagnostics {

	pub fn new() -> Self {
		Self::default()
	}

	/// Records an error.
	pub fn error( &mut self, message: impl ToString ) {
		self.errors.push( message.to_string() );
	}

	/// Records a warning.
	pub fn warning( &mut self, message: impl ToString ) {
		self.warnings.push( message.to_string() );
	}

	/// Returns `true` if any errors (not merely warnings) were collected.
	pub fn has_errors( &self ) -> bool {
		!self.errors.is_empty()
	}

	/// Collected errors, in report order.
	pub fn errors( &self ) -> &[String] {
		&self.errors
	}

	/// Collected warnings, in report order.
	pub fn warnings( &self ) -> &[String] {
		&self.warnings
	}

	/// Renders both groups with counts, errors first.
	///
	/// Empty groups are omitted entirely; a clean run renders as an empty
	/// string.
	pub fn render( &self ) -> String {
		let mut output = String::new();
		output.push_str( &render_group( Severity::Error, &self.errors ));
		if !self.errors.is_empty() && !self.warnings.is_empty() {
			output.push( '\n' );
		}
		output.push_str( &render_group( Severity::Warning, &self.warnings ));
		output
	}

}

fn render_group( severity: Severity, messages: &[String] ) -> String {
	if messages.is_empty() {
		return String::new();
	}
	let heading = match severity {
		Severity::Error => format!( "{} ({})", "Errors".red().bold(), messages.len() ),
		Severity::Warning => format!( "{} ({})", "Warnings".yellow().bold(), messages.len() ),
	};
	let marker = match severity {
		Severity::Error => "error:".red().to_string(),
		Severity::Warning => "warning:".yellow().to_string(),
	};
	let mut output = heading;
	output.push( '\n' );
	for message in messages {
		output.push_str( &format!( "  {marker} {message}\n" ));
	}
	output
}
