//! Types shared between the jslint-task runner and linter implementations.
//!
//! The runner never tokenizes or parses the lint target itself. It hands the
//! source text of every file to a [`Linter`] and works only with the
//! [`Violation`]s that come back.
//!
//! # Modules
//!
//! - [`linter`]: The [`Linter`] trait, [`Violation`], [`SourceKind`] and [`LinterError`]
//! - [`options`]: [`LintOptions`] passed to every lint call, and [`LinterVariant`]
//!
//! # Quick reference
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Linter`] | Trait implemented by anything that can lint a source text |
//! | [`Violation`] | A single finding with a 1-based position, message and evidence |
//! | [`LintOptions`] | Linter variant plus free-form option flags |
//! | [`SourceKind`] | JavaScript, CSS or HTML, derived from a file extension |

pub mod linter;
pub mod options;

pub use linter::{Linter, LinterError, SourceKind, Violation};
pub use options::{LintOptions, LinterVariant};
