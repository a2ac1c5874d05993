/* src/engine/rust/src/lib.rs */

//! Fill HTML forms with submitted values.
//!
//! The engine finds `<form>` blocks and their controls with text patterns
//! rather than a DOM, and rewrites only the tags it fills. Every other byte of
//! the document comes out exactly as it went in.

mod attr;
mod catalog;
mod controls;
mod errors;
mod form;
mod helpers;
mod options;
mod resolve;
mod source;
mod writer;

pub use attr::unquote;
pub use errors::FillError;
pub use helpers::escape_html;
pub use options::{DEFAULT_IGNORE_TYPES, FillOptions, TextareaPolicy};
pub use source::FieldSource;
pub use writer::FillWriter;

use form::{FormStats, fill_document};
use options::ResolvedOptions;
use resolve::Resolver;
use tracing::debug;

/// A reusable form filler. Options are resolved once; every call gets its own
/// value cache, so one `Filler` may serve many documents.
#[derive(Debug, Clone)]
pub struct Filler {
  options: ResolvedOptions,
}

impl Filler {
  pub fn new(options: &FillOptions) -> Self {
    Self { options: options.resolve() }
  }

  /// Fill `document` with `values`.
  pub fn fill<S: FieldSource + ?Sized>(
    &self,
    document: &[u8],
    values: &S,
  ) -> Result<Vec<u8>, FillError> {
    debug!(bytes = document.len(), form_target = ?self.options.target, "fill start");
    let mut resolver = Resolver::new(values, &self.options);
    let mut stats = FormStats::default();
    let filled = fill_document(document, &mut resolver, &mut stats)?;
    debug!(
      bytes = filled.len(),
      forms = stats.found,
      filled_forms = stats.filled,
      fields = resolver.cached(),
      "fill end"
    );
    Ok(filled)
  }

  /// Like [`Filler::fill`] for string documents.
  pub fn fill_str<S: FieldSource + ?Sized>(
    &self,
    document: &str,
    values: &S,
  ) -> Result<String, FillError> {
    let filled = self.fill(document.as_bytes(), values)?;
    Ok(
      String::from_utf8(filled)
        .unwrap_or_else(|err| String::from_utf8_lossy(err.as_bytes()).into_owned()),
    )
  }
}

impl Default for Filler {
  fn default() -> Self {
    Self::new(&FillOptions::default())
  }
}

/// Fill `document` with `values` under `options`.
pub fn fill<S: FieldSource + ?Sized>(
  document: &[u8],
  values: &S,
  options: &FillOptions,
) -> Result<Vec<u8>, FillError> {
  Filler::new(options).fill(document, values)
}

/// Fill a string document. See [`fill`].
pub fn fill_str<S: FieldSource + ?Sized>(
  document: &str,
  values: &S,
  options: &FillOptions,
) -> Result<String, FillError> {
  Filler::new(options).fill_str(document, values)
}

#[cfg(test)]
mod tests;
