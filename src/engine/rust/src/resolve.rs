/* src/engine/rust/src/resolve.rs */

use std::collections::HashMap;

use crate::errors::FillError;
use crate::helpers::escape_html;
use crate::options::ResolvedOptions;
use crate::source::FieldSource;

/// A field's values, kept both raw (for comparing against control values)
/// and encoded (for writing into the document).
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Field {
  raw: Vec<Vec<u8>>,
  encoded: Vec<Vec<u8>>,
}

impl Field {
  fn new(values: Vec<String>, escape: bool) -> Self {
    let encoded = values
      .iter()
      .map(|v| if escape { escape_html(v).into_bytes() } else { v.clone().into_bytes() })
      .collect();
    let raw = values.into_iter().map(String::into_bytes).collect();
    Self { raw, encoded }
  }

  pub(crate) fn values(&self) -> &[Vec<u8>] {
    &self.raw
  }

  pub(crate) fn first_encoded(&self) -> Option<&[u8]> {
    self.encoded.first().map(Vec::as_slice)
  }

  pub(crate) fn contains(&self, candidate: &[u8]) -> bool {
    self.raw.iter().any(|v| v == candidate)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Lookup<'r> {
  /// The name is on the ignore list; leave the control alone.
  Ignored,
  /// No data for this name.
  Missing,
  Found(&'r Field),
}

/// Per-operation lookup of field values, memoized by name.
pub(crate) struct Resolver<'a, S: ?Sized> {
  source: &'a S,
  options: &'a ResolvedOptions,
  cache: HashMap<String, Option<Field>>,
}

impl<'a, S: FieldSource + ?Sized> Resolver<'a, S> {
  pub(crate) fn new(source: &'a S, options: &'a ResolvedOptions) -> Self {
    Self { source, options, cache: HashMap::new() }
  }

  pub(crate) fn options(&self) -> &'a ResolvedOptions {
    self.options
  }

  pub(crate) fn resolve(&mut self, name: &str) -> Result<Lookup<'_>, FillError> {
    if self.options.ignores_field(name) {
      return Ok(Lookup::Ignored);
    }
    if !self.cache.contains_key(name) {
      let escape = self.options.escape;
      let field = self.source.field_values(name)?.map(|values| Field::new(values, escape));
      self.cache.insert(name.to_string(), field);
    }
    Ok(match self.cache.get(name) {
      Some(Some(field)) => Lookup::Found(field),
      _ => Lookup::Missing,
    })
  }

  /// Number of distinct names looked up so far.
  pub(crate) fn cached(&self) -> usize {
    self.cache.len()
  }
}
