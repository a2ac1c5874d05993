/* src/engine/rust/src/errors.rs */

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FillError {
  /// A field carried a value that has no string form (object, null, nested array).
  #[error("unsupported value type for field `{field}`: {kind}")]
  UnsupportedValueType { field: String, kind: &'static str },

  #[error("invalid fill options: {0}")]
  InvalidOptions(#[from] serde_json::Error),
}

impl FillError {
  pub(crate) fn unsupported(field: &str, kind: &'static str) -> Self {
    Self::UnsupportedValueType { field: field.to_string(), kind }
  }
}
