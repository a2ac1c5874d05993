/* src/engine/rust/src/options.rs */

use std::collections::HashSet;

use serde::Deserialize;
use serde_json::Value;

use crate::errors::FillError;

/// Input types skipped unless the caller says otherwise.
pub const DEFAULT_IGNORE_TYPES: &[&str] = &["password", "submit", "image"];

/// What a textarea receives when its field is absent from the data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextareaPolicy {
  /// Leave the original content in place.
  #[default]
  Keep,
  /// Replace the content with an empty string.
  Clear,
}

/// Switches for one fill operation.
///
/// Deserializes from a camelCase JSON object, e.g.
/// `{"ignoreFields": ["csrf"], "fillPassword": true, "target": "login"}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FillOptions {
  /// Field names that are never filled.
  pub ignore_fields: Vec<String>,
  /// Input types that are never filled. `None` uses [`DEFAULT_IGNORE_TYPES`].
  pub ignore_types: Option<Vec<String>>,
  /// Fill `type="password"` inputs even though they are ignored by default.
  pub fill_password: bool,
  /// Only fill the form whose `id` equals this. Empty means every form.
  pub target: String,
  /// HTML-escape values written into the document.
  pub escape: bool,
  /// Decode entities in a control's own value before comparing it.
  pub decode_entity: bool,
  pub textarea_policy: TextareaPolicy,
}

impl Default for FillOptions {
  fn default() -> Self {
    Self {
      ignore_fields: Vec::new(),
      ignore_types: None,
      fill_password: false,
      target: String::new(),
      escape: true,
      decode_entity: false,
      textarea_policy: TextareaPolicy::Keep,
    }
  }
}

impl FillOptions {
  /// Build options from a JSON object. `null` gives the defaults.
  pub fn from_json(value: &Value) -> Result<Self, FillError> {
    if value.is_null() {
      return Ok(Self::default());
    }
    Ok(Self::deserialize(value)?)
  }

  pub fn with_ignore_fields<I, T>(mut self, fields: I) -> Self
  where
    I: IntoIterator<Item = T>,
    T: Into<String>,
  {
    self.ignore_fields = fields.into_iter().map(Into::into).collect();
    self
  }

  pub fn with_ignore_types<I, T>(mut self, types: I) -> Self
  where
    I: IntoIterator<Item = T>,
    T: Into<String>,
  {
    self.ignore_types = Some(types.into_iter().map(Into::into).collect());
    self
  }

  pub fn with_fill_password(mut self, fill_password: bool) -> Self {
    self.fill_password = fill_password;
    self
  }

  pub fn with_target(mut self, target: impl Into<String>) -> Self {
    self.target = target.into();
    self
  }

  pub fn with_escape(mut self, escape: bool) -> Self {
    self.escape = escape;
    self
  }

  pub fn with_decode_entity(mut self, decode_entity: bool) -> Self {
    self.decode_entity = decode_entity;
    self
  }

  pub fn with_textarea_policy(mut self, policy: TextareaPolicy) -> Self {
    self.textarea_policy = policy;
    self
  }

  pub(crate) fn resolve(&self) -> ResolvedOptions {
    let mut ignore_types: HashSet<String> = match &self.ignore_types {
      Some(types) => types.iter().map(|t| t.to_ascii_lowercase()).collect(),
      None => DEFAULT_IGNORE_TYPES.iter().map(|t| (*t).to_string()).collect(),
    };
    if self.fill_password {
      ignore_types.remove("password");
    }
    ResolvedOptions {
      ignore_fields: self.ignore_fields.iter().cloned().collect(),
      ignore_types,
      target: (!self.target.is_empty()).then(|| self.target.clone()),
      escape: self.escape,
      decode_entity: self.decode_entity,
      textarea_policy: self.textarea_policy,
    }
  }
}

/// Options as the engine consumes them, computed once per `Filler`.
#[derive(Debug, Clone)]
pub(crate) struct ResolvedOptions {
  pub(crate) ignore_fields: HashSet<String>,
  /// Lowercased.
  pub(crate) ignore_types: HashSet<String>,
  pub(crate) target: Option<String>,
  pub(crate) escape: bool,
  pub(crate) decode_entity: bool,
  pub(crate) textarea_policy: TextareaPolicy,
}

impl ResolvedOptions {
  pub(crate) fn ignores_type(&self, input_type: &str) -> bool {
    self.ignore_types.contains(input_type)
  }

  pub(crate) fn ignores_field(&self, name: &str) -> bool {
    self.ignore_fields.contains(name)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn defaults_ignore_password_submit_image() {
    let resolved = FillOptions::default().resolve();
    assert!(resolved.ignores_type("password"));
    assert!(resolved.ignores_type("submit"));
    assert!(resolved.ignores_type("image"));
    assert!(!resolved.ignores_type("text"));
    assert!(resolved.target.is_none());
    assert!(resolved.escape);
  }

  #[test]
  fn fill_password_removes_password_only() {
    let resolved = FillOptions::default().with_fill_password(true).resolve();
    assert!(!resolved.ignores_type("password"));
    assert!(resolved.ignores_type("submit"));
  }

  #[test]
  fn explicit_ignore_types_replace_defaults() {
    let resolved = FillOptions::default().with_ignore_types(["Hidden"]).resolve();
    assert!(resolved.ignores_type("hidden"));
    assert!(!resolved.ignores_type("password"));
  }

  #[test]
  fn fill_password_applies_to_explicit_types() {
    let resolved = FillOptions::default()
      .with_ignore_types(["password", "hidden"])
      .with_fill_password(true)
      .resolve();
    assert!(!resolved.ignores_type("password"));
    assert!(resolved.ignores_type("hidden"));
  }

  #[test]
  fn ignore_fields_are_exact() {
    let resolved = FillOptions::default().with_ignore_fields(["csrf"]).resolve();
    assert!(resolved.ignores_field("csrf"));
    assert!(!resolved.ignores_field("CSRF"));
  }

  #[test]
  fn empty_target_means_all_forms() {
    assert!(FillOptions::default().with_target("").resolve().target.is_none());
    assert_eq!(FillOptions::default().with_target("f").resolve().target.as_deref(), Some("f"));
  }

  #[test]
  fn from_json_camel_case() {
    let options = FillOptions::from_json(&json!({
      "ignoreFields": ["a"],
      "ignoreTypes": ["submit"],
      "fillPassword": true,
      "target": "login",
      "escape": false,
      "decodeEntity": true,
      "textareaPolicy": "clear"
    }))
    .unwrap();
    assert_eq!(options.ignore_fields, vec!["a".to_string()]);
    assert_eq!(options.ignore_types, Some(vec!["submit".to_string()]));
    assert!(options.fill_password);
    assert_eq!(options.target, "login");
    assert!(!options.escape);
    assert!(options.decode_entity);
    assert_eq!(options.textarea_policy, TextareaPolicy::Clear);
  }

  #[test]
  fn from_json_partial_keeps_defaults() {
    let options = FillOptions::from_json(&json!({"target": "x"})).unwrap();
    assert_eq!(options, FillOptions::default().with_target("x"));
  }

  #[test]
  fn from_json_null_is_default() {
    assert_eq!(FillOptions::from_json(&Value::Null).unwrap(), FillOptions::default());
  }

  #[test]
  fn from_json_rejects_wrong_shape() {
    let err = FillOptions::from_json(&json!({"fillPassword": "yes"})).unwrap_err();
    assert!(matches!(err, FillError::InvalidOptions(_)));
  }
}
