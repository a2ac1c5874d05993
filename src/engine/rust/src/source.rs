/* src/engine/rust/src/source.rs */

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use serde_json::Value;

use crate::errors::FillError;

/// Where submitted field values come from.
///
/// `Ok(None)` means the field is absent. `Ok(Some(vec![]))` means the field
/// is present with no values, which still clears checkboxes and selections.
pub trait FieldSource {
  fn field_values(&self, name: &str) -> Result<Option<Vec<String>>, FillError>;
}

fn scalar(name: &str, value: &Value) -> Result<String, FillError> {
  match value {
    Value::String(s) => Ok(s.clone()),
    Value::Number(n) => Ok(n.to_string()),
    Value::Bool(b) => Ok(b.to_string()),
    Value::Null => Err(FillError::unsupported(name, "null")),
    Value::Array(_) => Err(FillError::unsupported(name, "nested array")),
    Value::Object(_) => Err(FillError::unsupported(name, "object")),
  }
}

/// JSON objects map names to a scalar or an array of scalars.
/// Anything that is not an object has no fields.
impl FieldSource for Value {
  fn field_values(&self, name: &str) -> Result<Option<Vec<String>>, FillError> {
    let Some(value) = self.get(name) else {
      return Ok(None);
    };
    match value {
      Value::Array(items) => {
        items.iter().map(|item| scalar(name, item)).collect::<Result<Vec<_>, _>>().map(Some)
      }
      other => scalar(name, other).map(|s| Some(vec![s])),
    }
  }
}

impl<H: BuildHasher> FieldSource for HashMap<String, Vec<String>, H> {
  fn field_values(&self, name: &str) -> Result<Option<Vec<String>>, FillError> {
    Ok(self.get(name).cloned())
  }
}

impl<H: BuildHasher> FieldSource for HashMap<String, String, H> {
  fn field_values(&self, name: &str) -> Result<Option<Vec<String>>, FillError> {
    Ok(self.get(name).map(|v| vec![v.clone()]))
  }
}

impl FieldSource for BTreeMap<String, Vec<String>> {
  fn field_values(&self, name: &str) -> Result<Option<Vec<String>>, FillError> {
    Ok(self.get(name).cloned())
  }
}

impl FieldSource for BTreeMap<String, String> {
  fn field_values(&self, name: &str) -> Result<Option<Vec<String>>, FillError> {
    Ok(self.get(name).map(|v| vec![v.clone()]))
  }
}

impl<T: FieldSource + ?Sized> FieldSource for &T {
  fn field_values(&self, name: &str) -> Result<Option<Vec<String>>, FillError> {
    (**self).field_values(name)
  }
}
