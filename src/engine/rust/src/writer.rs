/* src/engine/rust/src/writer.rs */

use std::io::{self, Write};

use crate::options::FillOptions;
use crate::source::FieldSource;
use crate::Filler;

/// Writer adapter that fills each buffer it receives before passing it on.
///
/// Every `write` call is treated as one complete document: matching does not
/// carry across calls, so render the page into one buffer and write it once.
pub struct FillWriter<'a, W, S: ?Sized> {
  inner: W,
  filler: Filler,
  values: &'a S,
}

impl<'a, W: Write, S: FieldSource + ?Sized> FillWriter<'a, W, S> {
  pub fn new(inner: W, values: &'a S, options: &FillOptions) -> Self {
    Self { inner, filler: Filler::new(options), values }
  }

  pub fn get_ref(&self) -> &W {
    &self.inner
  }

  pub fn into_inner(self) -> W {
    self.inner
  }
}

impl<W: Write, S: FieldSource + ?Sized> Write for FillWriter<'_, W, S> {
  fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
    let filled = self
      .filler
      .fill(buf, self.values)
      .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
    self.inner.write_all(&filled)?;
    Ok(buf.len())
  }

  fn flush(&mut self) -> io::Result<()> {
    self.inner.flush()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn write_fills_and_forwards() {
    let data = json!({"q": "x"});
    let mut writer = FillWriter::new(Vec::<u8>::new(), &data, &FillOptions::default());
    writer.write_all(b"<form id=f><input name=q></form>").unwrap();
    writer.flush().unwrap();
    assert_eq!(writer.into_inner(), br#"<form id=f><input name=q value="x"></form>"#);
  }

  #[test]
  fn write_reports_consumed_input_length() {
    let data = json!({"q": "longer value"});
    let mut writer = FillWriter::new(Vec::<u8>::new(), &data, &FillOptions::default());
    let input = b"<form id=f><input name=q></form>";
    assert_eq!(writer.write(input).unwrap(), input.len());
    assert!(writer.get_ref().len() > input.len());
  }

  #[test]
  fn fill_error_becomes_invalid_data() {
    let data = json!({"q": {"bad": 1}});
    let mut writer = FillWriter::new(Vec::<u8>::new(), &data, &FillOptions::default());
    let err = writer.write_all(b"<form id=f><input name=q></form>").unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    assert!(writer.get_ref().is_empty());
  }
}
