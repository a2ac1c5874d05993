/* src/engine/rust/src/helpers.rs */

use std::borrow::Cow;
use std::ops::Range;

use crate::errors::FillError;

/// Escape the four characters that can break out of a double-quoted attribute.
/// Ampersand is handled as its own character, so produced entities are never
/// escaped twice.
pub fn escape_html(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  for ch in s.chars() {
    match ch {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      c => out.push(c),
    }
  }
  out
}

const ENTITIES: &[(&[u8], u8)] = &[
  (b"&amp;", b'&'),
  (b"&lt;", b'<'),
  (b"&gt;", b'>'),
  (b"&quot;", b'"'),
  (b"&#39;", b'\''),
  (b"&#x27;", b'\''),
];

/// Decode the handful of entities `escape_html` (and common templates) produce.
pub(crate) fn decode_entities(s: &[u8]) -> Cow<'_, [u8]> {
  if !s.contains(&b'&') {
    return Cow::Borrowed(s);
  }
  let mut out = Vec::with_capacity(s.len());
  let mut i = 0;
  'outer: while i < s.len() {
    if s[i] == b'&' {
      for (entity, ch) in ENTITIES {
        if s[i..].starts_with(entity) {
          out.push(*ch);
          i += entity.len();
          continue 'outer;
        }
      }
    }
    out.push(s[i]);
    i += 1;
  }
  Cow::Owned(out)
}

/// Rebuild `text`, handing each matched span to `rewrite`.
/// `Ok(None)` keeps the span's original bytes.
pub(crate) fn splice<T, F>(
  text: &[u8],
  items: impl IntoIterator<Item = (Range<usize>, T)>,
  mut rewrite: F,
) -> Result<Vec<u8>, FillError>
where
  F: FnMut(&[u8], T) -> Result<Option<Vec<u8>>, FillError>,
{
  let mut out = Vec::with_capacity(text.len());
  let mut last = 0;
  for (span, item) in items {
    out.extend_from_slice(&text[last..span.start]);
    let original = &text[span.clone()];
    match rewrite(original, item)? {
      Some(replaced) => out.extend_from_slice(&replaced),
      None => out.extend_from_slice(original),
    }
    last = span.end;
  }
  out.extend_from_slice(&text[last..]);
  Ok(out)
}
