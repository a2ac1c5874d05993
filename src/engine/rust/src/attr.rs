/* src/engine/rust/src/attr.rs */

//! Reading and editing attributes inside one matched tag.
//!
//! A tag is tokenized with the catalog's attribute matcher, starting right
//! after the tag name. Names compare ASCII case-insensitively; values are
//! returned exactly as written, minus their quotes.

use std::borrow::Cow;
use std::ops::Range;

use crate::catalog::Matcher;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AttrName {
  Id,
  Type,
  Name,
  Value,
  Checked,
  Selected,
  Multiple,
}

impl AttrName {
  pub(crate) fn as_str(self) -> &'static str {
    match self {
      Self::Id => "id",
      Self::Type => "type",
      Self::Name => "name",
      Self::Value => "value",
      Self::Checked => "checked",
      Self::Selected => "selected",
      Self::Multiple => "multiple",
    }
  }
}

/// One attribute token. `span` includes the whitespace before the name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Attribute {
  pub(crate) span: Range<usize>,
  pub(crate) name: Range<usize>,
  pub(crate) value: Option<Range<usize>>,
}

fn tag_name_end(tag: &[u8]) -> usize {
  let mut end = usize::from(tag.first() == Some(&b'<'));
  while end < tag.len() && !tag[end].is_ascii_whitespace() && tag[end] != b'>' && tag[end] != b'/'
  {
    end += 1;
  }
  end
}

fn tokens(tag: &[u8]) -> impl Iterator<Item = Attribute> + '_ {
  let offset = tag_name_end(tag);
  Matcher::Attribute.regex().captures_iter(&tag[offset..]).filter_map(move |caps| {
    let whole = caps.get(0)?;
    let name = caps.get(1)?;
    Some(Attribute {
      span: whole.start() + offset..whole.end() + offset,
      name: name.start() + offset..name.end() + offset,
      value: caps.get(2).map(|v| v.start() + offset..v.end() + offset),
    })
  })
}

fn is_named(tag: &[u8], attr: &Attribute, name: AttrName) -> bool {
  tag[attr.name.clone()].eq_ignore_ascii_case(name.as_str().as_bytes())
}

/// First attribute with the given name.
pub(crate) fn find(tag: &[u8], name: AttrName) -> Option<Attribute> {
  tokens(tag).find(|attr| is_named(tag, attr, name))
}

/// Unquoted value of `name`. A bare attribute (`multiple`) yields an empty value;
/// `None` means the attribute is absent.
pub(crate) fn get(tag: &[u8], name: AttrName) -> Option<&[u8]> {
  let attr = find(tag, name)?;
  Some(attr.value.map_or(&b""[..], |range| unquote(&tag[range])))
}

pub(crate) fn has(tag: &[u8], name: AttrName) -> bool {
  find(tag, name).is_some()
}

/// Strip leading and trailing quote characters. Both ends are trimmed greedily
/// and independently, so `'hoge"` and `'"hoge"'` both give `hoge`.
pub fn unquote(value: &[u8]) -> &[u8] {
  let is_quote = |b: &u8| *b == b'"' || *b == b'\'';
  let start = value.iter().position(|b| !is_quote(b)).unwrap_or(value.len());
  let end = value.iter().rposition(|b| !is_quote(b)).map_or(start, |p| p + 1);
  &value[start..end.max(start)]
}

/// Drop every occurrence of `name`, leading whitespace included.
pub(crate) fn remove(tag: &[u8], name: AttrName) -> Cow<'_, [u8]> {
  let spans: Vec<Range<usize>> =
    tokens(tag).filter(|attr| is_named(tag, attr, name)).map(|attr| attr.span).collect();
  if spans.is_empty() {
    return Cow::Borrowed(tag);
  }
  let mut out = Vec::with_capacity(tag.len());
  let mut last = 0;
  for span in spans {
    out.extend_from_slice(&tag[last..span.start]);
    last = span.end;
  }
  out.extend_from_slice(&tag[last..]);
  Cow::Owned(out)
}

/// Replace an existing attribute (name through value) with `token`,
/// keeping the whitespace in front of it.
pub(crate) fn replace(tag: &[u8], attr: &Attribute, token: &[u8]) -> Vec<u8> {
  let mut out = Vec::with_capacity(tag.len() + token.len());
  out.extend_from_slice(&tag[..attr.name.start]);
  out.extend_from_slice(token);
  out.extend_from_slice(&tag[attr.span.end..]);
  out
}

/// Insert ` token` before the closing `>` or `/>`. Whitespace between the last
/// attribute and the close is dropped.
pub(crate) fn insert_before_close(tag: &[u8], token: &[u8]) -> Vec<u8> {
  let mut close = tag.len();
  if tag.last() == Some(&b'>') {
    close -= 1;
    if close > 0 && tag[close - 1] == b'/' {
      close -= 1;
    }
  }
  let mut insert_at = close;
  while insert_at > 0 && tag[insert_at - 1].is_ascii_whitespace() {
    insert_at -= 1;
  }
  let mut out = Vec::with_capacity(tag.len() + token.len() + 1);
  out.extend_from_slice(&tag[..insert_at]);
  out.push(b' ');
  out.extend_from_slice(token);
  out.extend_from_slice(&tag[close..]);
  out
}

/// `name="value"` with the value written as given.
pub(crate) fn token(name: AttrName, value: &[u8]) -> Vec<u8> {
  let name = name.as_str().as_bytes();
  let mut out = Vec::with_capacity(name.len() + value.len() + 3);
  out.extend_from_slice(name);
  out.extend_from_slice(b"=\"");
  out.extend_from_slice(value);
  out.push(b'"');
  out
}
