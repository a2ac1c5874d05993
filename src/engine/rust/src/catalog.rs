/* src/engine/rust/src/catalog.rs */

//! Compiled structural matchers for forms, controls and attribute tokens.
//!
//! All patterns run on raw bytes with ASCII case folding, so `<FORM>` and
//! `<form>` match alike and invalid UTF-8 in unrelated markup is carried through.

use std::ops::Range;
use std::sync::OnceLock;

use regex::bytes::{Captures, Regex};

const ATTR_NAME: &str = r#"[^\s"'<>/=]+"#;
const ATTR_VALUE: &str = r#"(?:"[^"]*"|'[^']*'|[^'"\s/>]+)"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Matcher {
  /// `<form ...>` .. `</form>`, start tag and body captured.
  Form,
  /// A single `<input ...>` or `<input .../>`.
  Input,
  /// `<select ...>` .. `</select>`, start tag and body captured.
  Select,
  /// `<textarea ...>` .. `</textarea>`, start tag and body captured.
  Textarea,
  /// `<option ...>` plus the text that follows it up to the next tag.
  Option,
  /// One attribute token inside a tag: leading space, name, optional value.
  Attribute,
}

struct Catalog {
  form: Regex,
  input: Regex,
  select: Regex,
  textarea: Regex,
  option: Regex,
  attribute: Regex,
}

fn attr() -> String {
  format!(r"(?:\s+{ATTR_NAME}(?:={ATTR_VALUE})?)")
}

fn block(tag: &str) -> String {
  format!(r"(?is-u)(<{tag}{attr}+\s*>)(.*?)</{tag}\s*>", attr = attr())
}

fn compile(pattern: &str) -> Regex {
  Regex::new(pattern).expect("catalog pattern must compile")
}

impl Catalog {
  fn build() -> Self {
    let attr = attr();
    Self {
      form: compile(&block("form")),
      input: compile(&format!(r"(?i-u)<input{attr}+\s*/?>")),
      select: compile(&block("select")),
      textarea: compile(&block("textarea")),
      option: compile(&format!(r"(?i-u)(<option{attr}*\s*/?>)([^<]*)")),
      attribute: compile(&format!(r"(?-u)\s+({ATTR_NAME})(?:=({ATTR_VALUE}))?")),
    }
  }
}

fn catalog() -> &'static Catalog {
  static CATALOG: OnceLock<Catalog> = OnceLock::new();
  CATALOG.get_or_init(Catalog::build)
}

impl Matcher {
  pub(crate) fn regex(self) -> &'static Regex {
    let catalog = catalog();
    match self {
      Self::Form => &catalog.form,
      Self::Input => &catalog.input,
      Self::Select => &catalog.select,
      Self::Textarea => &catalog.textarea,
      Self::Option => &catalog.option,
      Self::Attribute => &catalog.attribute,
    }
  }
}

/// An element with a start tag, a body and an end tag.
///
/// `span` is absolute within the searched text; `start_tag` and `body` are
/// relative to `span.start` so they index straight into the element's own bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Element {
  pub(crate) span: Range<usize>,
  pub(crate) start_tag: Range<usize>,
  pub(crate) body: Range<usize>,
}

impl Element {
  fn from_captures(caps: &Captures<'_>) -> Option<Self> {
    let whole = caps.get(0)?;
    let start_tag = caps.get(1)?;
    let body = caps.get(2)?;
    let base = whole.start();
    Some(Self {
      span: whole.range(),
      start_tag: start_tag.start() - base..start_tag.end() - base,
      body: body.start() - base..body.end() - base,
    })
  }

  /// Relative range of the end tag.
  pub(crate) fn end_tag(&self) -> Range<usize> {
    self.body.end..self.span.len()
  }
}

/// An `<option>` start tag and the text after it, both relative to `span.start`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OptionTag {
  pub(crate) span: Range<usize>,
  pub(crate) tag: Range<usize>,
  pub(crate) text: Range<usize>,
}

impl OptionTag {
  fn from_captures(caps: &Captures<'_>) -> Option<Self> {
    let whole = caps.get(0)?;
    let tag = caps.get(1)?;
    let text = caps.get(2)?;
    let base = whole.start();
    Some(Self {
      span: whole.range(),
      tag: tag.start() - base..tag.end() - base,
      text: text.start() - base..text.end() - base,
    })
  }
}

/// Locate the first form block at or after `from`.
pub(crate) fn next_form(text: &[u8], from: usize) -> Option<Element> {
  let caps = Matcher::Form.regex().captures_at(text, from)?;
  Element::from_captures(&caps)
}

/// All non-overlapping form blocks, left to right.
pub(crate) fn forms(text: &[u8]) -> impl Iterator<Item = Element> + '_ {
  let mut pos = 0;
  std::iter::from_fn(move || {
    let form = next_form(text, pos)?;
    pos = form.span.end;
    Some(form)
  })
}

pub(crate) fn inputs(text: &[u8]) -> impl Iterator<Item = Range<usize>> + '_ {
  Matcher::Input.regex().find_iter(text).map(|m| m.range())
}

pub(crate) fn selects(text: &[u8]) -> impl Iterator<Item = Element> + '_ {
  Matcher::Select.regex().captures_iter(text).filter_map(|caps| Element::from_captures(&caps))
}

pub(crate) fn textareas(text: &[u8]) -> impl Iterator<Item = Element> + '_ {
  Matcher::Textarea.regex().captures_iter(text).filter_map(|caps| Element::from_captures(&caps))
}

pub(crate) fn options(body: &[u8]) -> impl Iterator<Item = OptionTag> + '_ {
  Matcher::Option.regex().captures_iter(body).filter_map(|caps| OptionTag::from_captures(&caps))
}
