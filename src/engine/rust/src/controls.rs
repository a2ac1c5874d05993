/* src/engine/rust/src/controls.rs */

use std::borrow::Cow;
use std::ops::Range;

use tracing::trace;

use crate::attr::{self, AttrName};
use crate::catalog::{self, Element, OptionTag};
use crate::errors::FillError;
use crate::helpers::{decode_entities, splice};
use crate::options::TextareaPolicy;
use crate::resolve::{Field, Lookup, Resolver};
use crate::source::FieldSource;

const CHECKED: &[u8] = br#"checked="checked""#;
const SELECTED: &[u8] = br#"selected="selected""#;

/// `type` attribute, lowercased; `text` when absent.
fn input_type(tag: &[u8]) -> String {
  match attr::get(tag, AttrName::Type) {
    Some(value) => String::from_utf8_lossy(value).to_ascii_lowercase(),
    None => "text".to_string(),
  }
}

fn field_name(tag: &[u8]) -> Option<Cow<'_, str>> {
  attr::get(tag, AttrName::Name).map(String::from_utf8_lossy)
}

fn own_value(value: &[u8], decode: bool) -> Cow<'_, [u8]> {
  if decode { decode_entities(value) } else { Cow::Borrowed(value) }
}

/// Textarea element spans. Their bodies are raw text, so markup inside them
/// is never a control.
fn raw_text_spans(form: &[u8]) -> Vec<Range<usize>> {
  catalog::textareas(form).map(|el| el.span).collect()
}

fn outside(raw: &[Range<usize>], span: &Range<usize>) -> bool {
  !raw.iter().any(|r| r.start < span.end && span.start < r.end)
}

// -- input --

pub(crate) fn fill_inputs<S: FieldSource + ?Sized>(
  form: &[u8],
  resolver: &mut Resolver<'_, S>,
) -> Result<Vec<u8>, FillError> {
  let raw = raw_text_spans(form);
  let tags = catalog::inputs(form).filter(|span| outside(&raw, span)).map(|span| (span, ()));
  splice(form, tags, |tag, ()| fill_input(tag, resolver))
}

fn fill_input<S: FieldSource + ?Sized>(
  tag: &[u8],
  resolver: &mut Resolver<'_, S>,
) -> Result<Option<Vec<u8>>, FillError> {
  let options = resolver.options();
  let kind = input_type(tag);
  if options.ignores_type(&kind) {
    trace!(input_type = %kind, "skip ignored input type");
    return Ok(None);
  }
  let Some(name) = field_name(tag) else {
    trace!("skip unnamed input");
    return Ok(None);
  };
  let field = match resolver.resolve(&name)? {
    Lookup::Ignored => {
      trace!(field = %name, "skip ignored field");
      return Ok(None);
    }
    Lookup::Missing => None,
    Lookup::Found(field) => Some(field),
  };
  match kind.as_str() {
    "checkbox" | "radio" => Ok(Some(fill_checkable(tag, field, options.decode_entity))),
    _ => Ok(field.and_then(|field| fill_text(tag, field))),
  }
}

/// Text-like input: set `value` to the first supplied value.
pub(crate) fn fill_text(tag: &[u8], field: &Field) -> Option<Vec<u8>> {
  let value = attr::token(AttrName::Value, field.first_encoded()?);
  Some(match attr::find(tag, AttrName::Value) {
    Some(existing) => attr::replace(tag, &existing, &value),
    None => attr::insert_before_close(tag, &value),
  })
}

/// Checkbox or radio: clear `checked`, then set it again when the control's
/// own value was submitted. A missing field leaves the control unchecked.
pub(crate) fn fill_checkable(tag: &[u8], field: Option<&Field>, decode: bool) -> Vec<u8> {
  let cleared = attr::remove(tag, AttrName::Checked);
  let own = own_value(attr::get(tag, AttrName::Value).unwrap_or(b"on"), decode);
  if field.is_some_and(|field| field.contains(&own)) {
    attr::insert_before_close(&cleared, CHECKED)
  } else {
    cleared.into_owned()
  }
}

// -- select --

pub(crate) fn fill_selects<S: FieldSource + ?Sized>(
  form: &[u8],
  resolver: &mut Resolver<'_, S>,
) -> Result<Vec<u8>, FillError> {
  let raw = raw_text_spans(form);
  let blocks =
    catalog::selects(form).filter(|el| outside(&raw, &el.span)).map(|el| (el.span.clone(), el));
  splice(form, blocks, |block, el| fill_select(block, &el, resolver))
}

fn fill_select<S: FieldSource + ?Sized>(
  block: &[u8],
  el: &Element,
  resolver: &mut Resolver<'_, S>,
) -> Result<Option<Vec<u8>>, FillError> {
  let start = &block[el.start_tag.clone()];
  let Some(name) = field_name(start) else {
    trace!("skip unnamed select");
    return Ok(None);
  };
  let decode = resolver.options().decode_entity;
  let field = match resolver.resolve(&name)? {
    Lookup::Found(field) => field,
    Lookup::Ignored | Lookup::Missing => return Ok(None),
  };
  let values = field.values();
  let multiple = attr::has(start, AttrName::Multiple);
  let wanted = if multiple { values } else { &values[..values.len().min(1)] };

  // a single select keeps only its first matching option
  let mut selected_once = false;
  let body = &block[el.body.clone()];
  let options = catalog::options(body).map(|opt| (opt.span.clone(), opt));
  let filled = splice(body, options, |text, opt| {
    let own = option_value(text, &opt, decode);
    let select = !selected_once && wanted.iter().any(|w| **w == *own);
    selected_once |= select && !multiple;
    Ok(fill_option(text, &opt, select))
  })?;
  if filled == body {
    return Ok(None);
  }

  let mut out = Vec::with_capacity(block.len() + SELECTED.len());
  out.extend_from_slice(start);
  out.extend_from_slice(&filled);
  out.extend_from_slice(&block[el.end_tag()]);
  Ok(Some(out))
}

/// The `value` attribute, or the trimmed option text when there is none.
fn option_value<'t>(text: &'t [u8], opt: &OptionTag, decode: bool) -> Cow<'t, [u8]> {
  let tag = &text[opt.tag.clone()];
  match attr::get(tag, AttrName::Value) {
    Some(value) => own_value(value, decode),
    None => own_value(text[opt.text.clone()].trim_ascii(), decode),
  }
}

/// Rewrite one option's start tag; `None` when its attributes do not change.
pub(crate) fn fill_option(text: &[u8], opt: &OptionTag, select: bool) -> Option<Vec<u8>> {
  let tag = &text[opt.tag.clone()];
  let cleared = attr::remove(tag, AttrName::Selected);
  let rewritten = if select {
    attr::insert_before_close(&cleared, SELECTED)
  } else {
    cleared.into_owned()
  };
  if rewritten == tag {
    return None;
  }
  let mut out = rewritten;
  out.extend_from_slice(&text[opt.tag.end..]);
  Some(out)
}

// -- textarea --

pub(crate) fn fill_textareas<S: FieldSource + ?Sized>(
  form: &[u8],
  resolver: &mut Resolver<'_, S>,
) -> Result<Vec<u8>, FillError> {
  splice(form, catalog::textareas(form).map(|el| (el.span.clone(), el)), |block, el| {
    fill_textarea(block, &el, resolver)
  })
}

fn fill_textarea<S: FieldSource + ?Sized>(
  block: &[u8],
  el: &Element,
  resolver: &mut Resolver<'_, S>,
) -> Result<Option<Vec<u8>>, FillError> {
  let start = &block[el.start_tag.clone()];
  let Some(name) = field_name(start) else {
    trace!("skip unnamed textarea");
    return Ok(None);
  };
  let policy = resolver.options().textarea_policy;
  let content: &[u8] = match resolver.resolve(&name)? {
    Lookup::Ignored => return Ok(None),
    Lookup::Missing => match policy {
      TextareaPolicy::Keep => return Ok(None),
      TextareaPolicy::Clear => b"",
    },
    Lookup::Found(field) => field.first_encoded().unwrap_or_default(),
  };

  let mut out = Vec::with_capacity(start.len() + content.len() + el.end_tag().len());
  out.extend_from_slice(start);
  out.extend_from_slice(content);
  out.extend_from_slice(&block[el.end_tag()]);
  Ok(Some(out))
}
