/* src/engine/rust/src/form.rs */

use tracing::debug;

use crate::attr::{self, AttrName};
use crate::catalog::{self, Element};
use crate::controls::{fill_inputs, fill_selects, fill_textareas};
use crate::errors::FillError;
use crate::helpers::splice;
use crate::resolve::Resolver;
use crate::source::FieldSource;

/// Counters reported at the end of a fill.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FormStats {
  pub(crate) found: usize,
  pub(crate) filled: usize,
}

/// Fill every form block in `document`. Bytes outside form blocks are copied as-is.
pub(crate) fn fill_document<S: FieldSource + ?Sized>(
  document: &[u8],
  resolver: &mut Resolver<'_, S>,
  stats: &mut FormStats,
) -> Result<Vec<u8>, FillError> {
  let target = resolver.options().target.as_deref();
  splice(document, catalog::forms(document).map(|form| (form.span.clone(), form)), |block, form| {
    stats.found += 1;
    if let Some(target) = target {
      if !is_target(block, &form, target) {
        debug!(form_target = target, "pass through non-target form");
        return Ok(None);
      }
    }
    stats.filled += 1;
    fill_form(block, resolver).map(Some)
  })
}

fn is_target(block: &[u8], form: &Element, target: &str) -> bool {
  attr::get(&block[form.start_tag.clone()], AttrName::Id) == Some(target.as_bytes())
}

/// Inputs, then selects, then textareas, each pass over the previous output.
fn fill_form<S: FieldSource + ?Sized>(
  block: &[u8],
  resolver: &mut Resolver<'_, S>,
) -> Result<Vec<u8>, FillError> {
  let filled = fill_inputs(block, resolver)?;
  let filled = fill_selects(&filled, resolver)?;
  fill_textareas(&filled, resolver)
}
