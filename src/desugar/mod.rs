//! Component desugaring passes.
//!
//! Three independent tag-rewrite passes turn high-level component tags into
//! plain markup plus hypermedia-exchange attributes. Pass order is fixed:
//! region markers, then navigation links, then form/button action bindings.
//! Later passes must not re-match text already rewritten by earlier ones,
//! and text outside the targeted tags is untouched.

pub mod attrs;
mod action;
mod link;
mod region;

use tracing::debug;

use crate::compiler::errors::{CompileError, CompileResult};

/// The region id targeted by navigation and action attributes when no
/// region marker id overrides it.
pub(crate) const DEFAULT_REGION_ID: &str = "content";
/// CSS selector for the default content region.
pub(crate) const DEFAULT_TARGET: &str = "#content";
/// Marker attribute identifying a dynamic region container.
pub(crate) const REGION_MARKER_ATTR: &str = "data-bx-region";
/// Data marker for client-side prefetch-on-hover. The runtime matches
/// `a[data-bx-prefetch="1"]`, so the attribute is always emitted with
/// value `"1"`.
pub(crate) const PREFETCH_ATTR: &str = "data-bx-prefetch";
/// Swap style applied to every rewritten exchange.
pub(crate) const SWAP_STYLE: &str = "innerHTML";

/// Runs the three desugaring passes in order.
pub fn desugar(source: &str) -> CompileResult<String> {
    debug!("running component desugaring passes");
    let out = region::rewrite_region_markers(source)?;
    let out = link::rewrite_links(&out)?;
    let out = action::rewrite_forms(&out)?;
    let out = action::rewrite_buttons(&out)?;
    Ok(out)
}

/// A scanned tag head: the span of its attribute text and its terminator.
pub(crate) struct TagHead {
    /// Byte offset just past `<tag`.
    pub attrs_start: usize,
    /// Byte offset of the terminator (`>` or the `/` of `/>`).
    pub attrs_end: usize,
    /// Byte offset just past the closing `>`.
    pub end: usize,
    /// True for `<tag ... />`.
    pub self_closing: bool,
}

/// Finds the next `<tag` at or after `from` whose name ends at a boundary
/// (whitespace, `>`, or `/`), so `<Link>` never matches `<LinkList>`.
pub(crate) fn find_tag(source: &str, from: usize, tag: &str) -> Option<usize> {
    let needle = format!("<{tag}");
    let mut search = from;
    while let Some(found) = source[search..].find(&needle) {
        let at = search + found;
        let after = &source[at + needle.len()..];
        match after.chars().next() {
            // Tag head runs to end of input; report it so the head scan
            // fails with a positioned error instead of silently skipping.
            None => return Some(at),
            Some(c) if c.is_whitespace() || c == '>' || c == '/' => return Some(at),
            Some(_) => search = at + needle.len(),
        }
    }
    None
}

/// Scans the head of the tag starting at `at` (its `<`). Quoted attribute
/// values may contain `>`, so the terminator search is quote-aware.
pub(crate) fn scan_tag_head(source: &str, at: usize, tag: &str) -> CompileResult<TagHead> {
    let attrs_start = at + 1 + tag.len();
    let mut i = attrs_start;
    let mut quote: Option<(char, usize)> = None;

    while let Some(c) = source[i..].chars().next() {
        match quote {
            Some((q, _)) => {
                if c == q {
                    quote = None;
                }
            }
            None => match c {
                '"' | '\'' => quote = Some((c, i)),
                '>' => {
                    let head_text = source[attrs_start..i].trim_end();
                    let self_closing = head_text.ends_with('/');
                    let attrs_end = if self_closing {
                        attrs_start + head_text.len() - 1
                    } else {
                        i
                    };
                    return Ok(TagHead {
                        attrs_start,
                        attrs_end,
                        end: i + 1,
                        self_closing,
                    });
                }
                _ => {}
            },
        }
        i += c.len_utf8();
    }

    match quote {
        Some((_, opened)) => Err(CompileError::unterminated_attribute(source, opened)),
        None => Err(CompileError::unclosed_component(source, tag_label(tag), at)
            .with_help("the tag head has no closing >")),
    }
}

fn tag_label(tag: &str) -> &'static str {
    match tag {
        "RegionMarker" => "<RegionMarker>",
        "Link" => "<Link>",
        "form" => "<form>",
        "button" => "<button>",
        _ => "component tag",
    }
}
