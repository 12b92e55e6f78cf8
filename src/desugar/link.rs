//! Navigation link pass.
//!
//! `<Link to="/x" prefetch>Go</Link>` becomes a standard hyperlink that
//! navigates via asynchronous GET, swaps the response into the default
//! content region, and pushes the URL to history. Inner content is
//! preserved verbatim; author attributes pass through unchanged.

use crate::compiler::errors::{CompileError, CompileResult};

use super::attrs::{AttrBag, AttrValue};
use super::{find_tag, scan_tag_head, DEFAULT_TARGET, PREFETCH_ATTR, SWAP_STYLE};

const TAG: &str = "Link";
const CLOSE: &str = "</Link>";

pub(super) fn rewrite_links(source: &str) -> CompileResult<String> {
    let mut out = String::with_capacity(source.len());
    let mut cursor = 0;

    while let Some(at) = find_tag(source, cursor, TAG) {
        out.push_str(&source[cursor..at]);
        let head = scan_tag_head(source, at, TAG)?;
        let mut bag = AttrBag::parse(source, head.attrs_start, head.attrs_end)?;

        // Open tag pairs with the nearest following close tag.
        let (inner, after) = if head.self_closing {
            ("", head.end)
        } else {
            match source[head.end..].find(CLOSE) {
                Some(close) => (
                    &source[head.end..head.end + close],
                    head.end + close + CLOSE.len(),
                ),
                None => {
                    return Err(CompileError::unclosed_component(source, "<Link>", at)
                        .with_help("add a closing </Link>"));
                }
            }
        };

        // Target resolution: `to`, else `href`, else root.
        let to = bag.remove("to");
        let href = bag.remove("href");
        let target = match to {
            Some(AttrValue::Value(v)) if !v.is_empty() => v,
            _ => match href {
                Some(AttrValue::Value(v)) if !v.is_empty() => v,
                _ => "/".to_string(),
            },
        };
        let prefetch = bag.remove("prefetch").is_some();

        out.push_str(&format!(
            "<a href=\"{target}\" hx-get=\"{target}\" hx-target=\"{DEFAULT_TARGET}\" \
             hx-swap=\"{SWAP_STYLE}\" hx-push-url=\"true\""
        ));
        // The client runtime selects prefetch links by attribute value.
        if prefetch {
            out.push_str(&format!(" {PREFETCH_ATTR}=\"1\""));
        }
        out.push_str(&bag.serialize());
        out.push('>');
        out.push_str(inner);
        out.push_str("</a>");
        cursor = after;
    }

    out.push_str(&source[cursor..]);
    Ok(out)
}
