//! Region marker pass.
//!
//! `<RegionMarker id="panel" .../>` becomes an empty container element
//! carrying the dynamic-region marker attribute and an out-of-band swap
//! directive, so the hypermedia runtime replaces the element's content
//! whenever a response targets the same id.

use crate::compiler::errors::{CompileError, CompileResult};

use super::attrs::{AttrBag, AttrValue};
use super::{find_tag, scan_tag_head, DEFAULT_REGION_ID, REGION_MARKER_ATTR, SWAP_STYLE};

const TAG: &str = "RegionMarker";

pub(super) fn rewrite_region_markers(source: &str) -> CompileResult<String> {
    let mut out = String::with_capacity(source.len());
    let mut cursor = 0;

    while let Some(at) = find_tag(source, cursor, TAG) {
        out.push_str(&source[cursor..at]);
        let head = scan_tag_head(source, at, TAG)?;
        if !head.self_closing {
            return Err(
                CompileError::unclosed_component(source, "<RegionMarker>", at)
                    .with_help("region markers are self-closing; write <RegionMarker ... />"),
            );
        }

        let mut bag = AttrBag::parse(source, head.attrs_start, head.attrs_end)?;
        let id = match bag.remove("id") {
            Some(AttrValue::Value(v)) if !v.is_empty() => v,
            _ => DEFAULT_REGION_ID.to_string(),
        };

        out.push_str(&format!(
            "<div id=\"{id}\" {REGION_MARKER_ATTR} hx-swap-oob=\"{SWAP_STYLE}:#{id}\""
        ));
        out.push_str(&bag.serialize());
        out.push_str("></div>");
        cursor = head.end;
    }

    out.push_str(&source[cursor..]);
    Ok(out)
}
