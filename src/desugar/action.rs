//! Form and button action-binding pass.
//!
//! A `<form>` carrying a submit-event binding is rewritten to submit
//! asynchronously: POST to the declared action, swap into the default
//! region, and push history; with no declared action the form falls back
//! to a boosted normal navigation. A `<button>` carrying a click-event
//! binding plus a declared action becomes a standalone asynchronous-POST
//! trigger; a click binding with no action has no network target and the
//! tag is left unrewritten.

use crate::compiler::errors::CompileResult;

use super::attrs::{AttrBag, AttrValue};
use super::{find_tag, scan_tag_head, DEFAULT_TARGET, SWAP_STYLE};

const SUBMIT_BINDING: &str = "onSubmit";
const CLICK_BINDING: &str = "onClick";
const ACTION_ATTR: &str = "data-action";

pub(super) fn rewrite_forms(source: &str) -> CompileResult<String> {
    let mut out = String::with_capacity(source.len());
    let mut cursor = 0;

    while let Some(at) = find_tag(source, cursor, "form") {
        out.push_str(&source[cursor..at]);
        let head = scan_tag_head(source, at, "form")?;
        let mut bag = AttrBag::parse(source, head.attrs_start, head.attrs_end)?;

        if !bag.has(SUBMIT_BINDING) {
            out.push_str(&source[at..head.end]);
            cursor = head.end;
            continue;
        }

        // The declared action: the binding's own value, else the form's
        // `action` attribute (kept in place for no-script fallback).
        let binding = bag.remove(SUBMIT_BINDING);
        let action = match binding {
            Some(AttrValue::Value(v)) if !v.is_empty() => Some(v),
            _ => bag.value_of("action").map(str::to_string),
        };

        out.push_str("<form");
        out.push_str(&bag.serialize());
        match action {
            Some(action) => out.push_str(&format!(
                " hx-post=\"{action}\" hx-target=\"{DEFAULT_TARGET}\" \
                 hx-swap=\"{SWAP_STYLE}\" hx-push-url=\"true\""
            )),
            None => out.push_str(" hx-boost=\"true\""),
        }
        out.push('>');
        cursor = head.end;
    }

    out.push_str(&source[cursor..]);
    Ok(out)
}

pub(super) fn rewrite_buttons(source: &str) -> CompileResult<String> {
    let mut out = String::with_capacity(source.len());
    let mut cursor = 0;

    while let Some(at) = find_tag(source, cursor, "button") {
        out.push_str(&source[cursor..at]);
        let head = scan_tag_head(source, at, "button")?;
        let mut bag = AttrBag::parse(source, head.attrs_start, head.attrs_end)?;

        let action = bag
            .value_of(ACTION_ATTR)
            .filter(|v| !v.is_empty())
            .map(str::to_string);
        let Some(action) = action.filter(|_| bag.has(CLICK_BINDING)) else {
            // No binding, or a binding with no network target.
            out.push_str(&source[at..head.end]);
            cursor = head.end;
            continue;
        };

        bag.remove(CLICK_BINDING);
        bag.remove(ACTION_ATTR);

        out.push_str("<button");
        out.push_str(&bag.serialize());
        out.push_str(&format!(
            " hx-post=\"{action}\" hx-target=\"{DEFAULT_TARGET}\" \
             hx-swap=\"{SWAP_STYLE}\" hx-push-url=\"true\""
        ));
        out.push('>');
        cursor = head.end;
    }

    out.push_str(&source[cursor..]);
    Ok(out)
}
