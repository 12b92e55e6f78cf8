//! Ordered attribute bag used transiently while rewriting one tag.
//!
//! Attributes keep their source order so passthrough attributes land in the
//! output where the author wrote them. `name="v"` and `name='v'` are valued
//! attributes; a bare `name` is a boolean-present flag.

use crate::compiler::errors::{CompileError, CompileResult};

/// An attribute value: either a string or bare presence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    /// A bare attribute with no value.
    Flag,
    /// A valued attribute.
    Value(String),
}

/// One attribute, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attr {
    pub name: String,
    pub value: AttrValue,
}

/// An ordered attribute mapping parsed from a tag head.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttrBag {
    attrs: Vec<Attr>,
}

impl AttrBag {
    /// Parses the attribute text in `source[start..end]` (the span between
    /// a tag's name and its `>` terminator). An unterminated quoted value
    /// is a structural error at the opening quote.
    pub fn parse(source: &str, start: usize, end: usize) -> CompileResult<AttrBag> {
        let text = &source[start..end];
        let mut attrs = Vec::new();
        let mut i = 0;

        while i < text.len() {
            let Some(c) = text[i..].chars().next() else {
                break;
            };
            if c.is_whitespace() {
                i += c.len_utf8();
                continue;
            }
            if c == '=' {
                // A value with no name; skip the sign and let the value be
                // picked up as the next bare name.
                i += 1;
                continue;
            }

            let name_start = i;
            while let Some(c) = text[i..].chars().next() {
                if c.is_whitespace() || c == '=' {
                    break;
                }
                i += c.len_utf8();
            }
            let name = text[name_start..i].to_string();

            // Optional `= value`, with whitespace tolerated around the sign.
            let mut probe = i;
            while let Some(c) = text[probe..].chars().next() {
                if !c.is_whitespace() {
                    break;
                }
                probe += c.len_utf8();
            }
            if text[probe..].starts_with('=') {
                probe += 1;
                while let Some(c) = text[probe..].chars().next() {
                    if !c.is_whitespace() {
                        break;
                    }
                    probe += c.len_utf8();
                }
                match text[probe..].chars().next() {
                    Some(quote @ ('"' | '\'')) => {
                        let value_start = probe + 1;
                        match text[value_start..].find(quote) {
                            Some(len) => {
                                attrs.push(Attr {
                                    name,
                                    value: AttrValue::Value(
                                        text[value_start..value_start + len].to_string(),
                                    ),
                                });
                                i = value_start + len + 1;
                            }
                            None => {
                                return Err(CompileError::unterminated_attribute(
                                    source,
                                    start + probe,
                                ));
                            }
                        }
                    }
                    Some(_) => {
                        // Unquoted value: runs to the next whitespace.
                        let value_start = probe;
                        let mut j = probe;
                        while let Some(c) = text[j..].chars().next() {
                            if c.is_whitespace() {
                                break;
                            }
                            j += c.len_utf8();
                        }
                        attrs.push(Attr {
                            name,
                            value: AttrValue::Value(text[value_start..j].to_string()),
                        });
                        i = j;
                    }
                    None => {
                        // Trailing `name=` with nothing after it.
                        attrs.push(Attr {
                            name,
                            value: AttrValue::Value(String::new()),
                        });
                        i = probe;
                    }
                }
            } else {
                attrs.push(Attr {
                    name,
                    value: AttrValue::Flag,
                });
            }
        }

        Ok(AttrBag { attrs })
    }

    /// Returns the value of the first attribute with this name.
    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.attrs.iter().find(|a| a.name == name).map(|a| &a.value)
    }

    /// Returns the string value of a valued attribute with this name.
    pub fn value_of(&self, name: &str) -> Option<&str> {
        match self.get(name) {
            Some(AttrValue::Value(v)) => Some(v),
            _ => None,
        }
    }

    /// Returns true if an attribute with this name is present at all.
    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Removes and returns the first attribute with this name.
    pub fn remove(&mut self, name: &str) -> Option<AttrValue> {
        let idx = self.attrs.iter().position(|a| a.name == name)?;
        Some(self.attrs.remove(idx).value)
    }

    /// Serializes the remaining attributes, each with a leading space, in
    /// insertion order.
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        for attr in &self.attrs {
            out.push(' ');
            out.push_str(&attr.name);
            if let AttrValue::Value(v) = &attr.value {
                if v.contains('"') {
                    out.push_str(&format!("='{v}'"));
                } else {
                    out.push_str(&format!("=\"{v}\""));
                }
            }
        }
        out
    }
}
