//! CDATA section handling.
//!
//! The XML tree does not keep CDATA sections as distinct nodes. Before parsing,
//! every `<![CDATA[...]]>` section is rewritten into a placeholder element whose
//! text is the section body; serialization performs the inverse rewrite so
//! descriptions and comments come back out as CDATA.

use super::errors::DocumentError;

/// Element name standing in for a CDATA section while the document is loaded.
pub(crate) const PLACEHOLDER: &str = "CDATAContent";

const CDATA_OPEN: &str = "<![CDATA[";
const CDATA_CLOSE: &str = "]]>";

/// Rewrites every CDATA section in `xml` into a placeholder element.
pub(crate) fn to_placeholders(xml: &str) -> Result<String, DocumentError> {
    let mut out = String::with_capacity(xml.len());
    let mut rest = xml;
    while let Some(start) = rest.find(CDATA_OPEN) {
        out.push_str(&rest[..start]);
        out.push('<');
        out.push_str(PLACEHOLDER);
        out.push('>');
        rest = &rest[start..];
        // Directly adjacent sections are one text split around a literal `]]>`.
        while let Some(body) = rest.strip_prefix(CDATA_OPEN) {
            let end = body
                .find(CDATA_CLOSE)
                .ok_or_else(|| DocumentError::ParseFailed {
                    reason: "unterminated CDATA section".to_string(),
                })?;
            escape_into(&body[..end], &mut out);
            rest = &body[end + CDATA_CLOSE.len()..];
        }
        out.push_str("</");
        out.push_str(PLACEHOLDER);
        out.push('>');
    }
    out.push_str(rest);
    Ok(out)
}

/// Rewrites placeholder elements in serialized `xml` back into CDATA sections.
///
/// With `crlf` set, every line break inside a section is written as CRLF.
/// With `crlf_markup` set, so is every line break outside them.
pub(crate) fn from_placeholders(xml: &str, crlf: bool, crlf_markup: bool) -> String {
    let marker = format!("<{PLACEHOLDER}");
    let close = format!("</{PLACEHOLDER}>");
    let mut out = String::with_capacity(xml.len());
    let mut rest = xml;

    while let Some(start) = rest.find(&marker) {
        push_markup(&rest[..start], crlf_markup, &mut out);
        let after = &rest[start + marker.len()..];

        if let Some(body) = after.strip_prefix('>') {
            let Some(end) = body.find(&close) else {
                push_markup(&rest[start..], crlf_markup, &mut out);
                return out;
            };
            write_section(&unescape(&body[..end]), crlf, &mut out);
            rest = &body[end + close.len()..];
        } else if let Some(tail) = after.trim_start().strip_prefix("/>") {
            write_section("", crlf, &mut out);
            rest = tail;
        } else {
            // Some other element that merely shares the prefix.
            out.push_str(&marker);
            rest = after;
        }
    }
    push_markup(rest, crlf_markup, &mut out);
    out
}

fn push_markup(markup: &str, crlf: bool, out: &mut String) {
    if crlf {
        out.push_str(&markup.replace("\r\n", "\n").replace('\n', "\r\n"));
    } else {
        out.push_str(markup);
    }
}

fn write_section(text: &str, crlf: bool, out: &mut String) {
    let text = if crlf {
        text.replace("\r\n", "\n").replace('\n', "\r\n")
    } else {
        text.to_string()
    };
    out.push_str(CDATA_OPEN);
    // A literal terminator has to be split across two sections.
    out.push_str(&text.replace(CDATA_CLOSE, "]]]]><![CDATA[>"));
    out.push_str(CDATA_CLOSE);
}

fn escape_into(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\r' => out.push_str("&#13;"),
            _ => out.push(c),
        }
    }
}

fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let Some(semi) = tail.find(';') else {
            out.push_str(tail);
            return out;
        };
        match decode_entity(&tail[1..semi]) {
            Some(c) => {
                out.push(c);
                rest = &tail[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(entity: &str) -> Option<char> {
    match entity {
        "lt" => Some('<'),
        "gt" => Some('>'),
        "amp" => Some('&'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let code = if let Some(hex) = entity
                .strip_prefix("#x")
                .or_else(|| entity.strip_prefix("#X"))
            {
                u32::from_str_radix(hex, 16).ok()
            } else {
                entity.strip_prefix('#').and_then(|d| d.parse().ok())
            };
            code.and_then(char::from_u32)
        }
    }
}
