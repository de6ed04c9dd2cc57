//! Decoding of Go string literal nodes.
//!
//! Extraction walks over many nodes that are not string literals at all, so
//! "not a literal" is an expected, silent outcome (`None`), never an error.

use tree_sitter::Node;

/// Decode a node as a Go string literal.
///
/// Handles both interpreted (`"..."`, with the full escape set) and raw
/// (`` `...` ``) literals. Returns `None` for any other node kind and for
/// literals whose escape sequences cannot be decoded.
pub fn decode_string_literal(node: Node<'_>, source: &str) -> Option<String> {
    let node = unwrap_literal_element(node);
    let text = node.utf8_text(source.as_bytes()).ok()?;
    match node.kind() {
        "interpreted_string_literal" => unquote_interpreted(text),
        "raw_string_literal" => unquote_raw(text),
        _ => None,
    }
}

// Composite literal keys arrive wrapped in a literal_element node; the
// literal itself is its single named child.
fn unwrap_literal_element(node: Node<'_>) -> Node<'_> {
    if node.kind() == "literal_element" {
        if let Some(inner) = node.named_child(0) {
            return inner;
        }
    }
    node
}

fn unquote_interpreted(text: &str) -> Option<String> {
    let inner = text.strip_prefix('"')?.strip_suffix('"')?;
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next()? {
            'a' => out.push('\u{07}'),
            'b' => out.push('\u{08}'),
            'f' => out.push('\u{0c}'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'v' => out.push('\u{0b}'),
            '\\' => out.push('\\'),
            '\'' => out.push('\''),
            '"' => out.push('"'),
            'x' => out.push(char::from_u32(hex_digits(&mut chars, 2)?)?),
            'u' => out.push(char::from_u32(hex_digits(&mut chars, 4)?)?),
            'U' => out.push(char::from_u32(hex_digits(&mut chars, 8)?)?),
            c @ '0'..='7' => {
                let mut value = c.to_digit(8)?;
                for _ in 0..2 {
                    value = value * 8 + chars.next()?.to_digit(8)?;
                }
                if value > 255 {
                    return None;
                }
                out.push(char::from_u32(value)?);
            }
            _ => return None,
        }
    }
    Some(out)
}

fn unquote_raw(text: &str) -> Option<String> {
    let inner = text.strip_prefix('`')?.strip_suffix('`')?;
    // Carriage returns inside raw string literals are discarded.
    Some(inner.replace('\r', ""))
}

fn hex_digits(chars: &mut std::str::Chars<'_>, count: usize) -> Option<u32> {
    let mut value = 0;
    for _ in 0..count {
        value = value * 16 + chars.next()?.to_digit(16)?;
    }
    Some(value)
}
