//! Decoder for the indentation-based YAML subset.
//!
//! Supported: block mappings nested by indentation, block sequences
//! (including sequences of mappings and sequences written at the same
//! indentation as their parent key), quoted and bare scalars typed with
//! [`classify_scalar`], and `#` comments. Anchors, tags, flow collections,
//! block scalars and multi-document streams are not supported.
//!
//! Decoding is a single pass over the lines. Open blocks live on an explicit
//! stack of frames, each recording the column it was opened at; a dedent
//! closes frames until one at the line's column (or shallower) is on top.
//!
//! # Example
//!
//! ```
//! use jsonquery::document::yaml::decode_yaml;
//! use jsonquery::document::node::{Number, Value};
//!
//! let doc = decode_yaml("database:\n  host: localhost\n  port: 5432\n").unwrap();
//! let db = doc.get("database").unwrap();
//! assert_eq!(db.get("host"), Some(&Value::String("localhost".to_string())));
//! assert_eq!(db.get("port"), Some(&Value::Number(Number::Integer(5432))));
//! ```

use super::node::Value;
use super::scalar::{classify_scalar, unquote};
use crate::error::DecodeError;
use indexmap::IndexMap;
use log::{debug, trace};

/// Decodes YAML text.
///
/// An empty document (only blank lines and comments) decodes to an empty
/// object. A document holding a single scalar decodes to that scalar.
///
/// # Errors
///
/// Returns [`DecodeError::Yaml`] with the 1-based line number when a line
/// uses a tab for indentation, is indented to a column that matches no open
/// block, or is neither a `key: value` entry nor a `- item` where one is
/// expected.
pub fn decode_yaml(text: &str) -> Result<Value, DecodeError> {
    let mut decoder = Decoder::default();
    let mut line_count = 0;

    for (idx, raw) in text.lines().enumerate() {
        line_count = idx + 1;
        let Some(line) = logical_line(idx + 1, raw)? else {
            continue;
        };

        if line.indent == 0 && (line.content == "---" || line.content == "...") {
            if decoder.is_empty() || line.content == "..." {
                continue;
            }
            return Err(DecodeError::yaml(
                line.number,
                "multiple documents are not supported",
            ));
        }

        trace!(
            "yaml line {}: indent={} content={:?}",
            line.number,
            line.indent,
            line.content
        );
        decoder.feed(&line)?;
    }

    debug!("decoded YAML document ({} lines)", line_count);
    Ok(decoder.finish())
}

/// A non-blank line with its comment removed.
struct Line<'a> {
    number: usize,
    indent: usize,
    content: &'a str,
}

/// Splits a raw line into indentation and content.
///
/// Returns `Ok(None)` for blank and comment-only lines so they never take part
/// in indentation tracking.
fn logical_line(number: usize, raw: &str) -> Result<Option<Line<'_>>, DecodeError> {
    let stripped = strip_comment(raw).trim_end();
    let content = stripped.trim_start_matches([' ', '\t']);
    if content.is_empty() {
        return Ok(None);
    }

    let leading = &stripped[..stripped.len() - content.len()];
    if leading.contains('\t') {
        return Err(DecodeError::yaml(
            number,
            "tab character in indentation (use spaces)",
        ));
    }

    Ok(Some(Line {
        number,
        indent: leading.len(),
        content,
    }))
}

/// Removes a trailing `# comment`.
///
/// `#` only starts a comment at the beginning of the line or after
/// whitespace, and never inside a quoted scalar.
fn strip_comment(raw: &str) -> &str {
    let mut quote: Option<char> = None;
    let mut prev: Option<char> = None;
    let mut chars = raw.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        match quote {
            // `\"` inside double quotes and `''` inside single quotes do not close
            Some('"') if ch == '\\' => {
                chars.next();
            }
            Some('\'') if ch == '\'' && matches!(chars.peek(), Some((_, '\''))) => {
                chars.next();
            }
            Some(q) if ch == q => quote = None,
            Some(_) => {}
            None => {
                let at_token_start = prev.map_or(true, |p| p.is_whitespace());
                if at_token_start && (ch == '"' || ch == '\'') {
                    quote = Some(ch);
                } else if at_token_start && ch == '#' {
                    return &raw[..idx];
                }
            }
        }
        prev = Some(ch);
    }
    raw
}

/// Returns the text after a `- ` sequence marker and the column offset of
/// that text, or `None` when `content` is not a sequence item.
fn item_body(content: &str) -> Option<(usize, &str)> {
    if content == "-" {
        return Some((content.len(), ""));
    }
    let rest = content.strip_prefix("- ")?;
    let body = rest.trim_start_matches(' ');
    Some((content.len() - body.len(), body))
}

/// Splits `key: value` at the first colon followed by a space or the end of
/// the line. A leading quoted key may contain colons.
fn split_entry(content: &str) -> Option<(&str, &str)> {
    let bytes = content.as_bytes();
    let mut quote: Option<u8> = None;
    let mut idx = 0;

    while idx < bytes.len() {
        let b = bytes[idx];
        match quote {
            Some(b'"') if b == b'\\' => idx += 1,
            Some(b'\'') if b == b'\'' && bytes.get(idx + 1) == Some(&b'\'') => idx += 1,
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None => match b {
                b'"' | b'\'' if idx == 0 => quote = Some(b),
                b':' if idx + 1 == bytes.len() || bytes[idx + 1] == b' ' => {
                    return Some((content[..idx].trim_end(), content[idx + 1..].trim()));
                }
                _ => {}
            },
        }
        idx += 1;
    }
    None
}

enum Container {
    Map(IndexMap<String, Value>),
    Seq(Vec<Value>),
}

/// A value slot waiting for its content on following, deeper lines.
enum Slot {
    /// `key:` with nothing after the colon.
    Key(String),
    /// `-` with nothing after the marker.
    Item,
}

struct Frame {
    indent: usize,
    container: Container,
    pending: Option<Slot>,
}

impl Frame {
    fn map(indent: usize) -> Self {
        Frame {
            indent,
            container: Container::Map(IndexMap::new()),
            pending: None,
        }
    }

    fn seq(indent: usize) -> Self {
        Frame {
            indent,
            container: Container::Seq(Vec::new()),
            pending: None,
        }
    }

    /// Stores `value` in the pending slot.
    fn fill(&mut self, value: Value) {
        match (self.pending.take(), &mut self.container) {
            (Some(Slot::Key(key)), Container::Map(entries)) => {
                if entries.contains_key(&key) {
                    trace!("duplicate key '{}' replaces earlier value", key);
                }
                entries.insert(key, value);
            }
            (Some(Slot::Item), Container::Seq(items)) => items.push(value),
            _ => unreachable!("value stored without a matching pending slot"),
        }
    }

    /// A slot left empty when its block ends holds null.
    fn close_pending(&mut self) {
        if self.pending.is_some() {
            self.fill(Value::Null);
        }
    }

    fn into_value(mut self) -> Value {
        self.close_pending();
        match self.container {
            Container::Map(entries) => Value::Object(entries),
            Container::Seq(items) => Value::Array(items),
        }
    }
}

#[derive(Default)]
struct Decoder {
    stack: Vec<Frame>,
    root_scalar: Option<Value>,
}

impl Decoder {
    fn is_empty(&self) -> bool {
        self.stack.is_empty() && self.root_scalar.is_none()
    }

    fn feed(&mut self, line: &Line<'_>) -> Result<(), DecodeError> {
        if self.root_scalar.is_some() {
            return Err(DecodeError::yaml(
                line.number,
                "unexpected content after a scalar document",
            ));
        }
        if self.stack.is_empty() {
            return self.open_root(line);
        }

        while self.stack.len() > 1 && self.top().indent > line.indent {
            self.close_top();
        }

        let top_indent = self.top().indent;
        if line.indent < top_indent {
            Err(DecodeError::yaml(
                line.number,
                "line is indented less than the start of the document",
            ))
        } else if line.indent == top_indent {
            self.continue_block(line.number, line.indent, line.content)
        } else {
            self.open_nested(line.number, line.indent, line.content)
        }
    }

    fn finish(mut self) -> Value {
        if let Some(value) = self.root_scalar {
            return value;
        }
        while self.stack.len() > 1 {
            self.close_top();
        }
        match self.stack.pop() {
            Some(root) => root.into_value(),
            None => Value::Object(IndexMap::new()),
        }
    }

    fn top(&self) -> &Frame {
        &self.stack[self.stack.len() - 1]
    }

    fn top_mut(&mut self) -> &mut Frame {
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }

    /// Pops the innermost block and stores it in its parent's pending slot.
    fn close_top(&mut self) {
        if let Some(frame) = self.stack.pop() {
            let value = frame.into_value();
            if let Some(parent) = self.stack.last_mut() {
                parent.fill(value);
            }
        }
    }

    fn open_root(&mut self, line: &Line<'_>) -> Result<(), DecodeError> {
        if let Some((offset, body)) = item_body(line.content) {
            self.stack.push(Frame::seq(line.indent));
            self.start_item(line.number, line.indent + offset, body)
        } else if split_entry(line.content).is_some() {
            self.stack.push(Frame::map(line.indent));
            self.map_entry(line.number, line.content)
        } else {
            self.root_scalar = Some(classify_scalar(line.content));
            Ok(())
        }
    }

    /// Handles a line at the same column as the innermost open block.
    fn continue_block(
        &mut self,
        number: usize,
        indent: usize,
        content: &str,
    ) -> Result<(), DecodeError> {
        let item = item_body(content);
        let in_sequence = matches!(self.top().container, Container::Seq(_));

        match (in_sequence, item) {
            (true, Some((offset, body))) => {
                self.top_mut().close_pending();
                self.start_item(number, indent + offset, body)
            }
            (true, None) => {
                // A sequence written at its parent key's column ends here
                let depth = self.stack.len();
                let parent_is_map_at_same_column = depth > 1
                    && self.stack[depth - 2].indent == indent
                    && matches!(self.stack[depth - 2].container, Container::Map(_));
                if !parent_is_map_at_same_column {
                    return Err(DecodeError::yaml(
                        number,
                        "expected a sequence item ('- ') at this indentation",
                    ));
                }
                self.close_top();
                self.continue_block(number, indent, content)
            }
            (false, Some((offset, body))) => {
                if !matches!(self.top().pending, Some(Slot::Key(_))) {
                    return Err(DecodeError::yaml(
                        number,
                        "sequence item where a mapping key was expected",
                    ));
                }
                self.stack.push(Frame::seq(indent));
                self.start_item(number, indent + offset, body)
            }
            (false, None) => {
                self.top_mut().close_pending();
                self.map_entry(number, content)
            }
        }
    }

    /// Handles a line indented deeper than the innermost open block. Only
    /// valid when that block has a slot waiting for a nested value.
    fn open_nested(
        &mut self,
        number: usize,
        indent: usize,
        content: &str,
    ) -> Result<(), DecodeError> {
        if self.top().pending.is_none() {
            return Err(DecodeError::yaml(
                number,
                "indentation does not match any open block",
            ));
        }

        if let Some((offset, body)) = item_body(content) {
            self.stack.push(Frame::seq(indent));
            self.start_item(number, indent + offset, body)
        } else if split_entry(content).is_some() {
            self.stack.push(Frame::map(indent));
            self.map_entry(number, content)
        } else {
            self.top_mut().fill(classify_scalar(content));
            Ok(())
        }
    }

    /// Starts an item in the sequence on top of the stack. `column` is where
    /// the item's inline text begins.
    fn start_item(&mut self, number: usize, column: usize, body: &str) -> Result<(), DecodeError> {
        self.top_mut().pending = Some(Slot::Item);
        if body.is_empty() {
            return Ok(());
        }
        self.open_nested(number, column, body)
    }

    /// Adds a `key: value` entry to the mapping on top of the stack.
    fn map_entry(&mut self, number: usize, content: &str) -> Result<(), DecodeError> {
        let (raw_key, raw_value) = split_entry(content)
            .ok_or_else(|| DecodeError::yaml(number, "expected 'key: value'"))?;

        let key = unquote(raw_key).unwrap_or_else(|| raw_key.to_string());
        if key.is_empty() {
            return Err(DecodeError::yaml(number, "empty mapping key"));
        }

        let top = self.top_mut();
        top.pending = Some(Slot::Key(key));
        if !raw_value.is_empty() {
            top.fill(classify_scalar(raw_value));
        }
        Ok(())
    }
}
