//! Parsing of Doxygen navigation scripts

use serde_json::Value;

use super::{Declaration, NavChildren, NavData, NavDataError, NavNode, NavValue};

/// Parse a navigation data file.
///
/// Everything before the first line-initial `var` is kept verbatim as the
/// header. Array bodies must be valid JSON; strings bind with single
/// quotes.
///
/// # Errors
///
/// Returns an error describing the first malformed declaration or entry.
pub fn parse(input: &str) -> Result<NavData, NavDataError> {
    let body_start = find_first_declaration(input);
    let header = if body_start > 0 {
        Some(input[..body_start].to_string())
    } else {
        None
    };

    let mut declarations = Vec::new();
    let mut pos = body_start;
    loop {
        pos = skip_whitespace(input, pos);
        if pos >= input.len() {
            break;
        }
        let (declaration, next) = parse_declaration(input, pos)?;
        declarations.push(declaration);
        pos = next;
    }

    if declarations.is_empty() {
        return Err(NavDataError::Syntax {
            line: 1,
            message: "no var declarations found".to_string(),
        });
    }
    Ok(NavData {
        header,
        declarations,
    })
}

/// Byte offset of the first `var` that starts a line
fn find_first_declaration(input: &str) -> usize {
    if input.starts_with("var ") {
        return 0;
    }
    input
        .match_indices("\nvar ")
        .map(|(i, _)| i + 1)
        .next()
        .unwrap_or(0)
}

fn skip_whitespace(input: &str, mut pos: usize) -> usize {
    let bytes = input.as_bytes();
    while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
        pos += 1;
    }
    pos
}

fn line_of(input: &str, pos: usize) -> usize {
    input[..pos.min(input.len())].matches('\n').count() + 1
}

fn syntax_error(input: &str, pos: usize, message: impl Into<String>) -> NavDataError {
    NavDataError::Syntax {
        line: line_of(input, pos),
        message: message.into(),
    }
}

fn parse_declaration(input: &str, start: usize) -> Result<(Declaration, usize), NavDataError> {
    let rest = &input[start..];
    let Some(after_var) = rest.strip_prefix("var ") else {
        return Err(syntax_error(input, start, "expected 'var'"));
    };

    let name_len = after_var
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(after_var.len());
    if name_len == 0 {
        return Err(syntax_error(input, start, "expected a variable name"));
    }
    let name = &after_var[..name_len];

    let mut pos = start + 4 + name_len;
    pos = skip_whitespace(input, pos);
    if !input[pos..].starts_with('=') {
        return Err(syntax_error(input, pos, format!("expected '=' after '{name}'")));
    }
    pos = skip_whitespace(input, pos + 1);

    match input.as_bytes().get(pos) {
        Some(b'\'') => {
            let (text, after) = parse_single_quoted(input, pos)?;
            let after = expect_semicolon(input, after)?;
            Ok((
                Declaration {
                    name: name.to_string(),
                    value: NavValue::Text(text),
                    indent: 0,
                },
                after,
            ))
        }
        Some(b'[') => {
            let end = find_matching_bracket(input, pos)?;
            let body = &input[pos..=end];
            let after = expect_semicolon(input, end + 1)?;
            let value = parse_array(name, body)?;
            Ok((
                Declaration {
                    name: name.to_string(),
                    value,
                    indent: detect_indent(body),
                },
                after,
            ))
        }
        _ => Err(syntax_error(
            input,
            pos,
            format!("expected '[' or a quoted string for '{name}'"),
        )),
    }
}

fn expect_semicolon(input: &str, pos: usize) -> Result<usize, NavDataError> {
    let pos = skip_whitespace(input, pos);
    if input[pos..].starts_with(';') {
        Ok(pos + 1)
    } else {
        Err(syntax_error(input, pos, "expected ';'"))
    }
}

/// Parse a `'...'` string starting at `start`, returning its text and the
/// offset just past the closing quote. Supports `\'` and `\\` escapes.
fn parse_single_quoted(input: &str, start: usize) -> Result<(String, usize), NavDataError> {
    let mut text = String::new();
    let mut escaped = false;
    for (i, c) in input[start + 1..].char_indices() {
        if escaped {
            match c {
                '\'' | '\\' => text.push(c),
                other => {
                    text.push('\\');
                    text.push(other);
                }
            }
            escaped = false;
        } else {
            match c {
                '\\' => escaped = true,
                '\'' => return Ok((text, start + 1 + i + 1)),
                other => text.push(other),
            }
        }
    }
    Err(syntax_error(input, start, "unterminated string"))
}

/// Offset of the `]` closing the `[` at `start`, skipping bracket
/// characters inside double-quoted strings.
fn find_matching_bracket(input: &str, start: usize) -> Result<usize, NavDataError> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (i, c) in input[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(start + i);
                }
            }
            _ => {}
        }
    }
    Err(syntax_error(input, start, "unbalanced brackets"))
}

/// Indentation of the first entry line inside an array body
fn detect_indent(body: &str) -> usize {
    body.split('\n')
        .nth(1)
        .map_or(2, |line| line.len() - line.trim_start_matches(' ').len())
}

fn parse_array(name: &str, body: &str) -> Result<NavValue, NavDataError> {
    let value: Value = serde_json::from_str(body).map_err(|e| NavDataError::Json {
        name: name.to_string(),
        message: e.to_string(),
    })?;
    let Value::Array(entries) = value else {
        return Err(NavDataError::Json {
            name: name.to_string(),
            message: "expected a top-level array".to_string(),
        });
    };

    if !entries.is_empty() && entries.iter().all(Value::is_string) {
        let links = entries
            .into_iter()
            .filter_map(|v| match v {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect();
        return Ok(NavValue::Index(links));
    }

    let mut nodes = Vec::with_capacity(entries.len());
    for (i, entry) in entries.iter().enumerate() {
        nodes.push(node_from_value(entry, &format!("{name}[{i}]"))?);
    }
    Ok(NavValue::Tree(nodes))
}

fn node_from_value(value: &Value, path: &str) -> Result<NavNode, NavDataError> {
    let bad = |message: &str| NavDataError::BadNode {
        path: path.to_string(),
        message: message.to_string(),
    };

    let Value::Array(triple) = value else {
        return Err(bad("expected a [label, link, children] array"));
    };
    if triple.len() != 3 {
        return Err(bad(&format!("expected 3 elements, found {}", triple.len())));
    }

    let label = triple[0]
        .as_str()
        .ok_or_else(|| bad("label must be a string"))?
        .to_string();
    let link = match &triple[1] {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        _ => return Err(bad("link must be a string or null")),
    };
    let children = match &triple[2] {
        Value::Null => NavChildren::None,
        Value::String(page) => NavChildren::External(page.clone()),
        Value::Array(kids) => {
            let mut nodes = Vec::with_capacity(kids.len());
            for (i, kid) in kids.iter().enumerate() {
                nodes.push(node_from_value(kid, &format!("{path}[2][{i}]"))?);
            }
            NavChildren::Inline(nodes)
        }
        _ => return Err(bad("children must be null, a string, or an array")),
    };

    Ok(NavNode {
        label,
        link,
        children,
    })
}
