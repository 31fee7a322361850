//! Placeholder templates for action text, resolved against invocation parameters.
//!
//! `{key}` reads a named parameter (or a positional one when `key` is an index),
//! `{a;b}` falls back from `a` to `b` when `a` is missing or empty, and `\{`,
//! `\}`, `\\` and `\n` are escapes.

use serde_json::Value;

use crate::method_list::params::Invocation;

#[derive(Clone, Debug, PartialEq)]
enum TemplateSegment {
    Text(String),
    Placeholder { raw: String, fallbacks: Vec<String> },
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ParsedTemplate {
    segments: Vec<TemplateSegment>,
}

pub(crate) fn parse_template(source: &str) -> ParsedTemplate {
    let mut segments = Vec::new();
    let mut text_buffer = String::new();
    let mut chars = source.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\\' => match chars.next() {
                Some('n') => text_buffer.push('\n'),
                Some(next @ ('{' | '}' | '\\')) => text_buffer.push(next),
                Some(next) => {
                    text_buffer.push('\\');
                    text_buffer.push(next);
                }
                None => text_buffer.push('\\'),
            },
            '{' => {
                flush_text(&mut segments, &mut text_buffer);
                let content = match read_until(&mut chars, '}') {
                    Ok(content) => content,
                    Err(rest) => {
                        text_buffer.push('{');
                        text_buffer.push_str(&rest);
                        continue;
                    }
                };
                let fallbacks: Vec<String> = content
                    .split(';')
                    .map(|part| part.trim().to_string())
                    .collect();
                if fallbacks.iter().any(String::is_empty) {
                    segments.push(TemplateSegment::Text(format!("{{{content}}}")));
                } else {
                    segments.push(TemplateSegment::Placeholder {
                        raw: content,
                        fallbacks,
                    });
                }
            }
            _ => text_buffer.push(ch),
        }
    }
    flush_text(&mut segments, &mut text_buffer);
    ParsedTemplate { segments }
}

pub(crate) fn render(parsed: &ParsedTemplate, invocation: &Invocation) -> String {
    let mut rendered = String::new();
    for segment in &parsed.segments {
        match segment {
            TemplateSegment::Text(text) => rendered.push_str(text),
            TemplateSegment::Placeholder { raw, fallbacks } => {
                match resolve_placeholder(invocation, fallbacks) {
                    Some(value) => rendered.push_str(&value),
                    None => {
                        rendered.push('{');
                        rendered.push_str(raw);
                        rendered.push('}');
                    }
                }
            }
        }
    }
    rendered
}

pub(crate) fn render_template(source: &str, invocation: &Invocation) -> String {
    render(&parse_template(source), invocation)
}

/// Unknown keys keep the placeholder visible; known-but-empty keys render empty.
fn resolve_placeholder(invocation: &Invocation, fallbacks: &[String]) -> Option<String> {
    let mut recognized_any = false;
    for key in fallbacks {
        if let Some(value) = invocation.lookup(key) {
            recognized_any = true;
            let text = value_text(value);
            if !text.is_empty() {
                return Some(text);
            }
        }
    }
    recognized_any.then(String::new)
}

fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn flush_text(segments: &mut Vec<TemplateSegment>, text_buffer: &mut String) {
    if text_buffer.is_empty() {
        return;
    }
    segments.push(TemplateSegment::Text(std::mem::take(text_buffer)));
}

/// Consumes through `terminal`; hands back what was read if it never appears.
fn read_until(
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
    terminal: char,
) -> Result<String, String> {
    let mut collected = String::new();
    for ch in chars.by_ref() {
        if ch == terminal {
            return Ok(collected);
        }
        collected.push(ch);
    }
    Err(collected)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::render_template;
    use crate::method_list::params::{bind_params, Invocation, ParamSpec};

    fn invocation() -> Invocation {
        bind_params(
            &[ParamSpec::new("user"), ParamSpec::new("count")],
            vec![json!("ada"), json!(3), json!(null)],
        )
        .expect("binding should succeed")
    }

    #[test]
    fn test_plain_text_passthrough() {
        assert_eq!(render_template("Saved.", &invocation()), "Saved.");
    }

    #[test]
    fn test_named_and_positional_placeholders() {
        assert_eq!(
            render_template("{user} has {count} items ({1})", &invocation()),
            "ada has 3 items (3)"
        );
    }

    #[test]
    fn test_fallback_skips_empty_values() {
        assert_eq!(render_template("[{2;user}]", &invocation()), "[ada]");
        assert_eq!(render_template("[{2}]", &invocation()), "[]");
    }

    #[test]
    fn test_unknown_key_stays_visible() {
        assert_eq!(
            render_template("hello {missing}", &invocation()),
            "hello {missing}"
        );
    }

    #[test]
    fn test_escapes_and_malformed_placeholders() {
        assert_eq!(
            render_template("\\{user\\} {user;} {open", &invocation()),
            "{user} {user;} {open"
        );
        assert_eq!(render_template("a\\nb", &invocation()), "a\nb");
    }
}
