//! Text rendering of exposed component data for the data panel.

use serde_json::Value;

const INDENT: &str = "  ";

/// Pretty-prints `value`, folding objects and arrays nested at `collapse_depth`
/// or deeper into a one-line summary.
pub(crate) fn render_data_tree(value: &Value, collapse_depth: usize) -> String {
    let mut out = String::new();
    write_value(&mut out, value, 0, collapse_depth);
    out
}

fn write_value(out: &mut String, value: &Value, depth: usize, collapse_depth: usize) {
    match value {
        Value::Object(entries) if entries.is_empty() => out.push_str("{}"),
        Value::Array(items) if items.is_empty() => out.push_str("[]"),
        Value::Object(entries) if depth >= collapse_depth => {
            out.push_str(&format!("{{…}} {}", item_count(entries.len())));
        }
        Value::Array(items) if depth >= collapse_depth => {
            out.push_str(&format!("[…] {}", item_count(items.len())));
        }
        Value::Object(entries) => {
            out.push_str("{\n");
            let last = entries.len() - 1;
            for (index, (key, child)) in entries.iter().enumerate() {
                push_indent(out, depth + 1);
                out.push_str(&Value::String(key.clone()).to_string());
                out.push_str(": ");
                write_value(out, child, depth + 1, collapse_depth);
                if index != last {
                    out.push(',');
                }
                out.push('\n');
            }
            push_indent(out, depth);
            out.push('}');
        }
        Value::Array(items) => {
            out.push_str("[\n");
            let last = items.len() - 1;
            for (index, child) in items.iter().enumerate() {
                push_indent(out, depth + 1);
                write_value(out, child, depth + 1, collapse_depth);
                if index != last {
                    out.push(',');
                }
                out.push('\n');
            }
            push_indent(out, depth);
            out.push(']');
        }
        scalar => out.push_str(&scalar.to_string()),
    }
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

fn item_count(count: usize) -> String {
    if count == 1 {
        "1 item".to_string()
    } else {
        format!("{count} items")
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::render_data_tree;

    #[test]
    fn test_scalars_and_empty_containers() {
        assert_eq!(render_data_tree(&json!(null), 2), "null");
        assert_eq!(render_data_tree(&json!("a\"b"), 2), "\"a\\\"b\"");
        assert_eq!(render_data_tree(&json!({}), 0), "{}");
        assert_eq!(render_data_tree(&json!([]), 0), "[]");
    }

    #[test]
    fn test_nested_values_fold_at_collapse_depth() {
        let value = json!({
            "methods": ["a", "b"],
            "temp": { "deep": { "x": 1 } }
        });
        assert_eq!(
            render_data_tree(&value, 2),
            "{\n  \"methods\": [\n    \"a\",\n    \"b\"\n  ],\n  \"temp\": {\n    \"deep\": {…} 1 item\n  }\n}"
        );
        assert_eq!(render_data_tree(&value, 0), "{…} 2 items");
    }
}
