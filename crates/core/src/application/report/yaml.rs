// YAML rendering for report blocks
//
// Values go through serde_yaml so they read back as the same strings.
// Only the `[a, b]` command list is assembled here.

/// Render `key: value` for a string value, every line prefixed by `margin`
///
/// Multi-line output from the emitter (literal blocks, folded long
/// scalars) keeps its own continuation indentation under the margin.
pub fn field(margin: &str, key: &str, value: &str) -> String {
    let rendered = scalar(value);
    let mut lines = rendered.lines();

    let mut out = format!("{}{}: {}\n", margin, key, lines.next().unwrap_or("''"));
    for line in lines {
        out.push_str(margin);
        out.push_str(line);
        out.push('\n');
    }
    out
}

/// Standalone YAML document for a string, without the trailing newline
pub fn scalar(value: &str) -> String {
    let rendered = match serde_yaml::to_string(value) {
        Ok(rendered) => rendered.trim_end_matches('\n').to_string(),
        Err(_) => return quoted(value),
    };

    // Single-line values stay on one line even past the emitter's width
    if !value.contains('\n') && rendered.contains('\n') {
        return if rendered.starts_with(['\'', '"']) {
            quoted(value)
        } else {
            value.to_string()
        };
    }
    rendered
}

/// Single-line item of a flow sequence
///
/// The emitter decides for block context, where `,[]{}` are harmless, so
/// plain items carrying those (or anything spanning lines) get quoted.
pub fn flow_item(value: &str) -> String {
    let rendered = scalar(value);
    let is_plain = !rendered.starts_with(['\'', '"']);

    if rendered.contains('\n')
        || (is_plain && rendered.contains(|c: char| matches!(c, ',' | '[' | ']' | '{' | '}')))
    {
        quoted(value)
    } else {
        rendered
    }
}

/// `[a, b, c]`
pub fn flow_sequence<S: AsRef<str>>(items: &[S]) -> String {
    let items: Vec<String> = items.iter().map(|item| flow_item(item.as_ref())).collect();
    format!("[{}]", items.join(", "))
}

/// Double-quoted scalar; JSON string escapes are valid YAML escapes
fn quoted(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}
