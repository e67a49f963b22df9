//! Placeholder substitution in localized stat labels.
//!
//! Labels use printf-like placeholders (`%d`, `%+d`, `%d%%`, `%s`, `%i`).
//! Some languages number them instead (`%0`, `%+1`, ...).

const SEQUENCED_SLOTS: usize = 4;

/// Fill the placeholders of `label` with `values`, in order.
pub fn substitute(label: &str, values: &[String]) -> String {
    if label.contains("%0") || label.contains("%+0") {
        return substitute_sequenced(label, values);
    }

    let mut previous = label.to_string();
    for value in values {
        let signed = format!("+{value}");
        let mut output = replace_first(&previous, "%d%%", &format!("{value}%"));
        output = replace_first(&output, "%+d%%", &format!("{signed}%"));
        output = replace_first(&output, "%+d", &signed);
        if output == previous {
            output = replace_first_plain(&previous, value);
        }
        previous = output;
    }
    previous
}

fn substitute_sequenced(label: &str, values: &[String]) -> String {
    let mut output = label.to_string();
    for (slot, value) in values.iter().enumerate().take(SEQUENCED_SLOTS) {
        output = output
            .replace(&format!("%+{slot}"), &format!("+{value}"))
            .replace(&format!("%{slot}"), value);
    }
    output
}

fn replace_first(haystack: &str, needle: &str, replacement: &str) -> String {
    match haystack.find(needle) {
        Some(start) => {
            let mut out = String::with_capacity(haystack.len() + replacement.len());
            out.push_str(&haystack[..start]);
            out.push_str(replacement);
            out.push_str(&haystack[start + needle.len()..]);
            out
        }
        None => haystack.to_string(),
    }
}

// Earliest of %d, %i or %s.
fn replace_first_plain(haystack: &str, replacement: &str) -> String {
    let bytes = haystack.as_bytes();
    let found = bytes
        .windows(2)
        .position(|pair| pair[0] == b'%' && matches!(pair[1], b'd' | b'i' | b's'));
    match found {
        Some(start) => {
            let mut out = String::with_capacity(haystack.len() + replacement.len());
            out.push_str(&haystack[..start]);
            out.push_str(replacement);
            out.push_str(&haystack[start + 2..]);
            out
        }
        None => haystack.to_string(),
    }
}
