//! Environment variable expansion for override values
//!
//! Shell-style `$NAME` and `${NAME}` references are replaced with the value
//! of the named variable at load time. Unset variables expand to the empty
//! string. Anything that is not a well-formed reference (a trailing `$`,
//! `${` with no closing brace, `${}`, `$` followed by punctuation) is copied
//! through unchanged; expansion never fails.

use std::collections::BTreeMap;

/// Expand references against the current process environment
#[must_use]
pub fn expand_env(input: &str) -> String {
    expand_with(input, process_env)
}

/// Expand references, resolving names through `lookup`
///
/// `lookup` returning `None` means the variable is unset.
pub fn expand_with<F>(input: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let bytes = input.as_bytes();
    let mut out = String::with_capacity(input.len());
    // Start of the literal run not yet copied to `out`
    let mut copied = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'$' {
            i += 1;
            continue;
        }
        match reference_at(&input[i + 1..]) {
            Some((name, width)) => {
                out.push_str(&input[copied..i]);
                out.push_str(&lookup(name).unwrap_or_default());
                i += 1 + width;
                copied = i;
            }
            None => i += 1,
        }
    }

    out.push_str(&input[copied..]);
    out
}

/// Expand every value of an override mapping; keys are left untouched
pub fn expand_override_values<F>(values: &BTreeMap<String, String>, lookup: F) -> BTreeMap<String, String>
where
    F: Fn(&str) -> Option<String>,
{
    values
        .iter()
        .map(|(key, value)| (key.clone(), expand_with(value, &lookup)))
        .collect()
}

/// Lookup against the process environment
///
/// Values that are not valid UTF-8 are converted lossily.
pub(crate) fn process_env(name: &str) -> Option<String> {
    std::env::var_os(name).map(|v| v.to_string_lossy().into_owned())
}

/// Parse the reference that follows a `$`
///
/// Returns the variable name and how many bytes after the `$` it spans,
/// or `None` when the text is not a reference.
fn reference_at(rest: &str) -> Option<(&str, usize)> {
    let first = *rest.as_bytes().first()?;
    match first {
        b'{' => {
            let close = rest.find('}')?;
            let name = &rest[1..close];
            if name.is_empty() {
                return None;
            }
            Some((name, close + 1))
        }
        c if is_special(c) => Some((&rest[..1], 1)),
        _ => {
            let len = rest.bytes().take_while(|c| is_name_byte(*c)).count();
            if len == 0 {
                return None;
            }
            Some((&rest[..len], len))
        }
    }
}

/// Single-character shell parameters (`$1`, `$?`, `$@`...)
fn is_special(c: u8) -> bool {
    matches!(c, b'*' | b'#' | b'$' | b'@' | b'!' | b'?' | b'-' | b'0'..=b'9')
}

fn is_name_byte(c: u8) -> bool {
    c == b'_' || c.is_ascii_alphanumeric()
}
