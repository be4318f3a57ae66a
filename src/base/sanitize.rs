//! Type-expression key sanitization.

use once_cell::sync::Lazy;
use regex::Regex;

static NON_KEY_CHAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-zA-Z0-9_.]").unwrap());

/// Turn a raw type expression into an identifier-safe key.
///
/// Composite prefixes are rewritten into a `kind_subparts` form:
///
/// | input          | output            |
/// |----------------|-------------------|
/// | `[]*Foo`       | `slice_ptr_Foo`   |
/// | `[5]Baz`       | `array_5_Baz`     |
/// | `map[string]int` | `map_string_int` |
/// | `chan Bar`     | `chan_Bar`        |
/// | `func(int) error` | `func_int__error` |
///
/// Whatever is left after the prefixes has every character outside
/// `[a-zA-Z0-9_.]` replaced by `_`. The output only ever contains those
/// characters, so none of the prefixes can match it again and the function
/// is idempotent.
///
/// A `func(` signature is flattened once behind a single `func_`, so keys
/// for function types intentionally differ from the Go generator's
/// `func_func_...` form.
///
/// Prefix chains are consumed in a loop and map operands are queued on an
/// explicit stack, so arbitrarily deep nesting cannot exhaust the call stack.
pub fn sanitize_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 8);
    let mut pending = vec![Pending::Expr(key)];
    while let Some(item) = pending.pop() {
        match item {
            Pending::Separator => out.push('_'),
            Pending::Expr(expr) => sanitize_into(expr, &mut out, &mut pending),
        }
    }
    out
}

/// Work left for [`sanitize_key`], popped last-in first-out.
enum Pending<'a> {
    Expr(&'a str),
    Separator,
}

/// Emit the prefix chain of `key` into `out`. Map operands are pushed onto
/// `pending` instead of being visited recursively.
fn sanitize_into<'a>(mut key: &'a str, out: &mut String, pending: &mut Vec<Pending<'a>>) {
    loop {
        if let Some(element) = key.strip_prefix("[]") {
            out.push_str("slice_");
            key = element;
            continue;
        }

        if key.starts_with('[') {
            if let Some(end) = closing_bracket(key, 0) {
                out.push_str("array_");
                push_replaced(out, &key[1..end]);
                out.push('_');
                key = &key[end + 1..];
                continue;
            }
        }

        if let Some(signature) = key.strip_prefix("func(") {
            out.push_str("func_");
            push_replaced(out, signature);
            return;
        }

        if key.starts_with("map[") {
            if let Some(end) = closing_bracket(key, 3) {
                out.push_str("map_");
                pending.push(Pending::Expr(&key[end + 1..]));
                pending.push(Pending::Separator);
                pending.push(Pending::Expr(&key[4..end]));
                return;
            }
        }

        if let Some(element) = key.strip_prefix('*') {
            out.push_str("ptr_");
            key = element;
            continue;
        }

        if let Some(element) = key.strip_prefix("chan ") {
            out.push_str("chan_");
            key = element;
            continue;
        }

        push_replaced(out, key);
        return;
    }
}

fn push_replaced(out: &mut String, text: &str) {
    out.push_str(&NON_KEY_CHAR.replace_all(text, "_"));
}

/// Byte index of the `]` matching the `[` at `open`, honoring nesting.
fn closing_bracket(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (offset, byte) in text.bytes().enumerate().skip(open) {
        match byte {
            b'[' => depth += 1,
            b']' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(offset);
                }
            }
            _ => {}
        }
    }
    None
}
