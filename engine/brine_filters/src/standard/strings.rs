//! String filters.
//!
//! Inputs arrive through the `Str` slot, so numbers and `Nil` have already
//! been rendered (`Nil` as `""`); the functions here work on plain `&str`.

use std::sync::LazyLock;

use brine_value::Value;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::Regex;

use crate::filter::{str_arg, string2_filter, string3_filter, string_filter, Filter};
use crate::registry::FilterRegistry;
use crate::signature::Slot;

/// Form encoding: unreserved characters stay literal, space becomes `+`.
const FORM: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b' ');

static HTML_TAGS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script.*?</script>|<!--.*?-->|<style.*?</style>|<.*?>")
        .unwrap_or_else(|e| panic!("invalid tag pattern: {e}"))
});

/// Entity references that `escape_once` must not double-escape, as they
/// appear after a first escaping pass: `&name;`, `&#123;`, `&#x1f;`.
static ESCAPED_ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&amp;((?:[A-Za-z][A-Za-z0-9]*|#[0-9]+|#[xX][0-9a-fA-F]+);)")
        .unwrap_or_else(|e| panic!("invalid entity pattern: {e}"))
});

pub fn register(registry: &mut FilterRegistry) {
    registry.register(string3_filter("replace", |s, find, with| {
        s.replace(find, with)
    }));
    registry.register(string3_filter("replace_first", |s, find, with| {
        s.replacen(find, with, 1)
    }));
    registry.register(string2_filter("remove", |s, what| s.replace(what, "")));
    registry.register(string2_filter("remove_first", |s, what| {
        s.replacen(what, "", 1)
    }));
    registry.register(string2_filter("append", |s, suffix| format!("{s}{suffix}")));
    registry.register(string2_filter("prepend", |s, prefix| format!("{prefix}{s}")));
    registry.register(string_filter("capitalize", capitalize));
    registry.register(string_filter("downcase", str::to_lowercase));
    registry.register(string_filter("upcase", str::to_uppercase));
    registry.register(string_filter("escape", escape));
    registry.register(string_filter("escape_once", escape_once));
    registry.register(string_filter("strip", |s| {
        s.trim_matches(|c: char| c.is_ascii_whitespace()).to_string()
    }));
    registry.register(string_filter("lstrip", |s| {
        s.trim_start_matches(|c: char| c.is_ascii_whitespace())
            .to_string()
    }));
    registry.register(string_filter("rstrip", |s| {
        s.trim_end_matches(|c: char| c.is_ascii_whitespace())
            .to_string()
    }));
    registry.register(string_filter("strip_html", |s| {
        HTML_TAGS.replace_all(s, "").into_owned()
    }));
    registry.register(string_filter("strip_newlines", |s| {
        s.replace(['\r', '\n'], "")
    }));
    registry.register(string_filter("newline_to_br", |s| {
        s.replace("\r\n", "<br />").replace('\n', "<br />")
    }));
    registry.register(slice_filter());
    registry.register(truncate_filter());
    registry.register(truncatewords_filter());
    registry.register(string_filter("url_encode", |s| {
        utf8_percent_encode(s, FORM).to_string().replace(' ', "+")
    }));
    registry.register(string_filter("url_decode", |s| {
        let plus_decoded = s.replace('+', " ");
        percent_encoding::percent_decode_str(&plus_decoded)
            .decode_utf8_lossy()
            .into_owned()
    }));
}

/// Uppercase the first character, leave the rest untouched.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// HTML-escape. Quotes escape to their numeric entities (`&#39;`/`&#34;`)
/// rather than named ones.
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape, then undo the double-escaping of anything that was already a
/// well-formed entity reference.
fn escape_once(s: &str) -> String {
    ESCAPED_ENTITY.replace_all(&escape(s), "&$1").into_owned()
}

fn slice_filter() -> Filter {
    Filter::build("slice")
        .input(Slot::string())
        .required(Slot::int())
        .optional(Slot::int())
        .run(|args| {
            let s = str_arg(args, 0);
            let Some(Value::Int(start)) = args.get(1) else {
                return Value::Nil;
            };
            let len = match args.get(2) {
                None => 1,
                Some(Value::Int(n)) => *n,
                Some(_) => return Value::Nil,
            };
            Value::string(slice(s, *start, len))
        })
}

/// Codepoint-indexed substring; negative starts count from the end, and an
/// out-of-range start yields the empty string.
fn slice(s: &str, start: i64, len: i64) -> String {
    let chars: Vec<char> = s.chars().collect();
    let n = chars.len() as i64;
    let begin = if start < 0 { n + start } else { start };
    if begin < 0 || begin >= n || len <= 0 {
        return String::new();
    }
    chars[begin as usize..]
        .iter()
        .take(len as usize)
        .collect()
}

fn truncate_filter() -> Filter {
    Filter::build("truncate")
        .input(Slot::string())
        .required(Slot::int())
        .optional(Slot::string())
        .run(|args| {
            let s = str_arg(args, 0);
            let Some(Value::Int(n)) = args.get(1) else {
                return Value::string(s);
            };
            let ellipsis = args.get(2).and_then(Value::as_str).unwrap_or("...");
            Value::string(truncate(s, *n, ellipsis))
        })
}

/// Keep the input when it fits; otherwise keep `n - len(ellipsis)`
/// codepoints and append the ellipsis, so the output is exactly `n` long.
fn truncate(s: &str, n: i64, ellipsis: &str) -> String {
    let n = usize::try_from(n).unwrap_or(0);
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= n {
        return s.to_string();
    }
    let keep = n.saturating_sub(ellipsis.chars().count());
    let mut out: String = chars[..keep.min(chars.len())].iter().collect();
    out.push_str(ellipsis);
    out
}

fn truncatewords_filter() -> Filter {
    Filter::build("truncatewords")
        .input(Slot::string())
        .required(Slot::int())
        .optional(Slot::string())
        .run(|args| {
            let s = str_arg(args, 0);
            let Some(Value::Int(n)) = args.get(1) else {
                return Value::string(s);
            };
            let ellipsis = args.get(2).and_then(Value::as_str).unwrap_or("...");
            Value::string(truncatewords(s, *n, ellipsis))
        })
}

/// Keep the first `n` whitespace-separated words. An input that is not
/// truncated comes back verbatim, leading whitespace included.
fn truncatewords(s: &str, n: i64, ellipsis: &str) -> String {
    let n = usize::try_from(n).unwrap_or(1).max(1);
    let words: Vec<&str> = s.split_whitespace().collect();
    if words.len() <= n {
        return s.to_string();
    }
    let mut out = words[..n].join(" ");
    out.push_str(ellipsis);
    out
}
