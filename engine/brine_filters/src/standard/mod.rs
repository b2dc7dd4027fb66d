//! Standard filter library.
//!
//! One module per filter family; [`register`] installs the whole set into a
//! registry. Hosts layer their own filters on top (registration is
//! last-writer-wins, so overriding a standard filter is just registering
//! the replacement).

mod arrays;
mod dates;
mod debug;
mod digests;
mod numbers;
mod sets;
mod strings;
mod values;

use crate::registry::FilterRegistry;

/// Install the full standard library.
pub fn register(registry: &mut FilterRegistry) {
    values::register(registry);
    arrays::register(registry);
    strings::register(registry);
    numbers::register(registry);
    digests::register(registry);
    dates::register(registry);
    debug::register(registry);
    sets::register(registry);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_installs_everything() {
        let mut registry = FilterRegistry::new();
        register(&mut registry);
        for name in [
            "default", "map", "compact", "join", "split", "first", "last", "reverse", "sort",
            "sort_natural", "uniq", "size", "replace", "replace_first", "remove", "remove_first",
            "append", "prepend", "capitalize", "downcase", "upcase", "escape", "escape_once",
            "strip", "lstrip", "rstrip", "strip_html", "strip_newlines", "newline_to_br", "slice",
            "truncate", "truncatewords", "url_encode", "url_decode", "to_number", "abs", "ceil",
            "floor", "round", "plus", "minus", "times", "divided_by", "modulo", "at_least",
            "at_most", "md5", "sha1", "sha256", "hmac", "hmac_sha1", "hmac_sha256", "date",
            "inspect", "type", "startsWith", "endsWith", "setContains", "setContainsAll",
            "booleanFormat",
        ] {
            assert!(registry.contains(name), "missing filter: {name}");
        }
    }
}
