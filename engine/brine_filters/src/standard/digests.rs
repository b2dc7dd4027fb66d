//! Digest and HMAC filters.
//!
//! Inputs digest their canonical rendering (`100` and `"100"` hash the
//! same, `100.01` hashes its shortest decimal form). The empty-input and
//! empty-key rules look odd cryptographically but are contract: existing
//! templates depend on `""` in, `""` out.

use std::fmt::Write;

use brine_value::Value;
use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use md5::{Digest, Md5};
use sha1::Sha1;
use sha2::Sha256;

use crate::filter::{str_arg, Filter};
use crate::registry::FilterRegistry;
use crate::signature::Slot;

pub fn register(registry: &mut FilterRegistry) {
    registry.register(digest_filter::<Md5>("md5"));
    registry.register(digest_filter::<Sha1>("sha1"));
    registry.register(digest_filter::<Sha256>("sha256"));
    registry.register(hmac_filter("hmac", hmac_hex::<Hmac<Md5>>));
    registry.register(hmac_filter("hmac_sha1", hmac_hex::<Hmac<Sha1>>));
    registry.register(hmac_filter("hmac_sha256", hmac_hex::<Hmac<Sha256>>));
}

fn hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(out, "{b:02x}");
    }
    out
}

/// Lowercase hex digest of the rendered input; empty input stays empty
/// rather than producing the digest of the empty string.
fn digest_filter<D: Digest + 'static>(name: &str) -> Filter {
    Filter::build(name).input(Slot::string()).run(|args| {
        let s = str_arg(args, 0);
        if s.is_empty() {
            return Value::string("");
        }
        Value::string(hex(D::digest(s.as_bytes()).as_slice()))
    })
}

fn hmac_hex<M: Mac + KeyInit>(msg: &str, key: &str) -> String {
    let Ok(mut mac) = <M as KeyInit>::new_from_slice(key.as_bytes()) else {
        return String::new();
    };
    mac.update(msg.as_bytes());
    hex(mac.finalize().into_bytes().as_slice())
}

/// Keys may be strings or numbers (rendered canonically); any other kind,
/// an empty key, or an empty message yields the empty string.
fn hmac_filter(name: &str, f: fn(&str, &str) -> String) -> Filter {
    Filter::build(name)
        .input(Slot::string())
        .required(Slot::any())
        .run(move |args| {
            let msg = str_arg(args, 0);
            let Some(key) = key_string(&args[1]) else {
                return Value::string("");
            };
            if msg.is_empty() || key.is_empty() {
                return Value::string("");
            }
            Value::string(f(msg, &key))
        })
}

fn key_string(v: &Value) -> Option<String> {
    match v {
        Value::Str(s) => Some(s.to_string()),
        Value::Int(n) => Some(n.to_string()),
        Value::Float(f) => Some(f.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> FilterRegistry {
        let mut r = FilterRegistry::new();
        register(&mut r);
        r
    }

    fn apply(r: &FilterRegistry, name: &str, args: &[Value]) -> Value {
        r.apply(name, args).unwrap()
    }

    const MSG: &str = "Take my protein pills and put my helmet on";

    #[test]
    fn test_md5() {
        let r = registry();
        assert_eq!(
            apply(&r, "md5", &[Value::string(MSG)]),
            Value::string("505a1a407670a93d9ef2cf34960002f9")
        );
        // Numbers digest their canonical rendering.
        assert_eq!(
            apply(&r, "md5", &[Value::Int(100)]),
            Value::string("f899139df5e1059396431415e770c6dd")
        );
        assert_eq!(
            apply(&r, "md5", &[Value::Float(100.01)]),
            Value::string("e74f9831767648ecdd211c3f8cd85b86")
        );
    }

    #[test]
    fn test_sha_family_empty_input() {
        let r = registry();
        assert_eq!(apply(&r, "sha1", &[Value::string("")]), Value::string(""));
        assert_eq!(apply(&r, "sha256", &[Value::string("")]), Value::string(""));
        assert_eq!(
            apply(&r, "sha1", &[Value::string(MSG)]),
            Value::string("07f3b4973325af9109399ead74f2180bcaefa4c0")
        );
        assert_eq!(
            apply(&r, "sha256", &[Value::string(MSG)]),
            Value::string("b19c3d04c1b80ae9acd15227c0dde0cb6f5755995afa3c846a3473ac42de6f63")
        );
    }

    #[test]
    fn test_hmac_vectors() {
        let r = registry();
        assert_eq!(
            apply(&r, "hmac", &[Value::string(MSG), Value::string("key")]),
            Value::string("5b74077685d98d1e1d03cd289e2c2bfc")
        );
        assert_eq!(
            apply(&r, "hmac_sha1", &[Value::string(MSG), Value::string("key")]),
            Value::string("fca4135e0bc4d4bcdccfd0bd98edc30d3d7ac629")
        );
        assert_eq!(
            apply(&r, "hmac_sha256", &[Value::string(MSG), Value::string("key")]),
            Value::string("111fce4b586c1c54804196bbc014e45005958fcaf5462fa206ad5856811686f5")
        );
    }

    #[test]
    fn test_hmac_numeric_keys() {
        let r = registry();
        assert_eq!(
            apply(&r, "hmac", &[Value::string(MSG), Value::Int(100)]),
            Value::string("3494f6a7895d9e8084343e1020984ba6")
        );
        assert_eq!(
            apply(&r, "hmac", &[Value::string(MSG), Value::Float(100.01)]),
            Value::string("c1ef31ab6b3630ffb2e6842a600bf572")
        );
    }

    #[test]
    fn test_hmac_degenerate_cases() {
        let r = registry();
        // Empty message, empty key, or a non-scalar key all collapse to "".
        assert_eq!(
            apply(&r, "hmac", &[Value::string(""), Value::string("key")]),
            Value::string("")
        );
        assert_eq!(
            apply(&r, "hmac", &[Value::string(MSG), Value::string("")]),
            Value::string("")
        );
        assert_eq!(
            apply(&r, "hmac", &[Value::string(MSG), Value::Bool(true)]),
            Value::string("")
        );
    }
}
