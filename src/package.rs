use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::utils::{Error, IoContext as _, Result};

/// Checks a name against the npm package naming rules, with an optional
/// `@scope/` prefix.
pub fn is_valid_package_name(name: &str) -> bool {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN
        .get_or_init(|| {
            Regex::new(r"^(?:@[a-z0-9\-*~][a-z0-9\-._~]*/)?[a-z0-9\-~][a-z0-9\-._~]*$").unwrap()
        })
        .is_match(name)
}

/// Turns an arbitrary project name into something [`is_valid_package_name`]
/// accepts (unless the result is empty).
pub fn sanitize_package_name(name: &str) -> String {
    static INVALID: OnceLock<Regex> = OnceLock::new();
    let invalid = INVALID.get_or_init(|| Regex::new(r"[^a-z0-9\-~]+").unwrap());
    let collapsed = name
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-");
    let stripped = collapsed.strip_prefix(['.', '_']).unwrap_or(&collapsed);
    invalid.replace_all(stripped, "-").into_owned()
}

pub fn validate_package_name(name: &str) -> Result<()> {
    if is_valid_package_name(name) {
        Ok(())
    } else {
        Err(Error::InvalidPackageName {
            name: name.to_string(),
        })
    }
}

/// A package descriptor (`package.json`, `deno.json`). Only `name` is ever
/// touched; every other field keeps its value and position.
#[derive(Debug, Clone)]
pub struct PackageDescriptor {
    fields: Map<String, Value>,
}

impl PackageDescriptor {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).on("read package descriptor", path)?;
        Self::parse(&contents, path)
    }

    pub fn parse(contents: &str, path: impl AsRef<Path>) -> Result<Self> {
        match serde_json::from_str::<Value>(contents)? {
            Value::Object(fields) => Ok(Self { fields }),
            _ => Err(Error::InvalidDescriptor {
                path: path.as_ref().to_path_buf(),
            }),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.fields.get("name").and_then(Value::as_str)
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.fields.insert("name".into(), Value::String(name.into()));
    }

    /// Two-space indented JSON with a trailing newline.
    pub fn to_pretty_string(&self) -> Result<String> {
        let mut out = serde_json::to_string_pretty(&self.fields)?;
        out.push('\n');
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_and_scoped_names() {
        for name in ["my-app", "app~1", "a.b_c", "@scope/pkg", "@*/x", "0day"] {
            assert!(is_valid_package_name(name), "{name}");
        }
    }

    #[test]
    fn rejects_uppercase_leading_dots_and_symbols() {
        for name in ["My-App", ".hidden", "_private", "my app", "a!b", "", "@scope/", "@Scope/x"] {
            assert!(!is_valid_package_name(name), "{name}");
        }
    }

    #[test]
    fn sanitize_examples() {
        assert_eq!(sanitize_package_name("My App"), "my-app");
        assert_eq!(sanitize_package_name("  Hello   World  "), "hello-world");
        assert_eq!(sanitize_package_name(".hidden"), "hidden");
        assert_eq!(sanitize_package_name("_x.y"), "x-y");
        assert_eq!(sanitize_package_name("My App!"), "my-app-");
        assert_eq!(sanitize_package_name("a/b@c"), "a-b-c");
    }

    #[test]
    fn sanitize_is_idempotent_and_valid() {
        for raw in [
            "My App", "..dots", "__under", "Ünïcödé name", "a\tb\nc", "x!!!y", "-", "~tilde",
            "@scope/Pkg", "   ", "",
        ] {
            let once = sanitize_package_name(raw);
            assert_eq!(sanitize_package_name(&once), once, "input: {raw:?}");
            if !once.is_empty() {
                assert!(is_valid_package_name(&once), "input: {raw:?} -> {once:?}");
            }
        }
    }

    #[test]
    fn set_name_preserves_key_order() {
        let src = r#"{"private": true, "name": "template", "version": "0.0.0", "scripts": {"dev": "vite"}}"#;
        let mut descriptor = PackageDescriptor::parse(src, "package.json").unwrap();
        descriptor.set_name("my-app");
        assert_eq!(descriptor.name(), Some("my-app"));
        let out = descriptor.to_pretty_string().unwrap();
        assert_eq!(
            out,
            "{\n  \"private\": true,\n  \"name\": \"my-app\",\n  \"version\": \"0.0.0\",\n  \"scripts\": {\n    \"dev\": \"vite\"\n  }\n}\n"
        );
    }

    #[test]
    fn non_object_descriptor_is_rejected() {
        let err = PackageDescriptor::parse("[1, 2]", "package.json").unwrap_err();
        assert!(matches!(err, Error::InvalidDescriptor { .. }));
    }
}
