//! Module context: the ordered substitution map used to render templates.
//!
//! ## Placeholder tokens
//!
//! | Key        | Token replaced |
//! |------------|----------------|
//! | `baseName` | `{{baseName}}` |
//! | `{{name}}` | `{{name}}`     |
//!
//! Keys are stored bare, so `name` and `{{name}}` address the same entry.
//!
//! ## Edge cases
//!
//! - `{{UNKNOWN}}` stays as literal `{{UNKNOWN}}` (no error)
//! - `{{a}}{{a}}` has both occurrences replaced
//! - Substituted values are never re-scanned for tokens

use heck::{ToKebabCase, ToPascalCase, ToSnakeCase};
use indexmap::IndexMap;

use crate::domain::{error::DomainError, properties::ModuleProperties, validation::not_blank};

/// Frozen substitution context of a built module.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    variables: IndexMap<String, String>,
}

impl Context {
    pub fn builder() -> ContextBuilder {
        ContextBuilder::default()
    }

    /// Get a value by key (either spelling).
    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(bare_key(key)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.variables.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Replace every placeholder token in `content` in a single pass.
    pub fn render(&self, content: &str) -> String {
        let mut result = String::with_capacity(content.len());
        let mut rest = content;

        while let Some(start) = rest.find("{{") {
            let Some(len) = rest[start + 2..].find("}}") else {
                break;
            };
            let end = start + 2 + len + 2;

            result.push_str(&rest[..start]);
            match self.variables.get(&rest[start + 2..end - 2]) {
                Some(value) => {
                    result.push_str(value);
                    rest = &rest[end..];
                }
                // unknown: keep the braces and keep scanning after them
                None => {
                    result.push_str("{{");
                    rest = &rest[start + 2..];
                }
            }
        }

        result.push_str(rest);
        result
    }
}

/// Accumulates context entries while a module is being defined.
#[derive(Debug, Default)]
pub struct ContextBuilder {
    variables: IndexMap<String, String>,
}

impl ContextBuilder {
    /// Set `key` to `value`; a later `put` for the same key wins.
    pub fn put(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<&mut Self, DomainError> {
        let key: String = key.into();
        let key = bare_key(&key);
        not_blank("key", key)?;

        self.variables.insert(key.to_string(), value.into());
        Ok(self)
    }

    /// `put` every entry of `entries`, in iteration order.
    pub fn put_all<I, K, V>(&mut self, entries: I) -> Result<&mut Self, DomainError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (key, value) in entries {
            self.put(key, value)?;
        }
        Ok(self)
    }

    /// Seed the standard project variables derived from `properties`.
    ///
    /// | Variable          | Example          |
    /// |-------------------|------------------|
    /// | `baseName`        | `myApp`          |
    /// | `baseNameKebab`   | `my-app`         |
    /// | `baseNameSnake`   | `my_app`         |
    /// | `baseNamePascal`  | `MyApp`          |
    /// | `projectName`     | `My App`         |
    /// | `packageName`     | `com.acme.shop`  |
    /// | `packagePath`     | `com/acme/shop`  |
    pub fn with_project_defaults(&mut self, properties: &ModuleProperties) -> &mut Self {
        let base_name = properties.project_base_name();

        for (key, value) in [
            ("baseName", base_name.to_string()),
            ("baseNameKebab", base_name.to_kebab_case()),
            ("baseNameSnake", base_name.to_snake_case()),
            ("baseNamePascal", base_name.to_pascal_case()),
            ("projectName", properties.project_name().to_string()),
            ("packageName", properties.base_package().to_string()),
            ("packagePath", properties.package_path()),
        ] {
            self.variables.insert(key.to_string(), value);
        }

        self
    }

    pub fn build(self) -> Context {
        Context {
            variables: self.variables,
        }
    }
}

/// `name` and `{{name}}` both map to `name`.
fn bare_key(key: &str) -> &str {
    key.strip_prefix("{{")
        .and_then(|k| k.strip_suffix("}}"))
        .unwrap_or(key)
}
