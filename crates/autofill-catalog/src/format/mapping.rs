//! YAML and JSON catalogs: nested mappings flattened into dotted keys.

use super::{CatalogAdapter, DumpOptions};
use crate::{Catalog, CatalogError};
use indexmap::IndexMap;

pub(super) struct YamlAdapter;

pub(super) struct JsonAdapter;

impl CatalogAdapter for YamlAdapter {
    fn parse(&self, content: &str, locale: &str, domain: &str) -> Result<Catalog, CatalogError> {
        let value: serde_yaml::Value = serde_yaml::from_str(content)?;
        let mut catalog = Catalog::new(locale, domain);
        match value {
            serde_yaml::Value::Mapping(_) => flatten_yaml(&mut catalog, None, &value),
            serde_yaml::Value::Null => {},
            _ => return Err(CatalogError::NotAMapping),
        }
        Ok(catalog)
    }

    fn dump(&self, catalog: &Catalog, _options: &DumpOptions) -> Result<String, CatalogError> {
        Ok(serde_yaml::to_string(&flat_entries(catalog))?)
    }
}

impl CatalogAdapter for JsonAdapter {
    fn parse(&self, content: &str, locale: &str, domain: &str) -> Result<Catalog, CatalogError> {
        let value: serde_json::Value = serde_json::from_str(content)?;
        let mut catalog = Catalog::new(locale, domain);
        match value {
            serde_json::Value::Object(_) => flatten_json(&mut catalog, None, &value),
            _ => return Err(CatalogError::NotAMapping),
        }
        Ok(catalog)
    }

    fn dump(&self, catalog: &Catalog, _options: &DumpOptions) -> Result<String, CatalogError> {
        let mut out = serde_json::to_string_pretty(&flat_entries(catalog))?;
        out.push('\n');
        Ok(out)
    }
}

fn flat_entries(catalog: &Catalog) -> IndexMap<&str, &str> {
    catalog.entries().collect()
}

fn join_key(prefix: Option<&str>, key: &str) -> String {
    match prefix {
        Some(prefix) => format!("{prefix}.{key}"),
        None => key.to_string(),
    }
}

fn flatten_yaml(catalog: &mut Catalog, prefix: Option<&str>, value: &serde_yaml::Value) {
    use serde_yaml::Value;

    match value {
        Value::Mapping(map) => {
            for (key, child) in map {
                let key = match key {
                    Value::String(s) => s.clone(),
                    Value::Number(n) => n.to_string(),
                    Value::Bool(b) => b.to_string(),
                    _ => continue,
                };
                flatten_yaml(catalog, Some(&join_key(prefix, &key)), child);
            }
        },
        Value::Sequence(items) => {
            for (index, child) in items.iter().enumerate() {
                flatten_yaml(catalog, Some(&join_key(prefix, &index.to_string())), child);
            }
        },
        Value::Tagged(tagged) => flatten_yaml(catalog, prefix, &tagged.value),
        scalar => {
            if let Some(key) = prefix {
                let text = match scalar {
                    Value::String(s) => s.clone(),
                    Value::Number(n) => n.to_string(),
                    Value::Bool(b) => b.to_string(),
                    _ => String::new(),
                };
                catalog.set(key, text);
            }
        },
    }
}

fn flatten_json(catalog: &mut Catalog, prefix: Option<&str>, value: &serde_json::Value) {
    use serde_json::Value;

    match value {
        Value::Object(map) => {
            for (key, child) in map {
                flatten_json(catalog, Some(&join_key(prefix, key)), child);
            }
        },
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                flatten_json(catalog, Some(&join_key(prefix, &index.to_string())), child);
            }
        },
        scalar => {
            if let Some(key) = prefix {
                let text = match scalar {
                    Value::String(s) => s.clone(),
                    Value::Null => String::new(),
                    other => other.to_string(),
                };
                catalog.set(key, text);
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_nested_keys_are_flattened() {
        let content = "welcome: Welcome\nuser:\n  login: Log in\n  count: 3\n";
        let catalog = YamlAdapter.parse(content, "en", "messages").unwrap();

        let entries: Vec<_> = catalog.entries().collect();
        assert_eq!(
            entries,
            vec![("welcome", "Welcome"), ("user.login", "Log in"), ("user.count", "3")]
        );
    }

    #[test]
    fn test_yaml_rejects_scalar_root() {
        let result = YamlAdapter.parse("just text", "en", "messages");
        assert!(matches!(result, Err(CatalogError::NotAMapping)));
    }

    #[test]
    fn test_yaml_dump_reloads_with_same_order() {
        let mut catalog = Catalog::new("de", "messages");
        catalog.set("zeta", "Z: with colon");
        catalog.set("alpha", "");

        let dumped = YamlAdapter.dump(&catalog, &DumpOptions::default()).unwrap();
        let reloaded = YamlAdapter.parse(&dumped, "de", "messages").unwrap();
        assert_eq!(reloaded, catalog);
    }

    #[test]
    fn test_json_nested_keys_are_flattened() {
        let content = r#"{"b": "B", "a": {"x": "AX", "n": null}}"#;
        let catalog = JsonAdapter.parse(content, "en", "messages").unwrap();

        let entries: Vec<_> = catalog.entries().collect();
        assert_eq!(entries, vec![("b", "B"), ("a.x", "AX"), ("a.n", "")]);
    }

    #[test]
    fn test_json_dump_is_pretty_and_flat() {
        let mut catalog = Catalog::new("de", "messages");
        catalog.set("welcome", "Willkommen");
        catalog.set("user.login", "Anmelden");

        let dumped = JsonAdapter.dump(&catalog, &DumpOptions::default()).unwrap();
        insta::assert_snapshot!(dumped, @r#"
        {
          "welcome": "Willkommen",
          "user.login": "Anmelden"
        }
        "#);
    }
}
