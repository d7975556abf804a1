//! PHP array-literal catalogs (`<?php return [...];`).
//!
//! Only the subset translation files use is understood: string or integer keys,
//! scalar or nested-array values, `[...]` and `array(...)` syntax, and comments.
//! Nested arrays are flattened into dotted keys.

use super::{CatalogAdapter, DumpOptions};
use crate::{Catalog, CatalogError};

pub(super) struct PhpAdapter;

impl CatalogAdapter for PhpAdapter {
    fn parse(&self, content: &str, locale: &str, domain: &str) -> Result<Catalog, CatalogError> {
        let mut catalog = Catalog::new(locale, domain);
        let mut parser = Parser::new(content);
        parser.skip_to_return()?;
        parser.parse_array(&mut catalog, None)?;
        Ok(catalog)
    }

    fn dump(&self, catalog: &Catalog, _options: &DumpOptions) -> Result<String, CatalogError> {
        let mut out = String::from("<?php\n\nreturn [\n");
        for (key, text) in catalog.entries() {
            out.push_str(&format!("    {} => {},\n", quote(key), quote(text)));
        }
        out.push_str("];\n");
        Ok(out)
    }
}

fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn error(&self, message: impl Into<String>) -> CatalogError {
        CatalogError::Php {
            offset: self.pos,
            message: message.into(),
        }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_trivia(&mut self) {
        loop {
            let rest = self.rest();
            let trimmed = rest.trim_start();
            self.pos += rest.len() - trimmed.len();

            if trimmed.starts_with("//") || trimmed.starts_with('#') {
                let end = trimmed.find('\n').unwrap_or(trimmed.len());
                self.pos += end;
            } else if trimmed.starts_with("/*") {
                let end = trimmed.find("*/").map_or(trimmed.len(), |i| i + 2);
                self.pos += end;
            } else {
                break;
            }
        }
    }

    fn eat(&mut self, token: &str) -> bool {
        self.skip_trivia();
        if self.rest().starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: &str) -> Result<(), CatalogError> {
        if self.eat(token) {
            Ok(())
        } else {
            Err(self.error(format!("expected `{token}`")))
        }
    }

    fn skip_to_return(&mut self) -> Result<(), CatalogError> {
        match self.rest().find("return") {
            Some(index) => {
                self.pos += index + "return".len();
                Ok(())
            },
            None => Err(self.error("missing `return` statement")),
        }
    }

    fn parse_array(&mut self, catalog: &mut Catalog, prefix: Option<&str>) -> Result<(), CatalogError> {
        let close = if self.eat("[") {
            "]"
        } else if self.eat("array") {
            self.expect("(")?;
            ")"
        } else {
            return Err(self.error("expected an array literal"));
        };

        let mut next_index = 0usize;
        loop {
            if self.eat(close) {
                return Ok(());
            }

            let first = self.parse_scalar_or_array_start()?;
            if self.eat("=>") {
                let key = first.ok_or_else(|| self.error("array keys must be scalars"))?;
                if let Ok(index) = key.parse::<usize>() {
                    next_index = next_index.max(index + 1);
                }
                match self.parse_scalar_or_array_start()? {
                    Some(value) => store(catalog, prefix, &key, value),
                    None => self.parse_array(catalog, Some(&join(prefix, &key)))?,
                }
            } else {
                let key = next_index.to_string();
                next_index += 1;
                match first {
                    Some(value) => store(catalog, prefix, &key, value),
                    None => self.parse_array(catalog, Some(&join(prefix, &key)))?,
                }
            }

            if !self.eat(",") {
                self.expect(close)?;
                return Ok(());
            }
        }
    }

    /// Parse a scalar, or return `None` when an array literal starts here
    /// (the array itself is left unconsumed).
    fn parse_scalar_or_array_start(&mut self) -> Result<Option<String>, CatalogError> {
        self.skip_trivia();
        let rest = self.rest();
        if rest.starts_with('[') || rest.starts_with("array") {
            return Ok(None);
        }

        match self.peek() {
            Some('\'') => self.parse_single_quoted().map(Some),
            Some('"') => self.parse_double_quoted().map(Some),
            Some(c) if c.is_ascii_alphanumeric() || c == '-' || c == '.' => {
                let len = rest
                    .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '.' || c == '_'))
                    .unwrap_or(rest.len());
                let word = &rest[..len];
                self.pos += len;
                Ok(Some(match word.to_ascii_lowercase().as_str() {
                    "null" | "false" => String::new(),
                    "true" => "1".to_string(),
                    _ => word.to_string(),
                }))
            },
            _ => Err(self.error("expected a string, number or array")),
        }
    }

    fn parse_single_quoted(&mut self) -> Result<String, CatalogError> {
        self.bump();
        let mut out = String::new();
        loop {
            match self.bump() {
                Some('\\') => match self.peek() {
                    Some(c @ ('\\' | '\'')) => {
                        self.bump();
                        out.push(c);
                    },
                    _ => out.push('\\'),
                },
                Some('\'') => return Ok(out),
                Some(c) => out.push(c),
                None => return Err(self.error("unterminated string")),
            }
        }
    }

    fn parse_double_quoted(&mut self) -> Result<String, CatalogError> {
        self.bump();
        let mut out = String::new();
        loop {
            match self.bump() {
                Some('\\') => match self.bump() {
                    Some('n') => out.push('\n'),
                    Some('t') => out.push('\t'),
                    Some('r') => out.push('\r'),
                    Some(c @ ('\\' | '"' | '$')) => out.push(c),
                    Some(c) => {
                        out.push('\\');
                        out.push(c);
                    },
                    None => return Err(self.error("unterminated string")),
                },
                Some('"') => return Ok(out),
                Some(c) => out.push(c),
                None => return Err(self.error("unterminated string")),
            }
        }
    }
}

fn join(prefix: Option<&str>, key: &str) -> String {
    match prefix {
        Some(prefix) => format!("{prefix}.{key}"),
        None => key.to_string(),
    }
}

fn store(catalog: &mut Catalog, prefix: Option<&str>, key: &str, value: String) {
    catalog.set(join(prefix, key), value);
}
