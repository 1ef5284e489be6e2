use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const BUILTIN_TEMPLATE: &str = include_str!("../../templates/testbench.vhd.tpl");

lazy_static! {
    // {{#name}}...{{/name}} renders when `name` is non-empty, {{^name}} when empty.
    // A tag directly followed by a newline swallows it.
    static ref SECTION_RE: Regex = Regex::new(
        r"(?s)\{\{([#^])([[:word:]]+)\}\}\n?(.*?)\{\{/([[:word:]]+)\}\}\n?"
    )
    .expect("section regex is valid");
    static ref PLACEHOLDER_RE: Regex =
        Regex::new(r"\{\{\s*([[:word:]]+)\s*\}\}").expect("placeholder regex is valid");
    static ref STRAY_TAG_RE: Regex =
        Regex::new(r"\{\{\s*[#^/]\s*([[:word:]]*)\s*\}\}").expect("stray tag regex is valid");
}

#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("Failed to read template {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unknown placeholder '{0}'")]
    UnknownPlaceholder(String),

    #[error("Section '{open}' closed by '{close}'")]
    MismatchedSection { open: String, close: String },

    #[error("Section tag '{0}' has no matching open or close tag")]
    UnbalancedSection(String),
}

/// Named values available to a template.
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    values: BTreeMap<String, String>,
}

impl TemplateContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) -> &mut Self {
        self.values.insert(key.to_string(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    fn is_set(&self, key: &str) -> Result<bool, TemplateError> {
        self.get(key)
            .map(|v| !v.is_empty())
            .ok_or_else(|| TemplateError::UnknownPlaceholder(key.to_string()))
    }
}

/// Placeholder template for the generated testbench.
///
/// Multi-line values keep the indentation of the line their placeholder sits
/// on, so a block dropped into a port clause lines up under its first entry.
#[derive(Debug, Clone)]
pub struct HarnessTemplate {
    source: String,
}

impl HarnessTemplate {
    pub fn new(source: String) -> Self {
        Self { source }
    }

    pub fn builtin() -> Self {
        Self::new(BUILTIN_TEMPLATE.to_string())
    }

    pub fn from_file(path: &Path) -> Result<Self, TemplateError> {
        let source = std::fs::read_to_string(path).map_err(|source| TemplateError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(source))
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn render(&self, ctx: &TemplateContext) -> Result<String, TemplateError> {
        let expanded = expand_sections(&self.source, ctx)?;

        if let Some(cap) = STRAY_TAG_RE.captures(&expanded) {
            return Err(TemplateError::UnbalancedSection(cap[0].to_string()));
        }

        substitute(&expanded, ctx)
    }
}

fn expand_sections(source: &str, ctx: &TemplateContext) -> Result<String, TemplateError> {
    let mut output = String::with_capacity(source.len());
    let mut last = 0;

    for cap in SECTION_RE.captures_iter(source) {
        let whole = cap.get(0).map(|m| m.range()).unwrap_or(0..0);
        let (kind, open, body, close) = (&cap[1], &cap[2], &cap[3], &cap[4]);

        if open != close {
            return Err(TemplateError::MismatchedSection {
                open: open.to_string(),
                close: close.to_string(),
            });
        }

        output.push_str(&source[last..whole.start]);
        let set = ctx.is_set(open)?;
        if set == (kind == "#") {
            output.push_str(body);
        }
        last = whole.end;
    }

    output.push_str(&source[last..]);
    Ok(output)
}

fn substitute(source: &str, ctx: &TemplateContext) -> Result<String, TemplateError> {
    let mut output = String::with_capacity(source.len());
    let mut last = 0;

    for cap in PLACEHOLDER_RE.captures_iter(source) {
        let whole = cap.get(0).map(|m| m.range()).unwrap_or(0..0);
        let key = &cap[1];
        let value = ctx
            .get(key)
            .ok_or_else(|| TemplateError::UnknownPlaceholder(key.to_string()))?;

        output.push_str(&source[last..whole.start]);

        let line_start = source[..whole.start].rfind('\n').map(|i| i + 1).unwrap_or(0);
        let prefix = &source[line_start..whole.start];
        if !prefix.is_empty() && prefix.trim().is_empty() {
            output.push_str(&value.replace('\n', &format!("\n{}", prefix)));
        } else {
            output.push_str(value);
        }

        last = whole.end;
    }

    output.push_str(&source[last..]);
    Ok(output)
}
