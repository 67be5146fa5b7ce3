//! Args Renderer - render argument templates with Handlebars
//!
//! Templates are Handlebars, and also accept the dot-prefixed dialect:
//! `{{.file}}` field references, `{{if .x}}`/`{{with .x}}`/`{{else}}`/`{{end}}`
//! blocks, `{{- x -}}` trim markers and `{{/* ... */}}` comments. These are
//! rewritten to Handlebars before compiling; actions without a counterpart
//! are syntax errors rather than being rendered as unknown variables.

use std::collections::HashMap;
use std::sync::LazyLock;

use handlebars::{Handlebars, Template};
use regex::Regex;
use thiserror::Error;

use crate::error::{CmdgenError, Result};

static TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)\{\{(.*?)\}\}").unwrap());

static TAG_PARTS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^(~|-\s)?\s*(.*?)\s*(~|\s-)?$").unwrap());

static DOT_FIELD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(^|[\s(~{])\.([A-Za-z_])").unwrap());

const UNSUPPORTED_ACTIONS: &[&str] = &["range", "define", "template", "block", "break", "continue"];

/// Dot-prefixed action that cannot be rewritten to Handlebars
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DialectError {
    #[error("unsupported action '{0}'")]
    Unsupported(String),

    #[error("{{{{end}}}} without an open {{{{if}}}} or {{{{with}}}}")]
    UnmatchedEnd,

    #[error("unclosed {{{{{0}}}}}")]
    Unclosed(String),
}

/// Renders argument templates against a parameter map
pub struct ArgsRenderer {
    handlebars: Handlebars<'static>,
}

impl Default for ArgsRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ArgsRenderer {
    /// Create a renderer: missing keys render empty, output is not escaped
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(false);
        handlebars.register_escape_fn(handlebars::no_escape);
        Self { handlebars }
    }

    /// Compile `template` once, then render it against `params`
    ///
    /// `tool` names the catalog entry in errors.
    pub fn render(&self, tool: &str, template: &str, params: &HashMap<String, String>) -> Result<String> {
        let source = translate_template(template).map_err(|e| CmdgenError::TemplateSyntax {
            tool: tool.to_string(),
            source: Box::new(e),
        })?;

        let compiled = Template::compile(&source).map_err(|e| CmdgenError::TemplateSyntax {
            tool: tool.to_string(),
            source: Box::new(e),
        })?;

        let mut registry = self.handlebars.clone();
        registry.register_template(tool, compiled);
        registry.render(tool, params).map_err(|e| CmdgenError::TemplateExecution {
            tool: tool.to_string(),
            source: Box::new(e),
        })
    }
}

/// Rewrite the dot-prefixed dialect inside every tag to Handlebars
pub fn translate_template(template: &str) -> std::result::Result<String, DialectError> {
    let mut out = String::with_capacity(template.len());
    let mut open_blocks: Vec<&'static str> = Vec::new();
    let mut last = 0;

    for caps in TAG_REGEX.captures_iter(template) {
        let Some(tag) = caps.get(0) else { continue };
        out.push_str(&template[last..tag.start()]);
        out.push_str(&translate_tag(&caps[1], &mut open_blocks)?);
        last = tag.end();
    }
    out.push_str(&template[last..]);

    match open_blocks.pop() {
        Some(block) => Err(DialectError::Unclosed(block.to_string())),
        None => Ok(out),
    }
}

fn translate_tag(inner: &str, open_blocks: &mut Vec<&'static str>) -> std::result::Result<String, DialectError> {
    let Some(parts) = TAG_PARTS_REGEX.captures(inner) else {
        return Ok(format!("{{{{{inner}}}}}"));
    };
    let open_trim = if parts.get(1).is_some() { "~" } else { "" };
    let close_trim = if parts.get(3).is_some() { "~" } else { "" };
    let body = DOT_FIELD_REGEX.replace_all(&parts[2], "${1}${2}");

    if body.starts_with("/*") {
        return Ok(String::new());
    }

    let keyword = body.split_whitespace().next().unwrap_or("");
    let rest = body[keyword.len()..].trim_start();
    let body = match keyword {
        "if" | "with" => {
            let block = if keyword == "if" { "if" } else { "with" };
            open_blocks.push(block);
            format!("#{block} {rest}")
        }
        "end" => match open_blocks.pop() {
            Some(block) => format!("/{block}"),
            None => return Err(DialectError::UnmatchedEnd),
        },
        "." => "this".to_string(),
        k if UNSUPPORTED_ACTIONS.contains(&k) => return Err(DialectError::Unsupported(k.to_string())),
        _ => body.to_string(),
    };

    Ok(format!("{{{{{open_trim}{body}{close_trim}}}}}"))
}
