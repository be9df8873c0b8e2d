// src/pipeline/template.rs

//! Placeholder substitution.
//!
//! Templates use the literal form `${NAMESPACE.name}` with namespaces `ARG`
//! (user variables), `ROOT` (channel fields) and `ITEM` (item fields).
//! Substitution is iterative: find the first remaining placeholder, replace
//! every occurrence of that exact text, and rescan the updated string until
//! nothing matches. A resolved value that itself contains placeholder syntax
//! is therefore rescanned; callers must not rely on that. Malformed
//! placeholders (e.g. an unterminated `${`) never match and are left
//! verbatim.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::Result;
use crate::models::{FeedRoot, Item};
use crate::pipeline::fields;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{(.*?)\.(.*?)\}").expect("placeholder regex"));

static ARG_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{ARG\.(.*?)\}").expect("ARG placeholder regex"));

/// Render a template against user variables and feed/item data.
///
/// Missing `ARG` names resolve to the empty string; unknown `ROOT`/`ITEM`
/// field names are an error. An unrecognized namespace resolves to the empty
/// string.
pub fn render(
    template: &str,
    vars: &HashMap<String, String>,
    root: &FeedRoot,
    item: &Item,
) -> Result<String> {
    let mut rendered = template.to_string();

    while let Some(caps) = PLACEHOLDER.captures(&rendered) {
        let placeholder = caps[0].to_string();
        let namespace = caps[1].to_string();
        let name = caps[2].to_string();

        let value = match namespace.as_str() {
            "ARG" => vars.get(&name).cloned().unwrap_or_default(),
            "ROOT" => fields::resolve_root(&name, root)?,
            "ITEM" => fields::resolve_item(&name, item)?,
            _ => String::new(),
        };

        rendered = rendered.replace(&placeholder, &value);
    }

    Ok(rendered)
}

/// Expand only `${ARG.*}` placeholders in a set of argument templates.
///
/// Runs once per feed, before item processing; `ROOT`/`ITEM` placeholders
/// survive for the per-item [`render`] pass. Missing variables expand to the
/// empty string.
pub fn expand_variables(templates: &[String], vars: &HashMap<String, String>) -> Vec<String> {
    templates
        .iter()
        .map(|template| {
            let mut expanded = template.clone();
            while let Some(caps) = ARG_PLACEHOLDER.captures(&expanded) {
                let placeholder = caps[0].to_string();
                let name = caps[1].to_string();
                let value = vars.get(&name).cloned().unwrap_or_default();
                expanded = expanded.replace(&placeholder, &value);
            }
            expanded
        })
        .collect()
}
