// src/pipeline/fields.rs

//! Symbolic field resolution.
//!
//! Maps a field name from untyped configuration (a rule's `rssItemField` or
//! a `${ROOT.*}`/`${ITEM.*}` placeholder) onto a concrete accessor of the
//! parsed feed records. The field sets are closed enumerations; anything
//! outside them is a configuration error surfaced at resolution time.

use crate::error::{AppError, Result};
use crate::models::{FeedRoot, Item};

/// Which record a field name is resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Root,
    Item,
}

impl Scope {
    pub fn label(&self) -> &'static str {
        match self {
            Scope::Root => "ROOT",
            Scope::Item => "ITEM",
        }
    }
}

/// Resolve a channel-level field by name, case-insensitively.
///
/// Integer fields render base-10; absent values render as the empty string.
pub fn resolve_root(field: &str, root: &FeedRoot) -> Result<String> {
    let value = match field.to_ascii_lowercase().as_str() {
        "title" => root.title.clone(),
        "link" => root.link.clone(),
        "description" => root.description.clone(),
        "language" => root.language.clone(),
        "copyright" => root.copyright.clone(),
        "managingeditor" => root.managing_editor.clone(),
        "webmaster" => root.webmaster.clone(),
        "pubdate" => root.pub_date.clone(),
        "lastbuilddate" => root.last_build_date.clone(),
        "category" => root.category.clone(),
        "generator" => root.generator.clone(),
        "docs" => root.docs.clone(),
        "ttl" => root.ttl.to_string(),
        _ => return Err(AppError::unknown_field(Scope::Root.label(), field)),
    };
    Ok(value)
}

/// Resolve an item-level field by name, case-insensitively.
pub fn resolve_item(field: &str, item: &Item) -> Result<String> {
    let value = match field.to_ascii_lowercase().as_str() {
        "title" => item.title.clone(),
        "description" => item.description.clone(),
        "link" => item.link.clone(),
        "author" => item.author.clone(),
        "category" => item.category.clone(),
        "comments" => item.comments.clone(),
        "guid" => item.guid.clone(),
        "pubdate" => item.pub_date.clone(),
        "source" => item.source.clone(),
        // `enclosure` is the useful projection of the attachment
        "enclosure" | "enclosureurl" => item.enclosure_url.clone(),
        "enclosuretype" => item.enclosure_type.clone(),
        "enclosurelength" => item.enclosure_length.to_string(),
        _ => return Err(AppError::unknown_field(Scope::Item.label(), field)),
    };
    Ok(value)
}

/// Resolve a field in the given scope.
pub fn resolve(scope: Scope, field: &str, root: &FeedRoot, item: &Item) -> Result<String> {
    match scope {
        Scope::Root => resolve_root(field, root),
        Scope::Item => resolve_item(field, item),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_root() -> FeedRoot {
        FeedRoot {
            title: "Example Releases".into(),
            link: "https://example.com".into(),
            ttl: 60,
            ..FeedRoot::default()
        }
    }

    fn sample_item() -> Item {
        Item {
            title: "Release v1.2.3".into(),
            guid: "release-123".into(),
            enclosure_url: "https://example.com/release.tar.gz".into(),
            enclosure_length: 1024,
            ..Item::default()
        }
    }

    #[test]
    fn test_resolve_root_field() {
        let root = sample_root();
        assert_eq!(resolve_root("title", &root).unwrap(), "Example Releases");
        assert_eq!(resolve_root("ttl", &root).unwrap(), "60");
    }

    #[test]
    fn test_resolve_item_field() {
        let item = sample_item();
        assert_eq!(resolve_item("title", &item).unwrap(), "Release v1.2.3");
        assert_eq!(resolve_item("guid", &item).unwrap(), "release-123");
        assert_eq!(resolve_item("enclosurelength", &item).unwrap(), "1024");
    }

    #[test]
    fn test_field_names_are_case_insensitive() {
        let item = sample_item();
        assert_eq!(resolve_item("Title", &item).unwrap(), "Release v1.2.3");
        assert_eq!(resolve_item("GUID", &item).unwrap(), "release-123");
        let root = sample_root();
        assert_eq!(
            resolve_root("lastBuildDate", &root).unwrap(),
            root.last_build_date
        );
    }

    #[test]
    fn test_absent_value_resolves_empty() {
        assert_eq!(resolve_item("author", &sample_item()).unwrap(), "");
    }

    #[test]
    fn test_unknown_field_is_error() {
        let err = resolve_item("bogus", &sample_item()).unwrap_err();
        assert!(matches!(
            err,
            crate::error::AppError::UnknownField { scope: "ITEM", .. }
        ));
        assert!(resolve_root("guid", &sample_root()).is_err());
    }
}
