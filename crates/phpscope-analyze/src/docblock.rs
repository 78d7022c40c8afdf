//! Docblock tag parsing
//!
//! Only the packaging tags are read: `@category`, `@package` and
//! `@subpackage`. The first occurrence of each tag wins.

use regex::Regex;
use std::sync::OnceLock;

/// Packaging tags found in a docblock
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageTags {
    pub category: Option<String>,
    pub package: Option<String>,
    pub subpackage: Option<String>,
}

impl PackageTags {
    /// `package[.subpackage]`, or `None` without a `@package` tag
    pub fn full_package(&self) -> Option<String> {
        let package = self.package.as_ref()?;
        Some(match &self.subpackage {
            Some(subpackage) => format!("{}.{}", package, subpackage),
            None => package.clone(),
        })
    }
}

/// Parse the packaging tags of a docblock
pub fn parse_package_tags(docblock: &str) -> PackageTags {
    static TAG_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = TAG_REGEX
        .get_or_init(|| Regex::new(r"@(category|package|subpackage)\s+([.\w]+)").unwrap());

    let mut tags = PackageTags::default();

    for caps in regex.captures_iter(docblock) {
        let slot = match &caps[1] {
            "category" => &mut tags.category,
            "package" => &mut tags.package,
            _ => &mut tags.subpackage,
        };
        if slot.is_none() {
            *slot = Some(caps[2].to_string());
        }
    }

    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_tags() {
        let doc = "/**\n * @category Framework\n * @package Acme.Core\n * @subpackage Http\n */";
        let tags = parse_package_tags(doc);

        assert_eq!(tags.category.as_deref(), Some("Framework"));
        assert_eq!(tags.package.as_deref(), Some("Acme.Core"));
        assert_eq!(tags.subpackage.as_deref(), Some("Http"));
        assert_eq!(tags.full_package().as_deref(), Some("Acme.Core.Http"));
    }

    #[test]
    fn test_package_without_subpackage() {
        let tags = parse_package_tags("/** @package Acme */");
        assert_eq!(tags.full_package().as_deref(), Some("Acme"));
        assert_eq!(tags.category, None);
    }

    #[test]
    fn test_first_occurrence_wins() {
        let tags = parse_package_tags("/** @package First\n * @package Second */");
        assert_eq!(tags.package.as_deref(), Some("First"));
    }

    #[test]
    fn test_no_tags() {
        let tags = parse_package_tags("/** Just text, no tags. @packaged */");
        assert_eq!(tags, PackageTags::default());
        assert_eq!(tags.full_package(), None);
    }
}
