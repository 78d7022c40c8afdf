//! Package identity of containers

use crate::docblock::parse_package_tags;
use crate::symbols::Package;

/// Build the package of a container from its namespace, name and docblock.
///
/// Without a `@package` tag the full package is derived from the qualified
/// name: every `_` or `\` separated segment except the last, joined by `.`.
pub fn package(namespace: &str, name: &str, docblock: Option<&str>) -> Package {
    let tags = docblock.map(parse_package_tags).unwrap_or_default();

    let full_package = tags
        .full_package()
        .unwrap_or_else(|| derived_package(namespace, name));

    Package {
        namespace: namespace.to_string(),
        category: tags.category.unwrap_or_default(),
        package: tags.package.unwrap_or_default(),
        subpackage: tags.subpackage.unwrap_or_default(),
        full_package,
    }
}

fn derived_package(namespace: &str, name: &str) -> String {
    let qualified = if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{}\\{}", namespace, name)
    };

    let segments: Vec<&str> = qualified
        .split(['_', '\\'])
        .filter(|segment| !segment.is_empty())
        .collect();

    match segments.split_last() {
        Some((_, init)) => init.join("."),
        None => String::new(),
    }
}
