//! Implicit tags a rendered route is cached under.

use edge_core::RevalidateConfig;
use indexmap::IndexSet;

/// Derive the layout/page tags covering a route pattern.
///
/// Every ancestor segment contributes a `layout` tag; a pattern already ending
/// in `/page` or `/route` keeps that leaf as-is.
///
/// ```ignore
/// assert_eq!(
///     derived_tags("/blog/[slug]/page"),
///     ["/layout", "/blog/layout", "/blog/[slug]/layout", "/blog/[slug]/page"],
/// );
/// ```
pub fn derived_tags(pathname: &str) -> Vec<String> {
    let mut tags = vec!["/layout".to_string()];
    if !pathname.starts_with('/') {
        return tags;
    }

    let parts: Vec<&str> = pathname.split('/').collect();
    for end in 1..=parts.len() {
        let mut current = parts[..end].join("/");
        if current.is_empty() {
            continue;
        }
        if !current.ends_with("/page") && !current.ends_with("/route") {
            if !current.ends_with('/') {
                current.push('/');
            }
            current.push_str("layout");
        }
        tags.push(current);
    }

    tags
}

/// Build the full tag set for a render of `page` served at `pathname`.
///
/// Includes the prefixed derived tags of the page pattern followed by the
/// prefixed concrete pathname, without duplicates.
pub fn implicit_tags(config: &RevalidateConfig, page: &str, pathname: &str) -> Vec<String> {
    let mut tags: IndexSet<String> = derived_tags(page)
        .iter()
        .map(|tag| config.implicit_tag(tag))
        .collect();
    tags.insert(config.implicit_tag(pathname));
    tags.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_tags_page_pattern() {
        assert_eq!(
            derived_tags("/blog/[slug]/page"),
            vec![
                "/layout",
                "/blog/layout",
                "/blog/[slug]/layout",
                "/blog/[slug]/page"
            ]
        );
    }

    #[test]
    fn test_derived_tags_root_page() {
        assert_eq!(derived_tags("/page"), vec!["/layout", "/page"]);
    }

    #[test]
    fn test_derived_tags_route_handler() {
        assert_eq!(
            derived_tags("/api/items/route"),
            vec!["/layout", "/api/layout", "/api/items/layout", "/api/items/route"]
        );
    }

    #[test]
    fn test_derived_tags_relative_path() {
        assert_eq!(derived_tags("blog/page"), vec!["/layout"]);
    }

    #[test]
    fn test_derived_tags_trailing_slash() {
        assert_eq!(
            derived_tags("/blog/"),
            vec!["/layout", "/blog/layout", "/blog/layout"]
        );
    }

    #[test]
    fn test_implicit_tags_prefixed_and_deduped() {
        let config = RevalidateConfig::default();
        let tags = implicit_tags(&config, "/blog/[slug]/page", "/blog/post-1");

        assert_eq!(
            tags,
            vec![
                "_N_T_/layout",
                "_N_T_/blog/layout",
                "_N_T_/blog/[slug]/layout",
                "_N_T_/blog/[slug]/page",
                "_N_T_/blog/post-1",
            ]
        );

        let tags = implicit_tags(&config, "/page", "/page");
        assert_eq!(tags, vec!["_N_T_/layout", "_N_T_/page"]);
    }
}
