/// Issue link handling: resolving hrefs, deriving issue IDs, retargeting menu links
use std::sync::LazyLock;

use regex::{NoExpand, Regex};
use url::Url;

static ISSUE_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/issues/\d+").expect("issue path pattern is valid"));

/// Resolve a raw `href` attribute against the page's base URL.
///
/// Returns an empty string when there is nothing to resolve, so that an
/// absent link degrades to an empty `url` field rather than an error.
pub fn resolve_href(base: &Url, href: &str) -> String {
    let href = href.trim();
    if href.is_empty() {
        return String::new();
    }

    base.join(href).map(String::from).unwrap_or_default()
}

/// Derive the issue ID from an issue URL
///
/// The ID is the last path segment:
/// - https://redmine.example.com/issues/42 → 42
/// - https://redmine.example.com/issues/42?tab=history → 42
/// - https://redmine.example.com/issues/ → "" (no trailing segment)
/// - "" → ""
pub fn issue_id(url: &str) -> String {
    if url.is_empty() {
        return String::new();
    }

    match Url::parse(url) {
        Ok(parsed) => parsed
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .unwrap_or("")
            .to_string(),
        Err(_) => {
            let path = url.split(['?', '#']).next().unwrap_or("");
            path.rsplit('/').next().unwrap_or("").to_string()
        }
    }
}

/// Point a context menu link at another issue by rewriting its
/// `/issues/<id>` segment. Links without such a segment are returned as-is.
pub fn retarget_issue_href(href: &str, issue_id: &str) -> String {
    let target = format!("/issues/{}", issue_id);
    ISSUE_PATH.replace(href, NoExpand(&target)).into_owned()
}

/// Whether a tab URL belongs to the configured Redmine site
pub fn same_site(page_url: &str, site_url: &str) -> bool {
    match (Url::parse(page_url), Url::parse(site_url.trim())) {
        (Ok(page), Ok(site)) => page.origin() == site.origin(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://redmine.example.com/projects/web/issues?set_filter=1").unwrap()
    }

    #[test]
    fn test_resolve_href_absolute_path() {
        assert_eq!(
            resolve_href(&base(), "/issues/42"),
            "https://redmine.example.com/issues/42"
        );
    }

    #[test]
    fn test_resolve_href_keeps_absolute_urls() {
        assert_eq!(
            resolve_href(&base(), "https://other.example.org/issues/7"),
            "https://other.example.org/issues/7"
        );
    }

    #[test]
    fn test_resolve_href_empty() {
        assert_eq!(resolve_href(&base(), ""), "");
        assert_eq!(resolve_href(&base(), "   "), "");
    }

    #[test]
    fn test_issue_id_basic() {
        assert_eq!(issue_id("https://redmine.example.com/issues/42"), "42");
        assert_eq!(issue_id("https://redmine.example.com/issues/42?tab=notes"), "42");
        assert_eq!(issue_id("https://redmine.example.com/issues/42#note-3"), "42");
    }

    #[test]
    fn test_issue_id_empty_cases() {
        assert_eq!(issue_id(""), "");
        assert_eq!(issue_id("https://redmine.example.com/issues/"), "");
        assert_eq!(issue_id("https://redmine.example.com"), "");
    }

    #[test]
    fn test_issue_id_relative_fallback() {
        assert_eq!(issue_id("/issues/9?x=1"), "9");
    }

    #[test]
    fn test_retarget_issue_href() {
        assert_eq!(
            retarget_issue_href("/issues/100/edit?issue[status_id]=5", "42"),
            "/issues/42/edit?issue[status_id]=5"
        );
    }

    #[test]
    fn test_retarget_issue_href_without_issue_segment() {
        let href = "/issues/bulk_update?ids[]=100&issue[status_id]=5";
        assert_eq!(retarget_issue_href(href, "42"), href);
    }

    #[test]
    fn test_same_site() {
        assert!(same_site(
            "https://redmine.example.com/issues?query_id=3",
            "https://redmine.example.com"
        ));
        assert!(same_site("https://redmine.example.com/", " https://redmine.example.com/ "));
        assert!(!same_site("https://redmine.example.com/", "http://redmine.example.com"));
        assert!(!same_site("chrome://extensions", "https://redmine.example.com"));
        assert!(!same_site("https://redmine.example.com/", ""));
    }
}
