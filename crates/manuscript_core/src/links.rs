use std::sync::LazyLock;

use regex::{NoExpand, Regex};
use url::Url;

static STATIC_AFTER_COMMA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*/static/").expect("static pattern is valid"));

/// Prefixes root-relative `href`/`src` values and `/static/` paths with the site root.
///
/// This is plain text substitution over double-quoted attributes, applied in
/// a fixed order: `href="/`, `src="/`, `"/static/`, then `/static/` entries
/// after a comma (srcset lists). Single-quoted attributes are left alone and
/// running it twice prefixes twice.
pub fn absolutize_root_links(html: &str, site_url: &str) -> String {
    let root = site_url.trim_end_matches('/');
    let html = html.replace("href=\"/", &format!("href=\"{root}/"));
    let html = html.replace("src=\"/", &format!("src=\"{root}/"));
    let html = html.replace("\"/static/", &format!("\"{root}/static/"));
    let replacement = format!(",{root}/static/");
    STATIC_AFTER_COMMA
        .replace_all(&html, NoExpand(&replacement))
        .into_owned()
}

/// True for absolute http(s) links (including protocol-relative ones) whose
/// host is not `site_host`.
pub fn is_external_link(href: &str, site_host: Option<&str>) -> bool {
    let href = href.trim();
    let parsed = if href.starts_with("//") {
        Url::parse(&format!("https:{href}"))
    } else {
        Url::parse(href)
    };
    let Ok(url) = parsed else {
        return false;
    };
    if !matches!(url.scheme(), "http" | "https") {
        return false;
    }
    match (url.host_str(), site_host) {
        (Some(host), Some(site)) => !host.eq_ignore_ascii_case(site),
        (Some(_), None) => true,
        (None, _) => false,
    }
}
