// src/scrape/urls.rs
// =============================================================================
// This module turns the raw attribute values we pull out of HTML into
// absolute URLs, and decides which links count as "the same site".
//
// The normalization rules are deliberately simple string rules rather than
// full RFC 3986 resolution:
// - "//host/path" (protocol-relative) -> drop the slashes, add a scheme
// - "/path" (site-root-relative)      -> prefix the site base URL
// - anything without a scheme         -> prefix "http://"
// Note the last rule means a bare relative name like "i.png" becomes
// "http://i.png" — it is NOT resolved against the current page. That is the
// documented contract, and the tests pin it.
//
// The same-site test compares registrable domains (domain + public suffix),
// so sub.example.com counts as part of example.com. We use a naive
// registrable-domain rule: the last two labels of the host, with IP
// addresses kept whole.
//
// Rust concepts:
// - Option<T>: "maybe a URL" — None means the link is discarded
// - String slicing with strip_prefix: Safe prefix removal
// =============================================================================

use url::Url;

// Makes sure a URL has a scheme, defaulting to plain http
//
// Example: "example.com" -> "http://example.com"
//          "https://example.com" -> unchanged
pub fn ensure_scheme(url: &str) -> String {
    if url.starts_with("http") {
        url.to_string()
    } else {
        format!("http://{}", url)
    }
}

// Normalizes one raw link value to an absolute URL
//
// Parameters:
//   site_url: the site base URL (with scheme), used for root-relative links
//   link: the raw href/src attribute value
//
// Returns: Some(absolute_url), or None for links too short to mean anything
// (empty values, a lone "/" or "//")
pub fn normalize_link(site_url: &str, link: &str) -> Option<String> {
    if let Some(rest) = link.strip_prefix("//") {
        // Protocol-relative: keep the link's own host, give it a scheme
        if rest.is_empty() {
            return None;
        }
        Some(ensure_scheme(rest))
    } else if let Some(rest) = link.strip_prefix('/') {
        // Site-root-relative: belongs under the site base URL
        if rest.is_empty() {
            return None;
        }
        Some(format!("{}{}", site_url, link))
    } else if link.is_empty() {
        None
    } else {
        Some(ensure_scheme(link))
    }
}

// Normalizes an image reference to an absolute URL
//
// Images are not domain-filtered: a page may legitimately serve its images
// from a CDN on a different domain.
pub fn normalize_image_link(site_url: &str, src: &str) -> Option<String> {
    normalize_link(site_url, src)
}

// Normalizes a hyperlink and keeps it only if it stays on the same site
//
// mailto: links and anything resolving off the site's registrable domain
// are discarded.
pub fn normalize_page_link(site_url: &str, site_domain: &str, href: &str) -> Option<String> {
    if href.starts_with("mailto:") {
        return None;
    }

    let absolute = normalize_link(site_url, href)?;
    if same_site(&absolute, site_domain) {
        Some(absolute)
    } else {
        None
    }
}

// Extracts the registrable domain from a host name
//
// "www.example.com" -> "example.com" (last two labels). IP addresses have
// no registrable domain and are returned unchanged. This is a naive rule —
// it does not consult the public-suffix list, so multi-part suffixes like
// "co.uk" collapse to the suffix itself.
pub fn registrable_domain(host: &str) -> String {
    if host.parse::<std::net::IpAddr>().is_ok() {
        return host.to_string();
    }

    let labels: Vec<&str> = host.rsplitn(3, '.').collect();
    if labels.len() >= 2 {
        // rsplitn yields labels right-to-left: suffix first, then domain
        format!("{}.{}", labels[1], labels[0])
    } else {
        host.to_string()
    }
}

// Does this URL live on the given registrable domain?
//
// Accepts the domain itself and any of its subdomains; rejects everything
// else, including URLs that fail to parse.
pub fn same_site(url: &str, site_domain: &str) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };
    let Some(host) = parsed.host_str() else {
        return false;
    };

    host == site_domain || host.ends_with(&format!(".{}", site_domain))
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is strip_prefix?
//    - Returns Some(rest) if the string starts with the prefix, else None
//    - Cleaner and safer than manual slicing like &link[2..]
//
// 2. What is the ? on normalize_link(...)?
//    - Early-returns None from this function if the inner call was None
//    - Works for Option the same way it works for Result
//
// 3. What is let-else (let Ok(parsed) = ... else)?
//    - Pattern match that must succeed, with a mandatory diverging else
//    - Reads better than nested match when we just want to bail out
//
// 4. Why rsplitn(3, '.')?
//    - We only care about the last two labels, so splitting from the right
//      and stopping after three pieces avoids allocating a full split
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_scheme_prefixes_http() {
        assert_eq!(ensure_scheme("example.com"), "http://example.com");
        assert_eq!(ensure_scheme("http://example.com"), "http://example.com");
        assert_eq!(ensure_scheme("https://example.com"), "https://example.com");
    }

    #[test]
    fn test_protocol_relative_link_gets_scheme() {
        let normalized = normalize_link("http://example.com", "//cdn.example.com/i.png");
        assert_eq!(normalized, Some("http://cdn.example.com/i.png".to_string()));
    }

    #[test]
    fn test_root_relative_link_gets_site_prefix() {
        let normalized = normalize_link("http://example.com", "/img/i.png");
        assert_eq!(normalized, Some("http://example.com/img/i.png".to_string()));
    }

    #[test]
    fn test_bare_name_gets_scheme_literally() {
        // The naive rule: no resolution against the current page
        let normalized = normalize_link("http://example.com", "i.png");
        assert_eq!(normalized, Some("http://i.png".to_string()));
    }

    #[test]
    fn test_degenerate_links_are_dropped() {
        assert_eq!(normalize_link("http://example.com", ""), None);
        assert_eq!(normalize_link("http://example.com", "/"), None);
        assert_eq!(normalize_link("http://example.com", "//"), None);
    }

    #[test]
    fn test_registrable_domain() {
        assert_eq!(registrable_domain("example.com"), "example.com");
        assert_eq!(registrable_domain("www.example.com"), "example.com");
        assert_eq!(registrable_domain("a.b.example.com"), "example.com");
        assert_eq!(registrable_domain("localhost"), "localhost");
        assert_eq!(registrable_domain("127.0.0.1"), "127.0.0.1");
    }

    #[test]
    fn test_same_site_accepts_subdomains() {
        assert!(same_site("http://example.com/x", "example.com"));
        assert!(same_site("http://sub.example.com/x", "example.com"));
        assert!(!same_site("http://other.com/x", "example.com"));
        // A host that merely ends with the domain text is not a subdomain
        assert!(!same_site("http://notexample.com/x", "example.com"));
    }

    #[test]
    fn test_page_link_filtering() {
        let site = "http://example.com";
        let domain = "example.com";

        assert_eq!(
            normalize_page_link(site, domain, "http://sub.example.com/x"),
            Some("http://sub.example.com/x".to_string())
        );
        assert_eq!(normalize_page_link(site, domain, "http://other.com/x"), None);
        assert_eq!(normalize_page_link(site, domain, "mailto:a@example.com"), None);
        assert_eq!(
            normalize_page_link(site, domain, "/about"),
            Some("http://example.com/about".to_string())
        );
    }

    #[test]
    fn test_image_links_are_not_domain_filtered() {
        let normalized = normalize_image_link("http://example.com", "//cdn.other.net/i.png");
        assert_eq!(normalized, Some("http://cdn.other.net/i.png".to_string()));
    }
}
