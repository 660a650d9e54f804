//! Short display forms of profile URLs.
//!
//! Form input is validated upstream, but these helpers still accept anything:
//! a parse failure degrades to a best-effort string and never surfaces.

use url::Url;

/// Hosts whose display form is the profile handle rather than the domain.
const HANDLE_HOSTS: &[&str] = &["linkedin.com", "github.com"];

fn parse_lenient(raw: &str) -> Option<Url> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let candidate = if has_scheme(trimmed) {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };
    Url::parse(&candidate).ok()
}

/// True when `s` opens with `scheme://`. A `://` later on, say in a query
/// string, does not count.
fn has_scheme(s: &str) -> bool {
    match s.split_once("://") {
        Some((scheme, _)) => {
            scheme.starts_with(|c: char| c.is_ascii_alphabetic())
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        None => false,
    }
}

/// Returns the hostname of `url` without a leading `www.` label.
///
/// `"github.com/user"` and `"https://www.github.com/user"` both yield `"github.com"`.
/// Unparseable input is returned unchanged.
pub fn domain_of(url: &str) -> String {
    match parse_lenient(url).as_ref().and_then(Url::host_str) {
        Some(host) => host.strip_prefix("www.").unwrap_or(host).to_string(),
        None => url.to_string(),
    }
}

/// Returns the last non-empty path segment of `url` (usually a username).
pub fn last_path_segment_of(url: &str) -> String {
    let parsed = parse_lenient(url).and_then(|u| {
        u.path_segments()
            .and_then(|segments| segments.filter(|s| !s.is_empty()).last().map(str::to_string))
    });

    parsed.unwrap_or_else(|| raw_last_segment(url))
}

fn raw_last_segment(url: &str) -> String {
    match url.rfind('/') {
        Some(idx) => url[idx + 1..].to_string(),
        None => url.to_string(),
    }
}

/// What the elegant header shows for a social link: the handle for
/// LinkedIn/GitHub, the bare domain for anything else.
pub fn display_handle(url: &str) -> String {
    let domain = domain_of(url);
    if HANDLE_HOSTS.iter().any(|host| domain.contains(host)) {
        let handle = last_path_segment_of(url);
        if !handle.is_empty() {
            return handle;
        }
    }
    domain
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_of_adds_scheme_and_strips_www() {
        assert_eq!(domain_of("github.com/user"), "github.com");
        assert_eq!(domain_of("https://www.github.com/user"), "github.com");
    }

    #[test]
    fn test_domain_of_ignores_scheme_inside_query() {
        assert_eq!(domain_of("github.com/u?next=https://x.com"), "github.com");
        assert_eq!(
            last_path_segment_of("github.com/jane?next=https://x.com/y"),
            "jane"
        );
        assert!(has_scheme("http://a.example"));
        assert!(!has_scheme("a.example/?r=http://b.example"));
    }

    #[test]
    fn test_domain_of_keeps_subdomains() {
        assert_eq!(domain_of("https://blog.example.org/post"), "blog.example.org");
    }

    #[test]
    fn test_domain_of_unparseable_returned_unchanged() {
        assert_eq!(domain_of("http://"), "http://");
        assert_eq!(domain_of(""), "");
        assert_eq!(domain_of("not a url at all"), "not a url at all");
    }

    #[test]
    fn test_last_path_segment_ignores_trailing_slash() {
        assert_eq!(
            last_path_segment_of("https://linkedin.com/in/janedoe/"),
            "janedoe"
        );
        assert_eq!(last_path_segment_of("github.com/jane"), "jane");
    }

    #[test]
    fn test_last_path_segment_falls_back_on_raw_text() {
        // Space in the host makes the URL unparseable.
        assert_eq!(last_path_segment_of("bad host/jane"), "jane");
        assert_eq!(last_path_segment_of("bad host"), "bad host");
    }

    #[test]
    fn test_last_path_segment_without_path_uses_raw_rule() {
        assert_eq!(last_path_segment_of("https://example.com"), "example.com");
    }

    #[test]
    fn test_display_handle_for_social_hosts() {
        assert_eq!(display_handle("https://www.linkedin.com/in/janedoe"), "janedoe");
        assert_eq!(display_handle("https://github.com/janedoe/"), "janedoe");
    }

    #[test]
    fn test_display_handle_for_other_hosts_is_domain() {
        assert_eq!(display_handle("https://www.janedoe.dev/about"), "janedoe.dev");
    }
}
