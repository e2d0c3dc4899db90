/// Domain classification for TabFlow
use url::Url;

use crate::config::DEFAULT_GROUP_ICON;

/// Substring → icon token, tested in order
const ICON_MAP: [(&str, &str); 16] = [
    ("gmail", "fa-envelope"),
    ("mail", "fa-envelope"),
    ("google", "fa-google"),
    ("docs", "fa-file-alt"),
    ("drive", "fa-folder"),
    ("youtube", "fa-youtube"),
    ("github", "fa-github"),
    ("stackoverflow", "fa-stack-overflow"),
    ("twitter", "fa-twitter"),
    ("facebook", "fa-facebook"),
    ("linkedin", "fa-linkedin"),
    ("reddit", "fa-reddit"),
    ("amazon", "fa-amazon"),
    ("netflix", "fa-film"),
    ("spotify", "fa-spotify"),
    ("slack", "fa-slack"),
];

/// Extract the domain key used for grouping
///
/// The key is the URL's hostname with a leading `www.` removed:
/// - https://www.example.com/page → example.com
/// - https://mail.google.com → mail.google.com
///
/// Returns `None` for anything that isn't an http(s) URL with a host.
pub fn domain_key(url: &str) -> Option<String> {
    let parsed = Url::parse(url.trim()).ok()?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return None;
    }

    let host = parsed.host_str()?;
    let key = host.strip_prefix("www.").unwrap_or(host);

    if key.is_empty() {
        None
    } else {
        Some(key.to_string())
    }
}

/// Human-readable group name: first label, capitalized
pub fn group_name(domain: &str) -> String {
    let label = domain.split('.').next().unwrap_or(domain);
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn icon_for_domain(domain: &str) -> &'static str {
    ICON_MAP
        .iter()
        .find(|(key, _)| domain.contains(key))
        .map(|(_, icon)| *icon)
        .unwrap_or(DEFAULT_GROUP_ICON)
}

/// Loose match: does the domain of `url` contain `domain` as a substring?
///
/// This lets mail.google.com land in a google.com group, and also lets
/// a.com match banana.com.
pub fn domain_contains(url: &str, domain: &str) -> bool {
    domain_key(url).is_some_and(|key| key.contains(domain))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_key_basic() {
        assert_eq!(domain_key("https://www.example.com/page"), Some("example.com".to_string()));
        assert_eq!(domain_key("https://google.com"), Some("google.com".to_string()));
        assert_eq!(domain_key("http://google.com"), Some("google.com".to_string()));
    }

    #[test]
    fn test_domain_key_keeps_subdomains() {
        assert_eq!(domain_key("https://mail.google.com/u/0"), Some("mail.google.com".to_string()));
        assert_eq!(domain_key("https://docs.microsoft.com"), Some("docs.microsoft.com".to_string()));
    }

    #[test]
    fn test_domain_key_only_strips_leading_www() {
        assert_eq!(domain_key("https://shop.www.example.com"), Some("shop.www.example.com".to_string()));
        assert_eq!(domain_key("https://WWW.Example.COM"), Some("example.com".to_string()));
    }

    #[test]
    fn test_domain_key_with_port_and_query() {
        assert_eq!(domain_key("http://localhost:3000/x?y=1"), Some("localhost".to_string()));
        assert_eq!(domain_key("https://github.com/rust-lang/rust#readme"), Some("github.com".to_string()));
    }

    #[test]
    fn test_domain_key_rejects_malformed() {
        assert_eq!(domain_key(""), None);
        assert_eq!(domain_key("not-a-url"), None);
        assert_eq!(domain_key("https://"), None);
        assert_eq!(domain_key("chrome://extensions"), None);
        assert_eq!(domain_key("file:///home/user/notes.txt"), None);
        assert_eq!(domain_key("about:blank"), None);
    }

    #[test]
    fn test_group_name() {
        assert_eq!(group_name("example.com"), "Example");
        assert_eq!(group_name("mail.google.com"), "Mail");
        assert_eq!(group_name("localhost"), "Localhost");
        assert_eq!(group_name("élan.fr"), "Élan");
        assert_eq!(group_name(""), "");
    }

    #[test]
    fn test_icon_for_domain() {
        assert_eq!(icon_for_domain("github.com"), "fa-github");
        assert_eq!(icon_for_domain("mail.google.com"), "fa-envelope");
        assert_eq!(icon_for_domain("docs.google.com"), "fa-google");
        assert_eq!(icon_for_domain("netflix.com"), "fa-film");
        assert_eq!(icon_for_domain("example.com"), "fa-folder");
    }

    #[test]
    fn test_domain_contains_is_substring() {
        assert!(domain_contains("https://mail.google.com", "google.com"));
        assert!(domain_contains("https://www.github.com/a", "github.com"));
        assert!(domain_contains("https://banana.com", "a.com"));
        assert!(!domain_contains("https://google.com", "mail.google.com"));
        assert!(!domain_contains("not a url", "a.com"));
    }
}
