//! Directive tokens embedded in assistant replies.
//!
//! The assistant's prompt teaches it a miniature grammar of literal bracket
//! tokens. This module is the only place that grammar lives on the client:
//! a fixed token table scanned first-match-wins, plus the reserved email
//! trigger. Tokens never reach the display text.

use regex::Regex;

/// Navigation token table. Contract with the assistant's backend prompt;
/// both sides must stay in sync. `[NAV:/Blogs]` is a legacy alias.
pub const NAV_ROUTES: &[(&str, &str)] = &[
    ("[NAV:/Team]", "/Team"),
    ("[NAV:/Events]", "/Events"),
    ("[NAV:/Blog]", "/Blog"),
    ("[NAV:/Blogs]", "/Blog"),
    ("[NAV:/pastEvents]", "/pastEvents"),
    ("[NAV:/alumni]", "/Alumni"),
];

/// Scan for a navigation token. At most one token is honored per response:
/// the first table entry present wins and only its first occurrence is
/// removed. Returns the display text and the mapped route, if any.
pub fn extract_navigation(text: &str) -> (String, Option<&'static str>) {
    for (token, route) in NAV_ROUTES {
        if text.contains(token) {
            let cleaned = text.replacen(token, "", 1).trim().to_string();
            return (cleaned, Some(route));
        }
    }
    (text.to_string(), None)
}

/// Reserved token the assistant emits to arm email capture server-side.
pub const EMAIL_TRIGGER: &str = "[EMAIL_TRIGGER]";

/// Strip every `[EMAIL_TRIGGER]` occurrence (case-insensitive) and report
/// whether one was present.
pub fn strip_email_trigger(text: &str) -> (String, bool) {
    let re = Regex::new(r"(?i)\[EMAIL_TRIGGER\]").unwrap();
    if !re.is_match(text) {
        return (text.to_string(), false);
    }
    (re.replace_all(text, "").trim().to_string(), true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_is_removed_and_route_mapped() {
        let (text, route) = extract_navigation("Here you go [NAV:/Team] enjoy");
        assert_eq!(text, "Here you go  enjoy");
        assert_eq!(route, Some("/Team"));
    }

    #[test]
    fn first_match_wins() {
        let (text, route) = extract_navigation("[NAV:/Events] and [NAV:/Blog]");
        assert_eq!(route, Some("/Events"));
        assert_eq!(text, "and [NAV:/Blog]");
    }

    #[test]
    fn legacy_blogs_token_maps_to_blog() {
        let (_, route) = extract_navigation("see [NAV:/Blogs]");
        assert_eq!(route, Some("/Blog"));
    }

    #[test]
    fn plain_text_passes_through() {
        let (text, route) = extract_navigation("nothing to see here");
        assert_eq!(text, "nothing to see here");
        assert_eq!(route, None);
    }

    #[test]
    fn email_trigger_is_case_insensitive_and_stripped() {
        let (text, hit) = strip_email_trigger("Sure! [email_trigger] Type away.");
        assert!(hit);
        assert_eq!(text, "Sure!  Type away.");

        let (text, hit) = strip_email_trigger("no trigger here");
        assert!(!hit);
        assert_eq!(text, "no trigger here");
    }

    #[test]
    fn all_trigger_occurrences_are_removed() {
        let (text, hit) = strip_email_trigger("[EMAIL_TRIGGER]go[EMAIL_TRIGGER]");
        assert!(hit);
        assert_eq!(text, "go");
    }
}
