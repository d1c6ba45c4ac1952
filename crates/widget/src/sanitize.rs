//! Text sanitizer and link rewriter for assistant replies.
//!
//! Models sometimes emit raw HTML anchors, half-broken attribute fragments,
//! or doubled-up markdown email links. This pipeline normalizes all of that
//! into the small markdown subset the renderer understands, then strips any
//! markup not on the allow-list. Order matters: anchor removal first, link
//! collapsing before link rewriting, allow-list last.
//!
//! The pipeline is deterministic and idempotent on its own output: the
//! rewriting steps skip matches already preceded by `[` or followed by `]`
//! (or sitting inside a URL path), so a second pass never double-wraps.

use regex::{Captures, Regex};

/// Social handle rewritten into a profile link when mentioned bare.
pub const SOCIAL_HANDLE: &str = "@fedkiit";
pub const SOCIAL_PROFILE_URL: &str = "https://www.instagram.com/fedkiit/";

/// Inline tags allowed through to the markdown renderer, attribute-free.
const ALLOWED_TAGS: &[&str] = &[
    "b", "strong", "i", "em", "u", "code", "pre", "br", "p", "ul", "ol", "li",
];

pub struct Sanitizer {
    anchor_open: Regex,
    anchor_close: Regex,
    fragments: Vec<Regex>,
    mailto_link: Regex,
    compose_link: Regex,
    handle: Regex,
    email: Regex,
    tag: Regex,
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Sanitizer {
    pub fn new() -> Self {
        let email_pat = r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}";
        Self {
            anchor_open: Regex::new(r"(?i)<a\s[^>]*>").unwrap(),
            anchor_close: Regex::new(r"(?i)</a\s*>").unwrap(),
            // Dangling attribute debris left behind by malformed anchors,
            // most specific patterns first
            fragments: vec![
                Regex::new(r#"(?i)"\s*target="_blank"\s*rel="noopener\s*noreferrer"\s*style="[^"]*">"#)
                    .unwrap(),
                Regex::new(r#"(?i)"\s*target="_blank"\s*rel="noopener\s*noreferrer">"#).unwrap(),
                Regex::new(r#"(?i)"\s*target="_blank">"#).unwrap(),
                Regex::new(r#"(?i)style="[^"]*">"#).unwrap(),
                Regex::new(r#"(?i)rel="[^"]*">"#).unwrap(),
                Regex::new(r#""\s*>"#).unwrap(),
            ],
            mailto_link: Regex::new(&format!(r"(?i)\[({email_pat})\]\(mailto:[^)]+\)")).unwrap(),
            compose_link: Regex::new(&format!(
                r"(?i)\[({email_pat})\]\(https://mail\.google\.com[^)]+\)"
            ))
            .unwrap(),
            handle: Regex::new(r"(?i)@fedkiit").unwrap(),
            email: Regex::new(email_pat).unwrap(),
            tag: Regex::new(r"(?is)<(/?)([a-zA-Z][a-zA-Z0-9]*)\b[^>]*>").unwrap(),
        }
    }

    /// Run the full pipeline over one assistant message.
    pub fn clean(&self, text: &str) -> String {
        // 1. Raw anchor markup: tags go, inner text stays
        let text = self.anchor_open.replace_all(text, "");
        let text = self.anchor_close.replace_all(&text, "");

        // 2. Attribute fragments orphaned by step 1 on malformed input
        let mut text = text.into_owned();
        for re in &self.fragments {
            text = re.replace_all(&text, "").into_owned();
        }

        // 3. Collapse [addr](mailto:addr) / [addr](compose-url) to the bare
        //    address when the label already is the address
        let text = self.mailto_link.replace_all(&text, "$1");
        let text = self.compose_link.replace_all(&text, "$1");

        // 4. Bare handle mention -> profile link. Skips handles inside URL
        //    paths and labels that are already linked.
        let text = rewrite_guarded(
            &text,
            &self.handle,
            |prev, next| {
                prev != Some('/') && prev != Some('[') && next != Some('/') && next != Some(']')
            },
            |_| format!("[{SOCIAL_HANDLE}]({SOCIAL_PROFILE_URL})"),
        );

        // 5. Remaining bare addresses -> compose links
        let text = rewrite_guarded(
            &text,
            &self.email,
            |prev, next| prev != Some('[') && next != Some(']'),
            |addr| format!("[{addr}](https://mail.google.com/mail/?view=cm&to={addr})"),
        );

        // 6. Allow-list pass: keep inline formatting tags without their
        //    attributes, strip everything else down to inner text
        self.tag
            .replace_all(&text, |caps: &Captures| {
                let name = caps[2].to_lowercase();
                if ALLOWED_TAGS.contains(&name.as_str()) {
                    format!("<{}{}>", &caps[1], name)
                } else {
                    String::new()
                }
            })
            .into_owned()
    }
}

/// Replace matches of `re` for which `guard(prev_char, next_char)` holds;
/// other matches pass through untouched. Replacements are never rescanned.
fn rewrite_guarded(
    text: &str,
    re: &Regex,
    guard: impl Fn(Option<char>, Option<char>) -> bool,
    rewrite: impl Fn(&str) -> String,
) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for m in re.find_iter(text) {
        let prev = text[..m.start()].chars().next_back();
        let next = text[m.end()..].chars().next();
        out.push_str(&text[last..m.start()]);
        if guard(prev, next) {
            out.push_str(&rewrite(m.as_str()));
        } else {
            out.push_str(m.as_str());
        }
        last = m.end();
    }
    out.push_str(&text[last..]);
    out
}

/// One-shot convenience over [`Sanitizer::clean`].
pub fn clean_message(text: &str) -> String {
    Sanitizer::new().clean(text)
}
