// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Full commit message structure: header, body and footer.

use lazy_static::lazy_static;
use regex::Regex;

use super::header::{normalize_keyword, HeaderParser};

/// Marker line below which git discards the message (`commit.cleanup=scissors`).
const SCISSORS: &str = "------------------------ >8 ------------------------";

lazy_static! {
    /// A footer trailer: `Token: value`, `Token #value` or `BREAKING CHANGE: value`.
    static ref TRAILER_REGEX: Regex =
        Regex::new(r"^(?:BREAKING[ -]CHANGE|[A-Za-z][\w-]*)(?:: | #)\S").unwrap();

    static ref BREAKING_REGEX: Regex = Regex::new(r"^BREAKING[ -]CHANGE: \S").unwrap();

    /// Loose `word(scope)!:` prefix, used to report a type when the header does not match.
    static ref TYPE_HINT_REGEX: Regex =
        Regex::new(r"^\s*(?:[^\w\s(]+\s*)?(?P<type>[A-Za-z]+)(?:\([^)]*\))?!?:(?:\s|$)").unwrap();
}

/// A commit message split into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// The message after comment stripping.
    pub raw: String,
    /// The first line.
    pub header: String,
    /// Leading emoji.
    pub emoji: Option<String>,
    /// Commit type (lowercased by the header transform).
    pub commit_type: Option<String>,
    /// Scope.
    pub scope: Option<String>,
    /// Subject.
    pub subject: Option<String>,
    /// Body.
    pub body: Option<String>,
    /// Footer (trailers, breaking change notes).
    pub footer: Option<String>,
    /// Whether the header matched the header pattern.
    pub header_matched: bool,
    lines: Vec<String>,
    footer_start: Option<usize>,
}

impl Commit {
    /// Parse a raw commit message.
    ///
    /// Never fails: a header that does not match leaves scope and subject
    /// empty so that the rules report it.
    pub fn parse(message: &str, parser: &HeaderParser) -> Self {
        let raw = clean_message(message);
        let lines: Vec<String> = raw.lines().map(str::to_string).collect();
        let header = lines.first().cloned().unwrap_or_default();

        let (emoji, commit_type, scope, subject, header_matched) = match parser.parse(&header) {
            Ok(parsed) => (
                parsed.emoji,
                Some(parsed.commit_type).filter(|t| !t.is_empty()),
                parsed.scope.filter(|s| !s.is_empty()),
                Some(parsed.subject).filter(|s| !s.is_empty()),
                true,
            ),
            Err(e) => {
                tracing::debug!("{}", e);
                (None, type_hint(&header), None, None, false)
            }
        };

        let footer_start = find_footer_start(&lines);
        let body_end = footer_start.unwrap_or(lines.len());
        let body = join_section(lines.get(1..body_end).unwrap_or(&[]));
        let footer = footer_start.and_then(|start| join_section(&lines[start..]));

        Self {
            raw,
            header,
            emoji,
            commit_type,
            scope,
            subject,
            body,
            footer,
            header_matched,
            lines,
            footer_start,
        }
    }

    /// The line directly below the header, if any.
    pub fn line_after_header(&self) -> Option<&str> {
        self.lines.get(1).map(String::as_str)
    }

    /// The line directly above the footer, if a footer exists.
    pub fn line_before_footer(&self) -> Option<&str> {
        let start = self.footer_start?;
        self.lines.get(start.checked_sub(1)?).map(String::as_str)
    }
}

/// Strip git comment lines, the scissors section and surrounding blank lines.
pub fn clean_message(message: &str) -> String {
    let mut kept = Vec::new();
    for line in message.lines() {
        if line.starts_with('#') {
            if line.contains(SCISSORS) {
                break;
            }
            continue;
        }
        kept.push(line.trim_end());
    }

    let start = kept
        .iter()
        .position(|l| !l.is_empty())
        .unwrap_or(kept.len());
    let end = kept
        .iter()
        .rposition(|l| !l.is_empty())
        .map(|i| i + 1)
        .unwrap_or(start);

    kept[start..end].join("\n")
}

/// Recover a lowercase type keyword from a header that did not match.
pub fn type_hint(header: &str) -> Option<String> {
    TYPE_HINT_REGEX
        .captures(header)
        .and_then(|c| c.name("type"))
        .map(|m| normalize_keyword(m.as_str()))
}

/// The footer is the first paragraph made only of trailers, or opened by a
/// breaking change note. A paragraph right below the header counts too.
fn find_footer_start(lines: &[String]) -> Option<usize> {
    (1..lines.len()).find(|&i| {
        if i > 1 && !lines[i - 1].trim().is_empty() {
            return false;
        }
        let paragraph: Vec<&String> = lines[i..]
            .iter()
            .take_while(|l| !l.trim().is_empty())
            .collect();
        match paragraph.first() {
            Some(first) if BREAKING_REGEX.is_match(first) => true,
            Some(_) => paragraph.iter().all(|l| TRAILER_REGEX.is_match(l)),
            None => false,
        }
    })
}

fn join_section(lines: &[String]) -> Option<String> {
    let text = lines.join("\n");
    let text = text.trim_matches('\n');
    if text.trim().is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(message: &str) -> Commit {
        Commit::parse(message, &HeaderParser::default())
    }

    #[test]
    fn test_header_only() {
        let commit = parse("feat(api): add login");
        assert!(commit.header_matched);
        assert_eq!(commit.commit_type.as_deref(), Some("feat"));
        assert_eq!(commit.scope.as_deref(), Some("api"));
        assert_eq!(commit.subject.as_deref(), Some("add login"));
        assert!(commit.body.is_none());
        assert!(commit.footer.is_none());
        assert!(commit.line_after_header().is_none());
    }

    #[test]
    fn test_body_and_footer() {
        let commit = parse("fix: handle timeout\n\nRetry once before failing.\n\nCloses #42\nReviewed-by: Jo");
        assert_eq!(commit.body.as_deref(), Some("Retry once before failing."));
        assert_eq!(commit.footer.as_deref(), Some("Closes #42\nReviewed-by: Jo"));
        assert_eq!(commit.line_after_header(), Some(""));
        assert_eq!(commit.line_before_footer(), Some(""));
    }

    #[test]
    fn test_body_without_blank_line() {
        let commit = parse("fix: handle timeout\nRetry once before failing.");
        assert_eq!(commit.body.as_deref(), Some("Retry once before failing."));
        assert_eq!(commit.line_after_header(), Some("Retry once before failing."));
    }

    #[test]
    fn test_footer_directly_after_header() {
        let commit = parse("fix: handle timeout\nCloses #42");
        assert!(commit.body.is_none());
        assert_eq!(commit.footer.as_deref(), Some("Closes #42"));
        assert_eq!(commit.line_before_footer(), Some("fix: handle timeout"));
    }

    #[test]
    fn test_comments_stripped() {
        let message = "feat: add login\n\n# Please enter the commit message\n# Lines starting with '#' will be ignored\n";
        let commit = parse(message);
        assert_eq!(commit.raw, "feat: add login");
        assert!(commit.body.is_none());
    }

    #[test]
    fn test_scissors_discards_rest() {
        let message = "feat: add login\n\nBody text\n# ------------------------ >8 ------------------------\ndiff --git a/x b/x\n";
        let commit = parse(message);
        assert_eq!(commit.body.as_deref(), Some("Body text"));
        assert!(!commit.raw.contains("diff"));
    }

    #[test]
    fn test_no_match_keeps_type_hint() {
        let commit = parse("wip: something");
        assert!(!commit.header_matched);
        assert_eq!(commit.commit_type.as_deref(), Some("wip"));
        assert!(commit.scope.is_none());
        assert!(commit.subject.is_none());
    }

    #[test]
    fn test_type_hint() {
        assert_eq!(type_hint("WIP(core)!: x").as_deref(), Some("wip"));
        assert_eq!(type_hint("🚧 Wip: x").as_deref(), Some("wip"));
        assert_eq!(type_hint("just some text"), None);
        assert_eq!(type_hint("https://example.com is broken"), None);
        assert_eq!(type_hint("wip:"), Some("wip".to_string()));
    }

    #[test]
    fn test_empty_message() {
        let commit = parse("\n# only comments\n");
        assert_eq!(commit.header, "");
        assert!(commit.commit_type.is_none());
        assert!(commit.subject.is_none());
    }

    #[test]
    fn test_note_paragraph_is_body() {
        let commit = parse("fix: x\n\nNote: this explains the change\nin two lines");
        assert_eq!(
            commit.body.as_deref(),
            Some("Note: this explains the change\nin two lines")
        );
        assert!(commit.footer.is_none());

        let commit = parse("fix: x\nNote: this explains the change\nin two lines");
        assert!(commit.footer.is_none());
        assert!(commit.line_before_footer().is_none());
    }

    #[test]
    fn test_breaking_change_footer() {
        let commit = parse("feat: drop v1\n\nBREAKING CHANGE: v1 is gone\nmigrate to v2 first");
        assert!(commit.body.is_none());
        assert_eq!(
            commit.footer.as_deref(),
            Some("BREAKING CHANGE: v1 is gone\nmigrate to v2 first")
        );
    }
}
