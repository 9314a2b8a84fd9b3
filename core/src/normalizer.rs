//! Transcript normalizer: strips chat-transport noise from a raw
//! transcript, leaving only the lines that may carry bets.
//!
//! Pure function of its input and idempotent: re-applying `normalize`
//! to its own output is a no-op. Each step operates on the previous
//! step's output, in this order:
//!   1. literal `\n` escape sequences become real line breaks
//!   2. chat headers `[<timestamp>] <sender>: ` stripped at line start
//!   3. known system/notice lines removed by whole-line match
//!   4. attachment-reference lines removed
//!   5. inline comments (`#` to end of line) stripped
//!   6. blank lines dropped, surviving lines trimmed

use regex::Regex;
use std::sync::LazyLock;

/// `[1/2/26, 22:12:47] Some Sender: ` at line start.
static CHAT_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[\d+/\d+/\d+,? \d+:\d+(:\d+)?\] [^:]+: ").unwrap()
});

/// Whole-line system notices the chat transport injects.
static SYSTEM_LINES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)messages and calls are end-to-end encrypted",
        r"(?i)you created group",
        r"(?i)changed the group description",
        r"(?i)joined using an invite link",
        r"(?i)attached:",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

const COMMENT_MARKER: char = '#';

/// Clean a raw transcript down to candidate bet lines.
pub fn normalize(raw: &str) -> String {
    let text = raw.replace("\\n", "\n");

    let mut out: Vec<&str> = Vec::new();
    for line in text.lines() {
        let line = match CHAT_HEADER.find(line) {
            Some(m) => &line[m.end()..],
            None => line,
        };

        if SYSTEM_LINES.iter().any(|re| re.is_match(line)) {
            continue;
        }

        let line = match line.find(COMMENT_MARKER) {
            Some(idx) => &line[..idx],
            None => line,
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        out.push(line);
    }

    out.join("\n")
}
