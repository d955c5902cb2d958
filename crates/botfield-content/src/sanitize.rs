//! Output sanitization for generated posts.
//!
//! Stages run in a fixed order:
//! 1. strip one layer of enclosing quotes
//! 2. strip supplementary-plane emoji
//! 3. strip `#hashtag` tokens
//! 4. strip a leading "Sure," / "Here is," preamble
//! 5. collapse whitespace and trim

use regex::Regex;
use std::sync::LazyLock;

static HASHTAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#\w+").expect("valid regex"));

static PREAMBLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*(?:sure|here is),").expect("valid regex"));

const QUOTES: [char; 6] = ['"', '\'', '\u{201C}', '\u{201D}', '\u{2018}', '\u{2019}'];

/// Run the pipeline until the text stops changing.
///
/// A single pass strips one layer of each artifact; repeating it makes the
/// result idempotent. Every pass after the first either removes characters
/// or leaves the text unchanged, so the loop terminates.
pub fn sanitize(raw: &str) -> String {
    let mut current = sanitize_pass(raw);
    loop {
        let next = sanitize_pass(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

/// One pass of the five stages.
pub fn sanitize_pass(raw: &str) -> String {
    let text = strip_enclosing_quotes(raw);
    let text = strip_emoji(text);
    let text = strip_hashtags(&text);
    let text = strip_preamble(&text);
    collapse_whitespace(text)
}

/// Remove a matching layer of quotes around the whole text.
pub fn strip_enclosing_quotes(text: &str) -> &str {
    let trimmed = text.trim();
    let mut chars = trimmed.chars();
    match (chars.next(), chars.next_back()) {
        (Some(first), Some(last)) if QUOTES.contains(&first) && QUOTES.contains(&last) => {
            &trimmed[first.len_utf8()..trimmed.len() - last.len_utf8()]
        }
        _ => trimmed,
    }
}

/// Drop pictographs in U+1F000..=U+1FAFF.
pub fn strip_emoji(text: &str) -> String {
    text.chars().filter(|c| !is_supplementary_emoji(*c)).collect()
}

fn is_supplementary_emoji(c: char) -> bool {
    ('\u{1F000}'..='\u{1FAFF}').contains(&c)
}

pub fn strip_hashtags(text: &str) -> String {
    HASHTAG.replace_all(text, "").into_owned()
}

/// Remove a single leading "Sure," or "Here is,".
pub fn strip_preamble(text: &str) -> &str {
    match PREAMBLE.find(text) {
        Some(m) => &text[m.end()..],
        None => text,
    }
}

pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_enclosing_quotes() {
        assert_eq!(sanitize("\"A quiet morning.\""), "A quiet morning.");
        assert_eq!(sanitize("\u{201C}Curly quotes too.\u{201D}"), "Curly quotes too.");
        assert_eq!(sanitize("She said \"hi\" today"), "She said \"hi\" today");
    }

    #[test]
    fn strips_emoji_and_hashtags() {
        assert_eq!(
            sanitize("Momentum matters \u{1F680}\u{1F525} #grind #tick42"),
            "Momentum matters"
        );
    }

    #[test]
    fn strips_preamble_case_insensitively() {
        assert_eq!(sanitize("Sure, here you go."), "here you go.");
        assert_eq!(sanitize("HERE IS, a thought."), "a thought.");
        assert_eq!(sanitize("Surely not."), "Surely not.");
    }

    #[test]
    fn quotes_go_before_emoji() {
        // Emoji removal first would leave `""` behind.
        assert_eq!(sanitize("\"\u{1F600}\""), "");
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(sanitize("  one\n\n two\t three  "), "one two three");
    }

    #[test]
    fn keeps_bmp_symbols() {
        assert_eq!(sanitize("Tick 7 \u{2014} steady"), "Tick 7 \u{2014} steady");
    }

    #[test]
    fn sanitize_is_idempotent() {
        let samples = [
            "\"\"Double quoted\"\"",
            "Sure, Sure, twice",
            "\u{1F600}\"hidden quotes\"",
            "#tag \"quoted after tag\"",
            "Sure, \"quoted after preamble\" #x",
            "  plain text  ",
            "",
            "\"",
        ];
        for raw in samples {
            let once = sanitize(raw);
            assert_eq!(sanitize(&once), once, "input: {raw:?}");
        }
    }

    #[test]
    fn single_pass_strips_one_layer() {
        assert_eq!(sanitize_pass("\"\"x\"\""), "\"x\"");
        assert_eq!(sanitize_pass("Sure, Sure, x"), "Sure, x");
    }
}
