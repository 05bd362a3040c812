//! Line-wrapped console output.

use std::io::{self, Write};

use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrapOptions {
    /// Maximum display width of a line, indentation included.
    pub width: usize,
    pub indent: String,
    /// Indentation for continuation lines of a wrapped paragraph.
    pub subsequent_indent: String,
}

impl Default for WrapOptions {
    fn default() -> Self {
        Self {
            width: 88,
            indent: String::new(),
            subsequent_indent: String::new(),
        }
    }
}

impl WrapOptions {
    pub fn indented(width: usize, indent: &str) -> Self {
        Self {
            width,
            indent: indent.to_string(),
            subsequent_indent: indent.to_string(),
        }
    }
}

/// Greedy word wrap. Existing line breaks are kept; a word wider than the
/// available width is placed on its own line rather than split.
pub fn wrap(text: &str, options: &WrapOptions) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut line = options.indent.clone();
        let mut line_width = line.width();
        let mut has_word = false;
        for word in paragraph.split_whitespace() {
            let word_width = word.width();
            if has_word && line_width + 1 + word_width > options.width {
                lines.push(line);
                line = options.subsequent_indent.clone();
                line_width = line.width();
                has_word = false;
            }
            if has_word {
                line.push(' ');
                line_width += 1;
            }
            line.push_str(word);
            line_width += word_width;
            has_word = true;
        }
        lines.push(if has_word { line } else { String::new() });
    }
    lines
}

/// Wraps `text` and writes it to `out`.
pub fn write_wrapped<W: Write>(out: &mut W, text: &str, options: &WrapOptions) -> io::Result<()> {
    for line in wrap(text, options) {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

/// Wraps `text` and writes it to stderr.
pub fn logw(text: &str, options: &WrapOptions) {
    let stderr = io::stderr();
    let _ = write_wrapped(&mut stderr.lock(), text, options);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_at_width() {
        let opts = WrapOptions {
            width: 10,
            ..WrapOptions::default()
        };
        assert_eq!(
            wrap("the quick brown fox jumps", &opts),
            vec!["the quick", "brown fox", "jumps"]
        );
    }

    #[test]
    fn indentation_counts_toward_width() {
        let opts = WrapOptions {
            width: 10,
            indent: "- ".into(),
            subsequent_indent: "  ".into(),
        };
        assert_eq!(
            wrap("alpha beta gamma", &opts),
            vec!["- alpha", "  beta", "  gamma"]
        );
    }

    #[test]
    fn long_words_are_not_split() {
        let opts = WrapOptions {
            width: 4,
            ..WrapOptions::default()
        };
        assert_eq!(wrap("abcdefgh ij", &opts), vec!["abcdefgh", "ij"]);
    }

    #[test]
    fn keeps_blank_lines_and_measures_wide_chars() {
        let opts = WrapOptions {
            width: 5,
            ..WrapOptions::default()
        };
        assert_eq!(wrap("日本 語\n\nok", &opts), vec!["日本", "語", "", "ok"]);
    }

    #[test]
    fn writes_to_any_sink() {
        let mut buf = Vec::new();
        write_wrapped(&mut buf, "a b", &WrapOptions::indented(80, "  ")).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "  a b\n");
    }
}
