//! Text layout helpers

/// Wrap `text` to lines of at most `max` characters.
///
/// Newlines are kept, runs of other whitespace collapse to one space, and
/// words longer than `max` are split.
pub fn wrap(text: &str, max: usize) -> Vec<String> {
    let max = max.max(1);
    let mut lines = Vec::new();

    for source_line in text.split('\n') {
        let mut current = String::new();
        let mut current_len = 0;

        for word in source_line.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();

            while !word.is_empty() {
                let needed = if current_len == 0 {
                    word.len()
                } else {
                    current_len + 1 + word.len()
                };

                if needed <= max {
                    if current_len > 0 {
                        current.push(' ');
                        current_len += 1;
                    }
                    current.extend(word.iter());
                    current_len += word.len();
                    word.clear();
                } else if current_len > 0 {
                    lines.push(std::mem::take(&mut current));
                    current_len = 0;
                } else {
                    let rest = word.split_off(max);
                    lines.push(word.iter().collect());
                    word = rest;
                }
            }
        }

        lines.push(current);
    }

    lines
}

/// Left-pad `line` so it ends at column `width`
pub fn align_right(line: &str, width: usize) -> String {
    let len = line.chars().count();
    if len >= width {
        line.to_string()
    } else {
        format!("{}{line}", " ".repeat(width - len))
    }
}

/// Format a number without a trailing `.0` for whole values
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        let formatted = format!("{value:.2}");
        formatted
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_words() {
        assert_eq!(
            wrap("the quick brown fox jumps", 10),
            ["the quick", "brown fox", "jumps"]
        );
    }

    #[test]
    fn test_wrap_keeps_newlines_and_collapses_spaces() {
        assert_eq!(wrap("a   b\n\nc", 10), ["a b", "", "c"]);
    }

    #[test]
    fn test_wrap_breaks_long_words() {
        assert_eq!(wrap("abcdefghij", 4), ["abcd", "efgh", "ij"]);
        assert_eq!(wrap("hi abcdefgh", 4), ["hi", "abcd", "efgh"]);
    }

    #[test]
    fn test_wrap_counts_chars_not_bytes() {
        assert_eq!(wrap("привет мир", 6), ["привет", "мир"]);
    }

    #[test]
    fn test_align_right() {
        assert_eq!(align_right("ab", 5), "   ab");
        assert_eq!(align_right("abcdef", 3), "abcdef");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(2010.0), "2010");
        assert_eq!(format_number(50.12), "50.12");
        assert_eq!(format_number(62.3), "62.3");
        assert_eq!(format_number(-1.5), "-1.5");
        assert_eq!(format_number(0.004), "0");
    }
}
