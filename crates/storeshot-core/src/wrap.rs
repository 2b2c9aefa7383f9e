use crate::font::TextMeasure;

/// Greedy word wrap.
///
/// Words (split on whitespace) are appended to the current line while the
/// space-joined candidate measures `<= max_width`; otherwise the current line is
/// flushed and the word starts a new one. A word wider than `max_width` still
/// gets a line of its own (no mid-word breaks). Empty or blank input yields no lines.
pub fn wrap_text<M: TextMeasure + ?Sized>(text: &str, measure: &M, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if measure.text_width(&candidate) <= max_width {
            current = candidate;
        } else {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    struct PerChar(f32);

    impl TextMeasure for PerChar {
        fn text_width(&self, text: &str) -> f32 {
            text.chars().count() as f32 * self.0
        }
    }

    #[test]
    fn packs_greedily() {
        let lines = wrap_text("aa bb cc dd", &PerChar(1.0), 5.0);
        assert_eq!(lines, vec!["aa bb", "cc dd"]);
    }

    #[test]
    fn exact_fit_is_accepted() {
        let lines = wrap_text("abc de", &PerChar(10.0), 60.0);
        assert_eq!(lines, vec!["abc de"]);
    }

    #[test]
    fn overlong_word_sits_alone() {
        let lines = wrap_text("hi extraordinary yo", &PerChar(1.0), 6.0);
        assert_eq!(lines, vec!["hi", "extraordinary", "yo"]);
    }

    #[test]
    fn blank_input_has_no_lines() {
        assert!(wrap_text("", &PerChar(1.0), 10.0).is_empty());
        assert!(wrap_text("   \t ", &PerChar(1.0), 10.0).is_empty());
    }
}
