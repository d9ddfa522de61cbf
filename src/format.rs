//! Turns a prose summary into bulleted display text.

/// Marker placed in front of every sentence
pub const BULLET: &str = "•";

const SENTENCE_DELIMITER: &str = ". ";
const LINE_SEPARATOR: &str = "\n\n";

/// Render each sentence of `summary` as its own bulleted line.
///
/// Sentences are split on `". "`, empty fragments are dropped and every line
/// ends with a period. Lines that already carry a bullet are not bulleted
/// twice, so formatting the output again returns it unchanged.
pub fn format_bullets(summary: &str) -> String {
    summary
        .lines()
        .flat_map(|line| line.split(SENTENCE_DELIMITER))
        .map(|fragment| {
            let fragment = fragment.trim();
            fragment
                .strip_prefix(BULLET)
                .map(str::trim_start)
                .unwrap_or(fragment)
        })
        .filter(|fragment| !fragment.is_empty())
        .map(|fragment| {
            if fragment.ends_with('.') {
                format!("{BULLET} {fragment}")
            } else {
                format!("{BULLET} {fragment}.")
            }
        })
        .collect::<Vec<_>>()
        .join(LINE_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn three_sentences_become_three_bullets() {
        assert_eq!(format_bullets("A. B. C"), "• A.\n\n• B.\n\n• C.");
    }

    #[test]
    fn existing_period_is_not_doubled() {
        assert_eq!(
            format_bullets("Rust is fast. It is also safe."),
            "• Rust is fast.\n\n• It is also safe."
        );
    }

    #[test]
    fn empty_fragments_are_dropped() {
        assert_eq!(format_bullets("One. . Two.  "), "• One.\n\n• Two.");
        assert_eq!(format_bullets(""), "");
        assert_eq!(format_bullets("   "), "");
    }

    #[test]
    fn formatting_is_idempotent() {
        let once = format_bullets("First point. Second point. Third point");
        assert_eq!(format_bullets(&once), once);
    }

    #[test]
    fn every_line_is_bulleted_and_terminated() {
        let formatted = format_bullets("alpha. beta gamma. delta? epsilon");
        for line in formatted.split(LINE_SEPARATOR) {
            assert!(line.starts_with("• "), "{line:?}");
            assert!(line.ends_with('.'), "{line:?}");
        }
    }
}
