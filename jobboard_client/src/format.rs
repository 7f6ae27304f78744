use std::borrow::Cow;

/// Descriptions longer than this many characters are shortened on job cards.
pub const DESCRIPTION_PREVIEW_CHARS: usize = 150;

/// Formats `value` with `,` as thousands separator, e.g. `75000` as `75,000`.
pub fn thousands(value: i32) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Shortens `description` to its first [`DESCRIPTION_PREVIEW_CHARS`]
/// characters followed by `...`.
pub fn description_preview(description: &str) -> Cow<'_, str> {
    match description.char_indices().nth(DESCRIPTION_PREVIEW_CHARS) {
        Some((end, _)) => format!("{}...", &description[..end]).into(),
        None => description.into(),
    }
}

/// The salary line of a job card.
pub fn salary_line(salary: i32) -> String {
    format!("₹{}/year", thousands(salary))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn thousands_separators() {
        for (value, expected) in [
            (0, "0"),
            (999, "999"),
            (1000, "1,000"),
            (75000, "75,000"),
            (1_250_000, "1,250,000"),
            (i32::MAX, "2,147,483,647"),
            (-4200, "-4,200"),
        ] {
            assert_eq!(thousands(value), expected);
        }
    }

    #[test]
    fn short_description_is_unchanged() {
        let description = "x".repeat(150);
        assert_eq!(description_preview(&description), description);
    }

    #[test]
    fn long_description_is_truncated() {
        let description = format!("{}tail", "y".repeat(150));
        let preview = description_preview(&description);
        assert_eq!(preview, format!("{}...", "y".repeat(150)));
    }

    #[test]
    fn truncation_counts_characters() {
        let description = "ä".repeat(151);
        let preview = description_preview(&description);
        assert_eq!(preview.chars().count(), 153);
        assert!(preview.starts_with(&"ä".repeat(150)));
    }

    #[test]
    fn salary() {
        assert_eq!(salary_line(75000), "₹75,000/year");
    }
}
