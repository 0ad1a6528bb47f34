//! Age-band complexity tables for story generation.
//!
//! Fixed lookup tables, not computed: the reader's age is thresholded into
//! four bands, each selecting the narrative parameters fed into the
//! generation prompt.

/// Generation parameters selected by an age band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeBand {
    /// Narrative complexity label.
    pub complexity: &'static str,
    /// Target word-count range per story part.
    pub word_limit: &'static str,
    /// Vocabulary tier.
    pub vocabulary: &'static str,
    /// Illustration-emphasis tier.
    pub image_emphasis: &'static str,
    /// Interaction style woven into the narration.
    pub interaction_style: &'static str,
}

/// Look up the band for a reader age in years.
///
/// Thresholds: under 3, 3-4, 5-7, 8 and up.
#[must_use]
pub fn band_for_age(age: Option<u32>) -> AgeBand {
    match age {
        Some(n) if n >= 8 => AgeBand {
            complexity: "moderate",
            word_limit: "75-100",
            vocabulary: "intermediate",
            image_emphasis: "medium",
            interaction_style: "thought-provoking questions and cultural discussions",
        },
        Some(n) if n >= 5 => AgeBand {
            complexity: "easy",
            word_limit: "60-80",
            vocabulary: "elementary",
            image_emphasis: "medium-high",
            interaction_style: "simple questions and counting activities",
        },
        Some(n) if n >= 3 => AgeBand {
            complexity: "very simple",
            word_limit: "50-70",
            vocabulary: "basic",
            image_emphasis: "high",
            interaction_style: "basic actions and sound effects",
        },
        // Under 3, or an age we could not parse at all.
        _ => AgeBand {
            complexity: "extremely simple",
            word_limit: "30-50",
            vocabulary: "basic",
            image_emphasis: "very high",
            interaction_style: "simple gestures and repetitive phrases",
        },
    }
}

/// Extract the leading integer from an age value such as `"6"` or `"3-5"`.
///
/// Returns `None` when the string has no leading digits; the youngest band
/// is used in that case.
#[must_use]
pub fn leading_age(age: &str) -> Option<u32> {
    let digits: String = age.trim().chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toddler_band() {
        let band = band_for_age(Some(2));
        assert_eq!(band.complexity, "extremely simple");
        assert_eq!(band.word_limit, "30-50");
        assert_eq!(band.image_emphasis, "very high");
    }

    #[test]
    fn preschool_band() {
        let band = band_for_age(Some(3));
        assert_eq!(band.complexity, "very simple");
        assert_eq!(band.word_limit, "50-70");
        assert_eq!(band_for_age(Some(4)), band);
    }

    #[test]
    fn early_reader_band() {
        let band = band_for_age(Some(5));
        assert_eq!(band.complexity, "easy");
        assert_eq!(band.vocabulary, "elementary");
        assert_eq!(band_for_age(Some(7)), band);
    }

    #[test]
    fn older_reader_band() {
        let band = band_for_age(Some(8));
        assert_eq!(band.complexity, "moderate");
        assert_eq!(band.word_limit, "75-100");
        assert_eq!(band_for_age(Some(12)), band);
    }

    #[test]
    fn unparsed_age_falls_to_youngest_band() {
        assert_eq!(band_for_age(None), band_for_age(Some(1)));
    }

    #[test]
    fn leading_age_plain() {
        assert_eq!(leading_age("6"), Some(6));
        assert_eq!(leading_age(" 10 "), Some(10));
    }

    #[test]
    fn leading_age_range() {
        // Age groups arrive as ranges like "3-5"; the lower bound wins.
        assert_eq!(leading_age("3-5"), Some(3));
        assert_eq!(leading_age("8-10"), Some(8));
    }

    #[test]
    fn leading_age_non_numeric() {
        assert_eq!(leading_age("toddler"), None);
        assert_eq!(leading_age(""), None);
    }
}
