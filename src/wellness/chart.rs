use chrono::{DateTime, Utc};
use serde::Serialize;

use super::mood::MoodCategory;
use crate::models::mood_entry::MoodEntry;

/// Entries considered for dashboard charts.
pub const CHART_WINDOW: i64 = 30;

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct MoodCount {
    pub category: MoodCategory,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct TimelinePoint {
    /// MM/DD
    pub date: String,
    pub mood: MoodCategory,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct MoodChart {
    pub mood_counts: Vec<MoodCount>,
    pub mood_timeline: Vec<TimelinePoint>,
}

/// Build chart series from entries ordered newest first. The timeline comes
/// out oldest first; counts list only categories that occur, in category order.
pub fn mood_chart(entries_newest_first: &[MoodEntry]) -> MoodChart {
    let mood_timeline: Vec<TimelinePoint> = entries_newest_first
        .iter()
        .rev()
        .map(|e| TimelinePoint {
            date: e.created_at.format("%m/%d").to_string(),
            mood: e.category,
            timestamp: e.created_at,
        })
        .collect();

    let mood_counts = MoodCategory::ALL
        .into_iter()
        .map(|category| MoodCount {
            category,
            count: entries_newest_first
                .iter()
                .filter(|e| e.category == category)
                .count(),
        })
        .filter(|c| c.count > 0)
        .collect();

    MoodChart {
        mood_counts,
        mood_timeline,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn entry(category: MoodCategory, day: u32) -> MoodEntry {
        let mut e = MoodEntry::new(Uuid::nil(), "x", category, "s".into(), "keyword");
        e.created_at = Utc.with_ymd_and_hms(2026, 4, day, 9, 0, 0).unwrap();
        e
    }

    #[test]
    fn test_empty_history() {
        let chart = mood_chart(&[]);
        assert!(chart.mood_counts.is_empty());
        assert!(chart.mood_timeline.is_empty());
    }

    #[test]
    fn test_counts_and_chronological_timeline() {
        // newest first, as stores return them
        let entries = vec![
            entry(MoodCategory::Sad, 3),
            entry(MoodCategory::Positive, 2),
            entry(MoodCategory::Sad, 1),
        ];
        let chart = mood_chart(&entries);

        assert_eq!(
            chart.mood_counts,
            vec![
                MoodCount { category: MoodCategory::Positive, count: 1 },
                MoodCount { category: MoodCategory::Sad, count: 2 },
            ]
        );
        let dates: Vec<&str> = chart.mood_timeline.iter().map(|p| p.date.as_str()).collect();
        assert_eq!(dates, vec!["04/01", "04/02", "04/03"]);
        assert_eq!(chart.mood_timeline[0].mood, MoodCategory::Sad);
    }
}
