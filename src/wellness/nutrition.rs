use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FoodKind {
    Healthy,
    Neutral,
    Unhealthy,
}

#[derive(Debug, Clone, Copy)]
pub struct FoodItem {
    pub name: &'static str,
    pub calories: u32,
    pub kind: FoodKind,
}

const fn food(name: &'static str, calories: u32, kind: FoodKind) -> FoodItem {
    FoodItem { name, calories, kind }
}

/// Known foods with a rough per-serving calorie value. Matched as substrings of
/// the lowercased meal text, so "cake" also fires inside "pancake".
pub const FOOD_TABLE: &[FoodItem] = &[
    food("apple", 95, FoodKind::Healthy),
    food("banana", 105, FoodKind::Healthy),
    food("orange", 62, FoodKind::Healthy),
    food("broccoli", 55, FoodKind::Healthy),
    food("salad", 150, FoodKind::Healthy),
    food("oatmeal", 150, FoodKind::Healthy),
    food("yogurt", 100, FoodKind::Healthy),
    food("salmon", 208, FoodKind::Healthy),
    food("avocado", 240, FoodKind::Healthy),
    food("nuts", 170, FoodKind::Healthy),
    food("vegetable", 80, FoodKind::Healthy),
    food("egg", 70, FoodKind::Neutral),
    food("rice", 130, FoodKind::Neutral),
    food("bread", 80, FoodKind::Neutral),
    food("chicken", 165, FoodKind::Neutral),
    food("pasta", 200, FoodKind::Neutral),
    food("sandwich", 250, FoodKind::Neutral),
    food("cheese", 113, FoodKind::Neutral),
    food("milk", 103, FoodKind::Neutral),
    food("steak", 271, FoodKind::Neutral),
    food("pizza", 285, FoodKind::Unhealthy),
    food("burger", 354, FoodKind::Unhealthy),
    food("fries", 365, FoodKind::Unhealthy),
    food("cake", 350, FoodKind::Unhealthy),
    food("cookie", 160, FoodKind::Unhealthy),
    food("chocolate", 210, FoodKind::Unhealthy),
    food("ice cream", 270, FoodKind::Unhealthy),
    food("soda", 140, FoodKind::Unhealthy),
    food("donut", 250, FoodKind::Unhealthy),
    food("chips", 150, FoodKind::Unhealthy),
];

/// Any of these anywhere in the text scales the whole total by 1.5.
pub const LARGE_PORTION_KEYWORDS: &[&str] =
    &["large", "big", "huge", "extra", "double", "giant", "jumbo"];

const NUMBER_WORDS: &[(&str, u32)] = &[
    ("one", 1),
    ("two", 2),
    ("three", 3),
    ("four", 4),
    ("five", 5),
    ("six", 6),
    ("seven", 7),
    ("eight", 8),
    ("nine", 9),
    ("ten", 10),
];

pub const HIGH_CALORIE_THRESHOLD: u32 = 2000;
pub const GOOD_CALORIE_THRESHOLD: u32 = 1200;
pub const DAILY_WATER_GOAL: i32 = 8;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CalorieLevel {
    Low,
    Good,
    High,
}

impl CalorieLevel {
    pub fn from_total(total: u32) -> Self {
        if total > HIGH_CALORIE_THRESHOLD {
            CalorieLevel::High
        } else if total > GOOD_CALORIE_THRESHOLD {
            CalorieLevel::Good
        } else {
            CalorieLevel::Low
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Hydration {
    Sufficient,
    Insufficient,
}

impl Hydration {
    pub fn from_glasses(glasses: i32) -> Self {
        if glasses >= DAILY_WATER_GOAL {
            Hydration::Sufficient
        } else {
            Hydration::Insufficient
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DetectedFood {
    pub name: &'static str,
    pub quantity: u32,
    pub calories: u32,
    pub kind: FoodKind,
}

#[derive(Debug, Clone, Serialize)]
pub struct IntakeAnalysis {
    pub total_calories: u32,
    pub calorie_level: CalorieLevel,
    pub hydration: Hydration,
    pub large_portion: bool,
    pub foods: Vec<DetectedFood>,
    pub healthy_count: usize,
    pub unhealthy_count: usize,
    pub advice: String,
}

pub fn analyze_intake(meals: &str, water_glasses: i32) -> IntakeAnalysis {
    let text = meals.to_lowercase();

    let foods: Vec<DetectedFood> = FOOD_TABLE
        .iter()
        .filter_map(|item| {
            let quantity: u32 = text
                .match_indices(item.name)
                .map(|(idx, _)| quantity_before(&text[..idx]))
                .sum();
            (quantity > 0).then(|| DetectedFood {
                name: item.name,
                quantity,
                calories: item.calories.saturating_mul(quantity),
                kind: item.kind,
            })
        })
        .collect();

    let large_portion = LARGE_PORTION_KEYWORDS.iter().any(|kw| text.contains(kw));
    let base: u32 = foods.iter().map(|f| f.calories).fold(0, u32::saturating_add);
    let total_calories = if large_portion {
        base.saturating_mul(3) / 2
    } else {
        base
    };

    let healthy_count = foods.iter().filter(|f| f.kind == FoodKind::Healthy).count();
    let unhealthy_count = foods.iter().filter(|f| f.kind == FoodKind::Unhealthy).count();
    let calorie_level = CalorieLevel::from_total(total_calories);
    let hydration = Hydration::from_glasses(water_glasses);

    let advice = build_advice(
        total_calories,
        calorie_level,
        water_glasses,
        hydration,
        healthy_count > unhealthy_count,
    );

    IntakeAnalysis {
        total_calories,
        calorie_level,
        hydration,
        large_portion,
        foods,
        healthy_count,
        unhealthy_count,
        advice,
    }
}

/// Quantity written right before a food mention: "2 eggs", "three large
/// apples". One size word between the number and the food is skipped.
fn quantity_before(prefix: &str) -> u32 {
    let mut tokens = prefix.split_whitespace().rev();
    let mut token = match tokens.next() {
        Some(t) => t,
        None => return 1,
    };
    if LARGE_PORTION_KEYWORDS.contains(&token) || token == "small" || token == "medium" {
        token = match tokens.next() {
            Some(t) => t,
            None => return 1,
        };
    }

    if let Ok(n) = token.parse::<u32>() {
        return n;
    }
    NUMBER_WORDS
        .iter()
        .find(|(word, _)| *word == token)
        .map(|(_, n)| *n)
        .unwrap_or(1)
}

fn build_advice(
    total: u32,
    level: CalorieLevel,
    water_glasses: i32,
    hydration: Hydration,
    mostly_healthy: bool,
) -> String {
    let calories = match level {
        CalorieLevel::High => format!(
            "Your estimated intake of {total} calories is on the high side. Consider lighter portions or swapping a heavy dish for vegetables."
        ),
        CalorieLevel::Good => format!(
            "Your estimated intake of {total} calories is in a healthy range. Nice balance!"
        ),
        CalorieLevel::Low => format!(
            "Your estimated intake of {total} calories looks low. Make sure you're eating enough to fuel your day."
        ),
    };

    let water = match hydration {
        Hydration::Sufficient => {
            format!("Great job staying hydrated with {water_glasses} glasses of water!")
        }
        Hydration::Insufficient => format!(
            "You had {water_glasses} glasses of water. Aim for at least {DAILY_WATER_GOAL} to stay hydrated."
        ),
    };

    let balance = if mostly_healthy {
        "You're choosing plenty of wholesome foods. Keep it up!"
    } else {
        "Try adding more fruits, vegetables, or lean proteins to balance your meals."
    };

    [calories.as_str(), water.as_str(), balance].join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calories_of(name: &str) -> u32 {
        FOOD_TABLE.iter().find(|f| f.name == name).unwrap().calories
    }

    #[test]
    fn test_reference_calorie_values() {
        assert_eq!(calories_of("egg"), 70);
        assert_eq!(calories_of("rice"), 130);
        assert_eq!(calories_of("pizza"), 285);
        assert_eq!(calories_of("fries"), 365);
    }

    #[test]
    fn test_eggs_and_rice() {
        let a = analyze_intake("2 eggs and rice", 8);
        assert_eq!(a.total_calories, 2 * 70 + 130);
        assert!(!a.large_portion);
        assert_eq!(a.foods.len(), 2);
    }

    #[test]
    fn test_large_portion_multiplier() {
        let a = analyze_intake("large pizza and fries", 3);
        assert!(a.large_portion);
        assert_eq!(a.total_calories, 975);
        assert_eq!(a.unhealthy_count, 2);
    }

    #[test]
    fn test_repeated_mentions_add_up() {
        let a = analyze_intake("apple for breakfast, apple after lunch", 0);
        let apple = a.foods.iter().find(|f| f.name == "apple").unwrap();
        assert_eq!(apple.quantity, 2);
        assert_eq!(a.total_calories, 190);
    }

    #[test]
    fn test_number_words_and_size_word_between() {
        assert_eq!(analyze_intake("three bananas", 0).total_calories, 315);
        // "2 large eggs": quantity 2, and "large" triggers the multiplier.
        assert_eq!(analyze_intake("2 large eggs", 0).total_calories, 210);
    }

    #[test]
    fn test_substring_double_count_is_accepted() {
        let a = analyze_intake("pancake", 0);
        assert!(a.foods.iter().any(|f| f.name == "cake"));
    }

    #[test]
    fn test_calorie_levels() {
        assert_eq!(CalorieLevel::from_total(0), CalorieLevel::Low);
        assert_eq!(CalorieLevel::from_total(1200), CalorieLevel::Low);
        assert_eq!(CalorieLevel::from_total(1201), CalorieLevel::Good);
        assert_eq!(CalorieLevel::from_total(2000), CalorieLevel::Good);
        assert_eq!(CalorieLevel::from_total(2001), CalorieLevel::High);
    }

    #[test]
    fn test_hydration_threshold() {
        assert_eq!(Hydration::from_glasses(7), Hydration::Insufficient);
        assert_eq!(Hydration::from_glasses(8), Hydration::Sufficient);
        assert_eq!(Hydration::from_glasses(12), Hydration::Sufficient);
    }

    #[test]
    fn test_advice_combines_all_three_parts() {
        let a = analyze_intake("salad and salmon", 9);
        assert_eq!(a.calorie_level, CalorieLevel::Low);
        assert!(a.advice.contains("358 calories looks low"));
        assert!(a.advice.contains("Great job staying hydrated with 9 glasses"));
        assert!(a.advice.contains("wholesome foods"));
    }

    #[test]
    fn test_advice_nudges_when_unhealthy_dominates() {
        let a = analyze_intake("burger, fries and a soda", 2);
        assert_eq!(a.healthy_count, 0);
        assert_eq!(a.unhealthy_count, 3);
        assert!(a.advice.contains("Aim for at least 8"));
        assert!(a.advice.contains("more fruits, vegetables"));
    }

    #[test]
    fn test_unknown_food_is_zero() {
        let a = analyze_intake("mystery casserole", 4);
        assert_eq!(a.total_calories, 0);
        assert!(a.foods.is_empty());
        assert_eq!(a.calorie_level, CalorieLevel::Low);
    }

    #[test]
    fn test_explicit_zero_counts_nothing() {
        let a = analyze_intake("0 eggs", 0);
        assert_eq!(a.total_calories, 0);
        assert!(a.foods.is_empty());

        let a = analyze_intake("0 eggs and rice", 0);
        assert_eq!(a.total_calories, 130);
        assert_eq!(a.foods.len(), 1);
    }
}
