//! Vegan meal extraction and food-type tagging.
//!
//! Rules are evaluated top to bottom and the first match wins, so the order of
//! [`FOOD_TYPE_PATTERNS`] is part of the behaviour: a meal mentioning both
//! potatoes and carrots is a `potato` meal.

use crate::domain::model::{ClassifiedMeal, FoodType, MealType};
use regex::Regex;
use std::sync::LazyLock;

/// Dietary tag the feed attaches to vegan dishes.
pub const VEGAN_MARKER: &str = "Veg";

pub const FOOD_TYPE_PATTERNS: &[(FoodType, &str)] = &[
    (FoodType::Potato, r"perunoita \("),
    (FoodType::Carrot, r"porkkan(oit)?aa? \(|Porkkanaraaste"),
    (FoodType::Strawberry, r"mansikoita \("),
    (FoodType::Seed, r"siemeniä \("),
    (FoodType::Rice, r"riisiä \("),
    (FoodType::Zucchini, r"kesäkurpitsaviipaleita \("),
    (FoodType::Smoothie, r"smoothie \("),
    (FoodType::Soup, r"keittoa? \("),
    (FoodType::Lentils, r"linssejä"),
    (FoodType::Stew, r"pataa? \("),
    (FoodType::Tomato, r"tomaatti \("),
];

pub const MEAL_TYPE_PATTERNS: &[(MealType, &str)] = &[(MealType::Main, r"(pataa|pihvejä|currya) \(")];

const DIETARY_CODES: &str = r"(?:VL|Veg|VS|L|M|G|K|A|\*)";

static FOOD_TYPE_RULES: LazyLock<Vec<(FoodType, Regex)>> =
    LazyLock::new(|| compile_rules(FOOD_TYPE_PATTERNS));

static MEAL_TYPE_RULES: LazyLock<Vec<(MealType, Regex)>> =
    LazyLock::new(|| compile_rules(MEAL_TYPE_PATTERNS));

static REDUNDANT_MARKERS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:, L, M, Veg)|(?:\*, )").expect("marker pattern should compile")
});

// "(L, M, Veg)" and friends at the very end of the description
static TRAILING_CODE_LIST: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(r"\s*\(\s*{c}(?:\s*,\s*{c})*\s*\)\s*$", c = DIETARY_CODES);
    Regex::new(&pattern).expect("code list pattern should compile")
});

fn compile_rules<T: Copy>(patterns: &[(T, &str)]) -> Vec<(T, Regex)> {
    patterns
        .iter()
        .map(|(tag, pattern)| {
            let regex = Regex::new(pattern).expect("classifier pattern should compile");
            (*tag, regex)
        })
        .collect()
}

/// Tag of the first rule matching `item`.
pub fn guess_type<T: Copy>(item: &str, rules: &[(T, Regex)]) -> Option<T> {
    rules
        .iter()
        .find(|(_, regex)| regex.is_match(item))
        .map(|(tag, _)| *tag)
}

pub fn food_type(description: &str) -> FoodType {
    guess_type(description, FOOD_TYPE_RULES.as_slice()).unwrap_or(FoodType::Generic)
}

pub fn meal_type(description: &str) -> Option<MealType> {
    guess_type(description, MEAL_TYPE_RULES.as_slice())
}

pub fn is_vegan(description: &str) -> bool {
    description.contains(VEGAN_MARKER)
}

/// Strips dietary marker noise. Runs to a fixed point, so
/// `clean_meal(clean_meal(s)) == clean_meal(s)`.
pub fn clean_meal(description: &str) -> String {
    let mut current = description.trim_end().to_string();
    loop {
        let stripped = REDUNDANT_MARKERS.replace_all(&current, "");
        let stripped = TRAILING_CODE_LIST.replace(&stripped, "");
        let next = stripped.trim_end().to_string();
        if next == current {
            return current;
        }
        current = next;
    }
}

/// `None` for non-vegan meals. Tagging looks at the raw description; the
/// returned text is cleaned afterwards.
pub fn classify(description: &str) -> Option<ClassifiedMeal> {
    if !is_vegan(description) {
        return None;
    }
    Some(ClassifiedMeal {
        food_type: food_type(description),
        meal_type: meal_type(description),
        text: clean_meal(description),
    })
}
