use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// 一天的餐點描述
pub type DaySlot = Vec<String>;

/// Restaurant record as published by the feed. Every field is optional
/// because the feed routinely carries partial records.
///
/// Schedules stay undecoded JSON until a single day is looked up, so a broken
/// value in another language or another weekday never hides the record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRestaurant {
    #[serde(default)]
    pub name: Option<String>,
    /// language code -> seven day slots, Monday first
    #[serde(default)]
    pub meals: Option<HashMap<String, Value>>,
}

impl RawRestaurant {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            meals: Some(HashMap::new()),
        }
    }

    pub fn with_days(mut self, lang: &str, days: Vec<DaySlot>) -> Self {
        self.meals
            .get_or_insert_with(HashMap::new)
            .insert(lang.to_string(), Value::from(days));
        self
    }

    /// Undecoded day slots of `lang`; `None` unless the schedule is an array.
    pub fn days(&self, lang: &str) -> Option<&[Value]> {
        match self.meals.as_ref()?.get(lang)? {
            Value::Array(days) => Some(days),
            _ => None,
        }
    }
}

/// Decodes one day slot. A null slot or null meal counts as no meal.
pub fn decode_slot(slot: &Value) -> Result<DaySlot, serde_json::Error> {
    let meals = Option::<Vec<Option<String>>>::deserialize(slot)?;
    Ok(meals.into_iter().flatten().flatten().collect())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoodType {
    Potato,
    Carrot,
    Strawberry,
    Seed,
    Rice,
    Zucchini,
    Smoothie,
    Soup,
    Lentils,
    Stew,
    Tomato,
    Generic,
}

impl FoodType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FoodType::Potato => "potato",
            FoodType::Carrot => "carrot",
            FoodType::Strawberry => "strawberry",
            FoodType::Seed => "seed",
            FoodType::Rice => "rice",
            FoodType::Zucchini => "zucchini",
            FoodType::Smoothie => "smoothie",
            FoodType::Soup => "soup",
            FoodType::Lentils => "lentils",
            FoodType::Stew => "stew",
            FoodType::Tomato => "tomato",
            FoodType::Generic => "generic",
        }
    }
}

impl fmt::Display for FoodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Main,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedMeal {
    pub text: String,
    pub food_type: FoodType,
    pub meal_type: Option<MealType>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuEntry {
    pub restaurant_name: String,
    pub meals: Vec<ClassifiedMeal>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Menu {
    pub entries: Vec<MenuEntry>,
    pub day_name: String,
    pub weekday: usize,
    pub generated_at: DateTime<Local>,
}

impl Menu {
    pub const UPDATED_FORMAT: &'static str = "%a %d %b %Y %H:%M";

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn meal_count(&self) -> usize {
        self.entries.iter().map(|e| e.meals.len()).sum()
    }

    pub fn updated_label(&self) -> String {
        self.generated_at.format(Self::UPDATED_FORMAT).to_string()
    }
}

/// transform 階段的輸出：今天與明天
#[derive(Debug, Clone)]
pub struct TwoDayMenu {
    pub today: Menu,
    pub tomorrow: Menu,
}
