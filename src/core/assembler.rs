use crate::core::{classifier, filter, weekday};
use crate::domain::model::{decode_slot, ClassifiedMeal, Menu, MenuEntry, RawRestaurant};
use crate::utils::events::{EventSink, MenuEvent};
use chrono::{Local, NaiveDate};
use std::collections::BTreeMap;

/// Builds the vegan menu of `date` from the feed's `lang` schedules.
///
/// Restaurants that are incomplete or have no data for the weekday are
/// reported to `sink` and skipped; they never fail the whole menu. Records
/// sharing a name collapse into one entry, the last one with meals wins.
pub fn assemble(
    restaurants: &[RawRestaurant],
    lang: &str,
    date: NaiveDate,
    sink: &dyn EventSink,
) -> Menu {
    let generated_at = Local::now();
    let (weekday, day_name) = weekday::resolve(date);

    let mut by_name: BTreeMap<String, Vec<ClassifiedMeal>> = BTreeMap::new();
    for restaurant in restaurants {
        if let Some(entry) = entry_for(restaurant, lang, weekday, sink) {
            by_name.insert(entry.restaurant_name, entry.meals);
        }
    }
    let entries: Vec<MenuEntry> = by_name
        .into_iter()
        .map(|(restaurant_name, meals)| MenuEntry {
            restaurant_name,
            meals,
        })
        .collect();

    let menu = Menu {
        entries,
        day_name: day_name.to_string(),
        weekday,
        generated_at,
    };
    sink.emit(MenuEvent::MenuAssembled {
        day_name: menu.day_name.clone(),
        restaurants: menu.entries.len(),
        meals: menu.meal_count(),
    });
    menu
}

fn entry_for(
    restaurant: &RawRestaurant,
    lang: &str,
    weekday: usize,
    sink: &dyn EventSink,
) -> Option<MenuEntry> {
    if !filter::accepts(restaurant, lang) {
        sink.emit(MenuEvent::IncompleteRestaurant {
            name: restaurant.name.clone(),
            lang: lang.to_string(),
        });
        return None;
    }
    let (Some(name), Some(days)) = (restaurant.name.as_deref(), restaurant.days(lang)) else {
        return None;
    };

    // Legacy skip rule: compares against weekday - 1, not weekday. The slot
    // lookup below catches the remaining short schedules.
    if days.len() < weekday.saturating_sub(1) {
        sink.emit(MenuEvent::TooFewDays {
            restaurant: name.to_string(),
            days: days.len(),
            weekday,
        });
        return None;
    }
    let Some(slot) = days.get(weekday) else {
        sink.emit(MenuEvent::DayOutOfRange {
            restaurant: name.to_string(),
            days: days.len(),
            weekday,
        });
        return None;
    };

    let slot = match decode_slot(slot) {
        Ok(slot) => slot,
        Err(e) => {
            sink.emit(MenuEvent::MalformedDaySlot {
                restaurant: name.to_string(),
                weekday,
                reason: e.to_string(),
            });
            return None;
        }
    };

    let meals: Vec<ClassifiedMeal> = slot
        .iter()
        .filter_map(|meal| classifier::classify(meal))
        .collect();
    if meals.is_empty() {
        return None;
    }
    Some(MenuEntry {
        restaurant_name: name.to_string(),
        meals,
    })
}

/// The feed wraps at the week boundary: on Sunday the "tomorrow" data is last
/// Monday's. A next-day menu falling on the first weekday is emptied.
pub fn discard_stale_next_day(menu: &mut Menu, sink: &dyn EventSink) {
    if menu.day_name == weekday::FIRST_WEEKDAY {
        sink.emit(MenuEvent::StaleNextDayDiscarded {
            day_name: menu.day_name.clone(),
        });
        menu.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::FoodType;
    use crate::utils::events::TracingSink;
    use std::sync::{Arc, Mutex};

    // 2024-01-01 是星期一
    fn date(weekday: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1 + weekday).unwrap()
    }

    fn week_with(weekday: usize, meals: &[&str]) -> Vec<Vec<String>> {
        let mut days = vec![Vec::new(); 7];
        days[weekday] = meals.iter().map(|m| m.to_string()).collect();
        days
    }

    fn recording_sink() -> (Arc<Mutex<Vec<MenuEvent>>>, impl EventSink) {
        let events = Arc::new(Mutex::new(Vec::new()));
        let recorder = Arc::clone(&events);
        (events, move |event: MenuEvent| recorder.lock().unwrap().push(event))
    }

    #[test]
    fn test_single_restaurant_monday() {
        let restaurants = vec![RawRestaurant::new("Chemicum")
            .with_days("fi", week_with(0, &["Kasvispata (L, M, Veg)", "Lihapulla (L)"]))];

        let menu = assemble(&restaurants, "fi", date(0), &TracingSink);

        assert_eq!(menu.day_name, "maanantai");
        assert_eq!(menu.weekday, 0);
        assert_eq!(menu.entries.len(), 1);
        let entry = &menu.entries[0];
        assert_eq!(entry.restaurant_name, "Chemicum");
        assert_eq!(entry.meals.len(), 1);
        assert_eq!(entry.meals[0].text, "Kasvispata");
        assert_eq!(entry.meals[0].food_type, FoodType::Stew);
    }

    #[test]
    fn test_entries_sorted_by_name() {
        let restaurants = vec![
            RawRestaurant::new("Zeta").with_days("fi", week_with(2, &["Tofua (Veg)"])),
            RawRestaurant::new("Alpha").with_days("fi", week_with(2, &["Seitania (Veg)"])),
            RawRestaurant::new("alpha").with_days("fi", week_with(2, &["Soijaa (Veg)"])),
        ];

        let menu = assemble(&restaurants, "fi", date(2), &TracingSink);

        let names: Vec<&str> = menu
            .entries
            .iter()
            .map(|e| e.restaurant_name.as_str())
            .collect();
        assert_eq!(names, vec!["Alpha", "Zeta", "alpha"]);
    }

    #[test]
    fn test_records_sharing_a_name_yield_one_entry() {
        let restaurants = vec![
            RawRestaurant::new("Unicafe").with_days("fi", week_with(0, &["Tofua (Veg)"])),
            RawRestaurant::new("Unicafe").with_days("fi", week_with(0, &["Seitania (Veg)"])),
            RawRestaurant::new("Unicafe").with_days("fi", week_with(0, &["Lihapulla (L)"])),
        ];

        let menu = assemble(&restaurants, "fi", date(0), &TracingSink);

        assert_eq!(menu.entries.len(), 1);
        assert_eq!(menu.entries[0].restaurant_name, "Unicafe");
        assert_eq!(menu.entries[0].meals.len(), 1);
        assert_eq!(menu.entries[0].meals[0].text, "Seitania");
    }

    #[test]
    fn test_malformed_slot_skips_only_that_restaurant() {
        let feed = serde_json::json!([
            {"name": "Chemicum", "meals": {"fi": [["Kasvispata (L, M, Veg)"]], "en": "closed"}},
            {"name": "Exactum", "meals": {"fi": [["Tofua (Veg)", null], [null]]}},
            {"name": "Physicum", "meals": {"fi": [{"lunch": "Tofua (Veg)"}]}}
        ]);
        let restaurants: Vec<RawRestaurant> = serde_json::from_value(feed).unwrap();
        let (events, sink) = recording_sink();

        let menu = assemble(&restaurants, "fi", date(0), &sink);

        let names: Vec<&str> = menu
            .entries
            .iter()
            .map(|e| e.restaurant_name.as_str())
            .collect();
        assert_eq!(names, vec!["Chemicum", "Exactum"]);
        assert_eq!(menu.entries[1].meals.len(), 1);
        assert!(events.lock().unwrap().iter().any(|e| matches!(
            e,
            MenuEvent::MalformedDaySlot { restaurant, weekday: 0, .. } if restaurant == "Physicum"
        )));
    }

    #[test]
    fn test_restaurant_without_vegan_meals_is_dropped() {
        let restaurants = vec![
            RawRestaurant::new("Physicum").with_days("fi", week_with(1, &["Lihakeittoa (L, G)"])),
            RawRestaurant::new("Exactum").with_days("fi", week_with(1, &["Linssikeittoa (L, Veg)"])),
        ];

        let menu = assemble(&restaurants, "fi", date(1), &TracingSink);

        assert_eq!(menu.entries.len(), 1);
        assert_eq!(menu.entries[0].restaurant_name, "Exactum");
        assert!(menu.entries.iter().all(|e| !e.meals.is_empty()));
    }

    #[test]
    fn test_incomplete_restaurants_are_reported_and_skipped() {
        let restaurants = vec![
            RawRestaurant::default(),
            RawRestaurant::new("English only").with_days("en", week_with(0, &["Tofu (Veg)"])),
            RawRestaurant::new("").with_days("fi", week_with(0, &["Tofua (Veg)"])),
            RawRestaurant::new("Kaivopiha").with_days("fi", week_with(0, &["Tofua (Veg)"])),
        ];
        let (events, sink) = recording_sink();

        let menu = assemble(&restaurants, "fi", date(0), &sink);

        assert_eq!(menu.entries.len(), 1);
        let events = events.lock().unwrap();
        let incomplete = events
            .iter()
            .filter(|e| matches!(e, MenuEvent::IncompleteRestaurant { .. }))
            .count();
        assert_eq!(incomplete, 3);
        assert!(matches!(
            events.last(),
            Some(MenuEvent::MenuAssembled { restaurants: 1, meals: 1, .. })
        ));
    }

    #[test]
    fn test_five_days_of_data_on_sunday_is_skipped() {
        let five_days = vec![vec!["Tofua (Veg)".to_string()]; 5];
        let restaurants = vec![
            RawRestaurant::new("Weekdays only").with_days("fi", five_days),
            RawRestaurant::new("Open daily").with_days("fi", week_with(6, &["Tofua (Veg)"])),
        ];
        let (events, sink) = recording_sink();

        let menu = assemble(&restaurants, "fi", date(6), &sink);

        assert_eq!(menu.day_name, "sunnuntai");
        assert_eq!(menu.entries.len(), 1);
        assert_eq!(menu.entries[0].restaurant_name, "Open daily");
        assert!(events.lock().unwrap().contains(&MenuEvent::DayOutOfRange {
            restaurant: "Weekdays only".to_string(),
            days: 5,
            weekday: 6,
        }));
    }

    #[test]
    fn test_legacy_day_count_boundary() {
        // 4 < 6 - 1: the legacy check fires
        let four_days = vec![vec!["Tofua (Veg)".to_string()]; 4];
        // 6 days: legacy check passes, slot 6 is still missing
        let six_days = vec![vec!["Tofua (Veg)".to_string()]; 6];
        let seven_days = vec![vec!["Tofua (Veg)".to_string()]; 7];
        let restaurants = vec![
            RawRestaurant::new("Four").with_days("fi", four_days),
            RawRestaurant::new("Six").with_days("fi", six_days),
            RawRestaurant::new("Seven").with_days("fi", seven_days),
        ];
        let (events, sink) = recording_sink();

        let menu = assemble(&restaurants, "fi", date(6), &sink);

        assert_eq!(menu.entries.len(), 1);
        assert_eq!(menu.entries[0].restaurant_name, "Seven");
        let events = events.lock().unwrap();
        assert!(events.contains(&MenuEvent::TooFewDays {
            restaurant: "Four".to_string(),
            days: 4,
            weekday: 6,
        }));
        assert!(events.contains(&MenuEvent::DayOutOfRange {
            restaurant: "Six".to_string(),
            days: 6,
            weekday: 6,
        }));
    }

    #[test]
    fn test_discard_stale_next_day_on_monday() {
        let restaurants = vec![RawRestaurant::new("Chemicum")
            .with_days("fi", week_with(0, &["Kasvispata (L, M, Veg)"]))];
        let mut tomorrow = assemble(&restaurants, "fi", date(0), &TracingSink);
        assert!(!tomorrow.is_empty());

        discard_stale_next_day(&mut tomorrow, &TracingSink);

        assert!(tomorrow.is_empty());
        assert_eq!(tomorrow.day_name, "maanantai");
    }

    #[test]
    fn test_next_day_kept_on_other_days() {
        let restaurants = vec![RawRestaurant::new("Chemicum")
            .with_days("fi", week_with(1, &["Kasvispata (L, M, Veg)"]))];
        let mut tomorrow = assemble(&restaurants, "fi", date(1), &TracingSink);

        discard_stale_next_day(&mut tomorrow, &TracingSink);

        assert_eq!(tomorrow.entries.len(), 1);
    }
}
