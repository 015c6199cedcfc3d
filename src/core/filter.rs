use crate::domain::model::RawRestaurant;

/// A restaurant is usable when it has a non-empty name and a meal schedule
/// (a JSON array) for `lang`.
pub fn accepts(restaurant: &RawRestaurant, lang: &str) -> bool {
    let named = restaurant
        .name
        .as_deref()
        .is_some_and(|name| !name.is_empty());
    named && restaurant.days(lang).is_some()
}
