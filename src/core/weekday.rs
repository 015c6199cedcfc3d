use chrono::{Datelike, NaiveDate};

/// Finnish day names, Monday first.
pub const DAYS: [&str; 7] = [
    "maanantai",
    "tiistai",
    "keskiviikko",
    "torstai",
    "perjantai",
    "lauantai",
    "sunnuntai",
];

pub const FIRST_WEEKDAY: &str = DAYS[0];

/// Returned for indices outside `0..=6`.
pub const UNKNOWN_DAY: &str = "VIRHE";

pub fn day_name(weekday_index: usize) -> &'static str {
    DAYS.get(weekday_index).copied().unwrap_or(UNKNOWN_DAY)
}

/// Weekday index (Monday = 0) and localized name of `date`.
pub fn resolve(date: NaiveDate) -> (usize, &'static str) {
    let index = date.weekday().num_days_from_monday() as usize;
    (index, day_name(index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_full_week() {
        // 2024-01-01 是星期一
        let monday = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        for offset in 0..7 {
            let date = monday + chrono::Duration::days(offset);
            let (index, name) = resolve(date);
            assert_eq!(index, offset as usize);
            assert_eq!(name, DAYS[index]);
            assert_ne!(name, UNKNOWN_DAY);
        }
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        assert_eq!(resolve(date), resolve(date));
        assert_eq!(resolve(date), (6, "sunnuntai"));
    }

    #[test]
    fn test_out_of_range_index_yields_sentinel() {
        assert_eq!(day_name(7), UNKNOWN_DAY);
        assert_eq!(day_name(usize::MAX), UNKNOWN_DAY);
        assert_eq!(day_name(0), FIRST_WEEKDAY);
    }
}
