//! Structured events emitted by the menu core.
//!
//! The core never configures logging itself. Callers pass an [`EventSink`];
//! the binaries use [`TracingSink`], tests can pass a closure that records
//! events.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEvent {
    /// 回應陣列中無法解碼的元素
    UndecodableRecord { index: usize, reason: String },
    /// 缺少名稱、餐點或指定語言的餐廳
    IncompleteRestaurant { name: Option<String>, lang: String },
    /// 天數少於 weekday - 1
    TooFewDays {
        restaurant: String,
        days: usize,
        weekday: usize,
    },
    /// 該餐廳沒有此 weekday 的資料
    DayOutOfRange {
        restaurant: String,
        days: usize,
        weekday: usize,
    },
    /// 當天的餐點不是字串陣列
    MalformedDaySlot {
        restaurant: String,
        weekday: usize,
        reason: String,
    },
    MenuAssembled {
        day_name: String,
        restaurants: usize,
        meals: usize,
    },
    StaleNextDayDiscarded { day_name: String },
}

impl fmt::Display for MenuEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuEvent::UndecodableRecord { index, reason } => {
                write!(f, "Skipping undecodable feed record #{}: {}", index, reason)
            }
            MenuEvent::IncompleteRestaurant { name, lang } => write!(
                f,
                "Incomplete restaurant {:?} (no '{}' meals)",
                name.as_deref().unwrap_or("<unnamed>"),
                lang
            ),
            MenuEvent::TooFewDays {
                restaurant,
                days,
                weekday,
            } => write!(
                f,
                "Number of days for {}: {} (weekday {})",
                restaurant, days, weekday
            ),
            MenuEvent::DayOutOfRange {
                restaurant,
                days,
                weekday,
            } => write!(
                f,
                "Weekday {} out of range for '{}' (got {} days)",
                weekday, restaurant, days
            ),
            MenuEvent::MalformedDaySlot {
                restaurant,
                weekday,
                reason,
            } => write!(
                f,
                "Skipping '{}': meals for weekday {} are malformed: {}",
                restaurant, weekday, reason
            ),
            MenuEvent::MenuAssembled {
                day_name,
                restaurants,
                meals,
            } => write!(
                f,
                "Assembled {} menu: {} restaurants, {} vegan meals",
                day_name, restaurants, meals
            ),
            MenuEvent::StaleNextDayDiscarded { day_name } => {
                write!(f, "Discarding next-day menu for {} (stale week data)", day_name)
            }
        }
    }
}

pub trait EventSink: Send + Sync {
    fn emit(&self, event: MenuEvent);
}

impl<F> EventSink for F
where
    F: Fn(MenuEvent) + Send + Sync,
{
    fn emit(&self, event: MenuEvent) {
        self(event)
    }
}

/// Forwards events to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: MenuEvent) {
        match &event {
            MenuEvent::MenuAssembled { .. } | MenuEvent::StaleNextDayDiscarded { .. } => {
                tracing::info!("{}", event)
            }
            MenuEvent::UndecodableRecord { .. } | MenuEvent::MalformedDaySlot { .. } => {
                tracing::warn!("{}", event)
            }
            _ => tracing::debug!("{}", event),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_closure_sink_receives_events() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let recorder = Arc::clone(&seen);
        let sink = move |event: MenuEvent| recorder.lock().unwrap().push(event);

        sink.emit(MenuEvent::StaleNextDayDiscarded {
            day_name: "maanantai".to_string(),
        });

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(
            seen[0].to_string(),
            "Discarding next-day menu for maanantai (stale week data)"
        );
    }

    #[test]
    fn test_incomplete_restaurant_display_without_name() {
        let event = MenuEvent::IncompleteRestaurant {
            name: None,
            lang: "fi".to_string(),
        };
        assert_eq!(event.to_string(), "Incomplete restaurant \"<unnamed>\" (no 'fi' meals)");
    }
}
