pub mod assembler;
pub mod classifier;
pub mod etl;
pub mod filter;
pub mod weekday;

pub use crate::domain::model::{ClassifiedMeal, Menu, MenuEntry, RawRestaurant, TwoDayMenu};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
