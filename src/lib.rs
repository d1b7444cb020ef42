pub mod config;
pub mod dataset;
pub mod error;
pub mod logic;
pub mod models;

pub use config::Config;
pub use error::{CalendarError, Result, SowPlanError};
pub use logic::ScheduleEngine;
