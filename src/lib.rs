pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod reminder;
pub mod router;
pub mod service;
pub mod types;

pub use error::HabitError;
pub use router::{HabitState, habit_router};
