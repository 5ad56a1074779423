pub mod habits;
pub mod reminders;
pub mod reports;
pub mod users;
