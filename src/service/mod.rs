pub mod auth;
pub mod reports;

pub use auth::{AuthService, AuthenticatedUser};
pub use reports::ReportWindow;
