//! API endpoint handlers.
//!
//! Each module corresponds to a screen or feature; handlers reuse the
//! repository modules and stay thin.

pub mod health;
pub mod home;
pub mod prescriptions;
pub mod progress;
pub mod reminders;
pub mod streaks;
