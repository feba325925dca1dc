pub mod enums;
pub mod health_log;
pub mod prescription;
pub mod reminder;
