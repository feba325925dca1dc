//! Carelog — patient-facing health-tracking backend.
//!
//! Reminders with a per-date completion log, consecutive-day streaks with
//! achievement tiers, prescriptions, and health-log trends, served over a
//! local HTTP API. The streak engine in [`streaks`] is the algorithmic
//! core; everything else is storage and surface.

pub mod api;
pub mod config;
pub mod db;
pub mod home; // Dashboard: today's schedule + adherence + streaks
pub mod models;
pub mod prescriptions;
pub mod progress; // Health logs and trend windows
pub mod reminders;
pub mod streaks; // Streak engine + achievement tiers
