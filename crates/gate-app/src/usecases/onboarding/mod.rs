//! Onboarding use cases.

pub mod complete;
pub mod reminder;

pub use complete::CompleteOnboarding;
pub use reminder::{DismissGenderReminder, GenderReminderStatus};
