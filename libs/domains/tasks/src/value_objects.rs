//! Self-validating task fields.
//!
//! Each constructor is the only way to obtain a value, so a `Task` holding
//! these types cannot be in an invalid state.

use std::fmt;
use strum::{Display, EnumIter};

pub use domain_users::ValueError;

/// Non-blank title of at most [`TaskTitle::MAX_LEN`] characters, kept as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskTitle(String);

impl TaskTitle {
    pub const MAX_LEN: usize = 128;

    pub fn new(value: impl Into<String>) -> Result<Self, ValueError> {
        let value = value.into();

        if value.trim().is_empty() {
            return Err(ValueError::Empty { field: "title" });
        }
        if value.chars().count() > Self::MAX_LEN {
            return Err(ValueError::TooLong {
                field: "title",
                max: Self::MAX_LEN,
            });
        }

        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trimmed description, possibly empty, at most [`TaskDescription::MAX_LEN`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskDescription(String);

impl TaskDescription {
    pub const MAX_LEN: usize = 1024;

    pub fn new(value: impl AsRef<str>) -> Result<Self, ValueError> {
        let value = value.as_ref().trim();

        if value.chars().count() > Self::MAX_LEN {
            return Err(ValueError::TooLong {
                field: "description",
                max: Self::MAX_LEN,
            });
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
#[repr(i16)]
pub enum TaskStatus {
    #[default]
    Todo = 0,
    InProgress = 1,
    Done = 2,
}

impl TaskStatus {
    /// Storage and wire code
    pub fn code(self) -> i16 {
        self as i16
    }

    pub fn from_code(code: i32) -> Result<Self, ValueError> {
        match code {
            0 => Ok(Self::Todo),
            1 => Ok(Self::InProgress),
            2 => Ok(Self::Done),
            other => Err(ValueError::Invalid {
                field: "status",
                reason: format!("unknown code {other}"),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
#[repr(i16)]
pub enum TaskPriority {
    #[default]
    Low = 0,
    Medium = 1,
    High = 2,
}

impl TaskPriority {
    pub fn code(self) -> i16 {
        self as i16
    }

    pub fn from_code(code: i32) -> Result<Self, ValueError> {
        match code {
            0 => Ok(Self::Low),
            1 => Ok(Self::Medium),
            2 => Ok(Self::High),
            other => Err(ValueError::Invalid {
                field: "priority",
                reason: format!("unknown code {other}"),
            }),
        }
    }
}

/// Due date in epoch seconds.
///
/// At construction it must lie strictly after `now` and strictly before
/// `now + MAX_HORIZON_SECS` (100 × 360 days).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TaskDueDate(i64);

impl TaskDueDate {
    pub const MAX_HORIZON_SECS: i64 = 100 * 360 * 24 * 60 * 60;

    pub fn new(epoch_secs: i64) -> Result<Self, ValueError> {
        Self::new_at(epoch_secs, chrono::Utc::now().timestamp())
    }

    /// Validate against an explicit clock.
    pub fn new_at(epoch_secs: i64, now: i64) -> Result<Self, ValueError> {
        if epoch_secs <= now {
            return Err(ValueError::Invalid {
                field: "due_date",
                reason: "must be in the future".to_string(),
            });
        }
        if epoch_secs >= now.saturating_add(Self::MAX_HORIZON_SECS) {
            return Err(ValueError::Invalid {
                field: "due_date",
                reason: "is too far in the future".to_string(),
            });
        }

        Ok(Self(epoch_secs))
    }

    /// Rehydrate a stored value. Past dates are legitimate here.
    pub fn from_storage(epoch_secs: i64) -> Self {
        Self(epoch_secs)
    }

    pub fn epoch_secs(self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_title_length_boundary() {
        assert!(TaskTitle::new("t".repeat(128)).is_ok());
        assert_eq!(
            TaskTitle::new("t".repeat(129)).unwrap_err(),
            ValueError::TooLong {
                field: "title",
                max: 128
            }
        );
    }

    #[test]
    fn test_title_whitespace_only_rejected() {
        assert_eq!(
            TaskTitle::new("  \t ").unwrap_err(),
            ValueError::Empty { field: "title" }
        );
    }

    #[test]
    fn test_title_is_not_trimmed() {
        assert_eq!(TaskTitle::new(" buy milk ").unwrap().as_str(), " buy milk ");
    }

    #[test]
    fn test_description_trimmed_and_bounded() {
        assert_eq!(TaskDescription::new("  notes \n").unwrap().as_str(), "notes");
        assert_eq!(TaskDescription::new("").unwrap().as_str(), "");
        assert!(TaskDescription::new("d".repeat(1024)).is_ok());
        assert!(TaskDescription::new("d".repeat(1025)).is_err());
        // Surrounding whitespace does not count against the limit
        assert!(TaskDescription::new(format!("  {}  ", "d".repeat(1024))).is_ok());
    }

    #[test]
    fn test_status_codes() {
        for status in TaskStatus::iter() {
            assert_eq!(TaskStatus::from_code(status.code() as i32).unwrap(), status);
        }
        assert!(TaskStatus::from_code(3).is_err());
        assert!(TaskStatus::from_code(-1).is_err());
    }

    #[test]
    fn test_priority_order_follows_codes() {
        assert!(TaskPriority::Low < TaskPriority::Medium);
        assert!(TaskPriority::Medium < TaskPriority::High);
        assert_eq!(TaskPriority::High.code(), 2);
        assert!(TaskPriority::from_code(7).is_err());
    }

    #[test]
    fn test_due_date_bounds() {
        let now = 1_700_000_000;
        assert!(TaskDueDate::new_at(now, now).is_err());
        assert!(TaskDueDate::new_at(now - 1, now).is_err());
        assert_eq!(TaskDueDate::new_at(now + 1, now).unwrap().epoch_secs(), now + 1);
        assert!(TaskDueDate::new_at(now + TaskDueDate::MAX_HORIZON_SECS - 1, now).is_ok());
        assert!(TaskDueDate::new_at(now + TaskDueDate::MAX_HORIZON_SECS, now).is_err());
    }

    #[test]
    fn test_display_names() {
        assert_eq!(TaskStatus::InProgress.to_string(), "in_progress");
        assert_eq!(TaskPriority::High.to_string(), "high");
    }
}
