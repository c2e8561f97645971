//! Validated, normalized task-listing query.
//!
//! Paging values are clamped silently; sort field, sort direction and owner
//! id are rejected when invalid. Filter members arrive already typed and are
//! not checked again here.

use std::fmt;
use thiserror::Error;
use uuid::Uuid;

use crate::value_objects::{TaskPriority, TaskStatus};

pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 1000;
pub const MAX_TITLE_FILTER_LEN: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("invalid {field}: {value:?}")]
    InvalidField { field: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Priority,
    DueDate,
    CreatedAt,
}

impl SortField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Priority => "priority",
            Self::DueDate => "due_date",
            Self::CreatedAt => "created_at",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "priority" => Some(Self::Priority),
            "due_date" => Some(Self::DueDate),
            "created_at" => Some(Self::CreatedAt),
            _ => None,
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case("asc") {
            Some(Self::Asc)
        } else if value.eq_ignore_ascii_case("desc") {
            Some(Self::Desc)
        } else {
            None
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A task-listing request scoped to one owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetTasksQuery {
    owner_id: Uuid,
    page_size: i64,
    page_number: i64,
    sort_field: SortField,
    sort_direction: SortDirection,
    statuses: Vec<TaskStatus>,
    priorities: Vec<TaskPriority>,
    title: String,
}

impl GetTasksQuery {
    /// Normalize, then validate.
    ///
    /// - `page_size` outside `1..=1000` becomes 10
    /// - `page_number` below 1 becomes 1
    /// - empty `sort_field` / `sort_direction` become `priority` / `asc`
    /// - `title` is cut to its first 255 characters
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        owner_id: &str,
        page_size: i64,
        page_number: i64,
        sort_field: &str,
        sort_direction: &str,
        statuses: Vec<TaskStatus>,
        priorities: Vec<TaskPriority>,
        title: &str,
    ) -> Result<Self, QueryError> {
        let page_size = if (1..=MAX_PAGE_SIZE).contains(&page_size) {
            page_size
        } else {
            DEFAULT_PAGE_SIZE
        };
        let page_number = page_number.max(1);
        let sort_field = if sort_field.is_empty() { "priority" } else { sort_field };
        let sort_direction = if sort_direction.is_empty() { "asc" } else { sort_direction };
        let title: String = title.chars().take(MAX_TITLE_FILTER_LEN).collect();

        let owner_id = Uuid::parse_str(owner_id).map_err(|_| QueryError::InvalidField {
            field: "owner_id",
            value: owner_id.to_string(),
        })?;
        let sort_field = SortField::parse(sort_field).ok_or_else(|| QueryError::InvalidField {
            field: "sort_field",
            value: sort_field.to_string(),
        })?;
        let sort_direction =
            SortDirection::parse(sort_direction).ok_or_else(|| QueryError::InvalidField {
                field: "sort_direction",
                value: sort_direction.to_string(),
            })?;

        Ok(Self {
            owner_id,
            page_size,
            page_number,
            sort_field,
            sort_direction,
            statuses,
            priorities,
            title,
        })
    }

    pub fn owner_id(&self) -> Uuid {
        self.owner_id
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    pub fn page_number(&self) -> i64 {
        self.page_number
    }

    pub fn sort_field(&self) -> SortField {
        self.sort_field
    }

    pub fn sort_direction(&self) -> SortDirection {
        self.sort_direction
    }

    pub fn statuses(&self) -> &[TaskStatus] {
        &self.statuses
    }

    pub fn priorities(&self) -> &[TaskPriority] {
        &self.priorities
    }

    /// Substring filter; empty means no filter
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Rows to skip: `(page_number - 1) * page_size`
    pub fn offset(&self) -> i64 {
        (self.page_number - 1).saturating_mul(self.page_size)
    }

    /// Ceiling of `total_count / page_size`, 0 for an empty result.
    pub fn total_pages(&self, total_count: i64) -> i64 {
        if total_count <= 0 {
            return 0;
        }
        (total_count + self.page_size - 1) / self.page_size
    }
}
