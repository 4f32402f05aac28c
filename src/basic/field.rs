use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::basic::error::TodosError;
use crate::basic::result::TodosResult;

/// Wire format of stored deadlines
pub static DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// Format of an editable `datetime-local` input
pub static DATETIME_INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

static DATETIME_ACCEPTED_FORMATS: [&str; 4] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

pub const NAME_MAX_LEN: usize = 255;
pub const DESCRIPTION_MAX_LEN: usize = 255;
/// Display level of "no priority", accepted on input and stored as null
pub const PRIO_NONE: i32 = 4;

pub struct TodosField;

impl TodosField {
    /// Parse a user supplied date-time.
    ///
    /// Accepts `YYYY-MM-DDTHH:MM[:SS]`, `YYYY-MM-DD HH:MM[:SS]`, RFC 3339 (the offset is
    /// dropped, the wall clock time is kept) and `YYYY-MM-DD` (midnight).
    pub fn parse_datetime(&self, value: &str) -> TodosResult<NaiveDateTime> {
        let value = value.trim();
        for format in DATETIME_ACCEPTED_FORMATS {
            if let Ok(datetime) = NaiveDateTime::parse_from_str(value, format) {
                return Ok(datetime);
            }
        }
        if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
            return Ok(datetime.naive_local());
        }
        if let Some(datetime) = NaiveDate::parse_from_str(value, "%Y-%m-%d").ok().and_then(|date| date.and_hms_opt(0, 0, 0)) {
            return Ok(datetime);
        }
        Err(TodosError::ValidationError(format!("[Todos.Field] Invalid datetime: {value}")))
    }

    pub fn format_datetime(&self, datetime: &NaiveDateTime) -> String {
        datetime.format(DATETIME_FORMAT).to_string()
    }

    /// Required name, 1..=255 characters and not blank
    pub fn check_name(&self, name: &str) -> TodosResult<String> {
        if name.trim().is_empty() {
            return Err(TodosError::ValidationError("[Todos.Field] Name is required".to_string()));
        }
        if name.chars().count() > NAME_MAX_LEN {
            return Err(TodosError::ValidationError(format!("[Todos.Field] Name exceeds {NAME_MAX_LEN} characters")));
        }
        Ok(name.to_string())
    }

    /// Optional description, empty is treated as absent
    pub fn check_description(&self, description: Option<&str>) -> TodosResult<Option<String>> {
        match description {
            None => Ok(None),
            Some(description) if description.is_empty() => Ok(None),
            Some(description) if description.chars().count() > DESCRIPTION_MAX_LEN => {
                Err(TodosError::ValidationError(format!("[Todos.Field] Description exceeds {DESCRIPTION_MAX_LEN} characters")))
            }
            Some(description) => Ok(Some(description.to_string())),
        }
    }

    /// Optional priority in 1..=3, [`PRIO_NONE`] is treated as absent
    pub fn check_prio(&self, prio: Option<i32>) -> TodosResult<Option<i32>> {
        match prio {
            None | Some(PRIO_NONE) => Ok(None),
            Some(prio) if (1..=3).contains(&prio) => Ok(Some(prio)),
            Some(prio) => Err(TodosError::ValidationError(format!("[Todos.Field] Invalid priority: {prio}"))),
        }
    }

    /// Optional deadline, empty is treated as absent, anything else must parse
    pub fn check_deadline(&self, deadline: Option<&str>) -> TodosResult<Option<NaiveDateTime>> {
        match deadline {
            None => Ok(None),
            Some(deadline) if deadline.trim().is_empty() => Ok(None),
            Some(deadline) => self.parse_datetime(deadline).map(Some),
        }
    }
}
