//! Rust structs that represent database table mappings.
//!
//! These models define the structure of data as it is stored in and retrieved
//! from the database, together with the request payloads that create them.
//! Note that these may differ from the JSON shapes returned by the API.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, de::Error as DeError};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, FromRow)]
pub struct Admin {
    pub id: String,
    pub username: String,
    pub password_hash: String,
}

#[derive(Debug, Clone)]
pub struct CreateAdmin {
    pub id: String,
    pub username: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub mobile_no: String,
    pub password_hash: String,
}

#[derive(Debug, Clone)]
pub struct CreateCustomer {
    pub id: String,
    pub name: String,
    pub mobile_no: String,
    pub password_hash: String,
}

/// Payload for registering a customer, either self-service or by an admin.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateNewCustomer {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Customer name must be between 1-255 characters"
    ))]
    pub name: String,

    #[serde(rename = "mobileNo")]
    #[validate(custom(function = "validate_mobile_no"))]
    pub mobile_no: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

impl CreateNewCustomer {
    /// Trims surrounding whitespace so validation sees the stored values.
    pub fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.mobile_no = self.mobile_no.trim().to_string();
        self
    }
}

/// The public face of a customer as embedded in other resources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct CustomerRef {
    pub c_id: String,
    #[serde(rename = "mobileNo")]
    pub mobile_no: String,
}

/// Add-on services booked with an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventOptions {
    #[serde(default)]
    pub hall: bool,
    #[serde(default)]
    pub dining: bool,
    #[serde(default)]
    pub decorations: bool,
}

#[derive(Debug, Clone, FromRow)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub date: DateTime<Utc>,
    pub hall: bool,
    pub dining: bool,
    pub decorations: bool,
    pub customer_id: String,
}

#[derive(Debug, Clone)]
pub struct CreateEvent {
    pub id: String,
    pub title: String,
    pub date: DateTime<Utc>,
    pub opts: EventOptions,
    pub customer_id: String,
}

/// Customer selection as sent by the event form.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CustomerSelection {
    #[validate(length(min = 1, message = "Customer is required"))]
    pub c_id: String,
}

/// Payload for creating an event.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateNewEvent {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Event title must be between 1-255 characters"
    ))]
    pub title: String,

    #[serde(deserialize_with = "deserialize_event_date")]
    #[validate(custom(function = "validate_not_past"))]
    pub date: DateTime<Utc>,

    #[validate(nested)]
    pub cust: CustomerSelection,

    #[serde(default)]
    pub opts: EventOptions,
}

impl CreateNewEvent {
    /// Trims surrounding whitespace so validation sees the stored values.
    pub fn normalized(mut self) -> Self {
        self.title = self.title.trim().to_string();
        self.cust.c_id = self.cust.c_id.trim().to_string();
        self
    }
}

/// Row produced by joining an event with its customer.
#[derive(Debug, Clone, FromRow)]
pub struct EventWithCustomer {
    pub id: String,
    pub title: String,
    pub date: DateTime<Utc>,
    pub hall: bool,
    pub dining: bool,
    pub decorations: bool,
    pub c_id: String,
    pub mobile_no: String,
}

/// Event as returned by the API, with its customer populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub date: DateTime<Utc>,
    pub opts: EventOptions,
    pub cust: CustomerRef,
}

impl From<EventWithCustomer> for EventResponse {
    fn from(row: EventWithCustomer) -> Self {
        Self {
            id: row.id,
            title: row.title,
            date: row.date,
            opts: EventOptions {
                hall: row.hall,
                dining: row.dining,
                decorations: row.decorations,
            },
            cust: CustomerRef {
                c_id: row.c_id,
                mobile_no: row.mobile_no,
            },
        }
    }
}

/// Accepts either an RFC 3339 timestamp or a bare `YYYY-MM-DD` date (midnight UTC).
fn deserialize_event_date<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_event_date(raw.trim()).ok_or_else(|| {
        DeError::custom(format!(
            "invalid date '{}', expected RFC 3339 or YYYY-MM-DD",
            raw
        ))
    })
}

pub fn parse_event_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(date_time) = DateTime::parse_from_rfc3339(raw) {
        return Some(date_time.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Start of the current UTC day.
pub fn start_of_today() -> DateTime<Utc> {
    let now = Utc::now();
    now.date_naive()
        .and_hms_opt(0, 0, 0)
        .map(|naive| naive.and_utc())
        .unwrap_or(now - Duration::days(1))
}

fn validate_not_past(date: &DateTime<Utc>) -> Result<(), ValidationError> {
    if *date < start_of_today() {
        let mut error = ValidationError::new("past_date");
        error.message = Some("Date must not be in the past".into());
        return Err(error);
    }
    Ok(())
}

fn validate_mobile_no(mobile_no: &str) -> Result<(), ValidationError> {
    let digits = mobile_no.strip_prefix('+').unwrap_or(mobile_no);
    let valid = (7..=15).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit());

    if !valid {
        let mut error = ValidationError::new("mobile_no");
        error.message = Some("Mobile number must contain 7-15 digits".into());
        return Err(error);
    }
    Ok(())
}
