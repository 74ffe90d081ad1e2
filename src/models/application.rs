use chrono::{DateTime, Utc};
use regex::Regex;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::errors::SiteError;

/// A control of the application form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplicationField {
    pub name: &'static str,
    pub label: &'static str,
    pub input_type: &'static str,
    pub required: bool,
}

const fn field(
    name: &'static str,
    label: &'static str,
    input_type: &'static str,
    required: bool,
) -> ApplicationField {
    ApplicationField {
        name,
        label,
        input_type,
        required,
    }
}

/// The application form in page order. The served page, the in-memory form
/// and the server-side checks all read this table.
pub static APPLICATION_FIELDS: [ApplicationField; 12] = [
    field("first-name", "First Name", "text", true),
    field("last-name", "Last Name", "text", true),
    field("email", "Email", "email", true),
    field("phone", "Phone Number", "tel", true),
    field("gender", "Gender", "select", true),
    field("address", "Address", "text", true),
    field("city-state", "City & State", "text", true),
    field("zipcode", "Zipcode", "text", true),
    field("age", "Age", "number", true),
    field("bank-name", "Bank Name", "text", true),
    field("bank-number", "Account Number", "text", true),
    field("occupation", "Occupation", "text", false),
];

pub fn required_fields() -> impl Iterator<Item = &'static str> {
    APPLICATION_FIELDS
        .iter()
        .filter(|f| f.required)
        .map(|f| f.name)
}

/// An application accepted by the site.
#[derive(Debug, Clone)]
pub struct Application {
    pub reference: Uuid,
    pub received_at: DateTime<Utc>,
    fields: Map<String, Value>,
}

impl Application {
    /// Field value as text, or "N/A" when absent.
    pub fn field(&self, name: &str) -> String {
        field_text(&self.fields, name).unwrap_or_else(|| "N/A".to_string())
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.field("first-name"), self.field("last-name"))
    }

    /// Plain-text digest of the application, one labelled line per field.
    /// The account number is left out.
    pub fn summary(&self) -> String {
        APPLICATION_FIELDS
            .iter()
            .filter(|f| f.name != "bank-number")
            .map(|f| format!("{}: {}", f.label, self.field(f.name)))
            .collect::<Vec<String>>()
            .join("\n")
    }
}

/// Server-side checks for incoming applications. Built once at startup and
/// shared between workers.
#[derive(Debug, Clone)]
pub struct ApplicationValidator {
    email: Regex,
    phone: Regex,
    minimum_age: i64,
}

impl ApplicationValidator {
    pub fn new(minimum_age: i64) -> Result<Self, regex::Error> {
        Ok(Self {
            email: Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")?,
            phone: Regex::new(r"^[0-9+\-\s]{7,15}$")?,
            minimum_age,
        })
    }

    pub fn is_valid_email(&self, email: &str) -> bool {
        self.email.is_match(email)
    }

    pub fn is_valid_phone(&self, phone: &str) -> bool {
        self.phone.is_match(phone)
    }

    /// JSON integers and numeric strings are read as whole years; JSON
    /// floats are truncated, numeric strings with a fraction are refused.
    pub fn is_adult(&self, age: &Value) -> bool {
        parse_age(age)
            .map(|age| age >= self.minimum_age)
            .unwrap_or(false)
    }

    /// Validates a decoded request body. Missing fields are reported alone;
    /// format checks only run once every required field is present.
    pub fn validate(&self, body: Value) -> Result<Application, SiteError> {
        let fields = match body {
            Value::Object(fields) => fields,
            _ => return Err(SiteError::InvalidPayload("Invalid JSON format".to_string())),
        };

        let missing: Vec<String> = required_fields()
            .filter(|name| fields.get(*name).map(is_blank).unwrap_or(true))
            .map(|name| format!("{} is required.", title_case(name)))
            .collect();
        if !missing.is_empty() {
            return Err(SiteError::ValidationError(missing));
        }

        let text = |name: &str| field_text(&fields, name).unwrap_or_default();
        let mut errors = Vec::new();
        if !self.is_valid_email(&text("email")) {
            errors.push("Invalid email format.".to_string());
        }
        if !self.is_valid_phone(&text("phone")) {
            errors.push("Invalid phone number format.".to_string());
        }
        if !fields.get("age").map(|age| self.is_adult(age)).unwrap_or(false) {
            errors.push(format!("You must be at least {}.", self.minimum_age));
        }
        if !errors.is_empty() {
            return Err(SiteError::ValidationError(errors));
        }

        Ok(Application {
            reference: Uuid::new_v4(),
            received_at: Utc::now(),
            fields,
        })
    }
}

fn field_text(fields: &Map<String, Value>, name: &str) -> Option<String> {
    match fields.get(name)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(false) => None,
        other => Some(other.to_string()),
    }
}

// Falsy values (null, false, 0, empty string/array/object) and whitespace
// count as missing.
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::Bool(true) => false,
        Value::Number(n) => n.as_f64().map(|n| n == 0.0).unwrap_or(false),
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

fn parse_age(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        Value::Bool(b) => Some(i64::from(*b)),
        _ => None,
    }
}

// "city-state" -> "City State"
fn title_case(name: &str) -> String {
    name.split('-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
