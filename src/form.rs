//! Generic field-level form validation.
//!
//! A [`Form`] owns a set of named string fields, each with a validator
//! returning `None` for clean input or an error message. Errors are
//! tracked per field; `touched` gates when a front end should show them.
//! Validation is synchronous and has no effect outside the form's own
//! error/touched state.

use std::collections::BTreeMap;

use chrono::NaiveDate;

/// Per-field validator: `None` means the value is acceptable.
pub type Validator = Box<dyn Fn(&str) -> Option<String>>;

struct Field {
    initial: String,
    value: String,
    validator: Validator,
    error: Option<String>,
    touched: bool,
}

/// A set of named fields with per-field validation state.
pub struct Form {
    fields: BTreeMap<String, Field>,
}

impl Form {
    pub fn new() -> Self {
        Self {
            fields: BTreeMap::new(),
        }
    }

    /// Register a field with its initial value and validator.
    pub fn field(
        mut self,
        name: impl Into<String>,
        initial: impl Into<String>,
        validator: Validator,
    ) -> Self {
        let initial = initial.into();
        self.fields.insert(
            name.into(),
            Field {
                value: initial.clone(),
                initial,
                validator,
                error: None,
                touched: false,
            },
        );
        self
    }

    /// Update a field's value and re-validate that field only.
    pub fn set_value(&mut self, name: &str, value: impl Into<String>) {
        if let Some(field) = self.fields.get_mut(name) {
            field.value = value.into();
            field.error = (field.validator)(&field.value);
        }
    }

    /// Mark a field as touched (typically on blur).
    pub fn handle_blur(&mut self, name: &str) {
        if let Some(field) = self.fields.get_mut(name) {
            field.touched = true;
        }
    }

    /// Run every validator, mark every field touched, and report whether
    /// the whole form is clean.
    pub fn validate_form(&mut self) -> bool {
        let mut valid = true;
        for field in self.fields.values_mut() {
            field.error = (field.validator)(&field.value);
            field.touched = true;
            if field.error.is_some() {
                valid = false;
            }
        }
        valid
    }

    /// Restore initial values and clear all error/touched state.
    pub fn reset_form(&mut self) {
        for field in self.fields.values_mut() {
            field.value = field.initial.clone();
            field.error = None;
            field.touched = false;
        }
    }

    /// True iff no field currently holds an error.
    pub fn is_valid(&self) -> bool {
        self.fields.values().all(|field| field.error.is_none())
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(|field| field.value.as_str())
    }

    pub fn error(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(|field| field.error.as_deref())
    }

    pub fn touched(&self, name: &str) -> bool {
        self.fields.get(name).map(|field| field.touched).unwrap_or(false)
    }

    /// The error to actually display: present only once the field has
    /// been touched.
    pub fn visible_error(&self, name: &str) -> Option<&str> {
        if self.touched(name) {
            self.error(name)
        } else {
            None
        }
    }

    /// All current errors, by field name.
    pub fn errors(&self) -> BTreeMap<String, String> {
        self.fields
            .iter()
            .filter_map(|(name, field)| {
                field.error.as_ref().map(|err| (name.clone(), err.clone()))
            })
            .collect()
    }
}

impl Default for Form {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Shipped validators
// =============================================================================

pub fn required(label: &str) -> Validator {
    let label = label.to_string();
    Box::new(move |value| {
        if value.trim().is_empty() {
            Some(format!("{label} is required"))
        } else {
            None
        }
    })
}

pub fn length_range(label: &str, min: usize, max: usize) -> Validator {
    let label = label.to_string();
    Box::new(move |value| {
        let len = value.trim().chars().count();
        if len < min {
            Some(format!("{label} must be at least {min} characters"))
        } else if len > max {
            Some(format!("{label} must be at most {max} characters"))
        } else {
            None
        }
    })
}

pub fn max_length(label: &str, max: usize) -> Validator {
    let label = label.to_string();
    Box::new(move |value| {
        if value.chars().count() > max {
            Some(format!("{label} must be at most {max} characters"))
        } else {
            None
        }
    })
}

pub fn min_length(label: &str, min: usize) -> Validator {
    let label = label.to_string();
    Box::new(move |value| {
        if value.chars().count() < min {
            Some(format!("{label} must be at least {min} characters"))
        } else {
            None
        }
    })
}

pub fn email(label: &str) -> Validator {
    let label = label.to_string();
    Box::new(move |value| {
        if is_valid_email(value) {
            None
        } else {
            Some(format!("{label} must be a valid email address"))
        }
    })
}

/// Accepts an empty value or an ISO `YYYY-MM-DD` date.
pub fn optional_iso_date(label: &str) -> Validator {
    let label = label.to_string();
    Box::new(move |value| {
        let trimmed = value.trim();
        if trimmed.is_empty() || NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").is_ok() {
            None
        } else {
            Some(format!("{label} must be a date in YYYY-MM-DD form"))
        }
    })
}

/// Minimal email shape check: one '@' with non-empty local part, and a
/// domain containing a dot, with no whitespace anywhere.
pub fn is_valid_email(value: &str) -> bool {
    let value = value.trim();
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.split_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

// =============================================================================
// Rule sets used by the CLI
// =============================================================================

/// Validation rules for the task entry form.
pub fn task_form(
    title: &str,
    description: &str,
    category: &str,
    due_date: &str,
) -> Form {
    Form::new()
        .field("title", title, length_range("title", 3, 100))
        .field("description", description, max_length("description", 500))
        .field("category", category, required("category"))
        .field("due_date", due_date, optional_iso_date("due date"))
}

/// Validation rules for the project entry form.
pub fn project_form(name: &str, description: &str) -> Form {
    Form::new()
        .field("name", name, length_range("name", 2, 100))
        .field("description", description, max_length("description", 500))
}

/// Validation rules for the login form.
pub fn login_form(email_input: &str, password_input: &str) -> Form {
    Form::new()
        .field("email", email_input, email("email"))
        .field("password", password_input, min_length("password", 6))
}

/// Validation rules for the registration form.
pub fn register_form(name: &str, email_input: &str, password_input: &str) -> Form {
    Form::new()
        .field("name", name, length_range("name", 2, 100))
        .field("email", email_input, email("email"))
        .field("password", password_input, min_length("password", 6))
}
