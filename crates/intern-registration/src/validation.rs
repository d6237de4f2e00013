//! Field rules for internship registration submissions.
//!
//! Everything here is a pure function of the submitted body. Checks run in a
//! fixed order and the first failure is the one reported.

use crate::registry::{Mode, Program, Registration};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Required length of a phone number once separators are removed.
const PHONE_DIGITS: usize = 10;

/// Characters stripped from a phone number before counting digits.
const PHONE_SEPARATORS: [char; 2] = ['-', ' '];

/// Raw registration body as submitted by the form.
///
/// A missing key and an explicit `null` both deserialize to `None`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistrationRequest {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub email: Option<Value>,
    #[serde(default)]
    pub phone: Option<Value>,
    #[serde(default)]
    pub college: Option<Value>,
    #[serde(default)]
    pub internship: Option<Value>,
    #[serde(default)]
    pub mode: Option<Value>,
    #[serde(default)]
    pub discount_applied: Option<Value>,
}

/// Reasons a submission is rejected.
///
/// The display text of each variant is the message returned to the caller.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("All fields are required")]
    MissingField,

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Invalid phone number")]
    InvalidPhone,

    #[error("Invalid internship program")]
    InvalidProgram,

    #[error("Invalid mode of internship")]
    InvalidMode,
}

/// Validate a submission and convert it into a typed [`Registration`].
pub fn validate(request: &RegistrationRequest) -> Result<Registration, ValidationError> {
    let fields = [
        &request.name,
        &request.email,
        &request.phone,
        &request.college,
        &request.internship,
        &request.mode,
        &request.discount_applied,
    ];
    if !fields.iter().all(|field| field.as_ref().is_some_and(is_truthy)) {
        return Err(ValidationError::MissingField);
    }

    let (Some(name), Some(college)) = (scalar_text(&request.name), scalar_text(&request.college))
    else {
        return Err(ValidationError::MissingField);
    };

    let email = string_field(&request.email)
        .filter(|email| is_valid_email(email))
        .ok_or(ValidationError::InvalidEmail)?;

    let phone = string_field(&request.phone)
        .filter(|phone| is_valid_phone(phone))
        .ok_or(ValidationError::InvalidPhone)?;

    let internship: Program = string_field(&request.internship)
        .and_then(|program| program.parse().ok())
        .ok_or(ValidationError::InvalidProgram)?;

    let mode: Mode = string_field(&request.mode)
        .and_then(|mode| mode.parse().ok())
        .ok_or(ValidationError::InvalidMode)?;

    Ok(Registration {
        name,
        email: email.to_string(),
        phone: phone.to_string(),
        college,
        internship,
        mode,
        discount_applied: request.discount_applied.clone().unwrap_or_default(),
    })
}

fn string_field(value: &Option<Value>) -> Option<&str> {
    value.as_ref().and_then(Value::as_str)
}

/// Free-text fields accept any scalar; numbers and booleans keep their JSON
/// spelling. Arrays and objects are not a usable value.
fn scalar_text(value: &Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    }
}

/// Whether a JSON value counts as "provided".
///
/// `null`, `false`, zero, the empty string, and empty containers do not.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Minimal `local@domain.tld` shape check.
///
/// No whitespace and exactly one `@`. The domain must contain a `.` with at
/// least one character on each side of it.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') {
        return false;
    }

    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// Exactly ten ASCII digits once hyphens and spaces are removed.
pub fn is_valid_phone(phone: &str) -> bool {
    let digits: String = phone
        .chars()
        .filter(|c| !PHONE_SEPARATORS.contains(c))
        .collect();

    digits.len() == PHONE_DIGITS && digits.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_request() -> RegistrationRequest {
        serde_json::from_value(json!({
            "name": "A",
            "email": "a@b.com",
            "phone": "123-456-7890",
            "college": "X",
            "internship": "python",
            "mode": "online",
            "discount_applied": true
        }))
        .unwrap()
    }

    #[test]
    fn test_valid_request_passes() {
        let registration = validate(&valid_request()).unwrap();
        assert_eq!(registration.name, "A");
        assert_eq!(registration.phone, "123-456-7890");
        assert_eq!(registration.internship, Program::Python);
        assert_eq!(registration.mode, Mode::Online);
        assert_eq!(registration.discount_applied, json!(true));
    }

    #[test]
    fn test_each_missing_field_is_rejected() {
        let fields = [
            "name",
            "email",
            "phone",
            "college",
            "internship",
            "mode",
            "discount_applied",
        ];

        for field in fields {
            let mut body = json!({
                "name": "A",
                "email": "a@b.com",
                "phone": "1234567890",
                "college": "X",
                "internship": "java",
                "mode": "offline",
                "discount_applied": "yes"
            });
            body.as_object_mut().unwrap().remove(field);
            let request: RegistrationRequest = serde_json::from_value(body).unwrap();
            assert_eq!(
                validate(&request).unwrap_err(),
                ValidationError::MissingField,
                "field {field} should be required"
            );
        }
    }

    #[test]
    fn test_falsy_values_count_as_missing() {
        let mut request = valid_request();
        request.name = Some(json!(""));
        assert_eq!(validate(&request).unwrap_err(), ValidationError::MissingField);

        let mut request = valid_request();
        request.discount_applied = Some(json!(false));
        assert_eq!(validate(&request).unwrap_err(), ValidationError::MissingField);

        let mut request = valid_request();
        request.discount_applied = Some(json!(0));
        assert_eq!(validate(&request).unwrap_err(), ValidationError::MissingField);

        let mut request = valid_request();
        request.college = Some(Value::Null);
        assert_eq!(validate(&request).unwrap_err(), ValidationError::MissingField);
    }

    #[test]
    fn test_scalar_free_text_is_accepted() {
        let mut request = valid_request();
        request.name = Some(json!(123));
        request.college = Some(json!(true));

        let registration = validate(&request).unwrap();
        assert_eq!(registration.name, "123");
        assert_eq!(registration.college, "true");
    }

    #[test]
    fn test_container_free_text_is_missing() {
        let mut request = valid_request();
        request.name = Some(json!(["A"]));
        assert_eq!(validate(&request).unwrap_err(), ValidationError::MissingField);

        let mut request = valid_request();
        request.college = Some(json!({"name": "X"}));
        assert_eq!(validate(&request).unwrap_err(), ValidationError::MissingField);
    }

    #[test]
    fn test_non_string_values_fail_their_own_check() {
        let mut request = valid_request();
        request.email = Some(json!(5));
        assert_eq!(validate(&request).unwrap_err(), ValidationError::InvalidEmail);

        let mut request = valid_request();
        request.phone = Some(json!(1234567890));
        assert_eq!(validate(&request).unwrap_err(), ValidationError::InvalidPhone);

        let mut request = valid_request();
        request.internship = Some(json!(7));
        assert_eq!(validate(&request).unwrap_err(), ValidationError::InvalidProgram);

        let mut request = valid_request();
        request.mode = Some(json!(["online"]));
        assert_eq!(validate(&request).unwrap_err(), ValidationError::InvalidMode);
    }

    #[test]
    fn test_presence_checked_before_format() {
        let mut request = valid_request();
        request.email = Some(json!("not-an-email"));
        request.mode = None;
        assert_eq!(validate(&request).unwrap_err(), ValidationError::MissingField);
    }

    #[test]
    fn test_first_failing_check_wins() {
        let mut request = valid_request();
        request.phone = Some(json!("12"));
        request.internship = Some(json!("blockchain"));
        request.mode = Some(json!("hybrid"));
        assert_eq!(validate(&request).unwrap_err(), ValidationError::InvalidPhone);

        request.phone = Some(json!("1234567890"));
        assert_eq!(validate(&request).unwrap_err(), ValidationError::InvalidProgram);

        request.internship = Some(json!("full-stack"));
        assert_eq!(validate(&request).unwrap_err(), ValidationError::InvalidMode);
    }

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("first.last@sub.example.org"));
        assert!(is_valid_email("a@b..c"));

        assert!(!is_valid_email("a-b.com"));
        assert!(!is_valid_email("a@bcom"));
        assert!(!is_valid_email("@b.com"));
        assert!(!is_valid_email("a@.com"));
        assert!(!is_valid_email("a@b."));
        assert!(!is_valid_email("a@b@c.com"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("a@b.com "));
    }

    #[test]
    fn test_phone_shapes() {
        assert!(is_valid_phone("1234567890"));
        assert!(is_valid_phone("123-456-7890"));
        assert!(is_valid_phone("123 456 7890"));
        assert!(is_valid_phone(" 123-456 - 7890 "));

        assert!(!is_valid_phone("123456789"));
        assert!(!is_valid_phone("12345678901"));
        assert!(!is_valid_phone("12345abcde"));
        assert!(!is_valid_phone("(123)4567890"));
        assert!(!is_valid_phone("+11234567890"));
    }

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(0.0)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!([])));
        assert!(!is_truthy(&json!({})));

        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!(-1)));
        assert!(is_truthy(&json!("no")));
        assert!(is_truthy(&json!([0])));
    }
}
