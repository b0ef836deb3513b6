//! Form models and client-side validation.
//!
//! Validation runs before the session manager is called; the manager itself
//! only enforces uniqueness, password confirmation, and credential match.
//!
//! Each field reports at most one error: `Required` for an empty value,
//! otherwise the first failing format rule. Lengths count characters.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use secrecy::{ExposeSecret, SecretString};

use crate::services::auth::Registration;

/// Minimum display-name length on the registration form.
pub const MIN_FULL_NAME_LEN: usize = 3;

/// Minimum password length on both forms.
pub const MIN_PASSWORD_LEN: usize = 6;

const MAX_EMAIL_LEN: usize = 254;
const MAX_LOCAL_PART_LEN: usize = 64;

/// dot-atom local part, `@`, then dot-separated hostname labels.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+)*@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("Invalid regex")
});

// =============================================================================
// Fields and errors
// =============================================================================

/// Form field identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    /// Display name, registration only.
    FullName,
    /// Login key.
    Email,
    /// Password, at least six characters.
    Password,
    /// Repeat of the password, registration only.
    ConfirmPassword,
}

impl Field {
    /// Wire name of the field.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::FullName => "fullName",
            Self::Email => "email",
            Self::Password => "password",
            Self::ConfirmPassword => "confirmPassword",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FullName => "Full name",
            Self::Email => "Email",
            Self::Password => "Password",
            Self::ConfirmPassword => "Confirm password",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A failed field rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// The field is empty.
    Required,
    /// The value is shorter than the field allows.
    MinLength {
        /// Minimum length in characters.
        required: usize,
        /// Length that was entered.
        actual: usize,
    },
    /// The value is not a well-formed email address.
    Email,
}

/// Validation outcome for a whole form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    fields: Vec<(Field, FieldError)>,
    mismatch: bool,
}

impl FormErrors {
    /// Whether the form is valid.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && !self.mismatch
    }

    /// The error on `field`, if any.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&FieldError> {
        self.fields
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, error)| error)
    }

    /// Field errors in form order.
    pub fn fields(&self) -> impl Iterator<Item = &(Field, FieldError)> {
        self.fields.iter()
    }

    /// Whether password and confirmation differ.
    #[must_use]
    pub const fn mismatch(&self) -> bool {
        self.mismatch
    }

    fn check(&mut self, field: Field, result: Result<(), FieldError>) {
        if let Err(error) = result {
            self.fields.push((field, error));
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => f.write_str("is required"),
            Self::MinLength { required, .. } => {
                write!(f, "must be at least {required} characters")
            }
            Self::Email => f.write_str("must be a valid email address"),
        }
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, error) in &self.fields {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{} {error}", field.label())?;
            first = false;
        }
        if self.mismatch {
            if !first {
                f.write_str("; ")?;
            }
            f.write_str("Passwords do not match")?;
        }
        Ok(())
    }
}

// =============================================================================
// Rules
// =============================================================================

fn required(value: &str) -> Result<(), FieldError> {
    if value.is_empty() {
        Err(FieldError::Required)
    } else {
        Ok(())
    }
}

fn min_length(value: &str, min: usize) -> Result<(), FieldError> {
    required(value)?;
    let actual = value.chars().count();
    if actual < min {
        return Err(FieldError::MinLength {
            required: min,
            actual,
        });
    }
    Ok(())
}

fn email(value: &str) -> Result<(), FieldError> {
    required(value)?;
    if is_valid_email(value) {
        Ok(())
    } else {
        Err(FieldError::Email)
    }
}

/// Email syntax check used by both forms.
///
/// Stricter than [`latchkey_core::Email::parse`], which only checks
/// structure.
#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    if value.chars().count() > MAX_EMAIL_LEN {
        return false;
    }
    let Some((local, _)) = value.split_once('@') else {
        return false;
    };
    if local.chars().count() > MAX_LOCAL_PART_LEN {
        return false;
    }
    EMAIL_RE.is_match(value)
}

// =============================================================================
// Touched tracking
// =============================================================================

/// Fields the user has interacted with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Touched(BTreeSet<Field>);

impl Touched {
    #[must_use]
    pub fn is_touched(&self, field: Field) -> bool {
        self.0.contains(&field)
    }

    fn touch_all(&mut self, fields: &[Field]) {
        self.0.extend(fields.iter().copied());
    }
}

// =============================================================================
// Forms
// =============================================================================

/// Registration form state.
pub struct RegisterForm {
    pub full_name: String,
    pub email: String,
    pub password: SecretString,
    pub confirm_password: SecretString,
    pub touched: Touched,
}

impl RegisterForm {
    const FIELDS: [Field; 4] = [
        Field::FullName,
        Field::Email,
        Field::Password,
        Field::ConfirmPassword,
    ];

    /// Run all field rules plus the form-level confirmation check.
    #[must_use]
    pub fn validate(&self) -> FormErrors {
        let password = self.password.expose_secret();
        let confirm = self.confirm_password.expose_secret();

        let mut errors = FormErrors::default();
        errors.check(
            Field::FullName,
            min_length(&self.full_name, MIN_FULL_NAME_LEN),
        );
        errors.check(Field::Email, email(&self.email));
        errors.check(Field::Password, min_length(password, MIN_PASSWORD_LEN));
        errors.check(Field::ConfirmPassword, required(confirm));
        errors.mismatch = password != confirm;
        errors
    }

    /// Mark every field touched so all errors are shown.
    pub fn mark_all_touched(&mut self) {
        self.touched.touch_all(&Self::FIELDS);
    }

    /// The manager's input for this form.
    #[must_use]
    pub fn to_registration(&self) -> Registration {
        Registration {
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            password: SecretString::from(self.password.expose_secret().to_owned()),
            confirm_password: SecretString::from(self.confirm_password.expose_secret().to_owned()),
        }
    }
}

impl Default for RegisterForm {
    fn default() -> Self {
        Self {
            full_name: String::new(),
            email: String::new(),
            password: SecretString::from(String::new()),
            confirm_password: SecretString::from(String::new()),
            touched: Touched::default(),
        }
    }
}

impl fmt::Debug for RegisterForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterForm")
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .field("touched", &self.touched)
            .finish_non_exhaustive()
    }
}

/// Login form state.
pub struct LoginForm {
    pub email: String,
    pub password: SecretString,
    pub touched: Touched,
}

impl LoginForm {
    const FIELDS: [Field; 2] = [Field::Email, Field::Password];

    /// Run all field rules.
    #[must_use]
    pub fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::default();
        errors.check(Field::Email, email(&self.email));
        errors.check(
            Field::Password,
            min_length(self.password.expose_secret(), MIN_PASSWORD_LEN),
        );
        errors
    }

    /// Mark every field touched so all errors are shown.
    pub fn mark_all_touched(&mut self) {
        self.touched.touch_all(&Self::FIELDS);
    }
}

impl Default for LoginForm {
    fn default() -> Self {
        Self {
            email: String::new(),
            password: SecretString::from(String::new()),
            touched: Touched::default(),
        }
    }
}

impl fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginForm")
            .field("email", &self.email)
            .field("touched", &self.touched)
            .finish_non_exhaustive()
    }
}
