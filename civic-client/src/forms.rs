//! Form state for the submit-style screens
//!
//! A form validates locally before anything is sent. While a request is in
//! flight the submit control is disabled; on failure the fields stay as
//! typed and an inline message is shown, on success the fields reset.

use shared::client::RegisterRequest;
use shared::models::{ComplaintCategory, NewComplaint, Role};
use shared::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_email, validate_password,
    validate_required_text,
};

use crate::error::{ClientError, ClientResult};
use crate::session::Credentials;

pub const COMPLAINT_SUBMIT_FAILED: &str = "Failed to submit complaint. Please try again.";
pub const LOGIN_FAILED: &str = "Login failed. Please check your credentials.";
pub const REGISTRATION_FAILED: &str = "Registration failed.";
pub const PASSWORD_UPDATE_FAILED: &str = "Failed to update password";

/// Fields of a form that can be turned into a request payload
pub trait FormFields: Default {
    type Payload;

    /// Check the fields and build the payload
    fn validate(&self) -> ClientResult<Self::Payload>;
}

#[derive(Debug, Clone, Default)]
pub struct FormState<F> {
    pub fields: F,
    error: Option<String>,
    submitting: bool,
}

impl<F: FormFields> FormState<F> {
    pub fn new() -> Self {
        Self {
            fields: F::default(),
            error: None,
            submitting: false,
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Start a submission.
    ///
    /// Returns the payload to send, or `None` when a submission is already in
    /// flight or the fields do not validate (the inline error is set).
    pub fn begin_submit(&mut self) -> Option<F::Payload> {
        if self.submitting {
            return None;
        }
        self.error = None;
        match self.fields.validate() {
            Ok(payload) => {
                self.submitting = true;
                Some(payload)
            }
            Err(e) => {
                self.error = Some(e.user_message());
                None
            }
        }
    }

    /// Settle a submission with the server's answer
    pub fn finish<T>(&mut self, result: ClientResult<T>, fallback: &str) -> Option<T> {
        self.submitting = false;
        match result {
            Ok(value) => {
                self.fields = F::default();
                Some(value)
            }
            Err(e) => {
                tracing::debug!(error = %e, "form submission failed");
                self.error = Some(e.message_or(fallback));
                None
            }
        }
    }
}

/// New complaint form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComplaintForm {
    pub title: String,
    pub description: String,
    pub category: Option<ComplaintCategory>,
    /// Department id
    pub department: String,
}

impl FormFields for ComplaintForm {
    type Payload = NewComplaint;

    fn validate(&self) -> ClientResult<NewComplaint> {
        validate_required_text(&self.title, "title", MAX_NAME_LEN)?;
        validate_required_text(&self.description, "description", MAX_NOTE_LEN)?;
        let category = self
            .category
            .ok_or_else(|| ClientError::Validation("category is required".into()))?;
        validate_required_text(&self.department, "department", MAX_SHORT_TEXT_LEN)?;
        Ok(NewComplaint {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            category,
            department: self.department.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl FormFields for LoginForm {
    type Payload = Credentials;

    fn validate(&self) -> ClientResult<Credentials> {
        validate_email(&self.email)?;
        validate_required_text(&self.password, "password", usize::MAX)?;
        Ok(Credentials::new(self.email.trim(), self.password.clone()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Option<Role>,
}

impl FormFields for RegisterForm {
    type Payload = RegisterRequest;

    fn validate(&self) -> ClientResult<RegisterRequest> {
        let role = self
            .role
            .ok_or_else(|| ClientError::Validation("Please select a role.".into()))?;
        validate_required_text(&self.name, "name", MAX_NAME_LEN)?;
        validate_email(&self.email)?;
        validate_password(&self.password)?;
        Ok(RegisterRequest {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            role,
        })
    }
}

/// Change password form; the payload is `(current, new, confirmation)`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasswordForm {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl FormFields for PasswordForm {
    type Payload = (String, String, String);

    fn validate(&self) -> ClientResult<Self::Payload> {
        if self.new_password != self.confirm_password {
            return Err(ClientError::Validation("New passwords do not match!".into()));
        }
        validate_required_text(&self.current_password, "current password", usize::MAX)?;
        validate_password(&self.new_password)?;
        Ok((
            self.current_password.clone(),
            self.new_password.clone(),
            self.confirm_password.clone(),
        ))
    }
}
