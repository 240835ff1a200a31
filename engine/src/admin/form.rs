// Create/edit user forms and the messages shown after a mutation.
use crate::error::EngineError;
use shared::admin::{CreateUserRequest, MutationResponse, UpdateUserRequest};
use shared::utils::parse_local_datetime_input;
use thiserror::Error;

pub const USER_CREATED: &str = "User created!";
pub const MUTATION_FAILED: &str = "Error";
pub const DELETE_FAILED: &str = "Failed to delete user";
pub const UPDATE_FAILED: &str = "Failed to update user";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Email, username and password are required")]
    MissingFields,
    #[error("Invalid expiry date '{0}', expected YYYY-MM-DDTHH:MM")]
    InvalidExpiry(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewUserForm {
    pub email: String,
    pub username: String,
    pub password: String,
    pub is_admin: bool,
    pub lifetime: bool,
    /// Local `YYYY-MM-DDTHH:MM`, ignored when `lifetime` is set.
    pub expires_input: String,
}

impl NewUserForm {
    /// Lifetime access disables and clears the expiry input.
    pub fn set_lifetime(&mut self, lifetime: bool) {
        self.lifetime = lifetime;
        if lifetime {
            self.expires_input.clear();
        }
    }

    pub fn to_request(&self) -> Result<CreateUserRequest, FormError> {
        let email = self.email.trim();
        let username = self.username.trim();
        if email.is_empty() || username.is_empty() || self.password.is_empty() {
            return Err(FormError::MissingFields);
        }

        let input = self.expires_input.trim();
        let access_expires_at = if self.lifetime || input.is_empty() {
            None
        } else {
            Some(parse_local_datetime_input(input).ok_or_else(|| FormError::InvalidExpiry(input.to_string()))?)
        };

        Ok(CreateUserRequest {
            email: email.to_string(),
            username: username.to_string(),
            password: self.password.clone(),
            is_admin: self.is_admin,
            access_expires_at,
        })
    }
}

/// Blank fields are left unchanged on the server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditUserForm {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl EditUserForm {
    pub fn to_request(&self) -> UpdateUserRequest {
        UpdateUserRequest {
            username: non_blank(&self.username),
            email: non_blank(&self.email),
            password: non_blank(&self.password),
            is_admin: None,
        }
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMessage {
    Success(String),
    Failure(String),
}

impl FormMessage {
    pub fn text(&self) -> &str {
        match self {
            FormMessage::Success(text) | FormMessage::Failure(text) => text,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, FormMessage::Success(_))
    }
}

pub fn create_outcome(result: &Result<MutationResponse, EngineError>) -> FormMessage {
    match result {
        Ok(response) if response.ok => FormMessage::Success(USER_CREATED.to_string()),
        Ok(response) => FormMessage::Failure(response.error.clone().unwrap_or_else(|| MUTATION_FAILED.to_string())),
        Err(EngineError::ApiError { message: Some(message), .. }) if !message.trim().is_empty() => {
            FormMessage::Failure(message.clone())
        }
        Err(_) => FormMessage::Failure(MUTATION_FAILED.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> NewUserForm {
        NewUserForm {
            email: " ana@example.com ".to_string(),
            username: "ana".to_string(),
            password: "s3cret".to_string(),
            ..NewUserForm::default()
        }
    }

    #[test]
    fn test_lifetime_sends_null_expiry() {
        let mut form = filled();
        form.expires_input = "2024-12-30T18:20".to_string();
        form.set_lifetime(true);
        assert!(form.expires_input.is_empty());
        let request = form.to_request().unwrap();
        assert_eq!(request.access_expires_at, None);
        assert_eq!(request.email, "ana@example.com");
    }

    #[test]
    fn test_expiry_input_converted_to_epoch_ms() {
        let mut form = filled();
        form.expires_input = "2024-12-30T18:20".to_string();
        let request = form.to_request().unwrap();
        assert_eq!(request.access_expires_at, parse_local_datetime_input("2024-12-30T18:20"));
        assert!(request.access_expires_at.is_some());
    }

    #[test]
    fn test_invalid_expiry_rejected() {
        let mut form = filled();
        form.expires_input = "30/12/2024".to_string();
        assert_eq!(form.to_request(), Err(FormError::InvalidExpiry("30/12/2024".to_string())));
    }

    #[test]
    fn test_missing_fields_rejected() {
        let form = NewUserForm { password: String::new(), ..filled() };
        assert_eq!(form.to_request(), Err(FormError::MissingFields));
    }

    #[test]
    fn test_edit_form_sends_only_filled_fields() {
        let form = EditUserForm { username: "  ".to_string(), email: "new@example.com".to_string(), password: String::new() };
        let request = form.to_request();
        assert_eq!(request.email.as_deref(), Some("new@example.com"));
        assert_eq!(request.username, None);
        assert_eq!(request.password, None);
        assert!(EditUserForm::default().to_request().is_empty());
    }

    #[test]
    fn test_create_outcome_messages() {
        let created = create_outcome(&Ok(MutationResponse { ok: true, id: Some(5), error: None }));
        assert_eq!(created, FormMessage::Success(USER_CREATED.to_string()));
        assert!(created.is_success());

        let exists = create_outcome(&Err(EngineError::ApiError { status: 400, message: Some("exists".to_string()) }));
        assert_eq!(exists.text(), "exists");

        let bare = create_outcome(&Err(EngineError::ApiError { status: 500, message: None }));
        assert_eq!(bare, FormMessage::Failure(MUTATION_FAILED.to_string()));
    }
}
