// GUI-side state. The dashboard's state lives in the engine controller; this holds
// the active surface and the admin console tables/forms.
use engine::admin::form::{create_outcome, DELETE_FAILED, UPDATE_FAILED};
use engine::admin::view::{click_row, stats_view, user_row};
use engine::admin::{ClickRowView, EditUserForm, FormMessage, NewUserForm, StatsView, UserRowView};
use engine::EngineError;
use shared::admin::{AdminUser, ClickLogEntry, ClickStats, MutationResponse, StatsPeriod, UpdateUserRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Surface {
    #[default]
    Dashboard,
    Admin,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AdminConsoleState {
    pub users: Vec<UserRowView>,
    pub clicks: Vec<ClickRowView>,
    pub stats: StatsView,
    pub period: StatsPeriod,

    pub new_user: NewUserForm,
    /// User id being edited and the form contents.
    pub editing: Option<(i64, EditUserForm)>,
    pub create_message: Option<FormMessage>,
    /// Blocking alert for failed edit/delete calls.
    pub alert: Option<String>,
}

impl AdminConsoleState {
    pub fn set_users(&mut self, users: &[AdminUser]) {
        self.users = users.iter().map(user_row).collect();
    }

    pub fn set_clicks(&mut self, logs: &[ClickLogEntry]) {
        self.clicks = logs.iter().map(click_row).collect();
    }

    pub fn set_stats(&mut self, period: StatsPeriod, stats: &ClickStats) {
        self.period = period;
        self.stats = stats_view(stats);
    }

    /// Records the create outcome; the form is cleared only on success.
    /// Returns true when the user list should be reloaded.
    pub fn apply_create_result(&mut self, result: &Result<MutationResponse, EngineError>) -> bool {
        let message = create_outcome(result);
        let created = message.is_success();
        if created {
            self.new_user = NewUserForm::default();
        }
        self.create_message = Some(message);
        created
    }

    pub fn begin_edit(&mut self, id: i64) {
        self.editing = Some((id, EditUserForm::default()));
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Request for the open edit form. A form with every field blank closes without
    /// contacting the server.
    pub fn edit_submission(&mut self) -> Option<(i64, UpdateUserRequest)> {
        let (id, request) = self.editing.as_ref().map(|(id, form)| (*id, form.to_request()))?;
        if request.is_empty() {
            self.editing = None;
            return None;
        }
        Some((id, request))
    }

    pub fn apply_update_result<T>(&mut self, result: &Result<T, EngineError>) -> bool {
        self.apply_mutation(result, UPDATE_FAILED)
    }

    pub fn apply_delete_result<T>(&mut self, result: &Result<T, EngineError>) -> bool {
        self.apply_mutation(result, DELETE_FAILED)
    }

    fn apply_mutation<T>(&mut self, result: &Result<T, EngineError>, failure: &str) -> bool {
        match result {
            Ok(_) => {
                self.editing = None;
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "{}", failure);
                self.alert = Some(failure.to_string());
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i64) -> AdminUser {
        AdminUser {
            id,
            email: format!("u{}@example.com", id),
            username: format!("u{}", id),
            is_admin: false,
            access_expires_at: None,
            created_at: None,
            last_analysis_started_at: None,
        }
    }

    #[test]
    fn test_set_users_renders_rows() {
        let mut state = AdminConsoleState::default();
        state.set_users(&[user(1), user(2)]);
        assert_eq!(state.users.len(), 2);
        assert_eq!(state.users[1].username, "u2");
        assert_eq!(state.users[0].expires, "Lifetime");
    }

    #[test]
    fn test_successful_create_resets_form() {
        let mut state = AdminConsoleState::default();
        state.new_user.username = "ana".to_string();
        let reload = state.apply_create_result(&Ok(MutationResponse { ok: true, id: Some(3), error: None }));
        assert!(reload);
        assert_eq!(state.new_user, NewUserForm::default());
        assert_eq!(state.create_message.as_ref().map(|m| m.text()), Some("User created!"));
    }

    #[test]
    fn test_failed_create_keeps_form() {
        let mut state = AdminConsoleState::default();
        state.new_user.username = "ana".to_string();
        let reload = state.apply_create_result(&Err(EngineError::ApiError {
            status: 400,
            message: Some("exists".to_string()),
        }));
        assert!(!reload);
        assert_eq!(state.new_user.username, "ana");
        assert_eq!(state.create_message, Some(FormMessage::Failure("exists".to_string())));
    }

    #[test]
    fn test_failed_delete_raises_alert() {
        let mut state = AdminConsoleState::default();
        let result: Result<MutationResponse, EngineError> = Err(EngineError::ApiError { status: 404, message: None });
        assert!(!state.apply_delete_result(&result));
        assert_eq!(state.alert.as_deref(), Some(DELETE_FAILED));
    }

    #[test]
    fn test_successful_edit_closes_form() {
        let mut state = AdminConsoleState::default();
        state.begin_edit(7);
        assert_eq!(state.editing.as_ref().map(|(id, _)| *id), Some(7));
        let result: Result<MutationResponse, EngineError> = Ok(MutationResponse { ok: true, id: None, error: None });
        assert!(state.apply_update_result(&result));
        assert_eq!(state.editing, None);
    }

    #[test]
    fn test_blank_edit_closes_without_request() {
        let mut state = AdminConsoleState::default();
        state.begin_edit(3);
        assert_eq!(state.edit_submission(), None);
        assert_eq!(state.editing, None);

        state.begin_edit(4);
        if let Some((_, form)) = state.editing.as_mut() {
            form.email = " new@example.com ".to_string();
        }
        let (id, request) = state.edit_submission().unwrap();
        assert_eq!(id, 4);
        assert_eq!(request.email.as_deref(), Some("new@example.com"));
        assert_eq!(request.username, None);
        assert!(state.editing.is_some());
    }
}
