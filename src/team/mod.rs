// src/team/mod.rs - Team roster with add/edit form and delete confirmation

use crate::api::ApiClient;
use crate::error::{Error, Result};
use crate::models::{MemberPayload, Restaurant, Role, TeamMember};
use crate::types::RecordId;

/// Add/edit modal contents. `editing` is the member id when editing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemberForm {
    pub editing: Option<RecordId>,
    pub name: String,
    pub login_id: String,
    pub role: Option<Role>,
    pub password: String,
    pub restaurant_id: Option<RecordId>,
}

impl MemberForm {
    pub fn for_member(member: &TeamMember) -> Self {
        Self {
            editing: Some(member.id),
            name: member.name.clone(),
            login_id: member.login_id.clone(),
            role: Some(member.role),
            password: String::new(),
            restaurant_id: member.restaurant_id,
        }
    }

    pub fn is_new(&self) -> bool {
        self.editing.is_none()
    }

    /// Password is required and sent only for new members.
    pub fn to_payload(&self) -> Result<MemberPayload> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(Error::validation("name", "Please enter a name."));
        }
        let login_id = self.login_id.trim();
        if login_id.is_empty() {
            return Err(Error::validation("login_id", "Please enter a login ID."));
        }
        let role = self
            .role
            .ok_or_else(|| Error::validation("role", "Please select a role."))?;

        let password = if self.is_new() {
            if self.password.is_empty() {
                return Err(Error::validation("password", "Please enter a password."));
            }
            Some(self.password.clone())
        } else {
            None
        };

        Ok(MemberPayload {
            name: name.to_string(),
            login_id: login_id.to_string(),
            role,
            password,
            restaurant_id: self.restaurant_id,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct TeamRoster {
    members: Vec<TeamMember>,
    restaurants: Vec<Restaurant>,
    form: Option<MemberForm>,
    pending_delete: Option<RecordId>,
    loading: bool,
    error: Option<String>,
}

impl TeamRoster {
    pub fn new() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    pub fn apply_members(&mut self, result: Result<Vec<TeamMember>>) {
        self.loading = false;
        match result {
            Ok(members) => {
                tracing::debug!(count = members.len(), "team members loaded");
                self.members = members;
                self.error = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to fetch team members");
                self.error = Some(e.user_message("Failed to fetch team members"));
            }
        }
    }

    /// A member fetch error takes precedence over this one.
    pub fn apply_restaurants(&mut self, result: Result<Vec<Restaurant>>) {
        match result {
            Ok(restaurants) => self.restaurants = restaurants,
            Err(e) => {
                tracing::warn!(error = %e, "failed to fetch restaurants");
                self.error
                    .get_or_insert_with(|| e.user_message("Failed to fetch restaurants"));
            }
        }
    }

    /// Members first, so a successful member fetch cannot hide a failed
    /// restaurant lookup.
    pub fn apply_loaded(
        &mut self,
        members: Result<Vec<TeamMember>>,
        restaurants: Result<Vec<Restaurant>>,
    ) {
        self.apply_members(members);
        self.apply_restaurants(restaurants);
    }

    pub fn members(&self) -> &[TeamMember] {
        &self.members
    }

    pub fn restaurants(&self) -> &[Restaurant] {
        &self.restaurants
    }

    pub fn restaurant_name(&self, id: Option<RecordId>) -> Option<&str> {
        let id = id?;
        self.restaurants
            .iter()
            .find(|r| r.id == id)
            .map(|r| r.name.as_str())
    }

    // Form

    pub fn open_add(&mut self) {
        self.form = Some(MemberForm::default());
    }

    pub fn open_edit(&mut self, id: RecordId) {
        self.form = self
            .members
            .iter()
            .find(|m| m.id == id)
            .map(MemberForm::for_member);
    }

    pub fn close_form(&mut self) {
        self.form = None;
    }

    pub fn form(&self) -> Option<&MemberForm> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut MemberForm> {
        self.form.as_mut()
    }

    /// Validates the open form. On failure the message is shown and nothing
    /// should be sent.
    pub fn begin_submit(&mut self) -> Result<(Option<RecordId>, MemberPayload)> {
        let form = self
            .form
            .as_ref()
            .ok_or_else(|| Error::conflict("closed", "No team member form is open."))?;
        match form.to_payload() {
            Ok(payload) => Ok((form.editing, payload)),
            Err(e) => {
                self.error = Some(e.user_message("Failed to save team member"));
                Err(e)
            }
        }
    }

    /// Closes the form on success. Returns whether the list should be re-fetched.
    pub fn apply_submit(&mut self, result: Result<TeamMember>) -> bool {
        match result {
            Ok(member) => {
                tracing::info!(id = member.id, login_id = %member.login_id, "team member saved");
                self.form = None;
                self.error = None;
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to save team member");
                self.error = Some(e.user_message("Failed to save team member"));
                false
            }
        }
    }

    pub async fn submit(&mut self, api: &ApiClient) {
        let Ok((editing, payload)) = self.begin_submit() else {
            return;
        };
        let result = save_member(api, editing, &payload).await;
        if self.apply_submit(result) {
            self.apply_members(api.list_users().await);
        }
    }

    // Delete

    pub fn request_delete(&mut self, id: RecordId) {
        self.pending_delete = Some(id);
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub fn pending_delete(&self) -> Option<&TeamMember> {
        let id = self.pending_delete?;
        self.members.iter().find(|m| m.id == id)
    }

    pub fn take_pending_delete(&mut self) -> Option<RecordId> {
        self.pending_delete.take()
    }

    pub fn apply_delete(&mut self, id: RecordId, result: Result<()>) -> bool {
        match result {
            Ok(()) => {
                tracing::info!(id, "team member deleted");
                self.error = None;
                true
            }
            Err(e) => {
                tracing::warn!(id, error = %e, "failed to delete team member");
                self.error = Some(e.user_message("Failed to delete team member"));
                false
            }
        }
    }

    pub async fn confirm_delete(&mut self, api: &ApiClient) {
        let Some(id) = self.take_pending_delete() else {
            return;
        };
        let result = api.delete_user(id).await;
        if self.apply_delete(id, result) {
            self.apply_members(api.list_users().await);
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

pub async fn fetch_roster(
    api: &ApiClient,
) -> (Result<Vec<TeamMember>>, Result<Vec<Restaurant>>) {
    futures::join!(api.list_users(), api.list_restaurants())
}

/// POST for new members, PUT for existing ones.
pub async fn save_member(
    api: &ApiClient,
    editing: Option<RecordId>,
    payload: &MemberPayload,
) -> Result<TeamMember> {
    match editing {
        Some(id) => api.update_user(id, payload).await,
        None => api.create_user(payload).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockTransport;
    use crate::api::Method;
    use serde_json::json;
    use std::sync::Arc;

    async fn loaded_roster(api: &ApiClient) -> TeamRoster {
        let mut roster = TeamRoster::new();
        let (members, restaurants) = fetch_roster(api).await;
        roster.apply_loaded(members, restaurants);
        roster
    }

    fn members_json() -> serde_json::Value {
        json!([
            {"id": 1, "name": "Ana", "login_id": "ana", "role": "Chef", "restaurant_id": 10},
            {"id": 2, "name": "Ben", "login_id": "ben", "role": "Waiter"}
        ])
    }

    #[test]
    fn test_form_validation() {
        let mut form = MemberForm::default();
        assert_eq!(form.to_payload().unwrap_err().message, "Please enter a name.");

        form.name = "Cleo".to_string();
        form.login_id = "cleo".to_string();
        assert_eq!(form.to_payload().unwrap_err().message, "Please select a role.");

        form.role = Some(Role::Manager);
        assert_eq!(form.to_payload().unwrap_err().message, "Please enter a password.");

        form.password = "secret".to_string();
        let payload = form.to_payload().unwrap();
        assert_eq!(payload.password.as_deref(), Some("secret"));
    }

    #[test]
    fn test_edit_form_needs_no_password() {
        let member: TeamMember = serde_json::from_value(json!(
            {"id": 1, "name": "Ana", "login_id": "ana", "role": "Chef"}
        ))
        .unwrap();
        let form = MemberForm::for_member(&member);
        assert!(!form.is_new());
        assert!(form.to_payload().unwrap().password.is_none());
    }

    #[tokio::test]
    async fn test_load_and_edit() {
        let mock = Arc::new(MockTransport::new());
        mock.reply(Method::Get, "/users/", 200, members_json());
        mock.reply(Method::Get, "/restaurants/", 200, json!([{"id": 10, "name": "Downtown"}]));
        mock.reply(Method::Put, "/users/2", 200, json!(
            {"id": 2, "name": "Ben", "login_id": "ben", "role": "Manager"}
        ));
        let api = ApiClient::new(mock.clone());

        let mut roster = loaded_roster(&api).await;
        assert_eq!(roster.members().len(), 2);
        assert_eq!(roster.restaurant_name(roster.members()[0].restaurant_id), Some("Downtown"));

        roster.open_edit(2);
        if let Some(form) = roster.form_mut() {
            form.role = Some(Role::Manager);
        }
        roster.submit(&api).await;

        assert!(roster.form().is_none());
        let sent = mock.requests_to(Method::Put, "/users/2");
        assert_eq!(sent[0].body, Some(json!({"name": "Ben", "login_id": "ben", "role": "Manager"})));
        assert_eq!(mock.requests_to(Method::Get, "/users/").len(), 2);
    }

    #[tokio::test]
    async fn test_invalid_form_sends_nothing() {
        let mock = Arc::new(MockTransport::new());
        let api = ApiClient::new(mock.clone());

        let mut roster = TeamRoster::new();
        roster.open_add();
        roster.submit(&api).await;

        assert!(mock.requests().is_empty());
        assert!(roster.form().is_some());
        assert_eq!(roster.error(), Some("Please enter a name."));
    }

    #[tokio::test]
    async fn test_member_error_wins_over_restaurant_error() {
        let mock = Arc::new(MockTransport::new());
        mock.fail(Method::Get, "/users/");
        mock.fail(Method::Get, "/restaurants/");
        let roster = loaded_roster(&ApiClient::new(mock.clone())).await;

        assert!(!roster.is_loading());
        assert_eq!(
            roster.error(),
            Some("Failed to fetch team members. Please try again later.")
        );
    }

    #[tokio::test]
    async fn test_failed_delete_reports() {
        let mock = Arc::new(MockTransport::new());
        mock.reply(Method::Get, "/users/", 200, members_json());
        mock.reply(Method::Get, "/restaurants/", 500, json!({}));
        mock.fail(Method::Delete, "/users/1");
        let api = ApiClient::new(mock.clone());

        let mut roster = loaded_roster(&api).await;
        assert_eq!(
            roster.error(),
            Some("Failed to fetch restaurants. Please try again later.")
        );
        assert_eq!(roster.members().len(), 2);
        assert_eq!(roster.restaurant_name(Some(10)), None);

        roster.request_delete(1);
        roster.confirm_delete(&api).await;
        assert_eq!(
            roster.error(),
            Some("Failed to delete team member. Please try again later.")
        );
        assert_eq!(roster.members().len(), 2);
    }
}
