//! User (`/users`) and authentication (`/auth`) endpoints.

use serde::Serialize;
use serde::de::DeserializeOwned;
use storefront_core::HttpClient;

use super::segment;
use crate::password::PasswordChange;
use crate::{ApiClient, ApiResult};

/// User and authentication endpoints.
///
/// `login` only performs the call. Storing the returned token and user in a
/// [`SessionStore`](crate::SessionStore) is up to the caller.
#[derive(Debug)]
pub struct Users<'a, C> {
    api: &'a ApiClient<C>,
}

impl<'a, C: HttpClient> Users<'a, C> {
    pub(crate) fn new(api: &'a ApiClient<C>) -> Self {
        Self { api }
    }

    /// `POST /auth/register`
    pub async fn register<T: DeserializeOwned, B: Serialize>(&self, user: &B) -> ApiResult<T> {
        self.api.post("/auth/register").json(user).send_as().await
    }

    /// `POST /auth/login`
    pub async fn login<T: DeserializeOwned, B: Serialize>(&self, credentials: &B) -> ApiResult<T> {
        self.api.post("/auth/login").json(credentials).send_as().await
    }

    /// `GET /users/{id}`
    pub async fn get<T: DeserializeOwned>(&self, id: u64) -> ApiResult<T> {
        self.api.get(&format!("/users/{id}")).send_as().await
    }

    /// `GET /users`
    pub async fn list<T: DeserializeOwned>(&self) -> ApiResult<T> {
        self.api.get("/users").send_as().await
    }

    /// `PUT /users/{id}`
    pub async fn update_profile<T: DeserializeOwned, B: Serialize>(
        &self,
        id: u64,
        profile: &B,
    ) -> ApiResult<T> {
        self.api
            .put(&format!("/users/{id}"))
            .json(profile)
            .send_as()
            .await
    }

    /// `DELETE /users/{id}`
    pub async fn delete<T: DeserializeOwned>(&self, id: u64) -> ApiResult<T> {
        self.api.delete(&format!("/users/{id}")).send_as().await
    }

    /// `GET /users/email/{email}`
    pub async fn get_by_email<T: DeserializeOwned>(&self, email: &str) -> ApiResult<T> {
        self.api
            .get(&format!("/users/email/{}", segment(email)))
            .send_as()
            .await
    }

    /// `PUT /users/{id}/password`
    ///
    /// Takes an already validated change, see
    /// [`PasswordChangeForm::validate`](crate::PasswordChangeForm::validate).
    pub async fn change_password<T: DeserializeOwned>(
        &self,
        id: u64,
        change: &PasswordChange,
    ) -> ApiResult<T> {
        self.api
            .put(&format!("/users/{id}/password"))
            .json(change)
            .send_as()
            .await
    }
}
