//! Environment-scoped management API client.

use crate::policy::{compile_password_pattern, PasswordPolicy};
use crate::types::{Embedded, EmbeddedPasswordPolicies, EmbeddedPopulations, EmbeddedUsers};
use crate::types::{Population, User};
use pingone_core::{ApiConfig, Http, SdkResult};
use tracing::instrument;
use url::Url;

/// Vendor media type for self-service password changes.
const PASSWORD_RESET: &str = "application/vnd.pingidentity.password.reset+json";
/// Vendor media type for administrative password sets.
const PASSWORD_SET: &str = "application/vnd.pingidentity.password.set+json";
/// Vendor media type for sending a recovery code.
const PASSWORD_SEND_RECOVERY_CODE: &str =
    "application/vnd.pingidentity.password.sendRecoveryCode+json";
/// Vendor media type for recovering a password with a code.
const PASSWORD_RECOVER: &str = "application/vnd.pingidentity.password.recover+json";

/// Client for the management API of a single environment.
pub struct ApiClient {
    http: Http,
    api_url: String,
}

impl ApiClient {
    /// Create a client for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the configuration is invalid or the HTTP client
    /// cannot be built.
    pub fn new(config: &ApiConfig) -> SdkResult<Self> {
        Ok(Self {
            http: Http::new(config)?,
            api_url: config.api_url(),
        })
    }

    /// Register a new user in the given population.
    ///
    /// # Errors
    ///
    /// Returns `SdkError::Api` for non-2xx responses, `SdkError::Auth` when
    /// a token cannot be obtained. The same failure modes apply to every
    /// method on this client.
    #[instrument(skip(self))]
    pub async fn add_user(
        &self,
        email: &str,
        username: &str,
        population_id: &str,
    ) -> SdkResult<User> {
        let url = format!("{}/users", self.api_url);
        let body = serde_json::json!({
            "email": email,
            "username": username,
            "population": { "id": population_id }
        });
        self.http.post_json(&url, None, Some(&body)).await
    }

    /// Delete a user.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::add_user`].
    #[instrument(skip(self))]
    pub async fn delete_user(&self, user_id: &str) -> SdkResult<()> {
        let url = format!("{}/users/{user_id}", self.api_url);
        self.http.delete(&url).await
    }

    /// Find users whose email or username equals the given name.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::add_user`].
    #[instrument(skip(self))]
    pub async fn find_user(&self, user_name: &str) -> SdkResult<Vec<User>> {
        let mut url = Url::parse(&format!("{}/users", self.api_url))?;
        let filter = format!("email eq \"{user_name}\" or username eq \"{user_name}\"");
        url.query_pairs_mut().append_pair("filter", &filter);

        let list: Embedded<EmbeddedUsers> = self.http.get_json(url.as_str()).await?;
        Ok(list.embedded.users)
    }

    /// List all populations in the environment.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::add_user`].
    #[instrument(skip(self))]
    pub async fn get_populations(&self) -> SdkResult<Vec<Population>> {
        let url = format!("{}/populations", self.api_url);
        let list: Embedded<EmbeddedPopulations> = self.http.get_json(&url).await?;
        Ok(list.embedded.populations)
    }

    /// Update a user's given and family name. Attributes omitted from the
    /// request are left untouched.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::add_user`].
    #[instrument(skip(self))]
    pub async fn update_user(
        &self,
        user_id: &str,
        first_name: &str,
        last_name: &str,
    ) -> SdkResult<User> {
        let url = format!("{}/users/{user_id}", self.api_url);
        let body = serde_json::json!({
            "name": { "given": first_name, "family": last_name }
        });
        self.http.patch_json(&url, &body).await
    }

    /// Change a user's password, authenticating with the current one.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::add_user`].
    #[instrument(skip(self, current_password, new_password))]
    pub async fn change_password(
        &self,
        user_id: &str,
        current_password: &str,
        new_password: &str,
    ) -> SdkResult<serde_json::Value> {
        let url = format!("{}/users/{user_id}/password", self.api_url);
        let body = serde_json::json!({
            "currentPassword": current_password,
            "newPassword": new_password
        });
        self.http.put_json(&url, Some(PASSWORD_RESET), &body).await
    }

    /// Set a user's password administratively.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::add_user`].
    #[instrument(skip(self, password))]
    pub async fn set_password(
        &self,
        user_id: &str,
        password: &str,
        force_change: bool,
    ) -> SdkResult<serde_json::Value> {
        let url = format!("{}/users/{user_id}/password", self.api_url);
        let body = serde_json::json!({
            "value": password,
            "forceChange": force_change
        });
        self.http.put_json(&url, Some(PASSWORD_SET), &body).await
    }

    /// Send a password recovery code to the user.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::add_user`].
    #[instrument(skip(self))]
    pub async fn send_recovery_code(&self, user_id: &str) -> SdkResult<serde_json::Value> {
        let url = format!("{}/users/{user_id}/password", self.api_url);
        self.http
            .post_json(&url, Some(PASSWORD_SEND_RECOVERY_CODE), None)
            .await
    }

    /// Recover a user's password with a previously sent recovery code.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::add_user`].
    #[instrument(skip(self, recovery_code, new_password))]
    pub async fn recover_password(
        &self,
        user_id: &str,
        recovery_code: &str,
        new_password: &str,
    ) -> SdkResult<serde_json::Value> {
        let url = format!("{}/users/{user_id}/password", self.api_url);
        let body = serde_json::json!({
            "recoveryCode": recovery_code,
            "newPassword": new_password
        });
        self.http.post_json(&url, Some(PASSWORD_RECOVER), Some(&body)).await
    }

    /// List the environment's password policies.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::add_user`].
    #[instrument(skip(self))]
    pub async fn password_policies(&self) -> SdkResult<Vec<PasswordPolicy>> {
        let url = format!("{}/passwordPolicies", self.api_url);
        let list: Embedded<EmbeddedPasswordPolicies> = self.http.get_json(&url).await?;
        Ok(list.embedded.password_policies)
    }

    /// Fetch the password policies and compile the applicable one into a
    /// validation pattern. `Ok(None)` when no policy applies.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::add_user`].
    pub async fn password_pattern(&self) -> SdkResult<Option<String>> {
        let policies = self.password_policies().await?;
        Ok(compile_password_pattern(&policies))
    }

    /// The underlying request funnel, exposing the token provider.
    #[must_use]
    pub const fn http(&self) -> &Http {
        &self.http
    }
}
