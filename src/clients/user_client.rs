use tracing::{debug, info, instrument, warn};

use crate::actor_framework::ResourceClient;
use crate::auth;
use crate::domain::{RegisterUser, User, UserCreate};
use crate::user_actor::UserError;

/// Client for interacting with the User actor.
#[derive(Clone)]
pub struct UserClient {
    inner: ResourceClient<User>,
}

impl_basic_client!(UserClient, User, UserError, user);

impl UserClient {
    /// Registers a user, hashing the password before it reaches the store.
    ///
    /// # Errors
    ///
    /// Returns `UserError::ValidationError` when a required field is blank and
    /// `UserError::AlreadyExists` when the email is taken.
    #[instrument(skip(self, request), fields(user_email = %request.email))]
    pub async fn register_user(&self, request: RegisterUser) -> Result<User, UserError> {
        debug!("Sending request");
        for (field, value) in [
            ("name", &request.name),
            ("email", &request.email),
            ("phone", &request.phone),
        ] {
            if value.trim().is_empty() {
                return Err(UserError::ValidationError(format!("Missing required field: {field}")));
            }
        }

        if self.find_by_email(&request.email).await?.is_some() {
            warn!("Email already registered");
            return Err(UserError::AlreadyExists(request.email));
        }

        let password_hash = auth::hash_password(&request.password)?;
        let params = UserCreate {
            name: request.name,
            email: request.email,
            password_hash,
            phone: request.phone,
            is_admin: request.is_admin,
            address: request.address,
        };
        let id = self.inner.create(params).await?;
        let user = self.inner.get(id.clone()).await?.ok_or(UserError::NotFound(id))?;
        info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    #[instrument(skip(self))]
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let users = self.inner.list().await?;
        Ok(users.into_iter().find(|u| u.email == email))
    }

    /// Checks an email/password pair and returns the matching user.
    #[instrument(skip(self, password))]
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User, UserError> {
        let user = self
            .find_by_email(email)
            .await?
            .ok_or(UserError::InvalidCredentials)?;
        auth::verify_password(password, &user.password_hash)?;
        info!(user_id = %user.id, "User authenticated");
        Ok(user)
    }

    /// True when the user exists and carries the admin flag.
    #[instrument(skip(self))]
    pub async fn is_admin(&self, id: String) -> Result<bool, UserError> {
        Ok(self.get_user(id).await?.is_some_and(|u| u.is_admin))
    }
}
