use crate::actor_framework::Entity;
use crate::domain::{User, UserCreate, UserPatch};

impl Entity for User {
    type Id = String;
    type CreateParams = UserCreate;
    type Patch = UserPatch;
    type Action = ();
    type ActionResult = ();

    const COLLECTION: &'static str = "users";

    /// Creates a new User from creation parameters.
    ///
    /// # Arguments
    /// * `id` - Unique identifier for the user
    /// * `params` - Profile fields plus an already hashed password
    fn from_create_params(id: String, params: UserCreate) -> Result<Self, String> {
        if params.email.trim().is_empty() {
            return Err("Email required".to_string());
        }
        Ok(Self {
            id,
            name: params.name,
            email: params.email,
            password_hash: params.password_hash,
            phone: params.phone,
            is_admin: params.is_admin,
            street: params.address.street,
            apartment: params.address.apartment,
            zip: params.address.zip,
            city: params.address.city,
            country: params.address.country,
        })
    }

    /// Updates the user's profile information.
    ///
    /// # Fields Updated
    /// - `name`: User's display name
    /// - `email`: User's email address
    /// - `phone`: Contact number
    fn on_update(&mut self, patch: UserPatch) -> Result<(), String> {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            if email.trim().is_empty() {
                return Err("Email required".to_string());
            }
            self.email = email;
        }
        if let Some(phone) = patch.phone {
            self.phone = phone;
        }
        Ok(())
    }

    /// Currently, no custom actions are defined for users.
    fn handle_action(&mut self, _action: ()) -> Result<(), String> {
        Ok(())
    }
}
