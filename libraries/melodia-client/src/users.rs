//! User-scoped reads.

use crate::client::MusicClient;
use crate::error::Result;
use crate::types::{unwrap_envelope, user_from_value};
use melodia_core::User;
use serde_json::Value;

/// Client for `/api/user` endpoints.
pub struct UserClient<'a> {
    client: &'a MusicClient,
}

impl<'a> UserClient<'a> {
    pub(crate) fn new(client: &'a MusicClient) -> Self {
        Self { client }
    }

    /// Profile of the current user; `None` when not logged in.
    pub async fn profile(&self) -> Result<Option<User>> {
        let body: Option<Value> = self.client.get_optional("/api/user/profile").await?;
        Ok(body.and_then(|b| user_from_value(unwrap_envelope(b))))
    }
}
