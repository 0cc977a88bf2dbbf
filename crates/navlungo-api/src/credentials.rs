use std::fmt::{Debug, Formatter};

pub const USERNAME_ENV: &str = "NAVLUNGO_USERNAME";
pub const PASSWORD_ENV: &str = "NAVLUNGO_PASSWORD";

/// Credentials exchanged for a bearer token at the `/auth/api` endpoint
#[derive(Clone)]
pub struct NavlungoCredentials {
    username: String,
    password: String,
}

impl NavlungoCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Creates a new instance of `NavlungoCredentials` from environment variables.
    pub fn from_env() -> Result<Self, std::env::VarError> {
        Self::from_lookup(|key| std::env::var(key))
    }

    fn from_lookup(
        lookup: impl Fn(&str) -> Result<String, std::env::VarError>,
    ) -> Result<Self, std::env::VarError> {
        let username = lookup(USERNAME_ENV)?;
        let password = lookup(PASSWORD_ENV)?;
        Ok(Self::new(username, password))
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl Debug for NavlungoCredentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavlungoCredentials")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}
