use serde::{Deserialize, Serialize};

use crate::credentials::NavlungoCredentials;
use crate::validation::{Fields, Schema};

#[derive(Clone, PartialEq, Serialize)]
pub struct CreateTokenRequest {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for CreateTokenRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateTokenRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Schema for CreateTokenRequest {
    const NAME: &'static str = "create token";

    fn read(fields: &mut Fields<'_>) -> Option<Self> {
        let username = fields.required("username");
        let password = fields.required("password");

        Some(Self {
            username: username?,
            password: password?,
        })
    }
}

impl From<&NavlungoCredentials> for CreateTokenRequest {
    fn from(credentials: &NavlungoCredentials) -> Self {
        Self {
            username: credentials.username().to_string(),
            password: credentials.password().to_string(),
        }
    }
}

/// Envelope of a successful token response: `{"data": {"access_token": "..."}}`.
#[derive(Deserialize)]
pub struct TokenResponse {
    pub data: TokenData,
}

#[derive(Deserialize)]
pub struct TokenData {
    pub access_token: String,
}
