use chrono::Utc;
use reqwest::Client;

use crate::{config::Credentials, error::Result, spotify, types::Token};

/// Seconds before expiry at which a token is treated as expired.
const EXPIRY_MARGIN_SECS: u64 = 240;

/// Holds the app access token for one run and renews it when it runs out.
///
/// Tokens live in memory only; nothing is cached on disk between runs.
pub struct TokenManager {
    credentials: Credentials,
    token_url: String,
    token: Option<Token>,
}

impl TokenManager {
    pub fn new(credentials: Credentials, token_url: String) -> Self {
        TokenManager {
            credentials,
            token_url,
            token: None,
        }
    }

    pub async fn get_valid_token(&mut self, client: &Client) -> Result<String> {
        let now = Utc::now().timestamp() as u64;
        let token = match self.token.take() {
            Some(token) if !Self::is_expired(&token, now) => token,
            _ => {
                spotify::auth::request_client_token(client, &self.token_url, &self.credentials)
                    .await?
            }
        };

        let access_token = token.access_token.clone();
        self.token = Some(token);
        Ok(access_token)
    }

    pub fn is_expired(token: &Token, now: u64) -> bool {
        now + EXPIRY_MARGIN_SECS >= token.obtained_at + token.expires_in
    }
}
