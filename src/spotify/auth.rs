use chrono::Utc;
use reqwest::Client;
use serde_json::Value;

use crate::{
    config::Credentials,
    error::{Error, Result},
    spotify,
    types::Token,
};

/// Requests an app access token with the OAuth 2.0 client credentials grant.
///
/// Sends `grant_type=client_credentials` to the token endpoint, authenticating
/// with HTTP basic auth (client ID as user, client secret as password). The
/// returned token is valid for `expires_in` seconds and carries no refresh
/// token; a new one is requested when it runs out.
///
/// # Errors
///
/// - [`Error::Catalog`] when Spotify rejects the credentials or the response
///   lacks an access token
/// - [`Error::Http`] on network failures
pub async fn request_client_token(
    client: &Client,
    token_url: &str,
    credentials: &Credentials,
) -> Result<Token> {
    let response = client
        .post(token_url)
        .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await?;

    let response = spotify::ensure_success(response)
        .await
        .map_err(|e| match e {
            Error::Catalog(message) => Error::Catalog(format!("authentication failed: {}", message)),
            other => other,
        })?;

    let json: Value = response.json().await?;
    parse_token(&json, Utc::now().timestamp() as u64)
}

/// Builds a [`Token`] from the token endpoint's JSON body.
pub fn parse_token(json: &Value, obtained_at: u64) -> Result<Token> {
    let access_token = json["access_token"]
        .as_str()
        .filter(|t| !t.is_empty())
        .ok_or_else(|| Error::Catalog("token response has no access_token".to_string()))?;

    Ok(Token {
        access_token: access_token.to_string(),
        token_type: json["token_type"].as_str().unwrap_or("Bearer").to_string(),
        expires_in: json["expires_in"].as_u64().unwrap_or(3600),
        obtained_at,
    })
}
