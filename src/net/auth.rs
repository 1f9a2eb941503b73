//! Auth endpoints: register, login, whoami.

use super::transport::{ApiError, Transport};
use super::types::{LoginRequest, LoginResponse, RegisterRequest, User};

/// Create a new account. The success body is implementation-defined and
/// discarded; registration does not log the caller in.
pub async fn register(
    transport: &Transport,
    username: &str,
    email: &str,
    password: &str,
) -> Result<(), ApiError> {
    let _: serde_json::Value = transport
        .post("/v1/auth/register", &RegisterRequest { username, email, password })
        .await?;
    Ok(())
}

/// Exchange credentials for a bearer token.
pub async fn login(
    transport: &Transport,
    username: &str,
    password: &str,
) -> Result<LoginResponse, ApiError> {
    transport.post("/v1/auth/login", &LoginRequest { username, password }).await
}

/// Fetch the authenticated user's profile.
pub async fn me(transport: &Transport) -> Result<User, ApiError> {
    transport.get("/v1/auth/me").await
}
