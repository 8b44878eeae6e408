/// Authentication API routes
use super::Envelope;
use crate::{
    error::{LogFailure, Result},
    middleware::BearerToken,
    services::NewAccount,
    state::AppState,
    validation::{Valid, Validate, Violations},
};
use apparel_core::Role;
use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

impl Validate for RegisterRequest {
    type Output = NewAccount;

    fn validate(self) -> std::result::Result<NewAccount, Violations> {
        let mut v = Violations::new();
        let name = v.text("name", self.name, 3, Some(40));
        let email = v.email("email", self.email);
        let password = v.text("password", self.password, 6, None);
        let role: Option<Role> = v.one_of("role", self.role, &Role::ALL);

        v.finish(|| {
            Some(NewAccount {
                name: name?,
                email: email?,
                password: password?,
                role: role?,
            })
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Validate for LoginRequest {
    type Output = Credentials;

    fn validate(self) -> std::result::Result<Credentials, Violations> {
        let mut v = Violations::new();
        let email = v.email("email", self.email);
        let password = v.text("password", self.password, 6, None);

        v.finish(|| {
            Some(Credentials {
                email: email?,
                password: password?,
            })
        })
    }
}

#[derive(Debug, Serialize)]
pub struct RegisteredUser {
    pub name: String,
    pub email: String,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct LoginData {
    pub token: String,
    pub email: String,
}

/// POST /api/auth/register
/// Admin-only account creation
pub async fn register(
    State(app_state): State<AppState>,
    token: BearerToken,
    Valid(account): Valid<RegisterRequest>,
) -> Result<(StatusCode, Json<Envelope<RegisteredUser>>)> {
    let auth = token.authenticate(&app_state.auth_service)?;
    auth.require(Role::can_register_accounts)?;

    let user = app_state
        .users
        .register(account)
        .await
        .log_failure("controller/user/register")?;

    let token = app_state.auth_service.create_token(&user.id, user.role)?;

    Ok((
        StatusCode::CREATED,
        Json(Envelope::with_data(
            "Registration Successful!",
            RegisteredUser {
                name: user.name,
                email: user.email,
                token,
            },
        )),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(app_state): State<AppState>,
    Valid(credentials): Valid<LoginRequest>,
) -> Result<Json<Envelope<LoginData>>> {
    let user = app_state
        .users
        .login(&credentials.email, &credentials.password)
        .await
        .log_failure("controller/user/login")?;

    let token = app_state.auth_service.create_token(&user.id, user.role)?;

    Ok(Json(Envelope::with_data(
        "Login Successful!",
        LoginData {
            token,
            email: user.email,
        },
    )))
}
