//! Account API handlers: registration, login and account lookups.
//!
//! ```text
//! POST /api/v1/register {"email":"a@x.com","password":"Abcdef1!","confirmPassword":"Abcdef1!","userType":"candidate"}
//! POST /api/v1/login {"email":"a@x.com","password":"Abcdef1!"}
//! POST /api/v1/logout
//! GET  /api/v1/accounts/exists?email=a@x.com
//! GET  /api/v1/counters
//! GET  /api/v1/me
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Account, AccountCounts};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    CONFIRM_PASSWORD, EMAIL, PASSWORD, USER_TYPE, ensure_passwords_match, parse_account_kind,
    require,
};

/// Registration body for `POST /api/v1/register`.
///
/// `userType` also accepts the legacy `role` and `user_type` spellings.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[schema(example = "a@x.com")]
    pub email: Option<String>,
    #[schema(example = "Abcdef1!")]
    pub password: Option<String>,
    #[schema(example = "Abcdef1!")]
    pub confirm_password: Option<String>,
    #[serde(alias = "role", alias = "user_type")]
    #[schema(example = "candidate")]
    pub user_type: Option<String>,
}

/// Login body for `POST /api/v1/login`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[schema(example = "a@x.com")]
    pub email: Option<String>,
    #[schema(example = "Abcdef1!")]
    pub password: Option<String>,
}

/// Public view of an account. Never includes the credential.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    #[schema(example = 1)]
    pub user_id: i64,
    #[schema(example = "a@x.com")]
    pub email: String,
    #[schema(example = "candidate")]
    pub user_type: String,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            user_id: account.id().get(),
            email: account.email().as_ref().to_owned(),
            user_type: account.kind().as_str().to_owned(),
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ExistsQuery {
    /// Email to look up; compared after normalisation.
    pub email: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ExistsResponse {
    pub exists: bool,
}

/// Registered accounts per kind.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CountersResponse {
    pub candidates: u64,
    pub companies: u64,
}

impl From<AccountCounts> for CountersResponse {
    fn from(counts: AccountCounts) -> Self {
        Self {
            candidates: counts.candidates,
            companies: counts.companies,
        }
    }
}

/// Create an account and sign it in.
#[utoipa::path(
    post,
    path = "/api/v1/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = AccountResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request or weak password", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let RegisterRequest {
        email,
        password,
        confirm_password,
        user_type,
    } = payload.into_inner();
    let email = require(email, EMAIL)?;
    // An absent password is an empty secret; the policy rejects it as too short.
    let password = password.unwrap_or_default();
    let confirmation = require(confirm_password, CONFIRM_PASSWORD)?;
    let kind = parse_account_kind(&require(user_type, USER_TYPE)?)?;
    if !password.is_empty() {
        ensure_passwords_match(&password, &confirmation)?;
    }

    let account = state.identity.register(&email, &password, kind).await?;
    session.persist_account(account.id())?;
    Ok(HttpResponse::Created().json(AccountResponse::from(account)))
}

/// Authenticate and establish a session.
///
/// Unknown emails and wrong passwords produce the same `401` body.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = AccountResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<AccountResponse>> {
    let LoginRequest { email, password } = payload.into_inner();
    let email = require(email, EMAIL)?;
    let password = require(password, PASSWORD)?;

    let account = state.identity.authenticate(&email, &password).await?;
    session.persist_account(account.id())?;
    Ok(web::Json(account.into()))
}

/// Drop the current session.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses((status = 204, description = "Session cleared")),
    tags = ["accounts"],
    operation_id = "logout"
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.purge();
    HttpResponse::NoContent().finish()
}

/// Report whether an account exists for an email.
#[utoipa::path(
    get,
    path = "/api/v1/accounts/exists",
    params(ExistsQuery),
    responses(
        (status = 200, description = "Lookup result", body = ExistsResponse),
        (status = 400, description = "Missing email", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "accountExists",
    security([])
)]
#[get("/accounts/exists")]
pub async fn account_exists(
    state: web::Data<HttpState>,
    query: web::Query<ExistsQuery>,
) -> ApiResult<web::Json<ExistsResponse>> {
    let email = require(query.into_inner().email, EMAIL)?;
    let exists = state.identity.exists(&email).await?;
    Ok(web::Json(ExistsResponse { exists }))
}

/// Count registered accounts per kind.
#[utoipa::path(
    get,
    path = "/api/v1/counters",
    responses(
        (status = 200, description = "Account counts", body = CountersResponse),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "accountCounters",
    security([])
)]
#[get("/counters")]
pub async fn counters(state: web::Data<HttpState>) -> ApiResult<web::Json<CountersResponse>> {
    let counts = state.identity.count_by_kind().await?;
    Ok(web::Json(counts.into()))
}

/// Return the signed-in account.
#[utoipa::path(
    get,
    path = "/api/v1/me",
    responses(
        (status = 200, description = "Current account", body = AccountResponse),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "Account no longer exists", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "currentAccount"
)]
#[get("/me")]
pub async fn current_account(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<AccountResponse>> {
    let account_id = session.require_account_id()?;
    let account = state.identity.get_account(account_id).await?;
    Ok(web::Json(account.into()))
}

#[cfg(test)]
#[path = "accounts_tests.rs"]
mod tests;
