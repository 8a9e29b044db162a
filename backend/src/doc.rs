//! OpenAPI document for the REST API.
//!
//! Served by Swagger UI in debug builds. Domain types stay free of utoipa;
//! the error envelope is described by the wrappers in
//! [`crate::inbound::http::schemas`].

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::accounts::{
    AccountResponse, CountersResponse, ExistsResponse, LoginRequest, RegisterRequest,
};
use crate::inbound::http::profiles::{
    CandidateProfileBody, CandidateProfileRequest, CompanyProfileBody, CompanyProfileRequest,
    ProfileResponse,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};

/// Adds the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/register or /api/v1/login.",
            ))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Talfy backend API",
        description = "Candidate and company accounts with role-specific profiles."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::accounts::register,
        crate::inbound::http::accounts::login,
        crate::inbound::http::accounts::logout,
        crate::inbound::http::accounts::account_exists,
        crate::inbound::http::accounts::counters,
        crate::inbound::http::accounts::current_account,
        crate::inbound::http::profiles::upsert_candidate_profile,
        crate::inbound::http::profiles::upsert_company_profile,
        crate::inbound::http::profiles::own_profile,
        crate::inbound::http::profiles::get_profile,
        crate::inbound::http::profiles::list_candidates,
        crate::inbound::http::profiles::list_companies,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        RegisterRequest,
        LoginRequest,
        AccountResponse,
        ExistsResponse,
        CountersResponse,
        CandidateProfileRequest,
        CompanyProfileRequest,
        CandidateProfileBody,
        CompanyProfileBody,
        ProfileResponse,
    )),
    tags(
        (name = "accounts", description = "Registration, login and account lookups"),
        (name = "profiles", description = "Candidate and company profiles"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
