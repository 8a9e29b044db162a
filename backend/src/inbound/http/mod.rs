//! HTTP inbound adapter exposing the REST API.
//!
//! Handlers translate JSON bodies and the session cookie into calls on the
//! driving ports held in [`state::HttpState`], and map domain errors back
//! through [`error`].

use actix_web::web;

pub mod accounts;
pub mod error;
pub mod health;
pub mod profiles;
pub mod schemas;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;
mod validation;

pub use error::ApiResult;

/// Register every `/api/v1` handler on a scope or app.
///
/// The caller supplies the session middleware and the
/// [`state::HttpState`] app data. Malformed JSON bodies are answered with
/// the standard error envelope.
///
/// # Examples
/// ```no_run
/// use actix_web::{App, web};
/// use talfy::inbound::http::configure_api;
///
/// let _app = App::new().service(web::scope("/api/v1").configure(configure_api));
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(validation::json_config())
        .service(accounts::register)
        .service(accounts::login)
        .service(accounts::logout)
        .service(accounts::account_exists)
        .service(accounts::counters)
        .service(accounts::current_account)
        .service(profiles::upsert_candidate_profile)
        .service(profiles::upsert_company_profile)
        .service(profiles::own_profile)
        .service(profiles::get_profile)
        .service(profiles::list_candidates)
        .service(profiles::list_companies);
}
