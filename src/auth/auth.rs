use actix_web::{FromRequest, HttpRequest, dev::Payload, error::ErrorUnauthorized};
use futures::future::{Ready, ready};

use crate::model::employee::Role;

/// Trusted gateway headers carrying the authenticated identity.
///
/// Producing these is the upstream identity subsystem's job; this service
/// trusts them unconditionally and never verifies credentials itself.
pub const EMPLOYEE_ID_HEADER: &str = "X-Employee-Id";
pub const EMPLOYEE_ROLE_HEADER: &str = "X-Employee-Role";

/// The authenticated caller of the current request.
pub struct AuthUser {
    pub employee_id: u64,
    pub role: Role,
}

impl FromRequest for AuthUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let employee_id = match header(req, EMPLOYEE_ID_HEADER).and_then(|v| v.parse().ok()) {
            Some(id) => id,
            None => return ready(Err(ErrorUnauthorized("Missing employee identity"))),
        };

        let role = match header(req, EMPLOYEE_ROLE_HEADER).and_then(|v| v.parse::<Role>().ok()) {
            Some(r) => r,
            None => return ready(Err(ErrorUnauthorized("Missing or unknown role"))),
        };

        ready(Ok(AuthUser { employee_id, role }))
    }
}

fn header(req: &HttpRequest, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|h| h.to_str().ok())
        .map(str::to_string)
}

impl AuthUser {
    /// Manager-only routes call this first; gating stays at the boundary,
    /// the services below never inspect roles.
    pub fn require_manager(&self) -> actix_web::Result<()> {
        if self.role == Role::Manager {
            Ok(())
        } else {
            Err(actix_web::error::ErrorForbidden("Manager only"))
        }
    }
}
