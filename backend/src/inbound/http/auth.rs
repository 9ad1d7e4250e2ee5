//! Per-request identity extraction.
//!
//! Identity is asserted by the deployment gateway and arrives as two
//! headers: `x-user-id` (UUID) and `x-user-role` (`user` or `admin`). The
//! extractor turns them into a domain [`AuthContext`]; missing or malformed
//! headers fail the request with `401`.

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};
use uuid::Uuid;

use crate::domain::{AuthContext, Error, Role};

/// Header carrying the gateway-verified user identifier.
pub const USER_ID_HEADER: &str = "x-user-id";
/// Header carrying the gateway-verified role.
pub const USER_ROLE_HEADER: &str = "x-user-role";

/// Extractor wrapping the authenticated caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity(AuthContext);

impl Identity {
    /// The authenticated caller.
    pub fn context(&self) -> AuthContext {
        self.0
    }
}

fn header_value<'r>(req: &'r HttpRequest, name: &str) -> Result<&'r str, Error> {
    req.headers()
        .get(name)
        .ok_or_else(|| Error::unauthorized(format!("missing {name} header")))?
        .to_str()
        .map_err(|_| Error::unauthorized(format!("{name} header is not valid ASCII")))
}

fn identity_from_request(req: &HttpRequest) -> Result<Identity, Error> {
    let user_id = header_value(req, USER_ID_HEADER)?;
    let user_id = Uuid::parse_str(user_id)
        .map_err(|_| Error::unauthorized(format!("{USER_ID_HEADER} must be a valid UUID")))?;
    let role = header_value(req, USER_ROLE_HEADER)?;
    let role: Role = role
        .parse()
        .map_err(|_| Error::unauthorized(format!("{USER_ROLE_HEADER} must be user or admin")))?;
    Ok(Identity(AuthContext::new(user_id, role)))
}

impl FromRequest for Identity {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(identity_from_request(req))
    }
}
