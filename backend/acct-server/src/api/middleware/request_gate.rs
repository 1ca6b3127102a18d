//! Bearer-token gate for the authenticated route group.
//!
//! Verifies `Authorization: Bearer <token>` and stores the token's subject in
//! the request extensions as [`VerifiedSubject`]. Handlers behind the gate
//! read it with `Extension<VerifiedSubject>`.

use crate::{ApiError, AppState};

use acct_auth::VerifiedSubject;

use std::panic::Location;

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use error_location::ErrorLocation;

pub async fn request_gate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = match request.headers().get(AUTHORIZATION) {
        Some(value) => Some(value.to_str().map_err(|_| ApiError::Unauthorized {
            message: "Invalid auth header format".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?),
        None => None,
    };

    let subject = VerifiedSubject::from_authorization(header, &state.tokens)?;
    log::debug!("Authenticated request for {}", subject.uid());

    request.extensions_mut().insert(subject);
    Ok(next.run(request).await)
}
