use std::sync::Arc;

use axum::{
    extract::State,
    http::{self, Request},
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::{
    auth::bearer_token,
    model::{CurrentUser, Session},
    AppState,
};

// Resolve the bearer token into a `Session` extension. A missing or malformed
// header is anonymous; only a token that fails verification is `Invalid`.
pub async fn mw_resolve_session<B>(
    State(state): State<Arc<AppState>>,
    mut request: Request<B>,
    next: Next<B>,
) -> Response {
    let token = request
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .and_then(bearer_token);

    let session = match token {
        None => Session::Anonymous,
        Some(token) => match state.tokens.decode_token(token) {
            Ok(username) => Session::User(CurrentUser { username }),
            Err(err) => {
                warn!(error = %err, "rejected bearer token");
                Session::Invalid(err)
            }
        },
    };

    request.extensions_mut().insert(session);
    next.run(request).await
}
