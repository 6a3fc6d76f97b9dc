use std::{collections::HashSet, sync::Arc};

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::TypedHeader;
use headers::{authorization::Bearer, Authorization};

use crate::common::RouteErrorResponse;

/// Bearer tokens allowed to use the guarded routes.
#[derive(Debug, Clone, Default)]
pub struct ApiTokens {
    tokens: HashSet<String>,
}

impl ApiTokens {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    /// Comma separated list, blanks are ignored.
    pub fn parse(list: &str) -> Self {
        Self::new(
            list.split(',')
                .map(str::trim)
                .filter(|token| !token.is_empty()),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn accepts(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }
}

/// Rejects requests without a bearer token (401) or with an unknown one
/// (403). Accepted requests pass through untouched.
pub async fn authorization_middleware(
    State(tokens): State<Arc<ApiTokens>>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    req: Request,
    next: Next,
) -> Response {
    let rejection = match bearer {
        Some(TypedHeader(Authorization(bearer))) if tokens.accepts(bearer.token()) => {
            return next.run(req).await;
        }
        Some(_) => StatusCode::FORBIDDEN,
        None => StatusCode::UNAUTHORIZED,
    };

    log::debug!(
        "rejected {} {} with {}",
        req.method(),
        req.uri().path(),
        rejection
    );
    let mut response = RouteErrorResponse::new(rejection)
        .with_method(req.method())
        .with_uri(req.uri().path())
        .with_default_message()
        .into_response();
    if rejection == StatusCode::UNAUTHORIZED {
        response
            .headers_mut()
            .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
    }
    response
}

#[cfg(test)]
mod tests {
    use super::ApiTokens;

    #[test]
    fn parses_comma_separated_tokens() {
        let tokens = ApiTokens::parse(" alpha, beta ,,");
        assert!(tokens.accepts("alpha"));
        assert!(tokens.accepts("beta"));
        assert!(!tokens.accepts(""));
        assert!(!tokens.accepts("gamma"));
    }

    #[test]
    fn empty_list_accepts_nothing() {
        let tokens = ApiTokens::parse("");
        assert!(tokens.is_empty());
        assert!(!tokens.accepts("anything"));
    }
}
