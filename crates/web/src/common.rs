use axum::{
    extract::{OriginalUri, Request},
    http::{Method, StatusCode},
    response::IntoResponse,
    Json,
};
use observations::{database::DatabaseError, export::ExportError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub type RouteResult<O> = Result<O, RouteErrorResponse>;
pub type JsonResult<O> = RouteResult<Json<O>>;

/// Body of every count route, always wrapped in a one element list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountDto {
    pub count: i64,
}

impl CountDto {
    pub fn list(count: i64) -> Json<Vec<CountDto>> {
        Json(vec![CountDto { count }])
    }
}

/// Body of the mutation routes.
pub(crate) fn empty_list() -> Json<Value> {
    Json(Value::Array(vec![]))
}

/// Unwraps a required parameter or rejects the request with `404 []`.
pub(crate) fn required<T>(value: Option<T>, name: &str) -> RouteResult<T> {
    value.ok_or_else(|| RouteErrorResponse::missing_parameter(name))
}

/// Maps a failed operation of `method` on `uri` to the error response.
pub(crate) fn failed<'a, E>(
    method: &'a Method,
    uri: &'a OriginalUri,
) -> impl FnOnce(E) -> RouteErrorResponse + 'a
where
    E: Into<RouteErrorResponse>,
{
    move |why| why.into().with_method(method).with_uri(uri.path())
}

pub(crate) async fn route_not_found(
    OriginalUri(original_uri): OriginalUri,
    req: Request,
) -> impl IntoResponse {
    RouteErrorResponse::not_found(req.method(), original_uri.path())
}

// - Commonly used responeses -

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteErrorResponse {
    #[serde(skip)]
    pub status_code: StatusCode,

    /// Sent instead of the error object when set.
    #[serde(skip)]
    pub body: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_method: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_uri: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RouteErrorResponse {
    pub fn new(status_code: StatusCode) -> Self {
        Self {
            status_code,
            body: None,
            http_method: None,
            requested_uri: None,
            message: None,
        }
    }

    pub fn not_found(method: &Method, uri: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND)
            .with_method(method)
            .with_uri(uri)
            .with_default_message()
    }

    /// `404` with an empty list, the answer to a missing required parameter.
    pub fn missing_parameter(name: &str) -> Self {
        Self::new(StatusCode::NOT_FOUND)
            .with_message(format!("missing parameter `{}`", name))
            .with_body(Value::Array(vec![]))
    }

    /// `400` echoing the rejected request body.
    pub fn invalid_body(body: Value) -> Self {
        Self::new(StatusCode::BAD_REQUEST)
            .with_default_message()
            .with_body(body)
    }

    pub fn with_method(mut self, method: &Method) -> Self {
        self.http_method = Some(method.to_string());
        self
    }

    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.requested_uri = Some(uri.into());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_default_message(self) -> Self {
        let message = self
            .status_code
            .canonical_reason()
            .unwrap_or("i dunno what happened here :/");
        self.with_message(message)
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

impl From<DatabaseError> for RouteErrorResponse {
    fn from(value: DatabaseError) -> Self {
        log::error!("{}", value);
        Self::new(StatusCode::INTERNAL_SERVER_ERROR).with_default_message()
    }
}

impl From<ExportError> for RouteErrorResponse {
    fn from(value: ExportError) -> Self {
        log::error!("{}", value);
        Self::new(StatusCode::INTERNAL_SERVER_ERROR).with_default_message()
    }
}

impl IntoResponse for RouteErrorResponse {
    fn into_response(mut self) -> axum::response::Response {
        match self.body.take() {
            Some(body) => (self.status_code, Json(body)).into_response(),
            None => (self.status_code, Json(self)).into_response(),
        }
    }
}
