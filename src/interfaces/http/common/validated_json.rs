//! Validated JSON extractor for Axum
//!
//! `ValidatedJson<T>` deserializes the body like `axum::Json<T>` and then runs
//! `validator::Validate::validate()`. Both malformed JSON and failed field
//! rules are answered with a 400 in the standard error envelope.

use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use validator::Validate;

use super::ApiResponse;

pub struct ValidatedJson<T>(pub T);

pub enum ValidatedJsonRejection {
    JsonError(JsonRejection),
    ValidationError(validator::ValidationErrors),
}

fn describe(errors: &validator::ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(m) => m.to_string(),
                None => format!("{}: {}", field, e.code),
            })
        })
        .collect();
    messages.sort();

    if messages.is_empty() {
        "Validation failed".to_string()
    } else {
        messages.join("; ")
    }
}

impl IntoResponse for ValidatedJsonRejection {
    fn into_response(self) -> Response {
        let message = match self {
            Self::JsonError(rejection) => format!("Invalid JSON: {}", rejection.body_text()),
            Self::ValidationError(errors) => describe(&errors),
        };
        (StatusCode::BAD_REQUEST, Json(ApiResponse::<()>::error(message))).into_response()
    }
}

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidatedJsonRejection;

    async fn from_request(req: axum::extract::Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(ValidatedJsonRejection::JsonError)?;

        value
            .validate()
            .map_err(ValidatedJsonRejection::ValidationError)?;

        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use axum::routing::post;
    use axum::Router;
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Debug, Deserialize, Validate)]
    struct RoleBody {
        #[validate(email(message = "email must be valid"))]
        email: String,
    }

    async fn handler(ValidatedJson(_body): ValidatedJson<RoleBody>) -> &'static str {
        "ok"
    }

    async fn send(body: &'static str) -> StatusCode {
        let app = Router::new().route("/test", post(handler));
        let req = Request::builder()
            .method("POST")
            .uri("/test")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap();
        app.oneshot(req).await.unwrap().status()
    }

    #[tokio::test]
    async fn valid_body_passes() {
        assert_eq!(send(r#"{"email":"a@x.com"}"#).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn malformed_json_is_400() {
        assert_eq!(send("not json").await, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn failed_rule_is_400() {
        assert_eq!(send(r#"{"email":"nope"}"#).await, StatusCode::BAD_REQUEST);
    }
}
