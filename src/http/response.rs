//! HTTP response building module
//!
//! Provides builders for the handful of responses the mock can send.
//! Every builder falls back to a bare response instead of panicking.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::http::response::Builder;
use hyper::{Method, Response, StatusCode};
use serde::Serialize;

/// Permissive CORS headers attached to GET and OPTIONS responses
pub const CORS_HEADERS: [(&str, &str); 3] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Methods", "GET, POST, OPTIONS"),
    ("Access-Control-Allow-Headers", "Content-Type"),
];

const NOT_FOUND_BODY: &str = r#"{"error": "Not found"}"#;

/// HTML error page sent for methods without a handler
const ERROR_PAGE_TEMPLATE: &str = r#"<!DOCTYPE HTML>
<html lang="en">
    <head>
        <meta charset="utf-8">
        <title>Error response</title>
    </head>
    <body>
        <h1>Error response</h1>
        <p>Error code: {code}</p>
        <p>Message: {message}.</p>
        <p>Error code explanation: {code} - {explain}.</p>
    </body>
</html>
"#;

/// Attach the CORS headers to a response builder
pub fn with_cors(builder: Builder) -> Builder {
    CORS_HEADERS
        .iter()
        .fold(builder, |builder, (name, value)| builder.header(*name, *value))
}

/// Build a JSON response with CORS headers
pub fn build_json_response<T: Serialize>(status: StatusCode, body: &T) -> Response<Full<Bytes>> {
    let json = match super::json::to_vec(body) {
        Ok(j) => j,
        Err(e) => {
            crate::logger::log_error(&format!("Failed to serialize response: {e}"));
            return with_cors(Response::builder())
                .status(StatusCode::INTERNAL_SERVER_ERROR)
                .header("Content-Type", "application/json")
                .body(Full::new(Bytes::from_static(
                    br#"{"error": "Internal server error"}"#,
                )))
                .unwrap_or_else(|e| {
                    log_build_error("500", &e);
                    Response::new(Full::new(Bytes::new()))
                });
        }
    };

    with_cors(Response::builder())
        .status(status)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(json)))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 404 Not Found response with the fixed JSON error body
pub fn build_404_response() -> Response<Full<Bytes>> {
    with_cors(Response::builder())
        .status(StatusCode::NOT_FOUND)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from_static(NOT_FOUND_BODY.as_bytes())))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(Full::new(Bytes::from_static(NOT_FOUND_BODY.as_bytes())))
        })
}

/// Build OPTIONS response (preflight request): CORS headers, no body
pub fn build_options_response() -> Response<Full<Bytes>> {
    with_cors(Response::builder())
        .status(StatusCode::OK)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("OPTIONS", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 501 Not Implemented response for methods without a handler
pub fn build_501_response(method: &Method) -> Response<Full<Bytes>> {
    let page = ERROR_PAGE_TEMPLATE
        .replace("{code}", StatusCode::NOT_IMPLEMENTED.as_str())
        .replace("{message}", &format!("Unsupported method ('{method}')"))
        .replace("{explain}", "Server does not support this operation");
    Response::builder()
        .status(StatusCode::NOT_IMPLEMENTED)
        .header("Content-Type", "text/html;charset=utf-8")
        .body(Full::new(Bytes::from(page)))
        .unwrap_or_else(|e| {
            log_build_error("501", &e);
            let mut resp = Response::new(Full::new(Bytes::new()));
            *resp.status_mut() = StatusCode::NOT_IMPLEMENTED;
            resp
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    fn assert_cors(resp: &Response<Full<Bytes>>) {
        for (name, value) in CORS_HEADERS {
            assert_eq!(resp.headers().get(name).unwrap(), value, "header {name}");
        }
    }

    async fn body_string(resp: Response<Full<Bytes>>) -> String {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_404_is_json_with_cors() {
        let resp = build_404_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(resp.headers().get("content-type").unwrap(), "application/json");
        assert_cors(&resp);

        assert_eq!(body_string(resp).await, r#"{"error": "Not found"}"#);
    }

    #[tokio::test]
    async fn test_options_has_empty_body() {
        let resp = build_options_response();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_cors(&resp);
        assert!(resp.headers().get("content-type").is_none());
        assert!(body_string(resp).await.is_empty());
    }

    #[tokio::test]
    async fn test_json_response_serializes_body() {
        let resp = build_json_response(StatusCode::OK, &serde_json::json!({"a": [1, 2]}));
        assert_eq!(resp.status(), StatusCode::OK);
        assert_cors(&resp);
        assert_eq!(body_string(resp).await, r#"{"a": [1, 2]}"#);
    }

    #[tokio::test]
    async fn test_501_names_method() {
        let resp = build_501_response(&Method::DELETE);
        assert_eq!(resp.status(), StatusCode::NOT_IMPLEMENTED);
        assert!(resp.headers().get("access-control-allow-origin").is_none());
        assert_eq!(
            resp.headers().get("content-type").unwrap(),
            "text/html;charset=utf-8"
        );

        let page = body_string(resp).await;
        assert!(page.starts_with("<!DOCTYPE HTML>"));
        assert!(page.contains("<p>Error code: 501</p>"));
        assert!(page.contains("<p>Message: Unsupported method ('DELETE').</p>"));
        assert!(page.contains("501 - Server does not support this operation."));
    }
}
