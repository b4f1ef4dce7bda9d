//! Request routing dispatch module
//!
//! Resolves a method/path pair to a [`Route`] and renders it. The route table
//! holds one JSON endpoint plus CORS preflight and the fallbacks.

use crate::http;
use crate::logger;
use crate::sentiment;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response, StatusCode};

const RESOURCE_SEGMENT: &str = "sentiment";
const ACTION_SEGMENT: &str = "analyze";

/// Every outcome a request can resolve to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `GET /sentiment/analyze/{symbol}/...`, symbol already upper-cased
    Analyze { symbol: String },
    /// `OPTIONS` on any path
    Preflight,
    /// `GET` on any other path
    NotFound,
    /// No handler registered for this method
    Unsupported { method: Method },
}

/// Main entry point for HTTP request handling. The request body is never read.
pub fn handle_request<B>(req: &Request<B>) -> Response<Full<Bytes>> {
    let route = resolve_route(req.method(), req.uri().path());
    render_route(route)
}

/// Map a method and path (query string excluded) to a route
pub fn resolve_route(method: &Method, path: &str) -> Route {
    match *method {
        Method::GET => match_analyze_path(path)
            .map_or(Route::NotFound, |symbol| Route::Analyze { symbol }),
        Method::OPTIONS => Route::Preflight,
        _ => Route::Unsupported {
            method: method.clone(),
        },
    }
}

/// Extract the upper-cased symbol from `/sentiment/analyze/{symbol}[/...]`.
///
/// Segment 0 (whatever precedes the first `/`) is not inspected and trailing
/// segments are ignored. An empty symbol segment still matches.
pub fn match_analyze_path(path: &str) -> Option<String> {
    let mut segments = path.split('/');
    match (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) {
        (Some(_), Some(RESOURCE_SEGMENT), Some(ACTION_SEGMENT), Some(symbol)) => {
            Some(symbol.to_uppercase())
        }
        _ => None,
    }
}

fn render_route(route: Route) -> Response<Full<Bytes>> {
    match route {
        Route::Analyze { symbol } => {
            let report = sentiment::analyze(&symbol);
            http::build_json_response(StatusCode::OK, &report)
        }
        Route::Preflight => http::build_options_response(),
        Route::NotFound => http::build_404_response(),
        Route::Unsupported { method } => {
            logger::log_warning(&format!("Unsupported method: {method}"));
            http::build_501_response(&method)
        }
    }
}
