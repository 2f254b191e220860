//! Content negotiation for the surface endpoint.
//!
//! The `f` query parameter wins over the Accept header. Unknown `f` values
//! are a 400; an Accept header naming nothing we produce is a 406.

use axum::http::{header, HeaderMap};
use msis_protocol::{media_types, ExceptionResponse, MsisError};

/// Media types the surface endpoint can produce.
pub const SURFACE_MEDIA_TYPES: &[&str] = &[media_types::JSON, media_types::GEO_JSON];

/// Output format for surface responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Column arrays (default)
    #[default]
    Json,
    /// One polygon feature per grid cell
    GeoJson,
}

impl OutputFormat {
    /// Get the Content-Type header value for this format.
    pub fn content_type(&self) -> &'static str {
        match self {
            OutputFormat::Json => media_types::JSON,
            OutputFormat::GeoJson => media_types::GEO_JSON,
        }
    }

    /// Parse format from the `f` query parameter value.
    pub fn from_query_param(f: &str) -> Option<Self> {
        match f.to_lowercase().as_str() {
            "json" | "application/json" => Some(OutputFormat::Json),
            "geojson" | "geo+json" | "application/geo+json" => Some(OutputFormat::GeoJson),
            _ => None,
        }
    }

    /// Parse format from an Accept header media type.
    pub fn from_media_type(media_type: &str) -> Option<Self> {
        match media_type {
            "application/json" => Some(OutputFormat::Json),
            "application/geo+json" => Some(OutputFormat::GeoJson),
            "*/*" | "application/*" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

/// Why negotiation failed.
#[derive(Debug, Clone, PartialEq)]
pub enum NegotiationError {
    /// The `f` parameter named an unknown format.
    InvalidFormat(MsisError),
    /// Nothing in the Accept header can be produced.
    NotAcceptable(ExceptionResponse),
}

impl NegotiationError {
    pub fn status_code(&self) -> u16 {
        match self {
            NegotiationError::InvalidFormat(err) => err.status_code(),
            NegotiationError::NotAcceptable(exc) => exc.status.unwrap_or(406),
        }
    }

    pub fn to_exception(&self) -> ExceptionResponse {
        match self {
            NegotiationError::InvalidFormat(err) => err.to_exception(),
            NegotiationError::NotAcceptable(exc) => exc.clone(),
        }
    }
}

/// Negotiate the output format from the `f` parameter and Accept header.
pub fn negotiate_format(
    headers: &HeaderMap,
    f_param: Option<&str>,
) -> Result<OutputFormat, NegotiationError> {
    if let Some(f) = f_param.map(str::trim).filter(|f| !f.is_empty()) {
        return OutputFormat::from_query_param(f).ok_or_else(|| {
            NegotiationError::InvalidFormat(MsisError::UnsupportedFormat(format!(
                "'{}'. Supported formats: json, geojson",
                f
            )))
        });
    }

    let accept = headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("*/*");

    // Parse Accept header with quality values
    let mut accepted_types: Vec<(&str, f32)> = accept
        .split(',')
        .filter_map(|s| {
            let mut parts = s.split(';');
            let media_type = parts.next()?.trim();
            if media_type.is_empty() {
                return None;
            }
            let quality = parts
                .find_map(|p| p.trim().strip_prefix("q=").and_then(|q| q.parse::<f32>().ok()))
                .unwrap_or(1.0);
            Some((media_type, quality))
        })
        .collect();

    if accepted_types.is_empty() {
        return Ok(OutputFormat::default());
    }

    // Highest quality first; stable sort keeps header order on ties
    accepted_types.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    for (media_type, quality) in &accepted_types {
        if *quality <= 0.0 {
            continue;
        }
        if let Some(format) = OutputFormat::from_media_type(media_type) {
            return Ok(format);
        }
    }

    let requested: Vec<&str> = accepted_types.iter().map(|(t, _)| *t).collect();
    Err(NegotiationError::NotAcceptable(
        ExceptionResponse::not_acceptable(format!(
            "Requested format(s) '{}' not supported. Supported formats: {}",
            requested.join(", "),
            SURFACE_MEDIA_TYPES.join(", ")
        )),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn make_headers(accept: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_str(accept).unwrap());
        headers
    }

    #[test]
    fn test_no_header_defaults_to_json() {
        assert_eq!(
            negotiate_format(&HeaderMap::new(), None),
            Ok(OutputFormat::Json)
        );
    }

    #[test]
    fn test_accept_geojson() {
        let headers = make_headers("application/geo+json");
        assert_eq!(negotiate_format(&headers, None), Ok(OutputFormat::GeoJson));
    }

    #[test]
    fn test_accept_wildcard() {
        let headers = make_headers("*/*");
        assert_eq!(negotiate_format(&headers, None), Ok(OutputFormat::Json));
    }

    #[test]
    fn test_accept_with_quality() {
        let headers = make_headers("application/json;q=0.5, application/geo+json;q=0.9");
        assert_eq!(negotiate_format(&headers, None), Ok(OutputFormat::GeoJson));
    }

    #[test]
    fn test_f_param_overrides_accept() {
        let headers = make_headers("application/geo+json");
        assert_eq!(
            negotiate_format(&headers, Some("json")),
            Ok(OutputFormat::Json)
        );
        assert_eq!(
            negotiate_format(&HeaderMap::new(), Some("GeoJSON")),
            Ok(OutputFormat::GeoJson)
        );
    }

    #[test]
    fn test_empty_f_param_is_ignored() {
        let headers = make_headers("application/geo+json");
        assert_eq!(negotiate_format(&headers, Some("")), Ok(OutputFormat::GeoJson));
    }

    #[test]
    fn test_unknown_f_param_is_bad_request() {
        let err = negotiate_format(&HeaderMap::new(), Some("csv")).unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert!(err.to_exception().detail.unwrap_or_default().contains("csv"));
    }

    #[test]
    fn test_unsupported_accept_is_not_acceptable() {
        let headers = make_headers("text/html");
        let err = negotiate_format(&headers, None).unwrap_err();
        assert_eq!(err.status_code(), 406);
    }

    #[test]
    fn test_content_types() {
        assert_eq!(OutputFormat::Json.content_type(), "application/json");
        assert_eq!(OutputFormat::GeoJson.content_type(), "application/geo+json");
    }
}
