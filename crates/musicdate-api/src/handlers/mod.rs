// SPDX-License-Identifier: GPL-3.0-or-later
pub mod albums;
pub mod tracks;

use axum::{
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use musicdate_application::geo::{CDN_COUNTRY_HEADER, PLATFORM_COUNTRY_HEADER};
use musicdate_application::{DiscoveryError, HeaderCountries};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

pub(crate) const CONFIGURATION_MISSING: &str = "API configuration missing";

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Country hints the hosting platform and CDN attach to the request.
pub(crate) fn header_countries(headers: &HeaderMap) -> HeaderCountries {
    let read = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    };

    HeaderCountries {
        platform: read(PLATFORM_COUNTRY_HEADER),
        cdn: read(CDN_COUNTRY_HEADER),
    }
}

/// Page query value. Anything other than a non-negative integer reads as page 1.
pub(crate) fn page_param(raw: Option<&str>) -> Option<usize> {
    raw.map(|value| value.trim().parse().unwrap_or(1))
}

/// Generic 500 body. Upstream detail goes to the log only.
pub(crate) fn discovery_failure(err: &DiscoveryError, upstream_message: &str) -> Response {
    let message = match err {
        DiscoveryError::Configuration(missing) => {
            error!(target: "api", %missing, "request rejected: configuration missing");
            CONFIGURATION_MISSING
        }
        DiscoveryError::Upstream(upstream) => {
            error!(
                target: "api",
                operation = %upstream.operation(),
                error = %upstream,
                "upstream request failed"
            );
            upstream_message
        }
    };

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_param_is_lenient() {
        assert_eq!(page_param(None), None);
        assert_eq!(page_param(Some("3")), Some(3));
        assert_eq!(page_param(Some(" 2 ")), Some(2));
        assert_eq!(page_param(Some("")), Some(1));
        assert_eq!(page_param(Some("abc")), Some(1));
        assert_eq!(page_param(Some("-4")), Some(1));
    }
}
