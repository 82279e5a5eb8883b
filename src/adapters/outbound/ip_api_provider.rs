//! ip-api.com Provider
//!
//! Implements GeoProvider against the ip-api.com JSON endpoint.
//!
//! See: https://ip-api.com/docs
//! Free tier: 45 requests per minute

use crate::domain::entities::GeoRecord;
use crate::domain::errors::LookupError;
use crate::domain::ports::GeoProvider;
use crate::domain::value_objects::PublicIpv4;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;

const PROVIDER_NAME: &str = "ip-api.com";

/// Address probed by `check_health`; a stable public resolver the provider
/// always has data for.
const HEALTH_PROBE_IP: &str = "8.8.8.8";

/// Wire format of an ip-api.com lookup response.
///
/// On `status: "fail"` only `status`, `message` and `query` are populated.
#[derive(Debug, Deserialize)]
struct IpApiPayload {
    status: String,
    message: Option<String>,
    query: Option<String>,
    country: Option<String>,
    #[serde(rename = "countryCode")]
    country_code: Option<String>,
    #[serde(rename = "regionName")]
    region_name: Option<String>,
    region: Option<String>,
    city: Option<String>,
    zip: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
    timezone: Option<String>,
    isp: Option<String>,
    org: Option<String>,
    #[serde(rename = "as")]
    asn: Option<String>,
}

/// ip-api.com geolocation provider.
///
/// One GET per lookup over the injected pooled client - no retries, no
/// caching. The client's configured timeout bounds every call; exceeding
/// it surfaces as `ProviderUnavailable`, never as a hang.
pub struct IpApiProvider {
    client: reqwest::Client,
    base_url: String,
}

impl IpApiProvider {
    /// Create a provider over a shared HTTP client.
    ///
    /// The client is constructed once at startup and injected, so every
    /// adapter instance reuses the same connection pool.
    pub fn new(client: reqwest::Client, base_url: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn unavailable(&self, reason: String) -> LookupError {
        LookupError::ProviderUnavailable {
            provider: PROVIDER_NAME.to_string(),
            reason,
        }
    }

    fn describe_send_error(err: &reqwest::Error) -> String {
        if err.is_timeout() {
            "request timed out".to_string()
        } else if err.is_connect() {
            "connection failed".to_string()
        } else {
            format!("network error: {}", err)
        }
    }

    /// Map a successful payload into the normalized record.
    ///
    /// ip-api packs the autonomous system into one string ("AS15169
    /// Google LLC"); the leading token is the AS number, the rest the name.
    fn to_record(ip: PublicIpv4, payload: IpApiPayload) -> GeoRecord {
        let (as_number, as_name) = match payload.asn.as_deref() {
            Some(s) if !s.is_empty() => match s.split_once(' ') {
                Some((number, name)) => (Some(number.to_string()), Some(name.to_string())),
                None => (Some(s.to_string()), None),
            },
            _ => (None, None),
        };

        GeoRecord {
            ip: payload.query.unwrap_or_else(|| ip.to_string()),
            country: payload.country,
            country_code: payload.country_code,
            region: payload.region_name,
            region_code: payload.region,
            city: payload.city,
            zip_code: payload.zip,
            latitude: payload.lat,
            longitude: payload.lon,
            timezone: payload.timezone,
            isp: payload.isp,
            organization: payload.org,
            as_number,
            as_name,
        }
    }
}

#[async_trait]
impl GeoProvider for IpApiProvider {
    async fn lookup(&self, ip: PublicIpv4) -> Result<GeoRecord, LookupError> {
        let url = format!("{}/{}", self.base_url, ip);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.unavailable(Self::describe_send_error(&e)))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(LookupError::RateLimited(PROVIDER_NAME.to_string()));
        }
        if status.is_server_error() {
            return Err(self.unavailable(format!("HTTP {}", status.as_u16())));
        }

        let payload: IpApiPayload = response
            .json()
            .await
            .map_err(|e| self.unavailable(format!("invalid JSON response: {}", e)))?;

        if payload.status == "fail" {
            let reason = payload.message.as_deref().unwrap_or("unknown reason");
            // ip-api reports its own reserved-range check this way; the
            // validator normally filters these before any network call
            if reason == "private range" {
                return Err(LookupError::PrivateOrReserved(ip.to_string()));
            }
            tracing::debug!("provider reported fail for {}: {}", ip, reason);
            return Err(LookupError::NotFound(ip.to_string()));
        }

        Ok(Self::to_record(ip, payload))
    }

    async fn check_health(&self) -> bool {
        let url = format!("{}/{}", self.base_url, HEALTH_PROBE_IP);
        match self.client.get(&url).send().await {
            Ok(response) => response.status() == StatusCode::OK,
            Err(_) => false,
        }
    }

    fn name(&self) -> &str {
        PROVIDER_NAME
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::domain::services::IpValidator;
    use std::time::Duration;
    use tracing_test::traced_test;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn public_ip(s: &str) -> PublicIpv4 {
        IpValidator::validate(s).unwrap()
    }

    fn provider_for(server: &MockServer) -> IpApiProvider {
        IpApiProvider::new(reqwest::Client::new(), server.uri())
    }

    fn success_body() -> serde_json::Value {
        serde_json::json!({
            "status": "success",
            "query": "8.8.8.8",
            "country": "United States",
            "countryCode": "US",
            "regionName": "California",
            "region": "CA",
            "city": "Mountain View",
            "zip": "94035",
            "lat": 37.386,
            "lon": -122.0838,
            "timezone": "America/Los_Angeles",
            "isp": "Google LLC",
            "org": "Google Public DNS",
            "as": "AS15169 Google LLC"
        })
    }

    // ===== to_record Tests =====

    #[test]
    fn test_to_record_splits_as_field() {
        let payload: IpApiPayload = serde_json::from_value(success_body()).unwrap();
        let record = IpApiProvider::to_record(public_ip("8.8.8.8"), payload);

        assert_eq!(record.as_number.as_deref(), Some("AS15169"));
        assert_eq!(record.as_name.as_deref(), Some("Google LLC"));
    }

    #[test]
    fn test_to_record_as_field_without_name() {
        let mut body = success_body();
        body["as"] = serde_json::json!("AS15169");
        let payload: IpApiPayload = serde_json::from_value(body).unwrap();
        let record = IpApiProvider::to_record(public_ip("8.8.8.8"), payload);

        assert_eq!(record.as_number.as_deref(), Some("AS15169"));
        assert_eq!(record.as_name, None);
    }

    #[test]
    fn test_to_record_missing_fields_stay_none() {
        let payload: IpApiPayload = serde_json::from_value(serde_json::json!({
            "status": "success",
            "query": "8.8.8.8",
            "country": "United States"
        }))
        .unwrap();
        let record = IpApiProvider::to_record(public_ip("8.8.8.8"), payload);

        assert_eq!(record.country.as_deref(), Some("United States"));
        assert_eq!(record.city, None);
        assert_eq!(record.latitude, None);
        assert_eq!(record.as_number, None);
        assert_eq!(record.as_name, None);
    }

    #[test]
    fn test_to_record_falls_back_to_requested_ip() {
        let payload: IpApiPayload =
            serde_json::from_value(serde_json::json!({ "status": "success" })).unwrap();
        let record = IpApiProvider::to_record(public_ip("8.8.8.8"), payload);

        assert_eq!(record.ip, "8.8.8.8");
    }

    // ===== lookup Tests =====

    #[tokio::test]
    async fn test_lookup_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/8.8.8.8"))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
            .expect(1)
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let record = provider.lookup(public_ip("8.8.8.8")).await.unwrap();

        assert_eq!(record.ip, "8.8.8.8");
        assert_eq!(record.country.as_deref(), Some("United States"));
        assert_eq!(record.country_code.as_deref(), Some("US"));
        assert_eq!(record.region.as_deref(), Some("California"));
        assert_eq!(record.region_code.as_deref(), Some("CA"));
        assert_eq!(record.city.as_deref(), Some("Mountain View"));
        assert_eq!(record.zip_code.as_deref(), Some("94035"));
        assert_eq!(record.latitude, Some(37.386));
        assert_eq!(record.longitude, Some(-122.0838));
        assert_eq!(record.timezone.as_deref(), Some("America/Los_Angeles"));
        assert_eq!(record.isp.as_deref(), Some("Google LLC"));
        assert_eq!(record.organization.as_deref(), Some("Google Public DNS"));
    }

    #[tokio::test]
    async fn test_lookup_embeds_ip_in_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/1.1.1.1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
            .expect(1)
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        assert!(provider.lookup(public_ip("1.1.1.1")).await.is_ok());
    }

    #[tokio::test]
    async fn test_lookup_rate_limited() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let result = provider.lookup(public_ip("8.8.8.8")).await;

        assert_eq!(
            result,
            Err(LookupError::RateLimited("ip-api.com".to_string()))
        );
    }

    #[tokio::test]
    async fn test_lookup_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let result = provider.lookup(public_ip("8.8.8.8")).await;

        assert_eq!(
            result,
            Err(LookupError::ProviderUnavailable {
                provider: "ip-api.com".to_string(),
                reason: "HTTP 500".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_lookup_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let result = provider.lookup(public_ip("8.8.8.8")).await;

        match result {
            Err(LookupError::ProviderUnavailable { reason, .. }) => {
                assert!(reason.starts_with("invalid JSON response"), "reason: {}", reason);
            }
            other => panic!("expected ProviderUnavailable, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_lookup_fail_private_range() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "fail",
                "message": "private range",
                "query": "8.8.8.8"
            })))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let result = provider.lookup(public_ip("8.8.8.8")).await;

        assert_eq!(
            result,
            Err(LookupError::PrivateOrReserved("8.8.8.8".to_string()))
        );
    }

    #[tokio::test]
    #[traced_test]
    async fn test_lookup_fail_other_reason_is_not_found_and_logged() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "fail",
                "message": "invalid query",
                "query": "8.8.8.8"
            })))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let result = provider.lookup(public_ip("8.8.8.8")).await;

        assert_eq!(result, Err(LookupError::NotFound("8.8.8.8".to_string())));
        // The raw provider reason must be logged for observability
        assert!(logs_contain("invalid query"));
    }

    #[tokio::test]
    async fn test_lookup_fail_without_message_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "fail",
                "query": "8.8.8.8"
            })))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let result = provider.lookup(public_ip("8.8.8.8")).await;

        assert_eq!(result, Err(LookupError::NotFound("8.8.8.8".to_string())));
    }

    #[tokio::test]
    async fn test_lookup_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(success_body())
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(50))
            .build()
            .unwrap();
        let provider = IpApiProvider::new(client, server.uri());
        let result = provider.lookup(public_ip("8.8.8.8")).await;

        assert_eq!(
            result,
            Err(LookupError::ProviderUnavailable {
                provider: "ip-api.com".to_string(),
                reason: "request timed out".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_lookup_connection_refused() {
        // Nothing listens on this port
        let client = reqwest::Client::new();
        let provider = IpApiProvider::new(client, "http://127.0.0.1:59999".to_string());
        let result = provider.lookup(public_ip("8.8.8.8")).await;

        assert_eq!(
            result,
            Err(LookupError::ProviderUnavailable {
                provider: "ip-api.com".to_string(),
                reason: "connection failed".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_lookup_single_attempt_no_retry() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let _ = provider.lookup(public_ip("8.8.8.8")).await;
        // expect(1) verifies on drop that exactly one request was made
    }

    // ===== check_health Tests =====

    #[tokio::test]
    async fn test_check_health_available() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/8.8.8.8"))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        assert!(provider.check_health().await);
    }

    #[tokio::test]
    async fn test_check_health_unavailable_on_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        assert!(!provider.check_health().await);
    }

    #[tokio::test]
    async fn test_check_health_unavailable_on_connect_failure() {
        let provider =
            IpApiProvider::new(reqwest::Client::new(), "http://127.0.0.1:59999".to_string());
        assert!(!provider.check_health().await);
    }

    // ===== Constructor Tests =====

    #[test]
    fn test_new_trims_trailing_slash() {
        let provider =
            IpApiProvider::new(reqwest::Client::new(), "http://ip-api.com/json/".to_string());
        assert_eq!(provider.base_url, "http://ip-api.com/json");
    }

    #[test]
    fn test_provider_name() {
        let provider =
            IpApiProvider::new(reqwest::Client::new(), "http://ip-api.com/json".to_string());
        assert_eq!(provider.name(), "ip-api.com");
    }
}
