//! Breach-exposure client for the Pwned Passwords range API.
//!
//! Implements the k-anonymity lookup protocol: the password is hashed
//! locally and only the first 5 characters of the hash are sent to the
//! server, which answers with every known suffix in that prefix bucket.
//! The raw password and the full hash never leave the process, on any code
//! path, retries included.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use sha1::{Digest, Sha1};
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::types::{BreachResult, InputError};

/// Production endpoint of the range API.
pub const API_BASE: &str = "https://api.pwnedpasswords.com";

const CLIENT_ID: &str = concat!("pwd-audit/", env!("CARGO_PKG_VERSION"));
const RETRY_BASE_DELAY: Duration = Duration::from_secs(1);
const PREFIX_LEN: usize = 5;

#[derive(Error, Debug)]
pub enum BreachError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Outcome of a breach check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BreachStatus {
    /// The lookup completed and produced a result.
    Checked(BreachResult),
    /// Retries were exhausted or the check was cancelled. Callers must
    /// render this as "breach status unknown", never as "not compromised".
    Unavailable,
}

/// Bounded retry schedule: the wait grows with the attempt number and is
/// doubled when the server asked us to slow down. Pure, so tests can assert
/// the schedule without sleeping.
#[derive(Debug, Clone)]
struct RetrySchedule {
    base: Duration,
    max_attempts: u32,
}

impl RetrySchedule {
    /// Delay before the attempt following `attempt` (0-based), or `None`
    /// when the attempt budget is exhausted.
    fn delay_after(&self, attempt: u32, rate_limited: bool) -> Option<Duration> {
        if attempt + 1 >= self.max_attempts {
            return None;
        }
        let factor = if rate_limited { 2 } else { 1 };
        Some(self.base * ((attempt + 1) * factor))
    }
}

/// What a single range query produced.
enum RangeReply {
    /// HTTP 200: newline-separated `SUFFIX:COUNT` records.
    Records(String),
    /// HTTP 404: the bucket has no entries at all.
    NoMatches,
    /// HTTP 429.
    RateLimited,
    /// Transport error, timeout or an unexpected status.
    Failed,
}

/// Client for k-anonymity breach lookups.
///
/// Safe to share across concurrent checks; every call owns its own attempt
/// counter and backoff state. Results are never cached.
pub struct BreachChecker {
    http: reqwest::Client,
    base_url: String,
    retry_base: Duration,
}

impl BreachChecker {
    /// Client against the production API.
    pub fn new() -> Result<Self, BreachError> {
        Self::with_base_url(API_BASE)
    }

    /// Client against a custom endpoint. Intended for tests and proxies.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, BreachError> {
        let mut headers = HeaderMap::new();
        // The server pads responses to a minimum record count, masking
        // response-size side channels.
        headers.insert("Add-Padding", HeaderValue::from_static("true"));

        let http = reqwest::Client::builder()
            .user_agent(CLIENT_ID)
            .default_headers(headers)
            .build()?;

        Ok(BreachChecker {
            http,
            base_url: base_url.into(),
            retry_base: RETRY_BASE_DELAY,
        })
    }

    /// Checks whether a password appears in known breach corpora.
    ///
    /// `timeout` bounds each attempt; `max_retries` bounds the number of
    /// attempts. Cancellation during backoff or in flight resolves to
    /// [`BreachStatus::Unavailable`].
    ///
    /// # Errors
    /// [`InputError::EmptyInput`] when the password is empty. Network
    /// failures are not errors; they surface as `Unavailable`.
    pub async fn check(
        &self,
        password: &SecretString,
        timeout: Duration,
        max_retries: u32,
        token: Option<CancellationToken>,
    ) -> Result<BreachStatus, InputError> {
        let pwd = password.expose_secret();
        if pwd.is_empty() {
            return Err(InputError::EmptyInput);
        }

        let digest = Sha1::digest(pwd.as_bytes());
        let hex = format!("{digest:X}");
        let (prefix, suffix) = hex.split_at(PREFIX_LEN);

        let schedule = RetrySchedule {
            base: self.retry_base,
            max_attempts: max_retries,
        };

        for attempt in 0..max_retries {
            if token.as_ref().is_some_and(|t| t.is_cancelled()) {
                return Ok(BreachStatus::Unavailable);
            }

            let reply = self.fetch_range(prefix, timeout).await;
            let rate_limited = matches!(reply, RangeReply::RateLimited);

            match reply {
                RangeReply::Records(body) => {
                    let count = match_count(&body, suffix);
                    return Ok(BreachStatus::Checked(BreachResult::from_count(count)));
                }
                RangeReply::NoMatches => {
                    return Ok(BreachStatus::Checked(BreachResult::from_count(0)));
                }
                RangeReply::RateLimited | RangeReply::Failed => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(
                        "range query attempt {}/{} failed (rate limited: {})",
                        attempt + 1,
                        max_retries,
                        rate_limited
                    );

                    match schedule.delay_after(attempt, rate_limited) {
                        Some(delay) => {
                            if !wait(delay, token.as_ref()).await {
                                return Ok(BreachStatus::Unavailable);
                            }
                        }
                        None => break,
                    }
                }
            }
        }

        Ok(BreachStatus::Unavailable)
    }

    async fn fetch_range(&self, prefix: &str, timeout: Duration) -> RangeReply {
        let url = format!("{}/range/{}", self.base_url, prefix);

        let response = match self.http.get(&url).timeout(timeout).send().await {
            Ok(response) => response,
            Err(_) => return RangeReply::Failed,
        };

        match response.status() {
            StatusCode::OK => match response.text().await {
                Ok(body) => RangeReply::Records(body),
                Err(_) => RangeReply::Failed,
            },
            StatusCode::NOT_FOUND => RangeReply::NoMatches,
            StatusCode::TOO_MANY_REQUESTS => RangeReply::RateLimited,
            _ => RangeReply::Failed,
        }
    }
}

/// Sleeps for `delay` unless cancelled first.
///
/// # Returns
/// `false` when the wait was cancelled.
async fn wait(delay: Duration, token: Option<&CancellationToken>) -> bool {
    match token {
        // Cancellation interrupts the backoff; letting the full delay
        // elapse completes the wait.
        Some(token) => tokio::time::timeout(delay, token.cancelled())
            .await
            .is_err(),
        None => {
            tokio::time::sleep(delay).await;
            true
        }
    }
}

/// Scans range records for the given hash suffix and returns its count.
///
/// Records are `SUFFIX:COUNT` lines; the suffix comparison is
/// case-insensitive. Malformed lines are skipped so a damaged body degrades
/// to "not found" instead of failing the check; padding records parse like
/// any other line.
fn match_count(body: &str, suffix: &str) -> u64 {
    for line in body.lines() {
        let Some((candidate, count)) = line.split_once(':') else {
            continue;
        };
        if candidate.trim().eq_ignore_ascii_case(suffix) {
            return count.trim().parse().unwrap_or(0);
        }
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RiskLevel;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    // SHA-1("password") = 5BAA61E4C9B93F3F0682250B6CF8331B7EE68FD8
    const PASSWORD: &str = "password";
    const PREFIX: &str = "5BAA6";
    const SUFFIX: &str = "1E4C9B93F3F0682250B6CF8331B7EE68FD8";

    const TIMEOUT: Duration = Duration::from_secs(2);

    fn secret(s: &str) -> SecretString {
        SecretString::new(s.to_string().into())
    }

    fn checker(server: &MockServer) -> BreachChecker {
        let mut checker =
            BreachChecker::with_base_url(server.uri()).expect("client should build");
        checker.retry_base = Duration::from_millis(5);
        checker
    }

    fn range_body(suffix_line: Option<&str>) -> String {
        let mut body = String::from(
            "0018A45C4D1DEF81644B54AB7F969B88D65:3\r\n\
             011053FD0102E94D6AE2F8B83D76FAF94F6:1\r\n",
        );
        if let Some(line) = suffix_line {
            body.push_str(line);
            body.push_str("\r\n");
        }
        // Padding record; zero counts must still parse.
        body.push_str("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF:0\r\n");
        body
    }

    #[test]
    fn test_match_count_finds_suffix() {
        let body = range_body(Some(&format!("{SUFFIX}:42")));
        assert_eq!(match_count(&body, SUFFIX), 42);
    }

    #[test]
    fn test_match_count_case_insensitive() {
        let body = range_body(Some(&format!("{}:7", SUFFIX.to_lowercase())));
        assert_eq!(match_count(&body, SUFFIX), 7);
    }

    #[test]
    fn test_match_count_absent_suffix() {
        assert_eq!(match_count(&range_body(None), SUFFIX), 0);
    }

    #[test]
    fn test_match_count_skips_malformed_lines() {
        let body = format!("garbage without separator\n\n{SUFFIX}:13\n");
        assert_eq!(match_count(&body, SUFFIX), 13);
    }

    #[test]
    fn test_match_count_unparseable_count() {
        let body = format!("{SUFFIX}:not-a-number\n");
        assert_eq!(match_count(&body, SUFFIX), 0);
    }

    #[test]
    fn test_retry_schedule_grows() {
        let schedule = RetrySchedule {
            base: Duration::from_secs(1),
            max_attempts: 4,
        };
        assert_eq!(schedule.delay_after(0, false), Some(Duration::from_secs(1)));
        assert_eq!(schedule.delay_after(1, false), Some(Duration::from_secs(2)));
        assert_eq!(schedule.delay_after(2, false), Some(Duration::from_secs(3)));
        assert_eq!(schedule.delay_after(3, false), None);
    }

    #[test]
    fn test_retry_schedule_doubles_when_rate_limited() {
        let schedule = RetrySchedule {
            base: Duration::from_secs(1),
            max_attempts: 4,
        };
        assert_eq!(schedule.delay_after(0, true), Some(Duration::from_secs(2)));
        assert_eq!(schedule.delay_after(1, true), Some(Duration::from_secs(4)));
    }

    #[tokio::test]
    async fn test_check_compromised_password() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/range/{PREFIX}")))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(range_body(Some(&format!("{SUFFIX}:42")))),
            )
            .mount(&server)
            .await;

        let status = checker(&server)
            .check(&secret(PASSWORD), TIMEOUT, 3, None)
            .await
            .expect("non-empty input");

        match status {
            BreachStatus::Checked(result) => {
                assert!(result.is_compromised);
                assert_eq!(result.breach_count, 42);
                assert_eq!(result.risk_level, RiskLevel::Medium);
            }
            BreachStatus::Unavailable => panic!("check should have completed"),
        }
    }

    #[tokio::test]
    async fn test_check_absent_from_bucket() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/range/{PREFIX}")))
            .respond_with(ResponseTemplate::new(200).set_body_string(range_body(None)))
            .mount(&server)
            .await;

        let status = checker(&server)
            .check(&secret(PASSWORD), TIMEOUT, 3, None)
            .await
            .expect("non-empty input");

        assert_eq!(
            status,
            BreachStatus::Checked(BreachResult::from_count(0))
        );
    }

    #[tokio::test]
    async fn test_404_means_zero_matches() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let status = checker(&server)
            .check(&secret(PASSWORD), TIMEOUT, 3, None)
            .await
            .expect("non-empty input");

        match status {
            BreachStatus::Checked(result) => {
                assert!(!result.is_compromised);
                assert_eq!(result.risk_level, RiskLevel::Safe);
            }
            BreachStatus::Unavailable => panic!("404 is a definitive answer, not a failure"),
        }
    }

    #[tokio::test]
    async fn test_unavailable_after_exhausted_retries() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let status = checker(&server)
            .check(&secret(PASSWORD), TIMEOUT, 3, None)
            .await
            .expect("non-empty input");

        assert_eq!(status, BreachStatus::Unavailable);
        let requests = server.received_requests().await.expect("recording enabled");
        assert_eq!(requests.len(), 3);
    }

    #[tokio::test]
    async fn test_rate_limit_then_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(range_body(Some(&format!("{SUFFIX}:3")))),
            )
            .mount(&server)
            .await;

        let status = checker(&server)
            .check(&secret(PASSWORD), TIMEOUT, 3, None)
            .await
            .expect("non-empty input");

        assert_eq!(
            status,
            BreachStatus::Checked(BreachResult::from_count(3))
        );
    }

    #[tokio::test]
    async fn test_only_prefix_leaves_the_process() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(range_body(None)))
            .mount(&server)
            .await;

        checker(&server)
            .check(&secret(PASSWORD), TIMEOUT, 3, None)
            .await
            .expect("non-empty input");

        let requests = server.received_requests().await.expect("recording enabled");
        assert!(!requests.is_empty());
        for request in &requests {
            assert_eq!(request.url.path(), format!("/range/{PREFIX}"));
            assert!(request.url.query().is_none());
            // The hash suffix must never appear anywhere in the request.
            assert!(!request.url.as_str().to_uppercase().contains(SUFFIX));
        }
    }

    #[tokio::test]
    async fn test_cancelled_check_is_unavailable() {
        let server = MockServer::start().await;
        let token = CancellationToken::new();
        token.cancel();

        let status = checker(&server)
            .check(&secret(PASSWORD), TIMEOUT, 3, Some(token))
            .await
            .expect("non-empty input");

        assert_eq!(status, BreachStatus::Unavailable);
        // Cancellation before the first attempt: nothing was sent.
        let requests = server.received_requests().await.expect("recording enabled");
        assert!(requests.is_empty());
    }

    #[tokio::test]
    async fn test_empty_password_rejected() {
        let server = MockServer::start().await;
        let result = checker(&server).check(&secret(""), TIMEOUT, 3, None).await;
        assert_eq!(result, Err(InputError::EmptyInput));
    }
}
