//! TLS certificate expiry probe.
//!
//! Opens a raw TLS connection to the target's host and port, independent of
//! the HTTP probe, and reports how many whole days remain before the leaf
//! certificate's `notAfter`. Trust is never evaluated: an expired or
//! self-signed certificate still yields a day count.
//!
//! Uses `tokio-rustls` for the handshake and `x509-parser` for the leaf.

#[cfg(test)]
pub(crate) mod test_helpers;
mod verifier;

use std::sync::Arc;
use std::time::Duration;

use log::debug;
use rustls::crypto::ring::default_provider;
use rustls::pki_types::ServerName;
use tokio::net::TcpStream;
use tokio_rustls::rustls::ClientConfig;
use tokio_rustls::TlsConnector;
use url::{Host, Url};

use crate::config::DEFAULT_TLS_PORT;
use crate::error_handling::TlsProbeError;

pub use verifier::AcceptAnyCertificate;

const SECONDS_PER_DAY: i64 = 86_400;

/// Result of a certificate probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CertProbeOutcome {
    /// The URL is not `https`.
    NotApplicable,
    /// The handshake completed but the server presented no certificate.
    NoCertificate,
    /// Whole days until `notAfter`, floored; negative once expired.
    DaysRemaining(i64),
}

/// `floor((not_after - now) / 1 day)`.
pub fn days_remaining(not_after_unix: i64, now_unix: i64) -> i64 {
    (not_after_unix - now_unix).div_euclid(SECONDS_PER_DAY)
}

fn client_config() -> Result<ClientConfig, TlsProbeError> {
    let config = ClientConfig::builder_with_provider(Arc::new(default_provider()))
        .with_safe_default_protocol_versions()?
        .dangerous()
        .with_custom_certificate_verifier(Arc::new(AcceptAnyCertificate::new()))
        .with_no_client_auth();
    Ok(config)
}

/// Host to dial and the TLS server name for it.
fn target_of(url: &Url) -> Result<(String, ServerName<'static>), TlsProbeError> {
    match url.host() {
        Some(Host::Domain(domain)) => {
            let name = ServerName::try_from(domain.to_string())
                .map_err(|_| TlsProbeError::InvalidHost(domain.to_string()))?;
            Ok((domain.to_string(), name))
        }
        Some(Host::Ipv4(ip)) => Ok((ip.to_string(), ServerName::from(std::net::IpAddr::V4(ip)))),
        Some(Host::Ipv6(ip)) => Ok((ip.to_string(), ServerName::from(std::net::IpAddr::V6(ip)))),
        None => Err(TlsProbeError::InvalidHost(url.to_string())),
    }
}

/// Probes the certificate served for `url`, bounded by `timeout`.
///
/// # Errors
///
/// Connection, handshake and parse failures are returned as
/// `TlsProbeError`. Callers treat them as a missing signal, never as a
/// failed check.
pub async fn probe_certificate(
    url: &Url,
    timeout: Duration,
) -> Result<CertProbeOutcome, TlsProbeError> {
    if !url.scheme().eq_ignore_ascii_case("https") {
        return Ok(CertProbeOutcome::NotApplicable);
    }

    let (host, server_name) = target_of(url)?;
    let port = url.port().unwrap_or(DEFAULT_TLS_PORT);
    let connector = TlsConnector::from(Arc::new(client_config()?));

    let handshake = async {
        let sock = TcpStream::connect((host.as_str(), port))
            .await
            .map_err(|source| TlsProbeError::Connect {
                host: host.clone(),
                port,
                source,
            })?;
        connector
            .connect(server_name, sock)
            .await
            .map_err(|source| TlsProbeError::Handshake {
                host: host.clone(),
                source,
            })
    };

    let tls_stream = tokio::time::timeout(timeout, handshake)
        .await
        .map_err(|_| TlsProbeError::Timeout {
            host: host.clone(),
            secs: timeout.as_secs(),
        })??;

    let Some(leaf) = tls_stream
        .get_ref()
        .1
        .peer_certificates()
        .and_then(|certs| certs.first())
    else {
        debug!("No certificate presented by {host}:{port}");
        return Ok(CertProbeOutcome::NoCertificate);
    };

    let (_, cert) = x509_parser::parse_x509_certificate(leaf.as_ref())
        .map_err(|e| TlsProbeError::Parse(e.to_string()))?;
    let not_after = cert.validity().not_after.timestamp();
    let days = days_remaining(not_after, chrono::Utc::now().timestamp());

    debug!("Certificate for {host}:{port} expires in {days} day(s)");
    Ok(CertProbeOutcome::DaysRemaining(days))
}

#[cfg(test)]
mod tests {
    use super::test_helpers::spawn_tls_server;
    use super::*;

    #[test]
    fn test_days_remaining_floors() {
        let now = 1_700_000_000;
        assert_eq!(days_remaining(now + 10 * SECONDS_PER_DAY, now), 10);
        assert_eq!(days_remaining(now + 10 * SECONDS_PER_DAY - 1, now), 9);
        assert_eq!(days_remaining(now + 1, now), 0);
        assert_eq!(days_remaining(now, now), 0);
    }

    #[test]
    fn test_days_remaining_negative_when_expired() {
        let now = 1_700_000_000;
        assert_eq!(days_remaining(now - 1, now), -1);
        assert_eq!(days_remaining(now - SECONDS_PER_DAY, now), -1);
        assert_eq!(days_remaining(now - SECONDS_PER_DAY - 1, now), -2);
    }

    #[test]
    fn test_days_remaining_probes_a_day_apart_differ_by_at_most_one() {
        let not_after = 1_700_000_000 + 30 * SECONDS_PER_DAY + 1234;
        let first = 1_700_000_000;
        for gap in [0, 1, 3600, SECONDS_PER_DAY - 1] {
            let a = days_remaining(not_after, first);
            let b = days_remaining(not_after, first + gap);
            assert!(a - b <= 1);
        }
    }

    #[tokio::test]
    async fn test_http_is_not_applicable() {
        let url = Url::parse("http://example.com/").unwrap();
        let outcome = probe_certificate(&url, Duration::from_secs(1)).await.unwrap();
        assert_eq!(outcome, CertProbeOutcome::NotApplicable);
    }

    #[tokio::test]
    async fn test_reads_days_from_self_signed_certificate() {
        let port = spawn_tls_server(10).await;
        let url = Url::parse(&format!("https://127.0.0.1:{port}/")).unwrap();
        let outcome = probe_certificate(&url, Duration::from_secs(5)).await.unwrap();
        let CertProbeOutcome::DaysRemaining(days) = outcome else {
            panic!("expected days remaining, got {outcome:?}");
        };
        assert!(days == 9 || days == 10, "unexpected days remaining {days}");
    }

    #[tokio::test]
    async fn test_expired_certificate_still_reports_days() {
        let port = spawn_tls_server(-3).await;
        let url = Url::parse(&format!("https://127.0.0.1:{port}/")).unwrap();
        let outcome = probe_certificate(&url, Duration::from_secs(5)).await.unwrap();
        let CertProbeOutcome::DaysRemaining(days) = outcome else {
            panic!("expected days remaining, got {outcome:?}");
        };
        assert!(days == -3 || days == -4, "unexpected days remaining {days}");
    }

    #[tokio::test]
    async fn test_connection_refused_is_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let url = Url::parse(&format!("https://127.0.0.1:{port}/")).unwrap();
        let err = probe_certificate(&url, Duration::from_secs(2))
            .await
            .unwrap_err();
        assert!(matches!(err, TlsProbeError::Connect { .. }));
    }

    #[tokio::test]
    async fn test_silent_server_times_out() {
        // Connections land in the backlog but no handshake ever happens
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        let url = Url::parse(&format!("https://127.0.0.1:{port}/")).unwrap();
        let err = probe_certificate(&url, Duration::from_millis(300))
            .await
            .unwrap_err();
        assert!(matches!(err, TlsProbeError::Timeout { .. }));
        drop(listener);
    }
}
