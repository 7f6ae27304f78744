use std::sync::Arc;

use anyhow::Context;
use bb8_postgres::tokio_postgres::config::SslMode;
use rustls::{
    client::danger::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier},
    crypto::{ring, CryptoProvider},
    pki_types::{CertificateDer, ServerName, UnixTime},
    ClientConfig, DigitallySignedStruct, RootCertStore, SignatureScheme,
};
use tokio_postgres_rustls::MakeRustlsConnect;

/// Whether connections to the database are encrypted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PostgresTlsMode {
    /// Plain tcp, the connector is never used.
    #[default]
    Disable,
    /// Try tls first and fall back to plain tcp if the server refuses it.
    Prefer,
    /// Fail to connect if the server does not support tls.
    Require,
}

impl From<PostgresTlsMode> for SslMode {
    fn from(mode: PostgresTlsMode) -> Self {
        match mode {
            PostgresTlsMode::Disable => Self::Disable,
            PostgresTlsMode::Prefer => Self::Prefer,
            PostgresTlsMode::Require => Self::Require,
        }
    }
}

/// Builds the rustls connector handed to the connection manager.
///
/// Server certificates are checked against the webpki root store unless
/// `accept_invalid_certs` is set, which is needed for managed databases
/// presenting self-signed certificates.
pub(crate) fn connector(accept_invalid_certs: bool) -> anyhow::Result<MakeRustlsConnect> {
    let provider = Arc::new(ring::default_provider());
    let builder = ClientConfig::builder_with_provider(provider.clone())
        .with_safe_default_protocol_versions()
        .context("Failed to select tls protocol versions")?;

    let config = if accept_invalid_certs {
        builder
            .dangerous()
            .with_custom_certificate_verifier(Arc::new(AcceptAnyServerCert(provider)))
            .with_no_client_auth()
    } else {
        let mut roots = RootCertStore::empty();
        roots.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
        builder.with_root_certificates(roots).with_no_client_auth()
    };

    Ok(MakeRustlsConnect::new(config))
}

/// Skips certificate validation but still checks handshake signatures.
#[derive(Debug)]
struct AcceptAnyServerCert(Arc<CryptoProvider>);

impl ServerCertVerifier for AcceptAnyServerCert {
    fn verify_server_cert(
        &self,
        _end_entity: &CertificateDer<'_>,
        _intermediates: &[CertificateDer<'_>],
        _server_name: &ServerName<'_>,
        _ocsp_response: &[u8],
        _now: UnixTime,
    ) -> Result<ServerCertVerified, rustls::Error> {
        Ok(ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        rustls::crypto::verify_tls12_signature(
            message,
            cert,
            dss,
            &self.0.signature_verification_algorithms,
        )
    }

    fn verify_tls13_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        rustls::crypto::verify_tls13_signature(
            message,
            cert,
            dss,
            &self.0.signature_verification_algorithms,
        )
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        self.0.signature_verification_algorithms.supported_schemes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ssl_mode() {
        assert_eq!(SslMode::from(PostgresTlsMode::Disable), SslMode::Disable);
        assert_eq!(SslMode::from(PostgresTlsMode::Prefer), SslMode::Prefer);
        assert_eq!(SslMode::from(PostgresTlsMode::Require), SslMode::Require);
        assert_eq!(PostgresTlsMode::default(), PostgresTlsMode::Disable);
    }

    #[test]
    fn connector_builds() {
        connector(false).unwrap();
        connector(true).unwrap();
    }

    #[test]
    fn any_cert_verifier_keeps_provider_schemes() {
        let provider = Arc::new(ring::default_provider());
        let verifier = AcceptAnyServerCert(provider.clone());
        assert_eq!(
            verifier.supported_verify_schemes(),
            provider.signature_verification_algorithms.supported_schemes()
        );
    }
}
