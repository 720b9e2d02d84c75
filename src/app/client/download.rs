//! HTTP artifact downloads
//!
//! Concrete transport collaborator behind the cache's [`Downloader`] seam.
//! Resolves server API paths against their base URLs, applies the configured
//! authentication, and streams response bodies to disk. On any failure the
//! partially written destination file is removed before the error
//! propagates, so a failed fetch never leaves bytes claimed as complete.
//!
//! [`Downloader`]: crate::app::cache::Downloader

use std::fs::{self, File};
use std::path::Path;

use reqwest::blocking::RequestBuilder;
use tracing::debug;
use url::Url;

use crate::constants::http;
use crate::errors::{DownloadError, DownloadResult};

use super::config::ClientConfig;

/// Authenticated HTTP downloader for engine artifacts
#[derive(Debug)]
pub struct HttpDownloader {
    client: reqwest::blocking::Client,
    config: ClientConfig,
}

impl HttpDownloader {
    /// Create a downloader from a client configuration
    pub fn new(config: ClientConfig) -> DownloadResult<Self> {
        let client = config.build_http_client()?;
        Ok(Self { client, config })
    }

    /// Download `url_path` from the REST API, authenticated
    ///
    /// `url_path` must start with `/`.
    pub fn download_from_rest_api(&self, url_path: &str, to_file: &Path) -> DownloadResult<()> {
        require_leading_slash(url_path)?;
        let url = format!("{}{}", self.config.rest_api_base_url, url_path);
        self.download_file(&url, to_file, true)
    }

    /// Download `url_path` from the legacy web API, authenticated
    ///
    /// `url_path` must start with `/`.
    pub fn download_from_web_api(&self, url_path: &str, to_file: &Path) -> DownloadResult<()> {
        require_leading_slash(url_path)?;
        let url = format!("{}{}", self.config.web_api_base_url, url_path);
        self.download_file(&url, to_file, true)
    }

    /// Download from an arbitrary external URL, without authentication
    ///
    /// Credentials are never sent to hosts other than the configured server.
    pub fn download_from_external_url(&self, url: &str, to_file: &Path) -> DownloadResult<()> {
        self.download_file(url, to_file, false)
    }

    fn download_file(&self, url: &str, to_file: &Path, authenticated: bool) -> DownloadResult<()> {
        debug!("Download {} to {}", url, to_file.display());
        let result = self.try_download(url, to_file, authenticated);
        if result.is_err() {
            // Never leave a partial file behind as if it were complete
            let _ = fs::remove_file(to_file);
        }
        result
    }

    fn try_download(&self, url: &str, to_file: &Path, authenticated: bool) -> DownloadResult<()> {
        let url = Url::parse(url).map_err(|e| DownloadError::InvalidUrl {
            url: url.to_string(),
            error: e.to_string(),
        })?;

        let mut request = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, http::ACCEPT_OCTET_STREAM);
        if authenticated {
            request = self.apply_auth(request);
        }

        let mut response = request.send()?;
        if !response.status().is_success() {
            return Err(DownloadError::ServerError {
                status: response.status().as_u16(),
            });
        }

        let mut file = File::create(to_file)?;
        response.copy_to(&mut file).map_err(DownloadError::Http)?;
        Ok(())
    }

    fn apply_auth(&self, request: RequestBuilder) -> RequestBuilder {
        if let Some(token) = &self.config.token {
            request.bearer_auth(token)
        } else if let Some(login) = &self.config.login {
            request.basic_auth(login, self.config.password.as_deref().or(Some("")))
        } else {
            request
        }
    }
}

fn require_leading_slash(url_path: &str) -> DownloadResult<()> {
    if !url_path.starts_with('/') {
        return Err(DownloadError::MissingLeadingSlash {
            path: url_path.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn downloader() -> HttpDownloader {
        HttpDownloader::new(ClientConfig::new(
            "https://server.invalid/api/v2",
            "https://server.invalid/api",
        ))
        .unwrap()
    }

    #[test]
    fn test_api_paths_require_leading_slash() {
        let temp_dir = TempDir::new().unwrap();
        let dest = temp_dir.path().join("engine.jar");

        let err = downloader()
            .download_from_rest_api("analysis/engine", &dest)
            .unwrap_err();
        assert!(matches!(
            err,
            DownloadError::MissingLeadingSlash { ref path } if path == "analysis/engine"
        ));

        let err = downloader()
            .download_from_web_api("batch/file", &dest)
            .unwrap_err();
        assert!(matches!(err, DownloadError::MissingLeadingSlash { .. }));
    }

    #[test]
    fn test_invalid_external_url_is_rejected_before_any_write() {
        let temp_dir = TempDir::new().unwrap();
        let dest = temp_dir.path().join("engine.jar");

        let err = downloader()
            .download_from_external_url("not a url", &dest)
            .unwrap_err();
        assert!(matches!(err, DownloadError::InvalidUrl { .. }));
        assert!(!dest.exists());
    }
}
