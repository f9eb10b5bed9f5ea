use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

use autoscan_core::prelude::*;

/// HTTP client for the Plex Media Server API.
pub struct PlexClient {
    http: reqwest::Client,
    base: Url,
    token: String,
    product: String,
    client_identifier: String,
}

impl fmt::Debug for PlexClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlexClient")
            .field("base", &self.base.as_str())
            .field("token", &"<redacted>")
            .field("product", &self.product)
            .field("client_identifier", &self.client_identifier)
            .finish()
    }
}

impl PlexClient {
    pub fn new(
        url: &str,
        token: impl Into<String>,
        timeout: Option<Duration>,
        product: impl Into<String>,
        client_identifier: impl Into<String>,
    ) -> Result<Self> {
        let base = Url::parse(url).map_err(|err| ConfigValidationError::InvalidUrl {
            url: url.to_owned(),
            reason: err.to_string(),
        })?;
        if base.cannot_be_a_base() {
            return Err(ConfigValidationError::InvalidUrl {
                url: url.to_owned(),
                reason: "not a base url".into(),
            }
            .into());
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|err| AutoscanError::Unavailable(format!("unable to build http client: {err}")))?;

        Ok(Self {
            http,
            base,
            token: token.into(),
            product: product.into(),
            client_identifier: client_identifier.into(),
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get(
        &self,
        context: &str,
        segments: &[&str],
        query: &[(&str, &str)],
    ) -> Result<reqwest::Response> {
        let url = self.endpoint(segments);
        tracing::trace!(url = %url, "Sending plex request");

        let response = self
            .http
            .get(url)
            .query(query)
            .header("Accept", "application/json")
            .header("X-Plex-Token", &self.token)
            .header("X-Plex-Product", &self.product)
            .header("X-Plex-Client-Identifier", &self.client_identifier)
            .send()
            .await
            .map_err(|err| AutoscanError::Unavailable(format!("{context}: {err}")))?;

        match response.status() {
            status if status.is_success() => Ok(response),
            StatusCode::UNAUTHORIZED => Err(AutoscanError::Fatal(format!(
                "{context}: invalid plex token"
            ))),
            status => Err(AutoscanError::Remote(format!("{context}: {status}"))),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, context: &str, segments: &[&str]) -> Result<T> {
        let response = self.get(context, segments, &[]).await?;
        let envelope: Envelope<T> = response
            .json()
            .await
            .map_err(|err| AutoscanError::Remote(format!("{context}: {err}")))?;
        Ok(envelope.media_container)
    }
}

#[async_trait]
impl LibraryClient for PlexClient {
    async fn version(&self) -> Result<String> {
        let container: VersionContainer = self.get_json("failed requesting plex version", &[]).await?;
        Ok(container.version)
    }

    async fn libraries(&self) -> Result<Vec<Library>> {
        let container: SectionsContainer = self
            .get_json("failed requesting plex libraries", &["library", "sections"])
            .await?;
        Ok(container.into_libraries())
    }

    async fn scan(&self, path: &str, library: &LibraryId) -> Result<()> {
        self.get(
            "failed sending plex scan request",
            &["library", "sections", library.as_str(), "refresh"],
            &[("path", path)],
        )
        .await?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(rename = "MediaContainer")]
    media_container: T,
}

#[derive(Debug, Deserialize)]
struct VersionContainer {
    version: String,
}

#[derive(Debug, Deserialize)]
struct SectionsContainer {
    #[serde(rename = "Directory", default)]
    directories: Vec<Directory>,
}

#[derive(Debug, Deserialize)]
struct Directory {
    key: String,
    title: String,
    #[serde(rename = "Location", default)]
    locations: Vec<Location>,
}

#[derive(Debug, Deserialize)]
struct Location {
    path: String,
}

impl SectionsContainer {
    /// One library entry per section location; sections spanning several
    /// folders share their id.
    fn into_libraries(self) -> Vec<Library> {
        self.directories
            .into_iter()
            .flat_map(|directory| {
                let Directory {
                    key,
                    title,
                    locations,
                } = directory;
                locations.into_iter().map(move |location| Library {
                    id: LibraryId(key.clone()),
                    name: title.clone(),
                    path: location.path,
                })
            })
            .collect()
    }
}
