//! moresleep API client implementation.
//!
//! This module provides the concrete implementation of `TalkSource` on top of
//! the moresleep REST API, using `reqwest`.

use async_trait::async_trait;
use reqwest::{header::ACCEPT, Client, StatusCode};
use tracing::{debug, error, info, instrument, warn};
use url::Url;

use crate::config::MoresleepConfig;
use crate::errors::SourceError;
use crate::interfaces::TalkSource;
use crate::moresleep::responses::{parse_conferences, parse_session, parse_sessions};
use talks_indexer_shared::{Conference, Talk};

/// HTTP client for the moresleep talk-submission API.
///
/// If credentials are configured, basic auth is sent with every request.
///
/// # Example
///
/// ```ignore
/// use talks_indexer_source::{MoresleepClient, MoresleepConfig, TalkSource};
///
/// let client = MoresleepClient::new(&MoresleepConfig::new("http://localhost:8082"))?;
/// let conferences = client.get_conferences().await?;
/// ```
#[derive(Clone)]
pub struct MoresleepClient {
    client: Client,
    base_url: String,
    credentials: Option<(String, String)>,
}

impl MoresleepClient {
    /// Create a new moresleep client.
    ///
    /// # Returns
    ///
    /// * `Ok(MoresleepClient)` - A new client instance
    /// * `Err(SourceError)` - If the URL is invalid or the HTTP client
    ///   cannot be built
    pub fn new(config: &MoresleepConfig) -> Result<Self, SourceError> {
        Url::parse(&config.url)
            .map_err(|e| SourceError::InvalidUrl(format!("{}: {}", config.url, e)))?;

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SourceError::request(format!("failed to build HTTP client: {}", e)))?;

        let credentials = match (&config.username, &config.password) {
            (Some(user), Some(password)) => Some((user.clone(), password.clone())),
            _ => None,
        };

        info!(
            url = %config.url,
            authenticated = credentials.is_some(),
            "Created moresleep client"
        );

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    /// Perform a GET request and return the body of a 200 response.
    async fn get(&self, path: &str) -> Result<String, SourceError> {
        let url = format!("{}{}", self.base_url, path);

        let mut request = self.client.get(&url).header(ACCEPT, "application/json");
        if let Some((user, password)) = &self.credentials {
            request = request.basic_auth(user, Some(password));
        }

        debug!(url = %url, "Making HTTP request");

        let response = request
            .send()
            .await
            .map_err(|e| SourceError::request(format!("failed to execute request: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SourceError::request(format!("failed to read response body: {}", e)))?;

        if status != StatusCode::OK {
            error!(status = %status, url = %url, body = %body, "HTTP request failed");
            return Err(SourceError::status(status.as_u16(), body));
        }

        debug!(status = %status, url = %url, "HTTP request successful");
        Ok(body)
    }

    fn find_conference<'a>(conferences: &'a [Conference], conference_id: &str) -> Option<&'a Conference> {
        let conference = conferences.iter().find(|c| c.id == conference_id);
        if conference.is_none() {
            warn!(conference_id = %conference_id, "Conference not found, using empty slug and name");
        }
        conference
    }
}

#[async_trait]
impl TalkSource for MoresleepClient {
    #[instrument(skip(self))]
    async fn get_conferences(&self) -> Result<Vec<Conference>, SourceError> {
        let body = self.get("/data/conference").await?;
        let conferences = parse_conferences(&body)?;

        info!(count = conferences.len(), "Fetched conferences");
        Ok(conferences)
    }

    /// The conference list is fetched as well, to stamp the conference slug
    /// and name onto every talk.
    #[instrument(skip(self))]
    async fn get_talks(&self, conference_id: &str) -> Result<Vec<Talk>, SourceError> {
        let path = format!("/data/conference/{}/session", conference_id);
        let body = self.get(&path).await?;
        let sessions = parse_sessions(&body)?;

        let conferences = self.get_conferences().await?;
        let conference = Self::find_conference(&conferences, conference_id);

        let talks: Vec<Talk> = sessions
            .into_iter()
            .map(|session| session.into_talk(conference))
            .collect();

        info!(conference_id = %conference_id, count = talks.len(), "Fetched talks");
        Ok(talks)
    }

    #[instrument(skip(self))]
    async fn get_talk(&self, talk_id: &str) -> Result<Talk, SourceError> {
        let path = format!("/data/session/{}", talk_id);
        let body = match self.get(&path).await {
            Ok(body) => body,
            Err(SourceError::StatusError { status: 404, .. }) => {
                return Err(SourceError::not_found(format!("talk {}", talk_id)));
            }
            Err(e) => return Err(e),
        };
        let session = parse_session(&body)?;

        let conferences = self.get_conferences().await?;
        let conference = Self::find_conference(&conferences, session.conference_id());
        let talk = session.into_talk(conference);

        info!(talk_id = %talk_id, conference_slug = %talk.conference_slug, "Fetched talk");
        Ok(talk)
    }
}
