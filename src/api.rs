use crate::config::Config;
use crate::episode::{Episode, RawEpisode};

use displaydoc::Display;
use thiserror::Error;
use url::Url;

#[derive(Debug, Display, Error)]
pub enum Error {
    /// Request failed: {0}
    Request(#[from] reqwest::Error),
    /// Server returned status {0}
    HttpCode(u16),
    /// Episode `{0}` not found
    NotFound(String),
    /// Invalid episode duration `{0}`
    InvalidDuration(String),
    /// Invalid publication date `{0}`
    InvalidDate(String),
    /// Invalid url: {0}
    Url(#[from] url::ParseError),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Paging and ordering applied to the episode collection.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EpisodeFilter {
    limit: Option<usize>,
    sort: Option<(String, SortOrder)>,
}

impl EpisodeFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recently published first, at most `limit` records.
    pub fn latest(limit: usize) -> Self {
        Self::new()
            .with_limit(limit)
            .sorted_by("published_at", SortOrder::Desc)
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn sorted_by(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort = Some((field.into(), order));
        self
    }

    fn apply(&self, url: &mut Url) {
        // `query_pairs_mut` leaves a dangling `?` behind when nothing is appended.
        if self.limit.is_none() && self.sort.is_none() {
            return;
        }

        let mut query = url.query_pairs_mut();

        if let Some(limit) = self.limit {
            query.append_pair("_limit", &limit.to_string());
        }

        if let Some((field, order)) = &self.sort {
            query.append_pair("_sort", field);
            query.append_pair("_order", order.as_str());
        }
    }
}

/// Client for the episodes REST API.
#[derive(Clone, Debug)]
pub struct ApiClient {
    base_url: Url,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(config: &Config) -> Self {
        Self {
            base_url: config.api_url.clone(),
            http: reqwest::Client::new(),
        }
    }

    pub async fn fetch_episode_list(&self, filter: &EpisodeFilter) -> Result<Vec<Episode>, Error> {
        let url = self.list_url(filter)?;

        tracing::info!(%url, "Fetching episodes...");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpCode(status.as_u16()));
        }

        let records: Vec<RawEpisode> = response.json().await?;

        tracing::info!(count = records.len(), "Episodes fetched.");

        records.into_iter().map(Episode::try_from).collect()
    }

    pub async fn fetch_episode_detail(&self, id: &str) -> Result<Episode, Error> {
        let url = self.detail_url(id)?;

        tracing::info!(%url, "Fetching episode...");

        let response = self.http.get(url).send().await?;
        match response.status() {
            reqwest::StatusCode::NOT_FOUND => return Err(Error::NotFound(id.to_string())),
            status if !status.is_success() => return Err(Error::HttpCode(status.as_u16())),
            _ => {}
        }

        let record: RawEpisode = response.json().await?;

        Episode::try_from(record)
    }

    fn list_url(&self, filter: &EpisodeFilter) -> Result<Url, Error> {
        let mut url = self.base_url.join("episodes")?;
        filter.apply(&mut url);

        Ok(url)
    }

    fn detail_url(&self, id: &str) -> Result<Url, Error> {
        let mut url = self.base_url.join("episodes/")?;

        // Push as a segment so ids are percent-encoded rather than interpreted as paths.
        url.path_segments_mut()
            .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .push(id);

        Ok(url)
    }
}
