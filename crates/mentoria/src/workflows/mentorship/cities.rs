use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

/// Inputs shorter than this (after trimming) never reach the directory.
pub const MIN_QUERY_CHARS: usize = 2;
/// Upper bound on suggestions shown under the city field.
pub const MAX_SUGGESTIONS: usize = 8;

/// Single entry of the municipality directory. Extra attributes are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Municipality {
    #[serde(rename = "nome")]
    pub name: String,
}

impl Municipality {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Read-only source of municipality names.
#[async_trait]
pub trait MunicipalityDirectory: Send + Sync {
    async fn municipalities(&self) -> Result<Vec<Municipality>, DirectoryError>;
}

/// Directory lookup failure. Never surfaced to the applicant.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("directory unreachable: {0}")]
    Transport(String),
    #[error("directory answered with status {0}")]
    Status(u16),
    #[error("directory payload unreadable: {0}")]
    Decode(String),
}

/// HTTP adapter for the IBGE municipality listing.
#[derive(Debug, Clone)]
pub struct IbgeDirectory {
    http: reqwest::Client,
    url: Url,
}

impl IbgeDirectory {
    pub fn new(http: reqwest::Client, url: Url) -> Self {
        Self { http, url }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl MunicipalityDirectory for IbgeDirectory {
    async fn municipalities(&self) -> Result<Vec<Municipality>, DirectoryError> {
        let response = self
            .http
            .get(self.url.clone())
            .send()
            .await
            .map_err(|err| DirectoryError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DirectoryError::Status(status.as_u16()));
        }

        response
            .json::<Vec<Municipality>>()
            .await
            .map_err(|err| DirectoryError::Decode(err.to_string()))
    }
}

/// Keep the names whose lowercase form starts with the lowercase input, in
/// directory order, capped at [`MAX_SUGGESTIONS`].
pub fn filter_suggestions(municipalities: &[Municipality], input: &str) -> Vec<String> {
    let needle = input.to_lowercase();
    municipalities
        .iter()
        .filter(|municipality| municipality.name.to_lowercase().starts_with(&needle))
        .take(MAX_SUGGESTIONS)
        .map(|municipality| municipality.name.clone())
        .collect()
}

/// Whether the city input is long enough to query the directory.
pub fn qualifies_for_lookup(input: &str) -> bool {
    input.trim().chars().count() >= MIN_QUERY_CHARS
}

/// A lookup the session asked for, tagged so late answers can be told apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityQuery {
    pub ticket: u64,
    pub input: String,
}

/// Directory answer for one [`CityQuery`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityLookup {
    pub ticket: u64,
    pub input: String,
    pub suggestions: Vec<String>,
}

/// Suggestion list state owned by the form session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CitySuggestions {
    items: Vec<String>,
    visible: bool,
    latest_ticket: u64,
}

impl CitySuggestions {
    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Suggestions the dropdown should currently render.
    pub fn shown(&self) -> &[String] {
        if self.visible {
            &self.items
        } else {
            &[]
        }
    }

    pub fn latest_ticket(&self) -> u64 {
        self.latest_ticket
    }

    pub(crate) fn show(&mut self) {
        self.visible = true;
    }

    pub(crate) fn hide(&mut self) {
        self.visible = false;
    }

    pub(crate) fn issue(&mut self, input: &str) -> CityQuery {
        self.latest_ticket += 1;
        CityQuery {
            ticket: self.latest_ticket,
            input: input.to_string(),
        }
    }

    /// Drop the current list and invalidate every lookup still in flight.
    pub(crate) fn clear(&mut self) {
        self.latest_ticket += 1;
        self.items.clear();
    }

    /// Store a lookup result unless a newer query has been issued since.
    pub(crate) fn apply(&mut self, lookup: CityLookup) -> bool {
        if lookup.ticket != self.latest_ticket {
            return false;
        }
        self.items = lookup.suggestions;
        true
    }

    pub(crate) fn reset(&mut self) {
        self.clear();
        self.visible = false;
    }
}

/// Resolves [`CityQuery`] values against a directory.
pub struct CitySuggestionFetcher<D> {
    directory: Arc<D>,
}

impl<D> Clone for CitySuggestionFetcher<D> {
    fn clone(&self) -> Self {
        Self {
            directory: Arc::clone(&self.directory),
        }
    }
}

impl<D> CitySuggestionFetcher<D>
where
    D: MunicipalityDirectory + 'static,
{
    pub fn new(directory: Arc<D>) -> Self {
        Self { directory }
    }

    /// Fetch and filter suggestions. Any directory failure yields an empty list.
    pub async fn lookup(&self, query: CityQuery) -> CityLookup {
        let suggestions = if qualifies_for_lookup(&query.input) {
            match self.directory.municipalities().await {
                Ok(municipalities) => filter_suggestions(&municipalities, &query.input),
                Err(err) => {
                    debug!(error = %err, input = %query.input, "city lookup failed");
                    Vec::new()
                }
            }
        } else {
            Vec::new()
        };

        CityLookup {
            ticket: query.ticket,
            input: query.input,
            suggestions,
        }
    }

    /// Suggestions for a free-standing input, bypassing any session.
    pub async fn suggest(&self, input: &str) -> Vec<String> {
        let query = CityQuery {
            ticket: 0,
            input: input.to_string(),
        };
        self.lookup(query).await.suggestions
    }
}
