//! HTTP client for the EBI search `identifiers_registry` domain.

use crate::model::{ClientError, NamespaceEntry, SearchError};
use crate::search::{preprocess_query_string, rescore, NamespaceSearch, SearchSettings};
use reqwest::blocking::Client;
use serde::{Deserialize, Deserializer};
use tracing::{debug, warn};
use url::Url;

/// Fields requested for every hit.
const REQUESTED_FIELDS: &str = "name,prefix,lui_pattern,sample_id";
/// Entry attributes requested for every hit.
const REQUESTED_ENTRY_ATTRS: &str = "score";

/// Raw search response.
#[derive(Debug, Deserialize)]
struct EbiSearchResponse {
    #[serde(default)]
    entries: Vec<EbiSearchEntry>,
}

/// One hit; every field arrives as an array of values.
#[derive(Debug, Deserialize)]
struct EbiSearchEntry {
    #[serde(default)]
    fields: EbiSearchFields,
    #[serde(default, deserialize_with = "deserialize_score")]
    score: f64,
}

#[derive(Debug, Default, Deserialize)]
struct EbiSearchFields {
    #[serde(default)]
    name: FieldValue,
    #[serde(default)]
    prefix: FieldValue,
    #[serde(default)]
    lui_pattern: FieldValue,
    #[serde(default)]
    sample_id: FieldValue,
}

/// Multi-valued field; only the first value is used.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FieldValue {
    Many(Vec<String>),
    One(String),
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Many(Vec::new())
    }
}

impl FieldValue {
    fn into_first(self) -> String {
        match self {
            FieldValue::Many(values) => values.into_iter().next().unwrap_or_default(),
            FieldValue::One(value) => value,
        }
    }
}

impl From<EbiSearchEntry> for NamespaceEntry {
    fn from(entry: EbiSearchEntry) -> Self {
        let fields = entry.fields;
        NamespaceEntry {
            prefix: fields.prefix.into_first(),
            name: fields.name.into_first(),
            lui_pattern: fields.lui_pattern.into_first(),
            sample_id: fields.sample_id.into_first(),
            score: entry.score,
        }
    }
}

/// Accept the score as a JSON number or a numeric string; anything else is 0.
fn deserialize_score<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(serde_json::Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    })
}

/// Namespace search backed by the EBI search REST API.
#[derive(Debug, Clone)]
pub struct EbiSearchClient {
    client: Client,
    settings: SearchSettings,
}

impl EbiSearchClient {
    /// Build a client with the configured request timeout.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Build` if the HTTP backend cannot be initialised.
    pub fn new(settings: SearchSettings) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(ClientError::Build)?;
        Ok(Self { client, settings })
    }

    /// Settings this client was built with.
    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    /// Full request URL for a raw query.
    pub fn request_url(&self, query: &str) -> Url {
        let mut url = self.settings.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("fields", REQUESTED_FIELDS)
            .append_pair("size", &self.settings.response_size.to_string())
            .append_pair("query", &preprocess_query_string(query))
            .append_pair("format", "JSON")
            .append_pair("entryattrs", REQUESTED_ENTRY_ATTRS);
        url
    }

    /// Fetch, flatten, optionally rescore and truncate candidates.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::Http` for transport or decoding failures and
    /// `SearchError::Status` for non-success responses.
    pub fn try_fetch(
        &self,
        query: &str,
        page_size: usize,
    ) -> Result<Vec<NamespaceEntry>, SearchError> {
        let url = self.request_url(query);
        debug!(%url, "Querying namespace search");

        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status(status.as_u16()));
        }

        let body: EbiSearchResponse = response.json()?;
        let namespaces: Vec<NamespaceEntry> =
            body.entries.into_iter().map(NamespaceEntry::from).collect();

        let mut namespaces = if self.settings.rescore_single_id {
            rescore(namespaces, query)
        } else {
            namespaces
        };
        namespaces.truncate(page_size);

        debug!(count = namespaces.len(), "Namespace search completed");
        Ok(namespaces)
    }
}

impl NamespaceSearch for EbiSearchClient {
    fn fetch(&self, query: &str, page_size: usize) -> Vec<NamespaceEntry> {
        match self.try_fetch(query, page_size) {
            Ok(namespaces) => namespaces,
            Err(err) => {
                warn!(query, error = %err, "Namespace search failed, showing no suggestions");
                Vec::new()
            }
        }
    }
}
