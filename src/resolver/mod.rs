//! Compact identifier resolution.
//!
//! Resolves a CURIE against the identifiers.org resolver API and turns the
//! outcome into the host events the embeddable widgets emit
//! (`idorgClickOnSuccessfullResolution` / `idorgClickOnFailedResolution`).

use crate::model::ClientError;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Event emitted after a successful resolution.
pub const SUCCESS_EVENT: &str = "idorgClickOnSuccessfullResolution";
/// Event emitted after a failed resolution.
pub const FAILURE_EVENT: &str = "idorgClickOnFailedResolution";

/// Fallback text when the resolver gives no usable message.
const GENERIC_FAILURE: &str = "Could not resolve compact identifier";

/// Something that can resolve a CURIE.
pub trait CurieResolver: Send + Sync {
    /// Resolve `curie`; failures are values, never panics or errors.
    fn resolve(&self, curie: &str) -> Resolution;
}

/// Settings for the resolver client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverSettings {
    /// Resolver API base, e.g. `https://resolver.api.identifiers.org`.
    pub api_url: Url,
    /// Base of resolvable URIs, e.g. `http://identifiers.org`.
    pub identifiers_url: Url,
    /// Per-request timeout.
    pub timeout: Duration,
}

/// The resolver's parsed view of a compact identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedCompactIdentifier {
    /// Namespace prefix the resolver settled on.
    #[serde(default)]
    pub namespace: String,
    /// The request as the resolver understood it.
    #[serde(default)]
    pub raw_request: String,
    /// Remaining fields, passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Outcome of a resolution request.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// The resolver recognised the identifier.
    Resolved(ParsedCompactIdentifier),
    /// The resolver rejected the identifier or could not be reached.
    Failed {
        /// User-facing reason.
        error_message: String,
    },
}

/// Host event describing a resolution outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolutionEvent {
    /// `idorgClickOnSuccessfullResolution`
    Succeeded {
        /// Resolvable URI for the identifier.
        suggested_url: String,
        /// Resolver payload.
        parsed_compact_identifier: ParsedCompactIdentifier,
    },
    /// `idorgClickOnFailedResolution`
    Failed {
        /// User-facing reason.
        error_message: String,
    },
}

impl Resolution {
    /// Project the outcome into the event a host would receive.
    pub fn into_event(self, identifiers_url: &Url) -> ResolutionEvent {
        match self {
            Resolution::Resolved(parsed) => ResolutionEvent::Succeeded {
                suggested_url: format!(
                    "{}/{}",
                    identifiers_url.as_str().trim_end_matches('/'),
                    parsed.raw_request
                ),
                parsed_compact_identifier: parsed,
            },
            Resolution::Failed { error_message } => ResolutionEvent::Failed { error_message },
        }
    }

    /// True for `Resolved`.
    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved(_))
    }
}

impl ResolutionEvent {
    /// Event name as dispatched by the widgets.
    pub fn name(&self) -> &'static str {
        match self {
            ResolutionEvent::Succeeded { .. } => SUCCESS_EVENT,
            ResolutionEvent::Failed { .. } => FAILURE_EVENT,
        }
    }

    /// Event detail payload.
    pub fn detail(&self) -> Value {
        match self {
            ResolutionEvent::Succeeded {
                suggested_url,
                parsed_compact_identifier,
            } => json!({
                "suggestedUrl": suggested_url,
                "parsedCompactIdentifier": parsed_compact_identifier,
            }),
            ResolutionEvent::Failed { error_message } => json!({
                "errorMessage": error_message,
                "parsedCompactIdentifier": Value::Null,
            }),
        }
    }

    /// One-line summary for the status bar.
    pub fn summary(&self) -> String {
        match self {
            ResolutionEvent::Succeeded { suggested_url, .. } => format!("Resolved: {suggested_url}"),
            ResolutionEvent::Failed { error_message } => format!("Not resolved: {error_message}"),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResolverResponse {
    #[serde(default)]
    payload: Option<ResolverPayload>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResolverPayload {
    #[serde(default)]
    parsed_compact_identifier: Option<ParsedCompactIdentifier>,
}

/// Last `;`-separated segment of a resolver error message, trimmed.
///
/// ```
/// use idorg_bar::resolver::surface_error_message;
///
/// assert_eq!(
///     surface_error_message("Resolution failed; prefix 'foo' not found"),
///     "prefix 'foo' not found"
/// );
/// ```
pub fn surface_error_message(message: &str) -> &str {
    message.rsplit(';').next().unwrap_or(message).trim()
}

/// Interpret a resolver response body.
fn interpret_response(success: bool, body: &str) -> Resolution {
    let parsed: ResolverResponse = serde_json::from_str(body).unwrap_or_default();

    if success {
        if let Some(identifier) = parsed.payload.and_then(|p| p.parsed_compact_identifier) {
            return Resolution::Resolved(identifier);
        }
    }

    let error_message = parsed
        .error_message
        .as_deref()
        .map(surface_error_message)
        .filter(|m| !m.is_empty())
        .unwrap_or(GENERIC_FAILURE)
        .to_string();
    Resolution::Failed { error_message }
}

/// Resolver backed by the identifiers.org resolver REST API.
#[derive(Debug, Clone)]
pub struct ResolverClient {
    client: Client,
    settings: ResolverSettings,
}

impl ResolverClient {
    /// Build a client with the configured request timeout.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Build` if the HTTP backend cannot be initialised.
    pub fn new(settings: ResolverSettings) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(ClientError::Build)?;
        Ok(Self { client, settings })
    }

    /// Settings this client was built with.
    pub fn settings(&self) -> &ResolverSettings {
        &self.settings
    }

    /// Request URL for a CURIE (the CURIE is appended verbatim).
    pub fn request_url(&self, curie: &str) -> String {
        format!(
            "{}/{}",
            self.settings.api_url.as_str().trim_end_matches('/'),
            curie
        )
    }
}

impl CurieResolver for ResolverClient {
    fn resolve(&self, curie: &str) -> Resolution {
        let url = self.request_url(curie);
        debug!(%url, "Resolving compact identifier");

        let resolution = match self.client.get(&url).send() {
            Ok(response) => {
                let success = response.status().is_success();
                match response.text() {
                    Ok(body) => interpret_response(success, &body),
                    Err(err) => Resolution::Failed {
                        error_message: err.to_string(),
                    },
                }
            }
            Err(err) => Resolution::Failed {
                error_message: err.to_string(),
            },
        };

        info!(curie, resolved = resolution.is_resolved(), "Resolution finished");
        resolution
    }
}
