//! Validity classification of a search query.

/// How a query relates to the namespace registry.
///
/// A pure function of (query text, candidate list); recomputed on every
/// render and never stored on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidityState {
    /// Query does not look like a compact identifier.
    NoCurie,
    /// A namespace lookup is in flight; owned by the caller, never produced
    /// by the evaluator.
    QueryingNamespaces,
    /// Only a known prefix is present.
    PrefixOnly,
    /// A known prefix followed by a colon, id still missing.
    PrefixWithColon,
    /// Prefix is known and the local id matches its pattern.
    ValidCurie,
    /// Prefix is known but the local id does not match its pattern.
    InvalidLocalId,
    /// Prefix is not among the candidates.
    InvalidPrefix,
}

/// Display severity of a validity state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Everything checks out.
    Success,
    /// Neutral guidance.
    Info,
    /// Incomplete but on track.
    Warning,
    /// Wrong as typed.
    Danger,
}

impl ValidityState {
    /// Whether the submit action should be enabled.
    pub fn is_submittable(self) -> bool {
        self == ValidityState::ValidCurie
    }

    /// Severity used to pick the icon and colour.
    pub fn severity(self) -> Severity {
        match self {
            ValidityState::ValidCurie => Severity::Success,
            ValidityState::NoCurie | ValidityState::QueryingNamespaces => Severity::Info,
            ValidityState::PrefixOnly | ValidityState::PrefixWithColon => Severity::Warning,
            ValidityState::InvalidPrefix | ValidityState::InvalidLocalId => Severity::Danger,
        }
    }

    /// Stable upper-case name, as printed by `--check`.
    pub fn as_str(self) -> &'static str {
        match self {
            ValidityState::NoCurie => "NO_CURIE",
            ValidityState::QueryingNamespaces => "QUERYING_NAMESPACES",
            ValidityState::PrefixOnly => "PREFIX_ONLY",
            ValidityState::PrefixWithColon => "PREFIX_WITH_COLON",
            ValidityState::ValidCurie => "VALID_CURIE",
            ValidityState::InvalidLocalId => "INVALID_LOCAL_ID",
            ValidityState::InvalidPrefix => "INVALID_PREFIX",
        }
    }
}

impl std::fmt::Display for ValidityState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
