//! Fallback chain: the families tried, in order, for a request

use std::fmt;

use tracing::{debug, warn};

use crate::error::{FontError, FontResult};
use crate::font::substitution::SubstitutionTable;
use crate::request::FontRequest;
use crate::traits::NativeFontSystem;

/// Where a family in the fallback chain came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FallbackStep {
    /// The family exactly as requested
    Requested,
    /// Default family of the request's style hint
    StyleDefault,
    /// The requested family after substitution
    Substituted,
    /// Style default tried again after substitution
    StyleDefaultRetry,
    LastResortFamily,
    /// Literal resource name probed from a fixed list
    LastResortResource,
}

impl FallbackStep {
    pub fn name(self) -> &'static str {
        match self {
            FallbackStep::Requested => "requested",
            FallbackStep::StyleDefault => "style default",
            FallbackStep::Substituted => "substituted",
            FallbackStep::StyleDefaultRetry => "style default retry",
            FallbackStep::LastResortFamily => "last resort family",
            FallbackStep::LastResortResource => "last resort resource",
        }
    }
}

impl fmt::Display for FallbackStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Families to scan for `request`, in order
///
/// The literal last-resort resource is not part of the chain; it is used
/// when every family here comes up empty.
pub fn build_fallback_chain(
    request: &FontRequest,
    substitutions: &SubstitutionTable,
    last_resort_family: &str,
) -> Vec<(FallbackStep, String)> {
    let mut chain = Vec::with_capacity(5);
    let requested = request.family();
    let style_default = request.style_hint().default_family();

    if !requested.is_empty() {
        chain.push((FallbackStep::Requested, requested.to_string()));
    }
    chain.push((FallbackStep::StyleDefault, style_default.to_string()));

    if !requested.is_empty() {
        let substituted = substitutions.substitute(requested);
        if !substituted.eq_ignore_ascii_case(requested) {
            chain.push((FallbackStep::Substituted, substituted));
        }
    }

    chain.push((FallbackStep::StyleDefaultRetry, style_default.to_string()));
    chain.push((FallbackStep::LastResortFamily, last_resort_family.to_string()));
    chain
}

/// The literal resource used when nothing else matches
///
/// Probed once; the first candidate the font system knows about is kept
/// for the lifetime of this value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastResortResource {
    candidates: Vec<String>,
    cached: Option<String>,
}

impl LastResortResource {
    pub fn new<I, N>(candidates: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        Self {
            candidates: candidates.into_iter().map(Into::into).collect(),
            cached: None,
        }
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// Memoized result, if a probe has succeeded
    pub fn cached(&self) -> Option<&str> {
        self.cached.as_deref()
    }

    pub fn resolve<S>(&mut self, system: &S) -> FontResult<&str>
    where
        S: NativeFontSystem + ?Sized,
    {
        if self.cached.is_none() {
            let found = self
                .candidates
                .iter()
                .find(|candidate| system.resource_exists(candidate));
            match found {
                Some(name) => {
                    debug!("Last resort font resource is {}", name);
                    self.cached = Some(name.clone());
                }
                None => {
                    warn!(
                        "None of {} last resort font resources exist",
                        self.candidates.len()
                    );
                    return Err(FontError::NoFontsAvailable);
                }
            }
        }
        self.cached.as_deref().ok_or(FontError::NoFontsAvailable)
    }
}
