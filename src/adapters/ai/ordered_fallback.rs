//! Ordered fallback across candidates.
//!
//! Tries each candidate in turn until one succeeds. A failure the caller
//! classifies as terminal stops the walk immediately; any other failure is
//! recorded and the next candidate is tried.

use std::fmt::Display;
use std::future::Future;

/// Why no candidate produced a result.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FallbackError<E> {
    /// The candidate list was empty.
    #[error("no candidates to try")]
    NoCandidates,

    /// A terminal failure stopped the walk early.
    #[error("aborted: {0}")]
    Aborted(E),

    /// Every candidate failed; carries the last failure.
    #[error("all candidates failed, last error: {0}")]
    Exhausted(E),
}

impl<E> FallbackError<E> {
    /// Returns the underlying failure, if any candidate was attempted.
    pub fn into_inner(self) -> Option<E> {
        match self {
            FallbackError::NoCandidates => None,
            FallbackError::Aborted(e) | FallbackError::Exhausted(e) => Some(e),
        }
    }
}

/// Runs `attempt` for each candidate in order and returns the first success.
pub async fn first_success<'a, C, T, E, F, Fut, P>(
    candidates: &'a [C],
    mut attempt: F,
    is_terminal: P,
) -> Result<T, FallbackError<E>>
where
    C: Display,
    E: Display,
    F: FnMut(&'a C) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    P: Fn(&E) -> bool,
{
    let mut last_error = None;

    for (index, candidate) in candidates.iter().enumerate() {
        match attempt(candidate).await {
            Ok(value) => {
                if index > 0 {
                    tracing::info!(candidate = %candidate, attempt = index + 1, "Fallback candidate succeeded");
                }
                return Ok(value);
            }
            Err(err) if is_terminal(&err) => {
                tracing::warn!(candidate = %candidate, error = %err, "Terminal failure, aborting fallback");
                return Err(FallbackError::Aborted(err));
            }
            Err(err) => {
                tracing::warn!(candidate = %candidate, error = %err, "Candidate failed, trying next");
                last_error = Some(err);
            }
        }
    }

    match last_error {
        Some(err) => Err(FallbackError::Exhausted(err)),
        None => Err(FallbackError::NoCandidates),
    }
}
