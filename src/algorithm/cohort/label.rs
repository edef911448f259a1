//! Neuropathy label derivation

use crate::models::TriState;

/// Derive the neuropathy label from a subject's symptom indicators
///
/// OR across the indicators that are present; `Unknown` only when none is.
/// An empty slice has no present indicator and is therefore `Unknown`.
#[must_use]
pub fn derive_label(indicators: &[TriState]) -> TriState {
    if indicators.iter().all(|i| !i.is_known()) {
        TriState::Unknown
    } else {
        TriState::from(indicators.iter().any(|i| i.is_true()))
    }
}
