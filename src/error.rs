//! Error types for the simulation core
//!
//! Configuration and pattern files use `anyhow`; everything a caller may need
//! to branch on is a [`ConwayError`].

use crate::controller::ControllerState;
use crate::game_of_life::UniverseId;

/// Errors raised by the universe, the controller and the persistence stores
#[derive(Debug, thiserror::Error)]
pub enum ConwayError {
    /// No persisted universe exists under this id.
    #[error("no universe stored under id {0}")]
    InvalidIdentifier(UniverseId),

    /// A transition would exceed the configured live-cell ceiling.
    #[error("biomass overflow computing generation {generation}: {observed} cells exceeds limit of {limit}")]
    BiomassOverflow {
        /// Generation the universe was at when the transition was attempted.
        generation: u64,
        /// Configured ceiling.
        limit: usize,
        /// Size reached when the ceiling was crossed.
        observed: usize,
    },

    /// The generation counter cannot be advanced any further.
    #[error("generation counter overflow: universe is already at generation {generation}")]
    GenerationOverflow {
        /// Generation the universe was at when the transition was attempted.
        generation: u64,
    },

    /// A persisted record could not be decoded.
    #[error("malformed persisted state for universe {id}: {source}")]
    MalformedPersistedState {
        /// The universe being loaded.
        id: UniverseId,
        /// The decoding failure.
        #[source]
        source: serde_json::Error,
    },

    /// The controller was asked to do something its current state forbids.
    #[error("cannot {operation} while controller is {state}")]
    InvalidState {
        /// State at the time of the call.
        state: ControllerState,
        /// Name of the rejected operation.
        operation: &'static str,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ConwayError::BiomassOverflow {
            generation: 4,
            limit: 10,
            observed: 11,
        };
        assert_eq!(
            err.to_string(),
            "biomass overflow computing generation 4: 11 cells exceeds limit of 10"
        );

        let err = ConwayError::InvalidState {
            state: ControllerState::Stopped,
            operation: "advance",
        };
        assert_eq!(err.to_string(), "cannot advance while controller is stopped");

        let err = ConwayError::GenerationOverflow { generation: u64::MAX };
        assert_eq!(
            err.to_string(),
            format!("generation counter overflow: universe is already at generation {}", u64::MAX)
        );
    }
}
