use thiserror::Error;

/// Errors raised while building or stepping a simulation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// Two bodies of a stepped collection occupy exactly the same position
    #[error("bodies {body} and {other} occupy the same position")]
    DegenerateSeparation { body: usize, other: usize },

    /// Body-level form of `DegenerateSeparation`: `other` indexes the set of
    /// bodies passed to `Body::compute_force`
    #[error("zero separation from body {other} of the attracting set")]
    Coincident { other: usize },

    #[error("mass must be positive and finite, got {mass}")]
    InvalidMass { mass: f64 },

    #[error("timestep must be positive and finite, got {dt}")]
    InvalidTimestep { dt: f64 },

    #[error("non-finite {what}")]
    NonFiniteState { what: &'static str },

    /// `update_position` was called without a matching `compute_force` in the same step
    #[error("force has not been computed for this step")]
    ForceNotComputed,

    #[error("scenario has {bodies} bodies but {labels} labels")]
    LabelMismatch { bodies: usize, labels: usize },

    #[error("body '{0}' not found")]
    UnknownBody(String),
}

impl SimError {
    /// Attach the stepped body's index to a `Coincident` error raised while it
    /// computed its force against "every body but itself".
    pub(crate) fn for_body(self, body: usize) -> Self {
        match self {
            Self::Coincident { other } => Self::DegenerateSeparation {
                body,
                other: if other < body { other } else { other + 1 },
            },
            other => other,
        }
    }
}
