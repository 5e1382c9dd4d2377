//! Ordered hand-off of a deep link to the messaging app.
//!
//! Each strategy is tried in turn until one succeeds. A failing strategy is
//! logged and recorded; nothing escapes the chain as an error or panic.

use crate::checkout::DeepLink;
use thiserror::Error;
use tracing::{info, warn};

/// Why a single strategy could not deliver the link.
#[derive(Error, Debug)]
pub enum HandoffError {
    /// The strategy does not apply in this environment.
    #[error("Unavailable: {0}")]
    Unavailable(String),

    /// The strategy ran and failed.
    #[error("Failed: {0}")]
    Failed(String),

    /// I/O error while running the strategy.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// How a successful strategy delivered the link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandoffOutcome {
    /// The link was opened in a new browsing context.
    Opened,
    /// The link was shown in the current context for the user to follow.
    Navigated,
    /// The decoded message was copied somewhere for manual sending.
    Copied {
        /// Where the message went and what the user should do next.
        instructions: String,
    },
}

/// A way of delivering a deep link.
pub trait HandoffStrategy {
    /// Short name for logs and reports.
    fn name(&self) -> &str;

    /// Try to deliver `link`.
    fn attempt(&self, link: &DeepLink) -> Result<HandoffOutcome, HandoffError>;
}

/// A recorded strategy failure.
#[derive(Debug)]
pub struct HandoffFailure {
    pub strategy: String,
    pub error: HandoffError,
}

/// Result of running the chain.
#[derive(Debug)]
pub enum HandoffReport {
    /// A strategy succeeded, possibly after earlier ones failed.
    Delivered {
        strategy: String,
        outcome: HandoffOutcome,
        failures: Vec<HandoffFailure>,
    },
    /// Every strategy failed (or none was configured).
    Exhausted { failures: Vec<HandoffFailure> },
}

impl HandoffReport {
    pub fn is_delivered(&self) -> bool {
        matches!(self, HandoffReport::Delivered { .. })
    }

    pub fn failures(&self) -> &[HandoffFailure] {
        match self {
            HandoffReport::Delivered { failures, .. } => failures,
            HandoffReport::Exhausted { failures } => failures,
        }
    }
}

/// An ordered list of hand-off strategies.
#[derive(Default)]
pub struct Handoff {
    strategies: Vec<Box<dyn HandoffStrategy>>,
}

impl Handoff {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a strategy to the end of the chain.
    pub fn with(mut self, strategy: impl HandoffStrategy + 'static) -> Self {
        self.strategies.push(Box::new(strategy));
        self
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Try each strategy in order, stopping at the first success.
    pub fn run(&self, link: &DeepLink) -> HandoffReport {
        let mut failures = Vec::new();

        for strategy in &self.strategies {
            match strategy.attempt(link) {
                Ok(outcome) => {
                    info!(strategy = strategy.name(), ?outcome, "order handed off");
                    return HandoffReport::Delivered {
                        strategy: strategy.name().to_string(),
                        outcome,
                        failures,
                    };
                }
                Err(error) => {
                    warn!(strategy = strategy.name(), %error, "hand-off strategy failed");
                    failures.push(HandoffFailure {
                        strategy: strategy.name().to_string(),
                        error,
                    });
                }
            }
        }

        warn!(attempts = failures.len(), "every hand-off strategy failed");
        HandoffReport::Exhausted { failures }
    }
}
