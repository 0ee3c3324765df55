//! Generation State Machine
//!
//! Tracks where a single generation run is and makes it impossible to prune
//! before validating or to render after a rejection.
//!
//! # Stage Flow
//!
//! ```text
//! NotStarted
//!     ↓
//! Validating
//!     ↓
//! Rendering      (external templating engine)
//!     ↓
//! Pruning
//!     ↓
//! Completed
//!
//! (Any non-terminal stage can transition to Failed)
//! ```

use std::fmt;
use thiserror::Error;

/// Generation stages in sequential order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum GenerationStage {
    NotStarted = 0,
    /// Checking raw inputs; no files exist yet
    Validating = 1,
    /// Templating engine materializes the maximal tree
    Rendering = 2,
    /// Variant Resolver deletes disabled assets
    Pruning = 3,
    /// Terminal success state
    Completed = 4,
    /// Terminal failure state
    Failed = 255,
}

impl GenerationStage {
    #[inline]
    pub const fn order(self) -> u8 {
        self as u8
    }

    /// Returns true if this is a terminal state (Completed or Failed)
    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    /// Returns the next stage in the sequence, or None if at a terminal state
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::NotStarted => Some(Self::Validating),
            Self::Validating => Some(Self::Rendering),
            Self::Rendering => Some(Self::Pruning),
            Self::Pruning => Some(Self::Completed),
            Self::Completed | Self::Failed => None,
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::NotStarted => "Not started",
            Self::Validating => "Validating configuration",
            Self::Rendering => "Rendering template",
            Self::Pruning => "Pruning disabled variants",
            Self::Completed => "Generation complete",
            Self::Failed => "Generation failed",
        }
    }
}

impl fmt::Display for GenerationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Errors that can occur during stage transitions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationTransitionError {
    #[error("Cannot skip from {from} to {to} (must transition through intermediate stages)")]
    SkippedStage {
        from: GenerationStage,
        to: GenerationStage,
    },

    #[error("Cannot go backwards from {from} to {to} (generation is forward-only)")]
    BackwardTransition {
        from: GenerationStage,
        to: GenerationStage,
    },

    #[error("Cannot transition from terminal state {from}")]
    FromTerminalState { from: GenerationStage },

    #[error("Already at stage {stage}")]
    AlreadyAtStage { stage: GenerationStage },
}

/// Owns the current stage of one generation run.
///
/// # Example
///
/// ```
/// use scaffold_variants::generation_state::{GenerationContext, GenerationStage};
///
/// let mut ctx = GenerationContext::new();
/// ctx.transition_to(GenerationStage::Validating).unwrap();
/// assert_eq!(ctx.current_stage(), GenerationStage::Validating);
///
/// // Cannot prune before rendering
/// assert!(ctx.transition_to(GenerationStage::Pruning).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct GenerationContext {
    current: GenerationStage,
    history: Vec<GenerationStage>,
}

impl Default for GenerationContext {
    fn default() -> Self {
        Self::new()
    }
}

impl GenerationContext {
    pub fn new() -> Self {
        Self {
            current: GenerationStage::NotStarted,
            history: Vec::new(),
        }
    }

    #[inline]
    pub fn current_stage(&self) -> GenerationStage {
        self.current
    }

    /// Stages entered so far, in order
    pub fn history(&self) -> &[GenerationStage] {
        &self.history
    }

    /// Transition to a specific stage, which must be the immediate next one.
    ///
    /// # Errors
    ///
    /// - `FromTerminalState` if current is a terminal state
    /// - `AlreadyAtStage` if target is the current stage
    /// - `BackwardTransition` if target is before current
    /// - `SkippedStage` if target is not the immediate next stage (or is Failed)
    pub fn transition_to(
        &mut self,
        target: GenerationStage,
    ) -> Result<GenerationStage, GenerationTransitionError> {
        if self.current.is_terminal() {
            return Err(GenerationTransitionError::FromTerminalState { from: self.current });
        }

        if target == self.current {
            return Err(GenerationTransitionError::AlreadyAtStage { stage: target });
        }

        // Failed is only reachable through fail()
        if target == GenerationStage::Failed {
            return Err(GenerationTransitionError::SkippedStage {
                from: self.current,
                to: target,
            });
        }

        if target.order() < self.current.order() {
            return Err(GenerationTransitionError::BackwardTransition {
                from: self.current,
                to: target,
            });
        }

        if self.current.next() != Some(target) {
            return Err(GenerationTransitionError::SkippedStage {
                from: self.current,
                to: target,
            });
        }

        self.enter(target);
        Ok(target)
    }

    /// Mark the run as failed at the current stage.
    ///
    /// # Errors
    ///
    /// - `FromTerminalState` if already at Completed or Failed
    pub fn fail(&mut self) -> Result<(), GenerationTransitionError> {
        if self.current.is_terminal() {
            return Err(GenerationTransitionError::FromTerminalState { from: self.current });
        }

        self.enter(GenerationStage::Failed);
        Ok(())
    }

    fn enter(&mut self, stage: GenerationStage) {
        tracing::debug!(from = %self.current, to = %stage, "Stage transition");
        self.history.push(stage);
        self.current = stage;
    }
}
