//! Recording session state machine

use std::fmt;
use thiserror::Error;

/// Session states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Acquiring,
    Recording,
    Paused,
    Finalizing,
    Ready,
    Failed,
}

impl SessionState {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Acquiring => "acquiring",
            Self::Recording => "recording",
            Self::Paused => "paused",
            Self::Finalizing => "finalizing",
            Self::Ready => "ready",
            Self::Failed => "failed",
        }
    }

    /// Whether a recording is currently live (capturing or paused)
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Recording | Self::Paused)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when an invalid state transition is attempted
#[derive(Debug, Clone, Error)]
#[error("Invalid state transition: cannot {action} while in {current_state} state")]
pub struct InvalidTransition {
    pub current_state: SessionState,
    pub action: &'static str,
}

/// Session lifecycle entity.
/// Owns the transition rules; resource handling lives in the orchestrator.
///
/// State machine:
///   IDLE -> ACQUIRING (begin_acquire)
///   ACQUIRING -> RECORDING (begin_recording)
///   RECORDING -> PAUSED (pause)
///   PAUSED -> RECORDING (resume)
///   RECORDING | PAUSED -> FINALIZING (begin_finalize)
///   FINALIZING -> READY (complete)
///   ACQUIRING | RECORDING | FINALIZING -> FAILED (fail)
///   READY | FAILED -> IDLE (reset)
#[derive(Debug, Default)]
pub struct SessionLifecycle {
    state: SessionState,
}

impl SessionLifecycle {
    /// Create a new lifecycle in idle state
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
        }
    }

    /// Get the current state
    pub fn state(&self) -> SessionState {
        self.state
    }

    fn rejected(&self, action: &'static str) -> InvalidTransition {
        InvalidTransition {
            current_state: self.state,
            action,
        }
    }

    /// Transition from IDLE to ACQUIRING
    pub fn begin_acquire(&mut self) -> Result<(), InvalidTransition> {
        if self.state != SessionState::Idle {
            return Err(self.rejected("start"));
        }
        self.state = SessionState::Acquiring;
        Ok(())
    }

    /// Transition from ACQUIRING to RECORDING
    pub fn begin_recording(&mut self) -> Result<(), InvalidTransition> {
        if self.state != SessionState::Acquiring {
            return Err(self.rejected("begin recording"));
        }
        self.state = SessionState::Recording;
        Ok(())
    }

    /// Transition from RECORDING to PAUSED
    pub fn pause(&mut self) -> Result<(), InvalidTransition> {
        if self.state != SessionState::Recording {
            return Err(self.rejected("pause"));
        }
        self.state = SessionState::Paused;
        Ok(())
    }

    /// Transition from PAUSED to RECORDING
    pub fn resume(&mut self) -> Result<(), InvalidTransition> {
        if self.state != SessionState::Paused {
            return Err(self.rejected("resume"));
        }
        self.state = SessionState::Recording;
        Ok(())
    }

    /// Transition from RECORDING or PAUSED to FINALIZING
    pub fn begin_finalize(&mut self) -> Result<(), InvalidTransition> {
        if !self.state.is_active() {
            return Err(self.rejected("stop"));
        }
        self.state = SessionState::Finalizing;
        Ok(())
    }

    /// Transition from FINALIZING to READY
    pub fn complete(&mut self) -> Result<(), InvalidTransition> {
        if self.state != SessionState::Finalizing {
            return Err(self.rejected("complete"));
        }
        self.state = SessionState::Ready;
        Ok(())
    }

    /// Transition to FAILED from any state where an unrecoverable error can
    /// surface (acquisition, live capture, finalize)
    pub fn fail(&mut self) -> Result<(), InvalidTransition> {
        match self.state {
            SessionState::Acquiring | SessionState::Recording | SessionState::Finalizing => {
                self.state = SessionState::Failed;
                Ok(())
            }
            _ => Err(self.rejected("fail")),
        }
    }

    /// Transition from READY or FAILED back to IDLE
    pub fn reset(&mut self) -> Result<(), InvalidTransition> {
        match self.state {
            SessionState::Ready | SessionState::Failed => {
                self.state = SessionState::Idle;
                Ok(())
            }
            _ => Err(self.rejected("reset")),
        }
    }
}
