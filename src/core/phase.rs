use crate::constants::{PHASE_END, PHASE_FULL_TURN, PHASE_START};

/// Maps an effect's life (0..=1) onto the value written into its time uniform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PhaseMapping {
    /// Interpolates from `start` to `end`.
    Sweep { start: f32, end: f32 },
    /// One full turn: `life * 2π`.
    Turn,
}

impl PhaseMapping {
    /// Light sweep that starts and ends off the visible unit circle.
    pub const SWEEP: Self = Self::Sweep {
        start: PHASE_START,
        end: PHASE_END,
    };

    pub fn phase(&self, life: f32) -> f32 {
        let life = life.clamp(0.0, 1.0);
        match *self {
            // Weighted form so life == 1 lands exactly on `end`
            Self::Sweep { start, end } => start * (1.0 - life) + end * life,
            Self::Turn => life * PHASE_FULL_TURN,
        }
    }
}

impl Default for PhaseMapping {
    fn default() -> Self {
        Self::SWEEP
    }
}
