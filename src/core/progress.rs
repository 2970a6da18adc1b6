/// Easing law applied to normalised time (0..=1).
pub type Easing = fn(f32) -> f32;

#[inline]
pub fn linear(t: f32) -> f32 {
    t
}

/// Result of advancing a [`ProgressDriver`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Progress {
    /// Still advancing; carries the current life.
    Running(f32),
    /// Life just reached 1. Reported once per driver.
    Completed,
    /// Already completed or stopped.
    Idle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DriverState {
    Running,
    Completed,
    Stopped,
}

/// Advances `life` from 0 to 1 over a fixed duration.
///
/// The driver owns no clock: it is advanced with the frame timestamp of the
/// render loop that draws it, and its time origin is the first timestamp it
/// sees.
#[derive(Debug, Clone)]
pub struct ProgressDriver {
    duration_ms: f64,
    easing: Easing,
    origin_ms: Option<f64>,
    life: f32,
    state: DriverState,
}

impl ProgressDriver {
    pub fn new(duration_ms: f64) -> Self {
        Self {
            duration_ms: duration_ms.max(0.0),
            easing: linear,
            origin_ms: None,
            life: 0.0,
            state: DriverState::Running,
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn life(&self) -> f32 {
        self.life
    }

    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    pub fn is_running(&self) -> bool {
        self.state == DriverState::Running
    }

    /// Moves the driver to `now_ms`.
    pub fn advance(&mut self, now_ms: f64) -> Progress {
        if self.state != DriverState::Running {
            return Progress::Idle;
        }
        let origin = *self.origin_ms.get_or_insert(now_ms);
        let elapsed = (now_ms - origin).max(0.0);
        let t = if self.duration_ms <= 0.0 {
            1.0
        } else {
            (elapsed / self.duration_ms).min(1.0) as f32
        };
        if t >= 1.0 {
            self.life = 1.0;
            self.state = DriverState::Completed;
            return Progress::Completed;
        }
        self.life = (self.easing)(t).clamp(0.0, 1.0);
        Progress::Running(self.life)
    }

    /// Stops the driver; it will not report completion afterwards.
    pub fn stop(&mut self) {
        if self.state == DriverState::Running {
            self.state = DriverState::Stopped;
        }
    }
}
