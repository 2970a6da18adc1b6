//! Effect lifecycle state machine.
//!
//! ```text
//!   Idle ──start──▶ Starting ──setup ok──▶ Playing
//!    ▲                 │                     │
//!    └──clear / setup failed ◀───────────────┘ (clear or life == 1)
//! ```
//!
//! Setup runs outside the state machine (it may await an image load), so a
//! start hands out a [`Ticket`]; only the session delivered for the current
//! ticket is adopted.

use super::effects::{EffectDef, EffectSettings};
use super::progress::{Progress, ProgressDriver};
use crate::error::FxError;

/// Platform half of a running effect: overlay surface, program and render loop.
pub trait Session {
    /// Writes the phase into the time-like uniform for the current frame.
    fn write_phase(&self, phase: f32);

    /// Resizes the surface and re-applies the viewport.
    fn resize(&mut self);

    /// Removes the per-frame hook.
    fn detach_hook(&mut self);

    /// Hides the surface.
    fn hide(&mut self);

    /// Stops the render loop. Idempotent.
    fn stop(&mut self);

    fn close(&mut self) {
        self.detach_hook();
        self.hide();
        self.stop();
    }
}

/// Sound played when an effect starts audibly.
pub trait SoundCue {
    /// Restarts the sound from the beginning.
    fn replay(&self);
}

/// Identifies one `start()` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Idle,
    Starting,
    Playing,
}

enum State<S> {
    Idle,
    Starting { ticket: Ticket, silent: bool },
    Playing { session: S, driver: ProgressDriver },
}

/// Per-effect controller owning at most one active instance.
pub struct Lifecycle<S> {
    def: &'static EffectDef,
    settings: EffectSettings,
    state: State<S>,
    // Hidden session of the last cleared instance, released on the next start
    retired: Option<S>,
    next_ticket: u64,
    life: f32,
    sound: Option<Box<dyn SoundCue>>,
}

impl<S: Session> Lifecycle<S> {
    pub fn new(def: &'static EffectDef, settings: EffectSettings) -> Self {
        Self {
            def,
            settings,
            state: State::Idle,
            retired: None,
            next_ticket: 0,
            life: 0.0,
            sound: None,
        }
    }

    pub fn def(&self) -> &'static EffectDef {
        self.def
    }

    pub fn settings(&self) -> &EffectSettings {
        &self.settings
    }

    pub fn set_sound(&mut self, sound: Option<Box<dyn SoundCue>>) {
        self.sound = sound;
    }

    pub fn state(&self) -> LifecycleState {
        match self.state {
            State::Idle => LifecycleState::Idle,
            State::Starting { .. } => LifecycleState::Starting,
            State::Playing { .. } => LifecycleState::Playing,
        }
    }

    pub fn playing(&self) -> bool {
        matches!(self.state, State::Playing { .. })
    }

    /// Current life; 0 until the first frame of a run.
    pub fn life(&self) -> f32 {
        self.life
    }

    pub fn phase(&self) -> f32 {
        self.def.phase.phase(self.life)
    }

    pub fn session(&self) -> Option<&S> {
        match &self.state {
            State::Playing { session, .. } => Some(session),
            _ => None,
        }
    }

    /// Tears down any current instance and enters `Starting`.
    pub fn begin_start(&mut self, silent: bool) -> Ticket {
        self.clear();
        self.retired = None;
        self.next_ticket += 1;
        let ticket = Ticket(self.next_ticket);
        self.state = State::Starting { ticket, silent };
        log::debug!("[{}] starting (silent={})", self.def.name, silent);
        ticket
    }

    /// Whether `ticket` belongs to the start still in progress.
    pub fn is_current(&self, ticket: Ticket) -> bool {
        matches!(self.state, State::Starting { ticket: current, .. } if current == ticket)
    }

    /// Adopts the session built for `ticket`.
    ///
    /// A session for a cleared or superseded start is closed and dropped;
    /// returns whether the session was adopted.
    pub fn finish_start(&mut self, ticket: Ticket, mut session: S) -> bool {
        let silent = match self.state {
            State::Starting { ticket: current, silent } if current == ticket => silent,
            _ => {
                log::debug!("[{}] discarding setup of a superseded start", self.def.name);
                session.close();
                return false;
            }
        };

        if !silent {
            if let Some(sound) = &self.sound {
                sound.replay();
            }
        }

        self.life = 0.0;
        let driver = ProgressDriver::new(self.settings.progress_duration_ms());
        self.state = State::Playing { session, driver };
        log::info!("[{}] playing", self.def.name);
        true
    }

    /// Records a setup failure for `ticket`; the effect returns to idle.
    pub fn fail_start(&mut self, ticket: Ticket, error: &FxError) {
        log::error!("[{}] start failed: {}", self.def.name, error);
        if matches!(self.state, State::Starting { ticket: current, .. } if current == ticket) {
            self.state = State::Idle;
        }
    }

    /// Starts with a synchronous setup.
    pub fn start_with(
        &mut self,
        silent: bool,
        setup: impl FnOnce(&EffectSettings) -> Result<S, FxError>,
    ) -> bool {
        let ticket = self.begin_start(silent);
        match setup(&self.settings) {
            Ok(session) => self.finish_start(ticket, session),
            Err(e) => {
                self.fail_start(ticket, &e);
                false
            }
        }
    }

    /// Per-frame hook: advances the driver and writes the phase.
    ///
    /// Clears the effect once life reaches 1.
    pub fn on_frame(&mut self, seconds: f64) {
        let State::Playing { session, driver } = &mut self.state else {
            return;
        };
        let completed = match driver.advance(seconds * 1000.0) {
            Progress::Running(life) => {
                self.life = life;
                false
            }
            Progress::Completed => {
                self.life = 1.0;
                true
            }
            Progress::Idle => return,
        };
        session.write_phase(self.def.phase.phase(self.life));
        if completed {
            log::debug!("[{}] completed", self.def.name);
            self.clear();
        }
    }

    /// Progress is advanced from the frame hook; nothing to do here.
    pub fn update(&mut self) {}

    /// Stops the driver, detaches the hook, hides the surface and stops its
    /// loop. Safe to call in any state.
    pub fn clear(&mut self) {
        match std::mem::replace(&mut self.state, State::Idle) {
            State::Playing {
                mut session,
                mut driver,
            } => {
                driver.stop();
                session.close();
                self.retired = Some(session);
                log::debug!("[{}] cleared", self.def.name);
            }
            State::Starting { .. } => {
                log::debug!("[{}] start cancelled", self.def.name);
            }
            State::Idle => {}
        }
    }

    /// Resizes the playing surface; no-op otherwise.
    pub fn resize(&mut self) {
        if let State::Playing { session, .. } = &mut self.state {
            session.resize();
        }
    }
}
