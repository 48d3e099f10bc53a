//! The control loop: ties analysis, ducking, and scoring together
//!
//! The engine is single-threaded and cooperative. Each call to [`Engine::tick`]
//! performs one full analysis pass over one frame: envelope, pitch, key,
//! duck strength, mode policy, and score update, in that order. External
//! configuration changes never mutate the engine directly; they are queued as
//! [`EngineCommand`]s and drained at the start of the next tick, so a tick
//! always runs against one coherent configuration.
//!
//! Frames come from a [`FrameSource`] collaborator and results go to a
//! [`TickSink`] collaborator. A source with no frame ready this tick is a
//! normal skip, not an error.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::analysis::{AudioFrame, TickOutput};
use crate::config::EngineConfig;
use crate::ducking::{duck_strength, target_volume, GuideMode, Weights};
use crate::error::EngineError;
use crate::features::key::Scale;
use crate::scoring::ScoreTracker;

/// Where the duck-strength weights come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineMode {
    /// User-supplied weights shape the duck strength
    Manual,
    /// All weights pinned to 1.0, full sensitivity
    Auto,
}

impl Default for EngineMode {
    fn default() -> Self {
        EngineMode::Manual
    }
}

/// A configuration change queued for the next tick boundary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EngineCommand {
    /// Switch the guide-vocal mode policy
    SetMode(GuideMode),
    /// Switch between manual and automatic weighting
    SetEngineMode(EngineMode),
    /// Replace the duck-strength weights
    SetWeights(Weights),
    /// Replace the song scale used by the key analyzer
    SetScale(Scale),
}

/// Supplies one frame per tick, when one is available
///
/// Returning `None` means no frame is ready right now; the engine skips the
/// tick. A pull-based source that has run out of material permanently also
/// returns `None`, and [`Engine::run`] treats that as the end of the run.
pub trait FrameSource {
    /// The next frame to analyze, if one is ready
    fn next_frame(&mut self) -> Option<AudioFrame>;
}

impl<I> FrameSource for I
where
    I: Iterator<Item = AudioFrame>,
{
    fn next_frame(&mut self) -> Option<AudioFrame> {
        self.next()
    }
}

/// Receives the engine's per-tick results
pub trait TickSink {
    /// Applies the selected guide-vocal volume (0.0-1.0)
    fn apply_guide_volume(&mut self, volume: f32);

    /// Receives the full analysis output for this tick
    fn emit(&mut self, output: &TickOutput);

    /// Notified when a run stops
    fn run_stopped(&mut self, _best_score: f32) {}
}

/// A sink that records everything it receives, for embedding and tests
#[derive(Debug, Clone, Default)]
pub struct CollectSink {
    /// Guide volumes in tick order
    pub volumes: Vec<f32>,
    /// Full tick outputs in tick order
    pub outputs: Vec<TickOutput>,
    /// Best score reported at the most recent run stop
    pub last_best_score: Option<f32>,
}

impl CollectSink {
    /// Creates an empty sink
    pub fn new() -> Self {
        Self::default()
    }
}

impl TickSink for CollectSink {
    fn apply_guide_volume(&mut self, volume: f32) {
        self.volumes.push(volume);
    }

    fn emit(&mut self, output: &TickOutput) {
        self.outputs.push(*output);
    }

    fn run_stopped(&mut self, best_score: f32) {
        self.last_best_score = Some(best_score);
    }
}

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickStatus {
    /// No run is active; nothing was analyzed
    Inactive,
    /// The source had no frame ready; the tick was skipped
    NoFrame,
    /// A frame was analyzed and emitted
    Processed(TickOutput),
}

/// The karaoke analysis engine
///
/// # Example
///
/// ```
/// use encore_dsp::{AudioFrame, CollectSink, Engine, EngineConfig};
///
/// let mut engine = Engine::new(EngineConfig::default()).unwrap();
/// let mut sink = CollectSink::new();
///
/// let frame = AudioFrame::new(vec![0.1, -0.1, 0.1, -0.1], 44100).unwrap();
/// let mut source = std::iter::once(frame);
///
/// engine.start();
/// engine.tick(&mut source, &mut sink);
/// let best = engine.stop();
///
/// assert_eq!(sink.outputs.len(), 1);
/// assert!(best >= 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    mode: GuideMode,
    engine_mode: EngineMode,
    weights: Weights,
    scores: ScoreTracker,
    run_active: bool,
    pending: VecDeque<EngineCommand>,
}

impl Engine {
    /// Creates an engine with the given configuration
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidConfig` if the configuration is
    /// internally inconsistent.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self {
            config,
            mode: GuideMode::default(),
            engine_mode: EngineMode::default(),
            weights: Weights::unity(),
            scores: ScoreTracker::new(),
            run_active: false,
            pending: VecDeque::new(),
        })
    }

    /// Current guide-vocal mode
    pub fn mode(&self) -> GuideMode {
        self.mode
    }

    /// Current weighting mode
    pub fn engine_mode(&self) -> EngineMode {
        self.engine_mode
    }

    /// Current user weights (applied only in `Manual` mode)
    pub fn weights(&self) -> Weights {
        self.weights
    }

    /// Score state for display
    pub fn scores(&self) -> &ScoreTracker {
        &self.scores
    }

    /// Whether a run is active
    pub fn is_running(&self) -> bool {
        self.run_active
    }

    /// Queues a configuration change to take effect at the next tick
    pub fn queue_command(&mut self, command: EngineCommand) {
        self.pending.push_back(command);
    }

    /// Starts a fresh run, resetting the running and session scores
    ///
    /// The best score from earlier runs survives.
    pub fn start(&mut self) {
        log::debug!("Run started");
        self.scores.start_run();
        self.run_active = true;
    }

    /// Resumes a stopped run without touching any score
    pub fn resume(&mut self) {
        log::debug!("Run resumed");
        self.run_active = true;
    }

    /// Stops the current run and folds its session score into the best score
    ///
    /// Returns the best score. Stopping while already stopped is a no-op.
    pub fn stop(&mut self) -> f32 {
        if self.run_active {
            self.run_active = false;
            self.scores.stop_run();
            log::debug!("Run stopped, best score {:.2}", self.scores.best_score());
        }
        self.scores.best_score()
    }

    /// Performs one tick: drain commands, analyze one frame, emit results
    ///
    /// Commands are always drained, even while stopped, so a queued mode or
    /// weight change is not lost across a pause.
    pub fn tick<S, K>(&mut self, source: &mut S, sink: &mut K) -> TickStatus
    where
        S: FrameSource,
        K: TickSink,
    {
        self.drain_commands();

        if !self.run_active {
            return TickStatus::Inactive;
        }

        let frame = match source.next_frame() {
            Some(frame) => frame,
            None => return TickStatus::NoFrame,
        };

        let analysis = crate::analyze_frame(&frame, &self.config);
        let weights = match self.engine_mode {
            EngineMode::Manual => self.weights,
            EngineMode::Auto => Weights::unity(),
        };
        let strength = duck_strength(&analysis, &weights);
        let volume = target_volume(self.mode, strength, &self.config);

        self.scores.update(
            strength,
            self.config.running_score_retain,
            self.config.session_accrual,
        );

        let output = TickOutput {
            level: analysis.level,
            pitch_quality: analysis.pitch_quality,
            key_quality: analysis.key_quality,
            duck_strength: strength,
            target_volume: volume,
            running_score: self.scores.running_score(),
            session_score: self.scores.session_score(),
        };

        sink.apply_guide_volume(volume);
        sink.emit(&output);

        TickStatus::Processed(output)
    }

    /// Drives ticks until the run stops or the source is exhausted
    ///
    /// Source exhaustion ends the run: the engine stops itself, finalizes the
    /// best score, and notifies the sink. Returns the best score.
    pub fn run<S, K>(&mut self, source: &mut S, sink: &mut K) -> f32
    where
        S: FrameSource,
        K: TickSink,
    {
        loop {
            match self.tick(source, sink) {
                TickStatus::Processed(_) => {}
                TickStatus::NoFrame => {
                    let best = self.stop();
                    sink.run_stopped(best);
                    return best;
                }
                TickStatus::Inactive => return self.scores.best_score(),
            }
        }
    }

    fn drain_commands(&mut self) {
        while let Some(command) = self.pending.pop_front() {
            log::debug!("Applying command {:?}", command);
            match command {
                EngineCommand::SetMode(mode) => self.mode = mode,
                EngineCommand::SetEngineMode(mode) => self.engine_mode = mode,
                EngineCommand::SetWeights(weights) => self.weights = weights,
                EngineCommand::SetScale(scale) => self.config.scale = scale,
            }
        }
    }
}
