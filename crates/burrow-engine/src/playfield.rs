//! Lockstep playfield: the owned world tying every component together.
//!
//! [`Playfield`] owns the slot registry, the token pool, the spawn
//! scheduler, the interruption handler and the slot → activation map.
//! Nothing is global; a second playfield is fully independent.
//!
//! # Frame order
//!
//! Each [`step()`](Playfield::step) runs:
//!
//! 1. hit events, so an interruption in frame N cancels that token's
//!    motion for frame N onward;
//! 2. token motion, in slot order, releasing tokens that finish falling;
//! 3. the spawn scheduler.
//!
//! # Ownership model
//!
//! All mutation goes through `&mut self`, so acquire and release calls
//! are serialized by the borrow checker. `Playfield` is [`Send`]; callers
//! that share one across threads wrap it in a single `Mutex`.

use burrow_core::{
    Activation, DepthKey, Presenter, SlotId, TickId, TokenId, Vec2, OFF_STAGE,
};
use burrow_pool::{Pool, SlotRegistry};
use indexmap::IndexMap;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use smallvec::SmallVec;

use crate::config::{ConfigError, MotionConfig, PlayfieldConfig};
use crate::error::LifecycleError;
use crate::interrupt::{HitEvent, InterruptionHandler};
use crate::metrics::{PlayfieldMetrics, Release, ReleaseCause, Spawn, StepReport};
use crate::scheduler::RoundScheduler;
use crate::token::{Advance, Phase, Token};

// Compile-time assertion: Playfield is Send.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<Playfield>();
    }
};

/// Read-only view of a running token.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TokenView {
    /// The running activation.
    pub activation: Activation,
    /// Slot the token occupies.
    pub slot: SlotId,
    /// Current phase.
    pub phase: Phase,
    /// Current position.
    pub position: Vec2,
    /// Draw-order key.
    pub depth: DepthKey,
}

/// Single-threaded slot/token simulation.
///
/// Created from a [`PlayfieldConfig`] via [`new()`](Playfield::new).
///
/// # Example
///
/// ```ignore
/// let mut field = Playfield::headless(config)?;
/// for _ in 0..600 {
///     let report = field.step(1.0 / 60.0, &hits);
/// }
/// ```
pub struct Playfield {
    slots: SlotRegistry,
    tokens: Pool<Token>,
    active: IndexMap<SlotId, Activation>,
    scheduler: RoundScheduler,
    interruptions: InterruptionHandler,
    motion: MotionConfig,
    positions: Vec<Vec2>,
    rng: ChaCha8Rng,
    seed: u64,
    tick: TickId,
    metrics: PlayfieldMetrics,
    presenter: Box<dyn Presenter>,
}

impl Playfield {
    /// Build a playfield that pushes visual updates to `presenter`.
    ///
    /// Validates the configuration and pre-warms the token pool.
    pub fn new(
        config: PlayfieldConfig,
        presenter: Box<dyn Presenter>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let PlayfieldConfig { layout, tuning } = config;
        let positions = layout.into_positions();
        tracing::debug!(
            slots = positions.len(),
            prewarm = tuning.prewarm_tokens,
            seed = tuning.seed,
            "playfield created"
        );
        Ok(Self {
            slots: SlotRegistry::new(positions.clone()),
            tokens: Pool::with_prewarmed(tuning.prewarm_tokens),
            active: IndexMap::with_capacity(positions.len()),
            scheduler: RoundScheduler::new(tuning.spawn_interval_secs),
            interruptions: InterruptionHandler::new(tuning.hit_half_extents()),
            motion: tuning.motion,
            positions,
            rng: ChaCha8Rng::seed_from_u64(tuning.seed),
            seed: tuning.seed,
            tick: TickId(0),
            metrics: PlayfieldMetrics::default(),
            presenter,
        })
    }

    /// Build a playfield with no presenter attached.
    pub fn headless(config: PlayfieldConfig) -> Result<Self, ConfigError> {
        Self::new(config, Box::new(burrow_core::NullPresenter))
    }

    /// Run one frame of `dt` seconds, processing `hits` first.
    ///
    /// A non-finite or negative `dt` is treated as zero.
    pub fn step(&mut self, dt: f32, hits: &[HitEvent]) -> StepReport {
        let dt = if dt.is_finite() && dt >= 0.0 {
            dt
        } else {
            tracing::warn!(dt, "invalid frame time; treating as zero");
            0.0
        };
        self.tick = TickId(self.tick.0 + 1);
        let mut report = StepReport::new(self.tick);

        for hit in hits {
            if let Some(release) = self.handle_hit(hit.point) {
                report.releases.push(release);
            }
        }

        self.advance_tokens(dt, &mut report);

        if self.scheduler.poll(dt) {
            report.spawned = self.spawn();
        }
        report
    }

    /// Interrupt whichever running token lies under `point`.
    ///
    /// Returns the interrupted activation, or `None` for a miss.
    pub fn hit(&mut self, point: Vec2) -> Option<Activation> {
        self.handle_hit(point).map(|r| r.activation)
    }

    /// Interrupt a specific activation.
    ///
    /// Returns `true` if this call released it. Stale activations (already
    /// completed, already interrupted, or recycled into a new lifecycle)
    /// are a no-op and return `false`.
    pub fn interrupt(&mut self, activation: Activation) -> bool {
        self.interrupt_inner(activation).is_some()
    }

    /// Return every token to the pool and restart with `seed`.
    ///
    /// Resets the tick counter, metrics and scheduler. Running tokens are
    /// recycled through the pool rather than rebuilt, so their generations
    /// survive and activations from before the reset stay stale.
    pub fn reset(&mut self, seed: u64) {
        let running: SmallVec<[Activation; 16]> =
            self.active.drain(..).map(|(_, a)| a).collect();
        for activation in running {
            if let Err(e) = self.tokens.release(activation.token) {
                self.report_violation(&e.into());
            }
            self.presenter.place(activation.token, OFF_STAGE);
        }
        self.slots = SlotRegistry::new(self.positions.clone());
        self.scheduler.reset();
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        self.seed = seed;
        self.tick = TickId(0);
        self.metrics = PlayfieldMetrics::default();
        tracing::debug!(seed, "playfield reset");
    }

    // ── Interruption ───────────────────────────────────────────

    fn handle_hit(&mut self, point: Vec2) -> Option<Release> {
        match self
            .interruptions
            .resolve(point, &self.active, &self.tokens)
        {
            Some(activation) => self.interrupt_inner(activation),
            None => {
                self.metrics.missed_hits += 1;
                None
            }
        }
    }

    fn interrupt_inner(&mut self, activation: Activation) -> Option<Release> {
        match self.release(activation, ReleaseCause::Interrupted) {
            Ok(Some(release)) => {
                self.metrics.interruptions += 1;
                Some(release)
            }
            Ok(None) => {
                self.metrics.stale_interruptions += 1;
                tracing::trace!(%activation, "stale interruption ignored");
                None
            }
            Err(e) => {
                self.report_violation(&e);
                None
            }
        }
    }

    // ── Lifecycle ──────────────────────────────────────────────

    fn advance_tokens(&mut self, dt: f32, report: &mut StepReport) {
        let mut running: SmallVec<[(SlotId, Activation); 16]> =
            self.active.iter().map(|(&s, &a)| (s, a)).collect();
        running.sort_unstable_by_key(|&(slot, _)| slot);

        for (slot, activation) in running {
            let Some(token) = self.tokens.get_mut(activation.token) else {
                self.report_violation(&LifecycleError::Orphaned { slot, activation });
                continue;
            };
            match token.advance(dt, &self.motion) {
                Advance::Inactive | Advance::Held => {}
                Advance::Moved(position) => self.presenter.place(activation.token, position),
                Advance::Finished(position) => {
                    self.presenter.place(activation.token, position);
                    match self.release(activation, ReleaseCause::Completed) {
                        Ok(Some(release)) => {
                            self.metrics.natural_releases += 1;
                            report.releases.push(release);
                        }
                        Ok(None) => {}
                        Err(e) => self.report_violation(&e),
                    }
                }
            }
        }
    }

    /// The release sequence, shared by completion and interruption.
    ///
    /// Runs at most once per activation: the token must be in use and its
    /// running activation must equal `activation`, and recycling (the last
    /// step) clears the active state. Returns `Ok(None)` for a stale call.
    ///
    /// The token is detached and recycled even when the registry rejects
    /// the slot release, so a violation is reported once rather than on
    /// every later frame.
    fn release(
        &mut self,
        activation: Activation,
        cause: ReleaseCause,
    ) -> Result<Option<Release>, LifecycleError> {
        let Some(token) = self.tokens.get_mut(activation.token) else {
            return Ok(None);
        };
        if !token.matches(activation) {
            return Ok(None);
        }
        let freed = match token.take_slot() {
            Some(slot) => {
                self.active.swap_remove(&slot);
                self.slots
                    .release(slot)
                    .map(|()| slot)
                    .map_err(LifecycleError::from)
            }
            None => {
                self.active.retain(|_, a| *a != activation);
                Err(LifecycleError::Unassigned {
                    token: activation.token,
                })
            }
        };
        self.tokens.release(activation.token)?;
        self.presenter.place(activation.token, OFF_STAGE);
        let slot = freed?;
        tracing::debug!(tick = %self.tick, %activation, %slot, ?cause, "token released");
        Ok(Some(Release {
            activation,
            slot,
            cause,
        }))
    }

    // ── Scheduling ─────────────────────────────────────────────

    fn spawn(&mut self) -> Option<Spawn> {
        let Some(slot) = self.slots.acquire_random_free(&mut self.rng) else {
            self.metrics.skipped_spawns += 1;
            self.scheduler.defer();
            tracing::trace!(tick = %self.tick, "no free slot; spawn skipped");
            return None;
        };
        self.scheduler.rearm();
        let built = self.tokens.len();
        let result = self.bind(slot);
        self.metrics.tokens_grown += (self.tokens.len() - built) as u64;
        match result {
            Ok(spawn) => {
                self.metrics.spawns += 1;
                Some(spawn)
            }
            Err(e) => {
                self.report_violation(&e);
                None
            }
        }
    }

    /// Bind a token to `slot`, which the caller has already acquired.
    ///
    /// On failure the token goes back to the pool and the slot back to the
    /// registry, unless another activation already holds the slot.
    fn bind(&mut self, slot: SlotId) -> Result<Spawn, LifecycleError> {
        if let Some(&holder) = self.active.get(&slot) {
            return Err(LifecycleError::SlotShared { slot, holder });
        }
        let key = self.tokens.acquire();
        let (activation, position) = match self.start_token(key, slot) {
            Ok(started) => started,
            Err(e) => {
                self.tokens.release(key)?;
                if self.slots.is_occupied(slot) {
                    self.slots.release(slot)?;
                }
                return Err(e);
            }
        };
        let depth = DepthKey::for_slot(slot);
        self.active.insert(slot, activation);
        self.presenter.set_depth(key, depth);
        self.presenter.place(key, position);
        tracing::debug!(tick = %self.tick, %activation, %slot, "token spawned");
        Ok(Spawn { activation, slot })
    }

    fn start_token(
        &mut self,
        key: TokenId,
        slot: SlotId,
    ) -> Result<(Activation, Vec2), LifecycleError> {
        let base = self.slots.position_of(slot)?;
        let token = self
            .tokens
            .get_mut(key)
            .ok_or(LifecycleError::Orphaned {
                slot,
                activation: Activation {
                    token: key,
                    generation: 0,
                },
            })?;
        token.initialize(slot, base, &self.motion)?;
        let activation = token.start()?;
        Ok((activation, token.position()))
    }

    fn report_violation(&mut self, error: &LifecycleError) {
        self.metrics.ownership_violations += 1;
        tracing::error!(tick = %self.tick, %error, "ownership violation");
        if cfg!(debug_assertions) {
            panic!("ownership violation: {error}");
        }
    }

    // ── Inspection ─────────────────────────────────────────────

    /// View of a running activation, or `None` if it has ended.
    pub fn token(&self, activation: Activation) -> Option<TokenView> {
        let token = self.tokens.get(activation.token)?;
        if !token.matches(activation) {
            return None;
        }
        Some(TokenView {
            activation,
            slot: token.slot()?,
            phase: token.phase(),
            position: token.position(),
            depth: token.depth()?,
        })
    }

    /// Views of every running token, in slot order.
    pub fn active_tokens(&self) -> Vec<TokenView> {
        let mut views: Vec<TokenView> = self
            .active
            .values()
            .filter_map(|&a| self.token(a))
            .collect();
        views.sort_unstable_by_key(|v| v.slot);
        views
    }

    /// The activation occupying `slot`, if any.
    pub fn occupant(&self, slot: SlotId) -> Option<Activation> {
        self.active.get(&slot).copied()
    }

    /// Number of running tokens.
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// The slot registry.
    pub fn slots(&self) -> &SlotRegistry {
        &self.slots
    }

    /// The token pool.
    pub fn tokens(&self) -> &Pool<Token> {
        &self.tokens
    }

    /// A token by id, whether running or parked.
    pub fn peek_token(&self, token: TokenId) -> Option<&Token> {
        self.tokens.peek(token)
    }

    /// Cumulative counters.
    pub fn metrics(&self) -> &PlayfieldMetrics {
        &self.metrics
    }

    /// Last executed tick (0 after construction or reset).
    pub fn current_tick(&self) -> TickId {
        self.tick
    }

    /// Current RNG seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Motion constants.
    pub fn motion(&self) -> &MotionConfig {
        &self.motion
    }

    /// Check every allocation invariant.
    ///
    /// - the token pool's available/in-use sets partition its instances;
    /// - the slot registry's free set agrees with its occupancy flags;
    /// - every mapped slot is occupied and held by a running token bound
    ///   to that slot, and the counts of occupied slots, running tokens
    ///   and map entries agree (so no two tokens share a slot).
    pub fn audit(&self) -> Result<(), LifecycleError> {
        let fail = |reason: String| Err(LifecycleError::Audit { reason });
        if let Err(reason) = self.tokens.check_partition() {
            return fail(reason);
        }
        if let Err(reason) = self.slots.check_consistency() {
            return fail(reason);
        }
        for (&slot, &activation) in &self.active {
            if !self.slots.is_occupied(slot) {
                return fail(format!("mapped slot {slot} is free"));
            }
            let Some(token) = self.tokens.get(activation.token) else {
                return fail(format!("slot {slot} maps to parked token {}", activation.token));
            };
            if !token.matches(activation) {
                return fail(format!("slot {slot} maps to stale activation {activation}"));
            }
            if token.slot() != Some(slot) {
                return fail(format!(
                    "token {} bound to {:?}, mapped at slot {slot}",
                    activation.token,
                    token.slot()
                ));
            }
        }
        let occupied = self.slots.len() - self.slots.free_count();
        let in_use = self.tokens.in_use_count();
        if occupied != self.active.len() || in_use != self.active.len() {
            return fail(format!(
                "occupied slots {occupied}, tokens in use {in_use}, mapped {}",
                self.active.len()
            ));
        }
        Ok(())
    }
}

impl std::fmt::Debug for Playfield {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Playfield")
            .field("tick", &self.tick)
            .field("seed", &self.seed)
            .field("slots", &self.slots.len())
            .field("free_slots", &self.slots.free_count())
            .field("tokens", &self.tokens)
            .finish()
    }
}
