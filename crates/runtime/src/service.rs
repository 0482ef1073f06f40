//! Single-writer match service.
//!
//! Each match id has its own async mutex, so at most one tick per match is in
//! flight while different matches advance in parallel. Every tick loads the
//! stored state, measures elapsed time on the injected [`Clock`], runs the
//! pure engine and saves with the version it loaded.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use bout_core::{
    BoutError, MatchConfig, MatchEngine, MatchEnv, MatchEvent, MatchId, MatchSnapshot, MatchState,
    MatchStatus, PcgRng, new_match, serialize_state, start_round, submit_action,
};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::clock::Clock;
use crate::config::RuntimeConfig;
use crate::error::{RepositoryError, Result, RuntimeError};
use crate::events::{EventBus, MatchUpdate, Topic};
use crate::repository::{InMemoryMatchRepo, MatchRepository};

/// What a caller sees after an operation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchView {
    /// Snapshot with the event log cut to the configured window.
    pub snapshot: MatchSnapshot,
    /// Events produced by this call. Empty for reads.
    pub events: Vec<MatchEvent>,
    pub version: u64,
}

impl MatchView {
    pub fn is_over(&self) -> bool {
        self.snapshot.match_status == MatchStatus::MatchOver
    }
}

#[derive(Clone)]
pub struct MatchService {
    config: Arc<MatchConfig>,
    runtime: RuntimeConfig,
    repo: Arc<dyn MatchRepository>,
    clock: Arc<dyn Clock>,
    bus: EventBus,
    rng: PcgRng,
    locks: Arc<Mutex<HashMap<MatchId, Arc<tokio::sync::Mutex<()>>>>>,
    next_id: Arc<AtomicU64>,
    base_seed: u64,
}

impl MatchService {
    /// Builds a service over `repo`.
    ///
    /// Fails when the match configuration or the configured round count is
    /// invalid.
    pub fn new(
        config: MatchConfig,
        runtime: RuntimeConfig,
        repo: Arc<dyn MatchRepository>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        config.validate()?;
        config.validate_rounds(runtime.max_rounds)?;

        let next_id = repo.list()?.last().map_or(1, |id| id.0 + 1);
        let base_seed = runtime.seed.unwrap_or_else(entropy_seed);
        let bus = EventBus::with_capacity(runtime.event_buffer_size);

        Ok(Self {
            config: Arc::new(config),
            runtime,
            repo,
            clock,
            bus,
            rng: PcgRng,
            locks: Arc::new(Mutex::new(HashMap::new())),
            next_id: Arc::new(AtomicU64::new(next_id)),
            base_seed,
        })
    }

    /// Service backed by a fresh [`InMemoryMatchRepo`].
    pub fn in_memory(
        config: MatchConfig,
        runtime: RuntimeConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        Self::new(config, runtime, Arc::new(InMemoryMatchRepo::new()), clock)
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Creates a match, opens round one and stores it.
    pub fn start_match(&self) -> Result<MatchView> {
        let id = MatchId(self.next_id.fetch_add(1, Ordering::SeqCst));
        let seed = self.match_seed(id);

        let state = new_match(id, self.runtime.max_rounds, &self.config, seed)?;
        let state = start_round(&state, &self.config);
        let version = self.repo.save(&state, self.clock.now(), 0)?;

        tracing::info!(
            match_id = %id,
            seed,
            max_rounds = state.max_rounds,
            "match started"
        );
        Ok(self.view_of(&state, version, Vec::new()))
    }

    /// Validates `name` and resolves it in a tick covering the time since the
    /// previous one.
    ///
    /// A rejected name leaves the stored match untouched.
    pub async fn submit_action(&self, id: MatchId, name: &str) -> Result<MatchView> {
        self.step(id, Some(name)).await
    }

    /// Timer-only tick: the primary fighter rests.
    pub async fn advance(&self, id: MatchId) -> Result<MatchView> {
        self.step(id, None).await
    }

    /// Read-only view of a stored match.
    pub fn view(&self, id: MatchId) -> Result<MatchView> {
        let stored = self.repo.load(id)?.ok_or(RuntimeError::MatchNotFound(id))?;
        Ok(self.view_of(&stored.state, stored.version, Vec::new()))
    }

    /// Full stored state, event log included.
    pub fn state(&self, id: MatchId) -> Result<MatchState> {
        self.repo
            .load(id)?
            .map(|stored| stored.state)
            .ok_or(RuntimeError::MatchNotFound(id))
    }

    pub fn list_matches(&self) -> Result<Vec<MatchId>> {
        Ok(self.repo.list()?)
    }

    /// Forgets a match.
    pub fn remove_match(&self, id: MatchId) -> Result<()> {
        self.repo.delete(id).map_err(|err| match err {
            RepositoryError::NotFound(id) => RuntimeError::MatchNotFound(id),
            other => other.into(),
        })?;
        if let Ok(mut locks) = self.locks.lock() {
            locks.remove(&id);
        }
        tracing::info!(match_id = %id, "match removed");
        Ok(())
    }

    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<MatchUpdate> {
        self.bus.subscribe(topic)
    }

    /// Advances `id` every `period` until the match is over.
    ///
    /// The task resolves to the final view, or to the first error.
    pub fn spawn_ticker(&self, id: MatchId, period: Duration) -> JoinHandle<Result<MatchView>> {
        let service = self.clone();
        let period = period.max(Duration::from_millis(1));

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                let view = service.advance(id).await?;
                if view.is_over() {
                    tracing::debug!(match_id = %id, "ticker stopped");
                    return Ok(view);
                }
            }
        })
    }

    async fn step(&self, id: MatchId, action: Option<&str>) -> Result<MatchView> {
        let lock = self.lock_for(id)?;
        let _guard = lock.lock().await;

        let stored = self.repo.load(id)?.ok_or(RuntimeError::MatchNotFound(id))?;

        let pending = match action {
            Some(name) => match submit_action(&stored.state, name) {
                Ok(pending) => Some(pending),
                Err(err) => {
                    tracing::warn!(
                        match_id = %id,
                        action = name,
                        code = err.error_code(),
                        severity = err.severity().as_str(),
                        error = %err,
                        "action rejected"
                    );
                    return Err(err.into());
                }
            },
            None => None,
        };

        if stored.state.is_over() {
            return Ok(self.view_of(&stored.state, stored.version, Vec::new()));
        }

        let now = self.clock.now();
        let elapsed = now.saturating_sub(stored.last_tick_at).as_secs_f64();

        let engine = MatchEngine::new(MatchEnv::new(&self.config, &self.rng));
        let outcome = engine.tick(&stored.state, pending, elapsed)?;

        let version = match self.repo.save(&outcome.state, now, stored.version) {
            Ok(version) => version,
            Err(err) => {
                tracing::warn!(match_id = %id, error = %err, "tick not saved");
                return Err(err.into());
            }
        };

        let next = &outcome.state;
        tracing::debug!(
            match_id = %id,
            nonce = next.nonce,
            status = %next.status,
            round = next.current_round,
            elapsed,
            events = outcome.events.len(),
            "tick"
        );
        if next.is_over() {
            tracing::info!(
                match_id = %id,
                winner = ?next.winner,
                finish = ?next.finish,
                "match over"
            );
        }

        for event in &outcome.events {
            self.bus.publish(MatchUpdate {
                match_id: id,
                nonce: next.nonce,
                event: event.clone(),
            });
        }

        Ok(self.view_of(next, version, outcome.events))
    }

    fn lock_for(&self, id: MatchId) -> Result<Arc<tokio::sync::Mutex<()>>> {
        let mut locks = self
            .locks
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(locks.entry(id).or_default().clone())
    }

    fn view_of(&self, state: &MatchState, version: u64, events: Vec<MatchEvent>) -> MatchView {
        let mut snapshot = serialize_state(state);
        snapshot.truncate_log(self.runtime.event_window);
        MatchView {
            snapshot,
            events,
            version,
        }
    }

    fn match_seed(&self, id: MatchId) -> u64 {
        self.base_seed ^ id.0.wrapping_mul(0x9E37_79B9_7F4A_7C15)
    }
}

fn entropy_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}
