//! Topic-based event bus implementation.

use bout_core::{MatchEvent, MatchId};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Punches, defenses, fatigue, ignored inputs
    Exchange,
    /// Knockdowns, counts, stoppages
    Knockdown,
    /// Round and match boundaries
    Round,
}

/// A match event tagged with where and when it happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchUpdate {
    pub match_id: MatchId,
    /// Nonce of the state the event led to.
    pub nonce: u64,
    pub event: MatchEvent,
}

impl MatchUpdate {
    pub fn topic(&self) -> Topic {
        match self.event {
            MatchEvent::Fatigued { .. }
            | MatchEvent::ActionIgnored { .. }
            | MatchEvent::HitLanded { .. }
            | MatchEvent::Dodged { .. } => Topic::Exchange,
            MatchEvent::KnockedDown { .. }
            | MatchEvent::Recovered { .. }
            | MatchEvent::CountedOut { .. }
            | MatchEvent::Stoppage { .. } => Topic::Knockdown,
            MatchEvent::RoundEnded { .. }
            | MatchEvent::RoundStarted { .. }
            | MatchEvent::MatchOver { .. } => Topic::Round,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Cloning shares the channels.
#[derive(Clone)]
pub struct EventBus {
    exchange: broadcast::Sender<MatchUpdate>,
    knockdown: broadcast::Sender<MatchUpdate>,
    round: broadcast::Sender<MatchUpdate>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            exchange: broadcast::channel(capacity).0,
            knockdown: broadcast::channel(capacity).0,
            round: broadcast::channel(capacity).0,
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<MatchUpdate> {
        match topic {
            Topic::Exchange => &self.exchange,
            Topic::Knockdown => &self.knockdown,
            Topic::Round => &self.round,
        }
    }

    /// Publish an update to its corresponding topic
    pub fn publish(&self, update: MatchUpdate) {
        let topic = update.topic();
        if self.sender(topic).send(update).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<MatchUpdate> {
        self.sender(topic).subscribe()
    }

    /// Subscribe to multiple topics
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> Vec<(Topic, broadcast::Receiver<MatchUpdate>)> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bout_core::FighterId;

    #[tokio::test]
    async fn updates_reach_only_their_topic() {
        let bus = EventBus::new();
        let mut knockdowns = bus.subscribe(Topic::Knockdown);
        let mut rounds = bus.subscribe(Topic::Round);

        bus.publish(MatchUpdate {
            match_id: MatchId(1),
            nonce: 4,
            event: MatchEvent::KnockedDown {
                fighter: FighterId::Opponent,
                health: 0,
            },
        });

        let update = knockdowns.recv().await.unwrap();
        assert_eq!(update.nonce, 4);
        assert!(rounds.try_recv().is_err());
    }
}
