use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::{Card, Source};

/// Something the presentation layer may want to animate or play a sound for.
///
/// The engine queues these and never waits for anyone to consume them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    CardAcquired {
        player: usize,
        source: Source,
    },
    CardDiscarded {
        player: usize,
        /// In table order.
        meld: Vec<Card>,
    },
    RoundDeclared {
        player: usize,
    },
    RoundResolved {
        winner: usize,
        /// The declarer, if someone else held a lower hand.
        penalized: Option<usize>,
    },
}

/// Most events held at once. When full, the oldest event is dropped.
pub const MAX_QUEUED_EVENTS: usize = 256;

/// Pending events, oldest first. A host that never drains still sees at most
/// the last [`MAX_QUEUED_EVENTS`].
#[derive(Debug, Default)]
pub struct EventBus {
    queue: VecDeque<Event>,
}

impl EventBus {
    pub fn push(&mut self, event: Event) {
        if self.queue.len() == MAX_QUEUED_EVENTS {
            self.queue.pop_front();
        }
        self.queue.push_back(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.queue.drain(..)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
