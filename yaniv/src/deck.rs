use rand::Rng;

use crate::{Card, NUM_IDENTIFIERS};

const FULL_BOUNDARY: usize = NUM_IDENTIFIERS as usize - 1;

/// The draw pile.
///
/// Drawing picks a random slot below `boundary`, hands out its card, and
/// overwrites the slot with the one at `boundary`. When the boundary reaches
/// zero it jumps back to the top without restoring anything, so a very long
/// round can see the same card twice while others never come up again.
#[derive(Clone, Debug)]
pub struct Deck {
    slots: [Card; NUM_IDENTIFIERS as usize],
    boundary: usize,
}

impl Deck {
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(|i| Card::from_identifier(i as u8)),
            boundary: FULL_BOUNDARY,
        }
    }

    pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Card {
        if self.boundary == 0 {
            self.boundary = FULL_BOUNDARY;
        }
        let index = rng.gen_range(0..self.boundary);
        let card = self.slots[index];
        self.slots[index] = self.slots[self.boundary];
        self.boundary -= 1;
        card
    }

    /// How many draws are left before the boundary wraps.
    pub fn remaining(&self) -> usize {
        self.boundary
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}
