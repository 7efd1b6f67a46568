use serde::{Deserialize, Serialize};

use crate::{Card, Rank};

/// Handle to a card dealt during the current round.
///
/// Hands, the table row and melds all refer to cards through these ids, so a
/// joker's wild rank lives in exactly one place. Ids are only meaningful for
/// the [`Cards`] arena that handed them out, and only until it is cleared.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub(crate) u32);

#[derive(Copy, Clone, Debug)]
struct Slot {
    card: Card,
    wild_rank: Option<Rank>,
}

/// All cards in play this round.
#[derive(Clone, Debug, Default)]
pub struct Cards {
    slots: Vec<Slot>,
}

impl Cards {
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    pub fn alloc(&mut self, card: Card) -> CardId {
        let id = CardId(self.slots.len() as u32);
        self.slots.push(Slot {
            card,
            wild_rank: None,
        });
        id
    }

    /// Forgets every card. All previously issued ids become invalid.
    pub fn clear(&mut self) {
        self.slots.clear();
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, id: CardId) -> Option<Card> {
        self.slots.get(id.0 as usize).map(|slot| slot.card)
    }

    /// The identity of a card.
    ///
    /// Panics if the id was not issued by this arena.
    pub fn card(&self, id: CardId) -> Card {
        self.slots[id.0 as usize].card
    }

    /// The rank used for ordering and matching: the wild rank of a joker if
    /// one is assigned, the printed rank otherwise.
    pub fn rank(&self, id: CardId) -> Rank {
        let slot = &self.slots[id.0 as usize];
        slot.wild_rank.unwrap_or(slot.card.rank)
    }

    pub fn wild_rank(&self, id: CardId) -> Option<Rank> {
        self.slots[id.0 as usize].wild_rank
    }

    /// Assigns (or clears) the contextual rank of a joker. Ignored for natural
    /// cards, whose rank never changes.
    pub fn set_wild_rank(&mut self, id: CardId, rank: Option<Rank>) {
        let slot = &mut self.slots[id.0 as usize];
        if slot.card.is_joker() {
            slot.wild_rank = rank;
        }
    }

    pub fn is_joker(&self, id: CardId) -> bool {
        self.card(id).is_joker()
    }

    pub fn value(&self, id: CardId) -> u32 {
        self.card(id).value()
    }

    /// Sum of the card values. Jokers never contribute, whatever their wild rank.
    pub fn sum(&self, ids: &[CardId]) -> u32 {
        ids.iter().map(|&id| self.value(id)).sum()
    }
}
