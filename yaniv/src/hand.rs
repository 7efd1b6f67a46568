use crate::{CardId, Cards, Rank, Suit};

/// The cards owned by one player.
///
/// Besides the plain list (in the order the cards arrived), cards are kept in
/// one bucket per suit plus a joker bucket, which is what run detection walks.
/// `picked` is the selection pending discard, sorted by ascending rank. A card
/// is picked exactly when it is in that list.
#[derive(Clone, Debug, Default)]
pub struct Hand {
    cards: Vec<CardId>,
    buckets: [Vec<CardId>; Suit::NUM_BUCKETS],
    picked: Vec<CardId>,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, cards: &Cards, id: CardId) {
        self.cards.push(id);
        self.buckets[cards.card(id).suit.bucket()].push(id);
    }

    /// Removes a card from the hand, its bucket and the picked selection.
    /// Returns whether the card was owned.
    pub fn remove(&mut self, id: CardId) -> bool {
        let Some(pos) = self.cards.iter().position(|&c| c == id) else {
            return false;
        };
        self.cards.remove(pos);
        for bucket in self.buckets.iter_mut() {
            bucket.retain(|&c| c != id);
        }
        self.picked.retain(|&c| c != id);
        true
    }

    pub fn clear(&mut self) {
        self.cards.clear();
        for bucket in self.buckets.iter_mut() {
            bucket.clear();
        }
        self.picked.clear();
    }

    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains(&id)
    }

    pub fn ids(&self) -> &[CardId] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn bucket(&self, suit: Suit) -> &[CardId] {
        &self.buckets[suit.bucket()]
    }

    pub fn jokers(&self) -> &[CardId] {
        self.bucket(Suit::Joker)
    }

    /// The hand sum used for declaring and scoring. Jokers count zero.
    pub fn sum(&self, cards: &Cards) -> u32 {
        cards.sum(&self.cards)
    }

    /// Orders the hand by ascending rank, as after a deal.
    pub fn sort_by_rank(&mut self, cards: &Cards) {
        self.cards.sort_by_key(|&id| cards.rank(id));
    }

    pub fn picked(&self) -> &[CardId] {
        &self.picked
    }

    pub fn is_picked(&self, id: CardId) -> bool {
        self.picked.contains(&id)
    }

    /// Flips whether a card is selected for discard.
    ///
    /// Picking a joker gives it the wild rank right above the highest picked
    /// card (Ace if nothing is picked yet), so that a joker added to the end of
    /// a selected run sorts where it will be played. Unpicking clears it again.
    ///
    /// Returns the new picked state, or `None` if the card is not in the hand.
    pub fn toggle_pick(&mut self, cards: &mut Cards, id: CardId) -> Option<bool> {
        if !self.contains(id) {
            return None;
        }
        if let Some(pos) = self.picked.iter().position(|&c| c == id) {
            self.picked.remove(pos);
            cards.set_wild_rank(id, None);
            return Some(false);
        }
        if cards.is_joker(id) {
            let wild_rank = match self.picked.last() {
                Some(&top) => Rank::from_index(cards.rank(top).index() + 1).unwrap_or(Rank::King),
                None => Rank::Ace,
            };
            cards.set_wild_rank(id, Some(wild_rank));
        }
        self.insert_picked(cards, id);
        Some(true)
    }

    /// Replaces the selection. Cards that are not in the hand are skipped.
    /// Jokers that drop out of the selection lose their wild rank.
    pub fn set_picked(&mut self, cards: &mut Cards, ids: &[CardId]) {
        for &id in &self.picked {
            if !ids.contains(&id) {
                cards.set_wild_rank(id, None);
            }
        }
        self.picked.clear();
        for &id in ids {
            if self.contains(id) && !self.is_picked(id) {
                self.insert_picked(cards, id);
            }
        }
    }

    /// Removes the picked cards from the hand and returns them in ascending
    /// rank order. Their wild ranks are cleared on the way out.
    pub fn take_picked(&mut self, cards: &mut Cards) -> Vec<CardId> {
        let picked = std::mem::take(&mut self.picked);
        for &id in &picked {
            self.remove(id);
            cards.set_wild_rank(id, None);
        }
        picked
    }

    fn insert_picked(&mut self, cards: &Cards, id: CardId) {
        let rank = cards.rank(id);
        let pos = self.picked.partition_point(|&c| cards.rank(c) <= rank);
        self.picked.insert(pos, id);
    }
}
