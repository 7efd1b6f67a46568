use serde::{Deserialize, Serialize};

use crate::{CardId, RuleError};

/// Where a player takes their card from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    Deck,
    /// The first card of the table row.
    TableLeft,
    /// The last card of the table row. Only distinct from the left end when
    /// the row has at least two cards.
    TableRight,
}

/// The row of cards discarded by the previous player.
///
/// Only the two ends can be taken. Each discard replaces the whole row.
#[derive(Clone, Debug, Default)]
pub struct TableRow {
    cards: Vec<CardId>,
}

impl TableRow {
    pub fn new(first: CardId) -> Self {
        Self { cards: vec![first] }
    }

    pub fn cards(&self) -> &[CardId] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The card that taking from `source` would give, if there is one.
    pub fn end(&self, source: Source) -> Option<CardId> {
        match source {
            Source::Deck => None,
            Source::TableLeft => self.cards.first().copied(),
            Source::TableRight if self.cards.len() >= 2 => self.cards.last().copied(),
            Source::TableRight => None,
        }
    }

    /// The takeable cards, left end first.
    pub fn ends(&self) -> Vec<(Source, CardId)> {
        [Source::TableLeft, Source::TableRight]
            .into_iter()
            .filter_map(|source| self.end(source).map(|id| (source, id)))
            .collect()
    }

    /// Maps a position in the row (e.g. the card that was clicked) to a source.
    pub fn source_at(&self, index: usize) -> Result<Source, RuleError> {
        if index == 0 && !self.cards.is_empty() {
            Ok(Source::TableLeft)
        } else if self.cards.len() >= 2 && index == self.cards.len() - 1 {
            Ok(Source::TableRight)
        } else {
            Err(RuleError::InvalidSource { index })
        }
    }

    /// Removes and returns the card at one end.
    pub fn take(&mut self, source: Source) -> Result<CardId, RuleError> {
        let id = self.end(source).ok_or(RuleError::TableEmpty)?;
        match source {
            Source::TableLeft => {
                self.cards.remove(0);
            }
            _ => {
                self.cards.pop();
            }
        }
        Ok(id)
    }

    /// Replaces the row with a freshly discarded meld, already in table order.
    pub fn lay(&mut self, meld: Vec<CardId>) {
        self.cards = meld;
    }

    /// Each card with its slot relative to the anchor: the middle card
    /// (index `len / 2`) sits at 0, the others fan out one slot per card.
    pub fn fan_offsets(&self) -> impl Iterator<Item = (CardId, i32)> + '_ {
        let middle = (self.cards.len() / 2) as i32;
        self.cards
            .iter()
            .enumerate()
            .map(move |(i, &id)| (id, i as i32 - middle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{card, Cards};

    fn row(n: usize) -> (TableRow, Vec<CardId>) {
        let mut cards = Cards::new();
        let ids: Vec<CardId> = (0..n).map(|_| cards.alloc(card!("2♦"))).collect();
        let mut table = TableRow::default();
        table.lay(ids.clone());
        (table, ids)
    }

    #[test]
    fn single_card_has_only_a_left_end() {
        let (table, ids) = row(1);
        assert_eq!(table.ends(), vec![(Source::TableLeft, ids[0])]);
        assert_eq!(table.end(Source::TableRight), None);
        assert_eq!(table.source_at(0), Ok(Source::TableLeft));
    }

    #[test]
    fn interior_cards_are_frozen() {
        let (table, _) = row(3);
        assert_eq!(table.source_at(0), Ok(Source::TableLeft));
        assert_eq!(table.source_at(1), Err(RuleError::InvalidSource { index: 1 }));
        assert_eq!(table.source_at(2), Ok(Source::TableRight));
        assert_eq!(table.source_at(7), Err(RuleError::InvalidSource { index: 7 }));
    }

    #[test]
    fn taking_from_an_exhausted_end() {
        let (mut table, ids) = row(2);
        assert_eq!(table.take(Source::TableRight), Ok(ids[1]));
        assert_eq!(table.take(Source::TableRight), Err(RuleError::TableEmpty));
        assert_eq!(table.take(Source::TableLeft), Ok(ids[0]));
        assert_eq!(table.take(Source::TableLeft), Err(RuleError::TableEmpty));
        assert_eq!(table.take(Source::Deck), Err(RuleError::TableEmpty));
    }

    #[test]
    fn fan_is_centred() {
        let (table, _) = row(4);
        let offsets: Vec<i32> = table.fan_offsets().map(|(_, o)| o).collect();
        assert_eq!(offsets, vec![-2, -1, 0, 1]);
        let (table, _) = row(3);
        let offsets: Vec<i32> = table.fan_offsets().map(|(_, o)| o).collect();
        assert_eq!(offsets, vec![-1, 0, 1]);
    }
}
