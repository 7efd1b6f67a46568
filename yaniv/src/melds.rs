use std::cmp::Reverse;

use crate::{CardId, Cards, Rank};

/// A run found by [`detect_run()`], together with the ranks its jokers stand in for.
///
/// Detection never touches the arena. The wild ranks only become visible to
/// the rest of the game when the engine lays the run on the table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Run {
    cards: Vec<CardId>,
    wild_ranks: Vec<(CardId, Rank)>,
}

impl Run {
    /// The cards of the run, in the order the detection pass added them.
    pub fn cards(&self) -> &[CardId] {
        &self.cards
    }

    pub fn into_cards(self) -> Vec<CardId> {
        self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains(&id)
    }

    /// The rank a joker of this run stands in for.
    pub fn wild_rank(&self, id: CardId) -> Option<Rank> {
        self.wild_ranks
            .iter()
            .find(|(joker, _)| *joker == id)
            .map(|&(_, rank)| rank)
    }

    /// The rank of a run member, with jokers at their assigned place.
    pub fn rank_in_run(&self, cards: &Cards, id: CardId) -> Rank {
        self.wild_rank(id).unwrap_or_else(|| cards.rank(id))
    }

    pub fn value(&self, cards: &Cards) -> u32 {
        cards.sum(&self.cards)
    }

    fn push_wild(&mut self, joker: CardId, rank: Rank) {
        self.cards.push(joker);
        self.wild_ranks.push((joker, rank));
    }
}

/// Finds a same-suit run of at least three cards among `candidates`.
///
/// Jokers among the candidates are the wildcards; everything else must share
/// a suit or no run is found. The naturals are walked once from the highest
/// rank down. Each adjacent pair either continues the run (ranks one apart),
/// fills its gap with exactly all unused wildcards, or is skipped. There is no
/// backtracking, so this is not a longest-run search: a filled gap ends the
/// run, and a skipped pair cannot start a second one. A two-card run is
/// stretched by one wildcard, upwards unless that passes the King.
pub fn detect_run(cards: &Cards, candidates: &[CardId]) -> Run {
    let (wildcards, mut naturals): (Vec<CardId>, Vec<CardId>) =
        candidates.iter().partition(|&&id| cards.is_joker(id));

    if let Some(&first) = naturals.first() {
        let suit = cards.card(first).suit;
        if naturals.iter().any(|&id| cards.card(id).suit != suit) {
            return Run::default();
        }
    }
    naturals.sort_by_key(|&id| Reverse(cards.card(id).rank));

    let mut run = Run::default();
    let mut unused = wildcards.into_iter();
    // Rank of the card the run currently ends on; a pair must start there.
    let mut last: Option<u8> = None;
    for pair in naturals.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let high = cards.card(a).rank.index();
        let low = cards.card(b).rank.index();
        if last.is_some_and(|l| l != high) {
            continue;
        }
        let gap = i16::from(high) - i16::from(low);
        if gap == 1 {
            if last != Some(high) {
                run.cards.push(a);
            }
            run.cards.push(b);
            last = Some(low);
        } else if gap == unused.len() as i16 + 1 {
            if last != Some(high) {
                run.cards.push(a);
            }
            for rank in (low + 1..high).rev() {
                if let (Some(joker), Some(rank)) = (unused.next(), Rank::from_index(rank)) {
                    run.push_wild(joker, rank);
                }
            }
            run.cards.push(b);
            // Left one above `b`, so nothing chains after a filled gap.
            last = Some(low + 1);
        }
    }

    if run.len() == 2 {
        if let Some(joker) = unused.next() {
            let high = cards.card(run.cards[0]).rank.index();
            let low = cards.card(run.cards[1]).rank.index();
            let rank = if high < Rank::MAX_INDEX { high + 1 } else { low - 1 };
            if let Some(rank) = Rank::from_index(rank) {
                run.push_wild(joker, rank);
            }
        }
    }

    if run.len() < 3 {
        return Run::default();
    }
    run
}

/// What kind of legal discard a selection is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Meld {
    Single,
    Set,
    Run(Run),
}

impl Meld {
    /// The rank a card is laid at: jokers of a run sit in the gap they fill.
    pub fn rank_of(&self, cards: &Cards, id: CardId) -> Rank {
        match self {
            Meld::Run(run) => run.rank_in_run(cards, id),
            Meld::Single | Meld::Set => cards.rank(id),
        }
    }
}

/// Classifies a selection, or returns `None` if it may not be discarded.
///
/// Two or more cards are legal when they either all share one rank or
/// contain a run of at least three, but not both. A joker has no rank of its
/// own, so it never makes a selection same-rank. A run is laid with the rest
/// of the selection, the stray cards at their own rank.
pub fn classify_discard(cards: &Cards, selection: &[CardId]) -> Option<Meld> {
    match selection {
        [] => None,
        [_] => Some(Meld::Single),
        [first, rest @ ..] => {
            let run = detect_run(cards, selection);
            let is_run = run.len() >= 3;
            let same_rank = !cards.is_joker(*first)
                && rest
                    .iter()
                    .all(|&id| !cards.is_joker(id) && cards.rank(id) == cards.rank(*first));
            match (same_rank, is_run) {
                (true, false) => Some(Meld::Set),
                (false, true) => Some(Meld::Run(run)),
                _ => None,
            }
        }
    }
}

pub fn is_legal_discard(cards: &Cards, selection: &[CardId]) -> bool {
    classify_discard(cards, selection).is_some()
}
