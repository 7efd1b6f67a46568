use std::collections::BTreeSet;

use quickcheck::Arbitrary;

use crate::{Card, Rank, Suit, NUM_IDENTIFIERS};

impl Arbitrary for Suit {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        *g.choose(&Suit::NATURAL).unwrap()
    }
}

impl Arbitrary for Rank {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        *g.choose(&Rank::ALL).unwrap()
    }
}

// Goes through the identifier so jokers only come with their two valid ranks
impl Arbitrary for Card {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        Card::from_identifier(u8::arbitrary(g) % NUM_IDENTIFIERS)
    }
}

/// Between one and six distinct cards, as a player might select them.
///
/// Half of the selections stick to one suit plus jokers, which is where runs
/// come from.
#[derive(Clone, Debug)]
pub struct Selection(pub Vec<Card>);

impl Arbitrary for Selection {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let len = 1 + usize::from(u8::arbitrary(g) % 6);
        let one_suit = bool::arbitrary(g).then(|| Suit::arbitrary(g));
        let mut seen = BTreeSet::new();
        let mut cards = Vec::with_capacity(len);
        while cards.len() < len {
            let card = match one_suit {
                Some(suit) if u8::arbitrary(g) % 4 != 0 => Card::new(suit, Rank::arbitrary(g)),
                Some(_) => Card::from_identifier(52 + u8::arbitrary(g) % 2),
                None => Card::arbitrary(g),
            };
            if seen.insert(card.identifier()) {
                cards.push(card);
            }
        }
        Selection(cards)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let cards = self.0.clone();
        let removable = if cards.len() > 1 { cards.len() } else { 0 };
        Box::new((0..removable).map(move |skip| {
            let mut fewer = cards.clone();
            fewer.remove(skip);
            Selection(fewer)
        }))
    }
}
