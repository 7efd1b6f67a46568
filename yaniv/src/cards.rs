use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Number of distinct card identifiers: 52 naturals plus two jokers.
pub const NUM_IDENTIFIERS: u8 = 54;

/// The identity of a playing card.
///
/// Jokers carry a rank too (Ace for the first joker, Two for the second), but
/// it only serves as a tie-breaker for ordering. The rank a joker takes inside
/// a meld is tracked separately, see [`Cards::rank()`](crate::Cards::rank).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

/// The suit of a [card](Card).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Suit {
    #[serde(rename = "♣")]
    Clubs,
    #[serde(rename = "♦")]
    Diamonds,
    #[serde(rename = "♥")]
    Hearts,
    #[serde(rename = "♠")]
    Spades,
    #[serde(rename = "🃏")]
    Joker,
}

/// The rank of a [card](Card), from Ace (index 0) to King (index 12).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Rank {
    #[serde(rename = "A")]
    Ace,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "4")]
    Four,
    #[serde(rename = "5")]
    Five,
    #[serde(rename = "6")]
    Six,
    #[serde(rename = "7")]
    Seven,
    #[serde(rename = "8")]
    Eight,
    #[serde(rename = "9")]
    Nine,
    #[serde(rename = "10")]
    Ten,
    #[serde(rename = "J")]
    Jack,
    #[serde(rename = "Q")]
    Queen,
    #[serde(rename = "K")]
    King,
}

impl Suit {
    /// The four suits that form runs, in bucket order.
    pub const NATURAL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    /// Number of hand buckets, one per suit plus one for jokers.
    pub const NUM_BUCKETS: usize = 5;

    /// Which hand bucket cards of this suit are kept in.
    pub fn bucket(self) -> usize {
        match self {
            Suit::Clubs => 0,
            Suit::Diamonds => 1,
            Suit::Hearts => 2,
            Suit::Spades => 3,
            Suit::Joker => 4,
        }
    }
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    pub const MAX_INDEX: u8 = 12;

    pub fn index(self) -> u8 {
        self as u8
    }

    /// The rank with the given index, if it is at most [`Rank::MAX_INDEX`].
    pub fn from_index(index: u8) -> Option<Rank> {
        Self::ALL.get(index as usize).copied()
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.unicode_char())
    }
}

impl Card {
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Self { suit, rank }
    }

    /// Decodes a deck identifier: `suit = id / 13`, `rank = id % 13`.
    ///
    /// Identifiers 52 and 53 are the two jokers. Anything above 53 is also
    /// decoded as a joker.
    pub fn from_identifier(id: u8) -> Self {
        let suit = match id / 13 {
            0 => Suit::Clubs,
            1 => Suit::Diamonds,
            2 => Suit::Hearts,
            3 => Suit::Spades,
            _ => Suit::Joker,
        };
        Self {
            suit,
            rank: Rank::ALL[(id % 13) as usize],
        }
    }

    pub fn identifier(self) -> u8 {
        self.suit as u8 * 13 + self.rank.index()
    }

    pub fn is_joker(self) -> bool {
        self.suit == Suit::Joker
    }

    /// Points this card adds to a hand sum.
    ///
    /// Ace through Jack count their index plus one (so a Jack is 11), Queen
    /// and King count 10, jokers count nothing.
    pub fn value(self) -> u32 {
        if self.is_joker() {
            return 0;
        }
        match self.rank.index() {
            idx if idx < 11 => u32::from(idx) + 1,
            _ => 10,
        }
    }

    /// Render this card as a Unicode playing cards character
    pub fn unicode_char(&self) -> char {
        // https://en.wikipedia.org/wiki/Playing_Cards_(Unicode_block)
        let (row, col) = match self.suit {
            Suit::Spades => (0, self.rank_column()),
            Suit::Hearts => (1, self.rank_column()),
            Suit::Diamonds => (2, self.rank_column()),
            Suit::Clubs => (3, self.rank_column()),
            // Black joker and white joker
            Suit::Joker => (2 + u32::from(self.rank.index() % 2), 15),
        };
        let codepoint = 0x1F0A0 + 16 * row + col;
        char::from_u32(codepoint).unwrap_or('?')
    }

    fn rank_column(&self) -> u32 {
        match self.rank {
            Rank::Ace => 1,
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten => 10,
            Rank::Jack => 11,
            // 12 is the knight
            Rank::Queen => 13,
            Rank::King => 14,
        }
    }
}

/// The error type for the [`FromStr`] instance of [`Card`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardFromStrErr {
    Empty,
    LessThanTwoChars,
    MoreThanTwoChars,
    InvalidRank,
    InvalidSuit,
}

impl std::fmt::Display for CardFromStrErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CardFromStrErr::Empty => write!(f, "Empty card code"),
            CardFromStrErr::LessThanTwoChars => write!(f, "Card code is missing its suit"),
            CardFromStrErr::MoreThanTwoChars => write!(f, "Card code is too long"),
            CardFromStrErr::InvalidRank => write!(f, "Unknown rank character"),
            CardFromStrErr::InvalidSuit => write!(f, "Unknown suit character"),
        }
    }
}

impl std::error::Error for CardFromStrErr {}

impl FromStr for Card {
    type Err = CardFromStrErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let rank_char = chars.next().ok_or(CardFromStrErr::Empty)?;
        let joker_rank = match rank_char {
            '🃏' => Some(Rank::Ace),
            '🃟' => Some(Rank::Two),
            _ => None,
        };
        if let Some(rank) = joker_rank {
            if chars.next().is_some() {
                return Err(CardFromStrErr::MoreThanTwoChars);
            }
            return Ok(Card::new(Suit::Joker, rank));
        }
        let suit_char = chars.next().ok_or(CardFromStrErr::LessThanTwoChars)?;
        if chars.next().is_some() {
            return Err(CardFromStrErr::MoreThanTwoChars);
        }
        let rank = match rank_char {
            'A' => Rank::Ace,
            '2' => Rank::Two,
            '3' => Rank::Three,
            '4' => Rank::Four,
            '5' => Rank::Five,
            '6' => Rank::Six,
            '7' => Rank::Seven,
            '8' => Rank::Eight,
            '9' => Rank::Nine,
            'T' => Rank::Ten,
            'J' => Rank::Jack,
            'Q' => Rank::Queen,
            'K' => Rank::King,
            _ => return Err(CardFromStrErr::InvalidRank),
        };
        let suit = match suit_char {
            '♣' => Suit::Clubs,
            '♦' => Suit::Diamonds,
            '♥' => Suit::Hearts,
            '♠' => Suit::Spades,
            _ => return Err(CardFromStrErr::InvalidSuit),
        };
        Ok(Card { suit, rank })
    }
}

/// Shorthand for creating cards from a short string.
///
/// The first character is the [rank](Rank) (note: 10 is `T`), the second is
/// the [suit](Suit) as a unicode character (♣, ♦, ♥, or ♠). The two jokers
/// are written as a single character, `🃏` and `🃟`.
///
/// This macro is just calling the [`FromStr`] instance of [`Card`].
/// ```
/// # use yaniv::{card, Card, Rank, Suit};
/// assert_eq!(
///     card!("T♥"),
///     Card { rank: Rank::Ten, suit: Suit::Hearts }
/// );
/// assert!(card!("🃏").is_joker());
/// ```
#[macro_export]
macro_rules! card {
    ($rs:literal) => {
        <$crate::Card as std::str::FromStr>::from_str($rs)
            .expect("Invalid card code given to card! macro")
    };
}
// The import is for using the macro in other modules, see https://stackoverflow.com/a/31749071/1726797
#[allow(unused_imports)]
pub(crate) use card;
