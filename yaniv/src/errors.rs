use crate::{CardId, DECLARE_LIMIT};

/// Why the engine rejected an action.
///
/// Every variant is a plain rejection: the game state is exactly what it was
/// before the call, and the same player is still to move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RuleError {
    NotYourTurn { player: usize, active: usize },
    IllegalMeld,
    TableEmpty,
    InvalidSource { index: usize },
    DeclareNotEligible { hand_sum: u32 },
    AlreadyAcquired,
    NothingAcquired,
    CardNotInHand { card: CardId },
    RoundNotInProgress,
    RoundInProgress,
    GameOver,
}

impl std::error::Error for RuleError {}

impl std::fmt::Display for RuleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuleError::NotYourTurn { player, active } => write!(
                f,
                "Player {} tried to act, but it is player {}'s turn",
                player, active
            ),
            RuleError::IllegalMeld => write!(
                f,
                "The selected cards are neither a single card, a set of equal rank, nor a run"
            ),
            RuleError::TableEmpty => {
                write!(f, "There is no card at that end of the table row")
            }
            RuleError::InvalidSource { index } => write!(
                f,
                "Table card {} cannot be taken, only the two ends of the row can",
                index
            ),
            RuleError::DeclareNotEligible { hand_sum } => write!(
                f,
                "Cannot declare with a hand sum of {}, at most {} is needed",
                hand_sum, DECLARE_LIMIT
            ),
            RuleError::AlreadyAcquired => {
                write!(f, "A card was already taken this turn")
            }
            RuleError::NothingAcquired => {
                write!(f, "A card must be taken before discarding")
            }
            RuleError::CardNotInHand { card } => write!(
                f,
                "Tried to discard card {:?}, which is not (or not only once) in the player's hand",
                card
            ),
            RuleError::RoundNotInProgress => write!(f, "No round is being played"),
            RuleError::RoundInProgress => write!(f, "The current round has not ended yet"),
            RuleError::GameOver => write!(f, "The game is over"),
        }
    }
}
