pub use arena::*;
pub use cards::*;
pub use deck::*;
pub use errors::*;
pub use events::*;
pub use game::*;
pub use hand::*;
pub use leaderboard::*;
pub use melds::*;
pub use score::*;
pub use strategy::*;
pub use table::*;
pub use visualization::*;

mod arena;
#[cfg(test)]
mod arbitrary;
mod cards;
mod deck;
mod errors;
mod events;
mod game;
mod hand;
mod leaderboard;
mod melds;
mod score;
mod strategy;
mod table;
mod visualization;
