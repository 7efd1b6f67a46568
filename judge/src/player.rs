use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use yaniv::{Decision, HeuristicStrategy, Source, Strategy, TurnView, DECLARE_LIMIT};

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum PlayerKind {
    Heuristic,
    Random,
}

/// A seat at the table.
pub struct Player {
    pub name: String,
    pub kind: PlayerKind,
    pub strategy: Box<dyn Strategy>,
}

impl Player {
    pub fn new(name: &str, kind: PlayerKind, seed: u64) -> Self {
        let strategy: Box<dyn Strategy> = match kind {
            PlayerKind::Heuristic => Box::new(HeuristicStrategy),
            PlayerKind::Random => Box::new(RandomStrategy::new(seed)),
        };
        Self {
            name: String::from(name),
            kind,
            strategy,
        }
    }
}

/// Declares whenever it may, otherwise takes from a random source and throws
/// a random single card. A baseline for the heuristic to beat.
pub struct RandomStrategy {
    rng: StdRng,
}

impl RandomStrategy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Strategy for RandomStrategy {
    fn decide(&mut self, view: &TurnView<'_>) -> Decision {
        if view.hand.sum(view.cards) <= DECLARE_LIMIT {
            return Decision::DeclareEnd;
        }
        let mut sources = vec![Source::Deck];
        sources.extend(view.table.ends().into_iter().map(|(source, _)| source));
        let source = *sources.choose(&mut self.rng).unwrap_or(&Source::Deck);
        let discard = view
            .hand
            .ids()
            .choose(&mut self.rng)
            .copied()
            .into_iter()
            .collect();
        Decision::Play { source, discard }
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;
    use yaniv::{Game, GameConfig, TurnOutcome};

    use super::*;

    #[test]
    fn random_strategy_plays_legal_turns() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            let mut game = Game::new(GameConfig::default(), StdRng::seed_from_u64(rng.gen()));
            game.start_round().unwrap();
            let mut strategy = RandomStrategy::new(rng.gen());
            for _ in 0..200 {
                match game.play_computer_turn(&mut strategy) {
                    Ok(TurnOutcome::Played) => {}
                    Ok(_) => break,
                    Err(err) => panic!("random strategy broke a rule: {}", err),
                }
            }
        }
    }
}
