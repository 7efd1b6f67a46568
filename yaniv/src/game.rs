use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::{
    classify_discard, settle_score, visualize_cards, visualize_table, CardId, Cards, Decision,
    Deck, Event, EventBus, Hand, Meld, RuleError, Source, Strategy, TableRow,
};

pub const NUM_PLAYERS: usize = 3;
pub const HAND_SIZE: usize = 7;
/// Highest hand sum that may declare the end of a round.
pub const DECLARE_LIMIT: u32 = 7;

/// Settings for one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// How many rounds are played before the game ends. Zero is treated as one.
    pub rounds: u32,
    pub player_names: [String; NUM_PLAYERS],
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rounds: 1,
            player_names: [
                String::from("South"),
                String::from("West"),
                String::from("East"),
            ],
        }
    }
}

/// How a round ended.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundOutcome {
    /// Who declared.
    pub caller: usize,
    pub winner: usize,
    /// Whether another player held a strictly lower hand than the caller.
    pub assaf: bool,
    pub hand_sums: [u32; NUM_PLAYERS],
    /// Cumulative scores after this round was settled.
    pub scores: [u32; NUM_PLAYERS],
}

impl RoundOutcome {
    pub fn penalized(&self) -> Option<usize> {
        self.assaf.then_some(self.caller)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Dealing,
    AwaitingTurn { player: usize },
    Resolved(RoundOutcome),
    GameOver(RoundOutcome),
}

/// Summarizes the outcome of a completed action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    Played,
    RoundResolved(RoundOutcome),
    GameOver(RoundOutcome),
}

/// Everything a strategy may look at when deciding a turn.
#[derive(Clone, Copy, Debug)]
pub struct TurnView<'a> {
    pub player: usize,
    pub cards: &'a Cards,
    pub hand: &'a Hand,
    pub table: &'a TableRow,
    pub scores: [u32; NUM_PLAYERS],
    pub hand_sizes: [usize; NUM_PLAYERS],
}

/// The round engine: owns the deck, the table row and every hand, and is the
/// only thing that changes them.
///
/// Every public action either completes or returns a [`RuleError`] without
/// having changed anything.
pub struct Game {
    config: GameConfig,
    rng: StdRng,
    cards: Cards,
    deck: Deck,
    table: TableRow,
    hands: [Hand; NUM_PLAYERS],
    scores: [u32; NUM_PLAYERS],
    turn: usize,
    rounds_left: u32,
    phase: Phase,
    /// The card taken this turn. It joins the hand once the discard is done.
    pending: Option<CardId>,
    events: EventBus,
}

impl Game {
    /// A new game with all scores at zero. Call [`Self::start_round()`] to deal.
    pub fn new(config: GameConfig, rng: StdRng) -> Self {
        let rounds_left = config.rounds.max(1);
        Self {
            config,
            rng,
            cards: Cards::new(),
            deck: Deck::new(),
            table: TableRow::default(),
            hands: Default::default(),
            scores: [0; NUM_PLAYERS],
            turn: 0,
            rounds_left,
            phase: Phase::Dealing,
            pending: None,
            events: EventBus::default(),
        }
    }

    /// Shuffles a fresh deck, turns up the first table card and deals every
    /// player a sorted hand. The previous round's winner moves first.
    pub fn start_round(&mut self) -> Result<(), RuleError> {
        match self.phase {
            Phase::Dealing | Phase::Resolved(_) => {}
            Phase::AwaitingTurn { .. } => return Err(RuleError::RoundInProgress),
            Phase::GameOver(_) => return Err(RuleError::GameOver),
        }

        self.deck = Deck::new();
        self.cards.clear();
        self.pending = None;
        let first = self.deck.draw(&mut self.rng);
        self.table = TableRow::new(self.cards.alloc(first));
        for hand in self.hands.iter_mut() {
            hand.clear();
            for _ in 0..HAND_SIZE {
                let card = self.deck.draw(&mut self.rng);
                let id = self.cards.alloc(card);
                hand.insert(&self.cards, id);
            }
            hand.sort_by_rank(&self.cards);
        }

        let player = self.active_seat();
        debug!(
            player,
            rounds_left = self.rounds_left,
            table = %visualize_table(&self.cards, &self.table),
            "Dealt a new round"
        );
        self.phase = Phase::AwaitingTurn { player };
        Ok(())
    }

    /// Takes a card from `source` for the active player.
    ///
    /// The card is held apart until the discard completes, so it can never be
    /// thrown in the same turn.
    pub fn acquire(&mut self, player: usize, source: Source) -> Result<CardId, RuleError> {
        self.check_turn(player)?;
        if self.pending.is_some() {
            return Err(RuleError::AlreadyAcquired);
        }
        let id = match source {
            Source::Deck => {
                let card = self.deck.draw(&mut self.rng);
                self.cards.alloc(card)
            }
            _ => self.table.take(source)?,
        };
        self.pending = Some(id);
        self.events.push(Event::CardAcquired { player, source });
        trace!(player, ?source, card = %self.cards.card(id), "Acquired");
        Ok(id)
    }

    /// Discards `selection` after a card was acquired, and passes the turn.
    pub fn discard(
        &mut self,
        player: usize,
        selection: &[CardId],
    ) -> Result<TurnOutcome, RuleError> {
        self.check_turn(player)?;
        let pending = self.pending.ok_or(RuleError::NothingAcquired)?;
        let meld = self.validate_selection(player, selection)?;
        Ok(self.finish_turn(player, selection, &meld, pending))
    }

    /// Discards whatever the player has picked.
    pub fn discard_picked(&mut self, player: usize) -> Result<TurnOutcome, RuleError> {
        let picked = self.picked(player).map(<[CardId]>::to_vec);
        self.discard(player, &picked.unwrap_or_default())
    }

    /// Acquires from `source` and discards `selection` as a single step.
    ///
    /// Both halves are validated before anything moves.
    pub fn play_turn(
        &mut self,
        player: usize,
        source: Source,
        selection: &[CardId],
    ) -> Result<TurnOutcome, RuleError> {
        self.check_turn(player)?;
        if self.pending.is_some() {
            return Err(RuleError::AlreadyAcquired);
        }
        if source != Source::Deck && self.table.end(source).is_none() {
            return Err(RuleError::TableEmpty);
        }
        let meld = self.validate_selection(player, selection)?;
        let pending = self.acquire(player, source)?;
        Ok(self.finish_turn(player, selection, &meld, pending))
    }

    /// Ends the round on behalf of the active player, whose hand sum must be
    /// at most [`DECLARE_LIMIT`]. Must happen before taking a card.
    pub fn declare_end(&mut self, player: usize) -> Result<TurnOutcome, RuleError> {
        self.check_turn(player)?;
        if self.pending.is_some() {
            return Err(RuleError::AlreadyAcquired);
        }
        let hand_sum = self.hands[player].sum(&self.cards);
        if hand_sum > DECLARE_LIMIT {
            return Err(RuleError::DeclareNotEligible { hand_sum });
        }
        self.events.push(Event::RoundDeclared { player });
        Ok(self.resolve(player))
    }

    /// Lets `strategy` play the active player's turn.
    pub fn play_computer_turn(
        &mut self,
        strategy: &mut dyn Strategy,
    ) -> Result<TurnOutcome, RuleError> {
        let player = self.current_player()?;
        if self.pending.is_some() {
            return Err(RuleError::AlreadyAcquired);
        }
        let view = self.view(player).ok_or(RuleError::RoundNotInProgress)?;
        match strategy.decide(&view) {
            Decision::DeclareEnd => self.declare_end(player),
            Decision::Play { source, discard } => self.play_turn(player, source, &discard),
        }
    }

    /// Selects or deselects a card of the active player for discarding.
    pub fn toggle_pick(&mut self, player: usize, card: CardId) -> Result<bool, RuleError> {
        self.check_turn(player)?;
        self.hands[player]
            .toggle_pick(&mut self.cards, card)
            .ok_or(RuleError::CardNotInHand { card })
    }

    /// What `player` may see, or `None` if there is no such seat.
    pub fn view(&self, player: usize) -> Option<TurnView<'_>> {
        Some(TurnView {
            player,
            cards: &self.cards,
            hand: self.hands.get(player)?,
            table: &self.table,
            scores: self.scores,
            hand_sizes: std::array::from_fn(|p| self.hands[p].len()),
        })
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The player to move, if a round is being played.
    pub fn active_player(&self) -> Option<usize> {
        match self.phase {
            Phase::AwaitingTurn { player } => Some(player),
            _ => None,
        }
    }

    pub fn cards(&self) -> &Cards {
        &self.cards
    }

    pub fn hand(&self, player: usize) -> Option<&Hand> {
        self.hands.get(player)
    }

    pub fn hand_sum(&self, player: usize) -> Option<u32> {
        self.hand(player).map(|hand| hand.sum(&self.cards))
    }

    pub fn picked(&self, player: usize) -> Option<&[CardId]> {
        self.hand(player).map(Hand::picked)
    }

    pub fn table(&self) -> &TableRow {
        &self.table
    }

    pub fn scores(&self) -> [u32; NUM_PLAYERS] {
        self.scores
    }

    pub fn rounds_left(&self) -> u32 {
        self.rounds_left
    }

    pub fn pending(&self) -> Option<CardId> {
        self.pending
    }

    pub fn deck_remaining(&self) -> usize {
        self.deck.remaining()
    }

    /// The result of the round that just ended, while it is on display.
    pub fn last_outcome(&self) -> Option<&RoundOutcome> {
        match &self.phase {
            Phase::Resolved(outcome) | Phase::GameOver(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn drain_events(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.events.drain()
    }

    fn active_seat(&self) -> usize {
        self.turn % NUM_PLAYERS
    }

    fn current_player(&self) -> Result<usize, RuleError> {
        match self.phase {
            Phase::AwaitingTurn { player } => Ok(player),
            Phase::GameOver(_) => Err(RuleError::GameOver),
            _ => Err(RuleError::RoundNotInProgress),
        }
    }

    fn check_turn(&self, player: usize) -> Result<(), RuleError> {
        let active = self.current_player()?;
        if player != active {
            return Err(RuleError::NotYourTurn { player, active });
        }
        Ok(())
    }

    fn validate_selection(&self, player: usize, selection: &[CardId]) -> Result<Meld, RuleError> {
        let hand = &self.hands[player];
        for (i, &card) in selection.iter().enumerate() {
            if !hand.contains(card) || selection[..i].contains(&card) {
                return Err(RuleError::CardNotInHand { card });
            }
        }
        classify_discard(&self.cards, selection).ok_or(RuleError::IllegalMeld)
    }

    /// Moves a validated discard onto the table and passes the turn.
    fn finish_turn(
        &mut self,
        player: usize,
        selection: &[CardId],
        meld: &Meld,
        pending: CardId,
    ) -> TurnOutcome {
        let hand = &mut self.hands[player];
        hand.set_picked(&mut self.cards, selection);
        let mut thrown = hand.take_picked(&mut self.cards);
        thrown.sort_by_key(|&id| meld.rank_of(&self.cards, id));

        trace!(
            player,
            meld = %visualize_cards(&self.cards, &thrown),
            "Discarded"
        );
        self.events.push(Event::CardDiscarded {
            player,
            meld: thrown.iter().map(|&id| self.cards.card(id)).collect(),
        });
        self.table.lay(thrown);
        self.hands[player].insert(&self.cards, pending);
        self.pending = None;

        self.turn += 1;
        self.phase = Phase::AwaitingTurn {
            player: self.active_seat(),
        };
        TurnOutcome::Played
    }

    fn resolve(&mut self, caller: usize) -> TurnOutcome {
        let hand_sums: [u32; NUM_PLAYERS] =
            std::array::from_fn(|p| self.hands[p].sum(&self.cards));
        // The first seat holding the minimum
        let (low_seat, low_sum) = hand_sums
            .iter()
            .copied()
            .enumerate()
            .min_by_key(|&(_, sum)| sum)
            .unwrap_or((caller, hand_sums[caller]));
        let assaf = low_sum < hand_sums[caller];
        let winner = if assaf { low_seat } else { caller };

        for (p, score) in self.scores.iter_mut().enumerate() {
            *score = settle_score(*score, hand_sums[p], p == caller, p == caller && assaf);
        }
        self.rounds_left = self.rounds_left.saturating_sub(1);
        self.turn = winner;

        let outcome = RoundOutcome {
            caller,
            winner,
            assaf,
            hand_sums,
            scores: self.scores,
        };
        info!(
            caller = %self.config.player_names[caller],
            winner = %self.config.player_names[winner],
            assaf,
            ?hand_sums,
            scores = ?self.scores,
            "Round resolved"
        );
        self.events.push(Event::RoundResolved {
            winner,
            penalized: outcome.penalized(),
        });

        if self.rounds_left == 0 {
            self.phase = Phase::GameOver(outcome.clone());
            TurnOutcome::GameOver(outcome)
        } else {
            self.phase = Phase::Resolved(outcome.clone());
            TurnOutcome::RoundResolved(outcome)
        }
    }

    /// A game in the middle of a round with the given hands and table row.
    #[cfg(test)]
    pub(crate) fn rigged(
        hands: [&[crate::Card]; NUM_PLAYERS],
        table: &[crate::Card],
        scores: [u32; NUM_PLAYERS],
        player: usize,
    ) -> Self {
        use rand::SeedableRng;

        let mut game = Game::new(GameConfig::default(), StdRng::seed_from_u64(7));
        for (hand, codes) in game.hands.iter_mut().zip(hands) {
            for &card in codes {
                let id = game.cards.alloc(card);
                hand.insert(&game.cards, id);
            }
        }
        let row = table.iter().map(|&card| game.cards.alloc(card)).collect();
        game.table.lay(row);
        game.scores = scores;
        game.turn = player;
        game.phase = Phase::AwaitingTurn { player };
        game
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{card, HeuristicStrategy, Rank};
    use rand::SeedableRng;

    fn ids_of(game: &Game, player: usize) -> Vec<CardId> {
        game.hand(player).unwrap().ids().to_vec()
    }

    #[test]
    fn deal_gives_seven_sorted_cards() {
        let mut game = Game::new(GameConfig::default(), StdRng::seed_from_u64(1));
        game.start_round().unwrap();
        assert_eq!(game.active_player(), Some(0));
        assert_eq!(game.table().len(), 1);
        for p in 0..NUM_PLAYERS {
            let hand = game.hand(p).unwrap();
            assert_eq!(hand.len(), HAND_SIZE);
            let ranks: Vec<Rank> = hand.ids().iter().map(|&id| game.cards().rank(id)).collect();
            assert!(ranks.windows(2).all(|w| w[0] <= w[1]));
        }
        assert_eq!(game.start_round(), Err(RuleError::RoundInProgress));
    }

    #[test]
    fn turn_passes_after_discard() {
        let mut game = Game::rigged(
            [
                &[card!("K♠"), card!("2♥")],
                &[card!("9♣")],
                &[card!("9♦")],
            ],
            &[card!("A♦")],
            [0; 3],
            0,
        );
        let king = ids_of(&game, 0)[0];

        assert_eq!(
            game.acquire(1, Source::Deck),
            Err(RuleError::NotYourTurn {
                player: 1,
                active: 0
            })
        );
        assert_eq!(game.discard(0, &[king]), Err(RuleError::NothingAcquired));

        let ace = game.acquire(0, Source::TableLeft).unwrap();
        assert_eq!(game.acquire(0, Source::Deck), Err(RuleError::AlreadyAcquired));
        assert_eq!(game.discard(0, &[ace]), Err(RuleError::CardNotInHand { card: ace }));

        assert_eq!(game.discard(0, &[king]), Ok(TurnOutcome::Played));
        assert_eq!(game.active_player(), Some(1));
        assert_eq!(game.table().cards(), &[king]);
        assert!(game.hand(0).unwrap().contains(ace));
        assert_eq!(game.hand_sum(0), Some(3));

        let events: Vec<Event> = game.drain_events().collect();
        assert_eq!(
            events,
            vec![
                Event::CardAcquired {
                    player: 0,
                    source: Source::TableLeft
                },
                Event::CardDiscarded {
                    player: 0,
                    meld: vec![card!("K♠")]
                },
            ]
        );
    }

    #[test]
    fn empty_end_changes_nothing() {
        let mut game = Game::rigged(
            [&[card!("K♠"), card!("Q♠")], &[card!("9♣")], &[card!("9♦")]],
            &[card!("5♦")],
            [0; 3],
            0,
        );
        let hand_before = ids_of(&game, 0);
        let table_before = game.table().cards().to_vec();

        assert_eq!(game.acquire(0, Source::TableRight), Err(RuleError::TableEmpty));
        assert_eq!(
            game.play_turn(0, Source::TableRight, &hand_before[..1]),
            Err(RuleError::TableEmpty)
        );
        assert_eq!(game.table().source_at(3), Err(RuleError::InvalidSource { index: 3 }));

        assert_eq!(ids_of(&game, 0), hand_before);
        assert_eq!(game.table().cards(), &table_before[..]);
        assert_eq!(game.active_player(), Some(0));
        assert_eq!(game.pending(), None);
        assert_eq!(game.drain_events().count(), 0);
    }

    #[test]
    fn illegal_meld_is_rejected_whole() {
        let mut game = Game::rigged(
            [
                &[card!("4♥"), card!("4♠"), card!("9♣"), card!("K♦")],
                &[card!("9♣")],
                &[card!("9♦")],
            ],
            &[card!("5♦"), card!("6♦")],
            [0; 3],
            0,
        );
        let ids = ids_of(&game, 0);
        assert_eq!(
            game.play_turn(0, Source::TableRight, &ids[..3]),
            Err(RuleError::IllegalMeld)
        );
        assert_eq!(game.table().len(), 2);
        assert_eq!(game.pending(), None);

        assert_eq!(
            game.play_turn(0, Source::TableRight, &ids[..2]),
            Ok(TurnOutcome::Played)
        );
        assert_eq!(game.table().len(), 2);
        assert_eq!(game.hand(0).map(Hand::len), Some(3));
    }

    #[test]
    fn run_is_laid_in_rank_order_with_joker_in_gap() {
        let mut game = Game::rigged(
            [
                &[card!("9♥"), card!("🃏"), card!("7♥"), card!("K♣")],
                &[card!("9♣")],
                &[card!("9♦")],
            ],
            &[card!("5♦")],
            [0; 3],
            0,
        );
        let ids = ids_of(&game, 0);
        game.play_turn(0, Source::Deck, &ids[..3]).unwrap();
        let laid: Vec<_> = game
            .table()
            .cards()
            .iter()
            .map(|&id| game.cards().card(id))
            .collect();
        assert_eq!(laid, vec![card!("7♥"), card!("🃏"), card!("9♥")]);
        // The joker's wild rank does not survive on the table
        assert_eq!(game.cards().wild_rank(ids[1]), None);
    }

    #[test]
    fn stray_card_rides_along_with_a_run() {
        let mut game = Game::rigged(
            [
                &[card!("K♥"), card!("7♥"), card!("6♥"), card!("5♥")],
                &[card!("9♣")],
                &[card!("9♦")],
            ],
            &[card!("2♦")],
            [0; 3],
            0,
        );
        let ids = ids_of(&game, 0);
        assert_eq!(game.play_turn(0, Source::Deck, &ids), Ok(TurnOutcome::Played));
        let laid: Vec<_> = game
            .table()
            .cards()
            .iter()
            .map(|&id| game.cards().card(id))
            .collect();
        assert_eq!(
            laid,
            vec![card!("5♥"), card!("6♥"), card!("7♥"), card!("K♥")]
        );
        assert_eq!(game.hand(0).map(Hand::len), Some(1));
    }

    #[test]
    fn joker_set_is_illegal_through_either_path() {
        let hands: [&[crate::Card]; NUM_PLAYERS] = [
            &[card!("2♣"), card!("2♦"), card!("🃟"), card!("K♠")],
            &[card!("9♣")],
            &[card!("9♦")],
        ];

        let mut direct = Game::rigged(hands, &[card!("5♦")], [0; 3], 0);
        let ids = ids_of(&direct, 0);
        assert_eq!(
            direct.play_turn(0, Source::Deck, &ids[..3]),
            Err(RuleError::IllegalMeld)
        );

        let mut picked = Game::rigged(hands, &[card!("5♦")], [0; 3], 0);
        let ids = ids_of(&picked, 0);
        for &id in &ids[..3] {
            assert_eq!(picked.toggle_pick(0, id), Ok(true));
        }
        picked.acquire(0, Source::Deck).unwrap();
        assert_eq!(picked.discard_picked(0), Err(RuleError::IllegalMeld));
        assert_eq!(picked.hand(0).map(Hand::len), Some(4));
    }

    #[test]
    fn unpicked_joker_forgets_its_wild_rank() {
        let mut game = Game::rigged(
            [
                &[card!("K♠"), card!("🃏"), card!("9♥")],
                &[card!("9♣")],
                &[card!("9♦")],
            ],
            &[card!("5♦")],
            [0; 3],
            0,
        );
        let ids = ids_of(&game, 0);
        game.toggle_pick(0, ids[0]).unwrap();
        game.toggle_pick(0, ids[1]).unwrap();
        assert_eq!(game.cards().wild_rank(ids[1]), Some(Rank::King));

        game.acquire(0, Source::Deck).unwrap();
        assert_eq!(game.discard(0, &ids[2..]), Ok(TurnOutcome::Played));
        assert_eq!(game.cards().wild_rank(ids[1]), None);
        assert_eq!(game.picked(0), Some(&[][..]));
        assert!(game.hand(0).is_some_and(|hand| hand.contains(ids[1])));
    }

    #[test]
    fn unknown_seats_have_no_hand() {
        let game = Game::rigged(
            [&[card!("2♣")], &[card!("3♣")], &[card!("4♣")]],
            &[card!("5♦")],
            [0; 3],
            0,
        );
        assert!(game.hand(NUM_PLAYERS).is_none());
        assert!(game.view(5).is_none());
        assert_eq!(game.hand_sum(NUM_PLAYERS), None);
        assert_eq!(game.picked(NUM_PLAYERS), None);
        assert_eq!(game.view(2).map(|view| view.player), Some(2));
    }

    #[test]
    fn picking_then_discarding() {
        let mut game = Game::rigged(
            [
                &[card!("8♠"), card!("8♦"), card!("2♣")],
                &[card!("9♣")],
                &[card!("9♦")],
            ],
            &[card!("5♦")],
            [0; 3],
            0,
        );
        let ids = ids_of(&game, 0);
        assert_eq!(game.toggle_pick(0, ids[0]), Ok(true));
        assert_eq!(game.toggle_pick(0, ids[1]), Ok(true));
        assert_eq!(
            game.toggle_pick(1, ids[2]),
            Err(RuleError::NotYourTurn {
                player: 1,
                active: 0
            })
        );
        game.acquire(0, Source::TableLeft).unwrap();
        assert_eq!(game.discard_picked(0), Ok(TurnOutcome::Played));
        assert_eq!(game.hand(0).map(Hand::len), Some(2));
        assert_eq!(game.hand_sum(0), Some(7));
    }

    #[test]
    fn beaten_declarer_is_penalized() {
        let mut game = Game::rigged(
            [
                &[card!("2♣"), card!("4♥")],
                &[card!("3♣"), card!("A♦")],
                &[card!("K♣"), card!("K♦")],
            ],
            &[card!("5♦")],
            [0; 3],
            0,
        );
        let outcome = match game.declare_end(0) {
            Ok(TurnOutcome::GameOver(outcome)) => outcome,
            other => panic!("unexpected {:?}", other),
        };
        assert!(outcome.assaf);
        assert_eq!(outcome.winner, 1);
        assert_eq!(outcome.penalized(), Some(0));
        assert_eq!(outcome.hand_sums, [6, 4, 20]);
        assert_eq!(game.scores(), [36, 4, 20]);
        assert_eq!(game.phase(), &Phase::GameOver(outcome.clone()));
        assert_eq!(game.start_round(), Err(RuleError::GameOver));
        assert_eq!(game.acquire(0, Source::Deck), Err(RuleError::GameOver));

        let events: Vec<Event> = game.drain_events().collect();
        assert_eq!(
            events,
            vec![
                Event::RoundDeclared { player: 0 },
                Event::RoundResolved {
                    winner: 1,
                    penalized: Some(0)
                },
            ]
        );
    }

    #[test]
    fn tied_declarer_still_wins() {
        let mut game = Game::rigged(
            [&[card!("9♣")], &[card!("4♣")], &[card!("4♦")]],
            &[card!("5♦")],
            [10, 20, 30],
            2,
        );
        let outcome = game.declare_end(2).unwrap();
        let TurnOutcome::GameOver(outcome) = outcome else {
            panic!("single round game should be over");
        };
        assert!(!outcome.assaf);
        assert_eq!(outcome.winner, 2);
        assert_eq!(game.scores(), [19, 24, 30]);
    }

    #[test]
    fn declaring_needs_a_low_hand() {
        let mut game = Game::rigged(
            [&[card!("5♣"), card!("3♥")], &[card!("4♣")], &[card!("4♦")]],
            &[card!("5♦")],
            [0; 3],
            0,
        );
        assert_eq!(
            game.declare_end(0),
            Err(RuleError::DeclareNotEligible { hand_sum: 8 })
        );
        assert_eq!(game.active_player(), Some(0));
        game.acquire(0, Source::Deck).unwrap();
        assert_eq!(game.declare_end(0), Err(RuleError::AlreadyAcquired));
    }

    #[test]
    fn winner_deals_next_round_and_scores_carry() {
        let config = GameConfig {
            rounds: 2,
            ..GameConfig::default()
        };
        let mut game = Game::new(config, StdRng::seed_from_u64(11));
        game.start_round().unwrap();
        let mut strategy = HeuristicStrategy;
        let mut resolved = None;
        for _ in 0..10_000 {
            match game.play_computer_turn(&mut strategy).unwrap() {
                TurnOutcome::Played => {}
                TurnOutcome::RoundResolved(outcome) => {
                    resolved = Some(outcome);
                    break;
                }
                TurnOutcome::GameOver(_) => panic!("two rounds were configured"),
            }
        }
        let outcome = resolved.expect("round never ended");
        assert_eq!(game.rounds_left(), 1);
        assert_eq!(game.scores(), outcome.scores);
        assert_eq!(game.last_outcome(), Some(&outcome));

        game.start_round().unwrap();
        assert_eq!(game.active_player(), Some(outcome.winner));
        assert_eq!(game.scores(), outcome.scores);
    }
}
