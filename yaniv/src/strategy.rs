use std::cmp::Reverse;

use crate::{detect_run, CardId, Cards, Hand, Run, Source, Suit, TurnView, DECLARE_LIMIT};

/// What a computer player wants to do with its turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    DeclareEnd,
    Play {
        source: Source,
        discard: Vec<CardId>,
    },
}

/// A decision procedure for computer players.
///
/// Decisions are applied through the same checks as human actions, so an
/// illegal decision is rejected like any other illegal move.
pub trait Strategy {
    fn decide(&mut self, view: &TurnView<'_>) -> Decision;
}

/// The built-in opponent.
///
/// It looks for the most valuable run and set in its hand, then checks
/// whether one of the table ends completes a better run or set for next turn.
/// Cards it plans to keep for that are not discarded now.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicStrategy;

impl Strategy for HeuristicStrategy {
    fn decide(&mut self, view: &TurnView<'_>) -> Decision {
        let TurnView {
            cards, hand, table, ..
        } = *view;
        if hand.sum(cards) <= DECLARE_LIMIT {
            return Decision::DeclareEnd;
        }

        let run = best_run(cards, hand);
        let run_value = run.value(cards);
        let mut matched = matched_rank(cards, hand, run_value);
        let ends = table.ends();

        let plan = plan_acquisition(cards, hand, &ends, run_value, &matched);

        let leftover: Vec<CardId> = run
            .into_cards()
            .into_iter()
            .filter(|id| !plan.reserved.contains(id))
            .collect();
        let run = detect_run(cards, &leftover);
        matched.retain(|id| !plan.reserved.contains(id));

        let discard = if run.is_empty() && matched.is_empty() {
            fallback(cards, hand, &ends, &plan.reserved).into_iter().collect()
        } else if run.value(cards) >= cards.sum(&matched) {
            run.into_cards()
        } else {
            matched
        };

        Decision::Play {
            source: plan.source,
            discard,
        }
    }
}

/// Where to take a card from, and which hand cards to hold on to for it.
struct Acquisition {
    source: Source,
    reserved: Vec<CardId>,
}

/// Order in which suits are searched for runs. Earlier suits win ties.
const RUN_SUIT_ORDER: [Suit; 4] = [Suit::Clubs, Suit::Hearts, Suit::Spades, Suit::Diamonds];

/// The most valuable run in a single suit, with all jokers available to
/// every suit.
fn best_run(cards: &Cards, hand: &Hand) -> Run {
    let mut best = Run::default();
    let mut best_value = 0;
    for suit in RUN_SUIT_ORDER {
        let bucket = hand.bucket(suit);
        if bucket.len() < 2 {
            continue;
        }
        let mut candidates = bucket.to_vec();
        candidates.extend_from_slice(hand.jokers());
        let run = detect_run(cards, &candidates);
        let value = run.value(cards);
        if value > best_value {
            best_value = value;
            best = run;
        }
    }
    best
}

/// Cards of the highest rank held at least twice, for as long as they are
/// worth more than the run.
///
/// Only one rank is ever considered. Pairs are added while the running value,
/// which counts the first card of the rank and one more per pair, beats
/// `run_value`.
fn matched_rank(cards: &Cards, hand: &Hand, run_value: u32) -> Vec<CardId> {
    let mut sorted = hand.ids().to_vec();
    sorted.sort_by_key(|&id| Reverse(cards.rank(id)));

    let mut matched = Vec::new();
    let mut locked = None;
    let mut running = 0;
    for pair in sorted.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let rank = cards.rank(a);
        if rank != cards.rank(b) || cards.is_joker(a) || cards.is_joker(b) {
            continue;
        }
        if locked.is_some_and(|locked| locked != rank) {
            break;
        }
        if locked.is_none() {
            locked = Some(rank);
            running = cards.value(a);
        }
        running += cards.value(a);
        if running <= run_value {
            continue;
        }
        if !matched.contains(&a) {
            matched.push(a);
        }
        matched.push(b);
    }
    matched
}

fn plan_acquisition(
    cards: &Cards,
    hand: &Hand,
    ends: &[(Source, CardId)],
    run_value: u32,
    matched: &[CardId],
) -> Acquisition {
    let mut chosen: Option<(Source, CardId)> = None;
    let mut reserved = Vec::new();
    let mut took_joker = false;
    let mut table_run_value = 0;

    // An end that completes a run worth more than what the hand has now
    for &(source, end) in ends {
        if cards.is_joker(end) {
            chosen = Some((source, end));
            took_joker = true;
            break;
        }
        let mut candidates = hand.bucket(cards.card(end).suit).to_vec();
        candidates.extend_from_slice(hand.jokers());
        candidates.push(end);
        let run = detect_run(cards, &candidates);
        table_run_value = run.value(cards);
        if !run.contains(end) || table_run_value <= run_value {
            continue;
        }
        chosen = Some((source, end));
        reserved = run.into_cards();
        reserved.retain(|&id| id != end);
    }

    // An end matching cards already held. Later ends override earlier picks.
    if !took_joker {
        for &(source, end) in ends {
            let rank = cards.rank(end);
            let same: Vec<CardId> = hand
                .ids()
                .iter()
                .copied()
                .filter(|&id| !cards.is_joker(id) && cards.rank(id) == rank)
                .collect();
            let worth = cards.sum(&same);
            let in_matched = matched.iter().any(|&id| cards.rank(id) == rank);
            if worth <= run_value && (!in_matched || worth <= table_run_value) {
                continue;
            }
            chosen = Some((source, end));
            reserved = same;
        }
    }

    // Otherwise, anything up to a Three is worth taking
    if chosen.is_none() {
        for &(source, end) in ends {
            if cards.rank(end).index() > 2 {
                continue;
            }
            if chosen.is_some_and(|(_, cheapest)| cards.value(cheapest) <= cards.value(end)) {
                continue;
            }
            chosen = Some((source, end));
        }
    }

    Acquisition {
        source: chosen.map_or(Source::Deck, |(source, _)| source),
        reserved,
    }
}

/// The highest card that is neither a joker, reserved, nor of a rank the
/// next player could pick up to match. Failing that, the highest non-joker.
fn fallback(
    cards: &Cards,
    hand: &Hand,
    ends: &[(Source, CardId)],
    reserved: &[CardId],
) -> Option<CardId> {
    let mut sorted = hand.ids().to_vec();
    sorted.sort_by_key(|&id| Reverse(cards.rank(id)));
    let naturals = || sorted.iter().copied().filter(|&id| !cards.is_joker(id));

    naturals()
        .find(|&id| {
            !reserved.contains(&id)
                && !ends
                    .iter()
                    .any(|&(_, end)| cards.rank(end) == cards.rank(id))
        })
        .or_else(|| naturals().next())
}
