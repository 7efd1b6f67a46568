/// Added to the score of a declarer who did not hold the lowest hand.
pub const ASSAF_PENALTY: u32 = 30;

/// Applies one round's result to a player's cumulative score.
///
/// Everyone but an unbeaten declarer adds their hand sum. A beaten declarer
/// also pays [`ASSAF_PENALTY`]. A total of exactly 50 drops to 0, any other
/// nonzero multiple of 50 is halved. The two checks run once, on the total
/// after addition.
pub fn settle_score(score: u32, hand_sum: u32, is_caller: bool, penalized: bool) -> u32 {
    let mut score = score;
    if !is_caller || penalized {
        score += hand_sum;
    }
    if penalized {
        score += ASSAF_PENALTY;
    }
    if score == 50 {
        0
    } else if score % 50 == 0 {
        score / 2
    } else {
        score
    }
}
