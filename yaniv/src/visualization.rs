use crate::{CardId, Cards, TableRow};

/// The cards as unicode characters, separated by spaces.
pub fn visualize_cards(cards: &Cards, ids: &[CardId]) -> String {
    ids.iter()
        .map(|&id| cards.card(id).unicode_char().to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// The table row with the takeable ends in brackets.
pub fn visualize_table(cards: &Cards, table: &TableRow) -> String {
    let last = table.len().saturating_sub(1);
    table
        .cards()
        .iter()
        .enumerate()
        .map(|(i, &id)| {
            let c = cards.card(id).unicode_char();
            if i == 0 || i == last {
                format!("[{}]", c)
            } else {
                c.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
