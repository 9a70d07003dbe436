use bank_pure::{CardId, CardTable};
use embedded_hal::delay::DelayNs;

use crate::{CardReader, CardScanner, Keypad};

/// A steady-state identification: the raw identity of the scanned card and
/// the player number it resolved to, 0 if the card is not in the table.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardMatch {
    pub card_id: CardId,
    pub player_nr: u8,
}

/// Classifies scanned cards through the static card table.
///
/// An unknown identity is not an error: it resolves to player 0 and is
/// reported like any other match. The table is never mutated, new cards
/// are not learned at run time.
pub struct Dispatcher<'a> {
    table: CardTable<'a>,
}

impl<'a> Dispatcher<'a> {
    pub fn new(table: CardTable<'a>) -> Self {
        Self { table }
    }

    /// One non-blocking poll of the reader; on a successful scan the
    /// identity is looked up and the match reported.
    ///
    /// There is no cooldown: a card held on the reader can match again on
    /// every polling cycle as its presence toggles.
    pub fn poll<R, K, D>(&self, scanner: &mut CardScanner<R, K, D>) -> Option<CardMatch>
    where
        R: CardReader,
        K: Keypad,
        D: DelayNs,
    {
        let card_id = scanner.scan_once()?;
        let player_nr = self.table.lookup(card_id);
        #[cfg(feature = "defmt")]
        defmt::info!("card {} -> player {}", card_id, player_nr);
        Some(CardMatch { card_id, player_nr })
    }
}
