#![cfg_attr(not(feature = "std"), no_std)]

//! Pure game data for the RFID money game: card identity encoding, the
//! card-to-player table and the `Player` record. No I/O happens here, so
//! everything in this crate can run on the firmware and on the host.

/// Every player starts with this balance. The bank logic that mutates
/// balances lives outside this crate.
pub const STARTING_BALANCE: u32 = 500;

/// A card identity that maps to no player.
pub const NO_PLAYER: u8 = 0;

/// Only this many leading UID bytes contribute to a card's identity.
/// This is a deliberate truncation, not a hardware limit: the registered
/// cards are distinguishable by their first three bytes.
pub const UID_PREFIX_LEN: usize = 3;

/// The canonical identity of a card, derived from its raw UID by
/// [`card_id_from_uid`]. The all-zero value doubles as the "no card"
/// sentinel: an aborted enrollment slot and an empty UID both land on it.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CardId(pub u32);

impl CardId {
    /// Sentinel for "no card was read" (aborted scan, empty UID).
    pub const NONE: Self = Self(0);
}

/// Reduces a raw card UID to a single numeric identity.
///
/// The first `min(L, 3)` bytes are rendered as unpadded decimal strings and
/// concatenated, and the concatenation is read back as a base-10 number.
/// An empty UID encodes to 0.
///
/// Because the digit strings carry no padding or separator, different UIDs
/// can encode to the same identity: `[1, 23]` and `[12, 3]` both become 123.
/// The registered card table is defined against this scheme, so the
/// ambiguity is accepted; callers must not assume uniqueness beyond what
/// the table actually distinguishes.
pub fn card_id_from_uid(uid: &[u8]) -> CardId {
    let mut value: u32 = 0;
    for &byte in uid.iter().take(UID_PREFIX_LEN) {
        let shift = match byte {
            0..=9 => 10,
            10..=99 => 100,
            _ => 1000,
        };
        // Worst case is "255255255", which still fits in a u32.
        value = value * shift + byte as u32;
    }
    CardId(value)
}

/// One enrolled player. Constructed from an already-scanned identity;
/// scanning itself happens in the `card_scanner` crate.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Player {
    pub card_id: CardId,
    pub balance: u32,
    /// `false` iff enrollment for this slot was aborted (identity 0).
    pub active: bool,
}

impl Player {
    pub fn new(card_id: CardId) -> Self {
        Self {
            card_id,
            balance: STARTING_BALANCE,
            active: card_id != CardId::NONE,
        }
    }
}

/// The static mapping from card identity to player number.
///
/// Built once at config time and never mutated afterwards. Each listed
/// identity maps to exactly one player number; every unlisted identity
/// resolves to [`NO_PLAYER`].
#[derive(Debug, Clone, Copy)]
pub struct CardTable<'a> {
    entries: &'a [(CardId, u8)],
}

impl<'a> CardTable<'a> {
    pub const fn new(entries: &'a [(CardId, u8)]) -> Self {
        Self { entries }
    }

    pub fn lookup(&self, card_id: CardId) -> u8 {
        self.entries
            .iter()
            .find(|(id, _)| *id == card_id)
            .map(|(_, player_nr)| *player_nr)
            .unwrap_or(NO_PLAYER)
    }
}
