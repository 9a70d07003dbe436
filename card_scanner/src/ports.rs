use heapless::Vec;

/// ISO14443 UIDs come in single (4), double (7) or triple (10) size.
pub const RAW_UID_BYTES: usize = 10;

/// The raw UID bytes delivered by one successful acquisition.
/// Only lives for the duration of a scan.
pub type RawUid = Vec<u8, RAW_UID_BYTES>;

/// One proximity-card reader.
pub trait CardReader {
    /// Whether a card is currently in front of the antenna.
    fn card_present(&mut self) -> bool;

    /// One attempt at acquiring the UID of the presented card.
    /// Right after a card shows up this is expected to fail a few times
    /// while the field settles, so callers retry.
    fn read_uid(&mut self) -> Option<RawUid>;

    /// Releases the card after a successful read. Idempotent: calling it
    /// while no card is held has no effect.
    fn halt(&mut self);
}

/// The operator's button matrix.
pub trait Keypad {
    /// The next pressed key, or `None` if nothing was pressed since the
    /// last poll.
    fn poll_key(&mut self) -> Option<char>;
}
