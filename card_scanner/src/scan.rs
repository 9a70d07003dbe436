use bank_pure::{CardId, card_id_from_uid};
use embedded_hal::delay::DelayNs;

use crate::{CardReader, Keypad, RawUid};

/// The key the operator presses to abort a blocking scan.
pub const ABORT_KEY: char = '#';

/// Delay between UID acquisition attempts once a card was detected.
pub const ACQUIRE_RETRY_DELAY_MS: u32 = 500;

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    /// A card was read and encoded.
    Card(CardId),
    /// The operator aborted before a card could be read.
    Aborted,
}

impl ScanOutcome {
    /// Collapses the outcome to the identity callers store: an abort
    /// becomes the 0 sentinel, same as a legitimately empty UID.
    pub fn card_id(self) -> CardId {
        match self {
            Self::Card(id) => id,
            Self::Aborted => CardId::NONE,
        }
    }
}

/// Drives one reader and one keypad to produce card identities.
///
/// Purely synchronous: the blocking scan busy-polls both ports from the
/// single control flow, so no locking discipline is needed anywhere.
pub struct CardScanner<R, K, D> {
    reader: R,
    keypad: K,
    delay: D,
    abort_key: char,
    retry_delay_ms: u32,
    retry_cap: Option<u32>,
}

impl<R: CardReader, K: Keypad, D: DelayNs> CardScanner<R, K, D> {
    pub fn new(reader: R, keypad: K, delay: D) -> Self {
        Self {
            reader,
            keypad,
            delay,
            abort_key: ABORT_KEY,
            retry_delay_ms: ACQUIRE_RETRY_DELAY_MS,
            retry_cap: None,
        }
    }

    /// Caps the acquisition retry loop at `attempts`. Without a cap the
    /// loop runs until the reader delivers a UID; tests use the cap to
    /// keep a stalling reader bounded.
    pub fn with_retry_cap(mut self, attempts: u32) -> Self {
        self.retry_cap = Some(attempts);
        self
    }

    pub fn with_abort_key(mut self, key: char) -> Self {
        self.abort_key = key;
        self
    }

    pub fn reader(&self) -> &R {
        &self.reader
    }

    /// Blocks until a card is read or the operator aborts.
    ///
    /// There is no timeout: with no card and no keypress this suspends
    /// the caller indefinitely.
    pub fn scan_blocking(&mut self) -> ScanOutcome {
        loop {
            // The keypad is checked before card presence, so an abort is
            // never missed while a card is mid-presentation.
            if let Some(key) = self.keypad.poll_key() {
                if key == self.abort_key {
                    #[cfg(feature = "defmt")]
                    defmt::info!("scan aborted by operator");
                    return ScanOutcome::Aborted;
                }
                #[cfg(feature = "defmt")]
                defmt::debug!("ignoring key {}", key);
            }
            if self.reader.card_present() {
                break;
            }
        }
        let uid = match self.acquire_uid() {
            Some(uid) => uid,
            None => return ScanOutcome::Aborted,
        };
        self.reader.halt();
        let card_id = card_id_from_uid(&uid);
        #[cfg(feature = "defmt")]
        defmt::info!("read card {}", card_id);
        ScanOutcome::Card(card_id)
    }

    /// One poll for the steady-state loop: a single presence check and a
    /// single acquisition attempt. Returns `None` right away if either
    /// fails; the caller's own loop provides the polling cadence. No
    /// abort path, because this never blocks.
    pub fn scan_once(&mut self) -> Option<CardId> {
        if !self.reader.card_present() {
            return None;
        }
        let uid = self.reader.read_uid()?;
        self.reader.halt();
        Some(card_id_from_uid(&uid))
    }

    /// Retries acquisition until the reader delivers a UID. The first
    /// attempt happens immediately; every retry waits the fixed delay.
    ///
    /// Unbounded by default: a card that is detected but never becomes
    /// readable stalls the scan. A configured cap turns that stall into
    /// `None`, which the blocking scan reports as an abort.
    fn acquire_uid(&mut self) -> Option<RawUid> {
        let mut attempts: u32 = 0;
        loop {
            if let Some(uid) = self.reader.read_uid() {
                return Some(uid);
            }
            attempts += 1;
            if let Some(cap) = self.retry_cap
                && attempts >= cap
            {
                #[cfg(feature = "defmt")]
                defmt::warn!("no readable uid after {} attempts, giving up", attempts);
                return None;
            }
            self.delay.delay_ms(self.retry_delay_ms);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FakeKeypad, FakeReader, InstantDelay};

    #[test]
    fn blocking_scan_reads_a_card() {
        let reader = FakeReader::new().card(&[51, 32, 94], 2, 0);
        let mut scanner = CardScanner::new(reader, FakeKeypad::new(), InstantDelay::default());
        assert_eq!(
            scanner.scan_blocking(),
            ScanOutcome::Card(CardId(513294))
        );
    }

    #[test]
    fn settling_card_is_retried_with_delays() {
        // 3 failed reads before the UID comes through
        let reader = FakeReader::new().card(&[1, 2, 3], 0, 3);
        let mut scanner = CardScanner::new(reader, FakeKeypad::new(), InstantDelay::default());
        assert_eq!(scanner.scan_blocking(), ScanOutcome::Card(CardId(123)));
        assert_eq!(scanner.reader.uid_reads, 4);
        assert_eq!(
            scanner.delay.slept_ns,
            3 * u64::from(ACQUIRE_RETRY_DELAY_MS) * 1_000_000
        );
        assert_eq!(scanner.reader.halts, 1);
    }

    #[test]
    fn abort_wins_over_a_present_card() {
        // The card is present from the first poll, but the abort key is
        // already queued, so acquisition must never run.
        let reader = FakeReader::new().card(&[1, 2, 3], 0, 0);
        let keypad = FakeKeypad::new().press(ABORT_KEY);
        let mut scanner = CardScanner::new(reader, keypad, InstantDelay::default());
        assert_eq!(scanner.scan_blocking(), ScanOutcome::Aborted);
        assert_eq!(scanner.reader.uid_reads, 0);
    }

    #[test]
    fn other_keys_are_ignored() {
        let reader = FakeReader::new().card(&[1, 2, 3], 2, 0);
        let keypad = FakeKeypad::new().press('5').press('A').idle(1).press('#');
        let mut scanner = CardScanner::new(reader, keypad, InstantDelay::default());
        // '5' and 'A' do not abort; the card shows up before the '#'.
        assert_eq!(scanner.scan_blocking(), ScanOutcome::Card(CardId(123)));
    }

    #[test]
    fn retry_cap_bounds_a_stalling_reader() {
        let reader = FakeReader::new().card(&[1, 2, 3], 0, u32::MAX);
        let mut scanner =
            CardScanner::new(reader, FakeKeypad::new(), InstantDelay::default()).with_retry_cap(5);
        assert_eq!(scanner.scan_blocking(), ScanOutcome::Aborted);
        assert_eq!(scanner.reader.uid_reads, 5);
    }

    #[test]
    fn scan_once_returns_none_without_a_card() {
        let reader = FakeReader::new();
        let mut scanner = CardScanner::new(reader, FakeKeypad::new(), InstantDelay::default());
        assert_eq!(scanner.scan_once(), None);
    }

    #[test]
    fn scan_once_does_not_retry_a_settling_card() {
        let reader = FakeReader::new().card(&[1, 2, 3], 0, 1);
        let mut scanner = CardScanner::new(reader, FakeKeypad::new(), InstantDelay::default());
        // First poll: present but not yet readable.
        assert_eq!(scanner.scan_once(), None);
        // Second poll reads it.
        assert_eq!(scanner.scan_once(), Some(CardId(123)));
        assert_eq!(scanner.reader.halts, 1);
    }

    #[test]
    fn aborted_outcome_collapses_to_the_sentinel() {
        assert_eq!(ScanOutcome::Aborted.card_id(), CardId::NONE);
        assert_eq!(ScanOutcome::Card(CardId(123)).card_id(), CardId(123));
    }
}
