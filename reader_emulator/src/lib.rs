//! Scripted stand-ins for the card reader and the operator keypad, so the
//! whole identification pipeline can be developed and tested on the host
//! without a reader wired up.

use std::collections::VecDeque;
use std::time::Duration;

use card_scanner::{CardReader, Keypad, RAW_UID_BYTES, RawUid};
use embedded_hal::delay::DelayNs;

/// The symbols on the operator's 4×4 button matrix. Only `#` (abort) means
/// anything to the scanner; the rest are listed for completeness.
pub const KEYPAD_LAYOUT: [[char; 4]; 4] = [
    ['1', '2', '3', 'A'],
    ['4', '5', '6', 'B'],
    ['7', '8', '9', 'C'],
    ['*', '0', '#', 'D'],
];

/// One scripted card presentation.
pub struct PresentedCard {
    uid: Vec<u8>,
    absent_polls: u32,
    settle_reads: u32,
}

impl PresentedCard {
    pub fn new(uid: &[u8]) -> Self {
        Self {
            uid: uid.to_vec(),
            absent_polls: 0,
            settle_reads: 0,
        }
    }

    /// The card only shows up after `polls` presence checks.
    pub fn after_polls(mut self, polls: u32) -> Self {
        self.absent_polls = polls;
        self
    }

    /// The first `reads` acquisition attempts fail, emulating a card that
    /// needs time to settle in the field.
    pub fn settling(mut self, reads: u32) -> Self {
        self.settle_reads = reads;
        self
    }
}

/// A reader that works through a queue of scripted card presentations.
#[derive(Default)]
pub struct EmulatedReader {
    script: VecDeque<PresentedCard>,
    current: Option<PresentedCard>,
    /// How many acquisition attempts the scanner has made, across all cards.
    pub uid_reads: u32,
}

impl EmulatedReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn present(mut self, card: PresentedCard) -> Self {
        self.script.push_back(card);
        self
    }

    /// True once the script ran out and no card is on the antenna.
    pub fn is_idle(&self) -> bool {
        self.script.is_empty() && self.current.is_none()
    }
}

impl CardReader for EmulatedReader {
    fn card_present(&mut self) -> bool {
        if self.current.is_some() {
            return true;
        }
        match self.script.front_mut() {
            Some(card) if card.absent_polls > 0 => {
                card.absent_polls -= 1;
                false
            }
            Some(_) => {
                self.current = self.script.pop_front();
                true
            }
            None => false,
        }
    }

    fn read_uid(&mut self) -> Option<RawUid> {
        self.uid_reads += 1;
        let card = self.current.as_mut()?;
        if card.settle_reads > 0 {
            card.settle_reads -= 1;
            None
        } else {
            let len = card.uid.len().min(RAW_UID_BYTES);
            Some(RawUid::from_slice(&card.uid[..len]).unwrap())
        }
    }

    fn halt(&mut self) {
        // Halting with nothing on the antenna stays a no-op.
        self.current = None;
    }
}

/// A keypad that answers polls from a script. `idle` entries let keys land
/// in a specific scan when several blocking scans share one keypad.
#[derive(Default)]
pub struct EmulatedKeypad {
    polls: VecDeque<Option<char>>,
}

impl EmulatedKeypad {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(mut self, key: char) -> Self {
        self.polls.push_back(Some(key));
        self
    }

    /// Scripts `polls` polls with no key pressed.
    pub fn idle(mut self, polls: u32) -> Self {
        for _ in 0..polls {
            self.polls.push_back(None);
        }
        self
    }
}

impl Keypad for EmulatedKeypad {
    fn poll_key(&mut self) -> Option<char> {
        self.polls.pop_front().flatten()
    }
}

/// Completes immediately, recording how long it was asked to sleep.
#[derive(Default)]
pub struct InstantDelay {
    pub slept_ns: u64,
}

impl DelayNs for InstantDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.slept_ns += u64::from(ns);
    }
}

/// Actually sleeps, for demo runs that should feel like the real rig.
pub struct StdDelay;

impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(Duration::from_nanos(u64::from(ns)));
    }
}
