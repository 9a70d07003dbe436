//! Scripted in-memory ports for the unit tests. The `reader_emulator`
//! crate has richer std-based versions of these for running the whole
//! pipeline on the host.

use embedded_hal::delay::DelayNs;
use heapless::Deque;

use crate::{CardReader, Keypad, RawUid};

struct ScriptedCard {
    absent_polls: u32,
    failed_reads: u32,
    uid: RawUid,
}

pub struct FakeReader {
    cards: Deque<ScriptedCard, 8>,
    current: Option<ScriptedCard>,
    pub uid_reads: u32,
    pub halts: u32,
}

impl FakeReader {
    pub fn new() -> Self {
        Self {
            cards: Deque::new(),
            current: None,
            uid_reads: 0,
            halts: 0,
        }
    }

    /// Scripts one card: invisible for `absent_polls` presence checks,
    /// then present, delivering its UID after `failed_reads` failed
    /// acquisition attempts.
    pub fn card(mut self, uid: &[u8], absent_polls: u32, failed_reads: u32) -> Self {
        let card = ScriptedCard {
            absent_polls,
            failed_reads,
            uid: RawUid::from_slice(uid).unwrap(),
        };
        self.cards.push_back(card).ok().unwrap();
        self
    }
}

impl CardReader for FakeReader {
    fn card_present(&mut self) -> bool {
        if self.current.is_some() {
            return true;
        }
        match self.cards.front_mut() {
            Some(card) if card.absent_polls > 0 => {
                card.absent_polls -= 1;
                false
            }
            Some(_) => {
                self.current = self.cards.pop_front();
                true
            }
            None => false,
        }
    }

    fn read_uid(&mut self) -> Option<RawUid> {
        self.uid_reads += 1;
        let card = self.current.as_mut()?;
        if card.failed_reads > 0 {
            card.failed_reads -= 1;
            None
        } else {
            Some(card.uid.clone())
        }
    }

    fn halt(&mut self) {
        self.halts += 1;
        self.current = None;
    }
}

pub struct FakeKeypad {
    polls: Deque<Option<char>, 16>,
}

impl FakeKeypad {
    pub fn new() -> Self {
        Self {
            polls: Deque::new(),
        }
    }

    pub fn press(mut self, key: char) -> Self {
        self.polls.push_back(Some(key)).unwrap();
        self
    }

    /// Scripts `polls` polls with no key pressed before whatever comes next.
    pub fn idle(mut self, polls: u32) -> Self {
        for _ in 0..polls {
            self.polls.push_back(None).unwrap();
        }
        self
    }
}

impl Keypad for FakeKeypad {
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
