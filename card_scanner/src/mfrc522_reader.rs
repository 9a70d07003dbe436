use mfrc522::{Initialized, Mfrc522, comm::Interface};

use crate::{CardReader, RawUid};

/// [`CardReader`] on top of the MFRC522 driver.
///
/// Presence is a REQA probe, acquisition wakes the card with WUPA and runs
/// the SELECT cascade, release is HLTA. Driver errors collapse into the
/// port contract: a failed probe reads as "no card" and the next polling
/// cycle simply tries again.
pub struct Mfrc522Reader<COMM: Interface> {
    mfrc522: Mfrc522<COMM, Initialized>,
}

impl<COMM: Interface> Mfrc522Reader<COMM> {
    pub fn new(mfrc522: Mfrc522<COMM, Initialized>) -> Self {
        Self { mfrc522 }
    }

    /// Hands the driver back, e.g. to reconfigure the antenna.
    pub fn into_inner(self) -> Mfrc522<COMM, Initialized> {
        self.mfrc522
    }
}

impl<COMM: Interface> CardReader for Mfrc522Reader<COMM> {
    fn card_present(&mut self) -> bool {
        self.mfrc522.reqa().is_ok()
    }

    fn read_uid(&mut self) -> Option<RawUid> {
        // WUPA instead of REQA so a card halted by an earlier scan still
        // answers while it sits on the antenna.
        let atqa = self.mfrc522.wupa().ok()?;
        let uid = self.mfrc522.select(&atqa).ok()?;
        RawUid::from_slice(uid.as_bytes()).ok()
    }

    fn halt(&mut self) {
        // HLTA with no selected card is harmless, which keeps this
        // idempotent.
        let _ = self.mfrc522.hlta();
    }
}
