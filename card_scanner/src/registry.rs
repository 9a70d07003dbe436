use bank_pure::Player;
use embedded_hal::delay::DelayNs;

use crate::{CardReader, CardScanner, Keypad};

/// Enrolls `N` players at startup, one blocking scan per slot.
///
/// Enrollment is strictly sequential: each scan fully blocks until a card
/// is read or the operator aborts that slot. An aborted slot yields the
/// inactive placeholder player; there is no automatic re-prompt, advancing
/// to the next slot is the only recovery.
pub fn enroll_players<const N: usize, R, K, D>(scanner: &mut CardScanner<R, K, D>) -> [Player; N]
where
    R: CardReader,
    K: Keypad,
    D: DelayNs,
{
    core::array::from_fn(|_slot| {
        let card_id = scanner.scan_blocking().card_id();
        let player = Player::new(card_id);
        #[cfg(feature = "defmt")]
        if player.active {
            defmt::info!(
                "slot {}: enrolled card {} with balance {}",
                _slot + 1,
                player.card_id,
                player.balance
            );
        } else {
            defmt::info!("slot {}: no card, player disabled", _slot + 1);
        }
        player
    })
}
