use bank_pure::{CardId, CardTable};
use card_scanner::{CardScanner, Dispatcher, enroll_players};
use reader_emulator::{EmulatedKeypad, EmulatedReader, PresentedCard, StdDelay};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Number of players enrolled at startup.
const PLAYER_COUNT: usize = 4;

/// The registered cards. Identities are the unpadded decimal concatenation
/// of the first three UID bytes.
const PLAYER_CARDS: &[(CardId, u8)] = &[
    (CardId(51219132), 1),
    (CardId(13115268), 2),
    (CardId(513294), 3),
    (CardId(22548174), 4),
    (CardId(12792202), 5),
];

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Scripted session: three players present their cards during setup,
    // the operator aborts the fourth slot with '#'. Afterwards the cards
    // of player 3, an unregistered card and player 1 (held over two
    // cycles) hit the reader.
    let reader = EmulatedReader::new()
        .present(PresentedCard::new(&[51, 219, 132]))
        .present(PresentedCard::new(&[131, 152, 68]).after_polls(2).settling(1))
        .present(PresentedCard::new(&[225, 48, 174]))
        .present(PresentedCard::new(&[51, 32, 94]))
        .present(PresentedCard::new(&[9, 9, 9]))
        .present(PresentedCard::new(&[51, 219, 132]))
        .present(PresentedCard::new(&[51, 219, 132]));
    // Slot 1 polls the keypad once, slot 2 three times; the abort lands in
    // slot 3 and the fourth card then enrolls into slot 4.
    let keypad = EmulatedKeypad::new().idle(4).press('#');

    let mut scanner = CardScanner::new(reader, keypad, StdDelay);

    info!("enrolling {PLAYER_COUNT} players");
    let players = enroll_players::<PLAYER_COUNT, _, _, _>(&mut scanner);
    for (slot, player) in players.iter().enumerate() {
        if player.active {
            info!(
                "slot {}: card {} with balance {}",
                slot + 1,
                player.card_id.0,
                player.balance
            );
        } else {
            info!("slot {}: aborted, player disabled", slot + 1);
        }
    }

    info!("setup complete, waiting for cards");
    let dispatcher = Dispatcher::new(CardTable::new(PLAYER_CARDS));
    while !scanner.reader().is_idle() {
        if let Some(card_match) = dispatcher.poll(&mut scanner) {
            info!(
                "card {} -> player {}",
                card_match.card_id.0, card_match.player_nr
            );
        }
    }
}
