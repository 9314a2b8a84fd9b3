//! End-to-end pipeline tests: raw transcript through normalizer,
//! grammar and aggregator.

use bolita_core::{aggregate, extract_bets, normalize};

const TRANSCRIPT: &str = "\
[1/2/26, 22:12:47] Pedro: 50-10-20-30\n\
[1/2/26, 22:12:51] Pedro: 38x70-15\n\
Messages and calls are end-to-end encrypted. Nadie fuera del chat puede leerlos.\n\
[1/2/26, 22:13:20] Pedro: terminal 7-2\n\
photo attached: IMG_0042.jpg\n\
[1/2/26, 22:14:02] Pedro: 150-5 # la centena de ayer\n\
[1/2/26, 22:14:40] Pedro: gracias hermano";

#[test]
fn normalize_is_idempotent() {
    let once = normalize(TRANSCRIPT);
    assert_eq!(normalize(&once), once);
}

#[test]
fn transcript_flows_through_to_totals() {
    let clean = normalize(TRANSCRIPT);
    assert_eq!(
        clean,
        "50-10-20-30\n38x70-15\nterminal 7-2\n150-5\ngracias hermano"
    );

    let ex = extract_bets(&clean);
    assert!(ex.unrecognized.is_empty());
    // triplet line: 1 bet; parlet: 1; terminal: 10; hundred: 1.
    assert_eq!(ex.bets.len(), 13);
    // "gracias hermano" carries no digit and is filtered before the
    // grammar; it is not even an error.
    assert_eq!(ex.final_text.lines().count(), 4);

    let summary = aggregate(&ex.bets);
    assert_eq!(summary.triplet, 60); // 10+20+30
    assert_eq!(summary.parlet, 15);
    assert_eq!(summary.fixed, 20); // terminal 7 at 2, ten numbers
    assert_eq!(summary.hundred, 5);
    assert_eq!(summary.total, 100);
}

#[test]
fn literal_escapes_are_real_newlines() {
    let clean = normalize("50-10\\n22-5");
    let ex = extract_bets(&clean);
    assert_eq!(ex.bets.len(), 2);
}
