//! Integration tests for ticket intake: acceptance policy, audit
//! trace persistence, and the opportunistic prize preview.

use bolita_core::{
    intake::TicketIntake, store::LedgerStore, LedgerError, RateTable, Shift, WinningNumber,
};
use chrono::NaiveDate;

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 2, 7).unwrap()
}

fn setup() -> LedgerStore {
    let store = LedgerStore::in_memory().expect("in_memory failed");
    store.migrate().expect("migrate failed");
    store
}

fn rates() -> RateTable {
    RateTable {
        fixed: 80,
        hundred: 500,
        parlet: 200,
        triplet: 300,
        runner1: 25,
        runner2: 25,
        commission_percent: 20.0,
    }
}

#[test]
fn registers_and_reads_back_a_ticket() {
    let mut store = setup();
    let raw = "[1/2/26, 22:12:47] Pedro: 50-10\n[1/2/26, 22:12:50] Pedro: 38x70-5";

    let ticket = TicketIntake::new(&mut store)
        .register_ticket("pedro", "caja1", date(), Shift::Am, raw)
        .unwrap();
    assert_eq!(ticket.summary.total, 15);
    assert_eq!(ticket.final_text, "50-10\n38x70-5");
    assert!(ticket.prizes_preview.is_none());

    let stored = store.tickets_for("pedro", "caja1", date(), Shift::Am).unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, ticket.id);
    assert_eq!(stored[0].bets, ticket.bets);
    assert_eq!(stored[0].summary, ticket.summary);
    assert_eq!(stored[0].raw_text, raw);
}

#[test]
fn any_unrecognized_line_rejects_the_whole_ticket() {
    let mut store = setup();
    let err = TicketIntake::new(&mut store)
        .register_ticket("pedro", "caja1", date(), Shift::Am, "50-10\nel 5 para luego")
        .unwrap_err();

    match err {
        LedgerError::UnprocessedLines { count, lines } => {
            assert_eq!(count, 1);
            assert_eq!(lines, vec!["el 5 para luego"]);
        }
        other => panic!("expected UnprocessedLines, got {other}"),
    }
    assert_eq!(store.ticket_count().unwrap(), 0);
}

#[test]
fn a_ticket_with_no_valid_bet_is_rejected() {
    let mut store = setup();
    let err = TicketIntake::new(&mut store)
        .register_ticket("pedro", "caja1", date(), Shift::Am, "hola\nbuenas tardes")
        .unwrap_err();
    assert!(matches!(err, LedgerError::EmptyTicket), "{err}");
}

#[test]
fn preview_is_attached_when_the_draw_is_known() {
    let mut store = setup();
    store.set_operator_rates(&rates()).unwrap();
    store
        .insert_winning_number(&WinningNumber {
            date: date(),
            shift: Shift::Pm,
            hundred_digit: 1,
            fixed: "50".into(),
            runner1: "20".into(),
            runner2: "30".into(),
        })
        .unwrap();

    let ticket = TicketIntake::new(&mut store)
        .register_ticket("pedro", "caja1", date(), Shift::Pm, "50-10\n00-85")
        .unwrap();

    let preview = ticket.prizes_preview.expect("preview should be attached");
    assert_eq!(preview.total_prizes, 800);
    assert_eq!(preview.winning_number, "1-50");
}

#[test]
fn missing_rates_only_skip_the_preview() {
    let mut store = setup();
    store
        .insert_winning_number(&WinningNumber {
            date: date(),
            shift: Shift::Pm,
            hundred_digit: 1,
            fixed: "50".into(),
            runner1: "20".into(),
            runner2: "30".into(),
        })
        .unwrap();

    let ticket = TicketIntake::new(&mut store)
        .register_ticket("pedro", "caja1", date(), Shift::Pm, "50-10")
        .unwrap();
    assert!(ticket.prizes_preview.is_none());
}

#[test]
fn multiple_tickets_accumulate_for_one_key() {
    let mut store = setup();
    {
        let mut intake = TicketIntake::new(&mut store);
        intake
            .register_ticket("pedro", "caja1", date(), Shift::Pm, "50-10")
            .unwrap();
        intake
            .register_ticket("pedro", "caja1", date(), Shift::Pm, "22-40")
            .unwrap();
    }
    let stored = store.tickets_for("pedro", "caja1", date(), Shift::Pm).unwrap();
    assert_eq!(stored.len(), 2);
    let sales: u64 = stored.iter().map(|t| t.summary.total).sum();
    assert_eq!(sales, 50);
}
