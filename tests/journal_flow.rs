use coinpnl::application::exchange_link::ExchangeLinker;
use coinpnl::application::journal::Journal;
use coinpnl::application::navigation::{Tab, guard, landing_tab};
use coinpnl::domain::errors::{AuthError, JournalError, LinkError};
use coinpnl::domain::exchange::LinkRequest;
use coinpnl::domain::journal::{EntryDraft, Side};
use coinpnl::infrastructure::storage::InMemoryKeyValueStore;
use coinpnl::interfaces::format::summary_line;
use rust_decimal_macros::dec;
use std::time::Duration;

fn journal() -> Journal<InMemoryKeyValueStore> {
    Journal::open(InMemoryKeyValueStore::new())
}

#[test]
fn test_account_lifecycle_drives_navigation() {
    let mut journal = journal();
    assert_eq!(landing_tab(journal.session()), Tab::Me);

    let route = guard(journal.session(), Tab::Analytics);
    assert_eq!(route.tab, Tab::Me);
    assert!(route.prompt_login);

    journal.signup("  alice  ", "correct-horse", "correct-horse").unwrap();
    assert_eq!(journal.session().unwrap().id, "alice");
    assert_eq!(landing_tab(journal.session()), Tab::Journal);
    assert_eq!(guard(journal.session(), Tab::Analytics).tab, Tab::Analytics);

    journal.logout().unwrap();
    assert!(journal.session().is_none());
    assert_eq!(landing_tab(journal.session()), Tab::Me);

    let err = journal.login("alice", "wrong-password").unwrap_err();
    assert!(matches!(err, JournalError::Auth(AuthError::WrongPassword)));
    assert!(journal.session().is_none());

    journal.login("alice", "correct-horse").unwrap();
    assert_eq!(journal.session().unwrap().name, "alice");
}

#[test]
fn test_signup_errors_in_order() {
    let mut journal = journal();

    let cases = [
        ("", "whatever1", "whatever1", AuthError::MissingCredentials),
        ("bob", "short", "short", AuthError::PasswordTooShort { min: 8 }),
        ("bob", "longenough", "different!", AuthError::PasswordMismatch),
    ];
    for (user, pw, confirm, expected) in cases {
        match journal.signup(user, pw, confirm) {
            Err(JournalError::Auth(e)) => assert_eq!(e, expected),
            other => panic!("expected {:?}, got {:?}", expected, other),
        }
    }

    journal.signup("bob", "longenough", "longenough").unwrap();
    journal.logout().unwrap();
    match journal.signup("bob", "longenough", "longenough") {
        Err(JournalError::Auth(AuthError::DuplicateUser { username })) => {
            assert_eq!(username, "bob")
        }
        other => panic!("expected duplicate user, got {:?}", other),
    }
    assert!(journal.session().is_none());

    match journal.login("carol", "whatever1") {
        Err(JournalError::Auth(AuthError::UnknownUser { .. })) => {}
        other => panic!("expected unknown user, got {:?}", other),
    }
}

#[test]
fn test_entries_and_report() {
    let mut journal = journal();
    journal.save_settings("", "1000").unwrap();

    for (date, pnl) in [
        ("2024-01-01", "100"),
        ("2024-01-02", "-50"),
        ("2024-01-03", "-80"),
        ("2024-01-04", "30"),
    ] {
        journal
            .add_entry(EntryDraft {
                date: date.to_string(),
                preset: "BTC/USDT".to_string(),
                pnl: pnl.to_string(),
                ..Default::default()
            })
            .unwrap();
    }

    let missing = journal.add_entry(EntryDraft {
        date: "2024-01-05".to_string(),
        pnl: "10".to_string(),
        ..Default::default()
    });
    assert!(matches!(missing, Err(JournalError::MissingTicker)));
    assert_eq!(journal.entries().len(), 4);

    let report = journal.report(Some(dec!(1350)));
    assert_eq!(report.analysis.summary.total_pnl, dec!(0));
    assert_eq!(report.analysis.summary.return_ratio, dec!(0));
    assert_eq!(summary_line(&report), "Total 0 USDT / Return 0.00% / MDD -11.82%");
    assert_eq!(report.to_krw(dec!(100)), Some(dec!(135000)));
    assert!(report.entries.iter().all(|e| e.side == Side::Long));

    let first = journal.entries()[0].id.clone();
    assert!(journal.remove_entry(&first).unwrap().is_some());
    assert!(journal.remove_entry("no-such-id").unwrap().is_none());
    assert_eq!(journal.entries().len(), 3);
}

#[tokio::test]
async fn test_exchange_link_demo() {
    let mut journal = journal();
    let linker = ExchangeLinker::new(Duration::from_millis(5));

    let short = linker
        .link(&mut journal, LinkRequest::new("Binance", "abc", "defghijkl", ""))
        .await;
    assert!(matches!(
        short,
        Err(JournalError::Link(LinkError::CredentialsTooShort { min: 8 }))
    ));

    let rejected = linker
        .link(
            &mut journal,
            LinkRequest::new("Binance", "key-FAIL-0001", "secret-0001", ""),
        )
        .await;
    assert!(matches!(rejected, Err(JournalError::Link(LinkError::Rejected { .. }))));
    assert!(!journal.state().is_linked("Binance"));

    let record = linker
        .link(
            &mut journal,
            LinkRequest::new("Binance", "key-0000001", "secret-0001", "pass"),
        )
        .await
        .unwrap();
    assert!(record.linked);
    assert!(journal.state().is_linked("Binance"));

    let raw = journal.store().raw("dj_api_links_v1").unwrap();
    assert!(raw.contains("Binance"));
    assert!(!raw.contains("key-0000001"));
    assert!(!raw.contains("secret-0001"));
}
