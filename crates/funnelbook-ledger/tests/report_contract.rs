use chrono::NaiveDate;
use funnelbook_ledger::{export_csv, report_file_name, Ledger, OpportunityDraft, Session, SystemClock};
use funnelbook_model::{ClientId, Collection, Product, Status};
use funnelbook_store::MemoryStore;

#[test]
fn export_of_never_written_collection_is_header_only() {
    let store = MemoryStore::new();
    let bytes = export_csv(&store, Collection::PlanCuenta).expect("export");
    let text = String::from_utf8(bytes).expect("utf8");
    let mut lines = text.lines();
    let header = lines.next().expect("header");
    assert_eq!(
        header,
        Collection::PlanCuenta.columns().join(",")
    );
    assert_eq!(lines.next(), None);
}

#[test]
fn export_contains_one_data_row_per_record() {
    let store = MemoryStore::new();
    let ledger = Ledger::new(&store);
    let session = Session::login("com-01", &SystemClock).expect("session");
    for name in ["Acme", "Globex"] {
        ledger
            .record_opportunity(
                &session,
                OpportunityDraft {
                    client_id: ClientId::new(7).expect("client"),
                    client_name: name.to_string(),
                    product: Product::Cdt,
                    value: 250_000.0,
                    expected_close_date: NaiveDate::from_ymd_opt(2026, 11, 15).expect("date"),
                    status: Status::EnContacto,
                },
            )
            .expect("record");
    }

    let bytes = export_csv(&store, Collection::Funnel).expect("export");
    let text = String::from_utf8(bytes).expect("utf8");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("no_oportunidad"));
    assert!(lines[1].contains("Acme"));
    assert!(lines[2].contains("Globex"));
}

#[test]
fn report_file_name_is_dated() {
    let date = NaiveDate::from_ymd_opt(2026, 8, 27).expect("date");
    assert_eq!(
        report_file_name(Collection::Funnel, date),
        "reporte_funnel_20260827.csv"
    );
    assert_eq!(
        report_file_name(Collection::Bitacora, date),
        "reporte_bitacora_20260827.csv"
    );
}
