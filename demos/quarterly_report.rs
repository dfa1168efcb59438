use congregation_ledger::*;

const PAYLOAD: &str = r#"[
    {"id": 1, "date": "2025-04-06", "income": 1450, "expense": null, "description": "Palm Sunday offering"},
    {"id": 2, "date": "2025-04-18", "income": null, "expense": 320, "description": "Easter candles and flowers"},
    {"id": 3, "date": "2025-05-04", "income": 980, "expense": null, "description": "Sunday offering"},
    {"id": 4, "date": "2025-05-15", "income": null, "expense": 610.4, "description": "Heating oil"},
    {"id": 5, "date": "2025-06-22", "income": 210, "expense": 35, "description": "Bake sale"},
    {"id": 6, "date": "2025-07-06", "income": 1020, "expense": null, "description": "Sunday offering"}
]"#;

fn main() -> Result<()> {
    println!("📊 Quarterly Ledger Demo\n");

    let records = parse_transactions(PAYLOAD)?;
    let reporter = LedgerReporter::new(ReportConfig {
        organization_name: "St. Mary Parish".to_string(),
        default_period: PeriodKind::Quarterly,
        ..ReportConfig::default()
    });

    let today = parse_local_ymd("2025-05-20").unwrap_or_else(today_local);
    let mut period = reporter.config().initial_period(today);

    for _ in 0..2 {
        let report = reporter.report(&records, period)?;
        println!("{}", reporter.view(&report).to_markdown());
        period = period.step(Step::Next);
    }

    println!("Custom range with the dates entered backwards:\n");
    let backwards = reporter.report(
        &records,
        ReportingPeriod::custom_from_inputs("2025-06-30", "2025-04-01"),
    )?;
    println!("{}", reporter.view(&backwards).to_markdown());

    Ok(())
}
