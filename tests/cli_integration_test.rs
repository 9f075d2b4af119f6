//! CLI integration tests for config resolution and command orchestration.
//!
//! Tests cover:
//! - Currency and history resolution (flag vs config precedence)
//! - The report command end to end with real INI and CSV files on disk
//! - The value and validate commands' exit behavior

use folio::adapters::file_config_adapter::FileConfigAdapter;
use folio::cli;
use folio::domain::currency::Currency;
use folio::domain::error::FolioError;
use std::io::Write;
use std::path::PathBuf;

fn write_temp_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

const VALID_INI: &str = r#"
[report]
currency = EUR
decimals = 3

[rates]
dollars_to_euros = 0.8

[prices]
dol_dollars = 1
dol_euros = 4.5
eu_dollars = 5.2
eu_euros = 1
bond1_dollars = 5.2
bond1_euros = 4.5
stock1_dollars = 5.2
stock1_euros = 4.5
"#;

const SCENARIO_CSV: &str = "\
date,kind,id,quantity,currency,unit_cost,out_kind,out_id,out_quantity
2020-01-01,CASH,DOL,1000,USD,1.0,,,
2020-01-01,CASH,EU,1000,EUR,1.0,,,
2020-02-14,BOND,BOND1,50,USD,3.2,CASH,DOL,160
2020-02-14,STOCK,STOCK1,60,EUR,2.1,CASH,EU,126
2020-03-15,CASH,DOL,240,USD,1.0,BOND,BOND1,40
";

mod currency_resolution {
    use super::*;

    #[test]
    fn flag_overrides_config() {
        let adapter = FileConfigAdapter::from_string("[report]\ncurrency = EUR\n").unwrap();
        let currency = cli::resolve_currency(Some(Currency::Dollars), &adapter).unwrap();
        assert_eq!(currency, Currency::Dollars);
    }

    #[test]
    fn config_supplies_the_currency() {
        let adapter = FileConfigAdapter::from_string("[report]\ncurrency = EUR\n").unwrap();
        let currency = cli::resolve_currency(None, &adapter).unwrap();
        assert_eq!(currency, Currency::Euros);
    }

    #[test]
    fn missing_everywhere_is_an_error() {
        let adapter = FileConfigAdapter::from_string("").unwrap();
        let err = cli::resolve_currency(None, &adapter).unwrap_err();
        assert!(matches!(err, FolioError::ConfigMissing { key, .. } if key == "currency"));
    }

    #[test]
    fn unparseable_config_value_is_invalid() {
        let adapter = FileConfigAdapter::from_string("[report]\ncurrency = YEN\n").unwrap();
        let err = cli::resolve_currency(None, &adapter).unwrap_err();
        assert!(matches!(err, FolioError::ConfigInvalid { key, .. } if key == "currency"));
    }
}

mod history_resolution {
    use super::*;

    #[test]
    fn flag_overrides_config() {
        let adapter = FileConfigAdapter::from_string("[history]\nfile = trades.csv\n").unwrap();
        let path = PathBuf::from("override.csv");
        let resolved = cli::resolve_history(Some(&path), &adapter).unwrap();
        assert_eq!(resolved, path);
    }

    #[test]
    fn config_supplies_the_file() {
        let adapter = FileConfigAdapter::from_string("[history]\nfile = trades.csv\n").unwrap();
        let resolved = cli::resolve_history(None, &adapter).unwrap();
        assert_eq!(resolved, PathBuf::from("trades.csv"));
    }

    #[test]
    fn missing_everywhere_is_an_error() {
        let adapter = FileConfigAdapter::from_string("").unwrap();
        let err = cli::resolve_history(None, &adapter).unwrap_err();
        assert!(matches!(err, FolioError::ConfigMissing { key, .. } if key == "file"));
    }
}

mod report_command {
    use super::*;

    #[test]
    fn report_writes_the_scenario_valuation() {
        let ini = write_temp_file(VALID_INI);
        let csv = write_temp_file(SCENARIO_CSV);
        let out_dir = tempfile::TempDir::new().unwrap();
        let output = out_dir.path().join("report.txt");

        let exit_code = cli::run_report(
            &PathBuf::from(ini.path()),
            Some(&PathBuf::from(csv.path())),
            None,
            Some(&output),
        );

        // ExitCode has no PartialEq; inspect the debug form.
        let code = format!("{exit_code:?}");
        assert!(code.contains("0"), "expected success, got: {code}");

        let content = std::fs::read_to_string(&output).unwrap();
        assert!(content.starts_with("Portfolio value: 6049.000 Euros\n"));
        assert!(content.contains(
            "DOL (CASH): quantity 1080, value 4860.000 Euros, profit 3996.000 Euros"
        ));
        assert!(content.contains(
            "EU (CASH): quantity 874, value 874.000 Euros, profit 0.000 Euros"
        ));
        assert!(content.contains(
            "BOND1 (BOND): quantity 10, value 45.000 Euros, profit 19.400 Euros"
        ));
        assert!(content.contains(
            "STOCK1 (STOCK): quantity 60, value 270.000 Euros, profit 144.000 Euros"
        ));

        let dol_at = content.find("DOL (CASH)").unwrap();
        let stock_at = content.find("STOCK1 (STOCK)").unwrap();
        assert!(dol_at < stock_at, "report must keep first-appearance order");
    }

    #[test]
    fn currency_flag_switches_the_report() {
        let ini = write_temp_file(VALID_INI);
        let csv = write_temp_file(SCENARIO_CSV);
        let out_dir = tempfile::TempDir::new().unwrap();
        let output = out_dir.path().join("report.txt");

        let exit_code = cli::run_report(
            &PathBuf::from(ini.path()),
            Some(&PathBuf::from(csv.path())),
            Some(Currency::Dollars),
            Some(&output),
        );

        let code = format!("{exit_code:?}");
        assert!(code.contains("0"), "expected success, got: {code}");

        let content = std::fs::read_to_string(&output).unwrap();
        assert!(content.starts_with("Portfolio value: 5988.800 Dollars\n"));
        // Converting the EU cost basis runs through the reciprocal of
        // the dollars_to_euros entry.
        assert!(content.contains(
            "EU (CASH): quantity 874, value 4544.800 Dollars, profit 3452.300 Dollars"
        ));
    }

    #[test]
    fn malformed_history_fails() {
        let ini = write_temp_file(VALID_INI);
        let csv = write_temp_file("date,kind,id\ngarbage\n");
        let out_dir = tempfile::TempDir::new().unwrap();
        let output = out_dir.path().join("report.txt");

        let exit_code = cli::run_report(
            &PathBuf::from(ini.path()),
            Some(&PathBuf::from(csv.path())),
            None,
            Some(&output),
        );

        let code = format!("{exit_code:?}");
        assert!(!code.contains("0"), "expected failure, got: {code}");
        assert!(!output.exists(), "no report should be written");
    }

    #[test]
    fn missing_currency_everywhere_fails() {
        let ini = write_temp_file("[prices]\ndol_euros = 4.5\n");
        let csv = write_temp_file(SCENARIO_CSV);

        let exit_code = cli::run_report(
            &PathBuf::from(ini.path()),
            Some(&PathBuf::from(csv.path())),
            None,
            None,
        );

        let code = format!("{exit_code:?}");
        assert!(!code.contains("0"), "expected failure, got: {code}");
    }
}

mod value_and_validate {
    use super::*;

    #[test]
    fn validate_accepts_a_good_history() {
        let csv = write_temp_file(SCENARIO_CSV);
        let exit_code = cli::run_validate(&PathBuf::from(csv.path()));
        let code = format!("{exit_code:?}");
        assert!(code.contains("0"), "expected success, got: {code}");
    }

    #[test]
    fn validate_rejects_a_bad_history() {
        let csv = write_temp_file(
            "date,kind,id,quantity,currency,unit_cost,out_kind,out_id,out_quantity\n\
             2020-01-01,HOUSE,H1,1,USD,1.0,,,\n",
        );
        let exit_code = cli::run_validate(&PathBuf::from(csv.path()));
        let code = format!("{exit_code:?}");
        assert!(!code.contains("0"), "expected failure, got: {code}");
    }

    #[test]
    fn value_succeeds_against_the_scenario() {
        let ini = write_temp_file(VALID_INI);
        let csv = write_temp_file(SCENARIO_CSV);

        let exit_code = cli::run_value(
            &PathBuf::from(ini.path()),
            Some(&PathBuf::from(csv.path())),
            None,
        );

        let code = format!("{exit_code:?}");
        assert!(code.contains("0"), "expected success, got: {code}");
    }

    #[test]
    fn value_fails_when_a_quote_is_missing() {
        // No stock1_euros entry: valuing STOCK1 in Euros has no quote.
        let ini = write_temp_file(
            "[report]\ncurrency = EUR\n\n[rates]\ndollars_to_euros = 0.8\n\n\
             [prices]\ndol_euros = 4.5\neu_euros = 1\nbond1_euros = 4.5\n",
        );
        let csv = write_temp_file(SCENARIO_CSV);

        let exit_code = cli::run_value(
            &PathBuf::from(ini.path()),
            Some(&PathBuf::from(csv.path())),
            None,
        );

        let code = format!("{exit_code:?}");
        assert!(!code.contains("0"), "expected failure, got: {code}");
    }
}
