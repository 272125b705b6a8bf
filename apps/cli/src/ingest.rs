//! CSV ingest for batch and index files.
//!
//! The fetcher delivers one day's snapshot as a CSV with a
//! `financial_assets` column holding a JSON array (the nested field the
//! columnar store later decomposes). The inflation index arrives as a
//! two-column `date,value` CSV.

use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use csv::ReaderBuilder;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::warn;

use wealthwatch_core::{FinancialAsset, WealthRecord};

#[derive(Debug, Deserialize)]
struct BatchRow {
    entity_id: String,
    name: String,
    net_worth: Decimal,
    currency: String,
    #[serde(default)]
    industry: Option<String>,
    #[serde(default)]
    exchange: Option<String>,
    snapshot_date: NaiveDate,
    #[serde(default)]
    financial_assets: Option<String>,
}

#[derive(Debug, Deserialize)]
struct IndexRow {
    date: NaiveDate,
    value: Decimal,
}

/// Reads one day's batch file. Returns the records plus the batch date
/// (the first row's snapshot date; rows disagreeing with it are left for
/// validation to reject).
pub fn read_batch_csv(path: &Path) -> Result<(Vec<WealthRecord>, NaiveDate)> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening batch file {}", path.display()))?;
    parse_batch(file)
}

fn parse_batch<R: Read>(reader: R) -> Result<(Vec<WealthRecord>, NaiveDate)> {
    let mut csv_reader = ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let mut records = Vec::new();
    for row in csv_reader.deserialize::<BatchRow>() {
        let row = match row {
            Ok(row) => row,
            Err(e) => {
                warn!("Skipping unreadable batch row: {}", e);
                continue;
            }
        };
        records.push(WealthRecord {
            entity_id: row.entity_id,
            name: row.name,
            net_worth: row.net_worth,
            currency: row.currency,
            industry: row.industry,
            exchange: row.exchange,
            snapshot_date: row.snapshot_date,
            financial_assets: parse_assets(row.financial_assets.as_deref()),
        });
    }

    let batch_date = match records.first() {
        Some(first) => first.snapshot_date,
        None => bail!("batch file contains no readable records"),
    };
    Ok((records, batch_date))
}

/// Parses the nested JSON assets column; an unreadable cell degrades to an
/// empty holding list rather than sinking the record.
fn parse_assets(raw: Option<&str>) -> Vec<FinancialAsset> {
    let raw = match raw {
        Some(raw) if !raw.trim().is_empty() => raw,
        _ => return Vec::new(),
    };
    match serde_json::from_str(raw) {
        Ok(assets) => assets,
        Err(e) => {
            warn!("Dropping unparseable financial assets cell: {}", e);
            Vec::new()
        }
    }
}

/// Reads the inflation index CSV into date/value pairs.
pub fn read_index_csv(path: &Path) -> Result<Vec<(NaiveDate, Decimal)>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening index file {}", path.display()))?;
    let mut csv_reader = ReaderBuilder::new().trim(csv::Trim::All).from_reader(file);

    let mut pairs = Vec::new();
    for row in csv_reader.deserialize::<IndexRow>() {
        let row = row.context("reading index row")?;
        pairs.push((row.date, row.value));
    }
    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const BATCH: &str = "\
entity_id,name,net_worth,currency,industry,exchange,snapshot_date,financial_assets
p1,Alice Example,2500.5,USD,Technology,NASDAQ,2024-03-01,\"[{\"\"company\"\": \"\"Alpha Corp\"\", \"\"shares\"\": 1000, \"\"sharePrice\"\": 42.5}]\"
p2,Bob Example,1200,USD,,,2024-03-01,
";

    #[test]
    fn parses_batch_rows_and_nested_assets() {
        let (records, batch_date) = parse_batch(BATCH.as_bytes()).unwrap();

        assert_eq!(batch_date, chrono::NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(records.len(), 2);

        let alice = &records[0];
        assert_eq!(alice.entity_id, "p1");
        assert_eq!(alice.net_worth, dec!(2500.5));
        assert_eq!(alice.industry.as_deref(), Some("Technology"));
        assert_eq!(alice.financial_assets.len(), 1);
        assert_eq!(alice.financial_assets[0].company, "Alpha Corp");
        assert_eq!(alice.financial_assets[0].share_price, dec!(42.5));

        let bob = &records[1];
        assert_eq!(bob.industry, None);
        assert!(bob.financial_assets.is_empty());
    }

    #[test]
    fn empty_batch_is_an_error() {
        let empty = "entity_id,name,net_worth,currency,industry,exchange,snapshot_date,financial_assets\n";
        assert!(parse_batch(empty.as_bytes()).is_err());
    }

    #[test]
    fn bad_assets_cell_degrades_to_no_holdings() {
        let csv = "\
entity_id,name,net_worth,currency,industry,exchange,snapshot_date,financial_assets
p1,Alice,1000,USD,,,2024-03-01,not-json
";
        let (records, _) = parse_batch(csv.as_bytes()).unwrap();
        assert!(records[0].financial_assets.is_empty());
    }
}
