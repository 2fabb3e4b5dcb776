//! Bank CSV import
//!
//! Banks disagree on header naming, so columns are resolved against synonym
//! lists instead of fixed positions. Files without a recognizable date,
//! merchant, and amount column are rejected; individual rows that fail to
//! parse are skipped, not fatal.

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use serde_json::Value;
use std::io::Read;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::models::Transaction;

/// Header synonyms for the transaction date column.
const DATE_KEYS: &[&str] = &[
    "date",
    "posting date",
    "transaction date",
    "trans date",
    "posted",
    "posted date",
];

/// Header synonyms for the merchant column.
const MERCHANT_KEYS: &[&str] = &[
    "description",
    "merchant",
    "payee",
    "name",
    "transaction description",
    "details",
    "memo",
];

/// Header synonyms for the amount column.
const AMOUNT_KEYS: &[&str] = &[
    "amount",
    "debit",
    "withdrawal",
    "charge",
    "credit",
    "deposit",
];

/// Find the first header matching a synonym list, by exact lowercase match
/// or substring.
fn find_column(headers: &StringRecord, keys: &[&str]) -> Option<usize> {
    for (i, header) in headers.iter().enumerate() {
        let lower = header.to_lowercase();
        if keys.contains(&lower.as_str()) || keys.iter().any(|key| lower.contains(key)) {
            return Some(i);
        }
    }
    None
}

/// Convert a CSV record to a JSON object using headers as keys
fn record_to_json(headers: &StringRecord, record: &StringRecord) -> String {
    let mut map = serde_json::Map::new();
    for (i, header) in headers.iter().enumerate() {
        if let Some(value) = record.get(i) {
            map.insert(header.to_string(), Value::String(value.to_string()));
        }
    }
    Value::Object(map).to_string()
}

/// Parse bank transactions from CSV.
///
/// Amounts are stored as absolute values; whether a row was a debit or a
/// credit does not survive import. The original row is kept verbatim as
/// JSON in [`Transaction::raw`].
pub fn parse_transactions_csv<R: Read>(reader: R) -> Result<Vec<Transaction>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();

    let date_col = find_column(&headers, DATE_KEYS)
        .ok_or_else(|| Error::Import("No date column found".into()))?;
    let merchant_col = find_column(&headers, MERCHANT_KEYS)
        .ok_or_else(|| Error::Import("No merchant column found".into()))?;
    let amount_col = find_column(&headers, AMOUNT_KEYS)
        .ok_or_else(|| Error::Import("No amount column found".into()))?;

    let debit_col = headers
        .iter()
        .position(|h| h.to_lowercase().contains("debit"));
    let credit_col = headers
        .iter()
        .position(|h| h.to_lowercase().contains("credit"));
    let category_col = headers
        .iter()
        .position(|h| h == "Category")
        .or_else(|| headers.iter().position(|h| h == "category"));

    let mut transactions = Vec::new();
    let mut skipped = 0usize;

    for result in rdr.records() {
        let record = result?;

        let raw = record_to_json(&headers, &record);

        let date_str = record.get(date_col).unwrap_or("");
        let Some(date) = parse_date(date_str) else {
            warn!("Skipping row - unparseable date {:?}", date_str);
            skipped += 1;
            continue;
        };

        let merchant = record.get(merchant_col).unwrap_or("").trim();
        if merchant.is_empty() {
            warn!("Skipping row - empty merchant");
            skipped += 1;
            continue;
        }

        let amount = parse_amount(
            record.get(amount_col).unwrap_or(""),
            &record,
            debit_col,
            credit_col,
        );

        let category = category_col
            .and_then(|i| record.get(i))
            .map(str::to_string)
            .filter(|s| !s.is_empty());

        transactions.push(Transaction {
            date,
            merchant: merchant.to_string(),
            amount: amount.abs(),
            category,
            raw,
        });
    }

    debug!(
        "Parsed {} transactions, skipped {} rows",
        transactions.len(),
        skipped
    );
    Ok(transactions)
}

/// Parse a date string in the formats banks commonly export
fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();

    let formats = [
        "%m/%d/%Y", // 01/15/2024
        "%m/%d/%y", // 01/15/24
        "%Y-%m-%d", // 2024-01-15
        "%m-%d-%Y", // 01-15-2024
        "%d/%m/%Y", // 15/01/2024 (European)
    ];

    formats
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

/// Parse an amount cell, stripping currency symbols and separators.
///
/// When the file carries dedicated debit/credit columns, the sign comes
/// from which of them is populated on the row: debit positive, credit
/// negative.
fn parse_amount(
    raw: &str,
    record: &StringRecord,
    debit_col: Option<usize>,
    credit_col: Option<usize>,
) -> f64 {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    let value = cleaned.parse::<f64>().unwrap_or(0.0);

    let cell = |col: Option<usize>| col.and_then(|i| record.get(i)).unwrap_or("");

    if !cell(debit_col).is_empty() {
        return value.abs();
    }
    if !cell(credit_col).is_empty() {
        return -value.abs();
    }
    value
}
