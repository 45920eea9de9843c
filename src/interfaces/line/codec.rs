use crate::domain::account::{Account, Balance};
use crate::error::{LedgerError, Result};
use rust_decimal::Decimal;

/// Separates the five top-level fields of a ledger line.
pub const FIELD_DELIMITER: &str = ",";
/// Separates the entries inside the transactions field.
pub const TRANSACTION_DELIMITER: &str = ";";

/// Encodes an account as a single ledger line:
/// `number,name,surname,balance,txn;txn;...`.
///
/// The balance is written with `Decimal`'s `Display` impl (plain decimal
/// notation, scale preserving), which round-trips through `FromStr`.
/// Free-text fields may not contain delimiter characters or line breaks;
/// violations are rejected here instead of silently corrupting the file.
pub fn encode(account: &Account) -> Result<String> {
    validate_field("name", &account.name, &[FIELD_DELIMITER])?;
    validate_field("surname", &account.surname, &[FIELD_DELIMITER])?;
    for entry in &account.transactions {
        validate_field(
            "transaction entry",
            entry,
            &[FIELD_DELIMITER, TRANSACTION_DELIMITER],
        )?;
    }

    Ok([
        account.number.to_string(),
        account.name.clone(),
        account.surname.clone(),
        account.balance.to_string(),
        account.transactions.join(TRANSACTION_DELIMITER),
    ]
    .join(FIELD_DELIMITER))
}

/// Decodes one ledger line into an account.
///
/// Splits on the first four commas; the last field absorbs any remaining
/// commas. A line with fewer than five fields or a non-numeric balance is
/// a malformed record. An empty transactions field decodes to an empty
/// log, not a one-entry log holding the empty string.
pub fn decode(line: &str) -> Result<Account> {
    let parts: Vec<&str> = line.splitn(5, FIELD_DELIMITER).collect();
    if parts.len() < 5 {
        return Err(LedgerError::MalformedRecord(format!(
            "expected 5 fields, got {}: {:?}",
            parts.len(),
            line
        )));
    }

    let balance: Decimal = parts[3].parse().map_err(|_| {
        LedgerError::MalformedRecord(format!("invalid balance {:?}: {:?}", parts[3], line))
    })?;

    let transactions = if parts[4].is_empty() {
        Vec::new()
    } else {
        parts[4]
            .split(TRANSACTION_DELIMITER)
            .map(str::to_string)
            .collect()
    };

    Ok(Account {
        number: parts[0].into(),
        name: parts[1].to_string(),
        surname: parts[2].to_string(),
        balance: Balance::new(balance),
        transactions,
    })
}

fn validate_field(label: &str, value: &str, delimiters: &[&str]) -> Result<()> {
    if delimiters.iter().any(|d| value.contains(d)) || value.contains(['\n', '\r']) {
        return Err(LedgerError::ValidationError(format!(
            "{} may not contain delimiter characters or line breaks: {:?}",
            label, value
        )));
    }
    Ok(())
}
