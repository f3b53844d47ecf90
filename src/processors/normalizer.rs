use crate::error::{Result, WorklistError};
use crate::models::{RecordSet, Row, TargetRecord};
use crate::utils::constants::{COL_DEC, COL_EPOCH, COL_MAG, COL_RA, COL_SPT, COL_TARGET};
use tracing::{debug, warn};
use validator::Validate;

/// Turn a record set into fully populated targets.
///
/// Required columns (`Target`, `RA`, `DEC`) must exist and be filled in every
/// row. Presence of the optional `spt` and `epoch` columns is decided once for
/// the whole set; an absent column, or a blank cell in a present one, takes
/// the default (`""` and `default_epoch`).
pub fn normalize(set: &RecordSet, default_epoch: &str) -> Result<Vec<TargetRecord>> {
    for column in [COL_TARGET, COL_RA, COL_DEC] {
        if !set.has_column(column) {
            return Err(WorklistError::MissingColumn(column.to_string()));
        }
    }

    let has_spt = set.has_column(COL_SPT);
    let has_epoch = set.has_column(COL_EPOCH);
    let has_mag = set.has_column(COL_MAG);
    debug!(has_spt, has_epoch, has_mag, rows = set.len(), "normalizing record set");

    let mut records = Vec::with_capacity(set.len());
    for (i, row) in set.rows().enumerate() {
        let line = i + 1;

        let spt = if has_spt { row.get(COL_SPT) } else { None };
        let epoch = if has_epoch { row.get(COL_EPOCH) } else { None };

        let record = TargetRecord {
            target: required(&row, COL_TARGET, line)?,
            ra: required(&row, COL_RA, line)?,
            dec: required(&row, COL_DEC, line)?,
            mag: if has_mag { parse_mag(&row, line) } else { None },
            spt: spt.unwrap_or_default().to_string(),
            epoch: epoch.unwrap_or(default_epoch).to_string(),
        };

        record.validate()?;
        records.push(record);
    }

    Ok(records)
}

fn required(row: &Row<'_>, column: &str, line: usize) -> Result<String> {
    row.get(column).map(str::to_string).ok_or_else(|| {
        WorklistError::MissingData(format!("Row {} has no value for '{}'", line, column))
    })
}

fn parse_mag(row: &Row<'_>, line: usize) -> Option<f64> {
    let raw = row.get(COL_MAG)?;
    match raw.parse::<f64>() {
        Ok(mag) if mag.is_finite() => Some(mag),
        _ => {
            warn!(row = line, value = raw, "ignoring unusable magnitude");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(columns: &[&str], rows: &[&[Option<&str>]]) -> RecordSet {
        let mut set = RecordSet::with_columns(columns.iter().copied());
        for row in rows {
            set.push_row(row.iter().map(|c| c.map(str::to_string)).collect());
        }
        set
    }

    #[test]
    fn test_defaults_for_absent_optional_columns() {
        let input = set(
            &["Target", "RA", "DEC", "mag"],
            &[
                &[Some("A"), Some("1 2 3"), Some("+4 5 6"), Some("5.123")],
                &[Some("B"), Some("7 8 9"), Some("-1 2 3"), None],
            ],
        );

        let records = normalize(&input, "2000.0").unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.spt.is_empty()));
        assert!(records.iter().all(|r| r.epoch == "2000.0"));
        assert_eq!(records[0].mag, Some(5.123));
        assert_eq!(records[1].mag, None);
    }

    #[test]
    fn test_present_optional_columns_are_kept() {
        let input = set(
            &["Target", "RA", "DEC", "spt", "epoch"],
            &[
                &[Some("A"), Some("1 2 3"), Some("+4 5 6"), Some("G2V"), Some("1950.0")],
                &[Some("B"), Some("1 2 3"), Some("+4 5 6"), None, None],
            ],
        );

        let records = normalize(&input, "2000.0").unwrap();
        assert_eq!(records[0].spt, "G2V");
        assert_eq!(records[0].epoch, "1950.0");
        assert_eq!(records[1].spt, "");
        assert_eq!(records[1].epoch, "2000.0");
    }

    #[test]
    fn test_missing_required_column_is_fatal() {
        let input = set(&["Target", "RA"], &[&[Some("A"), Some("1 2 3")]]);
        let err = normalize(&input, "2000.0").unwrap_err();
        assert!(matches!(err, WorklistError::MissingColumn(ref c) if c == "DEC"));
    }

    #[test]
    fn test_blank_required_cell_is_fatal() {
        let input = set(
            &["Target", "RA", "DEC"],
            &[
                &[Some("A"), Some("1 2 3"), Some("+4 5 6")],
                &[None, Some("1 2 3"), Some("+4 5 6")],
            ],
        );
        let err = normalize(&input, "2000.0").unwrap_err();
        assert!(matches!(err, WorklistError::MissingData(ref m) if m.contains("Row 2")));
    }

    #[test]
    fn test_unparseable_magnitude_is_dropped() {
        let input = set(
            &["Target", "RA", "DEC", "mag"],
            &[
                &[Some("A"), Some("1 2 3"), Some("+4 5 6"), Some("bright")],
                &[Some("B"), Some("1 2 3"), Some("+4 5 6"), Some("nan")],
            ],
        );
        let records = normalize(&input, "2000.0").unwrap();
        assert_eq!(records[0].mag, None);
        assert_eq!(records[1].mag, None);
    }
}
