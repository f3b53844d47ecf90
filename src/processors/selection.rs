use crate::config::ColumnNames;
use crate::error::{Result, WorklistError};
use crate::models::RecordSet;
use crate::utils::constants::{
    COL_DEC, COL_MAG, COL_RA, COL_SPT, COL_TARGET, UNOBSERVED_MARKER, WORKLIST_COLUMNS,
};
use crate::utils::coordinates::split_ra_dec;
use std::collections::HashMap;
use tracing::{info, warn};

/// Rows picked for a worklist, plus how many were rejected for bad coordinates
#[derive(Debug, Clone)]
pub struct Selection {
    pub records: RecordSet,
    pub rejected: usize,
}

/// Add `RA` and `DEC` columns split out of `source`.
///
/// Rows whose coordinates cannot be split are dropped and counted.
pub fn split_coordinates(
    mut set: RecordSet,
    source: &str,
    divider: &str,
) -> Result<(RecordSet, usize)> {
    require_column(&set, source)?;

    let mut keep = Vec::with_capacity(set.len());
    let mut ra = Vec::with_capacity(set.len());
    let mut dec = Vec::with_capacity(set.len());

    for (i, row) in set.rows().enumerate() {
        let split = row
            .get(source)
            .ok_or_else(|| WorklistError::InvalidCoordinate("empty coordinate cell".to_string()))
            .and_then(|combined| split_ra_dec(combined, divider));

        match split {
            Ok(coords) => {
                keep.push(true);
                ra.push(Some(coords.ra));
                dec.push(Some(coords.dec));
            }
            Err(e) => {
                warn!(row = i + 1, error = %e, "rejecting row with unusable coordinates");
                keep.push(false);
            }
        }
    }

    let rejected = keep.iter().filter(|k| !**k).count();
    if rejected > 0 {
        let mut flags = keep.into_iter();
        set = set.filter(|_| flags.next().unwrap_or(false));
    }

    set.set_column(COL_RA, ra)?;
    set.set_column(COL_DEC, dec)?;

    Ok((set, rejected))
}

/// Targets whose observed flag is filled in and contains `0`
pub fn select_unobserved(set: RecordSet, columns: &ColumnNames, divider: &str) -> Result<Selection> {
    require_column(&set, &columns.observed)?;
    let total = set.len();

    let set = set.filter(|row| {
        row.get(&columns.observed)
            .is_some_and(|flag| flag.contains(UNOBSERVED_MARKER))
    });
    info!(total, unobserved = set.len(), "selected unobserved targets");

    let (mut set, rejected) = split_coordinates(set, &columns.coordinates, divider)?;
    set.rename_columns(&[
        (columns.magnitude.as_str(), COL_MAG),
        (columns.target.as_str(), COL_TARGET),
        (columns.spectral_type.as_str(), COL_SPT),
    ]);

    Ok(Selection {
        records: set.project(&WORKLIST_COLUMNS),
        rejected,
    })
}

/// Detected targets that have only been observed once.
///
/// The magnitude falls back to the secondary column when the primary is
/// blank, and `spt` becomes `"{spectral type} + {detections}"`.
pub fn select_followup(set: RecordSet, columns: &ColumnNames, divider: &str) -> Result<Selection> {
    require_column(&set, &columns.target)?;
    require_column(&set, &columns.detections)?;
    let total = set.len();

    let mut set = set;
    let magnitudes: Vec<Option<String>> = set
        .rows()
        .map(|row| {
            row.get(&columns.magnitude)
                .or_else(|| row.get(&columns.magnitude_fallback))
                .map(str::to_string)
        })
        .collect();
    set.set_column(&columns.magnitude, magnitudes)?;

    let set = set.filter(|row| row.get(&columns.detections).is_some());

    let mut counts: HashMap<String, usize> = HashMap::new();
    for id in set.rows().filter_map(|row| row.get(&columns.target)) {
        *counts.entry(id.to_string()).or_default() += 1;
    }
    let set = set.filter(|row| {
        row.get(&columns.target)
            .is_some_and(|id| counts.get(id) == Some(&1))
    });
    info!(total, followup = set.len(), "selected follow-up targets");

    let (mut set, rejected) = split_coordinates(set, &columns.coordinates, divider)?;

    let spt: Vec<Option<String>> = set
        .rows()
        .map(|row| {
            Some(format!(
                "{} + {}",
                row.get(&columns.spectral_type).unwrap_or_default(),
                row.get(&columns.detections).unwrap_or_default()
            ))
        })
        .collect();

    set.rename_columns(&[
        (columns.magnitude.as_str(), COL_MAG),
        (columns.target.as_str(), COL_TARGET),
    ]);
    set.set_column(COL_SPT, spt)?;

    Ok(Selection {
        records: set.project(&WORKLIST_COLUMNS),
        rejected,
    })
}

fn require_column(set: &RecordSet, name: &str) -> Result<()> {
    if set.has_column(name) {
        Ok(())
    } else {
        Err(WorklistError::MissingColumn(name.to_string()))
    }
}
