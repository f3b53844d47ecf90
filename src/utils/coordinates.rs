use crate::error::{Result, WorklistError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Right ascension and declination split out of a combined coordinate string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaDec {
    pub ra: String,
    pub dec: String,
}

impl fmt::Display for RaDec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.ra, self.dec)
    }
}

/// Split a combined RA/DEC string into RA and DEC joined with `divider`
///
/// The declination starts at the first `+` or `-`; the sign is kept on the
/// returned DEC. Both halves must hold exactly three whitespace-separated
/// components.
///
/// # Examples
/// ```
/// use target_worklist::utils::split_ra_dec;
///
/// let coords = split_ra_dec("10 20 30-40 50 60", ":").unwrap();
/// assert_eq!(coords.ra, "10:20:30");
/// assert_eq!(coords.dec, "-40:50:60");
/// ```
pub fn split_ra_dec(combined: &str, divider: &str) -> Result<RaDec> {
    let sign_pos = combined.find(['+', '-']).ok_or_else(|| {
        WorklistError::InvalidCoordinate(format!(
            "No declination sign in '{}'. Expected format: 'HH MM SS+DD MM SS'",
            combined
        ))
    })?;

    let (ra_part, dec_part) = combined.split_at(sign_pos);
    let (sign, dec_part) = dec_part.split_at(1);

    let ra = triplet(ra_part, "right ascension", combined)?;
    let dec = triplet(dec_part, "declination", combined)?;

    Ok(RaDec {
        ra: ra.join(divider),
        dec: format!("{}{}", sign, dec.join(divider)),
    })
}

fn triplet<'a>(part: &'a str, label: &str, combined: &str) -> Result<[&'a str; 3]> {
    let tokens: Vec<&str> = part.split_whitespace().collect();

    match tokens.as_slice() {
        [a, b, c] => Ok([*a, *b, *c]),
        _ => Err(WorklistError::InvalidCoordinate(format!(
            "Expected 3 {} components in '{}', got {}",
            label,
            combined,
            tokens.len()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::constants::DEFAULT_DIVIDER;

    #[test]
    fn test_split_positive_declination() {
        let coords = split_ra_dec("10 20 30+40 50 60", DEFAULT_DIVIDER).unwrap();
        assert_eq!(coords.ra, "10 20 30");
        assert_eq!(coords.dec, "+40 50 60");
    }

    #[test]
    fn test_split_negative_declination_with_divider() {
        let coords = split_ra_dec("10 20 30-40 50 60", ":").unwrap();
        assert_eq!(coords.ra, "10:20:30");
        assert_eq!(coords.dec, "-40:50:60");
    }

    #[test]
    fn test_split_normalizes_spacing() {
        // Spreadsheet exports pad fields with runs of spaces
        let coords = split_ra_dec("  05 35 17.30   -05 23 28.0 ", DEFAULT_DIVIDER).unwrap();
        assert_eq!(coords.ra, "05 35 17.30");
        assert_eq!(coords.dec, "-05 23 28.0");
    }

    #[test]
    fn test_first_sign_wins() {
        let coords = split_ra_dec("01 02 03-04 05 -06", DEFAULT_DIVIDER).unwrap();
        assert_eq!(coords.ra, "01 02 03");
        assert_eq!(coords.dec, "-04 05 -06");
    }

    #[test]
    fn test_missing_sign_is_rejected() {
        let err = split_ra_dec("10 20 30 40 50 60", DEFAULT_DIVIDER).unwrap_err();
        assert!(matches!(err, WorklistError::InvalidCoordinate(_)));
    }

    #[test]
    fn test_wrong_token_count_is_rejected() {
        assert!(split_ra_dec("10 20+40 50 60", DEFAULT_DIVIDER).is_err());
        assert!(split_ra_dec("10 20 30+40 50", DEFAULT_DIVIDER).is_err());
        assert!(split_ra_dec("10 20 30 40+40 50 60", DEFAULT_DIVIDER).is_err());
        assert!(split_ra_dec("+40 50 60", DEFAULT_DIVIDER).is_err());
    }

    #[test]
    fn test_rejoining_reproduces_tokens() {
        let samples = [
            ("18 36 56.3", '+', "38 47 01"),
            ("00 08 23.26", '+', "29 05 25.6"),
            ("06 45 08.9", '-', "16 42 58"),
        ];

        for (ra, sign, dec) in samples {
            let combined = format!("{}{}{}", ra, sign, dec);
            let coords = split_ra_dec(&combined, ",").unwrap();

            assert_eq!(coords.ra.split(',').collect::<Vec<_>>(), ra.split(' ').collect::<Vec<_>>());
            assert_eq!(coords.dec.chars().next(), Some(sign));
            assert_eq!(
                coords.dec[1..].split(',').collect::<Vec<_>>(),
                dec.split(' ').collect::<Vec<_>>()
            );
        }
    }

    #[test]
    fn test_display() {
        let coords = split_ra_dec("1 2 3+4 5 6", DEFAULT_DIVIDER).unwrap();
        assert_eq!(coords.to_string(), "1 2 3 +4 5 6");
    }
}
