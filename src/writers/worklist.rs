use crate::error::Result;
use crate::models::TargetRecord;
use crate::utils::constants::PROPER_MOTION_FIELDS;
use std::io::Write;
use std::iter::{Enumerate, FusedIterator};
use std::slice;

/// Render one worklist line for the target at 1-based position `index`
///
/// # Examples
/// ```
/// use target_worklist::models::TargetRecord;
/// use target_worklist::writers::format_line;
///
/// let star = TargetRecord::new("StarA".into(), "1 2 3".into(), "+4 5 6".into())
///     .with_mag(5.123)
///     .with_spt("G2V");
/// assert_eq!(
///     format_line(1, &star),
///     "1  \"5.12 G2V StarA  \"   1 2 3  +4 5 6  2000.0  0.0  0.0"
/// );
/// ```
pub fn format_line(index: usize, record: &TargetRecord) -> String {
    let label = match record.usable_mag() {
        Some(mag) => format!("{:.2} {} {}", mag, record.spt, record.target),
        None => format!("{} {}", record.spt, record.target),
    };

    format!(
        "{}  \"{}  \"   {}  {}  {}  {}",
        index, label, record.ra, record.dec, record.epoch, PROPER_MOTION_FIELDS
    )
}

/// Worklist view over normalized targets; lines are produced on demand
#[derive(Debug, Clone, Copy)]
pub struct Worklist<'a> {
    records: &'a [TargetRecord],
}

impl<'a> Worklist<'a> {
    pub fn new(records: &'a [TargetRecord]) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Fresh iterator over the formatted lines, numbered from 1
    pub fn lines(&self) -> Lines<'a> {
        Lines {
            inner: self.records.iter().enumerate(),
        }
    }

    /// Write every line followed by a newline, returning the number written
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<usize> {
        let mut written = 0;
        for line in self.lines() {
            writeln!(writer, "{}", line)?;
            written += 1;
        }
        writer.flush()?;
        Ok(written)
    }
}

impl<'a> IntoIterator for &Worklist<'a> {
    type Item = String;
    type IntoIter = Lines<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines()
    }
}

pub struct Lines<'a> {
    inner: Enumerate<slice::Iter<'a, TargetRecord>>,
}

impl Iterator for Lines<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        self.inner
            .next()
            .map(|(i, record)| format_line(i + 1, record))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Lines<'_> {}
impl FusedIterator for Lines<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn star_a() -> TargetRecord {
        TargetRecord::new("StarA".to_string(), "1 2 3".to_string(), "+4 5 6".to_string())
            .with_spt("G2V")
    }

    #[test]
    fn test_line_with_magnitude() {
        let record = star_a().with_mag(5.123);
        assert_eq!(
            format_line(1, &record),
            r#"1  "5.12 G2V StarA  "   1 2 3  +4 5 6  2000.0  0.0  0.0"#
        );
    }

    #[test]
    fn test_line_without_magnitude() {
        assert_eq!(
            format_line(1, &star_a()),
            r#"1  " G2V StarA  "   1 2 3  +4 5 6  2000.0  0.0  0.0"#
        );
    }

    #[test]
    fn test_magnitude_rounding_and_padding() {
        let record = star_a().with_mag(7.0);
        assert!(format_line(3, &record).starts_with(r#"3  "7.00 G2V"#));
    }

    #[test]
    fn test_lines_are_numbered_in_order_and_restartable() {
        let records = vec![
            star_a(),
            TargetRecord::new("StarB".to_string(), "4 5 6".to_string(), "-7 8 9".to_string())
                .with_epoch("1950.0"),
        ];
        let worklist = Worklist::new(&records);

        let first: Vec<String> = worklist.lines().collect();
        let second: Vec<String> = (&worklist).into_iter().collect();
        assert_eq!(first, second);
        assert_eq!(worklist.lines().len(), 2);

        assert!(first[0].starts_with("1  "));
        assert_eq!(
            first[1],
            r#"2  " StarB  "   4 5 6  -7 8 9  1950.0  0.0  0.0"#
        );
    }

    #[test]
    fn test_write_to() -> Result<()> {
        let records = vec![star_a().with_mag(5.123), star_a()];
        let mut out = Vec::new();

        let written = Worklist::new(&records).write_to(&mut out)?;
        assert_eq!(written, 2);

        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "1  \"5.12 G2V StarA  \"   1 2 3  +4 5 6  2000.0  0.0  0.0\n\
             2  \" G2V StarA  \"   1 2 3  +4 5 6  2000.0  0.0  0.0\n"
        );
        Ok(())
    }

    #[test]
    fn test_empty_worklist() {
        let worklist = Worklist::new(&[]);
        assert!(worklist.is_empty());
        assert_eq!(worklist.lines().count(), 0);
    }
}
