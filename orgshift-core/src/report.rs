//! Transfer result reporting

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::transfer::TransferOutcome;

/// One table row per processed repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub repository: String,
    pub status: String,
    /// Reason or error, `-` when there is none
    pub note: String,
}

/// Summary of a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferReport {
    pub total: usize,
    pub succeeded: usize,
    /// Everything that did not succeed, unconfirmed included
    pub failed: usize,
    /// Submitted transfers whose completion was never observed
    pub unconfirmed: usize,
    pub rows: Vec<ReportRow>,
}

/// Summarize outcomes; pure, rows keep the outcome order
pub fn generate_report(outcomes: &[TransferOutcome]) -> TransferReport {
    let succeeded = outcomes.iter().filter(|o| o.succeeded()).count();
    let unconfirmed = outcomes.iter().filter(|o| o.status.is_unconfirmed()).count();

    let rows = outcomes
        .iter()
        .map(|o| ReportRow {
            repository: o.repository.clone(),
            status: o.status.label().to_string(),
            note: o.reason.clone().unwrap_or_else(|| "-".to_string()),
        })
        .collect();

    TransferReport {
        total: outcomes.len(),
        succeeded,
        failed: outcomes.len() - succeeded,
        unconfirmed,
        rows,
    }
}

const HEADERS: [&str; 3] = ["Repository", "Status", "Reason / Note"];

impl fmt::Display for TransferReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Transfer Report ===")?;
        writeln!(f, "Total: {}", self.total)?;
        writeln!(f, "Succeeded: {}", self.succeeded)?;
        write!(f, "Failed: {}", self.failed)?;
        if self.unconfirmed > 0 {
            write!(f, " ({} unconfirmed)", self.unconfirmed)?;
        }
        writeln!(f)?;
        writeln!(f)?;

        let cells: Vec<[&str; 3]> = self
            .rows
            .iter()
            .map(|r| [r.repository.as_str(), r.status.as_str(), r.note.as_str()])
            .collect();
        write_grid(f, &HEADERS, &cells)
    }
}

/// Render a `+---+` bordered table
pub fn write_grid<const N: usize>(
    f: &mut impl fmt::Write,
    headers: &[&str; N],
    rows: &[[&str; N]],
) -> fmt::Result {
    let mut widths: [usize; N] = std::array::from_fn(|i| headers[i].chars().count());
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let border = |f: &mut dyn fmt::Write, fill: char| -> fmt::Result {
        for width in &widths {
            write!(f, "+{}", fill.to_string().repeat(width + 2))?;
        }
        writeln!(f, "+")
    };
    let line = |f: &mut dyn fmt::Write, cells: &[&str; N]| -> fmt::Result {
        for (cell, width) in cells.iter().zip(&widths) {
            let pad = width - cell.chars().count();
            write!(f, "| {}{} ", cell, " ".repeat(pad))?;
        }
        writeln!(f, "|")
    };

    border(f, '-')?;
    line(f, headers)?;
    border(f, '=')?;
    for row in rows {
        line(f, row)?;
        border(f, '-')?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transfer::OutcomeStatus;

    fn outcomes() -> Vec<TransferOutcome> {
        vec![
            TransferOutcome::completed("api"),
            TransferOutcome::failed("fork", OutcomeStatus::Ineligible, "fork repositories cannot be transferred"),
            TransferOutcome::failed("slow", OutcomeStatus::Unconfirmed, "transfer timed out"),
        ]
    }

    #[test]
    fn test_counts() {
        let report = generate_report(&outcomes());
        assert_eq!(report.total, 3);
        assert_eq!(report.succeeded, 1);
        assert_eq!(report.failed, 2);
        assert_eq!(report.unconfirmed, 1);
    }

    #[test]
    fn test_rows_keep_order_and_dash_for_missing_reason() {
        let report = generate_report(&outcomes());
        let names: Vec<&str> = report.rows.iter().map(|r| r.repository.as_str()).collect();
        assert_eq!(names, vec!["api", "fork", "slow"]);
        assert_eq!(report.rows[0].note, "-");
        assert_eq!(report.rows[0].status, "success");
        assert_eq!(report.rows[2].status, "unconfirmed");
    }

    #[test]
    fn test_empty_report() {
        let report = generate_report(&[]);
        assert_eq!((report.total, report.succeeded, report.failed), (0, 0, 0));
        assert!(report.rows.is_empty());
    }

    #[test]
    fn test_render() {
        let text = generate_report(&outcomes()).to_string();
        assert!(text.contains("Total: 3"));
        assert!(text.contains("Failed: 2 (1 unconfirmed)"));
        assert!(text.contains("| api "));
        assert!(text.contains("| fork repositories cannot be transferred |"));
    }

    #[test]
    fn test_grid_alignment() {
        let mut out = String::new();
        write_grid(&mut out, &["a", "bb"], &[["xyz", "1"]]).unwrap();
        let expected = "\
+-----+----+
| a   | bb |
+=====+====+
| xyz | 1  |
+-----+----+
";
        assert_eq!(out, expected);
    }
}
