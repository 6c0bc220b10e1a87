//! Output formatting utilities for CLI operations.

use std::io::{self, Write};

use devstats::{ContributorStats, StatsError, Statistics};

const HEADERS: [&str; 6] = [
    "Author",
    "Merge Time (mean/median/mad) hours",
    "Comments (mean/median/mad)",
    "Commits (mean/median/mad)",
    "Change Size +/- (mean/median/mad)",
    "# of PRs",
];

/// Writes the "Gathering PR stats" progress line.
pub fn write_progress<W: Write>(
    writer: &mut W,
    authors: &[String],
    from_date: &str,
) -> Result<(), StatsError> {
    writeln!(
        writer,
        "Gathering PR stats for {} from [{from_date}]...",
        authors.join(",")
    )
    .map_err(|e| io_error(&e))
}

/// Writes one row per author as an aligned text table.
pub fn write_stats_table<W: Write>(
    writer: &mut W,
    stats: &[ContributorStats],
) -> Result<(), StatsError> {
    let rows: Vec<[String; 6]> = stats.iter().map(row_for).collect();
    let widths = column_widths(&rows);

    write_row(writer, &HEADERS.map(ToOwned::to_owned), &widths)?;
    write_separator(writer, &widths)?;
    for row in &rows {
        write_row(writer, row, &widths)?;
    }
    write_separator(writer, &widths)
}

fn row_for(stats: &ContributorStats) -> [String; 6] {
    [
        stats.author.clone(),
        combined(&stats.merge_time),
        combined(&stats.comments),
        combined(&stats.commits),
        combined(&stats.change_size),
        stats.pull_requests.to_string(),
    ]
}

/// Formats `mean/median/mad` with two decimal places each.
fn combined(statistics: &Statistics) -> String {
    format!(
        "{:.2}/{:.2}/{:.2}",
        statistics.mean, statistics.median, statistics.median_absolute_deviation
    )
}

fn column_widths(rows: &[[String; 6]]) -> [usize; 6] {
    let mut widths = HEADERS.map(str::len);
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }
    widths
}

fn write_row<W: Write>(
    writer: &mut W,
    cells: &[String; 6],
    widths: &[usize; 6],
) -> Result<(), StatsError> {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect();
    writeln!(writer, "| {} |", line.join(" | ")).map_err(|e| io_error(&e))
}

fn write_separator<W: Write>(writer: &mut W, widths: &[usize; 6]) -> Result<(), StatsError> {
    let dashes: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    writeln!(writer, "+-{}-+", dashes.join("-+-")).map_err(|e| io_error(&e))
}

/// Converts an I/O error to a [`StatsError::Io`].
pub(crate) fn io_error(error: &io::Error) -> StatsError {
    StatsError::Io {
        message: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use devstats::{ContributorStats, Statistics};
    use rstest::rstest;

    use super::{write_progress, write_stats_table};

    fn render(stats: &[ContributorStats]) -> String {
        let mut buffer = Vec::new();
        write_stats_table(&mut buffer, stats).expect("should write table");
        String::from_utf8(buffer).expect("output should be valid UTF-8")
    }

    #[rstest]
    fn table_formats_statistics_to_two_decimals() {
        let stats = ContributorStats {
            author: "alice".to_owned(),
            pull_requests: 2,
            merge_time: Statistics {
                mean: 36.0,
                median: 36.0,
                median_absolute_deviation: 12.0,
            },
            commits: Statistics {
                mean: 1.5,
                median: 1.5,
                median_absolute_deviation: 0.5,
            },
            comments: Statistics::default(),
            change_size: Statistics {
                mean: 0.333,
                median: 0.0,
                median_absolute_deviation: 0.0,
            },
        };

        let output = render(&[stats]);

        assert!(output.contains("| alice "), "missing author: {output}");
        assert!(output.contains("36.00/36.00/12.00"), "missing merge time: {output}");
        assert!(output.contains("1.50/1.50/0.50"), "missing commits: {output}");
        assert!(output.contains("0.00/0.00/0.00"), "missing comments: {output}");
        assert!(output.contains("0.33/0.00/0.00"), "missing change size: {output}");
        assert!(output.contains("| 2 "), "missing PR count: {output}");
    }

    #[rstest]
    fn table_keeps_author_order_and_aligns_columns() {
        let row = |author: &str| ContributorStats {
            author: author.to_owned(),
            pull_requests: 0,
            merge_time: Statistics::default(),
            commits: Statistics::default(),
            comments: Statistics::default(),
            change_size: Statistics::default(),
        };

        let output = render(&[row("bob"), row("alexandra")]);

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 5, "header, two separators and two rows");
        let bob = lines.iter().position(|line| line.starts_with("| bob"));
        let alexandra = lines.iter().position(|line| line.starts_with("| alexandra"));
        assert!(bob.is_some(), "missing bob: {output}");
        assert!(bob < alexandra, "rows should follow input order: {output}");
        let widths: Vec<usize> = lines.iter().map(|line| line.len()).collect();
        assert!(
            widths.windows(2).all(|pair| pair.first() == pair.last()),
            "every line should have the same width: {output}"
        );
    }

    #[rstest]
    fn table_without_rows_still_has_headers() {
        let output = render(&[]);

        assert!(output.contains("Merge Time (mean/median/mad) hours"));
        assert!(output.contains("# of PRs"));
    }

    #[rstest]
    fn progress_line_lists_authors_and_date() {
        let mut buffer = Vec::new();
        write_progress(&mut buffer, &["alice".to_owned(), "bob".to_owned()], "2024-01-01")
            .expect("should write progress");

        assert_eq!(
            String::from_utf8(buffer).expect("output should be valid UTF-8"),
            "Gathering PR stats for alice,bob from [2024-01-01]...\n"
        );
    }
}
