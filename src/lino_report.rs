//! Links Notation (Lino) Step Report
//!
//! Records how many exchanges each algorithm needed, and how long it took, for
//! a series of array sizes. Reports are written in Links Notation:
//!
//! ```text
//! step_report:
//!   timestamp '2026-01-01T00:00:00Z'
//!   description 'random values'
//!
//! results:
//!   size_64:
//!     heap:
//!       steps 318
//!       time_ms 0.004
//!       verified true
//! ```
//!
//! and can be converted to a markdown table with the `lino2md` binary.

use std::fmt::Write;
use std::fs;
use std::io;
use std::path::Path;

use crate::algorithm::Algorithm;

/// Outcome of one algorithm on one input size.
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    pub algorithm: Algorithm,
    /// Array size in elements
    pub array_size: usize,
    /// Number of recorded exchanges
    pub steps: usize,
    /// Execution time in milliseconds
    pub time_ms: f64,
    /// Whether the result passed validation
    pub verified: bool,
}

/// A complete step report.
#[derive(Debug, Clone)]
pub struct StepReport {
    /// ISO 8601 timestamp of the run
    pub timestamp: String,
    pub description: String,
    pub results: Vec<StepResult>,
}

impl StepReport {
    pub fn new(description: &str) -> Self {
        StepReport {
            timestamp: chrono_lite_timestamp(),
            description: description.to_string(),
            results: Vec::new(),
        }
    }

    pub fn add_result(&mut self, result: StepResult) {
        self.results.push(result);
    }

    /// Distinct array sizes, ascending.
    pub fn sizes(&self) -> Vec<usize> {
        let mut sizes: Vec<usize> = self.results.iter().map(|r| r.array_size).collect();
        sizes.sort_unstable();
        sizes.dedup();
        sizes
    }

    /// Algorithms with at least one result, in [`Algorithm::ALL`] order.
    pub fn algorithms(&self) -> Vec<Algorithm> {
        Algorithm::ALL
            .into_iter()
            .filter(|&a| self.results.iter().any(|r| r.algorithm == a))
            .collect()
    }

    /// One-line overview, e.g. "3 results across 2 sizes (heap, merge)".
    pub fn summary(&self) -> String {
        let ids: Vec<&str> = self.algorithms().iter().map(|a| a.id()).collect();
        let unverified = self.results.iter().filter(|r| !r.verified).count();
        let mut line = format!(
            "{} results across {} sizes ({})",
            self.results.len(),
            self.sizes().len(),
            ids.join(", ")
        );
        if unverified > 0 {
            write!(line, ", {} unverified", unverified).unwrap();
        }
        line
    }

    fn find(&self, size: usize, algorithm: Algorithm) -> Option<&StepResult> {
        self.results
            .iter()
            .find(|r| r.array_size == size && r.algorithm == algorithm)
    }

    fn results_for(&self, size: usize) -> impl Iterator<Item = &StepResult> {
        self.results.iter().filter(move |r| r.array_size == size)
    }

    /// Generate the report in Links Notation format
    pub fn to_lino(&self) -> String {
        let mut output = String::new();

        writeln!(output, "step_report:").unwrap();
        writeln!(output, "  timestamp '{}'", self.timestamp).unwrap();
        writeln!(output, "  description '{}'", escape_lino_string(&self.description)).unwrap();

        writeln!(output).unwrap();
        writeln!(output, "results:").unwrap();

        let sizes = self.sizes();
        for &size in &sizes {
            writeln!(output, "  size_{}:", size).unwrap();
            for result in self.results_for(size) {
                writeln!(output, "    {}:", result.algorithm.id()).unwrap();
                writeln!(output, "      steps {}", result.steps).unwrap();
                writeln!(output, "      time_ms {:.3}", result.time_ms).unwrap();
                writeln!(output, "      verified {}", result.verified).unwrap();
            }
        }

        writeln!(output).unwrap();
        writeln!(output, "comparisons:").unwrap();

        for &size in &sizes {
            let fewest = self.results_for(size).min_by_key(|r| r.steps);
            let fastest = self
                .results_for(size)
                .min_by(|a, b| a.time_ms.total_cmp(&b.time_ms));

            if let (Some(fewest), Some(fastest)) = (fewest, fastest) {
                writeln!(output, "  size_{}:", size).unwrap();
                writeln!(output, "    fewest_steps {}", fewest.algorithm.id()).unwrap();
                writeln!(output, "    fastest {}", fastest.algorithm.id()).unwrap();
            }
        }

        output
    }

    /// Save the report to a file in Links Notation format
    pub fn save_lino(&self, path: &Path) -> io::Result<()> {
        fs::write(path, self.to_lino())
    }

    /// Generate a markdown table from the report
    pub fn to_markdown_table(&self) -> String {
        let mut output = String::new();

        writeln!(output, "# Sorting Step Report").unwrap();
        writeln!(output).unwrap();
        writeln!(output, "**Timestamp:** {}", self.timestamp).unwrap();
        writeln!(output, "**Description:** {}", self.description).unwrap();
        writeln!(output).unwrap();

        let sizes = self.sizes();

        writeln!(output, "## Steps").unwrap();
        writeln!(output).unwrap();
        write_header(&mut output);
        for &size in &sizes {
            let cells: Vec<String> = Algorithm::ALL
                .iter()
                .map(|&a| {
                    self.find(size, a)
                        .map(|r| {
                            let mark = if r.verified { "" } else { " (unverified)" };
                            format!("{}{}", r.steps, mark)
                        })
                        .unwrap_or_else(|| "N/A".to_string())
                })
                .collect();
            writeln!(output, "| {} | {} |", format_size(size), cells.join(" | ")).unwrap();
        }
        writeln!(output).unwrap();

        writeln!(output, "## Time (ms)").unwrap();
        writeln!(output).unwrap();
        write_header(&mut output);
        for &size in &sizes {
            let cells: Vec<String> = Algorithm::ALL
                .iter()
                .map(|&a| {
                    self.find(size, a)
                        .map(|r| format!("{:.3}", r.time_ms))
                        .unwrap_or_else(|| "N/A".to_string())
                })
                .collect();
            writeln!(output, "| {} | {} |", format_size(size), cells.join(" | ")).unwrap();
        }

        writeln!(output).unwrap();
        writeln!(output, "---").unwrap();
        writeln!(output, "*Report generated by visual-sorting*").unwrap();

        output
    }

    /// Save the report as a markdown file
    pub fn save_markdown(&self, path: &Path) -> io::Result<()> {
        fs::write(path, self.to_markdown_table())
    }
}

fn write_header(output: &mut String) {
    let names: Vec<&str> = Algorithm::ALL.iter().map(|a| a.name()).collect();
    writeln!(output, "| Size | {} |", names.join(" | ")).unwrap();
    writeln!(output, "|------|{}", "------|".repeat(names.len())).unwrap();
}

/// Escape a string for a single-quoted Links Notation value.
///
/// Backslash, quote and line breaks are escaped so the value stays on one line.
fn escape_lino_string(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\'' => escaped.push_str("\\'"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Inverse of [`escape_lino_string`]. Unknown escapes are kept verbatim.
fn unescape_lino_string(s: &str) -> String {
    let mut unescaped = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            unescaped.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => unescaped.push('\n'),
            Some('r') => unescaped.push('\r'),
            Some(other @ ('\\' | '\'')) => unescaped.push(other),
            Some(other) => {
                unescaped.push('\\');
                unescaped.push(other);
            }
            None => unescaped.push('\\'),
        }
    }
    unescaped
}

/// Format a size as a human-readable string (e.g., "1K", "1M")
fn format_size(size: usize) -> String {
    if size >= 1_000_000 {
        format!("{}M", size / 1_000_000)
    } else if size >= 1_000 {
        format!("{}K", size / 1_000)
    } else {
        size.to_string()
    }
}

/// Generate a UTC timestamp without a date/time dependency
fn chrono_lite_timestamp() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};

    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    let mut remaining_days = (secs / 86400) as i64;
    let time_of_day = secs % 86400;

    let mut year = 1970i64;
    loop {
        let days_in_year = if is_leap_year(year) { 366 } else { 365 };
        if remaining_days < days_in_year {
            break;
        }
        remaining_days -= days_in_year;
        year += 1;
    }

    let february = if is_leap_year(year) { 29 } else { 28 };
    let days_in_months = [31, february, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

    let mut month = 1;
    for days in days_in_months {
        if remaining_days < days {
            break;
        }
        remaining_days -= days;
        month += 1;
    }

    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
        year,
        month,
        remaining_days + 1,
        time_of_day / 3600,
        (time_of_day % 3600) / 60,
        time_of_day % 60
    )
}

fn is_leap_year(year: i64) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

/// Parse a Links Notation step report.
///
/// Only the `results:` section is read back; `comparisons:` is derived data.
/// Returns `None` when no result could be recovered.
pub fn parse_lino_report(content: &str) -> Option<StepReport> {
    let mut report = StepReport::new("Parsed report");
    let mut current_size: Option<usize> = None;
    let mut current_result: Option<StepResult> = None;
    let mut in_results_section = false;

    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        match trimmed {
            "results:" => {
                in_results_section = true;
                continue;
            }
            "comparisons:" => {
                report.results.extend(current_result.take());
                in_results_section = false;
                current_size = None;
                continue;
            }
            _ => {}
        }

        if trimmed.starts_with("timestamp '") {
            if let Some(ts) = extract_quoted_value(trimmed, "timestamp") {
                report.timestamp = ts;
            }
            continue;
        }
        if trimmed.starts_with("description '") {
            if let Some(desc) = extract_quoted_value(trimmed, "description") {
                report.description = desc;
            }
            continue;
        }

        if !in_results_section {
            continue;
        }

        if let Some(header) = trimmed.strip_suffix(':') {
            if let Some(size) = header.strip_prefix("size_") {
                report.results.extend(current_result.take());
                current_size = size.parse().ok();
            } else if let (Some(size), Ok(algorithm)) = (current_size, header.parse::<Algorithm>()) {
                report.results.extend(current_result.take());
                current_result = Some(StepResult {
                    algorithm,
                    array_size: size,
                    steps: 0,
                    time_ms: 0.0,
                    verified: false,
                });
            }
            continue;
        }

        if let Some(ref mut result) = current_result {
            if let Some(value) = trimmed.strip_prefix("steps ") {
                if let Ok(steps) = value.parse() {
                    result.steps = steps;
                }
            } else if let Some(value) = trimmed.strip_prefix("time_ms ") {
                if let Ok(time) = value.parse() {
                    result.time_ms = time;
                }
            } else if let Some(value) = trimmed.strip_prefix("verified ") {
                result.verified = value == "true";
            }
        }
    }

    report.results.extend(current_result);

    if report.results.is_empty() {
        None
    } else {
        Some(report)
    }
}

fn extract_quoted_value(line: &str, prefix: &str) -> Option<String> {
    let value = line.strip_prefix(prefix)?.trim();
    let inner = value.strip_prefix('\'')?.strip_suffix('\'')?;
    Some(unescape_lino_string(inner))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> StepReport {
        let mut report = StepReport::new("Test run");
        report.add_result(StepResult {
            algorithm: Algorithm::HeapSort,
            array_size: 1024,
            steps: 9000,
            time_ms: 0.25,
            verified: true,
        });
        report.add_result(StepResult {
            algorithm: Algorithm::MergeSort,
            array_size: 1024,
            steps: 4200,
            time_ms: 0.5,
            verified: true,
        });
        report
    }

    #[test]
    fn test_report_to_lino() {
        let lino = sample_report().to_lino();
        assert!(lino.contains("step_report:"));
        assert!(lino.contains("  size_1024:"));
        assert!(lino.contains("    heap:"));
        assert!(lino.contains("      steps 9000"));
        assert!(lino.contains("      time_ms 0.250"));
        assert!(lino.contains("    fewest_steps merge"));
        assert!(lino.contains("    fastest heap"));
    }

    #[test]
    fn test_parse_lino_report() {
        let report = sample_report();
        let parsed = parse_lino_report(&report.to_lino()).unwrap();

        assert_eq!(parsed.timestamp, report.timestamp);
        assert_eq!(parsed.description, "Test run");
        assert_eq!(parsed.results.len(), 2);
        assert_eq!(parsed.results[0].algorithm, Algorithm::HeapSort);
        assert_eq!(parsed.results[0].steps, 9000);
        assert_eq!(parsed.results[1].algorithm, Algorithm::MergeSort);
        assert!(parsed.results[1].verified);
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(parse_lino_report("step_report:\n  description 'x'\n").is_none());
    }

    #[test]
    fn test_markdown_table() {
        let md = sample_report().to_markdown_table();
        assert!(md.contains("| Size | Quick Sort | Heap Sort | Insertion Sort | Merge Sort |"));
        assert!(md.contains("| 1K | N/A | 9000 | N/A | 4200 |"));
        assert!(md.contains("| 1K | N/A | 0.250 | N/A | 0.500 |"));
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(500), "500");
        assert_eq!(format_size(1024), "1K");
        assert_eq!(format_size(1_048_576), "1M");
    }

    #[test]
    fn test_escape_lino_string() {
        assert_eq!(escape_lino_string("hello"), "hello");
        assert_eq!(escape_lino_string("it's"), "it\\'s");
        assert_eq!(
            extract_quoted_value("description 'it\\'s'", "description"),
            Some("it's".to_string())
        );
    }

    #[test]
    fn test_description_with_line_breaks_round_trips() {
        let mut report = sample_report();
        report.description = "run 'a'\nC:\\data\r\nend".to_string();

        let lino = report.to_lino();
        let line = lino
            .lines()
            .find(|l| l.trim_start().starts_with("description "))
            .unwrap();
        assert_eq!(line, "  description 'run \\'a\\'\\nC:\\\\data\\r\\nend'");

        let parsed = parse_lino_report(&lino).unwrap();
        assert_eq!(parsed.description, report.description);
        assert_eq!(parsed.results.len(), 2);
    }

    #[test]
    fn test_unescape_keeps_unknown_escapes() {
        assert_eq!(unescape_lino_string("a\\tb"), "a\\tb");
        assert_eq!(unescape_lino_string("trailing\\"), "trailing\\");
    }

    #[test]
    fn test_summary() {
        let mut report = sample_report();
        report.add_result(StepResult {
            algorithm: Algorithm::HeapSort,
            array_size: 64,
            steps: 300,
            time_ms: 0.01,
            verified: false,
        });
        assert_eq!(report.sizes(), vec![64, 1024]);
        assert_eq!(report.algorithms(), vec![Algorithm::HeapSort, Algorithm::MergeSort]);
        assert_eq!(report.summary(), "3 results across 2 sizes (heap, merge), 1 unverified");

        let parsed = parse_lino_report(&sample_report().to_lino()).unwrap();
        assert_eq!(parsed.summary(), "2 results across 1 sizes (heap, merge)");
    }

    #[test]
    fn test_timestamp_shape() {
        let ts = chrono_lite_timestamp();
        assert_eq!(ts.len(), 20);
        assert!(ts.ends_with('Z'));
        assert_eq!(&ts[10..11], "T");
    }
}
