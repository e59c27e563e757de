use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::error::Rejection;
use crate::pipeline::BatchSummary;
use crate::startup::{Recommendation, ScoredRecord};

use super::report::ReportRow;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format an amount in compact notation (850, 1.5k, 28.8M, 2.4B)
pub fn format_amount(amount: f64) -> String {
    let abs = amount.abs();
    let formatted = if abs >= 1_000_000_000.0 {
        format!("{:.1}B", amount / 1_000_000_000.0)
    } else if abs >= 1_000_000.0 {
        format!("{:.1}M", amount / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{:.1}k", amount / 1_000.0)
    } else {
        format!("{:.0}", amount)
    };

    // Trim trailing .0 (e.g., "1.0k" -> "1k")
    formatted
        .replace(".0B", "B")
        .replace(".0M", "M")
        .replace(".0k", "k")
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

fn paint_decision(recommendation: Recommendation, padded: &str, use_colors: bool) -> String {
    if !use_colors {
        return padded.to_string();
    }
    match recommendation {
        Recommendation::Invest => padded.green().bold().to_string(),
        Recommendation::Monitor => padded.yellow().to_string(),
        Recommendation::Reject => padded.red().to_string(),
    }
}

const RANK_WIDTH: usize = 4;
const SCORE_WIDTH: usize = 5;
const DECISION_WIDTH: usize = 8;
const RUNWAY_WIDTH: usize = 7;
const LTV_CAC_WIDTH: usize = 7;
const MRR_WIDTH: usize = 7;
const VALUATION_WIDTH: usize = 9;
const SEPARATOR: &str = "  ";

/// Format scored startups as an aligned table with a header row.
///
/// Columns: Rank, Score, Decision, Runway, LTV/CAC, MRR, Valuation, Name.
/// The name comes last so it can be truncated to the terminal width.
pub fn format_scored_table(scored: &[ScoredRecord], use_colors: bool) -> String {
    if scored.is_empty() {
        return "No startups scored.".to_string();
    }

    let term_width = get_terminal_width();
    let fixed_width = RANK_WIDTH
        + SCORE_WIDTH
        + DECISION_WIDTH
        + RUNWAY_WIDTH
        + LTV_CAC_WIDTH
        + MRR_WIDTH
        + VALUATION_WIDTH
        + SEPARATOR.len() * 7;

    let header = format!(
        "{:>rw$}{sep}{:>sw$}{sep}{:<dw$}{sep}{:>ruw$}{sep}{:>lw$}{sep}{:>mw$}{sep}{:>vw$}{sep}{}",
        "Rank",
        "Score",
        "Decision",
        "Runway",
        "LTV/CAC",
        "MRR",
        "Valuation",
        "Name",
        sep = SEPARATOR,
        rw = RANK_WIDTH,
        sw = SCORE_WIDTH,
        dw = DECISION_WIDTH,
        ruw = RUNWAY_WIDTH,
        lw = LTV_CAC_WIDTH,
        mw = MRR_WIDTH,
        vw = VALUATION_WIDTH,
    );
    let header = if use_colors {
        header.bold().to_string()
    } else {
        header
    };

    let rows = scored.iter().map(|s| {
        let name = match term_width {
            Some(width) if width > fixed_width + 10 => truncate_name(s.name(), width - fixed_width),
            // Very narrow terminal, show truncated
            Some(_) => truncate_name(s.name(), 20),
            // No terminal (pipe), don't truncate
            None => s.name().to_string(),
        };

        let rank = format!("{:>width$}", format!("{}.", s.rank), width = RANK_WIDTH);
        let rank = if use_colors {
            rank.dimmed().to_string()
        } else {
            rank
        };
        let decision = format!(
            "{:<width$}",
            s.recommendation.as_str(),
            width = DECISION_WIDTH
        );

        format!(
            "{}{sep}{:>sw$}{sep}{}{sep}{:>ruw$.1}{sep}{:>lw$.2}{sep}{:>mw$}{sep}{:>vw$}{sep}{}",
            rank,
            s.investment_score(),
            paint_decision(s.recommendation, &decision, use_colors),
            s.metrics.runway_months,
            s.metrics.ltv_cac,
            format_amount(s.metrics.mrr),
            format_amount(s.valuation.amount),
            name,
            sep = SEPARATOR,
            sw = SCORE_WIDTH,
            ruw = RUNWAY_WIDTH,
            lw = LTV_CAC_WIDTH,
            mw = MRR_WIDTH,
            vw = VALUATION_WIDTH,
        )
    });

    std::iter::once(header)
        .chain(rows)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format report rows as tab-separated values for scripting
/// Columns follow `ReportRow` field order (no headers, no colors)
pub fn format_tsv(rows: &[ReportRow]) -> String {
    if rows.is_empty() {
        return String::new();
    }

    rows.iter()
        .map(|row| {
            format!(
                "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
                row.name,
                row.investment_score,
                row.rank,
                row.runway_months,
                row.ltv_cac,
                row.mrr,
                row.valuation,
                row.recommendation
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a single startup with metrics and check breakdown (for verbose mode)
pub fn format_startup_detail(scored: &ScoredRecord, use_colors: bool) -> String {
    let m = &scored.metrics;
    let title = format!("#{} {}", scored.rank, scored.name());
    let title = if use_colors {
        title.bold().to_string()
    } else {
        title
    };

    let mut lines = vec![
        title,
        format!(
            "  Score: {} -> {}",
            scored.investment_score(),
            paint_decision(scored.recommendation, scored.recommendation.as_str(), use_colors)
        ),
        format!(
            "  Runway: {:.1} months  LTV/CAC: {:.2}  Margin: {:.1}%",
            m.runway_months,
            m.ltv_cac,
            m.margin * 100.0
        ),
        format!(
            "  MRR: {}  ARR: {}  Burn: {}",
            format_amount(m.mrr),
            format_amount(m.arr),
            format_amount(m.burn)
        ),
        format!(
            "  Valuation: {} (ARR x{})",
            format_amount(scored.valuation.amount),
            scored.valuation.multiple
        ),
    ];

    for check in &scored.score.breakdown.checks {
        let mark = if check.passed { "+" } else { "-" };
        let line = format!(
            "    [{}] {}: {} ({} -> {})",
            mark, check.label, check.description, check.before, check.after
        );
        lines.push(if use_colors && check.passed {
            line.green().to_string()
        } else if use_colors {
            line.dimmed().to_string()
        } else {
            line
        });
    }

    lines.join("\n")
}

/// One-paragraph batch summary
pub fn format_summary(summary: &BatchSummary) -> String {
    let mut out = format!(
        "{} scored, {} rejected | INVEST {} | MONITOR {} | REJECT {}",
        summary.scored, summary.rejected, summary.invest, summary.monitor, summary.reject
    );
    if let Some(mean) = summary.mean_score {
        out.push_str(&format!(
            "\nMean score {:.1} | Total valuation {}",
            mean,
            format_amount(summary.total_valuation)
        ));
    }
    if let Some(ref top) = summary.top_performer {
        out.push_str(&format!(
            "\nTop performer: {} (score {}, valuation {})",
            top.name,
            top.investment_score,
            format_amount(top.valuation)
        ));
    }
    out
}

/// One line per rejected row: "line 4 (Acme): missing required field 'cac'"
pub fn format_rejections(rejected: &[Rejection]) -> String {
    rejected
        .iter()
        .map(|r| format!("{}: {}", r.location(), r.error))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RecordError;
    use crate::pipeline::{process_records, BatchResult};
    use crate::scoring::Rubric;
    use crate::startup::StartupRecord;

    fn sample_record(name: &str, cash: f64) -> StartupRecord {
        StartupRecord {
            name: name.to_string(),
            cash,
            burn_rate: 100_000.0,
            revenue: 150_000.0,
            users: 2000,
            monthly_price: 100.0,
            ltv: 3000.0,
            cac: 900.0,
            growth: 18.0,
        }
    }

    fn sample_batch() -> BatchResult {
        process_records(
            vec![
                sample_record("Acme Analytics", 1_200_000.0),
                sample_record("Beta Robotics", 1_500_000.0),
            ],
            &Rubric::default(),
        )
    }

    // format_amount tests
    #[test]
    fn test_format_amount_small() {
        assert_eq!(format_amount(500.0), "500");
    }

    #[test]
    fn test_format_amount_zero() {
        assert_eq!(format_amount(0.0), "0");
    }

    #[test]
    fn test_format_amount_thousand_exact() {
        assert_eq!(format_amount(1000.0), "1k");
    }

    #[test]
    fn test_format_amount_thousand_decimal() {
        assert_eq!(format_amount(1500.0), "1.5k");
    }

    #[test]
    fn test_format_amount_million() {
        assert_eq!(format_amount(28_800_000.0), "28.8M");
    }

    #[test]
    fn test_format_amount_billion() {
        assert_eq!(format_amount(2_000_000_000.0), "2B");
    }

    #[test]
    fn test_format_amount_negative() {
        assert_eq!(format_amount(-50_000.0), "-50k");
    }

    // truncate_name tests
    #[test]
    fn test_truncate_name_short() {
        assert_eq!(truncate_name("Acme", 20), "Acme");
    }

    #[test]
    fn test_truncate_name_long() {
        assert_eq!(truncate_name("Acme Analytics Holdings", 15), "Acme Analyti...");
    }

    #[test]
    fn test_truncate_name_very_narrow() {
        assert_eq!(truncate_name("Acme", 3), "Acm");
    }

    // format_scored_table tests
    #[test]
    fn test_format_scored_table_empty() {
        assert_eq!(format_scored_table(&[], false), "No startups scored.");
    }

    #[test]
    fn test_format_scored_table_rows_in_rank_order() {
        let batch = sample_batch();
        let result = format_scored_table(&batch.scored, false);
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("Rank"));
        assert!(lines[0].contains("Valuation"));
        assert!(lines[1].starts_with("  1."));
        assert!(lines[1].contains("Beta Robotics"));
        assert!(lines[1].contains("INVEST"));
        assert!(lines[1].contains("28.8M"));
        assert!(lines[2].starts_with("  2."));
        assert!(lines[2].contains("Acme Analytics"));
        assert!(lines[2].contains("MONITOR"));
        assert!(lines[2].contains("12.0"));
        assert!(lines[2].contains("3.33"));
    }

    // format_tsv tests
    #[test]
    fn test_format_tsv_empty() {
        assert_eq!(format_tsv(&[]), "");
    }

    #[test]
    fn test_format_tsv_columns() {
        let rows = crate::output::report_rows(&sample_batch());
        let result = format_tsv(&rows);
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].split('\t').count(), 8);
        assert_eq!(
            lines[1],
            "Acme Analytics\t60\t2\t12\t3.33\t200000\t28800000\tMONITOR"
        );
    }

    #[test]
    fn test_format_startup_detail() {
        let batch = sample_batch();
        let detail = format_startup_detail(&batch.scored[1], false);
        assert!(detail.starts_with("#2 Acme Analytics"));
        assert!(detail.contains("Score: 60 -> MONITOR"));
        assert!(detail.contains("Valuation: 28.8M (ARR x12)"));
        assert!(detail.contains("[-] Runway: 12.0 months, needs >12 (0 -> 0)"));
        assert!(detail.contains("[+] LTV/CAC"));
    }

    #[test]
    fn test_format_summary() {
        let summary = sample_batch().summary();
        let text = format_summary(&summary);
        assert!(text.starts_with("2 scored, 0 rejected | INVEST 1 | MONITOR 1 | REJECT 0"));
        assert!(text.contains("Mean score 70.0"));
        assert!(text.contains("Top performer: Beta Robotics (score 80"));
    }

    #[test]
    fn test_format_summary_empty_batch() {
        let text = format_summary(&BatchSummary::default());
        assert_eq!(text, "0 scored, 0 rejected | INVEST 0 | MONITOR 0 | REJECT 0");
    }

    #[test]
    fn test_format_rejections() {
        let rejected = vec![Rejection {
            index: 0,
            line: Some(4),
            name: Some("Acme".to_string()),
            error: RecordError::MissingField { field: "cac" },
        }];
        assert_eq!(
            format_rejections(&rejected),
            "line 4 (Acme): missing required field 'cac'"
        );
    }
}
