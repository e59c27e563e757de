pub mod formatter;
pub mod report;

pub use formatter::{
    format_amount, format_rejections, format_scored_table, format_startup_detail,
    format_summary, format_tsv, should_use_colors,
};
pub use report::{
    default_report_path, format_csv, render, report_rows, write_report, OutputFormat, ReportRow,
};
