//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `fitlog_core` linkage without the mobile shell.
//! - Print a month grid for `[YYYY-MM]` (defaults to the current month).

use chrono::{Datelike, Local, NaiveDate};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use fitlog_core::{build_month_grid, DayCell, MonthView};

#[derive(Parser, Debug)]
#[command(name = "fitlog_cli", version, about = "FitLog core smoke check and month grid")]
struct Cli {
    /// Month to render as `YYYY-MM`; defaults to the current month.
    #[arg(value_name = "YYYY-MM", value_parser = parse_month_arg)]
    month: Option<NaiveDate>,
}

fn main() {
    let cli = Cli::parse();
    println!("fitlog_core ping={}", fitlog_core::ping());
    println!("fitlog_core version={}", fitlog_core::core_version());

    let today = Local::now().date_naive();
    let reference = cli.month.unwrap_or(today);
    let Some(view) = MonthView::build::<fitlog_core::CalendarEvent>(reference, today, &[]) else {
        Cli::command()
            .error(
                ErrorKind::ValueValidation,
                format!("month of {reference} is outside the supported calendar range"),
            )
            .exit();
    };

    println!();
    println!("{:^27}", reference.format("%B %Y").to_string());
    println!(" Su  Mo  Tu  We  Th  Fr  Sa");
    for week in view.weeks() {
        let line: Vec<String> = week.iter().map(render_cell).collect();
        println!("{}", line.join(""));
    }
}

/// Parses `YYYY-MM` into the first day of that month.
fn parse_month_arg(raw: &str) -> Result<NaiveDate, String> {
    let invalid = || format!("invalid month `{raw}`; expected YYYY-MM");
    let (year, month) = raw.trim().split_once('-').ok_or_else(invalid)?;
    let year = year.parse().map_err(|_| invalid())?;
    let month = month.parse().map_err(|_| invalid())?;
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    build_month_grid(first)
        .map(|_| first)
        .ok_or_else(|| format!("month `{raw}` is outside the supported calendar range"))
}

// `[dd]` marks today, `*` a weekend, `.` pads days outside the month.
fn render_cell(cell: &DayCell) -> String {
    let day = cell.date.day();
    if !cell.is_current_month {
        format!(" {:>2} ", ".")
    } else if cell.is_today {
        format!("[{day:>2}]")
    } else if cell.is_weekend {
        format!(" {day:>2}*")
    } else {
        format!(" {day:>2} ")
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_month_arg, render_cell, Cli};
    use chrono::NaiveDate;
    use clap::error::ErrorKind;
    use clap::{CommandFactory, Parser};
    use fitlog_core::MonthView;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn month_argument_is_optional() {
        let cli = Cli::try_parse_from(["fitlog_cli"]).unwrap();
        assert_eq!(cli.month, None);

        let cli = Cli::try_parse_from(["fitlog_cli", "2024-02"]).unwrap();
        assert_eq!(cli.month, NaiveDate::from_ymd_opt(2024, 2, 1));
    }

    #[test]
    fn invalid_month_is_a_usage_error() {
        let err = Cli::try_parse_from(["fitlog_cli", "2024-13"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn parse_month_arg_accepts_year_month() {
        assert_eq!(
            parse_month_arg("2024-02"),
            Ok(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap())
        );
        assert!(parse_month_arg("2024-13").is_err());
        assert!(parse_month_arg("feb").is_err());
        assert!(parse_month_arg("-262143-01")
            .unwrap_err()
            .contains("outside the supported calendar range"));
    }

    #[test]
    fn render_cell_marks_today_weekend_and_padding() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 12).unwrap();
        let view = MonthView::build::<fitlog_core::CalendarEvent>(today, today, &[]).unwrap();
        let rendered: Vec<String> = view.cells.iter().map(render_cell).collect();

        // June 2024 starts on a Saturday.
        assert_eq!(rendered[0], "  . ");
        assert_eq!(rendered[6], "  1*");
        assert_eq!(rendered[17], "[12]");
        assert_eq!(rendered[18], " 13 ");
    }
}
