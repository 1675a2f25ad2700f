mod app;
mod calendar;
mod help;
mod picker;
mod theme;
use crate::app::App;
use crate::calendar::WeekStart;
use crate::picker::{PickerOptions, WeekPicker};
use anyhow::Context;
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use std::ffi::OsString;
use std::fs::File;
use std::path::{Path, PathBuf};
use time::{
    format_description::{parse_owned, BorrowedFormatItem},
    macros::format_description,
    Date, OffsetDateTime,
};

static YMD_FMT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run(RunOptions),
    Help,
    Version,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct RunOptions {
    date: Option<Date>,
    min: Option<Date>,
    max: Option<Date>,
    format: Option<String>,
    week_start: WeekStart,
    week_numbers: bool,
    log: Option<PathBuf>,
}

impl RunOptions {
    fn picker_options(&self, today: Date) -> anyhow::Result<PickerOptions> {
        let mut options = PickerOptions {
            initial_date: self.date,
            min: self.min,
            max: self.max,
            week_start: self.week_start,
            show_week_number: self.week_numbers,
            ..PickerOptions::default()
        };
        if let Some(fmt) = &self.format {
            let value_format = parse_owned::<2>(fmt)
                .with_context(|| format!("invalid --format description {fmt:?}"))?;
            // Catch descriptions with time-of-day components before the UI
            // starts
            today
                .format(&value_format)
                .with_context(|| format!("--format {fmt:?} cannot be applied to a date"))?;
            options.value_format = value_format;
        }
        Ok(options)
    }
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut opts = RunOptions::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Long("min") => opts.min = Some(parse_date(parser.value()?)?),
                Arg::Long("max") => opts.max = Some(parse_date(parser.value()?)?),
                Arg::Short('f') | Arg::Long("format") => {
                    opts.format = Some(parser.value()?.string()?);
                }
                Arg::Short('s') | Arg::Long("sunday") => opts.week_start = WeekStart::Sunday,
                Arg::Short('w') | Arg::Long("week-numbers") => opts.week_numbers = true,
                Arg::Long("log") => opts.log = Some(PathBuf::from(parser.value()?)),
                Arg::Value(value) if opts.date.is_none() => opts.date = Some(parse_date(value)?),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run(opts))
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run(opts) => {
                if let Some(path) = &opts.log {
                    init_logging(path)?;
                }
                let today = OffsetDateTime::now_local()
                    .context("failed to determine local date")?
                    .date();
                let picker = WeekPicker::new(opts.picker_options(today)?, today).on_change(
                    |range| log::info!("Change: {} - {}", range.start, range.end),
                );
                let value = with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    App::new(picker)
                        .run(&mut terminal)
                        .context("error running picker")
                })?;
                if let Some(value) = value {
                    println!("{value}");
                }
                Ok(())
            }
            Command::Help => {
                println!("Usage: weekpick [options] [YYYY-MM-DD]");
                println!();
                println!("Choose a calendar week from a month dropdown and print its range");
                println!();
                println!("Options:");
                println!("  --min YYYY-MM-DD      Weeks up to and including this one cannot be selected");
                println!("  --max YYYY-MM-DD      Weeks from this one onwards cannot be selected");
                println!("  -f, --format FMT      Format each end of the range with this time format");
                println!("                        description [default: [day]/[month]/[year]]");
                println!("  -s, --sunday          Start weeks on Sunday instead of Monday");
                println!("  -w, --week-numbers    Show ISO week numbers");
                println!("  --log FILE            Write log records to FILE");
                println!("  -h, --help            Display this help message and exit");
                println!("  -V, --version         Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

fn parse_date(value: OsString) -> Result<Date, lexopt::Error> {
    let value = value.string()?;
    match Date::parse(&value, YMD_FMT) {
        Ok(d) => Ok(d),
        Err(e) => Err(lexopt::Error::ParsingFailed {
            value,
            error: Box::new(e),
        }),
    }
}

// Log records go to a file, as anything written to the terminal would
// corrupt the UI.
fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .context("failed to install logger")?;
    Ok(())
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = func(terminal);
    ratatui::restore();
    r
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn parse<const N: usize>(args: [&str; N]) -> Result<Command, lexopt::Error> {
        Command::from_parser(Parser::from_iter(
            std::iter::once("weekpick").chain(args),
        ))
    }

    #[test]
    fn test_no_args() {
        assert_eq!(parse([]).unwrap(), Command::Run(RunOptions::default()));
    }

    #[test]
    fn test_all_options() {
        let cmd = parse([
            "--min",
            "2024-01-10",
            "--max=2024-02-20",
            "-f",
            "[year]-[month]-[day]",
            "-s",
            "-w",
            "--log",
            "weekpick.log",
            "2024-01-24",
        ])
        .unwrap();
        assert_eq!(
            cmd,
            Command::Run(RunOptions {
                date: Some(date!(2024 - 01 - 24)),
                min: Some(date!(2024 - 01 - 10)),
                max: Some(date!(2024 - 02 - 20)),
                format: Some(String::from("[year]-[month]-[day]")),
                week_start: WeekStart::Sunday,
                week_numbers: true,
                log: Some(PathBuf::from("weekpick.log")),
            })
        );
    }

    #[test]
    fn test_help_and_version() {
        assert_eq!(parse(["--min", "2024-01-10", "-h"]).unwrap(), Command::Help);
        assert_eq!(parse(["--version"]).unwrap(), Command::Version);
    }

    #[test]
    fn test_bad_date() {
        assert!(matches!(
            parse(["2024-13-01"]),
            Err(lexopt::Error::ParsingFailed { .. })
        ));
        assert!(matches!(
            parse(["--min", "yesterday"]),
            Err(lexopt::Error::ParsingFailed { .. })
        ));
    }

    #[test]
    fn test_extra_positional() {
        assert!(parse(["2024-01-01", "2024-02-01"]).is_err());
    }

    #[test]
    fn test_picker_options() {
        let opts = RunOptions {
            date: Some(date!(2024 - 01 - 24)),
            format: Some(String::from("[month repr:short] [day]")),
            week_numbers: true,
            ..RunOptions::default()
        };
        let options = opts.picker_options(date!(2024 - 03 - 13)).unwrap();
        assert_eq!(options.initial_date, Some(date!(2024 - 01 - 24)));
        assert!(options.show_week_number);
        let mut picker = WeekPicker::new(options, date!(2024 - 03 - 13));
        picker.select_row(0).unwrap();
        assert_eq!(picker.value(), "Jan 01 - Jan 07");
    }

    #[test]
    fn test_bad_format() {
        let opts = RunOptions {
            format: Some(String::from("[day")),
            ..RunOptions::default()
        };
        assert!(opts.picker_options(date!(2024 - 03 - 13)).is_err());
        let opts = RunOptions {
            format: Some(String::from("[hour]")),
            ..RunOptions::default()
        };
        assert!(opts.picker_options(date!(2024 - 03 - 13)).is_err());
    }
}
