use std::fmt;
use std::io::{BufRead, Write};
use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use tracing::info;

use crate::domain::DateRange;
use crate::error::InputError;

static MONTH_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})-(\d{1,2})$").unwrap());
static DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());

/// Why an answer was refused. The prompt is repeated after showing the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidInput {
    MenuChoice,
    MonthFormat,
    DateFormat,
    EndBeforeStart,
}

impl fmt::Display for InvalidInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Self::MenuChoice => "Invalid choice. Please enter 1 or 2.",
            Self::MonthFormat => "Invalid format. Please use YYYY-MM.",
            Self::DateFormat => "Invalid format. Please use YYYY-MM-DD.",
            Self::EndBeforeStart => "End date cannot be before the start date.",
        };
        f.write_str(message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeMode {
    Month,
    Custom,
}

/// Everything the run needs from the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub username: String,
    pub range: DateRange,
}

pub fn parse_username(line: &str) -> Result<String, InputError> {
    if line.is_empty() {
        return Err(InputError::EmptyUsername);
    }
    Ok(line.to_string())
}

pub fn parse_mode(line: &str) -> Result<RangeMode, InvalidInput> {
    match line.trim() {
        "1" => Ok(RangeMode::Month),
        "2" => Ok(RangeMode::Custom),
        _ => Err(InvalidInput::MenuChoice),
    }
}

/// `YYYY-MM` to the full month it names.
pub fn parse_month(line: &str) -> Result<DateRange, InvalidInput> {
    let captures = MONTH_PATTERN
        .captures(line.trim())
        .ok_or(InvalidInput::MonthFormat)?;
    let year: i32 = captures[1].parse().map_err(|_| InvalidInput::MonthFormat)?;
    let month: u32 = captures[2].parse().map_err(|_| InvalidInput::MonthFormat)?;
    if year < 1 {
        return Err(InvalidInput::MonthFormat);
    }
    DateRange::month(year, month).ok_or(InvalidInput::MonthFormat)
}

pub fn parse_date(line: &str) -> Result<NaiveDate, InvalidInput> {
    let line = line.trim();
    if !DATE_PATTERN.is_match(line) {
        return Err(InvalidInput::DateFormat);
    }
    let date = NaiveDate::parse_from_str(line, "%Y-%m-%d").map_err(|_| InvalidInput::DateFormat)?;
    if date.year() < 1 {
        return Err(InvalidInput::DateFormat);
    }
    Ok(date)
}

/// Parses the end date and closes the range opened at `start`.
pub fn parse_end_date(line: &str, start: NaiveDate) -> Result<DateRange, InvalidInput> {
    let end = parse_date(line)?;
    DateRange::days(start, end).ok_or(InvalidInput::EndBeforeStart)
}

/// Line-oriented question and answer session over any reader and writer.
pub struct Prompter<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    #[cfg(test)]
    pub fn into_writer(self) -> W {
        self.writer
    }

    pub fn collect(&mut self) -> Result<Request, InputError> {
        let username = self.username()?;
        let range = self.date_range()?;
        info!(
            action = "collect",
            component = "input",
            username = %username,
            start = %range.start_date(),
            end = %range.end_date(),
            "Input collected"
        );
        Ok(Request { username, range })
    }

    pub fn username(&mut self) -> Result<String, InputError> {
        let line = self.ask("Enter your Wikidata username: ")?;
        parse_username(&line)
    }

    pub fn date_range(&mut self) -> Result<DateRange, InputError> {
        let mode = loop {
            writeln!(self.writer, "\nSelect a date range option:")?;
            writeln!(self.writer, "  1. A specific month (e.g., 2023-10)")?;
            writeln!(
                self.writer,
                "  2. A custom date range (e.g., from 2023-10-15 to 2023-11-15)"
            )?;
            let line = self.ask("Enter your choice (1 or 2): ")?;
            match parse_mode(&line) {
                Ok(mode) => break mode,
                Err(reason) => writeln!(self.writer, "{reason}")?,
            }
        };

        match mode {
            RangeMode::Month => self.ask_until("Enter the month in YYYY-MM format: ", parse_month),
            RangeMode::Custom => {
                let start = self.ask_until("Enter the start date (YYYY-MM-DD): ", parse_date)?;
                self.ask_until("Enter the end date (YYYY-MM-DD): ", |line| {
                    parse_end_date(line, start)
                })
            }
        }
    }

    fn ask_until<T>(
        &mut self,
        prompt: &str,
        validate: impl Fn(&str) -> Result<T, InvalidInput>,
    ) -> Result<T, InputError> {
        loop {
            let line = self.ask(prompt)?;
            match validate(&line) {
                Ok(value) => return Ok(value),
                Err(reason) => writeln!(self.writer, "{reason}")?,
            }
        }
    }

    fn ask(&mut self, prompt: &str) -> Result<String, InputError> {
        write!(self.writer, "{prompt}")?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(InputError::Closed);
        }
        let trimmed = line.strip_suffix('\n').unwrap_or(&line);
        let trimmed = trimmed.strip_suffix('\r').unwrap_or(trimmed);
        Ok(trimmed.to_string())
    }
}
