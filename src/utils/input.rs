use std::io::{self, BufRead, Write};

use chrono::NaiveDate;

use crate::data::Region;

pub const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

/// Prompts until `parse` accepts a line. Fails on end of input.
pub fn prompt_with<R, W, T, F>(reader: &mut R, writer: &mut W, prompt: &str, parse: F) -> io::Result<T>
where
    R: BufRead,
    W: Write,
    F: Fn(&str) -> Result<T, String>,
{
    loop {
        write!(writer, "{}", prompt)?;
        writer.flush()?;

        let mut input = String::new();
        if reader.read_line(&mut input)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }

        match parse(input.trim()) {
            Ok(value) => return Ok(value),
            Err(msg) => writeln!(writer, "{}", msg)?,
        }
    }
}

/// Accepts a menu number (1-4) or a region name.
pub fn parse_region_choice(input: &str) -> Result<Region, String> {
    if let Ok(n) = input.parse::<usize>() {
        return n
            .checked_sub(1)
            .and_then(|i| Region::ALL.get(i).copied())
            .ok_or_else(|| format!("Please choose a number between 1 and {}", Region::ALL.len()));
    }
    input.parse::<Region>().map_err(|e| e.to_string())
}

pub fn parse_date(input: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(input, DATE_INPUT_FORMAT)
        .map_err(|_| "Please enter a date as YYYY-MM-DD".to_string())
}

pub fn get_region() -> io::Result<Region> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for (i, region) in Region::ALL.iter().enumerate() {
        writeln!(stdout, "  {}. {}", i + 1, region)?;
    }
    prompt_with(&mut stdin.lock(), &mut stdout, "Region: ", parse_region_choice)
}

pub fn get_date(prompt: &str) -> io::Result<NaiveDate> {
    let stdin = io::stdin();
    prompt_with(&mut stdin.lock(), &mut io::stdout(), prompt, parse_date)
}
