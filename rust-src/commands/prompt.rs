//! Line-based prompting with validation.

use std::fmt::Display;
use std::io::{BufRead, Write};
use std::str::FromStr;

use crossterm::style::Stylize;

use crate::error::{HealthError, Result};


/// Reads answers from `input`, writing questions to `output`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}


impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    /// Print `question` and read one trimmed line. `None` at end of input.
    pub fn read_line(&mut self, question: &str) -> Result<Option<String>> {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Ask once and parse the answer.
    pub fn parse<T>(&mut self, question: &str, field: &'static str) -> Result<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        let answer = self
            .read_line(question)?
            .ok_or(HealthError::InputClosed)?;

        answer
            .parse::<T>()
            .map_err(|e| HealthError::invalid(field, format!("'{answer}': {e}")))
    }

    /// Ask until the answer parses and passes `check`.
    ///
    /// Invalid answers are reported and the question repeats. End of input
    /// and I/O failures are returned.
    pub fn ask<T, F>(&mut self, question: &str, field: &'static str, check: F) -> Result<T>
    where
        T: FromStr,
        T::Err: Display,
        F: Fn(T) -> Result<T>,
    {
        loop {
            match self.parse(question, field).and_then(&check) {
                Ok(value) => return Ok(value),
                Err(e @ HealthError::InvalidInput { .. }) => {
                    writeln!(self.output, "{}", format!("Invalid input: {e}").red())?;
                }
                Err(e) => return Err(e),
            }
        }
    }
}


/// Year between 1 and 9999.
pub fn check_year(year: i32) -> Result<i32> {
    if (1..=9999).contains(&year) {
        Ok(year)
    } else {
        Err(HealthError::invalid("year", format!("{year} is not a valid year")))
    }
}


/// Calendar month between 1 and 12.
pub fn check_month(month: u32) -> Result<u32> {
    if (1..=12).contains(&month) {
        Ok(month)
    } else {
        Err(HealthError::invalid("month", format!("{month} is not between 1 and 12")))
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::check_positive;

    fn prompter(input: &str) -> Prompter<&[u8], Vec<u8>> {
        Prompter::new(input.as_bytes(), Vec::new())
    }

    #[test]
    fn test_parse_valid() {
        let mut p = prompter("7.5\n");
        let value: f64 = p.parse("Enter sleep hours: ", "sleep").unwrap();
        assert_eq!(value, 7.5);
        assert_eq!(String::from_utf8(p.output().clone()).unwrap(), "Enter sleep hours: ");
    }

    #[test]
    fn test_parse_malformed_is_invalid_input() {
        let mut p = prompter("seven\n");
        let err = p.parse::<f64>("Enter sleep hours: ", "sleep").unwrap_err();
        assert!(matches!(err, HealthError::InvalidInput { field: "sleep", .. }));
    }

    #[test]
    fn test_parse_end_of_input() {
        let mut p = prompter("");
        let err = p.parse::<u32>("Enter steps: ", "steps").unwrap_err();
        assert!(matches!(err, HealthError::InputClosed));
    }

    #[test]
    fn test_ask_reprompts_until_valid() {
        let mut p = prompter("abc\n-3\n0\n172.5\n");
        let height = p
            .ask("Enter height (cm): ", "height", |v: f64| check_positive("height", v))
            .unwrap();
        assert_eq!(height, 172.5);

        let output = String::from_utf8(p.output().clone()).unwrap();
        assert_eq!(output.matches("Enter height (cm): ").count(), 4);
        assert_eq!(output.matches("Invalid input").count(), 3);
    }

    #[test]
    fn test_ask_negative_steps_rejected_by_parse() {
        let mut p = prompter("-100\n8000\n");
        let steps: u32 = p.ask("Enter steps: ", "steps", Ok).unwrap();
        assert_eq!(steps, 8000);
    }

    #[test]
    fn test_year_and_month_checks() {
        assert!(check_year(2024).is_ok());
        assert!(check_year(0).is_err());
        assert!(check_month(12).is_ok());
        assert!(check_month(13).is_err());
        assert!(check_month(0).is_err());
    }
}
