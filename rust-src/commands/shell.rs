//! Interactive numbered menu.

use std::io::{BufRead, Write};
use std::str::FromStr;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use crossterm::style::Stylize;

use crate::config::Settings;
use crate::error::HealthError;
use crate::models::{check_hours, check_non_negative, check_positive, Measurements};
use crate::storage::RecordStore;

use super::prompt::{check_month, check_year, Prompter};


/// One menu option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddEntry,
    PdfReport,
    AnalyzeMonth,
    Graphs,
    Exit,
}


impl FromStr for MenuChoice {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(MenuChoice::AddEntry),
            "2" => Ok(MenuChoice::PdfReport),
            "3" => Ok(MenuChoice::AnalyzeMonth),
            "4" => Ok(MenuChoice::Graphs),
            "5" => Ok(MenuChoice::Exit),
            other => Err(format!("invalid choice: {other}")),
        }
    }
}


/// Menu loop over a record store.
///
/// Stays in the "awaiting choice" state until Exit or end of input.
pub struct Shell<'a, R, W> {
    settings: &'a Settings,
    store: RecordStore,
    prompter: Prompter<R, W>,
    today: fn() -> NaiveDate,
}


impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(settings: &'a Settings, store: RecordStore, input: R, output: W) -> Self {
        Self {
            settings,
            store,
            prompter: Prompter::new(input, output),
            today: || Local::now().date_naive(),
        }
    }

    /// Replace the clock used to date new entries.
    pub fn with_today(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Run until the user exits.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.print_menu()?;

            let Some(answer) = self.prompter.read_line("Enter choice (1-5): ")? else {
                self.say_goodbye()?;
                return Ok(());
            };

            let choice = match answer.parse::<MenuChoice>() {
                Ok(choice) => choice,
                Err(_) => {
                    let out = self.prompter.output();
                    writeln!(out, "{}", "Invalid choice! Please select 1-5.".red())?;
                    continue;
                }
            };

            if choice == MenuChoice::Exit {
                self.say_goodbye()?;
                return Ok(());
            }

            match self.dispatch(choice) {
                Ok(()) => {}
                Err(e) if is_input_closed(&e) => {
                    self.say_goodbye()?;
                    return Ok(());
                }
                Err(e) => {
                    let out = self.prompter.output();
                    writeln!(out, "{}", format!("Error: {e:#}").red())?;
                }
            }
        }
    }

    fn print_menu(&mut self) -> Result<()> {
        let out = self.prompter.output();
        writeln!(out, "\n{}", "====== Lifestyle & Health Tracker ======".bold())?;
        writeln!(out, "1. Add Today's Health Data")?;
        writeln!(out, "2. Generate Monthly PDF Report")?;
        writeln!(out, "3. Analyze Month")?;
        writeln!(out, "4. Generate Graphs")?;
        writeln!(out, "5. EXIT")?;
        Ok(())
    }

    fn say_goodbye(&mut self) -> Result<()> {
        writeln!(self.prompter.output(), "Exit. Stay healthy!")?;
        Ok(())
    }

    fn dispatch(&mut self, choice: MenuChoice) -> Result<()> {
        match choice {
            MenuChoice::AddEntry => {
                let measurements = self.ask_measurements()?;
                let date = (self.today)();
                super::add::run(&mut self.store, date, measurements, self.prompter.output())
            }
            MenuChoice::PdfReport => {
                let Some((year, month)) = self.ask_month()? else {
                    return Ok(());
                };
                super::report::run(self.settings, &self.store, year, month, self.prompter.output())
            }
            MenuChoice::AnalyzeMonth => {
                let Some((year, month)) = self.ask_month()? else {
                    return Ok(());
                };
                super::analyze::run(&self.store, year, month, false, self.prompter.output())
            }
            MenuChoice::Graphs => {
                super::charts::run(self.settings, &self.store, false, self.prompter.output())
            }
            MenuChoice::Exit => Ok(()),
        }
    }

    fn ask_measurements(&mut self) -> Result<Measurements> {
        let p = &mut self.prompter;
        writeln!(p.output(), "\n--- Enter Today's Health Data ---")?;

        Ok(Measurements {
            sleep: p.ask("Enter sleep hours: ", "sleep", |v| check_hours("sleep", v))?,
            steps: p.ask("Enter steps: ", "steps", Ok)?,
            water_intake: p.ask("Enter water intake (liters): ", "water intake", |v| {
                check_non_negative("water intake", v)
            })?,
            weight: p.ask("Enter weight (kg): ", "weight", |v| check_positive("weight", v))?,
            height: p.ask("Enter height (cm): ", "height", |v| check_positive("height", v))?,
            screen_time: p.ask("Enter screen time (hours): ", "screen time", |v| {
                check_hours("screen time", v)
            })?,
            calories_intake: p.ask("Enter calories intake: ", "calories intake", |v| {
                check_non_negative("calories intake", v)
            })?,
        })
    }

    /// Year and month, or `None` when there is nothing to analyze.
    fn ask_month(&mut self) -> Result<Option<(i32, u32)>> {
        if self.store.is_empty() {
            writeln!(self.prompter.output(), "{}", "No data available.".yellow())?;
            return Ok(None);
        }

        let year = self.prompter.ask("Enter year (YYYY): ", "year", check_year)?;
        let month = self.prompter.ask("Enter month (1-12): ", "month", check_month)?;
        Ok(Some((year, month)))
    }
}


fn is_input_closed(err: &anyhow::Error) -> bool {
    matches!(err.downcast_ref::<HealthError>(), Some(HealthError::InputClosed))
}
