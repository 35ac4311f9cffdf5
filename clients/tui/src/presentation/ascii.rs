use super::{Answer, Presentation, Signal};
use crate::error::TrainerError;
use crate::input::{parse_guess, UNPARSABLE_GUESS};
use deck::Card;
use std::io::{BufRead, Write};

const RULE: &str = "---------------";

/// Console front end: cards and messages are printed, guesses are read a line at a time.
pub struct AsciiFrontEnd<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> AsciiFrontEnd<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Presentation for AsciiFrontEnd<R, W> {
    fn render_card(&mut self, card: &Card) -> Result<(), TrainerError> {
        if !card.is_valid() {
            log::warn!("Refusing to draw the empty-shoe placeholder card");
            return Ok(());
        }
        writeln!(self.output, "{RULE}\n\n")?;
        writeln!(self.output, "{}\n\n", card.label())?;
        writeln!(self.output, "{RULE}\n\n")?;
        self.output.flush()?;
        Ok(())
    }

    fn show_message(&mut self, text: &str) -> Result<(), TrainerError> {
        writeln!(self.output, "{text}")?;
        self.output.flush()?;
        Ok(())
    }

    fn read_count_guess(&mut self) -> Result<Answer, TrainerError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            log::info!("Input closed, stopping");
            return Ok(Answer::Quit);
        }
        let guess = parse_guess(&line).unwrap_or_else(|| {
            log::debug!("Unparsable guess {:?}", line.trim_end());
            UNPARSABLE_GUESS
        });
        Ok(Answer::Guess(guess))
    }

    fn is_ready(&self) -> bool {
        true
    }

    /// Nothing to pump: the console has no event queue.
    fn pump_events(&mut self) -> Result<Signal, TrainerError> {
        Ok(Signal::Continue)
    }
}
