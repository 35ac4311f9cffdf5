//! Front ends the trainer can drive.
//!
//! The trainer only talks to the [`Presentation`] trait. `AsciiFrontEnd`
//! prints to a plain console and reads whole lines; `TerminalFrontEnd` owns a
//! full-screen ratatui window and collects keystrokes without blocking.

pub mod ascii;
pub mod events;
pub mod faces;
pub mod terminal;

pub use ascii::AsciiFrontEnd;
pub use terminal::TerminalFrontEnd;

use crate::error::TrainerError;
use deck::Card;
use std::thread;
use std::time::Duration;

/// Outcome of pumping events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Continue,
    /// The user asked to close the trainer.
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Guess(i32),
    Quit,
}

pub trait Presentation {
    fn render_card(&mut self, card: &Card) -> Result<(), TrainerError>;
    fn show_message(&mut self, text: &str) -> Result<(), TrainerError>;
    /// Blocks until the user confirms a guess, servicing close requests meanwhile.
    fn read_count_guess(&mut self) -> Result<Answer, TrainerError>;
    fn is_ready(&self) -> bool;
    /// Human readable cause when [`Presentation::is_ready`] is false.
    fn not_ready_reason(&self) -> Option<String> {
        None
    }
    /// Drains pending input without waiting. Cheap enough to call every few milliseconds.
    fn pump_events(&mut self) -> Result<Signal, TrainerError>;
}

/// Sleeps for `duration` in `poll` sized steps, pumping events before each
/// step so close requests are seen while the trainer is idle.
pub fn wait<P: Presentation + ?Sized>(
    presentation: &mut P,
    duration: Duration,
    poll: Duration,
) -> Result<Signal, TrainerError> {
    let step = poll.max(Duration::from_millis(1));
    let mut waited = Duration::ZERO;
    while waited < duration {
        if presentation.pump_events()? == Signal::Quit {
            return Ok(Signal::Quit);
        }
        thread::sleep(step);
        waited += step;
    }
    Ok(Signal::Continue)
}
