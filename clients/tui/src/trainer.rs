//! The deal / count / quiz cycle.

use crate::error::TrainerError;
use crate::presentation::{wait, Answer, Presentation, Signal};
use deck::{Deck, RunningCount};
use rand::Rng;
use std::time::Duration;

/// Where the trainer is in its cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Dealing,
    Counting,
    Quizzing,
    Reshuffling,
}

/// How long the trainer lingers between steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    /// Time each card stays up before the next is revealed.
    pub deal_interval: Duration,
    /// Pause after the quiz verdict and again after announcing the new deck.
    pub result_pause: Duration,
    /// Sleep between event pumps while waiting.
    pub poll_interval: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            deal_interval: Duration::from_millis(2000),
            result_pause: Duration::from_millis(1000),
            poll_interval: Duration::from_millis(10),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scoreboard {
    pub quizzes: u32,
    pub correct: u32,
}

pub struct Trainer<P: Presentation, R: Rng> {
    deck: Deck,
    presentation: P,
    rng: R,
    pacing: Pacing,
    count: RunningCount,
    quiz_at: usize,
    phase: Phase,
    score: Scoreboard,
}

impl<P: Presentation, R: Rng> Trainer<P, R> {
    /// Refuses to start unless the presentation is ready. The deck is
    /// reshuffled and the first quiz point chosen.
    pub fn new(
        deck: Deck,
        presentation: P,
        rng: R,
        pacing: Pacing,
    ) -> Result<Self, TrainerError> {
        if !presentation.is_ready() {
            let reason = presentation
                .not_ready_reason()
                .unwrap_or_else(|| "front end failed to initialize".to_string());
            return Err(TrainerError::NotReady(reason));
        }
        let mut trainer = Self {
            deck,
            presentation,
            rng,
            pacing,
            count: RunningCount::new(),
            quiz_at: 0,
            phase: Phase::Reshuffling,
            score: Scoreboard::default(),
        };
        trainer.reshuffle();
        trainer.phase = Phase::Dealing;
        Ok(trainer)
    }

    /// Deals until the presentation reports a close request.
    pub fn run(&mut self) -> Result<(), TrainerError> {
        loop {
            if self.step()? == Signal::Quit {
                log::info!(
                    "Stopping while {:?} after {} quizzes, {} correct",
                    self.phase,
                    self.score.quizzes,
                    self.score.correct
                );
                return Ok(());
            }
        }
    }

    /// Deals one card, quizzing and reshuffling if the quiz point was reached.
    pub fn step(&mut self) -> Result<Signal, TrainerError> {
        self.phase = Phase::Dealing;
        let card = self.deck.draw();
        if self.pause(self.pacing.deal_interval)? == Signal::Quit {
            return Ok(Signal::Quit);
        }

        if !card.is_valid() {
            log::warn!("Shoe ran out before the quiz point, reshuffling");
            self.reshuffle();
            return self.presentation.pump_events();
        }

        self.phase = Phase::Counting;
        self.count.observe(&card);
        self.presentation.render_card(&card)?;
        self.deck.discard(card);
        log::debug!(
            "Dealt {card}, count {}, {} left in shoe",
            self.count.value(),
            self.deck.shoe_count()
        );

        if self.deck.shoe_count() == self.quiz_at && self.quiz()? == Signal::Quit {
            return Ok(Signal::Quit);
        }
        self.presentation.pump_events()
    }

    fn quiz(&mut self) -> Result<Signal, TrainerError> {
        self.phase = Phase::Quizzing;
        self.presentation.show_message("What is the count? ")?;
        let guess = match self.presentation.read_count_guess()? {
            Answer::Guess(guess) => guess,
            Answer::Quit => return Ok(Signal::Quit),
        };

        let count = self.count.value();
        self.score.quizzes += 1;
        if guess == count {
            self.score.correct += 1;
            self.presentation.show_message("Correct!")?;
        } else {
            self.presentation.show_message(&format!(
                "Incorrect count!\nThe correct count is {count}"
            ))?;
        }
        log::info!(
            "Quiz after {} cards: count {count}, score {}/{}",
            self.count.seen(),
            self.score.correct,
            self.score.quizzes
        );

        if self.pause(self.pacing.result_pause)? == Signal::Quit {
            return Ok(Signal::Quit);
        }
        self.presentation.show_message("Starting new deck...")?;
        if self.pause(self.pacing.result_pause)? == Signal::Quit {
            return Ok(Signal::Quit);
        }

        self.reshuffle();
        Ok(Signal::Continue)
    }

    /// Resets the count, shuffles, and picks how many cards will be left in
    /// the shoe when the next quiz fires.
    fn reshuffle(&mut self) {
        self.phase = Phase::Reshuffling;
        self.count.reset();
        self.deck.shuffle(&mut self.rng);
        let remaining = self.deck.shoe_count();
        self.quiz_at = if remaining == 0 {
            0
        } else {
            self.rng.gen_range(0..remaining)
        };
        log::info!(
            "Shuffled {remaining} cards, quiz when {} remain",
            self.quiz_at
        );
    }

    fn pause(&mut self, duration: Duration) -> Result<Signal, TrainerError> {
        wait(&mut self.presentation, duration, self.pacing.poll_interval)
    }
}

#[cfg(test)]
impl<P: Presentation, R: Rng> Trainer<P, R> {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn quiz_at(&self) -> usize {
        self.quiz_at
    }

    pub fn running_count(&self) -> i32 {
        self.count.value()
    }

    pub fn score(&self) -> Scoreboard {
        self.score
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn presentation(&self) -> &P {
        &self.presentation
    }
}
