use clap::Parser;
use crossterm::{
    cursor::Show,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use deck::Deck;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{error::Error, io};

mod config;
use config::{Cli, FrontEndKind};

mod error;

mod input;

mod presentation;
use presentation::{events::CrosstermEvents, AsciiFrontEnd, TerminalFrontEnd};

mod trainer;
use trainer::Trainer;

mod tui_logger;
use tui_logger::TuiLogger;

fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let pacing = cli.pacing()?;
    let mut rng = cli.rng();
    let deck = Deck::new(&mut rng);

    match cli.frontend {
        FrontEndKind::Ascii => {
            env_logger::Builder::new()
                .filter_level(cli.log_level)
                .init();
            let frontend = AsciiFrontEnd::new(io::stdin().lock(), io::stdout());
            Trainer::new(deck, frontend, rng, pacing)?.run()?;
        }
        FrontEndKind::Terminal => {
            let log_buffer = TuiLogger::install(cli.log_level)?;

            // setup terminal
            enable_raw_mode()?;
            let mut stdout = io::stdout();
            execute!(stdout, EnterAlternateScreen)?;
            let res = Terminal::new(CrosstermBackend::new(stdout))
                .map_err(Into::into)
                .and_then(|terminal| {
                    let frontend =
                        TerminalFrontEnd::new(terminal, CrosstermEvents, cli.card_art.as_deref())
                            .with_log_buffer(log_buffer)
                            .with_poll_interval(pacing.poll_interval);
                    Trainer::new(deck, frontend, rng, pacing)?.run()
                });

            // restore terminal
            disable_raw_mode()?;
            execute!(io::stdout(), LeaveAlternateScreen, Show)?;
            res?;
        }
    }

    Ok(())
}
