use super::events::{is_close_request, is_press, keystroke, EventSource};
use super::faces::CardFaces;
use super::{Answer, Presentation, Signal};
use crate::error::TrainerError;
use crate::input::{Capture, InputCapture};
use crossterm::event::{Event, KeyEvent};
use deck::{Card, Suit};
use ratatui::backend::Backend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::{Frame, Terminal};
use std::collections::VecDeque;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// Smallest terminal the table fits in.
pub const MIN_WIDTH: u16 = 40;
pub const MIN_HEIGHT: u16 = 20;

const TEXTBOX_BACKGROUND: Color = Color::Rgb(64, 128, 64);
const TEXTBOX_BORDER: Color = Color::Black;
const LOG_LINES: usize = 20;
const STATUS_HINT: &str = "[0-9 -] type count  [Backspace] erase  [Enter] confirm  [Esc/q] quit";

/// Full-screen front end drawn with ratatui.
///
/// Keystrokes are collected by [`Presentation::pump_events`] into a queue and
/// only interpreted while a guess is being read, so the window keeps
/// reacting to close requests during the deal.
pub struct TerminalFrontEnd<B: Backend, E: EventSource> {
    terminal: Terminal<B>,
    events: E,
    faces: Option<CardFaces>,
    key_queue: VecDeque<KeyEvent>,
    input: InputCapture,
    card: Option<Card>,
    message: Option<String>,
    prompting: bool,
    log_buffer: Option<Arc<Mutex<Vec<String>>>>,
    logs: Vec<String>,
    poll_interval: Duration,
    closing: bool,
    /// Why the front end cannot play, if it cannot.
    unready: Option<String>,
}

impl<B: Backend, E: EventSource> TerminalFrontEnd<B, E> {
    /// Loads the card faces (from `art_pack` if given) and checks the window
    /// is big enough. Either failing leaves the front end not ready.
    pub fn new(terminal: Terminal<B>, events: E, art_pack: Option<&Path>) -> Self {
        let (faces, faces_issue) = match art_pack {
            Some(path) => match CardFaces::load(path) {
                Ok(faces) => (Some(faces), None),
                Err(e) => (None, Some(e.to_string())),
            },
            None => (Some(CardFaces::built_in()), None),
        };
        let faces_issue = faces_issue.or_else(|| {
            faces
                .as_ref()
                .filter(|faces| !faces.is_complete())
                .map(|_| "Card face table is incomplete".to_string())
        });
        let size_issue = match terminal.size() {
            Ok(size) if size.width >= MIN_WIDTH && size.height >= MIN_HEIGHT => None,
            Ok(size) => Some(format!(
                "Terminal is {}x{}, need at least {MIN_WIDTH}x{MIN_HEIGHT}",
                size.width, size.height
            )),
            Err(e) => Some(format!("Cannot read terminal size: {e}")),
        };
        let unready = faces_issue.or(size_issue);
        if let Some(reason) = &unready {
            log::error!("{reason}");
        }

        Self {
            terminal,
            events,
            faces,
            key_queue: VecDeque::new(),
            input: InputCapture::new(),
            card: None,
            message: None,
            prompting: false,
            log_buffer: None,
            logs: Vec::new(),
            poll_interval: Duration::from_millis(10),
            closing: false,
            unready,
        }
    }

    /// Shows records captured by the global logger in a side panel.
    pub fn with_log_buffer(mut self, buffer: Arc<Mutex<Vec<String>>>) -> Self {
        self.log_buffer = Some(buffer);
        self
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    fn sync_logs(&mut self) {
        let Some(buffer) = &self.log_buffer else {
            return;
        };
        let messages: Vec<String> = if let Ok(mut buffer) = buffer.lock() {
            buffer.drain(..).collect()
        } else {
            Vec::new()
        };
        self.logs.extend(messages);
        if self.logs.len() > LOG_LINES {
            let excess = self.logs.len() - LOG_LINES;
            self.logs.drain(..excess);
        }
    }

    fn redraw(&mut self) -> Result<(), TrainerError> {
        self.sync_logs();
        let view = View {
            faces: self.faces.as_ref(),
            card: self.card,
            message: self.message.as_deref(),
            input: self.prompting.then(|| self.input.display()),
            logs: self.log_buffer.is_some().then_some(self.logs.as_slice()),
        };
        self.terminal
            .draw(|frame| view.render(frame))
            .map_err(|e| TrainerError::Render(e.to_string()))?;
        Ok(())
    }

    /// Feeds queued keystrokes to the input buffer, redrawing after each one.
    fn drain_keys(&mut self) -> Result<Option<i32>, TrainerError> {
        while let Some(key) = self.key_queue.pop_front() {
            let capture = self.input.feed(keystroke(&key));
            self.redraw()?;
            if let Capture::Confirmed(guess) = capture {
                return Ok(Some(guess));
            }
        }
        Ok(None)
    }

    fn capture_guess(&mut self) -> Result<Answer, TrainerError> {
        self.redraw()?;
        loop {
            if let Some(guess) = self.drain_keys()? {
                return Ok(Answer::Guess(guess));
            }
            if self.pump_events()? == Signal::Quit {
                return Ok(Answer::Quit);
            }
            if self.key_queue.is_empty() {
                thread::sleep(self.poll_interval);
            }
        }
    }
}

impl<B: Backend, E: EventSource> Presentation for TerminalFrontEnd<B, E> {
    fn render_card(&mut self, card: &Card) -> Result<(), TrainerError> {
        if !card.is_valid() {
            log::warn!("Refusing to draw the empty-shoe placeholder card");
            return Ok(());
        }
        // A new card clears the table, message box included.
        self.card = Some(*card);
        self.message = None;
        self.prompting = false;
        self.redraw()
    }

    fn show_message(&mut self, text: &str) -> Result<(), TrainerError> {
        self.message = Some(text.to_string());
        self.redraw()
    }

    fn read_count_guess(&mut self) -> Result<Answer, TrainerError> {
        // Keys pressed while cards were being dealt are not part of the answer.
        self.key_queue.clear();
        self.input.reset();
        self.prompting = true;
        let answer = self.capture_guess();
        self.prompting = false;
        answer
    }

    fn is_ready(&self) -> bool {
        self.unready.is_none()
    }

    fn not_ready_reason(&self) -> Option<String> {
        self.unready.clone()
    }

    fn pump_events(&mut self) -> Result<Signal, TrainerError> {
        if self.closing {
            return Ok(Signal::Quit);
        }
        let mut resized = false;
        while let Some(event) = self.events.next_event()? {
            match event {
                Event::Key(key) if is_press(&key) && is_close_request(&key) => {
                    log::info!("Close requested");
                    self.closing = true;
                    return Ok(Signal::Quit);
                }
                Event::Key(key) if is_press(&key) => self.key_queue.push_back(key),
                Event::Resize(_, _) => resized = true,
                _ => {}
            }
        }
        if resized {
            self.redraw()?;
        }
        Ok(Signal::Continue)
    }
}

/// Snapshot of everything on screen for one frame.
struct View<'a> {
    faces: Option<&'a CardFaces>,
    card: Option<Card>,
    message: Option<&'a str>,
    input: Option<String>,
    logs: Option<&'a [String]>,
}

impl View<'_> {
    fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(10),
                Constraint::Length(3),
            ])
            .split(frame.area());

        let title = Paragraph::new("Hi-Lo Trainer")
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        let (table, log_area) = match self.logs {
            Some(_) => {
                let columns = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
                    .split(chunks[1]);
                (columns[0], Some(columns[1]))
            }
            None => (chunks[1], None),
        };

        let table_block = Block::default().borders(Borders::ALL).title("Table");
        let table_inner = table_block.inner(table);
        frame.render_widget(table_block, table);
        self.render_card(frame, table_inner);
        if self.message.is_some() || self.input.is_some() {
            self.render_message_box(frame, table_inner);
        }

        if let (Some(area), Some(logs)) = (log_area, self.logs) {
            let visible = usize::from(area.height.saturating_sub(2));
            let start = logs.len().saturating_sub(visible);
            let lines: Vec<Line> = logs[start..]
                .iter()
                .map(|log| Line::from(log.as_str()))
                .collect();
            let panel = Paragraph::new(lines)
                .block(Block::default().borders(Borders::ALL).title("Log"))
                .wrap(Wrap { trim: true });
            frame.render_widget(panel, area);
        }

        let status = Paragraph::new(STATUS_HINT)
            .style(Style::default().fg(Color::Yellow))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(status, chunks[2]);
    }

    fn render_card(&self, frame: &mut Frame, area: Rect) {
        let (Some(card), Some(faces)) = (self.card, self.faces) else {
            return;
        };
        let (Some(face), Some(suit)) = (faces.get(&card), card.suit()) else {
            return;
        };
        let width = face.iter().map(|line| line.chars().count()).max().unwrap_or(0);
        let lines: Vec<Line> = face.iter().map(|line| Line::from(line.as_str())).collect();
        let face_area = centered(area, width as u16, lines.len() as u16);
        let paragraph = Paragraph::new(lines)
            .style(Style::default().fg(suit_color(suit)).bg(Color::Gray));
        frame.render_widget(paragraph, face_area);
    }

    /// Green box across the table holding the message and, while prompting, the typed answer.
    fn render_message_box(&self, frame: &mut Frame, area: Rect) {
        let lines: Vec<Line> = self
            .message
            .unwrap_or_default()
            .lines()
            .map(Line::from)
            .collect();
        // Borders, message, and one row for the answer.
        let height = (lines.len() as u16 + 3).min(area.height);
        let y = area.y + (area.height - height) / 2;
        let box_area = Rect::new(area.x, y, area.width, height);

        let style = Style::default()
            .fg(Color::White)
            .bg(TEXTBOX_BACKGROUND)
            .add_modifier(Modifier::BOLD);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(TEXTBOX_BORDER).bg(TEXTBOX_BACKGROUND));
        let inner = block.inner(box_area);
        frame.render_widget(Clear, box_area);
        frame.render_widget(
            Paragraph::new(lines)
                .style(style)
                .alignment(Alignment::Left)
                .block(block),
            box_area,
        );

        if let (Some(input), Some((x, y))) = (&self.input, input_position(inner)) {
            frame.buffer_mut().set_string(x, y, input, style);
        }
    }
}

/// Fixed spot for the typed answer: start of the last row inside the message box.
fn input_position(inner: Rect) -> Option<(u16, u16)> {
    (inner.width > 0 && inner.height > 0).then(|| (inner.x, inner.y + inner.height - 1))
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn suit_color(suit: Suit) -> Color {
    match suit {
        Suit::Heart => Color::Red,
        Suit::Diamond => Color::from_u32(0xFF_A5_00),
        Suit::Club => Color::Magenta,
        Suit::Spade => Color::Black,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};
    use crate::trainer::{Pacing, Trainer};
    use deck::{Deck, Rank};
    use rand_chacha::rand_core::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use ratatui::backend::TestBackend;

    type TestFrontEnd = TerminalFrontEnd<TestBackend, VecDeque<Event>>;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn digit(c: char) -> Event {
        key(KeyCode::Char(c))
    }

    fn front_end_sized(width: u16, height: u16, events: Vec<Event>) -> TestFrontEnd {
        let terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        TerminalFrontEnd::new(terminal, VecDeque::from(events), None)
            .with_poll_interval(Duration::from_millis(1))
    }

    fn front_end(events: Vec<Event>) -> TestFrontEnd {
        front_end_sized(60, 24, events)
    }

    fn rows(front_end: &TestFrontEnd) -> Vec<String> {
        let buffer = front_end.terminal.backend().buffer();
        buffer
            .content
            .chunks(usize::from(buffer.area.width))
            .map(|row| row.iter().map(|cell| cell.symbol()).collect())
            .collect()
    }

    fn screen(front_end: &TestFrontEnd) -> String {
        rows(front_end).join("\n")
    }

    /// Text at the answer position of the message box.
    fn typed(front_end: &TestFrontEnd, len: usize) -> String {
        let rows = rows(front_end);
        let prompt = rows
            .iter()
            .position(|row| row.contains("What is the count?"))
            .unwrap();
        // Skip the outer margin and the left borders of the table and the message box.
        rows[prompt + 1].chars().skip(3).take(len).collect()
    }

    #[test]
    fn test_ready_with_built_in_faces() {
        assert!(front_end(Vec::new()).is_ready());
    }

    #[test]
    fn test_not_ready_when_too_small() {
        assert!(!front_end_sized(30, 10, Vec::new()).is_ready());
    }

    #[test]
    fn test_not_ready_without_art_pack() {
        let terminal = Terminal::new(TestBackend::new(60, 24)).unwrap();
        let front_end = TerminalFrontEnd::new(
            terminal,
            VecDeque::new(),
            Some(Path::new("/nonexistent/hilo-trainer/cards.json")),
        );
        assert!(!front_end.is_ready());
        let reason = front_end.not_ready_reason().unwrap();
        assert!(reason.contains("/nonexistent/hilo-trainer/cards.json"));
    }

    #[test]
    fn test_too_small_reason_reaches_trainer_error() {
        let front_end = front_end_sized(30, 10, Vec::new());
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let deck = Deck::new(&mut rng);
        let err = Trainer::new(deck, front_end, rng, Pacing::default())
            .err()
            .unwrap();
        let message = err.to_string();
        assert!(message.contains("Terminal is 30x10"), "{message}");
        assert!(message.contains("40x20"), "{message}");
    }

    #[test]
    fn test_ready_front_end_has_no_reason() {
        assert_eq!(front_end(Vec::new()).not_ready_reason(), None);
    }

    #[test]
    fn test_render_card_draws_face() {
        let mut front_end = front_end(Vec::new());
        front_end.render_card(&Card::new(Rank::Ten, Suit::Spade)).unwrap();
        let screen = screen(&front_end);
        assert!(screen.contains("│10       │"));
        assert!(screen.contains('♠'));
    }

    #[test]
    fn test_show_message() {
        let mut front_end = front_end(Vec::new());
        front_end.show_message("Incorrect count!\nThe correct count is 4").unwrap();
        let screen = screen(&front_end);
        assert!(screen.contains("Incorrect count!"));
        assert!(screen.contains("The correct count is 4"));
    }

    #[test]
    fn test_new_card_clears_message() {
        let mut front_end = front_end(Vec::new());
        front_end.show_message("Starting new deck...").unwrap();
        front_end.render_card(&Card::new(Rank::Two, Suit::Heart)).unwrap();
        assert!(!screen(&front_end).contains("Starting new deck..."));
    }

    #[test]
    fn test_read_count_guess() {
        let mut front_end = front_end(vec![
            digit('2'),
            key(KeyCode::Backspace),
            digit('-'),
            digit('5'),
            key(KeyCode::Enter),
        ]);
        front_end.show_message("What is the count? ").unwrap();
        assert_eq!(front_end.read_count_guess().unwrap(), Answer::Guess(-5));
    }

    #[test]
    fn test_keys_before_prompt_are_dropped() {
        let mut front_end = front_end(vec![digit('7')]);
        assert_eq!(front_end.pump_events().unwrap(), Signal::Continue);
        front_end.events.extend([digit('3'), key(KeyCode::Enter)]);
        assert_eq!(front_end.read_count_guess().unwrap(), Answer::Guess(3));
    }

    #[test]
    fn test_typed_digits_are_drawn_and_erased() {
        let mut front_end = front_end(vec![digit('1'), digit('2')]);
        front_end.show_message("What is the count? ").unwrap();
        front_end.input.reset();
        front_end.prompting = true;

        front_end.pump_events().unwrap();
        assert_eq!(front_end.drain_keys().unwrap(), None);
        assert_eq!(typed(&front_end, 3), "12 ");

        front_end.events.push_back(key(KeyCode::Backspace));
        front_end.pump_events().unwrap();
        assert_eq!(front_end.drain_keys().unwrap(), None);
        assert_eq!(typed(&front_end, 3), "1  ");
    }

    #[test]
    fn test_escape_quits_prompt_and_stays_closed() {
        let mut front_end = front_end(vec![digit('4'), key(KeyCode::Esc)]);
        assert_eq!(front_end.read_count_guess().unwrap(), Answer::Quit);
        assert_eq!(front_end.pump_events().unwrap(), Signal::Quit);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut front_end = front_end(vec![Event::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        ))]);
        assert_eq!(front_end.pump_events().unwrap(), Signal::Quit);
    }

    #[test]
    fn test_log_panel_shows_captured_records() {
        let buffer = Arc::new(Mutex::new(vec!["Deck shuffled".to_string()]));
        let mut front_end = front_end(Vec::new()).with_log_buffer(buffer.clone());
        front_end.show_message("Correct!").unwrap();
        assert!(screen(&front_end).contains("Deck shuffled"));
        assert!(buffer.lock().unwrap().is_empty());
    }
}
