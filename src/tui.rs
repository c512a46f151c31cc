//! TUI (Terminal User Interface) module for the hangman game
//!
//! Full-screen interactive interface using Ratatui: gallows drawing,
//! masked word, A-Z letter grid, score and mistake counters.
//!
//! Key bindings: letters guess, TAB requests a hint, ENTER starts a new
//! round, ESC quits. Every letter key is a guess, so the hint and
//! new-round actions live on non-letter keys.

use crate::engine::{Outcome, RoundView};
use crate::session::{GameInterface, PlayerAction};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;

const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const LETTERS_PER_ROW: usize = 13;
const ASCII_CONTROL_CHAR_THRESHOLD: u32 = 32;

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const WORD_STYLE: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);

/// Gallows stages, one per mistake count 0..=6.
const GALLOWS: [&str; 7] = [
    "  +---+\n  |   |\n      |\n      |\n      |\n      |\n=========",
    "  +---+\n  |   |\n  O   |\n      |\n      |\n      |\n=========",
    "  +---+\n  |   |\n  O   |\n  |   |\n      |\n      |\n=========",
    "  +---+\n  |   |\n  O   |\n /|   |\n      |\n      |\n=========",
    "  +---+\n  |   |\n  O   |\n /|\\  |\n      |\n      |\n=========",
    "  +---+\n  |   |\n  O   |\n /|\\  |\n /    |\n      |\n=========",
    "  +---+\n  |   |\n  O   |\n /|\\  |\n / \\  |\n=========",
];

/// Context for rendering the UI - groups related parameters to avoid too
/// many function arguments.
struct RenderContext<'a> {
    view: Option<&'a RoundView>,
    message: &'a str,
    error_message: &'a str,
    status: &'a str,
}

/// Main TUI interface component.
///
/// Manages terminal rendering, input handling, and round display.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    view: Option<RoundView>,
    message: String,
    error_message: String,
    status: String,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal setup complete: alternate screen, cursor hidden");

        Ok(Self {
            terminal,
            view: None,
            message: String::new(),
            error_message: String::new(),
            status: "Ready".to_string(),
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn draw(&mut self) -> Result<(), io::Error> {
        let ctx = RenderContext {
            view: self.view.as_ref(),
            message: &self.message,
            error_message: &self.error_message,
            status: &self.status,
        };

        self.terminal.draw(|f| {
            Self::render_static(f, &ctx);
        })?;
        Ok(())
    }

    /// Log and handle draw errors appropriately
    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    /// Render the complete UI layout using the provided context.
    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),  // Title
                Constraint::Min(11),    // Board
                Constraint::Length(4),  // Messages
                Constraint::Length(3),  // Instructions
            ])
            .split(f.area());

        Self::render_title(f, chunks[0]);

        let board = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(15), // Gallows
                Constraint::Min(30),    // Round panel
            ])
            .split(chunks[1]);

        Self::render_gallows(f, board[0], ctx.view);

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(6),    // Word and counters
                Constraint::Length(4), // Letter grid
            ])
            .split(board[1]);

        Self::render_round(f, right[0], ctx.view, ctx.status);
        Self::render_letters(f, right[1], ctx.view);
        Self::render_message(f, chunks[2], ctx.message, ctx.error_message);
        Self::render_instructions(f, chunks[3], ctx.view);
    }

    fn render_title(f: &mut Frame, area: Rect) {
        let title = Paragraph::new("HANGMAN")
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_gallows(f: &mut Frame, area: Rect, view: Option<&RoundView>) {
        let stage = view
            .map(|v| usize::from(v.mistakes).min(GALLOWS.len() - 1))
            .unwrap_or(0);
        let paragraph =
            Paragraph::new(GALLOWS[stage]).block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_round(f: &mut Frame, area: Rect, view: Option<&RoundView>, status: &str) {
        let mut lines = Vec::new();

        if let Some(view) = view {
            lines.push(Line::from(vec![
                Span::styled("Category: ", HEADER_STYLE),
                Span::raw(view.category.clone()),
            ]));
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                view.masked_word.clone(),
                WORD_STYLE,
            )));
            lines.push(Line::from(""));
            lines.push(Line::from(format!(
                "Mistakes: {}/{}",
                view.mistakes, view.max_mistakes
            )));
            lines.push(Line::from(format!("Score: {}", view.score)));
        }
        lines.push(Line::from(Span::styled(
            status.to_string(),
            Style::new().fg(Color::Gray),
        )));

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Round").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_letters(f: &mut Frame, area: Rect, view: Option<&RoundView>) {
        let mut lines = Vec::new();
        let mut spans = Vec::new();
        for (i, letter) in ('A'..='Z').enumerate() {
            spans.push(Span::styled(
                format!(" {letter} "),
                Self::letter_style(view, letter),
            ));
            if (i + 1) % LETTERS_PER_ROW == 0 {
                lines.push(Line::from(std::mem::take(&mut spans)));
            }
        }
        if !spans.is_empty() {
            lines.push(Line::from(spans));
        }

        let paragraph =
            Paragraph::new(lines).block(Block::default().title("Letters").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    // Green: guessed and in the word. Red: guessed and absent.
    fn letter_style(view: Option<&RoundView>, letter: char) -> Style {
        let Some(view) = view else {
            return Style::default();
        };
        if view.guessed_letters.contains(&letter) {
            if view.masked_word.contains(letter) {
                Style::default().fg(Color::Black).bg(Color::Green)
            } else {
                Style::default().fg(Color::White).bg(Color::Red)
            }
        } else {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        }
    }

    fn render_message(f: &mut Frame, area: Rect, message: &str, error_message: &str) {
        let mut lines = Vec::new();
        if !message.is_empty() {
            lines.push(Line::from(Span::styled(message.to_string(), MESSAGE_STYLE)));
        }
        if !error_message.is_empty() {
            lines.push(Line::from(Span::styled(
                error_message.to_string(),
                ERROR_STYLE,
            )));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Messages").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, view: Option<&RoundView>) {
        let finished = view.is_some_and(|v| v.outcome.is_terminal());
        let text = if finished {
            "ENTER: New round | ESC: Quit"
        } else {
            "Type a letter to guess | TAB: Hint (-5 points) | ENTER: New round | ESC: Quit"
        };

        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn handle_input(&mut self) -> Result<Option<PlayerAction>, io::Error> {
        // Poll with a timeout to check if events are available
        if !event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }

        let event = event::read()?;
        debug_log!("handle_input() - Event received: {:?}", event);

        // Filter out non-key events (mouse, focus, paste, resize)
        match event {
            Event::Key(key) => {
                // Only process Press events, ignore Release and Repeat to
                // avoid double input
                if key.kind != event::KeyEventKind::Press {
                    return Ok(None);
                }

                // Filter out replacement and control characters that come
                // from terminal escape sequences when alt-tabbing
                if let KeyCode::Char(c) = key.code {
                    if c == '\u{FFFD}' || (c as u32) < ASCII_CONTROL_CHAR_THRESHOLD {
                        debug_log!("handle_input() - Ignoring escape-sequence character");
                        return Ok(None);
                    }
                }

                Ok(self.map_key(key))
            }
            other => {
                debug_log!("handle_input() - Ignoring non-key event: {:?}", other);
                Ok(None)
            }
        }
    }

    fn map_key(&mut self, key: KeyEvent) -> Option<PlayerAction> {
        match key.code {
            KeyCode::Esc => {
                info_log!("map_key() - ESC pressed, exiting");
                Some(PlayerAction::Exit)
            }
            KeyCode::Tab => Some(PlayerAction::Hint),
            KeyCode::Enter => Some(PlayerAction::NewGame),
            KeyCode::Char(c) if c.is_ascii_alphabetic() => {
                // Ignore characters with Alt or Control modifiers (Shift
                // is ok for uppercase)
                if Self::has_modifier_keys(&key) {
                    debug_log!("map_key() - Ignoring modifier chord: {:?}", key.modifiers);
                    return None;
                }
                self.error_message.clear();
                Some(PlayerAction::Guess(c))
            }
            KeyCode::Char(c) => {
                self.error_message = format!("Only letters can be guessed ('{c}')");
                None
            }
            _ => {
                debug_log!("map_key() - Ignoring key: {:?}", key.code);
                None
            }
        }
    }

    fn has_modifier_keys(key: &KeyEvent) -> bool {
        key.modifiers.contains(event::KeyModifiers::ALT)
            || key.modifiers.contains(event::KeyModifiers::CONTROL)
    }
}

impl GameInterface for TuiInterface {
    fn display_round(&mut self, view: &RoundView) {
        // Announce the guess result while the round is still live; on a
        // win or loss the banner set by display_win/display_loss stays.
        if view.outcome == Outcome::InProgress {
            if let Some(prev) = &self.view {
                if view.guessed_letters.len() > prev.guessed_letters.len() {
                    if let Some(&letter) = view.guessed_letters.last() {
                        self.message = if view.mistakes > prev.mistakes {
                            format!("'{letter}' is not in the word.")
                        } else {
                            format!("'{letter}' is in the word!")
                        };
                    }
                }
            }
        }
        self.view = Some(view.clone());
        self.status = format!("Score {}", view.score);
        self.draw_or_log();
    }

    fn read_action(&mut self) -> Option<PlayerAction> {
        loop {
            if self.draw().is_err() {
                info_log!("read_action() - Draw failed, exiting");
                return Some(PlayerAction::Exit);
            }

            match self.handle_input() {
                Ok(Some(action)) => {
                    info_log!("read_action() - Action: {:?}", action);
                    return Some(action);
                }
                Ok(None) => {
                    // No action yet, keep polling
                }
                Err(_e) => {
                    info_log!("read_action() - Input error, exiting");
                    return Some(PlayerAction::Exit);
                }
            }
        }
    }

    fn display_win(&mut self, view: &RoundView) {
        self.message = format!("You won! Score: {}", view.score);
        self.status = "Round over".to_string();
    }

    fn display_loss(&mut self, view: &RoundView) {
        if let Some(word) = &view.revealed_word {
            self.message = format!("Out of tries! The word was: {word}");
        }
        self.status = "Round over".to_string();
    }

    fn display_new_round(&mut self, view: &RoundView) {
        self.view = Some(view.clone());
        self.message = format!("New round - category: {}", view.category);
        self.error_message.clear();
        self.status = format!("Score {}", view.score);
        self.draw_or_log();
    }

    fn display_exit_message(&mut self) {
        self.status = "Exiting...".to_string();
        self.draw_or_log();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
