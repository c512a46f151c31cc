use crate::engine::RoundView;
use crate::session::{GameInterface, PlayerAction};
use clap::Parser;
use std::io::BufRead;

/// Hangman CLI options
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a word bank file ("Category: word word ..." per line)
    #[arg(short = 'i', long = "input")]
    pub wordbank_path: Option<String>,

    /// Play on plain stdin/stdout instead of the full-screen interface
    #[arg(long)]
    pub plain: bool,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

// UI Input/Output functions

pub enum ActionInput {
    Valid(PlayerAction),
    Invalid,
}

fn parse_action(input: &str) -> ActionInput {
    match input {
        "EXIT" => ActionInput::Valid(PlayerAction::Exit),
        "NEW" => ActionInput::Valid(PlayerAction::NewGame),
        "HINT" => ActionInput::Valid(PlayerAction::Hint),
        _ => {
            let mut chars = input.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii_alphabetic() => {
                    ActionInput::Valid(PlayerAction::Guess(c))
                }
                _ => ActionInput::Invalid,
            }
        }
    }
}

pub fn read_action<R: BufRead>(reader: &mut R) -> Option<PlayerAction> {
    println!("\nGuess a letter (or 'hint', 'new', 'exit'):");
    let mut input = String::new();
    // EOF ends the game rather than spinning on empty reads
    if reader.read_line(&mut input).unwrap_or(0) == 0 {
        return Some(PlayerAction::Exit);
    }
    let input = input.trim().to_uppercase();

    match parse_action(&input) {
        ActionInput::Valid(action) => Some(action),
        ActionInput::Invalid => {
            println!("Invalid input. Enter a single letter, 'hint', 'new', or 'exit'.");
            None
        }
    }
}

pub fn display_round(view: &RoundView) {
    println!("\nCategory: {}", view.category);
    println!("Word: {}", view.masked_word);
    println!("Mistakes: {}/{}", view.mistakes, view.max_mistakes);
    if !view.guessed_letters.is_empty() {
        let guessed: String = view.guessed_letters.iter().collect();
        println!("Guessed: {guessed}");
    }
    println!("Score: {}", view.score);
}

pub fn display_win(view: &RoundView) {
    println!("You won! Score: {}", view.score);
}

pub fn display_loss(view: &RoundView) {
    if let Some(word) = &view.revealed_word {
        println!("Out of tries! The word was: {word}");
    }
}

pub fn display_new_round(view: &RoundView) {
    println!(
        "\nNew round. Category: {} ({} letters)",
        view.category,
        view.masked_word.split(' ').count()
    );
}

pub fn display_exit_message() {
    println!("Exiting.");
}

/// Plain line-oriented implementation of the GameInterface trait.
/// Wraps any BufRead, which makes it scriptable in tests.
pub struct CliInterface<R: BufRead> {
    reader: R,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn display_round(&mut self, view: &RoundView) {
        display_round(view);
    }

    fn read_action(&mut self) -> Option<PlayerAction> {
        read_action(&mut self.reader)
    }

    fn display_win(&mut self, view: &RoundView) {
        display_win(view);
    }

    fn display_loss(&mut self, view: &RoundView) {
        display_loss(view);
    }

    fn display_new_round(&mut self, view: &RoundView) {
        display_new_round(view);
    }

    fn display_exit_message(&mut self) {
        display_exit_message();
    }
}
