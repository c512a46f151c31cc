// Library interface for the hangman game
// This allows integration tests to access internal modules

pub mod cli;
pub mod engine;
pub mod logging;
pub mod session;
pub mod tui;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use engine::{GameEngine, MAX_MISTAKES, Outcome, RoundView};
pub use session::{GameInterface, PlayerAction, game_loop};
pub use wordbank::{
    EMBEDDED_WORDBANK, WordBank, WordCategory, load_wordbank_from_file, load_wordbank_from_str,
};
