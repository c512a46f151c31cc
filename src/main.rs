use std::io::{self, Write};

use hangman::cli::{CliInterface, parse_cli};
use hangman::engine::GameEngine;
use hangman::session::game_loop;
use hangman::tui::TuiInterface;
use hangman::wordbank::{EMBEDDED_WORDBANK, load_wordbank_from_file, load_wordbank_from_str};

// Log lines carry a timestamp so TUI input stalls can be traced.
fn init_logging() {
    env_logger::Builder::from_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.args()
            )
        })
        .init();
}

fn main() {
    init_logging();
    let cli = parse_cli();

    let bank = match &cli.wordbank_path {
        Some(path) => match load_wordbank_from_file(path) {
            Ok(bank) => bank,
            Err(e) => {
                eprintln!("Failed to load word bank from '{path}': {e}");
                return;
            }
        },
        None => load_wordbank_from_str(EMBEDDED_WORDBANK),
    };

    let category_count = bank.categories().len();
    let word_count = bank.word_count();
    let Some(mut engine) = GameEngine::new(bank) else {
        eprintln!("Word bank contains no usable words.");
        return;
    };

    if cli.plain {
        println!("Loaded {word_count} words in {category_count} categories.");
        let stdin = io::stdin();
        let mut interface = CliInterface::new(stdin.lock());
        game_loop(&mut engine, &mut interface);
    } else {
        match TuiInterface::new() {
            Ok(mut interface) => game_loop(&mut engine, &mut interface),
            Err(e) => eprintln!("Failed to initialize terminal UI: {e}"),
        }
    }
}
