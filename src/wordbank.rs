use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

pub const EMBEDDED_WORDBANK: &str = include_str!("resources/wordbank.txt");

/// One category: a display label and its words, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordCategory {
    pub name: String,
    pub words: Vec<String>,
}

/// Categorized word bank. Words are uppercase ASCII-alphabetic tokens;
/// categories left empty by filtering are not kept.
#[derive(Debug, Clone, Default)]
pub struct WordBank {
    categories: Vec<WordCategory>,
}

impl WordBank {
    pub fn categories(&self) -> &[WordCategory] {
        &self.categories
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn word_count(&self) -> usize {
        self.categories.iter().map(|c| c.words.len()).sum()
    }
}

fn is_valid_word(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| c.is_ascii_alphabetic())
}

// Line format: "Name: word word word". Blank lines and '#' comments are
// skipped, as are lines without a colon or with no surviving words.
fn parse_line(bank: &mut WordBank, line: &str) {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return;
    }
    let Some((name, rest)) = line.split_once(':') else {
        return;
    };
    let name = name.trim();
    if name.is_empty() {
        return;
    }
    let words: Vec<String> = rest
        .split_whitespace()
        .map(str::to_uppercase)
        .filter(|w| is_valid_word(w))
        .collect();
    if words.is_empty() {
        return;
    }
    if let Some(category) = bank.categories.iter_mut().find(|c| c.name == name) {
        for word in words {
            if !category.words.contains(&word) {
                category.words.push(word);
            }
        }
    } else {
        bank.categories.push(WordCategory {
            name: name.to_string(),
            words,
        });
    }
}

pub fn load_wordbank_from_str(data: &str) -> WordBank {
    let mut bank = WordBank::default();
    for line in data.lines() {
        parse_line(&mut bank, line);
    }
    bank
}

pub fn load_wordbank_from_file<P: AsRef<Path>>(path: P) -> io::Result<WordBank> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut bank = WordBank::default();
    for line in reader.lines() {
        parse_line(&mut bank, &line?);
    }
    Ok(bank)
}
