//! Shared terminal presentation helpers. All colored output funnels through
//! here so the rest of the app never touches `colored` directly.

use colored::Colorize;

use crate::models::MovieRecord;

pub fn banner(text: &str) {
    println!("{}", format!("\n********** {text} **********\n").cyan());
}

pub fn heading(text: &str) {
    println!("{}", text.cyan());
}

pub fn menu_entry(number: usize, label: &str) {
    println!("{}", format!("{number}. {label}").green());
}

pub fn notice(text: &str) {
    println!("{}", text.cyan());
}

pub fn warning(text: &str) {
    println!("{}", text.red());
}

/// Prompt text handed to the line editor, styled like every other question.
pub fn prompt_text(text: &str) -> String {
    text.yellow().to_string()
}

/// The one-line rendering used by list, search and sort output.
pub fn movie_line(title: &str, record: &MovieRecord) -> String {
    format!("{title} ({}) Rating: {}", record.year, record.rating)
}

/// Ratings are shown rounded to one decimal, the way the stats menu prints
/// averages and medians.
pub fn rounded(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_movie_line() {
        let record = MovieRecord {
            year: 1999,
            rating: 8.7,
            poster_url: None,
            comment: String::new(),
        };
        assert_eq!(movie_line("The Matrix", &record), "The Matrix (1999) Rating: 8.7");
    }

    #[test]
    fn test_rounded() {
        assert_eq!(rounded(23.0 / 3.0), 7.7);
        assert_eq!(rounded(5.0), 5.0);
        assert_eq!(rounded(7.25), 7.3);
    }
}
