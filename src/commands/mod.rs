//! The movie menu: one module per command, dispatched through the
//! `Commands` enum. Handlers read their own input, call into the store or
//! the aggregation functions, and print through `formatting`.

use std::path::Path;

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::database::Database;
use crate::formatting::{heading, menu_entry, prompt_text, warning};
use crate::metadata::MetadataSource;
use crate::models::{MovieCollection, User};
use crate::stats::title_case;

use self::add::{AddMovieCommand, ADD_MOVIE_COMMAND_LABEL};
use self::delete::{DeleteMovieCommand, DELETE_MOVIE_COMMAND_LABEL};
use self::histogram::{HistogramCommand, HISTOGRAM_COMMAND_LABEL};
use self::list::{ListMoviesCommand, LIST_MOVIES_COMMAND_LABEL};
use self::random::{RandomMovieCommand, RANDOM_MOVIE_COMMAND_LABEL};
use self::search::{SearchMovieCommand, SEARCH_MOVIE_COMMAND_LABEL};
use self::sort::{SortByRatingCommand, SORT_BY_RATING_COMMAND_LABEL};
use self::stats::{StatsCommand, STATS_COMMAND_LABEL};
use self::update::{UpdateMovieCommand, UPDATE_MOVIE_COMMAND_LABEL};
use self::website::{WebsiteCommand, WEBSITE_COMMAND_LABEL};

mod add;
mod delete;
mod histogram;
mod list;
mod random;
mod search;
mod sort;
mod stats;
mod update;
mod website;

pub const EXIT_COMMAND_LABEL: &str = "Exit";

/// Menu labels in choice order; the index is the number the user types.
pub const MENU: [&str; 11] = [
    EXIT_COMMAND_LABEL,
    LIST_MOVIES_COMMAND_LABEL,
    ADD_MOVIE_COMMAND_LABEL,
    DELETE_MOVIE_COMMAND_LABEL,
    UPDATE_MOVIE_COMMAND_LABEL,
    STATS_COMMAND_LABEL,
    RANDOM_MOVIE_COMMAND_LABEL,
    SEARCH_MOVIE_COMMAND_LABEL,
    SORT_BY_RATING_COMMAND_LABEL,
    HISTOGRAM_COMMAND_LABEL,
    WEBSITE_COMMAND_LABEL,
];

/// Everything a handler can reach: the open database, the active user, the
/// collection loaded at the top of this menu pass, the optional metadata
/// client, the line editor and the directory for generated files.
pub struct SessionContext<'a> {
    pub db: &'a Database,
    pub user: User,
    pub movies: MovieCollection,
    pub metadata: Option<&'a dyn MetadataSource>,
    pub editor: &'a mut DefaultEditor,
    pub data_dir: &'a Path,
}

pub enum Commands {
    Exit,
    ListMovies(ListMoviesCommand),
    AddMovie(AddMovieCommand),
    DeleteMovie(DeleteMovieCommand),
    UpdateMovie(UpdateMovieCommand),
    Stats(StatsCommand),
    RandomMovie(RandomMovieCommand),
    SearchMovie(SearchMovieCommand),
    SortByRating(SortByRatingCommand),
    Histogram(HistogramCommand),
    Website(WebsiteCommand),
}

impl Commands {
    pub fn parse(choice: usize) -> Result<Self, ParseError> {
        match choice {
            0 => Ok(Self::Exit),
            1 => Ok(Self::ListMovies(ListMoviesCommand)),
            2 => Ok(Self::AddMovie(AddMovieCommand)),
            3 => Ok(Self::DeleteMovie(DeleteMovieCommand)),
            4 => Ok(Self::UpdateMovie(UpdateMovieCommand)),
            5 => Ok(Self::Stats(StatsCommand)),
            6 => Ok(Self::RandomMovie(RandomMovieCommand)),
            7 => Ok(Self::SearchMovie(SearchMovieCommand)),
            8 => Ok(Self::SortByRating(SortByRatingCommand)),
            9 => Ok(Self::Histogram(HistogramCommand)),
            10 => Ok(Self::Website(WebsiteCommand)),
            _ => Err(ParseError::UnknownChoice),
        }
    }

    pub fn invoke(&self, ctx: &mut SessionContext) -> crate::Result<()> {
        match self {
            Self::Exit => Ok(()),
            Self::ListMovies(command) => command.invoke(ctx),
            Self::AddMovie(command) => command.invoke(ctx),
            Self::DeleteMovie(command) => command.invoke(ctx),
            Self::UpdateMovie(command) => command.invoke(ctx),
            Self::Stats(command) => command.invoke(ctx),
            Self::RandomMovie(command) => command.invoke(ctx),
            Self::SearchMovie(command) => command.invoke(ctx),
            Self::SortByRating(command) => command.invoke(ctx),
            Self::Histogram(command) => command.invoke(ctx),
            Self::Website(command) => command.invoke(ctx),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ParseError {
    UnknownChoice,
}

pub trait MenuCommandHandler {
    fn invoke(&self, ctx: &mut SessionContext) -> crate::Result<()>;
}

pub fn show_menu() {
    heading("Menu:");
    for (number, label) in MENU.iter().enumerate() {
        menu_entry(number, label);
    }
}

/// Read one line. `None` means the user cancelled with ctrl-c/ctrl-d.
pub fn prompt(editor: &mut DefaultEditor, text: &str) -> crate::Result<Option<String>> {
    match editor.readline(&prompt_text(text)) {
        Ok(line) => Ok(Some(line.trim().to_owned())),
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

/// Ask for a movie name until something non-empty is entered; returns the
/// title-cased form, which is how titles are stored.
pub fn prompt_movie_title(
    editor: &mut DefaultEditor,
    action: &str,
) -> crate::Result<Option<String>> {
    loop {
        let Some(line) = prompt(editor, &format!("Enter movie name to {action}: "))? else {
            return Ok(None);
        };
        if line.is_empty() {
            warning("Invalid name!");
            continue;
        }
        return Ok(Some(title_case(&line)));
    }
}

/// Guard shared by every command that needs a non-empty collection.
fn has_movies(ctx: &SessionContext) -> bool {
    if ctx.movies.is_empty() {
        warning("No movies in your database yet!");
        return false;
    }
    true
}
