use super::{prompt, prompt_movie_title, MenuCommandHandler, SessionContext};
use crate::formatting::{notice, warning};
use crate::models::NewMovie;
use crate::store::{self, FIRST_MOVIE_YEAR};

pub struct AddMovieCommand;
pub const ADD_MOVIE_COMMAND_LABEL: &str = "Add movie";

impl MenuCommandHandler for AddMovieCommand {
    fn invoke(&self, ctx: &mut SessionContext) -> crate::Result<()> {
        let Some(title) = prompt_movie_title(ctx.editor, "add")? else {
            return Ok(());
        };
        if ctx.movies.contains_key(&title) {
            warning("This movie was already saved.");
            return Ok(());
        }

        let movie = match ctx.metadata {
            Some(source) => match source.lookup(&title) {
                Ok(metadata) => NewMovie::new(title.clone(), metadata.year, metadata.rating)
                    .with_poster_url(metadata.poster_url),
                Err(err) => {
                    warning(&err.to_string());
                    notice("Enter the movie details yourself instead.");
                    let Some(movie) = prompt_manual_entry(ctx, &title)? else {
                        return Ok(());
                    };
                    movie
                }
            },
            None => {
                let Some(movie) = prompt_manual_entry(ctx, &title)? else {
                    return Ok(());
                };
                movie
            }
        };

        store::add_movie(ctx.db, ctx.user.id, &movie)?;
        notice(&format!("Movie '{title}' successfully added!"));
        Ok(())
    }
}

fn prompt_manual_entry(
    ctx: &mut SessionContext,
    title: &str,
) -> crate::Result<Option<NewMovie>> {
    let Some(year) = prompt_year(ctx)? else {
        return Ok(None);
    };
    let Some(rating) = prompt_rating(ctx)? else {
        return Ok(None);
    };
    Ok(Some(NewMovie::new(title, year, rating)))
}

fn prompt_year(ctx: &mut SessionContext) -> crate::Result<Option<i64>> {
    loop {
        let Some(line) = prompt(ctx.editor, "Enter release year: ")? else {
            return Ok(None);
        };
        match line.parse::<i64>() {
            Ok(year) if year >= FIRST_MOVIE_YEAR => return Ok(Some(year)),
            _ => warning(&format!("Enter a year from {FIRST_MOVIE_YEAR} onwards!")),
        }
    }
}

fn prompt_rating(ctx: &mut SessionContext) -> crate::Result<Option<f64>> {
    loop {
        let Some(line) = prompt(ctx.editor, "Enter a rating (0-10): ")? else {
            return Ok(None);
        };
        match line.parse::<f64>() {
            Ok(rating) if (0.0..=10.0).contains(&rating) => return Ok(Some(rating)),
            _ => warning("Enter a rating between 0 and 10!"),
        }
    }
}
