use super::{has_movies, prompt, MenuCommandHandler, SessionContext};
use crate::formatting::{movie_line, notice, warning};
use crate::stats::search;

pub struct SearchMovieCommand;
pub const SEARCH_MOVIE_COMMAND_LABEL: &str = "Search movie";

impl MenuCommandHandler for SearchMovieCommand {
    fn invoke(&self, ctx: &mut SessionContext) -> crate::Result<()> {
        if !has_movies(ctx) {
            return Ok(());
        }
        let Some(query) = prompt(
            ctx.editor,
            "Enter the full title, or part of a movie name: ",
        )?
        else {
            return Ok(());
        };
        if query.is_empty() {
            warning("Invalid name!");
            return Ok(());
        }

        let results = search(&ctx.movies, &query);
        if let Some((title, record)) = results.exact {
            println!("{}", movie_line(&title, &record));
            return Ok(());
        }
        warning(&format!("No movie with the title '{query}' was found!"));
        if results.fuzzy.is_empty() {
            warning("No movie found");
            return Ok(());
        }
        notice("\nMaybe you are searching for:");
        for (title, record) in results.fuzzy {
            println!("{title} ({}), {}", record.year, record.rating);
        }
        Ok(())
    }
}
