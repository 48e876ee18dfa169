use super::{has_movies, MenuCommandHandler, SessionContext};
use crate::formatting::{movie_line, notice};

pub struct ListMoviesCommand;
pub const LIST_MOVIES_COMMAND_LABEL: &str = "List movies";

impl MenuCommandHandler for ListMoviesCommand {
    fn invoke(&self, ctx: &mut SessionContext) -> crate::Result<()> {
        if !has_movies(ctx) {
            return Ok(());
        }
        notice(&format!("\n{} movies in total", ctx.movies.len()));
        for (title, record) in &ctx.movies {
            println!("{}", movie_line(title, record));
        }
        Ok(())
    }
}
