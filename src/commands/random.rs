use super::{has_movies, MenuCommandHandler, SessionContext};
use crate::formatting::notice;
use crate::stats::pick_random;

pub struct RandomMovieCommand;
pub const RANDOM_MOVIE_COMMAND_LABEL: &str = "Random movie";

impl MenuCommandHandler for RandomMovieCommand {
    fn invoke(&self, ctx: &mut SessionContext) -> crate::Result<()> {
        if !has_movies(ctx) {
            return Ok(());
        }
        let (title, record) = pick_random(&ctx.movies)?;
        notice("Your movie for tonight:");
        println!("{title} ({}), it's rated {}", record.year, record.rating);
        Ok(())
    }
}
