use super::{has_movies, MenuCommandHandler, SessionContext};
use crate::formatting::notice;
use crate::stats::sort_by_rating_desc;

pub struct SortByRatingCommand;
pub const SORT_BY_RATING_COMMAND_LABEL: &str = "Movies sorted by rating";

impl MenuCommandHandler for SortByRatingCommand {
    fn invoke(&self, ctx: &mut SessionContext) -> crate::Result<()> {
        if !has_movies(ctx) {
            return Ok(());
        }
        notice("The top-bottom ratings are:");
        for (title, record) in sort_by_rating_desc(&ctx.movies) {
            println!("{title} ({}), {}", record.year, record.rating);
        }
        Ok(())
    }
}
