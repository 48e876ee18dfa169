use super::{has_movies, prompt_movie_title, MenuCommandHandler, SessionContext};
use crate::error::Error;
use crate::formatting::{notice, warning};
use crate::store;

pub struct DeleteMovieCommand;
pub const DELETE_MOVIE_COMMAND_LABEL: &str = "Delete movie";

impl MenuCommandHandler for DeleteMovieCommand {
    fn invoke(&self, ctx: &mut SessionContext) -> crate::Result<()> {
        if !has_movies(ctx) {
            return Ok(());
        }
        let Some(title) = prompt_movie_title(ctx.editor, "delete")? else {
            return Ok(());
        };
        match store::delete_movie(ctx.db, ctx.user.id, &title) {
            Ok(()) => notice(&format!("Movie '{title}' successfully deleted")),
            Err(Error::NotFound(_)) => warning(&format!("Movie '{title}' doesn't exist!")),
            Err(err) => return Err(err),
        }
        Ok(())
    }
}
