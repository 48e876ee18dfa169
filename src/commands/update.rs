use super::{has_movies, prompt, prompt_movie_title, MenuCommandHandler, SessionContext};
use crate::formatting::{notice, warning};
use crate::models::MovieChanges;
use crate::store;

pub struct UpdateMovieCommand;
pub const UPDATE_MOVIE_COMMAND_LABEL: &str = "Update movie";

impl MenuCommandHandler for UpdateMovieCommand {
    fn invoke(&self, ctx: &mut SessionContext) -> crate::Result<()> {
        if !has_movies(ctx) {
            return Ok(());
        }
        let Some(title) = prompt_movie_title(ctx.editor, "update")? else {
            return Ok(());
        };
        if !ctx.movies.contains_key(&title) {
            warning(&format!("Movie '{title}' doesn't exist!"));
            return Ok(());
        }

        let Some(rating) = prompt_new_rating(ctx)? else {
            return Ok(());
        };
        let Some(comment_line) = prompt(
            ctx.editor,
            "Write a comment to add to the movie (press enter to keep): ",
        )?
        else {
            return Ok(());
        };
        let comment = (!comment_line.is_empty()).then_some(comment_line);

        let changes = MovieChanges { rating, comment };
        if changes.is_empty() {
            warning("Nothing to update.");
            return Ok(());
        }
        store::update_movie(ctx.db, ctx.user.id, &title, &changes)?;
        notice(&format!("Movie '{title}' successfully updated!"));
        Ok(())
    }
}

/// `Ok(Some(None))` means "keep the current rating"; the outer `None` means
/// the user cancelled the prompt.
fn prompt_new_rating(ctx: &mut SessionContext) -> crate::Result<Option<Option<f64>>> {
    loop {
        let Some(line) = prompt(ctx.editor, "New rating (press enter to keep): ")? else {
            return Ok(None);
        };
        if line.is_empty() {
            return Ok(Some(None));
        }
        match line.parse::<f64>() {
            Ok(rating) if (0.0..=10.0).contains(&rating) => return Ok(Some(Some(rating))),
            _ => warning("Enter a rating between 0 and 10!"),
        }
    }
}
