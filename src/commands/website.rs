use super::{has_movies, MenuCommandHandler, SessionContext};
use crate::error::Error;
use crate::formatting::notice;
use crate::website::render_website;

pub struct WebsiteCommand;
pub const WEBSITE_COMMAND_LABEL: &str = "Generate website";

impl MenuCommandHandler for WebsiteCommand {
    fn invoke(&self, ctx: &mut SessionContext) -> crate::Result<()> {
        if !has_movies(ctx) {
            return Ok(());
        }
        let page = render_website(&ctx.user.name, &ctx.movies);
        let path = ctx.data_dir.join("movie_website.html");
        std::fs::write(&path, page).map_err(|source| Error::Output {
            path: path.display().to_string(),
            source,
        })?;
        notice("Website was successfully generated!");
        Ok(())
    }
}
