use super::{has_movies, prompt, MenuCommandHandler, SessionContext};
use crate::error::Error;
use crate::formatting::notice;
use crate::histogram::render_ratings_svg;

pub struct HistogramCommand;
pub const HISTOGRAM_COMMAND_LABEL: &str = "Create rating histogram";

impl MenuCommandHandler for HistogramCommand {
    fn invoke(&self, ctx: &mut SessionContext) -> crate::Result<()> {
        if !has_movies(ctx) {
            return Ok(());
        }
        let svg = render_ratings_svg(&ctx.movies)?;
        let Some(mut file_name) = prompt(
            ctx.editor,
            "In which file do you want to save the histogram? (.svg by default):\n",
        )?
        else {
            return Ok(());
        };
        if file_name.is_empty() {
            file_name = "ratings".to_owned();
        }
        if !file_name.contains('.') {
            file_name.push_str(".svg");
        }
        let path = ctx.data_dir.join(&file_name);
        std::fs::write(&path, svg).map_err(|source| Error::Output {
            path: path.display().to_string(),
            source,
        })?;
        notice(&format!("File '{}' successfully saved!", path.display()));
        Ok(())
    }
}
