use super::{has_movies, MenuCommandHandler, SessionContext};
use crate::formatting::rounded;
use crate::stats::compute_stats;

pub struct StatsCommand;
pub const STATS_COMMAND_LABEL: &str = "Stats";

impl MenuCommandHandler for StatsCommand {
    fn invoke(&self, ctx: &mut SessionContext) -> crate::Result<()> {
        if !has_movies(ctx) {
            return Ok(());
        }
        let stats = compute_stats(&ctx.movies)?;
        println!("Average rating: {}", rounded(stats.average));
        println!("Median rating: {}", rounded(stats.median));
        print_extreme("Best", &stats.best, ctx);
        print_extreme("Worst", &stats.worst, ctx);
        Ok(())
    }
}

fn print_extreme(kind: &str, titles: &[String], ctx: &SessionContext) {
    if titles.is_empty() {
        return;
    }
    if titles.len() > 1 {
        println!("{kind} movies:");
        for title in titles {
            print_title_line(title, ctx);
        }
    } else {
        print!("{kind} movie: ");
        print_title_line(&titles[0], ctx);
    }
}

fn print_title_line(title: &str, ctx: &SessionContext) {
    if let Some(record) = ctx.movies.get(title) {
        println!("{title} ({}), {}", record.year, record.rating);
    }
}
