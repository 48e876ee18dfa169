//! Static web page generation: substitutes the active user's name and a
//! rendered movie grid into the bundled HTML template.

use crate::models::MovieCollection;

const TEMPLATE: &str = include_str!("../_static/index_template.html");

const TITLE_PLACEHOLDER: &str = "__TEMPLATE_TITLE__";
const GRID_PLACEHOLDER: &str = "__TEMPLATE_MOVIE_GRID__";

/// Render the full page for one user's collection.
pub fn render_website(user_name: &str, movies: &MovieCollection) -> String {
    let grid: String = movies
        .iter()
        .map(|(title, record)| {
            let poster = record.poster_url.as_deref().unwrap_or("");
            format!(
                r#"    <li class="movie-grid li">
        <div class="movie">
            <img class="movie-poster" src="{poster}" alt="poster image"/>
            <p class="movie-title">{title}</p>
            <p class="movie-year">{year}</p>
        </div>
    </li>
"#,
                poster = poster,
                title = escape_html(title),
                year = record.year,
            )
        })
        .collect();
    TEMPLATE
        .replace(TITLE_PLACEHOLDER, &format!("{}'s", escape_html(user_name)))
        .replace(GRID_PLACEHOLDER, grid.trim_end())
}

/// Titles and names land inside markup, so the few significant characters
/// get escaped.
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::models::MovieRecord;
    use std::collections::BTreeMap;

    #[test]
    fn test_render_website() {
        let mut movies = BTreeMap::new();
        movies.insert(
            "The Matrix".to_owned(),
            MovieRecord {
                year: 1999,
                rating: 8.7,
                poster_url: Some("https://example.com/matrix.jpg".to_owned()),
                comment: String::new(),
            },
        );
        let page = render_website("Trinity", &movies);
        assert!(page.contains("Trinity's Movie App"));
        assert!(page.contains("The Matrix"));
        assert!(page.contains("1999"));
        assert!(page.contains("https://example.com/matrix.jpg"));
        assert!(!page.contains(TITLE_PLACEHOLDER));
        assert!(!page.contains(GRID_PLACEHOLDER));
    }

    #[test]
    fn test_render_website_escapes_markup() {
        let mut movies = BTreeMap::new();
        movies.insert(
            "Fast & Furious".to_owned(),
            MovieRecord {
                year: 2001,
                rating: 6.8,
                poster_url: None,
                comment: String::new(),
            },
        );
        let page = render_website("<admin>", &movies);
        assert!(page.contains("Fast &amp; Furious"));
        assert!(page.contains("&lt;admin&gt;'s Movie App"));
    }
}
