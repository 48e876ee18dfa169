use std::collections::BTreeMap;

use rusqlite::Row;

/// A registered user of the app. Names are not required to be unique; the id
/// is what addresses the user's movie namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: String,
}

/// The stored fields of one movie, minus its title. A loaded collection maps
/// titles to these records.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieRecord {
    pub year: i64,
    pub rating: f64,
    pub poster_url: Option<String>,
    pub comment: String,
}

/// One user's movies, keyed by title. `BTreeMap` keeps every listing in
/// title-ascending order.
pub type MovieCollection = BTreeMap<String, MovieRecord>;

/// A movie about to be inserted for some user.
#[derive(Debug, Clone)]
pub struct NewMovie {
    pub title: String,
    pub year: i64,
    pub rating: f64,
    pub poster_url: Option<String>,
    pub comment: String,
}

impl NewMovie {
    pub fn new(title: impl Into<String>, year: i64, rating: f64) -> Self {
        NewMovie {
            title: title.into(),
            year,
            rating,
            poster_url: None,
            comment: String::new(),
        }
    }

    pub fn with_poster_url(mut self, poster_url: Option<String>) -> Self {
        self.poster_url = poster_url;
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }
}

/// The fields `update_movie` may change. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct MovieChanges {
    pub rating: Option<f64>,
    pub comment: Option<String>,
}

impl MovieChanges {
    pub fn is_empty(&self) -> bool {
        self.rating.is_none() && self.comment.is_none()
    }
}

pub(crate) fn user_from_row(row: &Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}

/// Maps a `title, year, rating, poster_url, comment` row into a collection
/// entry. `poster_url` is nullable; `comment` defaults to empty.
pub(crate) fn movie_entry_from_row(row: &Row) -> rusqlite::Result<(String, MovieRecord)> {
    Ok((
        row.get(0)?,
        MovieRecord {
            year: row.get(1)?,
            rating: row.get(2)?,
            poster_url: row.get(3)?,
            comment: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
        },
    ))
}
