//! The record store: CRUD over one user's movie rows. All rows live in a
//! single shared `movies` table keyed by a bound `user_id` column, so no
//! identifier is ever assembled from user input.

use rusqlite::{params, ErrorCode};
use tracing::debug;

use crate::database::{Database, CREATE_MOVIES_TABLE};
use crate::error::{Error, Result};
use crate::models::{movie_entry_from_row, MovieChanges, MovieCollection, NewMovie};

/// No movie predates the first public screening.
pub const FIRST_MOVIE_YEAR: i64 = 1895;

/// Create the movies table if absent. Idempotent, safe to call on every
/// open; `add_user` calls it when provisioning a fresh namespace.
pub fn ensure_namespace(db: &Database, user_id: i64) -> Result<()> {
    db.with_conn(|conn| {
        conn.execute(CREATE_MOVIES_TABLE, [])?;
        Ok(())
    })?;
    debug!(user_id, "movie namespace ready");
    Ok(())
}

/// Load one user's collection. A user without movies gets an empty map, not
/// an error.
pub fn list_movies(db: &Database, user_id: i64) -> Result<MovieCollection> {
    db.with_conn(|conn| {
        let mut stmt = conn.prepare(
            "SELECT title, year, rating, poster_url, comment FROM movies WHERE user_id = ?1",
        )?;
        let movies = stmt
            .query_map(params![user_id], movie_entry_from_row)?
            .collect::<rusqlite::Result<MovieCollection>>()?;
        Ok(movies)
    })
}

pub fn add_movie(db: &Database, user_id: i64, movie: &NewMovie) -> Result<()> {
    validate_new_movie(movie)?;
    db.with_conn(|conn| {
        let result = conn.execute(
            "INSERT INTO movies (user_id, title, year, rating, poster_url, comment)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                user_id,
                movie.title,
                movie.year,
                movie.rating,
                movie.poster_url,
                movie.comment,
            ],
        );
        match result {
            Ok(_) => Ok(()),
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation =>
            {
                Err(Error::DuplicateTitle(movie.title.clone()))
            }
            Err(err) => Err(err.into()),
        }
    })?;
    debug!(user_id, title = %movie.title, "added movie");
    Ok(())
}

pub fn delete_movie(db: &Database, user_id: i64, title: &str) -> Result<()> {
    db.with_conn(|conn| {
        let affected = conn.execute(
            "DELETE FROM movies WHERE user_id = ?1 AND title = ?2",
            params![user_id, title],
        )?;
        if affected == 0 {
            return Err(Error::NotFound(format!("movie '{title}'")));
        }
        Ok(())
    })?;
    debug!(user_id, title, "deleted movie");
    Ok(())
}

/// Update only the supplied fields of one movie. A single UPDATE statement
/// per shape keeps each call one atomic write.
pub fn update_movie(
    db: &Database,
    user_id: i64,
    title: &str,
    changes: &MovieChanges,
) -> Result<()> {
    if changes.is_empty() {
        return Err(Error::Validation("no fields to update".to_owned()));
    }
    if let Some(rating) = changes.rating {
        validate_rating(rating)?;
    }
    db.with_conn(|conn| {
        let affected = match (changes.rating, changes.comment.as_deref()) {
            (Some(rating), Some(comment)) => conn.execute(
                "UPDATE movies SET rating = ?1, comment = ?2 WHERE user_id = ?3 AND title = ?4",
                params![rating, comment, user_id, title],
            )?,
            (Some(rating), None) => conn.execute(
                "UPDATE movies SET rating = ?1 WHERE user_id = ?2 AND title = ?3",
                params![rating, user_id, title],
            )?,
            (None, Some(comment)) => conn.execute(
                "UPDATE movies SET comment = ?1 WHERE user_id = ?2 AND title = ?3",
                params![comment, user_id, title],
            )?,
            (None, None) => unreachable!("rejected above as an empty update"),
        };
        if affected == 0 {
            return Err(Error::NotFound(format!("movie '{title}'")));
        }
        Ok(())
    })?;
    debug!(user_id, title, "updated movie");
    Ok(())
}

fn validate_new_movie(movie: &NewMovie) -> Result<()> {
    if movie.title.trim().is_empty() {
        return Err(Error::Validation("movie title must not be empty".to_owned()));
    }
    if movie.year < FIRST_MOVIE_YEAR {
        return Err(Error::Validation(format!(
            "year {} is before the first movie ({FIRST_MOVIE_YEAR})",
            movie.year
        )));
    }
    validate_rating(movie.rating)
}

fn validate_rating(rating: f64) -> Result<()> {
    if !(0.0..=10.0).contains(&rating) {
        return Err(Error::Validation(format!(
            "rating {rating} is not between 0 and 10"
        )));
    }
    Ok(())
}
