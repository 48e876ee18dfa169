//! End-to-end tests of the user registry and record store against a real
//! database file in a temporary directory.

use moviebase::models::{MovieChanges, NewMovie};
use moviebase::{registry, store, Database, Error};
use tempfile::TempDir;

fn open_db(dir: &TempDir) -> Database {
    Database::open(dir.path().join("movies.db")).unwrap()
}

fn add_user(db: &Database, name: &str) -> i64 {
    registry::add_user(db, name).unwrap()
}

#[test]
fn add_then_list_round_trip() {
    let dir = TempDir::new().unwrap();
    let db = open_db(&dir);
    let user_id = add_user(&db, "Neo");

    let movie = NewMovie::new("The Matrix", 1999, 8.7)
        .with_poster_url(Some("https://example.com/matrix.jpg".to_owned()))
        .with_comment("mind-bending");
    store::add_movie(&db, user_id, &movie).unwrap();

    let movies = store::list_movies(&db, user_id).unwrap();
    let record = movies.get("The Matrix").unwrap();
    assert_eq!(record.year, 1999);
    assert_eq!(record.rating, 8.7);
    assert_eq!(
        record.poster_url.as_deref(),
        Some("https://example.com/matrix.jpg")
    );
    assert_eq!(record.comment, "mind-bending");
}

#[test]
fn duplicate_title_fails_and_leaves_original_unchanged() {
    let dir = TempDir::new().unwrap();
    let db = open_db(&dir);
    let user_id = add_user(&db, "Neo");

    store::add_movie(&db, user_id, &NewMovie::new("The Matrix", 1999, 8.7)).unwrap();
    let result = store::add_movie(&db, user_id, &NewMovie::new("The Matrix", 2003, 2.0));
    assert!(matches!(result, Err(Error::DuplicateTitle(title)) if title == "The Matrix"));

    let movies = store::list_movies(&db, user_id).unwrap();
    assert_eq!(movies.len(), 1);
    let record = movies.get("The Matrix").unwrap();
    assert_eq!(record.year, 1999);
    assert_eq!(record.rating, 8.7);
}

#[test]
fn delete_movie_absent_is_not_found() {
    let dir = TempDir::new().unwrap();
    let db = open_db(&dir);
    let user_id = add_user(&db, "Neo");

    let result = store::delete_movie(&db, user_id, "Nothing");
    assert!(matches!(result, Err(Error::NotFound(_))));
}

#[test]
fn delete_movie_removes_it_from_listing() {
    let dir = TempDir::new().unwrap();
    let db = open_db(&dir);
    let user_id = add_user(&db, "Neo");

    store::add_movie(&db, user_id, &NewMovie::new("Up", 2009, 8.3)).unwrap();
    store::delete_movie(&db, user_id, "Up").unwrap();
    assert!(store::list_movies(&db, user_id).unwrap().is_empty());
}

#[test]
fn update_changes_only_supplied_fields() {
    let dir = TempDir::new().unwrap();
    let db = open_db(&dir);
    let user_id = add_user(&db, "Neo");

    let movie = NewMovie::new("Up", 2009, 8.3)
        .with_poster_url(Some("https://example.com/up.jpg".to_owned()))
        .with_comment("balloons");
    store::add_movie(&db, user_id, &movie).unwrap();

    store::update_movie(
        &db,
        user_id,
        "Up",
        &MovieChanges {
            rating: Some(7.5),
            comment: None,
        },
    )
    .unwrap();

    let movies = store::list_movies(&db, user_id).unwrap();
    let record = movies.get("Up").unwrap();
    assert_eq!(record.rating, 7.5);
    assert_eq!(record.year, 2009);
    assert_eq!(record.poster_url.as_deref(), Some("https://example.com/up.jpg"));
    assert_eq!(record.comment, "balloons");
}

#[test]
fn update_absent_movie_is_not_found() {
    let dir = TempDir::new().unwrap();
    let db = open_db(&dir);
    let user_id = add_user(&db, "Neo");

    let result = store::update_movie(
        &db,
        user_id,
        "Nothing",
        &MovieChanges {
            rating: Some(5.0),
            comment: None,
        },
    );
    assert!(matches!(result, Err(Error::NotFound(_))));
}

#[test]
fn update_with_no_fields_is_rejected() {
    let dir = TempDir::new().unwrap();
    let db = open_db(&dir);
    let user_id = add_user(&db, "Neo");

    store::add_movie(&db, user_id, &NewMovie::new("Up", 2009, 8.3)).unwrap();
    let result = store::update_movie(&db, user_id, "Up", &MovieChanges::default());
    assert!(matches!(result, Err(Error::Validation(_))));
}

#[test]
fn two_users_may_own_the_same_title() {
    let dir = TempDir::new().unwrap();
    let db = open_db(&dir);
    let user_a = add_user(&db, "Neo");
    let user_b = add_user(&db, "Trinity");

    store::add_movie(&db, user_a, &NewMovie::new("Matrix", 1999, 8.7)).unwrap();
    store::add_movie(&db, user_b, &NewMovie::new("Matrix", 1999, 9.0)).unwrap();

    let movies_a = store::list_movies(&db, user_a).unwrap();
    let movies_b = store::list_movies(&db, user_b).unwrap();
    assert_eq!(movies_a.len(), 1);
    assert_eq!(movies_b.len(), 1);
    assert_eq!(movies_a.get("Matrix").unwrap().rating, 8.7);
    assert_eq!(movies_b.get("Matrix").unwrap().rating, 9.0);
}

#[test]
fn listing_without_movies_is_empty_not_an_error() {
    let dir = TempDir::new().unwrap();
    let db = open_db(&dir);
    let user_id = add_user(&db, "Neo");
    assert!(store::list_movies(&db, user_id).unwrap().is_empty());
}

#[test]
fn add_movie_validates_input() {
    let dir = TempDir::new().unwrap();
    let db = open_db(&dir);
    let user_id = add_user(&db, "Neo");

    let empty_title = store::add_movie(&db, user_id, &NewMovie::new("  ", 1999, 8.7));
    assert!(matches!(empty_title, Err(Error::Validation(_))));

    let bad_rating = store::add_movie(&db, user_id, &NewMovie::new("Up", 2009, 11.0));
    assert!(matches!(bad_rating, Err(Error::Validation(_))));

    let bad_year = store::add_movie(&db, user_id, &NewMovie::new("Up", 1066, 8.3));
    assert!(matches!(bad_year, Err(Error::Validation(_))));

    assert!(store::list_movies(&db, user_id).unwrap().is_empty());
}

#[test]
fn ensure_namespace_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let db = open_db(&dir);
    let user_id = add_user(&db, "Neo");

    store::ensure_namespace(&db, user_id).unwrap();
    store::ensure_namespace(&db, user_id).unwrap();

    store::add_movie(&db, user_id, &NewMovie::new("Up", 2009, 8.3)).unwrap();
    assert_eq!(store::list_movies(&db, user_id).unwrap().len(), 1);
}

#[test]
fn users_are_listed_in_id_order_with_fresh_ids() {
    let dir = TempDir::new().unwrap();
    let db = open_db(&dir);
    let first = add_user(&db, "Neo");
    let second = add_user(&db, "Trinity");
    assert!(second > first);

    let users = registry::list_users(&db).unwrap();
    let names: Vec<&str> = users.iter().map(|user| user.name.as_str()).collect();
    assert_eq!(names, vec!["Neo", "Trinity"]);
}

#[test]
fn add_user_rejects_empty_names() {
    let dir = TempDir::new().unwrap();
    let db = open_db(&dir);
    assert!(matches!(
        registry::add_user(&db, "   "),
        Err(Error::Validation(_))
    ));
    assert!(registry::list_users(&db).unwrap().is_empty());
}

#[test]
fn rename_and_resolve_user() {
    let dir = TempDir::new().unwrap();
    let db = open_db(&dir);
    let user_id = add_user(&db, "Neo");

    registry::rename_user(&db, user_id, "Mr. Anderson").unwrap();
    assert_eq!(registry::resolve_user(&db, user_id).unwrap(), "Mr. Anderson");
}

#[test]
fn unknown_users_are_not_found() {
    let dir = TempDir::new().unwrap();
    let db = open_db(&dir);
    assert!(matches!(
        registry::rename_user(&db, 42, "Nobody"),
        Err(Error::NotFound(_))
    ));
    assert!(matches!(
        registry::delete_user(&db, 42),
        Err(Error::NotFound(_))
    ));
    assert!(matches!(
        registry::resolve_user(&db, 42),
        Err(Error::NotFound(_))
    ));
}

#[test]
fn deleting_a_user_purges_their_movies_only() {
    let dir = TempDir::new().unwrap();
    let db = open_db(&dir);
    let user_a = add_user(&db, "Neo");
    let user_b = add_user(&db, "Trinity");

    store::add_movie(&db, user_a, &NewMovie::new("Matrix", 1999, 8.7)).unwrap();
    store::add_movie(&db, user_b, &NewMovie::new("Matrix", 1999, 9.0)).unwrap();

    registry::delete_user(&db, user_a).unwrap();

    assert!(store::list_movies(&db, user_a).unwrap().is_empty());
    assert_eq!(store::list_movies(&db, user_b).unwrap().len(), 1);
    assert!(matches!(
        registry::resolve_user(&db, user_a),
        Err(Error::NotFound(_))
    ));
}

#[test]
fn data_survives_reopening_the_file() {
    let dir = TempDir::new().unwrap();
    let user_id;
    {
        let db = open_db(&dir);
        user_id = add_user(&db, "Neo");
        store::add_movie(&db, user_id, &NewMovie::new("Up", 2009, 8.3)).unwrap();
    }
    let db = open_db(&dir);
    assert_eq!(registry::resolve_user(&db, user_id).unwrap(), "Neo");
    let movies = store::list_movies(&db, user_id).unwrap();
    assert_eq!(movies.get("Up").unwrap().rating, 8.3);
}
