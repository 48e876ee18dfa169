//! Pure in-memory aggregation over a loaded movie collection: statistics,
//! fuzzy search, ranking and random selection. Nothing here touches the
//! database; every function takes whatever `list_movies` returned.

use rand::Rng;

use crate::error::{Error, Result};
use crate::models::{MovieCollection, MovieRecord};

/// Minimum partial-similarity score (0-100) for a fuzzy search hit.
const FUZZY_MATCH_THRESHOLD: f64 = 80.0;

#[derive(Debug, Clone, PartialEq)]
pub struct RatingStats {
    pub average: f64,
    pub median: f64,
    /// Every title tied for the highest rating.
    pub best: Vec<String>,
    /// Every title tied for the lowest rating.
    pub worst: Vec<String>,
}

pub fn compute_stats(movies: &MovieCollection) -> Result<RatingStats> {
    if movies.is_empty() {
        return Err(Error::EmptyCollection);
    }
    let mut ratings: Vec<f64> = movies.values().map(|record| record.rating).collect();
    let average = ratings.iter().sum::<f64>() / ratings.len() as f64;
    ratings.sort_by(f64::total_cmp);

    let mid = ratings.len() / 2;
    let median = if ratings.len() % 2 == 1 {
        ratings[mid]
    } else {
        (ratings[mid - 1] + ratings[mid]) / 2.0
    };

    let max = ratings[ratings.len() - 1];
    let min = ratings[0];
    let best = titles_rated(movies, max);
    let worst = titles_rated(movies, min);
    Ok(RatingStats {
        average,
        median,
        best,
        worst,
    })
}

fn titles_rated(movies: &MovieCollection, rating: f64) -> Vec<String> {
    movies
        .iter()
        .filter(|(_, record)| record.rating == rating)
        .map(|(title, _)| title.clone())
        .collect()
}

/// Uniform random choice over the collection.
pub fn pick_random(movies: &MovieCollection) -> Result<(String, MovieRecord)> {
    if movies.is_empty() {
        return Err(Error::EmptyCollection);
    }
    let index = rand::thread_rng().gen_range(0..movies.len());
    let (title, record) = movies
        .iter()
        .nth(index)
        .ok_or(Error::EmptyCollection)?;
    Ok((title.clone(), record.clone()))
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchResults {
    /// Hit under title-case canonicalization, when one exists.
    pub exact: Option<(String, MovieRecord)>,
    /// Otherwise, every title scoring at least the fuzzy threshold,
    /// title-ascending.
    pub fuzzy: Vec<(String, MovieRecord)>,
}

pub fn search(movies: &MovieCollection, query: &str) -> SearchResults {
    let canonical = title_case(query);
    if let Some(record) = movies.get(&canonical) {
        return SearchResults {
            exact: Some((canonical, record.clone())),
            fuzzy: Vec::new(),
        };
    }
    let needle = query.to_lowercase();
    let fuzzy = movies
        .iter()
        .filter(|(title, _)| partial_ratio(&needle, &title.to_lowercase()) >= FUZZY_MATCH_THRESHOLD)
        .map(|(title, record)| (title.clone(), record.clone()))
        .collect();
    SearchResults { exact: None, fuzzy }
}

/// Stable descending sort by rating; the title-ascending input order makes
/// ties come out title-ascending.
pub fn sort_by_rating_desc(movies: &MovieCollection) -> Vec<(String, MovieRecord)> {
    let mut entries: Vec<(String, MovieRecord)> = movies
        .iter()
        .map(|(title, record)| (title.clone(), record.clone()))
        .collect();
    entries.sort_by(|a, b| b.1.rating.total_cmp(&a.1.rating));
    entries
}

/// Capitalize the first letter of every word, lowercase the rest. Titles are
/// stored in this canonical form, so exact search folds queries through it.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(ch);
            at_word_start = true;
        }
    }
    out
}

/// Partial string-overlap score on a 0-100 scale: the best overlap ratio
/// between the shorter string and any same-length window of the longer one
/// (or the two whole strings), where a ratio is `2 * LCS / (len_a + len_b)`.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() && b.is_empty() {
        return 100.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let (short, long) = if a.len() <= b.len() { (&a, &b) } else { (&b, &a) };
    let mut best = overlap_ratio(short, long);
    for window in long.windows(short.len()) {
        if best >= 100.0 {
            break;
        }
        let score = overlap_ratio(short, window);
        if score > best {
            best = score;
        }
    }
    best
}

fn overlap_ratio(a: &[char], b: &[char]) -> f64 {
    let lcs = common_subsequence_len(a, b);
    100.0 * (2 * lcs) as f64 / (a.len() + b.len()) as f64
}

fn common_subsequence_len(a: &[char], b: &[char]) -> usize {
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                curr[j].max(prev[j + 1])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
        curr.fill(0);
    }
    prev[b.len()]
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::models::MovieCollection;

    fn collection(entries: &[(&str, f64)]) -> MovieCollection {
        entries
            .iter()
            .map(|(title, rating)| {
                (
                    (*title).to_owned(),
                    MovieRecord {
                        year: 2000,
                        rating: *rating,
                        poster_url: None,
                        comment: String::new(),
                    },
                )
            })
            .collect()
    }

    #[test]
    fn test_stats_with_ties() {
        let movies = collection(&[("A", 9.0), ("B", 5.0), ("C", 9.0)]);
        let stats = compute_stats(&movies).unwrap();
        assert!((stats.average - 23.0 / 3.0).abs() < 1e-9);
        assert_eq!(stats.median, 9.0);
        assert_eq!(stats.best, vec!["A".to_owned(), "C".to_owned()]);
        assert_eq!(stats.worst, vec!["B".to_owned()]);
    }

    #[test]
    fn test_stats_average_within_bounds() {
        let movies = collection(&[("A", 3.5), ("B", 8.0), ("C", 6.5), ("D", 4.0)]);
        let stats = compute_stats(&movies).unwrap();
        assert!(stats.average >= 3.5 && stats.average <= 8.0);
        assert!((stats.average - 22.0 / 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_median_even_count() {
        let movies = collection(&[("A", 2.0), ("B", 8.0), ("C", 4.0), ("D", 6.0)]);
        let stats = compute_stats(&movies).unwrap();
        assert_eq!(stats.median, 5.0);
    }

    #[test]
    fn test_stats_empty_collection() {
        let movies = MovieCollection::new();
        assert!(matches!(
            compute_stats(&movies),
            Err(Error::EmptyCollection)
        ));
    }

    #[test]
    fn test_pick_random_member() {
        let movies = collection(&[("A", 1.0), ("B", 2.0), ("C", 3.0)]);
        let (title, _) = pick_random(&movies).unwrap();
        assert!(movies.contains_key(&title));
    }

    #[test]
    fn test_pick_random_empty() {
        let movies = MovieCollection::new();
        assert!(matches!(pick_random(&movies), Err(Error::EmptyCollection)));
    }

    #[test]
    fn test_search_exact_is_case_folded() {
        let movies = collection(&[("The Matrix", 8.7)]);
        let results = search(&movies, "the matrix");
        let (title, record) = results.exact.unwrap();
        assert_eq!(title, "The Matrix");
        assert_eq!(record.rating, 8.7);
        assert!(results.fuzzy.is_empty());
    }

    #[test]
    fn test_search_fuzzy_typo() {
        let movies = collection(&[("Matrix", 8.7), ("Up", 8.3)]);
        let results = search(&movies, "matrx");
        assert!(results.exact.is_none());
        assert_eq!(results.fuzzy.len(), 1);
        assert_eq!(results.fuzzy[0].0, "Matrix");
    }

    #[test]
    fn test_search_no_match() {
        let movies = collection(&[("Matrix", 8.7)]);
        let results = search(&movies, "zzzzzz");
        assert!(results.exact.is_none());
        assert!(results.fuzzy.is_empty());
    }

    #[test]
    fn test_sort_by_rating_desc() {
        let movies = collection(&[("X", 3.0), ("Y", 8.0), ("Z", 5.0)]);
        let sorted: Vec<String> = sort_by_rating_desc(&movies)
            .into_iter()
            .map(|(title, _)| title)
            .collect();
        assert_eq!(
            sorted,
            vec!["Y".to_owned(), "Z".to_owned(), "X".to_owned()]
        );
    }

    #[test]
    fn test_sort_ties_are_title_ascending() {
        let movies = collection(&[("B", 7.0), ("A", 7.0), ("C", 9.0)]);
        let sorted: Vec<String> = sort_by_rating_desc(&movies)
            .into_iter()
            .map(|(title, _)| title)
            .collect();
        assert_eq!(
            sorted,
            vec!["C".to_owned(), "A".to_owned(), "B".to_owned()]
        );
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("the matrix"), "The Matrix");
        assert_eq!(title_case("UP"), "Up");
        assert_eq!(title_case("12 angry men"), "12 Angry Men");
        assert_eq!(title_case("o'brien"), "O'Brien");
    }

    #[test]
    fn test_partial_ratio() {
        assert_eq!(partial_ratio("matrix", "matrix"), 100.0);
        assert_eq!(partial_ratio("mat", "matrix"), 100.0);
        assert!(partial_ratio("matrx", "matrix") >= 80.0);
        assert!(partial_ratio("qwert", "matrix") < 80.0);
        assert_eq!(partial_ratio("", ""), 100.0);
        assert_eq!(partial_ratio("", "matrix"), 0.0);
    }
}
