//! Movie commands.

use anyhow::Result;
use comfy_table::{ContentArrangement, Table};
use resena_core::api::{ApiClient, Movie};
use resena_core::{forms, messages};

use super::{api_failure, parse_token};

pub async fn list(client: &ApiClient) -> Result<()> {
    let movies = client
        .list_movies()
        .await
        .map_err(|err| api_failure(&err, messages::MOVIES_LOAD_FAILED))?;
    if movies.is_empty() {
        println!("{}", messages::NO_MOVIES);
    } else {
        println!("{}", movies_table(&movies));
    }
    Ok(())
}

/// Validation runs before the token is even looked at, so bad input never
/// reaches the network.
pub async fn add(
    client: &ApiClient,
    token: &str,
    title: &str,
    year: &str,
    metascore: &str,
) -> Result<()> {
    let movie = forms::parse_new_movie(title, year, metascore)?;
    let token = parse_token(token)?;
    let message = client
        .create_movie(&token, &movie)
        .await
        .map_err(|err| api_failure(&err, messages::MOVIE_CREATE_FAILED))?;
    println!("{}", message.or(messages::MOVIE_CREATED));
    Ok(())
}

fn movies_table(movies: &[Movie]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(["ID", "Título", "Año", "Metascore", "Userscore"]);
    for movie in movies {
        table.add_row([
            movie.id.to_string(),
            movie.title.clone(),
            optional(movie.year),
            optional(movie.metascore),
            movie
                .userscore
                .map_or_else(|| "-".to_string(), |score| format!("{score:.1}")),
        ]);
    }
    table
}

fn optional(value: Option<i32>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

#[cfg(test)]
mod tests {
    use resena_core::api::MovieId;

    use super::*;

    #[test]
    fn test_table_renders_missing_values_as_dash() {
        let table = movies_table(&[Movie {
            id: MovieId(4),
            title: "Heat".to_string(),
            year: Some(1995),
            metascore: None,
            userscore: Some(8.25),
        }]);
        let text = table.to_string();
        assert!(text.contains("Heat"));
        assert!(text.contains("1995"));
        assert!(text.contains("8.2") || text.contains("8.3"));
        assert!(text.contains(" - "));
    }
}
