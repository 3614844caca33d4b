//! Review commands.

use anyhow::Result;
use comfy_table::{ContentArrangement, Table};
use resena_core::api::{ApiClient, MovieId, Review, Score};
use resena_core::{forms, messages};

use super::{api_failure, parse_token};

pub async fn list(client: &ApiClient, movie_id: MovieId) -> Result<()> {
    let reviews = client
        .list_reviews(movie_id)
        .await
        .map_err(|err| api_failure(&err, messages::REVIEWS_LOAD_FAILED))?;
    if reviews.is_empty() {
        println!("{}", messages::NO_REVIEWS);
    } else {
        println!("{}", reviews_table(&reviews));
    }
    Ok(())
}

pub async fn add(
    client: &ApiClient,
    token: &str,
    movie_id: MovieId,
    comment: &str,
    score: Score,
) -> Result<()> {
    let review = forms::parse_new_review(Some(movie_id), comment, score)?;
    let token = parse_token(token)?;
    let message = client
        .create_review(&token, &review)
        .await
        .map_err(|err| api_failure(&err, messages::REVIEW_CREATE_FAILED))?;
    println!("{}", message.or(messages::REVIEW_CREATED));
    Ok(())
}

fn reviews_table(reviews: &[Review]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(["Usuario", "Puntuación", "Fecha", "Comentario"]);
    for review in reviews {
        table.add_row([
            review.user.clone(),
            review
                .puntuacion
                .map_or_else(|| "-".to_string(), |score| format!("{score}/10")),
            review.created_at_display().unwrap_or_default(),
            review.comment.clone(),
        ]);
    }
    table
}
