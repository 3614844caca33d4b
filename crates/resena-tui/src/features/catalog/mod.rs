//! Movie catalog: list, selection, reviews and the creation forms.

mod render;
mod state;
mod update;

pub use render::render_catalog;
pub use state::{CatalogState, Focus, MovieField, MovieForm, ReviewField, ReviewForm};
pub use update::{
    handle_key, handle_movie_created, handle_movies_result, handle_paste, handle_review_created,
    handle_reviews_result, logout, refresh, select_movie, start_fetch_movies, submit_movie,
    submit_review,
};
