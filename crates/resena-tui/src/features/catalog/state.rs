//! Catalog state: movie list, selection, reviews and the two creation forms.

use resena_core::api::{Movie, MovieId, Review, Score};

use crate::common::TextField;

/// Pane receiving key input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Movies,
    MovieForm,
    ReviewForm,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Movies => Focus::MovieForm,
            Focus::MovieForm => Focus::ReviewForm,
            Focus::ReviewForm => Focus::Movies,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::Movies => Focus::ReviewForm,
            Focus::MovieForm => Focus::Movies,
            Focus::ReviewForm => Focus::MovieForm,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MovieField {
    #[default]
    Title,
    Year,
    Metascore,
}

impl MovieField {
    pub const ALL: [MovieField; 3] = [MovieField::Title, MovieField::Year, MovieField::Metascore];

    pub fn label(self) -> &'static str {
        match self {
            MovieField::Title => "Título",
            MovieField::Year => "Año",
            MovieField::Metascore => "Metascore",
        }
    }
}

/// New-movie form. Values stay raw text until submit.
#[derive(Debug, Clone, Default)]
pub struct MovieForm {
    pub focus: MovieField,
    pub title: TextField,
    pub year: TextField,
    pub metascore: TextField,
}

impl MovieForm {
    pub fn field(&self, field: MovieField) -> &TextField {
        match field {
            MovieField::Title => &self.title,
            MovieField::Year => &self.year,
            MovieField::Metascore => &self.metascore,
        }
    }

    pub fn focused_mut(&mut self) -> &mut TextField {
        match self.focus {
            MovieField::Title => &mut self.title,
            MovieField::Year => &mut self.year,
            MovieField::Metascore => &mut self.metascore,
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            MovieField::Title => MovieField::Year,
            MovieField::Year => MovieField::Metascore,
            MovieField::Metascore => MovieField::Title,
        };
    }

    pub fn focus_prev(&mut self) {
        self.focus = match self.focus {
            MovieField::Title => MovieField::Metascore,
            MovieField::Year => MovieField::Title,
            MovieField::Metascore => MovieField::Year,
        };
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReviewField {
    #[default]
    Comment,
    Score,
}

/// New-review form for the selected movie.
#[derive(Debug, Clone, Default)]
pub struct ReviewForm {
    pub focus: ReviewField,
    pub comment: TextField,
    pub score: Score,
}

impl ReviewForm {
    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            ReviewField::Comment => ReviewField::Score,
            ReviewField::Score => ReviewField::Comment,
        };
    }
}

#[derive(Debug, Clone, Default)]
pub struct CatalogState {
    pub focus: Focus,
    pub movies: Vec<Movie>,
    /// Highlighted row in the movie list.
    pub cursor: usize,
    /// Movie whose reviews are shown. Set locally, before the fetch returns.
    pub selected: Option<MovieId>,
    pub reviews: Vec<Review>,
    pub movie_form: MovieForm,
    pub review_form: ReviewForm,
}

impl CatalogState {
    pub fn move_cursor(&mut self, delta: isize) {
        if self.movies.is_empty() {
            self.cursor = 0;
            return;
        }
        let last = self.movies.len() - 1;
        self.cursor = self.cursor.saturating_add_signed(delta).min(last);
    }

    pub fn cursor_movie(&self) -> Option<&Movie> {
        self.movies.get(self.cursor)
    }

    pub fn selected_movie(&self) -> Option<&Movie> {
        let id = self.selected?;
        self.movies.iter().find(|movie| movie.id == id)
    }

    /// Marks `id` as selected and drops the reviews of the previous selection.
    pub fn select(&mut self, id: MovieId) {
        self.selected = Some(id);
        self.reviews.clear();
    }

    /// Replaces the movie list, keeping the cursor on the same movie when it
    /// is still present.
    pub fn replace_movies(&mut self, movies: Vec<Movie>) {
        let current = self.cursor_movie().map(|movie| movie.id);
        self.movies = movies;
        self.cursor = current
            .and_then(|id| self.movies.iter().position(|movie| movie.id == id))
            .unwrap_or(0);
        self.move_cursor(0);
    }
}

#[cfg(test)]
mod tests {
    use resena_core::api::ReviewId;

    use super::*;

    fn movie(id: i64, title: &str) -> Movie {
        Movie {
            id: MovieId(id),
            title: title.to_string(),
            year: Some(2000),
            metascore: Some(70),
            userscore: None,
        }
    }

    #[test]
    fn test_cursor_is_clamped() {
        let mut catalog = CatalogState {
            movies: vec![movie(1, "A"), movie(2, "B")],
            ..CatalogState::default()
        };
        catalog.move_cursor(-1);
        assert_eq!(catalog.cursor, 0);
        catalog.move_cursor(5);
        assert_eq!(catalog.cursor, 1);
    }

    #[test]
    fn test_replace_keeps_cursor_on_same_movie() {
        let mut catalog = CatalogState {
            movies: vec![movie(1, "A"), movie(2, "B")],
            cursor: 1,
            ..CatalogState::default()
        };
        catalog.replace_movies(vec![movie(3, "C"), movie(1, "A"), movie(2, "B")]);
        assert_eq!(catalog.cursor_movie().map(|m| m.id), Some(MovieId(2)));

        catalog.replace_movies(vec![movie(3, "C")]);
        assert_eq!(catalog.cursor, 0);

        catalog.replace_movies(Vec::new());
        assert_eq!(catalog.cursor, 0);
        assert!(catalog.cursor_movie().is_none());
    }

    #[test]
    fn test_select_clears_previous_reviews() {
        let mut catalog = CatalogState {
            reviews: vec![Review {
                id: ReviewId(1),
                user: "ana".to_string(),
                comment: "buena".to_string(),
                puntuacion: Some(8),
                created_at: None,
            }],
            ..CatalogState::default()
        };
        catalog.select(MovieId(7));
        assert_eq!(catalog.selected, Some(MovieId(7)));
        assert!(catalog.reviews.is_empty());
    }

    #[test]
    fn test_focus_cycles() {
        assert_eq!(Focus::Movies.next().next().next(), Focus::Movies);
        assert_eq!(Focus::Movies.prev(), Focus::ReviewForm);
    }
}
