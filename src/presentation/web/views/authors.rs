use crate::domain::authors::Author;

pub struct AuthorView {
    pub id: String,
    pub name: String,
    pub created_date: String,
}

impl From<Author> for AuthorView {
    fn from(author: Author) -> Self {
        Self {
            id: author.id.to_string(),
            name: author.name,
            created_date: author.created_at.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Option entry for the author selection field on book forms.
pub struct AuthorOptionView {
    pub id: String,
    pub name: String,
}

impl From<Author> for AuthorOptionView {
    fn from(author: Author) -> Self {
        Self {
            id: author.id.to_string(),
            name: author.name,
        }
    }
}
