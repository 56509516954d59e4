use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{QueryBuilder, query_as, query_scalar};

use crate::domain::RepositoryError;
use crate::domain::authors::Author;
use crate::domain::books::{Book, BookFilter, BookWithAuthor, NewBook, UpdateBook, UpdatedBook};
use crate::domain::ids::{AuthorId, BookId};
use crate::domain::repositories::BookRepository;
use crate::infrastructure::database::DatabasePool;

const BOOK_COLUMNS: &str =
    "id, title, author_id, publish_date, page_count, cover_image_name, description, created_at";

#[derive(Clone)]
pub struct SqlBookRepository {
    pool: DatabasePool,
}

impl SqlBookRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    fn into_book(record: BookRecord) -> Book {
        Book {
            id: BookId::from(record.id),
            title: record.title,
            author_id: record.author_id.map(AuthorId::from),
            publish_date: record.publish_date,
            page_count: record.page_count,
            cover_image_name: record.cover_image_name,
            description: record.description,
            created_at: record.created_at,
        }
    }
}

#[async_trait]
impl BookRepository for SqlBookRepository {
    async fn insert(&self, new_book: NewBook) -> Result<Book, RepositoryError> {
        let new_book = new_book.normalize();
        let created_at = new_book.created_at.unwrap_or_else(Utc::now);

        let record = query_as::<_, BookRecord>(
            r"INSERT INTO books (title, author_id, publish_date, page_count, cover_image_name, description, created_at)
              VALUES (?, ?, ?, ?, ?, ?, ?)
              RETURNING id, title, author_id, publish_date, page_count, cover_image_name, description, created_at",
        )
        .bind(&new_book.title)
        .bind(new_book.author_id.map(i64::from))
        .bind(new_book.publish_date)
        .bind(new_book.page_count)
        .bind(new_book.cover_image_name.as_deref())
        .bind(new_book.description.as_deref())
        .bind(created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| RepositoryError::unexpected(err.to_string()))?;

        Ok(Self::into_book(record))
    }

    async fn get(&self, id: BookId) -> Result<Book, RepositoryError> {
        let record = query_as::<_, BookRecord>(&format!(
            "SELECT {BOOK_COLUMNS} FROM books WHERE id = ?"
        ))
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| RepositoryError::unexpected(err.to_string()))?
        .ok_or(RepositoryError::NotFound)?;

        Ok(Self::into_book(record))
    }

    async fn get_with_author(&self, id: BookId) -> Result<BookWithAuthor, RepositoryError> {
        let book = self.get(id).await?;

        // Resolve the reference only here; a missing author row simply
        // yields no author (no referential integrity is enforced).
        let author = if let Some(author_id) = book.author_id {
            query_as::<_, AuthorRecord>("SELECT id, name, created_at FROM authors WHERE id = ?")
                .bind(i64::from(author_id))
                .fetch_optional(&self.pool)
                .await
                .map_err(|err| RepositoryError::unexpected(err.to_string()))?
                .map(AuthorRecord::into_author)
        } else {
            None
        };

        Ok(BookWithAuthor { book, author })
    }

    async fn list(&self, filter: &BookFilter) -> Result<Vec<Book>, RepositoryError> {
        let mut builder =
            QueryBuilder::new(format!("SELECT {BOOK_COLUMNS} FROM books"));
        let mut sep = false;

        // Attach each clause only when its parameter is present; the
        // composed statement runs exactly once.
        if let Some(title) = filter.title() {
            push_where(&mut builder, &mut sep);
            builder.push("instr(LOWER(title), LOWER(");
            builder.push_bind(title.to_string());
            builder.push(")) > 0");
        }
        if let Some(before) = filter.published_before() {
            push_where(&mut builder, &mut sep);
            builder.push("publish_date <= ");
            builder.push_bind(before);
        }
        if let Some(after) = filter.published_after() {
            push_where(&mut builder, &mut sep);
            builder.push("publish_date >= ");
            builder.push_bind(after);
        }
        builder.push(" ORDER BY created_at DESC, id DESC");

        let records = builder
            .build_query_as::<BookRecord>()
            .fetch_all(&self.pool)
            .await
            .map_err(|err| RepositoryError::unexpected(err.to_string()))?;

        Ok(records.into_iter().map(Self::into_book).collect())
    }

    async fn list_recent(&self, limit: u32) -> Result<Vec<Book>, RepositoryError> {
        let records = query_as::<_, BookRecord>(&format!(
            "SELECT {BOOK_COLUMNS} FROM books ORDER BY created_at DESC, id DESC LIMIT ?"
        ))
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|err| RepositoryError::unexpected(err.to_string()))?;

        Ok(records.into_iter().map(Self::into_book).collect())
    }

    async fn update(&self, id: BookId, changes: UpdateBook) -> Result<UpdatedBook, RepositoryError> {
        let changes = changes.normalize();

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|err| RepositoryError::unexpected(err.to_string()))?;

        let previous_cover: Option<Option<String>> =
            query_scalar("SELECT cover_image_name FROM books WHERE id = ?")
                .bind(i64::from(id))
                .fetch_optional(&mut *tx)
                .await
                .map_err(|err| RepositoryError::unexpected(err.to_string()))?;
        let Some(previous_cover) = previous_cover else {
            return Err(RepositoryError::NotFound);
        };

        let mut builder = QueryBuilder::new("UPDATE books SET title = ");
        builder.push_bind(&changes.title);
        builder.push(", author_id = ");
        builder.push_bind(changes.author_id.map(i64::from));
        builder.push(", publish_date = ");
        builder.push_bind(changes.publish_date);
        builder.push(", page_count = ");
        builder.push_bind(changes.page_count);
        builder.push(", description = ");
        builder.push_bind(changes.description.as_deref());

        // The cover column is only touched when a replacement was
        // uploaded; otherwise the stored reference survives the update.
        let replaced_cover = if let Some(new_cover) = &changes.cover_image_name {
            builder.push(", cover_image_name = ");
            builder.push_bind(new_cover.as_str());
            previous_cover.filter(|old| old != new_cover)
        } else {
            None
        };

        builder.push(" WHERE id = ");
        builder.push_bind(i64::from(id));

        builder
            .build()
            .execute(&mut *tx)
            .await
            .map_err(|err| RepositoryError::unexpected(err.to_string()))?;

        tx.commit()
            .await
            .map_err(|err| RepositoryError::unexpected(err.to_string()))?;

        let book = self.get(id).await?;

        Ok(UpdatedBook {
            book,
            replaced_cover,
        })
    }

    async fn delete(&self, id: BookId) -> Result<Book, RepositoryError> {
        let record = query_as::<_, BookRecord>(&format!(
            "DELETE FROM books WHERE id = ? RETURNING {BOOK_COLUMNS}"
        ))
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| RepositoryError::unexpected(err.to_string()))?
        .ok_or(RepositoryError::NotFound)?;

        Ok(Self::into_book(record))
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        let count: i64 = query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await
            .map_err(|err| RepositoryError::unexpected(err.to_string()))?;

        Ok(count.unsigned_abs())
    }
}

fn push_where(builder: &mut QueryBuilder<'_, sqlx::Sqlite>, sep: &mut bool) {
    if *sep {
        builder.push(" AND ");
    } else {
        builder.push(" WHERE ");
        *sep = true;
    }
}

#[derive(sqlx::FromRow)]
struct BookRecord {
    id: i64,
    title: String,
    author_id: Option<i64>,
    publish_date: NaiveDate,
    page_count: i32,
    cover_image_name: Option<String>,
    description: Option<String>,
    created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct AuthorRecord {
    id: i64,
    name: String,
    created_at: DateTime<Utc>,
}

impl AuthorRecord {
    fn into_author(self) -> Author {
        Author {
            id: AuthorId::from(self.id),
            name: self.name,
            created_at: self.created_at,
        }
    }
}
