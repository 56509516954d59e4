use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, query_as};

use crate::domain::RepositoryError;
use crate::domain::authors::{Author, NewAuthor};
use crate::domain::ids::AuthorId;
use crate::domain::repositories::AuthorRepository;
use crate::infrastructure::database::DatabasePool;

#[derive(Clone)]
pub struct SqlAuthorRepository {
    pool: DatabasePool,
}

impl SqlAuthorRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    fn into_domain(record: AuthorRecord) -> Author {
        Author {
            id: AuthorId::from(record.id),
            name: record.name,
            created_at: record.created_at,
        }
    }
}

#[async_trait]
impl AuthorRepository for SqlAuthorRepository {
    async fn insert(&self, new_author: NewAuthor) -> Result<Author, RepositoryError> {
        let new_author = new_author.normalize();
        let created_at = new_author.created_at.unwrap_or_else(Utc::now);

        let record = query_as::<_, AuthorRecord>(
            "INSERT INTO authors (name, created_at) VALUES (?, ?) \
             RETURNING id, name, created_at",
        )
        .bind(&new_author.name)
        .bind(created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| RepositoryError::unexpected(err.to_string()))?;

        Ok(Self::into_domain(record))
    }

    async fn get(&self, id: AuthorId) -> Result<Author, RepositoryError> {
        let record =
            query_as::<_, AuthorRecord>("SELECT id, name, created_at FROM authors WHERE id = ?")
                .bind(i64::from(id))
                .fetch_optional(&self.pool)
                .await
                .map_err(|err| RepositoryError::unexpected(err.to_string()))?;

        match record {
            Some(record) => Ok(Self::into_domain(record)),
            None => Err(RepositoryError::NotFound),
        }
    }

    async fn list(&self, name: Option<&str>) -> Result<Vec<Author>, RepositoryError> {
        let mut builder = QueryBuilder::new("SELECT id, name, created_at FROM authors");

        if let Some(needle) = name.filter(|n| !n.is_empty()) {
            builder.push(" WHERE instr(LOWER(name), LOWER(");
            builder.push_bind(needle.to_string());
            builder.push(")) > 0");
        }
        builder.push(" ORDER BY LOWER(name) ASC, created_at DESC");

        let records = builder
            .build_query_as::<AuthorRecord>()
            .fetch_all(&self.pool)
            .await
            .map_err(|err| RepositoryError::unexpected(err.to_string()))?;

        Ok(records.into_iter().map(Self::into_domain).collect())
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AuthorRecord {
    id: i64,
    name: String,
    created_at: DateTime<Utc>,
}
