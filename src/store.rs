use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, NotSet, QueryOrder, Set,
};

use crate::{
    entities::movie,
    error::{AppError, AppResult},
    models::NewMovie,
};

/// Persistence layer over the `movie` table. Handlers receive it through
/// `AppState` rather than an ambient global connection.
#[derive(Clone)]
pub struct MovieStore {
    db: DatabaseConnection,
}

impl MovieStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list_all(&self) -> AppResult<Vec<movie::Model>> {
        let movies = movie::Entity::find()
            .order_by_asc(movie::Column::Id)
            .all(&self.db)
            .await?;
        Ok(movies)
    }

    pub async fn get(&self, id: i32) -> AppResult<Option<movie::Model>> {
        let movie = movie::Entity::find_by_id(id).one(&self.db).await?;
        Ok(movie)
    }

    /// Inserts a fully populated record; rating, ranking and review start at
    /// their placeholder defaults.
    pub async fn create(&self, new: NewMovie) -> AppResult<movie::Model> {
        let model = movie::ActiveModel {
            id: NotSet,
            title: Set(new.title.clone()),
            year: Set(new.year),
            description: Set(new.description),
            rating: Set(0.0),
            ranking: Set(0),
            review: Set(String::new()),
            img_url: Set(new.img_url),
        };

        let created = model.insert(&self.db).await.map_err(|err| {
            if err.to_string().contains("UNIQUE constraint") {
                AppError::Constraint(format!("\"{}\" is already in your list.", new.title))
            } else {
                AppError::Db(err)
            }
        })?;

        tracing::debug!(id = created.id, title = %created.title, "created movie");
        Ok(created)
    }

    /// Mutates only rating and review on an existing record.
    pub async fn update_review(&self, id: i32, rating: f64, review: String) -> AppResult<movie::Model> {
        let existing = self
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("movie {id} not found")))?;

        let mut model: movie::ActiveModel = existing.into();
        model.rating = Set(rating);
        model.review = Set(review);

        let updated = model.update(&self.db).await?;
        tracing::debug!(id = updated.id, rating = updated.rating, "updated movie");
        Ok(updated)
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = movie::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound(format!("movie {id} not found")));
        }
        tracing::debug!(id, "deleted movie");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::Database;

    use super::*;
    use crate::models::compose_img_url;

    async fn memory_store() -> MovieStore {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        MovieStore::new(db)
    }

    fn lawrence() -> NewMovie {
        NewMovie {
            title: "Lawrence of Arabia".to_string(),
            year: 1962,
            description: "An epic about T.E. Lawrence.".to_string(),
            img_url: compose_img_url("https://image.tmdb.org/t/p/", "/lawrence.jpg"),
        }
    }

    #[tokio::test]
    async fn create_applies_placeholder_defaults() {
        let store = memory_store().await;
        let movie = store.create(lawrence()).await.unwrap();

        assert_eq!(movie.rating, 0.0);
        assert_eq!(movie.ranking, 0);
        assert_eq!(movie.review, "");
        assert_eq!(movie.img_url, "https://image.tmdb.org/t/p/original/lawrence.jpg");
        assert_eq!(movie.year, 1962);
    }

    #[tokio::test]
    async fn edit_round_trip_changes_only_rating_and_review() {
        let store = memory_store().await;
        let created = store.create(lawrence()).await.unwrap();

        store
            .update_review(created.id, 8.5, "Excellent".to_string())
            .await
            .unwrap();

        let fetched = store.get(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.rating, 8.5);
        assert_eq!(fetched.review, "Excellent");
        assert_eq!(fetched.title, created.title);
        assert_eq!(fetched.year, created.year);
        assert_eq!(fetched.description, created.description);
        assert_eq!(fetched.ranking, created.ranking);
        assert_eq!(fetched.img_url, created.img_url);
    }

    #[tokio::test]
    async fn delete_removes_and_second_delete_is_not_found() {
        let store = memory_store().await;
        let created = store.create(lawrence()).await.unwrap();

        store.delete(created.id).await.unwrap();
        assert!(store.get(created.id).await.unwrap().is_none());

        let err = store.delete(created.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_missing_id_is_not_found() {
        let store = memory_store().await;
        let err = store.update_review(999, 5.0, "gone".to_string()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn duplicate_title_is_a_constraint_violation() {
        let store = memory_store().await;
        store.create(lawrence()).await.unwrap();

        let err = store.create(lawrence()).await.unwrap_err();
        assert!(matches!(err, AppError::Constraint(_)));

        // no partial record
        assert_eq!(store.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn list_returns_every_surviving_record() {
        let store = memory_store().await;

        let mut ids = Vec::new();
        for title in ["Dune", "Heat", "Ran"] {
            let movie = store
                .create(NewMovie {
                    title: title.to_string(),
                    year: 1985,
                    description: format!("{title} synopsis"),
                    img_url: "https://image.tmdb.org/t/p/original/x.jpg".to_string(),
                })
                .await
                .unwrap();
            ids.push(movie.id);
        }

        store.update_review(ids[1], 9.0, "Pacino and De Niro".to_string()).await.unwrap();
        store.delete(ids[0]).await.unwrap();

        let movies = store.list_all().await.unwrap();
        assert_eq!(movies.len(), 2);
        assert_eq!(movies[0].title, "Heat");
        assert_eq!(movies[0].rating, 9.0);
        assert_eq!(movies[0].review, "Pacino and De Niro");
        assert_eq!(movies[1].title, "Ran");
        assert_eq!(movies[1].rating, 0.0);
    }
}
