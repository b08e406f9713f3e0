use std::sync::Arc;

use axum::{
    extract::{Form, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::{
    AppState,
    error::{AppError, AppResult},
    models::{AddForm, EditForm, NewMovie, compose_img_url, extract_year, validate_add, validate_edit},
    templates,
};

#[derive(Debug, Deserialize)]
pub struct IdQuery {
    pub id: i32,
}

#[derive(Debug, Deserialize)]
pub struct SelectParams {
    pub title: String,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub poster_path: String,
}

pub async fn home(State(state): State<Arc<AppState>>) -> AppResult<Html<String>> {
    let movies = state.store.list_all().await?;
    Ok(Html(templates::index_page(&movies)))
}

pub async fn add_form() -> Html<String> {
    Html(templates::add_page(None))
}

/// Valid titles go to the catalog; the candidates are rendered without
/// persisting anything. Invalid input re-renders the form.
pub async fn add_submit(
    State(state): State<Arc<AppState>>,
    Form(form): Form<AddForm>,
) -> AppResult<Html<String>> {
    let title = match validate_add(&form) {
        Ok(title) => title,
        Err(message) => return Ok(Html(templates::add_page(Some(&message)))),
    };

    let candidates = state.tmdb.search(&title).await?;
    Ok(Html(templates::select_page(&title, &candidates)))
}

/// The only path that creates a movie: one candidate's fields arrive as
/// query parameters, the year is extracted, the poster URL composed, and the
/// record inserted with defaulted rating/ranking/review.
pub async fn select(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SelectParams>,
) -> AppResult<Response> {
    let year = extract_year(&params.release_date).ok_or_else(|| {
        AppError::Validation(format!("\"{}\" is not a release date", params.release_date))
    })?;

    let new = NewMovie {
        title: params.title,
        year,
        description: params.description,
        img_url: compose_img_url(&state.config.tmdb_image_base_url, &params.poster_path),
    };

    match state.store.create(new).await {
        Ok(movie) => Ok(Redirect::to(&format!("/edit?id={}", movie.id)).into_response()),
        Err(AppError::Constraint(message)) => {
            Ok(Html(templates::add_page(Some(&message))).into_response())
        },
        Err(err) => Err(err),
    }
}

pub async fn edit_form(
    State(state): State<Arc<AppState>>,
    Query(q): Query<IdQuery>,
) -> AppResult<Html<String>> {
    let movie = state
        .store
        .get(q.id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("movie {} not found", q.id)))?;
    Ok(Html(templates::edit_page(&movie, None)))
}

pub async fn edit_submit(
    State(state): State<Arc<AppState>>,
    Query(q): Query<IdQuery>,
    Form(form): Form<EditForm>,
) -> AppResult<Response> {
    let movie = state
        .store
        .get(q.id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("movie {} not found", q.id)))?;

    let input = match validate_edit(&form) {
        Ok(input) => input,
        Err(message) => {
            return Ok(Html(templates::edit_page(&movie, Some(&message))).into_response());
        },
    };

    state.store.update_review(q.id, input.rating, input.review).await?;
    Ok(Redirect::to("/").into_response())
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    Query(q): Query<IdQuery>,
) -> AppResult<Redirect> {
    state.store.delete(q.id).await?;
    Ok(Redirect::to("/"))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use migration::{Migrator, MigratorTrait};
    use sea_orm::Database;
    use tower::ServiceExt;

    use crate::{AppState, config::Config, router, store::MovieStore, tmdb::TmdbClient};
    use std::sync::Arc;

    async fn test_app() -> (axum::Router, MovieStore) {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        let store = MovieStore::new(db);

        let config = Arc::new(Config {
            addr: "127.0.0.1:0".parse().unwrap(),
            database_url: "sqlite::memory:".to_string(),
            tmdb_api_key: "".to_string(),
            tmdb_access_token: "".to_string(),
            // unroutable: any attempt to call the catalog fails loudly
            tmdb_base_url: "http://127.0.0.1:1".to_string(),
            tmdb_image_base_url: "https://image.tmdb.org/t/p/".to_string(),
            tmdb_rps: 4,
        });

        let tmdb = TmdbClient::new(
            reqwest::Client::new(),
            config.tmdb_api_key.clone(),
            config.tmdb_access_token.clone(),
            config.tmdb_base_url.clone(),
            config.tmdb_rps,
        );

        let state = Arc::new(AppState { config, store: store.clone(), tmdb: Arc::new(tmdb) });
        (router(state), store)
    }

    #[tokio::test]
    async fn home_renders_the_list() {
        let (app, _store) = test_app().await;
        let resp = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn empty_title_never_reaches_catalog_or_store() {
        let (app, store) = test_app().await;

        // catalog base URL is unroutable, so reaching it would surface 502
        let resp = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/add")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from("title=+++"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn upstream_failure_creates_nothing() {
        let (app, store) = test_app().await;

        let resp = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/add")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from("title=Heat"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn select_creates_movie_and_redirects_to_edit() {
        let (app, store) = test_app().await;

        let uri = "/select?title=Lawrence%20of%20Arabia&release_date=1962-12-10\
                   &description=Epic&poster_path=%2Flawrence.jpg";
        let resp = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::SEE_OTHER);

        let movies = store.list_all().await.unwrap();
        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].year, 1962);
        assert_eq!(movies[0].img_url, "https://image.tmdb.org/t/p/original/lawrence.jpg");

        let location = resp.headers().get(header::LOCATION).unwrap().to_str().unwrap();
        assert_eq!(location, format!("/edit?id={}", movies[0].id));
    }

    #[tokio::test]
    async fn edit_of_missing_id_is_404() {
        let (app, _store) = test_app().await;
        let resp = app
            .oneshot(Request::builder().uri("/edit?id=999").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_redirects_home_then_404s() {
        let (app, store) = test_app().await;
        let movie = store
            .create(crate::models::NewMovie {
                title: "Ran".to_string(),
                year: 1985,
                description: "Kurosawa's Lear.".to_string(),
                img_url: "https://image.tmdb.org/t/p/original/ran.jpg".to_string(),
            })
            .await
            .unwrap();

        let uri = format!("/delete?id={}", movie.id);
        let resp = app
            .clone()
            .oneshot(Request::builder().uri(&uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert!(store.get(movie.id).await.unwrap().is_none());

        let resp = app
            .oneshot(Request::builder().uri(&uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn invalid_rating_re_renders_the_edit_form() {
        let (app, store) = test_app().await;
        let movie = store
            .create(crate::models::NewMovie {
                title: "Dune".to_string(),
                year: 2021,
                description: "Spice.".to_string(),
                img_url: "https://image.tmdb.org/t/p/original/dune.jpg".to_string(),
            })
            .await
            .unwrap();

        let resp = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(format!("/edit?id={}", movie.id))
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from("rating=eleventy&review=great"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let unchanged = store.get(movie.id).await.unwrap().unwrap();
        assert_eq!(unchanged.rating, 0.0);
        assert_eq!(unchanged.review, "");
    }
}
