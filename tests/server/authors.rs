use crate::helpers::{assert_full_page, assert_redirects_to, client, create_author, spawn_app};

#[tokio::test]
async fn author_page_returns_200_with_empty_database() {
    let app = spawn_app().await;

    let response = reqwest::Client::new()
        .get(app.page_url("/authors"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 200);
    let body = response.text().await.expect("Failed to read body");
    assert_full_page(&body);
}

#[tokio::test]
async fn creating_an_author_redirects_back_to_the_list() {
    let app = spawn_app().await;

    let response = client()
        .post(app.page_url("/authors"))
        .form(&[("name", "Octavia E. Butler")])
        .send()
        .await
        .expect("Failed to execute request");

    assert_redirects_to(&response, "/authors");

    let authors = app.author_repo.list_all().await.unwrap();
    assert_eq!(authors.len(), 1);
    assert_eq!(authors[0].name, "Octavia E. Butler");
}

#[tokio::test]
async fn author_names_are_trimmed_on_create() {
    let app = spawn_app().await;

    client()
        .post(app.page_url("/authors"))
        .form(&[("name", "  Stanisław Lem  ")])
        .send()
        .await
        .expect("Failed to execute request");

    let authors = app.author_repo.list_all().await.unwrap();
    assert_eq!(authors[0].name, "Stanisław Lem");
}

#[tokio::test]
async fn blank_author_name_rerenders_with_an_error() {
    let app = spawn_app().await;

    let response = client()
        .post(app.page_url("/authors"))
        .form(&[("name", "   ")])
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 200);
    let body = response.text().await.expect("Failed to read body");
    assert!(body.contains("Error creating author"));
    assert!(app.author_repo.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn author_search_filters_by_name_substring() {
    let app = spawn_app().await;
    create_author(&app, "Frank Herbert").await;
    create_author(&app, "Ursula K. Le Guin").await;

    let body = reqwest::Client::new()
        .get(app.page_url("/authors?name=herbert"))
        .send()
        .await
        .expect("Failed to execute request")
        .text()
        .await
        .expect("Failed to read body");

    assert!(body.contains("Frank Herbert"));
    assert!(!body.contains("Ursula K. Le Guin"));
}

#[tokio::test]
async fn authors_are_listed_in_name_order() {
    let app = spawn_app().await;
    create_author(&app, "Ursula K. Le Guin").await;
    create_author(&app, "Frank Herbert").await;

    let authors = app.author_repo.list_all().await.unwrap();
    assert_eq!(authors[0].name, "Frank Herbert");
    assert_eq!(authors[1].name, "Ursula K. Le Guin");
}
