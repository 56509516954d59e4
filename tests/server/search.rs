use crate::helpers::{assert_redirects_to, client, create_book, spawn_app};

async fn search_body(app: &crate::helpers::TestApp, query: &str) -> String {
    let response = reqwest::Client::new()
        .get(app.page_url(&format!("/books{query}")))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), 200);
    response.text().await.expect("Failed to read body")
}

#[tokio::test]
async fn no_filters_returns_the_full_catalog() {
    let app = spawn_app().await;
    create_book(&app, "Dune", "1965-08-01").await;
    create_book(&app, "Hyperion", "1989-05-26").await;
    create_book(&app, "Solaris", "1961-06-01").await;

    let body = search_body(&app, "").await;

    for title in ["Dune", "Hyperion", "Solaris"] {
        assert!(body.contains(title), "{title} should be listed");
    }
}

#[tokio::test]
async fn empty_filter_parameters_count_as_absent() {
    let app = spawn_app().await;
    create_book(&app, "Dune", "1965-08-01").await;

    let body = search_body(&app, "?title=&publishedBefore=&publishedAfter=").await;

    assert!(body.contains("Dune"));
}

#[tokio::test]
async fn title_filter_matches_substrings_case_insensitively() {
    let app = spawn_app().await;
    create_book(&app, "The Left Hand of Darkness", "1969-03-01").await;
    create_book(&app, "Dune Messiah", "1969-07-01").await;

    let body = search_body(&app, "?title=dune").await;

    assert!(
        body.contains("Dune Messiah"),
        "Case-insensitive substring should match"
    );
    assert!(
        !body.contains("The Left Hand of Darkness"),
        "Non-matching titles should be excluded"
    );

    let body = search_body(&app, "?title=DUNE").await;
    assert!(body.contains("Dune Messiah"));
}

#[tokio::test]
async fn published_before_is_an_inclusive_upper_bound() {
    let app = spawn_app().await;
    create_book(&app, "Solaris", "1961-06-01").await;
    create_book(&app, "Dune", "1965-08-01").await;
    create_book(&app, "Hyperion", "1989-05-26").await;

    let body = search_body(&app, "?publishedBefore=1965-08-01").await;

    assert!(body.contains("Solaris"));
    assert!(body.contains("Dune"), "Bound should be inclusive");
    assert!(!body.contains("Hyperion"));
}

#[tokio::test]
async fn published_after_is_an_inclusive_lower_bound() {
    let app = spawn_app().await;
    create_book(&app, "Solaris", "1961-06-01").await;
    create_book(&app, "Dune", "1965-08-01").await;
    create_book(&app, "Hyperion", "1989-05-26").await;

    let body = search_body(&app, "?publishedAfter=1965-08-01").await;

    assert!(!body.contains("Solaris"));
    assert!(body.contains("Dune"), "Bound should be inclusive");
    assert!(body.contains("Hyperion"));
}

#[tokio::test]
async fn date_bounds_combine_into_a_range() {
    let app = spawn_app().await;
    create_book(&app, "Solaris", "1961-06-01").await;
    create_book(&app, "Dune", "1965-08-01").await;
    create_book(&app, "Hyperion", "1989-05-26").await;

    let body = search_body(&app, "?publishedAfter=1962-01-01&publishedBefore=1970-01-01").await;

    assert!(!body.contains("Solaris"));
    assert!(body.contains("Dune"));
    assert!(!body.contains("Hyperion"));
}

#[tokio::test]
async fn search_echoes_the_submitted_filters() {
    let app = spawn_app().await;

    let body = search_body(&app, "?title=dune&publishedAfter=1962-01-01").await;

    assert!(
        body.contains(r#"value="dune""#),
        "Title filter should be echoed into the search form"
    );
    assert!(body.contains(r#"value="1962-01-01""#));
}

#[tokio::test]
async fn unparseable_date_falls_back_to_root_redirect() {
    let app = spawn_app().await;
    create_book(&app, "Dune", "1965-08-01").await;

    let response = client()
        .get(app.page_url("/books?publishedBefore=soonish"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_redirects_to(&response, "/");
}

#[tokio::test]
async fn broken_store_falls_back_to_root_redirect() {
    let app = spawn_app().await;
    app.break_book_store().await;

    let response = client()
        .get(app.page_url("/books"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_redirects_to(&response, "/");
}
