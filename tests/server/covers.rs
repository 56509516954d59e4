use librarium::domain::ids::BookId;

use crate::helpers::{book_form, client, id_from_location, location, spawn_app, with_cover};

const GIF_BYTES: &[u8] = &[0x47, 0x49, 0x46, 0x38, 0x39, 0x61, 9, 9];

#[tokio::test]
async fn uploaded_cover_is_served_back() {
    let app = spawn_app().await;

    let form = with_cover(
        book_form("Dune", "", "1965-08-01", "412", ""),
        "image/gif",
        GIF_BYTES.to_vec(),
    );
    let response = client()
        .post(app.page_url("/books"))
        .multipart(form)
        .send()
        .await
        .expect("Failed to execute request");
    let id = BookId::new(id_from_location(&location(&response)));
    let cover = app
        .book_repo
        .get(id)
        .await
        .unwrap()
        .cover_image_name
        .unwrap();

    let response = reqwest::Client::new()
        .get(app.page_url(&format!("/covers/{cover}")))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 200);
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    assert_eq!(content_type.as_deref(), Some("image/gif"));

    let body = response.bytes().await.expect("Failed to read body");
    assert_eq!(body.as_ref(), GIF_BYTES);
}

#[tokio::test]
async fn missing_cover_returns_404() {
    let app = spawn_app().await;

    let response = reqwest::Client::new()
        .get(app.page_url("/covers/no-such-file.png"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn detail_page_links_to_the_stored_cover() {
    let app = spawn_app().await;

    let form = with_cover(
        book_form("Dune", "", "1965-08-01", "412", ""),
        "image/png",
        vec![1, 2, 3],
    );
    let response = client()
        .post(app.page_url("/books"))
        .multipart(form)
        .send()
        .await
        .expect("Failed to execute request");
    let target = location(&response);
    let id = BookId::new(id_from_location(&target));
    let cover = app
        .book_repo
        .get(id)
        .await
        .unwrap()
        .cover_image_name
        .unwrap();

    let body = reqwest::Client::new()
        .get(app.page_url(&target))
        .send()
        .await
        .expect("Failed to execute request")
        .text()
        .await
        .expect("Failed to read body");

    assert!(
        body.contains(&format!("/covers/{cover}")),
        "Detail page should reference the stored cover image"
    );
}
