use bookshelf::domain::book_items::{BookFilter, NewBook, UpdateBook};
use bookshelf::infrastructure::client::BookshelfClient;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::helpers::spawn_app;

#[tokio::test]
async fn client_sends_bearer_token_and_filters() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/books"))
        .and(header("authorization", "Bearer test-token"))
        .and(query_param("search", "dune"))
        .and(query_param("category", "Sci-Fi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client =
        BookshelfClient::from_base_url(&mock_server.uri(), Some("test-token".to_string())).unwrap();
    let filter = BookFilter::new(Some("dune".to_string()), Some("Sci-Fi".to_string()));
    let books = client.books().list(&filter).await.unwrap();

    assert!(books.is_empty());
}

#[tokio::test]
async fn client_surfaces_error_message() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(serde_json::json!({ "error": "invalid email or password" })),
        )
        .mount(&mock_server)
        .await;

    let client = BookshelfClient::from_base_url(&mock_server.uri(), None).unwrap();
    let err = client
        .auth()
        .login("a@x.com", "wrong")
        .await
        .unwrap_err()
        .to_string();

    assert!(err.contains("401"), "got {err}");
    assert!(err.contains("invalid email or password"), "got {err}");
}

#[tokio::test]
async fn client_round_trips_against_the_server() {
    let app = spawn_app().await;

    let anonymous = BookshelfClient::from_base_url(&app.address, None).unwrap();
    let session = anonymous
        .auth()
        .register("reader@example.com", "pw", Some("Reader"))
        .await
        .unwrap();

    let client = BookshelfClient::from_base_url(&app.address, Some(session.token)).unwrap();
    let books = client.books();

    let created = books
        .create(&NewBook {
            title: "Dune".to_string(),
            author: "Herbert".to_string(),
            category: "Sci-Fi".to_string(),
            cover: None,
        })
        .await
        .unwrap();
    assert_eq!(created.owner_id, session.user.id);

    let message = books
        .update(
            created.id,
            &UpdateBook {
                category: Some("Classic".to_string()),
                ..UpdateBook::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(message.message, "Book updated");
    assert_eq!(books.get(created.id).await.unwrap().category, "Classic");
    assert_eq!(books.categories().await.unwrap(), vec!["Classic"]);

    books.delete(created.id).await.unwrap();
    let err = books.get(created.id).await.unwrap_err().to_string();
    assert!(err.contains("404"), "got {err}");
}
