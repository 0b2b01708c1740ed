use crate::helpers::{TestServer, assert_success, stdout_json};

#[test]
fn book_commands_require_authentication() {
    let server = TestServer::start();

    let output = server.run(
        &[
            "book", "add", "--title", "Dune", "--author", "Herbert", "--category", "Sci-Fi",
        ],
        &[],
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("401"), "stderr: {stderr}");
}

#[test]
fn register_then_login_prints_tokens() {
    let server = TestServer::start();
    server.register("reader@example.com");

    let output = server.run(
        &["login", "--email", "Reader@Example.com"],
        &[("BOOKSHELF_PASSWORD", "secret-pw")],
    );
    assert_success(&output, "login");
    let session = stdout_json(&output);
    assert!(session["token"].is_string());
    assert_eq!(session["user"]["email"], "reader@example.com");

    let output = server.run(
        &["login", "--email", "reader@example.com", "--password", "nope"],
        &[],
    );
    assert!(!output.status.success());
}

#[test]
fn book_lifecycle_through_the_cli() {
    let server = TestServer::start();
    let token = server.register("reader@example.com");
    let auth = [("BOOKSHELF_TOKEN", token.as_str())];

    let output = server.run(
        &[
            "book", "add", "--title", "Dune", "--author", "Frank Herbert", "--category", "Sci-Fi",
        ],
        &auth,
    );
    assert_success(&output, "book add");
    let book = stdout_json(&output);
    assert_eq!(book["title"], "Dune");
    let id = book["id"].as_i64().expect("book id").to_string();

    let output = server.run(
        &[
            "book", "add", "--title", "Emma", "--author", "Jane Austen", "--category", "Classic",
        ],
        &auth,
    );
    assert_success(&output, "second book add");

    let output = server.run(&["book", "list", "--search", "HERBERT"], &auth);
    assert_success(&output, "book list");
    let cards = stdout_json(&output);
    let cards = cards.as_array().expect("list should be an array");
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0]["title"], "Dune");
    assert!(
        cards[0]["cover"]
            .as_str()
            .is_some_and(|c| c.contains("placeholder")),
        "missing cover should render as placeholder"
    );

    let output = server.run(
        &["book", "update", "--id", &id, "--category", "Classic"],
        &auth,
    );
    assert_success(&output, "book update");
    assert_eq!(stdout_json(&output)["message"], "Book updated");

    let output = server.run(&["book", "categories"], &auth);
    assert_success(&output, "book categories");
    assert_eq!(stdout_json(&output), serde_json::json!(["Classic"]));

    let output = server.run(&["book", "delete", "--id", &id], &auth);
    assert_success(&output, "book delete");

    let output = server.run(&["book", "get", "--id", &id], &auth);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("404"), "stderr: {stderr}");
}

#[test]
fn other_users_cannot_touch_a_book() {
    let server = TestServer::start();
    let owner = server.register("owner@example.com");
    let intruder = server.register("intruder@example.com");

    let output = server.run(
        &[
            "book", "add", "--title", "Dune", "--author", "Herbert", "--category", "Sci-Fi",
        ],
        &[("BOOKSHELF_TOKEN", &owner)],
    );
    assert_success(&output, "book add");
    let id = stdout_json(&output)["id"].as_i64().unwrap().to_string();

    let output = server.run(
        &["book", "delete", "--id", &id],
        &[("BOOKSHELF_TOKEN", &intruder)],
    );
    assert!(!output.status.success());

    let output = server.run(&["book", "list"], &[("BOOKSHELF_TOKEN", &intruder)]);
    assert_success(&output, "intruder list");
    assert_eq!(stdout_json(&output), serde_json::json!([]));

    let output = server.run(&["book", "get", "--id", &id], &[("BOOKSHELF_TOKEN", &owner)]);
    assert_success(&output, "owner get");
}
