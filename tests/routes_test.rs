//! 관리자 API 라우터 테스트 (`ServiceExt::oneshot`)

mod common;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use blog_admin::routes::api_router;
use common::*;
use serde_json::{json, Value};
use tower::ServiceExt;

const BOUNDARY: &str = "blog-admin-test-boundary";

async fn app() -> (Router, TestState) {
    let test = test_state().await;
    (api_router(test.state.clone()), test)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

async fn send_json(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let (status, bytes) = send(app, request).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// 텍스트 필드들과 선택적 파일 필드 하나로 multipart 본문을 만듭니다.
fn multipart_request(
    method: &str,
    uri: &str,
    fields: &[(&str, &str)],
    file: Option<(&str, &str, &[u8])>,
) -> Request<Body> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            )
            .as_bytes(),
        );
    }
    if let Some((name, file_name, bytes)) = file {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: image/png\r\n\r\n",
                BOUNDARY, name, file_name
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method(method)
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn health_reports_database_ok() {
    let (app, _test) = app().await;
    let (status, body) = send_json(&app, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok", "database": "ok" }));
}

#[tokio::test]
async fn add_then_page_through_tags() {
    let (app, _test) = app().await;

    let (status, body) = send_json(
        &app,
        json_request("POST", "/tags", json!({ "names": ["c", "a", "b"] })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["tags"].as_array().unwrap().len(), 3);
    assert_eq!(body["toast"]["kind"], "success");
    assert_eq!(body["toast"]["message"], "Tags successfully added.");

    let (status, body) = send_json(
        &app,
        get("/tags?sort=name&direction=dec&page=1&per_page=2"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 3);
    let names: Vec<&str> = body["tags"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["c", "b"]);
}

#[tokio::test]
async fn unknown_sort_field_returns_fixed_message() {
    let (app, _test) = app().await;
    let (status, body) = send_json(&app, get("/tags?sort=password")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["code"], "tags_not_fetched");
    assert_eq!(body["error"]["message"], "Tags could not be fetched");
}

#[tokio::test]
async fn multipart_create_then_fetch_by_slug_and_chips() {
    let (app, test) = app().await;
    let tags = add_tags(&test.state.client, &["rust", "<web>"]).await;
    let tag_ids = format!("{},{}", tags[0].id, tags[1].id);

    let (status, body) = send_json(
        &app,
        multipart_request(
            "POST",
            "/posts",
            &[
                ("slug", "hello"),
                ("title", "Hello"),
                ("body", "First!"),
                ("tag_ids", tag_ids.as_str()),
            ],
            Some(("cover_image", "cover.png", &b"png"[..])),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["post"]["slug"], "hello");
    assert_eq!(body["toast"]["message"], "New post successfully created.");
    let cover = body["post"]["cover_image"].as_str().unwrap();
    assert!(cover.starts_with("http://localhost:3000/storage/v1/object/public/blog/"));

    let (status, body) = send_json(&app, get("/posts/slug/hello")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Hello");
    assert_eq!(body["tags"].as_array().unwrap().len(), 2);

    let (status, html) = send(&app, get("/posts/slug/hello/chips")).await;
    assert_eq!(status, StatusCode::OK);
    let html = String::from_utf8(html).unwrap();
    assert!(html.contains(">rust</span>"));
    assert!(html.contains("&lt;web&gt;"));
    assert!(!html.contains("<web>"));
}

#[tokio::test]
async fn multipart_create_requires_title_and_cover() {
    let (app, _test) = app().await;

    let (status, body) = send_json(
        &app,
        multipart_request("POST", "/posts", &[("title", "No cover")], None),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "bad_request");

    let (status, _) = send_json(
        &app,
        multipart_request(
            "POST",
            "/posts",
            &[("cover_image_url", "https://cdn.example.com/a.png")],
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_slug_is_not_found() {
    let (app, _test) = app().await;
    let (status, body) = send_json(&app, get("/posts/slug/nowhere")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "Post could not be loaded");
}

#[tokio::test]
async fn edit_replaces_tags_and_list_reflects_it() {
    let (app, test) = app().await;
    let client = &test.state.client;
    let tags = add_tags(client, &["one", "two", "three"]).await;
    let post = blog_admin::services::create_post(
        client,
        pending_post("edit", "Edit"),
        &[tags[0].id, tags[1].id],
    )
    .await
    .unwrap();

    // 목록을 한 번 캐시해 두고, 수정 후 다시 조회해 새 태그가 보이는지 확인합니다.
    let (_, before) = send_json(&app, get("/posts")).await;
    assert_eq!(before["posts"][0]["tags"].as_array().unwrap().len(), 2);

    let third = tags[2].id.to_string();
    let (status, body) = send_json(
        &app,
        multipart_request(
            "PATCH",
            &format!("/posts/{}", post.id),
            &[
                ("slug", "edit"),
                ("title", "Edited"),
                ("cover_image_url", "unchanged"),
                ("tag_ids", third.as_str()),
            ],
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["post"]["cover_image"], post.cover_image.as_str());
    assert_eq!(body["toast"]["message"], "Post successfully edited.");

    let (_, after) = send_json(&app, get("/posts")).await;
    assert_eq!(after["posts"][0]["title"], "Edited");
    let after_tags = after["posts"][0]["tags"].as_array().unwrap();
    assert_eq!(after_tags.len(), 1);
    assert_eq!(after_tags[0]["id"], tags[2].id);
}

#[tokio::test]
async fn relation_endpoints_and_deletes() {
    let (app, test) = app().await;
    let client = &test.state.client;
    let tags = add_tags(client, &["x"]).await;
    let post = blog_admin::services::create_post(client, pending_post("rel", "Rel"), &[])
        .await
        .unwrap();

    let status = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/post-tags",
            json!({ "post_id": post.id, "tag_id": tags[0].id }),
        ))
        .await
        .unwrap()
        .status();
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = send_json(&app, get("/post-tags")).await;
    assert_eq!(
        body["post_tags"],
        json!([{ "post_id": post.id, "tag_id": tags[0].id }])
    );

    let (_, body) = send_json(&app, get(&format!("/posts/{}/tags", post.id))).await;
    assert_eq!(body["tags"][0]["name"], "x");

    let (status, body) = send_json(
        &app,
        Request::builder()
            .method("DELETE")
            .uri(format!("/tags/{}", tags[0].id))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["toast"]["message"], "Tag successfully deleted.");

    let (_, body) = send_json(&app, get(&format!("/posts/{}/tags", post.id))).await;
    assert_eq!(body["tags"], json!([]));

    let (status, body) = send_json(
        &app,
        Request::builder()
            .method("DELETE")
            .uri(format!("/posts/{}", post.id))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["toast"]["message"], "Post successfully deleted.");

    let (_, body) = send_json(&app, get("/posts")).await;
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn empty_file_part_does_not_replace_the_cover() {
    let (app, test) = app().await;
    let post = blog_admin::services::create_post(
        &test.state.client,
        pending_post("keep-cover", "Keep Cover"),
        &[],
    )
    .await
    .unwrap();

    // 파일을 고르지 않은 브라우저 폼: 이름 없는 빈 파일 파트만 옵니다.
    let (status, body) = send_json(
        &app,
        multipart_request(
            "PATCH",
            &format!("/posts/{}", post.id),
            &[("slug", "keep-cover"), ("title", "Still Here")],
            Some(("cover_image", "", &b""[..])),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["post"]["title"], "Still Here");
    assert_eq!(body["post"]["cover_image"], post.cover_image.as_str());

    let objects = std::fs::read_dir(test.backend.storage_dir.path().join("blog"))
        .unwrap()
        .count();
    assert_eq!(objects, 1);
}

#[tokio::test]
async fn empty_file_part_falls_back_to_cover_url() {
    let (app, test) = app().await;
    let url = "https://cdn.example.com/kept.png";

    let (status, body) = send_json(
        &app,
        multipart_request(
            "POST",
            "/posts",
            &[("title", "From Url"), ("cover_image_url", url)],
            Some(("cover_image", "", &b""[..])),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["post"]["cover_image"], url);
    assert_eq!(body["post"]["slug"], "from-url");
    assert!(!test.backend.storage_dir.path().join("blog").exists());
}
