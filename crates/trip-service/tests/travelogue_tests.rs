//! Travelogue integration tests.
//!
//! Multipart uploads, author-only updates, and pagination over HTTP.

// Test code is allowed to use expect/unwrap for assertions
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]

use anyhow::Result;
use common::jwt::TokenPair;
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use trip_test_utils::TestTripServer;

struct Ctx {
    server: TestTripServer,
    client: reqwest::Client,
    author: TokenPair,
    group_id: String,
}

async fn group_ctx() -> Result<Ctx> {
    let server = TestTripServer::spawn().await?;
    let client = reqwest::Client::new();
    let author = server
        .signup_and_login(&client, "author@example.com", "Author", "pw")
        .await;

    client
        .post(format!("{}/travelgroups", server.url()))
        .bearer_auth(&author.access_token)
        .json(&serde_json::json!({ "name": "Journal trip" }))
        .send()
        .await?;

    let groups: Vec<serde_json::Value> = client
        .get(format!("{}/travelgroups", server.url()))
        .bearer_auth(&author.access_token)
        .send()
        .await?
        .json()
        .await?;
    let group_id = groups[0]["id"].as_str().unwrap().to_string();

    Ok(Ctx {
        server,
        client,
        author,
        group_id,
    })
}

fn metadata_part(value: &serde_json::Value) -> Part {
    Part::text(value.to_string()).mime_str("application/json").unwrap()
}

fn image_part(file_name: &str, bytes: Vec<u8>) -> Part {
    Part::bytes(bytes)
        .file_name(file_name.to_string())
        .mime_str("image/jpeg")
        .unwrap()
}

impl Ctx {
    async fn create(&self, form: Form) -> reqwest::Response {
        self.client
            .post(format!(
                "{}/travelgroups/{}/travelogues",
                self.server.url(),
                self.group_id
            ))
            .bearer_auth(&self.author.access_token)
            .multipart(form)
            .send()
            .await
            .unwrap()
    }
}

#[tokio::test]
async fn test_create_with_image() -> Result<()> {
    let ctx = group_ctx().await?;

    let form = Form::new()
        .part(
            "metadata",
            metadata_part(&serde_json::json!({
                "title": "Day one",
                "body": "We arrived and ate well.",
            })),
        )
        .part("image", image_part("beach.jpg", vec![0xFF, 0xD8, 0xFF, 0xE0]));

    let response = ctx.create(form).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let created: serde_json::Value = response.json().await?;
    assert_eq!(created["title"], "Day one");
    assert_eq!(created["image"]["file_name"], "beach.jpg");
    assert_eq!(created["image"]["content_type"], "image/jpeg");
    assert_eq!(created["image"]["size_bytes"], 4);
    Ok(())
}

#[tokio::test]
async fn test_create_without_metadata_part() -> Result<()> {
    let ctx = group_ctx().await?;

    let form = Form::new().part("image", image_part("lonely.jpg", vec![1, 2, 3]));
    let response = ctx.create(form).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn test_update_is_author_only() -> Result<()> {
    let ctx = group_ctx().await?;

    let form = Form::new().part(
        "metadata",
        metadata_part(&serde_json::json!({ "title": "Original", "body": "Text." })),
    );
    let created: serde_json::Value = ctx.create(form).await.json().await?;
    let travelogue_id = created["id"].as_str().unwrap();

    // Second member joins the group.
    let other = ctx
        .server
        .signup_and_login(&ctx.client, "other@example.com", "Other", "pw")
        .await;
    let invite: serde_json::Value = ctx
        .client
        .post(format!(
            "{}/travelgroups/{}/invites",
            ctx.server.url(),
            ctx.group_id
        ))
        .bearer_auth(&ctx.author.access_token)
        .json(&serde_json::json!({ "email": "other@example.com" }))
        .send()
        .await?
        .json()
        .await?;
    ctx.client
        .post(format!(
            "{}/travelgroups/invites/{}/accept",
            ctx.server.url(),
            invite["invite_id"].as_str().unwrap()
        ))
        .bearer_auth(&other.access_token)
        .send()
        .await?;

    let hijack = Form::new().part(
        "metadata",
        metadata_part(&serde_json::json!({ "title": "Hijacked" })),
    );
    let denied = ctx
        .client
        .patch(format!(
            "{}/travelgroups/{}/travelogues/{travelogue_id}",
            ctx.server.url(),
            ctx.group_id
        ))
        .bearer_auth(&other.access_token)
        .multipart(hijack)
        .send()
        .await?;
    assert_eq!(denied.status(), StatusCode::FORBIDDEN);

    let revise = Form::new().part(
        "metadata",
        metadata_part(&serde_json::json!({ "title": "Revised" })),
    );
    let updated: serde_json::Value = ctx
        .client
        .patch(format!(
            "{}/travelgroups/{}/travelogues/{travelogue_id}",
            ctx.server.url(),
            ctx.group_id
        ))
        .bearer_auth(&ctx.author.access_token)
        .multipart(revise)
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(updated["title"], "Revised");
    assert_eq!(updated["body"], "Text.");
    Ok(())
}

#[tokio::test]
async fn test_image_only_update() -> Result<()> {
    let ctx = group_ctx().await?;

    let form = Form::new().part(
        "metadata",
        metadata_part(&serde_json::json!({ "title": "Pics", "body": "See photo." })),
    );
    let created: serde_json::Value = ctx.create(form).await.json().await?;
    let travelogue_id = created["id"].as_str().unwrap();
    assert!(created["image"].is_null());

    let image_only = Form::new().part("image", image_part("late.jpg", vec![9; 10]));
    let updated: serde_json::Value = ctx
        .client
        .patch(format!(
            "{}/travelgroups/{}/travelogues/{travelogue_id}",
            ctx.server.url(),
            ctx.group_id
        ))
        .bearer_auth(&ctx.author.access_token)
        .multipart(image_only)
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(updated["image"]["file_name"], "late.jpg");
    assert_eq!(updated["image"]["size_bytes"], 10);
    Ok(())
}

#[tokio::test]
async fn test_pagination() -> Result<()> {
    let ctx = group_ctx().await?;

    for i in 0..5 {
        let form = Form::new().part(
            "metadata",
            metadata_part(&serde_json::json!({
                "title": format!("Entry {i}"),
                "body": "Text.",
            })),
        );
        let response = ctx.create(form).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let page: serde_json::Value = ctx
        .client
        .get(format!(
            "{}/travelgroups/{}/travelogues?page=1&size=2",
            ctx.server.url(),
            ctx.group_id
        ))
        .bearer_auth(&ctx.author.access_token)
        .send()
        .await?
        .json()
        .await?;

    assert_eq!(page["page"], 1);
    assert_eq!(page["size"], 2);
    assert_eq!(page["total"], 5);
    assert_eq!(page["items"].as_array().unwrap().len(), 2);

    // Out-of-range pages are empty, not an error.
    let beyond: serde_json::Value = ctx
        .client
        .get(format!(
            "{}/travelgroups/{}/travelogues?page=9&size=2",
            ctx.server.url(),
            ctx.group_id
        ))
        .bearer_auth(&ctx.author.access_token)
        .send()
        .await?
        .json()
        .await?;
    assert!(beyond["items"].as_array().unwrap().is_empty());
    Ok(())
}
