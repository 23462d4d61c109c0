use crate::e2e::helpers;

use helpers::{
    assertions::assert_voice_entry,
    mocks::{MockSpeechRepository, MockTextRepository},
    TestContext,
};
use hyper::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_list_voices_grouped_by_category(ctx: &TestContext) {
    let response = ctx.client.get("/api/voices").await.unwrap();

    response.assert_status(StatusCode::OK);
    let categories = response.body.as_ref().unwrap()["categories"]
        .as_array()
        .unwrap()
        .clone();

    let names: Vec<&str> = categories
        .iter()
        .map(|c| c["category"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Male", "Female", "Neutral"]);

    let mut total = 0;
    for group in &categories {
        for voice in group["voices"].as_array().unwrap() {
            assert_voice_entry(voice);
            assert_eq!(voice["category"], group["category"]);
            total += 1;
        }
    }
    assert_eq!(total, 28);

    assert_eq!(
        categories[1]["voices"][1],
        json!({"id": "kore", "displayName": "Kore - Firm", "category": "Female"})
    );
}

#[tokio::test]
async fn it_should_suggest_catalog_voice_for_persona() {
    let ctx = TestContext::with_mocks(
        MockSpeechRepository::default(),
        MockTextRepository::replying(r#"{"voiceId": "Charon"}"#),
    )
    .await
    .unwrap();

    let response = ctx
        .client
        .post(
            "/api/voices/suggest",
            &json!({"persona": "A calm documentary narrator"}),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(response.body.as_ref().unwrap(), &json!({"voiceId": "charon"}));

    let prompts = ctx.text.prompts.lock().unwrap();
    assert!(prompts[0].prompt.contains("A calm documentary narrator"));
    assert!(prompts[0].prompt.contains("- charon: Charon - Informative, Male"));
}

#[tokio::test]
async fn it_should_reject_suggestion_outside_catalog() {
    let ctx = TestContext::with_mocks(
        MockSpeechRepository::default(),
        MockTextRepository::replying(r#"{"voiceId": "alloy"}"#),
    )
    .await
    .unwrap();

    let response = ctx
        .client
        .post("/api/voices/suggest", &json!({"persona": "A pirate captain"}))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_GATEWAY)
        .assert_error_message("alloy");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_empty_persona(ctx: &TestContext) {
    let response = ctx
        .client
        .post("/api/voices/suggest", &json!({"persona": ""}))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("persona is empty");
    assert!(ctx.text.prompts.lock().unwrap().is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_use_requested_model_for_suggestion(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            "/api/voices/suggest",
            &json!({"persona": "A pirate captain", "model": "gemini-2.5-pro"}),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(response.body.as_ref().unwrap()["voiceId"], "kore");
    assert_eq!(
        ctx.text.prompts.lock().unwrap()[0].model.as_str(),
        "gemini-2.5-pro"
    );
}
