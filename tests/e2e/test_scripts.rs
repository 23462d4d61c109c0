use crate::e2e::helpers;

use helpers::{
    mocks::{MockSpeechRepository, MockTextRepository},
    TestContext,
};
use hyper::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use test_context::test_context;
use voiceskit_backend::domain::drafting::TextModel;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_draft_script_with_default_text_model(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            "/api/scripts/generate",
            &json!({
                "prompt": "Two friends meet at a bakery",
                "characters": [
                    {"name": "Anna", "persona": "A cheerful animator"},
                    {"name": "Ben", "persona": "A sleepy baker"}
                ]
            }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(
        response.body.as_ref().unwrap()["script"],
        "Anna: Hello there!\nBen: (laughing) Hi, Anna."
    );

    let prompts = ctx.text.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    assert_eq!(prompts[0].model, TextModel::Gemini20Flash);
    assert!(prompts[0].prompt.contains("Two friends meet at a bakery"));
    assert!(prompts[0].prompt.contains("- Name: Ben\n  Persona: A sleepy baker"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_use_requested_text_model(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            "/api/scripts/generate",
            &json!({
                "prompt": "A robot learns to bake",
                "characters": [{"name": "Robot", "persona": ""}],
                "model": "gpt-4o"
            }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(ctx.text.prompts.lock().unwrap()[0].model, TextModel::Gpt4o);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_drafting_without_characters(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            "/api/scripts/generate",
            &json!({"prompt": "A robot learns to bake", "characters": []}),
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("at least one named character");
    assert!(ctx.text.prompts.lock().unwrap().is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_empty_prompt(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            "/api/scripts/generate",
            &json!({"prompt": "  ", "characters": [{"name": "Anna"}]}),
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("prompt is empty");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_unknown_text_model(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            "/api/scripts/generate",
            &json!({
                "prompt": "A robot learns to bake",
                "characters": [{"name": "Robot"}],
                "model": "gemini-2.5-flash-preview-tts"
            }),
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("unknown text model");
}

#[tokio::test]
async fn it_should_report_unusable_model_output() {
    let ctx = TestContext::with_mocks(
        MockSpeechRepository::default(),
        MockTextRepository::replying("Sorry, I can't help with that."),
    )
    .await
    .unwrap();

    let response = ctx
        .client
        .post(
            "/api/scripts/generate",
            &json!({"prompt": "Anything", "characters": [{"name": "Anna"}]}),
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_GATEWAY)
        .assert_error_message("expected format");
}

#[tokio::test]
async fn it_should_report_text_backend_failure() {
    let ctx = TestContext::with_mocks(
        MockSpeechRepository::default(),
        MockTextRepository::failing("model overloaded"),
    )
    .await
    .unwrap();

    let response = ctx
        .client
        .post(
            "/api/scripts/generate",
            &json!({"prompt": "Anything", "characters": [{"name": "Anna"}]}),
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_GATEWAY)
        .assert_error_message("model overloaded");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_parse_script_into_cues(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            "/api/scripts/parse",
            &json!({
                "script": "Robot: Time is 3:45, we must go\n\n[scene change]\nAnna: (whispering) Fine.\nGuest: Wait!",
                "characterVoices": {
                    "Robot": {"voice": "orus", "persona": ""},
                    "Anna": {"voice": "kore", "persona": ""}
                }
            }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    let body = response.body.as_ref().unwrap();

    assert_eq!(
        body["cues"],
        json!([
            {"sequenceIndex": 0, "speakerName": "Robot", "dialogueText": "Time is 3:45, we must go"},
            {"sequenceIndex": 3, "speakerName": "Anna", "dialogueText": "(whispering) Fine."},
            {"sequenceIndex": 4, "speakerName": "Guest", "dialogueText": "Wait!"}
        ])
    );
    assert_eq!(body["speakers"], json!(["Robot", "Anna", "Guest"]));
    assert_eq!(body["unmappedSpeakers"], json!(["Guest"]));
    assert_eq!(ctx.speech.calls(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_parse_script_without_character_map(ctx: &TestContext) {
    let response = ctx
        .client
        .post("/api/scripts/parse", &json!({"script": "Anna: Hi\nBen: Hello"}))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    let body = response.body.as_ref().unwrap();
    assert_eq!(body["cues"].as_array().unwrap().len(), 2);
    assert_eq!(body["unmappedSpeakers"], json!(["Anna", "Ben"]));
}
