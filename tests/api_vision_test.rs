//! Integration tests for the visual chat API endpoints

mod test_utils;

#[cfg(test)]
mod tests {
    use std::io::Write;

    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
    };
    use tempfile::NamedTempFile;
    use tower::util::ServiceExt;

    use crate::test_utils::{body_to_string, test_app};

    fn image_fixture() -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(b"fake png bytes")
            .expect("Failed to write temp file");
        file
    }

    async fn post_json(app: &Router, uri: &str, payload: serde_json::Value) -> (StatusCode, String) {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri(uri)
                    .method("POST")
                    .header("content-type", "application/json")
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let body = body_to_string(response.into_body()).await;
        (status, body)
    }

    /// Tests a full visual chat exchange: image, message, submit
    #[tokio::test]
    async fn it_submits_a_visual_chat_exchange() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/chat")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "model": "llava:7b-v1.6",
                "stream": false
            })))
            .with_status(200)
            .with_body(r#"{"message":{"content":"a cat"},"done":true}"#)
            .create_async()
            .await;

        let app = test_app(&server.url());
        let image = image_fixture();
        let path = image.path().to_str().unwrap();

        let (status, _) = post_json(
            &app,
            "/api/vision/session-1/image",
            serde_json::json!({"path": path}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = post_json(
            &app,
            "/api/vision/session-1/message",
            serde_json::json!({"message": "describe"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = post_json(
            &app,
            "/api/vision/session-1/submit",
            serde_json::json!({"include_history": false, "force_language": false}),
        )
        .await;
        mock.assert_async().await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#"{"kind":"assistant","content":"a cat"}"#));
    }

    /// Tests that submitting with fewer than two turns warns and makes
    /// no inference call
    #[tokio::test]
    async fn it_warns_on_submit_with_too_few_turns() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/chat")
            .expect(0)
            .create_async()
            .await;

        let app = test_app(&server.url());
        let image = image_fixture();
        let path = image.path().to_str().unwrap();

        let (status, _) = post_json(
            &app,
            "/api/vision/session-2/image",
            serde_json::json!({"path": path}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = post_json(&app, "/api/vision/session-2/submit", serde_json::json!({}))
            .await;
        mock.assert_async().await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("warning"));

        // The transcript is left untouched
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/vision/session-2")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body = body_to_string(response.into_body()).await;
        assert!(body.contains(r#""kind":"image""#));
        assert!(!body.contains(r#""kind":"assistant""#));
    }

    /// Tests that retry drops only a trailing assistant reply
    #[tokio::test]
    async fn it_retries_the_last_assistant_reply() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/chat")
            .with_status(200)
            .with_body(r#"{"message":{"content":"a cat"},"done":true}"#)
            .create_async()
            .await;

        let app = test_app(&server.url());
        let image = image_fixture();
        let path = image.path().to_str().unwrap();

        post_json(
            &app,
            "/api/vision/session-3/image",
            serde_json::json!({"path": path}),
        )
        .await;
        post_json(
            &app,
            "/api/vision/session-3/message",
            serde_json::json!({"message": "describe"}),
        )
        .await;
        post_json(&app, "/api/vision/session-3/submit", serde_json::json!({})).await;
        mock.assert_async().await;

        let (status, body) =
            post_json(&app, "/api/vision/session-3/retry", serde_json::json!({})).await;
        assert_eq!(status, StatusCode::OK);
        assert!(!body.contains(r#""kind":"assistant""#));
        assert!(body.contains(r#""kind":"user""#));

        // Retrying again is a no-op since the last turn is now a user
        // message
        let (status, body) =
            post_json(&app, "/api/vision/session-3/retry", serde_json::json!({})).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#""kind":"user""#));
    }

    /// Tests that undo returns the rewound message text for re-editing
    #[tokio::test]
    async fn it_undoes_the_last_message() {
        let app = test_app("http://localhost:1");
        let image = image_fixture();
        let path = image.path().to_str().unwrap();

        post_json(
            &app,
            "/api/vision/session-4/image",
            serde_json::json!({"path": path}),
        )
        .await;
        post_json(
            &app,
            "/api/vision/session-4/message",
            serde_json::json!({"message": "describe"}),
        )
        .await;

        let (status, body) =
            post_json(&app, "/api/vision/session-4/undo", serde_json::json!({})).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#""message":"describe""#));
        assert!(!body.contains(r#""kind":"user""#));
    }

    /// Tests that clear wipes only the targeted session
    #[tokio::test]
    async fn it_clears_a_session_without_touching_others() {
        let app = test_app("http://localhost:1");
        let image = image_fixture();
        let path = image.path().to_str().unwrap();

        post_json(
            &app,
            "/api/vision/session-5/image",
            serde_json::json!({"path": path}),
        )
        .await;
        post_json(
            &app,
            "/api/vision/session-6/image",
            serde_json::json!({"path": path}),
        )
        .await;

        let (status, _) =
            post_json(&app, "/api/vision/session-5/clear", serde_json::json!({})).await;
        assert_eq!(status, StatusCode::OK);

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/vision/session-5")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body = body_to_string(response.into_body()).await;
        assert_eq!(body, r#"{"transcript":[]}"#);

        // The other session still has its image turn
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/vision/session-6")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body = body_to_string(response.into_body()).await;
        assert!(body.contains(r#""kind":"image""#));
    }

    /// Tests that a malformed transcript shape is an error rather than
    /// a silent empty message set
    #[tokio::test]
    async fn it_errors_on_malformed_transcript_shape() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/chat")
            .expect(0)
            .create_async()
            .await;

        let app = test_app(&server.url());

        // Two user messages with no leading image
        post_json(
            &app,
            "/api/vision/session-7/message",
            serde_json::json!({"message": "describe"}),
        )
        .await;
        post_json(
            &app,
            "/api/vision/session-7/message",
            serde_json::json!({"message": "this"}),
        )
        .await;

        let (status, _) =
            post_json(&app, "/api/vision/session-7/submit", serde_json::json!({})).await;
        mock.assert_async().await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
