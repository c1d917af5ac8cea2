use crate::common::{TestApp, routes};

#[tokio::test]
async fn landing_content_lists_faqs_and_stories() {
    let app = TestApp::spawn().await;

    let res = app.get(routes::LANDING).await;

    assert_eq!(res.status, 200, "{}", res.text);
    assert!(res.body["hero"]["headline"].is_string());
    assert!(!res.body["faqs"].as_array().unwrap().is_empty());
    assert!(!res.body["stories"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn openapi_document_describes_public_routes() {
    let app = TestApp::spawn().await;

    let res = app.get(routes::OPENAPI).await;

    assert_eq!(res.status, 200);
    let paths = res.body["paths"].as_object().unwrap();
    assert!(paths.keys().any(|p| p.ends_with("/landing")));
    assert!(paths.keys().any(|p| p.contains("{slug}")));
}
