mod common;

use common::{pipeline_with, CountingSummarizer, ARTICLE_HTML, SHORT_HTML};
use pretty_assertions::assert_eq;
use sitebrief::{PipelineError, SummaryResult};
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn article_is_fetched_cleaned_and_summarised() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/article"))
        .and(header("user-agent", "Mozilla/5.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ARTICLE_HTML))
        .expect(1)
        .mount(&server)
        .await;

    let summarizer = CountingSummarizer::replying(
        "References never outlive their data. Mutable borrows are exclusive",
    );
    let pipeline = pipeline_with(summarizer.clone(), 5);

    let result = pipeline
        .run(&format!("{}/article", server.uri()))
        .await
        .unwrap();

    assert_eq!(
        result,
        SummaryResult::Summary {
            bulleted_text: "• References never outlive their data.\n\n• Mutable borrows are exclusive."
                .to_string()
        }
    );
    assert_eq!(summarizer.calls(), 1);
}

#[tokio::test]
async fn short_page_is_passed_through_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SHORT_HTML))
        .mount(&server)
        .await;

    let summarizer = CountingSummarizer::replying("unused");
    let pipeline = pipeline_with(summarizer.clone(), 5);

    let result = pipeline.run(&server.uri()).await.unwrap();

    assert_eq!(result.display_text(), "Coming soon.");
    assert_eq!(summarizer.calls(), 0);
}

#[tokio::test]
async fn page_without_paragraphs_is_reported_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<div>No paragraphs here</div>"))
        .mount(&server)
        .await;

    let summarizer = CountingSummarizer::replying("unused");
    let result = pipeline_with(summarizer.clone(), 5)
        .run(&server.uri())
        .await
        .unwrap();

    assert!(matches!(result, SummaryResult::Empty { .. }));
    assert_eq!(summarizer.calls(), 0);
}

#[tokio::test]
async fn non_success_status_is_a_fetch_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string("<p>missing</p>"))
        .mount(&server)
        .await;

    let summarizer = CountingSummarizer::replying("unused");
    let err = pipeline_with(summarizer.clone(), 5)
        .run(&server.uri())
        .await
        .unwrap_err();

    match err {
        PipelineError::FetchFailure(reason) => assert!(reason.contains("404"), "{reason}"),
        other => panic!("expected fetch failure, got {other:?}"),
    }
    assert_eq!(summarizer.calls(), 0);
}

#[tokio::test]
async fn slow_server_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(ARTICLE_HTML)
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let err = pipeline_with(CountingSummarizer::replying("unused"), 1)
        .run(&server.uri())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        PipelineError::FetchFailure("request timed out after 1 seconds".to_string())
    );
}

#[tokio::test]
async fn unreachable_host_is_a_fetch_failure() {
    // Nothing listens on port 9 of localhost
    let err = pipeline_with(CountingSummarizer::replying("unused"), 2)
        .run("http://127.0.0.1:9/")
        .await
        .unwrap_err();

    assert!(matches!(err, PipelineError::FetchFailure(_)));
}

#[tokio::test]
async fn summariser_fault_is_a_summarization_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ARTICLE_HTML))
        .mount(&server)
        .await;

    let err = pipeline_with(CountingSummarizer::failing("quota exhausted"), 5)
        .run(&server.uri())
        .await
        .unwrap_err();

    match err {
        PipelineError::SummarizationFailure(reason) => {
            assert!(reason.contains("quota exhausted"), "{reason}")
        }
        other => panic!("expected summarization failure, got {other:?}"),
    }
}
