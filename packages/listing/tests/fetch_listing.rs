use httpmock::prelude::*;
use listing::{format_usd, ListingError, ListingFetcher, ListingId, Price};

const LISTING_PATH: &str = "/listing/1998-ladder-truck-d2a03277-b4c6-4883-a00c-33ecfc91c25c";

fn listing_page(preview: &str) -> String {
    format!(
        r#"<!DOCTYPE html><html><head><title>1998 Ladder Truck</title></head>
        <body><div id="__next">rendered markup</div>
        <script id="__NEXT_DATA__" type="application/json">
        {{"props":{{"pageProps":{{"listingPreview":{preview}}}}},"page":"/listing/[slug]"}}
        </script></body></html>"#
    )
}

#[tokio::test]
async fn test_fetches_and_normalizes_listing_from_embedded_page_data() {
    let server = MockServer::start();
    let page_mock = server.mock(|when, then| {
        when.method(GET).path(LISTING_PATH);
        then.status(200)
            .header("Content-Type", "text/html; charset=utf-8")
            .body(listing_page(
                r#"{"listingTitle":"1998 Ladder Truck","sellingPrice":45000,
                   "listingDescription":"Aerial ladder, 75ft reach.",
                   "imageUrl":"https://cdn.example.com/truck.jpg"}"#,
            ));
    });

    let url = server.url(LISTING_PATH);
    let id = ListingId::from_url(&url).unwrap();
    assert_eq!(id.to_string(), "d2a03277-b4c6-4883-a00c-33ecfc91c25c");

    let fetcher = ListingFetcher::new();
    let normalized = fetcher.fetch(&id, &url).await.unwrap();

    assert_eq!(normalized.record.title, "1998 Ladder Truck");
    assert_eq!(normalized.price_number, 45000.0);
    assert_eq!(format_usd(normalized.price_number), "$45,000.00");
    assert_eq!(
        normalized.record.thumbnail(),
        Some("https://cdn.example.com/truck.jpg")
    );

    page_mock.assert();
}

#[tokio::test]
async fn test_text_price_is_normalized_through_the_pipeline() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path(LISTING_PATH);
        then.status(200)
            .header("Content-Type", "text/html")
            .body(listing_page(
                r#"{"listingTitle":"Pumper","sellingPrice":"$12,345.67"}"#,
            ));
    });

    let url = server.url(LISTING_PATH);
    let id = ListingId::from_url(&url).unwrap();

    let normalized = ListingFetcher::new().fetch(&id, &url).await.unwrap();

    assert_eq!(normalized.record.price, Price::Text("$12,345.67".to_string()));
    assert_eq!(normalized.price_number, 12345.67);
}

#[tokio::test]
async fn test_unparseable_price_fails_instead_of_defaulting() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path(LISTING_PATH);
        then.status(200)
            .header("Content-Type", "text/html")
            .body(listing_page(
                r#"{"listingTitle":"Pumper","sellingPrice":"Call for price"}"#,
            ));
    });

    let url = server.url(LISTING_PATH);
    let id = ListingId::from_url(&url).unwrap();

    let err = ListingFetcher::new().fetch(&id, &url).await.unwrap_err();

    assert!(matches!(err, ListingError::InvalidPrice { .. }));
}

#[tokio::test]
async fn test_page_without_structured_data_reports_that_category() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path(LISTING_PATH);
        then.status(200)
            .header("Content-Type", "text/html")
            .body("<html><body><h1>1998 Ladder Truck</h1></body></html>");
    });

    let url = server.url(LISTING_PATH);
    let id = ListingId::from_url(&url).unwrap();

    let err = ListingFetcher::new().fetch(&id, &url).await.unwrap_err();

    assert!(matches!(err, ListingError::StructuredDataMissing));
}

#[tokio::test]
async fn test_non_success_status_carries_the_status() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path(LISTING_PATH);
        then.status(404).body("not found");
    });

    let url = server.url(LISTING_PATH);
    let id = ListingId::from_url(&url).unwrap();

    let err = ListingFetcher::new().fetch(&id, &url).await.unwrap_err();

    match err {
        ListingError::FetchStatus { status } => assert_eq!(status, 404),
        other => panic!("expected FetchStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_preview_payload_reports_that_category() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path(LISTING_PATH);
        then.status(200)
            .header("Content-Type", "text/html")
            .body(
                r#"<html><body>
                <script id="__NEXT_DATA__" type="application/json">
                {"props":{"pageProps":{"otherPayload":{}}}}
                </script></body></html>"#,
            );
    });

    let url = server.url(LISTING_PATH);
    let id = ListingId::from_url(&url).unwrap();

    let err = ListingFetcher::new().fetch(&id, &url).await.unwrap_err();

    assert!(matches!(err, ListingError::PreviewNotFound));
}
