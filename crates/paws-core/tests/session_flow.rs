use std::sync::Arc;

use paws_core::domain::{FetchError, RawImage, NO_LIKES_MESSAGE};
use paws_core::impls::{HttpImageSource, ScriptedImageSource};
use paws_core::ports::{ChannelEventSink, RecordingEventSink};
use paws_core::{AppBuilder, CardBounds, Decision, PawsConfig, Screen, SessionEvent};
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

const ORIGIN: &str = "https://cataas.com";

fn tagged(url: &str, tags: &[&str]) -> Result<RawImage, FetchError> {
    Ok(RawImage::new(url, tags.iter().map(|t| t.to_string()).collect()))
}

#[tokio::test]
async fn full_session_with_gestures_and_clicks() {
    let config: PawsConfig = PawsConfig {
        deck: paws_core::config::DeckConfig {
            size: 4,
            ..Default::default()
        },
        ..Default::default()
    };
    let source = Arc::new(ScriptedImageSource::new(
        ORIGIN,
        [
            tagged("/cat/a", &["cute", "orange"]),
            tagged("/cat/b", &["cute"]),
            tagged("/cat/c", &["fluffy"]),
            tagged("/cat/d", &["grumpy"]),
        ],
    ));
    let events = Arc::new(RecordingEventSink::new());
    let mut app = AppBuilder::new(config)
        .image_source(source)
        .event_sink(events.clone())
        .build()
        .unwrap();

    assert_eq!(app.begin().await, Screen::Cards);
    assert_eq!(app.engine().deck().map(|d| d.len()), Some(4));

    // whichever slot got which url, like the cards tagged cute/orange/fluffy
    let bounds = CardBounds::new(0.0, 300.0);
    while let Some(record) = app.engine().current_record().cloned() {
        if record.tags.iter().any(|t| t == "grumpy") {
            app.on_gesture_start(200.0);
            app.on_gesture_move(40.0);
            assert_eq!(app.on_gesture_end(), Some(Decision::Dislike));
        } else {
            // a short drag first: the card must stay
            app.on_gesture_start(100.0);
            app.on_gesture_move(160.0);
            assert_eq!(app.on_gesture_end(), Some(Decision::Cancel));
            assert_eq!(app.on_point_select(280.0, bounds), Some(Decision::Like));
        }
    }

    assert_eq!(app.engine().screen(), Screen::Summary);
    assert_eq!(app.engine().cursor(), 4);
    assert_eq!(app.engine().liked().len(), 3);
    let summary = app.status().summary.unwrap();
    assert_eq!(summary.liked_count, 3);
    assert_eq!(summary.deck_len, 4);
    assert_eq!(summary.top_tags[0], "cute");

    app.on_reset();
    app.on_reset();
    assert_eq!(app.engine().screen(), Screen::Start);
    assert!(app.engine().deck().is_none());

    let recorded = events.events();
    assert!(matches!(recorded.last(), Some(SessionEvent::Reset)));
    assert!(recorded
        .iter()
        .any(|e| matches!(e, SessionEvent::SummaryReady { liked: 3, total: 4 })));
}

#[tokio::test]
async fn total_outage_still_yields_full_deck() {
    let (sink, mut rx) = ChannelEventSink::new();
    let source = Arc::new(ScriptedImageSource::failing(ORIGIN));
    let mut app = AppBuilder::new(PawsConfig::default())
        .image_source(source.clone())
        .event_sink(Arc::new(sink))
        .build()
        .unwrap();

    app.begin().await;
    let deck = app.engine().deck().unwrap();
    assert_eq!(deck.len(), 10);
    assert!(deck.records().iter().all(|r| r.tags == vec!["cute".to_string()]));
    assert_eq!(source.calls(), 30);
    assert_eq!(app.last_load().map(|s| s.fallbacks), Some(10));

    for _ in 0..10 {
        app.on_point_select(10.0, CardBounds::new(0.0, 300.0));
    }
    assert_eq!(app.engine().summary_text(), NO_LIKES_MESSAGE);

    assert!(matches!(rx.recv().await, Some(SessionEvent::Began { .. })));
    assert!(matches!(
        rx.recv().await,
        Some(SessionEvent::DeckInstalled { len: 10, .. })
    ));
}

#[tokio::test]
async fn http_source_end_to_end() {
    let server = MockServer::start().await;
    for i in 0..3 {
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "url": format!("/cat/{i}"),
                "tags": ["orange"],
            })))
            .up_to_n_times(1)
            .mount(&server)
            .await;
    }
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut config = PawsConfig::default();
    config.source.endpoint = format!("{}/cat?json=true&type=small", server.uri());
    config.source.base_origin = server.uri();
    config.deck.size = 3;

    let source = Arc::new(HttpImageSource::new(&config.source).unwrap());
    let mut app = AppBuilder::new(config)
        .image_source(source)
        .build()
        .unwrap();

    app.begin().await;
    let deck = app.engine().deck().unwrap();
    assert_eq!(deck.len(), 3);
    assert!(deck
        .records()
        .iter()
        .all(|r| r.url.starts_with(&server.uri()) && r.tags == vec!["orange".to_string()]));
    assert!(deck.has_unique_urls(paws_core::config::FALLBACK_URL));
    assert_eq!(app.last_load().map(|s| s.fallbacks), Some(0));
}
