//! End-to-end tests: trip request through the client, app state and renderer
//!
//! An in-process axum server stands in for the itinerary service.

use std::time::Duration;

use axum::{
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::sync::mpsc;

use tripguide::app::{App, Command, Screen};
use tripguide::background::{spawn_itinerary_request, BackgroundMessage, Connectivity, HealthMonitor};
use tripguide::data::ItineraryClient;
use tripguide::render::{ItineraryFragment, TipsFragment};
use tripguide::view::Tab;

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub listener");
    let addr = listener.local_addr().expect("Stub listener has no address");
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    format!("http://{}", addr)
}

/// Response shaped like the service output, sentinels included
fn lisbon_body() -> Value {
    json!({
        "city": "Lisbon",
        "duration_days": 2,
        "itinerary": [
            {
                "day": 1,
                "date": "Jun 1, 2025",
                "activities": [
                    {
                        "name": "Belem Tower",
                        "category": "Landmark",
                        "rating": "4.6",
                        "phone": "N/A",
                        "website": "N/A",
                        "photos": ["a.jpg", "b.jpg", "c.jpg"],
                        "reviews": [{"author": null, "rating": "N/A", "review": "Lovely"}]
                    }
                ],
                "restaurants": [
                    {"name": "Time Out Market", "price_level": 2, "rating": 4.4},
                    {"name": "Cervejaria Ramiro", "price_level": "N/A"}
                ]
            },
            {
                "day": 2,
                "activities": [],
                "restaurants": [{"name": "Pasteis de Belem", "price": "$"}]
            }
        ],
        "tips": ["Buy a Viva Viagem card", {"text": "Trams get crowded"}, {"tip": "Wear flat shoes"}]
    })
}

fn key(code: crossterm::event::KeyCode) -> crossterm::event::KeyEvent {
    crossterm::event::KeyEvent::new(code, crossterm::event::KeyModifiers::NONE)
}

/// Fills the form for `destination` and submits it
fn submit(app: &mut App, destination: &str) -> Option<Command> {
    use crossterm::event::KeyCode;

    app.handle_key(key(KeyCode::Enter));
    for c in destination.chars() {
        app.handle_key(key(KeyCode::Char(c)));
    }
    for _ in 0..5 {
        app.handle_key(key(KeyCode::Enter));
    }
    app.handle_key(key(KeyCode::Enter))
}

async fn settle(app: &mut App, client: ItineraryClient, command: Option<Command>) {
    let Some(Command::SubmitItinerary(request)) = command else {
        panic!("expected a submit command");
    };
    let (tx, mut rx) = mpsc::channel(1);
    spawn_itinerary_request(client, request, tx);
    let message = tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("timed out waiting for itinerary")
        .expect("channel closed");
    match message {
        BackgroundMessage::Itinerary(result) => app.apply_itinerary(result),
        other => panic!("unexpected message {:?}", other),
    }
}

#[tokio::test]
async fn test_successful_request_renders_all_fragments() {
    let router = Router::new().route(
        "/api/generate-itinerary",
        post(|Json(body): Json<Value>| async move {
            assert_eq!(body["city"], "Lisbon");
            assert_eq!(body["travel_style"], "cultural");
            assert_eq!(body["group_type"], "solo");
            assert!(body["start_date"].is_null());
            Json(lisbon_body())
        }),
    );
    let client = ItineraryClient::new(serve(router).await);
    let mut app = App::new();

    let command = submit(&mut app, "Lisbon");
    settle(&mut app, client, command).await;

    assert_eq!(app.screen, Screen::Results);
    let results = app.results.as_ref().expect("results rendered");
    assert_eq!(results.header.title, "Your Lisbon Adventure");
    assert_eq!(results.header.subtitle, "2 day trip");

    match &results.itinerary {
        ItineraryFragment::Days(days) => {
            assert_eq!(days.len(), 2);
            assert_eq!(days[0].label, "Jun 1, 2025");
            assert_eq!(days[1].label, "Day 2");
            // Sentinel phone and website drop the contact block
            let card = &days[0].cards[0];
            assert!(!card
                .sections
                .iter()
                .any(|s| matches!(s, tripguide::render::CardSection::Contact { .. })));
        }
        other => panic!("unexpected itinerary {:?}", other),
    }

    let names: Vec<&str> = results
        .restaurants
        .cards()
        .iter()
        .map(|card| card.title.as_str())
        .collect();
    assert_eq!(names, ["Time Out Market", "Cervejaria Ramiro", "Pasteis de Belem"]);
    assert_eq!(results.restaurants.cards()[0].price.as_deref(), Some("$$"));
    assert_eq!(results.restaurants.cards()[1].price, None);

    match &results.tips {
        TipsFragment::List { tips, .. } => {
            assert_eq!(tips.len(), 3);
            assert_eq!(tips[2].text, "Wear flat shoes");
        }
        other => panic!("unexpected tips {:?}", other),
    }
}

#[tokio::test]
async fn test_photo_navigation_after_render() {
    let router = Router::new().route(
        "/api/generate-itinerary",
        post(|| async { Json(lisbon_body()) }),
    );
    let client = ItineraryClient::new(serve(router).await);
    let mut app = App::new();

    let command = submit(&mut app, "Lisbon");
    settle(&mut app, client, command).await;

    app.handle_key(key(crossterm::event::KeyCode::Down));
    assert_eq!(app.prev_photo(), Some(2));
    assert_eq!(app.next_photo(), Some(0));

    app.handle_key(key(crossterm::event::KeyCode::Tab));
    assert_eq!(app.view.active(), Tab::Restaurants);
}

#[tokio::test]
async fn test_not_found_then_retry_succeeds() {
    let calls = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0));
    let counter = calls.clone();
    let router = Router::new().route(
        "/api/generate-itinerary",
        post(move || {
            let counter = counter.clone();
            async move {
                if counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst) == 0 {
                    Err(StatusCode::NOT_FOUND)
                } else {
                    Ok(Json(lisbon_body()))
                }
            }
        }),
    );
    let client = ItineraryClient::new(serve(router).await);
    let mut app = App::new();

    let command = submit(&mut app, "Rome");
    settle(&mut app, client.clone(), command).await;

    match &app.screen {
        Screen::Error(panel) => {
            assert!(panel.message.contains("Rome"));
            assert!(panel.message.contains("Try another city"));
        }
        other => panic!("expected error panel, got {:?}", other),
    }

    let retry = app.handle_key(key(crossterm::event::KeyCode::Char('r')));
    settle(&mut app, client, retry).await;

    assert_eq!(app.screen, Screen::Results);
    assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_server_error_shows_generic_message() {
    let router = Router::new().route(
        "/api/generate-itinerary",
        post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    );
    let client = ItineraryClient::new(serve(router).await);
    let mut app = App::new();

    let command = submit(&mut app, "Rome");
    settle(&mut app, client, command).await;

    assert!(app.results.is_none());
    match &app.screen {
        Screen::Error(panel) => assert!(panel.message.contains("500")),
        other => panic!("expected error panel, got {:?}", other),
    }
}

#[test]
fn test_demo_mode_uses_bundled_guide() {
    let mut app = App::new();
    app.demo = true;

    assert!(submit(&mut app, "Atlantis").is_none());

    let results = app.results.as_ref().expect("demo results rendered");
    assert!(results.demo);
    assert_eq!(results.header.title, "Your Atlantis Adventure");
    // Unknown cities fall back to the first bundled guide
    assert_eq!(results.itinerary.days().len(), 3);
    assert_eq!(results.restaurants.cards().len(), 3);
}

#[tokio::test]
async fn test_health_badge_follows_service() {
    let router = Router::new().route("/api/health", get(|| async { Json(json!({"status": "healthy"})) }));
    let client = ItineraryClient::new(serve(router).await);
    let (tx, mut rx) = mpsc::channel(4);
    let mut app = App::new();

    let handle = HealthMonitor::spawn(client, Duration::from_secs(60), tx);
    let message = tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("timed out waiting for health check")
        .expect("channel closed");
    if let BackgroundMessage::Health(status) = message {
        app.apply_health(status);
    }
    handle.shutdown().await;

    assert_eq!(app.connectivity, Connectivity::Connected);
    assert_eq!(app.screen, Screen::Welcome);
}
