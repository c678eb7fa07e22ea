#[cfg(test)]
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
    Router,
};
#[cfg(test)]
use parking_lot::Mutex;
#[cfg(test)]
use serde_json::{json, Value};
#[cfg(test)]
use std::sync::Arc;

#[cfg(test)]
use crate::features::places::models::Place;

/// A request observed by the fake backend
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
}

#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct RequestLog(Arc<Mutex<Vec<RecordedRequest>>>);

#[cfg(test)]
#[allow(dead_code)]
impl RequestLog {
    pub fn all(&self) -> Vec<RecordedRequest> {
        self.0.lock().clone()
    }

    pub fn count(&self, method: &str, path: &str) -> usize {
        self.0
            .lock()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    pub fn last(&self) -> Option<RecordedRequest> {
        self.0.lock().last().cloned()
    }
}

#[cfg(test)]
async fn record_request(State(log): State<RequestLog>, request: Request, next: Next) -> Response {
    let recorded = RecordedRequest {
        method: request.method().to_string(),
        path: request.uri().path().to_string(),
        query: request.uri().query().map(str::to_string),
        authorization: request
            .headers()
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    };
    log.0.lock().push(recorded);
    next.run(request).await
}

/// Serve `router` on an ephemeral local port.
///
/// Returns the base URL and the log of every request the backend received.
#[cfg(test)]
pub async fn spawn_backend(router: Router) -> (String, RequestLog) {
    let log = RequestLog::default();
    let app = router.layer(axum::middleware::from_fn_with_state(
        log.clone(),
        record_request,
    ));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), log)
}

/// Base URL of a port nothing listens on
#[cfg(test)]
#[allow(dead_code)]
pub async fn unreachable_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// Place response body as the backend serializes it
#[cfg(test)]
#[allow(dead_code)]
pub fn place_json(id: i64, name: &str, category: &str, lat: f64, lng: f64) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": format!("{} is a well known place", name),
        "category": category,
        "latitude": lat,
        "longitude": lng,
        "specialties": null,
        "created_at": "2024-05-01T12:30:00.123456",
        "creator_id": 1,
        "average_rating": null,
        "review_count": 0
    })
}

#[cfg(test)]
#[allow(dead_code)]
pub fn sample_place(id: i64, name: &str, category: &str, lat: f64, lng: f64) -> Place {
    serde_json::from_value(place_json(id, name, category, lat, lng)).unwrap()
}

#[cfg(test)]
#[allow(dead_code)]
pub fn with_specialties(mut place: Place, specialties: &[&str]) -> Place {
    place.specialties = Some(specialties.iter().map(|s| s.to_string()).collect());
    place
}
