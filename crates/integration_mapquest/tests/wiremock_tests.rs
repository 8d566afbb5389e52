//! Integration tests for the MapQuest provider (wiremock-based)

use std::sync::Arc;

use application::{Geocoder, PipelineContext};
use domain::{Capability, GeocoderError};
use infrastructure::{HttpClientConfig, InMemoryReferenceData, ReqwestTransport};
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use integration_mapquest::{MapQuestConfig, MapQuestProvider};

fn geocoder_for(server: &MockServer) -> Geocoder {
    let transport = Arc::new(ReqwestTransport::new(&HttpClientConfig::default()).unwrap());
    let reference = Arc::new(InMemoryReferenceData::embedded().unwrap());
    let context = PipelineContext::default().with_reference_data(reference.clone(), reference);

    Geocoder::builder()
        .provider(MapQuestProvider::new(
            &MapQuestConfig::for_testing(server.uri()),
            transport,
            context,
        ))
        .build()
        .unwrap()
}

fn location(street: &str, city: &str) -> Value {
    json!({
        "street": street,
        "adminArea5": city,
        "adminArea3": "IL",
        "adminArea1": "US",
        "postalCode": "60619",
        "latLng": { "lat": 41.734021, "lng": -87.596064 }
    })
}

fn ok_response(locations: Value) -> Value {
    json!({
        "info": { "statuscode": 0, "messages": [] },
        "results": [{ "locations": locations }]
    })
}

#[tokio::test]
async fn test_geocode_resolves_country_and_state_names() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/geocoding/v1/address"))
        .and(query_param("location", "1158 E 89th St, Chicago, IL"))
        .and(query_param("key", "test-key"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(ok_response(json!([location("1158 E 89th St", "Chicago")]))),
        )
        .mount(&server)
        .await;

    let locations = geocoder_for(&server)
        .geocode(&json!({ "address": "1158 E 89th St, Chicago, IL" }))
        .await
        .unwrap();

    assert_eq!(locations.len(), 1);
    assert_eq!(locations[0].country.as_deref(), Some("United States"));
    assert_eq!(locations[0].country_code.as_deref(), Some("US"));
    assert_eq!(locations[0].state.as_deref(), Some("Illinois"));
}

#[tokio::test]
async fn test_geocode_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/geocoding/v1/address"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_response(json!([
            location("1 First St", "Chicago"),
            location("2 Second St", "Chicago"),
            location("3 Third St", "Chicago")
        ]))))
        .mount(&server)
        .await;

    let locations = geocoder_for(&server)
        .geocode(&json!({ "address": "Chicago", "limit": 1 }))
        .await
        .unwrap();
    assert_eq!(locations.len(), 1);
    assert_eq!(locations[0].street_name.as_deref(), Some("First St"));
}

#[tokio::test]
async fn test_reverse() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/geocoding/v1/reverse"))
        .and(query_param("location", "41.734021,-87.596064"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(ok_response(json!([location("1158 E 89th St", "Chicago")]))),
        )
        .mount(&server)
        .await;

    let locations = geocoder_for(&server)
        .reverse(&json!({ "lat": 41.734021, "lon": -87.596064 }))
        .await
        .unwrap();
    assert_eq!(locations[0].house_number.as_deref(), Some("1158"));
}

#[tokio::test]
async fn test_quota_exceeded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/geocoding/v1/address"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "info": { "statuscode": 403, "messages": ["Transaction limit exceeded"] },
            "results": []
        })))
        .mount(&server)
        .await;

    let err = geocoder_for(&server)
        .geocode(&json!({ "address": "Chicago" }))
        .await
        .unwrap_err();
    assert!(err.is_quota_exceeded());
}

#[tokio::test]
async fn test_malformed_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/geocoding/v1/address"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = geocoder_for(&server)
        .geocode(&json!({ "address": "Chicago" }))
        .await
        .unwrap_err();
    assert!(matches!(err, GeocoderError::InvalidServerResponse(_)));
}

#[tokio::test]
async fn test_suggest_is_unsupported() {
    let server = MockServer::start().await;
    let geocoder = geocoder_for(&server);

    let err = geocoder
        .suggest(&json!({ "address": "1158 E 89" }))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        GeocoderError::UnsupportedCapability {
            capability: Capability::Suggest,
            ..
        }
    ));

    let err = geocoder
        .using::<MapQuestProvider>()
        .unwrap()
        .place_details(&json!({ "placeId": "x" }))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "MapQuestProvider does not support placeDetails");
}
