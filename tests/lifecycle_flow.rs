//! Flujo de ciclo de vida contra un almacén simulado
//!
//! Estas pruebas ejercitan los servicios de dominio de punta a punta con
//! wiremock haciendo de almacén externo.

use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vehicle_scrappage::client::StoreClient;
use vehicle_scrappage::dto::pickup_dto::SchedulePickupRequest;
use vehicle_scrappage::dto::vehicle_dto::CreateVehicleRequest;
use vehicle_scrappage::models::status::VehicleStatus;
use vehicle_scrappage::models::user::{Role, Session, UserProfile};
use vehicle_scrappage::services::lifecycle_service::{steps, LifecycleService};
use vehicle_scrappage::services::pickup_service::PickupService;
use vehicle_scrappage::services::vehicle_service::VehicleService;
use vehicle_scrappage::utils::errors::AppError;

fn session(role: Role, upstream_token: &str) -> Session {
    Session::new(
        format!("gw-{}", upstream_token),
        upstream_token.to_string(),
        role,
        UserProfile {
            id: match role {
                Role::Owner => "owner-1".to_string(),
                _ => "dealer-1".to_string(),
            },
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
        },
        3600,
    )
}

fn future_date() -> NaiveDate {
    Utc::now().date_naive() + Duration::days(10)
}

fn vehicle_json(status: &str, pickup_date: Option<&str>) -> serde_json::Value {
    json!({
        "id": "veh-1",
        "make": "Honda",
        "model": "City",
        "year": 2012,
        "conditionScore": 6,
        "status": status,
        "pickupDate": pickup_date,
        "userId": "owner-1"
    })
}

fn store_for(server: &MockServer) -> Arc<StoreClient> {
    Arc::new(StoreClient::new(server.uri(), 5).unwrap())
}

#[tokio::test]
async fn test_owner_creates_schedules_and_dealer_advances() {
    let server = MockServer::start().await;
    let store = store_for(&server);
    let owner = session(Role::Owner, "up-owner");
    let dealer = session(Role::Dealer, "up-dealer");
    let date = future_date();
    let date_str = date.format("%Y-%m-%d").to_string();

    // Registro del vehículo
    Mock::given(method("POST"))
        .and(path("/api/vehicles"))
        .and(header("authorization", "Bearer up-owner"))
        .respond_with(ResponseTemplate::new(201).set_body_json(vehicle_json("CREATED", None)))
        .mount(&server)
        .await;

    let vehicle = VehicleService::new(Arc::clone(&store))
        .create(
            &owner,
            CreateVehicleRequest {
                make: "Honda".to_string(),
                model: "City".to_string(),
                year: 2012,
                condition_score: 6,
            },
        )
        .await
        .unwrap();

    assert_eq!(vehicle.status, VehicleStatus::Created);
    assert!(!vehicle.schedule.is_scheduled());

    // Colección del propietario con el vehículo todavía en CREATED
    Mock::given(method("GET"))
        .and(path("/api/vehicles/my"))
        .and(header("authorization", "Bearer up-owner"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([vehicle_json("CREATED", None)])),
        )
        .mount(&server)
        .await;

    // El almacén crea la recogida y avanza el vehículo en la misma operación
    Mock::given(method("POST"))
        .and(path("/api/pickups"))
        .and(header("authorization", "Bearer up-owner"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "pk-1",
            "vehicleId": "veh-1",
            "pickupDate": date_str,
            "slot": "MORNING"
        })))
        .mount(&server)
        .await;

    let pickup = PickupService::new(Arc::clone(&store))
        .schedule(
            &owner,
            SchedulePickupRequest {
                vehicle_id: "veh-1".to_string(),
                pickup_date: date_str.clone(),
                slot: "MORNING".to_string(),
            },
        )
        .await
        .unwrap();

    assert_eq!(pickup.vehicle_id, "veh-1");
    assert_eq!(pickup.pickup_date, date);

    // Transición del desguazador a IN_TRANSIT; la instantánea embebida en la
    // recogida no trae pickupDate y debe sobrescribirse con el de la recogida
    Mock::given(method("PATCH"))
        .and(path("/api/vehicles/veh-1/status"))
        .and(header("authorization", "Bearer up-dealer"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(vehicle_json("IN_TRANSIT", None)),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/pickups"))
        .and(header("authorization", "Bearer up-dealer"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "pk-1",
            "vehicleId": "veh-1",
            "pickupDate": date_str,
            "slot": "MORNING",
            "vehicle": vehicle_json("IN_TRANSIT", None),
            "user": { "id": "owner-1", "name": "Ana", "email": "ana@example.com" }
        }])))
        .mount(&server)
        .await;

    let outcome = LifecycleService::new(Arc::clone(&store), false)
        .advance(&dealer, "veh-1", "IN_TRANSIT")
        .await
        .unwrap();

    assert_eq!(outcome.status, VehicleStatus::InTransit);
    assert_eq!(outcome.view.vehicle.status, VehicleStatus::InTransit);
    assert_eq!(outcome.view.vehicle.schedule.date(), Some(date));
    assert_eq!(outcome.view.owner.as_ref().unwrap().name, "Ana");

    // Línea de tiempo: completados hasta IN_TRANSIT, actual IN_TRANSIT
    let timeline = steps(outcome.view.vehicle.status);
    let completed: Vec<VehicleStatus> = timeline
        .iter()
        .filter(|s| s.completed)
        .map(|s| s.status)
        .collect();
    assert_eq!(
        completed,
        vec![
            VehicleStatus::Created,
            VehicleStatus::PickupScheduled,
            VehicleStatus::InTransit
        ]
    );
    assert!(timeline[2].current);
    assert!(!timeline[3].completed && !timeline[4].completed && !timeline[5].completed);
}

#[tokio::test]
async fn test_advance_by_owner_is_forbidden_without_touching_store() {
    let server = MockServer::start().await;
    let store = store_for(&server);
    let owner = session(Role::Owner, "up-owner");

    // El almacén no debe recibir ninguna llamada
    Mock::given(method("PATCH"))
        .and(path("/api/vehicles/veh-1/status"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let result = LifecycleService::new(Arc::clone(&store), false)
        .advance(&owner, "veh-1", "IN_TRANSIT")
        .await;

    assert!(matches!(result, Err(AppError::Forbidden { .. })));
}

#[tokio::test]
async fn test_advance_with_unknown_status_fails() {
    let server = MockServer::start().await;
    let store = store_for(&server);
    let dealer = session(Role::Dealer, "up-dealer");

    Mock::given(method("PATCH"))
        .and(path("/api/vehicles/veh-1/status"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let result = LifecycleService::new(Arc::clone(&store), false)
        .advance(&dealer, "veh-1", "CRUSHED")
        .await;

    assert!(matches!(result, Err(AppError::UnknownStatus(_))));
}

#[tokio::test]
async fn test_permissive_override_allows_backward_transition() {
    let server = MockServer::start().await;
    let store = store_for(&server);
    let dealer = session(Role::Dealer, "up-dealer");
    let date_str = future_date().format("%Y-%m-%d").to_string();

    Mock::given(method("PATCH"))
        .and(path("/api/vehicles/veh-1/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vehicle_json("CREATED", None)))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/pickups"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "pk-1",
            "vehicleId": "veh-1",
            "pickupDate": date_str,
            "slot": "EVENING",
            "vehicle": vehicle_json("CREATED", None)
        }])))
        .mount(&server)
        .await;

    // Regresión desde un estado avanzado: el override permisivo la aplica
    let outcome = LifecycleService::new(Arc::clone(&store), false)
        .advance(&dealer, "veh-1", "CREATED")
        .await
        .unwrap();

    assert_eq!(outcome.status, VehicleStatus::Created);
}

#[tokio::test]
async fn test_strict_mode_rejects_skip_transition() {
    let server = MockServer::start().await;
    let store = store_for(&server);
    let dealer = session(Role::Dealer, "up-dealer");
    let date_str = future_date().format("%Y-%m-%d").to_string();

    Mock::given(method("GET"))
        .and(path("/api/pickups"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "pk-1",
            "vehicleId": "veh-1",
            "pickupDate": date_str,
            "slot": "MORNING",
            "vehicle": vehicle_json("IN_TRANSIT", None)
        }])))
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/api/vehicles/veh-1/status"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    // Desde IN_TRANSIT lo único permitido en modo estricto es RECEIVED
    let result = LifecycleService::new(Arc::clone(&store), true)
        .advance(&dealer, "veh-1", "COD_ISSUED")
        .await;

    assert!(matches!(result, Err(AppError::InvalidTransition(_))));
}

#[tokio::test]
async fn test_owner_lookup_never_escapes_own_collection() {
    let server = MockServer::start().await;
    let store = store_for(&server);
    let owner = session(Role::Owner, "up-owner");

    // La colección del propietario solo contiene veh-1; veh-2 existe para
    // otro propietario pero la estrategia jamás consulta fuera
    Mock::given(method("GET"))
        .and(path("/api/vehicles/my"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([vehicle_json("CREATED", None)])),
        )
        .mount(&server)
        .await;

    let result = VehicleService::new(Arc::clone(&store))
        .get_by_id(&owner, "veh-2")
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_dealer_lookup_overwrites_stale_pickup_date() {
    let server = MockServer::start().await;
    let store = store_for(&server);
    let dealer = session(Role::Dealer, "up-dealer");
    let date = future_date();
    let date_str = date.format("%Y-%m-%d").to_string();

    // La instantánea trae una fecha desfasada; manda la de la recogida
    Mock::given(method("GET"))
        .and(path("/api/pickups"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "pk-1",
            "vehicleId": "veh-1",
            "pickupDate": date_str,
            "slot": "AFTERNOON",
            "vehicle": vehicle_json("PICKUP_SCHEDULED", Some("2020-01-01")),
            "user": { "id": "owner-1", "name": "Ana", "email": "ana@example.com" }
        }])))
        .mount(&server)
        .await;

    let view = VehicleService::new(Arc::clone(&store))
        .get_by_id(&dealer, "veh-1")
        .await
        .unwrap();

    assert_eq!(view.vehicle.schedule.date(), Some(date));
    assert_eq!(view.owner.unwrap().name, "Ana");
}

#[tokio::test]
async fn test_dealer_lookup_unassigned_vehicle_is_not_found() {
    let server = MockServer::start().await;
    let store = store_for(&server);
    let dealer = session(Role::Dealer, "up-dealer");

    Mock::given(method("GET"))
        .and(path("/api/pickups"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let result = VehicleService::new(Arc::clone(&store))
        .get_by_id(&dealer, "veh-1")
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_schedule_rejects_past_date_locally() {
    let server = MockServer::start().await;
    let store = store_for(&server);
    let owner = session(Role::Owner, "up-owner");

    Mock::given(method("POST"))
        .and(path("/api/pickups"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let result = PickupService::new(Arc::clone(&store))
        .schedule(
            &owner,
            SchedulePickupRequest {
                vehicle_id: "veh-1".to_string(),
                pickup_date: "2020-01-01".to_string(),
                slot: "MORNING".to_string(),
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn test_schedule_rejects_vehicle_past_created_stage() {
    let server = MockServer::start().await;
    let store = store_for(&server);
    let owner = session(Role::Owner, "up-owner");
    let date_str = future_date().format("%Y-%m-%d").to_string();

    Mock::given(method("GET"))
        .and(path("/api/vehicles/my"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([vehicle_json(
            "IN_TRANSIT",
            Some(date_str.as_str())
        )])))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/pickups"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let result = PickupService::new(Arc::clone(&store))
        .schedule(
            &owner,
            SchedulePickupRequest {
                vehicle_id: "veh-1".to_string(),
                pickup_date: date_str,
                slot: "EVENING".to_string(),
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::InvalidTransition(_))));
}

#[tokio::test]
async fn test_unreachable_store_surfaces_remote_unavailable() {
    // Puerto cerrado: el fallo debe distinguirse como almacén inalcanzable
    let store = Arc::new(StoreClient::new("http://127.0.0.1:9".to_string(), 2).unwrap());
    let owner = session(Role::Owner, "up-owner");

    let result = VehicleService::new(store).list_mine(&owner).await;

    assert!(matches!(result, Err(AppError::RemoteUnavailable(_))));
}
