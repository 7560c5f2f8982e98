//! Cliente HTTP para el almacén externo
//!
//! Este módulo contiene el cliente HTTP del almacén que posee la
//! persistencia de vehículos, recogidas y usuarios. Cada operación es una
//! llamada request/response única: el gateway la trata como atómica y un
//! fallo de cualquier mitad se reporta como fallo completo, sin estado
//! local a medio aplicar.

use anyhow::Result;
use reqwest::{multipart, Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::models::pickup::{Pickup, PickupSlot};
use crate::models::status::VehicleStatus;
use crate::models::user::UserProfile;
use crate::models::vehicle::{PickupState, Vehicle};
use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::validate_date;

/// Cliente HTTP del almacén externo
pub struct StoreClient {
    client: Client,
    base_url: String,
}

fn default_true() -> bool {
    true
}

/// Usuario tal como lo entrega el almacén
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreUser {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
}

impl From<StoreUser> for UserProfile {
    fn from(user: StoreUser) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

/// Registro de vehículo en el formato de transporte del almacén
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRecord {
    #[serde(alias = "_id")]
    pub id: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub condition_score: i32,
    pub status: String,
    #[serde(default)]
    pub pickup_date: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

impl TryFrom<VehicleRecord> for Vehicle {
    type Error = AppError;

    fn try_from(record: VehicleRecord) -> Result<Self, Self::Error> {
        let status = VehicleStatus::from_code(&record.status)?;

        let schedule = match record.pickup_date {
            Some(raw) => {
                let date = validate_date(&raw).map_err(|_| {
                    AppError::Upstream(format!("fecha de recogida ilegible: '{}'", raw))
                })?;
                // La franja solo viaja en la recogida; aquí no se conoce
                PickupState::Scheduled { date, slot: None }
            }
            None => PickupState::Unscheduled,
        };

        Ok(Vehicle {
            id: record.id,
            make: record.make,
            model: record.model,
            year: record.year,
            condition_score: record.condition_score,
            status,
            schedule,
            user_id: record.user_id,
        })
    }
}

/// Registro de recogida en el formato de transporte del almacén
///
/// Incluye la instantánea del vehículo y el perfil del propietario cuando
/// el llamador es el desguazador asignado. La instantánea puede venir
/// incompleta; la fecha autoritativa es la del propio registro de recogida.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PickupRecord {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub vehicle_id: Option<String>,
    pub pickup_date: String,
    #[serde(default)]
    pub slot: Option<String>,
    #[serde(default)]
    pub vehicle: Option<VehicleRecord>,
    #[serde(default)]
    pub user: Option<StoreUser>,
}

impl PickupRecord {
    /// Id del vehículo referenciado, venga en el campo propio o embebido
    pub fn referenced_vehicle_id(&self) -> Option<&str> {
        self.vehicle_id
            .as_deref()
            .or_else(|| self.vehicle.as_ref().map(|v| v.id.as_str()))
    }
}

impl TryFrom<PickupRecord> for Pickup {
    type Error = AppError;

    fn try_from(record: PickupRecord) -> Result<Self, Self::Error> {
        let vehicle_id = record
            .referenced_vehicle_id()
            .ok_or_else(|| AppError::Upstream("recogida sin referencia de vehículo".to_string()))?
            .to_string();

        let pickup_date = validate_date(&record.pickup_date).map_err(|_| {
            AppError::Upstream(format!("fecha de recogida ilegible: '{}'", record.pickup_date))
        })?;

        Ok(Pickup {
            id: record.id,
            vehicle_id,
            pickup_date,
            slot: record.slot.as_deref().and_then(PickupSlot::from_code),
            vehicle: record.vehicle.map(Vehicle::try_from).transpose()?,
            owner: record.user.map(UserProfile::from),
        })
    }
}

/// Request de login contra el almacén
#[derive(Debug, Clone, Serialize)]
pub struct StoreLoginRequest {
    pub email: String,
    pub password: String,
}

/// Request de registro contra el almacén
#[derive(Debug, Clone, Serialize)]
pub struct StoreRegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

/// Response de autenticación del almacén
#[derive(Debug, Clone, Deserialize)]
pub struct StoreAuthResponse {
    #[serde(default = "default_true")]
    pub success: bool,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub user: Option<StoreUser>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Payload de creación de vehículo
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVehiclePayload {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub condition_score: i32,
}

/// Payload de programación de recogida
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulePickupPayload {
    pub vehicle_id: String,
    pub pickup_date: String,
    pub slot: String,
}

#[derive(Debug, Clone, Serialize)]
struct UpdateStatusPayload<'a> {
    status: &'a str,
}

impl StoreClient {
    /// Crear nuevo cliente HTTP con URL base y timeout configurables
    pub fn new(base_url: String, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Autenticar credenciales existentes
    pub async fn login(&self, request: &StoreLoginRequest) -> AppResult<StoreAuthResponse> {
        let response = self
            .client
            .post(self.url("/api/auth/login"))
            .json(request)
            .send()
            .await
            .map_err(|e| request_error("login", e))?;

        parse_response("login", response).await
    }

    /// Registrar una cuenta nueva
    pub async fn register(&self, request: &StoreRegisterRequest) -> AppResult<StoreAuthResponse> {
        let response = self
            .client
            .post(self.url("/api/auth/register"))
            .json(request)
            .send()
            .await
            .map_err(|e| request_error("register", e))?;

        parse_response("register", response).await
    }

    /// Listar los vehículos propios del llamador
    pub async fn list_owner_vehicles(&self, bearer: &str) -> AppResult<Vec<VehicleRecord>> {
        let response = self
            .client
            .get(self.url("/api/vehicles/my"))
            .bearer_auth(bearer)
            .send()
            .await
            .map_err(|e| request_error("list_owner_vehicles", e))?;

        parse_response("list_owner_vehicles", response).await
    }

    /// Crear un vehículo nuevo en etapa inicial
    pub async fn create_vehicle(
        &self,
        bearer: &str,
        payload: &CreateVehiclePayload,
    ) -> AppResult<VehicleRecord> {
        let response = self
            .client
            .post(self.url("/api/vehicles"))
            .bearer_auth(bearer)
            .json(payload)
            .send()
            .await
            .map_err(|e| request_error("create_vehicle", e))?;

        parse_response("create_vehicle", response).await
    }

    /// Listar las recogidas asignadas al llamador
    pub async fn list_dealer_pickups(&self, bearer: &str) -> AppResult<Vec<PickupRecord>> {
        let response = self
            .client
            .get(self.url("/api/pickups"))
            .bearer_auth(bearer)
            .send()
            .await
            .map_err(|e| request_error("list_dealer_pickups", e))?;

        parse_response("list_dealer_pickups", response).await
    }

    /// Programar una recogida
    ///
    /// El almacén crea la recogida y avanza el vehículo a PICKUP_SCHEDULED
    /// en la misma operación; para el gateway es todo-o-nada.
    pub async fn schedule_pickup(
        &self,
        bearer: &str,
        payload: &SchedulePickupPayload,
    ) -> AppResult<PickupRecord> {
        let response = self
            .client
            .post(self.url("/api/pickups"))
            .bearer_auth(bearer)
            .json(payload)
            .send()
            .await
            .map_err(|e| request_error("schedule_pickup", e))?;

        parse_response("schedule_pickup", response).await
    }

    /// Persistir un nuevo estado de vehículo
    pub async fn update_vehicle_status(
        &self,
        bearer: &str,
        vehicle_id: &str,
        status_code: &str,
    ) -> AppResult<VehicleRecord> {
        let response = self
            .client
            .patch(self.url(&format!("/api/vehicles/{}/status", vehicle_id)))
            .bearer_auth(bearer)
            .json(&UpdateStatusPayload { status: status_code })
            .send()
            .await
            .map_err(|e| request_error("update_vehicle_status", e))?;

        parse_response("update_vehicle_status", response).await
    }

    /// Reenviar un documento del vehículo al almacén
    pub async fn upload_document(
        &self,
        bearer: &str,
        vehicle_id: &str,
        document_type: &str,
        file_name: String,
        bytes: Vec<u8>,
    ) -> AppResult<()> {
        let form = multipart::Form::new()
            .text("vehicleId", vehicle_id.to_string())
            .text("type", document_type.to_string())
            .part("document", multipart::Part::bytes(bytes).file_name(file_name));

        let response = self
            .client
            .post(self.url("/api/documents/upload"))
            .bearer_auth(bearer)
            .multipart(form)
            .send()
            .await
            .map_err(|e| request_error("upload_document", e))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let message = error_message(response).await;
            Err(status_error("upload_document", status, message))
        }
    }
}

/// Mapear un fallo de transporte a la taxonomía de errores
///
/// Un fallo de red o timeout se distingue del resto: la primera petición al
/// almacén puede tardar mucho en despertar y el actor necesita un mensaje
/// de "no se pudo contactar" en lugar de un fallo genérico.
fn request_error(operation: &'static str, error: reqwest::Error) -> AppError {
    if error.is_timeout() || error.is_connect() {
        AppError::RemoteUnavailable(format!("{}: {}", operation, error))
    } else {
        AppError::Upstream(format!("{}: {}", operation, error))
    }
}

fn status_error(operation: &'static str, status: StatusCode, message: String) -> AppError {
    match status {
        StatusCode::UNAUTHORIZED => AppError::unauthenticated(message),
        StatusCode::FORBIDDEN => AppError::forbidden(message),
        StatusCode::NOT_FOUND => AppError::NotFound(message),
        _ => AppError::Upstream(format!("{} falló con {}: {}", operation, status, message)),
    }
}

/// Extraer el motivo legible de un cuerpo de error del almacén
async fn error_message(response: reqwest::Response) -> String {
    let body = response.text().await.unwrap_or_default();
    serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| {
            v.get("message")
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or(body)
}

async fn parse_response<T: DeserializeOwned>(
    operation: &'static str,
    response: reqwest::Response,
) -> AppResult<T> {
    let status = response.status();
    if status.is_success() {
        response
            .json::<T>()
            .await
            .map_err(|e| AppError::Upstream(format!("{}: respuesta ilegible: {}", operation, e)))
    } else {
        let message = error_message(response).await;
        Err(status_error(operation, status, message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vehicle_record_conversion() {
        let record = VehicleRecord {
            id: "veh-1".to_string(),
            make: "Honda".to_string(),
            model: "City".to_string(),
            year: 2012,
            condition_score: 6,
            status: "PICKUP_SCHEDULED".to_string(),
            pickup_date: Some("2026-09-10".to_string()),
            user_id: Some("user-1".to_string()),
        };

        let vehicle = Vehicle::try_from(record).unwrap();
        assert_eq!(vehicle.status, VehicleStatus::PickupScheduled);
        assert_eq!(
            vehicle.schedule.date(),
            Some(chrono::NaiveDate::from_ymd_opt(2026, 9, 10).unwrap())
        );
    }

    #[test]
    fn test_vehicle_record_unknown_status_fails() {
        let record = VehicleRecord {
            id: "veh-1".to_string(),
            make: "Honda".to_string(),
            model: "City".to_string(),
            year: 2012,
            condition_score: 6,
            status: "CRUSHED".to_string(),
            pickup_date: None,
            user_id: None,
        };

        assert!(matches!(
            Vehicle::try_from(record),
            Err(AppError::UnknownStatus(_))
        ));
    }

    #[test]
    fn test_pickup_record_resolves_vehicle_reference() {
        let record = PickupRecord {
            id: "pk-1".to_string(),
            vehicle_id: None,
            pickup_date: "2026-09-10".to_string(),
            slot: Some("MORNING".to_string()),
            vehicle: Some(VehicleRecord {
                id: "veh-9".to_string(),
                make: "Maruti".to_string(),
                model: "Alto".to_string(),
                year: 2009,
                condition_score: 3,
                status: "IN_TRANSIT".to_string(),
                pickup_date: None,
                user_id: None,
            }),
            user: None,
        };

        let pickup = Pickup::try_from(record).unwrap();
        assert_eq!(pickup.vehicle_id, "veh-9");
        assert_eq!(pickup.slot, Some(PickupSlot::Morning));
    }

    #[test]
    fn test_pickup_record_without_vehicle_reference_fails() {
        let record = PickupRecord {
            id: "pk-1".to_string(),
            vehicle_id: None,
            pickup_date: "2026-09-10".to_string(),
            slot: None,
            vehicle: None,
            user: None,
        };

        assert!(Pickup::try_from(record).is_err());
    }

    #[test]
    fn test_store_user_accepts_mongo_style_id() {
        let user: StoreUser =
            serde_json::from_str(r#"{"_id":"abc123","name":"Ana","email":"a@b.com"}"#).unwrap();
        assert_eq!(user.id, "abc123");
    }
}
