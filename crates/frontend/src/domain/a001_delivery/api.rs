use contracts::domain::a001_delivery::{Delivery, DeliveryId, DeliveryPatch, NewDeliveryDto};
use gloo_net::http::{Request, Response};

use crate::shared::api_utils::api_url;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Request(String),
    #[error("HTTP error: {0}")]
    Status(u16),
    #[error("Failed to parse response: {0}")]
    Decode(String),
    #[error("Failed to serialize request: {0}")]
    Encode(String),
}

fn collection_url() -> String {
    api_url("/api/deliveries")
}

fn item_url(id: &DeliveryId) -> String {
    api_url(&format!("/api/deliveries/{}", urlencoding::encode(id.as_str())))
}

fn ensure_ok(response: &Response) -> Result<(), ApiError> {
    if response.ok() {
        Ok(())
    } else {
        Err(ApiError::Status(response.status()))
    }
}

/// Получить все доставки
pub async fn fetch_deliveries() -> Result<Vec<Delivery>, ApiError> {
    let response = Request::get(&collection_url())
        .send()
        .await
        .map_err(|e| ApiError::Request(e.to_string()))?;
    ensure_ok(&response)?;

    response
        .json::<Vec<Delivery>>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

/// Создать доставку; сервис возвращает запись с присвоенным id
pub async fn create_delivery(dto: &NewDeliveryDto) -> Result<Delivery, ApiError> {
    let response = Request::post(&collection_url())
        .json(dto)
        .map_err(|e| ApiError::Encode(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Request(e.to_string()))?;
    ensure_ok(&response)?;

    response
        .json::<Delivery>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

/// Частичное обновление; тело ответа не используется
pub async fn update_delivery(id: &DeliveryId, patch: &DeliveryPatch) -> Result<(), ApiError> {
    let response = Request::put(&item_url(id))
        .json(patch)
        .map_err(|e| ApiError::Encode(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Request(e.to_string()))?;
    ensure_ok(&response)
}

/// Удалить доставку
pub async fn delete_delivery(id: &DeliveryId) -> Result<(), ApiError> {
    let response = Request::delete(&item_url(id))
        .send()
        .await
        .map_err(|e| ApiError::Request(e.to_string()))?;
    ensure_ok(&response)
}
