//! Weekly grid editing: plain CRUD by id plus a full reload of the station grid.

use tracing::{debug, info};

use crate::{
    dto::schedule::{CreatedResponse, ScheduleEntryRequest, ScheduleEntryView, StatusResponse},
    error::ServiceError,
    state::{
        ScheduleState,
        schedule::{ScheduleEntryInput, station_grid},
    },
};

fn require_input(request: ScheduleEntryRequest) -> Result<ScheduleEntryInput, ServiceError> {
    request.into_input().ok_or_else(|| {
        ServiceError::InvalidInput("horario, nome and dias are required".into())
    })
}

/// Every slot in id order.
pub async fn list_entries(state: &ScheduleState) -> Result<Vec<ScheduleEntryView>, ServiceError> {
    let entries = state.store().list_entries().await?;
    Ok(entries.into_iter().map(Into::into).collect())
}

pub async fn create_entry(
    state: &ScheduleState,
    request: ScheduleEntryRequest,
) -> Result<CreatedResponse, ServiceError> {
    let input = require_input(request)?;
    let id = state.store().insert_entry(input).await?;
    info!(id, "schedule slot created");
    Ok(CreatedResponse::new(id))
}

/// Overwrite a slot. Unknown ids are ignored.
pub async fn update_entry(
    state: &ScheduleState,
    id: i64,
    request: ScheduleEntryRequest,
) -> Result<StatusResponse, ServiceError> {
    let input = require_input(request)?;
    if state.store().update_entry(id, input).await? {
        info!(id, "schedule slot updated");
    } else {
        debug!(id, "update of unknown schedule slot ignored");
    }
    Ok(StatusResponse::success())
}

pub async fn delete_entry(state: &ScheduleState, id: i64) -> Result<StatusResponse, ServiceError> {
    if state.store().delete_entry(id).await? {
        info!(id, "schedule slot deleted");
    } else {
        debug!(id, "delete of unknown schedule slot ignored");
    }
    Ok(StatusResponse::success())
}

/// Replace the whole grid with the station's built-in weekly schedule.
pub async fn reseed(state: &ScheduleState) -> Result<usize, ServiceError> {
    let written = state.store().replace_all(station_grid()).await?;
    info!(written, "schedule grid reloaded");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::dao::sqlite::{SqliteDatabase, SqliteScheduleStore};

    async fn schedule() -> ScheduleState {
        let store = SqliteScheduleStore::new(SqliteDatabase::open_in_memory().unwrap())
            .await
            .unwrap();
        ScheduleState::new(Arc::new(store))
    }

    fn request(horario: Option<&str>, nome: &str, dias: &str) -> ScheduleEntryRequest {
        ScheduleEntryRequest {
            horario: horario.map(Into::into),
            nome: Some(nome.into()),
            dias: Some(dias.parse().unwrap()),
            categoria: None,
        }
    }

    #[tokio::test]
    async fn create_then_update_then_delete() {
        let state = schedule().await;
        let created = create_entry(&state, request(Some("19h"), "De cara com Moisés Cambuy", "SEGUNDA"))
            .await
            .unwrap();
        assert_eq!(created.status, "sucesso");

        update_entry(
            &state,
            created.id,
            request(Some("20h"), "De cara com Moisés Cambuy", "SEGUNDA,SEXTA"),
        )
        .await
        .unwrap();
        let listed = list_entries(&state).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].horario, "20h");
        assert_eq!(listed[0].dias.to_string(), "SEGUNDA,SEXTA");
        assert_eq!(listed[0].categoria, "");

        delete_entry(&state, created.id).await.unwrap();
        assert!(list_entries(&state).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_required_field_is_invalid_input() {
        let state = schedule().await;
        let result = create_entry(&state, request(None, "Sem horário", "DOMINGO")).await;
        assert!(matches!(result, Err(ServiceError::InvalidInput(_))));
        assert!(list_entries(&state).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_ids_succeed_silently() {
        let state = schedule().await;
        update_entry(&state, 77, request(Some("?h"), "Fantasma", "SEXTA"))
            .await
            .unwrap();
        delete_entry(&state, 77).await.unwrap();
        assert!(list_entries(&state).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn reseed_replaces_edits_with_station_grid() {
        let state = schedule().await;
        create_entry(&state, request(Some("01h"), "Teste", "DOMINGO"))
            .await
            .unwrap();

        let written = reseed(&state).await.unwrap();
        let listed = list_entries(&state).await.unwrap();
        assert_eq!(listed.len(), written);
        assert_eq!(written, station_grid().len());
        assert!(listed.iter().all(|entry| entry.nome != "Teste"));
    }
}
