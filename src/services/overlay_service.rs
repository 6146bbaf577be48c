//! Program overlay operations: entry CRUD, the single active entry and its visibility.

use tracing::{debug, info};

use crate::{
    dto::overlay::{
        ActiveOverlayView, EditOverlayEntryForm, NewOverlayEntryForm, OverlayEntryView,
        OverlayListResponse,
    },
    error::ServiceError,
    state::{
        OverlayState,
        overlay::{ActiveOverlay, OverlayEntryPatch},
    },
};

/// Every entry newest first, plus the active entry's visibility flag.
pub async fn list_entries(state: &OverlayState) -> Result<OverlayListResponse, ServiceError> {
    let entries = state.store().list_entries().await?;
    let visivel = entries
        .iter()
        .find(|entry| entry.active)
        .is_some_and(|entry| entry.visible);

    Ok(OverlayListResponse {
        programas: entries.into_iter().map(Into::into).collect(),
        visivel,
    })
}

pub async fn get_entry(state: &OverlayState, id: i64) -> Result<OverlayEntryView, ServiceError> {
    let Some(entry) = state.store().find_entry(id).await? else {
        return Err(ServiceError::NotFound(format!("program `{id}` not found")));
    };
    Ok(entry.into())
}

/// Store a new inactive, visible entry from a validated form.
pub async fn add_entry(state: &OverlayState, form: NewOverlayEntryForm) -> Result<i64, ServiceError> {
    let id = state.store().insert_entry(form.into_input()).await?;
    info!(id, "overlay program saved");
    Ok(id)
}

/// Overwrite the text fields present in the form. Unknown ids are ignored.
pub async fn edit_entry(state: &OverlayState, form: EditOverlayEntryForm) -> Result<(), ServiceError> {
    let (id, patch): (i64, OverlayEntryPatch) = form.into();
    if state.store().update_entry(id, patch).await? {
        info!(id, "overlay program updated");
    } else {
        debug!(id, "edit of unknown overlay program ignored");
    }
    Ok(())
}

/// Delete an entry. Removing the active entry leaves the overlay blank.
pub async fn delete_entry(state: &OverlayState, id: i64) -> Result<(), ServiceError> {
    if state.store().delete_entry(id).await? {
        info!(id, "overlay program deleted");
    } else {
        debug!(id, "delete of unknown overlay program ignored");
    }
    Ok(())
}

/// Make `id` the only active entry. An unknown id leaves nothing active.
pub async fn select_active(state: &OverlayState, id: i64) -> Result<(), ServiceError> {
    if state.store().select_active(id).await? {
        info!(id, "overlay program on air");
    } else {
        debug!(id, "selected unknown overlay program; no entry is active");
    }
    Ok(())
}

/// Show or hide the active entry. No-op when nothing is active.
pub async fn toggle_visibility(state: &OverlayState) -> Result<(), ServiceError> {
    match state.store().toggle_visibility().await? {
        Some(visible) => info!(visible, "overlay visibility toggled"),
        None => debug!("visibility toggle without active program ignored"),
    }
    Ok(())
}

/// The entry the public overlay should render, or the blank hidden card.
pub async fn get_active(state: &OverlayState) -> Result<ActiveOverlayView, ServiceError> {
    let active = state.store().find_active().await?;
    Ok(ActiveOverlay::from(active).into())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::dao::sqlite::{SqliteDatabase, SqliteOverlayStore};

    async fn overlay() -> OverlayState {
        let store = SqliteOverlayStore::new(SqliteDatabase::open_in_memory().unwrap())
            .await
            .unwrap();
        OverlayState::new(Arc::new(store))
    }

    fn form(title: &str) -> NewOverlayEntryForm {
        NewOverlayEntryForm {
            titulo: Some(title.into()),
            subtitulo: Some("Ao vivo".into()),
            estado: Some("ONLINE".into()),
        }
    }

    #[tokio::test]
    async fn first_boot_shows_station_card() {
        let state = overlay().await;
        let active = get_active(&state).await.unwrap();
        assert_eq!(active.title, "BARRIGUDA WEB TV");
        assert!(active.visible);

        let listing = list_entries(&state).await.unwrap();
        assert_eq!(listing.programas.len(), 1);
        assert!(listing.visivel);
    }

    #[tokio::test]
    async fn selecting_unknown_id_blanks_the_overlay() {
        let state = overlay().await;
        select_active(&state, 5).await.unwrap();

        let active = get_active(&state).await.unwrap();
        assert_eq!(active.id, None);
        assert!(!active.visible);
        assert!(active.title.is_empty());
        assert!(!list_entries(&state).await.unwrap().visivel);
    }

    #[tokio::test]
    async fn toggling_twice_restores_visibility() {
        let state = overlay().await;
        let id = add_entry(&state, form("Vozes Regionais")).await.unwrap();
        select_active(&state, id).await.unwrap();

        toggle_visibility(&state).await.unwrap();
        assert!(!get_active(&state).await.unwrap().visible);
        toggle_visibility(&state).await.unwrap();
        assert!(get_active(&state).await.unwrap().visible);
    }

    #[tokio::test]
    async fn concurrent_selections_leave_one_active_entry() {
        let state = overlay().await;
        let mut ids = Vec::new();
        for title in ["Salve Maria", "Poder da Oração", "Helicóptero Musical"] {
            ids.push(add_entry(&state, form(title)).await.unwrap());
        }

        let tasks: Vec<_> = ids
            .iter()
            .copied()
            .map(|id| {
                let state = state.clone();
                tokio::spawn(async move { select_active(&state, id).await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let active: Vec<_> = list_entries(&state)
            .await
            .unwrap()
            .programas
            .into_iter()
            .filter(|entry| entry.active)
            .collect();
        assert_eq!(active.len(), 1);
        assert!(ids.contains(&active[0].id));
    }

    #[tokio::test]
    async fn edit_and_delete_unknown_ids_are_silent() {
        let state = overlay().await;
        let edit = EditOverlayEntryForm {
            id: 404,
            titulo: Some("Nada".into()),
            subtitulo: None,
            estado: None,
        };
        edit_entry(&state, edit).await.unwrap();
        delete_entry(&state, 404).await.unwrap();
        assert!(matches!(
            get_entry(&state, 404).await,
            Err(ServiceError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn edit_updates_only_sent_fields() {
        let state = overlay().await;
        let id = add_entry(&state, form("A voz da caatinga")).await.unwrap();
        let edit = EditOverlayEntryForm {
            id,
            titulo: None,
            subtitulo: Some("Rádio Barriguda".into()),
            estado: None,
        };
        edit_entry(&state, edit).await.unwrap();

        let entry = get_entry(&state, id).await.unwrap();
        assert_eq!(entry.title, "A voz da caatinga");
        assert_eq!(entry.subtitle, "Rádio Barriguda");
        assert!(!entry.active);
    }
}
