//! DTOs of the program overlay controller and the public overlay page.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::state::overlay::{ActiveOverlay, OverlayEntry, OverlayEntryInput, OverlayEntryPatch};

/// Stored overlay entry as listed in the admin panel.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OverlayEntryView {
    pub id: i64,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "subtitulo")]
    pub subtitle: String,
    /// Location or live state line.
    #[serde(rename = "estado")]
    pub location: String,
    #[serde(rename = "ativo")]
    pub active: bool,
    #[serde(rename = "visivel")]
    pub visible: bool,
}

impl From<OverlayEntry> for OverlayEntryView {
    fn from(value: OverlayEntry) -> Self {
        Self {
            id: value.id,
            title: value.title,
            subtitle: value.subtitle,
            location: value.location,
            active: value.active,
            visible: value.visible,
        }
    }
}

/// What the on-air overlay renders; blank and hidden when nothing is active.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ActiveOverlayView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "subtitulo")]
    pub subtitle: String,
    #[serde(rename = "estado")]
    pub location: String,
    #[serde(rename = "visivel")]
    pub visible: bool,
}

impl From<ActiveOverlay> for ActiveOverlayView {
    fn from(value: ActiveOverlay) -> Self {
        Self {
            id: value.id,
            title: value.title,
            subtitle: value.subtitle,
            location: value.location,
            visible: value.visible,
        }
    }
}

/// Admin panel listing: every entry newest first plus the active entry's visibility.
#[derive(Debug, Serialize, ToSchema)]
pub struct OverlayListResponse {
    pub programas: Vec<OverlayEntryView>,
    /// `false` when no entry is active.
    pub visivel: bool,
}

/// Form posted to `/add`.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct NewOverlayEntryForm {
    #[validate(required)]
    pub titulo: Option<String>,
    #[serde(default)]
    pub subtitulo: Option<String>,
    #[serde(default)]
    pub estado: Option<String>,
}

impl NewOverlayEntryForm {
    /// Convert a validated form; optional lines default to empty text.
    pub fn into_input(self) -> OverlayEntryInput {
        OverlayEntryInput {
            title: self.titulo.unwrap_or_default(),
            subtitle: self.subtitulo.unwrap_or_default(),
            location: self.estado.unwrap_or_default(),
        }
    }
}

/// Form posted to `/editar`; fields left out keep their stored value.
#[derive(Debug, Deserialize, ToSchema)]
pub struct EditOverlayEntryForm {
    pub id: i64,
    #[serde(default)]
    pub titulo: Option<String>,
    #[serde(default)]
    pub subtitulo: Option<String>,
    #[serde(default)]
    pub estado: Option<String>,
}

impl From<EditOverlayEntryForm> for (i64, OverlayEntryPatch) {
    fn from(value: EditOverlayEntryForm) -> Self {
        (
            value.id,
            OverlayEntryPatch {
                title: value.titulo,
                subtitle: value.subtitulo,
                location: value.estado,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_active_view_matches_overlay_page_contract() {
        let json = serde_json::to_value(ActiveOverlayView::from(ActiveOverlay::default())).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"visivel": false, "titulo": "", "subtitulo": "", "estado": ""})
        );
    }

    #[test]
    fn add_form_requires_a_title() {
        let form = NewOverlayEntryForm {
            titulo: None,
            subtitulo: Some("Irecê".into()),
            estado: None,
        };
        assert!(form.validate().is_err());

        let form = NewOverlayEntryForm {
            titulo: Some("Sessão da Câmara".into()),
            subtitulo: None,
            estado: None,
        };
        assert!(form.validate().is_ok());
        let input = form.into_input();
        assert_eq!(input.subtitle, "");
    }
}
