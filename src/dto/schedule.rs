//! DTOs of the weekly schedule editor.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::state::schedule::{ScheduleEntry, ScheduleEntryInput, Weekdays};

/// Program slot as stored, with the weekday set flattened to comma-joined text.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ScheduleEntryView {
    pub id: i64,
    pub horario: String,
    pub nome: String,
    #[schema(value_type = String, example = "SEGUNDA,QUARTA")]
    pub dias: Weekdays,
    pub categoria: String,
}

impl From<ScheduleEntry> for ScheduleEntryView {
    fn from(value: ScheduleEntry) -> Self {
        Self {
            id: value.id,
            horario: value.time,
            nome: value.name,
            dias: value.weekdays,
            categoria: value.category,
        }
    }
}

/// Body of create and update calls.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ScheduleEntryRequest {
    #[validate(required)]
    pub horario: Option<String>,
    #[validate(required)]
    pub nome: Option<String>,
    #[validate(required)]
    #[schema(value_type = Option<String>, example = "SEGUNDA,QUARTA")]
    pub dias: Option<Weekdays>,
    #[serde(default)]
    pub categoria: Option<String>,
}

impl ScheduleEntryRequest {
    /// Convert a validated request; `None` is returned only if a required field is missing.
    pub fn into_input(self) -> Option<ScheduleEntryInput> {
        Some(ScheduleEntryInput {
            time: self.horario?,
            name: self.nome?,
            weekdays: self.dias?,
            category: self.categoria.unwrap_or_default(),
        })
    }
}

/// Acknowledgement of schedule mutations.
#[derive(Debug, Serialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn success() -> Self {
        Self {
            status: "sucesso".into(),
        }
    }
}

/// Acknowledgement of a create call, carrying the new id.
#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedResponse {
    pub status: String,
    pub id: i64,
}

impl CreatedResponse {
    pub fn new(id: i64) -> Self {
        Self {
            status: "sucesso".into(),
            id,
        }
    }
}
