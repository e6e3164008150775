//! HTTP DTOs for the program catalog and enrollments.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ProgramId, Timestamp};
use crate::domain::program::{Program, ProgramDraft, ProgramLevel, ProgramUpdate};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProgramResponse {
    pub id: ProgramId,
    pub title: String,
    pub description: Option<String>,
    pub level: ProgramLevel,
    pub duration_weeks: i32,
    pub price_cents: i64,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Program> for ProgramResponse {
    fn from(program: Program) -> Self {
        Self {
            id: program.id,
            title: program.title,
            description: program.description,
            level: program.level,
            duration_weeks: program.duration_weeks,
            price_cents: program.price.cents(),
            is_active: program.is_active,
            created_at: program.created_at,
            updated_at: program.updated_at,
        }
    }
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateProgramRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub level: ProgramLevel,
    pub duration_weeks: i32,
    pub price_cents: i64,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl From<CreateProgramRequest> for ProgramDraft {
    fn from(request: CreateProgramRequest) -> Self {
        Self {
            title: request.title,
            description: request.description,
            level: request.level,
            duration_weeks: request.duration_weeks,
            price_cents: request.price_cents,
            is_active: request.is_active,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateProgramRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub level: Option<ProgramLevel>,
    pub duration_weeks: Option<i32>,
    pub price_cents: Option<i64>,
    pub is_active: Option<bool>,
}

impl From<UpdateProgramRequest> for ProgramUpdate {
    fn from(request: UpdateProgramRequest) -> Self {
        Self {
            title: request.title,
            description: request.description,
            level: request.level,
            duration_weeks: request.duration_weeks,
            price_cents: request.price_cents,
            is_active: request.is_active,
        }
    }
}
