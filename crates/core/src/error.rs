use crate::types::DbId;
use crate::validator::FieldErrors;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed on {} field(s)", .0.len())]
    ValidationFailed(FieldErrors),

    #[error("Edit conflict: {entity} with id {id} was modified or removed")]
    EditConflict { entity: &'static str, id: DbId },
}
