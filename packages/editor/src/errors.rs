//! Error types for the editor

use storeblocks_model::ModelError;
use thiserror::Error;

use crate::storage::StoreError;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Mutation error: {0}")]
    Mutation(#[from] crate::mutations::MutationError),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Property error: {0}")]
    Property(#[from] crate::properties::PropertyError),

    #[error("No element is selected")]
    NothingSelected,
}
