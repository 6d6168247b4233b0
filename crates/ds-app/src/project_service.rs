//! Model file loading and saving.

use std::path::Path;

use ds_project::ModelFile;

use crate::error::{AppError, AppResult};

/// Load and validate a model file (YAML, or JSON by extension).
pub fn load_model(path: &Path) -> AppResult<ModelFile> {
    if !path.exists() {
        return Err(AppError::ModelFileRead {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
        });
    }
    Ok(ds_project::load(path)?)
}

/// Validate and save a model file as YAML.
pub fn save_model(path: &Path, model: &ModelFile) -> AppResult<()> {
    ds_project::save_yaml(path, model)?;
    Ok(())
}

/// Run schema validation and a full component build without simulating.
pub fn validate_model(model: &ModelFile) -> AppResult<()> {
    ds_project::validate_model_file(model)
        .map_err(|e| AppError::Validation(e.to_string()))?;
    crate::compile::compile_model(model)?;
    Ok(())
}
