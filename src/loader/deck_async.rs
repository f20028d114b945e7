//! Async deck loading
//!
//! For UI hosts that already run a tokio runtime and must not block on file
//! reads.

use crate::loader::deck::{DeckDefinition, DeckLoader};
use crate::Result;
use std::path::Path;

/// Load a deck definition without blocking the runtime
pub async fn load_from_file_async(path: &Path) -> Result<DeckDefinition> {
    let content = tokio::fs::read_to_string(path).await?;
    DeckLoader::parse_for_path(path, &content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let result = load_from_file_async(Path::new("no/such/deck.dck")).await;
        assert!(matches!(result, Err(crate::PlaymatError::IoError(_))));
    }
}
