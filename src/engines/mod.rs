/*!
 * Translation engine clients.
 *
 * The translation engine is an opaque remote collaborator: it accepts SQL
 * text in one dialect and returns SQL text in another. This module contains
 * the client seam and its implementations:
 * - Remote: HTTP client for a hosted translation service
 * - Mock: in-process engine with scripted behaviors, for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::app_config::{TranslationConfig, TranslationEngineKind};
use crate::errors::EngineError;

/// Request handed to a translation engine for one file
#[derive(Debug, Clone)]
pub struct TranslationRequest {
    /// File name, used by the service for job bookkeeping
    pub file_name: String,

    /// Preprocessed SQL text to translate
    pub text: String,

    /// Source SQL dialect identifier
    pub source_dialect: String,

    /// Target SQL dialect identifier
    pub target_dialect: String,
}

/// Translated SQL text returned by an engine
#[derive(Debug, Clone)]
pub struct TranslationResponse {
    /// Translated file text
    pub text: String,
}

/// Common trait for all translation engine clients
///
/// This trait defines the interface that all engine implementations must
/// follow, allowing them to be used interchangeably by the controller.
#[async_trait]
pub trait TranslationEngine: Send + Sync + Debug {
    /// Translate one file's text
    ///
    /// # Arguments
    /// * `request` - The file text and dialect pair to translate
    ///
    /// # Returns
    /// * `Result<TranslationResponse, EngineError>` - The translated text or an error
    async fn translate(&self, request: TranslationRequest) -> Result<TranslationResponse, EngineError>;

    /// Test the connection to the engine
    ///
    /// # Returns
    /// * `Result<(), EngineError>` - Ok if the engine is reachable, or an error
    async fn test_connection(&self) -> Result<(), EngineError>;

    /// Short engine identifier for logging
    fn name(&self) -> &'static str;
}

/// Build the engine client selected by the translation configuration
pub fn from_config(config: &TranslationConfig) -> Result<Box<dyn TranslationEngine>, EngineError> {
    match config.engine {
        TranslationEngineKind::Remote => Ok(Box::new(remote::RemoteEngine::new(
            &config.endpoint,
            &config.api_key,
            config.timeout_secs,
        )?)),
        TranslationEngineKind::Mock => Ok(Box::new(mock::MockEngine::identity())),
    }
}

pub mod mock;
pub mod remote;
