//! Top-level OpenAPI 3.0 document assembly.
//!
//! The builder collects document-level metadata and then drives the paths
//! processor and component generator over the registered controllers and
//! models, producing a complete document in one pass.

use crate::component_generator::{ComponentGenerator, Components};
use crate::error::Result;
use crate::metadata::ControllerDescriptor;
use crate::model_registry::ModelRegistry;
use crate::paths_processor::{Paths, PathsProcessor};
use log::debug;
use serde::{Deserialize, Serialize};

/// OpenAPI Info object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Info {
    pub title: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Default for Info {
    fn default() -> Self {
        Info {
            title: "API Documentation".to_string(),
            version: "1.0.0".to_string(),
            description: None,
        }
    }
}

/// OpenAPI Server object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Server {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A complete OpenAPI 3.0 document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenApiDocument {
    pub openapi: String,
    pub info: Info,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub servers: Vec<Server>,
    pub paths: Paths,
    pub components: Components,
}

/// Builder for [`OpenApiDocument`]
#[derive(Debug, Clone, Default)]
pub struct DocumentBuilder {
    info: Info,
    servers: Vec<Server>,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the document title, version and optional description
    pub fn with_info(
        mut self,
        title: impl Into<String>,
        version: impl Into<String>,
        description: Option<String>,
    ) -> Self {
        self.info = Info {
            title: title.into(),
            version: version.into(),
            description,
        };
        self
    }

    /// Append a server entry
    pub fn with_server(mut self, url: impl Into<String>, description: Option<String>) -> Self {
        self.servers.push(Server {
            url: url.into(),
            description,
        });
        self
    }

    /// Assemble the document from the registered models and controllers.
    ///
    /// Building is repeatable: component generation resets the registry's
    /// derived state first, so calling this twice over the same inputs
    /// produces identical documents.
    pub fn build(
        &self,
        registry: &mut ModelRegistry,
        controllers: &[ControllerDescriptor],
    ) -> Result<OpenApiDocument> {
        debug!(
            "Building OpenAPI document from {} controllers and {} models",
            controllers.len(),
            registry.len()
        );
        let paths = PathsProcessor::process(registry, controllers);
        let components = ComponentGenerator::generate(registry, controllers)?;
        Ok(OpenApiDocument {
            openapi: "3.0.0".to_string(),
            info: self.info.clone(),
            servers: self.servers.clone(),
            paths,
            components,
        })
    }
}
