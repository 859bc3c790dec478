//! OpenAPI From Metadata - OpenAPI 3.0 documents from declarative API metadata.
//!
//! This library assembles complete OpenAPI 3.0 documents from metadata descriptors
//! for controllers, operations, parameters, headers, and data models. Callers
//! register descriptors programmatically and the library resolves types, renders
//! component schemas, and lays out the paths section.
//!
//! # Architecture
//!
//! The library is organized into several modules that work together:
//!
//! 1. [`metadata`] - Descriptor types for controllers, operations, models, and security
//! 2. [`type_resolver`] - Maps declared type references to OpenAPI schema fragments
//! 3. [`model_registry`] - Tracks registered models and renders their component schemas
//! 4. [`component_generator`] - Assembles the components section (schemas, security schemes)
//! 5. [`paths_processor`] - Assembles the paths section from controller metadata
//! 6. [`openapi_builder`] - Constructs the complete OpenAPI document
//! 7. [`serializer`] - Serializes the document to YAML or JSON
//!
//! # Example Usage
//!
//! ```
//! use openapi_from_metadata::{
//!     metadata::{
//!         ControllerDescriptor, HttpMethod, ModelDescriptor, OperationDescriptor,
//!         PropertyDescriptor, ResponseDescriptor, TypeRef,
//!     },
//!     model_registry::ModelRegistry,
//!     openapi_builder::DocumentBuilder,
//!     serializer::serialize_yaml,
//! };
//!
//! // Register data models
//! let mut registry = ModelRegistry::new();
//! registry.register(
//!     ModelDescriptor::new("User")
//!         .with_property(PropertyDescriptor::new("id", TypeRef::string()).required())
//!         .with_property(PropertyDescriptor::new("name", TypeRef::string())),
//! );
//!
//! // Describe controllers and operations
//! let controllers = vec![ControllerDescriptor::new("UserController", "/users")
//!     .with_tag("User Management")
//!     .with_operation(
//!         OperationDescriptor::new(HttpMethod::Get, "/", "find_all").with_response(
//!             200,
//!             ResponseDescriptor::new("All users")
//!                 .with_content_type("application/json")
//!                 .with_type(TypeRef::array_of(TypeRef::model("User"))),
//!         ),
//!     )];
//!
//! // Build and serialize the document
//! let doc = DocumentBuilder::new()
//!     .with_info("User API", "1.0.0", None)
//!     .build(&mut registry, &controllers)
//!     .unwrap();
//! let yaml = serialize_yaml(&doc).unwrap();
//! assert!(yaml.contains("/users"));
//! ```

pub mod component_generator;
pub mod error;
pub mod metadata;
pub mod model_registry;
pub mod openapi_builder;
pub mod paths_processor;
pub mod serializer;
pub mod type_resolver;

pub use error::{Error, Result};
