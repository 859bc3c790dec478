//! Long-lived registry of declared models with inheritance resolution.
//!
//! The registry is populated incrementally as declarations are processed and
//! persists across document builds. Resolved schemas and display-name bindings
//! are build artifacts; [`ModelRegistry::reset`] clears them so every build
//! depends only on the current registrations.

use crate::error::{Error, Result};
use crate::metadata::{ModelDescriptor, ModelId, PropertyDescriptor};
use crate::type_resolver::{self, Schema};
use log::{debug, warn};
use std::collections::HashMap;

/// Registry of model descriptors and their resolved schemas
#[derive(Debug, Default)]
pub struct ModelRegistry {
    /// Registered descriptors in registration order
    models: Vec<ModelDescriptor>,
    /// Identity to position in `models`
    index: HashMap<ModelId, usize>,
    /// Memoized resolved schemas, cleared on reset
    schemas: HashMap<ModelId, Schema>,
    /// Display name to the identity most recently bound to it
    names: HashMap<String, ModelId>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a model descriptor.
    ///
    /// Registering the same identity twice is a no-op for schema content but
    /// updates the display-name mapping. A second identity binding an
    /// already-used display name is reported and the most recent binding wins.
    pub fn register(&mut self, model: ModelDescriptor) {
        let display_name = model.display_name().to_string();
        if let Some(bound) = self.names.get(&display_name) {
            if *bound != model.id {
                warn!(
                    "Display name collision: {} already bound to {}, rebinding to {}",
                    display_name, bound, model.id
                );
            }
        }
        self.names.insert(display_name, model.id.clone());

        if let Some(&position) = self.index.get(&model.id) {
            debug!("Model {} already registered, updating display name", model.id);
            self.models[position].name = model.name;
            return;
        }

        debug!("Registering model: {}", model.id);
        self.index.insert(model.id.clone(), self.models.len());
        self.models.push(model);
    }

    /// Whether an identity is registered
    pub fn contains(&self, id: &ModelId) -> bool {
        self.index.contains_key(id)
    }

    /// Registered identities in registration order
    pub fn ids(&self) -> Vec<ModelId> {
        self.models.iter().map(|m| m.id.clone()).collect()
    }

    /// Registered descriptors in registration order
    pub fn list(&self) -> impl Iterator<Item = &ModelDescriptor> {
        self.models.iter()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// The name a model's schema is keyed and referenced by.
    ///
    /// Unregistered identities fall back to their declared name so property
    /// references stay renderable.
    pub fn display_name(&self, id: &ModelId) -> String {
        match self.index.get(id) {
            Some(&position) => self.models[position].display_name().to_string(),
            None => id.as_str().to_string(),
        }
    }

    /// A `{$ref}` fragment for a registered model
    pub fn get_ref(&self, id: &ModelId) -> Result<Schema> {
        if !self.contains(id) {
            return Err(Error::ModelNotRegistered(id.to_string()));
        }
        Ok(Schema::reference(&self.display_name(id)))
    }

    /// Resolve (and memoize) the schema for a registered model.
    ///
    /// Models with a registered parent render as
    /// `{description?, allOf: [parent $ref, own-properties block]}`; the own
    /// block is appended only when it has at least one property. Ancestor
    /// properties live only in the ancestor's schema. Model-typed properties
    /// always render as one-hop `$ref`s, so cycles terminate.
    pub fn resolve_schema(&mut self, id: &ModelId) -> Result<Schema> {
        if let Some(schema) = self.schemas.get(id) {
            debug!("Schema for {} found in cache", id);
            return Ok(schema.clone());
        }

        let model = match self.index.get(id) {
            Some(&position) => self.models[position].clone(),
            None => return Err(Error::ModelNotRegistered(id.to_string())),
        };
        debug!("Resolving schema for model: {}", id);

        let mut properties = std::collections::BTreeMap::new();
        let mut required = Vec::new();
        for prop in &model.properties {
            properties.insert(prop.name.clone(), self.property_schema(prop));
            if prop.is_required() {
                required.push(prop.name.clone());
            }
        }

        let parent = model
            .parent
            .as_ref()
            .filter(|parent_id| self.contains(parent_id));

        let schema = match parent {
            Some(parent_id) => {
                let mut all_of = vec![Schema::reference(&self.display_name(parent_id))];
                if !properties.is_empty() {
                    all_of.push(Schema {
                        schema_type: Some("object".to_string()),
                        properties: Some(properties),
                        required: Some(required),
                        ..Default::default()
                    });
                }
                Schema {
                    description: model.description.clone(),
                    all_of: Some(all_of),
                    ..Default::default()
                }
            }
            None if properties.is_empty() => Schema {
                description: model.description.clone(),
                ..Default::default()
            },
            None => Schema {
                description: model.description.clone(),
                schema_type: Some("object".to_string()),
                properties: Some(properties),
                required: Some(required),
                ..Default::default()
            },
        };

        self.schemas.insert(id.clone(), schema.clone());
        Ok(schema)
    }

    /// Clear resolved schemas and name bindings, keeping registrations.
    ///
    /// Called before every document build so the output depends only on the
    /// current registry contents.
    pub fn reset(&mut self) {
        debug!("Resetting registry build state");
        self.schemas.clear();
        self.names.clear();
        for model in &self.models {
            self.names
                .insert(model.display_name().to_string(), model.id.clone());
        }
    }

    /// Drop all registrations and build state
    pub fn clear(&mut self) {
        self.models.clear();
        self.index.clear();
        self.schemas.clear();
        self.names.clear();
    }

    fn property_schema(&self, prop: &PropertyDescriptor) -> Schema {
        // An explicit schema short-circuits resolution entirely
        if let Some(schema) = &prop.schema {
            return schema.clone();
        }

        let mut schema = match &prop.type_ref {
            Some(ty) => type_resolver::resolve_named(ty, &|id| self.display_name(id)),
            None => Schema::string(),
        };

        // Descriptor metadata fills the slots resolution left unset
        if schema.format.is_none() {
            schema.format = prop.format.clone();
        }
        if schema.description.is_none() {
            schema.description = prop.description.clone();
        }
        if schema.example.is_none() {
            schema.example = prop.example.clone();
        }
        if !prop.enum_values.is_empty() {
            schema.enum_values = Some(prop.enum_values.clone());
        }
        schema
    }
}
