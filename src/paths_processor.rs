//! Assembly of the `paths` section: one operation object per controller
//! operation, merging path segments, tags, headers, parameters, security,
//! request bodies, and responses.

use crate::metadata::{
    ControllerDescriptor, HeaderDescriptor, ParameterDescriptor, ParameterLocation,
    ResponseDescriptor, SecuritySchemeType, TypeRef,
};
use crate::model_registry::ModelRegistry;
use crate::type_resolver::{self, Schema};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Paths map: path string to lower-case http method to operation
pub type Paths = BTreeMap<String, BTreeMap<String, OperationObject>>;

/// One security requirement: scheme name to scope list
pub type SecurityRequirement = BTreeMap<String, Vec<String>>;

/// OpenAPI Operation object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OperationObject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "operationId")]
    pub operation_id: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub deprecated: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ParameterObject>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub security: Vec<SecurityRequirement>,
    #[serde(rename = "requestBody", skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBodyObject>,
    pub responses: BTreeMap<String, ResponseObject>,
}

/// OpenAPI Parameter object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterObject {
    pub name: String,
    #[serde(rename = "in")]
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub required: bool,
    pub schema: Schema,
}

/// OpenAPI RequestBody object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestBodyObject {
    /// Content type to media type, a single entry per body
    pub content: BTreeMap<String, MediaTypeObject>,
}

/// OpenAPI MediaType object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaTypeObject {
    pub schema: Schema,
}

/// OpenAPI Response object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseObject {
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<BTreeMap<String, MediaTypeObject>>,
}

/// Processor for the `paths` section
pub struct PathsProcessor;

impl PathsProcessor {
    /// Build the paths map from controller metadata.
    ///
    /// Model references in parameter, body, and response schemas follow the
    /// registry's display-name bindings so they line up with the component
    /// schema keys. A single linear pass per controller/operation pair; the
    /// only shared state is the accumulator map, so multiple operations may
    /// land on the same path under different methods.
    pub fn process(registry: &ModelRegistry, controllers: &[ControllerDescriptor]) -> Paths {
        let mut paths = Paths::new();

        for controller in controllers {
            for operation in &controller.operations {
                let full_path = combine_paths(&controller.base_path, &operation.path);
                debug!(
                    "Processing operation {} {}",
                    operation.method.as_str(),
                    full_path
                );

                let mut headers: Vec<&HeaderDescriptor> = controller.headers.iter().collect();
                headers.extend(operation.headers.iter());
                let (security_headers, plain_headers): (Vec<_>, Vec<_>) = headers
                    .into_iter()
                    .partition(|h| h.security_scheme.is_some());

                let mut parameters = Self::process_parameters(registry, &operation.parameters);
                parameters.extend(plain_headers.into_iter().map(Self::convert_header));

                let operation_object = OperationObject {
                    summary: operation.summary.clone(),
                    description: operation.description.clone(),
                    operation_id: operation
                        .operation_id
                        .clone()
                        .unwrap_or_else(|| format!("{}_{}", controller.name, operation.name)),
                    deprecated: operation.deprecated,
                    tags: Self::merge_tags(&controller.tags, &operation.tags),
                    parameters,
                    security: Self::process_security(&security_headers),
                    request_body: Self::process_request_body(registry, &operation.parameters),
                    responses: operation
                        .responses
                        .iter()
                        .map(|(status, response)| {
                            (status.clone(), Self::convert_response(registry, response))
                        })
                        .collect(),
                };

                paths
                    .entry(full_path)
                    .or_default()
                    .insert(operation.method.as_str().to_string(), operation_object);
            }
        }

        paths
    }

    /// De-duplicated union of controller and operation tags, controller
    /// tags first, first-seen order preserved
    fn merge_tags(controller_tags: &[String], operation_tags: &[String]) -> Vec<String> {
        let mut tags = Vec::new();
        for tag in controller_tags.iter().chain(operation_tags.iter()) {
            if !tags.contains(tag) {
                tags.push(tag.clone());
            }
        }
        tags
    }

    /// Non-body declared parameters rendered as parameter objects
    fn process_parameters(
        registry: &ModelRegistry,
        parameters: &[ParameterDescriptor],
    ) -> Vec<ParameterObject> {
        parameters
            .iter()
            .filter(|p| p.location != ParameterLocation::Body)
            .map(|p| ParameterObject {
                name: p.name.clone(),
                location: p.location.as_str().to_string(),
                description: p.description.clone(),
                required: p.required,
                schema: Self::resolve_param_schema(registry, p),
            })
            .collect()
    }

    /// An explicit schema wins over the declared type; an unresolvable type
    /// falls back to a string schema
    fn resolve_param_schema(registry: &ModelRegistry, param: &ParameterDescriptor) -> Schema {
        match &param.schema {
            Some(schema) => schema.clone(),
            None => Self::resolve_type(registry, param.type_ref.as_ref()),
        }
    }

    /// Type resolution with the registry's display-name bindings applied to
    /// model references
    fn resolve_type(registry: &ModelRegistry, type_ref: Option<&TypeRef>) -> Schema {
        match type_ref {
            Some(ty) => type_resolver::resolve_named(ty, &|id| registry.display_name(id)),
            None => Schema::string(),
        }
    }

    /// A plain header rendered as an additional header-location parameter
    fn convert_header(header: &HeaderDescriptor) -> ParameterObject {
        ParameterObject {
            name: header.name.clone(),
            location: "header".to_string(),
            description: header.description.clone(),
            required: header.required,
            schema: Schema::string(),
        }
    }

    /// One requirement entry per distinct scheme name; scopes are the OAuth
    /// scope-key list for oauth2 schemes, otherwise empty
    fn process_security(headers: &[&HeaderDescriptor]) -> Vec<SecurityRequirement> {
        let mut names: Vec<String> = Vec::new();
        let mut scopes_by_name: BTreeMap<String, Vec<String>> = BTreeMap::new();

        for header in headers {
            if let Some(scheme) = &header.security_scheme {
                let scopes = match (&scheme.scheme_type, &scheme.flows) {
                    (SecuritySchemeType::OAuth2, Some(flows)) => {
                        let mut keys = Vec::new();
                        let configs = [
                            &flows.implicit,
                            &flows.password,
                            &flows.client_credentials,
                            &flows.authorization_code,
                        ];
                        for config in configs.into_iter().flatten() {
                            for key in config.scopes.keys() {
                                if !keys.contains(key) {
                                    keys.push(key.clone());
                                }
                            }
                        }
                        keys
                    }
                    _ => Vec::new(),
                };
                if !names.contains(&scheme.name) {
                    names.push(scheme.name.clone());
                }
                scopes_by_name.insert(scheme.name.clone(), scopes);
            }
        }

        names
            .into_iter()
            .map(|name| {
                let scopes = scopes_by_name.remove(&name).unwrap_or_default();
                let mut requirement = SecurityRequirement::new();
                requirement.insert(name, scopes);
                requirement
            })
            .collect()
    }

    /// Collect body-location parameters into a request body.
    ///
    /// A single body parameter contributes its schema directly; multiple body
    /// parameters are synthesized into one object keyed by parameter name.
    fn process_request_body(
        registry: &ModelRegistry,
        parameters: &[ParameterDescriptor],
    ) -> Option<RequestBodyObject> {
        let body_params: Vec<&ParameterDescriptor> = parameters
            .iter()
            .filter(|p| p.location == ParameterLocation::Body)
            .collect();
        if body_params.is_empty() {
            return None;
        }

        let schema = if body_params.len() == 1 {
            Self::resolve_param_schema(registry, body_params[0])
        } else {
            let properties: BTreeMap<String, Schema> = body_params
                .iter()
                .map(|p| (p.name.clone(), Self::resolve_param_schema(registry, p)))
                .collect();
            Schema {
                schema_type: Some("object".to_string()),
                properties: Some(properties),
                ..Default::default()
            }
        };

        let content_type = body_params[0]
            .content_type
            .clone()
            .unwrap_or_else(|| "application/json".to_string());
        let mut content = BTreeMap::new();
        content.insert(content_type, MediaTypeObject { schema });
        Some(RequestBodyObject { content })
    }

    /// Content is rendered only when the response declares a content type
    fn convert_response(registry: &ModelRegistry, response: &ResponseDescriptor) -> ResponseObject {
        let content = response.content_type.as_ref().map(|content_type| {
            let schema = match (&response.schema, &response.type_ref) {
                (Some(schema), _) => schema.clone(),
                (None, Some(ty)) => {
                    type_resolver::resolve_named(ty, &|id| registry.display_name(id))
                }
                (None, None) => Schema::object(),
            };
            let mut content = BTreeMap::new();
            content.insert(content_type.clone(), MediaTypeObject { schema });
            content
        });
        ResponseObject {
            description: response.description.clone(),
            content,
        }
    }
}

/// Combine a controller base path and an operation path with exactly one
/// separating slash; an empty combination yields `/`
pub fn combine_paths(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    match (base.is_empty(), path.is_empty()) {
        (true, true) => "/".to_string(),
        (true, false) => format!("/{}", path),
        (false, true) => base.to_string(),
        (false, false) => format!("{}/{}", base, path),
    }
}
