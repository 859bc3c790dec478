//! Descriptor types consumed by the document generation engine.
//!
//! Callers construct these values explicitly (directly or through the `with_*`
//! builders) and hand them to the engine. The engine never inspects live type
//! information; everything it knows about an API comes from these snapshots.

use crate::type_resolver::Schema;
use std::collections::BTreeMap;
use std::fmt;

/// Opaque identity of a declared model, one per declared type.
///
/// The wrapped string is the declared type name; it doubles as the default
/// display name unless the model overrides it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ModelId(String);

impl ModelId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ModelId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for ModelId {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

/// Primitive value kinds with fixed schema fragments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    String,
    Number,
    Boolean,
    DateTime,
    Binary,
}

/// Declared shape of a value, resolved to a schema fragment by the type resolver
#[derive(Debug, Clone, PartialEq)]
pub enum TypeRef {
    /// A primitive kind with a fixed fragment
    Primitive(PrimitiveKind),
    /// An array; a missing item type falls back to string items
    Array(Option<Box<TypeRef>>),
    /// A reference to a registered model, rendered as a `$ref`
    Model(ModelId),
    /// An anonymous object with named fields
    InlineObject(Vec<(String, TypeRef)>),
}

impl TypeRef {
    pub fn string() -> Self {
        TypeRef::Primitive(PrimitiveKind::String)
    }

    pub fn number() -> Self {
        TypeRef::Primitive(PrimitiveKind::Number)
    }

    pub fn boolean() -> Self {
        TypeRef::Primitive(PrimitiveKind::Boolean)
    }

    pub fn date_time() -> Self {
        TypeRef::Primitive(PrimitiveKind::DateTime)
    }

    pub fn binary() -> Self {
        TypeRef::Primitive(PrimitiveKind::Binary)
    }

    /// An array of a known item type
    pub fn array_of(item: TypeRef) -> Self {
        TypeRef::Array(Some(Box::new(item)))
    }

    /// An array whose item type is not resolvable
    pub fn array() -> Self {
        TypeRef::Array(None)
    }

    pub fn model(id: impl Into<ModelId>) -> Self {
        TypeRef::Model(id.into())
    }
}

/// One declared property of a model
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDescriptor {
    pub name: String,
    /// Declared type; `None` falls back to a string schema
    pub type_ref: Option<TypeRef>,
    pub required: bool,
    pub format: Option<String>,
    pub description: Option<String>,
    pub example: Option<serde_json::Value>,
    /// Ordered literal values; a non-empty list forces the property required
    pub enum_values: Vec<serde_json::Value>,
    /// Explicit schema fragment, takes precedence over `type_ref`
    pub schema: Option<Schema>,
}

impl PropertyDescriptor {
    pub fn new(name: impl Into<String>, type_ref: TypeRef) -> Self {
        Self {
            name: name.into(),
            type_ref: Some(type_ref),
            required: false,
            format: None,
            description: None,
            example: None,
            enum_values: Vec::new(),
            schema: None,
        }
    }

    /// A property whose type could not be resolved
    pub fn untyped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_ref: None,
            required: false,
            format: None,
            description: None,
            example: None,
            enum_values: Vec::new(),
            schema: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_example(mut self, example: serde_json::Value) -> Self {
        self.example = Some(example);
        self
    }

    pub fn with_enum(mut self, values: Vec<serde_json::Value>) -> Self {
        self.enum_values = values;
        self
    }

    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Effective required flag: an enum forces the property required
    pub fn is_required(&self) -> bool {
        self.required || !self.enum_values.is_empty()
    }
}

/// A declared model (DTO) with its own properties.
///
/// Inherited properties are never listed here; they are reached through the
/// `parent` identity when the schema is resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelDescriptor {
    pub id: ModelId,
    /// Display name override; defaults to the identity's declared name
    pub name: Option<String>,
    pub description: Option<String>,
    pub parent: Option<ModelId>,
    pub properties: Vec<PropertyDescriptor>,
}

impl ModelDescriptor {
    pub fn new(id: impl Into<ModelId>) -> Self {
        Self {
            id: id.into(),
            name: None,
            description: None,
            parent: None,
            properties: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_parent(mut self, parent: impl Into<ModelId>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn with_property(mut self, property: PropertyDescriptor) -> Self {
        self.properties.push(property);
        self
    }

    /// The name this model's schema is keyed and referenced by
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or_else(|| self.id.as_str())
    }
}

/// HTTP methods supported by operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Options,
    Head,
}

impl HttpMethod {
    /// Lower-case canonical form used as the paths-map key
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Delete => "delete",
            HttpMethod::Patch => "patch",
            HttpMethod::Options => "options",
            HttpMethod::Head => "head",
        }
    }
}

/// Where a declared parameter lives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterLocation {
    Query,
    Path,
    Header,
    Cookie,
    /// Collected into the request body instead of the parameter list
    Body,
}

impl ParameterLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterLocation::Query => "query",
            ParameterLocation::Path => "path",
            ParameterLocation::Header => "header",
            ParameterLocation::Cookie => "cookie",
            ParameterLocation::Body => "body",
        }
    }
}

/// One declared operation parameter
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDescriptor {
    pub name: String,
    pub location: ParameterLocation,
    pub required: bool,
    /// Declared type; `None` falls back to a string schema
    pub type_ref: Option<TypeRef>,
    /// Explicit schema fragment, takes precedence over `type_ref`
    pub schema: Option<Schema>,
    pub description: Option<String>,
    /// Body parameters only; defaults to `application/json`
    pub content_type: Option<String>,
}

impl ParameterDescriptor {
    pub fn new(name: impl Into<String>, location: ParameterLocation) -> Self {
        Self {
            name: name.into(),
            location,
            required: false,
            type_ref: None,
            schema: None,
            description: None,
            content_type: None,
        }
    }

    pub fn with_type(mut self, type_ref: TypeRef) -> Self {
        self.type_ref = Some(type_ref);
        self
    }

    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// Security scheme categories defined by OpenAPI 3.0
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecuritySchemeType {
    ApiKey,
    Http,
    OAuth2,
    OpenIdConnect,
}

impl SecuritySchemeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SecuritySchemeType::ApiKey => "apiKey",
            SecuritySchemeType::Http => "http",
            SecuritySchemeType::OAuth2 => "oauth2",
            SecuritySchemeType::OpenIdConnect => "openIdConnect",
        }
    }
}

/// One OAuth flow configuration; URL requirements depend on the flow type
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OAuthFlowConfig {
    pub authorization_url: Option<String>,
    pub token_url: Option<String>,
    pub refresh_url: Option<String>,
    /// Scope name to description; defaults to an empty mapping
    pub scopes: BTreeMap<String, String>,
}

impl OAuthFlowConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_authorization_url(mut self, url: impl Into<String>) -> Self {
        self.authorization_url = Some(url.into());
        self
    }

    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = Some(url.into());
        self
    }

    pub fn with_refresh_url(mut self, url: impl Into<String>) -> Self {
        self.refresh_url = Some(url.into());
        self
    }

    pub fn with_scope(mut self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.scopes.insert(name.into(), description.into());
        self
    }
}

/// Declared OAuth flows for an `oauth2` scheme
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OAuthFlows {
    pub implicit: Option<OAuthFlowConfig>,
    pub password: Option<OAuthFlowConfig>,
    pub client_credentials: Option<OAuthFlowConfig>,
    pub authorization_code: Option<OAuthFlowConfig>,
}

/// A named authentication mechanism declared on a header
#[derive(Debug, Clone, PartialEq)]
pub struct SecurityScheme {
    /// Used as the `components.securitySchemes` key
    pub name: String,
    pub scheme_type: SecuritySchemeType,
    pub scheme: Option<String>,
    pub bearer_format: Option<String>,
    pub flows: Option<OAuthFlows>,
}

impl SecurityScheme {
    pub fn new(name: impl Into<String>, scheme_type: SecuritySchemeType) -> Self {
        Self {
            name: name.into(),
            scheme_type,
            scheme: None,
            bearer_format: None,
            flows: None,
        }
    }

    pub fn api_key(name: impl Into<String>) -> Self {
        Self::new(name, SecuritySchemeType::ApiKey)
    }

    pub fn bearer(name: impl Into<String>) -> Self {
        Self::new(name, SecuritySchemeType::Http).with_scheme("bearer")
    }

    pub fn oauth2(name: impl Into<String>, flows: OAuthFlows) -> Self {
        let mut scheme = Self::new(name, SecuritySchemeType::OAuth2);
        scheme.flows = Some(flows);
        scheme
    }

    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = Some(scheme.into());
        self
    }

    pub fn with_bearer_format(mut self, format: impl Into<String>) -> Self {
        self.bearer_format = Some(format.into());
        self
    }
}

/// A declared header, optionally carrying a security scheme.
///
/// Headers with a scheme become security requirements; plain headers are
/// rendered as header-location parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderDescriptor {
    pub name: String,
    pub description: Option<String>,
    pub required: bool,
    pub security_scheme: Option<SecurityScheme>,
}

impl HeaderDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            required: false,
            security_scheme: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_security_scheme(mut self, scheme: SecurityScheme) -> Self {
        self.security_scheme = Some(scheme);
        self
    }
}

/// One declared response for a status code
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseDescriptor {
    pub description: String,
    /// Content is rendered only when a content type is declared
    pub content_type: Option<String>,
    pub type_ref: Option<TypeRef>,
    /// Explicit schema fragment, takes precedence over `type_ref`
    pub schema: Option<Schema>,
}

impl ResponseDescriptor {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            content_type: None,
            type_ref: None,
            schema: None,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn with_type(mut self, type_ref: TypeRef) -> Self {
        self.type_ref = Some(type_ref);
        self
    }

    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schema = Some(schema);
        self
    }
}

/// One http-method handler declared on a controller
#[derive(Debug, Clone, PartialEq)]
pub struct OperationDescriptor {
    pub method: HttpMethod,
    pub path: String,
    /// Declared member name, used for the default operation id
    pub name: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub deprecated: bool,
    pub tags: Vec<String>,
    /// Explicit operation id, wins over the derived one
    pub operation_id: Option<String>,
    pub parameters: Vec<ParameterDescriptor>,
    /// Method-scoped headers, appended after the controller's class headers
    pub headers: Vec<HeaderDescriptor>,
    /// Status code to response; defaults to an empty mapping
    pub responses: BTreeMap<String, ResponseDescriptor>,
}

impl OperationDescriptor {
    pub fn new(method: HttpMethod, path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            name: name.into(),
            summary: None,
            description: None,
            deprecated: false,
            tags: Vec::new(),
            operation_id: None,
            parameters: Vec::new(),
            headers: Vec::new(),
            responses: BTreeMap::new(),
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn deprecated(mut self) -> Self {
        self.deprecated = true;
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn with_operation_id(mut self, operation_id: impl Into<String>) -> Self {
        self.operation_id = Some(operation_id.into());
        self
    }

    pub fn with_parameter(mut self, parameter: ParameterDescriptor) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn with_header(mut self, header: HeaderDescriptor) -> Self {
        self.headers.push(header);
        self
    }

    pub fn with_response(mut self, status: u16, response: ResponseDescriptor) -> Self {
        self.responses.insert(status.to_string(), response);
        self
    }
}

/// A controller grouping operations under a base path
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerDescriptor {
    /// Controller identity, used for derived operation ids
    pub name: String,
    pub base_path: String,
    pub description: Option<String>,
    pub tags: Vec<String>,
    /// Class-scoped headers applied to every operation
    pub headers: Vec<HeaderDescriptor>,
    pub operations: Vec<OperationDescriptor>,
}

impl ControllerDescriptor {
    pub fn new(name: impl Into<String>, base_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_path: base_path.into(),
            description: None,
            tags: Vec::new(),
            headers: Vec::new(),
            operations: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn with_header(mut self, header: HeaderDescriptor) -> Self {
        self.headers.push(header);
        self
    }

    pub fn with_operation(mut self, operation: OperationDescriptor) -> Self {
        self.operations.push(operation);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_id_display_name_default() {
        let model = ModelDescriptor::new("UserDto");
        assert_eq!(model.display_name(), "UserDto");
    }

    #[test]
    fn test_model_display_name_override() {
        let model = ModelDescriptor::new("UserDto").with_name("User");
        assert_eq!(model.display_name(), "User");
    }

    #[test]
    fn test_enum_forces_required() {
        let prop = PropertyDescriptor::new("status", TypeRef::string())
            .with_enum(vec!["active".into(), "inactive".into()]);
        assert!(!prop.required);
        assert!(prop.is_required());
    }

    #[test]
    fn test_required_defaults_to_false() {
        let prop = PropertyDescriptor::new("nickname", TypeRef::string());
        assert!(!prop.is_required());
    }

    #[test]
    fn test_http_method_lowercase() {
        assert_eq!(HttpMethod::Get.as_str(), "get");
        assert_eq!(HttpMethod::Delete.as_str(), "delete");
        assert_eq!(HttpMethod::Options.as_str(), "options");
    }

    #[test]
    fn test_operation_response_keyed_by_status() {
        let op = OperationDescriptor::new(HttpMethod::Get, "/", "find")
            .with_response(200, ResponseDescriptor::new("OK"))
            .with_response(404, ResponseDescriptor::new("Not found"));
        assert_eq!(op.responses.len(), 2);
        assert!(op.responses.contains_key("200"));
        assert!(op.responses.contains_key("404"));
    }
}
