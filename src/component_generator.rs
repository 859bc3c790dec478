//! Assembly of the `components` section: model schemas and security schemes.

use crate::error::{Error, Result};
use crate::metadata::{
    ControllerDescriptor, HeaderDescriptor, OAuthFlowConfig, OAuthFlows, SecurityScheme,
    SecuritySchemeType,
};
use crate::model_registry::ModelRegistry;
use crate::type_resolver::Schema;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// OpenAPI Components object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Components {
    /// Resolved model schemas keyed by display name
    pub schemas: BTreeMap<String, Schema>,
    /// Security schemes keyed by scheme name
    #[serde(rename = "securitySchemes")]
    pub security_schemes: BTreeMap<String, SecuritySchemeObject>,
}

/// OpenAPI SecurityScheme object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecuritySchemeObject {
    /// Scheme category (apiKey, http, oauth2, openIdConnect)
    #[serde(rename = "type")]
    pub scheme_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
    #[serde(rename = "bearerFormat", skip_serializing_if = "Option::is_none")]
    pub bearer_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flows: Option<OAuthFlowsObject>,
}

/// OpenAPI OAuthFlows object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OAuthFlowsObject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub implicit: Option<OAuthFlowObject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<OAuthFlowObject>,
    #[serde(rename = "clientCredentials", skip_serializing_if = "Option::is_none")]
    pub client_credentials: Option<OAuthFlowObject>,
    #[serde(rename = "authorizationCode", skip_serializing_if = "Option::is_none")]
    pub authorization_code: Option<OAuthFlowObject>,
}

/// OpenAPI OAuthFlow object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OAuthFlowObject {
    #[serde(rename = "authorizationUrl", skip_serializing_if = "Option::is_none")]
    pub authorization_url: Option<String>,
    #[serde(rename = "tokenUrl", skip_serializing_if = "Option::is_none")]
    pub token_url: Option<String>,
    #[serde(rename = "refreshUrl", skip_serializing_if = "Option::is_none")]
    pub refresh_url: Option<String>,
    /// Scope name to description, empty when the flow declares none
    pub scopes: BTreeMap<String, String>,
}

/// Generator for the `components` section
pub struct ComponentGenerator;

impl ComponentGenerator {
    /// Build the `components` object from the registry and controller metadata.
    ///
    /// Resets the registry's build state first so the output depends only on
    /// the current registrations. An invalid OAuth flow configuration aborts
    /// generation entirely; no partial components are returned.
    pub fn generate(
        registry: &mut ModelRegistry,
        controllers: &[ControllerDescriptor],
    ) -> Result<Components> {
        debug!("Generating components for {} controllers", controllers.len());
        registry.reset();

        let mut schemas = BTreeMap::new();
        for id in registry.ids() {
            let schema = registry.resolve_schema(&id)?;
            let name = registry.display_name(&id);
            if schemas.contains_key(&name) {
                // Most recent registration wins for a contested display name
                warn!("Schema name collision: overwriting {}", name);
            }
            schemas.insert(name, schema);
        }

        let mut security_schemes = BTreeMap::new();
        for controller in controllers {
            Self::extract_security_schemes(&controller.headers, &mut security_schemes)?;
            for operation in &controller.operations {
                Self::extract_security_schemes(&operation.headers, &mut security_schemes)?;
            }
        }

        Ok(Components {
            schemas,
            security_schemes,
        })
    }

    /// Collect security schemes from a header list, keyed by scheme name.
    ///
    /// Plain headers carry no scheme and are skipped; the paths processor
    /// renders those as operation parameters.
    fn extract_security_schemes(
        headers: &[HeaderDescriptor],
        out: &mut BTreeMap<String, SecuritySchemeObject>,
    ) -> Result<()> {
        for header in headers {
            if let Some(scheme) = &header.security_scheme {
                debug!("Extracting security scheme: {}", scheme.name);
                out.insert(scheme.name.clone(), Self::map_security_scheme(scheme)?);
            }
        }
        Ok(())
    }

    fn map_security_scheme(scheme: &SecurityScheme) -> Result<SecuritySchemeObject> {
        let flows = match (&scheme.scheme_type, &scheme.flows) {
            (SecuritySchemeType::OAuth2, Some(flows)) => Some(Self::map_oauth_flows(flows)?),
            _ => None,
        };
        Ok(SecuritySchemeObject {
            scheme_type: scheme.scheme_type.as_str().to_string(),
            scheme: scheme.scheme.clone(),
            bearer_format: scheme.bearer_format.clone(),
            flows,
        })
    }

    fn map_oauth_flows(flows: &OAuthFlows) -> Result<OAuthFlowsObject> {
        let mut out = OAuthFlowsObject::default();
        if let Some(config) = &flows.implicit {
            out.implicit = Some(Self::map_oauth_flow(config, "implicit")?);
        }
        if let Some(config) = &flows.password {
            out.password = Some(Self::map_oauth_flow(config, "password")?);
        }
        if let Some(config) = &flows.client_credentials {
            out.client_credentials = Some(Self::map_oauth_flow(config, "clientCredentials")?);
        }
        if let Some(config) = &flows.authorization_code {
            out.authorization_code = Some(Self::map_oauth_flow(config, "authorizationCode")?);
        }
        Ok(out)
    }

    /// Validate required URLs for a flow type and map it to the output form
    fn map_oauth_flow(config: &OAuthFlowConfig, flow: &str) -> Result<OAuthFlowObject> {
        match flow {
            "implicit" => {
                if config.authorization_url.is_none() {
                    return Err(Error::InvalidOAuthFlow {
                        flow: flow.to_string(),
                        message: "implicit flow requires authorizationUrl".to_string(),
                    });
                }
            }
            "password" | "clientCredentials" => {
                if config.token_url.is_none() {
                    return Err(Error::InvalidOAuthFlow {
                        flow: flow.to_string(),
                        message: format!("{} flow requires tokenUrl", flow),
                    });
                }
            }
            "authorizationCode" => {
                if config.authorization_url.is_none() || config.token_url.is_none() {
                    return Err(Error::InvalidOAuthFlow {
                        flow: flow.to_string(),
                        message: "authorization code flow requires both authorizationUrl and tokenUrl"
                            .to_string(),
                    });
                }
            }
            _ => {}
        }

        Ok(OAuthFlowObject {
            authorization_url: config.authorization_url.clone(),
            token_url: config.token_url.clone(),
            refresh_url: config.refresh_url.clone(),
            scopes: config.scopes.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{
        HttpMethod, ModelDescriptor, OperationDescriptor, PropertyDescriptor, TypeRef,
    };

    fn controller_with_headers(
        class_header: Option<HeaderDescriptor>,
        method_header: Option<HeaderDescriptor>,
    ) -> ControllerDescriptor {
        let mut operation = OperationDescriptor::new(HttpMethod::Get, "/", "find");
        if let Some(header) = method_header {
            operation = operation.with_header(header);
        }
        let mut controller = ControllerDescriptor::new("TestController", "/test");
        if let Some(header) = class_header {
            controller = controller.with_header(header);
        }
        controller.with_operation(operation)
    }

    #[test]
    fn test_generate_schemas_keyed_by_display_name() {
        let mut registry = ModelRegistry::new();
        registry.register(
            ModelDescriptor::new("UserDto")
                .with_name("User")
                .with_property(PropertyDescriptor::new("id", TypeRef::number())),
        );

        let components = ComponentGenerator::generate(&mut registry, &[]).unwrap();
        assert_eq!(components.schemas.len(), 1);
        assert!(components.schemas.contains_key("User"));
        assert!(components.security_schemes.is_empty());
    }

    #[test]
    fn test_display_name_collision_keeps_most_recent() {
        let mut registry = ModelRegistry::new();
        registry.register(
            ModelDescriptor::new("v1::User")
                .with_name("User")
                .with_property(PropertyDescriptor::new("id", TypeRef::number())),
        );
        registry.register(
            ModelDescriptor::new("v2::User")
                .with_name("User")
                .with_property(PropertyDescriptor::new("uuid", TypeRef::string())),
        );

        let components = ComponentGenerator::generate(&mut registry, &[]).unwrap();
        assert_eq!(components.schemas.len(), 1);
        let user = &components.schemas["User"];
        assert!(user.properties.as_ref().unwrap().contains_key("uuid"));
    }

    #[test]
    fn test_api_key_scheme_from_class_header() {
        let mut registry = ModelRegistry::new();
        let header = HeaderDescriptor::new("X-API-Key")
            .with_security_scheme(SecurityScheme::api_key("ApiKeyAuth"));
        let controllers = vec![controller_with_headers(Some(header), None)];

        let components = ComponentGenerator::generate(&mut registry, &controllers).unwrap();
        assert_eq!(components.security_schemes.len(), 1);
        let scheme = &components.security_schemes["ApiKeyAuth"];
        assert_eq!(scheme.scheme_type, "apiKey");
        assert!(scheme.flows.is_none());
    }

    #[test]
    fn test_bearer_scheme_from_method_header() {
        let mut registry = ModelRegistry::new();
        let header = HeaderDescriptor::new("Authorization").with_security_scheme(
            SecurityScheme::bearer("BearerAuth").with_bearer_format("JWT"),
        );
        let controllers = vec![controller_with_headers(None, Some(header))];

        let components = ComponentGenerator::generate(&mut registry, &controllers).unwrap();
        let scheme = &components.security_schemes["BearerAuth"];
        assert_eq!(scheme.scheme_type, "http");
        assert_eq!(scheme.scheme, Some("bearer".to_string()));
        assert_eq!(scheme.bearer_format, Some("JWT".to_string()));
    }

    #[test]
    fn test_oauth2_flows_resolved_with_scopes() {
        let mut registry = ModelRegistry::new();
        let flows = OAuthFlows {
            authorization_code: Some(
                OAuthFlowConfig::new()
                    .with_authorization_url("https://auth.example.com/authorize")
                    .with_token_url("https://auth.example.com/token")
                    .with_scope("read", "Read access"),
            ),
            ..Default::default()
        };
        let header = HeaderDescriptor::new("Authorization")
            .with_security_scheme(SecurityScheme::oauth2("OAuth2", flows));
        let controllers = vec![controller_with_headers(Some(header), None)];

        let components = ComponentGenerator::generate(&mut registry, &controllers).unwrap();
        let scheme = &components.security_schemes["OAuth2"];
        assert_eq!(scheme.scheme_type, "oauth2");
        let flow = scheme
            .flows
            .as_ref()
            .unwrap()
            .authorization_code
            .as_ref()
            .unwrap();
        assert_eq!(
            flow.authorization_url,
            Some("https://auth.example.com/authorize".to_string())
        );
        assert_eq!(flow.scopes["read"], "Read access");
    }

    #[test]
    fn test_oauth2_scopes_default_to_empty() {
        let mut registry = ModelRegistry::new();
        let flows = OAuthFlows {
            password: Some(OAuthFlowConfig::new().with_token_url("https://auth.example.com/token")),
            ..Default::default()
        };
        let header = HeaderDescriptor::new("Authorization")
            .with_security_scheme(SecurityScheme::oauth2("OAuth2", flows));
        let controllers = vec![controller_with_headers(Some(header), None)];

        let components = ComponentGenerator::generate(&mut registry, &controllers).unwrap();
        let flow = components.security_schemes["OAuth2"]
            .flows
            .as_ref()
            .unwrap()
            .password
            .as_ref()
            .unwrap();
        assert!(flow.scopes.is_empty());
    }

    #[test]
    fn test_implicit_flow_requires_authorization_url() {
        let mut registry = ModelRegistry::new();
        let flows = OAuthFlows {
            implicit: Some(OAuthFlowConfig::new()),
            ..Default::default()
        };
        let header = HeaderDescriptor::new("Authorization")
            .with_security_scheme(SecurityScheme::oauth2("OAuth2", flows));
        let controllers = vec![controller_with_headers(Some(header), None)];

        let err = ComponentGenerator::generate(&mut registry, &controllers).unwrap_err();
        assert!(matches!(err, Error::InvalidOAuthFlow { flow, .. } if flow == "implicit"));
    }

    #[test]
    fn test_client_credentials_flow_requires_token_url() {
        let mut registry = ModelRegistry::new();
        let flows = OAuthFlows {
            client_credentials: Some(
                OAuthFlowConfig::new().with_authorization_url("https://auth.example.com"),
            ),
            ..Default::default()
        };
        let header = HeaderDescriptor::new("Authorization")
            .with_security_scheme(SecurityScheme::oauth2("OAuth2", flows));
        let controllers = vec![controller_with_headers(Some(header), None)];

        let err = ComponentGenerator::generate(&mut registry, &controllers).unwrap_err();
        assert!(
            matches!(err, Error::InvalidOAuthFlow { flow, .. } if flow == "clientCredentials")
        );
    }

    #[test]
    fn test_authorization_code_flow_requires_both_urls() {
        let mut registry = ModelRegistry::new();
        let flows = OAuthFlows {
            authorization_code: Some(
                OAuthFlowConfig::new().with_token_url("https://auth.example.com/token"),
            ),
            ..Default::default()
        };
        let header = HeaderDescriptor::new("Authorization")
            .with_security_scheme(SecurityScheme::oauth2("OAuth2", flows));
        let controllers = vec![controller_with_headers(Some(header), None)];

        let err = ComponentGenerator::generate(&mut registry, &controllers).unwrap_err();
        assert!(
            matches!(err, Error::InvalidOAuthFlow { flow, .. } if flow == "authorizationCode")
        );
    }

    #[test]
    fn test_plain_headers_are_not_emitted() {
        let mut registry = ModelRegistry::new();
        let header = HeaderDescriptor::new("X-Request-Id");
        let controllers = vec![controller_with_headers(Some(header), None)];

        let components = ComponentGenerator::generate(&mut registry, &controllers).unwrap();
        assert!(components.security_schemes.is_empty());
    }
}
