use std::sync::Arc;

use portfolio_api_rest::RestServerConfig;
use portfolio_config::Config;
use portfolio_core_contact_impl::{ContactServiceConfig, ContactServiceImpl};
use portfolio_core_health_impl::HealthServiceImpl;
use portfolio_templates_impl::TemplateServiceImpl;

use crate::email::EmailDeliverer;

// API
pub type RestServer = portfolio_api_rest::RestServer<HealthFeature, ContactFeature>;

// Email
pub type Deliverer = EmailDeliverer;

// Templates
pub type Template = TemplateServiceImpl;

// Core
pub type ContactFeature = ContactServiceImpl<Deliverer, Template>;
pub type HealthFeature = HealthServiceImpl<Deliverer>;

/// Wire up the rest server and all of its dependencies.
pub fn rest_server(config: &Config, deliverer: Deliverer) -> anyhow::Result<RestServer> {
    let rest_server_config = RestServerConfig {
        host: config.http.host,
        port: config.http.port,
    };

    let contact_service_config = ContactServiceConfig {
        from: config.email.from.clone().map(Arc::new),
        recipient: config.email.to.clone().into(),
    };

    let template = Template::new()?;
    let health = HealthFeature::new(deliverer.clone());
    let contact = ContactFeature::new(deliverer, template, contact_service_config);

    Ok(RestServer::new(health, contact, rest_server_config))
}
