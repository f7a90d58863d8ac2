use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use shared::{
    domain::ContactFields,
    error::{DeliveryFault, DeliveryReceipt},
};
use tracing::{info, warn};

pub mod config;
pub use config::{load_settings, EmailJsSettings};

const SEND_ENDPOINT: &str = "/api/v1.0/email/send";

/// Transactional-email collaborator. Single attempt, no retry; whatever
/// timeout behavior the service has is surfaced only as success or failure.
#[async_trait]
pub trait EmailDelivery: Send + Sync {
    async fn deliver(&self, fields: &ContactFields) -> Result<DeliveryReceipt, DeliveryFault>;
}

/// Wire shape of an EmailJS send request. The form fields are renamed at
/// this boundary: `name` becomes `from_name` in the template parameters.
#[derive(Debug, Clone, Serialize)]
struct SendEmailRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: TemplateParams<'a>,
}

#[derive(Debug, Clone, Serialize)]
struct TemplateParams<'a> {
    from_name: &'a str,
    email: &'a str,
    message: &'a str,
}

pub struct EmailJsSender {
    http: Client,
    settings: EmailJsSettings,
}

impl EmailJsSender {
    pub fn new(settings: EmailJsSettings) -> Self {
        Self {
            http: Client::new(),
            settings,
        }
    }

    fn send_url(&self) -> String {
        format!(
            "{}{SEND_ENDPOINT}",
            self.settings.api_base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl EmailDelivery for EmailJsSender {
    async fn deliver(&self, fields: &ContactFields) -> Result<DeliveryReceipt, DeliveryFault> {
        let payload = SendEmailRequest {
            service_id: &self.settings.service_id,
            template_id: &self.settings.template_id,
            user_id: &self.settings.public_key,
            template_params: TemplateParams {
                from_name: &fields.name,
                email: &fields.email,
                message: &fields.message,
            },
        };

        let response = self
            .http
            .post(self.send_url())
            .json(&payload)
            .send()
            .await
            .map_err(|err| {
                warn!("emailjs: request transport failure: {err}");
                DeliveryFault::Transport(err.to_string())
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(status = status.as_u16(), "emailjs: send rejected");
            return Err(DeliveryFault::Rejected {
                status: status.as_u16(),
            });
        }

        info!(
            service_id = %self.settings.service_id,
            template_id = %self.settings.template_id,
            "emailjs: send accepted"
        );
        Ok(DeliveryReceipt {
            status: status.as_u16(),
        })
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
