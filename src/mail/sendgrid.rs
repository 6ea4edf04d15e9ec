//! SendGrid v3 HTTP mailer.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use super::{Email, MailError, Mailer};

const SEND_PATH: &str = "/v3/mail/send";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Serialize)]
struct Address<'a> {
    email: &'a str,
}

#[derive(Serialize)]
struct Personalization<'a> {
    to: [Address<'a>; 1],
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(rename = "type")]
    mime: &'a str,
    value: &'a str,
}

/// Request body for `POST /v3/mail/send`.
#[derive(Serialize)]
struct SendMailRequest<'a> {
    personalizations: [Personalization<'a>; 1],
    from: Address<'a>,
    subject: &'a str,
    content: [Content<'a>; 2],
}

impl<'a> SendMailRequest<'a> {
    fn new(from: &'a str, email: &'a Email) -> Self {
        Self {
            personalizations: [Personalization {
                to: [Address { email: &email.to }],
            }],
            from: Address { email: from },
            subject: &email.subject,
            content: [
                Content {
                    mime: "text/plain",
                    value: &email.text,
                },
                Content {
                    mime: "text/html",
                    value: &email.html,
                },
            ],
        }
    }
}

/// Delivers mail through the SendGrid HTTP API.
pub struct SendGridMailer {
    client: reqwest::Client,
    api_key: String,
    from: String,
    endpoint: String,
}

impl SendGridMailer {
    /// `api_base` is normally `https://api.sendgrid.com`.
    pub fn new(
        api_key: impl Into<String>,
        from: impl Into<String>,
        api_base: &str,
    ) -> Result<Self, MailError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| MailError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            from: from.into(),
            endpoint: format!("{}{}", api_base.trim_end_matches('/'), SEND_PATH),
        })
    }
}

#[async_trait]
impl Mailer for SendGridMailer {
    async fn send(&self, email: Email) -> Result<(), MailError> {
        let body = SendMailRequest::new(&self.from, &email);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MailError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        tracing::info!(to = %email.to, subject = %email.subject, "Email sent");
        Ok(())
    }
}
