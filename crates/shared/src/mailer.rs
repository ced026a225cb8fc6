use reqwest::Client;
use serde::Serialize;
use tracing::info;

use crate::config::Config;
use crate::error::{DigestError, Result};

/// A finished e-mail, both parts rendered from the same digest
#[derive(Debug, Clone)]
pub struct EmailMessage {
    pub recipient: String,
    pub subject: String,
    pub text: String,
    pub html: String,
}

#[derive(Serialize)]
struct MailRequest<'a> {
    personalizations: Vec<Personalization<'a>>,
    from: Address<'a>,
    subject: &'a str,
    content: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Personalization<'a> {
    to: Vec<Address<'a>>,
}

#[derive(Serialize)]
struct Address<'a> {
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(rename = "type")]
    mime: &'static str,
    value: &'a str,
}

pub struct SendGridMailer {
    client: Client,
    api_key: String,
    sender_email: String,
    sender_name: String,
    base_url: String,
}

impl SendGridMailer {
    pub fn with_base_url(
        api_key: String,
        sender_email: String,
        sender_name: String,
        base_url: impl Into<String>,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            api_key,
            sender_email,
            sender_name,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub async fn send(&self, message: &EmailMessage) -> Result<()> {
        let request = MailRequest {
            personalizations: vec![Personalization {
                to: vec![Address {
                    email: &message.recipient,
                    name: None,
                }],
            }],
            from: Address {
                email: &self.sender_email,
                name: Some(&self.sender_name),
            },
            subject: &message.subject,
            content: vec![
                Content {
                    mime: "text/plain",
                    value: &message.text,
                },
                Content {
                    mime: "text/html",
                    value: &message.html,
                },
            ],
        };

        let response = self
            .client
            .post(format!("{}/v3/mail/send", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("unknown error"));
            return Err(DigestError::Api {
                service: "SendGrid",
                status: status.as_u16(),
                body,
            });
        }

        info!(recipient = %message.recipient, status = status.as_u16(), "Email sent");
        Ok(())
    }
}

/// Send the digest if delivery is configured. Missing credentials come back
/// as an error for the caller to report; they never abort the run.
pub async fn deliver(config: &Config, subject: String, text: String, html: String) -> Result<()> {
    let api_key = config
        .sendgrid_api_key
        .clone()
        .ok_or(DigestError::MissingCredentials("SENDGRID_API_KEY"))?;
    let recipient = config
        .recipient_email
        .clone()
        .ok_or(DigestError::MissingCredentials("RECIPIENT_EMAIL"))?;

    let mailer = SendGridMailer::with_base_url(
        api_key,
        config.sender_email.clone(),
        config.sender_name.clone(),
        config.sendgrid_base_url.as_str(),
    )?;
    mailer
        .send(&EmailMessage {
            recipient,
            subject,
            text,
            html,
        })
        .await
}
