use std::collections::HashMap;

use crate::domain::repository::CodeDelivery;

/// Twilio + SendGrid configuration for outbound delivery.
#[derive(Debug, Clone)]
pub struct DeliveryConfig {
    pub twilio_account_sid: String,
    pub twilio_auth_token: String,
    /// Sender phone number (E.164).
    pub twilio_from_number: String,
    pub sendgrid_api_key: String,
    /// Sender email address.
    pub email_from: String,
}

/// Production [`CodeDelivery`] speaking the Twilio Messages REST API and the
/// SendGrid v3 mail-send API over HTTPS.
#[derive(Clone)]
pub struct HttpDelivery {
    http: reqwest::Client,
    config: DeliveryConfig,
}

impl HttpDelivery {
    pub fn new(config: DeliveryConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }
}

impl CodeDelivery for HttpDelivery {
    async fn send_sms(&self, to: &str, body: &str) -> Result<(), anyhow::Error> {
        let url = format!(
            "https://api.twilio.com/2010-04-01/Accounts/{}/Messages.json",
            self.config.twilio_account_sid
        );

        let mut form: HashMap<&str, &str> = HashMap::new();
        form.insert("To", to);
        form.insert("From", &self.config.twilio_from_number);
        form.insert("Body", body);

        let response = self
            .http
            .post(url)
            .basic_auth(
                &self.config.twilio_account_sid,
                Some(&self.config.twilio_auth_token),
            )
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            anyhow::bail!("Twilio returned {status}: {error_body}");
        }
        Ok(())
    }

    async fn send_email(&self, to: &str, subject: &str, html: &str) -> Result<(), anyhow::Error> {
        let payload = serde_json::json!({
            "personalizations": [{ "to": [{ "email": to }] }],
            "from": { "email": self.config.email_from },
            "subject": subject,
            "content": [{ "type": "text/html", "value": html }],
        });

        let response = self
            .http
            .post("https://api.sendgrid.com/v3/mail/send")
            .bearer_auth(&self.config.sendgrid_api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            anyhow::bail!("SendGrid returned {status}: {error_body}");
        }
        Ok(())
    }
}
