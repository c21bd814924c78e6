//! Client and employee notice delivery.
//!
//! [`Notifier`] resolves the template for a notice, substitutes the
//! event's placeholder values, and hands the rendered email to the
//! [`Mailer`](crate::mailer::Mailer). Every send is best-effort: the
//! methods return whether an email actually went out and log failures
//! instead of propagating them, so a broken SMTP setup can never block a
//! status change.

use std::collections::HashMap;

use encore_core::pricing::{currency_symbol, format_cents};
use encore_core::template;
use encore_core::transition::NoticeKind;
use encore_core::types::DbId;
use encore_db::models::event::Event;
use encore_db::models::setting::keys;
use encore_db::models::template::Template;
use encore_db::repositories::{SettingsRepo, TemplateRepo, UserRepo};
use sqlx::PgPool;

use crate::mailer::{EmailError, Mailer};

/// Template slug for the balance-reminder task email.
const BALANCE_REMINDER_SLUG: &str = "balance-reminder";

/// Template slug for the playlist employee notification.
const PLAYLIST_NOTIFY_SLUG: &str = "playlist-notify";

/// Failure inside a notice attempt. Logged, never propagated to callers.
#[derive(Debug, thiserror::Error)]
enum NoticeError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Email(#[from] EmailError),
}

// ---------------------------------------------------------------------------
// Notifier
// ---------------------------------------------------------------------------

/// Resolves, renders, and sends notice emails.
#[derive(Clone)]
pub struct Notifier {
    pool: PgPool,
    mailer: Option<Mailer>,
}

impl Notifier {
    /// Create a notifier. `mailer` is `None` when SMTP is not configured;
    /// every send then reports "not sent" without error.
    pub fn new(pool: PgPool, mailer: Option<Mailer>) -> Self {
        Self { pool, mailer }
    }

    /// Send the client notice a transition planned.
    ///
    /// Returns `true` only when an email actually went out, so the journal
    /// can record what happened rather than what was intended.
    pub async fn send_client_notice(
        &self,
        event: &Event,
        kind: NoticeKind,
        template_override: Option<DbId>,
    ) -> bool {
        let Some(mailer) = &self.mailer else {
            tracing::debug!(event_id = event.id, "SMTP not configured, client notice skipped");
            return false;
        };
        match self.try_client_notice(mailer, event, kind, template_override).await {
            Ok(sent) => sent,
            Err(e) => {
                tracing::warn!(event_id = event.id, error = %e, "Client notice failed");
                false
            }
        }
    }

    /// Send the balance-reminder email to the event's client.
    pub async fn send_balance_reminder(&self, event: &Event) -> bool {
        let Some(mailer) = &self.mailer else {
            tracing::debug!(event_id = event.id, "SMTP not configured, reminder skipped");
            return false;
        };
        match self
            .try_templated_send(mailer, event, BALANCE_REMINDER_SLUG, Recipient::Client, None)
            .await
        {
            Ok(sent) => sent,
            Err(e) => {
                tracing::warn!(event_id = event.id, error = %e, "Balance reminder failed");
                false
            }
        }
    }

    /// Send the grouped playlist to the event's primary employee.
    pub async fn send_playlist_notification(&self, event: &Event, playlist_text: &str) -> bool {
        let Some(mailer) = &self.mailer else {
            tracing::debug!(event_id = event.id, "SMTP not configured, playlist notice skipped");
            return false;
        };
        match self
            .try_templated_send(
                mailer,
                event,
                PLAYLIST_NOTIFY_SLUG,
                Recipient::PrimaryEmployee,
                Some(playlist_text),
            )
            .await
        {
            Ok(sent) => sent,
            Err(e) => {
                tracing::warn!(event_id = event.id, error = %e, "Playlist notification failed");
                false
            }
        }
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    async fn try_client_notice(
        &self,
        mailer: &Mailer,
        event: &Event,
        kind: NoticeKind,
        template_override: Option<DbId>,
    ) -> Result<bool, NoticeError> {
        let Some(template) = self.resolve_notice_template(kind, template_override).await? else {
            tracing::warn!(
                event_id = event.id,
                slug = kind.template_slug(),
                "Notice template missing, nothing sent"
            );
            return Ok(false);
        };
        self.render_and_send(mailer, event, &template, Recipient::Client, None)
            .await
    }

    async fn try_templated_send(
        &self,
        mailer: &Mailer,
        event: &Event,
        slug: &str,
        recipient: Recipient,
        playlist_text: Option<&str>,
    ) -> Result<bool, NoticeError> {
        let Some(template) = TemplateRepo::find_by_slug(&self.pool, slug).await? else {
            tracing::warn!(event_id = event.id, slug, "Template missing, nothing sent");
            return Ok(false);
        };
        self.render_and_send(mailer, event, &template, recipient, playlist_text)
            .await
    }

    async fn render_and_send(
        &self,
        mailer: &Mailer,
        event: &Event,
        template: &Template,
        recipient: Recipient,
        playlist_text: Option<&str>,
    ) -> Result<bool, NoticeError> {
        let mut values = self.placeholders(event).await?;
        if let Some(text) = playlist_text {
            values.insert("playlist", text.to_string());
        }

        let to_email = match self.recipient_email(event, recipient).await? {
            Some(email) => email,
            None => return Ok(false),
        };

        let subject = template::render(&template.subject, &values);
        let body = template::render(&template.body, &values);
        mailer.send(&to_email, &subject, &body).await?;
        Ok(true)
    }

    /// Resolve the template for a transition notice: caller override by id
    /// first, then the configured or built-in default slug.
    async fn resolve_notice_template(
        &self,
        kind: NoticeKind,
        template_override: Option<DbId>,
    ) -> Result<Option<Template>, sqlx::Error> {
        if let Some(id) = template_override {
            if let Some(template) = TemplateRepo::find_by_id(&self.pool, id).await? {
                return Ok(Some(template));
            }
            tracing::warn!(template_id = id, "Override template not found, using default");
        }
        let slug = match kind {
            NoticeKind::Quote => {
                SettingsRepo::get_string(
                    &self.pool,
                    keys::DEFAULT_QUOTE_TEMPLATE,
                    kind.template_slug(),
                )
                .await?
            }
            _ => kind.template_slug().to_string(),
        };
        TemplateRepo::find_by_slug(&self.pool, &slug).await
    }

    async fn recipient_email(
        &self,
        event: &Event,
        recipient: Recipient,
    ) -> Result<Option<String>, sqlx::Error> {
        let user_id = match recipient {
            Recipient::Client => Some(event.client_id),
            Recipient::PrimaryEmployee => event.primary_employee_id,
        };
        let Some(user_id) = user_id else {
            tracing::warn!(event_id = event.id, "Event has no primary employee to notify");
            return Ok(None);
        };
        match UserRepo::find_by_id(&self.pool, user_id).await? {
            Some(user) => Ok(Some(user.email)),
            None => {
                tracing::warn!(event_id = event.id, user_id, "Recipient user not found");
                Ok(None)
            }
        }
    }

    /// Placeholder values shared by every notice template.
    async fn placeholders(
        &self,
        event: &Event,
    ) -> Result<HashMap<&'static str, String>, sqlx::Error> {
        let company =
            SettingsRepo::get_string(&self.pool, keys::COMPANY_NAME, "Encore Events").await?;
        let currency = SettingsRepo::get_string(&self.pool, keys::CURRENCY, "GBP").await?;
        let symbol = currency_symbol(&currency);

        let client_name = UserRepo::find_by_id(&self.pool, event.client_id)
            .await?
            .map(|u| u.display_name)
            .unwrap_or_default();
        let employee_name = match event.primary_employee_id {
            Some(id) => UserRepo::find_by_id(&self.pool, id)
                .await?
                .map(|u| u.display_name)
                .unwrap_or_default(),
            None => String::new(),
        };

        let mut values = HashMap::new();
        values.insert("company_name", company);
        values.insert("client_name", client_name);
        values.insert("employee_name", employee_name);
        values.insert("event_date", event.event_date.format("%-d %B %Y").to_string());
        values.insert("total", format_cents(event.price_total_cents, &symbol));
        values.insert("deposit", format_cents(event.deposit_cents, &symbol));
        values.insert("balance", format_cents(event.balance_cents(), &symbol));
        Ok(values)
    }
}

/// Who a templated notice goes to.
#[derive(Debug, Clone, Copy)]
enum Recipient {
    Client,
    PrimaryEmployee,
}
