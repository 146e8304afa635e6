use chrono::{Datelike, Utc};
use tera::{Context, Tera};

use crate::configuration::SiteSettings;
use crate::domain::{Devotional, NotificationRequest};
use crate::email_client::EmailContent;

const DEVOTIONAL: &str = "devotional.html";
const NOTIFICATION: &str = "notification.html";
const NEWSLETTER: &str = "newsletter.html";

/// Renders the HTML bodies of every outgoing email.
///
/// Templates are compiled into the binary and registered once at startup.
pub struct EmailTemplates {
    tera: Tera,
    site: SiteSettings,
}

impl EmailTemplates {
    pub fn new(site: SiteSettings) -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            (DEVOTIONAL, include_str!("../views/emails/devotional.html")),
            (NOTIFICATION, include_str!("../views/emails/notification.html")),
            (NEWSLETTER, include_str!("../views/emails/newsletter.html")),
        ])?;
        Ok(Self { tera, site })
    }

    /// Full devotional reading, not a teaser.
    pub fn devotional(&self, devotional: &Devotional) -> Result<EmailContent, tera::Error> {
        let mut ctx = Context::new();
        ctx.insert("title", &devotional.title);
        ctx.insert("date", &devotional.display_date());
        ctx.insert("scripture", &devotional.scripture());
        ctx.insert("paragraphs", &devotional.paragraphs());
        ctx.insert("site_url", &self.site.base_url);
        ctx.insert("unsubscribe_url", &self.site.unsubscribe_url);

        Ok(EmailContent {
            subject: format!("Daily Devotional: {}", devotional.title),
            html: self.tera.render(DEVOTIONAL, &ctx)?,
        })
    }

    pub fn notification(&self, request: &NotificationRequest) -> Result<EmailContent, tera::Error> {
        let subject = request.subject();
        let mut ctx = Context::new();
        ctx.insert("heading", &subject);
        ctx.insert("message", request.kind.teaser());
        ctx.insert("cta_url", &request.url);
        ctx.insert("cta_label", "Open");
        ctx.insert("unsubscribe_url", &self.site.unsubscribe_url);

        Ok(EmailContent {
            subject,
            html: self.tera.render(NOTIFICATION, &ctx)?,
        })
    }

    /// Admin-authored content is inserted as-is, with newlines kept as `<br>`.
    pub fn newsletter(&self, subject: &str, content: &str) -> Result<EmailContent, tera::Error> {
        let mut ctx = Context::new();
        ctx.insert("content", &content.replace("\r\n", "\n").replace('\n', "<br>"));
        ctx.insert("year", &Utc::now().year());

        Ok(EmailContent {
            subject: subject.to_string(),
            html: self.tera.render(NEWSLETTER, &ctx)?,
        })
    }
}
