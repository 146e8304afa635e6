#[derive(serde::Deserialize, Debug)]
pub struct BodySchema {
    pub subject: Option<String>,
    pub content: Option<String>,
    pub subscribers: Option<Vec<String>>,
}

/// A newsletter issue with an explicit, non-empty recipient list.
#[derive(Debug)]
pub struct NewsletterIssue {
    pub subject: String,
    pub content: String,
    pub subscribers: Vec<String>,
}

impl TryFrom<BodySchema> for NewsletterIssue {
    type Error = String;

    fn try_from(body: BodySchema) -> Result<Self, Self::Error> {
        let present = |v: Option<String>| v.filter(|s| !s.is_empty());
        match (
            present(body.subject),
            present(body.content),
            body.subscribers.filter(|s| !s.is_empty()),
        ) {
            (Some(subject), Some(content), Some(subscribers)) => Ok(Self {
                subject,
                content,
                subscribers,
            }),
            _ => Err("Missing required fields".to_string()),
        }
    }
}

#[derive(serde::Serialize)]
pub struct NewsletterSent {
    pub success: bool,
    pub sent: usize,
    pub failed: usize,
    pub total: usize,
}
