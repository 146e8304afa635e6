/// What kind of content a notification announces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Devotional,
    Post,
    Video,
    Other,
}

impl NotificationKind {
    /// Unknown kinds are announced as a generic update.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "devotional" => Self::Devotional,
            "post" => Self::Post,
            "video" => Self::Video,
            _ => Self::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Devotional => "devotional",
            Self::Post => "post",
            Self::Video => "video",
            Self::Other => "other",
        }
    }

    pub fn subject(&self, title: &str) -> String {
        match self {
            Self::Devotional => format!("Daily Devotional: {title}"),
            Self::Post => format!("New Blog Post: {title}"),
            Self::Video => format!("New Video: {title}"),
            Self::Other => format!("New Update: {title}"),
        }
    }

    pub fn teaser(&self) -> &'static str {
        match self {
            Self::Devotional => "A new devotional has been published. Click below to read it now.",
            Self::Post => "A new blog post is live. Click below to read it now.",
            Self::Video => "A new video has been uploaded. Watch it now.",
            Self::Other => "There is a new update. Check it out below.",
        }
    }
}

/// A validated request to announce new content to every active subscriber.
#[derive(Debug, Clone)]
pub struct NotificationRequest {
    pub kind: NotificationKind,
    pub title: String,
    pub url: String,
}

impl NotificationRequest {
    /// All three fields must be present and non-blank.
    pub fn parse(
        kind: Option<String>,
        title: Option<String>,
        url: Option<String>,
    ) -> Result<Self, String> {
        let present = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        match (present(kind), present(title), present(url)) {
            (Some(kind), Some(title), Some(url)) => Ok(Self {
                kind: NotificationKind::parse(&kind),
                title: title.trim().to_string(),
                url: url.trim().to_string(),
            }),
            _ => Err("Missing fields".to_string()),
        }
    }

    pub fn subject(&self) -> String {
        self.kind.subject(&self.title)
    }
}
