use crate::delivery::DispatchSummary;
use crate::domain::NotificationRequest;

#[derive(serde::Deserialize, Debug)]
pub struct BodySchema {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub title: Option<String>,
    pub url: Option<String>,
}

impl TryFrom<BodySchema> for NotificationRequest {
    type Error = String;

    fn try_from(body: BodySchema) -> Result<Self, Self::Error> {
        NotificationRequest::parse(body.kind, body.title, body.url)
    }
}

#[derive(serde::Serialize)]
pub struct NotificationsSent {
    pub message: &'static str,
    #[serde(flatten)]
    pub summary: DispatchSummary,
}
