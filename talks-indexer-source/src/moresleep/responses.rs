//! Response types of the moresleep API.
//!
//! moresleep answers list endpoints either with a wrapper object
//! (`{"conferences": [...]}`, `{"sessions": [...]}`) or with a bare array;
//! both shapes are accepted. Session data values carry a `privateData` flag
//! that decides which side of the talk they end up on.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::errors::SourceError;
use talks_indexer_shared::{Conference, FieldMap, Speaker, Talk};

#[derive(Debug, Deserialize)]
pub(crate) struct ConferenceResponse {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    slug: String,
}

/// A data field value with its visibility flag.
#[derive(Debug, Deserialize)]
pub(crate) struct DataValue {
    #[serde(default)]
    value: Value,
    #[serde(default, rename = "privateData")]
    private_data: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SpeakerResponse {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    data: BTreeMap<String, DataValue>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SessionResponse {
    id: String,
    #[serde(default)]
    conference_id: String,
    #[serde(default)]
    status: String,
    #[serde(default)]
    posted_by: Option<String>,
    #[serde(default)]
    data: BTreeMap<String, DataValue>,
    #[serde(default)]
    speakers: Vec<SpeakerResponse>,
    #[serde(default, deserialize_with = "flexible_time")]
    created: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "flexible_time")]
    last_updated: Option<DateTime<Utc>>,
}

impl SessionResponse {
    pub(crate) fn conference_id(&self) -> &str {
        &self.conference_id
    }

    /// Convert into a talk, stamping the conference slug and name when the
    /// conference is known.
    pub(crate) fn into_talk(self, conference: Option<&Conference>) -> Talk {
        let mut talk = Talk::new(self.id, self.conference_id, self.status);

        if let Some(conference) = conference {
            talk.conference_slug = conference.slug.clone();
            talk.conference_name = conference.name.clone();
        }

        for (key, field) in self.data {
            if field.private_data {
                talk.private_data.insert(key, field.value);
            } else {
                talk.data.insert(key, field.value);
            }
        }

        if let Some(posted_by) = self.posted_by.filter(|p| !p.is_empty()) {
            talk.private_data
                .insert("postedBy".to_string(), Value::String(posted_by));
        }

        talk.speakers = self.speakers.into_iter().map(SpeakerResponse::into_speaker).collect();
        talk.created = self.created;
        talk.last_updated = self.last_updated;
        talk
    }
}

impl SpeakerResponse {
    /// Speaker attributes flagged private are dropped.
    fn into_speaker(self) -> Speaker {
        let data: FieldMap = self
            .data
            .into_iter()
            .filter(|(_, field)| !field.private_data)
            .map(|(key, field)| (key, field.value))
            .collect();

        Speaker {
            id: self.id,
            name: self.name,
            data,
        }
    }
}

/// Parse a list body that is either `{"<key>": [...]}` or a bare array,
/// keeping the field-level error of the shape that was sent.
fn parse_list<T: DeserializeOwned>(body: &str, key: &str) -> Result<Vec<T>, SourceError> {
    let fail = |e: serde_json::Error| SourceError::parse(format!("failed to unmarshal {}: {}", key, e));

    let list = match serde_json::from_str::<Value>(body).map_err(fail)? {
        Value::Object(mut wrapper) => wrapper.remove(key).ok_or_else(|| {
            SourceError::parse(format!("failed to unmarshal {}: missing field `{}`", key, key))
        })?,
        other => other,
    };

    serde_json::from_value(list).map_err(fail)
}

pub(crate) fn parse_conferences(body: &str) -> Result<Vec<Conference>, SourceError> {
    let conferences: Vec<ConferenceResponse> = parse_list(body, "conferences")?;

    Ok(conferences
        .into_iter()
        .map(|c| Conference::new(c.id, c.name, c.slug))
        .collect())
}

pub(crate) fn parse_sessions(body: &str) -> Result<Vec<SessionResponse>, SourceError> {
    parse_list(body, "sessions")
}

pub(crate) fn parse_session(body: &str) -> Result<SessionResponse, SourceError> {
    serde_json::from_str(body)
        .map_err(|e| SourceError::parse(format!("failed to unmarshal session: {}", e)))
}

/// Accepts RFC 3339, zone-less ISO timestamps (taken as UTC) and epoch
/// milliseconds. Anything else becomes `None`.
fn parse_flexible_time(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
                    .ok()
                    .map(|naive| naive.and_utc())
            }),
        Value::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        _ => None,
    }
}

fn flexible_time<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(parse_flexible_time))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;
    use talks_indexer_shared::TalkStatus;

    fn session_json() -> Value {
        json!({
            "id": "talk-1",
            "conferenceId": "conf-1",
            "status": "APPROVED",
            "postedBy": "speaker@example.com",
            "data": {
                "title": { "value": "Introduction to Rust", "privateData": false },
                "keywords": { "value": ["rust", "ownership"], "privateData": false },
                "infoToProgramCommittee": { "value": "Please schedule early", "privateData": true }
            },
            "speakers": [{
                "id": "speaker-1",
                "name": "John Doe",
                "email": "john@example.com",
                "data": {
                    "bio": { "value": "Rustacean", "privateData": false },
                    "residence": { "value": "Oslo", "privateData": true }
                }
            }],
            "created": "2024-05-01T10:00:00Z",
            "lastUpdated": "2024-05-02T11:30:00.123"
        })
    }

    #[test]
    fn test_parse_conferences_wrapped() {
        let body = r#"{"conferences":[
            {"id":"conf-1","name":"JavaZone 2024","slug":"javazone2024"},
            {"id":"conf-2","name":"JavaZone 2023","slug":"javazone2023"}
        ]}"#;

        let conferences = parse_conferences(body).unwrap();

        assert_eq!(conferences.len(), 2);
        assert_eq!(conferences[0], Conference::new("conf-1", "JavaZone 2024", "javazone2024"));
    }

    #[test]
    fn test_parse_conferences_bare_array() {
        let conferences = parse_conferences(r#"[{"id":"conf-1","name":"Test","slug":"test"}]"#).unwrap();
        assert_eq!(conferences.len(), 1);
        assert_eq!(conferences[0].slug, "test");
    }

    #[test]
    fn test_parse_conferences_invalid_json() {
        let err = parse_conferences("invalid json").unwrap_err();
        assert!(err.to_string().contains("failed to unmarshal conferences"));
    }

    #[test]
    fn test_parse_errors_keep_field_detail() {
        let err = parse_conferences(r#"{"conferences":[{"name":"No id"}]}"#).unwrap_err();
        assert!(err.to_string().contains("missing field `id`"), "{err}");

        let err = parse_sessions(r#"[{"id": 42}]"#).unwrap_err();
        assert!(err.to_string().contains("invalid type"), "{err}");

        let err = parse_sessions(r#"{"talks": []}"#).unwrap_err();
        assert!(err.to_string().contains("missing field `sessions`"), "{err}");
    }

    #[test]
    fn test_parse_sessions_both_shapes() {
        let session = session_json();
        let wrapped = json!({ "sessions": [session.clone()] }).to_string();
        let bare = json!([session]).to_string();

        assert_eq!(parse_sessions(&wrapped).unwrap().len(), 1);
        assert_eq!(parse_sessions(&bare).unwrap().len(), 1);
        assert!(parse_sessions("invalid json")
            .unwrap_err()
            .to_string()
            .contains("failed to unmarshal sessions"));
    }

    #[test]
    fn test_session_into_talk_splits_private_data() {
        let session: SessionResponse = serde_json::from_value(session_json()).unwrap();
        let conference = Conference::new("conf-1", "JavaZone 2024", "javazone2024");

        let talk = session.into_talk(Some(&conference));

        assert_eq!(talk.id, "talk-1");
        assert_eq!(talk.status, TalkStatus::Approved);
        assert_eq!(talk.conference_slug, "javazone2024");
        assert_eq!(talk.conference_name, "JavaZone 2024");
        assert_eq!(talk.data["title"], json!("Introduction to Rust"));
        assert_eq!(talk.data["keywords"], json!(["rust", "ownership"]));
        assert!(!talk.data.contains_key("infoToProgramCommittee"));
        assert_eq!(talk.private_data["infoToProgramCommittee"], json!("Please schedule early"));
        assert_eq!(talk.private_data["postedBy"], json!("speaker@example.com"));
    }

    #[test]
    fn test_speaker_private_attributes_are_dropped() {
        let session: SessionResponse = serde_json::from_value(session_json()).unwrap();
        let talk = session.into_talk(None);

        let speaker = &talk.speakers[0];
        assert_eq!(speaker.name, "John Doe");
        assert_eq!(speaker.data["bio"], json!("Rustacean"));
        assert!(!speaker.data.contains_key("residence"));
        assert!(!speaker.data.contains_key("email"));
    }

    #[test]
    fn test_unknown_conference_leaves_slug_empty() {
        let session: SessionResponse = serde_json::from_value(session_json()).unwrap();
        let talk = session.into_talk(None);
        assert_eq!(talk.conference_slug, "");
        assert_eq!(talk.conference_name, "");
    }

    #[test]
    fn test_flexible_timestamps() {
        let session: SessionResponse = serde_json::from_value(session_json()).unwrap();
        let talk = session.into_talk(None);

        assert_eq!(
            talk.created,
            Some(Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap())
        );
        assert_eq!(
            talk.last_updated.map(|t| t.timestamp_millis()),
            Some(Utc.with_ymd_and_hms(2024, 5, 2, 11, 30, 0).unwrap().timestamp_millis() + 123)
        );
        assert_eq!(parse_flexible_time(&json!("yesterday")), None);
        assert_eq!(
            parse_flexible_time(&json!(0)),
            Some(Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap())
        );
    }
}
