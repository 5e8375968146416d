//! OpenSearch index configuration and mappings.
//!
//! This module defines the settings and mappings of the two talk indexes.
//! The private mapping covers every field the talk source produces, including
//! committee-only data. The public mapping leaves those fields out.

use serde_json::{json, Map, Value};

/// Default name of the private (administration) talk index.
pub const DEFAULT_PRIVATE_INDEX: &str = "javazone_private";

/// Default name of the public talk index.
pub const DEFAULT_PUBLIC_INDEX: &str = "javazone_public";

const DATE_FORMAT: &str = "strict_date_optional_time||epoch_millis";

fn keyword() -> Value {
    json!({ "type": "keyword" })
}

fn unindexed_keyword() -> Value {
    json!({ "type": "keyword", "index": false })
}

fn text() -> Value {
    json!({ "type": "text" })
}

fn text_with_keyword() -> Value {
    json!({
        "type": "text",
        "fields": {
            "keyword": {
                "type": "keyword",
                "ignore_above": 256
            }
        }
    })
}

fn date() -> Value {
    json!({ "type": "date", "format": DATE_FORMAT })
}

fn feedback_summary() -> Value {
    json!({
        "properties": {
            "count": { "type": "integer" },
            "enjoySum": { "type": "integer" },
            "usefulSum": { "type": "integer" },
            "commentList": { "type": "text" }
        }
    })
}

fn properties(fields: Vec<(&str, Value)>) -> Value {
    let map: Map<String, Value> = fields
        .into_iter()
        .map(|(name, field)| (name.to_string(), field))
        .collect();
    Value::Object(map)
}

/// Talk data fields present in both indexes.
fn public_data_fields() -> Vec<(&'static str, Value)> {
    vec![
        ("title", text_with_keyword()),
        ("abstract", text()),
        ("intendedAudience", text()),
        ("format", keyword()),
        ("language", keyword()),
        ("length", keyword()),
        ("level", keyword()),
        ("keywords", text_with_keyword()),
        ("suggestedKeywords", text_with_keyword()),
        ("suggestedCategory", keyword()),
        ("room", keyword()),
        ("startTime", date()),
        ("endTime", date()),
        ("video", unindexed_keyword()),
        ("slug", keyword()),
        ("published", keyword()),
        ("workshopPrerequisites", text()),
        ("feedback", feedback_summary()),
    ]
}

/// Talk data fields only present in the private index.
fn private_data_fields() -> Vec<(&'static str, Value)> {
    vec![
        ("outline", text()),
        ("equipment", text()),
        ("infoToProgramCommittee", text()),
        ("participation", text()),
        ("postedBy", keyword()),
        ("boardingTime", date()),
        ("communicatedRoom", keyword()),
        ("communicatedStartTime", date()),
        ("status", keyword()),
        ("preparations", text()),
        ("tags", keyword()),
        (
            "tagswithauthor",
            json!({
                "type": "nested",
                "properties": {
                    "author": { "type": "keyword" },
                    "tag": { "type": "keyword" }
                }
            }),
        ),
        (
            "pkomfeedbacks",
            json!({
                "type": "nested",
                "properties": {
                    "id": { "type": "keyword" },
                    "talkid": { "type": "keyword" },
                    "author": { "type": "keyword" },
                    "feedbacktype": { "type": "keyword" },
                    "info": { "type": "text" },
                    "created": { "type": "keyword" }
                }
            }),
        ),
    ]
}

fn public_speaker_fields() -> Vec<(&'static str, Value)> {
    vec![
        ("bio", text()),
        ("twitter", keyword()),
        ("linkedin", unindexed_keyword()),
        ("bluesky", keyword()),
        ("pictureId", unindexed_keyword()),
    ]
}

fn private_speaker_fields() -> Vec<(&'static str, Value)> {
    vec![
        ("residence", keyword()),
        ("zip-code", keyword()),
        ("emailAlias", keyword()),
        ("speakerAlias", keyword()),
    ]
}

fn talk_index_body(data_fields: Vec<(&str, Value)>, speaker_fields: Vec<(&str, Value)>) -> Value {
    json!({
        "settings": {
            "number_of_shards": 1,
            "number_of_replicas": 1,
            "analysis": {
                "analyzer": {
                    "default": {
                        "type": "standard"
                    }
                }
            }
        },
        "mappings": {
            "properties": {
                "id": keyword(),
                "conferenceId": keyword(),
                "conferenceSlug": keyword(),
                "conferenceName": text_with_keyword(),
                "status": keyword(),
                "created": date(),
                "lastUpdated": date(),
                "data": {
                    "properties": properties(data_fields)
                },
                "speakers": {
                    "type": "nested",
                    "properties": {
                        "id": keyword(),
                        "name": text_with_keyword(),
                        "data": {
                            "properties": properties(speaker_fields)
                        }
                    }
                }
            }
        }
    })
}

/// Index settings and mappings for the private talk index.
///
/// Includes sensitive data such as program committee feedback, submitter
/// e-mails and internal notes.
pub fn talk_private_index_mapping() -> Value {
    let mut data_fields = public_data_fields();
    data_fields.extend(private_data_fields());

    let mut speaker_fields = public_speaker_fields();
    speaker_fields.extend(private_speaker_fields());

    talk_index_body(data_fields, speaker_fields)
}

/// Index settings and mappings for the public talk index.
pub fn talk_public_index_mapping() -> Value {
    talk_index_body(public_data_fields(), public_speaker_fields())
}
