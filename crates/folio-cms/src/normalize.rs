//! Normalization of raw content-source records into the domain model.
//!
//! Every function here is total: missing or mistyped fields collapse to empty
//! strings, empty lists, zeros, or `None` instead of failing outward. Records
//! arrive in two shapes depending on the source version (fields directly on
//! the record object, or nested under an `attributes` sub-object); both are
//! accepted everywhere.

use std::cmp::Reverse;
use std::collections::HashSet;

use chrono::NaiveDate;
use serde_json::{Map, Value};

use folio_core::{
    Engagement, FileAsset, ImageAsset, Profile, SiteMetadata, SkillEntry, SocialChannel,
};

/// Rendition fallback order when a media object's direct `url` is empty.
const RENDITION_ORDER: [&str; 4] = ["large", "medium", "small", "thumbnail"];

// ---------------------------------------------------------------------------
// Record access
// ---------------------------------------------------------------------------

/// Returns the field map of a record, looking through the optional
/// `attributes` sub-object that one source version nests fields under.
fn record_fields(record: &Value) -> Option<&Map<String, Value>> {
    let object = record.as_object()?;
    match object.get("attributes").and_then(Value::as_object) {
        Some(attributes) => Some(attributes),
        None => Some(object),
    }
}

/// Record id, which lives on the record object itself in both source shapes.
fn record_id(record: &Value) -> i64 {
    record.get("id").and_then(Value::as_i64).unwrap_or(0)
}

fn string_field(fields: &Map<String, Value>, key: &str) -> String {
    fields
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned()
}

/// Reads an optional string field; `""` and non-string values count as absent.
fn optional_string_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    fields
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

/// Reads a list-of-strings field; any non-list value collapses to `[]` and
/// non-string elements are skipped.
fn string_list_field(fields: &Map<String, Value>, key: &str) -> Vec<String> {
    match fields.get(key).and_then(Value::as_array) {
        Some(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(String::from)
            .collect(),
        None => Vec::new(),
    }
}

fn dimension_field(fields: &Map<String, Value>, key: &str) -> u32 {
    fields
        .get(key)
        .and_then(Value::as_u64)
        .and_then(|v| u32::try_from(v).ok())
        .unwrap_or(0)
}

/// Parses a `"YYYY-MM-DD"` date string into a [`NaiveDate`].
///
/// Returns `None` if the string does not match the expected format.
#[must_use]
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

// ---------------------------------------------------------------------------
// Media resolution
// ---------------------------------------------------------------------------

/// Looks through the `{ "data": { "attributes": ... } }` wrappers around a
/// media reference, returning the innermost field map.
fn media_fields(value: &Value) -> Option<&Map<String, Value>> {
    let object = value.as_object()?;
    if let Some(data) = object.get("data") {
        return media_fields(data);
    }
    match object.get("attributes").and_then(Value::as_object) {
        Some(attributes) => Some(attributes),
        None => Some(object),
    }
}

/// Prefixes the content-source origin onto relative asset paths; absolute
/// URLs pass through untouched.
fn resolve_url(raw: &str, origin: &str) -> String {
    if raw.starts_with("http://") || raw.starts_with("https://") {
        raw.to_owned()
    } else {
        format!("{origin}{raw}")
    }
}

fn non_empty(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Picks the best available URL for a media object: the direct `url` first,
/// then the renditions in [`RENDITION_ORDER`]. Returns `None` when nothing
/// resolves to a non-empty string.
fn resolve_media_url(media: &Map<String, Value>, origin: &str) -> Option<String> {
    let from_renditions = || {
        let formats = media.get("formats").and_then(Value::as_object)?;
        RENDITION_ORDER
            .iter()
            .find_map(|name| non_empty(formats.get(*name).and_then(|f| f.get("url"))))
    };
    let raw = non_empty(media.get("url")).or_else(from_renditions)?;
    Some(resolve_url(raw, origin))
}

/// Resolves an image reference into an [`ImageAsset`] with an absolute URL.
///
/// Accepts every shape the source emits: absent/`null`, a `{ "data": ... }`
/// wrapper (possibly with a nested `attributes` object), or the bare media
/// object. When no URL resolves the asset is absent rather than carrying a
/// broken URL.
#[must_use]
pub fn normalize_image(value: Option<&Value>, origin: &str) -> Option<ImageAsset> {
    let media = media_fields(value?)?;
    let url = resolve_media_url(media, origin)?;
    Some(ImageAsset {
        url,
        alt_text: string_field(media, "alternativeText"),
        width: dimension_field(media, "width"),
        height: dimension_field(media, "height"),
    })
}

// ---------------------------------------------------------------------------
// Entity normalizers
// ---------------------------------------------------------------------------

/// Normalizes the profile document. Returns `None` only when the record is
/// not an object at all; field-level gaps default instead.
#[must_use]
pub fn normalize_profile(record: &Value, origin: &str) -> Option<Profile> {
    let fields = record_fields(record)?;
    Some(Profile {
        title: string_field(fields, "title"),
        subtitle: string_field(fields, "subtitle"),
        description: string_field(fields, "description"),
        image: normalize_image(fields.get("profileImage"), origin),
    })
}

/// Normalizes one work-history record.
#[must_use]
pub fn normalize_engagement(record: &Value, origin: &str) -> Option<Engagement> {
    let fields = record_fields(record)?;
    Some(Engagement {
        id: record_id(record),
        company: string_field(fields, "company"),
        position: string_field(fields, "position"),
        start_date: string_field(fields, "startDate"),
        end_date: optional_string_field(fields, "endDate"),
        description: string_field(fields, "description"),
        responsibilities: string_list_field(fields, "responsibilities"),
        technologies: string_list_field(fields, "technologies"),
        logo: normalize_image(fields.get("companyLogo"), origin),
        website: optional_string_field(fields, "companyWebsite"),
    })
}

/// Normalizes the work-history collection and re-sorts it newest first.
///
/// The source is asked to sort, but the ordering invariant is enforced
/// locally; records whose start date does not parse sort last.
#[must_use]
pub fn normalize_engagements(records: &[Value], origin: &str) -> Vec<Engagement> {
    let mut engagements: Vec<Engagement> = records
        .iter()
        .filter_map(|record| normalize_engagement(record, origin))
        .collect();
    engagements.sort_by_key(|e| Reverse(parse_date(&e.start_date)));
    engagements
}

/// Normalizes one skill record.
#[must_use]
pub fn normalize_skill(record: &Value) -> Option<SkillEntry> {
    let fields = record_fields(record)?;
    let years = fields
        .get("yearsOfExperience")
        .and_then(Value::as_i64)
        .and_then(|v| i32::try_from(v).ok())
        .unwrap_or(0);
    Some(SkillEntry {
        id: record_id(record),
        name: string_field(fields, "name"),
        years_of_experience: years,
        category: optional_string_field(fields, "category"),
    })
}

/// Normalizes the skill collection, re-sorted by years of experience
/// descending. No dedup.
#[must_use]
pub fn normalize_skills(records: &[Value]) -> Vec<SkillEntry> {
    let mut skills: Vec<SkillEntry> = records.iter().filter_map(normalize_skill).collect();
    skills.sort_by_key(|s| Reverse(s.years_of_experience));
    skills
}

/// Resolves the CV record into a [`FileAsset`].
///
/// The document nests the file under a `file` member, wrapped like any media
/// reference. An absent file or an unresolvable URL yields `None`.
#[must_use]
pub fn normalize_cv(record: Option<&Value>, origin: &str) -> Option<FileAsset> {
    let fields = record_fields(record?)?;
    let file = media_fields(fields.get("file")?)?;
    let raw = non_empty(file.get("url"))?;
    Some(FileAsset {
        url: resolve_url(raw, origin),
        name: string_field(file, "name"),
        mime: string_field(file, "mime"),
        size: file.get("size").and_then(Value::as_f64).unwrap_or(0.0),
    })
}

/// Normalizes keywords from either a list or a comma-separated string into a
/// trimmed list; anything else yields `[]`.
#[must_use]
pub fn normalize_keywords(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(String::from)
            .collect(),
        Some(Value::String(joined)) => joined.split(',').map(|k| k.trim().to_owned()).collect(),
        _ => Vec::new(),
    }
}

/// Normalizes the site-metadata document.
#[must_use]
pub fn normalize_metadata(record: &Value, origin: &str) -> Option<SiteMetadata> {
    let fields = record_fields(record)?;
    Some(SiteMetadata {
        title_uk: string_field(fields, "titleUk"),
        title_en: string_field(fields, "titleEn"),
        description_uk: string_field(fields, "descriptionUk"),
        description_en: string_field(fields, "descriptionEn"),
        keywords: normalize_keywords(fields.get("keywords")),
        og_image: normalize_image(fields.get("ogImage"), origin),
        twitter_image: normalize_image(fields.get("twitterImage"), origin),
    })
}

/// Normalizes one social-link record.
#[must_use]
pub fn normalize_social_channel(record: &Value, origin: &str) -> Option<SocialChannel> {
    let fields = record_fields(record)?;
    Some(SocialChannel {
        id: record_id(record),
        name: string_field(fields, "name"),
        url: string_field(fields, "url"),
        handle: optional_string_field(fields, "handle"),
        icon: normalize_image(fields.get("icon"), origin),
    })
}

/// Normalizes the social-link collection, deduplicating by case-insensitive
/// trimmed URL. The first occurrence is authoritative, icon resolution
/// included; later duplicates are dropped even when their ids differ.
#[must_use]
pub fn normalize_social_channels(records: &[Value], origin: &str) -> Vec<SocialChannel> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter_map(|record| normalize_social_channel(record, origin))
        .filter(|channel| seen.insert(channel.url.trim().to_lowercase()))
        .collect()
}
