//! The normalized portfolio content model.
//!
//! Every type here is a read-only snapshot reconstructed on each fetch from
//! the content source; nothing is persisted. Normalization (in `folio-cms`)
//! guarantees structural completeness: optional assets are represented as
//! `None` rather than broken URLs, and list fields are always present.

use serde::{Deserialize, Serialize};

/// A resolved image reference with an absolute URL.
///
/// Absence of an image is modeled as `Option<ImageAsset>` at the use site —
/// an `ImageAsset` always carries a non-empty, absolute `url`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageAsset {
    pub url: String,
    pub alt_text: String,
    pub width: u32,
    pub height: u32,
}

/// A resolved file reference (the downloadable CV) with an absolute URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileAsset {
    pub url: String,
    pub name: String,
    pub mime: String,
    /// Size as reported by the content source, in kilobytes.
    pub size: f64,
}

/// The "about me" block — the one resource the page cannot render without.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub image: Option<ImageAsset>,
}

/// One job or role in the work history, newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Engagement {
    pub id: i64,
    pub company: String,
    pub position: String,
    /// `YYYY-MM-DD` as supplied by the content source.
    pub start_date: String,
    /// `None` means the engagement is ongoing.
    pub end_date: Option<String>,
    pub description: String,
    pub responsibilities: Vec<String>,
    pub technologies: Vec<String>,
    pub logo: Option<ImageAsset>,
    pub website: Option<String>,
}

/// One skill/tool entry, grouped for display by years of experience.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillEntry {
    pub id: i64,
    pub name: String,
    pub years_of_experience: i32,
    pub category: Option<String>,
}

/// One outbound contact link (GitHub, LinkedIn, …).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialChannel {
    pub id: i64,
    pub name: String,
    pub url: String,
    pub handle: Option<String>,
    pub icon: Option<ImageAsset>,
}

/// SEO/sharing metadata with a bilingual title/description pair.
///
/// Entirely optional: when absent, page titles derive from [`Profile`]
/// (see [`PortfolioSnapshot::display_title`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteMetadata {
    pub title_uk: String,
    pub title_en: String,
    pub description_uk: String,
    pub description_en: String,
    pub keywords: Vec<String>,
    pub og_image: Option<ImageAsset>,
    pub twitter_image: Option<ImageAsset>,
}

/// The complete aggregate handed to the render layer.
///
/// Constructed atomically: either fully populated from the content source
/// (with per-field defaulting) or the canned [`PortfolioSnapshot::fallback`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSnapshot {
    pub profile: Profile,
    pub engagements: Vec<Engagement>,
    pub skills: Vec<SkillEntry>,
    pub cv: Option<FileAsset>,
    pub metadata: Option<SiteMetadata>,
    pub social_channels: Vec<SocialChannel>,
}

impl PortfolioSnapshot {
    /// The canned snapshot served when the content source is unreachable or
    /// the profile document is missing. The page must always render
    /// something, so this substitutes for the whole aggregate rather than
    /// surfacing an error.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            profile: Profile {
                title: "Portfolio".to_string(),
                subtitle: "Full Stack Developer".to_string(),
                description: "Experienced developer focused on building quality web applications."
                    .to_string(),
                image: None,
            },
            engagements: Vec::new(),
            skills: Vec::new(),
            cv: None,
            metadata: None,
            social_channels: Vec::new(),
        }
    }

    /// Page title: the bilingual metadata pair when present, otherwise
    /// derived from the profile.
    #[must_use]
    pub fn display_title(&self) -> String {
        match &self.metadata {
            Some(m) => format!("{} | {}", m.title_uk, m.title_en),
            None => format!("{} - {}", self.profile.title, self.profile.subtitle),
        }
    }

    /// Page description: the bilingual metadata pair when present, otherwise
    /// the profile description.
    #[must_use]
    pub fn display_description(&self) -> String {
        match &self.metadata {
            Some(m) => format!("{} {}", m.description_uk, m.description_en),
            None => self.profile.description.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot_with_metadata() -> PortfolioSnapshot {
        let mut snapshot = PortfolioSnapshot::fallback();
        snapshot.metadata = Some(SiteMetadata {
            title_uk: "Портфоліо".to_string(),
            title_en: "Portfolio".to_string(),
            description_uk: "Опис".to_string(),
            description_en: "Description".to_string(),
            keywords: vec!["rust".to_string()],
            og_image: None,
            twitter_image: None,
        });
        snapshot
    }

    #[test]
    fn fallback_has_placeholder_profile_and_empty_collections() {
        let snapshot = PortfolioSnapshot::fallback();
        assert_eq!(snapshot.profile.title, "Portfolio");
        assert_eq!(snapshot.profile.subtitle, "Full Stack Developer");
        assert!(snapshot.profile.image.is_none());
        assert!(snapshot.engagements.is_empty());
        assert!(snapshot.skills.is_empty());
        assert!(snapshot.cv.is_none());
        assert!(snapshot.metadata.is_none());
        assert!(snapshot.social_channels.is_empty());
    }

    #[test]
    fn display_title_prefers_metadata_pair() {
        let snapshot = snapshot_with_metadata();
        assert_eq!(snapshot.display_title(), "Портфоліо | Portfolio");
    }

    #[test]
    fn display_title_derives_from_profile_when_metadata_absent() {
        let snapshot = PortfolioSnapshot::fallback();
        assert_eq!(snapshot.display_title(), "Portfolio - Full Stack Developer");
    }

    #[test]
    fn display_description_prefers_metadata_pair() {
        let snapshot = snapshot_with_metadata();
        assert_eq!(snapshot.display_description(), "Опис Description");
    }

    #[test]
    fn snapshot_serializes_with_stable_field_names() {
        let snapshot = PortfolioSnapshot::fallback();
        let json = serde_json::to_value(&snapshot).expect("serialize");
        assert!(json["profile"]["title"].is_string());
        assert!(json["engagements"].is_array());
        assert!(json["cv"].is_null());
        assert!(json["social_channels"].is_array());
    }

    #[test]
    fn engagement_round_trips_through_json() {
        let engagement = Engagement {
            id: 7,
            company: "Acme".to_string(),
            position: "Engineer".to_string(),
            start_date: "2023-01-01".to_string(),
            end_date: None,
            description: "Built things.".to_string(),
            responsibilities: vec!["shipping".to_string()],
            technologies: vec!["Rust".to_string()],
            logo: None,
            website: Some("https://acme.example".to_string()),
        };
        let json = serde_json::to_string(&engagement).expect("serialize");
        let back: Engagement = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, engagement);
        assert!(back.end_date.is_none(), "ongoing role keeps open end date");
    }
}
