use serde::Serialize;

use crate::identity::MediaKind;

/// One row of a catalog title search
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub id: u64,
    /// Localised title (movie `title` / series `name`)
    pub title: String,
    pub original_title: Option<String>,
    /// Release or first-air date
    pub date: Option<String>,
}

/// Full catalog record for the accepted match
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogCandidate {
    pub id: u64,
    pub kind: MediaKind,
    pub display_title: String,
    pub original_title: Option<String>,
    pub release_date: Option<String>,
    pub first_air_date: Option<String>,
    /// Genre names in catalog order
    pub genres: Vec<String>,
    pub overview: String,
    pub runtime_minutes: Option<u32>,
    pub poster_path: Option<String>,
    pub credits: Option<Credits>,
    /// Attached when a specific episode was requested and found
    pub episode: Option<EpisodeFacet>,
    /// Attached for season packs
    pub season: Option<SeasonFacet>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Credits {
    pub cast: Vec<CastMember>,
    pub crew: Vec<CrewMember>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CastMember {
    pub name: String,
    pub character: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrewMember {
    pub name: String,
    pub job: Option<String>,
}

impl Credits {
    /// First crew member credited as director
    pub fn director(&self) -> Option<&str> {
        self.crew
            .iter()
            .find(|p| p.job.as_deref() == Some("Director"))
            .map(|p| p.name.as_str())
    }

    /// Leading cast members, in billing order
    pub fn top_cast(&self, limit: usize) -> &[CastMember] {
        &self.cast[..self.cast.len().min(limit)]
    }
}

/// Episode-level detail of a series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EpisodeFacet {
    pub title: String,
    pub overview: String,
    pub air_date: Option<String>,
    pub still_path: Option<String>,
}

/// Season-level detail of a series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonFacet {
    pub name: String,
    pub episode_count: usize,
    pub air_date: Option<String>,
    pub poster_path: Option<String>,
}
