// SPDX-License-Identifier: GPL-3.0-or-later
use chrono::NaiveDate;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

// ============================================================================
// Value Objects
// ============================================================================

/// Two-letter country/market code, always stored upper-cased.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegionCode([u8; 2]);

impl RegionCode {
    pub const GERMANY: RegionCode = RegionCode(*b"DE");

    /// Accepts exactly two ASCII letters in any case, surrounding whitespace ignored.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().as_bytes() {
            [a, b] if a.is_ascii_alphabetic() && b.is_ascii_alphabetic() => {
                Some(Self([a.to_ascii_uppercase(), b.to_ascii_uppercase()]))
            }
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.0).unwrap_or("DE")
    }

    /// Lower-case form, as used by storefront-style path segments.
    pub fn to_lowercase(&self) -> String {
        self.as_str().to_ascii_lowercase()
    }
}

impl Default for RegionCode {
    fn default() -> Self {
        Self::GERMANY
    }
}

impl std::fmt::Display for RegionCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for RegionCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RegionCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw)
            .ok_or_else(|| de::Error::custom(format!("invalid region code: {raw:?}")))
    }
}

// ============================================================================
// Enums
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseDatePrecision {
    Year,
    Month,
    Day,
}

impl ReleaseDatePrecision {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "year" => Some(Self::Year),
            "month" => Some(Self::Month),
            "day" => Some(Self::Day),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::Month => "month",
            Self::Day => "day",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlbumType {
    Album,
    Single,
    Ep,
    Compilation,
    /// Any type the catalog reports that is not listed above.
    Other,
}

impl AlbumType {
    /// Case-insensitive mapping of the catalog's `album_type` field.
    pub fn from_upstream(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "album" => Some(Self::Album),
            "single" => Some(Self::Single),
            "ep" => Some(Self::Ep),
            "compilation" => Some(Self::Compilation),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Album => "album",
            Self::Single => "single",
            Self::Ep => "ep",
            Self::Compilation => "compilation",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for AlbumType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Release dates
// ============================================================================

/// Calendar release date with year, month or day precision. No time component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReleaseDate {
    pub year: i32,
    pub month: Option<u32>,
    pub day: Option<u32>,
}

impl ReleaseDate {
    pub fn new(year: i32, month: Option<u32>, day: Option<u32>) -> Self {
        Self { year, month, day }
    }

    pub fn precision(&self) -> ReleaseDatePrecision {
        match (self.month, self.day) {
            (None, _) => ReleaseDatePrecision::Year,
            (Some(_), None) => ReleaseDatePrecision::Month,
            (Some(_), Some(_)) => ReleaseDatePrecision::Day,
        }
    }

    /// Parse `YYYY`, `YYYY-MM` or `YYYY-MM-DD`.
    ///
    /// Returns `None` for any other shape or for values that are not a real
    /// calendar date.
    pub fn parse_str(s: &str) -> Option<Self> {
        let parts: Vec<&str> = s.trim().split('-').collect();

        let year: i32 = match parts.first() {
            Some(y) if y.len() == 4 => y.parse().ok()?,
            _ => return None,
        };

        match parts.as_slice() {
            [_] => Some(Self::new(year, None, None)),
            [_, m] => {
                let month: u32 = m.parse().ok()?;
                NaiveDate::from_ymd_opt(year, month, 1)?;
                Some(Self::new(year, Some(month), None))
            }
            [_, m, d] => {
                let month: u32 = m.parse().ok()?;
                let day: u32 = d.parse().ok()?;
                NaiveDate::from_ymd_opt(year, month, day)?;
                Some(Self::new(year, Some(month), Some(day)))
            }
            _ => None,
        }
    }

    /// Drop components finer than `precision`.
    pub fn truncate(self, precision: ReleaseDatePrecision) -> Self {
        match precision {
            ReleaseDatePrecision::Year => Self::new(self.year, None, None),
            ReleaseDatePrecision::Month => Self::new(self.year, self.month, None),
            ReleaseDatePrecision::Day => self,
        }
    }

    /// The exact calendar day, only when the date is known to day precision.
    pub fn exact_day(&self) -> Option<NaiveDate> {
        match (self.month, self.day) {
            (Some(m), Some(d)) => NaiveDate::from_ymd_opt(self.year, m, d),
            _ => None,
        }
    }

    pub fn to_iso8601(&self) -> String {
        match (self.month, self.day) {
            (Some(m), Some(d)) => format!("{:04}-{:02}-{:02}", self.year, m, d),
            (Some(m), None) => format!("{:04}-{:02}", self.year, m),
            (None, _) => format!("{:04}", self.year),
        }
    }
}

impl std::fmt::Display for ReleaseDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

impl Serialize for ReleaseDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ReleaseDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse_str(&raw)
            .ok_or_else(|| de::Error::custom(format!("invalid release date: {raw:?}")))
    }
}

// ============================================================================
// Entities
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistCredit {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// A catalog release. Artists keep upstream credit order, images keep the
/// upstream largest-first order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub id: String,
    pub name: String,
    pub artists: Vec<ArtistCredit>,
    pub release_date: ReleaseDate,
    pub album_type: AlbumType,
    pub images: Vec<Image>,
    pub total_tracks: Option<u32>,
    pub external_url: Option<String>,
}

impl Album {
    pub fn release_date_precision(&self) -> ReleaseDatePrecision {
        self.release_date.precision()
    }

    /// Canonical thumbnail: the first upstream image.
    pub fn thumbnail(&self) -> Option<&Image> {
        self.images.first()
    }

    pub fn artist_names(&self) -> String {
        self.artists
            .iter()
            .map(|artist| artist.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// A chart entry. `images` is platform specific and passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub title: String,
    pub subtitle: String,
    pub share_link: Option<String>,
    pub images: serde_json::Value,
    pub preview_url: Option<String>,
}
