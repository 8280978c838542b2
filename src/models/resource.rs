//! Resource (catalog entry) model and related types.
//!
//! A resource is a shared record (title, genre) plus a kind-specific [`Media`]
//! payload. The descriptive part, [`ResourceDetails`], is the identity used to
//! merge duplicate additions; `id`, `quantity` and `availability_status` are
//! catalog bookkeeping and can only be changed by the catalog.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::enums::ResourceKind;
use crate::error::{AppError, AppResult};

pub type ResourceId = i32;

/// Kind-specific descriptive fields, tagged by `kind` in serialized form
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Media {
    Book {
        author: String,
        isbn: String,
    },
    Dvd {
        director: String,
        duration: String,
    },
    Cd {
        artist: String,
        duration: String,
    },
    Magazine {
        publisher: String,
        publication_date: NaiveDate,
    },
}

impl Media {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Media::Book { .. } => ResourceKind::Book,
            Media::Dvd { .. } => ResourceKind::Dvd,
            Media::Cd { .. } => ResourceKind::Cd,
            Media::Magazine { .. } => ResourceKind::Magazine,
        }
    }
}

/// What a borrower sees of a resource: everything but the catalog bookkeeping
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceDetails {
    pub title: String,
    pub genre: String,
    #[serde(flatten)]
    pub media: Media,
}

/// Full resource model as held by the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resource {
    id: Option<ResourceId>,
    #[serde(flatten)]
    details: ResourceDetails,
    quantity: i32,
    availability_status: bool,
}

impl Resource {
    /// A resource not yet in any catalog: no id, no copies, unavailable.
    pub fn new(details: ResourceDetails) -> Self {
        Self {
            id: None,
            details,
            quantity: 0,
            availability_status: false,
        }
    }

    pub fn book(
        title: impl Into<String>,
        genre: impl Into<String>,
        author: impl Into<String>,
        isbn: impl Into<String>,
    ) -> Self {
        Self::with_media(
            title,
            genre,
            Media::Book {
                author: author.into(),
                isbn: isbn.into(),
            },
        )
    }

    pub fn dvd(
        title: impl Into<String>,
        genre: impl Into<String>,
        director: impl Into<String>,
        duration: impl Into<String>,
    ) -> Self {
        Self::with_media(
            title,
            genre,
            Media::Dvd {
                director: director.into(),
                duration: duration.into(),
            },
        )
    }

    pub fn cd(
        title: impl Into<String>,
        genre: impl Into<String>,
        artist: impl Into<String>,
        duration: impl Into<String>,
    ) -> Self {
        Self::with_media(
            title,
            genre,
            Media::Cd {
                artist: artist.into(),
                duration: duration.into(),
            },
        )
    }

    pub fn magazine(
        title: impl Into<String>,
        genre: impl Into<String>,
        publisher: impl Into<String>,
        publication_date: NaiveDate,
    ) -> Self {
        Self::with_media(
            title,
            genre,
            Media::Magazine {
                publisher: publisher.into(),
                publication_date,
            },
        )
    }

    fn with_media(title: impl Into<String>, genre: impl Into<String>, media: Media) -> Self {
        Self::new(ResourceDetails {
            title: title.into(),
            genre: genre.into(),
            media,
        })
    }

    /// Build a resource from a JSON record such as
    /// `{"kind": "book", "title": "...", "genre": "...", "author": "...", "isbn": "..."}`.
    ///
    /// Unknown or missing `kind` tags are rejected as unsupported types before the
    /// rest of the record is looked at.
    pub fn from_value(value: serde_json::Value) -> AppResult<Self> {
        let kind = match value.get("kind") {
            Some(serde_json::Value::String(kind)) => kind.as_str(),
            Some(other) => return Err(AppError::UnsupportedType(other.to_string())),
            None => return Err(AppError::UnsupportedType("<missing kind>".to_string())),
        };
        kind.parse::<ResourceKind>()?;

        let details: ResourceDetails = serde_json::from_value(value)?;
        Ok(Self::new(details))
    }

    pub fn id(&self) -> Option<ResourceId> {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.details.title
    }

    pub fn genre(&self) -> &str {
        &self.details.genre
    }

    pub fn media(&self) -> &Media {
        &self.details.media
    }

    pub fn kind(&self) -> ResourceKind {
        self.details.media.kind()
    }

    pub fn details(&self) -> &ResourceDetails {
        &self.details
    }

    pub fn quantity(&self) -> i32 {
        self.quantity
    }

    pub fn availability_status(&self) -> bool {
        self.availability_status
    }

    /// Two resources share an identity when kind and all descriptive fields match
    pub fn same_identity(&self, other: &Resource) -> bool {
        self.details == other.details
    }

    pub(crate) fn assign_id(&mut self, id: ResourceId) {
        self.id = Some(id);
    }

    /// Every quantity change goes through here so availability never drifts.
    pub(crate) fn set_quantity(&mut self, quantity: i32) {
        self.quantity = quantity;
        self.availability_status = quantity > 0;
    }
}

/// Exact-match lookup criteria.
///
/// A resource matches when ANY supplied field equals the resource's value for that
/// field. Kind-specific fields only ever match resources of a kind that has them.
/// An empty query matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceQuery {
    pub id: Option<ResourceId>,
    pub title: Option<String>,
    pub genre: Option<String>,
    pub author: Option<String>,
    pub isbn: Option<String>,
    pub director: Option<String>,
    pub artist: Option<String>,
    pub duration: Option<String>,
    pub publisher: Option<String>,
    pub publication_date: Option<NaiveDate>,
}

impl ResourceQuery {
    pub fn by_id(id: ResourceId) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    pub fn by_title(title: impl Into<String>) -> Self {
        Self::default().title(title)
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn isbn(mut self, isbn: impl Into<String>) -> Self {
        self.isbn = Some(isbn.into());
        self
    }

    pub fn director(mut self, director: impl Into<String>) -> Self {
        self.director = Some(director.into());
        self
    }

    pub fn artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = Some(artist.into());
        self
    }

    /// Running time of a DVD or CD, as written on the record
    pub fn duration(mut self, duration: impl Into<String>) -> Self {
        self.duration = Some(duration.into());
        self
    }

    pub fn publisher(mut self, publisher: impl Into<String>) -> Self {
        self.publisher = Some(publisher.into());
        self
    }

    pub fn publication_date(mut self, publication_date: NaiveDate) -> Self {
        self.publication_date = Some(publication_date);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn matches(&self, resource: &Resource) -> bool {
        if self.id.is_some() && self.id == resource.id {
            return true;
        }
        if eq(&self.title, resource.title()) || eq(&self.genre, resource.genre()) {
            return true;
        }
        match resource.media() {
            Media::Book { author, isbn } => eq(&self.author, author) || eq(&self.isbn, isbn),
            Media::Dvd { director, duration } => {
                eq(&self.director, director) || eq(&self.duration, duration)
            }
            Media::Cd { artist, duration } => {
                eq(&self.artist, artist) || eq(&self.duration, duration)
            }
            Media::Magazine {
                publisher,
                publication_date,
            } => {
                eq(&self.publisher, publisher)
                    || self.publication_date.as_ref() == Some(publication_date)
            }
        }
    }
}

fn eq(wanted: &Option<String>, actual: &str) -> bool {
    wanted.as_deref() == Some(actual)
}

impl std::fmt::Display for ResourceQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut parts = Vec::new();
        if let Some(id) = self.id {
            parts.push(format!("id={}", id));
        }
        let text_fields = [
            ("title", &self.title),
            ("genre", &self.genre),
            ("author", &self.author),
            ("isbn", &self.isbn),
            ("director", &self.director),
            ("artist", &self.artist),
            ("duration", &self.duration),
            ("publisher", &self.publisher),
        ];
        for (name, value) in text_fields {
            if let Some(value) = value {
                parts.push(format!("{}={:?}", name, value));
            }
        }
        if let Some(date) = self.publication_date {
            parts.push(format!("publication_date={}", date));
        }
        write!(f, "{{{}}}", parts.join(", "))
    }
}
