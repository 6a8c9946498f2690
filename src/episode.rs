use crate::api::Error;
use crate::format::{format_duration, format_published, parse_published};

use serde::Deserialize;

/// A playable podcast episode, flattened for display.
#[derive(Clone, Debug, PartialEq)]
pub struct Episode {
    pub id: String,
    pub title: String,
    pub thumbnail: String,
    pub members: String,
    /// Publication date, already formatted for display.
    pub published_at: String,
    /// Duration in whole seconds.
    pub duration: u64,
    pub duration_as_string: String,
    /// Media URL handed to the audio element.
    pub url: String,
    /// Long form HTML description.
    pub description: Option<String>,
}

/// An episode record as the API returns it.
#[derive(Clone, Debug, Deserialize)]
pub struct RawEpisode {
    pub id: String,
    pub title: String,
    pub thumbnail: String,
    pub members: String,
    pub published_at: String,
    #[serde(default)]
    pub description: Option<String>,
    pub file: RawFile,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RawFile {
    pub url: String,
    pub duration: RawDuration,
}

/// Durations arrive either as numbers or as numeric strings.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum RawDuration {
    Seconds(f64),
    Text(String),
}

impl RawDuration {
    pub fn seconds(&self) -> Result<u64, Error> {
        let seconds = match self {
            RawDuration::Seconds(seconds) => *seconds,
            RawDuration::Text(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|_| Error::InvalidDuration(text.clone()))?,
        };

        if !seconds.is_finite() || seconds < 0. {
            return Err(Error::InvalidDuration(seconds.to_string()));
        }

        Ok(seconds.trunc() as u64)
    }
}

impl TryFrom<RawEpisode> for Episode {
    type Error = Error;

    fn try_from(raw: RawEpisode) -> Result<Self, Self::Error> {
        let duration = raw.file.duration.seconds()?;
        let published = parse_published(&raw.published_at)
            .ok_or_else(|| Error::InvalidDate(raw.published_at.clone()))?;

        Ok(Self {
            id: raw.id,
            title: raw.title,
            thumbnail: raw.thumbnail,
            members: raw.members,
            published_at: format_published(published),
            duration,
            duration_as_string: format_duration(duration),
            url: raw.file.url,
            description: raw.description.filter(|d| !d.trim().is_empty()),
        })
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    const RECORD: &str = r#"{
        "id": "a-importancia-da-contribuicao-em-open-source",
        "title": "Faladev #30 | A importância da contribuição em Open Source",
        "members": "Diego Fernandes, João Pedro, Diego Haz e Bruno Lemos",
        "published_at": "2021-01-22 19:16:00",
        "thumbnail": "https://storage.googleapis.com/golden-wind/nextlevelweek/05-podcastr/opensource.jpg",
        "description": "<p>Nesse episódio do Faladev, Diego Fernandes se reúne com João Pedro.</p>",
        "file": {
            "url": "https://storage.googleapis.com/golden-wind/nextlevelweek/05-podcastr/opensource.m4a",
            "type": "audio/x-m4a",
            "duration": 3981
        }
    }"#;

    #[test]
    fn maps_api_record() {
        let raw: RawEpisode = serde_json::from_str(RECORD).unwrap();
        let episode = Episode::try_from(raw).unwrap();

        assert_eq!(episode.id, "a-importancia-da-contribuicao-em-open-source");
        assert_eq!(episode.published_at, "22 jan 21");
        assert_eq!(episode.duration, 3981);
        assert_eq!(episode.duration_as_string, "01:06:21");
        assert!(episode.url.ends_with("opensource.m4a"));
        assert!(episode.description.unwrap().starts_with("<p>"));
    }

    #[test]
    fn accepts_string_durations() {
        let record = RECORD.replace("\"duration\": 3981", "\"duration\": \"125\"");
        let raw: RawEpisode = serde_json::from_str(&record).unwrap();

        assert_eq!(Episode::try_from(raw).unwrap().duration, 125);
    }

    #[test]
    fn rejects_garbage_durations() {
        let record = RECORD.replace("\"duration\": 3981", "\"duration\": \"long\"");
        let raw: RawEpisode = serde_json::from_str(&record).unwrap();

        assert!(matches!(
            Episode::try_from(raw),
            Err(Error::InvalidDuration(text)) if text == "long"
        ));
    }

    #[test]
    fn rejects_unparseable_dates() {
        let record = RECORD.replace("2021-01-22 19:16:00", "someday");
        let raw: RawEpisode = serde_json::from_str(&record).unwrap();

        assert!(matches!(Episode::try_from(raw), Err(Error::InvalidDate(_))));
    }

    #[test]
    fn missing_description_is_none() {
        let record = RECORD.replace(
            "\"description\": \"<p>Nesse episódio do Faladev, Diego Fernandes se reúne com João Pedro.</p>\",",
            "",
        );
        let raw: RawEpisode = serde_json::from_str(&record).unwrap();

        assert_eq!(Episode::try_from(raw).unwrap().description, None);
    }
}
