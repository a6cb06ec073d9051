use super::clock::Clock;
use crate::error::InputError;
use std::fmt;
use std::str::FromStr;

/// Kind of event marked on the day timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookmarkKind {
    Coffee,
    Gym,
    Sleep,
    Wake,
    Other,
}

impl BookmarkKind {
    /// Display label stored on the bookmark
    pub fn label(&self) -> &'static str {
        match self {
            Self::Coffee => "Break",
            Self::Gym => "Gym",
            Self::Sleep => "Sleep",
            Self::Wake => "Wake Up",
            Self::Other => "Other",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Coffee => "coffee",
            Self::Gym => "gym",
            Self::Sleep => "sleep",
            Self::Wake => "wake",
            Self::Other => "other",
        }
    }

    pub fn glyph(&self, use_emoji: bool) -> &'static str {
        if !use_emoji {
            return match self {
                Self::Coffee => "C",
                Self::Gym => "G",
                Self::Sleep => "S",
                Self::Wake => "W",
                Self::Other => "*",
            };
        }
        match self {
            Self::Coffee => "☕",
            Self::Gym => "🏋",
            Self::Sleep => "🌙",
            Self::Wake => "☀",
            Self::Other => "📌",
        }
    }

    pub fn all() -> &'static [BookmarkKind] {
        &[Self::Coffee, Self::Gym, Self::Sleep, Self::Wake, Self::Other]
    }

    /// Next kind in `all()` order, wrapping around
    pub fn next(&self) -> Self {
        let all = Self::all();
        let pos = all.iter().position(|k| k == self).unwrap_or(0);
        all[(pos + 1) % all.len()]
    }

    pub fn prev(&self) -> Self {
        let all = Self::all();
        let pos = all.iter().position(|k| k == self).unwrap_or(0);
        all[(pos + all.len() - 1) % all.len()]
    }
}

impl FromStr for BookmarkKind {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "coffee" => Ok(Self::Coffee),
            "gym" => Ok(Self::Gym),
            "sleep" => Ok(Self::Sleep),
            "wake" => Ok(Self::Wake),
            "other" => Ok(Self::Other),
            other => Err(InputError::UnknownBookmarkKind(other.to_string())),
        }
    }
}

impl fmt::Display for BookmarkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An `{hour, minute}` pair as produced by a time picker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeOfDay {
    pub hour: u32,
    pub minute: u32,
}

impl TimeOfDay {
    /// Parse "HH:MM" (24-hour). Anything else is rejected.
    pub fn parse(input: &str) -> Result<Self, InputError> {
        let malformed = || InputError::MalformedTime(input.to_string());
        let (h, m) = input.trim().split_once(':').ok_or_else(malformed)?;
        let hour: u32 = h.trim().parse().map_err(|_| malformed())?;
        let minute: u32 = m.trim().parse().map_err(|_| malformed())?;
        if hour >= 24 || minute >= 60 {
            return Err(malformed());
        }
        Ok(Self { hour, minute })
    }

    pub fn hour_of_day(&self) -> f64 {
        self.hour as f64 + self.minute as f64 / 60.0
    }
}

/// A labeled point on the 24-hour timeline. Never changed after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct Bookmark {
    pub kind: BookmarkKind,
    /// Decimal hour in [0, 24)
    pub hour_of_day: f64,
    pub label: String,
}

impl Bookmark {
    /// "HH:MM" rendering of the marker position
    pub fn time_formatted(&self) -> String {
        let total_minutes = (self.hour_of_day * 60.0).round() as u32;
        format!("{:02}:{:02}", (total_minutes / 60) % 24, total_minutes % 60)
    }
}

/// Unordered bag of bookmarks; duplicates are allowed
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    bookmarks: Vec<Bookmark>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.bookmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookmarks.is_empty()
    }

    pub fn bookmarks(&self) -> &[Bookmark] {
        &self.bookmarks
    }

    /// Append a bookmark at a decimal hour; rejects non-finite or out-of-range hours
    pub fn add(&mut self, kind: BookmarkKind, hour_of_day: f64) -> Result<(), InputError> {
        if !hour_of_day.is_finite() || !(0.0..24.0).contains(&hour_of_day) {
            return Err(InputError::HourOutOfRange(hour_of_day));
        }
        self.bookmarks.push(Bookmark {
            kind,
            hour_of_day,
            label: kind.label().to_string(),
        });
        Ok(())
    }

    /// Append a bookmark from an "HH:MM" string
    pub fn add_at(&mut self, kind: BookmarkKind, time: &str) -> Result<(), InputError> {
        let time = TimeOfDay::parse(time)?;
        self.add(kind, time.hour_of_day())
    }

    /// Remove by position; later bookmarks shift down. Out of range is a no-op.
    pub fn remove(&mut self, index: usize) -> Option<Bookmark> {
        if index < self.bookmarks.len() {
            Some(self.bookmarks.remove(index))
        } else {
            None
        }
    }

    /// Bookmarks paired with their position, ordered by hour for display
    pub fn sorted(&self) -> Vec<(usize, &Bookmark)> {
        let mut entries: Vec<(usize, &Bookmark)> = self.bookmarks.iter().enumerate().collect();
        entries.sort_by(|a, b| a.1.hour_of_day.total_cmp(&b.1.hour_of_day));
        entries
    }

    /// Position of the "you are here" marker
    pub fn current_hour(&self, clock: &dyn Clock) -> f64 {
        clock.current_hour()
    }
}
