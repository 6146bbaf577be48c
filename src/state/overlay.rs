//! Program overlay entries and the "single active entry" selection model.

/// A program the on-air overlay can display.
///
/// At most one entry is `active` at a time. `visible` is stored per entry but
/// only the active entry's flag decides what the overlay shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayEntry {
    pub id: i64,
    pub title: String,
    pub subtitle: String,
    /// Location or live state line (e.g. "ONLINE").
    pub location: String,
    pub active: bool,
    pub visible: bool,
}

/// Text fields of a new overlay entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayEntryInput {
    pub title: String,
    pub subtitle: String,
    pub location: String,
}

/// Text fields to overwrite on an existing entry; `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverlayEntryPatch {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub location: Option<String>,
}

/// What the public overlay renders: the active entry, or a blank hidden card.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActiveOverlay {
    pub id: Option<i64>,
    pub title: String,
    pub subtitle: String,
    pub location: String,
    pub visible: bool,
}

impl From<Option<OverlayEntry>> for ActiveOverlay {
    fn from(entry: Option<OverlayEntry>) -> Self {
        match entry {
            Some(entry) => Self {
                id: Some(entry.id),
                title: entry.title,
                subtitle: entry.subtitle,
                location: entry.location,
                visible: entry.visible,
            },
            None => Self::default(),
        }
    }
}

/// Entry created on first boot so the overlay has something to show.
pub fn station_card() -> OverlayEntryInput {
    OverlayEntryInput {
        title: "BARRIGUDA WEB TV".into(),
        subtitle: "Irecê - Bahia".into(),
        location: "ONLINE".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_active_entry_renders_hidden_blank_card() {
        let view = ActiveOverlay::from(None);
        assert_eq!(view.id, None);
        assert!(!view.visible);
        assert!(view.title.is_empty() && view.subtitle.is_empty() && view.location.is_empty());
    }
}
