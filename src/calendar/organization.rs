use std::collections::HashMap;
use std::fmt;

use ratatui::style::Color;

/// Organization identifier, an enum-like string key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OrgId(String);

impl OrgId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrgId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

const DEFAULT_ORGS: [(&str, &str, Color); 5] = [
    ("acme", "Acme Corporation", Color::Rgb(255, 85, 85)),
    ("globex", "Globex Corporation", Color::Rgb(80, 250, 123)),
    ("initech", "Initech", Color::Rgb(139, 233, 253)),
    ("umbrella", "Umbrella Corporation", Color::Rgb(255, 184, 108)),
    ("hooli", "Hooli", Color::Rgb(189, 147, 249)),
];

/// Label for the unfiltered view.
pub const ALL_ORGANIZATIONS: &str = "All organizations";

#[derive(Debug, Clone, PartialEq)]
pub struct Organization {
    pub id: OrgId,
    pub name: String,
    pub color: Color,
}

impl Organization {
    pub fn new(id: impl Into<String>, name: impl Into<String>, color: Color) -> Self {
        Self {
            id: OrgId::new(id),
            name: name.into(),
            color,
        }
    }
}

/// The configured organizations with their display names and colors, fixed
/// at startup.
#[derive(Debug, Clone)]
pub struct Organizations {
    ids: Vec<OrgId>,
    entries: HashMap<OrgId, Organization>,
}

impl Organizations {
    /// Builds the registry; a repeated id keeps its first entry.
    pub fn new(entries: impl IntoIterator<Item = Organization>) -> Self {
        let mut ids = Vec::new();
        let mut map = HashMap::new();
        for org in entries {
            if map.contains_key(&org.id) {
                continue;
            }
            ids.push(org.id.clone());
            map.insert(org.id.clone(), org);
        }
        Self { ids, entries: map }
    }

    pub fn ids(&self) -> &[OrgId] {
        &self.ids
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn color(&self, org: &OrgId) -> Option<Color> {
        self.entries.get(org).map(|o| o.color)
    }

    /// Display name, or the raw id for an unknown organization.
    pub fn name<'a>(&'a self, org: &'a OrgId) -> &'a str {
        self.entries
            .get(org)
            .map(|o| o.name.as_str())
            .unwrap_or(org.as_str())
    }

    /// What the active filter is called in titles and the status bar.
    pub fn filter_label<'a>(&'a self, filter: Option<&'a OrgId>) -> &'a str {
        filter.map_or(ALL_ORGANIZATIONS, |org| self.name(org))
    }

    pub fn contains(&self, org: &OrgId) -> bool {
        self.entries.contains_key(org)
    }

    /// The organization after `current`, wrapping to `None` past the end.
    pub fn next_filter(&self, current: Option<&OrgId>) -> Option<OrgId> {
        match current {
            None => self.ids.first().cloned(),
            Some(org) => {
                let pos = self.position(org)?;
                self.ids.get(pos + 1).cloned()
            }
        }
    }

    pub fn prev_filter(&self, current: Option<&OrgId>) -> Option<OrgId> {
        match current {
            None => self.ids.last().cloned(),
            Some(org) => {
                let pos = self.position(org)?;
                pos.checked_sub(1).and_then(|p| self.ids.get(p).cloned())
            }
        }
    }

    /// Index of `org` in the configured order, used by the form's cycler.
    pub fn position(&self, org: &OrgId) -> Option<usize> {
        self.ids.iter().position(|id| id == org)
    }
}

impl Default for Organizations {
    fn default() -> Self {
        Self::new(
            DEFAULT_ORGS
                .iter()
                .map(|(id, name, color)| Organization::new(*id, *name, *color)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_a_color_each() {
        let orgs = Organizations::default();
        assert_eq!(orgs.ids().len(), 5);
        for id in orgs.ids() {
            assert!(orgs.color(id).is_some(), "{id} has no color");
        }
    }

    #[test]
    fn duplicate_ids_keep_first_color() {
        let orgs = Organizations::new([
            Organization::new("a", "First", Color::Red),
            Organization::new("a", "Second", Color::Blue),
        ]);
        assert_eq!(orgs.ids().len(), 1);
        assert_eq!(orgs.color(&OrgId::new("a")), Some(Color::Red));
        assert_eq!(orgs.name(&OrgId::new("a")), "First");
    }

    #[test]
    fn filter_cycles_through_none() {
        let orgs = Organizations::new([
            Organization::new("a", "A", Color::Red),
            Organization::new("b", "B", Color::Blue),
        ]);
        let a = orgs.next_filter(None);
        assert_eq!(a, Some(OrgId::new("a")));
        let b = orgs.next_filter(a.as_ref());
        assert_eq!(b, Some(OrgId::new("b")));
        assert_eq!(orgs.next_filter(b.as_ref()), None);

        assert_eq!(orgs.prev_filter(None), Some(OrgId::new("b")));
        assert_eq!(orgs.prev_filter(Some(&OrgId::new("a"))), None);
    }

    #[test]
    fn names_fall_back_to_id() {
        let orgs = Organizations::default();
        assert_eq!(orgs.name(&OrgId::new("acme")), "Acme Corporation");
        let stranger = OrgId::new("nobody");
        assert_eq!(orgs.name(&stranger), "nobody");
        assert_eq!(orgs.filter_label(None), ALL_ORGANIZATIONS);
        assert_eq!(orgs.filter_label(Some(&OrgId::new("hooli"))), "Hooli");
    }
}
