use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Section {
    #[default]
    Home,
    Schools,
    Statistics,
    Report,
    About,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Home,
        Section::Schools,
        Section::Statistics,
        Section::Report,
        Section::About,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            Section::Home => "home",
            Section::Schools => "schools",
            Section::Statistics => "stats",
            Section::Report => "report",
            Section::About => "about",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Section::Home => "홈",
            Section::Schools => "학교 찾기",
            Section::Statistics => "통계",
            Section::Report => "제보하기",
            Section::About => "소개",
        }
    }

    /// DOM id of the section element.
    pub fn element_id(self) -> String {
        format!("{}-section", self.slug())
    }

    /// Parses a URL fragment, with or without the leading `#`.
    pub fn from_fragment(fragment: &str) -> Option<Self> {
        let slug = fragment.trim().trim_start_matches('#');
        Section::ALL.into_iter().find(|s| s.slug() == slug)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Exactly one active section at a time; optionally mirrored into the URL
/// fragment so reloads and back-navigation land on the same section.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Navigation {
    active: Section,
    reflect_fragment: bool,
    fragment: Option<String>,
}

impl Navigation {
    /// Starts on the fragment's section if it names one, else on the landing
    /// section.
    pub fn initial(fragment: Option<&str>, reflect_fragment: bool) -> Self {
        let active = fragment
            .and_then(Section::from_fragment)
            .unwrap_or_default();
        let mut nav = Self {
            active,
            reflect_fragment,
            fragment: None,
        };
        nav.switch(active);
        nav
    }

    pub fn switch(&mut self, section: Section) {
        self.active = section;
        if self.reflect_fragment {
            self.fragment = Some(section.slug().to_string());
        }
    }

    /// `hashchange` handling: an empty or unknown fragment lands on home.
    pub fn fragment_changed(&mut self, fragment: &str) {
        self.switch(Section::from_fragment(fragment).unwrap_or_default());
    }

    pub fn active(&self) -> Section {
        self.active
    }

    pub fn is_active(&self, section: Section) -> bool {
        self.active == section
    }

    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragment_selects_initial_section() {
        let nav = Navigation::initial(Some("#schools"), true);
        assert_eq!(nav.active(), Section::Schools);
        assert_eq!(nav.fragment(), Some("schools"));
    }

    #[test]
    fn missing_or_unknown_fragment_lands_home() {
        assert_eq!(Navigation::initial(None, true).active(), Section::Home);
        assert_eq!(Navigation::initial(Some("#nowhere"), true).active(), Section::Home);
        assert_eq!(Navigation::initial(Some(""), false).active(), Section::Home);
    }

    #[test]
    fn switching_updates_fragment_only_when_reflected() {
        let mut reflected = Navigation::initial(None, true);
        reflected.switch(Section::Report);
        assert_eq!(reflected.fragment(), Some("report"));
        assert!(reflected.is_active(Section::Report));

        let mut plain = Navigation::initial(None, false);
        plain.switch(Section::Report);
        assert_eq!(plain.fragment(), None);
        assert_eq!(plain.active(), Section::Report);
    }

    #[test]
    fn back_navigation_restores_section() {
        let mut nav = Navigation::initial(None, true);
        nav.switch(Section::Statistics);
        nav.fragment_changed("#schools");
        assert_eq!(nav.active(), Section::Schools);
        nav.fragment_changed("");
        assert_eq!(nav.active(), Section::Home);
    }

    #[test]
    fn element_ids_follow_slug() {
        assert_eq!(Section::Schools.element_id(), "schools-section");
        assert_eq!(Section::from_fragment("stats"), Some(Section::Statistics));
    }
}
