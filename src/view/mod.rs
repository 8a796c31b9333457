pub mod modal;
pub mod nav;
pub mod report_form;

use tokio::time::Instant;
use tracing::{debug, error};

use crate::filter::{self, SearchMode, SearchQuery};
use crate::model::{SchoolRecord, MARKER_YES, STATUS_PROPER};
use crate::output::cards::{self, CardBinding, RenderedList};
use crate::score::DirectoryStats;
use crate::source::LoadError;

pub use modal::{ClickTarget, Modal};
pub use nav::{Navigation, Section};
pub use report_form::{ReportDraft, ReportForm};

/// Per-source presentation rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Profile {
    /// Maximum number of cards rendered at once.
    pub display_limit: usize,
    /// Facility value that lights a card icon.
    pub installed_marker: &'static str,
    /// Records carry a derived score; enables badges and statistics.
    pub scored: bool,
    pub reflect_fragment: bool,
    pub search_mode: SearchMode,
}

impl Profile {
    pub fn json() -> Self {
        Self {
            display_limit: 50,
            installed_marker: MARKER_YES,
            scored: false,
            reflect_fragment: true,
            search_mode: SearchMode::NameOrRegion,
        }
    }

    pub fn spreadsheet() -> Self {
        Self {
            display_limit: 100,
            installed_marker: STATUS_PROPER,
            scored: true,
            reflect_fragment: false,
            search_mode: SearchMode::NameAndCity,
        }
    }

    pub fn with_display_limit(mut self, limit: usize) -> Self {
        self.display_limit = limit;
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LoadStatus {
    #[default]
    Pending,
    Loaded,
    Failed(String),
}

/// Everything a user can do on the page.
#[derive(Clone, Debug)]
pub enum UiEvent {
    Navigate(Section),
    FragmentChanged(String),
    /// Live search on every keystroke.
    SearchInput(String),
    /// Explicit submit of the name/city form.
    SearchSubmit { name: String, city: String },
    /// Search box on the landing section: copies the query into the list
    /// search and switches to the schools section.
    HeroSearch(String),
    /// Click on the card at this position of the last rendered list.
    CardClicked(usize),
    ModalClick(ClickTarget),
    CloseModal,
    SubmitReport { draft: ReportDraft, at: Instant },
}

/// Owned page state. The record collection is only ever replaced wholesale
/// through [`AppState::apply_load`]; searches derive index views from it.
#[derive(Clone, Debug)]
pub struct AppState {
    profile: Profile,
    records: Vec<SchoolRecord>,
    status: LoadStatus,
    query: SearchQuery,
    visible: Vec<usize>,
    nav: Navigation,
    modal: Modal,
    report: ReportForm,
    bindings: Vec<CardBinding>,
}

impl AppState {
    pub fn new(profile: Profile, fragment: Option<&str>) -> Self {
        Self {
            profile,
            records: Vec::new(),
            status: LoadStatus::Pending,
            query: SearchQuery::default(),
            visible: Vec::new(),
            nav: Navigation::initial(fragment, profile.reflect_fragment),
            modal: Modal::default(),
            report: ReportForm::default(),
            bindings: Vec::new(),
        }
    }

    /// Installs the result of the one startup fetch. A failure leaves the
    /// collection empty.
    pub fn apply_load(&mut self, result: Result<Vec<SchoolRecord>, LoadError>) {
        match result {
            Ok(records) => {
                self.records = records;
                self.status = LoadStatus::Loaded;
            }
            Err(err) => {
                error!(error = %err, "failed to load records");
                self.records = Vec::new();
                self.status = LoadStatus::Failed(err.to_string());
            }
        }
        self.modal.close();
        self.refilter();
    }

    pub fn dispatch(&mut self, event: UiEvent) {
        debug!(?event, "ui event");
        match event {
            UiEvent::Navigate(section) => self.nav.switch(section),
            UiEvent::FragmentChanged(fragment) => self.nav.fragment_changed(&fragment),
            UiEvent::SearchInput(text) => {
                self.query.name = text;
                self.refilter();
            }
            UiEvent::SearchSubmit { name, city } => {
                self.query = SearchQuery::fields(name, city);
                self.refilter();
            }
            UiEvent::HeroSearch(text) => {
                self.nav.switch(Section::Schools);
                self.query = SearchQuery::text(text);
                self.refilter();
            }
            UiEvent::CardClicked(position) => match self.binding(position) {
                Some(binding) => self.modal.open(binding.record_index),
                None => debug!(position, "click on a card that is no longer rendered"),
            },
            UiEvent::ModalClick(target) => {
                self.modal.click(target);
            }
            UiEvent::CloseModal => self.modal.close(),
            UiEvent::SubmitReport { draft, at } => self.report.submit(draft, at),
        }
    }

    fn refilter(&mut self) {
        self.visible = filter::filter_indices(&self.records, &self.query, self.profile.search_mode);
        debug!(visible = self.visible.len(), total = self.records.len(), "filtered");
        self.render_list();
    }

    fn binding(&self, position: usize) -> Option<CardBinding> {
        self.bindings.iter().copied().find(|b| b.position == position)
    }

    /// Renders the current list and replaces the card bindings with exactly
    /// one per rendered card.
    pub fn render_list(&mut self) -> RenderedList {
        let rendered = match &self.status {
            LoadStatus::Failed(_) => cards::render_load_failure(),
            _ => cards::render_card_list(&self.records, &self.visible, &self.profile),
        };
        self.bindings = rendered.bindings.clone();
        rendered
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn records(&self) -> &[SchoolRecord] {
        &self.records
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn query(&self) -> &SearchQuery {
        &self.query
    }

    pub fn visible_records(&self) -> impl Iterator<Item = &SchoolRecord> + '_ {
        self.visible.iter().filter_map(|&idx| self.records.get(idx))
    }

    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    pub fn bindings(&self) -> &[CardBinding] {
        &self.bindings
    }

    pub fn navigation(&self) -> &Navigation {
        &self.nav
    }

    pub fn section(&self) -> Section {
        self.nav.active()
    }

    pub fn modal(&self) -> &Modal {
        &self.modal
    }

    pub fn modal_record(&self) -> Option<&SchoolRecord> {
        self.modal.record_index().and_then(|idx| self.records.get(idx))
    }

    pub fn report(&self) -> &ReportForm {
        &self.report
    }

    pub fn stats(&self) -> DirectoryStats {
        DirectoryStats::compute(&self.records)
    }
}
