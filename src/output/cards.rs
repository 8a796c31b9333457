use itertools::Itertools;

use super::escape_html;
use crate::model::{or_placeholder, Facility, SchoolRecord};
use crate::score::ScoreBand;
use crate::view::Profile;

pub const NO_RESULTS_MESSAGE: &str = "검색 결과가 없습니다.";
pub const LOAD_FAILURE_MESSAGE: &str = "데이터를 불러오는데 실패했습니다.";

/// Ties a rendered card back to the record it shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CardBinding {
    /// Position among the rendered cards.
    pub position: usize,
    /// Index into the full record collection.
    pub record_index: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderedList {
    /// Inner markup of the list container.
    pub markup: String,
    pub bindings: Vec<CardBinding>,
    pub grid_visible: bool,
    pub no_results_visible: bool,
}

impl RenderedList {
    pub fn card_count(&self) -> usize {
        self.bindings.len()
    }
}

/// Renders up to `profile.display_limit` cards for `visible` (indices into
/// `records`), or the no-results placeholder when there is nothing to show.
pub fn render_card_list(records: &[SchoolRecord], visible: &[usize], profile: &Profile) -> RenderedList {
    let shown: Vec<(usize, &SchoolRecord)> = visible
        .iter()
        .filter_map(|&idx| records.get(idx).map(|r| (idx, r)))
        .take(profile.display_limit)
        .collect();

    if shown.is_empty() {
        return RenderedList {
            markup: String::new(),
            bindings: Vec::new(),
            grid_visible: false,
            no_results_visible: true,
        };
    }

    let markup = shown
        .iter()
        .enumerate()
        .map(|(position, (record_index, record))| render_card(position, *record_index, record, profile))
        .join("");
    let bindings = shown
        .iter()
        .enumerate()
        .map(|(position, (record_index, _))| CardBinding {
            position,
            record_index: *record_index,
        })
        .collect();

    RenderedList {
        markup,
        bindings,
        grid_visible: true,
        no_results_visible: false,
    }
}

/// List content after a failed load: the error text, no cards.
pub fn render_load_failure() -> RenderedList {
    RenderedList {
        markup: format!(r#"<p class="no-results load-error">{LOAD_FAILURE_MESSAGE}</p>"#),
        bindings: Vec::new(),
        grid_visible: true,
        no_results_visible: false,
    }
}

pub fn render_card(position: usize, record_index: usize, record: &SchoolRecord, profile: &Profile) -> String {
    let facilities = Facility::CARD
        .iter()
        .map(|&f| {
            let installed = record.facilities.get(f) == profile.installed_marker;
            format!(
                r#"
        <div class="facility-item">
          <div class="facility-icon {class}">{icon}</div>
          <span>{label}</span>
        </div>"#,
                class = if installed { "available" } else { "unavailable" },
                icon = if installed { "✓" } else { "✗" },
                label = f.card_label(),
            )
        })
        .join("");

    let score_badge = match (profile.scored, record.score) {
        (true, Some(score)) => format!(
            r#"<span class="score-badge {}">{score}점</span>"#,
            ScoreBand::of(score).css_class()
        ),
        _ => String::new(),
    };

    format!(
        r#"
    <div class="school-card" data-card="{position}" data-record="{record_index}">
      <div class="school-card-header">
        <h3 class="school-name">{name}</h3>
        {score_badge}
        <div class="school-meta">
          <span class="school-badge">{level}</span>
          <span class="school-badge">{establishment}</span>
        </div>
        <p class="school-region">{region}</p>
      </div>
      <div class="school-facilities">{facilities}
      </div>
    </div>"#,
        name = escape_html(or_placeholder(&record.name)),
        level = escape_html(or_placeholder(&record.level)),
        establishment = escape_html(or_placeholder(&record.establishment)),
        region = escape_html(or_placeholder(&record.region)),
    )
}
