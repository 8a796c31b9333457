use itertools::Itertools;
use tokio::time::Instant;
use tracing::debug;

use super::detail::render_modal;
use super::escape_html;
use crate::filter::SearchMode;
use crate::score::DirectoryStats;
use crate::view::{AppState, Section};

pub const REPORT_ACK_MESSAGE: &str = "제보가 접수되었습니다. 감사합니다.";

fn display(visible: bool) -> &'static str {
    if visible {
        "block"
    } else {
        "none"
    }
}

fn section_class(state: &AppState, section: Section) -> &'static str {
    if state.navigation().is_active(section) {
        "page-section active"
    } else {
        "page-section"
    }
}

fn render_nav(state: &AppState) -> String {
    Section::ALL
        .iter()
        .map(|&s| {
            let class = if state.navigation().is_active(s) {
                "nav-link active"
            } else {
                "nav-link"
            };
            format!(
                r##"<a href="#{slug}" class="{class}" data-page="{slug}">{title}</a>"##,
                slug = s.slug(),
                title = s.title(),
            )
        })
        .join("\n        ")
}

fn render_search_form(state: &AppState) -> String {
    let query = state.query();
    match state.profile().search_mode {
        SearchMode::NameOrRegion => format!(
            r#"<input id="school-search" type="search" placeholder="학교명 또는 지역명으로 검색" value="{}"/>"#,
            escape_html(&query.name)
        ),
        SearchMode::NameAndCity => format!(
            r#"<form id="search-form">
          <input id="name-search" type="search" placeholder="학교명" value="{}"/>
          <input id="city-search" type="search" placeholder="시군명" value="{}"/>
          <button type="submit">검색</button>
        </form>"#,
            escape_html(&query.name),
            escape_html(&query.city)
        ),
    }
}

fn render_stats(stats: &DirectoryStats) -> String {
    format!(
        r#"<div class="stats-grid">
        <div class="stat-card"><span class="stat-label">전체 학교</span><span id="stat-total" class="stat-value">{total}</span></div>
        <div class="stat-card"><span class="stat-label">평균 점수</span><span id="stat-average" class="stat-value">{mean}</span></div>
        <div class="stat-card"><span class="stat-label">접근성 우수 (70점 이상)</span><span id="stat-high" class="stat-value">{high}</span></div>
      </div>"#,
        total = stats.total,
        mean = stats.mean_display(),
        high = stats.high_count,
    )
}

fn render_report_form(state: &AppState, now: Instant) -> String {
    let draft = state.report().draft();
    format!(
        r#"<form id="report-form">
        <input name="school" placeholder="학교명" value="{school}"/>
        <input name="facility" placeholder="시설" value="{facility}"/>
        <textarea name="message" placeholder="내용">{message}</textarea>
        <input name="contact" placeholder="연락처" value="{contact}"/>
        <button type="submit">제보하기</button>
      </form>
      <div id="report-success" class="success-message" style="display:{ack}">{REPORT_ACK_MESSAGE}</div>"#,
        school = escape_html(&draft.school),
        facility = escape_html(&draft.facility),
        message = escape_html(&draft.message),
        contact = escape_html(&draft.contact),
        ack = display(state.report().ack_visible(now)),
    )
}

/// Full document for the current state. Re-renders the card list, which
/// rebinds the cards.
pub fn render_page(state: &mut AppState, now: Instant) -> String {
    let list = state.render_list();
    debug!(cards = list.card_count(), section = %state.section(), "rendering page");

    let total_matches = state.visible_count();

    format!(
        r####"<!DOCTYPE html>
<html lang="ko">
<head>
  <meta charset="utf-8"/>
  <meta content="width=device-width, initial-scale=1.0" name="viewport"/>
  <title>학교 편의시설 현황</title>
  <style>
    .page-section {{ display: none; }}
    .page-section.active {{ display: block; }}
    .nav-link.active {{ font-weight: 700; border-bottom: 2px solid #135bec; }}
    .schools-grid {{ display: grid; grid-template-columns: repeat(auto-fill, minmax(280px, 1fr)); gap: 1rem; }}
    .school-card {{ border: 1px solid #e2e8f0; border-radius: 0.75rem; padding: 1rem; cursor: pointer; }}
    .facility-icon.available {{ color: #16a34a; }}
    .facility-icon.unavailable {{ color: #dc2626; }}
    .score-high {{ background: #dcfce7; }}
    .score-medium {{ background: #fef9c3; }}
    .score-low {{ background: #fee2e2; }}
    .status-badge.yes {{ color: #16a34a; }}
    .status-badge.no {{ color: #dc2626; }}
    .modal {{ display: none; position: fixed; inset: 0; background: rgba(15, 23, 42, 0.6); }}
    .modal.active {{ display: flex; align-items: center; justify-content: center; }}
    .modal-content {{ background: #fff; border-radius: 1rem; padding: 1.5rem; max-height: 90vh; overflow-y: auto; }}
  </style>
</head>
<body>
  <header>
    <h1>학교 편의시설 현황</h1>
    <nav>
        {nav}
    </nav>
  </header>
  <main>
    <section id="{home_id}" class="{home_class}">
      <h2>우리 학교는 모두에게 열려 있나요?</h2>
      <input id="hero-search" type="search" placeholder="학교 이름을 입력하세요"/>
    </section>

    <section id="{schools_id}" class="{schools_class}">
      <div class="search-bar">
        {search_form}
      </div>
      <p id="result-count">{total_matches}개 학교</p>
      <div id="loading" style="display:none">불러오는 중...</div>
      <div id="schools-grid" class="schools-grid" style="display:{grid_display}">{cards}
      </div>
      <p id="no-results" class="no-results" style="display:{no_results_display}">{no_results}</p>
    </section>

    <section id="{stats_id}" class="{stats_class}">
      {stats}
    </section>

    <section id="{report_id}" class="{report_class}">
      {report_form}
    </section>

    <section id="{about_id}" class="{about_class}">
      <p>학교별 장애인 편의시설 설치 현황을 검색하고 확인할 수 있습니다.</p>
    </section>
  </main>
{modal}
</body>
</html>
"####,
        nav = render_nav(state),
        home_id = Section::Home.element_id(),
        home_class = section_class(state, Section::Home),
        schools_id = Section::Schools.element_id(),
        schools_class = section_class(state, Section::Schools),
        search_form = render_search_form(state),
        grid_display = if list.grid_visible { "grid" } else { "none" },
        cards = list.markup,
        no_results_display = display(list.no_results_visible),
        no_results = super::cards::NO_RESULTS_MESSAGE,
        stats_id = Section::Statistics.element_id(),
        stats_class = section_class(state, Section::Statistics),
        stats = render_stats(&state.stats()),
        report_id = Section::Report.element_id(),
        report_class = section_class(state, Section::Report),
        report_form = render_report_form(state, now),
        about_id = Section::About.element_id(),
        about_class = section_class(state, Section::About),
        modal = render_modal(state.modal_record()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SchoolRecord;
    use crate::view::{Profile, ReportDraft, UiEvent};

    fn school(name: &str, score: u8) -> SchoolRecord {
        SchoolRecord {
            name: name.to_string(),
            score: Some(score),
            ..SchoolRecord::default()
        }
    }

    fn spreadsheet_state() -> AppState {
        let mut state = AppState::new(Profile::spreadsheet(), None);
        state.apply_load(Ok(vec![school("Seoul High", 100), school("Busan Mid", 70), school("Daegu Elem", 40)]));
        state
    }

    #[test]
    fn only_active_section_is_marked() {
        let mut state = spreadsheet_state();
        state.dispatch(UiEvent::Navigate(Section::Statistics));
        let html = render_page(&mut state, Instant::now());
        assert!(html.contains(r#"id="stats-section" class="page-section active""#));
        assert!(html.contains(r#"id="home-section" class="page-section""#));
        assert_eq!(html.matches("page-section active").count(), 1);
        assert!(html.contains(r##"href="#stats" class="nav-link active""##));
    }

    #[test]
    fn stats_are_written_into_display_fields() {
        let mut state = spreadsheet_state();
        let html = render_page(&mut state, Instant::now());
        assert!(html.contains(r#"id="stat-total" class="stat-value">3<"#));
        assert!(html.contains(r#"id="stat-average" class="stat-value">70<"#));
        assert!(html.contains(r#"id="stat-high" class="stat-value">2<"#));
    }

    #[test]
    fn empty_search_hides_grid_and_shows_no_results() {
        let mut state = spreadsheet_state();
        state.dispatch(UiEvent::SearchSubmit {
            name: "nowhere".to_string(),
            city: String::new(),
        });
        let html = render_page(&mut state, Instant::now());
        assert!(html.contains(r#"id="schools-grid" class="schools-grid" style="display:none""#));
        assert!(html.contains(r#"id="no-results" class="no-results" style="display:block""#));
        assert!(state.bindings().is_empty());
    }

    #[test]
    fn load_failure_message_replaces_list() {
        let mut state = AppState::new(Profile::json(), None);
        state.apply_load(Err(crate::source::LoadError::Status {
            url: "http://localhost/api/schools".to_string(),
            status: 500,
        }));
        let html = render_page(&mut state, Instant::now());
        assert!(html.contains(crate::output::cards::LOAD_FAILURE_MESSAGE));
        assert!(html.contains(r#"id="stat-average" class="stat-value">N/A<"#));
    }

    #[test]
    fn open_modal_is_rendered_active() {
        let mut state = spreadsheet_state();
        state.render_list();
        state.dispatch(UiEvent::CardClicked(1));
        let html = render_page(&mut state, Instant::now());
        assert!(html.contains(r#"<div id="school-modal" class="modal active">"#));
        assert!(html.contains(r#"<h2 id="modal-school-name">Busan Mid</h2>"#));
    }

    #[test]
    fn report_ack_shows_then_hides() {
        let mut state = spreadsheet_state();
        let at = Instant::now();
        state.dispatch(UiEvent::SubmitReport {
            draft: ReportDraft::default(),
            at,
        });
        let shown = render_page(&mut state, at);
        assert!(shown.contains(r#"id="report-success" class="success-message" style="display:block""#));
        let hidden = render_page(&mut state, at + crate::view::report_form::ACK_DURATION);
        assert!(hidden.contains(r#"id="report-success" class="success-message" style="display:none""#));
    }

    #[test]
    fn search_inputs_follow_profile() {
        let mut json_state = AppState::new(Profile::json(), None);
        json_state.apply_load(Ok(Vec::new()));
        json_state.dispatch(UiEvent::SearchInput("\"q\"".to_string()));
        let html = render_page(&mut json_state, Instant::now());
        assert!(html.contains(r#"id="school-search" type="search" placeholder="학교명 또는 지역명으로 검색" value="&quot;q&quot;""#));
        assert!(!html.contains("city-search"));

        let mut sheet_state = spreadsheet_state();
        let html = render_page(&mut sheet_state, Instant::now());
        assert!(html.contains(r#"id="city-search""#));
    }
}
