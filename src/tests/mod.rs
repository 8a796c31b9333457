use std::io::Write;
use std::time::Duration;

use tokio::time::Instant;

use crate::app::{build_run_config, build_state};
use crate::cli::args::CliArgs;
use crate::config::ConfigFile;
use crate::model::{SchoolRecord, STATUS_NONE, STATUS_PROPER, STATUS_SIMPLE};
use crate::output::{self, OutputFormat};
use crate::source::{mapper, parser, CsvDialect, DataSource, Loader};
use crate::view::{AppState, ClickTarget, Profile, Section, UiEvent};

fn sheet_row(name: &str, city: &str, statuses: &[&str]) -> String {
    let mut cells = vec!["2023", city, "교육지원청", "지역", name, "중학교", "공립", "N", ""];
    cells.extend_from_slice(statuses);
    cells.join(",")
}

fn sample_csv() -> String {
    let mut proper_simple = vec![STATUS_PROPER; 5];
    proper_simple.extend([STATUS_SIMPLE; 6]);
    [
        "기준년도,시군명,지역교육청명,지역명,학교명,학교급명,설립구분명,제외여부,제외사유,a,b,c,d,e,f,g,h,i,j,k".to_string(),
        sheet_row("\"Seoul, High\"", "서울", &[STATUS_PROPER; 11]),
        String::new(),
        sheet_row("Busan Mid", "부산", &[STATUS_SIMPLE; 11]),
        sheet_row("Daegu Elem", "대구", &[STATUS_NONE; 11]),
        sheet_row("Suwon Mid", "수원시", &proper_simple),
    ]
    .join("\n")
}

fn loader() -> Loader {
    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    Loader::from_client(client, CsvDialect::Naive)
}

#[test]
fn csv_to_scored_records() {
    let records = mapper::map_rows(parser::parse_naive(&sample_csv()));
    assert_eq!(records.len(), 4);
    assert_eq!(records[0].name, "Seoul, High");
    let scores: Vec<Option<u8>> = records.iter().map(|r| r.score).collect();
    // 5 * 100 + 6 * 70 = 920 / 11 = 83.6
    assert_eq!(scores, vec![Some(100), Some(70), Some(0), Some(84)]);
    let ids: Vec<Option<u32>> = records.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![Some(1), Some(2), Some(3), Some(4)]);
}

#[test]
fn spreadsheet_session_end_to_end() {
    let records = mapper::map_rows(parser::parse_naive(&sample_csv()));
    let mut state = AppState::new(Profile::spreadsheet(), Some("#schools"));
    state.apply_load(Ok(records));
    assert_eq!(state.section(), Section::Schools);
    assert_eq!(state.navigation().fragment(), None);

    let stats = state.stats();
    assert_eq!(stats.total, 4);
    // (100 + 70 + 0 + 84) / 4 = 63.5
    assert_eq!(stats.mean_score, Some(64));
    assert_eq!(stats.high_count, 3);

    state.dispatch(UiEvent::SearchSubmit {
        name: "mid".to_string(),
        city: "수원".to_string(),
    });
    let html = String::from_utf8(output::render(OutputFormat::Html, &mut state, Instant::now())).unwrap();
    assert_eq!(html.matches(r#"class="school-card""#).count(), 1);
    assert!(html.contains("Suwon Mid"));

    state.dispatch(UiEvent::CardClicked(0));
    assert_eq!(state.modal_record().map(|r| r.name.as_str()), Some("Suwon Mid"));
    state.dispatch(UiEvent::ModalClick(ClickTarget::Body));
    assert!(state.modal().is_open());
    state.dispatch(UiEvent::CloseModal);
    assert!(!state.modal().is_open());

    state.dispatch(UiEvent::SearchSubmit {
        name: String::new(),
        city: String::new(),
    });
    assert_eq!(state.visible_count(), 4);
    assert_eq!(state.records().len(), 4);
}

#[test]
fn json_session_reflects_fragment() {
    let mut state = AppState::new(Profile::json(), None);
    state.apply_load(Ok(vec![
        SchoolRecord {
            name: "Seoul High".to_string(),
            ..SchoolRecord::default()
        },
        SchoolRecord {
            name: "Busan Mid".to_string(),
            ..SchoolRecord::default()
        },
    ]));
    assert_eq!(state.navigation().fragment(), Some("home"));
    state.dispatch(UiEvent::Navigate(Section::Report));
    assert_eq!(state.navigation().fragment(), Some("report"));
    state.dispatch(UiEvent::FragmentChanged("#schools".to_string()));
    assert_eq!(state.section(), Section::Schools);

    state.dispatch(UiEvent::SearchInput("SEOUL".to_string()));
    let names: Vec<&str> = state.visible_records().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Seoul High"]);
}

#[test]
fn rerender_rebinds_cards_to_filtered_records() {
    let records: Vec<SchoolRecord> = (0..60)
        .map(|i| SchoolRecord {
            name: if i % 2 == 0 { format!("Even {i}") } else { format!("Odd {i}") },
            ..SchoolRecord::default()
        })
        .collect();
    let mut state = AppState::new(Profile::json(), None);
    state.apply_load(Ok(records));
    assert_eq!(state.render_list().card_count(), 50);

    state.dispatch(UiEvent::SearchInput("odd".to_string()));
    let list = state.render_list();
    assert_eq!(list.card_count(), 30);
    assert_eq!(state.bindings().len(), 30);
    assert!(state.bindings().iter().all(|b| b.record_index % 2 == 1));

    state.dispatch(UiEvent::CardClicked(2));
    assert_eq!(state.modal_record().map(|r| r.name.as_str()), Some("Odd 5"));
    state.dispatch(UiEvent::ModalClick(ClickTarget::Overlay));
    assert!(!state.modal().is_open());
}

#[tokio::test]
async fn build_state_from_csv_file() {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    write!(file, "{}", sample_csv()).unwrap();

    let args = CliArgs {
        file: Some(file.path().display().to_string()),
        name: Some("busan".to_string()),
        open: Some(0),
        section: Some("stats".to_string()),
        ..CliArgs::default()
    };
    let run = build_run_config(args, ConfigFile::default()).unwrap();
    assert!(matches!(run.source, DataSource::CsvFile(_)));

    let state = build_state(&run, &loader()).await;
    assert_eq!(state.records().len(), 4);
    assert_eq!(state.visible_count(), 1);
    assert_eq!(state.section(), Section::Statistics);
    assert_eq!(state.modal_record().map(|r| r.name.as_str()), Some("Busan Mid"));
}

#[tokio::test]
async fn build_state_survives_load_failure() {
    let dir = tempfile::tempdir().unwrap();
    let args = CliArgs {
        file: Some(dir.path().join("missing.json").display().to_string()),
        ..CliArgs::default()
    };
    let run = build_run_config(args, ConfigFile::default()).unwrap();
    let mut state = build_state(&run, &loader()).await;
    assert!(state.records().is_empty());
    let html = String::from_utf8(output::render(OutputFormat::Html, &mut state, Instant::now())).unwrap();
    assert!(html.contains(crate::output::cards::LOAD_FAILURE_MESSAGE));
}

#[test]
fn report_ack_expires() {
    let mut state = AppState::new(Profile::spreadsheet(), None);
    state.apply_load(Ok(Vec::new()));
    let at = Instant::now();
    state.dispatch(UiEvent::SubmitReport {
        draft: crate::view::ReportDraft {
            school: "Seoul High".to_string(),
            ..Default::default()
        },
        at,
    });
    assert!(state.report().ack_visible(at + Duration::from_secs(2)));
    assert!(!state.report().ack_visible(at + Duration::from_secs(3)));
    assert!(state.report().draft().school.is_empty());
}
