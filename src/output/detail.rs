use itertools::Itertools;

use super::escape_html;
use crate::model::{or_placeholder, Facility, SchoolRecord, MARKER_NO, MARKER_YES, PLACEHOLDER};
use crate::score::ScoreBand;

fn status_markup(value: &str) -> String {
    match value.trim() {
        MARKER_YES => r#"<span class="status-badge yes">설치됨</span>"#.to_string(),
        MARKER_NO => r#"<span class="status-badge no">미설치</span>"#.to_string(),
        "" => format!("<span>{PLACEHOLDER}</span>"),
        other => format!("<span>{}</span>", escape_html(other)),
    }
}

fn plain_markup(value: &str) -> String {
    format!("<span>{}</span>", escape_html(or_placeholder(value.trim())))
}

fn detail_row(label: &str, markup: String) -> String {
    format!(
        r#"
      <div class="facility-detail">
        <span class="facility-label">{label}</span>
        <div class="facility-status">{markup}</div>
      </div>"#
    )
}

/// Inner markup of `#modal-body`: every field of the record.
pub fn render_detail_body(record: &SchoolRecord) -> String {
    let mut rows = record
        .descriptive_fields()
        .iter()
        .map(|(label, value)| detail_row(label, plain_markup(value)))
        .collect::<Vec<_>>();
    rows.extend(
        Facility::ALL
            .iter()
            .map(|&f| detail_row(f.detail_label(), status_markup(record.facilities.get(f)))),
    );
    if let Some(score) = record.score {
        rows.push(format!(
            r#"
      <div class="facility-detail">
        <span class="facility-label">접근성 점수</span>
        <div class="facility-status"><span class="score-badge {}">{score}점</span></div>
      </div>"#,
            ScoreBand::of(score).css_class()
        ));
    }
    rows.into_iter().join("")
}

/// The modal container. Hidden unless a record is given.
pub fn render_modal(record: Option<&SchoolRecord>) -> String {
    let (class, title, body) = match record {
        Some(r) => (
            "modal active",
            escape_html(or_placeholder(&r.name)),
            render_detail_body(r),
        ),
        None => ("modal", String::new(), String::new()),
    };
    format!(
        r#"
  <div id="school-modal" class="{class}">
    <div class="modal-content">
      <button type="button" class="modal-close" aria-label="닫기">&times;</button>
      <h2 id="modal-school-name">{title}</h2>
      <div id="modal-body">{body}
      </div>
    </div>
  </div>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::STATUS_SIMPLE;

    #[test]
    fn boolean_markers_become_badges() {
        assert!(status_markup("Y").contains("status-badge yes"));
        assert!(status_markup("N").contains("status-badge no"));
    }

    #[test]
    fn other_values_render_raw_or_placeholder() {
        assert_eq!(status_markup(STATUS_SIMPLE), format!("<span>{STATUS_SIMPLE}</span>"));
        assert_eq!(status_markup("  "), "<span>-</span>");
        assert_eq!(status_markup("<x>"), "<span>&lt;x&gt;</span>");
    }

    #[test]
    fn body_lists_every_field() {
        let record = SchoolRecord {
            year: "2023".to_string(),
            score: Some(91),
            ..SchoolRecord::default()
        };
        let body = render_detail_body(&record);
        assert_eq!(body.matches(r#"class="facility-detail""#).count(), 8 + 11 + 1);
        assert!(body.contains("2023"));
        assert!(body.contains("score-badge score-high"));
    }

    #[test]
    fn descriptive_fields_never_get_badges() {
        let record = SchoolRecord {
            excluded: "N".to_string(),
            ..SchoolRecord::default()
        };
        let body = render_detail_body(&record);
        assert!(body.contains(
            r#"<span class="facility-label">제외여부</span>
        <div class="facility-status"><span>N</span></div>"#
        ));
        assert_eq!(body.matches("status-badge").count(), 0);

        let mut record = record;
        record.facilities.set(Facility::ALL[0], "Y".to_string());
        let body = render_detail_body(&record);
        assert_eq!(body.matches("status-badge yes").count(), 1);
        assert_eq!(body.matches("status-badge no").count(), 0);
    }

    #[test]
    fn modal_visibility_follows_record() {
        assert!(render_modal(None).contains(r#"class="modal""#));
        let record = SchoolRecord {
            name: "Seoul High".to_string(),
            ..SchoolRecord::default()
        };
        let html = render_modal(Some(&record));
        assert!(html.contains(r#"class="modal active""#));
        assert!(html.contains("Seoul High"));
    }
}
