use crate::model::{Facility, FacilityStatuses, SchoolRecord, COLUMN_COUNT};
use crate::score;

/// Maps spreadsheet rows to records. The first row is the header and is
/// discarded; columns are matched by position, never by header name.
pub fn map_rows(rows: Vec<Vec<String>>) -> Vec<SchoolRecord> {
    rows.into_iter()
        .skip(1)
        .enumerate()
        .map(|(idx, row)| map_row(idx as u32 + 1, row))
        .collect()
}

pub fn map_row(id: u32, row: Vec<String>) -> SchoolRecord {
    let mut cells = row.into_iter().take(COLUMN_COUNT);
    let mut next = || cells.next().unwrap_or_default();

    let mut record = SchoolRecord {
        id: Some(id),
        year: next(),
        county: next(),
        district_office: next(),
        region: next(),
        name: next(),
        level: next(),
        establishment: next(),
        excluded: next(),
        exclusion_reason: next(),
        facilities: FacilityStatuses::default(),
        score: None,
    };
    for facility in Facility::ALL {
        record.facilities.set(facility, next());
    }
    record.score = Some(score::accessibility_score(&record.facilities.values()));
    record
}
