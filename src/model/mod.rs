use serde::{Deserialize, Deserializer, Serialize};

/// Variant-B status for a fully compliant installation.
pub const STATUS_PROPER: &str = "적정설치";
/// Variant-B status for a partial installation.
pub const STATUS_SIMPLE: &str = "간이설치";
/// Variant-B status for a missing installation.
pub const STATUS_NONE: &str = "미설치";

pub const MARKER_YES: &str = "Y";
pub const MARKER_NO: &str = "N";

/// Shown wherever a field is empty or missing.
pub const PLACEHOLDER: &str = "-";

pub const FACILITY_COUNT: usize = 11;

/// Number of positional columns in a spreadsheet row.
pub const COLUMN_COUNT: usize = 9 + FACILITY_COUNT;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Facility {
    MainEntranceAccess,
    AccessibleParking,
    EntranceLevelDifference,
    EntranceDoor,
    Corridor,
    StairsLiftRamp,
    AccessibleToilet,
    AccessibleUrinal,
    TactilePaving,
    GuidanceSignage,
    AlarmEvacuation,
}

impl Facility {
    pub const ALL: [Facility; FACILITY_COUNT] = [
        Facility::MainEntranceAccess,
        Facility::AccessibleParking,
        Facility::EntranceLevelDifference,
        Facility::EntranceDoor,
        Facility::Corridor,
        Facility::StairsLiftRamp,
        Facility::AccessibleToilet,
        Facility::AccessibleUrinal,
        Facility::TactilePaving,
        Facility::GuidanceSignage,
        Facility::AlarmEvacuation,
    ];

    /// The four facilities summarised on a list card.
    pub const CARD: [Facility; 4] = [
        Facility::MainEntranceAccess,
        Facility::AccessibleParking,
        Facility::EntranceDoor,
        Facility::AccessibleToilet,
    ];

    /// Field name used by the JSON endpoint.
    pub fn key(self) -> &'static str {
        match self {
            Facility::MainEntranceAccess => "주출입구접근로설치여부",
            Facility::AccessibleParking => "장애인주차구역지정여부",
            Facility::EntranceLevelDifference => "주출입구높이차이제거여부",
            Facility::EntranceDoor => "출입구(문)설치여부",
            Facility::Corridor => "복도설치여부",
            Facility::StairsLiftRamp => "계단/승강기/경사로/휠체어리프트설치여부",
            Facility::AccessibleToilet => "장애인대변기설치여부",
            Facility::AccessibleUrinal => "장애인소변기설치여부",
            Facility::TactilePaving => "점자블록설치여부",
            Facility::GuidanceSignage => "유도및안내설비설치여부",
            Facility::AlarmEvacuation => "경보및피난설비설치여부",
        }
    }

    /// Short label used on cards.
    pub fn card_label(self) -> &'static str {
        match self {
            Facility::MainEntranceAccess => "주출입구 접근로",
            Facility::AccessibleParking => "장애인 주차구역",
            Facility::EntranceDoor => "출입구(문)",
            Facility::AccessibleToilet => "장애인 화장실",
            other => other.detail_label(),
        }
    }

    /// Label used in the detail modal.
    pub fn detail_label(self) -> &'static str {
        match self {
            Facility::MainEntranceAccess => "주출입구 접근로 설치",
            Facility::AccessibleParking => "장애인 주차구역 지정",
            Facility::EntranceLevelDifference => "주출입구 높이차이 제거",
            Facility::EntranceDoor => "출입구(문) 설치",
            Facility::Corridor => "복도 설치",
            Facility::StairsLiftRamp => "계단/승강기/경사로",
            Facility::AccessibleToilet => "장애인 대변기 설치",
            Facility::AccessibleUrinal => "장애인 소변기 설치",
            Facility::TactilePaving => "점자블록 설치",
            Facility::GuidanceSignage => "유도 및 안내설비",
            Facility::AlarmEvacuation => "경보 및 피난설비",
        }
    }
}

/// Installation status of every facility, kept as the raw source strings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct FacilityStatuses {
    #[serde(rename = "주출입구접근로설치여부", default, deserialize_with = "lenient_string")]
    pub main_entrance_access: String,
    #[serde(rename = "장애인주차구역지정여부", default, deserialize_with = "lenient_string")]
    pub accessible_parking: String,
    #[serde(rename = "주출입구높이차이제거여부", default, deserialize_with = "lenient_string")]
    pub entrance_level_difference: String,
    #[serde(rename = "출입구(문)설치여부", default, deserialize_with = "lenient_string")]
    pub entrance_door: String,
    #[serde(rename = "복도설치여부", default, deserialize_with = "lenient_string")]
    pub corridor: String,
    #[serde(
        rename = "계단/승강기/경사로/휠체어리프트설치여부",
        default,
        deserialize_with = "lenient_string"
    )]
    pub stairs_lift_ramp: String,
    #[serde(rename = "장애인대변기설치여부", default, deserialize_with = "lenient_string")]
    pub accessible_toilet: String,
    #[serde(rename = "장애인소변기설치여부", default, deserialize_with = "lenient_string")]
    pub accessible_urinal: String,
    #[serde(rename = "점자블록설치여부", default, deserialize_with = "lenient_string")]
    pub tactile_paving: String,
    #[serde(rename = "유도및안내설비설치여부", default, deserialize_with = "lenient_string")]
    pub guidance_signage: String,
    #[serde(rename = "경보및피난설비설치여부", default, deserialize_with = "lenient_string")]
    pub alarm_evacuation: String,
}

impl FacilityStatuses {
    pub fn get(&self, facility: Facility) -> &str {
        match facility {
            Facility::MainEntranceAccess => &self.main_entrance_access,
            Facility::AccessibleParking => &self.accessible_parking,
            Facility::EntranceLevelDifference => &self.entrance_level_difference,
            Facility::EntranceDoor => &self.entrance_door,
            Facility::Corridor => &self.corridor,
            Facility::StairsLiftRamp => &self.stairs_lift_ramp,
            Facility::AccessibleToilet => &self.accessible_toilet,
            Facility::AccessibleUrinal => &self.accessible_urinal,
            Facility::TactilePaving => &self.tactile_paving,
            Facility::GuidanceSignage => &self.guidance_signage,
            Facility::AlarmEvacuation => &self.alarm_evacuation,
        }
    }

    pub fn set(&mut self, facility: Facility, value: String) {
        let slot = match facility {
            Facility::MainEntranceAccess => &mut self.main_entrance_access,
            Facility::AccessibleParking => &mut self.accessible_parking,
            Facility::EntranceLevelDifference => &mut self.entrance_level_difference,
            Facility::EntranceDoor => &mut self.entrance_door,
            Facility::Corridor => &mut self.corridor,
            Facility::StairsLiftRamp => &mut self.stairs_lift_ramp,
            Facility::AccessibleToilet => &mut self.accessible_toilet,
            Facility::AccessibleUrinal => &mut self.accessible_urinal,
            Facility::TactilePaving => &mut self.tactile_paving,
            Facility::GuidanceSignage => &mut self.guidance_signage,
            Facility::AlarmEvacuation => &mut self.alarm_evacuation,
        };
        *slot = value;
    }

    /// Statuses in canonical column order.
    pub fn values(&self) -> [&str; FACILITY_COUNT] {
        Facility::ALL.map(|f| self.get(f))
    }
}

/// One school's accessibility row.
///
/// `id` is assigned sequentially for spreadsheet rows and left `None` for
/// JSON records, whose identity is their position in the collection.
/// `score` is only derived for spreadsheet rows.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SchoolRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    #[serde(rename = "기준년도", default, deserialize_with = "lenient_string")]
    pub year: String,
    #[serde(rename = "시군명", default, deserialize_with = "lenient_string")]
    pub county: String,
    #[serde(rename = "지역교육청명", default, deserialize_with = "lenient_string")]
    pub district_office: String,
    #[serde(rename = "지역명", default, deserialize_with = "lenient_string")]
    pub region: String,
    #[serde(rename = "학교명", default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(rename = "학교급명", default, deserialize_with = "lenient_string")]
    pub level: String,
    #[serde(rename = "설립구분명", default, deserialize_with = "lenient_string")]
    pub establishment: String,
    #[serde(rename = "제외여부", default, deserialize_with = "lenient_string")]
    pub excluded: String,
    #[serde(rename = "제외사유", default, deserialize_with = "lenient_string")]
    pub exclusion_reason: String,
    #[serde(flatten)]
    pub facilities: FacilityStatuses,
    #[serde(rename = "score", default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u8>,
}

impl SchoolRecord {
    /// Descriptive fields shown at the top of the detail modal.
    pub fn descriptive_fields(&self) -> [(&'static str, &str); 8] {
        [
            ("기준년도", &self.year),
            ("시군명", &self.county),
            ("지역교육청명", &self.district_office),
            ("지역명", &self.region),
            ("학교급명", &self.level),
            ("설립구분명", &self.establishment),
            ("제외여부", &self.excluded),
            ("제외사유", &self.exclusion_reason),
        ]
    }
}

/// Falls back to the placeholder for blank values.
pub fn or_placeholder(value: &str) -> &str {
    if value.trim().is_empty() {
        PLACEHOLDER
    } else {
        value
    }
}

/// Accepts strings, numbers, booleans and null; the endpoint is not strict
/// about types (years commonly arrive as numbers).
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s,
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Number(n) => n.to_string(),
        other => other.to_string(),
    })
}
