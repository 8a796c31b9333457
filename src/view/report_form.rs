use std::time::Duration;

use tokio::time::Instant;
use tracing::info;

/// How long the acknowledgment stays on screen after a submission.
pub const ACK_DURATION: Duration = Duration::from_secs(3);

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReportDraft {
    pub school: String,
    pub facility: String,
    pub message: String,
    pub contact: String,
}

/// Accessibility-issue report form.
///
/// Submissions are acknowledged locally and discarded; nothing is sent
/// anywhere.
#[derive(Clone, Debug, Default)]
pub struct ReportForm {
    draft: ReportDraft,
    ack_until: Option<Instant>,
}

impl ReportForm {
    pub fn draft(&self) -> &ReportDraft {
        &self.draft
    }

    pub fn edit(&mut self, draft: ReportDraft) {
        self.draft = draft;
    }

    pub fn submit(&mut self, draft: ReportDraft, now: Instant) {
        info!(
            school = %draft.school,
            "report acknowledged locally, not submitted"
        );
        self.draft = ReportDraft::default();
        self.ack_until = Some(now + ACK_DURATION);
    }

    pub fn ack_visible(&self, now: Instant) -> bool {
        self.ack_until.map(|until| now < until).unwrap_or(false)
    }
}
