/// Where a click inside the modal container landed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickTarget {
    /// The backdrop element itself.
    Overlay,
    /// Any descendant of the modal content.
    Body,
}

/// Detail modal: open on one record or closed. No stacking.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modal {
    record: Option<usize>,
}

impl Modal {
    pub fn open(&mut self, record_index: usize) {
        self.record = Some(record_index);
    }

    pub fn close(&mut self) {
        self.record = None;
    }

    /// Closes only when the backdrop itself was clicked. Returns whether the
    /// modal closed.
    pub fn click(&mut self, target: ClickTarget) -> bool {
        match target {
            ClickTarget::Overlay if self.is_open() => {
                self.close();
                true
            }
            _ => false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.record.is_some()
    }

    pub fn record_index(&self) -> Option<usize> {
        self.record
    }
}
