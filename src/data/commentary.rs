//! Commentary requests.

use crate::capsule::CommentaryCapsule;
use crate::layout::commentary as c;
use crate::Result;

use super::UpdateState;

/// Decoded `CommentaryRequestInfo`: the event the host asked commentary for.
#[derive(Debug)]
pub struct CommentaryInfo {
    capsule: CommentaryCapsule,
    pub(crate) update: UpdateState,
}

impl Default for CommentaryInfo {
    fn default() -> Self {
        Self::new()
    }
}

impl CommentaryInfo {
    pub fn new() -> Self {
        Self { capsule: CommentaryCapsule::new(), update: UpdateState::default() }
    }

    pub fn prepare_update(&mut self) {}

    pub fn capsule(&self) -> &CommentaryCapsule {
        &self.capsule
    }

    pub fn buffer_mut(&mut self) -> &mut [u8] {
        self.capsule.buffer_mut()
    }

    pub fn load_from_stream<R: std::io::Read + ?Sized>(&mut self, reader: &mut R) -> Result<()> {
        self.capsule.load_from_stream(reader)
    }

    pub fn update_state(&self) -> &UpdateState {
        &self.update
    }

    /// Event name as listed in the host's commentary configuration.
    pub fn name(&self) -> String {
        self.capsule.string_at(c::NAME, c::NAME_LEN)
    }

    /// Event-specific inputs; their meaning depends on [`name`](Self::name).
    pub fn inputs(&self) -> [f64; 3] {
        [self.capsule.f64_at(c::INPUT1), self.capsule.f64_at(c::INPUT2), self.capsule.f64_at(c::INPUT3)]
    }

    /// Whether the host bypasses its repetition checks for this event.
    pub fn skip_checks(&self) -> bool {
        self.capsule.bool_at(c::SKIP_CHECKS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::codec;

    #[test]
    fn doubles_keep_full_precision() {
        let mut bytes = vec![0u8; c::SIZE];
        codec::write_string(&mut bytes, c::NAME, c::NAME_LEN, "Passing");
        codec::write_f64(&mut bytes, c::INPUT1, 3.0);
        codec::write_f64(&mut bytes, c::INPUT2, 0.1);
        codec::write_f64(&mut bytes, c::INPUT3, -1234.5678);
        codec::write_bool(&mut bytes, c::SKIP_CHECKS, true);

        let mut info = CommentaryInfo::new();
        info.load_from_stream(&mut bytes.as_slice()).unwrap();
        assert_eq!(info.name(), "Passing");
        assert_eq!(info.inputs(), [3.0, 0.1, -1234.5678]);
        assert!(info.skip_checks());
    }
}
