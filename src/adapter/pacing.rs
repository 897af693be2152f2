// native_surface/src/adapter/pacing.rs
//
//! Frame-consumption statistics for texture streams.

/// Tracks frames the host reports as consumed from a texture stream.
///
/// Timestamps are the host's, in nanoseconds. A timestamp that goes backward still counts as
/// a frame but contributes no interval.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FramePacing {
    frames: u64,
    first_timestamp: Option<u64>,
    last_timestamp: Option<u64>,
    last_interval: Option<u64>,
    max_interval: Option<u64>,
}

impl FramePacing {
    #[inline]
    pub fn new() -> FramePacing {
        FramePacing::default()
    }

    pub fn record(&mut self, timestamp_nanos: u64) {
        self.frames += 1;
        if self.first_timestamp.is_none() {
            self.first_timestamp = Some(timestamp_nanos);
        }

        if let Some(last) = self.last_timestamp {
            if let Some(interval) = timestamp_nanos.checked_sub(last) {
                self.last_interval = Some(interval);
                self.max_interval = Some(self.max_interval.map_or(interval, |max| max.max(interval)));
            }
        }
        self.last_timestamp = Some(timestamp_nanos);
    }

    #[inline]
    pub fn reset(&mut self) {
        *self = FramePacing::default();
    }

    /// Number of frames consumed since the last reset.
    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    #[inline]
    pub fn last_timestamp(&self) -> Option<u64> {
        self.last_timestamp
    }

    #[inline]
    pub fn last_interval(&self) -> Option<u64> {
        self.last_interval
    }

    #[inline]
    pub fn max_interval(&self) -> Option<u64> {
        self.max_interval
    }

    /// Mean interval between the first and last consumed frame, in nanoseconds.
    pub fn mean_interval(&self) -> Option<u64> {
        match (self.first_timestamp, self.last_timestamp) {
            (Some(first), Some(last)) if self.frames > 1 && last >= first => {
                Some((last - first) / (self.frames - 1))
            }
            _ => None,
        }
    }
}
