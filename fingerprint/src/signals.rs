//! Coarse device/environment signals.

/// Everything the host environment can report about the device.
///
/// All fields are optional: a missing signal contributes an empty slot to
/// the canonical string instead of aborting the computation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeviceSignals {
    /// Host environment identification string.
    pub user_agent: Option<String>,
    /// Display geometry: width, height, color depth.
    pub display: Option<(u32, u32, u32)>,
    /// Minutes offset from UTC.
    pub timezone_offset_minutes: Option<i32>,
    /// BCP-47 locale tag.
    pub locale: Option<String>,
    /// Logical CPU count hint.
    pub hardware_concurrency: Option<u32>,
    /// Rendering-surface signature (e.g. a canvas digest), precomputed by
    /// the host layer.
    pub surface_signature: Option<String>,
}

impl DeviceSignals {
    /// Canonical `|`-joined form fed into the fingerprint hash.
    ///
    /// Field order is part of the contract: reordering would silently change
    /// every fingerprint.
    pub fn canonical(&self) -> String {
        let display = self
            .display
            .map(|(w, h, d)| format!("{w}x{h}x{d}"))
            .unwrap_or_default();
        [
            self.user_agent.clone().unwrap_or_default(),
            display,
            self.timezone_offset_minutes
                .map(|m| m.to_string())
                .unwrap_or_default(),
            self.locale.clone().unwrap_or_default(),
            self.hardware_concurrency
                .map(|c| c.to_string())
                .unwrap_or_default(),
            self.surface_signature.clone().unwrap_or_default(),
        ]
        .join("|")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_signals_still_canonicalize() {
        assert_eq!(DeviceSignals::default().canonical(), "|||||");
    }

    #[test]
    fn canonical_is_order_stable() {
        let s = DeviceSignals {
            user_agent: Some("ua".into()),
            display: Some((800, 600, 32)),
            timezone_offset_minutes: Some(120),
            locale: Some("fr-FR".into()),
            hardware_concurrency: Some(4),
            surface_signature: Some("sig".into()),
        };
        assert_eq!(s.canonical(), "ua|800x600x32|120|fr-FR|4|sig");
    }
}
