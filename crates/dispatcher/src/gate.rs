//! Per-channel severity gate

use contracts::Severity;

/// Whether a channel with `minimum` receives a message of `severity`
///
/// An unset minimum disables the channel.
pub fn should_emit(severity: Severity, minimum: Option<Severity>) -> bool {
    minimum.is_some_and(|minimum| severity >= minimum)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_matrix() {
        for severity in Severity::ALL {
            assert!(!should_emit(severity, None), "{severity} with unset minimum");

            for minimum in Severity::ALL {
                let expected = severity.level() >= minimum.level();
                assert_eq!(
                    should_emit(severity, Some(minimum)),
                    expected,
                    "{severity} against {minimum}"
                );
            }
        }
    }

    #[test]
    fn test_gate_boundaries() {
        assert!(should_emit(Severity::Warning, Some(Severity::Warning)));
        assert!(!should_emit(Severity::Info, Some(Severity::Warning)));
        assert!(should_emit(Severity::Fatal, Some(Severity::Debug)));
    }
}
