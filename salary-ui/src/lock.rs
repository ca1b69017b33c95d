//! Lock-state decision for the whole editor surface.

/// Signals consulted to decide whether the editor opens read-only.
///
/// Sources are evaluated in order — explicit form-level flag, dedicated
/// boolean-like input field, process-wide fallback — and the first source
/// that is present and affirmative wins. A source that is absent or
/// negative never unlocks an editor a later source would lock.
///
/// The fallback is an explicit constructor input, not ambient global state;
/// hosts that used to publish a process-wide flag pass its value here.
#[derive(Debug, Clone, Default)]
pub struct LockSignals {
    /// Form-level explicit flag, when the host form carries one.
    pub form_flag: Option<bool>,
    /// Raw value of the dedicated lock input field, when present.
    pub lock_field: Option<String>,
    /// Process-wide fallback.
    pub global_fallback: bool,
}

impl LockSignals {
    /// `"true"`, `"1"` and `"on"` are affirmative, after trimming and ASCII
    /// lowercasing. Anything else (including `"false"`, `""`, garbage) is not.
    fn is_affirmative(value: &str) -> bool {
        matches!(
            value.trim().to_ascii_lowercase().as_str(),
            "true" | "1" | "on"
        )
    }

    /// Evaluates the lock decision. Callers evaluate this exactly once, at
    /// editor construction; lock state is not re-derived later.
    pub fn is_locked(&self) -> bool {
        if self.form_flag == Some(true) {
            return true;
        }
        if self
            .lock_field
            .as_deref()
            .is_some_and(Self::is_affirmative)
        {
            return true;
        }
        self.global_fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlocked_by_default() {
        assert!(!LockSignals::default().is_locked());
    }

    #[test]
    fn form_flag_locks() {
        let signals = LockSignals {
            form_flag: Some(true),
            ..LockSignals::default()
        };

        assert!(signals.is_locked());
    }

    #[test]
    fn negative_form_flag_does_not_override_lock_field() {
        let signals = LockSignals {
            form_flag: Some(false),
            lock_field: Some("on".to_string()),
            global_fallback: false,
        };

        assert!(signals.is_locked());
    }

    #[test]
    fn lock_field_accepts_truthy_spellings() {
        for value in ["true", "TRUE", " 1 ", "on", "On"] {
            let signals = LockSignals {
                lock_field: Some(value.to_string()),
                ..LockSignals::default()
            };
            assert!(signals.is_locked(), "expected {value:?} to lock");
        }
    }

    #[test]
    fn lock_field_rejects_other_values() {
        for value in ["false", "0", "off", "", "yes"] {
            let signals = LockSignals {
                lock_field: Some(value.to_string()),
                ..LockSignals::default()
            };
            assert!(!signals.is_locked(), "expected {value:?} not to lock");
        }
    }

    #[test]
    fn global_fallback_locks_when_nothing_else_decides() {
        let signals = LockSignals {
            global_fallback: true,
            ..LockSignals::default()
        };

        assert!(signals.is_locked());
    }
}
