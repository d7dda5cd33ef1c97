//! Short-lived messages shown over the canvas.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    /// Operation failed (e.g. an export).
    Alert,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub expires_at: f64,
}

/// Visible notices, oldest first.
#[derive(Debug, Clone)]
pub struct Notifications {
    notices: Vec<Notice>,
    duration: f64,
}

impl Default for Notifications {
    fn default() -> Self {
        Self::new(3.0)
    }
}

impl Notifications {
    pub fn new(duration: f64) -> Self {
        Self {
            notices: Vec::new(),
            duration,
        }
    }

    /// Shows `message` until `now + duration`. A message that is already
    /// visible gets its expiry refreshed instead of a second copy.
    pub fn push(&mut self, level: NoticeLevel, message: impl Into<String>, now: f64) {
        let message = message.into();
        let expires_at = now + self.duration;
        if let Some(existing) = self.notices.iter_mut().find(|n| n.message == message) {
            existing.level = level;
            existing.expires_at = expires_at;
            return;
        }
        self.notices.push(Notice {
            level,
            message,
            expires_at,
        });
    }

    /// Drops expired notices.
    pub fn prune(&mut self, now: f64) {
        self.notices.retain(|notice| notice.expires_at > now);
    }

    pub fn visible(&self, now: f64) -> impl Iterator<Item = &Notice> {
        self.notices.iter().filter(move |notice| notice.expires_at > now)
    }

    /// Earliest expiry, so the host knows when to repaint next.
    pub fn next_expiry(&self) -> Option<f64> {
        self.notices.iter().map(|n| n.expires_at).reduce(f64::min)
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }
}
