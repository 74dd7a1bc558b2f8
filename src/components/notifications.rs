//! Transient in-app notifications: a non-modal overlay in the window's top
//! left that dismisses itself after a fixed delay. No nested event loop — each
//! notification carries a deadline and the shared repaint loop services it.

use egui::{Align2, Color32, RichText, Vec2};
use std::time::{Duration, Instant};

/// How long a notification stays on screen.
pub const DISMISS_AFTER: Duration = Duration::from_secs(5);

/// Closed set of notification categories. The icon/color/heading mapping is a
/// fixed exhaustive match, not runtime configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    Done,
    Info,
    Warn,
    Error,
    Switch,
}

impl NotificationKind {
    pub fn heading(&self) -> &'static str {
        match self {
            NotificationKind::Done => "DONE",
            NotificationKind::Info => "INFORMATION",
            NotificationKind::Warn => "WARNING",
            NotificationKind::Error => "ERROR",
            NotificationKind::Switch => "SWITCH",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            NotificationKind::Done => "✔",
            NotificationKind::Info => "ℹ",
            NotificationKind::Warn => "⚠",
            NotificationKind::Error => "✖",
            NotificationKind::Switch => "⇄",
        }
    }

    pub fn color(&self) -> Color32 {
        match self {
            NotificationKind::Done => Color32::from_rgb(0, 160, 60),
            NotificationKind::Info => Color32::from_rgb(50, 110, 220),
            NotificationKind::Warn => Color32::from_rgb(220, 170, 0),
            NotificationKind::Error => Color32::from_rgb(210, 40, 40),
            NotificationKind::Switch => Color32::from_rgb(150, 60, 200),
        }
    }
}

struct Notification {
    kind: NotificationKind,
    message: String,
    deadline: Instant,
}

#[derive(Default)]
pub struct Notifications {
    active: Vec<Notification>,
}

impl Notifications {
    pub fn push(&mut self, kind: NotificationKind, message: impl Into<String>) {
        self.active.push(Notification {
            kind,
            message: message.into(),
            deadline: Instant::now() + DISMISS_AFTER,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Drop expired notifications. Split from rendering so expiry is testable
    /// without an egui context.
    pub fn prune(&mut self, now: Instant) {
        self.active.retain(|n| n.deadline > now);
    }

    /// Render active notifications and schedule a repaint for the next
    /// deadline so dismissal does not wait for further input events.
    pub fn show(&mut self, ctx: &egui::Context) {
        let now = Instant::now();
        self.prune(now);
        if self.active.is_empty() {
            return;
        }

        let mut offset = Vec2::new(16.0, 16.0);
        for (i, n) in self.active.iter().enumerate() {
            egui::Area::new(egui::Id::new("notification").with(i))
                .anchor(Align2::LEFT_TOP, offset)
                .interactable(false)
                .show(ctx, |ui| {
                    egui::Frame::popup(ui.style()).show(ui, |ui| {
                        ui.horizontal(|ui| {
                            ui.label(
                                RichText::new(n.kind.icon())
                                    .size(22.0)
                                    .color(n.kind.color()),
                            );
                            ui.vertical(|ui| {
                                ui.label(
                                    RichText::new(n.kind.heading())
                                        .small()
                                        .strong()
                                        .color(n.kind.color()),
                                );
                                ui.label(&n.message);
                            });
                        });
                    });
                });
            offset.y += 58.0;
        }

        if let Some(next) = self.active.iter().map(|n| n.deadline).min() {
            ctx.request_repaint_after(next.saturating_duration_since(now));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notifications_expire_after_the_fixed_delay() {
        let mut notifications = Notifications::default();
        notifications.push(NotificationKind::Done, "saved");
        assert!(!notifications.is_empty());

        notifications.prune(Instant::now());
        assert!(!notifications.is_empty());

        notifications.prune(Instant::now() + DISMISS_AFTER + Duration::from_millis(1));
        assert!(notifications.is_empty());
    }

    #[test]
    fn every_kind_has_distinct_heading_and_icon() {
        let kinds = [
            NotificationKind::Done,
            NotificationKind::Info,
            NotificationKind::Warn,
            NotificationKind::Error,
            NotificationKind::Switch,
        ];
        for (i, a) in kinds.iter().enumerate() {
            for b in kinds.iter().skip(i + 1) {
                assert_ne!(a.heading(), b.heading());
                assert_ne!(a.icon(), b.icon());
            }
        }
    }
}
