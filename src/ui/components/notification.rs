//! Toasts for request outcomes.
//!
//! Failed requests surface here. Toasts expire on their own and the oldest
//! is dropped once too many are stacked.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::ui::theme::theme;

const MAX_VISIBLE: usize = 3;
const TOAST_WIDTH: u16 = 48;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Warning,
    Error,
}

impl ToastKind {
    fn color(self) -> Color {
        match self {
            ToastKind::Info => theme().info,
            ToastKind::Warning => theme().warning,
            ToastKind::Error => theme().error,
        }
    }

    fn icon(self) -> &'static str {
        match self {
            ToastKind::Info => "i",
            ToastKind::Warning => "!",
            ToastKind::Error => "x",
        }
    }

    fn lifetime(self) -> Duration {
        match self {
            ToastKind::Info => Duration::from_secs(3),
            ToastKind::Warning | ToastKind::Error => Duration::from_secs(6),
        }
    }
}

/// A single toast.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub kind: ToastKind,
    created_at: Instant,
    lifetime: Duration,
}

impl Notification {
    pub fn new(message: impl Into<String>, kind: ToastKind) -> Self {
        Self {
            message: message.into(),
            kind,
            created_at: Instant::now(),
            lifetime: kind.lifetime(),
        }
    }

    fn is_expired(&self, now: Instant) -> bool {
        now.duration_since(self.created_at) > self.lifetime
    }
}

/// Stack of live toasts, newest last.
#[derive(Debug, Default)]
pub struct NotificationManager {
    notifications: VecDeque<Notification>,
}

impl NotificationManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, notification: Notification) {
        self.notifications.push_back(notification);
        while self.notifications.len() > MAX_VISIBLE {
            self.notifications.pop_front();
        }
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(Notification::new(message, ToastKind::Info));
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(Notification::new(message, ToastKind::Warning));
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Notification::new(message, ToastKind::Error));
    }

    /// Drop expired toasts. Called on every tick.
    pub fn tick(&mut self) {
        self.expire(Instant::now());
    }

    fn expire(&mut self, now: Instant) {
        self.notifications.retain(|n| !n.is_expired(now));
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }

    pub fn len(&self) -> usize {
        self.notifications.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.notifications.iter()
    }

    /// Stack the toasts in the bottom-right corner of `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let width = TOAST_WIDTH.min(area.width.saturating_sub(2));
        let inner_width = width.saturating_sub(4).max(1) as usize;
        let x = area.x + area.width.saturating_sub(width + 1);
        let mut bottom = area.y + area.height.saturating_sub(1);

        for toast in self.notifications.iter().rev() {
            let text_len = toast.message.chars().count() + 2;
            let height = ((text_len + inner_width - 1) / inner_width) as u16 + 2;
            if bottom < area.y + height {
                break;
            }
            bottom -= height;
            render_toast(toast, frame, Rect::new(x, bottom, width, height));
        }
    }
}

fn render_toast(toast: &Notification, frame: &mut Frame, area: Rect) {
    frame.render_widget(Clear, area);

    let style = Style::default().fg(toast.kind.color());
    let text = Line::from(vec![
        Span::styled(format!("{} ", toast.kind.icon()), style.add_modifier(Modifier::BOLD)),
        Span::styled(toast.message.as_str(), style),
    ]);
    let paragraph = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).border_style(style))
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_caps_stack() {
        let mut manager = NotificationManager::new();
        manager.info("1");
        manager.warning("2");
        manager.error("3");
        manager.error("4");

        let messages: Vec<&str> = manager.iter().map(|n| n.message.as_str()).collect();
        assert_eq!(messages, vec!["2", "3", "4"]);
    }

    #[test]
    fn test_errors_outlive_info() {
        let mut manager = NotificationManager::new();
        manager.info("saved");
        manager.error("failed");

        manager.expire(Instant::now() + Duration::from_secs(4));
        assert_eq!(manager.len(), 1);
        assert_eq!(manager.iter().next().map(|n| n.kind), Some(ToastKind::Error));

        manager.expire(Instant::now() + Duration::from_secs(7));
        assert!(manager.is_empty());
    }

    #[test]
    fn test_fresh_toast_survives_tick() {
        let mut manager = NotificationManager::new();
        manager.error("x");
        manager.tick();
        assert_eq!(manager.len(), 1);
    }
}
