//! Headless HUD widget: name, position, style class and a coordinate-change signal.
//!
//! Rendering is left to whatever host embeds the widget; it subscribes to
//! `on_coords_update` to learn about moves.

use log::debug;

use crate::signal::Signal;

pub struct HudWidget {
    name: String,
    x: f32,
    y: f32,
    style_class: Option<String>,
    /// Fired with `(x, y)` after every coordinate change.
    pub on_coords_update: Signal<(f32, f32)>,
}

impl HudWidget {
    pub fn new(name: impl Into<String>, x: f32, y: f32) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            style_class: None,
            on_coords_update: Signal::new(),
        }
    }

    /// Type name of the widget.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    pub fn set_x(&mut self, x: f32) {
        self.x = x;
        self.notify_coords();
    }

    pub fn set_y(&mut self, y: f32) {
        self.y = y;
        self.notify_coords();
    }

    /// Move both coordinates with a single notification.
    pub fn set_position(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
        self.notify_coords();
    }

    pub fn style_class(&self) -> Option<&str> {
        self.style_class.as_deref()
    }

    pub fn set_style(&mut self, class: impl Into<String>) {
        self.style_class = Some(class.into());
    }

    fn notify_coords(&mut self) {
        debug!("{} moved to ({}, {})", self.name, self.x, self.y);
        let coords = (self.x, self.y);
        self.on_coords_update.dispatch(&coords);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recording_widget() -> (HudWidget, Rc<RefCell<Vec<(f32, f32)>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut widget = HudWidget::new("keyIndicator", 10.0, 20.0);
        let sink = Rc::clone(&seen);
        widget
            .on_coords_update
            .add(move |coords| sink.borrow_mut().push(*coords));
        (widget, seen)
    }

    #[test]
    fn construction_does_not_notify() {
        let (widget, seen) = recording_widget();
        assert_eq!(widget.position(), (10.0, 20.0));
        assert_eq!(widget.name(), "keyIndicator");
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn setters_update_then_notify() {
        let (mut widget, seen) = recording_widget();
        widget.set_x(5.0);
        widget.set_y(7.5);
        assert_eq!(*seen.borrow(), vec![(5.0, 20.0), (5.0, 7.5)]);
        assert_eq!(widget.x(), 5.0);
        assert_eq!(widget.y(), 7.5);
    }

    #[test]
    fn set_position_notifies_once() {
        let (mut widget, seen) = recording_widget();
        widget.set_position(1.0, 2.0);
        assert_eq!(*seen.borrow(), vec![(1.0, 2.0)]);
    }

    #[test]
    fn style_class() {
        let mut widget = HudWidget::new("score", 0.0, 0.0);
        assert_eq!(widget.style_class(), None);
        widget.set_style("hud-score");
        assert_eq!(widget.style_class(), Some("hud-score"));
    }
}
