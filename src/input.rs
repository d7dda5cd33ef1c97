use egui::{Context, Key, Modifiers, PointerButton, Pos2, Rect, Response};

use crate::geometry::Point;

/// Represents the location where an input event occurred
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputLocation {
    /// Position relative to the canvas origin
    pub position: Point,
}

impl InputLocation {
    pub fn canvas(position: Point) -> Self {
        Self { position }
    }
}

/// Input the editor reacts to, in canvas coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Primary button was pressed
    PointerDown { location: InputLocation },
    /// Pointer moved over the canvas (with or without buttons pressed)
    PointerMove { location: InputLocation },
    /// Primary button was released over the canvas
    PointerUp { location: InputLocation },
    /// Pointer left the canvas
    PointerLeave,
    DoubleClick { location: InputLocation },
    /// Key was pressed while no text field had focus
    KeyDown { key: Key, modifiers: Modifiers },
}

impl InputEvent {
    pub fn pointer_down(x: f64, y: f64) -> Self {
        Self::PointerDown {
            location: InputLocation::canvas(Point::new(x, y)),
        }
    }

    pub fn pointer_move(x: f64, y: f64) -> Self {
        Self::PointerMove {
            location: InputLocation::canvas(Point::new(x, y)),
        }
    }

    pub fn pointer_up(x: f64, y: f64) -> Self {
        Self::PointerUp {
            location: InputLocation::canvas(Point::new(x, y)),
        }
    }

    pub fn double_click(x: f64, y: f64) -> Self {
        Self::DoubleClick {
            location: InputLocation::canvas(Point::new(x, y)),
        }
    }

    pub fn key(key: Key) -> Self {
        Self::KeyDown {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    /// Key pressed together with the platform command modifier (Ctrl, or Cmd
    /// on macOS).
    pub fn command_key(key: Key) -> Self {
        Self::KeyDown {
            key,
            modifiers: Modifiers::COMMAND,
        }
    }
}

/// Handles converting raw egui input into our domain-specific InputEvents
#[derive(Debug, Default)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    was_inside: bool,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    fn make_location(canvas: Rect, pos: Pos2) -> InputLocation {
        InputLocation::canvas(Point::from_screen(pos, canvas.min))
    }

    /// Process this frame's raw egui input for the canvas behind `response`.
    ///
    /// Events come out in the order a browser would deliver them: leave,
    /// press, move, release, double-click, then keys.
    pub fn process_input(&mut self, ctx: &Context, response: &Response) -> Vec<InputEvent> {
        let canvas = response.rect;
        let keyboard_free = !ctx.wants_keyboard_input();
        let mut events = Vec::new();

        ctx.input(|input| {
            let hover = input.pointer.hover_pos();
            let inside = hover.is_some_and(|pos| canvas.contains(pos));

            if self.was_inside && !inside {
                events.push(InputEvent::PointerLeave);
                self.last_pointer_pos = None;
            }

            if input.pointer.button_pressed(PointerButton::Primary) {
                if let Some(origin) = input.pointer.press_origin().or(hover) {
                    if canvas.contains(origin) {
                        events.push(InputEvent::PointerDown {
                            location: Self::make_location(canvas, origin),
                        });
                    }
                }
            }

            if let Some(pos) = hover.filter(|_| inside) {
                if Some(pos) != self.last_pointer_pos {
                    events.push(InputEvent::PointerMove {
                        location: Self::make_location(canvas, pos),
                    });
                }
                self.last_pointer_pos = Some(pos);

                if input.pointer.button_released(PointerButton::Primary) {
                    events.push(InputEvent::PointerUp {
                        location: Self::make_location(canvas, pos),
                    });
                }
                if input.pointer.button_double_clicked(PointerButton::Primary) {
                    events.push(InputEvent::DoubleClick {
                        location: Self::make_location(canvas, pos),
                    });
                }
            }

            if keyboard_free {
                for event in &input.raw.events {
                    if let egui::Event::Key {
                        key,
                        pressed: true,
                        repeat: false,
                        modifiers,
                        ..
                    } = event
                    {
                        events.push(InputEvent::KeyDown {
                            key: *key,
                            modifiers: *modifiers,
                        });
                    }
                }
            }

            self.was_inside = inside;
        });

        events
    }
}
