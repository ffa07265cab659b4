use iced::{
    Color, Point, Rectangle, Renderer, Theme, mouse,
    widget::canvas::{self, Event, Frame, Geometry, LineCap, LineJoin, Path},
};

use crate::drawing::{Sketch, Stroke};

/// Freehand drawing surface: black ink on a white background.
///
/// Committed strokes come from the session; the stroke under the mouse
/// lives in the widget state until the button is released.
pub struct SketchPad<'a, Message> {
    sketch: &'a Sketch,
    stroke_width: f32,
    on_stroke: fn(Stroke) -> Message,
}

impl<'a, Message> SketchPad<'a, Message> {
    pub fn new(sketch: &'a Sketch, stroke_width: f32, on_stroke: fn(Stroke) -> Message) -> Self {
        Self {
            sketch,
            stroke_width,
            on_stroke,
        }
    }

    fn pen(&self) -> canvas::Stroke<'static> {
        canvas::Stroke::default()
            .with_width(self.stroke_width)
            .with_color(Color::BLACK)
            .with_line_cap(LineCap::Round)
            .with_line_join(LineJoin::Round)
    }
}

#[derive(Debug, Default)]
pub struct PadState {
    pending: Option<Vec<Point>>,
}

impl<Message> canvas::Program<Message> for SketchPad<'_, Message> {
    type State = PadState;

    fn update(
        &self,
        state: &mut PadState,
        event: &Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<canvas::Action<Message>> {
        match event {
            Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                let position = cursor.position_in(bounds)?;
                state.pending = Some(vec![position]);
                Some(canvas::Action::request_redraw().and_capture())
            }
            Event::Mouse(mouse::Event::CursorMoved { .. }) => {
                let pending = state.pending.as_mut()?;
                let position = cursor.position_in(bounds)?;
                pending.push(position);
                Some(canvas::Action::request_redraw().and_capture())
            }
            Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
                let points = state.pending.take()?;
                let stroke = Stroke::new(points.into_iter().map(|p| (p.x, p.y)).collect());
                Some(canvas::Action::publish((self.on_stroke)(stroke)).and_capture())
            }
            _ => None,
        }
    }

    fn draw(
        &self,
        state: &PadState,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        frame.fill_rectangle(Point::ORIGIN, bounds.size(), Color::WHITE);

        for stroke in self.sketch.strokes() {
            let points: Vec<Point> = stroke.points.iter().map(|&(x, y)| Point::new(x, y)).collect();
            if let Some(path) = stroke_path(&points) {
                frame.stroke(&path, self.pen());
            }
        }

        if let Some(pending) = &state.pending {
            if let Some(path) = stroke_path(pending) {
                frame.stroke(&path, self.pen());
            }
        }

        vec![frame.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        _state: &PadState,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if cursor.is_over(bounds) {
            mouse::Interaction::Crosshair
        } else {
            mouse::Interaction::default()
        }
    }
}

fn stroke_path(points: &[Point]) -> Option<Path> {
    let (first, rest) = points.split_first()?;
    Some(Path::new(|builder| {
        builder.move_to(*first);
        if rest.is_empty() {
            // a click leaves a dot
            builder.line_to(Point::new(first.x + 0.5, first.y));
        }
        for point in rest {
            builder.line_to(*point);
        }
    }))
}
