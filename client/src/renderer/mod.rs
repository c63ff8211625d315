mod camera;
mod renderthing;

use std::sync::{Arc, Mutex, RwLock};

use camera::{Camera, Point};
use liblife::{CELL_SIZE, Position};
use renderthing::{
    Renderer,
    frame::{Color, RenderFrame},
    window::RendererWindowConfig,
};
use winit::{
    event::{ElementState, KeyEvent, MouseButton, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

use crate::{State, config::ClientConfig, ticker};

const BACKGROUND_COLOR: Color = [128, 128, 128, 255];
const ALIVE_COLOR: Color = [255; 4];
const DEAD_COLOR: Color = [0, 0, 0, 255];

/// Cells at least this many pixels wide get a one pixel gap around them.
const CELL_MARGIN_MIN_PIXELS: f64 = 6.0;

pub fn run(state_arc: Arc<RwLock<State>>, config: &ClientConfig) -> anyhow::Result<()> {
    let camera = {
        let state = state_arc.read().unwrap();
        Camera::centered_on(state.grid.rows(), state.grid.cols())
    };

    let renderer_state = RendererState {
        global_state: state_arc,
        camera,
        viewport: [config.window_width, config.window_height],
        cursor: None,
        painting: false,
        panning: false,
        last_painted: None,
    };

    let renderer_state_arc = Arc::new(Mutex::new(renderer_state));
    let draw_state_arc = renderer_state_arc.clone();
    let event_state_arc = renderer_state_arc.clone();

    let renderer = Renderer::new(RendererWindowConfig {
        title: "Game of Life".to_owned(),
        width: config.window_width,
        height: config.window_height,
        target_fps: config.target_fps,
        draw_callback: Box::new(move |frame| {
            let mut state = draw_state_arc.lock().unwrap();
            draw(&mut state, frame);
        }),
        event_callback: Some(Box::new(move |event| {
            let mut state = event_state_arc.lock().unwrap();
            on_event(&mut state, event);
        })),
    })?;

    renderer.run()
}

fn draw(state: &mut RendererState, mut frame: RenderFrame) {
    state.viewport = [frame.width, frame.height];

    frame.fill(BACKGROUND_COLOR);

    let global_state = state.global_state.read().unwrap();
    let grid = &global_state.grid;
    let camera = &state.camera;

    let margin = if CELL_SIZE as f64 / camera.zoom >= CELL_MARGIN_MIN_PIXELS {
        1
    } else {
        0
    };

    let (visible_rows, visible_cols) = camera.visible_cells(state.viewport, grid.rows(), grid.cols());
    let cell_size = CELL_SIZE as f64;

    for row in visible_rows {
        for col in visible_cols.clone() {
            let top_left = camera.world_to_screen(
                Point::new(col as f64 * cell_size, row as f64 * cell_size),
                state.viewport,
            );
            let bottom_right = camera.world_to_screen(
                Point::new((col + 1) as f64 * cell_size, (row + 1) as f64 * cell_size),
                state.viewport,
            );

            let x = top_left.x.round() as i64;
            let y = top_left.y.round() as i64;
            let width = bottom_right.x.round() as i64 - x;
            let height = bottom_right.y.round() as i64 - y;

            let color = match grid.is_alive(Position { row, col }) {
                Ok(true) => ALIVE_COLOR,
                Ok(false) => DEAD_COLOR,
                Err(e) => {
                    log::warn!("Skipping cell outside of the grid: {e}");
                    continue;
                }
            };

            frame.fill_rect(
                x + margin,
                y + margin,
                width - margin * 2,
                height - margin * 2,
                color,
            );
        }
    }
}

fn on_event(state: &mut RendererState, event: &WindowEvent) {
    match event {
        WindowEvent::MouseInput {
            state: button_state,
            button,
            ..
        } => match (button, button_state) {
            (MouseButton::Left, ElementState::Pressed) => state.start_painting(),
            (MouseButton::Left, ElementState::Released) => state.stop_painting(),
            (MouseButton::Right, button_state) => state.panning = button_state.is_pressed(),
            _ => {}
        },
        WindowEvent::CursorMoved { position, .. } => {
            state.move_cursor(Point::new(position.x, position.y));
        }
        WindowEvent::CursorLeft { .. } => {
            state.cursor = None;
        }
        WindowEvent::KeyboardInput {
            event:
                KeyEvent {
                    physical_key: PhysicalKey::Code(key_code),
                    state: ElementState::Pressed,
                    repeat,
                    ..
                },
            ..
        } => state.press_key(*key_code, *repeat),
        _ => {}
    }
}

struct RendererState {
    global_state: Arc<RwLock<State>>,
    camera: Camera,
    viewport: [u32; 2],
    cursor: Option<Point>,
    painting: bool,
    panning: bool,
    last_painted: Option<Position>,
}

impl RendererState {
    fn hovered_cell(&self) -> Option<Position> {
        let cursor = self.cursor?;
        let global_state = self.global_state.read().unwrap();

        self.camera.cell_at(
            cursor,
            self.viewport,
            global_state.grid.rows(),
            global_state.grid.cols(),
        )
    }

    fn start_painting(&mut self) {
        self.painting = true;
        self.last_painted = self.hovered_cell();

        if let Some(cell) = self.last_painted {
            self.toggle(cell);
        }
    }

    fn stop_painting(&mut self) {
        self.painting = false;
        self.last_painted = None;
    }

    fn move_cursor(&mut self, position: Point) {
        if self.panning
            && let Some(previous) = self.cursor
        {
            self.camera
                .pan(Point::new(position.x - previous.x, position.y - previous.y));
        }

        self.cursor = Some(position);

        if self.painting {
            let hovered = self.hovered_cell();

            // Only toggle when entering a different cell, so holding still doesn't flicker.
            if hovered != self.last_painted
                && let Some(cell) = hovered
            {
                self.toggle(cell);
            }

            self.last_painted = hovered;
        }
    }

    fn toggle(&self, cell: Position) {
        let mut global_state = self.global_state.write().unwrap();

        match global_state.grid.toggle(cell) {
            Ok(alive) => log::trace!("Toggled {cell} to {}", if alive { "alive" } else { "dead" }),
            Err(e) => log::warn!("Couldn't toggle cell: {e}"),
        }
    }

    fn press_key(&mut self, key_code: KeyCode, repeat: bool) {
        match key_code {
            KeyCode::KeyI => self.camera.zoom_in(),
            KeyCode::KeyO => self.camera.zoom_out(),
            KeyCode::ArrowLeft => ticker::slow_down(&self.global_state),
            KeyCode::ArrowRight => ticker::speed_up(&self.global_state),
            KeyCode::Space if !repeat => ticker::toggle_pause(&self.global_state),
            _ => {}
        }
    }
}
