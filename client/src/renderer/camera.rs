use liblife::{CELL_SIZE, Position};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Maps between screen pixels and world units, where one cell spans `CELL_SIZE` world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// World position shown in the middle of the screen.
    pub center: Point,

    /// World units per screen pixel. Smaller values are zoomed in further.
    pub zoom: f64,
}

impl Camera {
    pub const MIN_ZOOM: f64 = 1.0 / 64.0;
    pub const MAX_ZOOM: f64 = 64.0;

    /// A camera looking at the middle of a `rows` x `cols` grid at 1:1 scale.
    pub fn centered_on(rows: usize, cols: usize) -> Self {
        let cell_size = CELL_SIZE as f64;

        Self {
            center: Point::new(cols as f64 * cell_size / 2.0, rows as f64 * cell_size / 2.0),
            zoom: 1.0,
        }
    }

    pub fn zoom_in(&mut self) {
        self.zoom_by(0.5);
    }

    pub fn zoom_out(&mut self) {
        self.zoom_by(2.0);
    }

    fn zoom_by(&mut self, factor: f64) {
        self.zoom = (self.zoom * factor).clamp(Self::MIN_ZOOM, Self::MAX_ZOOM);
    }

    /// Drags the world along with the cursor, `delta` being the cursor movement in pixels.
    pub fn pan(&mut self, delta: Point) {
        self.center.x -= delta.x * self.zoom;
        self.center.y -= delta.y * self.zoom;
    }

    pub fn screen_to_world(&self, screen: Point, viewport: [u32; 2]) -> Point {
        let [width, height] = viewport;

        Point::new(
            self.center.x + (screen.x - width as f64 / 2.0) * self.zoom,
            self.center.y + (screen.y - height as f64 / 2.0) * self.zoom,
        )
    }

    pub fn world_to_screen(&self, world: Point, viewport: [u32; 2]) -> Point {
        let [width, height] = viewport;

        Point::new(
            (world.x - self.center.x) / self.zoom + width as f64 / 2.0,
            (world.y - self.center.y) / self.zoom + height as f64 / 2.0,
        )
    }

    /// The cell under a screen pixel, or `None` when the pixel is off the grid.
    pub fn cell_at(&self, screen: Point, viewport: [u32; 2], rows: usize, cols: usize) -> Option<Position> {
        let world = self.screen_to_world(screen, viewport);
        let cell_size = CELL_SIZE as f64;

        let row = (world.y / cell_size).floor();
        let col = (world.x / cell_size).floor();

        if row < 0.0 || col < 0.0 || row >= rows as f64 || col >= cols as f64 {
            return None;
        }

        Some(Position {
            row: row as usize,
            col: col as usize,
        })
    }

    /// Row and column ranges of the cells at least partially on screen.
    pub fn visible_cells(
        &self,
        viewport: [u32; 2],
        rows: usize,
        cols: usize,
    ) -> (std::ops::Range<usize>, std::ops::Range<usize>) {
        let cell_size = CELL_SIZE as f64;
        let top_left = self.screen_to_world(Point::new(0.0, 0.0), viewport);
        let bottom_right =
            self.screen_to_world(Point::new(viewport[0] as f64, viewport[1] as f64), viewport);

        let range = |start: f64, end: f64, extent: usize| {
            let first = (start / cell_size).floor().clamp(0.0, extent as f64) as usize;
            let last = (end / cell_size).ceil().clamp(0.0, extent as f64) as usize;
            first..last
        };

        (
            range(top_left.y, bottom_right.y, rows),
            range(top_left.x, bottom_right.x, cols),
        )
    }
}
