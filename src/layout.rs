//! Icon grid layout module.
//!
//! Pure geometry for packing square icons into rows. Coordinates are
//! relative to the grid's top-left corner; x grows to the right and y grows
//! upward, so successive rows have increasingly negative y.

use serde::{Deserialize, Serialize};

/// Packs square icons of edge `icon_size` with `spacing` between them.
///
/// Every calculation degrades to a safe minimum instead of failing: a
/// non-positive width still fits one icon, an empty grid has zero size.
///
/// # Examples
///
/// ```rust
/// use evoformula::IconGridLayout;
///
/// let layout = IconGridLayout::new(38.0, 6.0);
/// assert_eq!(layout.icons_per_row(440.0), 10);
/// assert_eq!(layout.grid(23, 440.0), (3, 10));
/// assert_eq!(layout.icon_position(11, 10), (44.0, -44.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IconGridLayout {
    pub icon_size: f32,
    pub spacing: f32,
}

impl IconGridLayout {
    pub fn new(icon_size: f32, spacing: f32) -> Self {
        Self { icon_size, spacing }
    }

    /// Distance from one icon's origin to the next.
    fn pitch(&self) -> f32 {
        self.icon_size + self.spacing
    }

    /// How many icons fit side by side in `available_width`. Always at
    /// least 1.
    ///
    /// N icons with N-1 gaps need `N*S + (N-1)*G`, so the largest fitting N
    /// is `floor((width + G) / (S + G))`.
    pub fn icons_per_row(&self, available_width: f32) -> usize {
        if !(available_width > 0.0) {
            return 1;
        }
        let count = ((available_width + self.spacing) / self.pitch()).floor();
        if count >= 1.0 {
            count as usize
        } else {
            1
        }
    }

    /// Grid dimensions as `(rows, cols)`; `(0, 0)` for no icons.
    pub fn grid(&self, icon_count: usize, available_width: f32) -> (usize, usize) {
        if icon_count == 0 {
            return (0, 0);
        }
        let cols = self.icons_per_row(available_width);
        (icon_count.div_ceil(cols), cols)
    }

    /// Top-left corner of the icon at `index` in row-major order.
    ///
    /// `cols` of 0 is treated as 1.
    pub fn icon_position(&self, index: usize, cols: usize) -> (f32, f32) {
        let cols = cols.max(1);
        let row = index / cols;
        let col = index % cols;
        let x = col as f32 * self.pitch();
        let y = -(row as f32 * self.pitch());
        (x, y)
    }

    /// Height of `rows` rows, with no trailing gap.
    pub fn grid_height(&self, rows: usize) -> f32 {
        self.span(rows)
    }

    /// Width of `cols` columns, with no trailing gap.
    pub fn row_width(&self, cols: usize) -> f32 {
        self.span(cols)
    }

    fn span(&self, n: usize) -> f32 {
        if n == 0 {
            return 0.0;
        }
        n as f32 * self.icon_size + (n - 1) as f32 * self.spacing
    }

    /// Height needed to lay out `icon_count` icons in `available_width`.
    pub fn total_height(&self, icon_count: usize, available_width: f32) -> f32 {
        let (rows, _) = self.grid(icon_count, available_width);
        self.grid_height(rows)
    }

    /// Index of the icon under the grid-local point `(x, y)`.
    ///
    /// Returns `None` for points in a gap, outside the grid, or past the
    /// last icon.
    pub fn hit_test(&self, x: f32, y: f32, cols: usize, icon_count: usize) -> Option<usize> {
        let cols = cols.max(1);
        let down = -y;
        if x < 0.0 || down < 0.0 {
            return None;
        }
        let col = (x / self.pitch()).floor() as usize;
        let row = (down / self.pitch()).floor() as usize;
        if col >= cols {
            return None;
        }
        let in_icon_x = x - col as f32 * self.pitch() < self.icon_size;
        let in_icon_y = down - row as f32 * self.pitch() < self.icon_size;
        let index = row * cols + col;
        (in_icon_x && in_icon_y && index < icon_count).then_some(index)
    }
}
