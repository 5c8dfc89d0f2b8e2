//! Home page carousel state.
//!
//! The carousel holds a current index over a fixed number of slides. Manual
//! navigation and the auto-advance timer both go through [`Carousel::go_to`],
//! so whichever update lands last wins.

/// Index over a non-empty, fixed set of slides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Carousel {
    index: usize,
    len: usize,
}

impl Carousel {
    /// Create a carousel at the first slide.
    ///
    /// Returns `None` when there are no slides to show.
    #[must_use]
    pub const fn new(len: usize) -> Option<Self> {
        if len == 0 {
            None
        } else {
            Some(Self { index: 0, len })
        }
    }

    /// Create a carousel positioned at `index`, wrapped into range.
    #[must_use]
    pub fn at(len: usize, index: i64) -> Option<Self> {
        let mut carousel = Self::new(len)?;
        carousel.go_to(index);
        Some(carousel)
    }

    /// Move to `index`.
    ///
    /// Below zero wraps to the last slide; at or past the end wraps to the
    /// first slide.
    pub fn go_to(&mut self, index: i64) {
        self.index = match usize::try_from(index) {
            Err(_) => self.len - 1,
            Ok(i) if i >= self.len => 0,
            Ok(i) => i,
        };
    }

    /// Advance one slide (manual "next" or a timer tick).
    pub fn next(&mut self) {
        self.go_to(self.step(1));
    }

    /// Go back one slide.
    pub fn prev(&mut self) {
        self.go_to(self.step(-1));
    }

    /// Current slide index.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Number of slides.
    #[must_use]
    pub const fn slide_count(&self) -> usize {
        self.len
    }

    /// Index `next()` would move to.
    #[must_use]
    pub fn next_index(&self) -> usize {
        let mut probe = *self;
        probe.next();
        probe.index
    }

    /// Index `prev()` would move to.
    #[must_use]
    pub fn prev_index(&self) -> usize {
        let mut probe = *self;
        probe.prev();
        probe.index
    }

    /// Horizontal track offset in percent of one slide width.
    #[must_use]
    pub const fn offset_percent(&self) -> usize {
        self.index * 100
    }

    /// CSS transform for the slide track.
    #[must_use]
    pub fn transform(&self) -> String {
        format!("translateX(-{}%)", self.offset_percent())
    }

    /// One flag per indicator, set only for the active slide.
    #[must_use]
    pub fn indicators(&self) -> Vec<bool> {
        (0..self.len).map(|i| i == self.index).collect()
    }

    #[allow(clippy::cast_possible_wrap)] // slide counts are tiny
    const fn step(&self, delta: i64) -> i64 {
        self.index as i64 + delta
    }
}
