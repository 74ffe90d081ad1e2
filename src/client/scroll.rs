use log::debug;

pub const FADE_IN_CLASS: &str = "animate-fade-in";

/// An element the animator can reveal.
pub trait Revealable {
    /// Distance from the viewport top to the element's bounding box top.
    fn top(&self) -> f64;
    fn is_revealed(&self) -> bool;
    fn reveal(&mut self);
}

/// Reveals fade-in targets once they scroll past a fraction of the
/// viewport. Stateless: every pass only looks at current geometry.
#[derive(Debug, Clone, Copy)]
pub struct ScrollAnimator {
    divisor: f64,
}

impl Default for ScrollAnimator {
    fn default() -> Self {
        Self { divisor: 1.3 }
    }
}

impl ScrollAnimator {
    pub fn new(divisor: f64) -> Self {
        Self { divisor }
    }

    pub fn threshold(&self, viewport_height: f64) -> f64 {
        viewport_height / self.divisor
    }

    /// Runs one pass on load or on a scroll event. Returns how many of the
    /// elements are visible afterwards.
    pub fn run<E: Revealable>(&self, viewport_height: f64, elements: &mut [E]) -> usize {
        let threshold = self.threshold(viewport_height);
        let mut visible = 0;
        for element in elements.iter_mut() {
            if element.top() < threshold {
                element.reveal();
            }
            if element.is_revealed() {
                visible += 1;
            }
        }
        debug!(
            "scroll pass: {}/{} visible (threshold {:.1}px)",
            visible,
            elements.len(),
            threshold
        );
        visible
    }
}

/// Inline style state of a fade-in target.
#[derive(Debug, Clone, PartialEq)]
pub struct FadeInElement {
    pub id: String,
    pub top: f64,
    pub opacity: f64,
    pub translate_y: f64,
}

impl FadeInElement {
    /// A hidden element, offset downward as the stylesheet starts it.
    pub fn new(id: impl Into<String>, top: f64) -> Self {
        Self {
            id: id.into(),
            top,
            opacity: 0.0,
            translate_y: 20.0,
        }
    }

    /// Inline `style` attribute for the current state.
    pub fn style(&self) -> String {
        format!(
            "opacity: {}; transform: translateY({}px)",
            self.opacity, self.translate_y
        )
    }
}

impl Revealable for FadeInElement {
    fn top(&self) -> f64 {
        self.top
    }

    fn is_revealed(&self) -> bool {
        self.opacity >= 1.0 && self.translate_y == 0.0
    }

    fn reveal(&mut self) {
        self.opacity = 1.0;
        self.translate_y = 0.0;
    }
}

/// Target id of an in-page link, e.g. `#apply` -> `apply`.
pub fn anchor_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}
