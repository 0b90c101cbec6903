/// Integer counter shown through the scroll box's label.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScrollBoxState {
    value: i64,
    text: String,
}

impl ScrollBoxState {
    pub fn new(value: i64) -> Self {
        Self {
            value,
            text: value.to_string(),
        }
    }

    #[inline]
    pub fn value(&self) -> i64 {
        self.value
    }

    /// Decimal rendering of the current value.
    #[inline]
    pub fn text(&self) -> &str {
        if self.text.is_empty() { "0" } else { &self.text }
    }

    /// Adds `delta` and returns the new decimal text.
    pub fn change_scroll_value(&mut self, delta: i64) -> &str {
        self.value = self.value.saturating_add(delta);
        self.text = self.value.to_string();
        &self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_reads_zero() {
        let s = ScrollBoxState::default();
        assert_eq!(s.value(), 0);
        assert_eq!(s.text(), "0");
    }

    #[test]
    fn scrolling_down_goes_negative() {
        let mut s = ScrollBoxState::default();
        assert_eq!(s.change_scroll_value(-1), "-1");
        assert_eq!(s.change_scroll_value(3), "2");
        assert_eq!(s.value(), 2);
    }

    #[test]
    fn saturates_at_extremes() {
        let mut s = ScrollBoxState::new(i64::MAX);
        s.change_scroll_value(1);
        assert_eq!(s.value(), i64::MAX);
    }

    #[test]
    fn value_is_sum_of_random_deltas() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(0x5c20_11b0);
        let mut s = ScrollBoxState::default();
        let mut sum = 0i64;
        for _ in 0..10_000 {
            let magnitude: i64 = rng.gen_range(1..=3);
            let delta = if rng.gen_bool(0.5) { magnitude } else { -magnitude };
            sum += delta;
            let text = s.change_scroll_value(delta).to_owned();
            assert_eq!(text, sum.to_string());
        }
        assert_eq!(s.value(), sum);
    }
}
