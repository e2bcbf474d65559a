use crate::Price;
use std::collections::VecDeque;

/// Fixed-size window over the most recent prices with a running sum.
#[derive(Clone, Debug)]
pub(crate) struct SumWindow {
    size: usize,
    window: VecDeque<Price>,
    /// Sum of the prices currently in `window`.
    sum: Price,
}

impl SumWindow {
    pub(crate) fn new(size: usize) -> Self {
        Self {
            size,
            window: VecDeque::new(),
            sum: 0.0,
        }
    }

    /// Pushes `price`, evicting the oldest value once the window is full.
    #[inline]
    pub(crate) fn push(&mut self, price: Price) {
        if self.is_full()
            && let Some(oldest) = self.window.pop_front()
        {
            self.sum -= oldest;
        }

        self.window.push_back(price);
        self.sum += price;
    }

    /// Running sum, once the window holds `size` values.
    #[inline]
    pub(crate) fn sum(&self) -> Option<Price> {
        self.is_full().then_some(self.sum)
    }

    #[inline]
    fn is_full(&self) -> bool {
        self.window.len() == self.size
    }
}
