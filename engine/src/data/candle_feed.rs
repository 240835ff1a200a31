// Fake-candle price model: a bounded random walk feeding a capped FIFO buffer.
use crate::config::CandleSettings;
use rand::Rng;
use shared::models::CandlePoint;
use shared::utils::round2;
use std::collections::VecDeque;

/// Floor keeping every simulated price positive.
pub const MIN_PRICE: f64 = 0.01;

/// Used when the buffer is empty and there is no previous close to walk from.
pub const FALLBACK_CLOSE: f64 = 100.0;

#[derive(Debug, Clone)]
pub struct CandleGenerator {
    settings: CandleSettings,
}

impl CandleGenerator {
    pub fn new(settings: CandleSettings) -> Self {
        Self { settings }
    }

    /// `open` = previous close ± open_jitter, `close` = open ± close_jitter,
    /// wicks extend up to `wick_max` beyond the body.
    pub fn generate<R: Rng + ?Sized>(&self, previous_close: f64, timestamp: i64, rng: &mut R) -> CandlePoint {
        let s = &self.settings;
        let open = round2(previous_close + symmetric(rng, s.open_jitter)).max(MIN_PRICE);
        let close = round2(open + symmetric(rng, s.close_jitter)).max(MIN_PRICE);

        let body_top = open.max(close);
        let body_bottom = open.min(close);
        // Rounding may pull a wick inside the body; clamp it back out.
        let high = round2(body_top + margin(rng, s.wick_max)).max(body_top);
        let low = round2(body_bottom - margin(rng, s.wick_max))
            .min(body_bottom)
            .max(MIN_PRICE);

        CandlePoint { timestamp, open, high, low, close }
    }

    /// `seed_len` points walking from `seed_base + rand * seed_spread`, spaced one tick
    /// apart and ending at `now_ms`.
    pub fn seed<R: Rng + ?Sized>(&self, now_ms: i64, rng: &mut R) -> Vec<CandlePoint> {
        let s = &self.settings;
        let mut price = s.seed_base + margin(rng, s.seed_spread);
        let tick = s.tick_ms as i64;
        let mut points = Vec::with_capacity(s.seed_len);
        for i in 0..s.seed_len {
            let age = (s.seed_len - 1 - i) as i64;
            let point = self.generate(price, now_ms - age * tick, rng);
            price = point.close;
            points.push(point);
        }
        points
    }
}

fn symmetric<R: Rng + ?Sized>(rng: &mut R, amplitude: f64) -> f64 {
    if amplitude <= 0.0 {
        0.0
    } else {
        rng.gen_range(-amplitude..=amplitude)
    }
}

fn margin<R: Rng + ?Sized>(rng: &mut R, max: f64) -> f64 {
    if max <= 0.0 {
        0.0
    } else {
        rng.gen_range(0.0..=max)
    }
}

/// Capped candle history. Appending past capacity evicts the oldest point.
#[derive(Debug, Clone, PartialEq)]
pub struct CandleBuffer {
    points: VecDeque<CandlePoint>,
    capacity: usize,
}

impl CandleBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the evicted point, if any.
    pub fn push(&mut self, point: CandlePoint) -> Option<CandlePoint> {
        self.points.push_back(point);
        if self.points.len() > self.capacity {
            self.points.pop_front()
        } else {
            None
        }
    }

    pub fn extend(&mut self, points: impl IntoIterator<Item = CandlePoint>) {
        for point in points {
            self.push(point);
        }
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn first(&self) -> Option<&CandlePoint> {
        self.points.front()
    }

    pub fn last(&self) -> Option<&CandlePoint> {
        self.points.back()
    }

    pub fn last_close(&self) -> Option<f64> {
        self.points.back().map(|c| c.close)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CandlePoint> {
        self.points.iter()
    }

    pub fn to_vec(&self) -> Vec<CandlePoint> {
        self.points.iter().copied().collect()
    }
}
