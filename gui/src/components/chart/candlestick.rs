// Candlestick chart rendering component (SVG)
#![allow(non_snake_case)]
use super::price_line::PriceLine;
use crate::config::theme::ThemePalette;
use dioxus::prelude::*;
use shared::models::{price_range, CandlePoint};

pub const MARGIN_LEFT: f64 = 8.0;
pub const MARGIN_RIGHT: f64 = 56.0;
pub const MARGIN_TOP: f64 = 10.0;
pub const MARGIN_BOTTOM: f64 = 10.0;

/// Maps prices onto the plot area. A flat range is widened so the scale never divides by zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceScale {
    pub min: f64,
    pub max: f64,
    pub top: f64,
    pub height: f64,
}

impl PriceScale {
    pub fn new(candles: &[CandlePoint], top: f64, height: f64) -> Option<Self> {
        let (mut min, mut max) = price_range(candles)?;
        if max - min < f64::EPSILON {
            min -= 0.5;
            max += 0.5;
        }
        let pad = (max - min) * 0.05;
        Some(Self { min: min - pad, max: max + pad, top, height })
    }

    pub fn y(&self, price: f64) -> f64 {
        self.top + (self.max - price) / (self.max - self.min) * self.height
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CandleShape {
    pub x_center: f64,
    pub body_x: f64,
    pub body_y: f64,
    pub body_width: f64,
    pub body_height: f64,
    pub wick_top: f64,
    pub wick_bottom: f64,
    pub bullish: bool,
}

/// One slot per candle, body at 70% of the slot width, minimum 1px tall.
pub fn layout_candles(candles: &[CandlePoint], scale: &PriceScale, left: f64, plot_width: f64) -> Vec<CandleShape> {
    if candles.is_empty() {
        return Vec::new();
    }
    let slot = plot_width / candles.len() as f64;
    let body_width = (slot * 0.7).max(1.0);
    candles
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let x_center = left + slot * i as f64 + slot / 2.0;
            let top = scale.y(c.open.max(c.close));
            let bottom = scale.y(c.open.min(c.close));
            CandleShape {
                x_center,
                body_x: x_center - body_width / 2.0,
                body_y: top,
                body_width,
                body_height: (bottom - top).max(1.0),
                wick_top: scale.y(c.high),
                wick_bottom: scale.y(c.low),
                bullish: c.is_bullish(),
            }
        })
        .collect()
}

#[component]
pub fn CandlestickChart(
    candles: Vec<CandlePoint>,
    width: f64,
    height: f64,
    palette: ThemePalette,
    grid_lines: u32,
    wick_width: u32,
) -> Element {
    let plot_width = width - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_height = height - MARGIN_TOP - MARGIN_BOTTOM;
    let Some(scale) = PriceScale::new(&candles, MARGIN_TOP, plot_height) else {
        return rsx! {
            div { class: "chart-empty", style: "height: {height}px; color: {palette.muted};", "Waiting for market data..." }
        };
    };

    let shapes = layout_candles(&candles, &scale, MARGIN_LEFT, plot_width);
    let grid = (1..=grid_lines).map(|i| {
        let y = MARGIN_TOP + plot_height * i as f64 / (grid_lines + 1) as f64;
        let x2 = MARGIN_LEFT + plot_width;
        rsx! {
            line { x1: "{MARGIN_LEFT}", y1: "{y:.2}", x2: "{x2:.2}", y2: "{y:.2}", stroke: "{palette.chart_grid}", stroke_dasharray: "4 4" }
        }
    });
    let bodies = shapes.iter().map(|s| {
        let color = if s.bullish { palette.chart_bullish.clone() } else { palette.chart_bearish.clone() };
        rsx! {
            g {
                line { x1: "{s.x_center:.2}", y1: "{s.wick_top:.2}", x2: "{s.x_center:.2}", y2: "{s.wick_bottom:.2}", stroke: "{color}", stroke_width: "{wick_width}" }
                rect { x: "{s.body_x:.2}", y: "{s.body_y:.2}", width: "{s.body_width:.2}", height: "{s.body_height:.2}", fill: "{color}" }
            }
        }
    });
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();

    rsx! {
        svg {
            class: "candlestick-chart",
            width: "{width}",
            height: "{height}",
            view_box: "0 0 {width} {height}",
            style: "background: {palette.chart_background}; border-radius: 8px;",
            {grid}
            {bodies}
            PriceLine {
                closes: closes,
                scale: scale,
                margin_left: MARGIN_LEFT,
                plot_width: plot_width,
                color: palette.accent.clone(),
                label_color: palette.foreground.clone(),
            }
        }
    }
}
